//! Short-lived blood particles with independent ballistic motion

use glam::Vec2;
use rand::Rng;

use crate::consts::{BLOOD_DECAY, BLOOD_GRAVITY, FLOOR_FRICTION, FLOOR_Y};

/// A single blood droplet. `life` counts down from 255 and doubles as the
/// render alpha.
#[derive(Debug, Clone, Copy)]
pub struct BloodParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Red channel, varied per droplet for texture
    pub red: u8,
    pub life: i32,
}

impl BloodParticle {
    /// Spawn a droplet at `pos` with a randomized spray velocity.
    pub fn spawn<R: Rng>(rng: &mut R, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-1.0..3.0)),
            size: rng.random_range(2.0..5.0),
            red: rng.random_range(180..=255),
            life: 255,
        }
    }

    /// One frame of ballistic motion. Droplets splatter on the floor:
    /// vertical motion stops, horizontal motion is damped.
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += BLOOD_GRAVITY;
        self.life -= BLOOD_DECAY;
        if self.pos.y > FLOOR_Y {
            self.pos.y = FLOOR_Y;
            self.vel.x *= FLOOR_FRICTION;
            self.vel.y = 0.0;
        }
    }

    /// Render alpha in [0, 1]
    pub fn alpha(&self) -> f32 {
        self.life.max(0) as f32 / 255.0
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }
}
