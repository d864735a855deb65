//! The hanged ragdoll: vertex arena, constraint relaxation, per-limb
//! reveal progress and the death sequence.
//!
//! The body is driven once per frame by the external wrong-guess count.
//! Limbs "grow into existence" as that count rises; once the figure is
//! complete the death state machine takes over: struggle, rope snap, fall.

use std::cmp::Ordering;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particle::BloodParticle;
use super::skeleton::{self, Constraint, Vertex};
use crate::consts::{
    DAMPING, FLOOR_Y, GRAVITY, MAX_WRONG_GUESSES, POP_RATE, RELAX_PASSES, SNAP_BURST,
    SPURT_CHANCE, STRUGGLE_FRAMES, TREMOR_CHANCE,
};

/// Body parts in reveal order. Each wrong guess makes the next one grow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limb {
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Limb {
    pub const ALL: [Limb; 6] = [
        Limb::Head,
        Limb::Torso,
        Limb::LeftArm,
        Limb::RightArm,
        Limb::LeftLeg,
        Limb::RightLeg,
    ];

    /// Reveal stage (1..=6); the limb grows while `wrong_count >= stage`.
    pub fn stage(self) -> usize {
        match self {
            Limb::Head => 1,
            Limb::Torso => 2,
            Limb::LeftArm => 3,
            Limb::RightArm => 4,
            Limb::LeftLeg => 5,
            Limb::RightLeg => 6,
        }
    }

    /// Constraints drawn for this limb. The head has none; it renders as a
    /// circle around the head vertex.
    pub fn constraints(self) -> &'static [usize] {
        match self {
            Limb::Head => &[],
            Limb::Torso => &[skeleton::TORSO],
            Limb::LeftArm => &[skeleton::L_UPPER_ARM, skeleton::L_FOREARM],
            Limb::RightArm => &[skeleton::R_UPPER_ARM, skeleton::R_FOREARM],
            Limb::LeftLeg => &[skeleton::L_THIGH, skeleton::L_SHIN],
            Limb::RightLeg => &[skeleton::R_THIGH, skeleton::R_SHIN],
        }
    }

    /// Vertex marked with a dot once the limb is mostly grown.
    pub fn tip(self) -> Option<usize> {
        match self {
            Limb::LeftArm => Some(skeleton::L_HAND),
            Limb::RightArm => Some(skeleton::R_HAND),
            Limb::LeftLeg => Some(skeleton::L_FOOT),
            Limb::RightLeg => Some(skeleton::R_FOOT),
            Limb::Head | Limb::Torso => None,
        }
    }
}

/// The full physics body hanging from the gallows anchor.
#[derive(Debug, Clone)]
pub struct Ragdoll {
    vertices: Vec<Vertex>,
    constraints: Vec<Constraint>,
    /// Reveal progress per stage, indexed 0..=6 (stage 0 is the empty
    /// figure). Monotonically non-decreasing until a full rebuild.
    pop: [f32; 7],
    death_timer: u32,
    rope_snapped: bool,
    blood: Vec<BloodParticle>,
    rng: Pcg32,
}

impl Ragdoll {
    pub fn new(anchor: Vec2, seed: u64) -> Self {
        let (vertices, constraints) = skeleton::assemble(anchor);
        Self {
            vertices,
            constraints,
            pop: [0.0; 7],
            death_timer: 0,
            rope_snapped: false,
            blood: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Advance one frame. `wrong_count` is the externally supplied
    /// wrong-guess count; negative values are treated as zero (this is an
    /// animation driver, not a validator).
    pub fn step(&mut self, wrong_count: i32) {
        let wrong = wrong_count.max(0) as u32;

        // Reveal: every eligible, not-yet-complete stage grows this frame,
        // so stages animate concurrently if the count jumps by more than one.
        for (stage, progress) in self.pop.iter_mut().enumerate() {
            if stage as u32 <= wrong && *progress < 1.0 {
                *progress = (*progress + POP_RATE).min(1.0);
            }
        }

        // Blood
        for b in &mut self.blood {
            b.update();
        }
        self.blood.retain(|b| !b.is_dead());

        // Verlet integration; the floor only exists once the rope snapped
        for v in &mut self.vertices {
            v.integrate(GRAVITY, DAMPING, self.rope_snapped);
        }

        // Fixed relaxation pass count over the active constraint set
        for _ in 0..RELAX_PASSES {
            for i in 0..self.constraints.len() {
                let c = self.constraints[i];
                if c.active {
                    skeleton::satisfy(&mut self.vertices, &c);
                }
            }
        }

        // Relaxation can push a landed vertex back through the floor;
        // re-park it so no step ends with the body below the line.
        if self.rope_snapped {
            for v in &mut self.vertices {
                if v.pos.y > FLOOR_Y {
                    v.pos.y = FLOOR_Y;
                }
            }
        }

        // Death sequence, once the figure is complete
        if wrong >= MAX_WRONG_GUESSES && self.pop[6] >= 1.0 {
            self.death_timer += 1;
            match self.death_timer.cmp(&STRUGGLE_FRAMES) {
                Ordering::Less => self.struggle(),
                Ordering::Equal => self.snap_rope(),
                Ordering::Greater => {} // gravity and the floor take over
            }
        }
    }

    /// Struggle phase: blood spurts, hands clawing for the noose, tremor.
    fn struggle(&mut self) {
        if self.rng.random_bool(SPURT_CHANCE) {
            let neck = self.vertices[skeleton::NECK].pos;
            self.blood.push(BloodParticle::spawn(&mut self.rng, neck));
        }

        let head = self.vertices[skeleton::HEAD].pos;

        // Hands reach up toward the rope, elbows bend after them
        self.ease_y(skeleton::L_HAND, head.y - 10.0, 0.05);
        self.ease_y(skeleton::R_HAND, head.y - 10.0, 0.05);
        self.ease_x(skeleton::L_HAND, head.x - 20.0, 0.03);
        self.ease_x(skeleton::R_HAND, head.x + 20.0, 0.03);
        self.ease_y(skeleton::L_ELBOW, head.y + 10.0, 0.03);
        self.ease_y(skeleton::R_ELBOW, head.y + 10.0, 0.03);

        if self.rng.random_bool(TREMOR_CHANCE) {
            let jitter = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
            self.vertices[skeleton::HEAD].pos.x += jitter;
        }
    }

    /// Rope snap: fires exactly once, at the struggle/fall boundary.
    fn snap_rope(&mut self) {
        log::info!("rope snapped after {} frames of struggle", self.death_timer);
        self.rope_snapped = true;
        self.constraints[skeleton::ROPE].active = false;
        self.vertices[skeleton::HEAD].locked = false;
        let neck = self.vertices[skeleton::NECK].pos;
        for _ in 0..SNAP_BURST {
            self.blood.push(BloodParticle::spawn(&mut self.rng, neck));
        }
    }

    /// Exponential approach of a vertex toward a horizontal target.
    fn ease_x(&mut self, v: usize, target: f32, rate: f32) {
        let p = &mut self.vertices[v].pos;
        p.x += (target - p.x) * rate;
    }

    /// Exponential approach of a vertex toward a vertical target.
    fn ease_y(&mut self, v: usize, target: f32, rate: f32) {
        let p = &mut self.vertices[v].pos;
        p.y += (target - p.y) * rate;
    }

    /// Current position of an arena vertex (see `sim::skeleton` indices).
    pub fn vertex(&self, index: usize) -> Vec2 {
        self.vertices[index].pos
    }

    /// Reveal progress for a limb, in [0, 1]
    pub fn limb_progress(&self, limb: Limb) -> f32 {
        self.pop[limb.stage()]
    }

    /// Partially grown line segments for a limb: each segment starts at the
    /// constraint's first vertex and extends toward the second by the
    /// limb's reveal fraction. This is the "growing outward" render
    /// contract, not a physically meaningful partial body.
    pub fn limb_segments(&self, limb: Limb) -> Vec<(Vec2, Vec2)> {
        let t = self.limb_progress(limb);
        limb.constraints()
            .iter()
            .map(|&ci| {
                let c = &self.constraints[ci];
                let start = self.vertices[c.a].pos;
                (start, start.lerp(self.vertices[c.b].pos, t))
            })
            .collect()
    }

    pub fn is_rope_snapped(&self) -> bool {
        self.rope_snapped
    }

    pub fn death_timer(&self) -> u32 {
        self.death_timer
    }

    /// Live blood particles, for rendering
    pub fn blood(&self) -> &[BloodParticle] {
        &self.blood
    }

    #[cfg(test)]
    fn constraint(&self, index: usize) -> &Constraint {
        &self.constraints[index]
    }
}
