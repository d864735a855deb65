//! Point-mass and distance-constraint primitives for the ragdoll
//!
//! Positions carry their previous value so velocity is implicit (Verlet
//! integration); constraints are relaxed iteratively rather than solved
//! exactly.

use glam::Vec2;

use crate::consts::{FLOOR_FRICTION, FLOOR_Y};

// Vertex arena indices. The skeleton topology is a fixed design constant;
// these names replace positional indexing into the arena.
pub const ANCHOR: usize = 0;
pub const HEAD: usize = 1;
pub const NECK: usize = 2;
pub const PELVIS: usize = 3;
pub const L_ELBOW: usize = 4;
pub const L_HAND: usize = 5;
pub const R_ELBOW: usize = 6;
pub const R_HAND: usize = 7;
pub const L_KNEE: usize = 8;
pub const L_FOOT: usize = 9;
pub const R_KNEE: usize = 10;
pub const R_FOOT: usize = 11;
pub const VERTEX_COUNT: usize = 12;

// Constraint list indices.
pub const ROPE: usize = 0;
pub const HEAD_NECK: usize = 1;
pub const TORSO: usize = 2;
pub const L_UPPER_ARM: usize = 3;
pub const L_FOREARM: usize = 4;
pub const R_UPPER_ARM: usize = 5;
pub const R_FOREARM: usize = 6;
pub const L_THIGH: usize = 7;
pub const L_SHIN: usize = 8;
pub const R_THIGH: usize = 9;
pub const R_SHIN: usize = 10;
pub const CONSTRAINT_COUNT: usize = 11;

/// Rope rest length from the anchor down to the head
pub const ROPE_LENGTH: f32 = 40.0;

/// A 2D point mass. Velocity is the difference from `prev`.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub pos: Vec2,
    pub prev: Vec2,
    pub locked: bool,
}

impl Vertex {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            prev: pos,
            locked: false,
        }
    }

    pub fn pinned(pos: Vec2) -> Self {
        Self {
            pos,
            prev: pos,
            locked: true,
        }
    }

    /// Advance one frame: implicit velocity, damping, gravity. Locked
    /// vertices never move. When `floor` is set, a vertex carried past the
    /// floor line is parked on it with horizontal friction.
    pub fn integrate(&mut self, gravity: f32, damping: f32, floor: bool) {
        if self.locked {
            return;
        }
        let vel = (self.pos - self.prev) * damping;
        self.prev = self.pos;
        self.pos += vel;
        self.pos.y += gravity;
        if floor && self.pos.y > FLOOR_Y {
            self.pos.y = FLOOR_Y;
            self.pos.x -= vel.x * FLOOR_FRICTION;
        }
    }
}

/// A fixed-distance link between two arena vertices. `active` is the
/// one-way Active/Removed state; the rope is the only constraint that is
/// ever removed, and removal is irreversible.
#[derive(Debug, Clone, Copy)]
pub struct Constraint {
    pub a: usize,
    pub b: usize,
    pub rest: f32,
    pub active: bool,
}

impl Constraint {
    /// Link two vertices at their current separation.
    pub fn between(vertices: &[Vertex], a: usize, b: usize) -> Self {
        let rest = vertices[a].pos.distance(vertices[b].pos);
        debug_assert!(rest > 0.0, "degenerate rest length for {a}-{b}");
        Self {
            a,
            b,
            rest,
            active: true,
        }
    }

    /// Link two vertices with an explicit rest length (the rope).
    pub fn with_rest(a: usize, b: usize, rest: f32) -> Self {
        debug_assert!(rest > 0.0);
        Self {
            a,
            b,
            rest,
            active: true,
        }
    }
}

/// One relaxation pass for a single constraint: push both unlocked
/// endpoints half the error apart along the link. Coincident endpoints are
/// skipped for the pass; the condition self-corrects next frame.
pub fn satisfy(vertices: &mut [Vertex], c: &Constraint) {
    let delta = vertices[c.b].pos - vertices[c.a].pos;
    let dist = delta.length();
    if dist == 0.0 {
        return;
    }
    let diff = (c.rest - dist) / dist * 0.5;
    let offset = delta * diff;
    if !vertices[c.a].locked {
        vertices[c.a].pos -= offset;
    }
    if !vertices[c.b].locked {
        vertices[c.b].pos += offset;
    }
}

/// Build the 12-vertex hanged figure below an anchor point. Offsets are
/// hand-tuned design constants, not runtime configuration.
pub fn assemble(anchor: Vec2) -> (Vec<Vertex>, Vec<Constraint>) {
    let head = anchor + Vec2::new(0.0, ROPE_LENGTH);

    let mut vertices = Vec::with_capacity(VERTEX_COUNT);
    vertices.push(Vertex::pinned(anchor)); // ANCHOR
    vertices.push(Vertex::new(head)); // HEAD
    vertices.push(Vertex::new(head + Vec2::new(0.0, 25.0))); // NECK
    vertices.push(Vertex::new(head + Vec2::new(0.0, 90.0))); // PELVIS
    vertices.push(Vertex::new(head + Vec2::new(-30.0, 40.0))); // L_ELBOW
    vertices.push(Vertex::new(head + Vec2::new(-50.0, 60.0))); // L_HAND
    vertices.push(Vertex::new(head + Vec2::new(30.0, 40.0))); // R_ELBOW
    vertices.push(Vertex::new(head + Vec2::new(50.0, 60.0))); // R_HAND
    vertices.push(Vertex::new(head + Vec2::new(-15.0, 130.0))); // L_KNEE
    vertices.push(Vertex::new(head + Vec2::new(-15.0, 170.0))); // L_FOOT
    vertices.push(Vertex::new(head + Vec2::new(15.0, 130.0))); // R_KNEE
    vertices.push(Vertex::new(head + Vec2::new(15.0, 170.0))); // R_FOOT
    debug_assert_eq!(vertices.len(), VERTEX_COUNT);

    let constraints = vec![
        Constraint::with_rest(ANCHOR, HEAD, ROPE_LENGTH), // ROPE
        Constraint::between(&vertices, HEAD, NECK),
        Constraint::between(&vertices, NECK, PELVIS), // TORSO
        Constraint::between(&vertices, NECK, L_ELBOW),
        Constraint::between(&vertices, L_ELBOW, L_HAND),
        Constraint::between(&vertices, NECK, R_ELBOW),
        Constraint::between(&vertices, R_ELBOW, R_HAND),
        Constraint::between(&vertices, PELVIS, L_KNEE),
        Constraint::between(&vertices, L_KNEE, L_FOOT),
        Constraint::between(&vertices, PELVIS, R_KNEE),
        Constraint::between(&vertices, R_KNEE, R_FOOT),
    ];
    debug_assert_eq!(constraints.len(), CONSTRAINT_COUNT);

    (vertices, constraints)
}
