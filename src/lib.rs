//! Gibbet - a two-player hangman round with a physics ragdoll
//!
//! Core modules:
//! - `sim`: deterministic frame-based simulation (Verlet ragdoll, blood
//!   particles, guessing state machine)
//! - `scene`: gallows scene emitting CPU-side draw primitives
//! - `vault`: word sealing and integrity checking between the two players

pub mod scene;
pub mod sim;
pub mod vault;

pub use sim::{GamePhase, GameState, Outcome, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed frame rate; one `tick` advances the world by one frame
    pub const FRAME_RATE: u32 = 60;

    /// Downward position increment per frame (Verlet gravity)
    pub const GRAVITY: f32 = 0.6;
    /// Implicit-velocity damping factor (slightly under 1 for more swing)
    pub const DAMPING: f32 = 0.92;
    /// Constraint relaxation passes per frame. Fixed stiffness/perf
    /// trade-off, not a convergence loop.
    pub const RELAX_PASSES: usize = 5;
    /// Floor line the body and blood land on once the rope snaps
    pub const FLOOR_Y: f32 = 600.0;
    /// Horizontal velocity kept after floor contact
    pub const FLOOR_FRICTION: f32 = 0.5;

    /// Reveal ("pop") progress gained per frame by each eligible stage
    pub const POP_RATE: f32 = 0.1;
    /// Wrong guesses that complete the figure and end the round
    pub const MAX_WRONG_GUESSES: u32 = 6;

    /// Frames of struggling before the rope gives way
    pub const STRUGGLE_FRAMES: u32 = 120;
    /// Per-frame chance of a blood spurt from the neck while struggling
    pub const SPURT_CHANCE: f64 = 0.3;
    /// Per-frame chance of a head tremor while struggling
    pub const TREMOR_CHANCE: f64 = 0.2;
    /// Blood particles released the moment the rope snaps
    pub const SNAP_BURST: usize = 20;

    /// Downward acceleration on blood particles per frame
    pub const BLOOD_GRAVITY: f32 = 0.2;
    /// Life drained from a blood particle per frame (out of 255)
    pub const BLOOD_DECAY: i32 = 4;

    /// Chance that a sealed word gets one bit flipped in transit
    pub const ATTACK_PROBABILITY: f64 = 0.2;

    /// Where the noose hangs from the gallows beam
    pub const ANCHOR_X: f32 = 250.0;
    pub const ANCHOR_Y: f32 = 100.0;
}
