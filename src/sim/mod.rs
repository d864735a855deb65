//! Deterministic simulation module
//!
//! All game logic lives here, frame-based and seeded:
//! - fixed frame rate, one `tick` per rendered frame
//! - seeded RNG only (blood spray, tremor, attack simulation)
//! - no rendering or platform dependencies

pub mod body;
pub mod particle;
pub mod skeleton;
pub mod state;
pub mod tick;

pub use body::{Limb, Ragdoll};
pub use particle::BloodParticle;
pub use state::{GamePhase, GameState, Outcome};
pub use tick::{TickInput, tick};
