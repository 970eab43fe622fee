//! Deterministic scene simulation
//!
//! All animation logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies
//!
//! Durations are measured in seconds of elapsed time. Speeds are in pixels
//! per reference frame and scaled by the measured frame time.

pub mod anchor;
pub mod bubble;
pub mod curve;
pub mod fish;
pub mod jellyfish;
pub mod shark;
pub mod state;
pub mod tick;
pub mod timer;
pub mod viewport;

pub use anchor::{Anchor, AnchorPhase};
pub use bubble::{Bubble, BubbleFrame};
pub use curve::{ScareCurve, there_and_back};
pub use fish::{Fish, Scare, random_velocity};
pub use jellyfish::{JellyPhase, Jellyfish};
pub use shark::{Shark, SharkPhase};
pub use state::{SceneState, SpriteKey};
pub use tick::{TickInput, tick};
pub use timer::SpawnTimer;
pub use viewport::Viewport;
