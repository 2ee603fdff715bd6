//! Physics simulation modules
//!
//! Contains the bubble movement model:
//! - Body: Circular body record with opaque payload
//! - Simulator: Per-tick integration, wall bounce and overlap resolution
//! - Drag: Hold, move and throw gestures
//! - Spawn: Sizing and initial velocity of new bubbles

pub mod body;
pub mod drag;
pub mod simulator;
pub mod spawn;

pub use body::{Body, BubbleId};
pub use drag::DragState;
pub use simulator::{BubbleSimulator, Canvas};
pub use spawn::{BUBBLE_PALETTE, Priority, Spawner, palette_color};
