//! Task Bubble Simulation Library
//!
//! Tasks and habits drawn as draggable bubbles on a 2D canvas:
//! - Per-tick bubble physics with wall bounce and overlap resolution
//! - Drag-and-throw gestures
//! - Software rendering and PNG export of snapshots

pub mod board;
pub mod config;
pub mod export;
pub mod physics;
pub mod render;

pub use board::{BubbleBoard, HabitBubble, TaskBubble};
pub use config::SimulationConfig;
pub use physics::{Body, BubbleId, BubbleSimulator, Canvas};
