//! Bubble creation rules.
//!
//! New bubbles appear at the canvas centre with a small random velocity so a
//! freshly added bubble drifts out of the pile. Task bubbles are sized by
//! priority; habit bubbles share one fixed size.

use super::body::{Body, BubbleId};
use super::simulator::Canvas;
use crate::config::SpawnParameters;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Bubble colours as 0xRRGGBB.
pub const BUBBLE_PALETTE: [u32; 8] = [
    0x60A5FA, // blue
    0xC084FC, // purple
    0xF472B6, // pink
    0x4ADE80, // green
    0xFACC15, // yellow
    0xFB923C, // orange
    0xF87171, // red
    0x2DD4BF, // teal
];

/// Palette colour for an arbitrary index, wrapping around.
pub fn palette_color(index: usize) -> u32 {
    BUBBLE_PALETTE[index % BUBBLE_PALETTE.len()]
}

/// Task priority, which sets the bubble size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Rendered diameter of a task bubble with this priority.
    pub fn size(&self) -> f32 {
        match self {
            Self::Low => 100.0,
            Self::Medium => 130.0,
            Self::High => 160.0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size() / 2.0
    }

    /// Get display name for UI
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

/// Places new bodies and rolls their initial velocity.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: StdRng,
    /// Spread of the initial task velocity per axis
    pub task_launch_speed: f32,
    /// Spread of the initial habit velocity per axis
    pub habit_launch_speed: f32,
    /// Diameter of every habit bubble
    pub habit_size: f32,
}

impl Spawner {
    /// Create a spawner seeded from system entropy.
    pub fn new(params: &SpawnParameters) -> Self {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// Create a deterministic spawner.
    pub fn seeded(params: &SpawnParameters, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: &SpawnParameters, rng: StdRng) -> Self {
        Self {
            rng,
            task_launch_speed: params.task_launch_speed as f32,
            habit_launch_speed: params.habit_launch_speed as f32,
            habit_size: params.habit_size as f32,
        }
    }

    /// Create a task body sized by `priority`.
    pub fn task<P>(&mut self, id: BubbleId, priority: Priority, canvas: Canvas, payload: P) -> Body<P> {
        let speed = self.task_launch_speed;
        self.spawn(id, priority.radius(), speed, canvas, payload)
    }

    /// Create a habit body.
    pub fn habit<P>(&mut self, id: BubbleId, canvas: Canvas, payload: P) -> Body<P> {
        let radius = self.habit_size / 2.0;
        let speed = self.habit_launch_speed;
        self.spawn(id, radius, speed, canvas, payload)
    }

    /// Create a body at the canvas centre with velocity in
    /// `[-speed / 2, speed / 2)` on each axis.
    pub fn spawn<P>(
        &mut self,
        id: BubbleId,
        radius: f32,
        speed: f32,
        canvas: Canvas,
        payload: P,
    ) -> Body<P> {
        let velocity = Vec2::new(
            (self.rng.r#gen::<f32>() - 0.5) * speed,
            (self.rng.r#gen::<f32>() - 0.5) * speed,
        );

        Body::with_payload(id, canvas.center(), radius, payload).with_velocity(velocity)
    }
}
