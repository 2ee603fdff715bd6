//! Drag-and-throw gesture protocol.
//!
//! While a body is held the simulator freezes it (see
//! [`Body::is_frozen`](super::body::Body::is_frozen)); the gesture layer moves
//! it directly. On release the body is launched with the last per-frame drag
//! delta scaled by a fixed multiplier, and the next tick integrates that
//! velocity as usual.

use super::body::{Body, BubbleId};
use glam::Vec2;

/// Default scale from last drag delta to launch velocity.
pub const DEFAULT_LAUNCH_MULTIPLIER: f32 = 5.0;

/// Tracks the single body currently held by the user.
#[derive(Debug, Clone)]
pub struct DragState {
    dragging: Option<BubbleId>,
    last_delta: Vec2,
    /// Scale applied to the last drag delta on release
    pub launch_multiplier: f32,
}

impl Default for DragState {
    fn default() -> Self {
        Self::new(DEFAULT_LAUNCH_MULTIPLIER)
    }
}

impl DragState {
    pub fn new(launch_multiplier: f32) -> Self {
        Self {
            dragging: None,
            last_delta: Vec2::ZERO,
            launch_multiplier,
        }
    }

    /// Id of the held body, if any.
    pub fn dragging(&self) -> Option<BubbleId> {
        self.dragging
    }

    /// Last observed per-frame drag movement.
    pub fn last_delta(&self) -> Vec2 {
        self.last_delta
    }

    /// Begin holding `id`. Any previous hold is dropped without a launch.
    pub fn start(&mut self, id: BubbleId) {
        if let Some(previous) = self.dragging.replace(id)
            && previous != id
        {
            log::debug!("Drag of bubble {} replaced by {}", previous, id);
        }
        self.last_delta = Vec2::ZERO;
    }

    /// Whether `id` is the held body.
    pub fn is_holding(&self, id: BubbleId) -> bool {
        self.dragging == Some(id)
    }

    /// Move held body `id` to `target`, zeroing its velocity.
    ///
    /// Returns false if `id` is not held or no body in `bodies` has that id.
    pub fn drag_to<P>(&mut self, bodies: &mut [Body<P>], id: BubbleId, target: Vec2) -> bool {
        if !self.is_holding(id) {
            return false;
        }
        let Some(body) = bodies.iter_mut().find(|b| b.id == id) else {
            return false;
        };

        self.last_delta = target - body.position;
        body.position = target;
        body.velocity = Vec2::ZERO;
        true
    }

    /// Release body `id` and launch it from the last drag delta.
    ///
    /// Returns the launch velocity, or `None` if `id` is not held or the body
    /// is not in `bodies`.
    pub fn end<P>(&mut self, bodies: &mut [Body<P>], id: BubbleId) -> Option<Vec2> {
        let impulse = self.launch_impulse(self.last_delta);
        self.end_with_velocity(bodies, id, impulse)
    }

    /// Release held body `id` with a velocity computed by the caller.
    ///
    /// The hold is kept if the body is not in `bodies`, so the caller can try
    /// another population.
    pub fn end_with_velocity<P>(
        &mut self,
        bodies: &mut [Body<P>],
        id: BubbleId,
        velocity: Vec2,
    ) -> Option<Vec2> {
        if !self.is_holding(id) {
            return None;
        }
        let body = bodies.iter_mut().find(|b| b.id == id)?;
        body.velocity = velocity;
        self.release(id);
        Some(velocity)
    }

    /// Clear the hold on `id` without touching any body.
    pub fn release(&mut self, id: BubbleId) {
        if self.dragging == Some(id) {
            self.dragging = None;
            self.last_delta = Vec2::ZERO;
        }
    }

    /// Launch velocity for a final per-frame drag delta.
    pub fn launch_impulse(&self, delta: Vec2) -> Vec2 {
        delta * self.launch_multiplier
    }
}
