//! Circular bodies moved by the bubble simulator.
//!
//! A [`Body`] carries only what the physics needs (position, velocity,
//! radius) plus a caller-computed `settled` flag and an opaque payload.
//! Tasks and habits share this one record; the simulator never looks at the
//! payload, so both populations move identically.

use glam::Vec2;

/// Unique identifier for a body on the board.
pub type BubbleId = u32;

/// Circular, labelled, movable object.
#[derive(Debug, Clone, PartialEq)]
pub struct Body<P = ()> {
    /// Stable identifier, never changed by the simulator
    pub id: BubbleId,
    /// Centre in canvas coordinates
    pub position: Vec2,
    /// Displacement per tick
    pub velocity: Vec2,
    /// Half of the rendered size, fixed for the body's lifetime
    pub radius: f32,
    /// Held in place because its task is complete (caller-computed)
    pub settled: bool,
    /// Opaque data passed through untouched
    pub payload: P,
}

impl Body<()> {
    /// Create a payload-free body at rest.
    pub fn new(id: BubbleId, position: Vec2, radius: f32) -> Self {
        Body::with_payload(id, position, radius, ())
    }
}

impl<P> Body<P> {
    /// Create a body at rest carrying `payload`.
    pub fn with_payload(id: BubbleId, position: Vec2, radius: f32, payload: P) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            radius,
            settled: false,
            payload,
        }
    }

    /// Set the initial velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Rendered diameter.
    pub fn size(&self) -> f32 {
        2.0 * self.radius
    }

    /// Whether this body skips integration and correction this tick.
    pub fn is_frozen(&self, dragging: Option<BubbleId>) -> bool {
        self.settled || dragging == Some(self.id)
    }

    /// Check if this body overlaps with another.
    pub fn overlaps<Q>(&self, other: &Body<Q>) -> bool {
        self.overlap_with(other) > 0.0
    }

    /// Penetration depth with another body (positive = overlapping).
    pub fn overlap_with<Q>(&self, other: &Body<Q>) -> f32 {
        self.radius + other.radius - self.position.distance(other.position)
    }

    /// Shift position and velocity by the given deltas.
    pub fn apply_correction(&mut self, offset: Vec2, impulse: Vec2) {
        self.position += offset;
        self.velocity += impulse;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_creation() {
        let body = Body::new(7, Vec2::new(10.0, 20.0), 50.0);
        assert_eq!(body.id, 7);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!((body.size() - 100.0).abs() < 1e-6);
        assert!(!body.settled);
    }

    #[test]
    fn test_body_overlap() {
        let a = Body::new(0, Vec2::ZERO, 50.0);
        let b = Body::new(1, Vec2::new(80.0, 0.0), 50.0);
        assert!(a.overlaps(&b));
        assert!((a.overlap_with(&b) - 20.0).abs() < 1e-4);

        let c = Body::new(2, Vec2::new(150.0, 0.0), 50.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_frozen_by_drag_or_settled() {
        let mut body = Body::new(3, Vec2::ZERO, 10.0);
        assert!(!body.is_frozen(None));
        assert!(!body.is_frozen(Some(4)));
        assert!(body.is_frozen(Some(3)));

        body.settled = true;
        assert!(body.is_frozen(None));
    }

    #[test]
    fn test_apply_correction() {
        let mut body = Body::new(0, Vec2::new(1.0, 1.0), 5.0).with_velocity(Vec2::X);
        body.apply_correction(Vec2::new(-0.5, 2.0), Vec2::new(0.01, -0.01));
        assert_eq!(body.position, Vec2::new(0.5, 3.0));
        assert!((body.velocity.x - 1.01).abs() < 1e-6);
        assert!((body.velocity.y + 0.01).abs() < 1e-6);
    }
}
