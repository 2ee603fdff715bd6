//! Per-tick bubble physics.
//!
//! Each call to [`BubbleSimulator::advance`] runs two passes over the body
//! set:
//!
//! 1. **Integration**: explicit Euler step, velocity damping and a damped
//!    bounce off each canvas wall, applied to every body that is not frozen.
//! 2. **Overlap resolution**: a fixed number of sweeps over all pairs
//!    `(i, j), i < j`, pushing overlapping bodies apart 50/50 along the
//!    contact normal and adding a small repulsive velocity nudge.
//!
//! Corrections are written back immediately, so later pairs in the same sweep
//! see the already-corrected positions of earlier pairs. A final confinement
//! step puts any free body that pass 2 pushed through a wall back on the wall,
//! so free bodies always end a tick inside the canvas. The tuning constants
//! are feel constants, not physical ones.

use super::body::{Body, BubbleId};
use crate::config::PhysicsParameters;
use glam::Vec2;

/// Playfield bounds in canvas coordinates. The origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre of the playfield, where new bodies appear.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a body of `radius` centred at `position` lies inside the walls.
    pub fn contains(&self, position: Vec2, radius: f32) -> bool {
        position.x >= radius
            && position.x <= self.width - radius
            && position.y >= radius
            && position.y <= self.height - radius
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(1000.0, 1000.0)
    }
}

/// Physics stepper for a population of bubbles.
#[derive(Debug, Clone)]
pub struct BubbleSimulator {
    /// Velocity multiplier applied every tick
    pub damping: f32,
    /// Fraction of speed kept after hitting a wall
    pub wall_restitution: f32,
    /// Total repulsive speed one overlapping pair can gain per tick
    pub repulsion_budget: f32,
    /// Overlap resolution sweeps per tick
    pub iterations: u32,
    /// Lower bound on the distance used to normalise the contact normal
    pub min_separation: f32,
}

impl Default for BubbleSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl BubbleSimulator {
    /// Create a simulator with the default tuning constants.
    pub fn new() -> Self {
        Self {
            damping: 0.992,
            wall_restitution: 0.7,
            repulsion_budget: 0.05,
            iterations: 5,
            min_separation: 0.1,
        }
    }

    /// Create a simulator from configured physics parameters.
    pub fn from_config(params: &PhysicsParameters) -> Self {
        Self {
            damping: params.damping as f32,
            wall_restitution: params.wall_restitution as f32,
            repulsion_budget: params.repulsion_budget as f32,
            iterations: params.iterations,
            min_separation: params.min_separation as f32,
        }
    }

    /// Advance `bodies` by one tick in place.
    ///
    /// Count, order, ids, radii and payloads are never changed. A `dragging`
    /// id that matches no body freezes nothing.
    pub fn advance<P>(&self, bodies: &mut [Body<P>], canvas: Canvas, dragging: Option<BubbleId>) {
        self.integrate(bodies, canvas, dragging);
        self.resolve_overlaps(bodies, dragging);
        self.confine(bodies, canvas, dragging);
    }

    /// Snapshot form of [`advance`](Self::advance): returns the next state and
    /// leaves the input untouched.
    pub fn advanced<P: Clone>(
        &self,
        bodies: &[Body<P>],
        canvas: Canvas,
        dragging: Option<BubbleId>,
    ) -> Vec<Body<P>> {
        let mut next = bodies.to_vec();
        self.advance(&mut next, canvas, dragging);
        next
    }

    /// Pass 1: Euler step, damping and wall bounce for every free body.
    pub fn integrate<P>(&self, bodies: &mut [Body<P>], canvas: Canvas, dragging: Option<BubbleId>) {
        for body in bodies.iter_mut() {
            if body.is_frozen(dragging) {
                continue;
            }

            let moved = body.position + body.velocity;
            let damped = body.velocity * self.damping;

            let (x, vx) = self.bounce(moved.x, damped.x, body.radius, canvas.width);
            let (y, vy) = self.bounce(moved.y, damped.y, body.radius, canvas.height);

            body.position = Vec2::new(x, y);
            body.velocity = Vec2::new(vx, vy);
        }
    }

    /// Clamp one axis into `[radius, bound - radius]`, pointing the velocity
    /// back into the field at a wall. The low wall wins when the field is
    /// narrower than the body.
    fn bounce(&self, coord: f32, velocity: f32, radius: f32, bound: f32) -> (f32, f32) {
        let min = radius;
        let max = bound - radius;

        if coord <= min {
            (min, velocity.abs() * self.wall_restitution)
        } else if coord >= max {
            (max, -velocity.abs() * self.wall_restitution)
        } else {
            (coord, velocity)
        }
    }

    /// Put free bodies pushed past a wall back on it, velocity pointing inward.
    ///
    /// No restitution is applied here; bodies already inside are untouched.
    pub fn confine<P>(&self, bodies: &mut [Body<P>], canvas: Canvas, dragging: Option<BubbleId>) {
        for body in bodies.iter_mut() {
            if body.is_frozen(dragging) {
                continue;
            }

            let (x, vx) = confine_axis(body.position.x, body.velocity.x, body.radius, canvas.width);
            let (y, vy) = confine_axis(body.position.y, body.velocity.y, body.radius, canvas.height);

            body.position = Vec2::new(x, y);
            body.velocity = Vec2::new(vx, vy);
        }
    }

    /// Pass 2: iterative pairwise overlap resolution.
    ///
    /// Frozen bodies still block others but receive no correction.
    pub fn resolve_overlaps<P>(&self, bodies: &mut [Body<P>], dragging: Option<BubbleId>) {
        let n = bodies.len();
        let nudge = self.repulsion_budget / self.iterations.max(1) as f32;

        for _ in 0..self.iterations {
            for i in 0..n {
                let (head, tail) = bodies.split_at_mut(i + 1);
                let b1 = &mut head[i];

                for b2 in tail.iter_mut() {
                    self.separate(b1, b2, nudge, dragging);
                }
            }
        }
    }

    /// Push one pair apart if it overlaps.
    fn separate<P>(
        &self,
        b1: &mut Body<P>,
        b2: &mut Body<P>,
        nudge: f32,
        dragging: Option<BubbleId>,
    ) {
        let delta = b2.position - b1.position;
        let distance_sq = delta.length_squared();
        let min_distance = b1.radius + b2.radius;

        if distance_sq >= min_distance * min_distance {
            return;
        }

        let distance = distance_sq.sqrt();
        let overlap = min_distance - distance;

        // Coincident centres give a zero normal, never NaN
        let normal = delta / distance.max(self.min_separation);
        let separation = normal * overlap * 0.5;
        let impulse = normal * nudge;

        if !b1.is_frozen(dragging) {
            b1.apply_correction(-separation, -impulse);
        }
        if !b2.is_frozen(dragging) {
            b2.apply_correction(separation, impulse);
        }
    }
}

fn confine_axis(coord: f32, velocity: f32, radius: f32, bound: f32) -> (f32, f32) {
    let min = radius;
    let max = (bound - radius).max(min);

    if coord < min {
        (min, velocity.abs())
    } else if coord > max {
        (max, -velocity.abs())
    } else {
        (coord, velocity)
    }
}
