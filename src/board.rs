//! The bubble board: task and habit populations sharing one canvas.
//!
//! The two populations never collide with each other. Each tick runs one
//! independent simulator pass per population with the same bounds and the
//! same held id. Persistence and reminders live outside this crate; the board
//! only owns what the physics and the gesture layer need.

use crate::config::SimulationConfig;
use crate::physics::{Body, BubbleId, BubbleSimulator, Canvas, DragState, Priority, Spawner};
use glam::Vec2;

/// Payload of a task bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskBubble {
    pub label: String,
    /// Colour as 0xRRGGBB
    pub color: u32,
    pub priority: Priority,
    pub completed: bool,
}

/// Payload of a habit bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitBubble {
    pub label: String,
    /// Colour as 0xRRGGBB
    pub color: u32,
    /// Scheduled weekdays, 0 = Sunday
    pub days: Vec<u8>,
    pub completed_today: bool,
}

/// Anything the renderer can draw.
pub trait BubbleStyle {
    fn label(&self) -> &str;
    fn color(&self) -> u32;
    /// Done for now; board snapshots leave these off the canvas.
    fn completed(&self) -> bool;
}

impl BubbleStyle for TaskBubble {
    fn label(&self) -> &str {
        &self.label
    }

    fn color(&self) -> u32 {
        self.color
    }

    fn completed(&self) -> bool {
        self.completed
    }
}

impl BubbleStyle for HabitBubble {
    fn label(&self) -> &str {
        &self.label
    }

    fn color(&self) -> u32 {
        self.color
    }

    fn completed(&self) -> bool {
        self.completed_today
    }
}

/// Owns both populations and advances them once per tick.
#[derive(Debug)]
pub struct BubbleBoard {
    simulator: BubbleSimulator,
    spawner: Spawner,
    drag: DragState,
    canvas: Canvas,
    inset: f32,
    tasks: Vec<Body<TaskBubble>>,
    habits: Vec<Body<HabitBubble>>,
    next_id: BubbleId,
    ticks: u64,
}

impl BubbleBoard {
    /// Create an empty board from configuration.
    pub fn new(config: &SimulationConfig) -> Self {
        let spawner = match config.seed {
            Some(seed) => Spawner::seeded(&config.spawn, seed),
            None => Spawner::new(&config.spawn),
        };

        Self {
            simulator: BubbleSimulator::from_config(&config.physics),
            spawner,
            drag: DragState::new(config.gesture.launch_multiplier as f32),
            canvas: Canvas::new(config.canvas.width as f32, config.canvas.height as f32),
            inset: config.canvas.inset as f32,
            tasks: Vec::new(),
            habits: Vec::new(),
            next_id: 0,
            ticks: 0,
        }
    }

    /// Current playfield bounds.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Fit the playfield to a viewport, minus the configured inset.
    ///
    /// Bodies left outside the new bounds snap back in on the next tick.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.set_canvas(Canvas::new(
            viewport_width - self.inset,
            viewport_height - self.inset,
        ));
    }

    /// Set the playfield bounds directly.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        log::debug!("Canvas resized to {}x{}", canvas.width, canvas.height);
        self.canvas = canvas;
    }

    pub fn simulator(&self) -> &BubbleSimulator {
        &self.simulator
    }

    pub fn tasks(&self) -> &[Body<TaskBubble>] {
        &self.tasks
    }

    pub fn habits(&self) -> &[Body<HabitBubble>] {
        &self.habits
    }

    pub fn task(&self, id: BubbleId) -> Option<&Body<TaskBubble>> {
        self.tasks.iter().find(|b| b.id == id)
    }

    pub fn habit(&self, id: BubbleId) -> Option<&Body<HabitBubble>> {
        self.habits.iter().find(|b| b.id == id)
    }

    /// Whether any population holds `id`.
    pub fn contains(&self, id: BubbleId) -> bool {
        self.task(id).is_some() || self.habit(id).is_some()
    }

    /// Total bubbles on the board.
    pub fn len(&self) -> usize {
        self.tasks.len() + self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of ticks advanced so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Id of the held bubble, if any.
    pub fn dragging(&self) -> Option<BubbleId> {
        self.drag.dragging()
    }

    /// Next free id, skipping ids taken by inserted bodies.
    fn allocate_id(&mut self) -> BubbleId {
        let mut id = self.next_id;
        while self.contains(id) {
            id = id.wrapping_add(1);
        }
        self.next_id = id.wrapping_add(1);
        id
    }

    /// Create a task bubble at the canvas centre.
    ///
    /// Returns the ID of the new bubble.
    pub fn add_task(&mut self, label: impl Into<String>, priority: Priority, color: u32) -> BubbleId {
        let id = self.allocate_id();
        let payload = TaskBubble {
            label: label.into(),
            color,
            priority,
            completed: false,
        };
        let body = self.spawner.task(id, priority, self.canvas, payload);

        log::debug!(
            "Added task {} '{}' (r={}, v=({:.2}, {:.2}))",
            id,
            body.payload.label,
            body.radius,
            body.velocity.x,
            body.velocity.y
        );
        self.tasks.push(body);
        id
    }

    /// Create a habit bubble at the canvas centre.
    pub fn add_habit(&mut self, label: impl Into<String>, days: Vec<u8>, color: u32) -> BubbleId {
        let id = self.allocate_id();
        let payload = HabitBubble {
            label: label.into(),
            color,
            days,
            completed_today: false,
        };
        let body = self.spawner.habit(id, self.canvas, payload);

        log::debug!("Added habit {} '{}'", id, body.payload.label);
        self.habits.push(body);
        id
    }

    /// Insert an externally built task body, e.g. one restored from storage.
    ///
    /// A completed task comes back settled. Later ids are allocated above the
    /// inserted one. Returns false, leaving the board unchanged, if the id is
    /// already in use.
    pub fn insert_task(&mut self, mut body: Body<TaskBubble>) -> bool {
        if !self.reserve_id(body.id) {
            return false;
        }
        body.settled = body.payload.completed;
        self.tasks.push(body);
        true
    }

    /// Insert an externally built habit body. Habits never settle.
    pub fn insert_habit(&mut self, mut body: Body<HabitBubble>) -> bool {
        if !self.reserve_id(body.id) {
            return false;
        }
        body.settled = false;
        self.habits.push(body);
        true
    }

    fn reserve_id(&mut self, id: BubbleId) -> bool {
        if self.contains(id) {
            log::warn!("Insert rejected: bubble {} already exists", id);
            return false;
        }
        self.next_id = self.next_id.max(id.saturating_add(1));
        true
    }

    /// Delete a bubble from whichever population holds it.
    ///
    /// Returns true if the bubble was found and removed.
    pub fn remove(&mut self, id: BubbleId) -> bool {
        let removed = if let Some(idx) = self.tasks.iter().position(|b| b.id == id) {
            self.tasks.remove(idx);
            true
        } else if let Some(idx) = self.habits.iter().position(|b| b.id == id) {
            self.habits.remove(idx);
            true
        } else {
            false
        };

        if removed {
            self.drag.release(id);
            log::debug!("Removed bubble {}", id);
        } else {
            log::warn!("Remove requested for unknown bubble {}", id);
        }
        removed
    }

    /// Flip a task's completion. Completed tasks stop moving.
    ///
    /// Returns the new state, or `None` for an unknown id.
    pub fn toggle_task_complete(&mut self, id: BubbleId) -> Option<bool> {
        let body = self.tasks.iter_mut().find(|b| b.id == id)?;
        body.payload.completed = !body.payload.completed;
        body.settled = body.payload.completed;
        Some(body.payload.completed)
    }

    /// Flip a habit's completion for today. Habits keep moving either way.
    pub fn toggle_habit_complete(&mut self, id: BubbleId) -> Option<bool> {
        let body = self.habits.iter_mut().find(|b| b.id == id)?;
        body.payload.completed_today = !body.payload.completed_today;
        Some(body.payload.completed_today)
    }

    /// Start holding a bubble.
    pub fn start_drag(&mut self, id: BubbleId) -> bool {
        if !self.contains(id) {
            log::warn!("Drag start on unknown bubble {}", id);
            return false;
        }
        self.drag.start(id);
        true
    }

    /// Move the held bubble to `(x, y)` and zero its velocity.
    ///
    /// Returns false unless `id` is the held bubble.
    pub fn drag_to(&mut self, id: BubbleId, x: f32, y: f32) -> bool {
        let target = Vec2::new(x, y);
        self.drag.drag_to(&mut self.tasks, id, target) || self.drag.drag_to(&mut self.habits, id, target)
    }

    /// Release the held bubble, launching it from the last drag movement.
    ///
    /// A release for any other id is ignored and returns `None`.
    pub fn end_drag(&mut self, id: BubbleId) -> Option<Vec2> {
        let impulse = self.drag.launch_impulse(self.drag.last_delta());
        self.end_drag_with_velocity(id, impulse.x, impulse.y)
    }

    /// Release a bubble with a velocity measured by the gesture layer.
    pub fn end_drag_with_velocity(&mut self, id: BubbleId, vx: f32, vy: f32) -> Option<Vec2> {
        let velocity = Vec2::new(vx, vy);
        let launched = self
            .drag
            .end_with_velocity(&mut self.tasks, id, velocity)
            .or_else(|| self.drag.end_with_velocity(&mut self.habits, id, velocity));

        match launched {
            Some(v) => log::debug!("Launched bubble {} at ({:.2}, {:.2})", id, v.x, v.y),
            None => log::debug!("Ignored drag end on bubble {} (not held)", id),
        }
        launched
    }

    /// Advance both populations by one tick.
    pub fn tick(&mut self) {
        let dragging = self.drag.dragging();
        self.simulator.advance(&mut self.tasks, self.canvas, dragging);
        self.simulator.advance(&mut self.habits, self.canvas, dragging);
        self.ticks += 1;

        log::trace!(
            "Tick {}: {} tasks, {} habits",
            self.ticks,
            self.tasks.len(),
            self.habits.len()
        );
    }

    /// Total kinetic measure (sum of squared speeds) of both populations.
    pub fn kinetic_energy(&self) -> f32 {
        let tasks: f32 = self.tasks.iter().map(|b| b.velocity.length_squared()).sum();
        let habits: f32 = self.habits.iter().map(|b| b.velocity.length_squared()).sum();
        tasks + habits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::palette_color;

    fn board() -> BubbleBoard {
        let config = SimulationConfig {
            seed: Some(1),
            ..SimulationConfig::default()
        };
        BubbleBoard::new(&config)
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut board = board();
        let a = board.add_task("write report", Priority::High, palette_color(0));
        let b = board.add_habit("stretch", vec![1, 3, 5], palette_color(1));
        let c = board.add_task("call bank", Priority::Low, palette_color(2));

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(board.tasks().len(), 2);
        assert_eq!(board.habits().len(), 1);
        assert_eq!(board.task(a).unwrap().position, board.canvas().center());
    }

    #[test]
    fn test_remove_from_either_population() {
        let mut board = board();
        let task = board.add_task("a", Priority::Medium, 0);
        let habit = board.add_habit("b", vec![0], 0);

        assert!(board.remove(habit));
        assert!(board.remove(task));
        assert!(!board.remove(task));
        assert!(board.is_empty());
    }

    #[test]
    fn test_populations_do_not_collide() {
        let mut board = board();
        let task = Body::with_payload(
            0,
            Vec2::new(500.0, 500.0),
            50.0,
            TaskBubble {
                label: "t".into(),
                color: 0,
                priority: Priority::Low,
                completed: false,
            },
        );
        let habit = Body::with_payload(
            1,
            Vec2::new(500.0, 500.0),
            45.0,
            HabitBubble {
                label: "h".into(),
                color: 0,
                days: vec![],
                completed_today: false,
            },
        );
        board.insert_task(task);
        board.insert_habit(habit);

        board.tick();

        assert_eq!(board.task(0).unwrap().position, Vec2::new(500.0, 500.0));
        assert_eq!(board.habit(1).unwrap().position, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_completed_task_stops_moving() {
        let mut board = board();
        let id = board.add_task("done soon", Priority::Medium, 0);
        assert_eq!(board.toggle_task_complete(id), Some(true));

        let before = board.task(id).unwrap().clone();
        for _ in 0..10 {
            board.tick();
        }
        assert_eq!(board.task(id).unwrap(), &before);

        assert_eq!(board.toggle_task_complete(id), Some(false));
        assert!(!board.task(id).unwrap().settled);
    }

    #[test]
    fn test_completed_habit_keeps_moving() {
        let mut board = board();
        let id = board.add_habit("walk", vec![2], 0);
        assert_eq!(board.toggle_habit_complete(id), Some(true));
        board.start_drag(id);
        board.end_drag_with_velocity(id, 1.0, 0.0);

        let before = board.habit(id).unwrap().position;
        board.tick();
        let after = board.habit(id).unwrap().position;

        assert!(!board.habit(id).unwrap().settled);
        assert_ne!(before, after);
    }

    #[test]
    fn test_drag_and_throw() {
        let mut board = board();
        let id = board.add_task("throw me", Priority::Low, 0);

        assert!(board.start_drag(id));
        assert!(board.drag_to(id, 300.0, 300.0));
        assert!(board.drag_to(id, 304.0, 297.0));
        board.tick();
        assert_eq!(board.task(id).unwrap().position, Vec2::new(304.0, 297.0));

        let launched = board.end_drag(id);
        assert_eq!(launched, Some(Vec2::new(20.0, -15.0)));
        assert_eq!(board.dragging(), None);

        board.tick();
        let body = board.task(id).unwrap();
        assert_eq!(body.position, Vec2::new(324.0, 282.0));
    }

    #[test]
    fn test_unknown_drag_is_ignored() {
        let mut board = board();
        assert!(!board.start_drag(42));
        assert!(!board.drag_to(42, 1.0, 1.0));
        assert_eq!(board.end_drag(42), None);
        assert_eq!(board.dragging(), None);
    }

    #[test]
    fn test_removing_held_bubble_clears_drag() {
        let mut board = board();
        let id = board.add_habit("hold", vec![], 0);
        board.start_drag(id);
        board.remove(id);
        assert_eq!(board.dragging(), None);
    }

    #[test]
    fn test_resize_applies_inset() {
        let mut board = board();
        board.resize(1080.0, 1920.0);
        assert_eq!(board.canvas(), Canvas::new(880.0, 1720.0));
    }

    #[test]
    fn test_insert_keeps_ids_unique() {
        let mut board = board();
        board.insert_habit(Body::with_payload(
            10,
            Vec2::new(100.0, 100.0),
            45.0,
            HabitBubble {
                label: "restored".into(),
                color: 0,
                days: vec![1],
                completed_today: false,
            },
        ));
        let id = board.add_task("new", Priority::Low, 0);
        assert_eq!(id, 11);
    }

    #[test]
    fn test_drag_end_on_other_bubble_is_ignored() {
        let mut board = board();
        let held = board.add_task("held", Priority::Low, 0);
        let other = board.add_task("other", Priority::Low, 0);
        let other_velocity = board.task(other).unwrap().velocity;

        board.start_drag(held);
        board.drag_to(held, 300.0, 300.0);
        board.drag_to(held, 310.0, 300.0);

        assert!(!board.drag_to(other, 0.0, 0.0));
        assert_eq!(board.end_drag(other), None);
        assert_eq!(board.task(other).unwrap().velocity, other_velocity);
        assert_eq!(board.dragging(), Some(held));

        assert_eq!(board.end_drag(held), Some(Vec2::new(50.0, 0.0)));
        assert_eq!(board.dragging(), None);
    }

    #[test]
    fn test_stray_drag_end_keeps_bubble_moving() {
        let mut board = board();
        board.insert_task(
            Body::with_payload(
                0,
                Vec2::new(500.0, 500.0),
                50.0,
                TaskBubble {
                    label: "moving".into(),
                    color: 0,
                    priority: Priority::Low,
                    completed: false,
                },
            )
            .with_velocity(Vec2::new(4.0, 4.0)),
        );

        assert_eq!(board.end_drag(0), None);
        assert_eq!(board.end_drag_with_velocity(0, 0.0, 0.0), None);
        assert_eq!(board.task(0).unwrap().velocity, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut board = board();
        let id = board.add_task("first", Priority::Low, 0);
        let duplicate = Body::with_payload(
            id,
            Vec2::new(100.0, 100.0),
            45.0,
            HabitBubble {
                label: "clash".into(),
                color: 0,
                days: vec![],
                completed_today: false,
            },
        );

        assert!(!board.insert_habit(duplicate));
        assert_eq!(board.len(), 1);
        assert_eq!(board.task(id).unwrap().payload.label, "first");
    }

    #[test]
    fn test_insert_max_id_does_not_overflow() {
        let mut board = board();
        let restored = Body::with_payload(
            BubbleId::MAX,
            Vec2::new(200.0, 200.0),
            50.0,
            TaskBubble {
                label: "last".into(),
                color: 0,
                priority: Priority::Low,
                completed: true,
            },
        );

        assert!(board.insert_task(restored));
        assert!(board.task(BubbleId::MAX).unwrap().settled);

        let a = board.add_task("after", Priority::Low, 0);
        let b = board.add_habit("after", vec![], 0);
        assert_ne!(a, BubbleId::MAX);
        assert_ne!(b, BubbleId::MAX);
        assert_ne!(a, b);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_inserted_habit_never_settles() {
        let mut board = board();
        let mut habit = Body::with_payload(
            5,
            Vec2::new(500.0, 500.0),
            45.0,
            HabitBubble {
                label: "restored".into(),
                color: 0,
                days: vec![3],
                completed_today: true,
            },
        )
        .with_velocity(Vec2::new(2.0, 0.0));
        habit.settled = true;

        assert!(board.insert_habit(habit));
        board.tick();

        let body = board.habit(5).unwrap();
        assert!(!body.settled);
        assert_eq!(body.position, Vec2::new(502.0, 500.0));
    }
}
