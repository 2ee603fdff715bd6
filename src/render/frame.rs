//! CPU rasteriser for bubble snapshots.
//!
//! Draws each body as a filled disc with a darker rim into an RGBA8 buffer.
//! Only position, radius and colour are read. [`FrameBuffer::render`] draws
//! every body it is given, settled ones half-transparent.
//! [`FrameBuffer::render_board`] draws what the board shows: completed tasks
//! and habits done today are left off the canvas.

use crate::board::{BubbleBoard, BubbleStyle};
use crate::physics::{Body, Canvas};

/// Default background (slate 950).
pub const BACKGROUND: u32 = 0x020617;

/// Rim thickness in pixels.
const RIM_WIDTH: f32 = 3.0;

/// Largest frame side [`FrameBuffer::for_canvas`] will allocate.
pub const MAX_FRAME_SIDE: u32 = 8192;

/// Pixel size of a frame covering `canvas`, clamped to
/// `1..=MAX_FRAME_SIDE` per side. Non-finite sides become 1.
pub fn frame_size(canvas: Canvas) -> (u32, u32) {
    let side = |v: f32| {
        if v.is_finite() {
            v.clamp(1.0, MAX_FRAME_SIDE as f32) as u32
        } else {
            1
        }
    };
    (side(canvas.width), side(canvas.height))
}

/// RGBA8 pixel buffer, row-major, top-left origin.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    background: [u8; 4],
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Create a frame cleared to the default background.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, BACKGROUND)
    }

    /// Create a frame covering `canvas`, see [`frame_size`].
    pub fn for_canvas(canvas: Canvas) -> Self {
        let (width, height) = frame_size(canvas);
        Self::new(width, height)
    }

    pub fn with_background(width: u32, height: u32, background: u32) -> Self {
        let background = rgba(background);
        let pixels = background
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();

        Self {
            width,
            height,
            background,
            pixels,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Read one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Reset every pixel to the background.
    pub fn clear(&mut self) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&self.background);
        }
    }

    /// Draw a body set in order, later bodies on top.
    pub fn render<P: BubbleStyle>(&mut self, bodies: &[Body<P>]) {
        for body in bodies {
            let alpha = if body.settled { 0.5 } else { 1.0 };
            self.fill_disc(
                body.position.x,
                body.position.y,
                body.radius,
                body.payload.color(),
                alpha,
            );
        }
    }

    /// Clear and draw the open bubbles of both populations, habits over tasks.
    pub fn render_board(&mut self, board: &BubbleBoard) {
        self.clear();
        self.render_open(board.tasks());
        self.render_open(board.habits());
    }

    fn render_open<P: BubbleStyle>(&mut self, bodies: &[Body<P>]) {
        for body in bodies.iter().filter(|b| !b.payload.completed()) {
            self.fill_disc(
                body.position.x,
                body.position.y,
                body.radius,
                body.payload.color(),
                1.0,
            );
        }
    }

    fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, color: u32, alpha: f32) {
        if !(cx.is_finite() && cy.is_finite() && radius > 0.0) {
            return;
        }

        let fill = rgba(color);
        let rim = darken(fill, 0.6);
        let inner_sq = (radius - RIM_WIDTH).max(0.0).powi(2);
        let outer_sq = radius * radius;

        let x0 = (cx - radius).floor().max(0.0) as u32;
        let y0 = (cy - radius).floor().max(0.0) as u32;
        let x1 = ((cx + radius).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((cy + radius).ceil().max(0.0) as u32).min(self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let d_sq = dx * dx + dy * dy;
                if d_sq > outer_sq {
                    continue;
                }

                let source = if d_sq >= inner_sq { rim } else { fill };
                let i = (py as usize * self.width as usize + px as usize) * 4;
                for c in 0..3 {
                    let dst = self.pixels[i + c] as f32;
                    self.pixels[i + c] = (source[c] as f32 * alpha + dst * (1.0 - alpha)).round() as u8;
                }
                self.pixels[i + 3] = 255;
            }
        }
    }
}

/// Split 0xRRGGBB into opaque RGBA.
fn rgba(color: u32) -> [u8; 4] {
    [
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
        255,
    ]
}

fn darken(color: [u8; 4], factor: f32) -> [u8; 4] {
    [
        (color[0] as f32 * factor) as u8,
        (color[1] as f32 * factor) as u8,
        (color[2] as f32 * factor) as u8,
        color[3],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TaskBubble;
    use crate::physics::Priority;
    use glam::Vec2;

    fn task(id: u32, position: Vec2, radius: f32, color: u32) -> Body<TaskBubble> {
        Body::with_payload(
            id,
            position,
            radius,
            TaskBubble {
                label: format!("task {}", id),
                color,
                priority: Priority::Low,
                completed: false,
            },
        )
    }

    #[test]
    fn test_new_frame_is_background() {
        let frame = FrameBuffer::new(4, 3);
        assert_eq!(frame.pixels().len(), 4 * 3 * 4);
        assert_eq!(frame.pixel(3, 2), Some([0x02, 0x06, 0x17, 255]));
        assert_eq!(frame.pixel(4, 0), None);
    }

    #[test]
    fn test_disc_fills_centre_and_rim() {
        let mut frame = FrameBuffer::new(64, 64);
        frame.render(&[task(0, Vec2::new(32.0, 32.0), 20.0, 0xFF0000)]);

        assert_eq!(frame.pixel(32, 32), Some([255, 0, 0, 255]));
        // Rim is darker than the fill
        let rim = frame.pixel(32, 13).unwrap();
        assert!(rim[0] < 255 && rim[0] > 0);
        // Outside the disc stays background
        assert_eq!(frame.pixel(2, 2), Some([0x02, 0x06, 0x17, 255]));
    }

    #[test]
    fn test_settled_bubble_is_translucent() {
        let mut frame = FrameBuffer::with_background(16, 16, 0x000000);
        let mut body = task(0, Vec2::new(8.0, 8.0), 7.0, 0xFFFFFF);
        body.settled = true;
        frame.render(&[body]);

        let centre = frame.pixel(8, 8).unwrap();
        assert_eq!(centre[0], 128);
    }

    #[test]
    fn test_board_snapshot_skips_completed() {
        let config = crate::config::SimulationConfig {
            seed: Some(1),
            ..Default::default()
        };
        let mut board = BubbleBoard::new(&config);
        board.set_canvas(Canvas::new(200.0, 100.0));
        board.insert_task(task(0, Vec2::new(50.0, 50.0), 40.0, 0xFF0000));
        board.insert_task(task(1, Vec2::new(150.0, 50.0), 40.0, 0x00FF00));
        board.toggle_task_complete(1);

        let mut frame = FrameBuffer::for_canvas(board.canvas());
        frame.render_board(&board);

        assert_eq!(frame.size(), (200, 100));
        assert_eq!(frame.pixel(50, 50), Some([255, 0, 0, 255]));
        assert_eq!(frame.pixel(150, 50), Some([0x02, 0x06, 0x17, 255]));
    }

    #[test]
    fn test_frame_size_is_clamped() {
        assert_eq!(frame_size(Canvas::new(640.0, 480.0)), (640, 480));
        assert_eq!(frame_size(Canvas::new(1e12, -5.0)), (MAX_FRAME_SIDE, 1));
        assert_eq!(frame_size(Canvas::new(f32::NAN, f32::INFINITY)), (1, 1));
    }

    #[test]
    fn test_offscreen_bubble_is_clipped() {
        let mut frame = FrameBuffer::new(10, 10);
        frame.render(&[task(0, Vec2::new(-50.0, 200.0), 20.0, 0xFFFFFF)]);
        assert!(
            frame
                .pixels()
                .chunks_exact(4)
                .all(|p| p == [0x02, 0x06, 0x17, 255])
        );
    }
}
