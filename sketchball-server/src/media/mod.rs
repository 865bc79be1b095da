use sketchball_base::anyhow::Result;
use sketchball_base::game::gesture::HandDetection;
use sketchball_base::glam::Vec2;
use sketchball_base::parking_lot::Mutex;

pub mod encoder;
pub mod font;
pub mod synthetic;

/// Source of raw camera frames. `None` signals end of stream and terminates
/// the capture loop cleanly.
pub trait CameraSource {
    fn next_frame(&mut self) -> Option<Frame>;
}

/// External hand-landmark detector, at most one hand per frame.
pub trait HandTracker {
    fn track(&mut self, frame: &Frame) -> Option<HandDetection>;
}

/// External image encoder turning a composed frame into transportable bytes.
pub trait FrameEncoder {
    fn encode(&mut self, frame: &Frame) -> Result<Vec<u8>>;
}

/// Owned RGB24 raster with just enough drawing primitives for markers and
/// game overlays.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0; (width * height * 3) as usize] }
    }

    pub fn flip_horizontal(&mut self) {
        let width = self.width as usize;

        for row in self.data.chunks_exact_mut(width * 3) {
            for x in 0..width / 2 {
                let left = x * 3;
                let right = (width - 1 - x) * 3;

                for channel in 0..3 {
                    row.swap(left + channel, right + channel);
                }
            }
        }
    }

    /// Out-of-bounds coordinates are clipped silently.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: [u8; 3]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }

        let index = ((y as u32 * self.width + x as u32) * 3) as usize;
        self.data[index..index + 3].copy_from_slice(&color);
    }

    pub fn draw_disc(&mut self, center: Vec2, radius: f32, color: [u8; 3]) {
        self.draw_ring(center, 0.0, radius, color);
    }

    pub fn draw_circle(&mut self, center: Vec2, radius: f32, thickness: f32, color: [u8; 3]) {
        self.draw_ring(center, radius - thickness / 2.0, radius + thickness / 2.0, color);
    }

    pub fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: [u8; 3]) {
        let length = from.distance(to);
        let steps = (length * 2.0).ceil().max(1.0) as u32;

        for step in 0..=steps {
            let position = from.lerp(to, step as f32 / steps as f32);
            self.draw_disc(position, thickness / 2.0, color);
        }
    }

    /// Renders `text` with the builtin 5x7 font, `scale` pixels per font dot.
    /// Characters without a glyph advance the cursor without drawing.
    pub fn draw_text(&mut self, origin: Vec2, text: &str, scale: u32, color: [u8; 3]) {
        let scale = scale.max(1) as i32;
        let mut cursor_x = origin.x as i32;
        let cursor_y = origin.y as i32;

        for character in text.chars() {
            if let Some(glyph) = font::glyph(character) {
                for (row, bits) in glyph.iter().enumerate() {
                    for column in 0..font::GLYPH_WIDTH {
                        if bits & (0x10 >> column) != 0 {
                            for dy in 0..scale {
                                for dx in 0..scale {
                                    self.set_pixel(
                                        cursor_x + column as i32 * scale + dx,
                                        cursor_y + row as i32 * scale + dy,
                                        color,
                                    );
                                }
                            }
                        }
                    }
                }
            }

            cursor_x += (font::GLYPH_WIDTH as i32 + 1) * scale;
        }
    }

    fn draw_ring(&mut self, center: Vec2, inner: f32, outer: f32, color: [u8; 3]) {
        let min_x = (center.x - outer).floor() as i32;
        let max_x = (center.x + outer).ceil() as i32;
        let min_y = (center.y - outer).floor() as i32;
        let max_y = (center.y + outer).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let distance = Vec2::new(x as f32, y as f32).distance(center);
                if distance >= inner && distance <= outer {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }
}

/// Latest-wins single-slot channel between the capture loop (single writer)
/// and the stream loop (single reader). The lock is held only for the
/// copy-in/copy-out, never across image processing.
#[derive(Default)]
pub struct FrameSlot {
    frame: Mutex<Option<Frame>>,
}

impl FrameSlot {
    pub fn publish(&self, frame: Frame) {
        *self.frame.lock() = Some(frame);
    }

    pub fn snapshot(&self) -> Option<Frame> {
        self.frame.lock().clone()
    }
}
