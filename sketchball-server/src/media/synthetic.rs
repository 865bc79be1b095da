use super::CameraSource;
use super::Frame;
use super::HandTracker;
use sketchball_base::game::gesture::HandDetection;

/// Stand-in camera producing a slowly shifting gradient, used when no real
/// capture backend is wired in. Real deployments implement `CameraSource`
/// against their capture hardware.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    counter: u64,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, counter: 0 }
    }
}

impl CameraSource for SyntheticCamera {
    fn next_frame(&mut self) -> Option<Frame> {
        let mut frame = Frame::new(self.width, self.height);
        let shift = (self.counter % 256) as u32;

        for y in 0..self.height {
            for x in 0..self.width {
                let index = ((y * self.width + x) * 3) as usize;
                frame.data[index] = ((x + shift) * 255 / self.width.max(1)) as u8;
                frame.data[index + 1] = (y * 255 / self.height.max(1)) as u8;
                frame.data[index + 2] = 64;
            }
        }

        self.counter += 1;
        Some(frame)
    }
}

/// Stand-in tracker that never reports a hand, the gesture pipeline stays
/// inert until a real detector implements `HandTracker`.
#[derive(Default)]
pub struct IdleHandTracker;

impl HandTracker for IdleHandTracker {
    fn track(&mut self, _frame: &Frame) -> Option<HandDetection> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_camera_produces_frames_of_the_configured_size() {
        let mut camera = SyntheticCamera::new(32, 16);

        let first = camera.next_frame().unwrap();
        let second = camera.next_frame().unwrap();

        assert_eq!(first.width, 32);
        assert_eq!(first.height, 16);
        assert_eq!(first.data.len(), 32 * 16 * 3);
        assert_ne!(first.data, second.data, "frames are expected to vary over time");
    }

    #[test]
    fn idle_tracker_never_detects() {
        let mut tracker = IdleHandTracker;
        assert!(tracker.track(&Frame::new(4, 4)).is_none());
    }
}
