use crate::PINCH_THRESHOLD;
use glam::Vec2;

/// Typed result of the external hand-landmark detector, at most one hand.
/// Fingertip coordinates are normalized to `[0, 1]` in frame space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandDetection {
    pub index_tip: Vec2,
    pub middle_tip: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerStyle {
    Drawing,
    Idle,
}

/// Fingertip annotation to stamp onto the frame that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub position: Vec2,
    pub style: MarkerStyle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureOutput {
    pub marker: Option<Marker>,
    pub segment: Option<(Vec2, Vec2)>,
}

/// Pinch tracking state, fed one detection result per captured frame.
/// Invariant: `last_point.is_some()` implies `is_drawing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureTracker {
    pub is_drawing: bool,
    pub last_point: Option<Vec2>,
}

impl GestureTracker {
    /// Interprets one detection result. A pinch (fingertips closer than the
    /// threshold) is the pen-down signal: the first pinched frame only starts
    /// the stroke, every following pinched frame emits the segment connecting
    /// the previous fingertip position with the current one. Releasing the
    /// pinch or losing the hand ends the stroke.
    pub fn process(&mut self, detection: Option<HandDetection>, width: u32, height: u32) -> GestureOutput {
        let detection = match detection {
            Some(detection) => detection,
            None => {
                self.reset();
                return GestureOutput::default();
            }
        };

        let size = Vec2::new(width as f32, height as f32);
        let index_tip = (detection.index_tip * size).floor();
        let middle_tip = (detection.middle_tip * size).floor();

        if index_tip.distance(middle_tip) < PINCH_THRESHOLD {
            let mut segment = None;

            if !self.is_drawing {
                self.is_drawing = true;
            } else if let Some(last_point) = self.last_point {
                segment = Some((last_point, index_tip));
            }

            self.last_point = Some(index_tip);
            GestureOutput { marker: Some(Marker { position: index_tip, style: MarkerStyle::Drawing }), segment }
        } else {
            self.reset();
            GestureOutput { marker: Some(Marker { position: index_tip, style: MarkerStyle::Idle }), segment: None }
        }
    }

    pub fn reset(&mut self) {
        self.is_drawing = false;
        self.last_point = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: u32 = 640;
    const HEIGHT: u32 = 480;

    fn detection_with_distance(index_tip: Vec2, distance: f32) -> HandDetection {
        let size = Vec2::new(WIDTH as f32, HEIGHT as f32);
        HandDetection { index_tip: index_tip / size, middle_tip: (index_tip + Vec2::new(distance, 0.0)) / size }
    }

    #[test]
    fn pinch_sequence_emits_one_segment() {
        let mut tracker = GestureTracker::default();
        let points = [Vec2::new(100.0, 120.0), Vec2::new(110.0, 120.0), Vec2::new(120.0, 240.0), Vec2::new(130.0, 240.0)];
        let distances = [30.0, 20.0, 18.0, 30.0];
        let mut segments = Vec::new();

        for (point, distance) in points.iter().zip(distances) {
            let output = tracker.process(Some(detection_with_distance(*point, distance)), WIDTH, HEIGHT);
            if let Some(segment) = output.segment {
                segments.push(segment);
            }
        }

        assert_eq!(segments, vec![(points[1], points[2])]);
        assert!(!tracker.is_drawing);
        assert!(tracker.last_point.is_none());
    }

    #[test]
    fn first_pinched_frame_starts_stroke_without_segment() {
        let mut tracker = GestureTracker::default();
        let output = tracker.process(Some(detection_with_distance(Vec2::new(50.0, 60.0), 10.0)), WIDTH, HEIGHT);

        assert!(output.segment.is_none());
        assert_eq!(output.marker.unwrap().style, MarkerStyle::Drawing);
        assert!(tracker.is_drawing);
        assert_eq!(tracker.last_point, Some(Vec2::new(50.0, 60.0)));
    }

    #[test]
    fn open_hand_shows_idle_marker() {
        let mut tracker = GestureTracker::default();
        let output = tracker.process(Some(detection_with_distance(Vec2::new(50.0, 60.0), 100.0)), WIDTH, HEIGHT);

        assert!(output.segment.is_none());
        assert_eq!(output.marker.unwrap().style, MarkerStyle::Idle);
        assert!(!tracker.is_drawing);
    }

    #[test]
    fn losing_the_hand_resets_tracking_without_marker() {
        let mut tracker = GestureTracker::default();
        tracker.process(Some(detection_with_distance(Vec2::new(50.0, 60.0), 10.0)), WIDTH, HEIGHT);
        let output = tracker.process(None, WIDTH, HEIGHT);

        assert_eq!(output, GestureOutput::default());
        assert!(!tracker.is_drawing);
        assert!(tracker.last_point.is_none());
    }

    #[test]
    fn fingertips_are_converted_to_frame_pixels() {
        let mut tracker = GestureTracker::default();
        let detection = HandDetection { index_tip: Vec2::new(0.5, 0.5), middle_tip: Vec2::new(0.5, 0.5) };
        let output = tracker.process(Some(detection), WIDTH, HEIGHT);

        assert_eq!(output.marker.unwrap().position, Vec2::new(320.0, 240.0));
    }
}
