/// Timestamp for one output frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStamp {
    pub index: u32,
    pub seconds: f32,
}

/// Deterministic frame clock: `frame_count` frames at a fixed `fps`, frame 0
/// at `t = 0`. Timestamps are monotonically non-decreasing by construction,
/// matching the contract the effect uniforms expect from one animation run.
#[derive(Debug, Clone, Copy)]
pub struct FrameTimeline {
    fps: f32,
    frame_count: u32,
}

impl FrameTimeline {
    pub fn new(fps: f32, frame_count: u32) -> Self {
        Self {
            fps: if fps > 0.0 { fps } else { 60.0 },
            frame_count,
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn frame_interval(&self) -> f32 {
        1.0 / self.fps
    }

    pub fn stamp(&self, index: u32) -> FrameStamp {
        FrameStamp {
            index,
            seconds: index as f32 / self.fps,
        }
    }

    pub fn stamps(&self) -> impl Iterator<Item = FrameStamp> + '_ {
        (0..self.frame_count).map(|index| self.stamp(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_are_monotonic_from_zero() {
        let timeline = FrameTimeline::new(30.0, 90);
        let stamps: Vec<_> = timeline.stamps().collect();
        assert_eq!(stamps.len(), 90);
        assert_eq!(stamps[0].seconds, 0.0);
        for pair in stamps.windows(2) {
            assert!(pair[1].seconds > pair[0].seconds);
        }
        assert!((stamps[30].seconds - 1.0).abs() < 1e-6);
    }

    #[test]
    fn non_positive_fps_falls_back_to_sixty() {
        let timeline = FrameTimeline::new(0.0, 10);
        assert_eq!(timeline.fps(), 60.0);
        assert!((timeline.frame_interval() - 1.0 / 60.0).abs() < 1e-9);
    }
}
