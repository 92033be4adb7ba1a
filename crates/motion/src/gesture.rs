use glam::Vec2;

use crate::spring::Spring2d;
use crate::track::PointTrack;

/// Scripted replacement for the interactive drag gesture: a touch path plus a
/// press/release schedule on the scene clock.
#[derive(Debug, Clone, Copy)]
pub struct GestureScript {
    pub path: PointTrack,
    /// Seconds into the scene at which the drag begins.
    pub press: f32,
    /// Seconds at which the drag ends; `None` holds until the scene ends.
    pub release: Option<f32>,
}

impl GestureScript {
    pub fn is_dragging(&self, seconds: f32) -> bool {
        seconds >= self.press && self.release.map_or(true, |release| seconds < release)
    }
}

/// Per-frame gesture state for the gooey uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub touch: Vec2,
    pub velocity: Vec2,
    /// `1.0` while the scripted drag is held, else `0.0`.
    pub dragging: f32,
}

/// Stiffness used to trail the scripted path, tuned to feel like a finger
/// with a little inertia rather than a hard lock.
const TOUCH_STIFFNESS: f32 = 160.0;

/// Steps a gesture script frame by frame, spring-smoothing the touch toward
/// the scripted path and deriving velocity from the smoothed motion.
#[derive(Debug, Clone, Copy)]
pub struct GesturePlayer {
    script: GestureScript,
    spring: Spring2d,
    last: Vec2,
}

impl GesturePlayer {
    pub fn new(script: GestureScript) -> Self {
        let start = script.path.position(script.press);
        Self {
            script,
            spring: Spring2d::critically_damped(start, TOUCH_STIFFNESS),
            last: start,
        }
    }

    pub fn advance(&mut self, seconds: f32, dt: f32) -> GestureSample {
        let target = self.script.path.position(seconds);
        let touch = self.spring.step(target, dt);
        let velocity = if dt > 0.0 {
            (touch - self.last) / dt
        } else {
            Vec2::ZERO
        };
        self.last = touch;
        GestureSample {
            touch,
            velocity,
            dragging: if self.script.is_dragging(seconds) {
                1.0
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep() -> GestureScript {
        GestureScript {
            path: PointTrack::Line {
                from: Vec2::new(40.0, 120.0),
                to: Vec2::new(280.0, 120.0),
                period: 4.0,
            },
            press: 0.5,
            release: Some(3.0),
        }
    }

    #[test]
    fn dragging_window_follows_press_and_release() {
        let script = sweep();
        assert!(!script.is_dragging(0.0));
        assert!(script.is_dragging(1.0));
        assert!(!script.is_dragging(3.5));
    }

    #[test]
    fn touch_trails_the_path_with_inertia() {
        let mut player = GesturePlayer::new(sweep());
        let dt = 1.0 / 60.0;
        let mut sample = player.advance(0.0, dt);
        for frame in 1..60 {
            sample = player.advance(frame as f32 * dt, dt);
        }
        let target = sweep().path.position(59.0 * dt);
        // The spring lags the moving target but stays in its neighbourhood.
        assert!(sample.touch.distance(target) < 40.0);
        assert!(sample.touch.x > 40.0);
    }

    #[test]
    fn velocity_points_along_the_sweep() {
        let mut player = GesturePlayer::new(sweep());
        let dt = 1.0 / 60.0;
        let mut sample = player.advance(0.0, dt);
        for frame in 1..90 {
            sample = player.advance(frame as f32 * dt, dt);
        }
        // Midway through the first half of the ping-pong the touch moves +x.
        assert!(sample.velocity.x > 0.0);
    }

    #[test]
    fn replaying_the_same_frames_reproduces_the_samples() {
        let dt = 1.0 / 30.0;
        let mut first = GesturePlayer::new(sweep());
        let mut second = GesturePlayer::new(sweep());
        for frame in 0..60 {
            let t = frame as f32 * dt;
            assert_eq!(first.advance(t, dt), second.advance(t, dt));
        }
    }
}
