use glam::Vec2;

use crate::easing::EasingCurve;

/// Scalar parameter choreography, evaluated at a frame timestamp. Tracks are
/// pure functions of time so replaying a timeline reproduces a render exactly.
#[derive(Debug, Clone, Copy)]
pub enum ScalarTrack {
    Constant {
        value: f32,
    },
    Ramp {
        from: f32,
        to: f32,
        duration: f32,
        curve: EasingCurve,
    },
    Oscillate {
        center: f32,
        amplitude: f32,
        period: f32,
        phase: f32,
    },
    Pulse {
        low: f32,
        high: f32,
        period: f32,
        duty: f32,
    },
}

impl ScalarTrack {
    pub fn sample(&self, seconds: f32) -> f32 {
        match *self {
            ScalarTrack::Constant { value } => value,
            ScalarTrack::Ramp {
                from,
                to,
                duration,
                curve,
            } => {
                let t = (seconds / duration.max(f32::EPSILON)).clamp(0.0, 1.0);
                from + (to - from) * curve.sample(t)
            }
            ScalarTrack::Oscillate {
                center,
                amplitude,
                period,
                phase,
            } => {
                let angle = std::f32::consts::TAU * (seconds / period.max(f32::EPSILON)) + phase;
                center + amplitude * angle.sin()
            }
            ScalarTrack::Pulse {
                low,
                high,
                period,
                duty,
            } => {
                let cycle = seconds / period.max(f32::EPSILON);
                if cycle - cycle.floor() < duty.clamp(0.0, 1.0) {
                    high
                } else {
                    low
                }
            }
        }
    }
}

/// 2-D position choreography for touch paths.
#[derive(Debug, Clone, Copy)]
pub enum PointTrack {
    Fixed { at: Vec2 },
    /// Ping-pong sweep from `from` to `to` and back over one period.
    Line { from: Vec2, to: Vec2, period: f32 },
    Orbit { center: Vec2, radius: f32, period: f32 },
}

/// Step used for the finite-difference velocity estimate.
const VELOCITY_DT: f32 = 1.0 / 240.0;

impl PointTrack {
    pub fn position(&self, seconds: f32) -> Vec2 {
        match *self {
            PointTrack::Fixed { at } => at,
            PointTrack::Line { from, to, period } => {
                let cycle = seconds / period.max(f32::EPSILON);
                let t = cycle - cycle.floor();
                let sweep = 1.0 - (1.0 - 2.0 * t).abs();
                from.lerp(to, sweep)
            }
            PointTrack::Orbit {
                center,
                radius,
                period,
            } => {
                let angle = std::f32::consts::TAU * (seconds / period.max(f32::EPSILON));
                center + Vec2::new(angle.cos(), angle.sin()) * radius
            }
        }
    }

    /// Central-difference velocity in pixels per second.
    pub fn velocity(&self, seconds: f32) -> Vec2 {
        let ahead = self.position(seconds + VELOCITY_DT);
        let behind = self.position((seconds - VELOCITY_DT).max(0.0));
        (ahead - behind) / (2.0 * VELOCITY_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_clamps_at_both_ends() {
        let track = ScalarTrack::Ramp {
            from: 2.0,
            to: 10.0,
            duration: 4.0,
            curve: EasingCurve::Linear,
        };
        assert_eq!(track.sample(-1.0), 2.0);
        assert!((track.sample(2.0) - 6.0).abs() < 1e-6);
        assert_eq!(track.sample(100.0), 10.0);
    }

    #[test]
    fn oscillation_stays_within_its_band() {
        let track = ScalarTrack::Oscillate {
            center: 0.5,
            amplitude: 0.3,
            period: 2.0,
            phase: 0.0,
        };
        for step in 0..200 {
            let v = track.sample(step as f32 * 0.05);
            assert!((0.2..=0.8).contains(&v));
        }
        assert!((track.sample(0.0) - 0.5).abs() < 1e-6);
        assert!((track.sample(0.5) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn pulse_respects_its_duty_cycle() {
        let track = ScalarTrack::Pulse {
            low: 0.0,
            high: 1.0,
            period: 1.0,
            duty: 0.25,
        };
        assert_eq!(track.sample(0.1), 1.0);
        assert_eq!(track.sample(0.5), 0.0);
        assert_eq!(track.sample(1.1), 1.0);
    }

    #[test]
    fn line_sweep_ping_pongs() {
        let track = PointTrack::Line {
            from: Vec2::ZERO,
            to: Vec2::new(100.0, 0.0),
            period: 2.0,
        };
        assert_eq!(track.position(0.0), Vec2::ZERO);
        assert!((track.position(1.0) - Vec2::new(100.0, 0.0)).length() < 1e-4);
        assert!((track.position(2.0) - Vec2::ZERO).length() < 1e-4);
    }

    #[test]
    fn orbit_keeps_its_radius_and_moves() {
        let track = PointTrack::Orbit {
            center: Vec2::new(50.0, 50.0),
            radius: 20.0,
            period: 3.0,
        };
        for step in 0..30 {
            let p = track.position(step as f32 * 0.1);
            assert!(((p - Vec2::new(50.0, 50.0)).length() - 20.0).abs() < 1e-3);
        }
        let speed = track.velocity(1.0).length();
        // |v| = TAU * r / period.
        let expected = std::f32::consts::TAU * 20.0 / 3.0;
        assert!((speed - expected).abs() / expected < 0.01);
    }

    #[test]
    fn fixed_point_has_zero_velocity() {
        let track = PointTrack::Fixed {
            at: Vec2::new(10.0, 20.0),
        };
        assert_eq!(track.velocity(5.0), Vec2::ZERO);
    }
}
