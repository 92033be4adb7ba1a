use glam::Vec2;

/// Second-order spring smoother, stepped once per frame with semi-implicit
/// Euler. Mirrors the feel of the host UI's spring animations when easing a
/// tilt or touch target; deterministic for a given step sequence.
#[derive(Debug, Clone, Copy)]
pub struct SpringSmoother {
    position: f32,
    velocity: f32,
    stiffness: f32,
    damping: f32,
}

impl SpringSmoother {
    pub fn new(initial: f32, stiffness: f32, damping: f32) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            stiffness: stiffness.max(0.0),
            damping: damping.max(0.0),
        }
    }

    /// Critically damped spring for a given stiffness.
    pub fn critically_damped(initial: f32, stiffness: f32) -> Self {
        let stiffness = stiffness.max(0.0);
        Self::new(initial, stiffness, 2.0 * stiffness.sqrt())
    }

    pub fn value(&self) -> f32 {
        self.position
    }

    pub fn step(&mut self, target: f32, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        let accel = self.stiffness * (target - self.position) - self.damping * self.velocity;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
        self.position
    }
}

/// Two independent scalar springs tracking a 2-D target.
#[derive(Debug, Clone, Copy)]
pub struct Spring2d {
    x: SpringSmoother,
    y: SpringSmoother,
}

impl Spring2d {
    pub fn new(initial: Vec2, stiffness: f32, damping: f32) -> Self {
        Self {
            x: SpringSmoother::new(initial.x, stiffness, damping),
            y: SpringSmoother::new(initial.y, stiffness, damping),
        }
    }

    pub fn critically_damped(initial: Vec2, stiffness: f32) -> Self {
        Self {
            x: SpringSmoother::critically_damped(initial.x, stiffness),
            y: SpringSmoother::critically_damped(initial.y, stiffness),
        }
    }

    pub fn value(&self) -> Vec2 {
        Vec2::new(self.x.value(), self.y.value())
    }

    pub fn step(&mut self, target: Vec2, dt: f32) -> Vec2 {
        Vec2::new(self.x.step(target.x, dt), self.y.step(target.y, dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_settles_on_its_target() {
        let mut spring = SpringSmoother::critically_damped(0.0, 120.0);
        for _ in 0..600 {
            spring.step(1.0, 1.0 / 60.0);
        }
        assert!((spring.value() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn critically_damped_spring_does_not_overshoot() {
        let mut spring = SpringSmoother::critically_damped(0.0, 60.0);
        let mut peak = 0.0_f32;
        for _ in 0..600 {
            peak = peak.max(spring.step(1.0, 1.0 / 60.0));
        }
        // Allow a sliver of discretization error on top of the analytic bound.
        assert!(peak <= 1.02);
    }

    #[test]
    fn identical_step_sequences_are_identical() {
        let mut a = Spring2d::critically_damped(Vec2::ZERO, 90.0);
        let mut b = Spring2d::critically_damped(Vec2::ZERO, 90.0);
        let target = Vec2::new(30.0, -12.0);
        for _ in 0..120 {
            let va = a.step(target, 1.0 / 60.0);
            let vb = b.step(target, 1.0 / 60.0);
            assert_eq!(va, vb);
        }
    }
}
