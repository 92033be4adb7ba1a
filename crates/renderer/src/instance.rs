use effects::math::smoothstep;
use effects::sdf::sd_rounded_rect;
use effects::{crt, depth, gooey, spectrum};
use effects::{CrtUniforms, DepthUniforms, GooeyUniforms, ImageSampler, SpectrumUniforms};
use glam::{Vec2, Vec4};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamError {
    #[error("effect '{effect}' has no parameter named '{name}'")]
    Unknown { effect: &'static str, name: String },
}

/// Procedurally rendered pill stroke supplying the spectrum effect's input
/// color. The host UI would hand the shader its already-rendered border layer;
/// offline we synthesize the same thing from the pill's distance field with a
/// smoothstep edge so the alpha short-circuit path sees realistic
/// anti-aliased fringes.
#[derive(Debug, Clone, Copy)]
pub struct StrokeLayer {
    pub size: Vec2,
    pub thickness: f32,
    pub color: Vec4,
}

impl StrokeLayer {
    pub fn color_at(&self, position: Vec2) -> Vec4 {
        let half = (self.size * 0.5 - Vec2::splat(self.thickness)).max(Vec2::ONE);
        let radius = half.x.min(half.y);
        let field = sd_rounded_rect(position - self.size * 0.5, half, radius);
        let ring = field.abs() - self.thickness * 0.5;
        let coverage = 1.0 - smoothstep(-0.75, 0.75, ring);
        let alpha = self.color.w * coverage;
        (self.color.truncate() * alpha).extend(alpha)
    }
}

/// One effect plus its live uniform bundle.
///
/// Choreography tracks drive scalar knobs through [`set_param`] by name, the
/// frame loop advances [`set_time`], and gesture scripts feed the gooey
/// variant through [`set_gesture`]. Shading itself stays pure: `shade` only
/// reads the bundle.
///
/// [`set_param`]: EffectInstance::set_param
/// [`set_time`]: EffectInstance::set_time
/// [`set_gesture`]: EffectInstance::set_gesture
#[derive(Debug, Clone)]
pub enum EffectInstance {
    Spectrum {
        uniforms: SpectrumUniforms,
        stroke: StrokeLayer,
    },
    Gooey {
        uniforms: GooeyUniforms,
    },
    Depth {
        uniforms: DepthUniforms,
    },
    Crt {
        uniforms: CrtUniforms,
    },
}

impl EffectInstance {
    pub fn label(&self) -> &'static str {
        match self {
            EffectInstance::Spectrum { .. } => "spectrum",
            EffectInstance::Gooey { .. } => "gooey",
            EffectInstance::Depth { .. } => "depth",
            EffectInstance::Crt { .. } => "crt",
        }
    }

    /// Advances the effect's clock. The depth effect has no time-dependent
    /// term, so the call is a no-op there.
    pub fn set_time(&mut self, seconds: f32) {
        match self {
            EffectInstance::Spectrum { uniforms, .. } => uniforms.time = seconds,
            EffectInstance::Gooey { uniforms } => uniforms.time = seconds,
            EffectInstance::Crt { uniforms } => uniforms.time = seconds,
            EffectInstance::Depth { .. } => {}
        }
    }

    /// Updates the gooey gesture state; ignored by the other effects.
    pub fn set_gesture(&mut self, touch: Vec2, velocity: Vec2, dragging: f32) {
        if let EffectInstance::Gooey { uniforms } = self {
            uniforms.touch = touch;
            uniforms.velocity = velocity;
            uniforms.dragging = dragging;
        }
    }

    /// Sets a scalar knob by its manifest name.
    pub fn set_param(&mut self, name: &str, value: f32) -> Result<(), ParamError> {
        match self {
            EffectInstance::Spectrum { uniforms, .. } => match name {
                "tilt_x" => uniforms.tilt.x = value,
                "tilt_y" => uniforms.tilt.y = value,
                _ => return Err(self.unknown(name)),
            },
            EffectInstance::Gooey { uniforms } => match name {
                "angularity" => uniforms.angularity = value,
                "amplitude" => uniforms.amplitude = value,
                "viscosity" => uniforms.viscosity = value,
                "touch_x" => uniforms.touch.x = value,
                "touch_y" => uniforms.touch.y = value,
                "velocity_x" => uniforms.velocity.x = value,
                "velocity_y" => uniforms.velocity.y = value,
                "dragging" => uniforms.dragging = value,
                _ => return Err(self.unknown(name)),
            },
            EffectInstance::Depth { uniforms } => match name {
                "normalized_depth" => uniforms.normalized_depth = value,
                "max_blur" => uniforms.max_blur = value,
                _ => return Err(self.unknown(name)),
            },
            EffectInstance::Crt { uniforms } => match name {
                "pixel_size" => uniforms.pixel_size = value,
                _ => return Err(self.unknown(name)),
            },
        }
        Ok(())
    }

    fn unknown(&self, name: &str) -> ParamError {
        ParamError::Unknown {
            effect: self.label(),
            name: name.to_string(),
        }
    }

    /// Evaluates the effect for one pixel. Pure in `position`, the uniform
    /// bundle, and the sampler snapshot.
    pub fn shade(&self, position: Vec2, sampler: &dyn ImageSampler) -> Vec4 {
        match self {
            EffectInstance::Spectrum { uniforms, stroke } => {
                spectrum::shade(position, stroke.color_at(position), uniforms)
            }
            EffectInstance::Gooey { uniforms } => gooey::shade(position, sampler, uniforms),
            EffectInstance::Depth { uniforms } => depth::shade(position, sampler, uniforms),
            EffectInstance::Crt { uniforms } => crt::shade(position, sampler, uniforms),
        }
    }
}
