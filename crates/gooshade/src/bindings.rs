//! Glue between validated scene manifests and the runtime types the renderer
//! and motion crates consume. The manifest layer stays serde-only and the
//! runtime layer stays manifest-free; everything that maps one onto the other
//! lives here.

use anyhow::{anyhow, Result};
use effects::{
    CheckerSampler, CrtUniforms, DepthUniforms, GooeyUniforms, ImageSampler, SolidSampler,
    SpectrumUniforms,
};
use glam::{Vec2, Vec4};
use motion::{EasingCurve, GestureScript, PointTrack, ScalarTrack};
use renderer::{EffectInstance, Pixmap, PixmapSampler, StrokeLayer};
use scenepack::{
    CurveName, EffectKind, GesturePath, InputSource, LocalScenePack, SceneManifest, TrackMotion,
};

/// Backing layer for a scene, owned for the scene's lifetime so samplers can
/// borrow from it frame after frame.
pub enum SamplerSource {
    Pixmap(Pixmap),
    Solid(SolidSampler),
    Checker(CheckerSampler),
}

impl ImageSampler for SamplerSource {
    fn sample(&self, position: Vec2) -> Vec4 {
        match self {
            SamplerSource::Pixmap(pixmap) => PixmapSampler::new(pixmap).sample(position),
            SamplerSource::Solid(sampler) => sampler.sample(position),
            SamplerSource::Checker(sampler) => sampler.sample(position),
        }
    }
}

/// Loads the scene's backing input. The spectrum effect recolors a stroke it
/// renders itself, so it gets a transparent placeholder layer.
pub fn build_sampler_source(pack: &LocalScenePack) -> Result<SamplerSource> {
    match &pack.manifest().input {
        InputSource::Texture { .. } => {
            let path = pack
                .texture_path()
                .ok_or_else(|| anyhow!("texture input without a path"))?;
            Ok(SamplerSource::Pixmap(Pixmap::open(path)?))
        }
        InputSource::Checker { cell, even, odd } => Ok(SamplerSource::Checker(CheckerSampler {
            cell: *cell,
            even: Vec4::from_array(*even),
            odd: Vec4::from_array(*odd),
        })),
        InputSource::Solid { color } => {
            Ok(SamplerSource::Solid(SolidSampler(Vec4::from_array(*color))))
        }
        InputSource::Stroke { .. } => Ok(SamplerSource::Solid(SolidSampler(Vec4::ZERO))),
    }
}

/// Builds the effect instance with its resting uniforms, then folds the
/// manifest's static params over them.
pub fn build_instance(manifest: &SceneManifest, size: Vec2) -> Result<EffectInstance> {
    let mut instance = match manifest.effect {
        EffectKind::Spectrum => {
            let (color, thickness) = match &manifest.input {
                InputSource::Stroke { color, thickness } => {
                    (Vec4::from_array(*color), *thickness)
                }
                // Validation rejects this earlier; keep a sane fallback.
                _ => (Vec4::ONE, 3.0),
            };
            EffectInstance::Spectrum {
                uniforms: SpectrumUniforms {
                    size,
                    time: 0.0,
                    tilt: Vec2::ZERO,
                },
                stroke: StrokeLayer {
                    size,
                    thickness,
                    color,
                },
            }
        }
        EffectKind::Gooey => EffectInstance::Gooey {
            uniforms: GooeyUniforms {
                size,
                touch: size * 0.5,
                velocity: Vec2::ZERO,
                time: 0.0,
                angularity: 0.5,
                amplitude: 0.5,
                viscosity: 0.5,
                dragging: 0.0,
            },
        },
        EffectKind::Depth => EffectInstance::Depth {
            uniforms: DepthUniforms {
                cell_size: size,
                normalized_depth: 1.0,
                max_blur: 6.0,
            },
        },
        EffectKind::Crt => EffectInstance::Crt {
            uniforms: CrtUniforms {
                size,
                time: 0.0,
                pixel_size: 4.0,
            },
        },
    };

    for (name, value) in &manifest.params {
        instance.set_param(name, *value)?;
    }
    Ok(instance)
}

/// Scalar choreography tracks keyed by parameter name.
pub fn build_tracks(manifest: &SceneManifest) -> Vec<(String, ScalarTrack)> {
    manifest
        .tracks
        .iter()
        .map(|spec| {
            let track = match spec.motion {
                TrackMotion::Constant { value } => ScalarTrack::Constant { value },
                TrackMotion::Ramp {
                    from,
                    to,
                    duration,
                    curve,
                } => ScalarTrack::Ramp {
                    from,
                    to,
                    duration,
                    curve: map_curve(curve),
                },
                TrackMotion::Oscillate {
                    center,
                    amplitude,
                    period,
                    phase,
                } => ScalarTrack::Oscillate {
                    center,
                    amplitude,
                    period,
                    phase,
                },
                TrackMotion::Pulse {
                    low,
                    high,
                    period,
                    duty,
                } => ScalarTrack::Pulse {
                    low,
                    high,
                    period,
                    duty,
                },
            };
            (spec.param.clone(), track)
        })
        .collect()
}

pub fn build_gesture(manifest: &SceneManifest) -> Option<GestureScript> {
    manifest.gesture.as_ref().map(|spec| GestureScript {
        path: match spec.path {
            GesturePath::Point { at } => PointTrack::Fixed {
                at: Vec2::from_array(at),
            },
            GesturePath::Line { from, to, period } => PointTrack::Line {
                from: Vec2::from_array(from),
                to: Vec2::from_array(to),
                period,
            },
            GesturePath::Orbit {
                center,
                radius,
                period,
            } => PointTrack::Orbit {
                center: Vec2::from_array(center),
                radius,
                period,
            },
        },
        press: spec.press,
        release: spec.release,
    })
}

fn map_curve(curve: CurveName) -> EasingCurve {
    match curve {
        CurveName::Linear => EasingCurve::Linear,
        CurveName::Smoothstep => EasingCurve::Smoothstep,
        CurveName::EaseInOut => EasingCurve::EaseInOut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn manifest(effect: EffectKind, input: InputSource) -> SceneManifest {
        SceneManifest {
            name: None,
            description: None,
            tags: vec![],
            effect,
            input,
            params: BTreeMap::new(),
            tracks: vec![],
            gesture: None,
        }
    }

    #[test]
    fn params_are_folded_into_the_instance() {
        let mut spec = manifest(
            EffectKind::Crt,
            InputSource::Solid {
                color: [0.5, 0.5, 0.5, 1.0],
            },
        );
        spec.params.insert("pixel_size".into(), 9.0);
        let instance = build_instance(&spec, Vec2::new(64.0, 64.0)).unwrap();
        match instance {
            EffectInstance::Crt { uniforms } => assert_eq!(uniforms.pixel_size, 9.0),
            other => panic!("wrong instance: {}", other.label()),
        }
    }

    #[test]
    fn spectrum_takes_its_stroke_from_the_input() {
        let spec = manifest(
            EffectKind::Spectrum,
            InputSource::Stroke {
                color: [0.9, 0.8, 0.7, 1.0],
                thickness: 5.0,
            },
        );
        let instance = build_instance(&spec, Vec2::new(200.0, 56.0)).unwrap();
        match instance {
            EffectInstance::Spectrum { stroke, .. } => {
                assert_eq!(stroke.thickness, 5.0);
                assert_eq!(stroke.color.x, 0.9);
            }
            other => panic!("wrong instance: {}", other.label()),
        }
    }

    #[test]
    fn gesture_paths_map_onto_point_tracks() {
        let mut spec = manifest(
            EffectKind::Gooey,
            InputSource::Solid {
                color: [1.0; 4],
            },
        );
        spec.gesture = Some(scenepack::GestureSpec {
            path: GesturePath::Orbit {
                center: [100.0, 80.0],
                radius: 30.0,
                period: 4.0,
            },
            press: 1.0,
            release: None,
        });
        let script = build_gesture(&spec).expect("gesture");
        assert!(script.is_dragging(2.0));
        assert!(!script.is_dragging(0.5));
        let p = script.path.position(0.0);
        assert!((p - Vec2::new(130.0, 80.0)).length() < 1e-4);
    }
}
