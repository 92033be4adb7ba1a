//! Defines the manifest schema shared by on-disk scene packs and the bundled
//! defaults, giving `repository` predictable metadata to search while letting
//! the CLI bindings build effect instances from validated data. Pack loading
//! and renderer glue rely on these structures to walk inputs, parameter maps,
//! and choreography tracks.
//!
//! Types:
//!
//! - `SceneManifest` captures top-level metadata, the effect selection, the
//!   backing input, static parameters, and choreography consumed by
//!   `LocalScenePack` and `SceneRepository`.
//! - `EffectKind` names the four effects and their parameter tables.
//! - `InputSource` enumerates manifest-supported backing layers exactly as the
//!   renderer bindings consume them.
//! - `TrackSpec`/`TrackMotion`/`CurveName` describe scalar choreography; the
//!   motion crate turns them into runtime tracks.
//! - `GestureSpec`/`GesturePath` script the gooey effect's drag gesture.
//!
//! Functions:
//!
//! - `SceneManifest::validate` returns human-readable issues so pack loaders
//!   can surface misconfigurations without panicking.
use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SceneManifest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub effect: EffectKind,
    pub input: InputSource,
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
    #[serde(default)]
    pub tracks: Vec<TrackSpec>,
    #[serde(default)]
    pub gesture: Option<GestureSpec>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Spectrum,
    Gooey,
    Depth,
    Crt,
}

impl EffectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectKind::Spectrum => "spectrum",
            EffectKind::Gooey => "gooey",
            EffectKind::Depth => "depth",
            EffectKind::Crt => "crt",
        }
    }

    /// Knob names the effect accepts from `params` and `tracks`.
    pub fn params(self) -> &'static [&'static str] {
        match self {
            EffectKind::Spectrum => &["tilt_x", "tilt_y"],
            EffectKind::Gooey => &[
                "angularity",
                "amplitude",
                "viscosity",
                "touch_x",
                "touch_y",
                "velocity_x",
                "velocity_y",
                "dragging",
            ],
            EffectKind::Depth => &["normalized_depth", "max_blur"],
            EffectKind::Crt => &["pixel_size"],
        }
    }

    /// Declared range for a knob, if it has one. Coordinates and velocities
    /// are unconstrained.
    pub fn param_range(self, name: &str) -> Option<(f32, f32)> {
        match name {
            "tilt_x" | "tilt_y" => Some((-1.0, 1.0)),
            "angularity" | "amplitude" | "viscosity" | "dragging" | "normalized_depth" => {
                Some((0.0, 1.0))
            }
            "max_blur" => Some((0.0, 64.0)),
            "pixel_size" => Some((1.0, 512.0)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputSource {
    /// Image file loaded relative to the pack root.
    Texture { path: PathBuf },
    /// Procedural checkerboard.
    Checker {
        #[serde(default = "default_checker_cell")]
        cell: f32,
        #[serde(default = "default_checker_even")]
        even: [f32; 4],
        #[serde(default = "default_checker_odd")]
        odd: [f32; 4],
    },
    /// Single flat color.
    Solid { color: [f32; 4] },
    /// Pill border stroke; only meaningful for the spectrum effect, which
    /// recolors an existing stroke instead of resampling a layer.
    Stroke {
        color: [f32; 4],
        #[serde(default = "default_stroke_thickness")]
        thickness: f32,
    },
}

fn default_checker_cell() -> f32 {
    16.0
}

fn default_checker_even() -> [f32; 4] {
    [0.92, 0.92, 0.94, 1.0]
}

fn default_checker_odd() -> [f32; 4] {
    [0.16, 0.17, 0.2, 1.0]
}

fn default_stroke_thickness() -> f32 {
    3.0
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TrackSpec {
    pub param: String,
    #[serde(flatten)]
    pub motion: TrackMotion,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TrackMotion {
    Constant {
        value: f32,
    },
    Ramp {
        from: f32,
        to: f32,
        duration: f32,
        #[serde(default)]
        curve: CurveName,
    },
    Oscillate {
        center: f32,
        amplitude: f32,
        period: f32,
        #[serde(default)]
        phase: f32,
    },
    Pulse {
        low: f32,
        high: f32,
        period: f32,
        #[serde(default = "default_pulse_duty")]
        duty: f32,
    },
}

fn default_pulse_duty() -> f32 {
    0.5
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CurveName {
    #[default]
    Linear,
    Smoothstep,
    EaseInOut,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GestureSpec {
    #[serde(flatten)]
    pub path: GesturePath,
    /// Seconds into the scene at which the drag begins.
    #[serde(default)]
    pub press: f32,
    /// Seconds at which the drag ends; `None` holds until the scene ends.
    #[serde(default)]
    pub release: Option<f32>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "path", rename_all = "lowercase")]
pub enum GesturePath {
    Point {
        at: [f32; 2],
    },
    Line {
        from: [f32; 2],
        to: [f32; 2],
        period: f32,
    },
    Orbit {
        center: [f32; 2],
        radius: f32,
        period: f32,
    },
}

impl SceneManifest {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let wants_stroke = matches!(self.effect, EffectKind::Spectrum);
        let has_stroke = matches!(self.input, InputSource::Stroke { .. });
        if wants_stroke && !has_stroke {
            issues.push("spectrum scenes recolor a stroke; declare a 'stroke' input".to_string());
        }
        if !wants_stroke && has_stroke {
            issues.push(format!(
                "effect '{}' samples a backing layer and cannot use a 'stroke' input",
                self.effect.as_str()
            ));
        }

        if let InputSource::Checker { cell, .. } = self.input {
            if cell <= 0.0 {
                issues.push("checker input cell size must be positive".to_string());
            }
        }
        if let InputSource::Stroke { thickness, .. } = self.input {
            if thickness <= 0.0 {
                issues.push("stroke thickness must be positive".to_string());
            }
        }

        for (name, value) in &self.params {
            self.check_param(name, Some(*value), "params", &mut issues);
        }

        for track in &self.tracks {
            self.check_param(&track.param, None, "track", &mut issues);
            match &track.motion {
                TrackMotion::Constant { .. } => {}
                TrackMotion::Ramp { duration, .. } => {
                    if *duration <= 0.0 {
                        issues.push(format!(
                            "track '{}' ramp duration must be positive",
                            track.param
                        ));
                    }
                }
                TrackMotion::Oscillate { period, .. } => {
                    if *period <= 0.0 {
                        issues.push(format!(
                            "track '{}' oscillation period must be positive",
                            track.param
                        ));
                    }
                }
                TrackMotion::Pulse { period, duty, .. } => {
                    if *period <= 0.0 {
                        issues.push(format!(
                            "track '{}' pulse period must be positive",
                            track.param
                        ));
                    }
                    if !(0.0..=1.0).contains(duty) {
                        issues.push(format!(
                            "track '{}' pulse duty must lie in [0, 1]",
                            track.param
                        ));
                    }
                }
            }
        }

        if let Some(gesture) = &self.gesture {
            if self.effect != EffectKind::Gooey {
                issues.push(format!(
                    "gesture scripts only apply to the gooey effect, not '{}'",
                    self.effect.as_str()
                ));
            }
            match &gesture.path {
                GesturePath::Point { .. } => {}
                GesturePath::Line { period, .. } | GesturePath::Orbit { period, .. } => {
                    if *period <= 0.0 {
                        issues.push("gesture path period must be positive".to_string());
                    }
                }
            }
            if gesture.press < 0.0 {
                issues.push("gesture press time must be non-negative".to_string());
            }
            if let Some(release) = gesture.release {
                if release <= gesture.press {
                    issues.push("gesture release must come after press".to_string());
                }
            }
        }

        issues
    }

    fn check_param(
        &self,
        name: &str,
        value: Option<f32>,
        context: &str,
        issues: &mut Vec<String>,
    ) {
        if !self.effect.params().contains(&name) {
            issues.push(format!(
                "{context} references '{name}', which effect '{}' does not expose",
                self.effect.as_str()
            ));
            return;
        }
        if let (Some(value), Some((min, max))) = (value, self.effect.param_range(name)) {
            if !(min..=max).contains(&value) {
                issues.push(format!(
                    "{context} '{name}' = {value} lies outside [{min}, {max}]"
                ));
            }
        }
    }
}
