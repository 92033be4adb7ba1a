use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistMode {
    Continuous,
    Shuffle,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShowConfig {
    pub version: u32,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub playlists: BTreeMap<String, Playlist>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Defaults {
    pub playlist: Option<String>,
    pub fps: Option<f32>,
    /// Render resolution as `WIDTHxHEIGHT`.
    pub size: Option<String>,
    /// Directory frames are written under; the CLI falls back to its own
    /// default when unset.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Playlist {
    pub mode: PlaylistMode,
    #[serde(
        default = "default_duration",
        deserialize_with = "deserialize_duration"
    )]
    pub item_duration: Duration,
    #[serde(
        default = "default_crossfade",
        deserialize_with = "deserialize_duration"
    )]
    pub crossfade: Duration,
    #[serde(default)]
    pub fps: Option<f32>,
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistItem {
    pub handle: String,
    #[serde(default, deserialize_with = "deserialize_duration_opt")]
    pub duration: Option<Duration>,
    #[serde(default)]
    pub fps: Option<f32>,
}

/// Item with playlist and global defaults folded in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    pub handle: String,
    pub duration: Duration,
    pub fps: Option<f32>,
    pub crossfade: Duration,
}

fn default_crossfade() -> Duration {
    Duration::from_secs_f32(1.0)
}

fn default_duration() -> Duration {
    Duration::from_secs(10)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_duration_opt(deserializer).map(|d| d.unwrap_or_else(default_duration))
}

fn deserialize_duration_opt<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Option<Duration>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as number of seconds or human-readable string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            humantime::parse_duration(v)
                .map(Some)
                .map_err(|err| E::custom(format!("invalid duration '{v}': {err}")))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(Duration::from_secs(v)))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Some(Duration::from_secs(v as u64)))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_nan() || v.is_sign_negative() {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Some(Duration::from_secs_f64(v)))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(Visitor)
}

/// Parses a `WIDTHxHEIGHT` resolution spec.
pub fn parse_size(raw: &str) -> Result<(u32, u32), ConfigError> {
    let mut parts = raw.trim().splitn(2, ['x', 'X']);
    let parse = |part: Option<&str>| -> Result<u32, ConfigError> {
        part.and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|&value| value > 0)
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "invalid size '{raw}'; expected WIDTHxHEIGHT with positive integers"
                ))
            })
    };
    let width = parse(parts.next())?;
    let height = parse(parts.next())?;
    Ok((width, height))
}

impl ShowConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: ShowConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    pub fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.get(name)
    }

    pub fn default_playlist(&self) -> Option<&str> {
        self.defaults.playlist.as_deref()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        if self.playlists.is_empty() {
            return Err(ConfigError::Invalid(
                "config must define at least one playlist".into(),
            ));
        }

        for (name, playlist) in &self.playlists {
            if playlist.items.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "playlist '{name}' must contain at least one item"
                )));
            }

            if playlist.item_duration.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "playlist '{name}' item_duration must be greater than zero"
                )));
            }

            if let Some(fps) = playlist.fps {
                if fps < 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "playlist '{name}' fps must be >= 0"
                    )));
                }
            }

            for item in &playlist.items {
                if item.handle.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "playlist '{name}' contains an item with empty handle"
                    )));
                }

                if let Some(duration) = item.duration {
                    if duration.is_zero() {
                        return Err(ConfigError::Invalid(format!(
                            "playlist '{name}' item '{}' duration must be > 0",
                            item.handle
                        )));
                    }
                }

                if let Some(fps) = item.fps {
                    if fps < 0.0 {
                        return Err(ConfigError::Invalid(format!(
                            "playlist '{name}' item '{}' fps must be >= 0",
                            item.handle
                        )));
                    }
                }
            }
        }

        if let Some(default_playlist) = &self.defaults.playlist {
            if !self.playlists.contains_key(default_playlist) {
                return Err(ConfigError::Invalid(format!(
                    "defaults.playlist references unknown playlist '{default_playlist}'"
                )));
            }
        }

        if let Some(fps) = self.defaults.fps {
            if fps < 0.0 {
                return Err(ConfigError::Invalid("defaults.fps must be >= 0".into()));
            }
        }

        if let Some(size) = &self.defaults.size {
            parse_size(size)?;
        }

        Ok(())
    }
}

impl Playlist {
    pub fn resolved_item(&self, index: usize, defaults: &Defaults) -> Option<ResolvedItem> {
        let item = self.items.get(index)?;
        let duration = item.duration.unwrap_or(self.item_duration);
        let fps = item.fps.or(self.fps).or(defaults.fps);

        Some(ResolvedItem {
            handle: item.handle.clone(),
            duration,
            fps,
            crossfade: self.crossfade,
        })
    }
}
