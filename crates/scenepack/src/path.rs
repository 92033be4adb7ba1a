//! Centralizes filesystem and environment expansion rules so CLI handles and
//! repository lookups agree on how to locate scene packs. `handle` calls into
//! this helper before handing control to `repository`, and the CLI reuses it
//! to mirror the same `$VAR`/`~` semantics when surfacing paths to users.
//!
//! Types:
//!
//! - `PathResolver` remembers the caller's working directory and performs
//!   expansion/normalization used by pack discovery and diagnostics.
//!
//! Functions:
//!
//! - `PathResolver::expand_path` performs `$VAR` and `~` expansion while
//!   logging the transformation for troubleshooting.
//! - `PathResolver::normalize_local_path` prefers working-directory candidates
//!   when they exist.
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PathResolver {
    cwd: PathBuf,
}

impl PathResolver {
    pub fn new() -> Result<Self> {
        let cwd = env::current_dir().context("failed to resolve current working directory")?;
        Ok(Self { cwd })
    }

    pub fn with_cwd<P: Into<PathBuf>>(cwd: P) -> Self {
        Self { cwd: cwd.into() }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn expand_path(&self, input: &str) -> Result<PathBuf> {
        let expanded_env = expand_env_vars(input)?;
        let expanded = expand_home(&expanded_env)?;
        let path = PathBuf::from(expanded);
        debug!(original = %input, expanded = %path.display(), "expanded scene path");
        Ok(path)
    }

    /// Expands and, for relative inputs, prefers a working-directory candidate
    /// that exists on disk; otherwise the relative path is returned for the
    /// repository roots to try.
    pub fn normalize_local_path(&self, input: &str) -> Result<PathBuf> {
        let expanded = self.expand_path(input)?;
        if expanded.is_absolute() {
            return Ok(expanded);
        }
        if expanded.as_os_str().is_empty() {
            return Err(anyhow!("scene pack path must not be empty"));
        }

        let candidate = self.cwd.join(&expanded);
        if candidate.exists() {
            debug!(original = %input, normalized = %candidate.display(), "using working-directory scene path");
            return Ok(candidate);
        }
        Ok(expanded)
    }
}

fn expand_home(input: &str) -> Result<String> {
    if let Some(rest) = input.strip_prefix("~") {
        if rest.is_empty() || rest.starts_with('/') {
            let home =
                env::var("HOME").context("cannot expand '~': HOME is not set")?;
            return Ok(format!("{home}{rest}"));
        }
    }
    Ok(input.to_string())
}

fn expand_env_vars(input: &str) -> Result<String> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '$' {
            output.push(ch);
            continue;
        }
        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if is_env_name_char(next) {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            output.push('$');
            continue;
        }
        let value =
            env::var(&name).with_context(|| format!("environment variable '{name}' is unset"))?;
        output.push_str(&value);
    }
    Ok(output)
}

fn is_env_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_paths_through() {
        let resolver = PathResolver::with_cwd("/tmp");
        let path = resolver.expand_path("packs/demo").unwrap();
        assert_eq!(path, PathBuf::from("packs/demo"));
    }

    #[test]
    fn expands_environment_variables() {
        env::set_var("SCENEPACK_TEST_ROOT", "/opt/scenes");
        let resolver = PathResolver::with_cwd("/tmp");
        let path = resolver.expand_path("$SCENEPACK_TEST_ROOT/demo").unwrap();
        assert_eq!(path, PathBuf::from("/opt/scenes/demo"));
    }

    #[test]
    fn unset_variable_is_an_error() {
        let resolver = PathResolver::with_cwd("/tmp");
        assert!(resolver.expand_path("$SCENEPACK_TEST_UNSET/demo").is_err());
    }

    #[test]
    fn prefers_existing_working_directory_candidates() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp.path().join("demo")).unwrap();
        let resolver = PathResolver::with_cwd(temp.path());
        let normalized = resolver.normalize_local_path("demo").unwrap();
        assert_eq!(normalized, temp.path().join("demo"));

        // A path that exists nowhere stays relative for the repository roots.
        let missing = resolver.normalize_local_path("elsewhere").unwrap();
        assert_eq!(missing, PathBuf::from("elsewhere"));
    }
}
