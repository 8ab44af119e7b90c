// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Box construction configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

/// Default config file looked up by [`BuildConfig::load`]
pub const CONFIG_FILE: &str = "obbkit.toml";

/// Box construction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Also try the hull[last] -> hull[0] edge as a caliper direction
    pub include_closing_edge: bool,
    /// Skip faces whose normal matches an already tried face
    pub skip_parallel_faces: bool,
    /// Relative tolerance for treating a hull point as lying on an edge line
    pub colinear_epsilon: f32,
    /// Refuse meshes with more triangles than this
    pub max_triangles: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            include_closing_edge: false,
            skip_parallel_faces: true,
            colinear_epsilon: 1e-5,
            max_triangles: None,
        }
    }
}

impl BuildConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: BuildConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply `OBBKIT_*` overrides looked up through `var`
    ///
    /// Values that do not parse leave the current setting in place.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        override_with(&var, "OBBKIT_INCLUDE_CLOSING_EDGE", &mut self.include_closing_edge);
        override_with(&var, "OBBKIT_SKIP_PARALLEL_FACES", &mut self.skip_parallel_faces);

        let mut max_triangles = self.max_triangles.unwrap_or_default();
        if override_with(&var, "OBBKIT_MAX_TRIANGLES", &mut max_triangles) {
            self.max_triangles = Some(max_triangles);
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

fn override_with<T: FromStr>(var: &impl Fn(&str) -> Option<String>, name: &str, slot: &mut T) -> bool {
    let Some(value) = var(name) else {
        return false;
    };
    match value.trim().parse() {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(_) => {
            warn!(name, value = %value, "ignoring unparsable override");
            false
        }
    }
}
