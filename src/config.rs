//! Field configuration.
//!
//! Every option is optional and falls back to the component defaults:
//!
//! | Option | Default | Meaning |
//! |--------|---------|---------|
//! | `quantity` | 100 | Number of live particles |
//! | `staticity` | 50 | Higher = particles follow the pointer less |
//! | `ease` | 50 | Smoothing denominator for offset convergence |
//! | `size` | 0.4 | Base radius in CSS pixels |
//! | `color` | `#ffffff` | Hex fill color |
//! | `vx`, `vy` | 0 | Global drift added to every particle each frame |
//!
//! Configs can be built in code or loaded from JSON:
//!
//! ```ignore
//! let config = FieldConfig::new()
//!     .with_quantity(80)
//!     .with_ease(80.0)
//!     .with_color("#0ea5e9");
//!
//! let from_disk = FieldConfig::load("hero.json")?;
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::color::Rgb;
use crate::error::{ConfigError, LoadError};

fn default_quantity() -> usize {
    100
}

fn default_staticity() -> f32 {
    50.0
}

fn default_ease() -> f32 {
    50.0
}

fn default_size() -> f32 {
    0.4
}

fn default_color() -> String {
    "#ffffff".to_string()
}

/// Particle field options.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    /// Styling hook for the host container. Has no effect on the simulation.
    #[serde(default)]
    pub class_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: usize,
    #[serde(default = "default_staticity")]
    pub staticity: f32,
    #[serde(default = "default_ease")]
    pub ease: f32,
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            quantity: default_quantity(),
            staticity: default_staticity(),
            ease: default_ease(),
            size: default_size(),
            color: default_color(),
            vx: 0.0,
            vy: 0.0,
        }
    }
}

impl FieldConfig {
    /// Create a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// The contact page hero: 80 sky-blue particles with slower easing.
    pub fn contact_hero() -> Self {
        Self::new()
            .with_class_name("absolute inset-0")
            .with_quantity(80)
            .with_ease(80.0)
            .with_color("#0ea5e9")
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the number of particles.
    pub fn with_quantity(mut self, quantity: usize) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the pointer staticity (higher = less responsive).
    pub fn with_staticity(mut self, staticity: f32) -> Self {
        self.staticity = staticity;
        self
    }

    /// Set the easing denominator. Must be greater than zero.
    pub fn with_ease(mut self, ease: f32) -> Self {
        self.ease = ease;
        self
    }

    /// Set the base particle radius.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the fill color as a hex string (`#rgb` or `#rrggbb`).
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the global drift added to every particle's velocity.
    pub fn with_drift(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    /// Parsed fill color.
    pub fn rgb(&self) -> Result<Rgb, ConfigError> {
        Rgb::from_hex(&self.color)
    }

    /// Check every option, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [
            ("staticity", self.staticity),
            ("ease", self.ease),
            ("size", self.size),
            ("vx", self.vx),
            ("vy", self.vy),
        ];
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteValue { field });
            }
        }

        if self.ease <= 0.0 {
            return Err(ConfigError::NonPositiveEase(self.ease));
        }
        if self.staticity <= 0.0 {
            return Err(ConfigError::NonPositiveStaticity(self.staticity));
        }
        if self.size < 0.0 {
            return Err(ConfigError::NegativeSize(self.size));
        }
        self.rgb()?;
        Ok(())
    }

    /// Save the configuration as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
