//! User-tunable settings, persisted as TOML by `aeir-config`.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flight grid animation settings.
    pub flight: FlightConfig,
    /// Chat assistant settings.
    pub chat: ChatConfig,
}

/// Parameters of the flight grid animation.
///
/// Speeds are in distance units per frame, not per second, so a higher
/// `refresh_hz` makes the flight visibly faster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Forward speed per frame.
    pub speed: f32,
    /// Pinhole camera focal length.
    pub focal_length: f32,
    /// Depth at which particles respawn.
    pub z_max: f32,
    /// Distance between grid lines.
    pub grid_spacing: f32,
    /// Number of particles in the field.
    pub particle_count: usize,
    /// Frames per second of the render loop.
    pub refresh_hz: u32,
    /// Fixed seed for particle placement; random when unset.
    pub seed: Option<u64>,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            speed: 1.5,
            focal_length: 500.0,
            z_max: 1000.0,
            grid_spacing: 40.0,
            particle_count: 100,
            refresh_hz: 60,
            seed: None,
        }
    }
}

/// Settings for the hosted chat assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Model identifier.
    pub model: String,
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// API key; the environment takes over when unset.
    pub api_key: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}
