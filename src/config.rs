// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::reachability::FloodSettings;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub heuristics: HeuristicsConfig,
    pub flood: FloodConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Response budget for a single turn
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Health-driven behaviour
#[derive(Debug, Deserialize, Clone)]
pub struct HeuristicsConfig {
    /// Below this health the snake hunts food and the fill favours food cells
    pub low_health_threshold: i32,
    /// Flood-fill weight of a food cell while below the threshold
    pub starving_food_weight: u32,
}

/// Reachability flood fill
#[derive(Debug, Deserialize, Clone)]
pub struct FloodConfig {
    pub depth_multiplier: u32,
    pub depth_offset: u32,
    #[serde(default)]
    pub legacy_three_way: bool,
}

/// Static metadata returned on GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            heuristics: HeuristicsConfig {
                low_health_threshold: 20,
                starving_food_weight: 4,
            },
            flood: FloodConfig {
                depth_multiplier: 2,
                depth_offset: 2,
                legacy_three_way: false,
            },
            appearance: AppearanceConfig {
                author: "".to_string(),
                color: "#FF0000".to_string(),
                head: "ski".to_string(),
                tail: "weight".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default()
            .unwrap_or_else(|e| {
                log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
                Self::default_hardcoded()
            })
    }

    /// Decision-pipeline view of the configuration
    pub fn flood_settings(&self) -> FloodSettings {
        FloodSettings {
            depth_multiplier: self.flood.depth_multiplier,
            depth_offset: self.flood.depth_offset,
            low_health_threshold: self.heuristics.low_health_threshold,
            starving_food_weight: self.heuristics.starving_food_weight,
            legacy_three_way: self.flood.legacy_three_way,
        }
    }
}
