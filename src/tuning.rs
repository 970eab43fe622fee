//! Scene tuning
//!
//! Every speed, size and duration the scene uses. Defaults come from
//! [`crate::consts`]; a page may override any subset with a JSON object.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rejected tuning input
#[derive(Debug)]
pub enum TuningError {
    /// Input was not a valid tuning object
    Parse(serde_json::Error),
    /// A size, speed, duration or count that must be strictly positive
    NonPositive { field: &'static str },
    /// A ratio outside its allowed range
    OutOfRange { field: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning JSON: {}", e),
            TuningError::NonPositive { field } => write!(f, "`{}` must be greater than zero", field),
            TuningError::OutOfRange { field } => write!(f, "`{}` is out of range", field),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Scene tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Fish ===
    /// One fish is created per image
    pub fish_images: Vec<String>,
    /// Pixels per reference frame
    pub fish_speed: f32,
    pub fish_size: f32,
    pub scare_duration: f32,
    pub max_scare_size_ratio: f32,
    pub scare_peak_at: f32,

    // === Shark ===
    pub shark_image: String,
    pub shark_speed: f32,
    pub shark_size: f32,
    pub shark_spawn_interval: f32,

    // === Jellyfish ===
    pub jelly_image: String,
    pub jelly_count: usize,
    pub jelly_size: f32,
    pub jelly_rise_speed: f32,
    pub jelly_fall_speed: f32,
    pub jelly_float_duration: f32,
    pub jelly_hidden_duration: f32,
    pub jelly_stagger: f32,

    // === Anchor ===
    pub anchor_image: String,
    pub anchor_display_duration: f32,
    pub anchor_hidden_duration: f32,
    pub anchor_drop_speed: f32,
    pub anchor_size: f32,
    pub anchor_inset: f32,

    // === Bubbles ===
    pub bubble_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fish_images: (1..=8).map(|i| format!("/fish_{}.png", i)).collect(),
            fish_speed: FISH_BASE_SPEED,
            fish_size: FISH_DEFAULT_SIZE,
            scare_duration: SCARE_DURATION_SECS,
            max_scare_size_ratio: MAX_SCARE_SIZE_RATIO,
            scare_peak_at: SCARE_PEAK_AT,

            shark_image: "/shark.png".to_string(),
            shark_speed: SHARK_SPEED,
            shark_size: SHARK_SIZE,
            shark_spawn_interval: SHARK_SPAWN_INTERVAL_SECS,

            jelly_image: "/jellyfish.png".to_string(),
            jelly_count: JELLY_COUNT,
            jelly_size: JELLY_SIZE,
            jelly_rise_speed: JELLY_RISE_SPEED,
            jelly_fall_speed: JELLY_FALL_SPEED,
            jelly_float_duration: JELLY_FLOAT_SECS,
            jelly_hidden_duration: JELLY_HIDDEN_SECS,
            jelly_stagger: JELLY_STAGGER_SECS,

            anchor_image: "/anchor.png".to_string(),
            anchor_display_duration: ANCHOR_DISPLAY_SECS,
            anchor_hidden_duration: ANCHOR_HIDDEN_SECS,
            anchor_drop_speed: ANCHOR_DROP_SPEED,
            anchor_size: ANCHOR_SIZE,
            anchor_inset: ANCHOR_INSET,

            bubble_count: BUBBLE_COUNT,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning object
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse tuning if present, falling back to defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded custom tuning");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// Check every value is usable by the state machines
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("fish_speed", self.fish_speed),
            ("fish_size", self.fish_size),
            ("scare_duration", self.scare_duration),
            ("shark_speed", self.shark_speed),
            ("shark_size", self.shark_size),
            ("shark_spawn_interval", self.shark_spawn_interval),
            ("jelly_size", self.jelly_size),
            ("jelly_rise_speed", self.jelly_rise_speed),
            ("jelly_fall_speed", self.jelly_fall_speed),
            ("jelly_float_duration", self.jelly_float_duration),
            ("jelly_hidden_duration", self.jelly_hidden_duration),
            ("anchor_display_duration", self.anchor_display_duration),
            ("anchor_hidden_duration", self.anchor_hidden_duration),
            ("anchor_drop_speed", self.anchor_drop_speed),
            ("anchor_size", self.anchor_size),
        ];
        for (field, value) in positive {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field });
            }
        }

        if !(self.jelly_stagger >= 0.0) {
            return Err(TuningError::OutOfRange { field: "jelly_stagger" });
        }
        if !(self.max_scare_size_ratio > 0.0 && self.max_scare_size_ratio <= 1.0) {
            return Err(TuningError::OutOfRange { field: "max_scare_size_ratio" });
        }
        if !(self.scare_peak_at > 0.0 && self.scare_peak_at < 1.0) {
            return Err(TuningError::OutOfRange { field: "scare_peak_at" });
        }
        if !(self.anchor_inset >= 0.0 && self.anchor_inset < 0.5) {
            return Err(TuningError::OutOfRange { field: "anchor_inset" });
        }

        Ok(())
    }
}
