use std::time::Duration;

use bevy::prelude::*;
use thiserror::Error;

use crate::domain::round::{ChoiceSource, RandomOpponent, RoundTiming, ScriptedOpponent};
use crate::domain::rules::{Choice, ParseChoiceError};

pub const ENV_COMPUTER_DELAY_MS: &str = "RPS_COMPUTER_DELAY_MS";
pub const ENV_COOLDOWN_MS: &str = "RPS_COOLDOWN_MS";
pub const ENV_SEED: &str = "RPS_SEED";
pub const ENV_MUTED: &str = "RPS_MUTED";
pub const ENV_OPPONENT_SCRIPT: &str = "RPS_OPPONENT_SCRIPT";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{var} must be an unsigned integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be true/false/1/0, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
    #[error("{var}: {source}")]
    InvalidChoice {
        var: &'static str,
        #[source]
        source: ParseChoiceError,
    },
}

/// How the computer picks its move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpponentConfig {
    pub seed: Option<u64>,
    pub script: Vec<Choice>,
}

impl OpponentConfig {
    pub fn build(&self) -> Box<dyn ChoiceSource> {
        if let Some(scripted) = ScriptedOpponent::new(self.script.iter().copied()) {
            return Box::new(scripted);
        }
        match self.seed {
            Some(seed) => Box::new(RandomOpponent::seeded(seed)),
            None => Box::new(RandomOpponent::from_entropy()),
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameSettings {
    pub computer_delay_ms: u64,
    pub cooldown_ms: u64,
    pub entrance_secs: f32,
    pub victory_secs: f32,
    pub camera_secs: f32,
    pub sound_enabled: bool,
    pub show_help: bool,
    pub show_settings: bool,
    pub show_diagnostics: bool,
    pub opponent: OpponentConfig,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            computer_delay_ms: 1000,
            cooldown_ms: 3000,
            entrance_secs: 1.0,
            victory_secs: 1.0,
            camera_secs: 1.0,
            sound_enabled: true,
            show_help: true,
            show_settings: false,
            show_diagnostics: false,
            opponent: OpponentConfig::default(),
        }
    }
}

impl GameSettings {
    /// Defaults with `RPS_*` environment overrides applied. Bad values are
    /// logged and the default is kept.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        for err in settings.apply_overrides(|var| std::env::var(var).ok()) {
            warn!("ignoring environment override: {err}");
        }
        settings
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Vec<SettingsError> {
        let mut errors = Vec::new();

        if let Some(value) = lookup(ENV_COMPUTER_DELAY_MS) {
            match parse_number(ENV_COMPUTER_DELAY_MS, &value) {
                Ok(ms) => self.computer_delay_ms = ms,
                Err(err) => errors.push(err),
            }
        }
        if let Some(value) = lookup(ENV_COOLDOWN_MS) {
            match parse_number(ENV_COOLDOWN_MS, &value) {
                Ok(ms) => self.cooldown_ms = ms,
                Err(err) => errors.push(err),
            }
        }
        if let Some(value) = lookup(ENV_SEED) {
            match parse_number(ENV_SEED, &value) {
                Ok(seed) => self.opponent.seed = Some(seed),
                Err(err) => errors.push(err),
            }
        }
        if let Some(value) = lookup(ENV_MUTED) {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.sound_enabled = false,
                "0" | "false" | "no" => self.sound_enabled = true,
                _ => errors.push(SettingsError::InvalidFlag {
                    var: ENV_MUTED,
                    value,
                }),
            }
        }
        if let Some(value) = lookup(ENV_OPPONENT_SCRIPT) {
            // Unknown names are reported and skipped; the rest of the script stands.
            for name in value.split(',').filter(|name| !name.trim().is_empty()) {
                match name.parse::<Choice>() {
                    Ok(choice) => self.opponent.script.push(choice),
                    Err(source) => errors.push(SettingsError::InvalidChoice {
                        var: ENV_OPPONENT_SCRIPT,
                        source,
                    }),
                }
            }
        }

        errors
    }

    pub fn round_timing(&self) -> RoundTiming {
        RoundTiming {
            computer_delay: Duration::from_millis(self.computer_delay_ms),
            cooldown: Duration::from_millis(self.cooldown_ms),
        }
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}
