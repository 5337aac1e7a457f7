//! Instruction policy selection

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which instruction kind a run emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionPolicy {
    /// Absolute motor degrees past the calibration zero
    #[default]
    Absolute,
    /// Speed ratio plus duration relative to the previous target
    Timed,
}

impl fmt::Display for InstructionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => write!(f, "absolute"),
            Self::Timed => write!(f, "timed"),
        }
    }
}

impl FromStr for InstructionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "absolute" => Ok(Self::Absolute),
            "timed" | "timed-delta" => Ok(Self::Timed),
            other => Err(ConfigError::Invalid {
                key: "instructions.policy".to_string(),
                reason: format!("unknown policy '{other}'"),
            }),
        }
    }
}
