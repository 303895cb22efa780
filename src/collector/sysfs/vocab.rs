//! Categorical vocabularies for string-valued power_supply attributes.
//!
//! The kernel reports charge_type, health, and status as strings from a
//! small closed set. Metrics want numbers, so each vocabulary assigns every
//! known token its zero-based list position as a stable code. The token
//! lists below come from the kernel power_supply class ABI; their order is
//! the contract and must not change, or codes shift under consumers.

use std::collections::HashMap;

/// One ordered closed vocabulary, mapping tokens to stable numeric codes.
///
/// Tokens absent from the vocabulary map to code 0. Each list deliberately
/// starts with "Unknown", so 0 doubles as the unknown/fallback code;
/// consumers cannot distinguish "value was Unknown" from "value was
/// unreadable or unrecognized", and must not rely on the difference.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    codes: HashMap<&'static str, f64>,
}

impl Vocabulary {
    fn new(tokens: &[&'static str]) -> Self {
        let codes = tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (*token, index as f64))
            .collect();
        Self { codes }
    }

    /// Returns the code for a token, 0 for unrecognized tokens.
    pub fn encode(&self, token: &str) -> f64 {
        self.codes.get(token).copied().unwrap_or(0.0)
    }
}

/// The three power_supply vocabularies, built once per collector and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct Vocabularies {
    pub charge_type: Vocabulary,
    pub health: Vocabulary,
    pub status: Vocabulary,
}

impl Vocabularies {
    pub fn new() -> Self {
        Self {
            charge_type: Vocabulary::new(&["Unknown", "N/A", "Trickle", "Fast"]),
            health: Vocabulary::new(&[
                "Unknown",
                "Good",
                "Overheat",
                "Dead",
                "Over voltage",
                "Unspecified failure",
                "Cold",
                "Watchdog timer expire",
                "Safety timer expire",
            ]),
            status: Vocabulary::new(&[
                "Unknown",
                "Charging",
                "Discharging",
                "Not charging",
                "Full",
            ]),
        }
    }
}

impl Default for Vocabularies {
    fn default() -> Self {
        Self::new()
    }
}
