// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Runtime configuration of a clock controller.
//!
//! Everything a board decides about a controller that is not part of the chip
//! table lives here: how fast PLL lock is polled, whether resolved rates are
//! cached, how strictly the table is validated, and the rates of oscillators
//! that sit outside the controller. A `Config` is plain data and can be
//! loaded with serde alongside a board description; every field has a
//! default so a partial description is enough.

use serde::{Deserialize, Serialize};

/// An oscillator outside the controller, referenced by name from the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalClock {
    pub name: String,
    /// Frequency in Hz.
    pub frequency: u64,
}

impl ExternalClock {
    pub fn new(name: &str, frequency: u64) -> ExternalClock {
        ExternalClock {
            name: name.to_string(),
            frequency,
        }
    }
}

/// Data structure holding the controller configuration options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delay between two reads of a PLL lock bit, in microseconds.
    ///
    /// The controller lock is released for the duration of the delay so that
    /// unrelated clock requests can make progress while a PLL settles.
    pub lock_poll_interval_us: u32,

    /// Whether resolved rates are cached per node.
    ///
    /// Cached rates are read without taking the controller lock. Any change
    /// of factors, parent selection or root rate drops the cached value of
    /// the changed node and all of its descendants.
    pub cache_rates: bool,

    /// Whether to reject tables in which two entities claim the same bits of
    /// a register.
    pub check_overlapping_fields: bool,

    /// Whether the table's initialization sequence runs at attach.
    pub apply_init: bool,

    /// Oscillators supplied by the board, registered as root clocks.
    pub external_clocks: Vec<ExternalClock>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            lock_poll_interval_us: 1000,
            cache_rates: true,
            check_overlapping_fields: true,
            apply_init: true,
            external_clocks: Vec::new(),
        }
    }
}

impl Config {
    pub fn with_external_clock(mut self, name: &str, frequency: u64) -> Config {
        self.external_clocks.push(ExternalClock::new(name, frequency));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_description_keeps_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"cache_rates": false, "external_clocks": [{"name": "hosc", "frequency": 24000000}]}"#,
        )
        .unwrap();

        assert!(!config.cache_rates);
        assert_eq!(config.lock_poll_interval_us, 1000);
        assert!(config.apply_init);
        assert_eq!(config.external_clocks, vec![ExternalClock::new("hosc", 24_000_000)]);
    }
}
