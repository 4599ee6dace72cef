// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Initialization sequencer.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ccu::Ccu;
use crate::delay::Delay;
use crate::errorcode::ErrorCode;
use crate::registers::RegisterWindow;

/// One startup setting: optionally reparent, then optionally set the rate,
/// then optionally ungate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitDesc {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub rate: Option<u64>,
    #[serde(default)]
    pub enable: bool,
}

impl InitDesc {
    pub fn new(name: &str) -> InitDesc {
        InitDesc {
            name: name.to_string(),
            parent: None,
            rate: None,
            enable: false,
        }
    }

    pub fn with_parent(mut self, parent: &str) -> InitDesc {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_rate(mut self, rate: u64) -> InitDesc {
        self.rate = Some(rate);
        self
    }

    pub fn enabled(mut self) -> InitDesc {
        self.enable = true;
        self
    }
}

/// Outcome of [`Ccu::apply_init`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Entries that completed, in order.
    pub applied: Vec<String>,
    /// Entries that failed and the first error each hit.
    pub failed: Vec<(String, ErrorCode)>,
}

impl<W: RegisterWindow, D: Delay> Ccu<W, D> {
    /// Apply `entries` strictly in order. Each entry finishes, PLL lock wait
    /// included, before the next starts. A failed entry is logged and
    /// skipped.
    pub fn apply_init(&self, entries: &[InitDesc]) -> InitReport {
        let mut report = InitReport::default();
        for entry in entries {
            match self.apply_entry(entry) {
                Ok(()) => report.applied.push(entry.name.clone()),
                Err(error) => {
                    warn!(clock = %entry.name, %error, "initial clock setting failed");
                    report.failed.push((entry.name.clone(), error));
                }
            }
        }
        report
    }

    fn apply_entry(&self, entry: &InitDesc) -> Result<(), ErrorCode> {
        if let Some(parent) = &entry.parent {
            self.set_parent(&entry.name, parent)?;
        }
        if let Some(rate) = entry.rate {
            self.set_rate(&entry.name, rate)?;
        }
        if entry.enable {
            self.enable(&entry.name)?;
        }
        Ok(())
    }
}
