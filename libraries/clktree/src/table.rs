// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Chip configuration tables.
//!
//! A [`CcuTable`] is everything one clock control unit needs: the compatible
//! strings it answers to and the ordered clock, gate, reset and init lists.
//! Tables are plain data. They can be built in code by a chip crate or loaded
//! from any serde format, and are validated when a controller is attached.

use serde::{Deserialize, Serialize};

use crate::gate::{GateDesc, ResetDesc};
use crate::init::InitDesc;
use crate::node::ClockDesc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcuTable {
    /// Compatible strings of the hardware this table describes.
    pub compatible: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Size of the register window in bytes.
    pub window_len: usize,
    #[serde(default)]
    pub clocks: Vec<ClockDesc>,
    #[serde(default)]
    pub gates: Vec<GateDesc>,
    #[serde(default)]
    pub resets: Vec<ResetDesc>,
    /// Applied in order at attach.
    #[serde(default)]
    pub init: Vec<InitDesc>,
}

impl CcuTable {
    pub fn is_compatible(&self, compatible: &str) -> bool {
        self.compatible.iter().any(|c| c == compatible)
    }
}

/// Find the table claiming `compatible`. A controller must only be attached
/// when this returns a table.
pub fn probe<'a>(compatible: &str, tables: &[&'a CcuTable]) -> Option<&'a CcuTable> {
    tables.iter().copied().find(|table| table.is_compatible(compatible))
}
