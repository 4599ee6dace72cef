// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Gate and reset line descriptors.
//!
//! Bus gates and reset lines are single bits. They are independent of the
//! clock graph even when a gate and a reset share a register word: a gate
//! line only passes its parent's rate through, and a reset line has no rate
//! at all.

use serde::{Deserialize, Serialize};
use tock_registers::fields::Field;
use tock_registers::LocalRegisterCopy;

/// Which bit level makes a line active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Setting the bit enables the gate or asserts the reset.
    #[default]
    ActiveHigh,
    /// Clearing the bit enables the gate or asserts the reset.
    ActiveLow,
}

impl Polarity {
    /// Bits to write at `bit` so the line ends up `active`.
    pub fn bits(self, bit: u32, active: bool) -> u32 {
        let high = match self {
            Polarity::ActiveHigh => active,
            Polarity::ActiveLow => !active,
        };
        if high {
            1 << bit
        } else {
            0
        }
    }

    /// Whether the line at `bit` is active in `word`.
    pub fn is_active(self, bit: u32, word: u32) -> bool {
        let high = LocalRegisterCopy::<u32>::new(word).is_set(Field::<u32, ()>::new(1, bit as usize));
        match self {
            Polarity::ActiveHigh => high,
            Polarity::ActiveLow => !high,
        }
    }
}

/// A clock gate bit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDesc {
    pub id: u32,
    pub name: String,
    /// Clock whose rate this gate passes through.
    #[serde(default)]
    pub parent: Option<String>,
    pub offset: u32,
    pub bit: u32,
    #[serde(default)]
    pub polarity: Polarity,
    /// Reset line sequenced with this gate by `bring_up` and `tear_down`.
    #[serde(default)]
    pub reset: Option<String>,
}

impl GateDesc {
    pub fn new(id: u32, name: &str, parent: &str, offset: u32, bit: u32) -> GateDesc {
        GateDesc {
            id,
            name: name.to_string(),
            parent: Some(parent.to_string()),
            offset,
            bit,
            polarity: Polarity::ActiveHigh,
            reset: None,
        }
    }

    pub fn with_reset(mut self, reset: &str) -> GateDesc {
        self.reset = Some(reset.to_string());
        self
    }

    pub fn active_low(mut self) -> GateDesc {
        self.polarity = Polarity::ActiveLow;
        self
    }
}

/// A reset line bit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetDesc {
    pub id: u32,
    pub name: String,
    pub offset: u32,
    pub bit: u32,
    #[serde(default)]
    pub polarity: Polarity,
}

impl ResetDesc {
    pub fn new(id: u32, name: &str, offset: u32, bit: u32) -> ResetDesc {
        ResetDesc {
            id,
            name: name.to_string(),
            offset,
            bit,
            polarity: Polarity::ActiveHigh,
        }
    }

    /// Reset is asserted while the bit is clear.
    pub fn active_low(mut self) -> ResetDesc {
        self.polarity = Polarity::ActiveLow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_bits() {
        assert_eq!(Polarity::ActiveHigh.bits(3, true), 0b1000);
        assert_eq!(Polarity::ActiveHigh.bits(3, false), 0);
        assert_eq!(Polarity::ActiveLow.bits(16, true), 0);
        assert_eq!(Polarity::ActiveLow.bits(16, false), 1 << 16);
    }

    #[test]
    fn polarity_reads_back() {
        assert!(Polarity::ActiveHigh.is_active(31, 0x8000_0000));
        assert!(!Polarity::ActiveHigh.is_active(30, 0x8000_0000));
        assert!(Polarity::ActiveLow.is_active(16, 0x0000_0001));
        assert!(!Polarity::ActiveLow.is_active(0, 0x0000_0001));
    }

    #[test]
    fn descriptors_deserialize_with_defaults() {
        let gate: GateDesc = serde_json::from_str(
            r#"{"id": 62, "name": "bus-uart0", "parent": "apb1", "offset": 2316, "bit": 0}"#,
        )
        .unwrap();
        assert_eq!(gate, GateDesc::new(62, "bus-uart0", "apb1", 0x090c, 0));

        let reset: ResetDesc = serde_json::from_str(
            r#"{"id": 18, "name": "bus-uart0", "offset": 2316, "bit": 16, "polarity": "active_low"}"#,
        )
        .unwrap();
        assert_eq!(reset, ResetDesc::new(18, "bus-uart0", 0x090c, 16).active_low());
    }
}
