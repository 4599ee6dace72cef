// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Factor codec.
//!
//! A [`FactorSpec`] describes one factor bitfield (N, K, M, P, ...) of a
//! clock register: where it sits in the word and how the raw bits map to the
//! logical integer factor. The same codec is used to read the current factor
//! from hardware and to find the bit pattern for a candidate factor while
//! solving for a rate, so it is pure and keeps no state.

use serde::{Deserialize, Serialize};
use tock_registers::fields::{Field, FieldValue};

use crate::errorcode::ErrorCode;

/// How raw bitfield values map to logical factors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Quantization {
    /// The factor is the constant `value`. The bitfield is ignored.
    Fixed { value: u32 },
    /// Raw `v` is factor `v + 1`.
    ZeroIsOne,
    /// Raw `v` is factor `2^v`.
    PowerOfTwo,
    /// Raw `v` is factor `v + offset`.
    Linear {
        #[serde(default)]
        offset: u32,
    },
}

/// One factor bitfield of a clock register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorSpec {
    /// Bit position of the field, 0 is the LSB.
    pub shift: u32,
    /// Width of the field in bits.
    pub width: u32,
    #[serde(flatten)]
    pub policy: Quantization,
}

impl FactorSpec {
    pub const fn fixed(value: u32) -> FactorSpec {
        FactorSpec {
            shift: 0,
            width: 0,
            policy: Quantization::Fixed { value },
        }
    }

    pub const fn zero_is_one(shift: u32, width: u32) -> FactorSpec {
        FactorSpec {
            shift,
            width,
            policy: Quantization::ZeroIsOne,
        }
    }

    pub const fn power_of_two(shift: u32, width: u32) -> FactorSpec {
        FactorSpec {
            shift,
            width,
            policy: Quantization::PowerOfTwo,
        }
    }

    pub const fn linear(shift: u32, width: u32, offset: u32) -> FactorSpec {
        FactorSpec {
            shift,
            width,
            policy: Quantization::Linear { offset },
        }
    }

    /// True if the factor lives in register bits rather than being constant.
    pub fn is_variable(&self) -> bool {
        !matches!(self.policy, Quantization::Fixed { .. }) && self.width > 0
    }

    /// Largest raw value the field can hold.
    pub fn max_raw(&self) -> u32 {
        match self.width {
            0 => 0,
            w if w >= 32 => u32::MAX,
            w => (1 << w) - 1,
        }
    }

    fn field(&self) -> Field<u32, ()> {
        Field::new(self.max_raw(), self.shift as usize)
    }

    /// Mask of the field within the register word. Empty for constant
    /// factors.
    pub fn mask(&self) -> u32 {
        if self.is_variable() {
            self.max_raw() << self.shift
        } else {
            0
        }
    }

    /// Raw bits to logical factor.
    pub fn decode(&self, raw: u32) -> u32 {
        let raw = raw & self.max_raw();
        match self.policy {
            Quantization::Fixed { value } => value,
            Quantization::ZeroIsOne => raw.saturating_add(1),
            Quantization::PowerOfTwo => 1u32.checked_shl(raw).unwrap_or(u32::MAX),
            Quantization::Linear { offset } => raw.saturating_add(offset),
        }
    }

    /// Logical factor to raw bits.
    pub fn encode(&self, factor: u32) -> Result<u32, ErrorCode> {
        let raw = match self.policy {
            Quantization::Fixed { value } => {
                return if factor == value {
                    Ok(0)
                } else {
                    Err(ErrorCode::UnrepresentableFactor)
                };
            }
            Quantization::ZeroIsOne => factor.checked_sub(1),
            Quantization::PowerOfTwo => {
                if factor.is_power_of_two() {
                    Some(factor.trailing_zeros())
                } else {
                    None
                }
            }
            Quantization::Linear { offset } => factor.checked_sub(offset),
        };
        match raw {
            Some(raw) if raw <= self.max_raw() => Ok(raw),
            _ => Err(ErrorCode::UnrepresentableFactor),
        }
    }

    /// Current factor held in a register word.
    pub fn read(&self, word: u32) -> u32 {
        if self.is_variable() {
            self.decode(self.field().read(word))
        } else {
            self.decode(0)
        }
    }

    /// The field placed in a register word, ready to be merged with other
    /// fields of the same register. Constant factors contribute nothing.
    pub fn field_value(&self, factor: u32) -> Result<FieldValue<u32, ()>, ErrorCode> {
        let raw = self.encode(factor)?;
        if self.is_variable() {
            Ok(self.field().val(raw))
        } else {
            Ok(FieldValue::<u32, ()>::new(0, 0, 0))
        }
    }

    /// Every representable factor, in ascending order.
    pub fn factors(&self) -> impl Iterator<Item = u32> {
        let spec = *self;
        let last = if spec.is_variable() { spec.max_raw() } else { 0 };
        (0..=last).map(move |raw| spec.decode(raw))
    }

    /// Checks that the field fits a 32-bit register and that every raw value
    /// decodes without overflowing.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if let Quantization::Fixed { value } = self.policy {
            if value == 0 {
                return Err("constant factor of zero");
            }
            return Ok(());
        }
        if self.width == 0 {
            return Err("variable factor with a zero-width field");
        }
        if self.shift as u64 + self.width as u64 > 32 {
            return Err("field extends past bit 31");
        }
        match self.policy {
            Quantization::ZeroIsOne if self.width > 31 => Err("ZeroIsOne field wider than 31 bits"),
            Quantization::PowerOfTwo if self.max_raw() > 31 => {
                Err("PowerOfTwo field can encode exponents above 31")
            }
            Quantization::Linear { offset } if offset.checked_add(self.max_raw()).is_none() => {
                Err("Linear offset overflows the field range")
            }
            _ => Ok(()),
        }
    }
}
