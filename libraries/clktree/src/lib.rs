// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Table-driven clock control unit engine.
//!
//! A chip crate describes its clock control unit as a [`CcuTable`]: every
//! oscillator, PLL, divider, selector, gate and reset line, encoded as
//! register offsets, bit positions and field widths. [`Ccu::attach`]
//! validates the table into a [`Registry`] and drives the hardware through a
//! [`RegisterWindow`].
//!
//! Consumers address clocks by table name or stable id:
//!
//! - [`Ccu::get_rate`] resolves the current frequency from hardware state.
//! - [`Ccu::set_rate`] solves for the closest representable factors, writes
//!   them, and waits for PLL lock where the node has a lock bit.
//! - [`Ccu::set_parent`] switches a selector.
//! - [`Ccu::enable`], [`Ccu::disable`], [`Ccu::assert_reset`] and
//!   [`Ccu::deassert_reset`] flip single bits; [`Ccu::bring_up`] and
//!   [`Ccu::tear_down`] sequence a gate with its reset line.

pub mod ccu;
pub mod config;
pub mod delay;
pub mod errorcode;
pub mod factor;
pub mod gate;
pub mod init;
pub mod node;
pub mod registers;
pub mod registry;
pub mod table;

mod mutator;
mod resolver;

pub use crate::ccu::{Ccu, ClockState, Lookup};
pub use crate::config::{Config, ExternalClock};
pub use crate::delay::{Delay, NoDelay, ThreadDelay};
pub use crate::errorcode::{ConfigError, ErrorCode};
pub use crate::factor::{FactorSpec, Quantization};
pub use crate::gate::{GateDesc, Polarity, ResetDesc};
pub use crate::init::{InitDesc, InitReport};
pub use crate::node::{ClockDesc, ClockKind, GateSpec, LockSpec, MuxSpec};
pub use crate::registers::{Access, InMemoryWindow, MmioWindow, RegisterWindow};
pub use crate::registry::{ClockHandle, Registry, RegistryBuilder, ResetHandle};
pub use crate::table::{probe, CcuTable};
