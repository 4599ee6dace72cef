// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Clock controller.
//!
//! A [`Ccu`] is one attached clock control unit: the validated registry of a
//! chip table, the register window it drives and the live state shared by
//! every consumer. All register accesses happen with the controller lock
//! held, and no operation sleeps while holding it.
//!
//! Usage
//! -----
//!
//! ```rust
//! use clktree::{Ccu, CcuTable, ClockDesc, Config, FactorSpec, InMemoryWindow, NoDelay};
//!
//! let table = CcuTable {
//!     compatible: vec!["vendor,soc-ccu".to_string()],
//!     description: String::new(),
//!     window_len: 0x10,
//!     clocks: vec![ClockDesc::divider(0, "apb", "osc", 0x0, FactorSpec::zero_is_one(0, 2))],
//!     gates: Vec::new(),
//!     resets: Vec::new(),
//!     init: Vec::new(),
//! };
//! let config = Config::default().with_external_clock("osc", 24_000_000);
//! let ccu = Ccu::attach(&table, InMemoryWindow::new(0x10), NoDelay, config).unwrap();
//!
//! assert_eq!(ccu.set_rate("apb", 6_000_000), Ok(6_000_000));
//! assert_eq!(ccu.get_rate(0u32), Ok(6_000_000));
//! ```

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::delay::{Delay, ThreadDelay};
use crate::errorcode::{ConfigError, ErrorCode};
use crate::node::GateSpec;
use crate::registers::RegisterWindow;
use crate::registry::{Registry, RegistryBuilder, ResetLine};
use crate::resolver::{RateCache, Resolver};
use crate::table::CcuTable;

/// How a consumer names a clock or reset line: by table name or stable id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    Name(&'a str),
    Id(u32),
}

impl<'a> From<&'a str> for Lookup<'a> {
    fn from(name: &'a str) -> Lookup<'a> {
        Lookup::Name(name)
    }
}

impl<'a> From<&'a String> for Lookup<'a> {
    fn from(name: &'a String) -> Lookup<'a> {
        Lookup::Name(name.as_str())
    }
}

impl From<u32> for Lookup<'_> {
    fn from(id: u32) -> Self {
        Lookup::Id(id)
    }
}

/// State of one clock as reported by [`Ccu::snapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClockState {
    pub name: String,
    pub id: Option<u32>,
    pub rate: u64,
    pub parent: Option<String>,
    /// `None` for clocks without a gate.
    pub enabled: Option<bool>,
}

/// Everything guarded by the controller lock.
pub(crate) struct State<W> {
    pub(crate) regs: W,
    /// Runtime rates of root clocks, overriding the declared frequency.
    pub(crate) roots: HashMap<usize, u64>,
}

pub struct Ccu<W: RegisterWindow, D: Delay = ThreadDelay> {
    pub(crate) registry: Registry,
    pub(crate) state: Mutex<State<W>>,
    pub(crate) cache: RateCache,
    pub(crate) delay: D,
    pub(crate) config: Config,
}

impl<W: RegisterWindow, D: Delay> Ccu<W, D> {
    /// Validate `table` and take ownership of `regs`.
    ///
    /// The table's initialization sequence runs before this returns unless
    /// `config.apply_init` is off. Failed init entries are logged and do not
    /// fail the attach.
    pub fn attach(table: &CcuTable, regs: W, delay: D, config: Config) -> Result<Self, ConfigError> {
        let mut builder =
            RegistryBuilder::new(regs.len()).check_overlaps(config.check_overlapping_fields);
        for clock in &config.external_clocks {
            builder.register_external(&clock.name, clock.frequency);
        }
        for clock in &table.clocks {
            builder.register(clock.clone());
        }
        for gate in &table.gates {
            builder.register_gate(gate.clone());
        }
        for reset in &table.resets {
            builder.register_reset(reset.clone());
        }
        let registry = builder.resolve_parents()?;

        info!(
            compatible = table.compatible.first().map_or("", String::as_str),
            clocks = table.clocks.len(),
            gates = table.gates.len(),
            resets = table.resets.len(),
            "clock controller attached"
        );

        let ccu = Ccu {
            cache: RateCache::new(registry.len(), config.cache_rates),
            registry,
            state: Mutex::new(State {
                regs,
                roots: HashMap::new(),
            }),
            delay,
            config,
        };

        if ccu.config.apply_init && !table.init.is_empty() {
            let report = ccu.apply_init(&table.init);
            info!(
                applied = report.applied.len(),
                failed = report.failed.len(),
                "initial clock settings applied"
            );
        }
        Ok(ccu)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `f` on the register window with the controller lock held.
    ///
    /// `f` may change registers behind the controller's back, so every cached
    /// rate is dropped before the lock is released.
    pub fn with_window<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        let state = self.state.lock();
        let result = f(&state.regs);
        self.cache.clear();
        result
    }

    pub(crate) fn clock(&self, lookup: Lookup) -> Result<usize, ErrorCode> {
        match lookup {
            Lookup::Name(name) => self.registry.lookup_by_name(name),
            Lookup::Id(id) => self.registry.lookup_by_id(id),
        }
        .map(|handle| handle.0)
        .ok_or(ErrorCode::UnknownName)
    }

    fn reset(&self, lookup: Lookup) -> Result<&ResetLine, ErrorCode> {
        match lookup {
            Lookup::Name(name) => self.registry.reset_by_name(name),
            Lookup::Id(id) => self.registry.reset_by_id(id),
        }
        .map(|handle| &self.registry.resets[handle.0])
        .ok_or(ErrorCode::UnknownName)
    }

    pub(crate) fn resolver<'a>(&'a self, state: &'a State<W>) -> Resolver<'a, W> {
        Resolver::new(&self.registry, &state.regs, &state.roots, &self.cache)
    }

    /// Current output rate in Hz.
    pub fn get_rate<'a>(&self, clock: impl Into<Lookup<'a>>) -> Result<u64, ErrorCode> {
        let index = self.clock(clock.into())?;
        if let Some(rate) = self.cache.get(index) {
            return Ok(rate);
        }
        let state = self.state.lock();
        Ok(self.resolver(&state).rate(index))
    }

    /// Name of the parent currently feeding the clock. `None` for roots and
    /// for selectors holding a value past the end of the parent list.
    pub fn get_parent<'a>(&self, clock: impl Into<Lookup<'a>>) -> Result<Option<&str>, ErrorCode> {
        let index = self.clock(clock.into())?;
        let state = self.state.lock();
        let parent = self.resolver(&state).parent(index);
        Ok(parent.map(|p| self.registry.node(p).name.as_str()))
    }

    /// Re-rate a root clock, for oscillators whose frequency the board
    /// only learns at runtime.
    pub fn set_root_rate<'a>(&self, clock: impl Into<Lookup<'a>>, rate: u64) -> Result<(), ErrorCode> {
        let index = self.clock(clock.into())?;
        let node = self.registry.node(index);
        if !node.is_root() {
            return Err(ErrorCode::NoSupport);
        }
        let mut state = self.state.lock();
        state.roots.insert(index, rate);
        self.cache.invalidate(&self.registry, index);
        debug!(clock = %node.name, rate, "root clock re-rated");
        Ok(())
    }

    fn gate_of(&self, index: usize) -> Result<GateSpec, ErrorCode> {
        self.registry.node(index).gate.ok_or(ErrorCode::NoSupport)
    }

    fn write_gate(regs: &W, gate: GateSpec, enabled: bool) {
        regs.modify(gate.offset, 1 << gate.bit, gate.polarity.bits(gate.bit, enabled));
    }

    fn write_reset(regs: &W, reset: &ResetLine, asserted: bool) {
        regs.modify(reset.offset, 1 << reset.bit, reset.polarity.bits(reset.bit, asserted));
    }

    fn set_gate(&self, index: usize, enabled: bool) -> Result<(), ErrorCode> {
        let gate = self.gate_of(index)?;
        Self::write_gate(&self.state.lock().regs, gate, enabled);
        debug!(clock = %self.registry.node(index).name, enabled, "gate changed");
        Ok(())
    }

    pub fn enable<'a>(&self, clock: impl Into<Lookup<'a>>) -> Result<(), ErrorCode> {
        let index = self.clock(clock.into())?;
        self.set_gate(index, true)
    }

    pub fn disable<'a>(&self, clock: impl Into<Lookup<'a>>) -> Result<(), ErrorCode> {
        let index = self.clock(clock.into())?;
        self.set_gate(index, false)
    }

    pub fn is_enabled<'a>(&self, clock: impl Into<Lookup<'a>>) -> Result<bool, ErrorCode> {
        let index = self.clock(clock.into())?;
        let gate = self.gate_of(index)?;
        let word = self.state.lock().regs.read(gate.offset);
        Ok(gate.polarity.is_active(gate.bit, word))
    }

    fn set_reset(&self, reset: &ResetLine, asserted: bool) {
        Self::write_reset(&self.state.lock().regs, reset, asserted);
        debug!(reset = %reset.name, asserted, "reset line changed");
    }

    pub fn assert_reset<'a>(&self, reset: impl Into<Lookup<'a>>) -> Result<(), ErrorCode> {
        let reset = self.reset(reset.into())?;
        self.set_reset(reset, true);
        Ok(())
    }

    pub fn deassert_reset<'a>(&self, reset: impl Into<Lookup<'a>>) -> Result<(), ErrorCode> {
        let reset = self.reset(reset.into())?;
        self.set_reset(reset, false);
        Ok(())
    }

    pub fn is_reset_asserted<'a>(&self, reset: impl Into<Lookup<'a>>) -> Result<bool, ErrorCode> {
        let reset = self.reset(reset.into())?;
        let word = self.state.lock().regs.read(reset.offset);
        Ok(reset.polarity.is_active(reset.bit, word))
    }

    /// Release the paired reset line, then ungate the clock.
    pub fn bring_up<'a>(&self, clock: impl Into<Lookup<'a>>) -> Result<(), ErrorCode> {
        let index = self.clock(clock.into())?;
        let node = self.registry.node(index);
        let gate = self.gate_of(index)?;
        let state = self.state.lock();
        if let Some(reset) = node.reset {
            Self::write_reset(&state.regs, &self.registry.resets[reset], false);
        }
        Self::write_gate(&state.regs, gate, true);
        debug!(clock = %node.name, "brought up");
        Ok(())
    }

    /// Gate the clock, then hold the paired reset line.
    pub fn tear_down<'a>(&self, clock: impl Into<Lookup<'a>>) -> Result<(), ErrorCode> {
        let index = self.clock(clock.into())?;
        let node = self.registry.node(index);
        let gate = self.gate_of(index)?;
        let state = self.state.lock();
        Self::write_gate(&state.regs, gate, false);
        if let Some(reset) = node.reset {
            Self::write_reset(&state.regs, &self.registry.resets[reset], true);
        }
        debug!(clock = %node.name, "torn down");
        Ok(())
    }

    /// Rate, parent and gate state of every clock, in registry order.
    pub fn snapshot(&self) -> Vec<ClockState> {
        let state = self.state.lock();
        let resolver = self.resolver(&state);
        self.registry
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| ClockState {
                name: node.name.clone(),
                id: node.id,
                rate: resolver.rate(index),
                parent: resolver
                    .parent(index)
                    .map(|p| self.registry.node(p).name.clone()),
                enabled: node
                    .gate
                    .map(|gate| gate.polarity.is_active(gate.bit, state.regs.read(gate.offset))),
            })
            .collect()
    }
}
