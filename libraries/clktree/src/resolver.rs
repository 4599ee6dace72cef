// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Frequency resolver.
//!
//! The rate of a node is its selected parent's rate run through the node's
//! formula, with every factor decoded from the current register word. Roots
//! report their declared frequency unless the board has re-rated them.
//!
//! Resolved rates can be cached per node in atomics so that readers do not
//! need the controller lock. The cache is only written with the controller
//! lock held, and any change to a node's factors, selector or root rate
//! clears the node and everything below it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::node::ClockKind;
use crate::registers::RegisterWindow;
use crate::registry::{Node, Registry};

const UNCACHED: u64 = u64::MAX;

pub(crate) struct RateCache {
    enabled: bool,
    rates: Vec<AtomicU64>,
}

impl RateCache {
    pub(crate) fn new(len: usize, enabled: bool) -> RateCache {
        RateCache {
            enabled,
            rates: (0..len).map(|_| AtomicU64::new(UNCACHED)).collect(),
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<u64> {
        if !self.enabled {
            return None;
        }
        match self.rates[index].load(Ordering::Acquire) {
            UNCACHED => None,
            rate => Some(rate),
        }
    }

    fn store(&self, index: usize, rate: u64) {
        if self.enabled {
            self.rates[index].store(rate, Ordering::Release);
        }
    }

    /// Drop the cached rate of `index` and of every node below it.
    pub(crate) fn invalidate(&self, registry: &Registry, index: usize) {
        registry.for_each_descendant(index, |i| self.rates[i].store(UNCACHED, Ordering::Release));
    }

    /// Drop every cached rate.
    pub(crate) fn clear(&self) {
        for rate in &self.rates {
            rate.store(UNCACHED, Ordering::Release);
        }
    }
}

/// Slot in `node.parents` currently feeding the node, if any.
pub(crate) fn selected_slot(node: &Node, word: u32) -> Option<usize> {
    if node.parents.is_empty() {
        return None;
    }
    let slot = match node.mux {
        Some(mux) => mux.select(word),
        None => 0,
    };
    (slot < node.parents.len()).then_some(slot)
}

/// `parent * mult / div` in 128-bit arithmetic. A zero divisor gives 0 Hz.
pub(crate) fn scale(parent: u64, mult: u128, div: u128) -> u64 {
    if div == 0 {
        return 0;
    }
    // Saturate below UNCACHED so every result can be cached.
    u64::try_from((parent as u128).saturating_mul(mult) / div)
        .unwrap_or(UNCACHED - 1)
        .min(UNCACHED - 1)
}

/// Multiplier and divisor of a node given its register word.
fn ratio(kind: &ClockKind, word: u32) -> (u128, u128) {
    let f = |spec: crate::factor::FactorSpec| spec.read(word) as u128;
    match *kind {
        ClockKind::Fixed { mult, div, .. } => (mult as u128, div as u128),
        ClockKind::Divider { div } => (1, f(div)),
        ClockKind::Mux => (1, 1),
        ClockKind::M { m } => (1, f(m)),
        ClockKind::Nm { n, m } => (f(n), f(m)),
        ClockKind::PreDivM { pre, m } => (1, f(pre) * f(m)),
        ClockKind::Np { n, p } => (f(n), f(p)),
        ClockKind::Nkmp { n, k, m, p } => (f(n) * f(k), f(m) * f(p)),
        ClockKind::Nmm { n, m0, m1 } => (f(n), f(m0) * f(m1)),
    }
}

/// Read path over a locked register window.
pub(crate) struct Resolver<'a, W: RegisterWindow> {
    registry: &'a Registry,
    regs: &'a W,
    roots: &'a HashMap<usize, u64>,
    cache: &'a RateCache,
}

impl<'a, W: RegisterWindow> Resolver<'a, W> {
    pub(crate) fn new(
        registry: &'a Registry,
        regs: &'a W,
        roots: &'a HashMap<usize, u64>,
        cache: &'a RateCache,
    ) -> Resolver<'a, W> {
        Resolver {
            registry,
            regs,
            roots,
            cache,
        }
    }

    /// Register word of a node, or zero for nodes without register fields.
    pub(crate) fn word(&self, node: &Node) -> u32 {
        if node.reads_register() {
            self.regs.read(node.offset)
        } else {
            0
        }
    }

    /// Index of the node currently feeding `index`.
    pub(crate) fn parent(&self, index: usize) -> Option<usize> {
        let node = self.registry.node(index);
        selected_slot(node, self.word(node)).map(|slot| node.parents[slot])
    }

    pub(crate) fn rate(&self, index: usize) -> u64 {
        if let Some(rate) = self.cache.get(index) {
            return rate;
        }
        let node = self.registry.node(index);
        let rate = if node.is_root() {
            match node.kind {
                ClockKind::Fixed { frequency, .. } => {
                    self.roots.get(&index).copied().unwrap_or(frequency)
                }
                _ => 0,
            }
        } else {
            let word = self.word(node);
            match selected_slot(node, word) {
                Some(slot) => {
                    let (mult, div) = ratio(&node.kind, word);
                    scale(self.rate(node.parents[slot]), mult, div)
                }
                None => 0,
            }
        };
        self.cache.store(index, rate);
        rate
    }
}
