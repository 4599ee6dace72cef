// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Rate and parent mutator.
//!
//! `set_rate` searches every representable combination of a node's factors
//! (and of its parents, for selectors and nodes marked `reparent`) for the
//! one whose output is closest to the target. Ties go to the smallest
//! multiplier product, then the smallest divider product, then the earliest
//! parent. The chosen fields are written with a single read-modify-write.
//!
//! A node with a lock bit is then polled, with the controller lock released
//! between polls, until the bit is set or the retry budget runs out.

use tock_registers::fields::{Field, FieldValue};
use tock_registers::LocalRegisterCopy;
use tracing::{debug, warn};

use crate::ccu::{Ccu, Lookup, State};
use crate::delay::Delay;
use crate::errorcode::ErrorCode;
use crate::factor::FactorSpec;
use crate::node::{ClockKind, LockSpec};
use crate::registers::RegisterWindow;
use crate::registry::Node;
use crate::resolver::{scale, selected_slot};

/// Factor fields of a node split by the side of the formula they sit on.
/// `None` for kinds whose rate cannot be changed.
fn terms(kind: &ClockKind) -> Option<(Vec<FactorSpec>, Vec<FactorSpec>)> {
    let terms = match *kind {
        ClockKind::Fixed { .. } => return None,
        ClockKind::Mux => (vec![], vec![]),
        ClockKind::Divider { div } => (vec![], vec![div]),
        ClockKind::M { m } => (vec![], vec![m]),
        ClockKind::Nm { n, m } => (vec![n], vec![m]),
        ClockKind::PreDivM { pre, m } => (vec![], vec![pre, m]),
        ClockKind::Np { n, p } => (vec![n], vec![p]),
        ClockKind::Nkmp { n, k, m, p } => (vec![n, k], vec![m, p]),
        ClockKind::Nmm { n, m0, m1 } => (vec![n], vec![m0, m1]),
    };
    Some(terms)
}

/// Settings chosen for one node.
#[derive(Debug, PartialEq, Eq)]
struct Plan {
    /// New selector slot, `None` to keep the current parent.
    slot: Option<usize>,
    /// One factor per field, multipliers first.
    factors: Vec<u32>,
    achieved: u64,
    error: u64,
    mult: u128,
    div: u128,
}

impl Plan {
    fn beats(&self, other: &Plan) -> bool {
        (self.error, self.mult, self.div) < (other.error, other.mult, other.div)
    }
}

/// Exhaustive search over `candidates` (selector slot, parent rate) and all
/// factor combinations.
fn search(
    candidates: &[(Option<usize>, u64)],
    multipliers: &[FactorSpec],
    dividers: &[FactorSpec],
    target: u64,
) -> Option<Plan> {
    let choices: Vec<Vec<u32>> = multipliers
        .iter()
        .chain(dividers)
        .map(|spec| spec.factors().collect())
        .collect();
    let split = multipliers.len();
    let mut best: Option<Plan> = None;

    for &(slot, parent) in candidates {
        let mut digits = vec![0usize; choices.len()];
        loop {
            let factors: Vec<u32> = digits.iter().zip(&choices).map(|(&d, c)| c[d]).collect();
            let mult: u128 = factors[..split].iter().map(|&f| f as u128).product();
            let div: u128 = factors[split..].iter().map(|&f| f as u128).product();
            if div != 0 {
                let achieved = scale(parent, mult, div);
                let plan = Plan {
                    slot,
                    achieved,
                    error: achieved.abs_diff(target),
                    mult,
                    div,
                    factors,
                };
                if best.as_ref().is_none_or(|b| plan.beats(b)) {
                    best = Some(plan);
                }
            }

            // Advance the odometer, last field fastest. Done once every
            // field has wrapped.
            let mut wrapped = true;
            for (digit, choice) in digits.iter_mut().zip(&choices).rev() {
                *digit += 1;
                if *digit < choice.len() {
                    wrapped = false;
                    break;
                }
                *digit = 0;
            }
            if wrapped {
                break;
            }
        }
    }
    best
}

impl<W: RegisterWindow, D: Delay> Ccu<W, D> {
    /// Find the settings closest to `target` with the controller lock held.
    fn plan(&self, state: &State<W>, index: usize, target: u64) -> Result<Plan, ErrorCode> {
        let node = self.registry.node(index);
        let (multipliers, dividers) = terms(&node.kind).ok_or(ErrorCode::NoSupport)?;
        if target == 0 {
            return Err(ErrorCode::UnrepresentableFactor);
        }

        let resolver = self.resolver(state);
        let reparent = node.mux.is_some() && (node.reparent || node.kind == ClockKind::Mux);
        let candidates: Vec<(Option<usize>, u64)> = if reparent {
            node.parents
                .iter()
                .enumerate()
                .map(|(slot, &parent)| (Some(slot), resolver.rate(parent)))
                .collect()
        } else {
            selected_slot(node, resolver.word(node))
                .map(|slot| (None, resolver.rate(node.parents[slot])))
                .into_iter()
                .collect()
        };

        search(&candidates, &multipliers, &dividers, target).ok_or(ErrorCode::UnrepresentableFactor)
    }

    /// Register bits for `plan` as one field value.
    fn compose(node: &Node, plan: &Plan) -> Result<FieldValue<u32, ()>, ErrorCode> {
        let mut value = FieldValue::<u32, ()>::new(0, 0, 0);
        let specs = node.kind.factor_specs();
        for (spec, &factor) in specs.iter().zip(&plan.factors) {
            value += spec.field_value(factor)?;
        }
        if let (Some(slot), Some(mux)) = (plan.slot, node.mux) {
            value += mux.field().val(slot as u32);
        }
        if let Some(enable) = node.lock.and_then(|lock| lock.enable) {
            value += Field::<u32, ()>::new(1, enable as usize).val(1);
        }
        Ok(value)
    }

    /// Change the rate of a clock to the closest representable value and
    /// return the rate achieved.
    ///
    /// With a lock bit, returns [`ErrorCode::LockTimeout`] if the PLL does
    /// not report lock in time. The new factors stay written in that case.
    pub fn set_rate<'a>(&self, clock: impl Into<Lookup<'a>>, target: u64) -> Result<u64, ErrorCode> {
        let index = self.clock(clock.into())?;
        let node = self.registry.node(index);

        let achieved = {
            let state = self.state.lock();
            let plan = self.plan(&state, index, target)?;
            let value = Self::compose(node, &plan)?;
            if value.mask() != 0 {
                state.regs.modify(node.offset, value.mask(), value.modify(0));
            }
            self.cache.invalidate(&self.registry, index);
            plan.achieved
        };
        debug!(clock = %node.name, rate = target, achieved, "rate changed");

        if let Some(lock) = node.lock {
            self.wait_for_lock(node, lock)?;
        }
        Ok(achieved)
    }

    /// The rate `set_rate` would achieve, without touching hardware.
    pub fn round_rate<'a>(&self, clock: impl Into<Lookup<'a>>, target: u64) -> Result<u64, ErrorCode> {
        let index = self.clock(clock.into())?;
        let state = self.state.lock();
        Ok(self.plan(&state, index, target)?.achieved)
    }

    /// Switch a clock's selector to `parent`. No factor is changed.
    pub fn set_parent<'a>(&self, clock: impl Into<Lookup<'a>>, parent: &str) -> Result<(), ErrorCode> {
        let index = self.clock(clock.into())?;
        let parent_index = self.clock(Lookup::Name(parent))?;
        let node = self.registry.node(index);
        let mux = node.mux.ok_or(ErrorCode::NoSupport)?;
        let slot = node
            .parents
            .iter()
            .position(|&p| p == parent_index)
            .ok_or(ErrorCode::NotAParent)?;

        let value = mux.field().val(slot as u32);
        let state = self.state.lock();
        state.regs.modify(node.offset, value.mask(), value.modify(0));
        self.cache.invalidate(&self.registry, index);
        debug!(clock = %node.name, parent, "parent changed");
        Ok(())
    }

    fn wait_for_lock(&self, node: &Node, lock: LockSpec) -> Result<(), ErrorCode> {
        let locked = Field::<u32, ()>::new(1, lock.bit as usize);
        for attempt in 0..lock.retries {
            if attempt > 0 {
                self.delay.delay_us(self.config.lock_poll_interval_us);
            }
            let word = self.state.lock().regs.read(lock.offset);
            if LocalRegisterCopy::<u32>::new(word).is_set(locked) {
                debug!(clock = %node.name, polls = attempt + 1, "PLL locked");
                return Ok(());
            }
        }
        warn!(clock = %node.name, retries = lock.retries, "PLL did not lock");
        Err(ErrorCode::LockTimeout)
    }
}
