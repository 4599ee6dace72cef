// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Clock node registry.
//!
//! The registry owns the topology of one controller: every clock node, gate
//! line and reset line, with parent names resolved to direct links. It is
//! built once from a table by [`RegistryBuilder`] and is immutable
//! afterwards. Building is where every table defect is caught; a registry
//! that exists is consistent.
//!
//! Gate lines become pass-through nodes of the clock graph so that their rate
//! can be queried like any other clock. They share the clock id space. Reset
//! lines have their own name and id space.

use std::collections::HashMap;

use tracing::debug;

use crate::errorcode::ConfigError;
use crate::gate::{GateDesc, Polarity, ResetDesc};
use crate::node::{ClockDesc, ClockKind, GateSpec, LockSpec, MuxSpec};

/// A clock node, gate line or external oscillator in a [`Registry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClockHandle(pub(crate) usize);

/// A reset line in a [`Registry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResetHandle(pub(crate) usize);

#[derive(Debug)]
pub(crate) struct Node {
    /// `None` for oscillators supplied by the board.
    pub(crate) id: Option<u32>,
    pub(crate) name: String,
    pub(crate) parents: Vec<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) offset: u32,
    pub(crate) kind: ClockKind,
    pub(crate) mux: Option<MuxSpec>,
    pub(crate) gate: Option<GateSpec>,
    pub(crate) lock: Option<LockSpec>,
    pub(crate) reparent: bool,
    pub(crate) reset: Option<usize>,
}

impl Node {
    pub(crate) fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Whether resolving this node needs its register word.
    pub(crate) fn reads_register(&self) -> bool {
        self.mux.is_some() || self.kind.factor_specs().iter().any(|f| f.is_variable())
    }
}

#[derive(Debug)]
pub(crate) struct ResetLine {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) offset: u32,
    pub(crate) bit: u32,
    pub(crate) polarity: Polarity,
}

/// Topology of one controller.
#[derive(Debug)]
pub struct Registry {
    pub(crate) nodes: Vec<Node>,
    pub(crate) resets: Vec<ResetLine>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<u32, usize>,
    reset_by_name: HashMap<String, usize>,
    reset_by_id: HashMap<u32, usize>,
}

impl Registry {
    pub fn lookup_by_name(&self, name: &str) -> Option<ClockHandle> {
        self.by_name.get(name).copied().map(ClockHandle)
    }

    pub fn lookup_by_id(&self, id: u32) -> Option<ClockHandle> {
        self.by_id.get(&id).copied().map(ClockHandle)
    }

    pub fn reset_by_name(&self, name: &str) -> Option<ResetHandle> {
        self.reset_by_name.get(name).copied().map(ResetHandle)
    }

    pub fn reset_by_id(&self, id: u32) -> Option<ResetHandle> {
        self.reset_by_id.get(&id).copied().map(ResetHandle)
    }

    /// Number of clock nodes, gate lines included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn reset_count(&self) -> usize {
        self.resets.len()
    }

    pub fn name(&self, clock: ClockHandle) -> &str {
        &self.nodes[clock.0].name
    }

    pub fn id(&self, clock: ClockHandle) -> Option<u32> {
        self.nodes[clock.0].id
    }

    pub fn parent_names(&self, clock: ClockHandle) -> Vec<&str> {
        self.nodes[clock.0]
            .parents
            .iter()
            .map(|&p| self.nodes[p].name.as_str())
            .collect()
    }

    pub fn reset_name(&self, reset: ResetHandle) -> &str {
        &self.resets[reset.0].name
    }

    pub(crate) fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Calls `f` for `index` and every node below it.
    pub(crate) fn for_each_descendant(&self, index: usize, mut f: impl FnMut(usize)) {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![index];
        while let Some(i) = stack.pop() {
            if seen[i] {
                continue;
            }
            seen[i] = true;
            f(i);
            stack.extend(self.nodes[i].children.iter().copied());
        }
    }
}

/// Collects descriptors and validates them into a [`Registry`].
pub struct RegistryBuilder {
    window_len: usize,
    check_overlaps: bool,
    external: Vec<(String, u64)>,
    clocks: Vec<ClockDesc>,
    gates: Vec<GateDesc>,
    resets: Vec<ResetDesc>,
}

/// One set of register bits owned by a table entry.
struct Claim<'a> {
    owner: &'a str,
    offset: u32,
    mask: u32,
}

impl RegistryBuilder {
    /// Start a registry for a register window of `window_len` bytes.
    pub fn new(window_len: usize) -> RegistryBuilder {
        RegistryBuilder {
            window_len,
            check_overlaps: true,
            external: Vec::new(),
            clocks: Vec::new(),
            gates: Vec::new(),
            resets: Vec::new(),
        }
    }

    pub fn check_overlaps(mut self, check: bool) -> RegistryBuilder {
        self.check_overlaps = check;
        self
    }

    /// Oscillator outside the controller, without a table id.
    pub fn register_external(&mut self, name: &str, frequency: u64) {
        self.external.push((name.to_string(), frequency));
    }

    pub fn register(&mut self, clock: ClockDesc) {
        self.clocks.push(clock);
    }

    pub fn register_gate(&mut self, gate: GateDesc) {
        self.gates.push(gate);
    }

    pub fn register_reset(&mut self, reset: ResetDesc) {
        self.resets.push(reset);
    }

    /// Validate every descriptor and link parents by name.
    pub fn resolve_parents(self) -> Result<Registry, ConfigError> {
        let mut nodes = Vec::with_capacity(self.external.len() + self.clocks.len() + self.gates.len());
        let mut parent_names: Vec<Vec<String>> = Vec::with_capacity(nodes.capacity());

        for (name, frequency) in &self.external {
            nodes.push(Node {
                id: None,
                name: name.clone(),
                parents: Vec::new(),
                children: Vec::new(),
                offset: 0,
                kind: ClockKind::Fixed {
                    frequency: *frequency,
                    mult: 1,
                    div: 1,
                },
                mux: None,
                gate: None,
                lock: None,
                reparent: false,
                reset: None,
            });
            parent_names.push(Vec::new());
        }

        for clock in &self.clocks {
            self.check_clock(clock)?;
            nodes.push(Node {
                id: Some(clock.id),
                name: clock.name.clone(),
                parents: Vec::new(),
                children: Vec::new(),
                offset: clock.offset,
                kind: clock.kind,
                mux: clock.mux,
                gate: clock.gate,
                lock: clock.lock,
                reparent: clock.reparent,
                reset: None,
            });
            parent_names.push(clock.parents.clone());
        }

        for gate in &self.gates {
            check_bit(&gate.name, gate.bit)?;
            self.check_offset(&gate.name, gate.offset)?;
            nodes.push(Node {
                id: Some(gate.id),
                name: gate.name.clone(),
                parents: Vec::new(),
                children: Vec::new(),
                offset: gate.offset,
                kind: ClockKind::Fixed {
                    frequency: 0,
                    mult: 1,
                    div: 1,
                },
                mux: None,
                gate: Some(GateSpec {
                    offset: gate.offset,
                    bit: gate.bit,
                    polarity: gate.polarity,
                }),
                lock: None,
                reparent: false,
                reset: None,
            });
            parent_names.push(gate.parent.iter().cloned().collect());
        }

        let mut by_name = HashMap::with_capacity(nodes.len());
        let mut by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if by_name.insert(node.name.clone(), index).is_some() {
                return Err(ConfigError::DuplicateName(node.name.clone()));
            }
            if let Some(id) = node.id {
                if by_id.insert(id, index).is_some() {
                    return Err(ConfigError::DuplicateId(id));
                }
            }
        }

        let mut resets = Vec::with_capacity(self.resets.len());
        let mut reset_by_name = HashMap::with_capacity(self.resets.len());
        let mut reset_by_id = HashMap::with_capacity(self.resets.len());
        for (index, reset) in self.resets.iter().enumerate() {
            check_bit(&reset.name, reset.bit)?;
            self.check_offset(&reset.name, reset.offset)?;
            if reset_by_name.insert(reset.name.clone(), index).is_some() {
                return Err(ConfigError::DuplicateName(reset.name.clone()));
            }
            if reset_by_id.insert(reset.id, index).is_some() {
                return Err(ConfigError::DuplicateId(reset.id));
            }
            resets.push(ResetLine {
                id: reset.id,
                name: reset.name.clone(),
                offset: reset.offset,
                bit: reset.bit,
                polarity: reset.polarity,
            });
        }

        for (index, names) in parent_names.iter().enumerate() {
            let mut parents = Vec::with_capacity(names.len());
            for parent in names {
                match by_name.get(parent) {
                    Some(&p) => parents.push(p),
                    None => {
                        return Err(ConfigError::UnknownParent {
                            clock: nodes[index].name.clone(),
                            parent: parent.clone(),
                        })
                    }
                }
            }
            nodes[index].parents = parents;
        }

        let first_gate = self.external.len() + self.clocks.len();
        for (i, gate) in self.gates.iter().enumerate() {
            if let Some(reset) = &gate.reset {
                match reset_by_name.get(reset) {
                    Some(&r) => nodes[first_gate + i].reset = Some(r),
                    None => {
                        return Err(ConfigError::UnknownReset {
                            gate: gate.name.clone(),
                            reset: reset.clone(),
                        })
                    }
                }
            }
        }

        check_acyclic(&nodes)?;

        let links: Vec<(usize, usize)> = nodes
            .iter()
            .enumerate()
            .flat_map(|(index, node)| {
                let mut parents = node.parents.clone();
                parents.sort_unstable();
                parents.dedup();
                parents.into_iter().map(move |p| (p, index))
            })
            .collect();
        for (parent, child) in links {
            nodes[parent].children.push(child);
        }

        if self.check_overlaps {
            check_overlaps(&nodes, &resets)?;
        }

        debug!(
            clocks = nodes.len(),
            resets = resets.len(),
            "clock registry built"
        );

        Ok(Registry {
            nodes,
            resets,
            by_name,
            by_id,
            reset_by_name,
            reset_by_id,
        })
    }

    fn check_offset(&self, name: &str, offset: u32) -> Result<(), ConfigError> {
        if offset % 4 != 0 || offset as usize + 4 > self.window_len {
            return Err(ConfigError::OffsetOutOfWindow {
                name: name.to_string(),
                offset,
                window: self.window_len,
            });
        }
        Ok(())
    }

    fn check_clock(&self, clock: &ClockDesc) -> Result<(), ConfigError> {
        let malformed = |reason: &'static str| ConfigError::MalformedFactor {
            name: clock.name.clone(),
            reason,
        };

        for spec in clock.kind.factor_specs() {
            spec.validate().map_err(malformed)?;
        }
        if let ClockKind::Fixed { mult, div, .. } = clock.kind {
            if !clock.parents.is_empty() && (mult == 0 || div == 0) {
                return Err(malformed("fixed ratio with a zero term"));
            }
        }

        match clock.mux {
            Some(mux) => {
                if mux.width == 0 || mux.shift as u64 + mux.width as u64 > 32 {
                    return Err(malformed("selector field does not fit the register"));
                }
                if clock.parents.is_empty() {
                    return Err(ConfigError::ParentCount(clock.name.clone()));
                }
                if clock.parents.len() as u64 > mux.capacity() {
                    return Err(ConfigError::MuxTooNarrow {
                        name: clock.name.clone(),
                        width: mux.width,
                        parents: clock.parents.len(),
                    });
                }
            }
            None => {
                let roots_allowed = matches!(clock.kind, ClockKind::Fixed { .. });
                if clock.parents.len() > 1
                    || clock.kind == ClockKind::Mux
                    || (clock.parents.is_empty() && !roots_allowed)
                {
                    return Err(ConfigError::ParentCount(clock.name.clone()));
                }
            }
        }

        if let Some(gate) = clock.gate {
            check_bit(&clock.name, gate.bit)?;
            self.check_offset(&clock.name, gate.offset)?;
        }
        if let Some(lock) = clock.lock {
            if lock.retries == 0 {
                return Err(ConfigError::ZeroLockRetries {
                    name: clock.name.clone(),
                });
            }
            check_bit(&clock.name, lock.bit)?;
            if let Some(enable) = lock.enable {
                check_bit(&clock.name, enable)?;
                if lock.offset != clock.offset {
                    return Err(malformed("lock enable bit outside the factor register"));
                }
            }
            self.check_offset(&clock.name, lock.offset)?;
        }
        if clock.mux.is_some() || clock.kind.factor_specs().iter().any(|f| f.is_variable()) {
            self.check_offset(&clock.name, clock.offset)?;
        }
        Ok(())
    }
}

fn check_bit(name: &str, bit: u32) -> Result<(), ConfigError> {
    if bit > 31 {
        return Err(ConfigError::MalformedFactor {
            name: name.to_string(),
            reason: "bit index above 31",
        });
    }
    Ok(())
}

/// Depth-first search over parent links.
fn check_acyclic(nodes: &[Node]) -> Result<(), ConfigError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Active,
        Done,
    }

    let mut marks = vec![Mark::New; nodes.len()];
    for start in 0..nodes.len() {
        if marks[start] != Mark::New {
            continue;
        }
        // (node, next parent to visit)
        let mut stack = vec![(start, 0usize)];
        marks[start] = Mark::Active;
        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            top.1 += 1;
            match nodes[node].parents.get(next).copied() {
                Some(parent) => {
                    match marks[parent] {
                        Mark::Active => return Err(ConfigError::Cycle(nodes[parent].name.clone())),
                        Mark::New => {
                            marks[parent] = Mark::Active;
                            stack.push((parent, 0));
                        }
                        Mark::Done => {}
                    }
                }
                None => {
                    marks[node] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }
    Ok(())
}

fn check_overlaps(nodes: &[Node], resets: &[ResetLine]) -> Result<(), ConfigError> {
    let mut claims = Vec::new();
    for node in nodes {
        let owner = node.name.as_str();
        for spec in node.kind.factor_specs() {
            if spec.is_variable() {
                claims.push(Claim {
                    owner,
                    offset: node.offset,
                    mask: spec.mask(),
                });
            }
        }
        if let Some(mux) = node.mux {
            claims.push(Claim {
                owner,
                offset: node.offset,
                mask: mux.mask(),
            });
        }
        if let Some(gate) = node.gate {
            claims.push(Claim {
                owner,
                offset: gate.offset,
                mask: 1 << gate.bit,
            });
        }
        if let Some(lock) = node.lock {
            claims.push(Claim {
                owner,
                offset: lock.offset,
                mask: 1 << lock.bit,
            });
            if let Some(enable) = lock.enable {
                claims.push(Claim {
                    owner,
                    offset: lock.offset,
                    mask: 1 << enable,
                });
            }
        }
    }
    for reset in resets {
        claims.push(Claim {
            owner: reset.name.as_str(),
            offset: reset.offset,
            mask: 1 << reset.bit,
        });
    }

    claims.sort_by_key(|claim| claim.offset);
    for group in claims.chunk_by(|a, b| a.offset == b.offset) {
        for (i, first) in group.iter().enumerate() {
            for second in &group[i + 1..] {
                let shared = first.mask & second.mask;
                if shared != 0 {
                    return Err(ConfigError::OverlappingField {
                        first: first.owner.to_string(),
                        second: second.owner.to_string(),
                        offset: first.offset,
                        mask: shared,
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::FactorSpec;

    fn builder() -> RegistryBuilder {
        let mut builder = RegistryBuilder::new(0x100);
        builder.register_external("osc", 24_000_000);
        builder
    }

    #[test]
    fn links_parents_and_children() {
        let mut b = builder();
        b.register(ClockDesc::divider(1, "div", "osc", 0x0, FactorSpec::zero_is_one(0, 2)));
        b.register_gate(GateDesc::new(2, "bus-div", "div", 0x4, 0));
        let registry = b.resolve_parents().unwrap();

        let div = registry.lookup_by_name("div").unwrap();
        assert_eq!(registry.lookup_by_id(1), Some(div));
        assert_eq!(registry.parent_names(div), vec!["osc"]);
        let gate = registry.lookup_by_id(2).unwrap();
        assert_eq!(registry.name(gate), "bus-div");
        assert_eq!(registry.node(div.0).children, vec![gate.0]);
        assert_eq!(registry.id(registry.lookup_by_name("osc").unwrap()), None);
    }

    #[test]
    fn unknown_parent_fails() {
        let mut b = builder();
        b.register(ClockDesc::divider(1, "div", "nope", 0x0, FactorSpec::zero_is_one(0, 2)));
        assert_eq!(
            b.resolve_parents().unwrap_err(),
            ConfigError::UnknownParent {
                clock: "div".to_string(),
                parent: "nope".to_string()
            }
        );
    }

    #[test]
    fn cycle_fails() {
        let mut b = builder();
        b.register(ClockDesc::divider(1, "a", "b", 0x0, FactorSpec::zero_is_one(0, 2)));
        b.register(ClockDesc::divider(2, "b", "a", 0x4, FactorSpec::zero_is_one(0, 2)));
        assert!(matches!(b.resolve_parents(), Err(ConfigError::Cycle(_))));
    }

    #[test]
    fn duplicates_fail() {
        let mut b = builder();
        b.register(ClockDesc::divider(1, "a", "osc", 0x0, FactorSpec::zero_is_one(0, 2)));
        b.register(ClockDesc::divider(2, "a", "osc", 0x4, FactorSpec::zero_is_one(0, 2)));
        assert_eq!(
            b.resolve_parents().unwrap_err(),
            ConfigError::DuplicateName("a".to_string())
        );

        let mut b = builder();
        b.register(ClockDesc::divider(1, "a", "osc", 0x0, FactorSpec::zero_is_one(0, 2)));
        b.register_gate(GateDesc::new(1, "bus-a", "a", 0x4, 0));
        assert_eq!(b.resolve_parents().unwrap_err(), ConfigError::DuplicateId(1));
    }

    #[test]
    fn selector_must_address_every_parent() {
        let mut b = builder();
        b.register_external("osc2", 12_000_000);
        b.register_external("osc3", 6_000_000);
        b.register(ClockDesc::mux(1, "mux", &["osc", "osc2", "osc3"], 0x0).with_mux(24, 1));
        assert_eq!(
            b.resolve_parents().unwrap_err(),
            ConfigError::MuxTooNarrow {
                name: "mux".to_string(),
                width: 1,
                parents: 3
            }
        );

        let mut b = builder();
        b.register_external("osc2", 12_000_000);
        b.register(ClockDesc::m(1, "m", &["osc", "osc2"], 0x0, FactorSpec::zero_is_one(0, 4)));
        assert_eq!(
            b.resolve_parents().unwrap_err(),
            ConfigError::ParentCount("m".to_string())
        );
    }

    #[test]
    fn offsets_must_be_in_window() {
        let mut b = builder();
        b.register(ClockDesc::divider(1, "div", "osc", 0x100, FactorSpec::zero_is_one(0, 2)));
        assert!(matches!(
            b.resolve_parents(),
            Err(ConfigError::OffsetOutOfWindow { offset: 0x100, .. })
        ));

        let mut b = builder();
        b.register_reset(ResetDesc::new(0, "rst", 0x6, 0));
        assert!(matches!(
            b.resolve_parents(),
            Err(ConfigError::OffsetOutOfWindow { offset: 0x6, .. })
        ));
    }

    #[test]
    fn malformed_factor_and_lock_fail() {
        let mut b = builder();
        b.register(ClockDesc::divider(1, "div", "osc", 0x0, FactorSpec::power_of_two(0, 6)));
        assert!(matches!(
            b.resolve_parents(),
            Err(ConfigError::MalformedFactor { .. })
        ));

        let mut b = builder();
        b.register(ClockDesc::divider(1, "div", "osc", 0x0, FactorSpec::zero_is_one(u32::MAX, 2)));
        assert!(matches!(
            b.resolve_parents(),
            Err(ConfigError::MalformedFactor { .. })
        ));

        let mut b = builder();
        b.register(ClockDesc::mux(1, "sel", &["osc"], 0x0).with_mux(u32::MAX, 1));
        assert!(matches!(
            b.resolve_parents(),
            Err(ConfigError::MalformedFactor { .. })
        ));

        let mut b = builder();
        b.register(
            ClockDesc::np(1, "pll", &["osc"], 0x0, FactorSpec::zero_is_one(8, 8), FactorSpec::fixed(1))
                .with_lock(28, 0),
        );
        assert_eq!(
            b.resolve_parents().unwrap_err(),
            ConfigError::ZeroLockRetries {
                name: "pll".to_string()
            }
        );
    }

    #[test]
    fn overlapping_bits_fail_unless_disabled() {
        let table = |b: &mut RegistryBuilder| {
            b.register(
                ClockDesc::m(1, "mod", &["osc"], 0x10, FactorSpec::zero_is_one(0, 5)).with_gate(31),
            );
            b.register_gate(GateDesc::new(2, "bus-mod", "osc", 0x10, 0));
        };

        let mut b = builder();
        table(&mut b);
        assert_eq!(
            b.resolve_parents().unwrap_err(),
            ConfigError::OverlappingField {
                first: "mod".to_string(),
                second: "bus-mod".to_string(),
                offset: 0x10,
                mask: 0x1,
            }
        );

        let mut b = builder().check_overlaps(false);
        table(&mut b);
        assert!(b.resolve_parents().is_ok());
    }

    #[test]
    fn gate_reset_pairing() {
        let mut b = builder();
        b.register_reset(ResetDesc::new(0, "bus-x", 0x0, 16));
        b.register_gate(GateDesc::new(1, "bus-x", "osc", 0x0, 0).with_reset("bus-x"));
        let registry = b.resolve_parents().unwrap();
        let gate = registry.lookup_by_name("bus-x").unwrap();
        assert_eq!(registry.node(gate.0).reset, Some(0));
        assert_eq!(registry.reset_by_id(0), registry.reset_by_name("bus-x"));

        let mut b = builder();
        b.register_gate(GateDesc::new(1, "bus-x", "osc", 0x0, 0).with_reset("bus-y"));
        assert!(matches!(
            b.resolve_parents(),
            Err(ConfigError::UnknownReset { .. })
        ));
    }
}
