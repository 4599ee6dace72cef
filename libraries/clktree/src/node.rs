// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Clock node descriptors.
//!
//! A [`ClockDesc`] is the plain-data form of one clock as it appears in a
//! chip table. The node kind is a closed set: every kind names the factor
//! fields it owns and the resolver and mutator each dispatch on it with a
//! single `match`.
//!
//! Frequency formulas, with every factor already decoded:
//!
//! | kind       | output                          |
//! |------------|---------------------------------|
//! | `Fixed`    | `frequency` (root) or `parent * mult / div` |
//! | `Divider`  | `parent / div`                  |
//! | `Mux`      | `parent`                        |
//! | `M`        | `parent / m`                    |
//! | `Nm`       | `parent * n / m`                |
//! | `PreDivM`  | `parent / (pre * m)`            |
//! | `Np`       | `parent * n / p`                |
//! | `Nkmp`     | `parent * n * k / (m * p)`      |
//! | `Nmm`      | `parent * n / (m0 * m1)`        |

use serde::{Deserialize, Serialize};
use tock_registers::fields::Field;

use crate::factor::FactorSpec;
use crate::gate::Polarity;

const fn one() -> u32 {
    1
}

/// The kind of a clock node together with its factor fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClockKind {
    /// Root oscillator when the node has no parents, otherwise a constant
    /// ratio of its parent.
    Fixed {
        #[serde(default)]
        frequency: u64,
        #[serde(default = "one")]
        mult: u32,
        #[serde(default = "one")]
        div: u32,
    },
    Divider {
        div: FactorSpec,
    },
    /// Pure selector, passes the selected parent through.
    Mux,
    M {
        m: FactorSpec,
    },
    Nm {
        n: FactorSpec,
        m: FactorSpec,
    },
    PreDivM {
        pre: FactorSpec,
        m: FactorSpec,
    },
    Np {
        n: FactorSpec,
        p: FactorSpec,
    },
    Nkmp {
        n: FactorSpec,
        k: FactorSpec,
        m: FactorSpec,
        p: FactorSpec,
    },
    Nmm {
        n: FactorSpec,
        m0: FactorSpec,
        m1: FactorSpec,
    },
}

impl ClockKind {
    /// Every factor field of the node, multipliers first.
    pub fn factor_specs(&self) -> Vec<FactorSpec> {
        match *self {
            ClockKind::Fixed { .. } | ClockKind::Mux => Vec::new(),
            ClockKind::Divider { div } => vec![div],
            ClockKind::M { m } => vec![m],
            ClockKind::Nm { n, m } => vec![n, m],
            ClockKind::PreDivM { pre, m } => vec![pre, m],
            ClockKind::Np { n, p } => vec![n, p],
            ClockKind::Nkmp { n, k, m, p } => vec![n, k, m, p],
            ClockKind::Nmm { n, m0, m1 } => vec![n, m0, m1],
        }
    }
}

/// Parent selector bitfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuxSpec {
    pub shift: u32,
    pub width: u32,
}

impl MuxSpec {
    pub(crate) fn field(&self) -> Field<u32, ()> {
        Field::new(FactorSpec::linear(0, self.width, 0).max_raw(), self.shift as usize)
    }

    pub fn mask(&self) -> u32 {
        FactorSpec::linear(self.shift, self.width, 0).mask()
    }

    /// Parent slot selected in a register word.
    pub fn select(&self, word: u32) -> usize {
        self.field().read(word) as usize
    }

    /// Number of parents the selector can address.
    pub fn capacity(&self) -> u64 {
        1u64 << self.width.min(32)
    }
}

/// Clock enable bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSpec {
    pub offset: u32,
    pub bit: u32,
    #[serde(default)]
    pub polarity: Polarity,
}

/// PLL lock indication.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSpec {
    pub offset: u32,
    /// Status bit set by hardware once the PLL has locked.
    pub bit: u32,
    /// Maximum number of times the status bit is read.
    pub retries: u32,
    /// Bit that arms lock detection, set together with new factors.
    #[serde(default)]
    pub enable: Option<u32>,
}

/// One clock node of a chip table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockDesc {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub parents: Vec<String>,
    /// Register holding the factor and selector fields.
    #[serde(default)]
    pub offset: u32,
    #[serde(flatten)]
    pub kind: ClockKind,
    #[serde(default)]
    pub mux: Option<MuxSpec>,
    #[serde(default)]
    pub gate: Option<GateSpec>,
    #[serde(default)]
    pub lock: Option<LockSpec>,
    /// Let `set_rate` pick whichever parent gets closest to the target.
    #[serde(default)]
    pub reparent: bool,
}

impl ClockDesc {
    fn new(id: u32, name: &str, parents: &[&str], offset: u32, kind: ClockKind) -> ClockDesc {
        ClockDesc {
            id,
            name: name.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            offset,
            kind,
            mux: None,
            gate: None,
            lock: None,
            reparent: false,
        }
    }

    /// Root oscillator.
    pub fn fixed_rate(id: u32, name: &str, frequency: u64) -> ClockDesc {
        ClockDesc::new(
            id,
            name,
            &[],
            0,
            ClockKind::Fixed {
                frequency,
                mult: 1,
                div: 1,
            },
        )
    }

    pub fn fixed_factor(id: u32, name: &str, parent: &str, mult: u32, div: u32) -> ClockDesc {
        ClockDesc::new(
            id,
            name,
            &[parent],
            0,
            ClockKind::Fixed {
                frequency: 0,
                mult,
                div,
            },
        )
    }

    pub fn divider(id: u32, name: &str, parent: &str, offset: u32, div: FactorSpec) -> ClockDesc {
        ClockDesc::new(id, name, &[parent], offset, ClockKind::Divider { div })
    }

    /// Pure selector. Attach the selector field with [`ClockDesc::with_mux`].
    pub fn mux(id: u32, name: &str, parents: &[&str], offset: u32) -> ClockDesc {
        ClockDesc::new(id, name, parents, offset, ClockKind::Mux)
    }

    pub fn m(id: u32, name: &str, parents: &[&str], offset: u32, m: FactorSpec) -> ClockDesc {
        ClockDesc::new(id, name, parents, offset, ClockKind::M { m })
    }

    pub fn nm(
        id: u32,
        name: &str,
        parents: &[&str],
        offset: u32,
        n: FactorSpec,
        m: FactorSpec,
    ) -> ClockDesc {
        ClockDesc::new(id, name, parents, offset, ClockKind::Nm { n, m })
    }

    pub fn pre_div_m(
        id: u32,
        name: &str,
        parents: &[&str],
        offset: u32,
        pre: FactorSpec,
        m: FactorSpec,
    ) -> ClockDesc {
        ClockDesc::new(id, name, parents, offset, ClockKind::PreDivM { pre, m })
    }

    pub fn np(
        id: u32,
        name: &str,
        parents: &[&str],
        offset: u32,
        n: FactorSpec,
        p: FactorSpec,
    ) -> ClockDesc {
        ClockDesc::new(id, name, parents, offset, ClockKind::Np { n, p })
    }

    pub fn nkmp(
        id: u32,
        name: &str,
        parents: &[&str],
        offset: u32,
        n: FactorSpec,
        k: FactorSpec,
        m: FactorSpec,
        p: FactorSpec,
    ) -> ClockDesc {
        ClockDesc::new(id, name, parents, offset, ClockKind::Nkmp { n, k, m, p })
    }

    pub fn nmm(
        id: u32,
        name: &str,
        parents: &[&str],
        offset: u32,
        n: FactorSpec,
        m0: FactorSpec,
        m1: FactorSpec,
    ) -> ClockDesc {
        ClockDesc::new(id, name, parents, offset, ClockKind::Nmm { n, m0, m1 })
    }

    /// Parent selector in the node's own register.
    pub fn with_mux(mut self, shift: u32, width: u32) -> ClockDesc {
        self.mux = Some(MuxSpec { shift, width });
        self
    }

    /// Enable bit in the node's own register.
    pub fn with_gate(mut self, bit: u32) -> ClockDesc {
        self.gate = Some(GateSpec {
            offset: self.offset,
            bit,
            polarity: Polarity::ActiveHigh,
        });
        self
    }

    /// Lock status bit in the node's own register.
    pub fn with_lock(mut self, bit: u32, retries: u32) -> ClockDesc {
        self.lock = Some(LockSpec {
            offset: self.offset,
            bit,
            retries,
            enable: None,
        });
        self
    }

    /// Lock detection enable bit. Only meaningful after [`ClockDesc::with_lock`].
    pub fn with_lock_enable(mut self, bit: u32) -> ClockDesc {
        if let Some(lock) = self.lock.as_mut() {
            lock.enable = Some(bit);
        }
        self
    }

    pub fn with_reparent(mut self) -> ClockDesc {
        self.reparent = true;
        self
    }
}
