// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Error types for the clock engine.
//!
//! There are two families. [`ConfigError`] describes a defect in the
//! configuration table itself and is only produced while a controller is
//! being built; a controller is never constructed from a table that fails
//! validation. [`ErrorCode`] is returned by runtime operations and never
//! leaves the controller in a partially updated state, with the single
//! exception of [`ErrorCode::LockTimeout`] where the new factors have already
//! been written.

use thiserror::Error;

/// Runtime errors returned by the consumer API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErrorCode {
    /// No clock, gate or reset line with that name or id exists.
    #[error("no clock, gate or reset line with that name or id")]
    UnknownName,
    /// The requested factor or rate has no bit pattern under the field's
    /// quantization policy. Nothing was written.
    #[error("requested factor has no valid register encoding")]
    UnrepresentableFactor,
    /// The PLL did not assert its lock bit within the retry budget. The new
    /// factors are in the register and the PLL may still lock late.
    #[error("PLL did not report lock within the retry budget")]
    LockTimeout,
    /// The named clock exists but is not one of the node's parents.
    #[error("clock is not a parent of this node")]
    NotAParent,
    /// The operation does not apply to this kind of node, e.g. changing the
    /// parent of a node without a selector or enabling a node without a gate.
    #[error("operation not supported by this clock")]
    NoSupport,
}

/// Configuration table defects, detected while building the registry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("`{clock}` references unknown parent `{parent}`")]
    UnknownParent { clock: String, parent: String },
    #[error("parent graph contains a cycle through `{0}`")]
    Cycle(String),
    #[error("name `{0}` is registered twice")]
    DuplicateName(String),
    #[error("id {0} is registered twice")]
    DuplicateId(u32),
    #[error("`{name}` has a malformed factor field: {reason}")]
    MalformedFactor { name: String, reason: &'static str },
    #[error("`{name}` selector of {width} bits cannot address {parents} parents")]
    MuxTooNarrow {
        name: String,
        width: u32,
        parents: usize,
    },
    #[error("`{0}` has a selector but no parents, or several parents but no selector")]
    ParentCount(String),
    #[error("`{name}` lock bit is polled zero times")]
    ZeroLockRetries { name: String },
    #[error("`{name}` uses offset {offset:#06x} outside a {window:#x}-byte window")]
    OffsetOutOfWindow {
        name: String,
        offset: u32,
        window: usize,
    },
    #[error("`{first}` and `{second}` both claim bits {mask:#010x} at offset {offset:#06x}")]
    OverlappingField {
        first: String,
        second: String,
        offset: u32,
        mask: u32,
    },
    #[error("gate `{gate}` is paired with unknown reset line `{reset}`")]
    UnknownReset { gate: String, reset: String },
}
