// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Waiting between PLL lock polls.

use std::time::Duration;

/// Implementation required to wait between two reads of a PLL lock bit.
///
/// The controller calls `delay_us()` without holding its lock. A board with
/// a hardware timer can implement this with a busy wait; hosted builds use
/// [`ThreadDelay`].
///
/// The boiler plate for an implementation will look something like this
///
/// ```rust
/// use clktree::delay::Delay;
///
/// struct TimerDelay {}
///
/// impl Delay for TimerDelay {
///     fn delay_us(&self, us: u32) {
///         unimplemented!()
///     }
/// }
/// ```
pub trait Delay {
    /// Wait at least `us` microseconds.
    fn delay_us(&self, us: u32);
}

/// Sleeps the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay_us(&self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }
}

/// Returns immediately. For simulated register windows, where lock bits
/// never change while the caller waits.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn delay_us(&self, _us: u32) {}
}
