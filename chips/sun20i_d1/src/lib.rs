// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Clock control unit of the Allwinner D1, R528 and T113.
//!
//! ```
//! use clktree::{Ccu, InMemoryWindow, NoDelay};
//! use sun20i_d1::{clk, config, table, WINDOW_LEN};
//!
//! let table = table();
//! let ccu = Ccu::attach(&table, InMemoryWindow::new(WINDOW_LEN), NoDelay, config()).unwrap();
//! assert_eq!(ccu.get_rate(clk::BUS_UART0), Ok(24_000_000));
//! ```

pub mod ccu;
pub mod ids;

pub use crate::ccu::{config, table, COMPATIBLE, HOSC_HZ, IOSC_HZ, LOSC_HZ, WINDOW_LEN};
pub use crate::ids::{clk, rst};
