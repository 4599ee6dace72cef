// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! End-to-end scenarios against simulated register windows.

use std::cell::Cell;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{mpsc, Arc};

use parking_lot::Mutex;

use clktree::{
    Access, Ccu, CcuTable, ClockDesc, Config, ConfigError, Delay, ErrorCode, FactorSpec, GateDesc,
    InMemoryWindow, InitDesc, NoDelay, RegisterWindow, ResetDesc,
};

const WINDOW: usize = 0x40;

fn table(clocks: Vec<ClockDesc>) -> CcuTable {
    CcuTable {
        compatible: vec!["test,ccu".to_string()],
        description: String::new(),
        window_len: WINDOW,
        clocks,
        gates: Vec::new(),
        resets: Vec::new(),
        init: Vec::new(),
    }
}

fn config() -> Config {
    Config::default()
        .with_external_clock("hosc", 24_000_000)
        .with_external_clock("losc", 32_768)
}

fn attach(table: &CcuTable) -> Ccu<InMemoryWindow, NoDelay> {
    Ccu::attach(table, InMemoryWindow::new(WINDOW), NoDelay, config()).unwrap()
}

/// Counts how often the controller waited between lock polls.
#[derive(Clone, Default)]
struct CountingDelay {
    waits: Arc<AtomicU32>,
}

impl Delay for CountingDelay {
    fn delay_us(&self, _us: u32) {
        self.waits.fetch_add(1, Ordering::Relaxed);
    }
}

/// Hands every wait to another thread and blocks until that thread is done.
struct HandoffDelay {
    waiting: mpsc::Sender<()>,
    resumed: Mutex<mpsc::Receiver<()>>,
}

impl Delay for HandoffDelay {
    fn delay_us(&self, _us: u32) {
        self.waiting.send(()).unwrap();
        self.resumed.lock().recv().unwrap();
    }
}

/// Window whose PLL at offset 0 reports lock on the given poll after every
/// write.
struct SettlingWindow {
    inner: InMemoryWindow,
    polls_to_lock: u32,
    remaining: Cell<u32>,
}

impl RegisterWindow for SettlingWindow {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn read(&self, offset: u32) -> u32 {
        let word = self.inner.read(offset);
        if offset != 0 {
            return word;
        }
        let remaining = self.remaining.get().saturating_sub(1);
        self.remaining.set(remaining);
        if remaining == 0 {
            word | 1 << 28
        } else {
            word
        }
    }

    fn write(&self, offset: u32, value: u32) {
        if offset == 0 {
            self.remaining.set(self.polls_to_lock);
        }
        self.inner.write(offset, value);
    }
}

fn pll() -> ClockDesc {
    ClockDesc::np(
        0,
        "pll",
        &["hosc"],
        0x00,
        FactorSpec::zero_is_one(8, 8),
        FactorSpec::power_of_two(16, 2),
    )
    .with_gate(31)
    .with_lock(28, 5)
    .with_lock_enable(29)
}

fn divider() -> ClockDesc {
    ClockDesc::divider(1, "div", "hosc", 0x04, FactorSpec::zero_is_one(0, 2))
}

fn reads_of(journal: &[Access], offset: u32) -> usize {
    journal
        .iter()
        .filter(|access| matches!(access, Access::Read { offset: o, .. } if *o == offset))
        .count()
}

fn polls_after_last_write(journal: &[Access], offset: u32) -> usize {
    let last_write = journal
        .iter()
        .rposition(|access| matches!(access, Access::Write { .. }))
        .unwrap();
    reads_of(&journal[last_write + 1..], offset)
}

#[test]
fn double_factor_hits_one_gigahertz_exactly() {
    let ccu = attach(&table(vec![ClockDesc::nm(
        0,
        "pll",
        &["hosc"],
        0x00,
        FactorSpec::zero_is_one(8, 8),
        FactorSpec::zero_is_one(0, 2),
    )]));

    assert_eq!(ccu.set_rate("pll", 1_000_000_000), Ok(1_000_000_000));
    // N = 125, M = 3
    ccu.with_window(|regs| assert_eq!(regs.peek(0x00), (124 << 8) | 2));
    assert_eq!(ccu.get_rate("pll"), Ok(1_000_000_000));
}

#[test]
fn selecting_a_parent_reports_its_rate() {
    let config = config()
        .with_external_clock("oscillator_A", 24_000_000)
        .with_external_clock("oscillator_B", 19_200_000);
    let ccu = Ccu::attach(
        &table(vec![
            ClockDesc::mux(0, "sel", &["oscillator_A", "oscillator_B"], 0x04).with_mux(24, 1),
            ClockDesc::m(1, "div", &["hosc"], 0x08, FactorSpec::zero_is_one(0, 4)),
        ]),
        InMemoryWindow::new(WINDOW),
        NoDelay,
        config,
    )
    .unwrap();

    assert_eq!(ccu.get_rate("sel"), Ok(24_000_000));
    ccu.set_parent("sel", "oscillator_B").unwrap();
    assert_eq!(ccu.get_rate("sel"), Ok(19_200_000));
    assert_eq!(ccu.get_parent("sel"), Ok(Some("oscillator_B")));
    ccu.with_window(|regs| assert_eq!(regs.peek(0x04), 1 << 24));

    assert_eq!(ccu.set_parent("sel", "hosc"), Err(ErrorCode::NotAParent));
    assert_eq!(ccu.set_parent("sel", "ghost"), Err(ErrorCode::UnknownName));
    assert_eq!(ccu.set_parent("div", "hosc"), Err(ErrorCode::NoSupport));
}

#[test]
fn unknown_parent_fails_construction() {
    let result = Ccu::attach(
        &table(vec![ClockDesc::divider(
            0,
            "div",
            "ghost",
            0x00,
            FactorSpec::zero_is_one(0, 2),
        )]),
        InMemoryWindow::new(WINDOW),
        NoDelay,
        config(),
    );
    assert_eq!(
        result.err(),
        Some(ConfigError::UnknownParent {
            clock: "div".to_string(),
            parent: "ghost".to_string(),
        })
    );
}

#[test]
fn lock_timeout_leaves_new_factors_written() {
    let delay = CountingDelay::default();
    let ccu = Ccu::attach(
        &table(vec![pll()]),
        InMemoryWindow::new(WINDOW),
        delay.clone(),
        config(),
    )
    .unwrap();

    assert_eq!(ccu.set_rate("pll", 1_008_000_000), Err(ErrorCode::LockTimeout));
    ccu.with_window(|regs| {
        // N = 42, P = 1, lock detection armed.
        assert_eq!(regs.peek(0x00), (1 << 29) | (41 << 8));
        assert_eq!(polls_after_last_write(&regs.journal(), 0x00), 5);
    });
    assert_eq!(delay.waits.load(Ordering::Relaxed), 4);
    assert_eq!(ccu.get_rate("pll"), Ok(1_008_000_000));
}

#[test]
fn lock_is_polled_until_set() {
    let delay = CountingDelay::default();
    let regs = SettlingWindow {
        inner: InMemoryWindow::new(WINDOW),
        polls_to_lock: 3,
        remaining: Cell::new(0),
    };
    let ccu = Ccu::attach(&table(vec![pll()]), regs, delay.clone(), config()).unwrap();

    assert_eq!(ccu.set_rate("pll", 480_000_000), Ok(480_000_000));
    assert_eq!(delay.waits.load(Ordering::Relaxed), 2);
}

#[test]
fn other_requests_proceed_while_pll_settles() {
    let (waiting_tx, waiting_rx) = mpsc::channel();
    let (resumed_tx, resumed_rx) = mpsc::channel();
    let delay = HandoffDelay {
        waiting: waiting_tx,
        resumed: Mutex::new(resumed_rx),
    };
    let regs = SettlingWindow {
        inner: InMemoryWindow::new(WINDOW),
        polls_to_lock: 3,
        remaining: Cell::new(0),
    };
    let mut table = table(vec![pll(), divider()]);
    table.gates = vec![GateDesc::new(2, "bus-x", "div", 0x08, 0)];
    let ccu = Ccu::attach(&table, regs, delay, config()).unwrap();

    std::thread::scope(|s| {
        let ccu = &ccu;
        s.spawn(move || {
            // One round per wait between lock polls.
            for _ in 0..2 {
                waiting_rx.recv().unwrap();
                assert_eq!(ccu.set_rate("div", 12_000_000), Ok(12_000_000));
                ccu.enable("bus-x").unwrap();
                resumed_tx.send(()).unwrap();
            }
        });
        assert_eq!(ccu.set_rate("pll", 480_000_000), Ok(480_000_000));
    });

    assert_eq!(ccu.is_enabled("bus-x"), Ok(true));
    assert_eq!(ccu.get_rate("bus-x"), Ok(12_000_000));
}

#[test]
fn rates_follow_registers_written_through_the_window() {
    let ccu = attach(&table(vec![divider()]));

    assert_eq!(ccu.get_rate("div"), Ok(24_000_000));
    ccu.with_window(|regs| regs.preset(0x04, 3));
    assert_eq!(ccu.get_rate("div"), Ok(6_000_000));
}

#[test]
fn uncached_controller_reads_registers_on_every_request() {
    for (cache_rates, reads) in [(true, 1), (false, 3)] {
        let config = Config {
            cache_rates,
            ..config()
        };
        let ccu =
            Ccu::attach(&table(vec![divider()]), InMemoryWindow::new(WINDOW), NoDelay, config)
                .unwrap();

        for _ in 0..3 {
            assert_eq!(ccu.get_rate("div"), Ok(24_000_000));
        }
        ccu.with_window(|regs| assert_eq!(reads_of(&regs.journal(), 0x04), reads));

        assert_eq!(ccu.set_rate("div", 8_000_000), Ok(8_000_000));
        assert_eq!(ccu.get_rate("div"), Ok(8_000_000));
    }
}

#[test]
fn init_sequence_can_be_deferred() {
    let mut table = table(vec![divider()]);
    table.init = vec![InitDesc::new("div").with_rate(6_000_000)];
    let config = Config {
        apply_init: false,
        ..config()
    };
    let ccu = Ccu::attach(&table, InMemoryWindow::new(WINDOW), NoDelay, config).unwrap();

    ccu.with_window(|regs| assert!(regs.journal().is_empty()));
    assert_eq!(ccu.get_rate("div"), Ok(24_000_000));

    let report = ccu.apply_init(&table.init);
    assert_eq!(report.applied, vec!["div".to_string()]);
    assert_eq!(ccu.get_rate("div"), Ok(6_000_000));
}

#[test]
fn active_low_gate_clears_its_bit_to_enable() {
    let mut table = table(Vec::new());
    table.gates = vec![GateDesc::new(0, "bus-ledc", "hosc", 0x0c, 4).active_low()];
    let ccu = attach(&table);
    ccu.with_window(|regs| regs.preset(0x0c, 0xff));

    assert_eq!(ccu.is_enabled("bus-ledc"), Ok(false));
    ccu.enable("bus-ledc").unwrap();
    ccu.with_window(|regs| assert_eq!(regs.peek(0x0c), 0xef));
    assert_eq!(ccu.is_enabled("bus-ledc"), Ok(true));
    ccu.disable("bus-ledc").unwrap();
    assert_eq!(ccu.is_enabled("bus-ledc"), Ok(false));
}

#[test]
fn rate_requests_with_no_encoding_change_nothing() {
    let ccu = attach(&table(vec![
        pll(),
        ClockDesc::fixed_factor(1, "pll-div2", "pll", 1, 2),
    ]));

    assert_eq!(ccu.set_rate("pll", 0), Err(ErrorCode::UnrepresentableFactor));
    assert_eq!(ccu.set_rate("pll-div2", 12_000_000), Err(ErrorCode::NoSupport));
    assert_eq!(ccu.set_rate("ghost", 12_000_000), Err(ErrorCode::UnknownName));
    ccu.with_window(|regs| assert!(regs.writes().is_empty()));
}

#[test]
fn bring_up_and_tear_down_order_reset_and_gate() {
    let mut table = table(Vec::new());
    table.gates = vec![GateDesc::new(1, "bus-uart", "hosc", 0x0c, 0).with_reset("bus-uart")];
    table.resets = vec![ResetDesc::new(0, "bus-uart", 0x10, 16).active_low()];
    let ccu = attach(&table);

    ccu.bring_up("bus-uart").unwrap();
    ccu.with_window(|regs| {
        assert_eq!(regs.writes(), vec![(0x10, 1 << 16), (0x0c, 1)]);
    });
    assert_eq!(ccu.is_enabled("bus-uart"), Ok(true));
    assert_eq!(ccu.is_reset_asserted("bus-uart"), Ok(false));

    ccu.with_window(|regs| regs.clear_journal());
    ccu.tear_down(1u32).unwrap();
    ccu.with_window(|regs| assert_eq!(regs.writes(), vec![(0x0c, 0), (0x10, 0)]));
    assert_eq!(ccu.is_reset_asserted(0u32), Ok(true));
}

#[test]
fn ancestor_changes_reach_every_descendant() {
    let mut table = table(vec![
        ClockDesc::nm(
            0,
            "pll",
            &["hosc"],
            0x00,
            FactorSpec::zero_is_one(8, 8),
            FactorSpec::zero_is_one(0, 2),
        ),
        ClockDesc::mux(1, "ahb", &["hosc", "pll"], 0x04).with_mux(24, 1),
        ClockDesc::divider(2, "apb", "ahb", 0x08, FactorSpec::zero_is_one(0, 2)),
    ]);
    table.gates = vec![GateDesc::new(3, "bus-spi", "apb", 0x0c, 0)];
    let ccu = attach(&table);

    assert_eq!(ccu.get_rate("bus-spi"), Ok(24_000_000));

    ccu.set_parent("ahb", "pll").unwrap();
    assert_eq!(ccu.get_rate("bus-spi"), Ok(24_000_000));

    ccu.set_rate("pll", 600_000_000).unwrap();
    assert_eq!(ccu.get_rate("ahb"), Ok(600_000_000));
    assert_eq!(ccu.get_rate("bus-spi"), Ok(600_000_000));

    ccu.set_rate("apb", 150_000_000).unwrap();
    assert_eq!(ccu.get_rate("bus-spi"), Ok(150_000_000));

    ccu.set_root_rate("hosc", 12_000_000).unwrap();
    assert_eq!(ccu.get_rate("pll"), Ok(300_000_000));
    assert_eq!(ccu.get_rate("bus-spi"), Ok(75_000_000));
}

#[test]
fn set_rate_error_is_minimal() {
    let n = FactorSpec::zero_is_one(8, 8);
    let k = FactorSpec::zero_is_one(4, 2);
    let m = FactorSpec::zero_is_one(0, 2);
    let p = FactorSpec::power_of_two(16, 2);
    let ccu = attach(&table(vec![ClockDesc::nkmp(0, "pll", &["hosc"], 0x00, n, k, m, p)]));

    for target in [297_000_000u64, 1_234_567_890, 50_000_001, 3_300_000_000] {
        let mut best = u64::MAX;
        for n in n.factors() {
            for k in k.factors() {
                for m in m.factors() {
                    for p in p.factors() {
                        let rate = 24_000_000u64 * n as u64 * k as u64 / (m as u64 * p as u64);
                        best = best.min(rate.abs_diff(target));
                    }
                }
            }
        }

        let rounded = ccu.round_rate("pll", target).unwrap();
        let achieved = ccu.set_rate("pll", target).unwrap();
        assert_eq!(rounded, achieved);
        assert_eq!(achieved.abs_diff(target), best, "target {}", target);
        assert_eq!(ccu.get_rate("pll"), Ok(achieved));
    }
}

#[test]
fn reparenting_node_picks_best_parent() {
    let ccu = attach(&table(vec![ClockDesc::m(
        0,
        "mod",
        &["losc", "hosc"],
        0x00,
        FactorSpec::zero_is_one(0, 4),
    )
    .with_mux(24, 1)
    .with_reparent()]));

    assert_eq!(ccu.set_rate("mod", 8_000_000), Ok(8_000_000));
    assert_eq!(ccu.get_parent("mod"), Ok(Some("hosc")));
    // Selector and divider land in one write.
    ccu.with_window(|regs| assert_eq!(regs.writes(), vec![(0x00, (1 << 24) | 2)]));

    assert_eq!(ccu.set_rate("mod", 16_384), Ok(16_384));
    assert_eq!(ccu.get_parent("mod"), Ok(Some("losc")));
}

#[test]
fn init_sequence_skips_failures() {
    // No lock bit: the in-memory window would never report lock.
    let mut pll = pll();
    pll.lock = None;
    let mut table = table(vec![
        pll,
        ClockDesc::mux(1, "cpu", &["hosc", "pll"], 0x04).with_mux(24, 1),
    ]);
    table.init = vec![
        InitDesc::new("ghost").with_rate(1),
        InitDesc::new("cpu").with_parent("pll"),
        InitDesc::new("pll").with_rate(480_000_000).enabled(),
    ];
    let ccu = attach(&table);

    assert_eq!(ccu.get_rate("cpu"), Ok(480_000_000));
    assert_eq!(ccu.is_enabled("pll"), Ok(true));

    let report = ccu.apply_init(&[
        InitDesc::new("cpu").with_parent("losc"),
        InitDesc::new("cpu").with_parent("hosc"),
    ]);
    assert_eq!(report.applied, vec!["cpu".to_string()]);
    assert_eq!(
        report.failed,
        vec![("cpu".to_string(), ErrorCode::NotAParent)]
    );
    assert_eq!(ccu.get_rate("cpu"), Ok(24_000_000));
}

#[test]
fn table_loads_from_json() {
    let table: CcuTable = serde_json::from_str(
        r#"{
            "compatible": ["test,json-ccu"],
            "window_len": 64,
            "clocks": [
                {
                    "id": 0, "name": "pll", "parents": ["hosc"], "offset": 0,
                    "type": "nm",
                    "n": {"shift": 8, "width": 8, "policy": "zero_is_one"},
                    "m": {"shift": 0, "width": 2, "policy": "zero_is_one"},
                    "gate": {"offset": 0, "bit": 31}
                },
                {"id": 1, "name": "pll-div2", "parents": ["pll"], "type": "fixed", "div": 2}
            ],
            "gates": [
                {"id": 2, "name": "bus-x", "parent": "pll-div2", "offset": 16, "bit": 0, "reset": "bus-x"}
            ],
            "resets": [
                {"id": 0, "name": "bus-x", "offset": 16, "bit": 16, "polarity": "active_low"}
            ],
            "init": [
                {"name": "pll", "rate": 600000000, "enable": true}
            ]
        }"#,
    )
    .unwrap();
    let config: Config =
        serde_json::from_str(r#"{"external_clocks": [{"name": "hosc", "frequency": 24000000}]}"#)
            .unwrap();

    assert!(table.is_compatible("test,json-ccu"));
    let ccu = Ccu::attach(&table, InMemoryWindow::new(table.window_len), NoDelay, config).unwrap();

    ccu.with_window(|regs| assert_eq!(regs.peek(0x00), 0x8000_0000 | (24 << 8)));
    assert_eq!(ccu.get_rate("bus-x"), Ok(300_000_000));
    ccu.bring_up("bus-x").unwrap();
    assert_eq!(ccu.is_reset_asserted("bus-x"), Ok(false));
}

#[test]
fn concurrent_consumers_see_consistent_rates() {
    let ccu = attach(&table(vec![
        ClockDesc::divider(0, "a", "hosc", 0x00, FactorSpec::zero_is_one(0, 4)),
        ClockDesc::divider(1, "b", "hosc", 0x04, FactorSpec::zero_is_one(0, 4)),
    ]));

    std::thread::scope(|s| {
        for (name, rates) in [("a", [12_000_000u64, 8_000_000]), ("b", [6_000_000, 4_000_000])] {
            let ccu = &ccu;
            s.spawn(move || {
                for i in 0..200 {
                    let target = rates[i % 2];
                    assert_eq!(ccu.set_rate(name, target), Ok(target));
                    let rate = ccu.get_rate(name).unwrap();
                    assert!(rates.contains(&rate));
                }
            });
        }
    });

    assert_eq!(ccu.get_rate("a"), Ok(8_000_000));
    assert_eq!(ccu.get_rate("b"), Ok(4_000_000));
}
