// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Clock control unit table.
//!
//! Every PLL register carries the output gate in bit 27, the lock status in
//! bit 28 and the lock enable in bit 29. Module clocks select their parent in
//! bits 24..27, gate in bit 31 and divide by `pre * m`, with the power of two
//! pre-divider in bits 8..10 and `m` starting at bit 0. Bus gates sit in the
//! low half of a bus gating register whose high half holds the matching
//! active-low reset lines.

use clktree::{CcuTable, ClockDesc, Config, FactorSpec, GateDesc, ResetDesc};

use crate::ids::{clk, rst};

pub const COMPATIBLE: &str = "allwinner,sun20i-d1-ccu";

/// Size of the register window in bytes.
pub const WINDOW_LEN: usize = 0x1000;

/// Default oscillator rates. The board may override them with
/// [`clktree::Ccu::set_root_rate`].
pub const HOSC_HZ: u64 = 24_000_000;
pub const LOSC_HZ: u64 = 32_768;
pub const IOSC_HZ: u64 = 16_000_000;

const PLL_GATE: u32 = 27;
const PLL_LOCK: u32 = 28;
const PLL_LOCK_ENABLE: u32 = 29;
const PLL_LOCK_RETRIES: u32 = 1000;

const MODULE_GATE: u32 = 31;
const MODULE_MUX: u32 = 24;

const ONE: FactorSpec = FactorSpec::fixed(1);
const PLL_N: FactorSpec = FactorSpec::zero_is_one(8, 8);
const PLL_M: FactorSpec = FactorSpec::zero_is_one(1, 1);
const PRE_DIV: FactorSpec = FactorSpec::power_of_two(8, 2);

const CPUX_PARENTS: [&str; 7] = [
    "hosc",
    "losc",
    "iosc",
    "pll_cpux",
    "pll_periph0",
    "pll_periph0-2x",
    "pll_periph0-800m",
];
const BUS_PARENTS: [&str; 4] = ["hosc", "losc", "psi-ahb", "pll_periph0"];
const DISPLAY_PARENTS: [&str; 4] = [
    "pll_periph0-2x",
    "pll_video0-4x",
    "pll_video1-4x",
    "pll_audio1-div2",
];
const MMC_PARENTS: [&str; 4] = ["hosc", "pll_periph0", "pll_periph0-2x", "pll_audio1-div2"];
const SPI_PARENTS: [&str; 5] = [
    "hosc",
    "pll_periph0",
    "pll_periph0-2x",
    "pll_audio1-div2",
    "pll_audio1-div5",
];
const I2S_PARENTS: [&str; 4] = [
    "pll_audio0",
    "pll_audio0-4x",
    "pll_audio1-div2",
    "pll_audio1-div5",
];
const ASRC_PARENTS: [&str; 4] = [
    "pll_audio0-4x",
    "pll_periph0",
    "pll_audio1-div2",
    "pll_audio1-div5",
];
const CODEC_PARENTS: [&str; 3] = ["pll_audio0", "pll_audio1-div2", "pll_audio1-div5"];
const TCON_PARENTS: [&str; 6] = [
    "pll_video0",
    "pll_video0-4x",
    "pll_video1",
    "pll_video1-4x",
    "pll_periph0-2x",
    "pll_audio1-div2",
];

/// (id, name, offset, bit)
const RESETS: &[(u32, &str, u32, u32)] = &[
    (rst::MBUS, "mbus", 0x0540, 30),
    (rst::BUS_DE, "bus-de", 0x060c, 16),
    (rst::BUS_DI, "bus-di", 0x062c, 16),
    (rst::BUS_G2D, "bus-g2d", 0x063c, 16),
    (rst::BUS_CE, "bus-ce", 0x068c, 16),
    (rst::BUS_VE, "bus-ve", 0x069c, 16),
    (rst::BUS_DMA, "bus-dma", 0x070c, 16),
    (rst::BUS_MSGBOX0, "bus-msgbox0", 0x071c, 16),
    (rst::BUS_MSGBOX1, "bus-msgbox1", 0x071c, 17),
    (rst::BUS_MSGBOX2, "bus-msgbox2", 0x071c, 18),
    (rst::BUS_SPINLOCK, "bus-spinlock", 0x072c, 16),
    (rst::BUS_HSTIMER, "bus-hstimer", 0x073c, 16),
    (rst::BUS_DBG, "bus-dbg", 0x078c, 16),
    (rst::BUS_PWM, "bus-pwm", 0x07ac, 16),
    (rst::BUS_DRAM, "bus-dram", 0x080c, 16),
    (rst::BUS_MMC0, "bus-mmc0", 0x084c, 16),
    (rst::BUS_MMC1, "bus-mmc1", 0x084c, 17),
    (rst::BUS_MMC2, "bus-mmc2", 0x084c, 18),
    (rst::BUS_UART0, "bus-uart0", 0x090c, 16),
    (rst::BUS_UART1, "bus-uart1", 0x090c, 17),
    (rst::BUS_UART2, "bus-uart2", 0x090c, 18),
    (rst::BUS_UART3, "bus-uart3", 0x090c, 19),
    (rst::BUS_UART4, "bus-uart4", 0x090c, 20),
    (rst::BUS_UART5, "bus-uart5", 0x090c, 21),
    (rst::BUS_I2C0, "bus-i2c0", 0x091c, 16),
    (rst::BUS_I2C1, "bus-i2c1", 0x091c, 17),
    (rst::BUS_I2C2, "bus-i2c2", 0x091c, 18),
    (rst::BUS_I2C3, "bus-i2c3", 0x091c, 19),
    (rst::BUS_CAN0, "bus-can0", 0x092c, 16),
    (rst::BUS_CAN1, "bus-can1", 0x092c, 17),
    (rst::BUS_SPI0, "bus-spi0", 0x096c, 16),
    (rst::BUS_SPI1, "bus-spi1", 0x096c, 17),
    (rst::BUS_EMAC, "bus-emac", 0x097c, 16),
    (rst::BUS_IR_TX, "bus-ir-tx", 0x09cc, 16),
    (rst::BUS_GPADC, "bus-gpadc", 0x09ec, 16),
    (rst::BUS_THS, "bus-ths", 0x09fc, 16),
    (rst::BUS_I2S0, "bus-i2s0", 0x0a20, 16),
    (rst::BUS_I2S1, "bus-i2s1", 0x0a20, 17),
    (rst::BUS_I2S2, "bus-i2s2", 0x0a20, 18),
    (rst::BUS_SPDIF, "bus-spdif", 0x0a2c, 16),
    (rst::BUS_DMIC, "bus-dmic", 0x0a4c, 16),
    (rst::BUS_AUDIO, "bus-audio", 0x0a5c, 16),
    (rst::USB_PHY0, "usb-phy0", 0x0a70, 30),
    (rst::USB_PHY1, "usb-phy1", 0x0a74, 30),
    (rst::BUS_OHCI0, "bus-ohci0", 0x0a8c, 16),
    (rst::BUS_OHCI1, "bus-ohci1", 0x0a8c, 17),
    (rst::BUS_EHCI0, "bus-ehci0", 0x0a8c, 20),
    (rst::BUS_EHCI1, "bus-ehci1", 0x0a8c, 21),
    (rst::BUS_OTG, "bus-otg", 0x0a8c, 24),
    (rst::BUS_LRADC, "bus-lradc", 0x0a9c, 16),
    (rst::BUS_DPSS_TOP, "bus-dpss-top", 0x0abc, 16),
    (rst::BUS_HDMI_MAIN, "bus-hdmi-main", 0x0b1c, 16),
    (rst::BUS_HDMI_SUB, "bus-hdmi-sub", 0x0b1c, 17),
    (rst::BUS_MIPI_DSI, "bus-mipi-dsi", 0x0b4c, 16),
    (rst::BUS_TCON_LCD0, "bus-tcon-lcd0", 0x0b7c, 16),
    (rst::BUS_TCON_TV, "bus-tcon-tv", 0x0b9c, 16),
    (rst::BUS_LVDS0, "bus-lvds0", 0x0bac, 16),
    (rst::BUS_TVE_TOP, "bus-tve-top", 0x0bbc, 16),
    (rst::BUS_TVE, "bus-tve", 0x0bbc, 17),
    (rst::BUS_TVD_TOP, "bus-tvd-top", 0x0bdc, 16),
    (rst::BUS_TVD, "bus-tvd", 0x0bdc, 17),
    (rst::BUS_LEDC, "bus-ledc", 0x0bfc, 16),
    (rst::BUS_CSI, "bus-csi", 0x0c1c, 16),
    (rst::BUS_TPADC, "bus-tpadc", 0x0c5c, 16),
    (rst::DSP, "dsp", 0x0c7c, 16),
    (rst::BUS_DSP_CFG, "bus-dsp-cfg", 0x0c7c, 17),
    (rst::BUS_DSP_DBG, "bus-dsp-dbg", 0x0c7c, 18),
    (rst::BUS_RISCV_CFG, "bus-riscv-cfg", 0x0d0c, 16),
];

/// (id, name, parent, offset, bit). A gate is sequenced with the reset line
/// of the same name, if there is one.
const GATES: &[(u32, &str, &str, u32, u32)] = &[
    (clk::BUS_DE, "bus-de", "psi-ahb", 0x060c, 0),
    (clk::BUS_DI, "bus-di", "psi-ahb", 0x062c, 0),
    (clk::BUS_G2D, "bus-g2d", "psi-ahb", 0x063c, 0),
    (clk::BUS_CE, "bus-ce", "psi-ahb", 0x068c, 0),
    (clk::BUS_VE, "bus-ve", "psi-ahb", 0x069c, 0),
    (clk::BUS_DMA, "bus-dma", "psi-ahb", 0x070c, 0),
    (clk::BUS_MSGBOX0, "bus-msgbox0", "psi-ahb", 0x071c, 0),
    (clk::BUS_MSGBOX1, "bus-msgbox1", "psi-ahb", 0x071c, 1),
    (clk::BUS_MSGBOX2, "bus-msgbox2", "psi-ahb", 0x071c, 2),
    (clk::BUS_SPINLOCK, "bus-spinlock", "psi-ahb", 0x072c, 0),
    (clk::BUS_HSTIMER, "bus-hstimer", "psi-ahb", 0x073c, 0),
    (clk::AVS, "avs", "hosc", 0x0740, 31),
    (clk::BUS_DBG, "bus-dbg", "psi-ahb", 0x078c, 0),
    (clk::BUS_PWM, "bus-pwm", "apb0", 0x07ac, 0),
    (clk::BUS_IOMMU, "bus-iommu", "apb0", 0x07bc, 0),
    (clk::MBUS_DMA, "mbus-dma", "mbus", 0x0804, 0),
    (clk::MBUS_VE, "mbus-ve", "mbus", 0x0804, 1),
    (clk::MBUS_CE, "mbus-ce", "mbus", 0x0804, 2),
    (clk::MBUS_TVIN, "mbus-tvin", "mbus", 0x0804, 7),
    (clk::MBUS_CSI, "mbus-csi", "mbus", 0x0804, 8),
    (clk::MBUS_G2D, "mbus-g2d", "mbus", 0x0804, 10),
    (clk::MBUS_RISCV, "mbus-riscv", "mbus", 0x0804, 11),
    (clk::BUS_DRAM, "bus-dram", "psi-ahb", 0x080c, 0),
    (clk::BUS_MMC0, "bus-mmc0", "psi-ahb", 0x084c, 0),
    (clk::BUS_MMC1, "bus-mmc1", "psi-ahb", 0x084c, 1),
    (clk::BUS_MMC2, "bus-mmc2", "psi-ahb", 0x084c, 2),
    (clk::BUS_UART0, "bus-uart0", "apb1", 0x090c, 0),
    (clk::BUS_UART1, "bus-uart1", "apb1", 0x090c, 1),
    (clk::BUS_UART2, "bus-uart2", "apb1", 0x090c, 2),
    (clk::BUS_UART3, "bus-uart3", "apb1", 0x090c, 3),
    (clk::BUS_UART4, "bus-uart4", "apb1", 0x090c, 4),
    (clk::BUS_UART5, "bus-uart5", "apb1", 0x090c, 5),
    (clk::BUS_I2C0, "bus-i2c0", "apb1", 0x091c, 0),
    (clk::BUS_I2C1, "bus-i2c1", "apb1", 0x091c, 1),
    (clk::BUS_I2C2, "bus-i2c2", "apb1", 0x091c, 2),
    (clk::BUS_I2C3, "bus-i2c3", "apb1", 0x091c, 3),
    (clk::BUS_CAN0, "bus-can0", "apb1", 0x092c, 0),
    (clk::BUS_CAN1, "bus-can1", "apb1", 0x092c, 1),
    (clk::BUS_SPI0, "bus-spi0", "psi-ahb", 0x096c, 0),
    (clk::BUS_SPI1, "bus-spi1", "psi-ahb", 0x096c, 1),
    (clk::BUS_EMAC, "bus-emac", "psi-ahb", 0x097c, 0),
    (clk::BUS_IR_TX, "bus-ir-tx", "apb0", 0x09cc, 0),
    (clk::BUS_GPADC, "bus-gpadc", "apb0", 0x09ec, 0),
    (clk::BUS_THS, "bus-ths", "apb0", 0x09fc, 0),
    (clk::BUS_I2S0, "bus-i2s0", "apb0", 0x0a20, 0),
    (clk::BUS_I2S1, "bus-i2s1", "apb0", 0x0a20, 1),
    (clk::BUS_I2S2, "bus-i2s2", "apb0", 0x0a20, 2),
    (clk::BUS_SPDIF, "bus-spdif", "apb0", 0x0a2c, 0),
    (clk::BUS_DMIC, "bus-dmic", "apb0", 0x0a4c, 0),
    (clk::BUS_AUDIO, "bus-audio", "apb0", 0x0a5c, 0),
    (clk::BUS_LRADC, "bus-lradc", "apb0", 0x0a9c, 0),
    (clk::BUS_DPSS_TOP, "bus-dpss-top", "psi-ahb", 0x0abc, 0),
    (clk::BUS_MIPI_DSI, "bus-mipi-dsi", "psi-ahb", 0x0b4c, 0),
    (clk::BUS_TCON_LCD0, "bus-tcon-lcd0", "psi-ahb", 0x0b7c, 0),
    (clk::BUS_TCON_TV, "bus-tcon-tv", "psi-ahb", 0x0b9c, 0),
    (clk::BUS_TVE_TOP, "bus-tve-top", "psi-ahb", 0x0bbc, 0),
    (clk::BUS_TVE, "bus-tve", "psi-ahb", 0x0bbc, 1),
    (clk::BUS_TVD_TOP, "bus-tvd-top", "psi-ahb", 0x0bdc, 0),
    (clk::BUS_TVD, "bus-tvd", "psi-ahb", 0x0bdc, 1),
    (clk::BUS_LEDC, "bus-ledc", "psi-ahb", 0x0bfc, 0),
    (clk::BUS_CSI, "bus-csi", "psi-ahb", 0x0c1c, 0),
    (clk::BUS_TPADC, "bus-tpadc", "apb0", 0x0c5c, 0),
    (clk::BUS_TZMA, "bus-tzma", "apb0", 0x0c6c, 0),
    (clk::BUS_DSP_CFG, "bus-dsp-cfg", "psi-ahb", 0x0c7c, 1),
];

fn pll(clock: ClockDesc) -> ClockDesc {
    clock
        .with_gate(PLL_GATE)
        .with_lock(PLL_LOCK, PLL_LOCK_RETRIES)
        .with_lock_enable(PLL_LOCK_ENABLE)
}

/// `hosc * n / (m * p)` PLL.
fn nkmp_pll(id: u32, name: &str, offset: u32, p: FactorSpec) -> ClockDesc {
    pll(ClockDesc::nkmp(id, name, &["hosc"], offset, PLL_N, ONE, PLL_M, p))
}

/// Ungated bus clock, `parent / (pre * m)`.
fn bus(id: u32, name: &str, parents: &[&str], offset: u32, m_width: u32, mux_width: u32) -> ClockDesc {
    ClockDesc::pre_div_m(id, name, parents, offset, PRE_DIV, FactorSpec::zero_is_one(0, m_width))
        .with_mux(MODULE_MUX, mux_width)
}

fn module(id: u32, name: &str, parents: &[&str], offset: u32, m_width: u32, mux_width: u32) -> ClockDesc {
    bus(id, name, parents, offset, m_width, mux_width).with_gate(MODULE_GATE)
}

/// Module clock without a pre-divider.
fn m_module(id: u32, name: &str, parents: &[&str], offset: u32, m_width: u32, mux_width: u32) -> ClockDesc {
    ClockDesc::m(id, name, parents, offset, FactorSpec::zero_is_one(0, m_width))
        .with_mux(MODULE_MUX, mux_width)
        .with_gate(MODULE_GATE)
}

fn clocks() -> Vec<ClockDesc> {
    vec![
        pll(ClockDesc::np(clk::PLL_CPUX, "pll_cpux", &["hosc"], 0x0000, PLL_N, ONE)),
        nkmp_pll(clk::PLL_DDR0, "pll_ddr0", 0x0010, FactorSpec::zero_is_one(0, 1)),
        nkmp_pll(clk::PLL_PERIPH0_4X, "pll_periph0-4x", 0x0020, ONE),
        ClockDesc::divider(
            clk::PLL_PERIPH0_2X,
            "pll_periph0-2x",
            "pll_periph0-4x",
            0x0020,
            FactorSpec::zero_is_one(16, 3),
        ),
        ClockDesc::fixed_factor(clk::PLL_PERIPH0, "pll_periph0", "pll_periph0-2x", 1, 2),
        ClockDesc::divider(
            clk::PLL_PERIPH0_800M,
            "pll_periph0-800m",
            "pll_periph0-4x",
            0x0020,
            FactorSpec::zero_is_one(20, 3),
        ),
        ClockDesc::fixed_factor(clk::PLL_PERIPH0_DIV3, "pll_periph0-div3", "pll_periph0-2x", 1, 6),
        nkmp_pll(clk::PLL_VIDEO0_4X, "pll_video0-4x", 0x0040, ONE),
        ClockDesc::fixed_factor(clk::PLL_VIDEO0_2X, "pll_video0-2x", "pll_video0-4x", 1, 2),
        ClockDesc::fixed_factor(clk::PLL_VIDEO0, "pll_video0", "pll_video0-4x", 1, 4),
        nkmp_pll(clk::PLL_VIDEO1_4X, "pll_video1-4x", 0x0048, ONE),
        ClockDesc::fixed_factor(clk::PLL_VIDEO1_2X, "pll_video1-2x", "pll_video1-4x", 1, 2),
        ClockDesc::fixed_factor(clk::PLL_VIDEO1, "pll_video1", "pll_video1-4x", 1, 4),
        nkmp_pll(clk::PLL_VE, "pll_ve", 0x0058, FactorSpec::zero_is_one(0, 1)),
        pll(ClockDesc::nmm(
            clk::PLL_AUDIO0_4X,
            "pll_audio0-4x",
            &["hosc"],
            0x0078,
            PLL_N,
            FactorSpec::zero_is_one(0, 1),
            FactorSpec::zero_is_one(1, 1),
        )),
        ClockDesc::fixed_factor(clk::PLL_AUDIO0_2X, "pll_audio0-2x", "pll_audio0-4x", 1, 2),
        ClockDesc::fixed_factor(clk::PLL_AUDIO0, "pll_audio0", "pll_audio0-4x", 1, 4),
        nkmp_pll(clk::PLL_AUDIO1, "pll_audio1", 0x0080, ONE),
        ClockDesc::divider(
            clk::PLL_AUDIO1_DIV2,
            "pll_audio1-div2",
            "pll_audio1",
            0x0080,
            FactorSpec::zero_is_one(16, 3),
        ),
        ClockDesc::divider(
            clk::PLL_AUDIO1_DIV5,
            "pll_audio1-div5",
            "pll_audio1",
            0x0080,
            FactorSpec::zero_is_one(20, 3),
        ),
        ClockDesc::mux(clk::CPUX, "cpux", &CPUX_PARENTS, 0x0500).with_mux(MODULE_MUX, 3),
        ClockDesc::divider(clk::CPUX_AXI, "cpux-axi", "cpux", 0x0500, FactorSpec::zero_is_one(0, 2)),
        ClockDesc::divider(clk::CPUX_APB, "cpux-apb", "cpux", 0x0500, FactorSpec::zero_is_one(8, 2)),
        bus(clk::PSI_AHB, "psi-ahb", &["hosc", "losc", "iosc", "pll_periph0"], 0x0510, 2, 2),
        bus(clk::APB0, "apb0", &BUS_PARENTS, 0x0520, 5, 2),
        bus(clk::APB1, "apb1", &BUS_PARENTS, 0x0524, 5, 2),
        m_module(clk::DE, "de", &DISPLAY_PARENTS, 0x0600, 5, 3),
        m_module(clk::DI, "di", &DISPLAY_PARENTS, 0x0620, 5, 3),
        m_module(clk::G2D, "g2d", &DISPLAY_PARENTS, 0x0630, 5, 3),
        module(clk::CE, "ce", &["hosc", "pll_periph0-2x", "pll_periph0"], 0x0680, 4, 2),
        m_module(clk::VE, "ve", &["pll_ve", "pll_periph0-2x"], 0x0690, 5, 1),
        bus(
            clk::DRAM,
            "dram",
            &["pll_ddr0", "pll_audio1-div2", "pll_periph0-2x", "pll_periph0-800m"],
            0x0800,
            2,
            3,
        ),
        ClockDesc::fixed_factor(clk::MBUS, "mbus", "dram", 1, 4),
        module(clk::MMC0, "mmc0", &MMC_PARENTS, 0x0830, 4, 3),
        module(clk::MMC1, "mmc1", &MMC_PARENTS, 0x0834, 4, 3),
        module(
            clk::MMC2,
            "mmc2",
            &["hosc", "pll_periph0", "pll_periph0-2x", "pll_periph0-800m", "pll_audio1-div2"],
            0x0838,
            4,
            3,
        ),
        module(clk::SPI0, "spi0", &SPI_PARENTS, 0x0940, 4, 3),
        module(clk::SPI1, "spi1", &SPI_PARENTS, 0x0944, 4, 3),
        ClockDesc::m(clk::EMAC_25M, "emac-25m", &["pll_periph0"], 0x0970, FactorSpec::fixed(24))
            .with_gate(MODULE_GATE),
        module(clk::IR_TX, "ir-tx", &["hosc", "pll_periph0"], 0x09c0, 4, 2),
        module(clk::I2S0, "i2s0", &I2S_PARENTS, 0x0a10, 5, 3),
        module(clk::I2S1, "i2s1", &I2S_PARENTS, 0x0a14, 5, 3),
        module(clk::I2S2, "i2s2", &I2S_PARENTS, 0x0a18, 5, 3),
        module(clk::I2S2_ASRC, "i2s2_asrc", &ASRC_PARENTS, 0x0a1c, 5, 3),
        module(clk::SPDIF_TX, "spdif-tx", &ASRC_PARENTS, 0x0a24, 5, 3),
        module(
            clk::SPDIF_RX,
            "spdif-rx",
            &["pll_periph0", "pll_audio1-div2", "pll_audio1-div5"],
            0x0a28,
            5,
            3,
        ),
        module(clk::DMIC, "dmic", &CODEC_PARENTS, 0x0a40, 5, 3),
        module(clk::AUDIO_DAC, "audio-dac", &CODEC_PARENTS, 0x0a50, 5, 3),
        module(clk::AUDIO_ADC, "audio-adc", &CODEC_PARENTS, 0x0a54, 5, 3),
        m_module(
            clk::MIPI_DSI,
            "mipi-dsi",
            &["hosc", "pll_periph0", "pll_video0-2x", "pll_video1-2x", "pll_audio1-div2"],
            0x0b24,
            4,
            3,
        ),
        module(clk::TCON_LCD0, "tcon-lcd0", &TCON_PARENTS, 0x0b60, 4, 3),
        module(clk::TCON_TV, "tcon-tv", &TCON_PARENTS, 0x0b80, 4, 3),
        module(clk::TVE, "tve", &TCON_PARENTS, 0x0bb0, 4, 3),
        m_module(
            clk::TVD,
            "tvd",
            &["hosc", "pll_video0", "pll_video1", "pll_periph0"],
            0x0bc0,
            5,
            3,
        ),
        module(clk::LEDC, "ledc", &["hosc", "pll_periph0"], 0x0bf0, 4, 1),
        m_module(
            clk::CSI_TOP,
            "csi-top",
            &["pll_periph0-2x", "pll_video0-2x", "pll_video1-2x"],
            0x0c04,
            4,
            3,
        ),
        m_module(
            clk::CSI_MCLK,
            "csi-mclk",
            &[
                "hosc",
                "pll_periph0",
                "pll_video0",
                "pll_video1",
                "pll_audio1-div2",
                "pll_audio1-div5",
            ],
            0x0c08,
            5,
            3,
        ),
        ClockDesc::m(clk::TPADC, "tpadc", &["hosc", "pll_audio0"], 0x0c50, ONE)
            .with_mux(MODULE_MUX, 3)
            .with_gate(MODULE_GATE),
        m_module(
            clk::DSP,
            "dsp",
            &["hosc", "losc", "iosc", "pll_periph0-2x", "pll_audio1-div2"],
            0x0c70,
            5,
            3,
        ),
    ]
}

/// The D1 clock control unit.
pub fn table() -> CcuTable {
    let gates = GATES
        .iter()
        .map(|&(id, name, parent, offset, bit)| {
            let gate = GateDesc::new(id, name, parent, offset, bit);
            if RESETS.iter().any(|&(_, reset, _, _)| reset == name) {
                gate.with_reset(name)
            } else {
                gate
            }
        })
        .collect();
    let resets = RESETS
        .iter()
        .map(|&(id, name, offset, bit)| ResetDesc::new(id, name, offset, bit).active_low())
        .collect();

    CcuTable {
        compatible: vec![COMPATIBLE.to_string()],
        description: "Allwinner D1/R528/T113 Clock Control Unit".to_string(),
        window_len: WINDOW_LEN,
        clocks: clocks(),
        gates,
        resets,
        init: Vec::new(),
    }
}

/// Controller configuration with the oscillators at their nominal rates.
pub fn config() -> Config {
    Config::default()
        .with_external_clock("hosc", HOSC_HZ)
        .with_external_clock("losc", LOSC_HZ)
        .with_external_clock("iosc", IOSC_HZ)
}
