// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Stable clock and reset identifiers.
//!
//! Numbering follows the `sun20i-d1-ccu` device tree binding, so ids taken
//! from a device tree can be passed straight to the controller. Gaps are
//! clocks the table does not describe (USB and HDMI).

/// Clock ids.
pub mod clk {
    pub const PLL_CPUX: u32 = 0;
    pub const PLL_DDR0: u32 = 1;
    pub const PLL_PERIPH0_4X: u32 = 2;
    pub const PLL_PERIPH0_2X: u32 = 3;
    pub const PLL_PERIPH0_800M: u32 = 4;
    pub const PLL_PERIPH0: u32 = 5;
    pub const PLL_PERIPH0_DIV3: u32 = 6;
    pub const PLL_VIDEO0_4X: u32 = 7;
    pub const PLL_VIDEO0_2X: u32 = 8;
    pub const PLL_VIDEO0: u32 = 9;
    pub const PLL_VIDEO1_4X: u32 = 10;
    pub const PLL_VIDEO1_2X: u32 = 11;
    pub const PLL_VIDEO1: u32 = 12;
    pub const PLL_VE: u32 = 13;
    pub const PLL_AUDIO0_4X: u32 = 14;
    pub const PLL_AUDIO0_2X: u32 = 15;
    pub const PLL_AUDIO0: u32 = 16;
    pub const PLL_AUDIO1: u32 = 17;
    pub const PLL_AUDIO1_DIV2: u32 = 18;
    pub const PLL_AUDIO1_DIV5: u32 = 19;
    pub const CPUX: u32 = 20;
    pub const CPUX_AXI: u32 = 21;
    pub const CPUX_APB: u32 = 22;
    pub const PSI_AHB: u32 = 23;
    pub const APB0: u32 = 24;
    pub const APB1: u32 = 25;
    pub const MBUS: u32 = 26;
    pub const DE: u32 = 27;
    pub const BUS_DE: u32 = 28;
    pub const DI: u32 = 29;
    pub const BUS_DI: u32 = 30;
    pub const G2D: u32 = 31;
    pub const BUS_G2D: u32 = 32;
    pub const CE: u32 = 33;
    pub const BUS_CE: u32 = 34;
    pub const VE: u32 = 35;
    pub const BUS_VE: u32 = 36;
    pub const BUS_DMA: u32 = 37;
    pub const BUS_MSGBOX0: u32 = 38;
    pub const BUS_MSGBOX1: u32 = 39;
    pub const BUS_MSGBOX2: u32 = 40;
    pub const BUS_SPINLOCK: u32 = 41;
    pub const BUS_HSTIMER: u32 = 42;
    pub const AVS: u32 = 43;
    pub const BUS_DBG: u32 = 44;
    pub const BUS_PWM: u32 = 45;
    pub const BUS_IOMMU: u32 = 46;
    pub const DRAM: u32 = 47;
    pub const MBUS_DMA: u32 = 48;
    pub const MBUS_VE: u32 = 49;
    pub const MBUS_CE: u32 = 50;
    pub const MBUS_TVIN: u32 = 51;
    pub const MBUS_CSI: u32 = 52;
    pub const MBUS_G2D: u32 = 53;
    pub const MBUS_RISCV: u32 = 54;
    pub const BUS_DRAM: u32 = 55;
    pub const MMC0: u32 = 56;
    pub const MMC1: u32 = 57;
    pub const MMC2: u32 = 58;
    pub const BUS_MMC0: u32 = 59;
    pub const BUS_MMC1: u32 = 60;
    pub const BUS_MMC2: u32 = 61;
    pub const BUS_UART0: u32 = 62;
    pub const BUS_UART1: u32 = 63;
    pub const BUS_UART2: u32 = 64;
    pub const BUS_UART3: u32 = 65;
    pub const BUS_UART4: u32 = 66;
    pub const BUS_UART5: u32 = 67;
    pub const BUS_I2C0: u32 = 68;
    pub const BUS_I2C1: u32 = 69;
    pub const BUS_I2C2: u32 = 70;
    pub const BUS_I2C3: u32 = 71;
    pub const BUS_CAN0: u32 = 72;
    pub const BUS_CAN1: u32 = 73;
    pub const SPI0: u32 = 74;
    pub const SPI1: u32 = 75;
    pub const BUS_SPI0: u32 = 76;
    pub const BUS_SPI1: u32 = 77;
    pub const EMAC_25M: u32 = 78;
    pub const BUS_EMAC: u32 = 79;
    pub const IR_TX: u32 = 80;
    pub const BUS_IR_TX: u32 = 81;
    pub const BUS_GPADC: u32 = 82;
    pub const BUS_THS: u32 = 83;
    pub const I2S0: u32 = 84;
    pub const I2S1: u32 = 85;
    pub const I2S2: u32 = 86;
    pub const I2S2_ASRC: u32 = 87;
    pub const BUS_I2S0: u32 = 88;
    pub const BUS_I2S1: u32 = 89;
    pub const BUS_I2S2: u32 = 90;
    pub const SPDIF_TX: u32 = 91;
    pub const SPDIF_RX: u32 = 92;
    pub const BUS_SPDIF: u32 = 93;
    pub const DMIC: u32 = 94;
    pub const BUS_DMIC: u32 = 95;
    pub const AUDIO_DAC: u32 = 96;
    pub const AUDIO_ADC: u32 = 97;
    pub const BUS_AUDIO: u32 = 98;
    pub const BUS_LRADC: u32 = 106;
    pub const BUS_DPSS_TOP: u32 = 107;
    pub const MIPI_DSI: u32 = 112;
    pub const BUS_MIPI_DSI: u32 = 113;
    pub const TCON_LCD0: u32 = 114;
    pub const BUS_TCON_LCD0: u32 = 115;
    pub const TCON_TV: u32 = 116;
    pub const BUS_TCON_TV: u32 = 117;
    pub const TVE: u32 = 118;
    pub const BUS_TVE_TOP: u32 = 119;
    pub const BUS_TVE: u32 = 120;
    pub const TVD: u32 = 121;
    pub const BUS_TVD_TOP: u32 = 122;
    pub const BUS_TVD: u32 = 123;
    pub const LEDC: u32 = 124;
    pub const BUS_LEDC: u32 = 125;
    pub const CSI_TOP: u32 = 126;
    pub const CSI_MCLK: u32 = 127;
    pub const BUS_CSI: u32 = 128;
    pub const TPADC: u32 = 129;
    pub const BUS_TPADC: u32 = 130;
    pub const BUS_TZMA: u32 = 131;
    pub const DSP: u32 = 132;
    pub const BUS_DSP_CFG: u32 = 133;
}

/// Reset line ids.
pub mod rst {
    pub const MBUS: u32 = 0;
    pub const BUS_DE: u32 = 1;
    pub const BUS_DI: u32 = 2;
    pub const BUS_G2D: u32 = 3;
    pub const BUS_CE: u32 = 4;
    pub const BUS_VE: u32 = 5;
    pub const BUS_DMA: u32 = 6;
    pub const BUS_MSGBOX0: u32 = 7;
    pub const BUS_MSGBOX1: u32 = 8;
    pub const BUS_MSGBOX2: u32 = 9;
    pub const BUS_SPINLOCK: u32 = 10;
    pub const BUS_HSTIMER: u32 = 11;
    pub const BUS_DBG: u32 = 12;
    pub const BUS_PWM: u32 = 13;
    pub const BUS_DRAM: u32 = 14;
    pub const BUS_MMC0: u32 = 15;
    pub const BUS_MMC1: u32 = 16;
    pub const BUS_MMC2: u32 = 17;
    pub const BUS_UART0: u32 = 18;
    pub const BUS_UART1: u32 = 19;
    pub const BUS_UART2: u32 = 20;
    pub const BUS_UART3: u32 = 21;
    pub const BUS_UART4: u32 = 22;
    pub const BUS_UART5: u32 = 23;
    pub const BUS_I2C0: u32 = 24;
    pub const BUS_I2C1: u32 = 25;
    pub const BUS_I2C2: u32 = 26;
    pub const BUS_I2C3: u32 = 27;
    pub const BUS_CAN0: u32 = 28;
    pub const BUS_CAN1: u32 = 29;
    pub const BUS_SPI0: u32 = 30;
    pub const BUS_SPI1: u32 = 31;
    pub const BUS_EMAC: u32 = 32;
    pub const BUS_IR_TX: u32 = 33;
    pub const BUS_GPADC: u32 = 34;
    pub const BUS_THS: u32 = 35;
    pub const BUS_I2S0: u32 = 36;
    pub const BUS_I2S1: u32 = 37;
    pub const BUS_I2S2: u32 = 38;
    pub const BUS_SPDIF: u32 = 39;
    pub const BUS_DMIC: u32 = 40;
    pub const BUS_AUDIO: u32 = 41;
    pub const USB_PHY0: u32 = 42;
    pub const USB_PHY1: u32 = 43;
    pub const BUS_OHCI0: u32 = 44;
    pub const BUS_OHCI1: u32 = 45;
    pub const BUS_EHCI0: u32 = 46;
    pub const BUS_EHCI1: u32 = 47;
    pub const BUS_OTG: u32 = 48;
    pub const BUS_LRADC: u32 = 49;
    pub const BUS_DPSS_TOP: u32 = 50;
    pub const BUS_HDMI_MAIN: u32 = 51;
    pub const BUS_HDMI_SUB: u32 = 52;
    pub const BUS_MIPI_DSI: u32 = 53;
    pub const BUS_TCON_LCD0: u32 = 54;
    pub const BUS_TCON_TV: u32 = 55;
    pub const BUS_LVDS0: u32 = 56;
    pub const BUS_TVE_TOP: u32 = 57;
    pub const BUS_TVE: u32 = 58;
    pub const BUS_TVD_TOP: u32 = 59;
    pub const BUS_TVD: u32 = 60;
    pub const BUS_LEDC: u32 = 61;
    pub const BUS_CSI: u32 = 62;
    pub const BUS_TPADC: u32 = 63;
    pub const DSP: u32 = 64;
    pub const BUS_DSP_CFG: u32 = 65;
    pub const BUS_DSP_DBG: u32 = 66;
    pub const BUS_RISCV_CFG: u32 = 67;
}
