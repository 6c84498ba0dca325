//! Main clock controller
//!
//! All CLKCTRL registers are under configuration change protection: a
//! write only takes effect if the CCP signature was written to CPU.CCP in
//! the four instructions before it. [`Clkctrl`] does the signature write
//! itself. The read, the signature and the write all happen inside one
//! critical section, so no interrupt lands in between.

use vcell::VolatileCell;

use crate::error::{require, HalError, HalResult};
use crate::field::Field;
use crate::registers::ClkctrlRegisters;

/// CPU.CCP signature unlocking protected I/O registers
pub const CCP_IOREG: u8 = 0xD8;

/// Internal ultra low-power oscillator frequency
pub const OSCULP32K_HZ: u32 = 32_768;
/// External 32.768 kHz crystal frequency
pub const XOSC32K_HZ: u32 = 32_768;

const MCLKCTRLA_CLKSEL: Field = Field::new(0, 2);
const MCLKCTRLA_CLKOUT: Field = Field::bit(7);
const MCLKCTRLB_PEN: Field = Field::bit(0);
const MCLKCTRLB_PDIV: Field = Field::new(1, 4);
const MCLKLOCK_LOCKEN: Field = Field::bit(0);
const RUNSTDBY: Field = Field::bit(1);
const XOSC32KCTRLA_ENABLE: Field = Field::bit(0);
const XOSC32KCTRLA_SEL: Field = Field::bit(2);

/// Main clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClockSource {
    /// 16/20 MHz internal oscillator
    Osc20m,
    /// 32 kHz internal ultra low-power oscillator
    OscUlp32k,
    /// 32.768 kHz external crystal
    Xosc32k,
    /// External clock on EXTCLK
    ExtClk,
}

impl ClockSource {
    fn bits(self) -> u8 {
        match self {
            ClockSource::Osc20m => 0x0,
            ClockSource::OscUlp32k => 0x1,
            ClockSource::Xosc32k => 0x2,
            ClockSource::ExtClk => 0x3,
        }
    }

    fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0x0 => ClockSource::Osc20m,
            0x1 => ClockSource::OscUlp32k,
            0x2 => ClockSource::Xosc32k,
            _ => ClockSource::ExtClk,
        }
    }
}

/// Main clock prescaler division
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prescaler {
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div6,
    Div10,
    Div12,
    Div24,
    Div48,
}

impl Prescaler {
    pub const ALL: [Prescaler; 11] = [
        Prescaler::Div2,
        Prescaler::Div4,
        Prescaler::Div8,
        Prescaler::Div16,
        Prescaler::Div32,
        Prescaler::Div64,
        Prescaler::Div6,
        Prescaler::Div10,
        Prescaler::Div12,
        Prescaler::Div24,
        Prescaler::Div48,
    ];

    /// PDIV bit pattern
    pub fn bits(self) -> u8 {
        match self {
            Prescaler::Div2 => 0x0,
            Prescaler::Div4 => 0x1,
            Prescaler::Div8 => 0x2,
            Prescaler::Div16 => 0x3,
            Prescaler::Div32 => 0x4,
            Prescaler::Div64 => 0x5,
            Prescaler::Div6 => 0x8,
            Prescaler::Div10 => 0x9,
            Prescaler::Div12 => 0xA,
            Prescaler::Div24 => 0xB,
            Prescaler::Div48 => 0xC,
        }
    }

    /// Decode a PDIV bit pattern
    pub fn from_bits(bits: u8) -> HalResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.bits() == bits)
            .ok_or(HalError::ReservedValue(bits))
    }

    /// Division factor
    pub fn divisor(self) -> u32 {
        match self {
            Prescaler::Div2 => 2,
            Prescaler::Div4 => 4,
            Prescaler::Div8 => 8,
            Prescaler::Div16 => 16,
            Prescaler::Div32 => 32,
            Prescaler::Div64 => 64,
            Prescaler::Div6 => 6,
            Prescaler::Div10 => 10,
            Prescaler::Div12 => 12,
            Prescaler::Div24 => 24,
            Prescaler::Div48 => 48,
        }
    }
}

/// Oscillators with a run-in-standby control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oscillator {
    Osc20m,
    Osc32k,
    Xosc32k,
}

/// MCLKSTATUS flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockStatus {
    /// Main clock switch in progress
    pub switching: bool,
    pub osc20m_stable: bool,
    pub osc32k_stable: bool,
    pub xosc32k_stable: bool,
    pub extclk_stable: bool,
}

impl ClockStatus {
    fn from_bits(bits: u8) -> Self {
        Self {
            switching: bits & (1 << 0) != 0,
            osc20m_stable: bits & (1 << 4) != 0,
            osc32k_stable: bits & (1 << 5) != 0,
            xosc32k_stable: bits & (1 << 6) != 0,
            extclk_stable: bits & (1 << 7) != 0,
        }
    }
}

/// Board oscillator frequencies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockConfig {
    /// OSC20M frequency as set by the FREQSEL fuse (16 or 20 MHz)
    pub osc20m_hz: u32,
    /// Frequency on EXTCLK; 0 if nothing is connected
    pub extclk_hz: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            osc20m_hz: 20_000_000,
            extclk_hz: 0,
        }
    }
}

/// Clock controller accessor
pub struct Clkctrl<'a> {
    regs: &'a ClkctrlRegisters,
    ccp: &'a VolatileCell<u8>,
    config: ClockConfig,
}

impl<'a> Clkctrl<'a> {
    /// Wrap the CLKCTRL block and the CPU.CCP register
    pub fn new(regs: &'a ClkctrlRegisters, ccp: &'a VolatileCell<u8>, config: ClockConfig) -> Self {
        Self { regs, ccp, config }
    }

    /// Board oscillator frequencies
    pub fn config(&self) -> ClockConfig {
        self.config
    }

    /// Read, change and write back a protected register in one critical section
    fn protected_modify(&self, reg: &VolatileCell<u8>, f: impl FnOnce(u8) -> u8) {
        let _value = critical_section::with(|_| {
            let value = f(reg.get());
            self.ccp.set(CCP_IOREG);
            reg.set(value);
            value
        });

        #[cfg(feature = "defmt")]
        defmt::trace!("clkctrl: protected write {=u8:#04x}", _value);
    }

    fn protected_write(&self, reg: &VolatileCell<u8>, value: u8) {
        self.protected_modify(reg, |_| value);
    }

    fn protected_update(&self, reg: &VolatileCell<u8>, field: Field, value: u8) {
        self.protected_modify(reg, |current| field.insert(current, value));
    }

    /// Check if MCLKCTRLA/B are locked until the next reset
    pub fn is_locked(&self) -> bool {
        MCLKLOCK_LOCKEN.extract(self.regs.mclklock.get()) != 0
    }

    fn ensure_unlocked(&self) -> HalResult<()> {
        require(!self.is_locked(), HalError::Locked)
    }

    /// Lock the main clock configuration until the next reset
    pub fn lock(&mut self) {
        self.protected_update(&self.regs.mclklock, MCLKLOCK_LOCKEN, 1);

        #[cfg(feature = "defmt")]
        defmt::debug!("clkctrl: main clock locked");
    }

    /// Selected main clock source
    pub fn source(&self) -> ClockSource {
        ClockSource::from_bits(MCLKCTRLA_CLKSEL.extract(self.regs.mclkctrla.get()))
    }

    /// Switch the main clock source
    ///
    /// The switch completes in hardware once the new source is stable; poll
    /// [`ClockStatus::switching`].
    pub fn set_source(&mut self, source: ClockSource) -> HalResult<()> {
        self.ensure_unlocked()?;
        self.protected_update(&self.regs.mclkctrla, MCLKCTRLA_CLKSEL, source.bits());

        #[cfg(feature = "defmt")]
        defmt::debug!("clkctrl: source -> {}", source);

        Ok(())
    }

    /// Check if the main clock is output on CLKOUT
    pub fn clock_out(&self) -> bool {
        MCLKCTRLA_CLKOUT.extract(self.regs.mclkctrla.get()) != 0
    }

    /// Enable or disable the main clock on CLKOUT
    pub fn set_clock_out(&mut self, enabled: bool) -> HalResult<()> {
        self.ensure_unlocked()?;
        self.protected_update(&self.regs.mclkctrla, MCLKCTRLA_CLKOUT, enabled as u8);
        Ok(())
    }

    /// Current prescaler, `None` when the prescaler is disabled
    pub fn prescaler(&self) -> HalResult<Option<Prescaler>> {
        let value = self.regs.mclkctrlb.get();
        if MCLKCTRLB_PEN.extract(value) == 0 {
            return Ok(None);
        }
        Prescaler::from_bits(MCLKCTRLB_PDIV.extract(value)).map(Some)
    }

    /// Set or disable the prescaler
    pub fn set_prescaler(&mut self, prescaler: Option<Prescaler>) -> HalResult<()> {
        self.ensure_unlocked()?;
        let value = match prescaler {
            Some(p) => MCLKCTRLB_PDIV.insert(MCLKCTRLB_PEN.insert(0, 1), p.bits()),
            None => 0,
        };
        self.protected_write(&self.regs.mclkctrlb, value);

        #[cfg(feature = "defmt")]
        defmt::debug!("clkctrl: prescaler -> {}", prescaler);

        Ok(())
    }

    /// Oscillator status flags
    pub fn status(&self) -> ClockStatus {
        ClockStatus::from_bits(self.regs.mclkstatus.get())
    }

    fn oscillator_register(&self, oscillator: Oscillator) -> &'a VolatileCell<u8> {
        match oscillator {
            Oscillator::Osc20m => &self.regs.osc20mctrla,
            Oscillator::Osc32k => &self.regs.osc32kctrla,
            Oscillator::Xosc32k => &self.regs.xosc32kctrla,
        }
    }

    /// Keep an oscillator running in standby sleep
    pub fn set_run_in_standby(&mut self, oscillator: Oscillator, enabled: bool) {
        let reg = self.oscillator_register(oscillator);
        self.protected_update(reg, RUNSTDBY, enabled as u8);
    }

    /// Check if an oscillator keeps running in standby sleep
    pub fn run_in_standby(&self, oscillator: Oscillator) -> bool {
        RUNSTDBY.extract(self.oscillator_register(oscillator).get()) != 0
    }

    /// Enable the 32.768 kHz crystal oscillator
    ///
    /// With `external_clock` set, TOSC1 takes an external clock and no
    /// crystal is driven.
    pub fn enable_xosc32k(&mut self, external_clock: bool) {
        self.protected_modify(&self.regs.xosc32kctrla, |current| {
            let value = XOSC32KCTRLA_SEL.insert(current, external_clock as u8);
            XOSC32KCTRLA_ENABLE.insert(value, 1)
        });
    }

    /// Disable the 32.768 kHz crystal oscillator
    pub fn disable_xosc32k(&mut self) {
        self.protected_update(&self.regs.xosc32kctrla, XOSC32KCTRLA_ENABLE, 0);
    }

    /// Frequency of the selected source before the prescaler
    pub fn source_hz(&self) -> u32 {
        match self.source() {
            ClockSource::Osc20m => self.config.osc20m_hz,
            ClockSource::OscUlp32k => OSCULP32K_HZ,
            ClockSource::Xosc32k => XOSC32K_HZ,
            ClockSource::ExtClk => self.config.extclk_hz,
        }
    }

    /// Main clock (CLK_PER) frequency in Hz
    pub fn main_clock_hz(&self) -> HalResult<u32> {
        let divisor = self.prescaler()?.map_or(1, Prescaler::divisor);
        Ok(self.source_hz() / divisor)
    }
}
