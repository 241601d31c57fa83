//! `RPi.GPIO`-style interface for the expander
//!
//! Code written against the conventional `setmode()` / `setup()` / `input()` / `output()` call
//! shape can depend on [`GpioInterface`] and be handed a [`Pca95xxGpio`] instead of the SoC's
//! own GPIO controller.
use crate::{Error, Pca95xx, Transport};

/// Pin mode for [`GpioInterface::setup`]: output.
pub const OUT: u8 = 0;
/// Pin mode for [`GpioInterface::setup`]: input.
pub const IN: u8 = 1;
/// Numbering scheme for [`GpioInterface::set_mode`].  Accepted, but has no effect.
pub const BCM: u8 = 0;
/// Numbering scheme for [`GpioInterface::set_mode`].  Accepted, but has no effect.
pub const BOARD: u8 = 0;

/// The conventional four-call GPIO interface.
pub trait GpioInterface {
    type Error;

    /// Select the pin numbering scheme.
    fn set_mode(&mut self, mode: u8);

    /// Configure `pin` as [`OUT`] or [`IN`].
    fn setup(&mut self, pin: u8, mode: u8) -> Result<(), Self::Error>;

    /// Read input `pin`.  Non-zero means high.
    fn input(&mut self, pin: u8) -> Result<u16, Self::Error>;

    /// Drive output `pin` to `value` (`0` or `1`).
    fn output(&mut self, pin: u8, value: u8) -> Result<(), Self::Error>;
}

/// Adapter exposing a [`Pca95xx`] through [`GpioInterface`].
pub struct Pca95xxGpio<B> {
    chip: Pca95xx<B>,
}

#[cfg(feature = "rppal")]
impl Pca95xxGpio<rppal::i2c::I2c> {
    /// Open I2C bus `bus_number` and attach to the expander at `addr`.
    pub fn open(bus_number: u8, addr: u8, pin_count: u8) -> Result<Self, Error<rppal::i2c::Error>> {
        Ok(Self::from_driver(Pca95xx::open(bus_number, addr, pin_count)?))
    }
}

impl<B: Transport> Pca95xxGpio<B> {
    pub fn new(bus: B, addr: u8, pin_count: u8) -> Result<Self, Error<B::Error>> {
        Ok(Self::from_driver(Pca95xx::new(bus, addr, pin_count)?))
    }

    pub fn from_driver(chip: Pca95xx<B>) -> Self {
        Self { chip }
    }

    /// Access the underlying driver, e.g. for polarity inversion.
    pub fn chip(&mut self) -> &mut Pca95xx<B> {
        &mut self.chip
    }

    pub fn into_inner(self) -> Pca95xx<B> {
        self.chip
    }
}

impl<B: Transport> GpioInterface for Pca95xxGpio<B> {
    type Error = Error<B::Error>;

    fn set_mode(&mut self, _mode: u8) {}

    fn setup(&mut self, pin: u8, mode: u8) -> Result<(), Self::Error> {
        self.chip.configure(pin, mode)?;
        Ok(())
    }

    fn input(&mut self, pin: u8) -> Result<u16, Self::Error> {
        self.chip.read_input(pin)
    }

    fn output(&mut self, pin: u8, value: u8) -> Result<(), Self::Error> {
        self.chip.set_output(pin, value)?;
        Ok(())
    }
}
