//! Register-level driver for the `PCA953x`/`PCA955x` "I2C-bus and SMBus I/O port" family
//!
//! The chips in this family share one register layout: input, output, polarity inversion and
//! configuration.  Parts with up to 8 pins have one byte per register; 16-pin parts have a pair
//! per register which is accessed as a single little-endian word at twice the byte index.
//!
//! The driver keeps shadows of the configuration and output registers.  Setting an output only
//! costs a single bus write, and the direction shadow is used to refuse reading outputs or
//! driving inputs before the bus is touched.
//!
//! `Pca95xx` does no locking of its own.  A read-modify-write is two separate bus transactions,
//! so callers sharing one instance must serialize access, for example through
//! [`SharedPca95xx`][crate::SharedPca95xx].
use crate::{bit_merge, Direction, Error, Register, Transport, Width};

/// Highest pin count of any chip in the family.
pub const MAX_PINS: u8 = 16;

/// Driver for a single `PCA95xx` GPIO expander.
pub struct Pca95xx<B> {
    bus: B,
    addr: u8,
    pin_count: u8,
    width: Width,
    direction: u16,
    output: u16,
}

#[cfg(feature = "rppal")]
impl Pca95xx<rppal::i2c::I2c> {
    /// Open I2C bus `bus_number` (`/dev/i2c-<bus_number>`) and attach to the expander at
    /// `addr`.
    pub fn open(bus_number: u8, addr: u8, pin_count: u8) -> Result<Self, Error<rppal::i2c::Error>> {
        if pin_count > MAX_PINS {
            return Err(Error::InvalidConfiguration { pin_count });
        }
        let bus = rppal::i2c::I2c::with_bus(bus_number).map_err(Error::Bus)?;
        Self::new(bus, addr, pin_count)
    }
}

impl<B: Transport> Pca95xx<B> {
    /// Attach to the expander at `addr` which has `pin_count` pins.
    ///
    /// Reads the configuration and output registers to seed the shadows.  A `pin_count` above 16
    /// fails with [`Error::InvalidConfiguration`] without touching the bus.
    pub fn new(bus: B, addr: u8, pin_count: u8) -> Result<Self, Error<B::Error>> {
        if pin_count > MAX_PINS {
            return Err(Error::InvalidConfiguration { pin_count });
        }
        let mut this = Self {
            bus,
            addr,
            pin_count,
            width: Width::for_pin_count(pin_count),
            direction: 0,
            output: 0,
        };
        this.direction = this.read_reg(Register::Configuration)?;
        this.output = this.read_reg(Register::Output)?;
        log::debug!(
            "pca95xx {:#04x}: {} pins, direction {:#06x}, output {:#06x}",
            addr,
            pin_count,
            this.direction,
            this.output
        );
        Ok(this)
    }

    /// Give back the bus.
    pub fn release(self) -> B {
        self.bus
    }

    pub fn address(&self) -> u8 {
        self.addr
    }

    pub fn pin_count(&self) -> u8 {
        self.pin_count
    }

    pub fn width(&self) -> Width {
        self.width
    }

    /// Shadow of the configuration register (a set bit is an input).
    pub fn direction(&self) -> u16 {
        self.direction
    }

    /// Shadow of the output register.
    pub fn output_state(&self) -> u16 {
        self.output
    }

    /// Direction of `pin` according to the configuration shadow.
    pub fn pin_direction(&self, pin: u8) -> Result<Direction, Error<B::Error>> {
        self.check_pin(pin)?;
        Ok(Direction::from_bit(self.direction & (1 << pin) != 0))
    }

    /// Set the direction of `pin`, `mode` is `0` ([`Direction::Output`]) or `1`
    /// ([`Direction::Input`]).
    ///
    /// Returns the new configuration register value.  This is the only operation which changes
    /// pin direction.
    pub fn configure(&mut self, pin: u8, mode: u8) -> Result<u16, Error<B::Error>> {
        self.check_pin(pin)?;
        let direction =
            self.read_modify_write(Register::Configuration, pin, mode, Some(self.direction))?;
        self.direction = direction;
        log::debug!(
            "pca95xx {:#04x}: pin {} -> {:?}, direction {:#06x}",
            self.addr,
            pin,
            Direction::from_bit(mode == 1),
            direction
        );
        Ok(direction)
    }

    /// Drive output `pin` low (`0`) or high (`1`).
    ///
    /// The pin must have been configured as an output.  Returns the new output register value.
    pub fn set_output(&mut self, pin: u8, value: u8) -> Result<u16, Error<B::Error>> {
        self.check_pin(pin)?;
        if value > 1 {
            return Err(Error::InvalidArgument { value });
        }
        self.check_direction(pin, Direction::Output)?;
        let output = self.read_modify_write(Register::Output, pin, value, Some(self.output))?;
        self.output = output;
        Ok(output)
    }

    /// Read input `pin`.
    ///
    /// The input register is read fresh on every call.  The result is the pin's bit left in
    /// place (`0x08` for a high pin 3), not normalized to `0`/`1`.
    pub fn read_input(&mut self, pin: u8) -> Result<u16, Error<B::Error>> {
        self.check_pin(pin)?;
        self.check_direction(pin, Direction::Input)?;
        let input = self.read_reg(Register::Input)?;
        Ok(input & (1 << pin))
    }

    /// Enable (`1`) or disable (`0`) input inversion for `pin`.
    ///
    /// No shadow is kept for the polarity register so it is always read first.  Returns the new
    /// polarity register value.
    pub fn set_polarity(&mut self, pin: u8, value: u8) -> Result<u16, Error<B::Error>> {
        self.read_modify_write(Register::Polarity, pin, value, None)
    }

    /// Change bit `pin` of `reg` to `bit`, starting from `cached` or a fresh read if `None`.
    ///
    /// Returns the value that was written.  Callers owning a shadow for `reg` must store the
    /// result themselves.
    pub(crate) fn read_modify_write(
        &mut self,
        reg: Register,
        pin: u8,
        bit: u8,
        cached: Option<u16>,
    ) -> Result<u16, Error<B::Error>> {
        self.check_pin(pin)?;
        if bit > 1 {
            return Err(Error::InvalidArgument { value: bit });
        }
        let current = match cached {
            Some(value) => value,
            None => self.read_reg(reg)?,
        };
        let value = bit_merge::<B::Error>(current, pin, bit)?;
        self.write_reg(reg, value)?;
        Ok(value)
    }

    fn check_pin(&self, pin: u8) -> Result<(), Error<B::Error>> {
        if pin < self.pin_count {
            Ok(())
        } else {
            Err(Error::PinOutOfRange {
                pin,
                pin_count: self.pin_count,
            })
        }
    }

    fn check_direction(&self, pin: u8, expected: Direction) -> Result<(), Error<B::Error>> {
        if Direction::from_bit(self.direction & (1 << pin) != 0) == expected {
            Ok(())
        } else {
            Err(Error::WrongPinDirection { pin, expected })
        }
    }

    fn read_reg(&mut self, reg: Register) -> Result<u16, Error<B::Error>> {
        let id = reg.id(self.width);
        match self.width {
            Width::Byte => self.bus.read_byte(self.addr, id).map(u16::from),
            Width::Word => self.bus.read_word(self.addr, id),
        }
        .map_err(Error::Bus)
    }

    fn write_reg(&mut self, reg: Register, value: u16) -> Result<(), Error<B::Error>> {
        let id = reg.id(self.width);
        match self.width {
            Width::Byte => self.bus.write_byte(self.addr, id, value as u8),
            Width::Word => self.bus.write_word(self.addr, id, value),
        }
        .map_err(Error::Bus)
    }
}
