use embedded_hal::i2c as hal_i2c;

/// Register transport used by the driver.
///
/// This is the SMBus "byte data" / "word data" subset the PCA95xx family needs.  Any
/// [`embedded_hal::i2c::I2c`] bus implements it through a blanket implementation, so in most
/// cases you will never implement this trait yourself.
///
/// Errors are handed to the caller unchanged, the driver never retries.
pub trait Transport {
    type Error;

    /// Read an 8-bit register.
    fn read_byte(&mut self, addr: u8, reg: u8) -> Result<u8, Self::Error>;
    /// Write an 8-bit register.
    fn write_byte(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), Self::Error>;
    /// Read a 16-bit register pair, low byte first.
    fn read_word(&mut self, addr: u8, reg: u8) -> Result<u16, Self::Error>;
    /// Write a 16-bit register pair, low byte first.
    fn write_word(&mut self, addr: u8, reg: u8, value: u16) -> Result<(), Self::Error>;
}

impl<I2C: hal_i2c::I2c> Transport for I2C {
    type Error = I2C::Error;

    fn read_byte(&mut self, addr: u8, reg: u8) -> Result<u8, Self::Error> {
        let mut buf = [0x00];
        self.write_read(addr, &[reg], &mut buf)?;
        log::trace!("i2c {:#04x}: read byte reg {:#04x} -> {:#04x}", addr, reg, buf[0]);
        Ok(buf[0])
    }

    fn write_byte(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), Self::Error> {
        log::trace!("i2c {:#04x}: write byte reg {:#04x} <- {:#04x}", addr, reg, value);
        self.write(addr, &[reg, value])
    }

    fn read_word(&mut self, addr: u8, reg: u8) -> Result<u16, Self::Error> {
        let mut buf = [0x00; 2];
        self.write_read(addr, &[reg], &mut buf)?;
        let value = u16::from_le_bytes(buf);
        log::trace!("i2c {:#04x}: read word reg {:#04x} -> {:#06x}", addr, reg, value);
        Ok(value)
    }

    fn write_word(&mut self, addr: u8, reg: u8, value: u16) -> Result<(), Self::Error> {
        log::trace!("i2c {:#04x}: write word reg {:#04x} <- {:#06x}", addr, reg, value);
        let [lo, hi] = value.to_le_bytes();
        self.write(addr, &[reg, lo, hi])
    }
}
