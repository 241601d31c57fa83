/// Device registers, by their byte-wide index.
///
/// For 16-pin parts each register is a pair and the word-wide index is the byte index shifted
/// left by one (the configuration pair starts at `0x06`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    Input = 0x00,
    Output = 0x01,
    Polarity = 0x02,
    Configuration = 0x03,
}

impl Register {
    /// Register index as sent on the wire for the given access width.
    pub fn id(self, width: Width) -> u8 {
        match width {
            Width::Byte => self as u8,
            Width::Word => (self as u8) << 1,
        }
    }
}

impl From<Register> for u8 {
    fn from(r: Register) -> u8 {
        r as u8
    }
}

/// Register access width, decided once from the pin count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Width {
    /// Up to 8 pins, one register byte.
    Byte,
    /// 9 to 16 pins, a little-endian register pair.
    Word,
}

impl Width {
    pub fn for_pin_count(pin_count: u8) -> Self {
        if pin_count <= 8 {
            Width::Byte
        } else {
            Width::Word
        }
    }
}

/// Pin direction, encoded the way the configuration register stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Output = 0,
    Input = 1,
}

impl From<Direction> for u8 {
    fn from(d: Direction) -> u8 {
        d as u8
    }
}

impl Direction {
    pub(crate) fn from_bit(bit: bool) -> Self {
        if bit {
            Direction::Input
        } else {
            Direction::Output
        }
    }
}

/// Return `value` with bit `bit_index` cleared (`bit == 0`) or set (`bit == 1`).
///
/// `bit_index` must be below 16.  All other bits are left alone.  Any other `bit` is rejected with
/// [`Error::InvalidArgument`][crate::Error::InvalidArgument].
pub fn bit_merge<E>(value: u16, bit_index: u8, bit: u8) -> Result<u16, crate::Error<E>> {
    let mask = 1u16 << bit_index;
    match bit {
        0 => Ok(value & !mask),
        1 => Ok(value | mask),
        value => Err(crate::Error::InvalidArgument { value }),
    }
}

/// Pin Modes
pub mod mode {
    /// Trait for pin-modes which can be used to set a logic level.
    pub trait HasOutput {}
    /// Trait for pin-modes which can be used to read a logic level.
    pub trait HasInput {}

    /// Pin whose direction has not been chosen through this handle yet.
    pub struct Unconfigured;

    /// Pin configured as an input.
    pub struct Input;
    impl HasInput for Input {}

    /// Pin configured as an output.
    pub struct Output;
    impl HasOutput for Output {}
}

#[cfg(test)]
mod tests {
    use super::{bit_merge, Register, Width};

    type Error = crate::Error<()>;

    #[test]
    fn bit_merge_touches_only_one_bit() {
        for value in [0x0000u16, 0xffff, 0xa5a5, 0x1234] {
            for index in 0..16u8 {
                for bit in 0..=1u8 {
                    let merged = bit_merge::<()>(value, index, bit).unwrap();
                    assert_eq!(merged & !(1 << index), value & !(1 << index));
                    assert_eq!((merged >> index) & 1, bit as u16);
                }
            }
        }
    }

    #[test]
    fn bit_merge_rejects_non_bits() {
        assert_eq!(
            bit_merge::<()>(0x00, 0, 2),
            Err(Error::InvalidArgument { value: 2 })
        );
        assert_eq!(
            bit_merge::<()>(0x00, 0, 0xff),
            Err(Error::InvalidArgument { value: 0xff })
        );
    }

    #[test]
    fn width_from_pin_count() {
        assert_eq!(Width::for_pin_count(0), Width::Byte);
        assert_eq!(Width::for_pin_count(4), Width::Byte);
        assert_eq!(Width::for_pin_count(8), Width::Byte);
        assert_eq!(Width::for_pin_count(9), Width::Word);
        assert_eq!(Width::for_pin_count(16), Width::Word);
    }

    #[test]
    fn word_register_ids_are_shifted() {
        assert_eq!(Register::Input.id(Width::Word), 0x00);
        assert_eq!(Register::Output.id(Width::Word), 0x02);
        assert_eq!(Register::Polarity.id(Width::Word), 0x04);
        assert_eq!(Register::Configuration.id(Width::Word), 0x06);
        assert_eq!(Register::Configuration.id(Width::Byte), 0x03);
    }
}
