//! Driver for the `PCA953x`/`PCA955x` family of I2C GPIO expanders
//!
//! [`Pca95xx`] talks to a single chip with 0 to 16 pins over any [`embedded_hal::i2c::I2c`]
//! bus.  Pins are configured, driven and read one at a time:
//!
//! ```
//! # use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
//! # let expectations = [
//! #     Transaction::write_read(0x20, vec![0x03], vec![0x00]),
//! #     Transaction::write_read(0x20, vec![0x01], vec![0x00]),
//! #     Transaction::write(0x20, vec![0x03, 0x08]),
//! #     Transaction::write(0x20, vec![0x01, 0x04]),
//! #     Transaction::write_read(0x20, vec![0x00], vec![0x08]),
//! # ];
//! # let mut i2c = Mock::new(&expectations);
//! use pca95xx::{Direction, Pca95xx};
//!
//! let mut pca = Pca95xx::new(i2c.clone(), 0x20, 8).unwrap();
//! pca.configure(3, Direction::Input.into()).unwrap();
//! pca.set_output(2, 1).unwrap();
//! assert_ne!(pca.read_input(3).unwrap(), 0);
//! # i2c.done();
//! ```
//!
//! [`gpio::Pca95xxGpio`] exposes the same chip through the `RPi.GPIO` call shape, and
//! [`SharedPca95xx`] hands out per-pin objects implementing the `embedded-hal` digital traits.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod bus;
mod common;
mod driver;
mod error;
pub mod gpio;
mod mutex;
mod pin;

pub use bus::Transport;
pub use common::{bit_merge, mode, Direction, Register, Width};
pub use driver::{Pca95xx, MAX_PINS};
pub use error::Error;
pub use mutex::PortMutex;
pub use pin::{Pin, SharedPca95xx};
