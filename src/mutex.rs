/// Common interface for mutex implementations.
///
/// `pca95xx` needs a mutex so several [`Pin`][crate::Pin] objects can share one expander.  The
/// driver itself does no locking, every read-modify-write happens inside a single `lock()`.
/// This trait is already implemented for a number of existing mutex types, most of them
/// guarded by a feature:
///
/// | Mutex | Feature Name | Notes |
/// | --- | --- | --- |
/// | [`core::cell::RefCell`] | _always available_ | For sharing within a single execution context. |
/// | [`std::sync::Mutex`][mutex-std] | `std` | For platforms where `std` is available. |
/// | [`critical_section::Mutex<RefCell<T>>`][mutex-cs] | `critical-section` | For sharing with interrupt handlers. |
///
/// [mutex-std]: https://doc.rust-lang.org/std/sync/struct.Mutex.html
/// [mutex-cs]: https://docs.rs/critical-section/latest/critical_section/struct.Mutex.html
///
/// For other mutex types, a custom implementation is needed.  Due to the orphan rule, it might be
/// necessary to wrap it in a newtype:
///
/// ```
/// struct MyMutex<T>(std::sync::Mutex<T>);
///
/// impl<T> pca95xx::PortMutex for MyMutex<T> {
///     type Port = T;
///
///     fn create(v: T) -> Self {
///         Self(std::sync::Mutex::new(v))
///     }
///
///     fn lock<R, F: FnOnce(&mut Self::Port) -> R>(&self, f: F) -> R {
///         let mut v = self.0.lock().unwrap();
///         f(&mut v)
///     }
///
///     fn into_inner(self) -> T {
///         self.0.into_inner().unwrap()
///     }
/// }
/// ```
pub trait PortMutex {
    /// The driver that is wrapped inside this mutex.
    type Port;

    /// Create a new mutex of this type.
    fn create(v: Self::Port) -> Self;

    /// Lock the mutex and give a closure access to the driver inside.
    fn lock<R, F: FnOnce(&mut Self::Port) -> R>(&self, f: F) -> R;

    /// Consume the mutex and return the driver.
    fn into_inner(self) -> Self::Port;
}

impl<T> PortMutex for core::cell::RefCell<T> {
    type Port = T;

    fn create(v: Self::Port) -> Self {
        core::cell::RefCell::new(v)
    }

    fn lock<R, F: FnOnce(&mut Self::Port) -> R>(&self, f: F) -> R {
        let mut v = self.borrow_mut();
        f(&mut v)
    }

    fn into_inner(self) -> Self::Port {
        core::cell::RefCell::into_inner(self)
    }
}

#[cfg(any(test, feature = "std"))]
impl<T> PortMutex for std::sync::Mutex<T> {
    type Port = T;

    fn create(v: Self::Port) -> Self {
        std::sync::Mutex::new(v)
    }

    fn lock<R, F: FnOnce(&mut Self::Port) -> R>(&self, f: F) -> R {
        // shadows only advance after a completed write, poisoning leaves them consistent
        let mut v = match std::sync::Mutex::lock(self) {
            Ok(v) => v,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut v)
    }

    fn into_inner(self) -> Self::Port {
        match std::sync::Mutex::into_inner(self) {
            Ok(v) => v,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(feature = "critical-section")]
impl<T> PortMutex for critical_section::Mutex<core::cell::RefCell<T>> {
    type Port = T;

    fn create(v: Self::Port) -> Self {
        critical_section::Mutex::new(core::cell::RefCell::new(v))
    }

    fn lock<R, F: FnOnce(&mut Self::Port) -> R>(&self, f: F) -> R {
        critical_section::with(|cs| {
            let mut v = self.borrow_ref_mut(cs);
            f(&mut v)
        })
    }

    fn into_inner(self) -> Self::Port {
        critical_section::Mutex::into_inner(self).into_inner()
    }
}

#[cfg(all(test, feature = "critical-section"))]
mod tests {
    use super::PortMutex;
    use crate::Pca95xx;
    use embedded_hal_mock::eh1::i2c as mock_i2c;

    #[test]
    fn critical_section_mutex() {
        let expectations = [
            mock_i2c::Transaction::write_read(0x20, vec![0x03], vec![0xff]),
            mock_i2c::Transaction::write_read(0x20, vec![0x01], vec![0x00]),
            mock_i2c::Transaction::write(0x20, vec![0x03, 0xfb]),
            mock_i2c::Transaction::write(0x20, vec![0x01, 0x04]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let pca = Pca95xx::new(bus.clone(), 0x20, 8).unwrap();
        let mutex: critical_section::Mutex<core::cell::RefCell<_>> = PortMutex::create(pca);

        mutex.lock(|drv| drv.configure(2, 0)).unwrap();
        mutex.lock(|drv| drv.set_output(2, 1)).unwrap();

        let pca = PortMutex::into_inner(mutex);
        assert_eq!(pca.direction(), 0xfb);
        assert_eq!(pca.output_state(), 0x04);

        bus.done();
    }
}
