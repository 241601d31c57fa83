use crate::{mode, Direction, Error, Pca95xx, PortMutex, Transport};
use core::marker::PhantomData;
use embedded_hal::digital as hal_digital;

/// A [`Pca95xx`] behind a [`PortMutex`], handing out individual [`Pin`] objects.
pub struct SharedPca95xx<M>(M);

impl<B: Transport> SharedPca95xx<core::cell::RefCell<Pca95xx<B>>> {
    pub fn new(driver: Pca95xx<B>) -> Self {
        Self::with_mutex(driver)
    }
}

impl<B, M> SharedPca95xx<M>
where
    B: Transport,
    M: PortMutex<Port = Pca95xx<B>>,
{
    pub fn with_mutex(driver: Pca95xx<B>) -> Self {
        Self(PortMutex::create(driver))
    }

    /// Get a handle for pin `index`.
    ///
    /// The handle does not change the pin's direction until `into_input()` or `into_output()`
    /// is called.
    pub fn pin(&self, index: u8) -> Result<Pin<'_, mode::Unconfigured, M>, Error<B::Error>> {
        self.0.lock(|drv| drv.pin_direction(index))?;
        Ok(Pin::new(index, &self.0))
    }

    /// Run `f` with exclusive access to the driver.
    pub fn lock<R, F: FnOnce(&mut Pca95xx<B>) -> R>(&self, f: F) -> R {
        self.0.lock(f)
    }

    pub fn into_inner(self) -> Pca95xx<B> {
        self.0.into_inner()
    }
}

/// Representation of a single expander pin.
///
/// `Pin` is not constructed directly, it is obtained from [`SharedPca95xx::pin()`].  Every
/// operation locks the shared driver for the duration of its read-modify-write.
pub struct Pin<'a, MODE, MUTEX> {
    pin: u8,
    port_driver: &'a MUTEX,
    _m: PhantomData<MODE>,
}

impl<'a, MODE, MUTEX, B> Pin<'a, MODE, MUTEX>
where
    B: Transport,
    MUTEX: PortMutex<Port = Pca95xx<B>>,
{
    pub(crate) fn new(pin: u8, port_driver: &'a MUTEX) -> Self {
        Self {
            pin,
            port_driver,
            _m: PhantomData,
        }
    }

    pub fn pin_number(&self) -> u8 {
        self.pin
    }

    pub fn into_input(self) -> Result<Pin<'a, mode::Input, MUTEX>, Error<B::Error>> {
        self.port_driver
            .lock(|drv| drv.configure(self.pin, Direction::Input.into()))?;
        Ok(Pin::new(self.pin, self.port_driver))
    }

    pub fn into_output(self) -> Result<Pin<'a, mode::Output, MUTEX>, Error<B::Error>> {
        self.port_driver
            .lock(|drv| drv.configure(self.pin, Direction::Output.into()))?;
        Ok(Pin::new(self.pin, self.port_driver))
    }

    /// Turn on hardware polarity inversion for this pin.
    pub fn into_inverted(mut self) -> Result<Self, Error<B::Error>> {
        self.set_inverted(true)?;
        Ok(self)
    }

    /// Enable or disable hardware polarity inversion for this pin.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<B::Error>> {
        self.port_driver
            .lock(|drv| drv.set_polarity(self.pin, inverted as u8))?;
        Ok(())
    }
}

impl<'a, MODE: mode::HasInput, MUTEX, B> Pin<'a, MODE, MUTEX>
where
    B: Transport,
    MUTEX: PortMutex<Port = Pca95xx<B>>,
{
    pub fn is_high(&self) -> Result<bool, Error<B::Error>> {
        self.port_driver
            .lock(|drv| drv.read_input(self.pin))
            .map(|v| v != 0)
    }

    pub fn is_low(&self) -> Result<bool, Error<B::Error>> {
        self.is_high().map(|b| !b)
    }
}

impl<'a, MODE: mode::HasOutput, MUTEX, B> Pin<'a, MODE, MUTEX>
where
    B: Transport,
    MUTEX: PortMutex<Port = Pca95xx<B>>,
{
    pub fn set_high(&mut self) -> Result<(), Error<B::Error>> {
        self.port_driver.lock(|drv| drv.set_output(self.pin, 1))?;
        Ok(())
    }

    pub fn set_low(&mut self) -> Result<(), Error<B::Error>> {
        self.port_driver.lock(|drv| drv.set_output(self.pin, 0))?;
        Ok(())
    }

    pub fn is_set_high(&self) -> Result<bool, Error<B::Error>> {
        Ok(self
            .port_driver
            .lock(|drv| drv.output_state() & (1 << self.pin) != 0))
    }

    pub fn is_set_low(&self) -> Result<bool, Error<B::Error>> {
        self.is_set_high().map(|b| !b)
    }

    pub fn toggle(&mut self) -> Result<(), Error<B::Error>> {
        self.port_driver.lock(|drv| {
            let high = drv.output_state() & (1 << self.pin) != 0;
            drv.set_output(self.pin, (!high) as u8)
        })?;
        Ok(())
    }
}

impl<'a, MODE, MUTEX, B> hal_digital::ErrorType for Pin<'a, MODE, MUTEX>
where
    B: Transport,
    B::Error: core::fmt::Debug,
    MUTEX: PortMutex<Port = Pca95xx<B>>,
{
    type Error = Error<B::Error>;
}

impl<'a, MODE: mode::HasInput, MUTEX, B> hal_digital::InputPin for Pin<'a, MODE, MUTEX>
where
    B: Transport,
    B::Error: core::fmt::Debug,
    MUTEX: PortMutex<Port = Pca95xx<B>>,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_high(self)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_low(self)
    }
}

impl<'a, MODE: mode::HasOutput, MUTEX, B> hal_digital::OutputPin for Pin<'a, MODE, MUTEX>
where
    B: Transport,
    B::Error: core::fmt::Debug,
    MUTEX: PortMutex<Port = Pca95xx<B>>,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Pin::set_low(self)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Pin::set_high(self)
    }
}

impl<'a, MODE: mode::HasOutput, MUTEX, B> hal_digital::StatefulOutputPin for Pin<'a, MODE, MUTEX>
where
    B: Transport,
    B::Error: core::fmt::Debug,
    MUTEX: PortMutex<Port = Pca95xx<B>>,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_high(self)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_low(self)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Pin::toggle(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Direction, Error, Pca95xx, SharedPca95xx};
    use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
    use embedded_hal_mock::eh1::i2c as mock_i2c;

    #[test]
    fn pins_share_one_driver() {
        let expectations = [
            mock_i2c::Transaction::write_read(0x24, vec![0x03], vec![0xff]),
            mock_i2c::Transaction::write_read(0x24, vec![0x01], vec![0xff]),
            // io0 into output
            mock_i2c::Transaction::write(0x24, vec![0x03, 0xfe]),
            // io7 into input
            mock_i2c::Transaction::write(0x24, vec![0x03, 0xfe]),
            // io0 writes
            mock_i2c::Transaction::write(0x24, vec![0x01, 0xfe]),
            mock_i2c::Transaction::write(0x24, vec![0x01, 0xff]),
            mock_i2c::Transaction::write(0x24, vec![0x01, 0xfe]),
            // io7 reads
            mock_i2c::Transaction::write_read(0x24, vec![0x00], vec![0x80]),
            mock_i2c::Transaction::write_read(0x24, vec![0x00], vec![0x7f]),
            // io7 polarity
            mock_i2c::Transaction::write_read(0x24, vec![0x02], vec![0x00]),
            mock_i2c::Transaction::write(0x24, vec![0x02, 0x80]),
            mock_i2c::Transaction::write_read(0x24, vec![0x02], vec![0x80]),
            mock_i2c::Transaction::write(0x24, vec![0x02, 0x00]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let pca = Pca95xx::new(bus.clone(), 0x24, 8).unwrap();
        let shared = SharedPca95xx::new(pca);

        let mut io0 = shared.pin(0).unwrap().into_output().unwrap();
        let mut io7 = shared.pin(7).unwrap().into_input().unwrap();

        OutputPin::set_low(&mut io0).unwrap();
        assert!(StatefulOutputPin::is_set_low(&mut io0).unwrap());
        io0.set_high().unwrap();
        io0.toggle().unwrap();
        assert!(!io0.is_set_high().unwrap());

        assert!(InputPin::is_high(&mut io7).unwrap());
        assert!(io7.is_low().unwrap());

        let mut io7 = io7.into_inverted().unwrap();
        io7.set_inverted(false).unwrap();

        assert_eq!(
            shared.lock(|drv| drv.pin_direction(7)).unwrap(),
            Direction::Input
        );

        bus.done();
    }

    #[test]
    fn pin_out_of_range() {
        let expectations = [
            mock_i2c::Transaction::write_read(0x20, vec![0x03], vec![0xff]),
            mock_i2c::Transaction::write_read(0x20, vec![0x01], vec![0x00]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let shared = SharedPca95xx::new(Pca95xx::new(bus.clone(), 0x20, 4).unwrap());
        assert!(matches!(
            shared.pin(4),
            Err(Error::PinOutOfRange {
                pin: 4,
                pin_count: 4
            })
        ));

        bus.done();
    }

    #[test]
    fn std_mutex() {
        let expectations = [
            mock_i2c::Transaction::write_read(0x20, vec![0x06], vec![0xff, 0xff]),
            mock_i2c::Transaction::write_read(0x20, vec![0x02], vec![0x00, 0x00]),
            mock_i2c::Transaction::write(0x20, vec![0x06, 0xff, 0x7f]),
            mock_i2c::Transaction::write(0x20, vec![0x02, 0x00, 0x80]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let pca = Pca95xx::new(bus.clone(), 0x20, 16).unwrap();
        let shared: SharedPca95xx<std::sync::Mutex<_>> = SharedPca95xx::with_mutex(pca);

        let mut io15 = shared.pin(15).unwrap().into_output().unwrap();
        io15.set_high().unwrap();
        drop(io15);

        let pca = shared.into_inner();
        assert_eq!(pca.output_state(), 0x8000);

        bus.done();
    }
}
