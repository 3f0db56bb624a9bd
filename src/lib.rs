//! # VEML6031X00 Driver
//!
//! This is a driver for the Vishay VEML6031X00 (and VEML60311X00) ambient
//! light sensor.
//!
//! The VEML6031X00 has two channels:
//!
//! * An ambient light (ALS) channel, which can be converted to lux
//! * An infrared (IR) channel, which is only a relative reading
//!
//! Every register on the device is 16 bits wide and little-endian. The
//! configuration registers pack several settings into their low byte, so the
//! driver always reads a register back before changing part of it.
//!
//! The [`Veml6031`] object caches the integration time, gain and photodiode
//! size it last wrote, and the lux calculation uses that cache rather than
//! reading the configuration back. The driver must be the only thing writing
//! to the device.
//!
//! # Example
//!
//! You might setup the sensor like this:
//!
//! ```rust
//! # use embedded_hal::blocking::i2c::{Write, WriteRead};
//! # struct I2c;
//! # impl Write for I2c {
//! #     type Error = ();
//! #     fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # impl WriteRead for I2c {
//! #     type Error = ();
//! #     fn write_read(&mut self, address: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
//! #         buffer.fill(0);
//! #         if bytes == [veml6031::registers::ID_L] {
//! #             buffer[0] = veml6031::registers::DEVICE_ID;
//! #         }
//! #         Ok(())
//! #     }
//! # }
//! # let i2c = I2c;
//! let mut sensor = match veml6031::Veml6031::new(i2c, veml6031::BusAddress::Veml6031X00) {
//!     Ok(sensor) => sensor,
//!     Err(_e) => {
//!         // Sensor didn't respond, or isn't a VEML6031X00
//!         panic!("no sensor");
//!     }
//! };
//! sensor.set_integration_time_ms(200).ok();
//! sensor.set_gain(veml6031::Gain::X2).ok();
//! sensor.set_ambient_high_threshold(2000).ok();
//! sensor.set_ambient_low_threshold(500).ok();
//! sensor.set_interrupt_persistence(veml6031::Persistence::Four).ok();
//! sensor.enable_interrupt().ok();
//! if let Ok(_lux) = sensor.read_lux() {
//!     // Use the reading
//! }
//! match sensor.read_and_clear_interrupt_status() {
//!     Ok(veml6031::InterruptStatus::High) => { /* Too bright */ }
//!     Ok(veml6031::InterruptStatus::Low) => { /* Too dark */ }
//!     _ => {}
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod calibration;
pub mod registers;

use embedded_hal::blocking::i2c::{Write, WriteRead};

pub use calibration::CalibrationError;
pub use registers::{Gain, IntegrationTime, Persistence, PhotodiodeSize};

use registers::Field;

//
// Public Types
//

/// The VEML6031 family has a fixed I²C address per part number.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BusAddress {
    /// The address of the VEML6031X00
    Veml6031X00 = 0x29,
    /// The address of the VEML60311X00
    Veml60311X00 = 0x10,
}

/// The logical operation that was in progress when the bus failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// Reading the device ID
    ReadDeviceId,
    /// Powering up the ALS and IR channels
    PowerOn,
    /// Shutting down the ALS and IR channels
    Shutdown,
    /// Setting the integration time
    SetIntegrationTime,
    /// Setting the high threshold window
    SetHighThreshold,
    /// Setting the low threshold window
    SetLowThreshold,
    /// Setting the gain
    SetGain,
    /// Setting the photodiode size
    SetPhotodiodeSize,
    /// Setting the interrupt persistence
    SetPersistence,
    /// Enabling or disabling the interrupt
    SetInterruptEnable,
    /// Enabling or disabling active force mode
    SetActiveForceMode,
    /// Triggering a single measurement
    TriggerMeasurement,
    /// Reading the ambient light data
    ReadAmbient,
    /// Reading the IR data
    ReadIr,
    /// Reading (and so clearing) the interrupt status
    ReadInterruptStatus,
}

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus failed during the given operation
    Bus(Operation, E),
    /// The device ID register didn't contain [`registers::DEVICE_ID`] (contains
    /// the actual value read)
    InvalidDevice(u8),
    /// The bus address isn't a usable 7-bit I²C address
    UninitializedHandle,
    /// The cached configuration has no entry in the lux table
    Calibration(CalibrationError),
}

/// Which threshold, if any, latched the interrupt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptStatus {
    /// No threshold event since the last read
    None,
    /// The reading went above the high threshold
    High,
    /// The reading went below the low threshold
    Low,
}

/// Represents the state inside our VEML6031X00 chip.
pub struct Veml6031<I2C> {
    i2c: I2C,
    bus_address: u8,
    cache: ConfigCache,
}

//
// Private Types
//

/// The raw codes last written to the fields the lux table is indexed by.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
struct ConfigCache {
    integration_time: u8,
    photodiode_size: u8,
    gain: u8,
}

//
// Private Data
//

/// The integration time set up by [`Veml6031::new`], in milliseconds
const DEFAULT_INTEGRATION_TIME_MS: u16 = 100;

//
// impls on Public Types
//

impl From<BusAddress> for u8 {
    fn from(addr: BusAddress) -> u8 {
        addr as u8
    }
}

impl<E> From<CalibrationError> for Error<E> {
    fn from(error: CalibrationError) -> Self {
        Error::Calibration(error)
    }
}

impl InterruptStatus {
    /// Decode the low byte of the ALS_INT register.
    ///
    /// If both flags are set, the high threshold is reported.
    pub const fn from_bits(bits: u8) -> InterruptStatus {
        if bits & registers::ALS_IF_H != 0 {
            InterruptStatus::High
        } else if bits & registers::ALS_IF_L != 0 {
            InterruptStatus::Low
        } else {
            InterruptStatus::None
        }
    }
}

impl<I2C, E> Veml6031<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Connect to a VEML6031X00 and set it up with default settings.
    ///
    /// This checks the device ID, powers the sensor on, enables calibration,
    /// selects a 100 ms integration time, x1 gain and the quarter photodiode,
    /// opens the threshold window as wide as it goes and clears any pending
    /// interrupt.
    ///
    /// If any step fails, the error is returned and the bus is dropped.
    pub fn new<A>(i2c: I2C, bus_address: A) -> Result<Veml6031<I2C>, Error<E>>
    where
        A: Into<u8>,
    {
        let bus_address = bus_address.into();
        if bus_address == 0 || bus_address > 0x7F {
            return Err(Error::UninitializedHandle);
        }
        let mut sensor = Veml6031 {
            i2c,
            bus_address,
            cache: ConfigCache::default(),
        };

        let id = sensor.read_device_id()?;
        if id != registers::DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Unexpected VEML6031 ID 0x{:02x}, wanted 0x{:02x}",
                id,
                registers::DEVICE_ID
            );
            return Err(Error::InvalidDevice(id));
        }

        sensor.init()?;
        Ok(sensor)
    }

    /// Run the start-up sequence from the datasheet
    fn init(&mut self) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Initialising VEML6031 at 0x{:02x}", self.bus_address);
        self.power_on()?;
        // Only needs doing once
        self.set_field(registers::ALS_CAL, registers::ALS_CAL.mask)
            .map_err(|e| Error::Bus(Operation::PowerOn, e))?;
        self.set_integration_time_ms(DEFAULT_INTEGRATION_TIME_MS)?;
        // Nothing can trigger the interrupt until real thresholds are set
        self.set_ambient_high_threshold(u16::MAX)?;
        self.set_ambient_low_threshold(u16::MIN)?;
        self.set_gain(Gain::X1)?;
        self.set_photodiode_size(PhotodiodeSize::Quarter)?;
        // Clear anything latched before we got here
        self.read_and_clear_interrupt_status()?;
        Ok(())
    }

    /// Consume the driver and return the I²C bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read the low byte of the device ID register.
    ///
    /// Should be [`registers::DEVICE_ID`].
    pub fn read_device_id(&mut self) -> Result<u8, Error<E>> {
        self.read_lower(registers::ID_L)
            .map_err(|e| Error::Bus(Operation::ReadDeviceId, e))
    }

    /// Power on the bandgap, the LDO and the ALS and IR channels.
    pub fn power_on(&mut self) -> Result<(), Error<E>> {
        self.set_field(registers::SD, 0)
            .and_then(|_| self.set_field(registers::ALS_IR_SD, 0))
            .map_err(|e| Error::Bus(Operation::PowerOn, e))
    }

    /// Put the sensor into its low power shutdown state.
    ///
    /// Configuration is kept. Call [`Veml6031::power_on`] to start measuring
    /// again.
    pub fn shutdown(&mut self) -> Result<(), Error<E>> {
        self.set_field(registers::ALS_IR_SD, registers::ALS_IR_SD.mask)
            .and_then(|_| self.set_field(registers::SD, registers::SD.mask))
            .map_err(|e| Error::Bus(Operation::Shutdown, e))
    }

    /// Set the value the ambient light reading must go above to trigger an
    /// interrupt.
    pub fn set_ambient_high_threshold(&mut self, threshold: u16) -> Result<(), Error<E>> {
        self.write_register(registers::ALS_WH_L, threshold)
            .map_err(|e| Error::Bus(Operation::SetHighThreshold, e))
    }

    /// Set the value the ambient light reading must go below to trigger an
    /// interrupt.
    pub fn set_ambient_low_threshold(&mut self, threshold: u16) -> Result<(), Error<E>> {
        self.write_register(registers::ALS_WL_L, threshold)
            .map_err(|e| Error::Bus(Operation::SetLowThreshold, e))
    }

    /// Set the integration time, in milliseconds.
    ///
    /// The device only supports eight integration times, so the value is
    /// rounded down to the nearest one. See [`IntegrationTime::from_millis`].
    pub fn set_integration_time_ms(&mut self, ms: u16) -> Result<(), Error<E>> {
        self.set_integration_time(IntegrationTime::from_millis(ms))
    }

    /// Set the integration time.
    pub fn set_integration_time(
        &mut self,
        integration_time: IntegrationTime,
    ) -> Result<(), Error<E>> {
        let code = integration_time.into();
        self.set_field(registers::ALS_IT, code)
            .map_err(|e| Error::Bus(Operation::SetIntegrationTime, e))?;
        self.cache.integration_time = code;
        Ok(())
    }

    /// Get the integration time last set through this driver.
    pub fn integration_time(&self) -> IntegrationTime {
        IntegrationTime::from_bits(self.cache.integration_time)
    }

    /// Set the gain.
    pub fn set_gain(&mut self, gain: Gain) -> Result<(), Error<E>> {
        let code = gain.into();
        self.set_field(registers::ALS_GAIN, code)
            .map_err(|e| Error::Bus(Operation::SetGain, e))?;
        self.cache.gain = code;
        Ok(())
    }

    /// Get the gain last set through this driver.
    pub fn gain(&self) -> Gain {
        Gain::from_bits(self.cache.gain)
    }

    /// Set the effective photodiode size.
    pub fn set_photodiode_size(&mut self, size: PhotodiodeSize) -> Result<(), Error<E>> {
        let code = size.into();
        self.set_field(registers::PD_DIV4, code)
            .map_err(|e| Error::Bus(Operation::SetPhotodiodeSize, e))?;
        self.cache.photodiode_size = code;
        Ok(())
    }

    /// Get the photodiode size last set through this driver.
    pub fn photodiode_size(&self) -> PhotodiodeSize {
        PhotodiodeSize::from_bits(self.cache.photodiode_size)
    }

    /// Read the ambient light count.
    ///
    /// 0 is dark. What 65535 means depends on the integration time, gain and
    /// photodiode size.
    pub fn read_ambient(&mut self) -> Result<u16, Error<E>> {
        self.read_register(registers::ALS_DATA_L)
            .map_err(|e| Error::Bus(Operation::ReadAmbient, e))
    }

    /// Read the infrared count. Higher means more IR.
    pub fn read_ir(&mut self) -> Result<u16, Error<E>> {
        self.read_register(registers::IR_DATA_L)
            .map_err(|e| Error::Bus(Operation::ReadIr, e))
    }

    /// Read the ambient light level in lux.
    ///
    /// The count is scaled by the datasheet resolution for the cached
    /// integration time, photodiode size and gain.
    pub fn read_lux(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_ambient()?;
        let lux = calibration::raw_to_lux(
            raw,
            self.cache.integration_time,
            self.cache.photodiode_size,
            self.cache.gain,
        )?;
        Ok(lux)
    }

    /// Enable the interrupt.
    ///
    /// The INT pin idles high and goes low when a threshold is crossed. It
    /// stays low until [`Veml6031::read_and_clear_interrupt_status`] is called.
    pub fn enable_interrupt(&mut self) -> Result<(), Error<E>> {
        self.set_field(registers::ALS_INT_EN, registers::ALS_INT_EN.mask)
            .map_err(|e| Error::Bus(Operation::SetInterruptEnable, e))
    }

    /// Disable the interrupt.
    pub fn disable_interrupt(&mut self) -> Result<(), Error<E>> {
        self.set_field(registers::ALS_INT_EN, 0)
            .map_err(|e| Error::Bus(Operation::SetInterruptEnable, e))
    }

    /// Set how many consecutive readings outside the threshold window are
    /// needed to trigger the interrupt.
    pub fn set_interrupt_persistence(&mut self, persistence: Persistence) -> Result<(), Error<E>> {
        self.set_field(registers::ALS_PERS, persistence.into())
            .map_err(|e| Error::Bus(Operation::SetPersistence, e))
    }

    /// Read the interrupt status.
    ///
    /// Reading the status clears it on the device, so each event is only
    /// reported once.
    pub fn read_and_clear_interrupt_status(&mut self) -> Result<InterruptStatus, Error<E>> {
        let bits = self
            .read_lower(registers::ALS_INT)
            .map_err(|e| Error::Bus(Operation::ReadInterruptStatus, e))?;
        Ok(InterruptStatus::from_bits(bits))
    }

    /// Switch between auto mode (`false`), where the sensor measures
    /// continuously, and active force mode (`true`), where it measures once
    /// per [`Veml6031::trigger_measurement`].
    pub fn set_active_force_mode(&mut self, enabled: bool) -> Result<(), Error<E>> {
        let code = if enabled { registers::ALS_AF.mask } else { 0 };
        self.set_field(registers::ALS_AF, code)
            .map_err(|e| Error::Bus(Operation::SetActiveForceMode, e))
    }

    /// Start a single measurement in active force mode.
    ///
    /// The device clears the trigger bit once the measurement is done.
    pub fn trigger_measurement(&mut self) -> Result<(), Error<E>> {
        self.set_field(registers::ALS_TRIG, registers::ALS_TRIG.mask)
            .map_err(|e| Error::Bus(Operation::TriggerMeasurement, e))
    }

    /// Change one field of a configuration register, leaving the rest of the
    /// register alone.
    fn set_field(&mut self, field: Field, code: u8) -> Result<(), E> {
        let current = self.read_lower(field.register)?;
        self.write_lower(field.register, field.apply(current, code))
    }

    /// Read a whole 16-bit register
    fn read_register(&mut self, register: u8) -> Result<u16, E> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.bus_address, &[register], &mut buffer)?;
        Ok(u16::from_le_bytes(buffer))
    }

    /// Read the low byte of a register
    fn read_lower(&mut self, register: u8) -> Result<u8, E> {
        let [low, _high] = self.read_register(register)?.to_le_bytes();
        Ok(low)
    }

    /// Write a whole 16-bit register
    fn write_register(&mut self, register: u8, value: u16) -> Result<(), E> {
        let [low, high] = value.to_le_bytes();
        #[cfg(feature = "defmt")]
        defmt::debug!("Setting VEML6031 0x{:02x} to 0x{:04x}", register, value);
        self.i2c.write(self.bus_address, &[register, low, high])
    }

    /// Write the low byte of a register, keeping whatever is in the high byte
    fn write_lower(&mut self, register: u8, low: u8) -> Result<(), E> {
        let [_low, high] = self.read_register(register)?.to_le_bytes();
        self.write_register(register, u16::from_le_bytes([low, high]))
    }
}

//
// impls on Private Types
//

// None


//
// End of file
//
