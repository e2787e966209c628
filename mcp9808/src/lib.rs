//! MCP9808 digital temperature sensor driver
//!
//! Every operation is a blocking read, transform and write of device registers through a
//! [`Transport`]. Read-modify-write sequences are not atomic: callers sharing one device between
//! threads must serialize access themselves.

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

use std::convert::TryFrom;
use std::fmt;

mod register;
mod settings;
mod temperature;
mod transport;

pub use register::{ConfigFlag, Register, DEFAULT_ADDRESS, DEVICE_ID, MANUFACTURER_ID};
pub use settings::{Hysteresis, Limit, Resolution};
pub use temperature::{decode, encode, AlertCause, RegisterKind};
pub use transport::{reverse_byte_order, I2cTransport, Transport};

use register::{HYSTERESIS_MASK, LOCK_MASK};

#[derive(Debug, PartialEq)]
pub enum Error<E> {
	/// The transport failed, the register may hold an indeterminate value.
	Bus(E),
	InvalidHysteresis(f32),
	InvalidResolution(f32),
	/// The resolution register held a code outside of 0 to 3.
	UnknownResolution(u8),
}

impl<E> From<E> for Error<E> {
	fn from(e: E) -> Self {
		Error::Bus(e)
	}
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::Bus(e) => write!(f, "Bus error: {:?}", e),
			Error::InvalidHysteresis(_) =>
				write!(f, "Temperature Hysteresis is not valid, Valid Values are: 0, +1.5, +3, +6"),
			Error::InvalidResolution(_) =>
				write!(f, "Sensor Resolution is not valid, Valid Values are: 0.5, 0.25, 0.125, 0.0625"),
			Error::UnknownResolution(code) =>
				write!(f, "Unknown resolution register value {:#04X}", code),
		}
	}
}

impl<E: fmt::Debug> std::error::Error for Error<E> {}

pub struct Mcp9808<T> {
	transport: T,
}

impl<T: Transport> Mcp9808<T> {
	pub fn new(transport: T) -> Self {
		Self { transport }
	}

	pub fn release(self) -> T {
		self.transport
	}

	/// Checks the manufacturer and device IDs.
	///
	/// A `false` result means the addressed device is not an MCP9808 and its readings should not
	/// be trusted.
	pub fn begin(&mut self) -> Result<bool, Error<T::Error>> {
		let manufacturer_id = self.read_word(Register::ManufacturerId)?;
		let device_id = self.read_word(Register::DeviceId)?;

		debug!("Read manufacturer ID: {:#06X}", manufacturer_id);
		debug!("Read device ID: {:#06X}", device_id);

		Ok(manufacturer_id == MANUFACTURER_ID && device_id == DEVICE_ID)
	}

	pub fn config(&mut self) -> Result<u16, Error<T::Error>> {
		self.read_word(Register::Config)
	}

	pub fn clear_config(&mut self) -> Result<(), Error<T::Error>> {
		self.write_word_big_endian(Register::Config, 0x0000)
	}

	/// Sets a single bit of the configuration register, leaving the others untouched. Returns the
	/// value written.
	///
	/// Once set, the lock bits can only be cleared by a power cycle.
	pub fn set_flag(&mut self, flag: ConfigFlag) -> Result<u16, Error<T::Error>> {
		let config = self.config()? | flag.mask();
		debug!("Setting {:?} bit: {:#06X}", flag, config);
		self.write_word_big_endian(Register::Config, config)?;
		Ok(config)
	}

	/// Clears a single bit of the configuration register, leaving the others untouched. Returns
	/// the value written.
	pub fn clear_flag(&mut self, flag: ConfigFlag) -> Result<u16, Error<T::Error>> {
		let config = self.config()? & !flag.mask();
		debug!("Clearing {:?} bit: {:#06X}", flag, config);
		self.write_word_big_endian(Register::Config, config)?;
		Ok(config)
	}

	pub fn flag(&mut self, flag: ConfigFlag) -> Result<bool, Error<T::Error>> {
		Ok(self.config()? & flag.mask() != 0)
	}

	/// True if the critical or the window lock is set.
	pub fn is_lock(&mut self) -> Result<bool, Error<T::Error>> {
		Ok(self.config()? & LOCK_MASK != 0)
	}

	/// Accepts 0, 1.5, 3 and 6 °C. Returns the configuration register read back after the write.
	pub fn set_hysteresis(&mut self, celsius: f32) -> Result<u16, Error<T::Error>> {
		let hysteresis = Hysteresis::try_from(celsius).map_err(Error::InvalidHysteresis)?;

		let config = (self.config()? & !HYSTERESIS_MASK) | hysteresis.bits();
		self.write_word_big_endian(Register::Config, config)?;
		debug!("Temperature Hysteresis set: {:#06X}", config);

		self.config()
	}

	pub fn hysteresis(&mut self) -> Result<Hysteresis, Error<T::Error>> {
		Ok(Hysteresis::from_config(self.config()?))
	}

	/// Accepts 0.5, 0.25, 0.125 and 0.0625 °C.
	pub fn set_resolution(&mut self, celsius: f32) -> Result<(), Error<T::Error>> {
		let resolution = Resolution::try_from(celsius).map_err(Error::InvalidResolution)?;

		self.transport.write_byte(Register::Resolution.addr(), resolution.code())?;
		debug!("Resolution set to: {:#04X}", resolution.code());

		Ok(())
	}

	pub fn resolution(&mut self) -> Result<Resolution, Error<T::Error>> {
		let code = self.transport.read_byte(Register::Resolution.addr())?;
		debug!("The Resolution is: {:#04X}", code);

		Resolution::from_code(code).ok_or(Error::UnknownResolution(code))
	}

	/// Writes a limit with a 0.25 °C resolution, truncating any finer fraction. Returns the raw
	/// value written.
	pub fn set_limit(&mut self, limit: Limit, celsius: f32) -> Result<u16, Error<T::Error>> {
		let raw = encode(celsius, RegisterKind::Threshold);
		debug!("Raw temp set in {} temp register: {:#06X}", limit, raw);
		self.write_word_big_endian(limit.register(), raw)?;
		Ok(raw)
	}

	pub fn limit(&mut self, limit: Limit) -> Result<f32, Error<T::Error>> {
		Ok(decode(self.read_word(limit.register())?, RegisterKind::Threshold))
	}

	/// Ambient temperature in degrees Celsius
	pub fn temperature(&mut self) -> Result<f32, Error<T::Error>> {
		let raw = self.read_word(Register::Ambient)?;
		debug!("Raw ambient temp register value: {:#06X}", raw);
		Ok(decode(raw, RegisterKind::Ambient))
	}

	/// Bits 13 to 15 of the ambient temperature register: critical, upper and lower comparator
	/// outputs, most significant first.
	pub fn alert_output(&mut self) -> Result<u8, Error<T::Error>> {
		Ok(self.alert_cause()?.bits())
	}

	pub fn alert_cause(&mut self) -> Result<AlertCause, Error<T::Error>> {
		Ok(AlertCause::from_ambient(self.read_word(Register::Ambient)?))
	}

	fn read_word(&mut self, register: Register) -> Result<u16, Error<T::Error>> {
		Ok(self.transport.read_word_big_endian(register.addr())?)
	}

	/// The device expects the most significant byte first, the transport sends the least
	/// significant byte first.
	fn write_word_big_endian(&mut self, register: Register, value: u16) -> Result<(), Error<T::Error>> {
		self.transport.write_word(register.addr(), reverse_byte_order(value))?;
		Ok(())
	}
}
