use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::register::DEFAULT_ADDRESS;

/// Register access to a single, already addressed device.
///
/// Implementations block until the transaction completes and do not retry.
pub trait Transport {
	type Error;

	fn read_byte(&mut self, register: u8) -> Result<u8, Self::Error>;

	/// Reads two bytes, the first one received being the most significant.
	fn read_word_big_endian(&mut self, register: u8) -> Result<u16, Self::Error>;

	fn write_byte(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;

	/// Writes `value` in the native SMBus order, least significant byte first.
	fn write_word(&mut self, register: u8, value: u16) -> Result<(), Self::Error>;
}

pub fn reverse_byte_order(value: u16) -> u16 {
	value.swap_bytes()
}

/// `Transport` over an `embedded-hal` blocking I2C bus
pub struct I2cTransport<I2C> {
	i2c: I2C,
	address: u8,
}

impl<I2C, E> I2cTransport<I2C>
	where I2C: Write<Error=E> + WriteRead<Error=E> {
	pub fn new(i2c: I2C) -> Self {
		Self::with_address(i2c, DEFAULT_ADDRESS)
	}

	/// The A0-A2 pins select addresses 0x18 to 0x1F.
	pub fn with_address(i2c: I2C, address: u8) -> Self {
		Self { i2c, address }
	}

	pub fn address(&self) -> u8 {
		self.address
	}

	pub fn release(self) -> I2C {
		self.i2c
	}
}

impl<I2C, E> Transport for I2cTransport<I2C>
	where I2C: Write<Error=E> + WriteRead<Error=E> {
	type Error = E;

	fn read_byte(&mut self, register: u8) -> Result<u8, E> {
		let mut buffer = [0u8; 1];
		self.i2c.write_read(self.address, &[register], &mut buffer)?;
		Ok(buffer[0])
	}

	fn read_word_big_endian(&mut self, register: u8) -> Result<u16, E> {
		let mut buffer = [0u8; 2];
		self.i2c.write_read(self.address, &[register], &mut buffer)?;
		Ok(u16::from_be_bytes(buffer))
	}

	fn write_byte(&mut self, register: u8, value: u8) -> Result<(), E> {
		self.i2c.write(self.address, &[register, value])
	}

	fn write_word(&mut self, register: u8, value: u16) -> Result<(), E> {
		let [lsb, msb] = value.to_le_bytes();
		self.i2c.write(self.address, &[register, lsb, msb])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reverse_byte_order_test() {
		assert_eq!(reverse_byte_order(0x01E0), 0xE001);
		assert_eq!(reverse_byte_order(0x00FF), 0xFF00);
		assert_eq!(reverse_byte_order(reverse_byte_order(0x1234)), 0x1234);
	}
}
