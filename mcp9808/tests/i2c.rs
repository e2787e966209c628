use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use embedded_hal_mock::MockError;
use std::io::ErrorKind;

use mcp9808::{ConfigFlag, Error, I2cTransport, Limit, Mcp9808, Transport, DEFAULT_ADDRESS};

const ADDRESS: u8 = DEFAULT_ADDRESS;

fn sensor(i2c: &I2cMock) -> Mcp9808<I2cTransport<I2cMock>> {
	Mcp9808::new(I2cTransport::new(i2c.clone()))
}

#[test]
fn transport_wire_order_test() {
	let expectations = [
		I2cTransaction::write_read(0x1A, vec![0x05], vec![0xC1, 0x90]),
		I2cTransaction::write_read(0x1A, vec![0x08], vec![0x03]),
		I2cTransaction::write(0x1A, vec![0x01, 0x34, 0x12]),
		I2cTransaction::write(0x1A, vec![0x08, 0x02]),
	];
	let mut i2c = I2cMock::new(&expectations);
	let mut transport = I2cTransport::with_address(i2c.clone(), 0x1A);

	assert_eq!(transport.address(), 0x1A);
	assert_eq!(transport.read_word_big_endian(0x05).unwrap(), 0xC190);
	assert_eq!(transport.read_byte(0x08).unwrap(), 0x03);
	transport.write_word(0x01, 0x1234).unwrap();
	transport.write_byte(0x08, 0x02).unwrap();

	i2c.done();
}

#[test]
fn begin_test() {
	let expectations = [
		I2cTransaction::write_read(ADDRESS, vec![0x06], vec![0x00, 0x54]),
		I2cTransaction::write_read(ADDRESS, vec![0x07], vec![0x04, 0x00]),
	];
	let mut i2c = I2cMock::new(&expectations);

	assert_eq!(sensor(&i2c).begin().unwrap(), true);
	i2c.done();
}

#[test]
fn limits_are_sent_msb_first_test() {
	let expectations = [
		I2cTransaction::write(ADDRESS, vec![0x03, 0x01, 0x40]),
		I2cTransaction::write(ADDRESS, vec![0x02, 0x01, 0xE0]),
		I2cTransaction::write(ADDRESS, vec![0x04, 0x02, 0x10]),
	];
	let mut i2c = I2cMock::new(&expectations);
	let mut mcp9808 = sensor(&i2c);

	mcp9808.set_limit(Limit::Lower, 20.).unwrap();
	mcp9808.set_limit(Limit::Upper, 30.).unwrap();
	mcp9808.set_limit(Limit::Critical, 33.).unwrap();

	i2c.done();
}

#[test]
fn config_read_modify_write_test() {
	let expectations = [
		I2cTransaction::write_read(ADDRESS, vec![0x01], vec![0x00, 0x00]),
		I2cTransaction::write(ADDRESS, vec![0x01, 0x00, 0x08]),
		I2cTransaction::write_read(ADDRESS, vec![0x01], vec![0x06, 0x08]),
		I2cTransaction::write(ADDRESS, vec![0x01, 0x07, 0x08]),
		I2cTransaction::write_read(ADDRESS, vec![0x01], vec![0x07, 0x08]),
		I2cTransaction::write(ADDRESS, vec![0x01, 0x05, 0x08]),
		I2cTransaction::write_read(ADDRESS, vec![0x01], vec![0x05, 0x08]),
	];
	let mut i2c = I2cMock::new(&expectations);
	let mut mcp9808 = sensor(&i2c);

	assert_eq!(mcp9808.set_flag(ConfigFlag::AlertControl).unwrap(), 0x0008);
	assert_eq!(mcp9808.set_flag(ConfigFlag::Shutdown).unwrap(), 0x0708);
	assert_eq!(mcp9808.set_hysteresis(3.).unwrap(), 0x0508);

	i2c.done();
}

#[test]
fn ambient_temperature_test() {
	let expectations = [
		I2cTransaction::write_read(ADDRESS, vec![0x05], vec![0x01, 0x94]),
		I2cTransaction::write_read(ADDRESS, vec![0x05], vec![0x61, 0x94]),
	];
	let mut i2c = I2cMock::new(&expectations);
	let mut mcp9808 = sensor(&i2c);

	assert!((mcp9808.temperature().unwrap() - 25.25).abs() < 1e-6);
	assert_eq!(mcp9808.alert_output().unwrap(), 0b011);

	i2c.done();
}

#[test]
fn bus_error_is_propagated_test() {
	let expectations = [
		I2cTransaction::write_read(ADDRESS, vec![0x01], vec![0x00, 0x00])
			.with_error(MockError::Io(ErrorKind::Other)),
	];
	let mut i2c = I2cMock::new(&expectations);

	let result = sensor(&i2c).set_flag(ConfigFlag::AlertMode);
	assert!(matches!(result, Err(Error::Bus(MockError::Io(ErrorKind::Other)))));

	i2c.done();
}
