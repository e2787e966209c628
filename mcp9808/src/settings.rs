use std::convert::TryFrom;
use std::fmt;
use std::time::Duration;

use crate::register::{Register, HYSTERESIS_MASK};

/// Conversion step of the ambient temperature register
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Resolution {
	/// 0.5 °C
	Half,
	/// 0.25 °C
	Quarter,
	/// 0.125 °C
	Eighth,
	/// 0.0625 °C, power-up default
	Sixteenth,
}

impl Resolution {
	pub fn code(self) -> u8 {
		match self {
			Resolution::Half => 0x00,
			Resolution::Quarter => 0x01,
			Resolution::Eighth => 0x02,
			Resolution::Sixteenth => 0x03,
		}
	}

	pub fn from_code(code: u8) -> Option<Self> {
		match code {
			0x00 => Some(Resolution::Half),
			0x01 => Some(Resolution::Quarter),
			0x02 => Some(Resolution::Eighth),
			0x03 => Some(Resolution::Sixteenth),
			_ => None,
		}
	}

	pub fn celsius(self) -> f32 {
		match self {
			Resolution::Half => 0.5,
			Resolution::Quarter => 0.25,
			Resolution::Eighth => 0.125,
			Resolution::Sixteenth => 0.0625,
		}
	}

	/// Typical conversion time (datasheet, table 1-1)
	pub fn conversion_time(self) -> Duration {
		match self {
			Resolution::Half => Duration::from_millis(30),
			Resolution::Quarter => Duration::from_millis(65),
			Resolution::Eighth => Duration::from_millis(130),
			Resolution::Sixteenth => Duration::from_millis(250),
		}
	}
}

impl Default for Resolution {
	fn default() -> Self {
		Resolution::Sixteenth
	}
}

impl TryFrom<f32> for Resolution {
	type Error = f32;

	fn try_from(celsius: f32) -> Result<Self, Self::Error> {
		[Resolution::Half, Resolution::Quarter, Resolution::Eighth, Resolution::Sixteenth]
			.iter()
			.copied()
			.find(|resolution| resolution.celsius() == celsius)
			.ok_or(celsius)
	}
}

impl fmt::Display for Resolution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Resolution is set to {} Degrees Celsius", self.celsius())
	}
}

/// Hysteresis applied to the limit comparators, bits 9 and 10 of the configuration register
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Hysteresis {
	/// 0 °C, power-up default
	Zero,
	/// +1.5 °C
	OneAndHalf,
	/// +3 °C
	Three,
	/// +6 °C
	Six,
}

impl Hysteresis {
	/// Field value, already shifted to its position in the configuration register
	pub fn bits(self) -> u16 {
		match self {
			Hysteresis::Zero => 0x0000,
			Hysteresis::OneAndHalf => 0x0200,
			Hysteresis::Three => 0x0400,
			Hysteresis::Six => 0x0600,
		}
	}

	pub fn from_config(config: u16) -> Self {
		match config & HYSTERESIS_MASK {
			0x0000 => Hysteresis::Zero,
			0x0200 => Hysteresis::OneAndHalf,
			0x0400 => Hysteresis::Three,
			_ => Hysteresis::Six,
		}
	}

	pub fn celsius(self) -> f32 {
		match self {
			Hysteresis::Zero => 0.,
			Hysteresis::OneAndHalf => 1.5,
			Hysteresis::Three => 3.,
			Hysteresis::Six => 6.,
		}
	}
}

impl Default for Hysteresis {
	fn default() -> Self {
		Hysteresis::Zero
	}
}

impl TryFrom<f32> for Hysteresis {
	type Error = f32;

	fn try_from(celsius: f32) -> Result<Self, Self::Error> {
		[Hysteresis::Zero, Hysteresis::OneAndHalf, Hysteresis::Three, Hysteresis::Six]
			.iter()
			.copied()
			.find(|hysteresis| hysteresis.celsius() == celsius)
			.ok_or(celsius)
	}
}

/// Alert limit registers
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Limit {
	Upper,
	Lower,
	Critical,
}

impl Limit {
	pub fn register(self) -> Register {
		match self {
			Limit::Upper => Register::UpperLimit,
			Limit::Lower => Register::LowerLimit,
			Limit::Critical => Register::CriticalLimit,
		}
	}
}

impl fmt::Display for Limit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Limit::Upper => write!(f, "upper"),
			Limit::Lower => write!(f, "lower"),
			Limit::Critical => write!(f, "critical"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolution_codes_test() {
		for code in 0..4 {
			assert_eq!(Resolution::from_code(code).map(Resolution::code), Some(code));
		}
		assert_eq!(Resolution::from_code(0x04), None);
		assert_eq!(Resolution::from_code(0xFF), None);
	}

	#[test]
	fn resolution_from_celsius_test() {
		assert_eq!(Resolution::try_from(0.5), Ok(Resolution::Half));
		assert_eq!(Resolution::try_from(0.0625), Ok(Resolution::Sixteenth));
		assert_eq!(Resolution::try_from(0.1), Err(0.1));
	}

	#[test]
	fn resolution_description_test() {
		assert_eq!(Resolution::Sixteenth.to_string(), "Resolution is set to 0.0625 Degrees Celsius");
		assert_eq!(Resolution::Half.to_string(), "Resolution is set to 0.5 Degrees Celsius");
	}

	#[test]
	fn conversion_time_test() {
		assert_eq!(Resolution::Half.conversion_time(), Duration::from_millis(30));
		assert_eq!(Resolution::Quarter.conversion_time(), Duration::from_millis(65));
		assert_eq!(Resolution::Eighth.conversion_time(), Duration::from_millis(130));
		assert_eq!(Resolution::Sixteenth.conversion_time(), Duration::from_millis(250));
	}

	#[test]
	fn defaults_test() {
		assert_eq!(Resolution::default(), Resolution::Sixteenth);
		assert_eq!(Hysteresis::default().celsius(), 0.);
	}

	#[test]
	fn hysteresis_from_celsius_test() {
		assert_eq!(Hysteresis::try_from(0.), Ok(Hysteresis::Zero));
		assert_eq!(Hysteresis::try_from(1.5), Ok(Hysteresis::OneAndHalf));
		assert_eq!(Hysteresis::try_from(3.), Ok(Hysteresis::Three));
		assert_eq!(Hysteresis::try_from(6.), Ok(Hysteresis::Six));
		assert_eq!(Hysteresis::try_from(2.), Err(2.));
	}

	#[test]
	fn hysteresis_config_field_test() {
		assert_eq!(Hysteresis::from_config(0xF9FF), Hysteresis::Zero);
		assert_eq!(Hysteresis::from_config(0x0208), Hysteresis::OneAndHalf);
		assert_eq!(Hysteresis::from_config(0x0400), Hysteresis::Three);
		assert_eq!(Hysteresis::from_config(0xFFFF), Hysteresis::Six);
	}
}
