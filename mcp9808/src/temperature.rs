//! Conversions between degrees Celsius and the 13 bit sign-magnitude register format
//!
//! ```text
//!  15  14  13  | 12   | 11..8         | 7..4          | 3..0
//!  alert cause | sign | 2^7 .. 2^4 °C | 2^3 .. 2^0 °C | 2^-1 .. 2^-4 °C
//! ```
//!
//! Limit registers only implement quarter degrees, bits 0 and 1 read as zero.

use crate::register::{ALERT_CAUSE_MASK, ALERT_CAUSE_SHIFT};

const SIGN_BIT: u16 = 0x1000;
const INTEGER_MASK: u16 = 0x0F00;
const AMBIENT_FRACTION_MASK: u16 = 0x00FF;
const THRESHOLD_FRACTION_MASK: u16 = 0x00FC;
const AMBIENT_MAGNITUDE_MASK: u16 = 0x0FFF;
const THRESHOLD_MAGNITUDE_MASK: u16 = 0x0FFC;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RegisterKind {
	/// Ambient temperature, 0.0625 °C steps
	Ambient,
	/// Upper, lower and critical limits, 0.25 °C steps
	Threshold,
}

impl RegisterKind {
	fn fraction_mask(self) -> u16 {
		match self {
			RegisterKind::Ambient => AMBIENT_FRACTION_MASK,
			RegisterKind::Threshold => THRESHOLD_FRACTION_MASK,
		}
	}
}

/// Converts a raw register value (MSB first, as read) to degrees Celsius.
///
/// Alert and reserved bits are ignored, every input decodes.
pub fn decode(raw: u16, kind: RegisterKind) -> f32 {
	let upper = (raw & INTEGER_MASK) >> 8;
	let lower = raw & kind.fraction_mask();

	let magnitude = (upper * 16) as f32 + lower as f32 / 16.;

	if raw & SIGN_BIT != 0 && magnitude != 0. {
		-magnitude
	} else {
		magnitude
	}
}

/// Converts degrees Celsius to a raw register value, before any byte swapping.
///
/// The fractional part is truncated toward zero to the register step: 25.99 °C is stored as
/// 25.75 °C in a limit register. Magnitudes of 256 °C and above wrap like the hardware would.
pub fn encode(celsius: f32, kind: RegisterKind) -> u16 {
	let magnitude = celsius.abs();
	let integer = magnitude.trunc() as u32;
	let fractional = magnitude.fract();

	let raw: u32 = match kind {
		RegisterKind::Ambient => {
			let sixteenths = (fractional * 16.) as u32;
			((integer << 4) | sixteenths) & u32::from(AMBIENT_MAGNITUDE_MASK)
		}
		RegisterKind::Threshold => {
			let quarters = (fractional * 4.) as u32;
			((integer << 4) | (quarters << 2)) & u32::from(THRESHOLD_MAGNITUDE_MASK)
		}
	};

	if celsius < 0. {
		raw as u16 | SIGN_BIT
	} else {
		raw as u16
	}
}

/// Comparator flags latched in bits 13 to 15 of the ambient temperature register.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct AlertCause {
	/// T ≥ critical limit
	pub critical: bool,
	/// T > upper limit
	pub upper: bool,
	/// T < lower limit
	pub lower: bool,
}

impl AlertCause {
	/// Builds the cause from the 3 bit code returned by `Mcp9808::alert_output`.
	pub fn from_bits(bits: u8) -> Self {
		Self {
			critical: bits & 0b100 != 0,
			upper: bits & 0b010 != 0,
			lower: bits & 0b001 != 0,
		}
	}

	pub fn from_ambient(raw: u16) -> Self {
		Self::from_bits(((raw & ALERT_CAUSE_MASK) >> ALERT_CAUSE_SHIFT) as u8)
	}

	pub fn bits(self) -> u8 {
		(self.critical as u8) << 2 | (self.upper as u8) << 1 | self.lower as u8
	}

	pub fn any(self) -> bool {
		self.bits() != 0
	}
}
