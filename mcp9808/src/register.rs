pub const DEFAULT_ADDRESS: u8 = 0x18;

pub const MANUFACTURER_ID: u16 = 0x0054;
pub const DEVICE_ID: u16 = 0x0400;

/// Register pointers
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Register {
	Config = 0x01,
	UpperLimit = 0x02,
	LowerLimit = 0x03,
	CriticalLimit = 0x04,
	Ambient = 0x05,
	ManufacturerId = 0x06,
	DeviceId = 0x07,
	Resolution = 0x08,
}

impl Register {
	pub fn addr(self) -> u8 {
		self as u8
	}
}

// Configuration register
pub(crate) const SHUTDOWN: u16 = 0x0100;
pub(crate) const CRIT_LOCKED: u16 = 0x0080;
pub(crate) const WIN_LOCKED: u16 = 0x0040;
pub(crate) const INT_CLEAR: u16 = 0x0020;
pub(crate) const ALERT_STATUS: u16 = 0x0010;
pub(crate) const ALERT_CONTROL: u16 = 0x0008;
pub(crate) const ALERT_SELECT: u16 = 0x0004;
pub(crate) const ALERT_POLARITY: u16 = 0x0002;
pub(crate) const ALERT_MODE: u16 = 0x0001;

pub(crate) const LOCK_MASK: u16 = CRIT_LOCKED | WIN_LOCKED;
// Bits 9-10
pub(crate) const HYSTERESIS_MASK: u16 = 0x0600;

// Ambient temperature register
pub(crate) const ALERT_CAUSE_MASK: u16 = 0xE000;
pub(crate) const ALERT_CAUSE_SHIFT: u16 = 13;

/// Single-bit fields of the configuration register
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConfigFlag {
	/// Low power mode, conversions stop.
	Shutdown,
	/// Locks the critical limit register. Only a power cycle clears it.
	CriticalLock,
	/// Locks the upper and lower limit registers. Only a power cycle clears it.
	WindowLock,
	InterruptClear,
	AlertStatus,
	AlertControl,
	AlertSelect,
	AlertPolarity,
	AlertMode,
}

impl ConfigFlag {
	pub const ALL: [ConfigFlag; 9] = [
		ConfigFlag::Shutdown,
		ConfigFlag::CriticalLock,
		ConfigFlag::WindowLock,
		ConfigFlag::InterruptClear,
		ConfigFlag::AlertStatus,
		ConfigFlag::AlertControl,
		ConfigFlag::AlertSelect,
		ConfigFlag::AlertPolarity,
		ConfigFlag::AlertMode,
	];

	pub fn mask(self) -> u16 {
		match self {
			ConfigFlag::Shutdown => SHUTDOWN,
			ConfigFlag::CriticalLock => CRIT_LOCKED,
			ConfigFlag::WindowLock => WIN_LOCKED,
			ConfigFlag::InterruptClear => INT_CLEAR,
			ConfigFlag::AlertStatus => ALERT_STATUS,
			ConfigFlag::AlertControl => ALERT_CONTROL,
			ConfigFlag::AlertSelect => ALERT_SELECT,
			ConfigFlag::AlertPolarity => ALERT_POLARITY,
			ConfigFlag::AlertMode => ALERT_MODE,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flags_are_distinct_bits() {
		let mut seen = 0u16;
		for flag in ConfigFlag::ALL.iter() {
			assert_eq!(flag.mask().count_ones(), 1);
			assert_eq!(seen & flag.mask(), 0);
			seen |= flag.mask();
		}
		assert_eq!(seen, 0x01FF);
		assert_eq!(seen & HYSTERESIS_MASK, 0);
	}
}
