use log::LevelFilter;
use mcp9808::{Hysteresis, Resolution};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};

pub const DEFAULT_CONFIG_PATH: &'static str = "thermometer.json";

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct ThermometerConfig {
	pub log_level_filter: String,
	/// Directory of the log file, no log file when absent
	pub log_directory: Option<String>,
	pub bus: u8,
	pub address: u8,
	pub resolution: f32,
	pub hysteresis: f32,
	pub lower_limit: f32,
	pub upper_limit: f32,
	pub critical_limit: f32,
	pub alert_control: bool,
	pub period_ms: u64,
}

pub trait TryIntoLevelFilter {
	fn try_into_level_filter(&self) -> Result<LevelFilter, ()>;
}

impl TryIntoLevelFilter for String {
	fn try_into_level_filter(&self) -> Result<LevelFilter, ()> {
		Ok(match self.as_str() {
			"none" => LevelFilter::Off,
			"error" => LevelFilter::Error,
			"warn" => LevelFilter::Warn,
			"info" => LevelFilter::Info,
			"debug" => LevelFilter::Debug,
			"all" => LevelFilter::Trace,
			_ => return Err(()),
		})
	}
}

impl Default for ThermometerConfig {
	fn default() -> Self {
		ThermometerConfig {
			log_level_filter: String::from("info"),
			log_directory: None,
			bus: 1,
			address: mcp9808::DEFAULT_ADDRESS,
			resolution: Resolution::default().celsius(),
			hysteresis: Hysteresis::default().celsius(),
			lower_limit: 20.,
			upper_limit: 30.,
			critical_limit: 33.,
			alert_control: true,
			period_ms: 1000,
		}
	}
}

impl ThermometerConfig {
	pub fn validate(&self) -> anyhow::Result<()> {
		if !(0x18..=0x1F).contains(&self.address) {
			return Err(anyhow!("Invalid address {:#04X} (expected 0x18 to 0x1F)", self.address));
		}

		Resolution::try_from(self.resolution)
			.map_err(|r| anyhow!("Invalid resolution {} (expected 0.5, 0.25, 0.125 or 0.0625)", r))?;

		Hysteresis::try_from(self.hysteresis)
			.map_err(|h| anyhow!("Invalid hysteresis {} (expected 0, 1.5, 3 or 6)", h))?;

		if self.lower_limit > self.upper_limit {
			return Err(anyhow!("Lower limit {} is above upper limit {}",
							   self.lower_limit, self.upper_limit));
		}

		if self.upper_limit > self.critical_limit {
			return Err(anyhow!("Upper limit {} is above critical limit {}",
							   self.upper_limit, self.critical_limit));
		}

		if self.period_ms == 0 {
			return Err(anyhow!("Polling period must be positive"));
		}

		Ok(())
	}
}

pub fn read(path: &str) -> anyhow::Result<ThermometerConfig> {
	let config_file = File::open(path)?;

	let config: ThermometerConfig = serde_json::from_reader(config_file)?;
	config.validate()?;

	Ok(config)
}

/// Returns the default configuration, and `false`, when there is no file at `path`.
pub fn read_or_default(path: &str) -> anyhow::Result<(ThermometerConfig, bool)> {
	match File::open(path) {
		Err(e) if e.kind() == ErrorKind::NotFound => Ok((ThermometerConfig::default(), false)),
		_ => Ok((read(path)?, true)),
	}
}

pub fn save(path: &str, config: &ThermometerConfig) -> anyhow::Result<()> {
	let mut config_file = OpenOptions::new()
		.create(true)
		.write(true)
		.truncate(true)
		.open(path)?;

	write!(config_file, "{}", serde_json::to_string_pretty(config)?)?;

	Ok(())
}
