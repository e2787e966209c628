#[macro_use]
extern crate anyhow;

#[macro_use]
extern crate log;

#[macro_use]
extern crate lazy_static;

mod config;
mod logger;

use crossbeam_channel::{bounded, RecvTimeoutError};
use mcp9808::{ConfigFlag, I2cTransport, Limit, Mcp9808, Resolution};
use rppal::i2c::I2c;
use std::{thread, time::Duration};

use crate::config::{ThermometerConfig, TryIntoLevelFilter};
use crate::logger::LogWriter;

type Sensor = Mcp9808<I2cTransport<I2c>>;

fn main() -> anyhow::Result<()> {
	// Command line arguments
	const CONFIG_ARG: &'static str = "config";
	const SAVE_DEFAULT_ARG: &'static str = "save-default";
	const ONCE_ARG: &'static str = "once";

	let args = clap::App::new("Thermometer")
		.version(env!("CARGO_PKG_VERSION"))
		.author("Vincent Leporcher <vincent.leporcher@telecom-paris.fr>")
		.arg(clap::Arg::new(CONFIG_ARG)
			.long("config")
			.help("JSON configuration file")
			.takes_value(true)
			.default_value(config::DEFAULT_CONFIG_PATH))
		.arg(clap::Arg::new(SAVE_DEFAULT_ARG)
			.long("save-default")
			.help("Write the default configuration file and exit")
			.takes_value(false))
		.arg(clap::Arg::new(ONCE_ARG)
			.long("once")
			.help("Read a single sample and exit")
			.takes_value(false))
		.get_matches();

	let config_path = args.value_of(CONFIG_ARG).unwrap_or(config::DEFAULT_CONFIG_PATH);

	if args.is_present(SAVE_DEFAULT_ARG) {
		config::save(config_path, &ThermometerConfig::default())?;
		println!("Default configuration written to {}", config_path);
		return Ok(());
	}

	// Configuration
	let (config, loaded) = config::read_or_default(config_path)?;

	// Log
	let level_filter = config.log_level_filter
		.try_into_level_filter()
		.map_err(|_| anyhow!("Invalid log level filter \"{}\"", config.log_level_filter))?;

	LogWriter::new(config.log_directory.as_deref())?.spawn(level_filter)?;

	info!("Thermometer {}", env!("CARGO_PKG_VERSION"));

	if !loaded {
		warn!("No configuration file at {}, using defaults", config_path);
	}

	let result = run(&config, args.is_present(ONCE_ARG));

	if let Err(e) = &result {
		error!("{}", e);
	}

	logger::flush();

	result
}

fn run(config: &ThermometerConfig, once: bool) -> anyhow::Result<()> {
	config.validate()?;

	let i2c = I2c::with_bus(config.bus)?;
	let mut sensor = Mcp9808::new(I2cTransport::with_address(i2c, config.address));

	if !sensor.begin()? {
		return Err(anyhow!("No MCP9808 found at address {:#04X} on bus {}", config.address, config.bus));
	}

	let resolution = configure(&mut sensor, config)?;

	// First conversion at the new resolution
	thread::sleep(resolution.conversion_time());

	if once {
		return report(&mut sensor);
	}

	let (stop_sender, stop_receiver) = bounded::<()>(1);

	thread::spawn(move || {
		std::io::stdin().read_line(&mut String::new()).unwrap_or_default();
		stop_sender.send(()).unwrap_or_default();
	});

	info!("Press enter to stop");

	let period = Duration::from_millis(config.period_ms);

	if period < resolution.conversion_time() {
		warn!("Polling period of {:?} is shorter than the {:?} conversion time, samples will repeat",
			  period, resolution.conversion_time());
	}

	loop {
		if let Err(e) = report(&mut sensor) {
			error!("Failed to read sensor: {}", e);
		}

		match stop_receiver.recv_timeout(period) {
			Err(RecvTimeoutError::Timeout) => continue,
			_ => break,
		}
	}

	info!("Stopped");

	Ok(())
}

fn configure(sensor: &mut Sensor, config: &ThermometerConfig) -> anyhow::Result<Resolution> {
	sensor.clear_config()?;
	info!("Config register: {:#06X}", sensor.config()?);
	info!("{}", sensor.resolution()?);

	sensor.set_resolution(config.resolution)?;
	let resolution = sensor.resolution()?;
	info!("{}", resolution);

	sensor.set_hysteresis(config.hysteresis)?;

	if sensor.is_lock()? {
		warn!("Limit registers are locked until the next power cycle");
	}

	sensor.set_limit(Limit::Lower, config.lower_limit)?;
	sensor.set_limit(Limit::Upper, config.upper_limit)?;
	sensor.set_limit(Limit::Critical, config.critical_limit)?;

	// The alert output is open drain and needs a pull-up resistor
	if config.alert_control {
		sensor.set_flag(ConfigFlag::AlertControl)?;
	}

	info!("Window Temperature: {} - {}", sensor.limit(Limit::Lower)?, sensor.limit(Limit::Upper)?);
	info!("Critical Temperature: {}", sensor.limit(Limit::Critical)?);
	info!("Config register: {:#06X}", sensor.config()?);

	Ok(resolution)
}

fn report(sensor: &mut Sensor) -> anyhow::Result<()> {
	let temperature = sensor.temperature()?;
	let alert_cause = sensor.alert_cause()?;

	info!("Temperature: {:.3}*C", temperature);

	if alert_cause.any() {
		warn!("Sensor Alert Output: {:#05b} {:?}", alert_cause.bits(), alert_cause);
	} else {
		debug!("Sensor Alert Output: {:#05b}", alert_cause.bits());
	}

	Ok(())
}
