use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::{
	fs::{File, OpenOptions},
	io::{self, Write},
	path::Path,
	thread,
	thread::JoinHandle,
	time::{Duration, Instant},
};

lazy_static! {
	static ref LOG_CHANNEL: (Sender<Message>, Receiver<Message>) = unbounded::<Message>();
	static ref LOGGER: ThermometerLogger = ThermometerLogger {
		start_instant: Instant::now()
	};
}

enum Message {
	Log(String),
	Flush(Sender<()>),
}

/// Prints log lines and copies them to an optional log file, from its own thread.
pub struct LogWriter {
	file: Option<File>,
}

impl LogWriter {
	pub fn new(directory: Option<&str>) -> io::Result<Self> {
		let file = match directory {
			Some(directory) => {
				let now = chrono::offset::Local::now();
				let log_file_name = format!("thermometer_{}.log", now.format("%Y-%m-%d_%H-%M-%S"));

				Some(OpenOptions::new()
					.append(true)
					.create(true)
					.open(Path::new(directory).join(log_file_name))?)
			}
			None => None,
		};

		Ok(LogWriter { file })
	}

	fn write(&mut self, line: &str) {
		println!("{}", line);

		if let Some(file) = &mut self.file {
			if let Err(e) = writeln!(file, "{}", line) {
				eprintln!("Failed to write log file: {}", e);
			}
		}
	}

	fn receive_loop(&mut self) {
		for message in LOG_CHANNEL.1.iter() {
			match message {
				Message::Log(line) => self.write(&line),
				Message::Flush(done) => {
					if let Some(file) = &mut self.file {
						file.flush().unwrap_or_default();
					}
					done.send(()).unwrap_or_default();
				}
			}
		}
	}

	pub fn spawn(mut self, level_filter: LevelFilter) -> anyhow::Result<JoinHandle<()>> {
		log::set_logger(&*LOGGER)
			.map(|()| log::set_max_level(level_filter))
			.map_err(|e| anyhow!("Failed to install logger: {}", e))?;

		Ok(thread::spawn(move || self.receive_loop()))
	}
}

/// Waits until every line logged so far is written.
pub fn flush() {
	const FLUSH_TIMEOUT: Duration = Duration::from_millis(500);

	let (done_sender, done_receiver) = bounded::<()>(1);
	if LOG_CHANNEL.0.send(Message::Flush(done_sender)).is_ok() {
		done_receiver.recv_timeout(FLUSH_TIMEOUT).unwrap_or_default();
	}
}

struct ThermometerLogger {
	start_instant: Instant,
}

impl ThermometerLogger {
	fn format(&self, record: &Record) -> String {
		let elapsed = (Instant::now() - self.start_instant).as_secs_f32();

		if record.metadata().level() == Level::Error {
			format!(
				"[{:.3}][{:?}][{}] {} ({}:{})",
				elapsed,
				record.level(),
				record.module_path().unwrap_or("unknown"),
				record.args(),
				record.file().unwrap_or("unknown"),
				record.line().unwrap_or(0)
			)
		} else {
			format!(
				"[{:.3}][{:?}][{}] {}",
				elapsed,
				record.level(),
				record.module_path().unwrap_or("unknown"),
				record.args(),
			)
		}
	}
}

impl Log for ThermometerLogger {
	fn enabled(&self, _: &Metadata) -> bool {
		true
	}

	fn log(&self, record: &Record) {
		if self.enabled(record.metadata()) {
			LOG_CHANNEL.0.send(Message::Log(self.format(record))).unwrap_or_default();
		}
	}

	fn flush(&self) {
		flush();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn format_test() {
		let logger = ThermometerLogger { start_instant: Instant::now() };

		let line = logger.format(&Record::builder()
			.args(format_args!("Temperature: 25.000*C"))
			.level(Level::Info)
			.module_path(Some("thermometer"))
			.build());
		assert!(line.starts_with("[0.0"));
		assert!(line.ends_with("][Info][thermometer] Temperature: 25.000*C"));

		let line = logger.format(&Record::builder()
			.args(format_args!("Bus error"))
			.level(Level::Error)
			.module_path(Some("thermometer"))
			.file(Some("src/main.rs"))
			.line(Some(42))
			.build());
		assert!(line.ends_with("][Error][thermometer] Bus error (src/main.rs:42)"));
	}
}
