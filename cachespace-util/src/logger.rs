//! Logger

// Imports
use {
	std::{fs, io, path::Path, sync::Mutex},
	tracing::metadata::LevelFilter,
	tracing_subscriber::{fmt, prelude::*, EnvFilter},
};

/// Initializes the logger
///
/// Logs to stderr, filtered by `RUST_LOG` (defaults to `info`).
/// If `log_file` is specified, also logs to it, filtered by `RUST_LOG_FILE` (defaults to `debug`).
///
/// Any messages logged through [`pre_init`] are emitted afterwards.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let term_layer = fmt::layer()
		.with_writer(io::stderr)
		.with_filter(self::env_filter("RUST_LOG", LevelFilter::INFO));

	// Note: We can't log any errors until the subscriber is installed,
	//       so we keep it around until then.
	let mut log_file_err = None;
	let file_layer = log_file.and_then(|log_file| {
		let file = fs::File::options()
			.create(true)
			.write(true)
			.append(log_file_append)
			.truncate(!log_file_append)
			.open(log_file);

		match file {
			Ok(file) => Some(
				fmt::layer()
					.with_writer(Mutex::new(file))
					.with_ansi(false)
					.with_filter(self::env_filter("RUST_LOG_FILE", LevelFilter::DEBUG)),
			),
			Err(err) => {
				log_file_err = Some((log_file, err));
				None
			},
		}
	});

	tracing_subscriber::registry().with(term_layer).with(file_layer).init();

	if let Some((log_file, err)) = log_file_err {
		tracing::warn!("Unable to open log file {log_file:?}: {err}");
	}

	pre_init::flush();
}

/// Creates an env filter from `env_var`, with a default level of `default`
fn env_filter(env_var: &str, default: LevelFilter) -> EnvFilter {
	EnvFilter::builder()
		.with_default_directive(default.into())
		.with_env_var(env_var)
		.from_env_lossy()
}

/// Logging before the logger is initialized
pub mod pre_init {
	// Imports
	use std::sync::{Mutex, PoisonError};

	/// Debug messages pending until the logger is initialized
	static PENDING: Mutex<Vec<String>> = Mutex::new(vec![]);

	/// Queues a debug message
	pub fn debug(msg: impl Into<String>) {
		PENDING.lock().unwrap_or_else(PoisonError::into_inner).push(msg.into());
	}

	/// Emits all pending messages
	pub(super) fn flush() {
		let pending = std::mem::take(&mut *PENDING.lock().unwrap_or_else(PoisonError::into_inner));
		for msg in pending {
			tracing::debug!("{msg}");
		}
	}
}
