//! Utilities

// Modules
pub mod logger;

// Imports
use {itertools::Itertools, std::process::Command};

/// Extension trait for [`Command`] to display the command line it will run
#[extend::ext(name = CommandLine)]
pub impl Command {
	/// Returns the program followed by all of its arguments, separated by spaces.
	///
	/// Non-utf8 arguments are displayed lossily.
	fn command_line(&self) -> String {
		std::iter::once(self.get_program())
			.chain(self.get_args())
			.map(|arg| arg.to_string_lossy())
			.join(" ")
	}
}
