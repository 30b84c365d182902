//! Runtime configuration for glaze.
//!
//! Configuration is a TOML document with four optional tables:
//!
//! ```toml
//! [loader]
//! gl_libraries = ["libGL.so.1"]
//! prefer_proc_address = true
//!
//! [errors]
//! check = "debug"        # never | debug | always
//!
//! [diagnostics]
//! trace_calls = false
//! report_unbound = true
//!
//! [display]
//! threaded = true
//! sync_after_call = false
//! ```
//!
//! Missing keys take their defaults and unknown keys are rejected. Selected
//! values can be overridden from the environment with [`Config::apply_env`]:
//!
//! | Variable                 | Overrides                     |
//! |--------------------------|-------------------------------|
//! | `GLAZE_GL_LIBRARY`       | `loader.gl_libraries` (`:`-separated) |
//! | `GLAZE_CHECK_ERRORS`     | `errors.check`                |
//! | `GLAZE_TRACE_CALLS`      | `diagnostics.trace_calls`     |
//! | `GLAZE_THREADED_DISPLAY` | `display.threaded`            |

mod error;

use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub loader: LoaderConfig,
	pub errors: ErrorsConfig,
	pub diagnostics: DiagnosticsConfig,
	pub display: DisplayConfig,
}

/// Where native symbols come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
	/// Desktop GL library candidates, tried in order. Empty means the
	/// platform default list.
	pub gl_libraries: Vec<String>,
	pub gles_libraries: Vec<String>,
	pub egl_libraries: Vec<String>,
	/// Resolve through the window system's get-proc-address before plain
	/// library exports.
	pub prefer_proc_address: bool,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			gl_libraries: Vec::new(),
			gles_libraries: Vec::new(),
			egl_libraries: Vec::new(),
			prefer_proc_address: true,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErrorsConfig {
	pub check: ErrorCheck,
}

/// When native error state is checked after each call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCheck {
	Never,
	/// Only in builds with debug assertions.
	#[default]
	Debug,
	Always,
}

impl ErrorCheck {
	pub fn is_enabled(self) -> bool {
		match self {
			Self::Never => false,
			Self::Debug => cfg!(debug_assertions),
			Self::Always => true,
		}
	}
}

impl FromStr for ErrorCheck {
	type Err = ();

	fn from_str(s: &str) -> std::result::Result<Self, ()> {
		match s.trim().to_ascii_lowercase().as_str() {
			"never" | "off" | "0" => Ok(Self::Never),
			"debug" => Ok(Self::Debug),
			"always" | "on" | "1" => Ok(Self::Always),
			_ => Err(()),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
	/// Report every dispatched call to the call sink.
	pub trace_calls: bool,
	/// Log commands left unbound after binding at warn level instead of
	/// debug.
	pub report_unbound: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
	/// Initialize Xlib threading and serialize calls per connection.
	pub threaded: bool,
	/// Round-trip to the server after each call so asynchronous errors are
	/// attributed to the call that caused them.
	pub sync_after_call: bool,
}

impl Config {
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&source)
	}

	/// Applies `GLAZE_*` overrides from the process environment.
	pub fn apply_env(&mut self) -> Result<()> {
		self.apply_env_with(|var| std::env::var(var).ok())
	}

	/// Applies overrides using `lookup` in place of the process environment.
	pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
		if let Some(value) = lookup("GLAZE_GL_LIBRARY") {
			self.loader.gl_libraries = value
				.split(':')
				.map(str::trim)
				.filter(|s| !s.is_empty())
				.map(String::from)
				.collect();
		}
		if let Some(value) = lookup("GLAZE_CHECK_ERRORS") {
			self.errors.check = value.parse().map_err(|()| ConfigError::InvalidEnv {
				var: "GLAZE_CHECK_ERRORS",
				value,
				expected: "never, debug or always",
			})?;
		}
		if let Some(value) = lookup("GLAZE_TRACE_CALLS") {
			self.diagnostics.trace_calls = parse_flag("GLAZE_TRACE_CALLS", value)?;
		}
		if let Some(value) = lookup("GLAZE_THREADED_DISPLAY") {
			self.display.threaded = parse_flag("GLAZE_THREADED_DISPLAY", value)?;
		}
		Ok(())
	}
}

fn parse_flag(var: &'static str, value: String) -> Result<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" | "" => Ok(false),
		_ => Err(ConfigError::InvalidEnv {
			var,
			value,
			expected: "a boolean",
		}),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
		move |var| pairs.iter().find(|(k, _)| *k == var).map(|(_, v)| v.to_string())
	}

	#[test]
	fn defaults_prefer_proc_address_and_debug_checks() {
		let config = Config::default();
		assert!(config.loader.prefer_proc_address);
		assert_eq!(config.errors.check, ErrorCheck::Debug);
		assert!(!config.display.threaded);
	}

	#[test]
	fn env_overrides_replace_fields() {
		let mut config = Config::default();
		config
			.apply_env_with(env(&[
				("GLAZE_GL_LIBRARY", "/opt/mesa/libGL.so.1: libGL.so"),
				("GLAZE_CHECK_ERRORS", "Always"),
				("GLAZE_TRACE_CALLS", "yes"),
				("GLAZE_THREADED_DISPLAY", "0"),
			]))
			.unwrap();

		assert_eq!(config.loader.gl_libraries, vec!["/opt/mesa/libGL.so.1", "libGL.so"]);
		assert_eq!(config.errors.check, ErrorCheck::Always);
		assert!(config.diagnostics.trace_calls);
		assert!(!config.display.threaded);
	}

	#[test]
	fn bad_env_values_are_rejected() {
		let mut config = Config::default();
		let err = config.apply_env_with(env(&[("GLAZE_TRACE_CALLS", "sometimes")])).unwrap_err();
		assert!(matches!(err, ConfigError::InvalidEnv { var: "GLAZE_TRACE_CALLS", .. }));

		let err = config.apply_env_with(env(&[("GLAZE_CHECK_ERRORS", "loud")])).unwrap_err();
		assert_eq!(
			err.to_string(),
			"invalid value \"loud\" for GLAZE_CHECK_ERRORS (expected never, debug or always)"
		);
	}

	#[test]
	fn check_modes() {
		assert!(!ErrorCheck::Never.is_enabled());
		assert!(ErrorCheck::Always.is_enabled());
		assert_eq!(ErrorCheck::Debug.is_enabled(), cfg!(debug_assertions));
	}
}
