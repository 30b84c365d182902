use std::fmt;

use serde::Serialize;

use crate::ApiKind;

/// A `major.minor` API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Version {
	pub major: u8,
	pub minor: u8,
}

impl Version {
	pub const fn new(major: u8, minor: u8) -> Self {
		Self { major, minor }
	}
}

impl fmt::Display for Version {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.major, self.minor)
	}
}

/// Failure to read a version out of a driver version string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
	#[error("empty version string")]
	Empty,
	#[error("malformed version string: {0:?}")]
	Malformed(String),
}

const ES_PREFIXES: &[&str] = &["OpenGL ES-CM ", "OpenGL ES-CL ", "OpenGL ES "];

/// Parses a `GL_VERSION`-style string into its API flavor and version.
///
/// Desktop drivers report `"<major>.<minor>[.<release>] [vendor info]"`. ES
/// drivers prefix that with `"OpenGL ES "` (or `"OpenGL ES-CM "` / `"OpenGL
/// ES-CL "` for 1.x). The `fallback` kind is returned for unprefixed strings,
/// which lets the same parser serve GLX and EGL version strings too.
pub fn parse_version_string(raw: &str, fallback: ApiKind) -> Result<(ApiKind, Version), VersionParseError> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return Err(VersionParseError::Empty);
	}

	let (api, rest) = match ES_PREFIXES.iter().find_map(|p| trimmed.strip_prefix(p)) {
		Some(rest) => (ApiKind::Gles, rest),
		None => (fallback, trimmed),
	};

	let number = rest.split_whitespace().next().unwrap_or_default();
	let mut parts = number.split('.');
	let major = parts.next().and_then(leading_number);
	let minor = parts.next().and_then(leading_number);

	match (major, minor) {
		(Some(major), Some(minor)) => Ok((api, Version::new(major, minor))),
		_ => Err(VersionParseError::Malformed(raw.to_string())),
	}
}

/// Parses the leading decimal digits of `s`. Some drivers glue a vendor tag
/// straight onto the minor number (`"2.1Mesa"`).
fn leading_number(s: &str) -> Option<u8> {
	let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
	s[..end].parse().ok()
}
