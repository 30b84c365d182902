use std::fmt;

use serde::Serialize;

/// Native API flavor exposed by a context or connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
	/// Desktop OpenGL.
	Gl,
	/// OpenGL ES (including the ES-CM 1.x common profile).
	Gles,
	/// GLX, the X11 window-system binding.
	Glx,
	/// EGL, the Khronos native platform interface.
	Egl,
	/// WGL, the Win32 window-system binding.
	Wgl,
}

impl ApiKind {
	/// Short lowercase label used in logs and reports.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Gl => "gl",
			Self::Gles => "gles",
			Self::Glx => "glx",
			Self::Egl => "egl",
			Self::Wgl => "wgl",
		}
	}
}

impl fmt::Display for ApiKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Desktop GL context profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
	/// Core profile: deprecated functionality is removed.
	Core,
	/// Compatibility profile: deprecated functionality stays available.
	Compatibility,
}

impl Profile {
	/// `GL_CONTEXT_CORE_PROFILE_BIT`.
	pub const CORE_BIT: i32 = 0x0000_0001;
	/// `GL_CONTEXT_COMPATIBILITY_PROFILE_BIT`.
	pub const COMPATIBILITY_BIT: i32 = 0x0000_0002;

	/// Decodes a `GL_CONTEXT_PROFILE_MASK` value.
	///
	/// Drivers that set neither bit are treated as compatibility contexts, which
	/// is what every pre-3.2 context effectively is.
	pub const fn from_mask(mask: i32) -> Self {
		if mask & Self::CORE_BIT != 0 && mask & Self::COMPATIBILITY_BIT == 0 {
			Self::Core
		} else {
			Self::Compatibility
		}
	}
}

impl fmt::Display for Profile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Core => f.write_str("core"),
			Self::Compatibility => f.write_str("compatibility"),
		}
	}
}
