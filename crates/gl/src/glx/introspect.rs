use std::ffi::{CStr, c_int};
use std::ptr::NonNull;

use glaze_binding::{ContextIntrospection, UnavailableReason};
use glaze_primitives::{ApiKind, ExtensionList, Profile, Version, VersionParseError};

use crate::ffi::{Display, PFNGLXQUERYEXTENSIONSSTRINGPROC, PFNGLXQUERYVERSIONPROC};

/// Reads the GLX version and extension string of a display's screen.
///
/// GLX capabilities belong to the connection, so "current" here means the
/// display is open.
pub struct GlxIntrospection {
	pub(crate) display: NonNull<Display>,
	pub(crate) screen: c_int,
	pub(crate) query_version: PFNGLXQUERYVERSIONPROC,
	pub(crate) query_extensions: PFNGLXQUERYEXTENSIONSSTRINGPROC,
}

impl ContextIntrospection for GlxIntrospection {
	fn is_current(&self) -> bool {
		true
	}

	fn api_version(&self) -> Result<(ApiKind, Version), UnavailableReason> {
		let (mut major, mut minor) = (0, 0);
		// SAFETY: `display` is open and the outputs are valid.
		let ok = unsafe { (self.query_version)(self.display.as_ptr(), &mut major, &mut minor) };
		if ok == 0 {
			return Err(UnavailableReason::NoVersion);
		}
		match (u8::try_from(major), u8::try_from(minor)) {
			(Ok(major), Ok(minor)) => Ok((ApiKind::Glx, Version::new(major, minor))),
			_ => Err(UnavailableReason::BadVersion(VersionParseError::Malformed(format!("{major}.{minor}")))),
		}
	}

	fn profile(&self, _: ApiKind, _: Version) -> Option<Profile> {
		None
	}

	fn extensions(&self, _: ApiKind, _: Version) -> ExtensionList {
		// SAFETY: `display` is open; the returned string is owned by Xlib.
		let ptr = unsafe { (self.query_extensions)(self.display.as_ptr(), self.screen) };
		if ptr.is_null() {
			return ExtensionList::Delimited(String::new());
		}
		// SAFETY: non-null GLX strings are NUL-terminated.
		let names = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
		ExtensionList::Delimited(names)
	}
}
