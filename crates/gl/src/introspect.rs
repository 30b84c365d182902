use std::ffi::{CStr, c_char};

use glaze_binding::{ContextIntrospection, UnavailableReason};
use glaze_loader::SymbolLoader;
use glaze_primitives::{ApiKind, ExtensionList, Profile, Version, parse_version_string};

use crate::ffi::{
	GL_CONTEXT_PROFILE_MASK, GL_EXTENSIONS, GL_NUM_EXTENSIONS, GL_VERSION, GLenum, GLint, PFNGLGETINTEGERVPROC,
	PFNGLGETSTRINGIPROC, PFNGLGETSTRINGPROC,
};

/// Reads the current GL context's version, profile and extensions.
///
/// Resolves its three query functions directly rather than through the
/// alias table: they are what the table's eligibility is computed from.
pub struct GlIntrospection {
	get_string: Option<PFNGLGETSTRINGPROC>,
	get_stringi: Option<PFNGLGETSTRINGIPROC>,
	get_integerv: Option<PFNGLGETINTEGERVPROC>,
}

impl GlIntrospection {
	/// # Safety
	///
	/// `loader` must return GL's own `glGetString`, `glGetStringi` and
	/// `glGetIntegerv` for those names.
	pub unsafe fn new(loader: &dyn SymbolLoader) -> Self {
		// SAFETY: signatures are the caller's contract.
		unsafe {
			Self {
				get_string: loader.resolve("glGetString").ok().map(|a| a.cast()),
				get_stringi: loader.resolve("glGetStringi").ok().map(|a| a.cast()),
				get_integerv: loader.resolve("glGetIntegerv").ok().map(|a| a.cast()),
			}
		}
	}

	fn string(&self, name: GLenum) -> Option<String> {
		let get_string = self.get_string?;
		owned_string(get_string(name))
	}

	fn integer(&self, name: GLenum) -> Option<GLint> {
		let get_integerv = self.get_integerv?;
		let mut value = 0;
		get_integerv(name, &mut value);
		Some(value)
	}

	fn indexed_extensions(&self) -> Option<Vec<String>> {
		let get_stringi = self.get_stringi?;
		let count = self.integer(GL_NUM_EXTENSIONS)?;
		let count = u32::try_from(count).ok()?;
		Some((0..count).filter_map(|i| owned_string(get_stringi(GL_EXTENSIONS, i))).collect())
	}
}

impl ContextIntrospection for GlIntrospection {
	fn is_current(&self) -> bool {
		// Without a current context `glGetString` returns null.
		self.string(GL_VERSION).is_some()
	}

	fn api_version(&self) -> Result<(ApiKind, Version), UnavailableReason> {
		let raw = self.string(GL_VERSION).ok_or(UnavailableReason::NoVersion)?;
		parse_version_string(&raw, ApiKind::Gl).map_err(UnavailableReason::BadVersion)
	}

	fn profile(&self, api: ApiKind, version: Version) -> Option<Profile> {
		if api != ApiKind::Gl {
			return None;
		}
		// Profiles arrived with 3.2; everything older is compatibility.
		if version < Version::new(3, 2) {
			return Some(Profile::Compatibility);
		}
		self.integer(GL_CONTEXT_PROFILE_MASK).map(Profile::from_mask)
	}

	fn extensions(&self, _: ApiKind, version: Version) -> ExtensionList {
		// GL_EXTENSIONS through glGetString is gone from core profiles.
		if version >= Version::new(3, 0)
			&& let Some(names) = self.indexed_extensions()
		{
			return ExtensionList::Indexed(names);
		}
		ExtensionList::Delimited(self.string(GL_EXTENSIONS).unwrap_or_default())
	}
}

pub(crate) fn owned_string(ptr: *const u8) -> Option<String> {
	if ptr.is_null() {
		return None;
	}
	// SAFETY: GL strings are NUL-terminated and static for the context's lifetime.
	let s = unsafe { CStr::from_ptr(ptr.cast::<c_char>()) };
	Some(s.to_string_lossy().into_owned())
}
