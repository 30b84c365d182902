//! Per-target loader selection.

use crate::{ChainLoader, LibraryLoader, LoadError, ProcAddressLoader, SymbolLoader};

/// Default desktop GL library names for the target.
pub fn default_gl_libraries() -> &'static [&'static str] {
	if cfg!(windows) {
		&["opengl32.dll"]
	} else if cfg!(target_os = "macos") {
		&["/System/Library/Frameworks/OpenGL.framework/OpenGL"]
	} else {
		&["libGL.so.1", "libGL.so", "libOpenGL.so.0"]
	}
}

/// Default GLES library names for the target.
pub fn default_gles_libraries() -> &'static [&'static str] {
	if cfg!(windows) {
		&["libGLESv2.dll"]
	} else {
		&["libGLESv2.so.2", "libGLESv2.so"]
	}
}

/// Default EGL library names for the target.
pub fn default_egl_libraries() -> &'static [&'static str] {
	if cfg!(windows) { &["libEGL.dll"] } else { &["libEGL.so.1", "libEGL.so"] }
}

/// Get-proc-address entry points tried for desktop GL, most preferred first.
fn gl_entry_points() -> &'static [&'static str] {
	if cfg!(windows) {
		&["wglGetProcAddress"]
	} else if cfg!(target_os = "macos") {
		&[]
	} else {
		&["glXGetProcAddressARB", "glXGetProcAddress"]
	}
}

/// Builds the desktop GL loader for the running platform.
///
/// An empty `candidates` list means [`default_gl_libraries`]. With
/// `prefer_proc_address`, the get-proc-address entry point is consulted
/// before plain library exports; otherwise exports come first. Either way the
/// other source remains as fallback, which matters on Windows where
/// `wglGetProcAddress` does not hand out GL 1.1 functions.
pub fn default_gl_loader<S: AsRef<str>>(
	candidates: &[S],
	prefer_proc_address: bool,
) -> Result<Box<dyn SymbolLoader>, LoadError> {
	let library = if candidates.is_empty() {
		LibraryLoader::open_first(default_gl_libraries())?
	} else {
		LibraryLoader::open_first(candidates)?
	};

	let proc_loader = gl_entry_points()
		.iter()
		.find_map(|entry| ProcAddressLoader::open(library.clone(), entry).ok());
	Ok(gl_loader_from(library, proc_loader, prefer_proc_address))
}

/// Orders a GL library's exports and its get-proc-address entry point.
pub fn gl_loader_from(
	library: LibraryLoader,
	proc_loader: Option<ProcAddressLoader>,
	prefer_proc_address: bool,
) -> Box<dyn SymbolLoader> {
	let Some(proc_loader) = proc_loader else {
		tracing::debug!(library = library.name(), "no get-proc-address entry point; using exports only");
		return Box::new(library);
	};

	tracing::debug!(
		library = library.name(),
		entry_point = proc_loader.entry_point(),
		prefer_proc_address,
		"using get-proc-address loader"
	);

	let proc_only = proc_loader.with_export_fallback(false);
	if prefer_proc_address {
		Box::new(ChainLoader::new().with(proc_only).with(library))
	} else {
		Box::new(ChainLoader::new().with(library).with(proc_only))
	}
}

/// Builds an EGL-backed loader for GLES contexts: `eglGetProcAddress` first,
/// then the GLES library's exports. Empty candidate lists mean the platform
/// defaults.
pub fn default_gles_loader<S: AsRef<str>, T: AsRef<str>>(
	egl_candidates: &[S],
	gles_candidates: &[T],
) -> Result<Box<dyn SymbolLoader>, LoadError> {
	let egl = if egl_candidates.is_empty() {
		LibraryLoader::open_first(default_egl_libraries())?
	} else {
		LibraryLoader::open_first(egl_candidates)?
	};
	let gles = if gles_candidates.is_empty() {
		LibraryLoader::open_first(default_gles_libraries())?
	} else {
		LibraryLoader::open_first(gles_candidates)?
	};
	let proc_loader = ProcAddressLoader::open(egl, "eglGetProcAddress")?.with_export_fallback(false);
	Ok(Box::new(ChainLoader::new().with(proc_loader).with(gles)))
}
