use glaze_connection::xlib::XSetErrorHandlerFn;
use glaze_loader::{LibraryLoader, SymbolLoader};

use crate::Result;
use crate::ffi::{PFNXCLOSEDISPLAYPROC, PFNXDEFAULTSCREENPROC, PFNXFREEPROC, PFNXINITTHREADSPROC, PFNXOPENDISPLAYPROC, PFNXSYNCPROC};

const XLIB_LIBRARIES: &[&str] = &["libX11.so.6", "libX11.so"];

/// The handful of Xlib functions needed to run a GLX connection.
pub struct Xlib {
	pub(crate) open_display: PFNXOPENDISPLAYPROC,
	pub(crate) close_display: PFNXCLOSEDISPLAYPROC,
	pub(crate) init_threads: PFNXINITTHREADSPROC,
	pub(crate) sync: PFNXSYNCPROC,
	pub(crate) set_error_handler: XSetErrorHandlerFn,
	pub(crate) default_screen: PFNXDEFAULTSCREENPROC,
	pub(crate) free: PFNXFREEPROC,
	_library: Option<LibraryLoader>,
}

impl Xlib {
	/// Loads libX11.
	pub fn open() -> Result<Self> {
		let library = LibraryLoader::open_first(XLIB_LIBRARIES)?;
		// SAFETY: libX11 exports these names with these signatures.
		let mut xlib = unsafe { Self::from_loader(&library) }?;
		xlib._library = Some(library);
		Ok(xlib)
	}

	/// # Safety
	///
	/// `loader` must resolve each name to a function with Xlib's signature,
	/// valid for as long as the returned value is used.
	pub unsafe fn from_loader(loader: &dyn SymbolLoader) -> Result<Self> {
		// SAFETY: signatures are the caller's contract.
		unsafe {
			Ok(Self {
				open_display: loader.resolve("XOpenDisplay")?.cast(),
				close_display: loader.resolve("XCloseDisplay")?.cast(),
				init_threads: loader.resolve("XInitThreads")?.cast(),
				sync: loader.resolve("XSync")?.cast(),
				set_error_handler: loader.resolve("XSetErrorHandler")?.cast(),
				default_screen: loader.resolve("XDefaultScreen")?.cast(),
				free: loader.resolve("XFree")?.cast(),
				_library: None,
			})
		}
	}
}
