use std::ffi::{CString, c_int, c_uint, c_void};
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

use glaze_binding::{Binder, BindingReport, BoundEntry, BoundTable, ContextId, build_snapshot};
use glaze_config::Config;
use glaze_connection::{ConnectionHandle, ConnectionLocks, ErrorTable, NativeError, NativeErrorKind, check_async};
use glaze_loader::{Address, ChainLoader, GetProcAddressFn, LibraryLoader, ProcAddressLoader, SymbolLoader, platform};
use glaze_primitives::{ApiKind, CapabilitySnapshot, Version};
use glaze_registry::builtins::{GLX_COMMANDS, GlxCommand};

use super::{GlxIntrospection, Xlib};
use crate::ffi::*;
use crate::sink::{CallSink, Tracer};
use crate::{Error, Result};

const GET_PROC_ENTRY_POINTS: &[&str] = &["glXGetProcAddressARB", "glXGetProcAddress"];

#[derive(Debug, Clone, Copy)]
struct DisplayOptions {
	threaded: bool,
	sync_after_call: bool,
	check_errors: bool,
	trace_calls: bool,
	report_unbound: bool,
}

impl From<&Config> for DisplayOptions {
	fn from(config: &Config) -> Self {
		Self {
			threaded: config.display.threaded,
			sync_after_call: config.display.sync_after_call,
			check_errors: config.errors.check.is_enabled(),
			trace_calls: config.diagnostics.trace_calls,
			report_unbound: config.diagnostics.report_unbound,
		}
	}
}

/// An open Xlib display plus its GLX library.
///
/// Closes the display when the last reference drops. The connection is
/// neither `Send` nor `Sync`; other threads reach it only through the
/// [`SharedConnection`] that [`GlxDisplay::share`] hands out for threaded
/// displays.
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<std::sync::Arc<glaze_gl::DisplayConnection>>();
/// ```
pub struct DisplayConnection {
	display: NonNull<Display>,
	handle: ConnectionHandle,
	screen: c_int,
	xlib: Xlib,
	glx: Arc<dyn SymbolLoader + Send + Sync>,
	/// Kept so proc-address loaders can fall back to plain exports.
	library: Option<LibraryLoader>,
	get_proc: Option<(GetProcAddressFn, &'static str)>,
	snapshot: CapabilitySnapshot,
	errors: Arc<ErrorTable>,
	locks: &'static ConnectionLocks,
	options: DisplayOptions,
}

/// A threaded [`DisplayConnection`] that may cross threads.
///
/// Only [`GlxDisplay::share`] creates one, and only after `XInitThreads`
/// succeeded and the connection lock was enabled.
#[derive(Clone)]
pub struct SharedConnection(Arc<DisplayConnection>);

// SAFETY: a shared connection is always threaded, so every call on its
// display goes through the enabled connection lock.
unsafe impl Send for SharedConnection {}
// SAFETY: as above.
unsafe impl Sync for SharedConnection {}

impl SharedConnection {
	pub fn connection(&self) -> &DisplayConnection {
		&self.0
	}
}

impl fmt::Debug for SharedConnection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SharedConnection").field(&self.0).finish()
	}
}

impl DisplayConnection {
	/// Opens display `name` (or `$DISPLAY`) with the system libX11 and libGL.
	pub fn open(name: Option<&str>, config: &Config) -> Result<Self> {
		let xlib = Xlib::open()?;
		let libraries = &config.loader.gl_libraries;
		let library = if libraries.is_empty() {
			LibraryLoader::open_first(platform::default_gl_libraries())?
		} else {
			LibraryLoader::open_first(libraries.as_slice())?
		};
		let glx: Arc<dyn SymbolLoader + Send + Sync> = Arc::new(library.clone());
		// SAFETY: both come from the system libraries.
		unsafe { Self::with_parts(xlib, glx, Some(library), name, config) }
	}

	/// Opens a display through explicitly provided function sources.
	///
	/// # Safety
	///
	/// `xlib` must hold real Xlib functions and `glx` must resolve GLX names to
	/// functions with GLX signatures, valid for the connection's lifetime.
	pub unsafe fn with_parts(
		xlib: Xlib,
		glx: Arc<dyn SymbolLoader + Send + Sync>,
		library: Option<LibraryLoader>,
		name: Option<&str>,
		config: &Config,
	) -> Result<Self> {
		let mut options = DisplayOptions::from(config);
		// XInitThreads must precede every other Xlib call.
		// SAFETY: `xlib` is real per the caller.
		if options.threaded && unsafe { (xlib.init_threads)() } == 0 {
			tracing::warn!("XInitThreads failed; display calls will not be serialized");
			options.threaded = false;
		}

		let c_name = name.map(CString::new).transpose().map_err(|_| Error::InvalidArgument {
			command: "XOpenDisplay",
			reason: "display name contains a NUL byte",
		})?;
		let name_ptr = c_name.as_ref().map_or(std::ptr::null(), |n| n.as_ptr());
		// SAFETY: `name_ptr` is null or a valid C string.
		let raw = unsafe { (xlib.open_display)(name_ptr) };
		let display = NonNull::new(raw).ok_or_else(|| Error::DisplayOpen {
			name: name.unwrap_or("$DISPLAY").to_string(),
		})?;

		let handle = ConnectionHandle::from_ptr(raw.cast_const());
		let locks = ConnectionLocks::global();
		if options.threaded {
			locks.enable(handle);
		}
		let errors = glaze_connection::xlib::ensure_reporter();
		// SAFETY: `set_error_handler` is `XSetErrorHandler`.
		unsafe { glaze_connection::xlib::install_error_handler(xlib.set_error_handler) };
		// SAFETY: `display` is open.
		let screen = unsafe { (xlib.default_screen)(raw) };

		let get_proc = GET_PROC_ENTRY_POINTS.iter().find_map(|&entry| {
			let address = glx.resolve(entry).ok()?;
			// SAFETY: both entry points are `GetProcAddressFn`.
			Some((unsafe { address.cast::<GetProcAddressFn>() }, entry))
		});

		let mut conn = Self {
			display,
			handle,
			screen,
			xlib,
			glx,
			library,
			get_proc,
			snapshot: CapabilitySnapshot::new(ApiKind::Glx, Version::new(0, 0)),
			errors,
			locks,
			options,
		};
		// On failure `conn` drops here and closes the display.
		conn.snapshot = conn.introspect()?;
		tracing::debug!(%handle, snapshot = %conn.snapshot, threaded = options.threaded, "display opened");
		Ok(conn)
	}

	fn introspect(&self) -> Result<CapabilitySnapshot> {
		// SAFETY: `glx` resolves GLX names to GLX functions.
		let introspection = unsafe {
			GlxIntrospection {
				display: self.display,
				screen: self.screen,
				query_version: self.glx.resolve("glXQueryVersion")?.cast(),
				query_extensions: self.glx.resolve("glXQueryExtensionsString")?.cast(),
			}
		};
		self.locked("glXQueryVersion", || build_snapshot(&introspection))?
			.map_err(Error::from)
	}

	/// Runs `f` holding the connection lock, then syncs and collects pending
	/// errors as configured.
	fn locked<R>(&self, command: &'static str, f: impl FnOnce() -> R) -> Result<R> {
		let _guard = self.locks.acquire(self.handle)?;
		let value = f();
		if self.options.sync_after_call {
			// SAFETY: the display is open and locked.
			unsafe { (self.xlib.sync)(self.display.as_ptr(), 0) };
		}
		if self.options.check_errors {
			check_async(command, self.handle, &self.errors)?;
		}
		Ok(value)
	}

	/// Loader used to bind the GLX table: exports first, then the GLX
	/// get-proc-address entry point.
	fn binding_loader(&self) -> ChainLoader {
		let mut chain = ChainLoader::new().with(Arc::clone(&self.glx));
		if let Some((get_proc, entry)) = self.get_proc {
			chain.push(ProcAddressLoader::from_fn(get_proc, entry, None));
		}
		chain
	}

	pub fn handle(&self) -> ConnectionHandle {
		self.handle
	}

	pub fn screen(&self) -> c_int {
		self.screen
	}

	pub fn raw_display(&self) -> *mut Display {
		self.display.as_ptr()
	}

	pub fn snapshot(&self) -> &CapabilitySnapshot {
		&self.snapshot
	}

	pub fn is_threaded(&self) -> bool {
		self.options.threaded
	}
}

impl Drop for DisplayConnection {
	fn drop(&mut self) {
		// SAFETY: this is the last reference to the open display.
		unsafe { (self.xlib.close_display)(self.display.as_ptr()) };
		self.locks.disable(self.handle);
		self.errors.take(self.handle);
		tracing::debug!(handle = %self.handle, "display closed");
	}
}

impl fmt::Debug for DisplayConnection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DisplayConnection")
			.field("handle", &self.handle)
			.field("screen", &self.screen)
			.field("snapshot", &self.snapshot)
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}

/// One thread's GLX entry points for a [`DisplayConnection`].
///
/// Every call takes the connection lock (when threading is enabled),
/// dispatches through the best bound alias, optionally round-trips with
/// `XSync`, and reports the first asynchronous X error raised meanwhile.
pub struct GlxDisplay {
	conn: Arc<DisplayConnection>,
	table: BoundTable,
	report: BindingReport,
	tracer: Tracer,
}

impl GlxDisplay {
	pub fn open(name: Option<&str>, config: &Config) -> Result<Self> {
		Ok(Self::new(DisplayConnection::open(name, config)?))
	}

	/// Takes ownership of `conn` and binds the GLX table on the calling thread.
	pub fn new(conn: DisplayConnection) -> Self {
		Self::bind(Arc::new(conn))
	}

	/// Binds the GLX table for a shared connection on the calling thread.
	pub fn attach(shared: SharedConnection) -> Self {
		Self::bind(shared.0)
	}

	fn bind(conn: Arc<DisplayConnection>) -> Self {
		let loader = conn.binding_loader();
		let context = ContextId::from_ptr(conn.display.as_ptr().cast_const());
		let (table, report) = Binder::new(&GLX_COMMANDS, &loader).bind(context, conn.snapshot.clone());
		report.log_unbound(conn.options.report_unbound);
		let tracer = Tracer::new(conn.options.trace_calls);
		Self {
			conn,
			table,
			report,
			tracer,
		}
	}

	/// The connection, for [`attach`](Self::attach) on another thread.
	///
	/// Fails with [`Error::NotThreaded`] unless the display was opened with
	/// Xlib threading enabled.
	pub fn share(&self) -> Result<SharedConnection> {
		if !self.conn.options.threaded {
			return Err(Error::NotThreaded);
		}
		Ok(SharedConnection(Arc::clone(&self.conn)))
	}

	/// Routes call tracing to `sink` and turns it on.
	pub fn with_sink(mut self, sink: impl CallSink + 'static) -> Self {
		self.tracer.set_sink(Box::new(sink));
		self.tracer.set_enabled(true);
		self
	}

	pub fn connection(&self) -> &DisplayConnection {
		&self.conn
	}

	pub fn snapshot(&self) -> &CapabilitySnapshot {
		&self.conn.snapshot
	}

	pub fn report(&self) -> &BindingReport {
		&self.report
	}

	pub fn is_available(&self, cmd: GlxCommand) -> bool {
		self.table.is_bound(cmd)
	}

	fn call_entry<R>(
		&self,
		cmd: GlxCommand,
		args: &dyn fmt::Debug,
		invoke: impl FnOnce(BoundEntry) -> Result<R>,
	) -> Result<R> {
		let (symbol, result) = match self.table.entry(cmd) {
			Ok(entry) => (Some(entry.symbol()), self.conn.locked(cmd.name(), || invoke(entry)).and_then(|r| r)),
			Err(e) => (None, Err(e.into())),
		};
		self.tracer.record(cmd.name(), symbol, args, &result);
		result
	}

	/// # Safety
	///
	/// `F` must be the signature of every alias of `cmd`.
	unsafe fn call<F: Copy, R>(&self, cmd: GlxCommand, args: &dyn fmt::Debug, invoke: impl FnOnce(F) -> R) -> Result<R> {
		self.call_entry(cmd, args, |entry| {
			// SAFETY: signature is the caller's contract.
			Ok(invoke(unsafe { entry.cast::<F>() }))
		})
	}

	fn display(&self) -> *mut Display {
		self.conn.display.as_ptr()
	}

	pub fn get_proc_address(&self, name: &str) -> Result<Option<Address>> {
		let c_name = CString::new(name).map_err(|_| Error::InvalidArgument {
			command: GlxCommand::GetProcAddress.name(),
			reason: "symbol name contains a NUL byte",
		})?;
		// SAFETY: both aliases are `GetProcAddressFn`.
		let ptr = unsafe {
			self.call(GlxCommand::GetProcAddress, &name, |f: GetProcAddressFn| f(c_name.as_ptr()))
		}?;
		Ok(Address::from_ptr(ptr))
	}

	/// A [`SymbolLoader`] for GL symbols backed by `glXGetProcAddress[ARB]`,
	/// suitable for [`Gl::load`](crate::Gl::load).
	pub fn proc_loader(&self) -> Result<ProcAddressLoader> {
		let entry = self.table.entry(GlxCommand::GetProcAddress)?;
		// SAFETY: both aliases are `GetProcAddressFn`.
		let get_proc = unsafe { entry.cast::<GetProcAddressFn>() };
		Ok(ProcAddressLoader::from_fn(get_proc, entry.symbol(), self.conn.library.clone()))
	}

	/// Frame buffer configurations on the default screen matching `attribs`,
	/// given as key/value pairs with or without the terminating 0.
	pub fn choose_fb_config(&self, attribs: &[c_int]) -> Result<Vec<GLXFBConfig>> {
		let list = terminated(GlxCommand::ChooseFbConfig.name(), attribs)?;
		let (display, screen, free) = (self.display(), self.conn.screen, self.conn.xlib.free);
		// SAFETY: every alias is `PFNGLXCHOOSEFBCONFIGPROC`.
		unsafe {
			self.call(GlxCommand::ChooseFbConfig, &attribs, |f: PFNGLXCHOOSEFBCONFIGPROC| {
				let mut count = 0;
				let configs = f(display, screen, list.as_ptr(), &mut count);
				if configs.is_null() {
					return Vec::new();
				}
				let len = usize::try_from(count).unwrap_or(0);
				let found = std::slice::from_raw_parts(configs, len).to_vec();
				free(configs.cast());
				found
			})
		}
	}

	/// Creates a context with `GLX_ARB_create_context` attributes.
	///
	/// # Safety
	///
	/// `config` must come from [`choose_fb_config`](Self::choose_fb_config)
	/// on this display and `share` must be null or a live context on it.
	pub unsafe fn create_context_attribs(
		&self,
		config: GLXFBConfig,
		share: GLXContext,
		direct: bool,
		attribs: &[c_int],
	) -> Result<NonNull<c_void>> {
		let list = terminated(GlxCommand::CreateContextAttribs.name(), attribs)?;
		let display = self.display();
		// SAFETY: the only alias is `PFNGLXCREATECONTEXTATTRIBSARBPROC`.
		let context = unsafe {
			self.call(GlxCommand::CreateContextAttribs, &(direct, attribs), |f: PFNGLXCREATECONTEXTATTRIBSARBPROC| {
				f(display, config, share, Bool::from(direct), list.as_ptr())
			})
		}?;
		NonNull::new(context).ok_or(Error::NullHandle {
			command: GlxCommand::CreateContextAttribs.name(),
		})
	}

	/// # Safety
	///
	/// `context` must be a live context of this display and not current on
	/// any other thread.
	pub unsafe fn destroy_context(&self, context: NonNull<c_void>) -> Result<()> {
		let display = self.display();
		// SAFETY: the only alias is `PFNGLXDESTROYCONTEXTPROC`.
		unsafe {
			self.call(GlxCommand::DestroyContext, &context, |f: PFNGLXDESTROYCONTEXTPROC| {
				f(display, context.as_ptr())
			})
		}
	}

	/// Makes `context` current on this thread with separate draw and read
	/// drawables; pass `None` and zero drawables to release.
	///
	/// # Safety
	///
	/// `context` must be a live context of this display.
	pub unsafe fn make_context_current(
		&self,
		draw: GLXDrawable,
		read: GLXDrawable,
		context: Option<NonNull<c_void>>,
	) -> Result<bool> {
		let display = self.display();
		let raw = context.map_or(std::ptr::null_mut(), NonNull::as_ptr);
		// SAFETY: both aliases are `PFNGLXMAKECONTEXTCURRENTPROC`.
		let ok = unsafe {
			self.call(GlxCommand::MakeContextCurrent, &(draw, read, raw), |f: PFNGLXMAKECONTEXTCURRENTPROC| {
				f(display, draw, read, raw)
			})
		}?;
		Ok(ok != 0)
	}

	pub fn get_current_context(&self) -> Result<Option<NonNull<c_void>>> {
		// SAFETY: the only alias is `PFNGLXGETCURRENTCONTEXTPROC`.
		let context = unsafe { self.call(GlxCommand::GetCurrentContext, &(), |f: PFNGLXGETCURRENTCONTEXTPROC| f()) }?;
		Ok(NonNull::new(context))
	}

	pub fn swap_buffers(&self, drawable: GLXDrawable) -> Result<()> {
		let display = self.display();
		// SAFETY: the only alias is `PFNGLXSWAPBUFFERSPROC`.
		unsafe {
			self.call(GlxCommand::SwapBuffers, &drawable, |f: PFNGLXSWAPBUFFERSPROC| f(display, drawable))
		}
	}

	/// Sets the swap interval, adapting to whichever extension is bound.
	///
	/// `GLX_EXT_swap_control` applies to `drawable`; the MESA and SGI variants
	/// apply to the current drawable and ignore it. Only EXT accepts negative
	/// (adaptive) intervals.
	pub fn swap_interval(&self, drawable: GLXDrawable, interval: c_int) -> Result<()> {
		let command = GlxCommand::SwapInterval.name();
		let display = self.display();
		self.call_entry(GlxCommand::SwapInterval, &(drawable, interval), |entry| {
			let status = match entry.alias_index() {
				0 => {
					// SAFETY: alias 0 is `glXSwapIntervalEXT`.
					let f = unsafe { entry.cast::<PFNGLXSWAPINTERVALEXTPROC>() };
					// SAFETY: the display is open.
					unsafe { f(display, drawable, interval) };
					0
				}
				1 => {
					let interval = c_uint::try_from(interval).map_err(|_| Error::InvalidArgument {
						command,
						reason: "negative intervals need GLX_EXT_swap_control",
					})?;
					// SAFETY: alias 1 is `glXSwapIntervalMESA`.
					let f = unsafe { entry.cast::<PFNGLXSWAPINTERVALMESAPROC>() };
					// SAFETY: plain integer argument.
					unsafe { f(interval) }
				}
				_ => {
					if interval < 0 {
						return Err(Error::InvalidArgument {
							command,
							reason: "negative intervals need GLX_EXT_swap_control",
						});
					}
					// SAFETY: alias 2 is `glXSwapIntervalSGI`.
					let f = unsafe { entry.cast::<PFNGLXSWAPINTERVALSGIPROC>() };
					// SAFETY: plain integer argument.
					unsafe { f(interval) }
				}
			};
			if status != 0 {
				return Err(NativeError {
					command: entry.symbol(),
					kind: NativeErrorKind::Code {
						code: status.unsigned_abs(),
						name: None,
						further: 0,
					},
				}
				.into());
			}
			Ok(())
		})
	}
}

impl fmt::Debug for GlxDisplay {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GlxDisplay")
			.field("connection", &self.conn)
			.field("bound", &self.report.bound)
			.finish_non_exhaustive()
	}
}

/// Copies a key/value attribute list and appends the 0 terminator if needed.
fn terminated(command: &'static str, attribs: &[c_int]) -> Result<Vec<c_int>> {
	let mut list = attribs.to_vec();
	if list.len() % 2 == 0 {
		list.push(0);
	} else if list.last() != Some(&0) {
		return Err(Error::InvalidArgument {
			command,
			reason: "attribute list must be key/value pairs",
		});
	}
	Ok(list)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn attribute_lists_get_one_terminator() {
		assert_eq!(terminated("t", &[1, 2]).unwrap(), vec![1, 2, 0]);
		assert_eq!(terminated("t", &[1, 2, 0]).unwrap(), vec![1, 2, 0]);
		assert_eq!(terminated("t", &[]).unwrap(), vec![0]);
		assert!(matches!(terminated("t", &[1, 2, 3]), Err(Error::InvalidArgument { .. })));
	}
}
