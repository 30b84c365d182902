//! GLX display calls over fake Xlib and GLX entry points.
//!
//! Every test touches the process-wide Xlib error reporter and shared fake
//! counters, so all of them run serially.

use std::ffi::{c_char, c_int, c_uint, c_void};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::time::Duration;

use glaze_config::{Config, ErrorCheck};
use glaze_connection::xlib::{XErrorEvent, XErrorHandler};
use glaze_connection::{ConnectionLocks, NativeErrorKind};
use glaze_gl::ffi::*;
use glaze_gl::glx::Xlib;
use glaze_gl::{DisplayConnection, Error, GlxDisplay, SharedConnection};
use glaze_loader::{Address, FnLoader, GetProcAddressFn, SymbolLoader};
use glaze_primitives::{ApiKind, Version};
use glaze_registry::builtins::GlxCommand;
use pretty_assertions::assert_eq;
use serial_test::serial;

const BAD_DRAWABLE: GLXDrawable = 0xdead;
const X_GLX_MAJOR: u8 = 152;

static CLOSED: AtomicUsize = AtomicUsize::new(0);
static SYNCS: AtomicUsize = AtomicUsize::new(0);
static INIT_THREADS: AtomicUsize = AtomicUsize::new(0);
static INSIDE: AtomicBool = AtomicBool::new(false);
static OVERLAPS: AtomicUsize = AtomicUsize::new(0);
static INTERVAL_ALIAS: AtomicUsize = AtomicUsize::new(usize::MAX);
static INTERVAL: AtomicI32 = AtomicI32::new(-100);

unsafe extern "C" fn open_display(_: *const c_char) -> *mut Display {
	Box::into_raw(Box::new(0u64)).cast()
}

unsafe extern "C" fn close_display(_: *mut Display) -> c_int {
	CLOSED.fetch_add(1, Ordering::SeqCst);
	0
}

unsafe extern "C" fn init_threads() -> c_int {
	INIT_THREADS.fetch_add(1, Ordering::SeqCst);
	1
}

unsafe extern "C" fn sync(_: *mut Display, _: Bool) -> c_int {
	SYNCS.fetch_add(1, Ordering::SeqCst);
	1
}

unsafe extern "C" fn set_error_handler(_: XErrorHandler) -> XErrorHandler {
	None
}

unsafe extern "C" fn default_screen(_: *mut Display) -> c_int {
	0
}

unsafe extern "C" fn x_free(_: *mut c_void) -> c_int {
	1
}

fn fake_xlib(symbol: &str) -> Option<Address> {
	Some(match symbol {
		"XOpenDisplay" => Address::of_fn(open_display as PFNXOPENDISPLAYPROC),
		"XCloseDisplay" => Address::of_fn(close_display as PFNXCLOSEDISPLAYPROC),
		"XInitThreads" => Address::of_fn(init_threads as PFNXINITTHREADSPROC),
		"XSync" => Address::of_fn(sync as PFNXSYNCPROC),
		"XSetErrorHandler" => Address::of_fn(set_error_handler as unsafe extern "C" fn(XErrorHandler) -> XErrorHandler),
		"XDefaultScreen" => Address::of_fn(default_screen as PFNXDEFAULTSCREENPROC),
		"XFree" => Address::of_fn(x_free as PFNXFREEPROC),
		_ => return None,
	})
}

/// Delivers an X error for `display` the way Xlib would.
fn raise_x_error(display: *mut Display, error_code: u8, minor_code: u8) {
	let mut event = XErrorEvent {
		type_: 0,
		display,
		resource_id: BAD_DRAWABLE,
		serial: 1,
		error_code,
		request_code: X_GLX_MAJOR,
		minor_code,
	};
	// SAFETY: the event outlives the call.
	unsafe { glaze_connection::xlib::handler()(display, &mut event) };
}

unsafe extern "C" fn query_version(_: *mut Display, major: *mut c_int, minor: *mut c_int) -> Bool {
	// SAFETY: callers pass valid outputs.
	unsafe {
		*major = 1;
		*minor = 4;
	}
	1
}

unsafe extern "C" fn extensions_mesa(_: *mut Display, _: c_int) -> *const c_char {
	c"GLX_ARB_create_context GLX_ARB_get_proc_address GLX_MESA_swap_control GLX_SGI_swap_control".as_ptr()
}

unsafe extern "C" fn extensions_ext(_: *mut Display, _: c_int) -> *const c_char {
	c"GLX_EXT_swap_control GLX_MESA_swap_control".as_ptr()
}

unsafe extern "C" fn extensions_sgi(_: *mut Display, _: c_int) -> *const c_char {
	c"GLX_SGI_swap_control".as_ptr()
}

unsafe extern "C" fn swap_buffers(display: *mut Display, drawable: GLXDrawable) {
	if INSIDE.swap(true, Ordering::SeqCst) {
		OVERLAPS.fetch_add(1, Ordering::SeqCst);
	}
	std::thread::sleep(Duration::from_micros(20));
	if drawable == BAD_DRAWABLE {
		// BadDrawable from X_GLXSwapBuffers.
		raise_x_error(display, 9, 11);
	}
	INSIDE.store(false, Ordering::SeqCst);
}

unsafe extern "C" fn swap_interval_ext(_: *mut Display, _: GLXDrawable, interval: c_int) {
	INTERVAL_ALIAS.store(0, Ordering::SeqCst);
	INTERVAL.store(interval, Ordering::SeqCst);
}

unsafe extern "C" fn swap_interval_mesa(interval: c_uint) -> c_int {
	INTERVAL_ALIAS.store(1, Ordering::SeqCst);
	INTERVAL.store(interval as c_int, Ordering::SeqCst);
	0
}

unsafe extern "C" fn swap_interval_sgi(interval: c_int) -> c_int {
	INTERVAL_ALIAS.store(2, Ordering::SeqCst);
	INTERVAL.store(interval, Ordering::SeqCst);
	// GLX_BAD_VALUE: SGI_swap_control rejects 0.
	if interval <= 0 { 6 } else { 0 }
}

unsafe extern "C" fn choose_fb_config(_: *mut Display, _: c_int, attribs: *const c_int, count: *mut c_int) -> *mut GLXFBConfig {
	// SAFETY: callers pass a terminated list and a valid count.
	unsafe {
		assert_eq!(*attribs.add(2), 0, "attribute list must be terminated");
		*count = 2;
	}
	let configs: Box<[GLXFBConfig]> = vec![0x10 as GLXFBConfig, 0x20 as GLXFBConfig].into_boxed_slice();
	Box::leak(configs).as_mut_ptr()
}

unsafe extern "C" fn create_context_fails(
	display: *mut Display,
	_: GLXFBConfig,
	_: GLXContext,
	_: Bool,
	_: *const c_int,
) -> GLXContext {
	// BadMatch from X_GLXCreateContextAttribsARB.
	raise_x_error(display, 8, 34);
	std::ptr::null_mut()
}

extern "system" fn gl_flush() {}

unsafe extern "system" fn get_proc_address(name: *const c_char) -> *const c_void {
	// SAFETY: callers pass a NUL-terminated name.
	let name = unsafe { std::ffi::CStr::from_ptr(name) };
	match name.to_bytes() {
		b"glFlush" => Address::of_fn(gl_flush as PFNGLVOIDPROC).as_ptr(),
		b"glXCreateContextAttribsARB" => Address::of_fn(create_context_fails as PFNGLXCREATECONTEXTATTRIBSARBPROC).as_ptr(),
		_ => std::ptr::null(),
	}
}

fn glx_loader(extensions: PFNGLXQUERYEXTENSIONSSTRINGPROC) -> Arc<dyn SymbolLoader + Send + Sync> {
	Arc::new(FnLoader(move |symbol: &str| {
		Some(match symbol {
			"glXQueryVersion" => Address::of_fn(query_version as PFNGLXQUERYVERSIONPROC),
			"glXQueryExtensionsString" => Address::of_fn(extensions),
			"glXGetProcAddress" | "glXGetProcAddressARB" => Address::of_fn(get_proc_address as GetProcAddressFn),
			"glXSwapBuffers" => Address::of_fn(swap_buffers as PFNGLXSWAPBUFFERSPROC),
			"glXChooseFBConfig" => Address::of_fn(choose_fb_config as PFNGLXCHOOSEFBCONFIGPROC),
			"glXSwapIntervalEXT" => Address::of_fn(swap_interval_ext as PFNGLXSWAPINTERVALEXTPROC),
			"glXSwapIntervalMESA" => Address::of_fn(swap_interval_mesa as PFNGLXSWAPINTERVALMESAPROC),
			"glXSwapIntervalSGI" => Address::of_fn(swap_interval_sgi as PFNGLXSWAPINTERVALSGIPROC),
			_ => return None,
		})
	}))
}

fn config(threaded: bool) -> Config {
	let mut config = Config::default();
	config.errors.check = ErrorCheck::Always;
	config.display.threaded = threaded;
	config.display.sync_after_call = true;
	config
}

unsafe extern "C" fn init_threads_fails() -> c_int {
	0
}

fn xlib_without_threads(symbol: &str) -> Option<Address> {
	match symbol {
		"XInitThreads" => Some(Address::of_fn(init_threads_fails as PFNXINITTHREADSPROC)),
		_ => fake_xlib(symbol),
	}
}

fn connect_with(
	xlib: fn(&str) -> Option<Address>,
	extensions: PFNGLXQUERYEXTENSIONSSTRINGPROC,
	config: &Config,
) -> GlxDisplay {
	// SAFETY: fakes follow the Xlib and GLX signatures.
	let conn = unsafe {
		let xlib = Xlib::from_loader(&FnLoader(xlib)).unwrap();
		DisplayConnection::with_parts(xlib, glx_loader(extensions), None, Some(":0"), config).unwrap()
	};
	GlxDisplay::new(conn)
}

fn connect(extensions: PFNGLXQUERYEXTENSIONSSTRINGPROC, config: &Config) -> GlxDisplay {
	connect_with(fake_xlib, extensions, config)
}

#[test]
#[serial]
fn glx_snapshot_comes_from_the_connection() {
	let display = connect(extensions_mesa, &config(false));
	let snap = display.snapshot();
	assert_eq!(snap.api(), ApiKind::Glx);
	assert_eq!(snap.version(), Version::new(1, 4));
	assert!(snap.has_extension("GLX_MESA_swap_control"));
	assert!(!display.is_available(GlxCommand::DestroyContext));
	assert!(display.report().unbound.contains(&"destroy_context"));
}

#[test]
#[serial]
fn async_errors_are_attributed_to_the_failing_call() {
	let display = connect(extensions_mesa, &config(false));
	let err = display.swap_buffers(BAD_DRAWABLE).unwrap_err();
	let Error::Native(native) = err else {
		panic!("expected a native error, got {err:?}");
	};
	assert_eq!(native.command, "swap_buffers");
	let NativeErrorKind::Protocol { error, suppressed } = native.kind else {
		panic!("expected a protocol error");
	};
	assert_eq!((error.error_code, error.request_code, error.minor_code), (9, X_GLX_MAJOR, 11));
	assert_eq!(suppressed, 0);

	// The entry was consumed; the next call is clean.
	display.swap_buffers(1).unwrap();
}

#[test]
#[serial]
fn sync_after_call_round_trips_each_call() {
	let display = connect(extensions_mesa, &config(false));
	let before = SYNCS.load(Ordering::SeqCst);
	display.swap_buffers(1).unwrap();
	display.swap_buffers(1).unwrap();
	assert_eq!(SYNCS.load(Ordering::SeqCst) - before, 2);
}

#[test]
#[serial]
fn swap_interval_prefers_the_ext_signature() {
	let display = connect(extensions_ext, &config(false));
	display.swap_interval(7, -1).unwrap();
	assert_eq!(INTERVAL_ALIAS.load(Ordering::SeqCst), 0);
	assert_eq!(INTERVAL.load(Ordering::SeqCst), -1);
}

#[test]
#[serial]
fn swap_interval_falls_back_to_mesa() {
	let display = connect(extensions_mesa, &config(false));
	display.swap_interval(7, 2).unwrap();
	assert_eq!(INTERVAL_ALIAS.load(Ordering::SeqCst), 1);
	assert_eq!(INTERVAL.load(Ordering::SeqCst), 2);

	let err = display.swap_interval(7, -1).unwrap_err();
	assert!(matches!(err, Error::InvalidArgument { command: "swap_interval", .. }));
}

#[test]
#[serial]
fn sgi_status_codes_become_errors() {
	let display = connect(extensions_sgi, &config(false));
	let err = display.swap_interval(7, 0).unwrap_err();
	let Error::Native(native) = err else {
		panic!("expected a native error, got {err:?}");
	};
	assert_eq!(native.command, "glXSwapIntervalSGI");
	assert_eq!(native.kind, NativeErrorKind::Code { code: 6, name: None, further: 0 });
	assert_eq!(INTERVAL_ALIAS.load(Ordering::SeqCst), 2);
}

#[test]
#[serial]
fn extension_commands_bind_through_get_proc_address() {
	let display = connect(extensions_mesa, &config(false));
	assert!(display.is_available(GlxCommand::CreateContextAttribs));

	let configs = display.choose_fb_config(&[GLX_DOUBLEBUFFER, 1]).unwrap();
	assert_eq!(configs.len(), 2);

	// SAFETY: the fake ignores its handles.
	let err = unsafe { display.create_context_attribs(configs[0], std::ptr::null_mut(), true, &[]) }.unwrap_err();
	match err {
		Error::Native(native) => {
			assert!(matches!(native.kind, NativeErrorKind::Protocol { error, .. } if error.error_code == 8));
		}
		other => panic!("expected the BadMatch to win over the null result, got {other:?}"),
	}
}

#[test]
#[serial]
fn proc_loader_resolves_gl_symbols() {
	let display = connect(extensions_mesa, &config(false));
	let loader = display.proc_loader().unwrap();
	assert_eq!(loader.entry_point(), "glXGetProcAddress");
	assert!(loader.resolve("glFlush").is_ok());
	assert!(loader.resolve("glNotAThing").is_err());
	assert!(display.get_proc_address("glFlush").unwrap().is_some());
}

#[test]
#[serial]
fn unthreaded_connections_cannot_be_shared() {
	let display = connect(extensions_mesa, &config(false));
	assert!(matches!(display.share(), Err(Error::NotThreaded)));
	assert!(!display.connection().is_threaded());
}

#[test]
#[serial]
fn failed_thread_init_keeps_the_connection_on_its_thread() {
	let display = connect_with(xlib_without_threads, extensions_mesa, &config(true));
	assert!(!display.connection().is_threaded());
	assert!(!ConnectionLocks::global().is_enabled(display.connection().handle()));
	assert!(matches!(display.share(), Err(Error::NotThreaded)));
}

#[test]
#[serial]
fn shared_connections_are_the_only_cross_thread_handle() {
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<SharedConnection>();

	let display = connect(extensions_mesa, &config(true));
	let shared = display.share().unwrap();
	assert_eq!(shared.connection().handle(), display.connection().handle());
	let handle = std::thread::spawn(move || GlxDisplay::attach(shared).connection().handle().raw())
		.join()
		.unwrap();
	assert_eq!(handle, display.connection().handle().raw());
}

#[test]
#[serial]
fn threaded_connection_serializes_calls_across_threads() {
	let before = INIT_THREADS.load(Ordering::SeqCst);
	let display = connect(extensions_mesa, &config(true));
	assert_eq!(INIT_THREADS.load(Ordering::SeqCst), before + 1);
	let handle = display.connection().handle();
	assert!(ConnectionLocks::global().is_enabled(handle));

	OVERLAPS.store(0, Ordering::SeqCst);
	std::thread::scope(|s| {
		for _ in 0..4 {
			let conn = display.share().unwrap();
			s.spawn(move || {
				let local = GlxDisplay::attach(conn);
				for _ in 0..20 {
					local.swap_buffers(1).unwrap();
				}
			});
		}
		for _ in 0..20 {
			display.swap_buffers(1).unwrap();
		}
	});
	assert_eq!(OVERLAPS.load(Ordering::SeqCst), 0);
}

#[test]
#[serial]
fn dropping_the_last_view_closes_the_display() {
	let display = connect(extensions_mesa, &config(true));
	let handle = display.connection().handle();
	let shared = display.share().unwrap();
	let before = CLOSED.load(Ordering::SeqCst);

	drop(display);
	assert_eq!(CLOSED.load(Ordering::SeqCst), before);
	drop(shared);
	assert_eq!(CLOSED.load(Ordering::SeqCst), before + 1);
	assert!(!ConnectionLocks::global().is_enabled(handle));
}
