use std::ffi::c_void;
use std::fmt;

use glaze_binding::{Binder, BindingReport, BoundTable, ContextId, build_snapshot};
use glaze_config::Config;
use glaze_connection::{LastErrorSource, check_sync};
use glaze_loader::{SymbolLoader, platform};
use glaze_primitives::{ApiKind, CapabilitySnapshot};
use glaze_registry::builtins::{GL_COMMANDS, GlCommand};

use crate::ffi::*;
use crate::introspect::{GlIntrospection, owned_string};
use crate::sink::{CallSink, Tracer};
use crate::{Error, Result};

/// Typed GL entry points bound for one context.
///
/// Every wrapper dispatches through the highest-priority alias the context
/// supports and fails with [`Error::Dispatch`] when none is bound. With error
/// checking enabled, `glGetError` is drained after each call and the first
/// code surfaces as [`Error::Native`].
///
/// `Gl` is tied to the thread on which its context is current and cannot be
/// sent to another thread.
pub struct Gl {
	table: BoundTable,
	check_errors: bool,
	report_unbound: bool,
	tracer: Tracer,
	/// Keeps the libraries behind `table`'s addresses loaded.
	system: Option<Box<dyn SymbolLoader>>,
}

struct GetError(PFNGLGETERRORPROC);

impl LastErrorSource for GetError {
	fn take_error(&self) -> u32 {
		(self.0)()
	}

	fn describe(&self, code: u32) -> Option<&'static str> {
		gl_error_name(code)
	}
}

impl Gl {
	/// Snapshots the current context and binds every GL command for it.
	///
	/// # Safety
	///
	/// `loader` must resolve GL symbol names to the matching GL functions for
	/// the context that is current on this thread, and that context must stay
	/// current while the returned value is used.
	pub unsafe fn load(loader: &dyn SymbolLoader, context: ContextId, config: &Config) -> Result<(Self, BindingReport)> {
		// SAFETY: forwarded to the caller.
		let introspection = unsafe { GlIntrospection::new(loader) };
		let snapshot = build_snapshot(&introspection)?;
		let (table, report) = Binder::new(&GL_COMMANDS, loader).bind(context, snapshot);

		let gl = Self {
			table,
			check_errors: config.errors.check.is_enabled(),
			report_unbound: config.diagnostics.report_unbound,
			tracer: Tracer::new(config.diagnostics.trace_calls),
			system: None,
		};
		report.log_unbound(gl.report_unbound);
		Ok((gl, report))
	}

	/// Opens the system loader for `api` as configured under `[loader]`.
	///
	/// Desktop GL uses `gl_libraries` and `prefer_proc_address`; GLES goes
	/// through `eglGetProcAddress` from `egl_libraries`, then the exports of
	/// `gles_libraries`. Empty lists mean the platform defaults.
	pub fn system_loader(api: ApiKind, config: &Config) -> Result<Box<dyn SymbolLoader>> {
		let loader = &config.loader;
		match api {
			ApiKind::Gl => Ok(platform::default_gl_loader(&loader.gl_libraries, loader.prefer_proc_address)?),
			ApiKind::Gles => Ok(platform::default_gles_loader(&loader.egl_libraries, &loader.gles_libraries)?),
			_ => Err(Error::InvalidArgument {
				command: "system_loader",
				reason: "only GL and GLES contexts have system loaders",
			}),
		}
	}

	/// [`load`](Self::load) through [`system_loader`](Self::system_loader).
	/// The loader is kept for [`rebind_system`](Self::rebind_system) and for as
	/// long as the bound addresses are in use.
	///
	/// # Safety
	///
	/// A context of kind `api` from the configured libraries must be current on
	/// this thread and stay current while the returned value is used.
	pub unsafe fn load_system(api: ApiKind, context: ContextId, config: &Config) -> Result<(Self, BindingReport)> {
		let loader = Self::system_loader(api, config)?;
		// SAFETY: forwarded to the caller.
		let (mut gl, report) = unsafe { Self::load(loader.as_ref(), context, config)? };
		gl.system = Some(loader);
		Ok((gl, report))
	}

	/// [`rebind`](Self::rebind) through the loader kept by
	/// [`load_system`](Self::load_system).
	///
	/// # Safety
	///
	/// Same contract as [`load_system`](Self::load_system), for the newly
	/// current context.
	pub unsafe fn rebind_system(&mut self, context: ContextId) -> Result<BindingReport> {
		let Some(loader) = self.system.take() else {
			return Err(Error::InvalidArgument {
				command: "rebind_system",
				reason: "not loaded through a system loader",
			});
		};
		// SAFETY: forwarded to the caller.
		let result = unsafe { self.rebind(loader.as_ref(), context) };
		self.system = Some(loader);
		result
	}

	/// Rebinds after a different context was made current on this thread.
	///
	/// # Safety
	///
	/// Same contract as [`load`](Self::load), for the newly current context.
	///
	/// The previous context's addresses are dropped first: when the new
	/// context cannot be introspected every wrapper fails with
	/// `NotImplemented` until a later rebind succeeds.
	pub unsafe fn rebind(&mut self, loader: &dyn SymbolLoader, context: ContextId) -> Result<BindingReport> {
		self.table.invalidate();
		// SAFETY: forwarded to the caller.
		let introspection = unsafe { GlIntrospection::new(loader) };
		let snapshot = build_snapshot(&introspection)?;
		let report = Binder::new(&GL_COMMANDS, loader).rebind(&mut self.table, context, snapshot);
		report.log_unbound(self.report_unbound);
		Ok(report)
	}

	/// Routes call tracing to `sink` and turns it on.
	pub fn with_sink(mut self, sink: impl CallSink + 'static) -> Self {
		self.tracer.set_sink(Box::new(sink));
		self.tracer.set_enabled(true);
		self
	}

	pub fn set_error_checks(&mut self, enabled: bool) {
		self.check_errors = enabled;
	}

	pub fn snapshot(&self) -> &CapabilitySnapshot {
		self.table.snapshot()
	}

	pub fn context(&self) -> ContextId {
		self.table.context()
	}

	pub fn bound_table(&self) -> &BoundTable {
		&self.table
	}

	pub fn is_available(&self, cmd: GlCommand) -> bool {
		self.table.is_bound(cmd)
	}

	/// Symbol currently serving `cmd`.
	pub fn selected_symbol(&self, cmd: GlCommand) -> Option<&'static str> {
		self.table.entry(cmd).ok().map(|e| e.symbol())
	}

	/// # Safety
	///
	/// `F` must be the signature of every alias of `cmd`.
	unsafe fn call<F: Copy, R>(&self, cmd: GlCommand, args: &dyn fmt::Debug, invoke: impl FnOnce(F) -> R) -> Result<R> {
		let (symbol, result) = match self.table.entry(cmd) {
			Ok(entry) => {
				// SAFETY: signature is the caller's contract.
				let value = invoke(unsafe { entry.cast::<F>() });
				(Some(entry.symbol()), self.check(cmd).map(|()| value))
			}
			Err(e) => (None, Err(e.into())),
		};
		self.tracer.record(cmd.name(), symbol, args, &result);
		result
	}

	fn check(&self, cmd: GlCommand) -> Result<()> {
		if !self.check_errors || cmd == GlCommand::GetError {
			return Ok(());
		}
		let Ok(entry) = self.table.entry(GlCommand::GetError) else {
			return Ok(());
		};
		// SAFETY: `glGetError` has this signature.
		let get_error = GetError(unsafe { entry.cast::<PFNGLGETERRORPROC>() });
		Ok(check_sync(cmd.name(), &get_error)?)
	}

	/// Reads one pending error code without interpretation.
	pub fn get_error(&self) -> Result<GLenum> {
		// SAFETY: `glGetError` has this signature.
		unsafe { self.call(GlCommand::GetError, &(), |f: PFNGLGETERRORPROC| f()) }
	}

	pub fn get_string(&self, name: GLenum) -> Result<Option<String>> {
		// SAFETY: `glGetString` has this signature.
		let ptr = unsafe { self.call(GlCommand::GetString, &name, |f: PFNGLGETSTRINGPROC| f(name)) }?;
		Ok(owned_string(ptr))
	}

	pub fn get_string_indexed(&self, name: GLenum, index: GLuint) -> Result<Option<String>> {
		// SAFETY: `glGetStringi` has this signature.
		let ptr = unsafe {
			self.call(GlCommand::GetStringi, &(name, index), |f: PFNGLGETSTRINGIPROC| f(name, index))
		}?;
		Ok(owned_string(ptr))
	}

	pub fn get_integer(&self, name: GLenum) -> Result<GLint> {
		let mut value = 0;
		// SAFETY: `glGetIntegerv` has this signature.
		unsafe {
			self.call(GlCommand::GetIntegerv, &name, |f: PFNGLGETINTEGERVPROC| f(name, &mut value))?;
		}
		Ok(value)
	}

	pub fn flush(&self) -> Result<()> {
		// SAFETY: `glFlush` has this signature.
		unsafe { self.call(GlCommand::Flush, &(), |f: PFNGLVOIDPROC| f()) }
	}

	pub fn finish(&self) -> Result<()> {
		// SAFETY: `glFinish` has this signature.
		unsafe { self.call(GlCommand::Finish, &(), |f: PFNGLVOIDPROC| f()) }
	}

	pub fn clear(&self, mask: GLbitfield) -> Result<()> {
		// SAFETY: `glClear` has this signature.
		unsafe { self.call(GlCommand::Clear, &mask, |f: PFNGLCLEARPROC| f(mask)) }
	}

	pub fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) -> Result<()> {
		// SAFETY: `glClearColor` has this signature.
		unsafe { self.call(GlCommand::ClearColor, &(r, g, b, a), |f: PFNGLCLEARCOLORPROC| f(r, g, b, a)) }
	}

	pub fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) -> Result<()> {
		// SAFETY: `glViewport` has this signature.
		unsafe {
			self.call(GlCommand::Viewport, &(x, y, width, height), |f: PFNGLVIEWPORTPROC| {
				f(x, y, width, height)
			})
		}
	}

	/// Unavailable on core profiles.
	pub fn begin(&self, mode: GLenum) -> Result<()> {
		// SAFETY: `glBegin` has this signature.
		unsafe { self.call(GlCommand::Begin, &mode, |f: PFNGLBEGINPROC| f(mode)) }
	}

	pub fn end(&self) -> Result<()> {
		// SAFETY: `glEnd` has this signature.
		unsafe { self.call(GlCommand::End, &(), |f: PFNGLVOIDPROC| f()) }
	}

	fn gen_names(&self, cmd: GlCommand, count: usize) -> Result<Vec<GLuint>> {
		let n = GLsizei::try_from(count).map_err(|_| Error::InvalidArgument {
			command: cmd.name(),
			reason: "too many names requested",
		})?;
		let mut names = vec![0; count];
		// SAFETY: every `glGen*` alias is `PFNGLGENNAMESPROC`.
		unsafe { self.call(cmd, &n, |f: PFNGLGENNAMESPROC| f(n, names.as_mut_ptr())) }?;
		Ok(names)
	}

	fn delete_names(&self, cmd: GlCommand, names: &[GLuint]) -> Result<()> {
		let n = GLsizei::try_from(names.len()).map_err(|_| Error::InvalidArgument {
			command: cmd.name(),
			reason: "too many names",
		})?;
		// SAFETY: every `glDelete*` alias is `PFNGLDELETENAMESPROC`.
		unsafe { self.call(cmd, &names, |f: PFNGLDELETENAMESPROC| f(n, names.as_ptr())) }
	}

	pub fn gen_queries(&self, count: usize) -> Result<Vec<GLuint>> {
		self.gen_names(GlCommand::GenQueries, count)
	}

	pub fn delete_queries(&self, queries: &[GLuint]) -> Result<()> {
		self.delete_names(GlCommand::DeleteQueries, queries)
	}

	pub fn begin_query(&self, target: GLenum, query: GLuint) -> Result<()> {
		// SAFETY: every `glBeginQuery*` alias has this signature.
		unsafe { self.call(GlCommand::BeginQuery, &(target, query), |f: PFNGLBEGINQUERYPROC| f(target, query)) }
	}

	pub fn end_query(&self, target: GLenum) -> Result<()> {
		// SAFETY: every `glEndQuery*` alias has this signature.
		unsafe { self.call(GlCommand::EndQuery, &target, |f: PFNGLENDQUERYPROC| f(target)) }
	}

	pub fn query_counter(&self, query: GLuint, target: GLenum) -> Result<()> {
		// SAFETY: every `glQueryCounter*` alias has this signature.
		unsafe {
			self.call(GlCommand::QueryCounter, &(query, target), |f: PFNGLQUERYCOUNTERPROC| f(query, target))
		}
	}

	pub fn get_query_object_u64(&self, query: GLuint, pname: GLenum) -> Result<GLuint64> {
		let mut value = 0;
		// SAFETY: every `glGetQueryObjectui64v*` alias has this signature.
		unsafe {
			self.call(GlCommand::GetQueryObjectui64v, &(query, pname), |f: PFNGLGETQUERYOBJECTUI64VPROC| {
				f(query, pname, &mut value)
			})?;
		}
		Ok(value)
	}

	pub fn gen_buffers(&self, count: usize) -> Result<Vec<GLuint>> {
		self.gen_names(GlCommand::GenBuffers, count)
	}

	pub fn delete_buffers(&self, buffers: &[GLuint]) -> Result<()> {
		self.delete_names(GlCommand::DeleteBuffers, buffers)
	}

	pub fn bind_buffer(&self, target: GLenum, buffer: GLuint) -> Result<()> {
		// SAFETY: every `glBindBuffer*` alias has this signature.
		unsafe { self.call(GlCommand::BindBuffer, &(target, buffer), |f: PFNGLBINDBUFFERPROC| f(target, buffer)) }
	}

	pub fn buffer_data(&self, target: GLenum, data: &[u8], usage: GLenum) -> Result<()> {
		let size = GLsizeiptr::try_from(data.len()).map_err(|_| Error::InvalidArgument {
			command: GlCommand::BufferData.name(),
			reason: "buffer too large",
		})?;
		// SAFETY: every `glBufferData*` alias has this signature.
		unsafe {
			self.call(GlCommand::BufferData, &(target, size, usage), |f: PFNGLBUFFERDATAPROC| {
				f(target, size, data.as_ptr().cast(), usage)
			})
		}
	}

	/// Maps a range of the buffer bound to `target`. The pointer stays valid
	/// until [`unmap_buffer`](Self::unmap_buffer).
	pub fn map_buffer_range(
		&self,
		target: GLenum,
		offset: GLintptr,
		length: GLsizeiptr,
		access: GLbitfield,
	) -> Result<*mut c_void> {
		// SAFETY: every `glMapBufferRange*` alias has this signature.
		let ptr = unsafe {
			self.call(GlCommand::MapBufferRange, &(target, offset, length, access), |f: PFNGLMAPBUFFERRANGEPROC| {
				f(target, offset, length, access)
			})
		}?;
		if ptr.is_null() {
			return Err(Error::NullHandle {
				command: GlCommand::MapBufferRange.name(),
			});
		}
		Ok(ptr)
	}

	/// Returns `false` when the buffer contents were corrupted while mapped.
	pub fn unmap_buffer(&self, target: GLenum) -> Result<bool> {
		// SAFETY: every `glUnmapBuffer*` alias has this signature.
		let ok = unsafe { self.call(GlCommand::UnmapBuffer, &target, |f: PFNGLUNMAPBUFFERPROC| f(target)) }?;
		Ok(ok != GL_FALSE)
	}

	pub fn gen_vertex_arrays(&self, count: usize) -> Result<Vec<GLuint>> {
		self.gen_names(GlCommand::GenVertexArrays, count)
	}

	pub fn delete_vertex_arrays(&self, arrays: &[GLuint]) -> Result<()> {
		self.delete_names(GlCommand::DeleteVertexArrays, arrays)
	}

	pub fn bind_vertex_array(&self, array: GLuint) -> Result<()> {
		// SAFETY: every `glBindVertexArray*` alias has this signature.
		unsafe { self.call(GlCommand::BindVertexArray, &array, |f: PFNGLBINDVERTEXARRAYPROC| f(array)) }
	}

	pub fn gen_framebuffers(&self, count: usize) -> Result<Vec<GLuint>> {
		self.gen_names(GlCommand::GenFramebuffers, count)
	}

	pub fn delete_framebuffers(&self, framebuffers: &[GLuint]) -> Result<()> {
		self.delete_names(GlCommand::DeleteFramebuffers, framebuffers)
	}

	pub fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint) -> Result<()> {
		// SAFETY: every `glBindFramebuffer*` alias has this signature.
		unsafe {
			self.call(GlCommand::BindFramebuffer, &(target, framebuffer), |f: PFNGLBINDFRAMEBUFFERPROC| {
				f(target, framebuffer)
			})
		}
	}

	pub fn check_framebuffer_status(&self, target: GLenum) -> Result<GLenum> {
		// SAFETY: every `glCheckFramebufferStatus*` alias has this signature.
		unsafe {
			self.call(GlCommand::CheckFramebufferStatus, &target, |f: PFNGLCHECKFRAMEBUFFERSTATUSPROC| f(target))
		}
	}

	/// Copies `src` to `dst`, both given as `[x0, y0, x1, y1]`.
	pub fn blit_framebuffer(&self, src: [GLint; 4], dst: [GLint; 4], mask: GLbitfield, filter: GLenum) -> Result<()> {
		let [sx0, sy0, sx1, sy1] = src;
		let [dx0, dy0, dx1, dy1] = dst;
		// SAFETY: every `glBlitFramebuffer*` alias has this signature.
		unsafe {
			self.call(GlCommand::BlitFramebuffer, &(src, dst, mask, filter), |f: PFNGLBLITFRAMEBUFFERPROC| {
				f(sx0, sy0, sx1, sy1, dx0, dy0, dx1, dy1, mask, filter)
			})
		}
	}

	pub fn draw_arrays_instanced(&self, mode: GLenum, first: GLint, count: GLsizei, instances: GLsizei) -> Result<()> {
		// SAFETY: every `glDrawArraysInstanced*` alias has this signature.
		unsafe {
			self.call(
				GlCommand::DrawArraysInstanced,
				&(mode, first, count, instances),
				|f: PFNGLDRAWARRAYSINSTANCEDPROC| f(mode, first, count, instances),
			)
		}
	}

	/// Installs a debug message callback.
	///
	/// # Safety
	///
	/// `user_param` is passed back to `callback` unchanged, possibly from a
	/// driver thread; it must stay valid for as long as the callback is set.
	pub unsafe fn debug_message_callback(&self, callback: GLDEBUGPROC, user_param: *const c_void) -> Result<()> {
		// SAFETY: every `glDebugMessageCallback*` alias has this signature.
		unsafe {
			self.call(GlCommand::DebugMessageCallback, &user_param, |f: PFNGLDEBUGMESSAGECALLBACKPROC| {
				f(callback, user_param)
			})
		}
	}

	/// Reads `program`'s binary into `buffer`, returning the written length
	/// and the binary format.
	pub fn get_program_binary(&self, program: GLuint, buffer: &mut [u8]) -> Result<(usize, GLenum)> {
		let capacity = GLsizei::try_from(buffer.len()).unwrap_or(GLsizei::MAX);
		let mut length: GLsizei = 0;
		let mut format: GLenum = 0;
		// SAFETY: every `glGetProgramBinary*` alias has this signature.
		unsafe {
			self.call(GlCommand::GetProgramBinary, &(program, capacity), |f: PFNGLGETPROGRAMBINARYPROC| {
				f(program, capacity, &mut length, &mut format, buffer.as_mut_ptr().cast())
			})?;
		}
		let written = usize::try_from(length).unwrap_or(0).min(buffer.len());
		Ok((written, format))
	}
}

impl fmt::Debug for Gl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Gl")
			.field("context", &self.table.context())
			.field("snapshot", self.table.snapshot())
			.field("check_errors", &self.check_errors)
			.field("system_loader", &self.system.is_some())
			.finish_non_exhaustive()
	}
}
