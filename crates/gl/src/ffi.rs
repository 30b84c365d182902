//! Native GL and GLX types, constants and entry point signatures.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_int, c_uint, c_ulong, c_void};

pub type GLenum = c_uint;
pub type GLbitfield = c_uint;
pub type GLuint = c_uint;
pub type GLint = c_int;
pub type GLsizei = c_int;
pub type GLboolean = u8;
pub type GLfloat = f32;
pub type GLchar = c_char;
pub type GLintptr = isize;
pub type GLsizeiptr = isize;
pub type GLuint64 = u64;

pub const GL_NO_ERROR: GLenum = 0;
pub const GL_INVALID_ENUM: GLenum = 0x0500;
pub const GL_INVALID_VALUE: GLenum = 0x0501;
pub const GL_INVALID_OPERATION: GLenum = 0x0502;
pub const GL_STACK_OVERFLOW: GLenum = 0x0503;
pub const GL_STACK_UNDERFLOW: GLenum = 0x0504;
pub const GL_OUT_OF_MEMORY: GLenum = 0x0505;
pub const GL_INVALID_FRAMEBUFFER_OPERATION: GLenum = 0x0506;
pub const GL_CONTEXT_LOST: GLenum = 0x0507;

pub const GL_FALSE: GLboolean = 0;
pub const GL_TRUE: GLboolean = 1;

pub const GL_VENDOR: GLenum = 0x1F00;
pub const GL_RENDERER: GLenum = 0x1F01;
pub const GL_VERSION: GLenum = 0x1F02;
pub const GL_EXTENSIONS: GLenum = 0x1F03;
pub const GL_SHADING_LANGUAGE_VERSION: GLenum = 0x8B8C;
pub const GL_MAJOR_VERSION: GLenum = 0x821B;
pub const GL_MINOR_VERSION: GLenum = 0x821C;
pub const GL_NUM_EXTENSIONS: GLenum = 0x821D;
pub const GL_CONTEXT_PROFILE_MASK: GLenum = 0x9126;

pub const GL_COLOR_BUFFER_BIT: GLbitfield = 0x0000_4000;
pub const GL_DEPTH_BUFFER_BIT: GLbitfield = 0x0000_0100;
pub const GL_STENCIL_BUFFER_BIT: GLbitfield = 0x0000_0400;

pub const GL_TRIANGLES: GLenum = 0x0004;
pub const GL_ARRAY_BUFFER: GLenum = 0x8892;
pub const GL_STATIC_DRAW: GLenum = 0x88E4;
pub const GL_MAP_READ_BIT: GLbitfield = 0x0001;
pub const GL_MAP_WRITE_BIT: GLbitfield = 0x0002;
pub const GL_FRAMEBUFFER: GLenum = 0x8D40;
pub const GL_FRAMEBUFFER_COMPLETE: GLenum = 0x8CD5;
pub const GL_NEAREST: GLenum = 0x2600;
pub const GL_SAMPLES_PASSED: GLenum = 0x8914;
pub const GL_TIME_ELAPSED: GLenum = 0x88BF;
pub const GL_TIMESTAMP: GLenum = 0x8E28;
pub const GL_QUERY_RESULT: GLenum = 0x8866;

/// Symbolic name of a `glGetError` code.
pub fn gl_error_name(code: GLenum) -> Option<&'static str> {
	Some(match code {
		GL_INVALID_ENUM => "GL_INVALID_ENUM",
		GL_INVALID_VALUE => "GL_INVALID_VALUE",
		GL_INVALID_OPERATION => "GL_INVALID_OPERATION",
		GL_STACK_OVERFLOW => "GL_STACK_OVERFLOW",
		GL_STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
		GL_OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
		GL_INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
		GL_CONTEXT_LOST => "GL_CONTEXT_LOST",
		_ => return None,
	})
}

pub type GLDEBUGPROC = Option<
	extern "system" fn(
		source: GLenum,
		kind: GLenum,
		id: GLuint,
		severity: GLenum,
		length: GLsizei,
		message: *const GLchar,
		user_param: *mut c_void,
	),
>;

pub type PFNGLGETERRORPROC = extern "system" fn() -> GLenum;
pub type PFNGLGETSTRINGPROC = extern "system" fn(GLenum) -> *const u8;
pub type PFNGLGETSTRINGIPROC = extern "system" fn(GLenum, GLuint) -> *const u8;
pub type PFNGLGETINTEGERVPROC = extern "system" fn(GLenum, *mut GLint);
pub type PFNGLVOIDPROC = extern "system" fn();
pub type PFNGLCLEARPROC = extern "system" fn(GLbitfield);
pub type PFNGLCLEARCOLORPROC = extern "system" fn(GLfloat, GLfloat, GLfloat, GLfloat);
pub type PFNGLVIEWPORTPROC = extern "system" fn(GLint, GLint, GLsizei, GLsizei);
pub type PFNGLBEGINPROC = extern "system" fn(GLenum);
/// `glGen*` name allocators.
pub type PFNGLGENNAMESPROC = extern "system" fn(GLsizei, *mut GLuint);
/// `glDelete*` name releasers.
pub type PFNGLDELETENAMESPROC = extern "system" fn(GLsizei, *const GLuint);
pub type PFNGLBEGINQUERYPROC = extern "system" fn(GLenum, GLuint);
pub type PFNGLENDQUERYPROC = extern "system" fn(GLenum);
pub type PFNGLQUERYCOUNTERPROC = extern "system" fn(GLuint, GLenum);
pub type PFNGLGETQUERYOBJECTUI64VPROC = extern "system" fn(GLuint, GLenum, *mut GLuint64);
pub type PFNGLBINDBUFFERPROC = extern "system" fn(GLenum, GLuint);
pub type PFNGLBUFFERDATAPROC = extern "system" fn(GLenum, GLsizeiptr, *const c_void, GLenum);
pub type PFNGLMAPBUFFERRANGEPROC = extern "system" fn(GLenum, GLintptr, GLsizeiptr, GLbitfield) -> *mut c_void;
pub type PFNGLUNMAPBUFFERPROC = extern "system" fn(GLenum) -> GLboolean;
pub type PFNGLBINDVERTEXARRAYPROC = extern "system" fn(GLuint);
pub type PFNGLBINDFRAMEBUFFERPROC = extern "system" fn(GLenum, GLuint);
pub type PFNGLCHECKFRAMEBUFFERSTATUSPROC = extern "system" fn(GLenum) -> GLenum;
pub type PFNGLBLITFRAMEBUFFERPROC =
	extern "system" fn(GLint, GLint, GLint, GLint, GLint, GLint, GLint, GLint, GLbitfield, GLenum);
pub type PFNGLDRAWARRAYSINSTANCEDPROC = extern "system" fn(GLenum, GLint, GLsizei, GLsizei);
pub type PFNGLDEBUGMESSAGECALLBACKPROC = extern "system" fn(GLDEBUGPROC, *const c_void);
pub type PFNGLGETPROGRAMBINARYPROC = extern "system" fn(GLuint, GLsizei, *mut GLsizei, *mut GLenum, *mut c_void);

/// Opaque Xlib `Display`.
pub type Display = c_void;
pub type XID = c_ulong;
pub type GLXDrawable = XID;
pub type GLXContext = *mut c_void;
pub type GLXFBConfig = *mut c_void;
pub type Bool = c_int;

pub const GLX_VENDOR: c_int = 1;
pub const GLX_VERSION: c_int = 2;
pub const GLX_EXTENSIONS: c_int = 3;
pub const GLX_CONTEXT_MAJOR_VERSION_ARB: c_int = 0x2091;
pub const GLX_CONTEXT_MINOR_VERSION_ARB: c_int = 0x2092;
pub const GLX_CONTEXT_PROFILE_MASK_ARB: c_int = 0x9126;
pub const GLX_CONTEXT_CORE_PROFILE_BIT_ARB: c_int = 0x0001;
pub const GLX_RENDER_TYPE: c_int = 0x8011;
pub const GLX_RGBA_BIT: c_int = 0x0001;
pub const GLX_DRAWABLE_TYPE: c_int = 0x8010;
pub const GLX_WINDOW_BIT: c_int = 0x0001;
pub const GLX_DOUBLEBUFFER: c_int = 5;

pub type PFNGLXQUERYVERSIONPROC = unsafe extern "C" fn(*mut Display, *mut c_int, *mut c_int) -> Bool;
pub type PFNGLXQUERYEXTENSIONSSTRINGPROC = unsafe extern "C" fn(*mut Display, c_int) -> *const c_char;
pub type PFNGLXCHOOSEFBCONFIGPROC =
	unsafe extern "C" fn(*mut Display, c_int, *const c_int, *mut c_int) -> *mut GLXFBConfig;
pub type PFNGLXCREATECONTEXTATTRIBSARBPROC =
	unsafe extern "C" fn(*mut Display, GLXFBConfig, GLXContext, Bool, *const c_int) -> GLXContext;
pub type PFNGLXDESTROYCONTEXTPROC = unsafe extern "C" fn(*mut Display, GLXContext);
pub type PFNGLXMAKECONTEXTCURRENTPROC =
	unsafe extern "C" fn(*mut Display, GLXDrawable, GLXDrawable, GLXContext) -> Bool;
pub type PFNGLXGETCURRENTCONTEXTPROC = unsafe extern "C" fn() -> GLXContext;
pub type PFNGLXSWAPBUFFERSPROC = unsafe extern "C" fn(*mut Display, GLXDrawable);
pub type PFNGLXSWAPINTERVALEXTPROC = unsafe extern "C" fn(*mut Display, GLXDrawable, c_int);
pub type PFNGLXSWAPINTERVALMESAPROC = unsafe extern "C" fn(c_uint) -> c_int;
pub type PFNGLXSWAPINTERVALSGIPROC = unsafe extern "C" fn(c_int) -> c_int;

pub type PFNXOPENDISPLAYPROC = unsafe extern "C" fn(*const c_char) -> *mut Display;
pub type PFNXCLOSEDISPLAYPROC = unsafe extern "C" fn(*mut Display) -> c_int;
pub type PFNXINITTHREADSPROC = unsafe extern "C" fn() -> c_int;
pub type PFNXSYNCPROC = unsafe extern "C" fn(*mut Display, Bool) -> c_int;
pub type PFNXDEFAULTSCREENPROC = unsafe extern "C" fn(*mut Display) -> c_int;
pub type PFNXFREEPROC = unsafe extern "C" fn(*mut c_void) -> c_int;
