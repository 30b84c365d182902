//! GLX commands issued against an X display connection.
//!
//! `glXQueryVersion` and `glXQueryExtensionsString` are not listed: they are
//! what the capability snapshot is built from, so they are resolved directly.

use crate::alias_table;
use crate::feature::{glx, glx_ext};

alias_table! {
	pub static GLX_COMMANDS: "glx";

	pub enum GlxCommand {
		GetProcAddress = "get_proc_address" {
			"glXGetProcAddress" => [glx(1, 4)],
			"glXGetProcAddressARB" => [glx_ext("GLX_ARB_get_proc_address")],
		}
		ChooseFbConfig = "choose_fb_config" {
			"glXChooseFBConfig" => [glx(1, 3)],
			"glXChooseFBConfigSGIX" => [glx_ext("GLX_SGIX_fbconfig")],
		}
		CreateContextAttribs = "create_context_attribs" {
			"glXCreateContextAttribsARB" => [glx_ext("GLX_ARB_create_context")],
		}
		DestroyContext = "destroy_context" {
			"glXDestroyContext" => [glx(1, 0)],
		}
		MakeContextCurrent = "make_context_current" {
			"glXMakeContextCurrent" => [glx(1, 3)],
			"glXMakeCurrentReadSGI" => [glx_ext("GLX_SGI_make_current_read")],
		}
		GetCurrentContext = "get_current_context" {
			"glXGetCurrentContext" => [glx(1, 0)],
		}
		SwapBuffers = "swap_buffers" {
			"glXSwapBuffers" => [glx(1, 0)],
		}
		/// The three aliases differ in signature; callers adapt per alias index.
		SwapInterval = "swap_interval" {
			"glXSwapIntervalEXT" => [glx_ext("GLX_EXT_swap_control")],
			"glXSwapIntervalMESA" => [glx_ext("GLX_MESA_swap_control")],
			"glXSwapIntervalSGI" => [glx_ext("GLX_SGI_swap_control")],
		}
	}
}
