//! OpenGL and OpenGL ES context commands.

use crate::alias_table;
use crate::feature::{gl, gl_core, gl_ext, gles, gles_ext};

alias_table! {
	/// Alias table for [`GlCommand`].
	pub static GL_COMMANDS: "gl";

	/// Logical GL/GLES commands.
	pub enum GlCommand {
		GetError = "get_error" {
			"glGetError" => [gl(1, 0), gles(1, 0)],
		}
		GetString = "get_string" {
			"glGetString" => [gl(1, 0), gles(1, 0)],
		}
		GetStringi = "get_stringi" {
			"glGetStringi" => [gl(3, 0), gles(3, 0)],
		}
		GetIntegerv = "get_integerv" {
			"glGetIntegerv" => [gl(1, 0), gles(1, 0)],
		}
		Flush = "flush" {
			"glFlush" => [gl(1, 0), gles(1, 0)],
		}
		Finish = "finish" {
			"glFinish" => [gl(1, 0), gles(1, 0)],
		}
		Clear = "clear" {
			"glClear" => [gl(1, 0), gles(1, 0)],
		}
		ClearColor = "clear_color" {
			"glClearColor" => [gl(1, 0), gles(1, 0)],
		}
		Viewport = "viewport" {
			"glViewport" => [gl(1, 0), gles(1, 0)],
		}

		/// Immediate mode; retired from core profiles.
		Begin = "begin" {
			"glBegin" => [gl(1, 0)] removed_by [gl_core(3, 2)],
		}
		End = "end" {
			"glEnd" => [gl(1, 0)] removed_by [gl_core(3, 2)],
		}

		GenQueries = "gen_queries" {
			"glGenQueries" => [gl(1, 5), gles(3, 0)],
			"glGenQueriesARB" => [gl_ext("GL_ARB_occlusion_query")],
			"glGenQueriesEXT" => [
				gles_ext("GL_EXT_occlusion_query_boolean"),
				gles_ext("GL_EXT_disjoint_timer_query"),
			],
		}
		DeleteQueries = "delete_queries" {
			"glDeleteQueries" => [gl(1, 5), gles(3, 0)],
			"glDeleteQueriesARB" => [gl_ext("GL_ARB_occlusion_query")],
			"glDeleteQueriesEXT" => [
				gles_ext("GL_EXT_occlusion_query_boolean"),
				gles_ext("GL_EXT_disjoint_timer_query"),
			],
		}
		BeginQuery = "begin_query" {
			"glBeginQuery" => [gl(1, 5), gles(3, 0)],
			"glBeginQueryARB" => [gl_ext("GL_ARB_occlusion_query")],
			"glBeginQueryEXT" => [
				gles_ext("GL_EXT_occlusion_query_boolean"),
				gles_ext("GL_EXT_disjoint_timer_query"),
			],
		}
		EndQuery = "end_query" {
			"glEndQuery" => [gl(1, 5), gles(3, 0)],
			"glEndQueryARB" => [gl_ext("GL_ARB_occlusion_query")],
			"glEndQueryEXT" => [
				gles_ext("GL_EXT_occlusion_query_boolean"),
				gles_ext("GL_EXT_disjoint_timer_query"),
			],
		}
		QueryCounter = "query_counter" {
			"glQueryCounter" => [gl(3, 3), gl_ext("GL_ARB_timer_query")],
			"glQueryCounterEXT" => [gles_ext("GL_EXT_disjoint_timer_query")],
		}
		GetQueryObjectui64v = "get_query_object_ui64v" {
			"glGetQueryObjectui64v" => [gl(3, 3), gl_ext("GL_ARB_timer_query")],
			"glGetQueryObjectui64vEXT" => [
				gl_ext("GL_EXT_timer_query"),
				gles_ext("GL_EXT_disjoint_timer_query"),
			],
		}

		GenBuffers = "gen_buffers" {
			"glGenBuffers" => [gl(1, 5), gles(1, 1)],
			"glGenBuffersARB" => [gl_ext("GL_ARB_vertex_buffer_object")],
		}
		DeleteBuffers = "delete_buffers" {
			"glDeleteBuffers" => [gl(1, 5), gles(1, 1)],
			"glDeleteBuffersARB" => [gl_ext("GL_ARB_vertex_buffer_object")],
		}
		BindBuffer = "bind_buffer" {
			"glBindBuffer" => [gl(1, 5), gles(1, 1)],
			"glBindBufferARB" => [gl_ext("GL_ARB_vertex_buffer_object")],
		}
		BufferData = "buffer_data" {
			"glBufferData" => [gl(1, 5), gles(1, 1)],
			"glBufferDataARB" => [gl_ext("GL_ARB_vertex_buffer_object")],
		}
		MapBufferRange = "map_buffer_range" {
			"glMapBufferRange" => [gl(3, 0), gl_ext("GL_ARB_map_buffer_range"), gles(3, 0)],
			"glMapBufferRangeEXT" => [gles_ext("GL_EXT_map_buffer_range")],
		}
		UnmapBuffer = "unmap_buffer" {
			"glUnmapBuffer" => [gl(1, 5), gles(3, 0)],
			"glUnmapBufferARB" => [gl_ext("GL_ARB_vertex_buffer_object")],
			"glUnmapBufferOES" => [gles_ext("GL_OES_mapbuffer")],
		}

		GenVertexArrays = "gen_vertex_arrays" {
			"glGenVertexArrays" => [gl(3, 0), gl_ext("GL_ARB_vertex_array_object"), gles(3, 0)],
			"glGenVertexArraysAPPLE" => [gl_ext("GL_APPLE_vertex_array_object")],
			"glGenVertexArraysOES" => [gles_ext("GL_OES_vertex_array_object")],
		}
		DeleteVertexArrays = "delete_vertex_arrays" {
			"glDeleteVertexArrays" => [gl(3, 0), gl_ext("GL_ARB_vertex_array_object"), gles(3, 0)],
			"glDeleteVertexArraysAPPLE" => [gl_ext("GL_APPLE_vertex_array_object")],
			"glDeleteVertexArraysOES" => [gles_ext("GL_OES_vertex_array_object")],
		}
		BindVertexArray = "bind_vertex_array" {
			"glBindVertexArray" => [gl(3, 0), gl_ext("GL_ARB_vertex_array_object"), gles(3, 0)],
			"glBindVertexArrayAPPLE" => [gl_ext("GL_APPLE_vertex_array_object")],
			"glBindVertexArrayOES" => [gles_ext("GL_OES_vertex_array_object")],
		}

		GenFramebuffers = "gen_framebuffers" {
			"glGenFramebuffers" => [gl(3, 0), gl_ext("GL_ARB_framebuffer_object"), gles(2, 0)],
			"glGenFramebuffersEXT" => [gl_ext("GL_EXT_framebuffer_object")],
			"glGenFramebuffersOES" => [gles_ext("GL_OES_framebuffer_object")],
		}
		DeleteFramebuffers = "delete_framebuffers" {
			"glDeleteFramebuffers" => [gl(3, 0), gl_ext("GL_ARB_framebuffer_object"), gles(2, 0)],
			"glDeleteFramebuffersEXT" => [gl_ext("GL_EXT_framebuffer_object")],
			"glDeleteFramebuffersOES" => [gles_ext("GL_OES_framebuffer_object")],
		}
		BindFramebuffer = "bind_framebuffer" {
			"glBindFramebuffer" => [gl(3, 0), gl_ext("GL_ARB_framebuffer_object"), gles(2, 0)],
			"glBindFramebufferEXT" => [gl_ext("GL_EXT_framebuffer_object")],
			"glBindFramebufferOES" => [gles_ext("GL_OES_framebuffer_object")],
		}
		CheckFramebufferStatus = "check_framebuffer_status" {
			"glCheckFramebufferStatus" => [gl(3, 0), gl_ext("GL_ARB_framebuffer_object"), gles(2, 0)],
			"glCheckFramebufferStatusEXT" => [gl_ext("GL_EXT_framebuffer_object")],
			"glCheckFramebufferStatusOES" => [gles_ext("GL_OES_framebuffer_object")],
		}
		BlitFramebuffer = "blit_framebuffer" {
			"glBlitFramebuffer" => [gl(3, 0), gl_ext("GL_ARB_framebuffer_object"), gles(3, 0)],
			"glBlitFramebufferEXT" => [gl_ext("GL_EXT_framebuffer_blit")],
			"glBlitFramebufferANGLE" => [gles_ext("GL_ANGLE_framebuffer_blit")],
			"glBlitFramebufferNV" => [gles_ext("GL_NV_framebuffer_blit")],
		}

		DrawArraysInstanced = "draw_arrays_instanced" {
			"glDrawArraysInstanced" => [gl(3, 1), gles(3, 0)],
			"glDrawArraysInstancedARB" => [gl_ext("GL_ARB_draw_instanced")],
			"glDrawArraysInstancedEXT" => [gl_ext("GL_EXT_draw_instanced"), gles_ext("GL_EXT_draw_instanced")],
			"glDrawArraysInstancedANGLE" => [gles_ext("GL_ANGLE_instanced_arrays")],
		}

		DebugMessageCallback = "debug_message_callback" {
			"glDebugMessageCallback" => [gl(4, 3), gl_ext("GL_KHR_debug"), gles(3, 2)],
			"glDebugMessageCallbackKHR" => [gles_ext("GL_KHR_debug")],
			"glDebugMessageCallbackARB" => [gl_ext("GL_ARB_debug_output")],
		}

		GetProgramBinary = "get_program_binary" {
			"glGetProgramBinary" => [gl(4, 1), gl_ext("GL_ARB_get_program_binary"), gles(3, 0)],
			"glGetProgramBinaryOES" => [gles_ext("GL_OES_get_program_binary")],
		}
	}
}
