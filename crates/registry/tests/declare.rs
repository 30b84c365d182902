//! Tables declared from outside the registry crate.

use glaze_primitives::{ApiKind, CapabilitySnapshot, ExtensionSet, Profile, Version};
use glaze_registry::feature::{gl, gl_core, gl_ext, gles, gles_ext};
use glaze_registry::{CommandId, Feature, alias_table};
use pretty_assertions::assert_eq;

alias_table! {
	/// Timer-query subset used by a frame profiler.
	static TIMER_COMMANDS: "timer";

	enum TimerCommand {
		/// Generates query object names.
		GenQueries = "gen_queries" {
			"glGenQueries" => [gl(1, 5), gles(3, 0)],
			"glGenQueriesARB" => [gl_ext("GL_ARB_occlusion_query")],
			"glGenQueriesEXT" => [gles_ext("GL_EXT_disjoint_timer_query")],
		}
		QueryCounter = "query_counter" {
			"glQueryCounter" => [gl(3, 3), gl_ext("GL_ARB_timer_query")],
			"glQueryCounterEXT" => [gles_ext("GL_EXT_disjoint_timer_query")],
		}
		/// Compatibility-only immediate mode.
		Begin = "begin" {
			"glBegin" => [gl(1, 0)] removed_by [gl_core(3, 2)],
		}
		ClipControl = "clip_control" {
			"glClipControl" => [Feature::since(ApiKind::Gl, 4, 5).with_profile(Profile::Core)],
		}
	}
}

fn eligible(cmd: TimerCommand, snapshot: &CapabilitySnapshot) -> Vec<&'static str> {
	cmd.command().eligible(snapshot).map(|(_, alias)| alias.symbol).collect()
}

fn es2_with_timer() -> CapabilitySnapshot {
	CapabilitySnapshot::new(ApiKind::Gles, Version::new(2, 0))
		.with_extensions(["GL_EXT_disjoint_timer_query"].into_iter().collect::<ExtensionSet>())
}

#[test]
fn declared_table_is_well_formed() {
	assert_eq!(TIMER_COMMANDS.validate(), Ok(()));
	assert_eq!(TIMER_COMMANDS.label, "timer");
	assert_eq!(TIMER_COMMANDS.len(), TimerCommand::ALL.len());
	assert_eq!(TIMER_COMMANDS.alias_count(), 7);
}

#[test]
fn ids_follow_declaration_order() {
	for (index, cmd) in TimerCommand::ALL.iter().enumerate() {
		assert_eq!(cmd.id(), CommandId::new(index as u16));
		assert_eq!(CommandId::from(*cmd).index(), index);
		assert_eq!(TIMER_COMMANDS.find(cmd.name()).map(|(id, _)| id), Some(cmd.id()));
	}
	assert_eq!(TimerCommand::QueryCounter.name(), "query_counter");
}

#[test]
fn vendor_aliases_cover_older_contexts() {
	let snapshot = es2_with_timer();
	assert_eq!(eligible(TimerCommand::GenQueries, &snapshot), vec!["glGenQueriesEXT"]);
	assert_eq!(eligible(TimerCommand::QueryCounter, &snapshot), vec!["glQueryCounterEXT"]);
	assert!(eligible(TimerCommand::Begin, &snapshot).is_empty());
}

#[test]
fn canonical_alias_precedes_vendor_variant() {
	let snapshot = CapabilitySnapshot::new(ApiKind::Gl, Version::new(3, 3))
		.with_profile(Profile::Compatibility)
		.with_extensions(["GL_ARB_occlusion_query", "GL_ARB_timer_query"].into_iter().collect::<ExtensionSet>());
	assert_eq!(eligible(TimerCommand::GenQueries, &snapshot), vec!["glGenQueries", "glGenQueriesARB"]);
	assert_eq!(eligible(TimerCommand::QueryCounter, &snapshot), vec!["glQueryCounter"]);
}

#[test]
fn profile_gates_removal_and_introduction() {
	let compat = CapabilitySnapshot::new(ApiKind::Gl, Version::new(4, 6)).with_profile(Profile::Compatibility);
	let core = CapabilitySnapshot::new(ApiKind::Gl, Version::new(4, 6)).with_profile(Profile::Core);

	assert_eq!(eligible(TimerCommand::Begin, &compat), vec!["glBegin"]);
	assert!(eligible(TimerCommand::Begin, &core).is_empty());
	assert!(eligible(TimerCommand::ClipControl, &compat).is_empty());
	assert_eq!(eligible(TimerCommand::ClipControl, &core), vec!["glClipControl"]);
}
