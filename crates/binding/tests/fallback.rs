//! Fallback dispatch over fake native symbols.

use std::cell::Cell;

use glaze_binding::{Binder, BoundTable, ContextId, DispatchError};
use glaze_loader::{Address, FnLoader};
use glaze_primitives::{ApiKind, CapabilitySnapshot, ExtensionSet, Profile, Version};
use glaze_registry::alias_table;
use glaze_registry::feature::{gl, gl_core, gl_ext};
use pretty_assertions::assert_eq;
use rstest::rstest;

alias_table! {
	static SCENARIO: "scenario";

	enum Cmd {
		C = "c" {
			"core_c" => [gl(4, 0)],
			"c_ARB" => [gl_ext("X_ARB_c")],
		}
		Retired = "retired" {
			"glRetired" => [gl(1, 0)] removed_by [gl_core(3, 2)],
			"glRetiredEXT" => [gl_ext("GL_EXT_retired")] removed_by [gl_core(3, 2)],
		}
	}
}

thread_local! {
	// Tests run on separate threads; per-thread counters keep them independent.
	static CORE_CALLS: Cell<usize> = const { Cell::new(0) };
	static ARB_CALLS: Cell<usize> = const { Cell::new(0) };
}

fn calls() -> (usize, usize) {
	(CORE_CALLS.get(), ARB_CALLS.get())
}

type CFn = extern "system" fn() -> u32;

extern "system" fn core_c() -> u32 {
	CORE_CALLS.set(CORE_CALLS.get() + 1);
	1
}

extern "system" fn c_arb() -> u32 {
	ARB_CALLS.set(ARB_CALLS.get() + 1);
	2
}

extern "system" fn retired() -> u32 {
	3
}

fn fake(symbol: &str) -> Option<Address> {
	match symbol {
		"core_c" => Some(Address::of_fn(core_c as CFn)),
		"c_ARB" => Some(Address::of_fn(c_arb as CFn)),
		"glRetired" | "glRetiredEXT" => Some(Address::of_fn(retired as CFn)),
		_ => None,
	}
}

fn snapshot(major: u8, minor: u8, exts: &[&str]) -> CapabilitySnapshot {
	CapabilitySnapshot::new(ApiKind::Gl, Version::new(major, minor))
		.with_extensions(exts.iter().copied().collect::<ExtensionSet>())
}

fn bind_with(snapshot: CapabilitySnapshot, loader: impl Fn(&str) -> Option<Address>) -> BoundTable {
	let loader = FnLoader(loader);
	Binder::new(&SCENARIO, &loader).bind(ContextId::new(1), snapshot).0
}

fn call_c(bound: &BoundTable) -> Result<u32, DispatchError> {
	// SAFETY: every alias of `c` is a `CFn` fake.
	unsafe { bound.dispatch(Cmd::C, |f: CFn| f()) }
}

#[rstest]
#[case::extension_only(snapshot(3, 3, &["X_ARB_c"]), Some("c_ARB"))]
#[case::core_only(snapshot(4, 1, &[]), Some("core_c"))]
#[case::both_prefer_core(snapshot(4, 1, &["X_ARB_c"]), Some("core_c"))]
#[case::neither(snapshot(3, 3, &[]), None)]
fn scenario_selects_expected_alias(#[case] snapshot: CapabilitySnapshot, #[case] expected: Option<&str>) {
	let bound = bind_with(snapshot, fake);
	assert_eq!(bound.entry(Cmd::C).ok().map(|e| e.symbol()), expected);
}

#[test]
fn fallback_never_touches_the_ineligible_first_alias() {
	let bound = bind_with(snapshot(3, 3, &["X_ARB_c"]), fake);
	let before = calls();

	assert_eq!(call_c(&bound), Ok(2));
	assert_eq!(calls(), (before.0, before.1 + 1));
	assert_eq!(bound.bound_aliases(Cmd::C).iter().map(|a| a.symbol).collect::<Vec<_>>(), vec!["c_ARB"]);
}

#[test]
fn exhaustion_fails_without_calling_native_code() {
	let bound = bind_with(snapshot(3, 3, &[]), fake);
	let before = calls();

	assert_eq!(call_c(&bound), Err(DispatchError::NotImplemented { command: "c" }));
	assert_eq!(calls(), before);
}

#[test]
fn missing_symbol_falls_through_to_next_alias() {
	// Version and extension both qualify, but the driver lacks the core export.
	let bound = bind_with(snapshot(4, 5, &["X_ARB_c"]), |symbol| if symbol == "core_c" { None } else { fake(symbol) });
	assert_eq!(bound.entry(Cmd::C).unwrap().symbol(), "c_ARB");
	assert_eq!(bound.entry(Cmd::C).unwrap().alias_index(), 1);
}

#[test]
fn removal_wins_over_introduction() {
	let core = snapshot(4, 6, &["GL_EXT_retired"]).with_profile(Profile::Core);
	let bound = bind_with(core, fake);
	assert!(!bound.is_bound(Cmd::Retired));
	// SAFETY: `retired` fakes are `CFn`.
	let err = unsafe { bound.dispatch(Cmd::Retired, |f: CFn| f()) }.unwrap_err();
	assert_eq!(err, DispatchError::NotImplemented { command: "retired" });

	let compat = snapshot(4, 6, &["GL_EXT_retired"]).with_profile(Profile::Compatibility);
	let bound = bind_with(compat, fake);
	assert_eq!(bound.entry(Cmd::Retired).unwrap().symbol(), "glRetired");
}

#[test]
fn rebinding_tracks_context_switches() {
	let loader = FnLoader(fake);
	let binder = Binder::new(&SCENARIO, &loader);
	let (mut bound, first) = binder.bind(ContextId::new(10), snapshot(4, 1, &[]));
	assert_eq!(first.selected_symbol("c"), Some("core_c"));

	let second = binder.rebind(&mut bound, ContextId::new(11), snapshot(3, 3, &["X_ARB_c"]));
	assert_eq!(second.selected_symbol("c"), Some("c_ARB"));
	assert_eq!(call_c(&bound), Ok(2));

	let third = bound.rebind(ContextId::new(12), snapshot(3, 3, &[]), &loader);
	assert_eq!(bound.context(), ContextId::new(12));
	assert_eq!(third.unbound, vec!["c"]);
	assert!(call_c(&bound).is_err());
}
