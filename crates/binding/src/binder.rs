use glaze_loader::SymbolLoader;
use glaze_primitives::CapabilitySnapshot;
use glaze_registry::AliasTable;

use crate::{BindingReport, BoundTable, ContextId};

/// Resolves the eligible aliases of one [`AliasTable`] through a loader.
///
/// Binding writes only to the [`BoundTable`] it is given, so binders on
/// different threads (for different current contexts) never coordinate.
pub struct Binder<'l> {
	table: &'static AliasTable,
	loader: &'l dyn SymbolLoader,
}

impl<'l> Binder<'l> {
	pub fn new(table: &'static AliasTable, loader: &'l dyn SymbolLoader) -> Self {
		Self { table, loader }
	}

	/// Binds a fresh table for `context`.
	pub fn bind(&self, context: ContextId, snapshot: CapabilitySnapshot) -> (BoundTable, BindingReport) {
		let mut bound = BoundTable::empty(self.table, context, snapshot);
		let report = self.populate(&mut bound);
		(bound, report)
	}

	/// Clears `bound` and binds it again for `context` and `snapshot`.
	///
	/// Call after making a different context current on this thread; stale
	/// addresses from the previous context are discarded first. `bound` keeps
	/// the alias table it was created for, whatever table this binder holds.
	pub fn rebind(&self, bound: &mut BoundTable, context: ContextId, snapshot: CapabilitySnapshot) -> BindingReport {
		if !std::ptr::eq(bound.table(), self.table) {
			tracing::debug!(binder = self.table.label, table = bound.table().label, "rebinding with the table's own commands");
		}
		bound.reset(context, snapshot);
		self.populate(bound)
	}

	fn populate(&self, bound: &mut BoundTable) -> BindingReport {
		let table = bound.table();
		let snapshot = bound.snapshot().clone();
		let mut report = BindingReport::new(table.label, bound.context());

		for i in 0..table.len() {
			let (command, slots) = bound.command_slots_mut(i);
			let mut selected = None;

			for (slot, alias) in slots.iter_mut().zip(command.aliases) {
				if !alias.is_eligible(&snapshot) {
					continue;
				}
				report.eligible += 1;

				match self.loader.resolve(alias.symbol) {
					Ok(address) => {
						slot.address = Some(address);
						report.bound += 1;
						selected.get_or_insert(alias.symbol);
					}
					Err(e) => {
						tracing::trace!(command = command.name, symbol = alias.symbol, error = %e, "alias not resolved");
					}
				}
			}

			match selected {
				Some(symbol) => report.selected.push((command.name, symbol)),
				None => report.unbound.push(command.name),
			}
		}

		tracing::debug!(
			table = report.table,
			context = %report.context,
			eligible = report.eligible,
			bound = report.bound,
			unbound = report.unbound.len(),
			"bound alias table"
		);
		report
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use glaze_loader::{Address, FnLoader};
	use glaze_primitives::{ApiKind, Profile, Version};
	use glaze_registry::alias_table;
	use glaze_registry::feature::{gl, gl_core, gl_ext};
	use pretty_assertions::assert_eq;

	use super::*;

	alias_table! {
		static TEST_COMMANDS: "test";

		enum TestCommand {
			Draw = "draw" {
				"glDraw" => [gl(4, 0)],
				"glDrawARB" => [gl_ext("GL_ARB_draw")],
			}
			Legacy = "legacy" {
				"glLegacy" => [gl(1, 0)] removed_by [gl_core(3, 2)],
			}
		}
	}

	extern "system" fn stub() {}

	#[test]
	fn only_eligible_aliases_are_resolved() {
		let asked = RefCell::new(Vec::new());
		let loader = FnLoader(|symbol: &str| {
			asked.borrow_mut().push(symbol.to_string());
			Some(Address::of_fn(stub as extern "system" fn()))
		});
		let snapshot = CapabilitySnapshot::new(ApiKind::Gl, Version::new(4, 1)).with_profile(Profile::Core);

		let (bound, report) = Binder::new(&TEST_COMMANDS, &loader).bind(ContextId::new(1), snapshot);

		assert_eq!(*asked.borrow(), vec!["glDraw".to_string()]);
		assert!(bound.is_bound(TestCommand::Draw));
		assert!(!bound.is_bound(TestCommand::Legacy));
		assert_eq!(report.unbound, vec!["legacy"]);
		assert_eq!(report.selected, vec![("draw", "glDraw")]);
		assert_eq!((report.eligible, report.bound), (1, 1));
	}

	#[test]
	fn rebind_discards_previous_addresses() {
		let loader = FnLoader(|_: &str| Some(Address::of_fn(stub as extern "system" fn())));
		let binder = Binder::new(&TEST_COMMANDS, &loader);
		let compat = CapabilitySnapshot::new(ApiKind::Gl, Version::new(2, 1));
		let (mut bound, _) = binder.bind(ContextId::new(1), compat);
		assert!(bound.is_bound(TestCommand::Legacy));

		let core = CapabilitySnapshot::new(ApiKind::Gl, Version::new(4, 6)).with_profile(Profile::Core);
		let report = binder.rebind(&mut bound, ContextId::new(2), core);

		assert_eq!(bound.context(), ContextId::new(2));
		assert!(!bound.is_bound(TestCommand::Legacy));
		assert_eq!(report.unbound, vec!["legacy"]);
	}

	alias_table! {
		static OTHER_COMMANDS: "other";

		enum OtherCommand {
			Only = "only" {
				"glOnly" => [gl(1, 0)],
			}
		}
	}

	#[test]
	fn rebind_uses_the_bound_tables_commands() {
		let loader = FnLoader(|_: &str| Some(Address::of_fn(stub as extern "system" fn())));
		let snapshot = CapabilitySnapshot::new(ApiKind::Gl, Version::new(4, 6)).with_profile(Profile::Core);
		let (mut bound, _) = Binder::new(&OTHER_COMMANDS, &loader).bind(ContextId::new(1), snapshot.clone());

		let report = Binder::new(&TEST_COMMANDS, &loader).rebind(&mut bound, ContextId::new(2), snapshot);

		assert!(std::ptr::eq(bound.table(), &OTHER_COMMANDS));
		assert_eq!(report.table, "other");
		assert_eq!(report.selected, vec![("only", "glOnly")]);
		assert!(bound.is_bound(OtherCommand::Only));
	}
}
