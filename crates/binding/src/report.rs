use serde::Serialize;

use crate::ContextId;

/// Outcome of one bind pass, for diagnostics only. Dispatch never consults it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingReport {
	pub table: &'static str,
	pub context: ContextId,
	/// Aliases whose predicates matched the snapshot.
	pub eligible: usize,
	/// Eligible aliases the loader resolved.
	pub bound: usize,
	/// `(command, symbol)` each bound command will dispatch to.
	pub selected: Vec<(&'static str, &'static str)>,
	/// Commands with no bound alias; calling them fails with `NotImplemented`.
	pub unbound: Vec<&'static str>,
}

impl BindingReport {
	pub(crate) fn new(table: &'static str, context: ContextId) -> Self {
		Self {
			table,
			context,
			eligible: 0,
			bound: 0,
			selected: Vec::new(),
			unbound: Vec::new(),
		}
	}

	/// Symbol `command` dispatches to under this binding.
	pub fn selected_symbol(&self, command: &str) -> Option<&'static str> {
		self.selected.iter().find(|(c, _)| *c == command).map(|(_, s)| *s)
	}

	/// Emits the unbound commands, at `warn` when `loud`, else `debug`.
	pub fn log_unbound(&self, loud: bool) {
		if self.unbound.is_empty() {
			return;
		}
		if loud {
			tracing::warn!(table = self.table, context = %self.context, commands = ?self.unbound, "commands unavailable for this context");
		} else {
			tracing::debug!(table = self.table, context = %self.context, commands = ?self.unbound, "commands unavailable for this context");
		}
	}
}
