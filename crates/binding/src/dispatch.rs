use glaze_loader::Address;
use glaze_registry::{AliasEntry, CommandId, LogicalCommand};

use crate::BoundTable;

/// Dispatch failure. Never retried and never downgraded to a default value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
	/// No alias of the command is bound under the current snapshot.
	#[error("{command} is not implemented by the current context")]
	NotImplemented { command: &'static str },
	#[error("command {id} is not part of alias table {table:?}")]
	UnknownCommand { id: CommandId, table: &'static str },
}

/// The alias a dispatch resolved to.
#[derive(Debug, Clone, Copy)]
pub struct BoundEntry {
	command: &'static LogicalCommand,
	alias_index: usize,
	address: Address,
}

impl BoundEntry {
	pub fn command(&self) -> &'static LogicalCommand {
		self.command
	}

	pub fn alias(&self) -> &'static AliasEntry {
		&self.command.aliases[self.alias_index]
	}

	/// Priority index of the chosen alias; 0 is the canonical symbol.
	pub fn alias_index(&self) -> usize {
		self.alias_index
	}

	pub fn symbol(&self) -> &'static str {
		self.alias().symbol
	}

	pub fn address(&self) -> Address {
		self.address
	}

	/// # Safety
	///
	/// `F` must be the native signature of [`symbol`](Self::symbol).
	pub unsafe fn cast<F: Copy>(&self) -> F {
		// SAFETY: forwarded to the caller.
		unsafe { self.address.cast() }
	}
}

impl BoundTable {
	/// Highest-priority bound alias of `cmd`.
	pub fn entry(&self, cmd: impl Into<CommandId>) -> Result<BoundEntry, DispatchError> {
		let id = cmd.into();
		let table = self.table();
		let (Some(command), Some(slots)) = (table.get(id), self.slots(id)) else {
			return Err(DispatchError::UnknownCommand { id, table: table.label });
		};

		slots
			.iter()
			.find_map(|slot| {
				slot.address().map(|address| BoundEntry {
					command,
					alias_index: slot.alias_index(),
					address,
				})
			})
			.ok_or(DispatchError::NotImplemented { command: command.name })
	}

	/// Invokes the highest-priority bound alias of `cmd` as an `F`.
	///
	/// The native return value is passed through unchanged. Nothing is called
	/// when no alias is bound.
	///
	/// # Safety
	///
	/// `F` must match the native signature shared by every alias of `cmd`, and
	/// this table's context must be current on the calling thread.
	pub unsafe fn dispatch<F: Copy, R>(&self, cmd: impl Into<CommandId>, call: impl FnOnce(F) -> R) -> Result<R, DispatchError> {
		let entry = self.entry(cmd)?;
		// SAFETY: signature is the caller's contract.
		Ok(call(unsafe { entry.cast::<F>() }))
	}

	/// Like [`dispatch`](Self::dispatch) but hands over the [`BoundEntry`], for
	/// commands whose aliases differ in signature.
	pub fn dispatch_entry<R>(&self, cmd: impl Into<CommandId>, call: impl FnOnce(BoundEntry) -> R) -> Result<R, DispatchError> {
		self.entry(cmd).map(call)
	}
}
