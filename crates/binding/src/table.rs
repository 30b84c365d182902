use std::ffi::c_void;
use std::fmt;
use std::marker::PhantomData;

use glaze_loader::{Address, SymbolLoader};
use glaze_primitives::CapabilitySnapshot;
use glaze_registry::{AliasEntry, AliasTable, CommandId, LogicalCommand};
use serde::Serialize;

use crate::{Binder, BindingReport};

/// Opaque identity of the native context a [`BoundTable`] was bound for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ContextId(u64);

impl ContextId {
	pub const fn new(raw: u64) -> Self {
		Self(raw)
	}

	/// Identity derived from a native context handle.
	pub fn from_ptr(ptr: *const c_void) -> Self {
		Self(ptr as usize as u64)
	}

	pub const fn raw(self) -> u64 {
		self.0
	}
}

impl fmt::Display for ContextId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ctx:{:#x}", self.0)
	}
}

/// Resolved address (if any) for one alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPointSlot {
	pub(crate) address: Option<Address>,
	pub(crate) alias: u16,
}

impl EntryPointSlot {
	pub fn address(&self) -> Option<Address> {
		self.address
	}

	/// Index of the alias within its command's alias list.
	pub fn alias_index(&self) -> usize {
		usize::from(self.alias)
	}

	pub fn is_bound(&self) -> bool {
		self.address.is_some()
	}
}

/// Entry-point slots for every alias of one [`AliasTable`], bound for one
/// context.
///
/// Addresses stay valid only while [`snapshot`](Self::snapshot) describes the
/// context current on the owning thread. The table is neither `Send` nor
/// `Sync`: it lives on the thread whose current context it was bound for.
pub struct BoundTable {
	table: &'static AliasTable,
	context: ContextId,
	snapshot: CapabilitySnapshot,
	/// `offsets[i]..offsets[i + 1]` are the slots of command `i`.
	offsets: Box<[u32]>,
	slots: Box<[EntryPointSlot]>,
	_thread_bound: PhantomData<*const ()>,
}

impl BoundTable {
	/// An all-empty table for `table`; every dispatch fails until bound.
	pub(crate) fn empty(table: &'static AliasTable, context: ContextId, snapshot: CapabilitySnapshot) -> Self {
		let mut offsets = Vec::with_capacity(table.len() + 1);
		let mut slots = Vec::with_capacity(table.alias_count());
		for cmd in table.commands {
			offsets.push(slots.len() as u32);
			slots.extend((0..cmd.aliases.len()).map(|i| EntryPointSlot {
				address: None,
				alias: i as u16,
			}));
		}
		offsets.push(slots.len() as u32);

		Self {
			table,
			context,
			snapshot,
			offsets: offsets.into_boxed_slice(),
			slots: slots.into_boxed_slice(),
			_thread_bound: PhantomData,
		}
	}

	pub fn table(&self) -> &'static AliasTable {
		self.table
	}

	pub fn context(&self) -> ContextId {
		self.context
	}

	pub fn snapshot(&self) -> &CapabilitySnapshot {
		&self.snapshot
	}

	/// Slots of `cmd` in priority order, or `None` for an id outside the table.
	pub fn slots(&self, cmd: impl Into<CommandId>) -> Option<&[EntryPointSlot]> {
		let i = cmd.into().index();
		let start = *self.offsets.get(i)? as usize;
		let end = *self.offsets.get(i + 1)? as usize;
		Some(&self.slots[start..end])
	}

	pub fn is_bound(&self, cmd: impl Into<CommandId>) -> bool {
		self.slots(cmd).is_some_and(|s| s.iter().any(EntryPointSlot::is_bound))
	}

	/// Bound aliases of `cmd` in priority order.
	pub fn bound_aliases(&self, cmd: impl Into<CommandId>) -> Vec<&'static AliasEntry> {
		let id = cmd.into();
		let (Some(command), Some(slots)) = (self.table.get(id), self.slots(id)) else {
			return Vec::new();
		};
		slots
			.iter()
			.filter(|s| s.is_bound())
			.map(|s| &command.aliases[s.alias_index()])
			.collect()
	}

	/// Empties every slot, e.g. when the context is destroyed. Dispatch fails
	/// with `NotImplemented` until the table is rebound.
	pub fn invalidate(&mut self) {
		for slot in self.slots.iter_mut() {
			slot.address = None;
		}
	}

	/// Rebinds in place for the context now current on this thread.
	pub fn rebind(&mut self, context: ContextId, snapshot: CapabilitySnapshot, loader: &dyn SymbolLoader) -> BindingReport {
		Binder::new(self.table, loader).rebind(self, context, snapshot)
	}

	pub(crate) fn command_slots_mut(
		&mut self,
		i: usize,
	) -> (&'static LogicalCommand, &mut [EntryPointSlot]) {
		let start = self.offsets[i] as usize;
		let end = self.offsets[i + 1] as usize;
		let table: &'static AliasTable = self.table;
		(&table.commands[i], &mut self.slots[start..end])
	}

	pub(crate) fn reset(&mut self, context: ContextId, snapshot: CapabilitySnapshot) {
		self.invalidate();
		self.context = context;
		self.snapshot = snapshot;
	}
}

impl fmt::Debug for BoundTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BoundTable")
			.field("table", &self.table.label)
			.field("context", &self.context)
			.field("snapshot", &self.snapshot.to_string())
			.field("bound", &self.slots.iter().filter(|s| s.is_bound()).count())
			.finish()
	}
}
