use std::fmt;

use glaze_primitives::CapabilitySnapshot;

use crate::FeaturePredicate;

/// One native symbol able to implement a [`LogicalCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasEntry {
	/// Exported native symbol name, e.g. `glGenQueriesARB`.
	pub symbol: &'static str,
	pub introduced_by: FeaturePredicate,
	/// Empty when the alias is never retired.
	pub removed_by: FeaturePredicate,
}

impl AliasEntry {
	/// Whether this alias may be bound for `snapshot`.
	pub fn is_eligible(&self, snapshot: &CapabilitySnapshot) -> bool {
		self.introduced_by.matches(snapshot) && !self.removed_by.matches(snapshot)
	}
}

/// A stable, version-independent operation exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalCommand {
	pub name: &'static str,
	/// Candidate symbols in dispatch priority order.
	pub aliases: &'static [AliasEntry],
}

impl LogicalCommand {
	/// Aliases eligible under `snapshot`, paired with their priority index.
	pub fn eligible<'a>(&'a self, snapshot: &'a CapabilitySnapshot) -> impl Iterator<Item = (usize, &'a AliasEntry)> {
		self.aliases.iter().enumerate().filter(move |(_, a)| a.is_eligible(snapshot))
	}
}

/// Dense index of a command within its [`AliasTable`](crate::AliasTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(u16);

impl CommandId {
	pub const fn new(index: u16) -> Self {
		Self(index)
	}

	pub const fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for CommandId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}
