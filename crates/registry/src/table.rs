use rustc_hash::FxHashSet;

use crate::{CommandId, LogicalCommand};

/// A labelled, static list of logical commands.
///
/// A command's position in `commands` is its [`CommandId`].
#[derive(Debug)]
pub struct AliasTable {
	/// Short label used in logs (`"gl"`, `"glx"`).
	pub label: &'static str,
	pub commands: &'static [LogicalCommand],
}

/// Malformed table data. Tables are compiled in, so any defect is a bug in the
/// declaration and is caught by each table's unit tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableDefect {
	#[error("command {command:?} declares no aliases")]
	NoAliases { command: &'static str },
	#[error("command name {command:?} declared twice")]
	DuplicateCommand { command: &'static str },
	#[error("command {command:?} lists symbol {symbol:?} twice")]
	DuplicateSymbol { command: &'static str, symbol: &'static str },
	#[error("alias {symbol:?} of {command:?} has an empty introducing predicate")]
	NeverIntroduced { command: &'static str, symbol: &'static str },
	#[error("table {label:?} holds more commands than a CommandId can address")]
	TooLarge { label: &'static str },
}

impl AliasTable {
	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	pub fn get(&self, id: CommandId) -> Option<&'static LogicalCommand> {
		let commands: &'static [LogicalCommand] = self.commands;
		commands.get(id.index())
	}

	pub fn find(&self, name: &str) -> Option<(CommandId, &'static LogicalCommand)> {
		self.iter().find(|(_, cmd)| cmd.name == name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (CommandId, &'static LogicalCommand)> + use<> {
		let commands: &'static [LogicalCommand] = self.commands;
		commands.iter().enumerate().map(|(i, cmd)| (CommandId::new(i as u16), cmd))
	}

	/// Total number of aliases across all commands.
	pub fn alias_count(&self) -> usize {
		self.commands.iter().map(|c| c.aliases.len()).sum()
	}

	/// Checks the declaration for defects, collecting all of them.
	pub fn validate(&self) -> Result<(), Vec<TableDefect>> {
		let mut defects = Vec::new();

		if self.commands.len() > usize::from(u16::MAX) {
			defects.push(TableDefect::TooLarge { label: self.label });
		}

		let mut names = FxHashSet::default();
		for cmd in self.commands {
			if !names.insert(cmd.name) {
				defects.push(TableDefect::DuplicateCommand { command: cmd.name });
			}
			if cmd.aliases.is_empty() {
				defects.push(TableDefect::NoAliases { command: cmd.name });
			}

			let mut symbols = FxHashSet::default();
			for alias in cmd.aliases {
				if !symbols.insert(alias.symbol) {
					defects.push(TableDefect::DuplicateSymbol {
						command: cmd.name,
						symbol: alias.symbol,
					});
				}
				if alias.introduced_by.is_empty() {
					defects.push(TableDefect::NeverIntroduced {
						command: cmd.name,
						symbol: alias.symbol,
					});
				}
			}
		}

		if defects.is_empty() { Ok(()) } else { Err(defects) }
	}
}
