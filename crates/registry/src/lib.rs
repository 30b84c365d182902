//! Static command/alias metadata.
//!
//! Every logical command (for example "generate query objects") owns an
//! ordered list of [`AliasEntry`] values, one per native symbol able to
//! implement it. Each alias is gated by a [`FeaturePredicate`] naming the API
//! versions or extensions that introduce it, and optionally by a second
//! predicate that retires it. Sibling order is dispatch priority: canonical
//! core names first, then vendor variants.
//!
//! Tables are declared with [`alias_table!`] and live in `static` memory; they
//! are never mutated at runtime and are shared freely across threads.

pub mod builtins;
mod command;
mod macros;
mod predicate;
mod table;

pub use command::{AliasEntry, CommandId, LogicalCommand};
pub use predicate::{Feature, FeaturePredicate, feature};
pub use table::{AliasTable, TableDefect};
