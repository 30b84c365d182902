//! Binding of alias tables against a live native context.
//!
//! The flow for one context is:
//!
//! 1. [`build_snapshot`] asks a [`ContextIntrospection`] implementation what
//!    the context supports and produces a [`CapabilitySnapshot`].
//! 2. A [`Binder`] walks an [`AliasTable`], resolves every eligible alias
//!    through a [`SymbolLoader`], and fills a [`BoundTable`].
//! 3. Wrappers call [`BoundTable::dispatch`], which invokes the first bound
//!    alias of a command in priority order or fails with
//!    [`DispatchError::NotImplemented`].
//!
//! A `BoundTable` belongs to the thread and context it was bound for. Making
//! another context current requires an explicit [`Binder::rebind`]; nothing
//! refreshes behind the caller's back.
//!
//! [`CapabilitySnapshot`]: glaze_primitives::CapabilitySnapshot
//! [`AliasTable`]: glaze_registry::AliasTable
//! [`SymbolLoader`]: glaze_loader::SymbolLoader

mod binder;
mod dispatch;
mod report;
mod snapshot;
mod table;

pub use binder::Binder;
pub use dispatch::{BoundEntry, DispatchError};
pub use report::BindingReport;
pub use snapshot::{ContextIntrospection, ContextUnavailable, UnavailableReason, build_snapshot};
pub use table::{BoundTable, ContextId, EntryPointSlot};
