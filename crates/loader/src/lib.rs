//! Platform symbol loaders.
//!
//! A [`SymbolLoader`] turns a native symbol name into an [`Address`]. Loaders
//! are backed by the OS dynamic loader ([`LibraryLoader`]), by an
//! API-specific get-proc-address entry point ([`ProcAddressLoader`]), or by a
//! closure ([`FnLoader`]), and compose with [`ChainLoader`].
//! [`platform::default_gl_loader`] picks the right combination for the target.

mod address;
mod chain;
mod error;
mod library;
pub mod platform;
mod proc_address;

pub use address::Address;
pub use chain::{ChainLoader, FnLoader};
pub use error::{LoadError, ResolveError};
pub use library::LibraryLoader;
pub use proc_address::{GetProcAddressFn, ProcAddressLoader};

/// Resolves native symbol names to addresses.
///
/// Implementations must be deterministic for the lifetime of the underlying
/// library or context: resolving the same name twice yields the same result.
pub trait SymbolLoader {
	fn resolve(&self, symbol: &str) -> Result<Address, ResolveError>;
}

impl<L: SymbolLoader + ?Sized> SymbolLoader for &L {
	fn resolve(&self, symbol: &str) -> Result<Address, ResolveError> {
		(**self).resolve(symbol)
	}
}

impl<L: SymbolLoader + ?Sized> SymbolLoader for Box<L> {
	fn resolve(&self, symbol: &str) -> Result<Address, ResolveError> {
		(**self).resolve(symbol)
	}
}

impl<L: SymbolLoader + ?Sized> SymbolLoader for std::sync::Arc<L> {
	fn resolve(&self, symbol: &str) -> Result<Address, ResolveError> {
		(**self).resolve(symbol)
	}
}
