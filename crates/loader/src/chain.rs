use crate::{Address, ResolveError, SymbolLoader};

/// Tries each loader in order and returns the first hit.
#[derive(Default)]
pub struct ChainLoader {
	loaders: Vec<Box<dyn SymbolLoader>>,
}

impl ChainLoader {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, loader: impl SymbolLoader + 'static) -> Self {
		self.loaders.push(Box::new(loader));
		self
	}

	pub fn push(&mut self, loader: impl SymbolLoader + 'static) {
		self.loaders.push(Box::new(loader));
	}

	pub fn len(&self) -> usize {
		self.loaders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.loaders.is_empty()
	}
}

impl SymbolLoader for ChainLoader {
	fn resolve(&self, symbol: &str) -> Result<Address, ResolveError> {
		let mut last = ResolveError::not_found(symbol);
		for loader in &self.loaders {
			match loader.resolve(symbol) {
				Ok(address) => return Ok(address),
				// An invalid name is invalid everywhere.
				Err(e @ ResolveError::InvalidName { .. }) => return Err(e),
				Err(e) => last = e,
			}
		}
		Err(last)
	}
}

/// Adapts a closure into a [`SymbolLoader`].
pub struct FnLoader<F>(pub F);

impl<F> SymbolLoader for FnLoader<F>
where
	F: Fn(&str) -> Option<Address>,
{
	fn resolve(&self, symbol: &str) -> Result<Address, ResolveError> {
		(self.0)(symbol).ok_or_else(|| ResolveError::not_found(symbol))
	}
}
