/// Per-symbol resolution failure.
///
/// Routine during binding: a missing vendor variant is expected, so binders
/// swallow these and move on to the next alias.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	#[error("symbol {symbol:?} not found")]
	NotFound { symbol: String },
	#[error("symbol name {symbol:?} contains a NUL byte")]
	InvalidName { symbol: String },
}

impl ResolveError {
	pub fn not_found(symbol: &str) -> Self {
		Self::NotFound { symbol: symbol.to_string() }
	}
}

/// Failure to open a native library or its entry point.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("no library candidates configured")]
	NoCandidates,
	#[error("could not open any of {candidates:?}: {source}")]
	Open {
		candidates: Vec<String>,
		#[source]
		source: libloading::Error,
	},
	#[error("entry point {entry_point:?} missing from {library}")]
	MissingEntryPoint { entry_point: &'static str, library: String },
}
