use glaze_binding::{ContextUnavailable, DispatchError};
use glaze_config::ConfigError;
use glaze_connection::{LockError, NativeError};
use glaze_loader::{LoadError, ResolveError};

/// Any failure surfaced by the GL and GLX facades.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Load(#[from] LoadError),
	/// A bootstrap symbol (not an alias-table command) is missing.
	#[error(transparent)]
	Resolve(#[from] ResolveError),
	#[error(transparent)]
	Context(#[from] ContextUnavailable),
	#[error(transparent)]
	Dispatch(#[from] DispatchError),
	#[error(transparent)]
	Native(#[from] NativeError),
	#[error(transparent)]
	Lock(#[from] LockError),
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error("cannot open X display {name:?}")]
	DisplayOpen { name: String },
	#[error("{command} returned a null handle")]
	NullHandle { command: &'static str },
	#[error("invalid argument to {command}: {reason}")]
	InvalidArgument {
		command: &'static str,
		reason: &'static str,
	},
	/// The connection was opened without threading and cannot be shared.
	#[error("display connection was not opened with threading enabled")]
	NotThreaded,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	/// Whether the failure means the command is unavailable rather than that
	/// it ran and failed.
	pub fn is_not_implemented(&self) -> bool {
		matches!(self, Self::Dispatch(DispatchError::NotImplemented { .. }))
	}
}
