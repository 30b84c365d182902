use std::cell::RefCell;
use std::sync::{Arc, LazyLock};

use parking_lot::{ArcMutexGuard, Mutex, RawMutex};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::ConnectionHandle;

thread_local! {
	/// Connections whose lock the current thread holds.
	static HELD: RefCell<SmallVec<[ConnectionHandle; 2]>> = const { RefCell::new(SmallVec::new_const()) };
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LockError {
	/// The calling thread already holds this connection's lock. The
	/// underlying primitive is not reentrant, so this would deadlock.
	#[error("{handle} is already locked by this thread")]
	Reentrant { handle: ConnectionHandle },
}

/// Per-connection locks serializing calls into connections that are not safe
/// for concurrent use.
///
/// A connection is unlocked until [`enable`](Self::enable) is called for it,
/// so single-threaded consumers pay nothing.
#[derive(Default)]
pub struct ConnectionLocks {
	locks: Mutex<FxHashMap<ConnectionHandle, Arc<Mutex<()>>>>,
}

static GLOBAL: LazyLock<ConnectionLocks> = LazyLock::new(ConnectionLocks::default);

impl ConnectionLocks {
	pub fn new() -> Self {
		Self::default()
	}

	/// Process-wide registry used by display connections.
	pub fn global() -> &'static Self {
		&GLOBAL
	}

	/// Marks multithreading support as initialized for `handle`.
	pub fn enable(&self, handle: ConnectionHandle) {
		self.locks.lock().entry(handle).or_default();
		tracing::debug!(%handle, "connection lock enabled");
	}

	/// Forgets `handle`, typically when its connection closes. Threads still
	/// holding the old lock keep it until their guard drops.
	pub fn disable(&self, handle: ConnectionHandle) {
		if self.locks.lock().remove(&handle).is_some() {
			tracing::debug!(%handle, "connection lock disabled");
		}
	}

	pub fn is_enabled(&self, handle: ConnectionHandle) -> bool {
		self.locks.lock().contains_key(&handle)
	}

	/// Blocks until the calling thread has exclusive access to `handle`.
	///
	/// Returns a no-op guard when the connection was never enabled. Release
	/// happens when the guard drops, on every exit path.
	pub fn acquire(&self, handle: ConnectionHandle) -> Result<ConnectionGuard, LockError> {
		let Some(lock) = self.locks.lock().get(&handle).cloned() else {
			return Ok(ConnectionGuard { handle, held: None });
		};

		if HELD.with_borrow(|held| held.contains(&handle)) {
			return Err(LockError::Reentrant { handle });
		}

		let guard = lock.lock_arc();
		HELD.with_borrow_mut(|held| held.push(handle));
		Ok(ConnectionGuard {
			handle,
			held: Some(guard),
		})
	}
}

/// Scoped ownership of a connection lock.
#[must_use = "the connection is unlocked as soon as the guard is dropped"]
pub struct ConnectionGuard {
	handle: ConnectionHandle,
	held: Option<ArcMutexGuard<RawMutex, ()>>,
}

impl ConnectionGuard {
	pub fn handle(&self) -> ConnectionHandle {
		self.handle
	}

	/// Whether this guard actually holds a lock.
	pub fn is_locking(&self) -> bool {
		self.held.is_some()
	}
}

impl Drop for ConnectionGuard {
	fn drop(&mut self) {
		if self.held.take().is_some() {
			let handle = self.handle;
			HELD.with_borrow_mut(|held| held.retain(|h| *h != handle));
		}
	}
}
