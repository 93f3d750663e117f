// src/context.rs

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, lockable context handed to every handler of a flow run.
///
/// Cloning is cheap (an `Arc` bump); all clones observe the same underlying
/// data. Lock guards are blocking and MUST be dropped before any `.await`
/// suspension point inside a handler.
#[derive(Debug)]
pub struct SharedContext<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> SharedContext<T> {
  pub fn new(data: T) -> Self {
    SharedContext(Arc::new(RwLock::new(data)))
  }

  /// Acquires a read lock. The guard must not cross an `.await`.
  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  /// Acquires a write lock. The guard must not cross an `.await`.
  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Attempts to acquire a read lock without blocking.
  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, T>> {
    self.0.try_read()
  }

  /// Attempts to acquire a write lock without blocking.
  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, T>> {
    self.0.try_write()
  }
}

impl<T: Send + Sync + 'static> Clone for SharedContext<T> {
  fn clone(&self) -> Self {
    SharedContext(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for SharedContext<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
