// app/src/store/cart.rs

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::cart::CartMap;

/// Session-keyed cart storage.
///
/// Each browsing session owns one cart map, looked up by the opaque token
/// carried in the session cookie. Reads hand out a snapshot clone and
/// writes replace the whole map, so overlapping requests within a single
/// session resolve as last-write-wins: two interleaved read-modify-write
/// sequences can lose the earlier write. Carts for different sessions
/// never interact.
#[derive(Default)]
pub struct CartRepository {
  carts: RwLock<HashMap<String, CartMap>>,
}

impl CartRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of the session's cart; an empty map if none exists yet.
  pub fn load(&self, token: &str) -> CartMap {
    self.carts.read().get(token).cloned().unwrap_or_default()
  }

  /// Replaces the session's cart wholesale. An empty map removes the
  /// session's entry rather than storing it.
  pub fn store(&self, token: &str, cart: CartMap) {
    let mut carts = self.carts.write();
    if cart.is_empty() {
      carts.remove(token);
    } else {
      carts.insert(token.to_string(), cart);
    }
  }

  /// Drops the session's cart entirely.
  pub fn clear(&self, token: &str) {
    self.carts.write().remove(token);
  }
}
