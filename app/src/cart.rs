// app/src/cart.rs

//! The cart engine: pure mutation of a session's product→quantity map and
//! the joined totals computation.
//!
//! The map invariant is that stored quantities are always ≥ 1; any
//! operation whose result would be ≤ 0 removes the entry instead.
//! Quantity parsing is explicit ([`parse_quantity`]); the lenient
//! fall-back-to-one behavior callers apply on parse failure is a chosen
//! policy ([`FALLBACK_QUANTITY`]), not an accident of parsing.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::Product;
use crate::store::CatalogStore;

/// A session's cart: product id → requested quantity. Key order carries
/// no meaning.
pub type CartMap = HashMap<i64, i64>;

/// Quantity applied when a raw form value fails to parse.
pub const FALLBACK_QUANTITY: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a whole number: {raw:?}")]
pub struct ParseQuantityError {
  pub raw: String,
}

/// Parses a raw form value as a quantity. Surrounding whitespace is
/// tolerated; anything else non-numeric is an error for the caller's
/// policy to absorb.
pub fn parse_quantity(raw: &str) -> Result<i64, ParseQuantityError> {
  raw.trim().parse::<i64>().map_err(|_| ParseQuantityError { raw: raw.to_string() })
}

/// Merges `quantity` into the entry for `product_id`, creating it if
/// absent. A merged result ≤ 0 removes the entry. No upper bound is
/// enforced, and the product id is not checked against the catalog here;
/// stale ids fall out at read time in [`totals`].
pub fn add(cart: &mut CartMap, product_id: i64, quantity: i64) {
  let merged = cart.get(&product_id).copied().unwrap_or(0) + quantity;
  if merged <= 0 {
    cart.remove(&product_id);
  } else {
    cart.insert(product_id, merged);
  }
}

/// Overwrites quantities from raw form values, one entry per update.
/// Unparseable values fall back to [`FALLBACK_QUANTITY`]; a resulting
/// quantity ≤ 0 deletes the entry.
pub fn apply_updates<'a>(cart: &mut CartMap, updates: impl IntoIterator<Item = (i64, &'a str)>) {
  for (product_id, raw) in updates {
    let quantity = parse_quantity(raw).unwrap_or(FALLBACK_QUANTITY);
    if quantity <= 0 {
      cart.remove(&product_id);
    } else {
      cart.insert(product_id, quantity);
    }
  }
}

/// One resolvable cart entry joined against the catalog. Never persisted;
/// recomputed on every read.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
  pub product: Product,
  pub quantity: i64,
  /// `quantity × product.price`, in whole currency units.
  pub subtotal: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartTotals {
  /// Sum of line subtotals, in whole currency units.
  pub total: i64,
  pub lines: Vec<CartLine>,
}

impl CartTotals {
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }
}

/// Joins the cart against the catalog. Entries whose product id no longer
/// resolves are skipped without error; lines come back ordered by product
/// id so repeated reads agree.
pub async fn totals(cart: &CartMap, catalog: &CatalogStore) -> Result<CartTotals, sqlx::Error> {
  let mut entries: Vec<(i64, i64)> = cart.iter().map(|(&id, &qty)| (id, qty)).collect();
  entries.sort_unstable_by_key(|&(id, _)| id);

  let mut total = 0;
  let mut lines = Vec::with_capacity(entries.len());
  for (product_id, quantity) in entries {
    let Some(product) = catalog.find_by_id(product_id).await? else {
      tracing::debug!(product_id, "skipping unresolvable cart entry");
      continue;
    };
    let subtotal = product.price * quantity;
    total += subtotal;
    lines.push(CartLine {
      product,
      quantity,
      subtotal,
    });
  }
  Ok(CartTotals { total, lines })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_quantity_accepts_padded_integers() {
    assert_eq!(parse_quantity(" 3 "), Ok(3));
    assert_eq!(parse_quantity("-2"), Ok(-2));
  }

  #[test]
  fn parse_quantity_rejects_garbage() {
    assert!(parse_quantity("two").is_err());
    assert!(parse_quantity("").is_err());
    assert!(parse_quantity("1.5").is_err());
  }

  #[test]
  fn add_accumulates_into_one_entry() {
    let mut cart = CartMap::new();
    add(&mut cart, 7, 2);
    add(&mut cart, 7, 3);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(&7), Some(&5));
  }

  #[test]
  fn add_never_stores_a_non_positive_quantity() {
    let mut cart = CartMap::new();
    add(&mut cart, 7, 2);
    add(&mut cart, 7, -2);
    assert!(!cart.contains_key(&7));

    add(&mut cart, 8, -1);
    assert!(!cart.contains_key(&8));
  }

  #[test]
  fn updates_overwrite_rather_than_increment() {
    let mut cart = CartMap::from([(1, 4)]);
    apply_updates(&mut cart, [(1, "9")]);
    assert_eq!(cart.get(&1), Some(&9));
  }

  #[test]
  fn update_to_zero_or_negative_removes_the_entry() {
    let mut cart = CartMap::from([(1, 4), (2, 2)]);
    apply_updates(&mut cart, [(1, "0"), (2, "-3")]);
    assert!(cart.is_empty());
  }

  #[test]
  fn unparseable_update_falls_back_to_one() {
    let mut cart = CartMap::from([(1, 4)]);
    apply_updates(&mut cart, [(1, "lots")]);
    assert_eq!(cart.get(&1), Some(&FALLBACK_QUANTITY));
  }
}
