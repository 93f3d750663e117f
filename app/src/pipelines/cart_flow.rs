// app/src/pipelines/cart_flow.rs

use crate::cart::{self, FALLBACK_QUANTITY};
use crate::errors::AppError;
use crate::pipelines::contexts::{AddToCartData, UpdateCartData};
use std::sync::Arc;
use stepflow::{Flow, FlowControl, FlowRegistry, SharedContext};
use tracing::{debug, info};

pub fn register_add_to_cart_flow(flows: &Arc<FlowRegistry<AppError>>) {
  let mut flow = Flow::<AddToCartData, AppError>::new(&[
    ("resolve_quantity", false, None),
    ("merge_cart_entry", false, None),
  ]);

  // Absent or unparseable quantities fall back to 1 rather than failing
  // the request: the lenient policy the cart surface has always had.
  flow.on("resolve_quantity", |ctx: SharedContext<AddToCartData>| async move {
    let raw = { ctx.read().raw_quantity.clone() };
    let quantity = match raw.as_deref() {
      None => FALLBACK_QUANTITY,
      Some(raw) => cart::parse_quantity(raw).unwrap_or_else(|e| {
        debug!(error = %e, "unparseable add-to-cart quantity, falling back");
        FALLBACK_QUANTITY
      }),
    };
    ctx.write().quantity = Some(quantity);
    Ok::<_, AppError>(FlowControl::Continue)
  });

  // The product id is not validated against the catalog here; entries
  // that never resolve are skipped when totals are computed.
  flow.on("merge_cart_entry", |ctx: SharedContext<AddToCartData>| async move {
    let (carts, token, product_id, quantity) = {
      let guard = ctx.read();
      (
        guard.app_state.carts.clone(),
        guard.session_token.clone(),
        guard.product_id,
        guard.quantity.unwrap_or(FALLBACK_QUANTITY),
      )
    };

    let mut cart = carts.load(&token);
    cart::add(&mut cart, product_id, quantity);
    let stored_quantity = cart.get(&product_id).copied();
    carts.store(&token, cart);

    info!(product_id, quantity, ?stored_quantity, "cart entry merged");
    ctx.write().stored_quantity = stored_quantity;
    Ok::<_, AppError>(FlowControl::Continue)
  });

  flows.register(flow);
  info!("Add-to-cart flow registered.");
}

pub fn register_update_cart_flow(flows: &Arc<FlowRegistry<AppError>>) {
  let mut flow = Flow::<UpdateCartData, AppError>::new(&[("apply_quantity_updates", false, None)]);

  flow.on("apply_quantity_updates", |ctx: SharedContext<UpdateCartData>| async move {
    let (carts, token, raw_updates) = {
      let guard = ctx.read();
      (
        guard.app_state.carts.clone(),
        guard.session_token.clone(),
        guard.raw_updates.clone(),
      )
    };

    let mut cart = carts.load(&token);
    cart::apply_updates(&mut cart, raw_updates.iter().map(|(id, raw)| (*id, raw.as_str())));
    let remaining = cart.len();
    carts.store(&token, cart);

    info!(updates = raw_updates.len(), remaining, "cart quantities updated");
    ctx.write().remaining_entries = Some(remaining);
    Ok::<_, AppError>(FlowControl::Continue)
  });

  flows.register(flow);
  info!("Update-cart flow registered.");
}
