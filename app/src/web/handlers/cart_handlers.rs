// app/src/web/handlers/cart_handlers.rs

//! The cart surface: add an item, view the priced cart, apply bulk
//! quantity updates.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use std::collections::HashMap;
use tracing::{instrument, warn};

use stepflow::SharedContext;

use crate::cart::{self, CartMap};
use crate::errors::AppError;
use crate::pipelines::contexts::{AddToCartData, UpdateCartData};
use crate::state::AppState;
use crate::web::handlers::see_other;
use crate::web::session::{session_cookie, CartSession};

#[instrument(name = "handler::add_to_cart", skip_all, fields(product_id = %product_id))]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  product_id: web::Path<i64>,
  form: web::Form<HashMap<String, String>>,
  session: CartSession,
  req: HttpRequest,
) -> Result<HttpResponse, AppError> {
  let (token, minted) = session.token_or_mint();
  let raw_quantity = form.get("qty").cloned();

  let ctx = SharedContext::new(AddToCartData::new(
    app_state.get_ref().clone(),
    token.clone(),
    product_id.into_inner(),
    raw_quantity,
  ));
  app_state.flows.run(ctx).await?;

  // Back to wherever the customer pressed the button; home otherwise.
  let back = req
    .headers()
    .get(header::REFERER)
    .and_then(|v| v.to_str().ok())
    .unwrap_or("/");
  Ok(see_other(back, Some("added-to-cart"), minted.then(|| session_cookie(&token))))
}

#[instrument(name = "handler::view_cart", skip_all)]
pub async fn view_cart_handler(
  app_state: web::Data<AppState>,
  session: CartSession,
) -> Result<HttpResponse, AppError> {
  let cart = match session.existing() {
    Some(token) => app_state.carts.load(token),
    None => CartMap::new(),
  };
  let totals = cart::totals(&cart, &app_state.catalog()).await?;
  Ok(HttpResponse::Ok().json(totals))
}

#[instrument(name = "handler::update_cart", skip_all, fields(form_fields = form.len()))]
pub async fn update_cart_handler(
  app_state: web::Data<AppState>,
  form: web::Form<HashMap<String, String>>,
  session: CartSession,
) -> Result<HttpResponse, AppError> {
  let (token, minted) = session.token_or_mint();

  // Only `qty_<product_id>` fields carry updates; anything else in the
  // form is ignored.
  let raw_updates: Vec<(i64, String)> = form
    .iter()
    .filter_map(|(field, raw)| {
      let id = field.strip_prefix("qty_")?;
      match id.parse::<i64>() {
        Ok(id) => Some((id, raw.clone())),
        Err(_) => {
          warn!(field = %field, "ignoring quantity field with a malformed product id");
          None
        }
      }
    })
    .collect();

  let ctx = SharedContext::new(UpdateCartData::new(app_state.get_ref().clone(), token.clone(), raw_updates));
  app_state.flows.run(ctx).await?;

  Ok(see_other("/cart", Some("cart-updated"), minted.then(|| session_cookie(&token))))
}
