// app/src/web/handlers/mod.rs

//! Request handlers. Deliberately thin: parse the request, hand the work
//! to the matching flow (or store call), translate the final context into
//! a response.

pub mod admin_handlers;
pub mod cart_handlers;
pub mod catalog_handlers;
pub mod checkout_handlers;
pub mod webhook_handlers;

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::HttpResponse;

/// 303 redirect, optionally tagging the target with a flash-style
/// `notice=<code>` query parameter and carrying a freshly minted session
/// cookie.
pub(crate) fn see_other(location: &str, notice: Option<&str>, session_cookie: Option<Cookie<'static>>) -> HttpResponse {
  let target = match notice {
    Some(code) if location.contains('?') => format!("{location}&notice={code}"),
    Some(code) => format!("{location}?notice={code}"),
    None => location.to_string(),
  };

  let mut response = HttpResponse::SeeOther();
  response.insert_header((header::LOCATION, target));
  if let Some(cookie) = session_cookie {
    response.cookie(cookie);
  }
  response.finish()
}
