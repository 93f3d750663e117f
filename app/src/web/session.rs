// app/src/web/session.rs

//! The browsing-session cookie. Each browser carries one opaque token in
//! a `cart_session` cookie; the token keys the in-memory cart repository.
//! Tokens are minted lazily by the first handler that mutates a cart, so
//! a browser that never touches a cart never gets a cookie.

use actix_web::cookie::Cookie;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::errors::AppError;

pub const SESSION_COOKIE: &str = "cart_session";

/// The request's browsing-session token, if the browser presented one.
#[derive(Debug, Clone)]
pub struct CartSession {
  token: Option<String>,
}

impl CartSession {
  /// Token from the cookie; `None` for a browser no handler has minted a
  /// session for yet.
  pub fn existing(&self) -> Option<&str> {
    self.token.as_deref()
  }

  /// The existing token, or a freshly minted one. `true` means the token
  /// is new and the response must set the cookie for it to survive past
  /// this request.
  pub fn token_or_mint(&self) -> (String, bool) {
    match &self.token {
      Some(token) => (token.clone(), false),
      None => (format!("cs_{}", Uuid::new_v4().simple()), true),
    }
  }
}

/// The cookie a response sets to hand a freshly minted token back to the
/// browser.
pub fn session_cookie(token: &str) -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE, token.to_string())
    .path("/")
    .http_only(true)
    .finish()
}

impl FromRequest for CartSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
    ready(Ok(CartSession { token }))
  }
}
