// app/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{admin_handlers, cart_handlers, catalog_handlers, checkout_handlers, webhook_handlers};

/// Wires every route the storefront serves. Called from `main` (and the
/// HTTP tests) when building the Actix app.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    // Liveness probe
    .route("/health", web::get().to(catalog_handlers::health_handler))
    // Catalog browsing
    .route("/", web::get().to(catalog_handlers::home_handler))
    .route("/search", web::get().to(catalog_handlers::search_handler))
    .route("/category/{slug}", web::get().to(catalog_handlers::category_handler))
    .route("/product/{slug}", web::get().to(catalog_handlers::product_handler))
    // Cart
    .route(
      "/add-to-cart/{product_id}",
      web::post().to(cart_handlers::add_to_cart_handler),
    )
    .route("/cart", web::get().to(cart_handlers::view_cart_handler))
    .route("/cart/update", web::post().to(cart_handlers::update_cart_handler))
    // Checkout and the gateway's callbacks
    .route("/checkout", web::get().to(checkout_handlers::checkout_preview_handler))
    .route("/checkout", web::post().to(checkout_handlers::start_checkout_handler))
    .route(
      "/payment_redirect",
      web::get().to(checkout_handlers::payment_redirect_handler),
    )
    .route("/order_success", web::get().to(checkout_handlers::order_success_handler))
    // Webhooks
    .service(web::scope("/webhooks").route("/payment", web::post().to(webhook_handlers::payment_webhook_handler)))
    // Admin
    .service(
      web::scope("/admin")
        .route("/dashboard", web::get().to(admin_handlers::dashboard_handler))
        .route("/products", web::post().to(admin_handlers::create_product_handler))
        .route(
          "/products/{product_id}",
          web::post().to(admin_handlers::update_product_handler),
        ),
    );
}
