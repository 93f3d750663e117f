// app/src/lib.rs

//! An online storefront: catalog browsing, a session-scoped cart, and a
//! hosted-payment-page checkout, with the multi-request state machines
//! (cart mutation, checkout, the payment return leg, the payment webhook)
//! expressed as `stepflow` flows.

pub mod cart;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod services;
pub mod state;
pub mod store;
pub mod web;
