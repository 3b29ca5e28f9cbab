//! Café loyalty and order settlement core.
//!
//! Stamps accumulate per user, convert to a single pending free-drink reward
//! at a threshold, and must be redeemed exactly once - across a staff scan
//! path, in-store checkout, and online checkout whose outcome arrives
//! asynchronously from the payment gateway.
//!
//! Layout follows ports-and-adapters:
//! - [`domain`]: pure types and decision logic
//! - [`port`]: traits for every external collaborator and the engine pipeline
//! - [`adapter`]: implementations - handlers, engine, stores, actors, gateway
//! - [`service`]: wiring plus the checkout, reconciliation and scan flows
//! - [`http`]: the axum surface for the inbound interfaces

pub mod adapter;
pub mod domain;
pub mod http;
pub mod port;
pub mod service;
