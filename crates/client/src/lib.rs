//! Gryadka Client
//!
//! Talks to the Gryadka storefront REST API and submits orders built by the
//! `gryadka` core library.

pub mod api;
pub mod checkout;
pub mod config;
pub mod observability;
