//! Product catalog: list, create, edit and delete products over REST.
//!
//! Every mutation is followed by a fresh list fetch; the client never merges
//! changes into its cached list.

mod client;
mod commands;
mod form;
mod message;
mod model;
mod products;
mod service;

pub use client::{HttpProductApi, ProductApi};
pub use service::Catalog;
