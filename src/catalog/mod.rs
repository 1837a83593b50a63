pub mod client;

pub use client::{CatalogClient, Storefront, StorefrontProbe};
