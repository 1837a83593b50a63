pub mod common;

mod catalog_probe;
mod credential_store;
