pub mod client;

pub use client::{ClientContext, ClientProvider, use_client};
