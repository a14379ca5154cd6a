pub mod client;
pub mod document;

pub use client::CatalogClient;
pub use document::TraitCatalog;
