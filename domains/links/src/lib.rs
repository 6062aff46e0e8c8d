//! Links domain: shared subject links published by seniors, searched by juniors

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{LinkSearch, NewLink, SharedLink};

// Re-export repository types
pub use repository::{LinkRepository, LinksRepositories};

// Re-export API types
pub use api::routes;
pub use api::LinksState;
