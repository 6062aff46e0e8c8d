//! Links domain layer: entities and search criteria

pub mod entities;
