//! Accounts domain layer: entities and validation

pub mod entities;
