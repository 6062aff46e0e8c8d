//! HTTP handlers for the Links domain

pub mod links;
