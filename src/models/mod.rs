//! Database models and configuration for the product catalog.

pub mod config;
pub mod product;
