//! Pricing Service - Fee-type pricing models, form/wire conversion and matrix reconciliation.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
