//! # Postwave Core
//!
//! The domain layer of the Postwave scheduler.
//! This crate contains the post lifecycle, dispatch and engagement logic
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
