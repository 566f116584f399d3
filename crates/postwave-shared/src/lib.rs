//! # Postwave Shared
//!
//! Wire types of the HTTP API, shared by the server and its clients.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
