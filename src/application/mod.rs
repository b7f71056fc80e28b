//! Application layer services implementing business logic.
//!
//! Services coordinate repository and cache calls and provide a clean API for
//! HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - User creation, lookup and the cached user list

pub mod services;
