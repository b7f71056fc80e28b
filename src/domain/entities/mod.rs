//! Core domain entities.
//!
//! Entities are plain data structures without business logic. Creation input
//! lives in a separate `New*` struct so that storage-assigned fields never
//! travel inward.

pub mod user;

pub use user::{NewUser, User};
