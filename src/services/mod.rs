//! Data access shared by the HTTP handlers.

pub mod crud;
pub mod relations;
