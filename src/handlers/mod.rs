pub mod common;
pub mod components;
pub mod customers;
pub mod health;
pub mod laptops;
pub mod orders;
pub mod shipments;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;
