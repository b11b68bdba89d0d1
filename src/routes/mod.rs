//! HTTP route handlers

pub mod endorsements;
pub mod health;

pub use endorsements::list_endorsements;
pub use health::health_check;
