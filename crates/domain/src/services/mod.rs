//! Business logic services for the domain layer.

pub mod authorization;

pub use authorization::Actor;
