//! CoffeeBrew application layer
//!
//! This crate contains the phase controller and the use cases built on it.

pub mod app;
pub mod deps;
pub mod usecases;

pub use app::App;
pub use deps::AppDeps;
