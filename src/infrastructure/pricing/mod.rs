//! Pricing catalog and calculator service

mod in_memory;
mod loader;
mod service;

pub use in_memory::InMemoryPricingRepository;
pub use loader::{load_builtin, load_catalog, load_dir};
pub use service::{CalculatorService, CalculatorServiceTrait};

#[cfg(test)]
pub use service::MockCalculatorServiceTrait;
