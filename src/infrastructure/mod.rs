//! Infrastructure layer - Pricing catalog, services and logging

pub mod logging;
pub mod pricing;
