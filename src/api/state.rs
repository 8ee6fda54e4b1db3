//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::pricing::CalculatorServiceTrait;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<dyn CalculatorServiceTrait>,
}

impl AppState {
    pub fn new(calculator: Arc<dyn CalculatorServiceTrait>) -> Self {
        Self { calculator }
    }
}
