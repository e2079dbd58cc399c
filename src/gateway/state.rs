use std::sync::Arc;

use crate::detection::BatchOrchestrator;

#[derive(Clone)]
pub struct HandlerState {
    pub orchestrator: Arc<BatchOrchestrator>,
}

impl HandlerState {
    pub fn new(orchestrator: Arc<BatchOrchestrator>) -> Self {
        Self { orchestrator }
    }
}
