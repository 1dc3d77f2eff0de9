//! Check Status use case.
//!
//! Probes the backend and folds the result into a [`BackendHealth`] badge
//! state. A failed probe is not an error — it is the `Disconnected` state.

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use std::sync::Arc;
use tracing::{debug, warn};
use twin_domain::BackendHealth;

/// Use case for probing backend reachability.
pub struct CheckStatusUseCase {
    gateway: Arc<dyn ChatGateway>,
}

impl CheckStatusUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    /// Probe the status endpoint and map the result to a badge state.
    pub async fn execute(&self) -> BackendHealth {
        match self.gateway.status().await {
            Ok(status) => {
                debug!("Backend status: {status}");
                BackendHealth::Online(status)
            }
            Err(e) => {
                warn!("Status probe failed: {e}");
                BackendHealth::Disconnected
            }
        }
    }

    /// Probe the liveness endpoint. Unlike [`execute`](Self::execute), this
    /// surfaces the failure so callers can show the detail.
    pub async fn health(&self) -> Result<String, GatewayError> {
        self.gateway.health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::StreamSession;
    use async_trait::async_trait;

    // ==================== Test Mocks ====================

    struct MockGateway {
        status: Result<String, GatewayError>,
    }

    #[async_trait]
    impl ChatGateway for MockGateway {
        async fn status(&self) -> Result<String, GatewayError> {
            match &self.status {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(GatewayError::Network(e.to_string())),
            }
        }

        async fn health(&self) -> Result<String, GatewayError> {
            self.status().await.map(|_| "OK".to_string())
        }

        async fn generate(&self, _message: &str) -> Result<String, GatewayError> {
            unimplemented!("not used by CheckStatus tests")
        }

        fn generate_stream(&self, _message: &str) -> StreamSession {
            unimplemented!("not used by CheckStatus tests")
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn reachable_backend_is_online_with_its_label() {
        let use_case = CheckStatusUseCase::new(Arc::new(MockGateway {
            status: Ok("Digital Twin Service is running".to_string()),
        }));

        let health = use_case.execute().await;

        assert_eq!(
            health,
            BackendHealth::Online("Digital Twin Service is running".to_string())
        );
    }

    #[tokio::test]
    async fn failed_probe_is_disconnected_not_an_error() {
        let use_case = CheckStatusUseCase::new(Arc::new(MockGateway {
            status: Err(GatewayError::Network("connection refused".to_string())),
        }));

        assert_eq!(use_case.execute().await, BackendHealth::Disconnected);
    }

    #[tokio::test]
    async fn health_probe_surfaces_the_failure() {
        let use_case = CheckStatusUseCase::new(Arc::new(MockGateway {
            status: Err(GatewayError::Network("connection refused".to_string())),
        }));

        assert!(use_case.health().await.is_err());
    }
}
