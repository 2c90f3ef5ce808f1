use anyhow::{anyhow, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::{api::ListParams, Api, Client};

use crate::error::BoxError;
use crate::types::Config;

/// Source of the monitored signal: how many pods are currently visible.
#[async_trait]
pub trait PodCounter: Send + Sync {
    async fn count(&self) -> Result<usize, BoxError>;
}

/// Counts pods through the cluster API.
pub struct KubePodCounter {
    api: Api<Pod>,
    params: ListParams,
}

impl KubePodCounter {
    pub fn new(client: Client, namespace: Option<&str>, label_selector: Option<&str>) -> Self {
        let api: Api<Pod> = match namespace {
            Some(ns) => Api::namespaced(client, ns),
            None => Api::all(client),
        };
        let mut params = ListParams::default();
        if let Some(selector) = label_selector {
            params = params.labels(selector);
        }
        Self { api, params }
    }

    pub fn from_config(client: Client, cfg: &Config) -> Self {
        Self::new(client, cfg.namespace.as_deref(), cfg.label_selector.as_deref())
    }
}

#[async_trait]
impl PodCounter for KubePodCounter {
    async fn count(&self) -> Result<usize, BoxError> {
        // Only metadata is needed to count
        let pods = self.api.list_metadata(&self.params).await?;
        Ok(pods.items.len())
    }
}

/// Fixed-answer counter for tests and local runs without a cluster.
#[derive(Debug, Clone)]
pub struct MockPodCounter {
    result: Result<usize, String>,
}

impl MockPodCounter {
    pub fn new(count: usize) -> Self {
        Self { result: Ok(count) }
    }

    pub fn failing<M: Into<String>>(message: M) -> Self {
        Self {
            result: Err(message.into()),
        }
    }
}

#[async_trait]
impl PodCounter for MockPodCounter {
    async fn count(&self) -> Result<usize, BoxError> {
        self.result.clone().map_err(BoxError::from)
    }
}

/// Fail fast at startup when pods cannot be listed.
pub async fn ensure_pods_listable(counter: &dyn PodCounter) -> Result<usize> {
    counter
        .count()
        .await
        .map_err(|e| anyhow!("pod listing unavailable: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_counter() {
        let counter = MockPodCounter::new(42);
        assert_eq!(tokio_test::block_on(counter.count()).unwrap(), 42);

        let counter = MockPodCounter::failing("forbidden");
        let err = tokio_test::block_on(counter.count()).unwrap_err();
        assert_eq!(err.to_string(), "forbidden");
    }

    #[tokio::test]
    async fn test_ensure_pods_listable() {
        assert_eq!(ensure_pods_listable(&MockPodCounter::new(3)).await.unwrap(), 3);

        let err = ensure_pods_listable(&MockPodCounter::failing("timed out"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("pod listing unavailable"));
        assert!(err.to_string().contains("timed out"));
    }
}
