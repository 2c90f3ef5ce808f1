use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use crate::types::Config;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:80";
pub const DEFAULT_CHECK_PATH: &str = "/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let listen_addr: SocketAddr = env
        .get_var("LISTEN_ADDR")
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
        .parse()
        .context("Invalid LISTEN_ADDR")?;

    let check_path = non_empty(env.get_var("CHECK_PATH"))
        .unwrap_or_else(|| DEFAULT_CHECK_PATH.to_string());
    if !check_path.starts_with('/') {
        return Err(anyhow!("CHECK_PATH must start with '/', got {:?}", check_path));
    }

    // Empty means every namespace
    let namespace = non_empty(env.get_var("NAMESPACE"));
    let label_selector = non_empty(env.get_var("POD_LABEL_SELECTOR"));

    let timeout_secs: u64 = env
        .get_var("REQUEST_TIMEOUT_SECS")
        .unwrap_or_else(|| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
        .parse()
        .context("Invalid REQUEST_TIMEOUT_SECS")?;
    if timeout_secs == 0 {
        return Err(anyhow!("REQUEST_TIMEOUT_SECS must be greater than zero"));
    }

    let fail_if_pods_unlistable = env
        .get_var("FAIL_IF_PODS_UNLISTABLE")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(true);

    Ok(Config {
        listen_addr,
        check_path,
        namespace,
        label_selector,
        request_timeout: Duration::from_secs(timeout_secs),
        fail_if_pods_unlistable,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
