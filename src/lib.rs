// Public modules
pub mod types;
pub mod config;
pub mod error;
pub mod parsing;
pub mod evaluator;
pub mod kubernetes;
pub mod server;

// Re-export commonly used items
pub use types::*;
pub use config::{load_config, load_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use error::WebhookError;
pub use parsing::{parse_threshold, parse_optional_threshold};
pub use evaluator::{check, evaluate};
pub use kubernetes::{ensure_pods_listable, KubePodCounter, MockPodCounter, PodCounter};
pub use server::{router, serve};
