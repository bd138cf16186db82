//! Template loading and merged-config writing.

mod loader;
mod writer;

pub use loader::load_yaml_mapping;
pub use writer::{test_output_path, write_yaml_mapping};

/// Base template filenames, looked up under the configured config directory.
pub const API_CONFIG_TEMPLATE: &str = "api_config.yaml";
pub const GEN_ANSWER_CONFIG_TEMPLATE: &str = "gen_answer_config.yaml";
pub const JUDGE_CONFIG_TEMPLATE: &str = "judge_config.yaml";
