//! Core data types shared across the config assembly pipeline.

use serde::Serialize;
use std::path::PathBuf;

/// How to reach one model-serving API. Azure endpoints carry an API version;
/// locally hosted vllm endpoints carry an API key instead.
#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
    pub api_base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Which client protocol an endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    Azure,
    Openai,
}

/// One entry in the api config: a model plus the endpoints serving it.
/// The api config maps a model-name key to one of these; for the preset
/// evaluator models the key equals `model_name`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelEntry {
    pub model_name: String,
    pub endpoints: Vec<Endpoint>,
    pub api_type: ApiType,
    pub parallel: u32,
}

/// Parameter set for a single assembly run, built from CLI arguments.
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct RunParams {
    /// Identifier the generated configs use for the model under test.
    pub model_id: String,
    /// Model name registered with the vllm server.
    pub model_name: String,
    pub judge_model_name: String,
    pub baseline_model_name: String,
    /// Managed (AML) execution: evaluator keys are resolved from the
    /// workspace key vault before assembly.
    pub aml_run: bool,
    /// Passthrough directories recorded by the orchestrator; no local effect.
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// Port the vllm server is hosted on.
    pub port: String,
    pub max_answer_tokens: u32,
    /// Comma-separated category filter, split verbatim at merge time.
    pub categories: String,
}
