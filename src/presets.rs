//! Named constants for the fixed parts of the generated configs: the
//! evaluator model table, judge prompt literals, and test-endpoint defaults.
//! Kept out of the merge code so new evaluator models or prompts are a
//! one-line change here.

use crate::domain::{ApiType, Endpoint, ModelEntry};
use once_cell::sync::Lazy;

pub const DEFAULT_MODEL_ID: &str = "Phi-3-mini-4k-instruct";

pub const JUDGE_MODEL_CHOICES: [&str; 2] = ["tscience-uks-gpt4-1106", "tscience-uks-gpt-4o"];
pub const DEFAULT_JUDGE_MODEL: &str = "tscience-uks-gpt-4o";

pub const BASELINE_MODEL_CHOICES: [&str; 2] =
    ["tscience-uks-gpt-35-turbo-1106", "tscience-uks-gpt-4o"];
pub const DEFAULT_BASELINE_MODEL: &str = "tscience-uks-gpt-35-turbo-1106";

/// Shared AOAI inference endpoint backing every evaluator model.
pub const AOAI_API_BASE: &str = "https://aims-oai-research-inference-uks.openai.azure.com/";
pub const AOAI_API_VERSION: &str = "2024-02-01";

/// Placeholder key for the locally hosted vllm endpoint; vllm is started
/// with this token, so the generated config must carry it verbatim.
pub const TEST_MODEL_API_KEY: &str = "token-abc123";
pub const TEST_MODEL_PARALLEL: u32 = 8;

/// Verdict marker the judge must emit; answers are graded by matching this.
pub const JUDGE_REGEX_PATTERN: &str = r"\[\[(Pass|Fail)\]\]";

pub const JUDGE_SYSTEM_PROMPT: &str = "You are given a math problem along with a reference solution. In the output, you must first extract the final answer from the model Response and compare it with the reference answer. Then you must provide one of the following choices as your final verdict with a label:\n\n1. Model answer is the same as the reference answer: [[Pass]]\n2. Model answer is not the same: [[Fail]]\n\nExample: \"The model answer is XXX. The reference answer is XXX. My final verdict is: [[Pass]]\". Do not inject your own understanding to this problem.";

pub const JUDGE_PROMPT_TEMPLATE: &str =
    "<Math Problem>\n{question_1}\n\n<Model Solution>\n{answer_1}\n<Reference Solution>{reference_1}\n";

/// Evaluator (judge/baseline) entries inserted into every generated api
/// config. gpt4-1106 gets a lower parallel degree; its deployment has the
/// tightest rate limit of the three.
pub static EVALUATOR_MODELS: Lazy<Vec<ModelEntry>> = Lazy::new(|| {
    ["tscience-uks-gpt-35-turbo-1106", "tscience-uks-gpt4-1106", "tscience-uks-gpt-4o"]
        .into_iter()
        .map(|name| ModelEntry {
            model_name: name.to_string(),
            endpoints: vec![Endpoint {
                api_base: AOAI_API_BASE.to_string(),
                api_version: Some(AOAI_API_VERSION.to_string()),
                api_key: None,
            }],
            api_type: ApiType::Azure,
            parallel: if name == "tscience-uks-gpt4-1106" { 8 } else { 16 },
        })
        .collect()
});
