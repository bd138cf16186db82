//! Generate command: the load → merge → write pipeline, run once per
//! template.

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::Args;
use serde_yaml::Mapping;
use std::path::{Path, PathBuf};

use crate::config::{
    load_yaml_mapping, test_output_path, write_yaml_mapping, API_CONFIG_TEMPLATE,
    GEN_ANSWER_CONFIG_TEMPLATE, JUDGE_CONFIG_TEMPLATE,
};
use crate::domain::RunParams;
use crate::merge::{merge_api_config, merge_gen_answer_config, merge_judge_config};
use crate::presets::{
    BASELINE_MODEL_CHOICES, DEFAULT_BASELINE_MODEL, DEFAULT_JUDGE_MODEL, DEFAULT_MODEL_ID,
    JUDGE_MODEL_CHOICES,
};
use crate::secrets::{endpoint_key_map, KeyVaultStore, SecretStore};

#[derive(Args)]
pub struct GenerateArgs {
    /// Identifier the generated configs use for the model under test
    #[arg(long = "model_id", value_name = "ID", default_value = DEFAULT_MODEL_ID)]
    pub model_id: String,

    /// Model name registered with the vllm server
    #[arg(long = "model_name", value_name = "NAME")]
    pub model_name: String,

    /// Name of the judge model
    #[arg(
        long = "judge_model_name",
        value_name = "NAME",
        default_value = DEFAULT_JUDGE_MODEL,
        value_parser = PossibleValuesParser::new(JUDGE_MODEL_CHOICES)
    )]
    pub judge_model_name: String,

    /// Name of the baseline model
    #[arg(
        long = "baseline_model_name",
        value_name = "NAME",
        default_value = DEFAULT_BASELINE_MODEL,
        value_parser = PossibleValuesParser::new(BASELINE_MODEL_CHOICES)
    )]
    pub baseline_model_name: String,

    /// Managed (AML) run: resolve evaluator keys from the workspace key vault
    #[arg(long = "is_aml_run")]
    pub is_aml_run: bool,

    /// Input dir recorded for the orchestrator (no local effect)
    #[arg(long = "input_dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Output dir recorded for the orchestrator (no local effect)
    #[arg(long = "output_dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Port the vllm server is hosted on
    #[arg(long = "port", value_name = "PORT", default_value = "8008")]
    pub port: String,

    /// Max tokens for generating an answer
    #[arg(long = "max_answer_tokens", value_name = "TOKENS", default_value_t = 2048)]
    pub max_answer_tokens: u32,

    /// Categories for generating answers, split by comma
    #[arg(long = "categories", value_name = "CSV", default_value = "all")]
    pub categories: String,

    /// Directory holding the three base templates
    #[arg(long = "config_dir", value_name = "DIR", default_value = "config")]
    pub config_dir: PathBuf,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let params = RunParams {
        model_id: args.model_id,
        model_name: args.model_name,
        judge_model_name: args.judge_model_name,
        baseline_model_name: args.baseline_model_name,
        aml_run: args.is_aml_run,
        input_dir: args.input_dir,
        output_dir: args.output_dir,
        port: args.port,
        max_answer_tokens: args.max_answer_tokens,
        categories: args.categories,
    };

    tracing::debug!(
        input_dir = ?params.input_dir,
        output_dir = ?params.output_dir,
        "orchestrator passthrough dirs"
    );

    // Managed runs resolve every evaluator key up front, so a missing vault
    // secret aborts before any config is written. The map is not folded into
    // the api config: the generated endpoint descriptors keep the template
    // credentials, and the test endpoint uses the static vllm token.
    // TODO: fold the resolved keys into the evaluator endpoint descriptors
    // once the downstream pipeline stops reading them from its own vault.
    let store = if params.aml_run { Some(KeyVaultStore::from_env()?) } else { None };
    let evaluator_endpoints =
        [params.judge_model_name.as_str(), params.baseline_model_name.as_str()];
    let key_map = endpoint_key_map(
        &evaluator_endpoints,
        store.as_ref().map(|s| s as &dyn SecretStore),
    )?;
    tracing::debug!(endpoints = key_map.len(), "resolved endpoint key map");

    assemble(&args.config_dir, &params)
}

fn assemble(config_dir: &Path, params: &RunParams) -> Result<()> {
    generate_one(config_dir.join(API_CONFIG_TEMPLATE), params, merge_api_config)?;
    generate_one(config_dir.join(GEN_ANSWER_CONFIG_TEMPLATE), params, merge_gen_answer_config)?;
    generate_one(config_dir.join(JUDGE_CONFIG_TEMPLATE), params, merge_judge_config)?;
    Ok(())
}

fn generate_one<F>(template: PathBuf, params: &RunParams, merge: F) -> Result<()>
where
    F: Fn(Mapping, &RunParams) -> Result<Mapping>,
{
    let mapping = load_yaml_mapping(&template)?;
    let merged = merge(mapping, params)?;

    let output = test_output_path(&template);
    write_yaml_mapping(&output, &merged)?;

    // Echo each merged config so it lands in the job log.
    let rendered = serde_yaml::to_string(&merged)
        .with_context(|| format!("Failed rendering config for {}", output.display()))?;
    print!("{rendered}");
    tracing::info!(path = %output.display(), "wrote config");

    Ok(())
}
