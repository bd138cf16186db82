//! The three deterministic template merges. Each takes a loaded template
//! mapping and the run parameters; inserts overwrite equal keys, so template
//! entries lose to generated ones.

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};

use crate::domain::{ApiType, Endpoint, ModelEntry, RunParams};
use crate::presets;

fn insert_model_entry(target: &mut Mapping, key: &str, entry: &ModelEntry) -> Result<()> {
    let value = serde_yaml::to_value(entry)
        .with_context(|| format!("Failed serializing model entry: {key}"))?;
    target.insert(Value::String(key.to_string()), value);
    Ok(())
}

/// Merge the api config: the preset evaluator entries, then the test-model
/// entry built from `model_id`/`model_name`/`port`.
pub fn merge_api_config(mut api_config: Mapping, params: &RunParams) -> Result<Mapping> {
    for entry in presets::EVALUATOR_MODELS.iter() {
        insert_model_entry(&mut api_config, &entry.model_name, entry)?;
    }

    let test_entry = ModelEntry {
        model_name: params.model_name.clone(),
        endpoints: vec![Endpoint {
            api_base: format!("http://localhost:{}/v1", params.port),
            api_version: None,
            api_key: Some(presets::TEST_MODEL_API_KEY.to_string()),
        }],
        api_type: ApiType::Openai,
        parallel: presets::TEST_MODEL_PARALLEL,
    };
    insert_model_entry(&mut api_config, &params.model_id, &test_entry)?;

    Ok(api_config)
}

/// Merge the answer-generation config: model list, token budget, categories.
pub fn merge_gen_answer_config(mut gen_config: Mapping, params: &RunParams) -> Result<Mapping> {
    gen_config.insert(
        Value::String("model_list".into()),
        Value::Sequence(vec![Value::String(params.model_id.clone())]),
    );
    gen_config.insert(
        Value::String("max_tokens".into()),
        Value::Number(u64::from(params.max_answer_tokens).into()),
    );

    // Split verbatim: empty and space-padded segments are kept as written,
    // since category names are matched exactly downstream.
    let categories: Vec<Value> =
        params.categories.split(',').map(|c| Value::String(c.to_string())).collect();
    gen_config.insert(Value::String("categories".into()), Value::Sequence(categories));

    Ok(gen_config)
}

/// Merge the judge config. `baseline` and `pairwise` are forced off whatever
/// the template says; the hard arena judges each answer in isolation against
/// a reference solution.
pub fn merge_judge_config(mut judge_config: Mapping, params: &RunParams) -> Result<Mapping> {
    judge_config.insert(
        Value::String("judge_model".into()),
        Value::String(params.judge_model_name.clone()),
    );
    judge_config.insert(Value::String("baseline".into()), Value::Bool(false));
    judge_config.insert(Value::String("pairwise".into()), Value::Bool(false));
    judge_config.insert(
        Value::String("regex_pattern".into()),
        Value::String(presets::JUDGE_REGEX_PATTERN.to_string()),
    );
    judge_config.insert(
        Value::String("model_list".into()),
        Value::Sequence(vec![Value::String(params.model_id.clone())]),
    );
    judge_config.insert(
        Value::String("system_prompt".into()),
        Value::String(presets::JUDGE_SYSTEM_PROMPT.to_string()),
    );
    judge_config.insert(
        Value::String("prompt_template".into()),
        Value::Sequence(vec![Value::String(presets::JUDGE_PROMPT_TEMPLATE.to_string())]),
    );

    Ok(judge_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> RunParams {
        RunParams {
            model_id: "test-model".to_string(),
            model_name: "vllm-test".to_string(),
            judge_model_name: presets::DEFAULT_JUDGE_MODEL.to_string(),
            baseline_model_name: presets::DEFAULT_BASELINE_MODEL.to_string(),
            aml_run: false,
            input_dir: None,
            output_dir: None,
            port: "9000".to_string(),
            max_answer_tokens: 512,
            categories: "math,code".to_string(),
        }
    }

    fn get<'a>(mapping: &'a Mapping, key: &str) -> &'a Value {
        mapping.get(key).unwrap_or_else(|| panic!("missing key: {key}"))
    }

    #[test]
    fn test_api_merge_adds_evaluators_and_test_model() {
        let merged = merge_api_config(Mapping::new(), &params()).expect("merge");

        // Three evaluator entries plus the test model.
        assert_eq!(merged.len(), 4);
        for entry in presets::EVALUATOR_MODELS.iter() {
            let value = get(&merged, &entry.model_name);
            assert_eq!(value.get("api_type").and_then(Value::as_str), Some("azure"));
        }

        let test = get(&merged, "test-model");
        assert_eq!(test.get("model_name").and_then(Value::as_str), Some("vllm-test"));
        assert_eq!(test.get("api_type").and_then(Value::as_str), Some("openai"));
        assert_eq!(test.get("parallel").and_then(Value::as_u64), Some(8));
        let endpoint = &test.get("endpoints").and_then(Value::as_sequence).expect("endpoints")[0];
        assert_eq!(
            endpoint.get("api_base").and_then(Value::as_str),
            Some("http://localhost:9000/v1")
        );
        assert_eq!(endpoint.get("api_key").and_then(Value::as_str), Some("token-abc123"));
        // The openai-type entry has no api_version field at all.
        assert!(endpoint.get("api_version").is_none());
    }

    #[test]
    fn test_api_merge_overwrites_template_entry_of_same_name() {
        let mut template = Mapping::new();
        template.insert(Value::String("test-model".into()), Value::String("stale".into()));
        template.insert(Value::String("unrelated".into()), Value::String("kept".into()));

        let merged = merge_api_config(template, &params()).expect("merge");
        assert_eq!(merged.len(), 5);
        assert!(get(&merged, "test-model").is_mapping());
        assert_eq!(get(&merged, "unrelated").as_str(), Some("kept"));
    }

    #[test]
    fn test_gen_merge_sets_model_tokens_and_categories() {
        let mut template = Mapping::new();
        template.insert(Value::String("temperature".into()), Value::Number(0.into()));
        template.insert(Value::String("max_tokens".into()), Value::Number(2048.into()));

        let merged = merge_gen_answer_config(template, &params()).expect("merge");
        assert_eq!(get(&merged, "model_list"), &Value::Sequence(vec!["test-model".into()]));
        assert_eq!(get(&merged, "max_tokens").as_u64(), Some(512));
        assert_eq!(
            get(&merged, "categories"),
            &Value::Sequence(vec!["math".into(), "code".into()])
        );
        // Untouched template keys survive.
        assert_eq!(get(&merged, "temperature").as_u64(), Some(0));
    }

    #[test]
    fn test_category_split_is_verbatim() {
        let mut p = params();

        p.categories = "all".to_string();
        let merged = merge_gen_answer_config(Mapping::new(), &p).expect("merge");
        assert_eq!(get(&merged, "categories"), &Value::Sequence(vec!["all".into()]));

        // No trimming, no empty-segment filtering.
        p.categories = "a,,b ".to_string();
        let merged = merge_gen_answer_config(Mapping::new(), &p).expect("merge");
        assert_eq!(
            get(&merged, "categories"),
            &Value::Sequence(vec!["a".into(), "".into(), "b ".into()])
        );
    }

    #[test]
    fn test_judge_merge_forces_flags_off() {
        let mut template = Mapping::new();
        template.insert(Value::String("baseline".into()), Value::Bool(true));
        template.insert(Value::String("pairwise".into()), Value::Bool(true));
        template.insert(Value::String("judge_model".into()), Value::String("gpt-4o".into()));

        let merged = merge_judge_config(template, &params()).expect("merge");
        assert_eq!(get(&merged, "baseline"), &Value::Bool(false));
        assert_eq!(get(&merged, "pairwise"), &Value::Bool(false));
        assert_eq!(get(&merged, "judge_model").as_str(), Some(presets::DEFAULT_JUDGE_MODEL));
        assert_eq!(get(&merged, "regex_pattern").as_str(), Some(r"\[\[(Pass|Fail)\]\]"));
        assert_eq!(get(&merged, "model_list"), &Value::Sequence(vec!["test-model".into()]));

        let templates = get(&merged, "prompt_template").as_sequence().expect("sequence");
        assert_eq!(templates.len(), 1);
        assert!(templates[0].as_str().expect("string").starts_with("<Math Problem>"));
    }
}
