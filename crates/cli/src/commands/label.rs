//! Label command - describe one community

use anyhow::{Context, Result, bail};
use secrecy::SecretString;
use std::io::{self, Read};
use std::path::PathBuf;
use topic_labeler_adapters::llm::{LlmConfig as AdapterLlmConfig, OpenAiChatClient, StubCompletion};
use topic_labeler_domain::CompletionService;
use topic_labeler_domain::{LabelResult, field_text};
use topic_labeler_domain::policy::PolicyValidator;
use topic_labeler_domain::prompt::build_topic_prompt;
use topic_labeler_domain::usecases::TopicLabeler;

use crate::args::LabelArgs;
use crate::config::AppConfig;

pub async fn execute(args: LabelArgs, config_path: Option<PathBuf>) -> Result<()> {
    let papers = get_input_papers(&args)?;

    if papers.trim().is_empty() {
        bail!("No papers provided for labeling");
    }

    if args.print_prompt {
        println!("{}", build_topic_prompt(&papers));
        return Ok(());
    }

    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    let service = build_completion_service(&config)?;
    let labeler = TopicLabeler::new(service);

    let result = labeler
        .label(&papers, args.community_id)
        .await
        .context("Labeling failed")?;

    for violation in PolicyValidator::default().review(&result) {
        tracing::warn!(
            community_id = %result.community_id,
            %violation,
            "Label outside requested format"
        );
    }

    if args.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", json);
    } else {
        print_result(&result);
    }

    Ok(())
}

fn print_result(result: &LabelResult) {
    println!("Community {}", result.community_id);
    println!("======================");
    println!();
    println!("Topic: {}", field_text(&result.topic));
    println!();
    println!("{}", field_text(&result.description));
}

pub(crate) fn build_completion_service(config: &AppConfig) -> Result<Box<dyn CompletionService>> {
    let llm_config = adapter_llm_config(&config.llm);

    match config.llm.provider.as_str() {
        "openai" => {
            let api_key = load_api_key(&config.llm.openai.api_key_env, "openai")?;
            let client = OpenAiChatClient::with_base_url(
                api_key,
                config.llm.openai.base_url.clone(),
                llm_config,
            )
            .context("Failed to configure OpenAI client")?;
            Ok(Box::new(client))
        }
        "openai_compat" => {
            let base_url = config.llm.openai_compat.base_url.trim();
            if base_url.is_empty() {
                bail!("OpenAI-compatible base_url is required");
            }
            let api_key = load_api_key(&config.llm.openai_compat.api_key_env, "openai_compat")?;
            let client = OpenAiChatClient::with_base_url(api_key, base_url.to_string(), llm_config)
                .context("Failed to configure OpenAI-compatible client")?;
            Ok(Box::new(client))
        }
        "stub" => Ok(Box::new(StubCompletion::echo())),
        other => bail!("Unknown LLM provider: {}", other),
    }
}

fn adapter_llm_config(config: &crate::config::LlmConfig) -> AdapterLlmConfig {
    AdapterLlmConfig {
        model: config.model.clone(),
        temperature: config.temperature,
        max_output_tokens: config.max_output_tokens,
        timeout_secs: config.timeout_secs,
    }
}

pub(crate) fn load_api_key(env_var: &str, provider: &str) -> Result<SecretString> {
    if env_var.trim().is_empty() {
        bail!("No API key env var configured for provider {}", provider);
    }

    let key = std::env::var(env_var).with_context(|| {
        format!(
            "Missing API key env var {} for provider {}",
            env_var, provider
        )
    })?;

    if key.trim().is_empty() {
        bail!(
            "API key env var {} is empty for provider {}",
            env_var,
            provider
        );
    }

    Ok(SecretString::new(key.into()))
}

/// Papers come from `--papers`, a file, or stdin only when `--file -` is given
fn get_input_papers(args: &LabelArgs) -> Result<String> {
    match (&args.papers, &args.file) {
        (Some(papers), _) => Ok(papers.clone()),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut papers = String::new();
            io::stdin()
                .read_to_string(&mut papers)
                .context("Failed to read from stdin")?;
            Ok(papers)
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        (None, None) => bail!("No papers input given: pass --papers or --file"),
    }
}
