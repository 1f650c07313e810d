//! Doctor command - validate configuration and show status

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::commands::label::{build_completion_service, load_api_key};
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    llm: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        llm: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {:#}", e));
            None
        }
    };

    if let Some(ref config) = config {
        report.llm = check_llm(config);
    }

    let checks = [&report.config, &report.llm];
    report.overall = if checks.iter().any(|c| c.is_error()) {
        "error".to_string()
    } else if checks.iter().all(|c| c.is_ok()) {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    // Output report
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

fn check_llm(config: &AppConfig) -> CheckResult {
    let provider = config.llm.provider.as_str();
    let model = &config.llm.model;
    let details = serde_json::json!({
        "provider": provider,
        "model": model,
        "timeout_secs": config.llm.timeout_secs,
    });

    // Never reveal the key itself, only whether its env var is usable
    let api_key_env = match provider {
        "openai" => &config.llm.openai.api_key_env,
        "openai_compat" => {
            if config.llm.openai_compat.base_url.trim().is_empty() {
                return CheckResult::error("OpenAI-compatible base_url is empty")
                    .with_details(details);
            }
            &config.llm.openai_compat.api_key_env
        }
        "stub" => return CheckResult::ok("Provider: stub (offline)").with_details(details),
        other => {
            return CheckResult::error(format!("Unknown provider: {}", other))
                .with_details(details);
        }
    };

    if let Err(e) = load_api_key(api_key_env, provider) {
        return CheckResult::warn(format!("Provider: {}, Model: {}, {}", provider, model, e))
            .with_details(details);
    }

    match build_completion_service(config) {
        Ok(_) => CheckResult::ok(format!(
            "Provider: {}, Model: {}, API key: {} (set)",
            provider, model, api_key_env
        ))
        .with_details(details),
        Err(e) => CheckResult::error(format!("Provider: {}, {:#}", provider, e))
            .with_details(details),
    }
}

fn print_report(report: &DoctorReport) {
    println!("topic-labeler Doctor Report");
    println!("===========================");
    println!();

    print_check("Config", &report.config);
    print_check("LLM Provider", &report.llm);

    println!();
    println!(
        "{} Overall: {}",
        status_symbol(&report.overall),
        report.overall.to_uppercase()
    );

    if report.overall == "ok" {
        println!();
        println!("Ready to run! Try: topic-labeler label --community-id 0 --file papers.txt");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    println!("{} {}: {}", status_symbol(&result.status), name, result.message);
}

fn status_symbol(status: &str) -> &'static str {
    match status {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    }
}
