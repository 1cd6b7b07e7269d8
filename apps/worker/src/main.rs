//! Rolewatch periodic evaluation worker.

#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use rolewatch_application::{ComplianceService, ValidRuleParameters};
use rolewatch_core::{AccountId, RuleError, RuleResult};
use rolewatch_domain::{ComplianceType, Evaluation};
use rolewatch_infrastructure::HttpRoleDirectory;

#[derive(Debug, Clone)]
struct WorkerConfig {
    api_base_url: String,
    shared_secret: String,
    account_id: AccountId,
    rule_parameters: HashMap<String, String>,
    evaluation_interval_seconds: u64,
}

#[derive(Debug, Serialize)]
struct EvaluationReportRequest<'a> {
    run_id: String,
    account_id: &'a str,
    evaluated_at: DateTime<Utc>,
    evaluations: &'a [Evaluation],
}

#[tokio::main]
async fn main() -> Result<(), RuleError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = WorkerConfig::load()?;

    // An invalid rule configuration aborts the process here, before any
    // role is ever evaluated.
    let parameters = ValidRuleParameters::from_raw(&config.rule_parameters)?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .map_err(|error| RuleError::Internal(format!("failed to build HTTP client: {error}")))?;

    let directory = Arc::new(HttpRoleDirectory::new(
        http_client.clone(),
        config.api_base_url.as_str(),
        config.shared_secret.as_str(),
    ));
    let compliance_service = ComplianceService::new(directory);

    info!(
        account_id = %config.account_id,
        days_before_unused = parameters.days_before_unused(),
        evaluation_interval_seconds = config.evaluation_interval_seconds,
        "rolewatch-worker started"
    );

    loop {
        let run_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        match compliance_service.evaluate(&parameters, now).await {
            Ok(evaluations) => {
                let non_compliant_count = evaluations
                    .iter()
                    .filter(|evaluation| {
                        evaluation.compliance_type == ComplianceType::NonCompliant
                    })
                    .count();

                match deliver_report(&http_client, &config, &run_id, now, &evaluations).await {
                    Ok(()) => {
                        info!(
                            run_id = %run_id,
                            role_count = evaluations.len(),
                            non_compliant_count,
                            "evaluation run delivered"
                        );
                    }
                    Err(error) => {
                        warn!(
                            run_id = %run_id,
                            error = %error,
                            "failed to deliver evaluation report"
                        );
                    }
                }
            }
            Err(error) => {
                warn!(run_id = %run_id, error = %error, "evaluation run failed");
            }
        }

        tokio::time::sleep(Duration::from_secs(config.evaluation_interval_seconds)).await;
    }
}

async fn deliver_report(
    http_client: &reqwest::Client,
    config: &WorkerConfig,
    run_id: &str,
    evaluated_at: DateTime<Utc>,
    evaluations: &[Evaluation],
) -> RuleResult<()> {
    let endpoint = format!("{}/api/evaluations", config.api_base_url);
    let response = http_client
        .post(endpoint)
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", config.shared_secret),
        )
        .json(&EvaluationReportRequest {
            run_id: run_id.to_owned(),
            account_id: config.account_id.as_str(),
            evaluated_at,
            evaluations,
        })
        .send()
        .await
        .map_err(|error| {
            RuleError::Internal(format!("failed to call evaluation report endpoint: {error}"))
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<body unavailable>".to_owned());
        return Err(RuleError::Internal(format!(
            "evaluation report endpoint returned status {}: {body}",
            status.as_u16()
        )));
    }

    Ok(())
}

impl WorkerConfig {
    fn load() -> RuleResult<Self> {
        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3001".to_owned())
            .trim_end_matches('/')
            .to_owned();
        let shared_secret = required_env("SHARED_SECRET")?;
        let account_id = AccountId::new(required_env("ACCOUNT_ID")?)?;
        let rule_parameters = rule_parameters_env("RULE_PARAMETERS")?;
        let evaluation_interval_seconds = parse_env_u64("EVALUATION_INTERVAL_SECONDS", 86_400)?;

        if evaluation_interval_seconds == 0 {
            return Err(RuleError::Configuration(
                "EVALUATION_INTERVAL_SECONDS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            api_base_url,
            shared_secret,
            account_id,
            rule_parameters,
            evaluation_interval_seconds,
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> RuleResult<String> {
    env::var(name).map_err(|_| RuleError::Configuration(format!("{name} is required")))
}

fn rule_parameters_env(name: &str) -> RuleResult<HashMap<String, String>> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => serde_json::from_str(&value).map_err(|error| {
            RuleError::Configuration(format!("invalid {name} value '{value}': {error}"))
        }),
        _ => Ok(HashMap::new()),
    }
}

fn parse_env_u64(name: &str, default: u64) -> RuleResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            RuleError::Configuration(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
