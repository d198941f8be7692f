//! Command-line entry point: submit one intake file and print its report.

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use briefing_engine::adapters::ai::{GeminiConfig, GeminiProvider};
use briefing_engine::adapters::document::LineReportParser;
use briefing_engine::adapters::notification::{InMemoryNotifier, ResendConfig, ResendNotifier};
use briefing_engine::adapters::submission::{
    InMemorySubmissionGateway, JsonlFallbackQueue, PostgresSubmissionGateway,
};
use briefing_engine::application::{NotificationPolicy, SubmitIntakeHandler, SynthesisOrchestrator};
use briefing_engine::config::AppConfig;
use briefing_engine::domain::intake::{
    demo_values, AdvanceOutcome, FieldValue, IntakeKind, IntakeRecord, WizardEngine,
};
use briefing_engine::ports::{AIProvider, Notifier, SubmissionGateway};

#[derive(Parser, Debug)]
#[command(name = "briefing-engine", about = "Submit an intake questionnaire and print its report")]
struct Args {
    /// JSON object with `kind` and the field values
    input: Option<PathBuf>,

    /// Start from the built-in demo answers of this questionnaire
    #[arg(long, value_name = "KIND")]
    demo: Option<IntakeKind>,

    /// Write the plain-text report here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load().context("loading configuration")?;
    config.log.init();
    config.validate().context("validating configuration")?;

    let input = match &args.input {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            Some(serde_json::from_str::<Value>(&raw).context("parsing intake JSON")?)
        }
        None => None,
    };
    let record = build_record(args.demo, input)?;
    info!(record_id = %record.id(), kind = %record.kind(), "Intake submitted");

    let handler = build_handler(&config).await?;
    let outcome = handler.handle(record).await;
    handler.flush_notifications().await;

    match outcome {
        Ok(result) => {
            let text = result.document.to_plain_text();
            match &args.output {
                Some(path) => tokio::fs::write(path, text)
                    .await
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", text),
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}

/// Runs the answers through a wizard up to the final step and submits.
fn build_record(demo: Option<IntakeKind>, input: Option<Value>) -> anyhow::Result<IntakeRecord> {
    let mut fields = match input {
        Some(Value::Object(map)) => map,
        Some(_) => bail!("intake JSON must be an object"),
        None => serde_json::Map::new(),
    };

    let kind = match fields.remove("kind") {
        Some(Value::String(kind)) => kind.parse::<IntakeKind>().map_err(anyhow::Error::msg)?,
        Some(_) => bail!("`kind` must be a string"),
        None => match demo {
            Some(kind) => kind,
            None => bail!("missing `kind` (business-briefing or swot-analysis)"),
        },
    };

    let mut wizard = WizardEngine::new(kind);
    if demo.is_some() {
        wizard.prefill(demo_values(kind));
    }
    wizard.prefill(
        fields
            .into_iter()
            .filter_map(|(name, value)| FieldValue::from_json(value).map(|v| (name, v))),
    );

    loop {
        match wizard.advance() {
            AdvanceOutcome::Advanced { .. } => continue,
            AdvanceOutcome::AtTerminal => break,
            AdvanceOutcome::Blocked { missing } => bail!(
                "{} (etapa {}: {})",
                wizard.current_definition().title,
                wizard.progress(),
                missing.join(", ")
            ),
        }
    }

    wizard
        .submit()
        .map_err(|e| anyhow::anyhow!("{}: {}", e.user_message(), e))
}

async fn build_handler(config: &AppConfig) -> anyhow::Result<SubmitIntakeHandler> {
    let provider: Option<Arc<dyn AIProvider>> = match config.ai.resolve_api_key() {
        Some(key) => {
            let gemini = GeminiConfig::from_secret(key)
                .with_model(&config.ai.model)
                .with_base_url(&config.ai.base_url)
                .with_timeout(config.ai.timeout());
            Some(Arc::new(GeminiProvider::new(gemini)?) as Arc<dyn AIProvider>)
        }
        None => {
            warn!("No Gemini API key configured, reports cannot be generated");
            None
        }
    };

    let mut orchestrator = SynthesisOrchestrator::new(provider, Arc::new(LineReportParser))
        .with_temperature(config.ai.temperature);
    if let Some(max) = config.ai.max_output_tokens {
        orchestrator = orchestrator.with_max_output_tokens(max);
    }

    let gateway: Arc<dyn SubmissionGateway> = match config.persistence.database_url() {
        Some(url) => {
            let postgres = PostgresSubmissionGateway::connect_lazy(
                url,
                config.persistence.max_connections,
                config.persistence.acquire_timeout(),
            )?;
            if let Err(e) = postgres.ensure_schema().await {
                warn!(error = %e, "Could not prepare submissions table");
            }
            Arc::new(postgres)
        }
        None => Arc::new(InMemorySubmissionGateway::new()),
    };

    let notifier: Arc<dyn Notifier> = match config.notifications.resend_api_key() {
        Some(key) => Arc::new(ResendNotifier::new(ResendConfig::new(
            key,
            config.notifications.from_header(),
        ))?),
        None => Arc::new(InMemoryNotifier::new()),
    };

    Ok(SubmitIntakeHandler::new(
        gateway,
        Arc::new(JsonlFallbackQueue::new(&config.persistence.fallback_queue_path)),
        notifier,
        Arc::new(orchestrator),
        NotificationPolicy {
            operator_email: config.notifications.operator_email.clone(),
            send_confirmation: config.notifications.send_confirmation,
        },
    ))
}
