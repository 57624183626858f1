use super::render::{DEFAULT_WIDTH, format_message};
use super::utils;
use anyhow::{Context, Result};
use clap::Args;
use prizm_application::{RenderedMessage, SessionLifecycleController, SessionStore};
use prizm_core::user::UserService;
use prizm_execution::FlowRecorder;
use prizm_infrastructure::{ConfigBasedUserService, TokioTimer, TranscriptExporter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Request text
    #[arg(long, default_value = "")]
    pub prompt: String,
    /// Document attached to the request (.pdf, .docx or .txt)
    #[arg(long)]
    pub attach: Option<PathBuf>,
    /// JSON dataset file (overrides the configured dataset)
    #[arg(long)]
    pub dataset: Option<PathBuf>,
    /// Milliseconds between delivered messages
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Milliseconds before the first message is scheduled
    #[arg(long)]
    pub start_delay_ms: Option<u64>,
    /// Write the finished transcript here (.json or .md)
    #[arg(long)]
    pub export: Option<PathBuf>,
    /// Write the captured execution flow here as JSON
    #[arg(long)]
    pub flow_log: Option<PathBuf>,
}

pub async fn run(args: RunArgs, config_path: Option<&Path>, recorder: &mut FlowRecorder) -> Result<()> {
    let config_service = utils::config_service(config_path)?;
    let mut config = config_service
        .get_config()
        .with_context(|| format!("Failed to load config from {:?}", config_service.path()))?;

    if let Some(interval_ms) = args.interval_ms {
        config.delivery.interval_ms = interval_ms;
    }
    if let Some(start_delay_ms) = args.start_delay_ms {
        config.delivery.start_delay_ms = start_delay_ms;
    }

    utils::check_export_path(args.export.as_deref())?;

    let user = ConfigBasedUserService::new(config_service).require_user()?;
    tracing::debug!(nickname = %user.nickname, "[run] Signed in");

    let attachment = args
        .attach
        .as_deref()
        .map(utils::read_attachment)
        .transpose()?;

    let datasets = utils::dataset_repository(args.dataset.as_deref(), &config);
    let controller = SessionLifecycleController::new(
        SessionStore::new(),
        Arc::new(TokioTimer::current()?),
        datasets,
        config.delivery.clone(),
    )?;
    let projection = controller.projection();

    let session_id = controller.start_analysis(&args.prompt, attachment.as_ref())?;
    if let Some(summary) = projection.sessions().first() {
        println!("== {} ==\n", summary.title);
    }

    let mut printed = 0;
    loop {
        let fresh = projection.messages_since(&session_id, printed);
        for message in fresh.iter().cloned() {
            println!("{}", format_message(&RenderedMessage::from(message), DEFAULT_WIDTH));
        }
        printed += fresh.len();

        if fresh.is_empty() && !projection.is_delivering(&session_id) {
            break;
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                controller.cancel_delivery(&session_id);
                eprintln!("Interrupted, playback cancelled");
                break;
            }
            _ = tokio::time::sleep(POLL_INTERVAL) => {}
        }
    }

    controller.shutdown();

    if let Some(path) = args.export.as_deref() {
        let session = projection
            .session(&session_id)
            .context("Session vanished before export")?;
        TranscriptExporter::new()
            .export(&session, path)
            .with_context(|| format!("Failed to export transcript to {:?}", path))?;
        println!("Transcript exported to {}", path.display());
    }

    if let Some(path) = args.flow_log.as_deref() {
        let count = recorder
            .save(path)
            .with_context(|| format!("Failed to save execution flow to {:?}", path))?;
        println!("{} flow entries saved to {}", count, path.display());
    }

    Ok(())
}
