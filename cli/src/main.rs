//! CLI entrypoint for cabinet
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod cli;
mod output;
mod progress;

use anyhow::{Context, Result};
use cabinet_application::control::control_channel;
use cabinet_application::ports::brief_repository::BriefRepository;
use cabinet_application::ports::cabinet_repository::CabinetRepository;
use cabinet_application::ports::progress::{DebateProgress, NoProgress};
use cabinet_application::ports::transcript_store::TranscriptStore;
use cabinet_application::use_cases::{
    CreateBriefUseCase, RateMinistersUseCase, RatingEntry, RunDebateUseCase,
};
use cabinet_domain::{
    Brief, BriefContext, BriefId, BriefStatus, MinisterId, Rating, RatingValue, available_models,
};
use cabinet_infrastructure::{ConfigLoader, FileConfig, JsonlTranscriptLog, MemoryStore, OpenAiGateway};
use clap::Parser;
use cli::{Cli, Command, OutputFormat};
use output::{ConsoleFormatter, parse_rating_arg};
use progress::ConsoleProgress;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    // === Dependency Injection ===
    let store = Arc::new(MemoryStore::new());
    store.seed_cabinet(config.ministers()).await;

    match cli.command {
        Command::Run {
            title,
            goals,
            constraints,
            value,
            budget,
            output,
            transcript,
        } => {
            run_debate(
                &config, store, title, goals, constraints, value, budget, output, transcript,
                cli.quiet,
            )
            .await
        }
        Command::Rate { brief, ratings } => rate_ministers(&config, store, brief, ratings).await,
        Command::Cabinet => {
            let ministers = store.all_ministers().await?;
            println!("{}", ConsoleFormatter::format_cabinet(&ministers));
            Ok(())
        }
        Command::Models => {
            println!("{}", ConsoleFormatter::format_models(&available_models()));
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_debate(
    config: &FileConfig,
    store: Arc<MemoryStore>,
    title: String,
    goals: String,
    constraints: String,
    values: Vec<String>,
    budget: Option<u64>,
    output: OutputFormat,
    transcript_path: Option<std::path::PathBuf>,
    quiet: bool,
) -> Result<()> {
    let api_key = std::env::var(&config.gateway.api_key_env).with_context(|| {
        format!(
            "missing API key: set the {} environment variable",
            config.gateway.api_key_env
        )
    })?;
    let mut gateway = OpenAiGateway::new(api_key);
    if let Some(base_url) = &config.gateway.base_url {
        gateway = gateway.with_base_url(base_url);
    }
    let gateway = Arc::new(gateway);

    let mut debate_config = config.debate.to_debate_config();
    if let Some(secs) = budget {
        debate_config.global_budget = Duration::from_secs(secs);
    }

    let transcript: Arc<dyn TranscriptStore> = match &transcript_path {
        Some(path) => Arc::new(JsonlTranscriptLog::open(path)?),
        None => store.clone(),
    };

    let context = BriefContext::new(goals, constraints).with_values(values);
    let brief = CreateBriefUseCase::new(store.clone())
        .execute(&title, context)
        .await?;
    info!("Opened brief {}", brief.id);

    if !quiet {
        eprintln!("Convening the cabinet on: {title}");
        eprintln!("(type to interject; 'extend' restarts the clock; 'stop' ends the debate)\n");
    }

    // Stdin lines steer the running debate
    let (control, receiver) = control_channel();
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            let sent = match line.as_str() {
                "stop" => control.stop(),
                "extend" => control.extend(),
                _ => control.interject(line),
            };
            if !sent {
                break; // the debate is over
            }
        }
    });

    let use_case = RunDebateUseCase::new(
        gateway,
        store.clone(),
        store.clone(),
        transcript,
        debate_config,
    );
    let progress: Box<dyn DebateProgress> = if quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ConsoleProgress)
    };
    let outcome = use_case
        .execute(&brief.id, receiver, progress.as_ref())
        .await?;

    let ministers = store.all_ministers().await?;
    let text = match output {
        OutputFormat::Full => ConsoleFormatter::format(&outcome, &ministers),
        OutputFormat::Synthesis => ConsoleFormatter::format_synthesis_only(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };
    println!("{text}");

    if !quiet {
        eprintln!(
            "Rate this session:  cabinet rate {} <minister>=<stars> ...",
            outcome.brief_id
        );
    }
    Ok(())
}

async fn rate_ministers(
    config: &FileConfig,
    store: Arc<MemoryStore>,
    brief: String,
    rating_args: Vec<String>,
) -> Result<()> {
    // Stores are process-scoped, so the brief being rated is registered
    // here under the id the user quotes.
    let mut record = Brief::new(BriefId::new(&brief), &brief, BriefContext::default());
    record.transition(BriefStatus::Running)?;
    record.transition(BriefStatus::Done)?;
    store.insert(record).await?;

    let mut entries = Vec::with_capacity(rating_args.len());
    for arg in &rating_args {
        let (id, stars) = parse_rating_arg(arg).map_err(anyhow::Error::msg)?;
        entries.push(RatingEntry {
            minister_id: MinisterId::new(id),
            rating: Rating::new(RatingValue::new(stars)?),
        });
    }

    let use_case = RateMinistersUseCase::new(
        store.clone(),
        store.clone(),
        store.clone(),
        config.reputation,
    );
    let results = use_case.execute(&BriefId::new(&brief), entries).await?;
    println!("{}", ConsoleFormatter::format_ratings(&results));
    Ok(())
}
