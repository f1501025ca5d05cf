//! Top 10 Agent - research artifact and agent inspection CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use topten::{
    agent::AgentRegistry,
    artifacts::{ArtifactQuery, ArtifactStore, ArtifactType},
    config::TopTenConfig,
    tools::ResearchTools,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "topten")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Research artifacts and agent definitions for the Top 10 Agent")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TOPTEN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage research artifacts
    Artifacts {
        #[command(subcommand)]
        command: ArtifactCommands,
    },

    /// Show the agent definitions
    Agents {
        /// Print the full definition of one agent
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the tool declarations offered to the model
    Tools,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[derive(Subcommand)]
enum ArtifactCommands {
    /// Save a new artifact
    Save {
        /// Product category
        #[arg(long)]
        category: String,

        /// Artifact type (search_results, analysis, recommendations)
        #[arg(long = "type")]
        artifact_type: String,

        /// JSON object to store
        #[arg(long)]
        data: String,
    },

    /// List artifacts, newest first
    List {
        #[arg(long)]
        category: Option<String>,

        #[arg(long = "type")]
        artifact_type: Option<String>,
    },

    /// Summarize artifacts by category and type
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("topten={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Artifacts { command } => {
            run_artifacts(ArtifactStore::from_config(&config.storage), command).await?;
        }
        Commands::Agents { name } => {
            show_agents(&config, name.as_deref())?;
        }
        Commands::Tools => {
            println!(
                "{}",
                serde_json::to_string_pretty(&ResearchTools::declarations())?
            );
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<TopTenConfig> {
    if let Some(path) = path {
        return TopTenConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    match TopTenConfig::default_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Using configuration file {}", path.display());
            TopTenConfig::from_file(&path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        _ => Ok(TopTenConfig::default()),
    }
}

async fn run_artifacts(store: ArtifactStore, command: ArtifactCommands) -> Result<()> {
    match command {
        ArtifactCommands::Save {
            category,
            artifact_type,
            data,
        } => {
            let data: serde_json::Value =
                serde_json::from_str(&data).context("--data must be valid JSON")?;
            let serde_json::Value::Object(data) = data else {
                anyhow::bail!("--data must be a JSON object");
            };

            let receipt = store
                .save(&category, ArtifactType::from(artifact_type), data)
                .await?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        ArtifactCommands::List {
            category,
            artifact_type,
        } => {
            let query = ArtifactQuery {
                category,
                artifact_type: artifact_type.map(ArtifactType::from),
            };
            let artifacts = store.load(&query).await;
            println!("{}", serde_json::to_string_pretty(&artifacts)?);
        }
        ArtifactCommands::Summary => {
            let summary = store.summarize().await;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn show_agents(config: &TopTenConfig, name: Option<&str>) -> Result<()> {
    let registry = AgentRegistry::builtin(&config.agents);

    if let Some(name) = name {
        let agent = registry
            .get(name)
            .with_context(|| format!("no agent named '{}'", name))?;
        println!("{}", serde_json::to_string_pretty(agent)?);
        return Ok(());
    }

    for agent in registry.list() {
        println!("{} ({}, {})", agent.name, agent.role, agent.model);
        println!("  {}", agent.description);
        if !agent.tools.is_empty() {
            println!("  tools: {}", agent.tools.join(", "));
        }
        if !agent.sub_agents.is_empty() {
            println!("  sub-agents: {}", agent.sub_agents.join(", "));
        }
    }

    Ok(())
}

fn show_config(config: Option<&TopTenConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
