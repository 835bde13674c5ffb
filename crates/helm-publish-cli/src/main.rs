mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use helm_publish_core::ActionInputs;
use secrecy::SecretString;

#[derive(Parser)]
#[command(
    name = "helm-publish",
    about = "Package Helm charts and publish them as a chart repository on a git branch"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Package every chart, build index.yaml, and push to the deploy branch
    Publish(PublishArgs),
    /// List the chart directories that would be packaged
    Charts {
        /// Directory containing one subdirectory per chart
        #[arg(long, env = "INPUT_CHARTS-FOLDER")]
        charts_folder: Option<PathBuf>,
        /// Include dot-prefixed directories
        #[arg(long)]
        include_hidden: bool,
        /// Print a JSON array instead of one name per line
        #[arg(long)]
        json: bool,
    },
    /// Check that git and helm are available
    Doctor,
}

#[derive(Args)]
struct PublishArgs {
    /// Token with push access to the repository
    #[arg(long, env = "INPUT_ACCESS-TOKEN", hide_env_values = true)]
    access_token: Option<String>,
    /// Branch the chart repository is published to (default: master)
    #[arg(long, env = "INPUT_DEPLOY-BRANCH")]
    deploy_branch: Option<String>,
    /// Directory containing one subdirectory per chart
    #[arg(long, env = "INPUT_CHARTS-FOLDER")]
    charts_folder: Option<PathBuf>,
    /// Include dot-prefixed chart directories
    #[arg(long)]
    include_hidden: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    // arch-lint: allow(no-silent-result-drop) reason="an unset or invalid RUST_LOG falls back to info"
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    // Local runs can supply the GITHUB_* run context through .env.
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        // arch-lint: allow(no-error-swallowing) reason="a missing .env is the normal case on CI runners"
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Publish(PublishArgs {
            access_token,
            deploy_branch,
            charts_folder,
            include_hidden,
        }) => {
            let inputs = ActionInputs {
                access_token: access_token.map(SecretString::from),
                deploy_branch,
                charts_folder,
            };
            commands::publish(inputs, include_hidden).await?
        }
        Commands::Charts {
            charts_folder,
            include_hidden,
            json,
        } => commands::charts(charts_folder, include_hidden, json).await?,
        Commands::Doctor => commands::doctor().await?,
    }

    Ok(())
}
