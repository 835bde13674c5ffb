use helm_publish_core::{ActionConfig, ActionInputs, GithubContext, PublishSettings};
use helm_publish_deploy::{PublishOutcome, Publisher};
use std::path::PathBuf;

/// Run the full publish pipeline from the repository root.
pub async fn publish(inputs: ActionInputs, include_hidden: bool) -> anyhow::Result<()> {
    // Token check comes first: a missing token ends the run before anything else is read.
    let config = ActionConfig::from_inputs(inputs)?;
    let context = GithubContext::load();

    let project_dir = PathBuf::from(".");
    let mut settings = PublishSettings::load(&project_dir)?.publish;
    if include_hidden {
        settings.include_hidden = true;
    }

    let publisher = Publisher::new(&project_dir);
    match publisher.run(&config, &context, &settings).await? {
        PublishOutcome::Skipped { git_ref } => {
            println!("Triggered by branch used to deploy: {git_ref}.");
            println!("Nothing to deploy.");
        }
        PublishOutcome::Published(report) => {
            println!();
            println!(
                "Deployed {} chart(s) to {} ({})",
                report.charts.len(),
                report.repository,
                report.branch,
            );
            for chart in &report.charts {
                println!("  - {chart}");
            }
            if report.marker_copied {
                println!("  + {}", settings.marker_file);
            }
            println!("Enjoy! ✨");
        }
    }

    Ok(())
}
