use helm_publish_deploy::{GitClient, HelmClient, diagnose};
use std::path::Path;

pub async fn doctor() -> anyhow::Result<()> {
    let report = diagnose(&GitClient::new(), &HelmClient::new(), Path::new(".")).await;

    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed — see above for details");
    }

    Ok(())
}
