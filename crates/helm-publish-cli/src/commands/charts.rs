use helm_publish_core::{DEFAULT_CHARTS_FOLDER, HiddenDirs, PublishSettings, discover_publishable};
use std::path::PathBuf;

/// Print the chart directories `publish` would package.
pub async fn charts(
    charts_folder: Option<PathBuf>,
    include_hidden: bool,
    json: bool,
) -> anyhow::Result<()> {
    let project_dir = PathBuf::from(".");
    let settings = PublishSettings::load(&project_dir)?.publish;
    let hidden = HiddenDirs::from_include(include_hidden || settings.include_hidden);

    let folder = match charts_folder {
        Some(folder) if !folder.as_os_str().is_empty() => folder,
        _ => PathBuf::from(DEFAULT_CHARTS_FOLDER),
    };
    let output = project_dir.join(&settings.output_dir);
    let names: Vec<String> = discover_publishable(&project_dir.join(folder), hidden, &output)?
        .into_iter()
        .map(|c| c.name)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in &names {
            println!("{name}");
        }
    }

    Ok(())
}
