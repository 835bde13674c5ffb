//! Chart directory discovery.
//!
//! Every immediate subdirectory of the charts folder is one packageable
//! chart. Entries come back in directory-listing order; nothing is sorted.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Policy for dot-prefixed directories such as `.cache` or `.github`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HiddenDirs {
    #[default]
    Exclude,
    Include,
}

impl HiddenDirs {
    pub fn from_include(include: bool) -> Self {
        if include { Self::Include } else { Self::Exclude }
    }
}

/// One discovered chart directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDir {
    /// Directory name under the charts folder
    pub name: String,
    /// Path to the directory (charts folder joined with `name`)
    pub path: PathBuf,
}

/// List the chart directories directly under `charts_dir`.
///
/// Files and symlinks are skipped. Hidden directories are skipped unless
/// `hidden` is [`HiddenDirs::Include`].
pub fn discover_charts(charts_dir: &Path, hidden: HiddenDirs) -> Result<Vec<ChartDir>> {
    let read_err = |e: std::io::Error| Error::ChartsDirRead {
        path: charts_dir.to_path_buf(),
        source: e,
    };

    let mut charts = Vec::new();
    for entry in std::fs::read_dir(charts_dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if !entry.file_type().map_err(read_err)?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if hidden == HiddenDirs::Exclude && is_hidden(&name) {
            tracing::debug!(name = %name, "skipping hidden directory");
            continue;
        }

        charts.push(ChartDir {
            name,
            path: entry.path(),
        });
    }

    Ok(charts)
}

/// [`discover_charts`], minus the directory that resolves to `output_dir`.
///
/// The output checkout is created before discovery and can sit inside the
/// charts folder; it is never a chart.
pub fn discover_publishable(
    charts_dir: &Path,
    hidden: HiddenDirs,
    output_dir: &Path,
) -> Result<Vec<ChartDir>> {
    let abs_err = |path: &Path, e: std::io::Error| Error::ChartsDirRead {
        path: path.to_path_buf(),
        source: e,
    };
    let output = std::path::absolute(output_dir).map_err(|e| abs_err(output_dir, e))?;

    let mut charts = Vec::new();
    for chart in discover_charts(charts_dir, hidden)? {
        let path = std::path::absolute(&chart.path).map_err(|e| abs_err(&chart.path, e))?;
        if path == output {
            tracing::debug!(name = %chart.name, "skipping output checkout");
            continue;
        }
        charts.push(chart);
    }

    Ok(charts)
}

/// A leading dot followed by anything other than another dot.
pub fn is_hidden(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('.') && matches!(chars.next(), Some(c) if c != '.')
}
