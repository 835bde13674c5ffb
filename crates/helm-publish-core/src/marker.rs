use std::path::Path;

use crate::error::{Error, Result};

/// Custom-domain marker for static-site hosting.
pub const DEFAULT_MARKER_FILE: &str = "CNAME";

/// Copy `root/<marker>` into `output/<marker>`, overwriting any existing copy.
///
/// Returns `Ok(false)` without touching `output` when the marker is absent.
pub fn carry_over_marker(root: &Path, output: &Path, marker: &str) -> Result<bool> {
    let from = root.join(marker);
    if !from.is_file() {
        return Ok(false);
    }

    let to = output.join(marker);
    std::fs::copy(&from, &to).map_err(|e| Error::MarkerCopy {
        from: from.clone(),
        to: to.clone(),
        source: e,
    })?;

    Ok(true)
}
