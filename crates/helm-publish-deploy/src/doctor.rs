use std::fmt;
use std::path::Path;

use helm_publish_core::config::SETTINGS_FILE;

use crate::executor::ToolExecutor;
use crate::git::GitClient;
use crate::helm::HelmClient;

/// Run every check without early return.
pub async fn diagnose<G: ToolExecutor, H: ToolExecutor>(
    git: &GitClient<G>,
    helm: &HelmClient<H>,
    root: &Path,
) -> DoctorReport {
    let mut report = DoctorReport::default();

    match git.version(root).await {
        Ok(v) => report.git = CheckResult::ok(&v),
        Err(e) => report.git = CheckResult::fail(&e.to_string()),
    }

    match helm.version(root).await {
        Ok(v) => report.helm = CheckResult::ok(&v),
        Err(e) => report.helm = CheckResult::fail(&e.to_string()),
    }

    if root.join(SETTINGS_FILE).is_file() {
        report.config_file = CheckResult::ok("Found");
    } else {
        report.config_file = CheckResult::ok("Not found (using defaults)");
    }

    report
}

#[derive(Debug, Default)]
pub struct DoctorReport {
    pub git: CheckResult,
    pub helm: CheckResult,
    pub config_file: CheckResult,
}

impl DoctorReport {
    pub fn all_passed(&self) -> bool {
        self.git.passed && self.helm.passed && self.config_file.passed
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("git", &self.git),
            ("helm", &self.helm),
            (SETTINGS_FILE, &self.config_file),
        ];
        for (label, result) in rows {
            writeln!(f, "[{}] {label:<18} {}", result.icon(), result.detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct CheckResult {
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn ok(detail: &str) -> Self {
        Self {
            passed: true,
            detail: detail.to_owned(),
        }
    }

    pub fn fail(detail: &str) -> Self {
        Self {
            passed: false,
            detail: detail.to_owned(),
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.passed { "OK" } else { "NG" }
    }
}
