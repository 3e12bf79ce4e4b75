use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::Context;

/// Shows a finished result file to the operator.
pub trait ReportViewer {
    fn open(&self, path: &Path) -> anyhow::Result<()>;
}

/// Hands the file to the desktop's default application.
pub struct SystemViewer;

impl SystemViewer {
    fn program() -> &'static str {
        #[cfg(target_os = "macos")]
        {
            "open"
        }
        #[cfg(not(target_os = "macos"))]
        {
            "xdg-open"
        }
    }
}

impl ReportViewer for SystemViewer {
    fn open(&self, path: &Path) -> anyhow::Result<()> {
        let program = Self::program();
        Command::new(program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to run '{program}' for {}", path.display()))?;
        Ok(())
    }
}
