//! Handing a print view to the system browser.

use std::path::Path;
use std::process::Command;

use super::PrintError;

/// Something that can present a written print view for printing.
pub trait PrintTrigger {
    fn trigger(&self, path: &Path) -> Result<(), PrintError>;
}

/// Opens files with the platform's default handler.
///
/// `open` on macOS, `cmd /C start` on Windows, `xdg-open` elsewhere.
pub struct SystemOpener;

impl SystemOpener {
    pub fn new() -> Self {
        Self
    }

    fn command(path: &Path) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl PrintTrigger for SystemOpener {
    fn trigger(&self, path: &Path) -> Result<(), PrintError> {
        let mut cmd = Self::command(path);
        let program = cmd.get_program().to_string_lossy().into_owned();

        let status = cmd.status().map_err(|source| PrintError::Launch {
            command: program.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(PrintError::OpenerFailed {
                command: program,
                status: status.to_string(),
            })
        }
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new()
    }
}
