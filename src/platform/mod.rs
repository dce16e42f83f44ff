//! OS facilities that are best-effort: process priority and autostart.

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use self::windows::{autostart, set_high_priority};

#[cfg(not(windows))]
pub use self::fallback::{autostart, set_high_priority};

/// Name of the autostart entry.
pub const AUTOSTART_NAME: &str = "KeyTask";

/// Per-user run-on-login registry key.
pub const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

/// Value stored for the autostart entry: the quoted executable path.
pub fn autostart_command(exe: &std::path::Path) -> String {
    format!("\"{}\"", exe.display())
}

#[cfg(not(windows))]
mod fallback {
    use crate::error::{KeyTaskError, Result};

    pub fn set_high_priority() -> Result<()> {
        Err(KeyTaskError::Unsupported("process priority"))
    }

    pub mod autostart {
        use crate::error::{KeyTaskError, Result};

        pub fn is_enabled() -> bool {
            false
        }

        pub fn set_enabled(_enable: bool) -> Result<()> {
            Err(KeyTaskError::Unsupported("autostart"))
        }
    }

}
