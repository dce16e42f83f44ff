use std::process::Stdio;
use tokio::process::Command;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::error::{KeyTaskError, Result};

/// Starts a shell command without waiting for it.
pub trait Spawner {
    fn spawn(&self, command: &str) -> Result<()>;
}

/// Launches commands through the platform shell. Children are reaped on the
/// runtime so the caller never blocks.
#[derive(Clone)]
pub struct CommandLauncher {
    runtime: Handle,
}

impl CommandLauncher {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Spawner for CommandLauncher {
    fn spawn(&self, command: &str) -> Result<()> {
        // the child watcher needs the runtime's reactor
        let _guard = self.runtime.enter();
        let mut child = shell_command(command)
            .spawn()
            .map_err(|source| KeyTaskError::Launch {
                command: command.to_string(),
                source,
            })?;

        let command = command.to_string();
        self.runtime.spawn(async move {
            match child.wait().await {
                Ok(status) => debug!("'{}' exited with {}", command, status),
                Err(e) => warn!("lost track of '{}': {}", command, e),
            }
        });
        Ok(())
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").raw_arg(command);
    detach_stdio(cmd)
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    detach_stdio(cmd)
}

fn detach_stdio(mut cmd: Command) -> Command {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(false);
    cmd
}
