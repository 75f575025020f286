/// Running scripts in a shell
///
/// Detects which shell the user is running and hands the script's command
/// to it with the terminal attached.

use crate::error::{Result, ScriptsError};
use std::env;
use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

/// Supported shells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Sh,
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl Shell {
    /// Get the shell name as a string
    pub fn name(&self) -> &str {
        match self {
            Shell::Sh => "sh",
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
            Shell::PowerShell => "powershell",
        }
    }

    /// Flag that makes the shell run a command string
    pub fn command_flag(&self) -> &str {
        match self {
            Shell::PowerShell => "-Command",
            _ => "-c",
        }
    }

    /// Figure out the shell from a program path like `/usr/bin/zsh`
    pub fn from_program(program: &str) -> Option<Shell> {
        let shell_name = Path::new(program)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match shell_name.as_str() {
            "sh" | "dash" => Some(Shell::Sh),
            "bash" => Some(Shell::Bash),
            "zsh" => Some(Shell::Zsh),
            "fish" => Some(Shell::Fish),
            "pwsh" | "powershell" => Some(Shell::PowerShell),
            _ => None,
        }
    }
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Program plus the shell family it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellProgram {
    pub program: String,
    pub shell: Shell,
}

impl ShellProgram {
    /// Detect the current shell
    ///
    /// `$SHELL` first, then PowerShell, then plain `sh`.
    pub fn detect() -> Self {
        if let Ok(program) = env::var("SHELL") {
            if let Some(shell) = Shell::from_program(&program) {
                return Self { program, shell };
            }
        }

        if env::var("PSModulePath").is_ok() {
            return Self {
                program: "pwsh".to_string(),
                shell: Shell::PowerShell,
            };
        }

        Self::fallback()
    }

    /// An explicit program; unknown shells are assumed to take `-c`
    pub fn from_override(program: &str) -> Self {
        Self {
            program: program.to_string(),
            shell: Shell::from_program(program).unwrap_or(Shell::Sh),
        }
    }

    fn fallback() -> Self {
        if cfg!(windows) {
            Self {
                program: "powershell".to_string(),
                shell: Shell::PowerShell,
            }
        } else {
            Self {
                program: "/bin/sh".to_string(),
                shell: Shell::Sh,
            }
        }
    }
}

/// Runs a command for the user. The caller never looks at the outcome.
pub trait CommandExecutor {
    fn execute(&self, label: &str, command: &str, cwd: Option<&Path>) -> Result<()>;
}

/// Runs scripts in the user's shell, attached to the current terminal
pub struct TerminalExecutor {
    shell: ShellProgram,
}

impl TerminalExecutor {
    pub fn new(shell: ShellProgram) -> Self {
        Self { shell }
    }

    /// Use the configured shell if there is one, otherwise detect it
    pub fn from_settings(shell_override: Option<&str>) -> Self {
        let shell = match shell_override {
            Some(program) => ShellProgram::from_override(program),
            None => ShellProgram::detect(),
        };
        Self::new(shell)
    }

    pub fn shell(&self) -> &ShellProgram {
        &self.shell
    }

    /// The process that would be started for `command`
    pub fn build_command(&self, command: &str, cwd: Option<&Path>) -> Command {
        let mut process = Command::new(&self.shell.program);
        process.arg(self.shell.shell.command_flag()).arg(command);
        if let Some(dir) = cwd.filter(|d| d.is_dir()) {
            process.current_dir(dir);
        }
        process
    }
}

impl CommandExecutor for TerminalExecutor {
    fn execute(&self, label: &str, command: &str, cwd: Option<&Path>) -> Result<()> {
        eprintln!("> {}", label);
        info!(label, command, shell = %self.shell.shell, "running script");

        let status = self
            .build_command(command, cwd)
            .status()
            .map_err(|source| ScriptsError::Execution {
                label: label.to_string(),
                source,
            })?;

        // The exit status belongs to the user's session, not to us
        if !status.success() {
            warn!(label, code = ?status.code(), "script exited with failure");
        }

        Ok(())
    }
}
