use std::env;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::dispatcher::Launcher;
use crate::storage::AppConfig;

pub const MEDIA_PLAYER_ACTION: &str = "media-player";

/// System actions handed to `systemctl`.
const POWER_ACTIONS: [&str; 3] = ["suspend", "reboot", "poweroff"];

pub fn is_power_action(name: &str) -> bool {
    POWER_ACTIONS.contains(&name)
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("No command specified to launch.")]
    EmptyCommand,
    #[error("Unbalanced quotes in command: {command}")]
    MalformedCommand { command: String },
    #[error("{program} not found")]
    NotFound { program: String },
    #[error("Failed to launch `{command}`: {source}")]
    LaunchFailed {
        command: String,
        source: std::io::Error,
    },
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("Could not launch application: {name}")]
    AllStrategiesFailed { name: String },
}

/// Spawns detached processes for every launcher effect.
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    browser: String,
    media_player: String,
}

impl SystemLauncher {
    pub fn new(browser: impl Into<String>, media_player: impl Into<String>) -> Self {
        Self {
            browser: browser.into(),
            media_player: media_player.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.browser.clone(), config.media_player.clone())
    }
}

impl Launcher for SystemLauncher {
    fn open_url(&self, url: &str) -> Result<(), LaunchError> {
        spawn_with_args(&self.browser, [url]).map(|_| ())
    }

    fn run_system_action(&self, name: &str) -> Result<(), LaunchError> {
        let spawned = match name {
            MEDIA_PLAYER_ACTION => spawn_with_args::<&str>(&self.media_player, []),
            power if is_power_action(power) => spawn_with_args("systemctl", [power]),
            other => spawn_with_args::<&str>(other, []),
        };
        spawned.map(|_| ())
    }

    fn play_file(&self, path: &Path) -> Result<(), LaunchError> {
        spawn_with_args(&self.media_player, [path.as_os_str()]).map(|_| ())
    }

    fn launch_application(
        &self,
        name: &str,
        exec: &str,
        desktop_file: Option<&Path>,
    ) -> Result<(), LaunchError> {
        let desktop_id = desktop_file.and_then(|file| file.file_stem());
        if let Some(id) = desktop_id {
            match spawn_with_args("gtk-launch", [id]) {
                Ok(_) => return Ok(()),
                Err(err) => warn!("gtk-launch failed for {}: {}", name, err),
            }
        }

        match spawn_with_args::<&str>(exec, []) {
            Ok(_) => return Ok(()),
            Err(err) => warn!("Direct exec failed for {}: {}", name, err),
        }

        if let Some(file) = desktop_file {
            if spawn_with_args("xdg-open", [file.as_os_str()]).is_ok() {
                return Ok(());
            }
        }

        Err(LaunchError::AllStrategiesFailed {
            name: name.to_string(),
        })
    }
}

/// Splits a command line into words, honouring shell-style quoting.
pub fn split_command(command: &str) -> Result<Vec<String>, LaunchError> {
    let parts = shlex::split(command).ok_or_else(|| LaunchError::MalformedCommand {
        command: command.to_string(),
    })?;
    if parts.is_empty() {
        return Err(LaunchError::EmptyCommand);
    }
    Ok(parts)
}

/// Whether the program a command line starts with can be found.
pub fn command_available(command: &str) -> bool {
    let Some(program) = split_command(command)
        .ok()
        .and_then(|parts| parts.into_iter().next())
    else {
        return false;
    };

    if program.contains('/') {
        return Path::new(&program).is_file();
    }
    if let Some(path_var) = env::var_os("PATH") {
        for path in env::split_paths(&path_var) {
            if path.join(&program).is_file() {
                return true;
            }
        }
    }
    false
}

/// Splits `command` into words, appends `extra` and spawns it detached.
pub fn spawn_with_args<S: AsRef<OsStr>>(
    command: &str,
    extra: impl IntoIterator<Item = S>,
) -> Result<u32, LaunchError> {
    info!("Launching: {}", command);

    let parts = split_command(command)?;
    let Some((cmd, args)) = parts.split_first() else {
        return Err(LaunchError::EmptyCommand);
    };

    match Command::new(cmd)
        .args(args)
        .args(extra)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => {
            let pid = child.id();
            info!("Successfully launched {} (PID: {})", cmd, pid);
            Ok(pid)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            error!("Program not found: {}", cmd);
            Err(LaunchError::NotFound {
                program: cmd.to_string(),
            })
        }
        Err(e) => {
            error!("Failed to launch {}: {}", cmd, e);
            Err(LaunchError::LaunchFailed {
                command: cmd.to_string(),
                source: e,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_is_rejected() {
        assert!(matches!(
            spawn_with_args::<&str>("   ", []),
            Err(LaunchError::EmptyCommand)
        ));
    }

    #[test]
    fn test_missing_program_reports_not_found() {
        let err = spawn_with_args::<&str>("tv-launcher-no-such-program --flag", []).unwrap_err();
        assert_eq!(err.to_string(), "tv-launcher-no-such-program not found");
    }

    #[test]
    fn test_split_command_honours_quotes() {
        assert_eq!(
            split_command("\"/opt/My App/run\" --flag 'two words'").unwrap(),
            vec!["/opt/My App/run", "--flag", "two words"]
        );
        assert_eq!(
            split_command("vlc --fullscreen").unwrap(),
            vec!["vlc", "--fullscreen"]
        );
        assert!(matches!(
            split_command("\"unterminated"),
            Err(LaunchError::MalformedCommand { .. })
        ));
    }

    #[test]
    fn test_application_path_with_space_is_launched() {
        let Some(true_bin) = ["/bin/true", "/usr/bin/true"]
            .into_iter()
            .map(Path::new)
            .find(|path| path.is_file())
        else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("My App");
        std::fs::create_dir(&app_dir).unwrap();
        let program = app_dir.join("run");
        std::os::unix::fs::symlink(true_bin, &program).unwrap();

        let launcher = SystemLauncher::new("xdg-open", "vlc --fullscreen");
        let exec = format!("\"{}\" --start", program.display());
        assert!(launcher.launch_application("My App", &exec, None).is_ok());
    }

    #[test]
    fn test_command_available() {
        assert!(command_available("sh -c true"));
        assert!(!command_available("tv-launcher-no-such-program --fullscreen"));
        assert!(!command_available("/nonexistent/tv-launcher/player"));
        assert!(!command_available(""));
    }

    #[test]
    fn test_power_actions() {
        assert!(is_power_action("poweroff"));
        assert!(is_power_action("suspend"));
        assert!(!is_power_action("plasma-discover"));
        assert!(!is_power_action(MEDIA_PLAYER_ACTION));
    }

    #[test]
    fn test_spawns_real_program() {
        assert!(spawn_with_args("true", ["ignored"]).is_ok());
    }

    #[test]
    fn test_application_falls_through_every_strategy() {
        let launcher = SystemLauncher::new("xdg-open", "vlc --fullscreen");
        let err = launcher
            .launch_application("Ghost", "tv-launcher-no-such-program", None)
            .unwrap_err();
        assert_eq!(err.to_string(), "Could not launch application: Ghost");
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        let err = LaunchError::FileNotFound {
            path: PathBuf::from("/videos/missing.mkv"),
        };
        assert_eq!(err.to_string(), "File not found: /videos/missing.mkv");
    }
}
