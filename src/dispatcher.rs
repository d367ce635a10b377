use std::path::Path;
use tracing::{debug, info, warn};

use crate::launcher::LaunchError;
use crate::model::{LauncherAction, LauncherItem, SectionId};
use crate::navigation::Activation;

/// External effects an activated item can trigger.
///
/// Implementations must return promptly: long-running work is spawned and
/// left running on its own.
pub trait Launcher {
    fn open_url(&self, url: &str) -> Result<(), LaunchError>;
    fn run_system_action(&self, name: &str) -> Result<(), LaunchError>;
    fn play_file(&self, path: &Path) -> Result<(), LaunchError>;
    fn launch_application(
        &self,
        name: &str,
        exec: &str,
        desktop_file: Option<&Path>,
    ) -> Result<(), LaunchError>;
}

/// Maps an activated item onto exactly one [`Launcher`] call.
///
/// Failures come back as text for the status bar; nothing here touches the
/// navigation state.
pub struct ActivationDispatcher<L> {
    launcher: L,
}

impl<L: Launcher> ActivationDispatcher<L> {
    pub fn new(launcher: L) -> Self {
        Self { launcher }
    }

    /// Returns a user-facing notice, if there is anything to tell.
    pub fn dispatch(&self, activation: &Activation) -> Option<String> {
        debug!(index = activation.index, "Dispatching activation");
        self.dispatch_item(activation.section, &activation.item)
    }

    pub fn dispatch_item(&self, section: SectionId, item: &LauncherItem) -> Option<String> {
        info!(?section, name = %item.name, "Activating item");

        let result = match &item.action {
            LauncherAction::Url { value } => self.launcher.open_url(value),
            LauncherAction::SystemAction { name } => self.launcher.run_system_action(name),
            LauncherAction::FilePath { path } => {
                if !path.exists() {
                    Err(LaunchError::FileNotFound {
                        path: path.clone(),
                    })
                } else {
                    self.launcher.play_file(path)
                }
            }
            LauncherAction::Application { exec, desktop_file } => {
                self.launcher
                    .launch_application(&item.name, exec, desktop_file.as_deref())
            }
            LauncherAction::Empty => return Some(item.name.clone()),
        };

        match result {
            Ok(()) => None,
            Err(err) => {
                warn!(name = %item.name, "Activation failed: {}", err);
                Some(err.to_string())
            }
        }
    }
}
