use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Platforms,
    Apps,
    Movies,
}

impl SectionId {
    pub const ALL: [SectionId; 3] = [SectionId::Platforms, SectionId::Apps, SectionId::Movies];

    pub fn index(self) -> usize {
        match self {
            SectionId::Platforms => 0,
            SectionId::Apps => 1,
            SectionId::Movies => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionId::Platforms => "Platforms",
            SectionId::Apps => "Applications",
            SectionId::Movies => "Multimedia",
        }
    }
}

/// What happens when an item is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LauncherAction {
    Url {
        value: String,
    },
    SystemAction {
        name: String,
    },
    FilePath {
        path: PathBuf,
    },
    Application {
        exec: String,
        desktop_file: Option<PathBuf>,
    },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherItem {
    pub name: String,
    pub action: LauncherAction,
}

impl LauncherItem {
    #[cfg(test)]
    pub fn url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: LauncherAction::Url { value: url.into() },
        }
    }

    #[cfg(test)]
    pub fn system_action(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: LauncherAction::SystemAction {
                name: action.into(),
            },
        }
    }

    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            action: LauncherAction::FilePath { path: path.into() },
        }
    }

    pub fn application(
        name: impl Into<String>,
        exec: impl Into<String>,
        desktop_file: Option<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            action: LauncherAction::Application {
                exec: exec.into(),
                desktop_file,
            },
        }
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: LauncherAction::Empty,
        }
    }
}
