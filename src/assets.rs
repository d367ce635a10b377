use rust_embed::RustEmbed;
use tracing::error;

use crate::model::LauncherItem;

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Asset;

/// The streaming platforms shipped with the launcher.
pub fn default_platforms() -> Vec<LauncherItem> {
    let Some(file) = Asset::get("platforms.json") else {
        error!("platforms.json is missing from embedded assets");
        return Vec::new();
    };

    serde_json::from_slice(&file.data).unwrap_or_else(|err| {
        error!("Failed to parse embedded platforms.json: {}", err);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::{is_power_action, MEDIA_PLAYER_ACTION};
    use crate::model::LauncherAction;

    #[test]
    fn test_default_platforms_start_with_netflix() {
        let platforms = default_platforms();
        assert_eq!(platforms.len(), 10);
        assert_eq!(
            platforms[0],
            LauncherItem::url("NETFLIX", "https://www.netflix.com")
        );
    }

    #[test]
    fn test_default_platforms_include_system_actions() {
        let platforms = default_platforms();
        let actions: Vec<_> = platforms
            .iter()
            .filter_map(|item| match &item.action {
                LauncherAction::SystemAction { name } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            actions,
            vec![
                "plasma-discover",
                MEDIA_PLAYER_ACTION,
                "suspend",
                "reboot",
                "poweroff"
            ]
        );
        assert!(actions[2..].iter().all(|name| is_power_action(name)));
    }
}
