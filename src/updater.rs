use self_update::cargo_crate_version;
use self_update::update::ReleaseUpdate;
use semver::Version;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    UpToDate,
    /// A newer release replaced the running binary; a restart picks it up.
    Installed { version: String },
}

/// Checks GitHub for a newer release and installs it. Blocking; run it off the UI thread.
pub fn update_if_available() -> Result<UpdateOutcome, String> {
    let Some(version) = check_update_available()? else {
        info!("Launcher is up to date ({})", cargo_crate_version!());
        return Ok(UpdateOutcome::UpToDate);
    };

    info!("Installing launcher update {}", version);
    build_updater()?
        .update()
        .map_err(|e| format!("Update failed: {}", e))?;
    Ok(UpdateOutcome::Installed { version })
}

fn check_update_available() -> Result<Option<String>, String> {
    let updater = build_updater()?;
    let current_version_str = cargo_crate_version!();
    let current_version = Version::parse(current_version_str).map_err(|e| {
        format!(
            "Failed to parse current version '{}': {}",
            current_version_str, e
        )
    })?;

    let releases = updater
        .get_latest_releases(current_version_str)
        .map_err(|e| format!("Update check failed: {}", e))?;

    let candidates = releases.into_iter().map(|release| release.version);
    Ok(newest_version(candidates, &current_version))
}

/// Highest parseable release tag strictly above `current`, without its `v` prefix.
fn newest_version(
    candidates: impl IntoIterator<Item = String>,
    current: &Version,
) -> Option<String> {
    candidates
        .into_iter()
        .filter_map(|tag| {
            let trimmed = tag.trim_start_matches('v').to_string();
            Version::parse(&trimmed)
                .ok()
                .filter(|v| v > current)
                .map(|v| (trimmed, v))
        })
        .max_by(|x, y| x.1.cmp(&y.1))
        .map(|(tag, _)| tag)
}

fn build_updater() -> Result<Box<dyn ReleaseUpdate>, String> {
    self_update::backends::github::Update::configure()
        .repo_owner("Kubixonon")
        .repo_name("tv-launcher-for-linux")
        .bin_name("tv-launcher")
        .show_download_progress(false)
        .show_output(false)
        .no_confirm(true)
        .current_version(cargo_crate_version!())
        .build()
        .map_err(|e| format!("Failed to configure updater: {}", e))
}
