use iced::alignment::Horizontal;
use iced::keyboard::{self, key::Named, Key};
use iced::{
    widget::{Column, Container, Row, Text},
    Color, Element, Event, Length, Subscription, Task,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::assets::default_platforms;
use crate::clock::Clock;
use crate::desktop_apps::scan_desktop_apps;
use crate::dispatcher::ActivationDispatcher;
use crate::gamepad::gamepad_subscription;
use crate::input::Action;
use crate::launcher::{command_available, is_power_action, split_command, SystemLauncher};
use crate::media_library::load_movies;
use crate::model::{LauncherAction, LauncherItem, SectionId};
use crate::navigation::{Activation, Navigator, Outcome};
use crate::section::{ListSection, Window};
use crate::storage::{load_config, AppConfig};
use crate::sys_utils::restart_process;
use crate::ui_theme::*;
use crate::updater::{update_if_available, UpdateOutcome};

/// The presenter: owns the navigator and draws it, forwards input, runs launches.
pub struct TvLauncher {
    navigator: Navigator,
    dispatcher: ActivationDispatcher<SystemLauncher>,
    clock: Clock,
    clock_text: String,
    status_message: Option<String>,
    video_folder: PathBuf,
    apps_loaded: bool,
    movies_loaded: bool,
    /// A power action waiting for a second Enter.
    pending_confirmation: Option<Activation>,
    /// Feeds still outstanding from an F5 rescan.
    rescan_feeds: usize,
    rescan_notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    AppsLoaded(Vec<LauncherItem>),
    MoviesLoaded(Vec<LauncherItem>),
    Input(Action),
    Tick,
    Rescan,
    UpdateFinished(Result<UpdateOutcome, String>),
    RestartApp,
}

impl TvLauncher {
    pub fn new() -> (Self, Task<Message>) {
        let config = load_config().unwrap_or_else(|err| {
            warn!("Failed to load config, using defaults: {:#}", err);
            AppConfig::default()
        });

        let mut launcher = Self::with_config(&config);
        launcher.status_message = media_player_warning(&config.media_player);

        let mut tasks = vec![launcher.scan_feeds()];

        if config.auto_update {
            tasks.push(Task::perform(
                async {
                    match tokio::task::spawn_blocking(update_if_available).await {
                        Ok(result) => result,
                        Err(e) => Err(format!("Update task failed: {}", e)),
                    }
                },
                Message::UpdateFinished,
            ));
        }

        (launcher, Task::batch(tasks))
    }

    /// Re-runs both background scans; results arrive as `AppsLoaded`/`MoviesLoaded`.
    fn scan_feeds(&self) -> Task<Message> {
        let video_folder = self.video_folder.clone();
        Task::batch([
            Task::perform(
                async {
                    tokio::task::spawn_blocking(|| {
                        scan_desktop_apps()
                            .into_iter()
                            .map(LauncherItem::from)
                            .collect()
                    })
                    .await
                    .unwrap_or_default()
                },
                Message::AppsLoaded,
            ),
            Task::perform(
                async move {
                    tokio::task::spawn_blocking(move || load_movies(&video_folder))
                        .await
                        .unwrap_or_default()
                },
                Message::MoviesLoaded,
            ),
        ])
    }

    fn with_config(config: &AppConfig) -> Self {
        let platforms = config.platforms.clone().unwrap_or_else(default_platforms);
        let navigator = Navigator::new(
            ListSection::unwindowed(SectionId::Platforms, platforms),
            ListSection::new(SectionId::Apps, Vec::new(), Window::Fixed(config.visible_apps)),
            ListSection::new(
                SectionId::Movies,
                Vec::new(),
                Window::Fixed(config.visible_movies),
            ),
        );
        let clock = Clock::new(&config.time_format, &config.timezone);

        Self {
            navigator,
            dispatcher: ActivationDispatcher::new(SystemLauncher::from_config(config)),
            clock_text: clock.now(),
            clock,
            status_message: None,
            video_folder: config.video_folder.clone(),
            apps_loaded: false,
            movies_loaded: false,
            pending_confirmation: None,
            rescan_feeds: 0,
            rescan_notice: None,
        }
    }

    /// Applies settings that can change without a restart. Window sizes cannot.
    fn apply_config(&mut self, config: &AppConfig) {
        self.dispatcher = ActivationDispatcher::new(SystemLauncher::from_config(config));
        self.clock = Clock::new(&config.time_format, &config.timezone);
        self.clock_text = self.clock.now();
        self.video_folder = config.video_folder.clone();
    }

    fn rescan(&mut self, config: anyhow::Result<AppConfig>) -> Task<Message> {
        self.rescan_notice = match config {
            Ok(config) => {
                self.apply_config(&config);
                media_player_warning(&config.media_player)
            }
            Err(err) => {
                warn!("Failed to reload config, keeping current settings: {:#}", err);
                Some(format!("Failed to reload config: {:#}", err))
            }
        };

        info!("Rescanning applications and videos");
        self.status_message = Some("Rescanning media...".to_string());
        self.rescan_feeds = 2;
        self.scan_feeds()
    }

    fn feed_finished(&mut self) {
        if self.rescan_feeds == 0 {
            return;
        }
        self.rescan_feeds -= 1;
        if self.rescan_feeds == 0 {
            self.status_message = Some(
                self.rescan_notice
                    .take()
                    .unwrap_or_else(|| "Media library rescanned!".to_string()),
            );
        }
    }

    pub fn title(&self) -> String {
        String::from("TV Launcher")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::AppsLoaded(apps) => {
                info!("Loaded {} applications", apps.len());
                self.apps_loaded = true;
                self.navigator.set_items(SectionId::Apps, apps);
                self.feed_finished();
                Task::none()
            }
            Message::MoviesLoaded(movies) => {
                info!("Loaded {} multimedia entries", movies.len());
                self.movies_loaded = true;
                self.navigator.set_items(SectionId::Movies, movies);
                self.feed_finished();
                Task::none()
            }
            Message::Input(action) => self.handle_input(action),
            Message::Rescan => self.rescan(load_config()),
            Message::Tick => {
                self.clock_text = self.clock.now();
                Task::none()
            }
            Message::UpdateFinished(Ok(UpdateOutcome::UpToDate)) => Task::none(),
            Message::UpdateFinished(Ok(UpdateOutcome::Installed { version })) => {
                self.status_message = Some(format!("Updated to {}. Restarting...", version));
                Task::perform(
                    tokio::time::sleep(Duration::from_secs(RESTART_DELAY_SECS)),
                    |_| Message::RestartApp,
                )
            }
            Message::UpdateFinished(Err(err)) => {
                warn!("Self-update failed: {}", err);
                self.status_message = Some(err);
                Task::none()
            }
            Message::RestartApp => match std::env::current_exe() {
                Ok(exe) => restart_process(exe),
                Err(e) => {
                    self.status_message = Some(format!("Failed to restart: {}", e));
                    Task::none()
                }
            },
        }
    }

    fn handle_input(&mut self, action: Action) -> Task<Message> {
        let (navigator, outcome) = std::mem::take(&mut self.navigator).handle(action);
        self.navigator = navigator;

        let pending = self.pending_confirmation.take();

        match outcome {
            Outcome::Activate(activation) => {
                // Launches are spawned detached; the navigator is not touched here.
                if let Some(activation) = self.confirm(activation, pending) {
                    self.status_message = self.dispatcher.dispatch(&activation);
                }
                Task::none()
            }
            Outcome::Exit => {
                info!("Exiting launcher");
                iced::exit()
            }
            Outcome::Moved | Outcome::Unchanged => {
                if pending.is_some() {
                    self.status_message = None;
                }
                Task::none()
            }
        }
    }

    /// Power actions run only on a second Enter on the same item.
    fn confirm(
        &mut self,
        activation: Activation,
        pending: Option<Activation>,
    ) -> Option<Activation> {
        if !requires_confirmation(&activation.item) || pending.as_ref() == Some(&activation) {
            return Some(activation);
        }
        self.status_message = Some(format!(
            "Press Enter again to confirm: {}",
            activation.item.name
        ));
        self.pending_confirmation = Some(activation);
        None
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keyboard = iced::event::listen_with(|event, status, _window| {
            if let iced::event::Status::Captured = status {
                return None;
            }

            match event {
                Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match key.as_ref() {
                    Key::Named(Named::F5) => Some(Message::Rescan),
                    key => Action::from_key(key).map(Message::Input),
                },
                _ => None,
            }
        });

        let gamepad = gamepad_subscription().map(Message::Input);
        let clock = iced::time::every(Duration::from_secs(CLOCK_TICK_SECS)).map(|_| Message::Tick);

        Subscription::batch(vec![keyboard, gamepad, clock])
    }

    pub fn view(&self) -> Element<'_, Message> {
        let sections = Column::new()
            .push(self.render_platforms())
            .push(self.render_section(SectionId::Apps, self.apps_loaded, "Loading apps..."))
            .push(self.render_section(
                SectionId::Movies,
                self.movies_loaded,
                "Scanning videos...",
            ))
            .spacing(SECTION_SPACING);

        let column = Column::new()
            .push(Container::new(sections).height(Length::Fill))
            .push(self.render_footer());

        Container::new(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(OUTER_PADDING)
            .style(|_theme| iced::widget::container::Style {
                background: Some(COLOR_BACKGROUND.into()),
                text_color: Some(COLOR_TEXT),
                ..Default::default()
            })
            .into()
    }

    fn render_platforms(&self) -> Element<'_, Message> {
        let section = self.navigator.section(SectionId::Platforms);
        let mut row = Row::new().spacing(ITEM_SPACING * 2.0).width(Length::Fill);
        for (index, item) in section.items().iter().enumerate() {
            let selected = self.navigator.is_selected(SectionId::Platforms, index);
            row = row.push(render_tile(item, selected, TEXT_SIZE_PLATFORM, Length::Fill));
        }
        row.into()
    }

    fn render_section(
        &self,
        id: SectionId,
        loaded: bool,
        loading_message: &'static str,
    ) -> Element<'_, Message> {
        let section = self.navigator.section(id);
        let is_active = self.navigator.active_section_id() == id;

        let mut header = Row::new().spacing(ITEM_SPACING * 2.0).push(
            Text::new(id.title())
                .size(TEXT_SIZE_HEADER)
                .color(if is_active { COLOR_ACCENT } else { COLOR_TEXT }),
        );
        if section.len() > section.window_size() {
            let first = section.offset() + 1;
            let last = section.offset() + section.visible_items().len();
            header = header.push(
                Text::new(format!("{}-{} of {}", first, last, section.len()))
                    .size(TEXT_SIZE_TILE)
                    .color(COLOR_TEXT_MUTED),
            );
        }

        let body: Element<'_, Message> = if section.is_empty() {
            let message = if loaded { "Nothing here." } else { loading_message };
            Text::new(message).color(COLOR_TEXT_MUTED).into()
        } else {
            // One row per section: Left/Right walk it, Up/Down change sections.
            let mut row = Row::new().spacing(ITEM_SPACING);
            for (col, item) in section.visible_items().iter().enumerate() {
                let selected = self.navigator.is_selected(id, section.offset() + col);
                let width = Length::Fixed(TILE_WIDTH);
                row = row.push(render_tile(item, selected, TEXT_SIZE_TILE, width));
            }
            row.into()
        };

        Column::new()
            .push(header)
            .push(body)
            .spacing(ITEM_SPACING)
            .into()
    }

    fn render_footer(&self) -> Element<'_, Message> {
        let mut footer = Row::new()
            .spacing(ITEM_SPACING * 2.0)
            .push(Text::new(&self.clock_text).size(TEXT_SIZE_FOOTER));

        if let Some(status) = &self.status_message {
            footer = footer.push(
                Container::new(Text::new(status).color(COLOR_STATUS_TEXT))
                    .padding(8)
                    .style(|_theme| iced::widget::container::Style {
                        background: Some(COLOR_STATUS_BACKGROUND.into()),
                        ..Default::default()
                    }),
            );
        }

        footer.into()
    }
}

fn requires_confirmation(item: &LauncherItem) -> bool {
    matches!(&item.action, LauncherAction::SystemAction { name } if is_power_action(name))
}

fn media_player_warning(command: &str) -> Option<String> {
    if command_available(command) {
        return None;
    }
    let program = split_command(command)
        .ok()
        .and_then(|parts| parts.into_iter().next())
        .unwrap_or_else(|| command.to_string());
    warn!("Media player {:?} not found", program);
    Some(format!(
        "Media player not found: {}. File playback may not work.",
        program
    ))
}

fn render_tile<'a>(
    item: &'a LauncherItem,
    selected: bool,
    size: f32,
    width: Length,
) -> Element<'a, Message> {
    let label = Text::new(item.name.as_str())
        .size(size)
        .width(Length::Fill)
        .align_x(Horizontal::Center)
        .color(if selected { COLOR_ACCENT } else { Color::WHITE });

    Container::new(label)
        .width(width)
        .padding(TILE_PADDING)
        .style(move |_theme| iced::widget::container::Style {
            background: Some(
                if selected {
                    COLOR_TILE_SELECTED
                } else {
                    COLOR_TILE
                }
                .into(),
            ),
            border: iced::Border {
                color: if selected { COLOR_ACCENT } else { COLOR_TILE },
                width: if selected { 2.0 } else { 0.0 },
                radius: 4.0.into(),
            },
            ..Default::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher() -> TvLauncher {
        TvLauncher::with_config(&AppConfig::default())
    }

    fn apps(count: usize) -> Vec<LauncherItem> {
        (0..count)
            .map(|i| LauncherItem::application(format!("App {i}"), "true", None))
            .collect()
    }

    #[test]
    fn test_starts_on_default_platforms() {
        let launcher = launcher();
        let platforms = launcher.navigator.section(SectionId::Platforms);
        assert_eq!(platforms.len(), 10);
        assert!(launcher.navigator.is_selected(SectionId::Platforms, 0));
        assert!(!launcher.apps_loaded);
    }

    #[test]
    fn test_loaded_apps_use_configured_window() {
        let mut launcher = TvLauncher::with_config(&AppConfig {
            visible_apps: 4,
            ..AppConfig::default()
        });
        let _ = launcher.update(Message::AppsLoaded(apps(10)));

        let section = launcher.navigator.section(SectionId::Apps);
        assert!(launcher.apps_loaded);
        assert_eq!(section.len(), 10);
        assert_eq!(section.visible_items().len(), 4);
    }

    #[test]
    fn test_placeholder_activation_shows_status() {
        let mut launcher = launcher();
        let _ = launcher.update(Message::MoviesLoaded(vec![LauncherItem::placeholder(
            "No videos found",
        )]));
        let _ = launcher.update(Message::Input(Action::Down));
        let _ = launcher.update(Message::Input(Action::Down));
        let _ = launcher.update(Message::Input(Action::Enter));

        assert_eq!(launcher.status_message.as_deref(), Some("No videos found"));
        assert_eq!(launcher.navigator.active_section_id(), SectionId::Movies);
        assert_eq!(launcher.navigator.cursor(), Some(0));
    }

    #[test]
    fn test_rescan_keeps_selection_in_range() {
        let mut launcher = launcher();
        let _ = launcher.update(Message::AppsLoaded(apps(12)));
        let _ = launcher.update(Message::Input(Action::Down));
        for _ in 0..11 {
            let _ = launcher.update(Message::Input(Action::Right));
        }
        assert_eq!(launcher.navigator.selected_index(), Some(11));

        let _ = launcher.update(Message::AppsLoaded(apps(2)));
        assert_eq!(launcher.navigator.selected_index(), Some(1));
    }

    fn press(launcher: &mut TvLauncher, action: Action, times: usize) {
        for _ in 0..times {
            let _ = launcher.update(Message::Input(action));
        }
    }

    #[test]
    fn test_power_action_waits_for_confirmation() {
        let mut launcher = launcher();
        press(&mut launcher, Action::Right, 9);
        assert_eq!(
            launcher.navigator.section(SectionId::Platforms).items()[9].name,
            "Shutdown"
        );

        press(&mut launcher, Action::Enter, 1);
        assert_eq!(
            launcher.status_message.as_deref(),
            Some("Press Enter again to confirm: Shutdown")
        );
        assert!(launcher.pending_confirmation.is_some());

        press(&mut launcher, Action::Left, 1);
        assert!(launcher.pending_confirmation.is_none());
        assert_eq!(launcher.status_message, None);
    }

    #[test]
    fn test_second_enter_on_same_item_confirms() {
        let mut launcher = launcher();
        let sleep = Activation {
            section: SectionId::Platforms,
            index: 7,
            item: LauncherItem {
                name: "Sleep".into(),
                action: LauncherAction::SystemAction {
                    name: "suspend".into(),
                },
            },
        };
        let restart = Activation {
            index: 8,
            item: LauncherItem {
                name: "Restart".into(),
                action: LauncherAction::SystemAction {
                    name: "reboot".into(),
                },
            },
            ..sleep.clone()
        };

        assert_eq!(launcher.confirm(sleep.clone(), None), None);
        let pending = launcher.pending_confirmation.take();
        assert_eq!(launcher.confirm(restart, pending), None);
        let pending = launcher.pending_confirmation.take();
        assert_eq!(launcher.confirm(sleep.clone(), pending.clone()), None);
        assert_eq!(
            launcher.confirm(sleep.clone(), launcher.pending_confirmation.clone()),
            Some(sleep)
        );
    }

    #[test]
    fn test_ordinary_items_skip_confirmation() {
        let mut launcher = launcher();
        let netflix = Activation {
            section: SectionId::Platforms,
            index: 0,
            item: LauncherItem::url("NETFLIX", "https://www.netflix.com"),
        };
        assert_eq!(launcher.confirm(netflix.clone(), None), Some(netflix));
        assert!(launcher.pending_confirmation.is_none());
    }

    #[test]
    fn test_rescan_applies_config_and_refreshes_sections() {
        let videos = tempfile::tempdir().unwrap();
        let mut launcher = launcher();
        let _ = launcher.update(Message::AppsLoaded(apps(12)));
        press(&mut launcher, Action::Down, 1);
        press(&mut launcher, Action::Right, 11);

        let _ = launcher.rescan(Ok(AppConfig {
            video_folder: videos.path().to_path_buf(),
            media_player: "sh".to_string(),
            ..AppConfig::default()
        }));
        assert_eq!(launcher.video_folder, videos.path());
        assert_eq!(launcher.status_message.as_deref(), Some("Rescanning media..."));

        let _ = launcher.update(Message::AppsLoaded(apps(3)));
        assert_eq!(launcher.navigator.selected_index(), Some(2));
        assert_eq!(launcher.status_message.as_deref(), Some("Rescanning media..."));

        let _ = launcher.update(Message::MoviesLoaded(vec![LauncherItem::placeholder(
            "No videos found",
        )]));
        assert_eq!(
            launcher.status_message.as_deref(),
            Some("Media library rescanned!")
        );

        let _ = launcher.update(Message::AppsLoaded(apps(3)));
        assert_eq!(
            launcher.status_message.as_deref(),
            Some("Media library rescanned!")
        );
    }

    #[test]
    fn test_rescan_with_broken_config_keeps_settings() {
        let mut launcher = launcher();
        let folder = launcher.video_folder.clone();

        let _ = launcher.rescan(Err(anyhow::anyhow!("bad json")));
        let _ = launcher.update(Message::AppsLoaded(apps(1)));
        let _ = launcher.update(Message::MoviesLoaded(Vec::new()));

        assert_eq!(launcher.video_folder, folder);
        assert_eq!(
            launcher.status_message.as_deref(),
            Some("Failed to reload config: bad json")
        );
    }

    #[test]
    fn test_media_player_warning() {
        assert_eq!(media_player_warning("sh -c true"), None);
        assert_eq!(
            media_player_warning("tv-launcher-no-such-player --fullscreen").as_deref(),
            Some("Media player not found: tv-launcher-no-such-player. File playback may not work.")
        );
    }
}
