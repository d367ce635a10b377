use tracing_subscriber::EnvFilter;

mod assets;
mod clock;
mod desktop_apps;
mod dispatcher;
mod gamepad;
mod input;
mod launcher;
mod media_library;
mod model;
mod navigation;
mod section;
mod storage;
mod sys_utils;
mod ui;
mod ui_theme;
mod updater;

use ui::TvLauncher;

#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> iced::Result {
    let mut env_filter = EnvFilter::from_default_env();
    if let Ok(directive) = "tv_launcher=info".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    iced::application(TvLauncher::new, TvLauncher::update, TvLauncher::view)
        .title(|launcher: &TvLauncher| launcher.title())
        .subscription(TvLauncher::subscription)
        .window(iced::window::Settings {
            decorations: false,
            fullscreen: true,
            ..Default::default()
        })
        .run()
}
