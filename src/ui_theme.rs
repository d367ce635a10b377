use iced::Color;

// Dimensions
pub const TILE_WIDTH: f32 = 200.0;
pub const TILE_PADDING: u16 = 12;
pub const ITEM_SPACING: f32 = 10.0;
pub const SECTION_SPACING: f32 = 40.0;
pub const OUTER_PADDING: u16 = 40;

// Text sizes
pub const TEXT_SIZE_TILE: f32 = 16.0;
pub const TEXT_SIZE_PLATFORM: f32 = 20.0;
pub const TEXT_SIZE_HEADER: f32 = 22.0;
pub const TEXT_SIZE_FOOTER: f32 = 16.0;

// --- Design System Primitives ---
pub const COLOR_GRAPHITE: Color = Color::from_rgb(0.455, 0.455, 0.455); // #747474
pub const COLOR_STEEL: Color = Color::from_rgb(0.388, 0.388, 0.388); // #636363
pub const COLOR_CHARCOAL: Color = Color::from_rgb(0.2, 0.2, 0.2); // #333333
pub const COLOR_EMBER: Color = Color::from_rgb(1.0, 0.333, 0.0); // #FF5500
pub const COLOR_SOFT_WHITE: Color = Color::from_rgb(0.94, 0.96, 0.97); // #F0F4F8

// --- Semantic Mappings ---
pub const COLOR_BACKGROUND: Color = COLOR_GRAPHITE;
pub const COLOR_TILE: Color = COLOR_STEEL;
pub const COLOR_TILE_SELECTED: Color = COLOR_CHARCOAL;
pub const COLOR_ACCENT: Color = COLOR_EMBER;
pub const COLOR_TEXT: Color = COLOR_SOFT_WHITE;
pub const COLOR_TEXT_MUTED: Color = Color::from_rgb(0.80, 0.82, 0.85);
pub const COLOR_STATUS_TEXT: Color = Color::from_rgb(0.9, 0.8, 0.4);
pub const COLOR_STATUS_BACKGROUND: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.35);

// Timing Constants (in seconds)
pub const CLOCK_TICK_SECS: u64 = 1;
pub const RESTART_DELAY_SECS: u64 = 2;
