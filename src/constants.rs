//! Global constants shared by the display controller and its render primitives.

use std::time::Duration;

/// The total width of the OLED panel in pixels.
pub const DISPLAY_WIDTH: u32 = 128;
/// The total height of the OLED panel in pixels.
pub const DISPLAY_HEIGHT: u32 = 64;

/// Default I2C address used before discovery has run.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;
/// Primary vendor-default address for SSD1306-class panels.
pub const OLED_ADDRESS_PRIMARY: u8 = 0x3C;
/// Secondary vendor-default address (panels strapped with SA0 high).
pub const OLED_ADDRESS_SECONDARY: u8 = 0x3D;

/// Bus clock requested for every discovery attempt.
pub const BUS_CLOCK_HZ: u32 = 400_000;
/// Settle time after the initial bus bring-up.
pub const STARTUP_SETTLE: Duration = Duration::from_millis(100);
/// Settle time after each rewire. Probing earlier raises the
/// false-negative rate on real hardware.
pub const REWIRE_SETTLE: Duration = Duration::from_millis(50);

/// Normal phase of the burn-in mitigation cycle.
pub const INVERSION_INTERVAL: Duration = Duration::from_secs(60);
/// Inverted phase; kept short so the inverted image never dwells.
pub const INVERSION_DURATION: Duration = Duration::from_secs(10);

/// Cadence of the full clear/redraw/flush content refresh.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// How long the device title stays in the header.
pub const TITLE_DWELL: Duration = Duration::from_secs(10);
/// How long the resolved network address stays in the header.
pub const ADDRESS_DWELL: Duration = Duration::from_secs(5);

// Header geometry. The rect pair is a battery-style placeholder glyph;
// there is no battery data source wired to it.
pub const BATTERY_GLYPH_X: i32 = 114;
pub const BATTERY_GLYPH_Y: i32 = 0;
pub const BATTERY_GLYPH_WIDTH: u32 = 14;
pub const BATTERY_GLYPH_HEIGHT: u32 = 7;
pub const BATTERY_NUB_X: i32 = 113;
pub const BATTERY_NUB_Y: i32 = 2;
pub const BATTERY_NUB_WIDTH: u32 = 1;
pub const BATTERY_NUB_HEIGHT: u32 = 3;

/// Center of the at-a-glance activity dot (sits inside the battery glyph).
pub const INDICATOR_CENTER_X: i32 = 124;
pub const INDICATOR_CENTER_Y: i32 = 3;
/// Radius of the activity dot.
pub const INDICATOR_RADIUS: u32 = 3;

/// Y cursor for the bean-temperature block.
pub const BT_BLOCK_Y: i32 = 16;
/// Y cursor for the environment-temperature block.
pub const ET_BLOCK_Y: i32 = 43;
/// Vertical offset of the rate-of-rise line below its block's cursor.
pub const RATE_LINE_OFFSET: i32 = 14;

/// Fixed per-character advance of the large temperature font (FONT_10X20).
pub const LARGE_CHAR_WIDTH: i32 = 10;

/// Radius growth per splash frame while the rings expand.
pub const SPLASH_GROW_STEP: i32 = 2;
/// Radius shrink per splash frame while the rings collapse.
pub const SPLASH_SHRINK_STEP: i32 = 3;
/// Pause between splash frames.
pub const SPLASH_FRAME_DELAY: Duration = Duration::from_millis(1);
/// Hold time at the end of each splash phase.
pub const SPLASH_HOLD: Duration = Duration::from_secs(1);
