//! Tennis Splash - falling tennis-ball splash screen for a single-page site
//!
//! Core modules:
//! - `sim`: Platform-free model (ball kinematics, splash lifecycle, virtual clock)
//! - `renderer`: 2D canvas drawing boundary and tennis-ball painter
//! - `page`: Scroll/UI embellishment rules (navbar, parallax, fade-in, skill bars)
//! - `platform`: Browser bindings (wasm32 only)

pub mod page;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use renderer::{Canvas2d, Recorder};
pub use sim::{Ball, SplashAnimation, SplashPhase};

/// Splash configuration constants
pub mod consts {
    /// Ball radius (pixels)
    pub const BALL_RADIUS: f64 = 20.0;
    /// Downward acceleration added to velocity every tick (pixels/tick²)
    pub const GRAVITY: f64 = 0.3;
    /// Velocity multiplier applied (with sign flip) on floor contact
    pub const BOUNCE: f64 = 0.7;
    /// Post-bounce speeds below this snap to zero
    pub const SETTLE_THRESHOLD: f64 = 0.5;

    /// Initial falling speed range [min, max)
    pub const INITIAL_VELOCITY_MIN: f64 = 2.0;
    pub const INITIAL_VELOCITY_MAX: f64 = 5.0;
    /// Rotation speed range [-max, max) in radians/tick
    pub const ROTATION_SPEED_MAX: f64 = 0.1;

    /// Ball count is BALL_COUNT_MIN + [0, BALL_COUNT_SPREAD)
    pub const BALL_COUNT_MIN: usize = 8;
    pub const BALL_COUNT_SPREAD: usize = 5;
    /// Delay between consecutive spawns (ms, measured from start)
    pub const SPAWN_STAGGER_MS: u32 = 150;
    /// Horizontal margin keeping spawned balls fully on-surface
    pub const SPAWN_MARGIN_X: f64 = 40.0;
    /// Spawn height is SPAWN_TOP_Y - [0, SPAWN_HEIGHT_SPREAD)
    pub const SPAWN_TOP_Y: f64 = -50.0;
    pub const SPAWN_HEIGHT_SPREAD: f64 = 100.0;

    /// Time from start until the overlay starts fading
    pub const END_DELAY_MS: u32 = 4500;
    /// Time from fade start until the overlay is removed
    pub const REMOVE_DELAY_MS: u32 = 500;

    /// Nominal display refresh interval (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Host document element ids
    pub const OVERLAY_ID: &str = "animation-overlay";
    pub const CANVAS_ID: &str = "tennis-canvas";
    /// Class applied to the overlay to trigger its fade transition
    pub const HIDDEN_CLASS: &str = "hidden";
}
