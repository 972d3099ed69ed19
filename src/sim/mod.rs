//! Splash simulation module
//!
//! Everything that decides what the splash does lives here. This module must
//! stay platform-free:
//! - Randomness only through an injected `rand::Rng`
//! - Time only through timer events and frame calls from the host
//! - Drawing only through the `Canvas2d` trait

pub mod ball;
pub mod clock;
pub mod splash;

pub use ball::Ball;
pub use clock::{ClockEvent, SplashReport, VirtualClock, run_headless};
pub use splash::{
    DetachedOverlay, LoopControl, Overlay, SplashAnimation, SplashPhase, Timer, TimerEvent,
};
