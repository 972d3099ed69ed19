//! 2D canvas rendering module
//!
//! Drawing goes through the `Canvas2d` trait so the splash can render to a
//! browser canvas or to a command recorder.

pub mod ball;
pub mod canvas;

pub use ball::draw_ball;
pub use canvas::{Canvas2d, ColorStop, DrawCommand, Paint, RadialGradient, Recorder, Stroke};
