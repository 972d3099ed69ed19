//! Canvas drawing boundary

use glam::DVec2;

/// A colour stop on a gradient (offset in 0..=1, CSS colour)
pub type ColorStop = (f32, &'static str);

/// Radial gradient between two circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub inner_center: DVec2,
    pub inner_radius: f64,
    pub outer_center: DVec2,
    pub outer_radius: f64,
    pub stops: &'static [ColorStop],
}

/// Fill style
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Any CSS colour string
    Solid(&'static str),
    Radial(RadialGradient),
}

/// Line style for strokes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
}

/// The subset of a 2D canvas context the splash draws with.
///
/// Coordinates are in the current local frame; `save`/`restore` bracket
/// transform changes.
pub trait Canvas2d {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: DVec2);
    fn rotate(&mut self, angle: f64);
    /// Clear the whole surface
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint);
    /// Stroke an arc from `start` to `end` radians (clockwise)
    fn stroke_arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64, stroke: &Stroke);
    fn fill_ellipse(&mut self, center: DVec2, radii: DVec2, color: &'static str);
}

/// A recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(DVec2),
    Rotate(f64),
    Clear {
        width: f64,
        height: f64,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        paint: Paint,
    },
    StrokeArc {
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
        stroke: Stroke,
    },
    FillEllipse {
        center: DVec2,
        radii: DVec2,
        color: &'static str,
    },
}

/// Canvas that records every call instead of drawing
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ball bodies drawn (one filled circle per ball)
    pub fn balls_drawn(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }

    /// Net save/restore depth; 0 when every save was restored
    pub fn save_depth(&self) -> i64 {
        self.commands.iter().fold(0, |depth, c| match c {
            DrawCommand::Save => depth + 1,
            DrawCommand::Restore => depth - 1,
            _ => depth,
        })
    }
}

impl Canvas2d for Recorder {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: DVec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, angle: f64) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn stroke_arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeArc {
            center,
            radius,
            start,
            end,
            stroke: *stroke,
        });
    }

    fn fill_ellipse(&mut self, center: DVec2, radii: DVec2, color: &'static str) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            radii,
            color,
        });
    }
}
