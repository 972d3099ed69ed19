//! Tennis ball painter

use std::f64::consts::PI;

use glam::DVec2;

use super::canvas::{Canvas2d, ColorStop, Paint, RadialGradient, Stroke};
use crate::sim::Ball;

/// Felt gradient: bright highlight -> body -> dark rim
const FELT_STOPS: &[ColorStop] = &[(0.0, "#d4ff00"), (0.7, "#a8cc00"), (1.0, "#6a8000")];
/// Highlight offset up-left of centre, and its radius
const HIGHLIGHT_OFFSET: f64 = -5.0;
const HIGHLIGHT_RADIUS: f64 = 5.0;

const SEAM: Stroke = Stroke {
    color: "rgba(255, 255, 255, 0.8)",
    width: 2.0,
};
/// Seam centres sit this fraction of the radius left/right of centre
const SEAM_OFFSET: f64 = 0.3;
/// Seam arc radius as a fraction of the ball radius
const SEAM_RADIUS: f64 = 0.8;

const SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.2)";

/// Draw `ball` at its position and rotation. Leaves the canvas state as it
/// found it.
pub fn draw_ball<C: Canvas2d + ?Sized>(canvas: &mut C, ball: &Ball) {
    let r = ball.radius;

    canvas.save();
    canvas.translate(ball.pos);
    canvas.rotate(ball.rotation);

    let felt = Paint::Radial(RadialGradient {
        inner_center: DVec2::splat(HIGHLIGHT_OFFSET),
        inner_radius: HIGHLIGHT_RADIUS,
        outer_center: DVec2::ZERO,
        outer_radius: r,
        stops: FELT_STOPS,
    });
    canvas.fill_circle(DVec2::ZERO, r, &felt);

    // Seams
    canvas.stroke_arc(
        DVec2::new(-r * SEAM_OFFSET, 0.0),
        r * SEAM_RADIUS,
        -PI * 0.4,
        PI * 0.4,
        &SEAM,
    );
    canvas.stroke_arc(
        DVec2::new(r * SEAM_OFFSET, 0.0),
        r * SEAM_RADIUS,
        PI * 0.6,
        PI * 1.4,
        &SEAM,
    );

    // Drop shadow
    canvas.fill_ellipse(
        DVec2::new(0.0, r * 0.6),
        DVec2::new(r * 0.8, r * 0.3),
        SHADOW_COLOR,
    );

    canvas.restore();
}
