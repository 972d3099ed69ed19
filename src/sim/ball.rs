//! Falling tennis ball entity
//!
//! Kinematics are per tick, not per second: the host calls `advance` once
//! per displayed frame.

use glam::DVec2;
use rand::Rng;
use serde::Serialize;

use crate::consts::*;

/// A single falling/bouncing ball
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ball {
    /// Centre position; `x` never changes after creation
    pub pos: DVec2,
    /// Vertical velocity (positive = down, pixels/tick)
    pub vel: f64,
    pub radius: f64,
    /// Current rotation (radians)
    pub rotation: f64,
    /// Fixed spin (radians/tick)
    pub rotation_speed: f64,
}

impl Ball {
    /// Create a ball with explicit initial velocity and spin
    pub fn new(pos: DVec2, vel: f64, rotation_speed: f64) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
            rotation: 0.0,
            rotation_speed,
        }
    }

    /// Create a ball at `pos`, drawing velocity in [2, 5) and spin in
    /// [-0.1, 0.1) from `rng`
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, pos: DVec2) -> Self {
        let vel = INITIAL_VELOCITY_MIN
            + rng.random::<f64>() * (INITIAL_VELOCITY_MAX - INITIAL_VELOCITY_MIN);
        let rotation_speed = (rng.random::<f64>() - 0.5) * 2.0 * ROTATION_SPEED_MAX;
        Self::new(pos, vel, rotation_speed)
    }

    /// Advance one tick against a floor at `floor_y`.
    ///
    /// Returns true if the ball touched the floor this tick.
    pub fn advance(&mut self, floor_y: f64) -> bool {
        self.vel += GRAVITY;
        self.pos.y += self.vel;
        self.rotation += self.rotation_speed;

        if self.pos.y + self.radius > floor_y {
            self.pos.y = floor_y - self.radius;
            self.vel = -self.vel * BOUNCE;

            // Settle once the rebound is too weak to see
            if self.vel.abs() < SETTLE_THRESHOLD {
                self.vel = 0.0;
            }
            return true;
        }
        false
    }

    /// Resting on the floor with no velocity
    pub fn is_settled(&self, floor_y: f64) -> bool {
        self.vel == 0.0 && self.pos.y + self.radius >= floor_y
    }
}
