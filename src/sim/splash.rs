//! Splash animation controller
//!
//! Owns the balls and the surface size, and walks the overlay through its
//! lifecycle. The host supplies time: it fires `TimerEvent`s after the
//! requested delays and calls `frame` once per display refresh for as long
//! as `frame` returns `LoopControl::Continue`.

use glam::DVec2;
use rand::Rng;

use super::ball::Ball;
use crate::consts::*;
use crate::renderer::{Canvas2d, draw_ball};

/// Overlay lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SplashPhase {
    /// Balls spawning and falling
    Running,
    /// Overlay hidden, waiting for its fade transition to finish
    Fading,
    /// Overlay taken out of the render tree
    Removed,
}

/// Events delivered by the host's one-shot timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimerEvent {
    /// Spawn the ball with this stagger index
    Spawn(usize),
    /// Stop the loop and hide the overlay
    Finish,
    /// Remove the overlay
    Remove,
}

/// A timer request: deliver `event` after `delay_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub delay_ms: u32,
    pub event: TimerEvent,
}

/// Whether the frame loop should reschedule itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// The element hosting the splash
pub trait Overlay {
    /// Apply the hidden visual state (starts the fade transition)
    fn hide(&mut self);
    /// Take the overlay out of the render tree
    fn remove(&mut self);
}

/// Overlay with no backing element; just remembers what was asked of it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetachedOverlay {
    pub hidden: bool,
    pub removed: bool,
}

impl Overlay for DetachedOverlay {
    fn hide(&mut self) {
        self.hidden = true;
    }

    fn remove(&mut self) {
        self.removed = true;
    }
}

/// The splash animation state
#[derive(Debug)]
pub struct SplashAnimation<R> {
    rng: R,
    /// Append-only; indices are stable for the life of the splash
    balls: Vec<Ball>,
    ball_count: usize,
    phase: SplashPhase,
    width: f64,
    height: f64,
    frames_rendered: u64,
}

impl<R: Rng> SplashAnimation<R> {
    /// Create the splash for a surface of `width` x `height`, choosing the
    /// ball count (8..=12) from `rng`
    pub fn new(mut rng: R, width: f64, height: f64) -> Self {
        let ball_count = BALL_COUNT_MIN + rng.random_range(0..BALL_COUNT_SPREAD);
        Self {
            rng,
            balls: Vec::with_capacity(ball_count),
            ball_count,
            phase: SplashPhase::Running,
            width,
            height,
            frames_rendered: 0,
        }
    }

    /// Timers to arm at start: one spawn per ball at `i * 150ms`, and the
    /// finish at 4500ms. All delays are measured from start.
    pub fn start_timers(&self) -> Vec<Timer> {
        let spawns = (0..self.ball_count).map(|i| Timer {
            delay_ms: i as u32 * SPAWN_STAGGER_MS,
            event: TimerEvent::Spawn(i),
        });
        spawns
            .chain(std::iter::once(Timer {
                delay_ms: END_DELAY_MS,
                event: TimerEvent::Finish,
            }))
            .collect()
    }

    /// Handle a fired timer. Returns a follow-up timer to arm, if any.
    pub fn on_timer<O: Overlay + ?Sized>(
        &mut self,
        event: TimerEvent,
        overlay: &mut O,
    ) -> Option<Timer> {
        match event {
            TimerEvent::Spawn(index) => {
                let ball = self.spawn_ball();
                log::debug!(
                    "Spawned ball {} at ({:.1}, {:.1}) vel={:.2}",
                    index,
                    ball.pos.x,
                    ball.pos.y,
                    ball.vel
                );
                None
            }
            TimerEvent::Finish => {
                if self.phase != SplashPhase::Running {
                    return None;
                }
                self.phase = SplashPhase::Fading;
                overlay.hide();
                log::info!(
                    "Splash finished after {} frames, fading overlay",
                    self.frames_rendered
                );
                Some(Timer {
                    delay_ms: REMOVE_DELAY_MS,
                    event: TimerEvent::Remove,
                })
            }
            TimerEvent::Remove => {
                if self.phase == SplashPhase::Fading {
                    self.phase = SplashPhase::Removed;
                    overlay.remove();
                    log::info!("Splash overlay removed");
                }
                None
            }
        }
    }

    /// Append a new ball above the top edge at a random horizontal position
    pub fn spawn_ball(&mut self) -> &Ball {
        let usable = self.width - 2.0 * SPAWN_MARGIN_X;
        let x = SPAWN_MARGIN_X + self.rng.random::<f64>() * usable;
        let y = SPAWN_TOP_Y - self.rng.random::<f64>() * SPAWN_HEIGHT_SPREAD;
        let ball = Ball::spawn(&mut self.rng, DVec2::new(x, y));
        self.balls.push(ball);
        &self.balls[self.balls.len() - 1]
    }

    /// Run one frame: clear, then advance and draw every ball spawned so far.
    ///
    /// Once the splash is no longer running nothing is drawn and the loop
    /// is told to stop.
    pub fn frame<C: Canvas2d + ?Sized>(&mut self, canvas: &mut C) -> LoopControl {
        if self.is_complete() {
            return LoopControl::Stop;
        }

        // One consistent read of the surface per frame
        let (width, height) = (self.width, self.height);
        canvas.clear(width, height);
        for ball in &mut self.balls {
            ball.advance(height);
            draw_ball(canvas, ball);
        }
        self.frames_rendered += 1;
        LoopControl::Continue
    }

    /// Surface was resized; takes effect from the next frame
    pub fn resize(&mut self, width: f64, height: f64) {
        log::debug!("Surface resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }

    pub fn phase(&self) -> SplashPhase {
        self.phase
    }

    /// True once the finish timer has fired
    pub fn is_complete(&self) -> bool {
        self.phase != SplashPhase::Running
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Number of balls this splash will spawn in total
    pub fn ball_count(&self) -> usize {
        self.ball_count
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, Recorder};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn splash(seed: u64) -> SplashAnimation<Pcg32> {
        SplashAnimation::new(Pcg32::seed_from_u64(seed), 1000.0, 800.0)
    }

    #[test]
    fn test_start_timers_stagger_from_start() {
        let anim = splash(1);
        let timers = anim.start_timers();
        assert_eq!(timers.len(), anim.ball_count() + 1);
        for (i, timer) in timers[..anim.ball_count()].iter().enumerate() {
            assert_eq!(timer.event, TimerEvent::Spawn(i));
            assert_eq!(timer.delay_ms, i as u32 * 150);
        }
        assert_eq!(
            timers.last(),
            Some(&Timer {
                delay_ms: 4500,
                event: TimerEvent::Finish
            })
        );
    }

    #[test]
    fn test_ball_count_over_many_seeds() {
        let mut seen = [false; 13];
        for seed in 0..1000 {
            let count = splash(seed).ball_count();
            assert!((8..=12).contains(&count), "count {} out of range", count);
            seen[count] = true;
        }
        assert!(seen[8..=12].iter().all(|&s| s));
    }

    #[test]
    fn test_spawn_appends_in_order() {
        let mut anim = splash(3);
        let mut overlay = DetachedOverlay::default();
        for i in 0..3 {
            assert_eq!(anim.on_timer(TimerEvent::Spawn(i), &mut overlay), None);
        }
        assert_eq!(anim.balls().len(), 3);
        assert_eq!(overlay, DetachedOverlay::default());
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut anim = splash(5);
        let mut overlay = DetachedOverlay::default();
        assert_eq!(anim.phase(), SplashPhase::Running);
        assert!(!anim.is_complete());

        // Remove before finish is ignored
        assert_eq!(anim.on_timer(TimerEvent::Remove, &mut overlay), None);
        assert_eq!(anim.phase(), SplashPhase::Running);

        let next = anim.on_timer(TimerEvent::Finish, &mut overlay);
        assert_eq!(
            next,
            Some(Timer {
                delay_ms: 500,
                event: TimerEvent::Remove
            })
        );
        assert_eq!(anim.phase(), SplashPhase::Fading);
        assert!(anim.is_complete());
        assert!(overlay.hidden);
        assert!(!overlay.removed);

        // Finish fires only once
        assert_eq!(anim.on_timer(TimerEvent::Finish, &mut overlay), None);

        assert_eq!(anim.on_timer(TimerEvent::Remove, &mut overlay), None);
        assert_eq!(anim.phase(), SplashPhase::Removed);
        assert!(overlay.removed);
    }

    #[test]
    fn test_frame_draws_every_ball() {
        let mut anim = splash(9);
        let mut overlay = DetachedOverlay::default();
        anim.on_timer(TimerEvent::Spawn(0), &mut overlay);
        anim.on_timer(TimerEvent::Spawn(1), &mut overlay);

        let mut canvas = Recorder::new();
        assert_eq!(anim.frame(&mut canvas), LoopControl::Continue);
        assert_eq!(
            canvas.commands.first(),
            Some(&DrawCommand::Clear {
                width: 1000.0,
                height: 800.0
            })
        );
        assert_eq!(canvas.balls_drawn(), 2);
        assert_eq!(anim.frames_rendered(), 1);

        // A ball spawned between frames is picked up by the next one
        anim.on_timer(TimerEvent::Spawn(2), &mut overlay);
        let mut canvas = Recorder::new();
        anim.frame(&mut canvas);
        assert_eq!(canvas.balls_drawn(), 3);
    }

    #[test]
    fn test_frame_after_finish_draws_nothing() {
        let mut anim = splash(11);
        let mut overlay = DetachedOverlay::default();
        anim.on_timer(TimerEvent::Spawn(0), &mut overlay);
        anim.on_timer(TimerEvent::Finish, &mut overlay);

        let mut canvas = Recorder::new();
        assert_eq!(anim.frame(&mut canvas), LoopControl::Stop);
        assert!(canvas.commands.is_empty());
        assert_eq!(anim.frames_rendered(), 0);
    }

    #[test]
    fn test_resize_moves_floor_on_next_frame() {
        let mut anim = splash(13);
        let mut overlay = DetachedOverlay::default();
        anim.on_timer(TimerEvent::Spawn(0), &mut overlay);

        let mut canvas = Recorder::new();
        for _ in 0..600 {
            anim.frame(&mut canvas);
        }
        assert_eq!(anim.balls()[0].pos.y, 800.0 - BALL_RADIUS);

        // Resizing alone does not move anything
        anim.resize(1000.0, 500.0);
        assert_eq!(anim.balls()[0].pos.y, 800.0 - BALL_RADIUS);

        anim.frame(&mut canvas);
        assert_eq!(anim.balls()[0].pos.y, 500.0 - BALL_RADIUS);
        assert_eq!(anim.size(), (1000.0, 500.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ball_count_in_range(seed in any::<u64>()) {
                let anim = splash(seed);
                prop_assert!((8..=12).contains(&anim.ball_count()));
            }

            #[test]
            fn spawn_positions_on_surface(
                seed in any::<u64>(),
                width in 80.0f64..4000.0,
            ) {
                let mut anim = SplashAnimation::new(Pcg32::seed_from_u64(seed), width, 800.0);
                for _ in 0..anim.ball_count() {
                    let ball = anim.spawn_ball();
                    prop_assert!(ball.pos.x >= 40.0 && ball.pos.x <= width - 40.0);
                    prop_assert!(ball.pos.y >= -150.0 && ball.pos.y <= -50.0);
                }
            }
        }
    }
}
