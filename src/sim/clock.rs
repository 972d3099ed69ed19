//! Deterministic virtual clock
//!
//! Stands in for the browser's `setTimeout` and `requestAnimationFrame` so a
//! whole splash can be played back without a browser. Single-threaded like
//! the real event loop: one event at a time, timers in due order (ties in
//! arming order), frames on a fixed 60 Hz vsync grid. A timer due at the
//! same instant as a frame fires first.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::ball::Ball;
use super::splash::{
    DetachedOverlay, LoopControl, Overlay, SplashAnimation, SplashPhase, Timer, TimerEvent,
};
use crate::consts::FRAME_MS;
use crate::renderer::{Canvas2d, Recorder};

/// Something that happened on the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Timer(TimerEvent),
    Frame,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PendingTimer {
    due_ms: u64,
    seq: u64,
    event: TimerEvent,
}

/// Virtual event loop
#[derive(Debug)]
pub struct VirtualClock {
    now_ms: f64,
    timers: BinaryHeap<Reverse<PendingTimer>>,
    next_seq: u64,
    next_vsync_ms: f64,
    frame_requested: bool,
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            timers: BinaryHeap::new(),
            next_seq: 0,
            next_vsync_ms: 0.0,
            frame_requested: false,
        }
    }

    /// Arm the splash's start timers and request its first frame
    pub fn start<R: Rng>(anim: &SplashAnimation<R>) -> Self {
        let mut clock = Self::new();
        for timer in anim.start_timers() {
            clock.schedule(timer);
        }
        clock.request_frame();
        clock
    }

    /// Current time (ms since start)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Arm a one-shot timer relative to now
    pub fn schedule(&mut self, timer: Timer) {
        let due_ms = self.now_ms.floor() as u64 + u64::from(timer.delay_ms);
        self.timers.push(Reverse(PendingTimer {
            due_ms,
            seq: self.next_seq,
            event: timer.event,
        }));
        self.next_seq += 1;
    }

    /// Ask for a frame callback at the next vsync
    pub fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    /// Pop the next event due at or before `until_ms`, advancing time to it
    pub fn next_event(&mut self, until_ms: f64) -> Option<ClockEvent> {
        let timer_due = self.timers.peek().map(|Reverse(t)| t.due_ms as f64);
        let frame_due = self.frame_requested.then_some(self.next_vsync_ms);

        let take_timer = match (timer_due, frame_due) {
            (Some(t), Some(f)) => t <= f,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };

        if take_timer {
            let due = timer_due.unwrap_or(self.now_ms);
            if due > until_ms {
                return None;
            }
            let Reverse(pending) = self.timers.pop()?;
            self.now_ms = self.now_ms.max(due);
            // Vsyncs that passed without a request are skipped
            while self.next_vsync_ms < self.now_ms {
                self.next_vsync_ms += FRAME_MS;
            }
            Some(ClockEvent::Timer(pending.event))
        } else {
            let due = frame_due.unwrap_or(self.now_ms);
            if due > until_ms {
                return None;
            }
            self.now_ms = due;
            self.next_vsync_ms += FRAME_MS;
            self.frame_requested = false;
            Some(ClockEvent::Frame)
        }
    }

    /// Process one event against the splash. Returns the event and its time.
    pub fn step<R, C, O>(
        &mut self,
        anim: &mut SplashAnimation<R>,
        canvas: &mut C,
        overlay: &mut O,
        until_ms: f64,
    ) -> Option<(f64, ClockEvent)>
    where
        R: Rng,
        C: Canvas2d + ?Sized,
        O: Overlay + ?Sized,
    {
        let event = self.next_event(until_ms)?;
        match event {
            ClockEvent::Timer(timer) => {
                if let Some(next) = anim.on_timer(timer, overlay) {
                    self.schedule(next);
                }
            }
            ClockEvent::Frame => {
                if anim.frame(canvas) == LoopControl::Continue {
                    self.request_frame();
                }
            }
        }
        Some((self.now_ms, event))
    }

    /// Process every event up to `until_ms`
    pub fn run_until<R, C, O>(
        &mut self,
        anim: &mut SplashAnimation<R>,
        canvas: &mut C,
        overlay: &mut O,
        until_ms: f64,
    ) -> Vec<(f64, ClockEvent)>
    where
        R: Rng,
        C: Canvas2d + ?Sized,
        O: Overlay + ?Sized,
    {
        let mut events = Vec::new();
        while let Some(event) = self.step(anim, canvas, overlay, until_ms) {
            events.push(event);
        }
        events
    }
}

/// Summary of a headless splash run
#[derive(Debug, Clone, Serialize)]
pub struct SplashReport {
    pub seed: u64,
    pub width: f64,
    pub height: f64,
    pub ball_count: usize,
    pub frames_rendered: u64,
    pub hidden_at_ms: Option<f64>,
    pub removed_at_ms: Option<f64>,
    pub balls: Vec<Ball>,
}

/// Play a full splash on a virtual `width` x `height` surface
pub fn run_headless(seed: u64, width: f64, height: f64) -> SplashReport {
    let mut anim = SplashAnimation::new(Pcg32::seed_from_u64(seed), width, height);
    let mut clock = VirtualClock::start(&anim);
    let mut canvas = Recorder::new();
    let mut overlay = DetachedOverlay::default();
    let mut hidden_at_ms = None;
    let mut removed_at_ms = None;

    log::info!(
        "Headless splash: seed={} surface={}x{} balls={}",
        seed,
        width,
        height,
        anim.ball_count()
    );

    while let Some((at, _)) = clock.step(&mut anim, &mut canvas, &mut overlay, f64::INFINITY) {
        // Keep memory flat: only the latest frame's commands matter here
        if canvas.commands.len() > 4096 {
            canvas.commands.clear();
        }
        if overlay.hidden && hidden_at_ms.is_none() {
            hidden_at_ms = Some(at);
        }
        if overlay.removed && removed_at_ms.is_none() {
            removed_at_ms = Some(at);
        }
        if anim.phase() == SplashPhase::Removed {
            break;
        }
    }

    SplashReport {
        seed,
        width,
        height,
        ball_count: anim.ball_count(),
        frames_rendered: anim.frames_rendered(),
        hidden_at_ms,
        removed_at_ms,
        balls: anim.balls().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn splash(seed: u64) -> SplashAnimation<Pcg32> {
        SplashAnimation::new(Pcg32::seed_from_u64(seed), 1000.0, 800.0)
    }

    #[test]
    fn test_timer_before_frame_on_tie() {
        let mut clock = VirtualClock::new();
        clock.request_frame();
        clock.schedule(Timer {
            delay_ms: 0,
            event: TimerEvent::Spawn(0),
        });
        assert_eq!(
            clock.next_event(0.0),
            Some(ClockEvent::Timer(TimerEvent::Spawn(0)))
        );
        assert_eq!(clock.next_event(0.0), Some(ClockEvent::Frame));
        assert_eq!(clock.next_event(0.0), None);
    }

    #[test]
    fn test_frames_only_when_requested() {
        let mut clock = VirtualClock::new();
        assert_eq!(clock.next_event(1000.0), None);

        clock.request_frame();
        assert_eq!(clock.next_event(1000.0), Some(ClockEvent::Frame));
        assert_eq!(clock.next_event(1000.0), None);

        clock.request_frame();
        assert_eq!(clock.next_event(1000.0), Some(ClockEvent::Frame));
        assert!((clock.now_ms() - FRAME_MS).abs() < 1e-9);
    }

    #[test]
    fn test_spawns_fire_in_index_order_between_frames() {
        let mut anim = splash(21);
        let mut clock = VirtualClock::start(&anim);
        let mut canvas = Recorder::new();
        let mut overlay = DetachedOverlay::default();

        let events = clock.run_until(&mut anim, &mut canvas, &mut overlay, 2000.0);
        let spawns: Vec<(f64, usize)> = events
            .iter()
            .filter_map(|&(at, e)| match e {
                ClockEvent::Timer(TimerEvent::Spawn(i)) => Some((at, i)),
                _ => None,
            })
            .collect();

        assert_eq!(spawns.len(), anim.ball_count());
        for (n, &(at, i)) in spawns.iter().enumerate() {
            assert_eq!(i, n);
            assert_eq!(at, (n as u32 * SPAWN_STAGGER_MS) as f64);
        }
        // Several frames run between consecutive spawns
        let frames = events
            .iter()
            .filter(|(at, e)| *e == ClockEvent::Frame && *at > 0.0 && *at < 150.0)
            .count();
        assert!(frames >= 8);
        assert_eq!(anim.balls().len(), anim.ball_count());
    }

    #[test]
    fn test_end_to_end_lifecycle() {
        let mut anim = splash(1234);
        let mut clock = VirtualClock::start(&anim);
        let mut canvas = Recorder::new();
        let mut overlay = DetachedOverlay::default();

        // Right up to (not including) the finish time
        clock.run_until(&mut anim, &mut canvas, &mut overlay, 4499.0);
        assert_eq!(anim.phase(), SplashPhase::Running);
        assert!(!overlay.hidden);
        assert!(anim.balls().iter().all(|b| b.pos.y + b.radius <= 800.0 + 1e-9));

        // Exactly at 4500ms the overlay starts fading
        let events = clock.run_until(&mut anim, &mut canvas, &mut overlay, 4500.0);
        assert!(events.contains(&(4500.0, ClockEvent::Timer(TimerEvent::Finish))));
        assert_eq!(anim.phase(), SplashPhase::Fading);
        assert!(overlay.hidden);
        assert!(!overlay.removed);

        let drawn = canvas.commands.len();
        let frames = anim.frames_rendered();

        clock.run_until(&mut anim, &mut canvas, &mut overlay, 4999.0);
        assert_eq!(anim.phase(), SplashPhase::Fading);
        assert!(!overlay.removed);

        let events = clock.run_until(&mut anim, &mut canvas, &mut overlay, 5000.0);
        assert!(events.contains(&(5000.0, ClockEvent::Timer(TimerEvent::Remove))));
        assert_eq!(anim.phase(), SplashPhase::Removed);
        assert!(overlay.removed);

        // Nothing drawn after completion; the loop stopped after one idle frame
        assert_eq!(canvas.commands.len(), drawn);
        assert_eq!(anim.frames_rendered(), frames);
        let rest = clock.run_until(&mut anim, &mut canvas, &mut overlay, f64::INFINITY);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_resize_between_frames() {
        let mut anim = splash(77);
        let mut clock = VirtualClock::start(&anim);
        let mut canvas = Recorder::new();
        let mut overlay = DetachedOverlay::default();

        clock.run_until(&mut anim, &mut canvas, &mut overlay, 4000.0);
        assert!(anim.balls().iter().all(|b| b.pos.y + b.radius <= 800.0 + 1e-9));

        anim.resize(1000.0, 400.0);
        // Not applied until a frame runs
        assert!(anim.balls().iter().any(|b| b.pos.y + b.radius > 400.0));

        loop {
            match clock.step(&mut anim, &mut canvas, &mut overlay, 4500.0) {
                Some((_, ClockEvent::Frame)) => break,
                Some(_) => continue,
                None => panic!("no frame before finish"),
            }
        }
        assert!(anim.balls().iter().all(|b| b.pos.y + b.radius <= 400.0 + 1e-9));
    }

    #[test]
    fn test_run_headless_report() {
        let report = run_headless(99, 1000.0, 800.0);
        assert_eq!(report.hidden_at_ms, Some(4500.0));
        assert_eq!(report.removed_at_ms, Some(5000.0));
        assert_eq!(report.balls.len(), report.ball_count);
        assert!(report.frames_rendered >= 260);

        let json = serde_json::to_string(&report).expect("report serializes");
        assert!(json.contains("\"removed_at_ms\":5000.0"));
    }
}
