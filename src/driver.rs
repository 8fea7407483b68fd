//! Host-side loop plumbing
//!
//! The simulation only knows how to advance one tick. The [`Driver`] owns
//! everything about *when* that happens: the run state, the fixed tick
//! period, and the intents collected from the input layer between ticks.

use std::time::Duration;

use crate::Result;
use crate::consts::MAX_SUBSTEPS;
use crate::settings::Settings;
use crate::sim::{Bounds, Intent, TickInput, TickReport, World, tick};

/// Whether the driver advances the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Time and input are discarded until resumed
    Paused,
    /// Terminal; the host loop should exit
    Stopped,
}

/// Fixed timestep accumulator.
/// Turns variable frame times into a whole number of ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    period: Duration,
    accumulator: Duration,
    max_steps: u32,
}

impl FixedTimestep {
    /// Panics on a zero `period`, which would never drain the accumulator
    pub fn new(period: Duration, max_steps: u32) -> Self {
        assert!(!period.is_zero(), "tick period must be non-zero");
        Self {
            period,
            accumulator: Duration::ZERO,
            max_steps,
        }
    }

    /// Add frame time. Returns the number of ticks to run, at most
    /// `max_steps`; backlog beyond that is dropped.
    pub fn accumulate(&mut self, frame: Duration) -> u32 {
        let cap = self.period * self.max_steps;
        self.accumulator = (self.accumulator + frame).min(cap);

        let mut steps = 0;
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            steps += 1;
        }
        steps
    }

    /// Fraction of a tick left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / self.period.as_secs_f32()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

/// Intents gathered between ticks, coalesced so each applies once
#[derive(Debug, Clone, Default)]
pub struct IntentQueue {
    pending: TickInput,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.pending.press(intent);
    }

    /// Take this tick's input and clear the queue
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending = TickInput::default();
    }
}

/// Running totals across ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub ticks: u64,
    pub projectiles_culled: u64,
    pub obstacles_shot: u64,
    pub craft_resets: u64,
}

impl DriverStats {
    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.projectiles_culled += u64::from(report.projectiles_culled);
        self.obstacles_shot += u64::from(report.obstacles_shot);
        self.craft_resets += u64::from(report.craft_resets);
    }
}

/// Owns the world and decides when it ticks
#[derive(Debug, Clone)]
pub struct Driver {
    world: World,
    state: RunState,
    timestep: FixedTimestep,
    intents: IntentQueue,
    stats: DriverStats,
}

impl Driver {
    /// Build a world from `settings` and drive it at their tick period.
    /// Settings are validated first, since they may not have come from a file.
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::with_world(
            World::new(settings),
            Duration::from_millis(settings.tick_millis),
        ))
    }

    pub fn with_world(world: World, tick_period: Duration) -> Self {
        Self {
            world,
            state: RunState::Running,
            timestep: FixedTimestep::new(tick_period, MAX_SUBSTEPS),
            intents: IntentQueue::new(),
            stats: DriverStats::default(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    pub fn tick_period(&self) -> Duration {
        self.timestep.period()
    }

    /// Render interpolation factor for the current frame
    pub fn alpha(&self) -> f32 {
        self.timestep.alpha()
    }

    /// Queue an intent for the next tick. Ignored unless running.
    pub fn push_intent(&mut self, intent: Intent) {
        if self.state == RunState::Running {
            self.intents.push(intent);
        }
    }

    pub fn resize(&mut self, bounds: Bounds) {
        self.world.resize(bounds);
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            self.intents.clear();
            self.timestep.reset();
            log::info!("Paused at tick {}", self.world.time_ticks);
        }
    }

    pub fn resume(&mut self) {
        match self.state {
            RunState::Paused => {
                self.state = RunState::Running;
                log::info!("Resumed at tick {}", self.world.time_ticks);
            }
            RunState::Stopped => log::warn!("Cannot resume a stopped driver"),
            RunState::Running => {}
        }
    }

    pub fn stop(&mut self) {
        if self.state != RunState::Stopped {
            self.state = RunState::Stopped;
            log::info!(
                "Stopped after {} ticks ({} obstacles shot, {} craft resets)",
                self.stats.ticks,
                self.stats.obstacles_shot,
                self.stats.craft_resets
            );
        }
    }

    /// Advance exactly one tick with the queued intents.
    /// Returns `None` when not running.
    pub fn step(&mut self) -> Option<TickReport> {
        if self.state != RunState::Running {
            return None;
        }
        let input = self.intents.take();
        let report = tick(&mut self.world, &input);
        self.stats.record(&report);
        Some(report)
    }

    /// Feed elapsed frame time and run however many ticks it covers.
    /// Queued intents go to the first of those ticks only.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        if self.state != RunState::Running {
            return 0;
        }
        let steps = self.timestep.accumulate(frame);
        for _ in 0..steps {
            self.step();
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::sim::VectorEntity;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn test_settings() -> Settings {
        Settings {
            tuning: crate::Tuning {
                obstacle_count: 0,
                projectile_capacity: 4,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_timestep_one_step_exact() {
        let mut ts = FixedTimestep::new(ms(20), 8);
        assert_eq!(ts.accumulate(ms(20)), 1);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn test_timestep_accumulates_partial() {
        let mut ts = FixedTimestep::new(ms(20), 8);
        assert_eq!(ts.accumulate(ms(12)), 0);
        assert_eq!(ts.accumulate(ms(12)), 1);
        assert!((ts.alpha() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_timestep_caps_steps() {
        let mut ts = FixedTimestep::new(ms(20), 8);
        assert_eq!(ts.accumulate(Duration::from_secs(1)), 8);
        assert_eq!(ts.accumulate(Duration::ZERO), 0);
    }

    #[test]
    #[should_panic(expected = "tick period must be non-zero")]
    fn test_timestep_rejects_zero_period() {
        FixedTimestep::new(Duration::ZERO, 8);
    }

    #[test]
    fn test_driver_rejects_zero_tick_millis() {
        let settings = Settings {
            tick_millis: 0,
            ..test_settings()
        };
        match Driver::new(&settings) {
            Err(Error::InvalidSettings { field, .. }) => assert_eq!(field, "tick_millis"),
            other => panic!("expected invalid tick_millis, got {other:?}"),
        }
    }

    #[test]
    fn test_driver_rejects_empty_pool() {
        let mut settings = test_settings();
        settings.tuning.projectile_capacity = 0;
        assert!(Driver::new(&settings).is_err());
    }

    #[test]
    fn test_intent_queue_coalesces() {
        let mut q = IntentQueue::new();
        assert!(q.is_empty());
        q.push(Intent::Fire);
        q.push(Intent::Fire);
        q.push(Intent::Thrust);
        let input = q.take();
        assert!(input.fire && input.thrust);
        assert!(!input.rotate_left && !input.rotate_right);
        assert!(q.is_empty());
    }

    #[test]
    fn test_intents_apply_to_first_tick_only() {
        let mut driver = Driver::new(&test_settings()).unwrap();
        driver.push_intent(Intent::RotateRight);
        assert_eq!(driver.advance(ms(60)), 3);
        assert!((driver.world().craft.face_angle - 5.0).abs() < 1e-4);
        assert_eq!(driver.stats().ticks, 3);
    }

    #[test]
    fn test_fire_spam_uses_one_slot_per_tick() {
        let mut driver = Driver::new(&test_settings()).unwrap();
        for _ in 0..10 {
            driver.push_intent(Intent::Fire);
        }
        driver.step();
        assert_eq!(driver.world().projectiles.alive_count(), 1);
    }

    #[test]
    fn test_short_frame_runs_no_ticks() {
        let mut driver = Driver::new(&test_settings()).unwrap();
        assert_eq!(driver.advance(ms(5)), 0);
        assert_eq!(driver.world().time_ticks, 0);
        assert_eq!(driver.advance(ms(15)), 1);
        assert_eq!(driver.world().time_ticks, 1);
    }

    #[test]
    fn test_paused_driver_does_not_tick() {
        let mut driver = Driver::new(&test_settings()).unwrap();
        driver.push_intent(Intent::Thrust);
        driver.pause();
        assert_eq!(driver.state(), RunState::Paused);
        driver.push_intent(Intent::Thrust);
        assert_eq!(driver.advance(ms(100)), 0);
        assert!(driver.step().is_none());
        assert_eq!(driver.world().time_ticks, 0);

        driver.resume();
        assert_eq!(driver.advance(ms(20)), 1);
        // Intents queued before and during the pause were dropped
        assert_eq!(driver.world().craft.vel(), glam::Vec2::ZERO);
    }

    #[test]
    fn test_stopped_driver_stays_stopped() {
        let mut driver = Driver::new(&test_settings()).unwrap();
        driver.stop();
        driver.resume();
        assert_eq!(driver.state(), RunState::Stopped);
        assert_eq!(driver.advance(ms(100)), 0);
    }

    #[test]
    fn test_stats_accumulate_reports() {
        let mut driver = Driver::new(&test_settings()).unwrap();
        driver.push_intent(Intent::Fire);
        // Craft at center facing up; the shot leaves the top after 121 ticks
        for _ in 0..130 {
            driver.step();
        }
        let stats = driver.stats();
        assert_eq!(stats.ticks, 130);
        assert_eq!(stats.projectiles_culled, 1);
        assert_eq!(stats.obstacles_shot, 0);
    }
}
