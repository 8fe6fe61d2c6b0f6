// src/simulation/animator.rs
//! Timer-driven cursor advance for an open simulator view

use super::state::{PlaybackState, SimulationState};
use crate::synthesis::Rhythm;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

/// State shared between the view and its timer task
pub type SharedSimulation = Arc<Mutex<SimulationState>>;

/// Repeating task that ticks the cursor at a fixed period.
/// Aborted on `stop` and on drop.
pub struct Animator {
    handle: Option<JoinHandle<()>>,
    period: Duration,
}

impl Animator {
    /// Spawn the timer on the current tokio runtime
    pub fn start(state: SharedSimulation) -> Self {
        let period = Duration::from_millis(state.lock().playback_settings().tick_period_ms);
        let handle = tokio::spawn(run_timer(state, period));
        debug!(period_ms = period.as_millis() as u64, "animation timer started");
        Self {
            handle: Some(handle),
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("animation timer stopped");
        }
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_timer(state: SharedSimulation, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let cursor = {
            let mut guard = state.lock();
            guard.tick();
            guard.cursor_percent()
        };
        trace!(cursor, "timer tick");
    }
}

/// A simulator view: shared state plus the timer it owns while playing
pub struct SimulatorView {
    state: SharedSimulation,
    animator: Option<Animator>,
}

impl SimulatorView {
    pub fn new(state: SimulationState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            animator: None,
        }
    }

    /// Handle for renderers reading the current buffer and cursor
    pub fn state(&self) -> SharedSimulation {
        Arc::clone(&self.state)
    }

    pub fn is_animating(&self) -> bool {
        self.animator.as_ref().map_or(false, Animator::is_running)
    }

    /// Start playback and the timer. Must be called inside a tokio runtime.
    pub fn play(&mut self) {
        self.state.lock().play();
        if !self.is_animating() {
            self.animator = Some(Animator::start(self.state()));
        }
    }

    /// Freeze the cursor and clear the timer
    pub fn pause(&mut self) {
        self.state.lock().pause();
        self.animator = None;
    }

    /// Clear the timer and return the cursor to 0
    pub fn reset(&mut self) {
        self.animator = None;
        self.state.lock().reset();
    }

    pub fn select_rhythm(&self, rhythm: Rhythm) {
        self.state.lock().select_rhythm(rhythm);
    }

    pub fn select_rhythm_id(&self, id: &str) {
        self.state.lock().select_rhythm_id(id);
    }

    pub fn set_rate(&self, rate_bpm: i32) -> i32 {
        self.state.lock().set_rate(rate_bpm)
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.state.lock().playback_state()
    }

    pub fn cursor_percent(&self) -> f64 {
        self.state.lock().cursor_percent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulatorSettings;

    fn view() -> SimulatorView {
        let mut settings = SimulatorSettings::default();
        settings.synthesis.seed = Some(9);
        SimulatorView::new(SimulationState::new(settings))
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_advances_cursor_while_playing() {
        let mut view = view();
        view.play();
        assert!(view.is_animating());
        let period = view.animator.as_ref().map(Animator::period);
        assert_eq!(period, Some(Duration::from_millis(20)));

        tokio::time::sleep(Duration::from_millis(105)).await;
        let cursor = view.cursor_percent();
        // Five 20 ms ticks of 0.2 %
        assert!((cursor - 1.0).abs() < 1e-9, "cursor {}", cursor);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_clears_timer() {
        let mut view = view();
        view.play();
        tokio::time::sleep(Duration::from_millis(45)).await;
        view.pause();
        assert!(!view.is_animating());

        let frozen = view.cursor_percent();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(view.cursor_percent(), frozen);
        assert_eq!(view.playback_state(), PlaybackState::Paused);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_returns_to_idle() {
        let mut view = view();
        view.play();
        tokio::time::sleep(Duration::from_millis(65)).await;
        view.reset();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(view.cursor_percent(), 0.0);
        assert_eq!(view.playback_state(), PlaybackState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_twice_keeps_one_timer() {
        let mut view = view();
        view.play();
        view.play();
        tokio::time::sleep(Duration::from_millis(105)).await;
        assert!((view.cursor_percent() - 1.0).abs() < 1e-9);
    }
}
