//! Mutable playback state for one reading session.

use std::sync::Arc;

pub const RATE_MIN: u32 = 100;
pub const RATE_MAX: u32 = 300;
pub const RATE_STEP: u32 = 20;

/// Volume is tracked in tenths so repeated steps never drift.
const VOLUME_STEPS: u8 = 10;

/// Everything the playback controller reads and mutates between sentences.
///
/// `index` always lies in `0..=sentences.len()`, the rate in
/// [`RATE_MIN`]..=[`RATE_MAX`] and the volume in `0.0..=1.0`.
#[derive(Debug, Clone)]
pub struct SessionState {
    rate: u32,
    volume_tenths: u8,
    paused: bool,
    stop_requested: bool,
    restart_requested: bool,
    sentences: Arc<[String]>,
    index: usize,
    voice: Option<String>,
}

impl SessionState {
    pub fn new(sentences: Vec<String>, rate: u32, volume: f32, voice: Option<String>) -> Self {
        Self {
            rate: rate.clamp(RATE_MIN, RATE_MAX),
            volume_tenths: volume_to_tenths(volume),
            paused: false,
            stop_requested: false,
            restart_requested: false,
            sentences: sentences.into(),
            index: 0,
            voice,
        }
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn volume(&self) -> f32 {
        f32::from(self.volume_tenths) / f32::from(VOLUME_STEPS)
    }

    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    #[cfg(test)]
    pub fn sentences(&self) -> &Arc<[String]> {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    pub fn restart_requested(&self) -> bool {
        self.restart_requested
    }

    pub fn speed_up(&mut self) -> u32 {
        self.rate = (self.rate + RATE_STEP).min(RATE_MAX);
        self.rate
    }

    pub fn slow_down(&mut self) -> u32 {
        self.rate = self.rate.saturating_sub(RATE_STEP).max(RATE_MIN);
        self.rate
    }

    pub fn volume_up(&mut self) -> f32 {
        self.volume_tenths = (self.volume_tenths + 1).min(VOLUME_STEPS);
        self.volume()
    }

    pub fn volume_down(&mut self) -> f32 {
        self.volume_tenths = self.volume_tenths.saturating_sub(1);
        self.volume()
    }

    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    /// Back to the first sentence with every flag cleared. Rate, volume, voice
    /// and the sentence list are kept.
    pub fn rewind(&mut self) {
        self.index = 0;
        self.paused = false;
        self.stop_requested = false;
        self.restart_requested = false;
    }

    pub fn current_sentence(&self) -> Option<&str> {
        self.sentences.get(self.index).map(String::as_str)
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1).min(self.sentences.len());
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.sentences.len()
    }
}

fn volume_to_tenths(volume: f32) -> u8 {
    if !volume.is_finite() {
        return VOLUME_STEPS;
    }
    (volume.clamp(0.0, 1.0) * f32::from(VOLUME_STEPS)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(count: usize) -> SessionState {
        let sentences = (1..=count).map(|n| format!("Sentence {n}.")).collect();
        SessionState::new(sentences, 180, 1.0, None)
    }

    #[test]
    fn faster_faster_slower_from_default() {
        let mut state = state_with(1);
        state.speed_up();
        state.speed_up();
        state.slow_down();
        assert_eq!(state.rate(), 200);
    }

    #[test]
    fn rate_stays_within_bounds() {
        let mut state = state_with(1);
        for _ in 0..20 {
            state.speed_up();
        }
        assert_eq!(state.rate(), RATE_MAX);
        for _ in 0..20 {
            state.slow_down();
        }
        assert_eq!(state.rate(), RATE_MIN);
    }

    #[test]
    fn volume_stays_within_bounds_without_drift() {
        let mut state = state_with(1);
        assert_eq!(state.volume_up(), 1.0);
        for _ in 0..3 {
            state.volume_down();
        }
        assert!((state.volume() - 0.7).abs() < f32::EPSILON);
        for _ in 0..15 {
            state.volume_down();
        }
        assert_eq!(state.volume(), 0.0);
        for _ in 0..10 {
            state.volume_up();
        }
        assert_eq!(state.volume(), 1.0);
    }

    #[test]
    fn initial_values_are_clamped() {
        let state = SessionState::new(vec![], 20, 7.0, None);
        assert_eq!(state.rate(), RATE_MIN);
        assert_eq!(state.volume(), 1.0);
        let state = SessionState::new(vec![], 999, -1.0, None);
        assert_eq!(state.rate(), RATE_MAX);
        assert_eq!(state.volume(), 0.0);
    }

    #[test]
    fn rewind_keeps_sentences_and_settings() {
        let mut state = SessionState::new(
            vec!["First one.".into(), "Second one.".into(), "Third one.".into()],
            180,
            0.5,
            Some("en-us".into()),
        );
        let sentences = Arc::clone(state.sentences());
        state.advance();
        state.advance();
        state.speed_up();
        state.toggle_pause();
        state.request_stop();
        state.request_restart();

        state.rewind();

        assert_eq!(state.index(), 0);
        assert!(!state.is_paused());
        assert!(!state.stop_requested());
        assert!(!state.restart_requested());
        assert!(Arc::ptr_eq(&sentences, state.sentences()));
        assert_eq!(state.rate(), 200);
        assert_eq!(state.voice(), Some("en-us"));
        assert_eq!(state.current_sentence(), Some("First one."));
    }

    #[test]
    fn index_never_passes_the_end() {
        let mut state = state_with(2);
        for _ in 0..5 {
            state.advance();
        }
        assert_eq!(state.index(), 2);
        assert!(state.is_finished());
        assert_eq!(state.current_sentence(), None);
    }
}
