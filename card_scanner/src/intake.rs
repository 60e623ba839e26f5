//! Debouncing of recognized text before it reaches the lookup pipeline.

use std::time::{Duration, Instant};

/// Window in which the same text is not processed twice
pub const DEFAULT_INTAKE_COOLDOWN: Duration = Duration::from_secs(3);

/// Single-slot debounce for recognized card names.
///
/// Only the most recently accepted text is remembered, so scanning a different
/// card in between lifts the suppression for the first one.
#[derive(Debug)]
pub struct IntakeGate {
    cooldown: Duration,
    /// Last accepted text and when it was accepted; `None` means never
    last: Option<(String, Instant)>,
}

impl Default for IntakeGate {
    fn default() -> Self {
        Self::new(DEFAULT_INTAKE_COOLDOWN)
    }
}

impl IntakeGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last: None,
        }
    }

    /// Decide whether `text` observed at `now` should be processed.
    ///
    /// Rejects a repeat of the last accepted text inside the cooldown window.
    /// The remembered text and time are only updated when accepting.
    pub fn admit(&mut self, text: &str, now: Instant) -> bool {
        if let Some((last_text, last_time)) = &self.last {
            if last_text == text && now.saturating_duration_since(*last_time) < self.cooldown {
                log::debug!("Suppressing repeated scan of '{}'", text);
                return false;
            }
        }

        self.last = Some((text.to_string(), now));
        true
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// The last accepted text, if any
    pub fn last_text(&self) -> Option<&str> {
        self.last.as_ref().map(|(text, _)| text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: Duration = Duration::from_millis(100);

    #[test]
    fn test_first_text_is_admitted() {
        let mut gate = IntakeGate::default();
        assert!(gate.admit("Lightning Bolt", Instant::now()));
        assert_eq!(gate.last_text(), Some("Lightning Bolt"));
    }

    #[test]
    fn test_repeat_within_cooldown_is_rejected() {
        let mut gate = IntakeGate::default();
        let t = Instant::now();

        assert!(gate.admit("Lightning Bolt", t));
        assert!(!gate.admit("Lightning Bolt", t + EPSILON));
    }

    #[test]
    fn test_repeat_after_cooldown_is_admitted() {
        let mut gate = IntakeGate::default();
        let t = Instant::now();

        assert!(gate.admit("Lightning Bolt", t));
        assert!(gate.admit("Lightning Bolt", t + DEFAULT_INTAKE_COOLDOWN + EPSILON));
    }

    #[test]
    fn test_repeat_exactly_at_cooldown_is_admitted() {
        let mut gate = IntakeGate::new(Duration::from_secs(3));
        let t = Instant::now();

        assert!(gate.admit("Counterspell", t));
        assert!(gate.admit("Counterspell", t + Duration::from_secs(3)));
    }

    #[test]
    fn test_rejection_does_not_extend_window() {
        let mut gate = IntakeGate::default();
        let t = Instant::now();

        assert!(gate.admit("Opt", t));
        assert!(!gate.admit("Opt", t + Duration::from_secs(2)));
        // Measured from the accepted scan at t, not the rejected one at t+2s
        assert!(gate.admit("Opt", t + Duration::from_millis(3100)));
    }

    #[test]
    fn test_different_text_resets_suppression() {
        let mut gate = IntakeGate::default();
        let t = Instant::now();

        assert!(gate.admit("Brainstorm", t));
        assert!(gate.admit("Ponder", t + EPSILON));
        assert!(gate.admit("Brainstorm", t + EPSILON * 2));
    }

    #[test]
    fn test_comparison_is_exact() {
        let mut gate = IntakeGate::default();
        let t = Instant::now();

        assert!(gate.admit("Brainstorm", t));
        assert!(gate.admit("BRAINSTORM", t + EPSILON));
    }
}
