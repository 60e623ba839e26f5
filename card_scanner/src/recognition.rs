//! Helpers for the OCR side of scanning: choosing the card name out of the
//! recognized lines and throttling how often a frame is sent to recognition.

use std::time::{Duration, Instant};

/// Minimum time between two recognition passes
pub const DEFAULT_SCAN_COOLDOWN: Duration = Duration::from_millis(1500);

/// Pick the card name from the recognized text lines of one frame.
///
/// The title line comes first on a card; lines that are too short or carry
/// digits (collector numbers, power/toughness, set info) are skipped.
pub fn pick_card_name<S: AsRef<str>>(candidates: &[S]) -> Option<String> {
    candidates
        .iter()
        .map(|c| c.as_ref().trim())
        .find(|text| text.chars().count() > 2 && !text.chars().any(|c| c.is_numeric()))
        .map(str::to_string)
}

/// Single-flight throttle for the recognition collaborator.
///
/// A pass may only start when no other pass is running and the cooldown since
/// the last started pass has elapsed. Each started pass must be closed with
/// [`ScanThrottle::finish`].
#[derive(Debug)]
pub struct ScanThrottle {
    cooldown: Duration,
    busy: bool,
    last_start: Option<Instant>,
}

impl Default for ScanThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_COOLDOWN)
    }
}

impl ScanThrottle {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            busy: false,
            last_start: None,
        }
    }

    /// Try to start a recognition pass at `now`
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if self.busy {
            return false;
        }
        if let Some(last) = self.last_start {
            if !self.cooldown.is_zero() && now.saturating_duration_since(last) <= self.cooldown {
                return false;
            }
        }

        self.busy = true;
        self.last_start = Some(now);
        true
    }

    /// Mark the running pass as done
    pub fn finish(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}
