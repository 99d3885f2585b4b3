//! Circular progress ring geometry for a 0–100 score.
//!
//! The ring is a fixed background circle plus a foreground arc drawn with a dash
//! array of one circumference. The arc starts fully retracted
//! (`dashoffset = circumference`) and animates to `circumference - filled_length`.
#![allow(dead_code)]

use std::f64::consts::PI;
use std::time::Duration;

use serde::{Serialize, Serializer};

use super::easing::CubicBezier;

/// Diameter used by the standalone ring component.
pub const DEFAULT_SIZE: f64 = 200.0;
/// Diameter used for the overall score on the results dashboard.
pub const DASHBOARD_SIZE: f64 = 250.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 8.0;

/// Static geometry of one ring. All lengths are in the same unit as `size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingGeometry {
    /// Score after clamping to `[0, 100]`.
    pub score: f64,
    pub size: f64,
    pub stroke_width: f64,
    pub center: f64,
    pub radius: f64,
    pub circumference: f64,
    pub filled_length: f64,
    /// Dash offset before the sweep: the arc is invisible.
    pub initial_offset: f64,
    /// Dash offset once the sweep completes.
    pub target_offset: f64,
}

impl RingGeometry {
    /// Out-of-range scores violate the data model upstream; they are clamped here so the
    /// arc never goes negative or past a full turn. NaN reads as 0.
    pub fn new(score: f64, size: f64, stroke_width: f64) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 100.0)
        };
        let radius = ((size - stroke_width) / 2.0).max(0.0);
        let circumference = 2.0 * PI * radius;
        let filled_length = score / 100.0 * circumference;

        Self {
            score,
            size,
            stroke_width,
            center: size / 2.0,
            radius,
            circumference,
            filled_length,
            initial_offset: circumference,
            target_offset: circumference - filled_length,
        }
    }

    pub fn dashboard(score: u8) -> Self {
        Self::new(f64::from(score), DASHBOARD_SIZE, DEFAULT_STROKE_WIDTH)
    }

    /// Dash offset at `progress` ∈ `[0, 1]` of the sweep (already eased).
    pub fn offset_at_progress(&self, progress: f64) -> f64 {
        let progress = progress.clamp(0.0, 1.0);
        self.initial_offset + (self.target_offset - self.initial_offset) * progress
    }
}

/// Timing of the sweep: a fixed delay, then an eased transition of fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcAnimation {
    pub delay: Duration,
    pub duration: Duration,
    pub easing: CubicBezier,
}

impl Default for ArcAnimation {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            duration: Duration::from_millis(2000),
            easing: CubicBezier::EASE_IN_OUT,
        }
    }
}

impl ArcAnimation {
    /// Eased sweep progress `elapsed` after the ring is first shown.
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        let Some(running) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = running.as_secs_f64() / self.duration.as_secs_f64();
        self.easing.apply(t.min(1.0))
    }

    /// Dash offset of `ring`'s foreground arc `elapsed` after it is first shown.
    pub fn offset_at(&self, ring: &RingGeometry, elapsed: Duration) -> f64 {
        ring.offset_at_progress(self.progress_at(elapsed))
    }

    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }
}

impl Serialize for ArcAnimation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("ArcAnimation", 4)?;
        s.serialize_field("delay_ms", &(self.delay.as_millis() as u64))?;
        s.serialize_field("duration_ms", &(self.duration.as_millis() as u64))?;
        s.serialize_field("easing", self.easing.name())?;
        s.serialize_field("control_points", &self.easing.control_points())?;
        s.end()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
