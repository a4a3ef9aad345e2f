//! Count-up statistics.
//!
//! A [`CountUp`] eases a displayed number from 0 to its target over a fixed
//! duration with an ease-out-quart curve, the way the company statistics strip
//! animates once it scrolls into view. [`VisibilityTrigger`] is the one-shot
//! "scrolled into view" latch that starts it.
//!
//! ```ignore
//! let projects = CountUp::new(10_000, Duration::from_millis(3000)).with_suffix("+");
//! assert_eq!(projects.text_at(Duration::from_millis(3000)), "10,000+");
//! ```

use std::time::Duration;

/// How a counter value is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountStyle {
    /// Thousands separators (`10,000`).
    #[default]
    Grouped,
    /// Plain digits, for years (`1974`).
    Year,
}

/// A number that counts up from zero to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    pub target: u64,
    pub duration: Duration,
    pub suffix: String,
    pub style: CountStyle,
}

impl CountUp {
    pub fn new(target: u64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            suffix: String::new(),
            style: CountStyle::Grouped,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_style(mut self, style: CountStyle) -> Self {
        self.style = style;
        self
    }

    /// The four counters of the company statistics strip.
    pub fn company_stats() -> Vec<CountUp> {
        vec![
            CountUp::new(1974, Duration::from_millis(2000)).with_style(CountStyle::Year),
            CountUp::new(10_000, Duration::from_millis(3000)).with_suffix("+"),
            CountUp::new(150, Duration::from_millis(2500)).with_suffix("+"),
            CountUp::new(4, Duration::from_millis(1500)),
        ]
    }

    /// Linear progress in `[0, 1]`. A zero duration is complete immediately.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Displayed value after `elapsed`.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        let eased = ease_out_quart(self.progress(elapsed));
        (eased * self.target as f64).floor() as u64
    }

    /// Whether the counter has reached its target.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    /// Displayed text after `elapsed`, including the suffix.
    pub fn text_at(&self, elapsed: Duration) -> String {
        format!("{}{}", self.format_value(self.value_at(elapsed)), self.suffix)
    }

    /// Format a value according to the counter's style.
    pub fn format_value(&self, value: u64) -> String {
        match self.style {
            CountStyle::Year => value.to_string(),
            CountStyle::Grouped => group_thousands(value),
        }
    }
}

/// `1 - (1 - t)^4`: fast start, gentle landing.
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(4)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Fires once, the first time the observed visible fraction reaches the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f32,
    fired: bool,
}

impl VisibilityTrigger {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            fired: false,
        }
    }

    /// Report the currently visible fraction. Returns `true` exactly once.
    pub fn observe(&mut self, visible_ratio: f32) -> bool {
        if self.fired || visible_ratio < self.threshold {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        Self::new(0.5)
    }
}
