//! Progress reporting decoupled from any particular UI.
//!
//! A batch emits a finite, ordered sequence of progress integers; the
//! consumer decides rendering. Values are usually 0..=100 but GIF
//! composition can emit negative values before the save phase, so sinks
//! should clamp.

use indicatif::{ProgressBar, ProgressStyle};

pub trait ProgressSink {
    fn emit(&mut self, value: i32);
}

impl<F: FnMut(i32)> ProgressSink for F {
    fn emit(&mut self, value: i32) {
        self(value)
    }
}

/// Sink that discards all events.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&mut self, _value: i32) {}
}

/// Console sink backed by an indicatif bar, used by the CLI layer.
pub struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(ProgressStyle::default_bar());
        Self { bar }
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl Default for BarSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarSink {
    fn emit(&mut self, value: i32) {
        self.bar.set_position(value.clamp(0, 100) as u64);
    }
}
