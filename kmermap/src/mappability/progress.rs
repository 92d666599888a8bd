//! 进度汇报：每个 segment 一个 indicatif 进度条，每完成一个批次前进一格。

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress sink handed to the computer. A hidden sink still counts.
#[derive(Clone)]
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    /// A bar over `total` batches, drawn on stderr when `enabled`.
    pub fn new(enabled: bool, total: usize, label: &str) -> Self {
        if !enabled {
            return Self::silent();
        }
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr_with_hz(4));
        let style = ProgressStyle::with_template("{msg} [{elapsed_precise}] {wide_bar} {pos}/{len} ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_message(label.to_string());
        Self { bar }
    }

    pub fn silent() -> Self {
        Self { bar: ProgressBar::hidden() }
    }

    /// One batch done. Safe to call from worker threads.
    #[inline]
    pub fn tick(&self) {
        self.bar.inc(1);
    }

    pub fn done(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}
