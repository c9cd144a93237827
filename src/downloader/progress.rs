use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;
use std::time::Instant;

/// Width in characters of the ASCII bar drawn for plain URL downloads.
pub const STATUS_WIDTH: usize = 70;

/// How a transfer is rendered once its size is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStyle {
    /// `[=====>     ] 42.00%`
    Bar,
    /// Destination label, byte counts, rate and ETA.
    Labeled,
}

pub struct ProgressTracker {
    bar: ProgressBar,
    display: DisplayStyle,
    name: String,
    current: u64,
    total: u64,
    start_time: Instant,
    completed: bool,
}

impl ProgressTracker {
    /// Tracker drawn on stdout.
    pub fn new(name: impl Into<String>, display: DisplayStyle) -> Self {
        Self::with_target(name.into(), display, ProgressDrawTarget::stdout())
    }

    /// Tracker that counts bytes but never draws.
    pub fn hidden(name: impl Into<String>, display: DisplayStyle) -> Self {
        Self::with_target(name.into(), display, ProgressDrawTarget::hidden())
    }

    fn with_target(name: String, display: DisplayStyle, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(unknown_size_style());
        bar.set_prefix(name.clone());

        Self {
            bar,
            display,
            name,
            current: 0,
            total: 0,
            start_time: Instant::now(),
            completed: false,
        }
    }

    /// Sets the expected size. Zero means unknown and keeps the byte counter.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
        if total == 0 {
            return;
        }

        self.bar.set_length(total);
        self.bar.set_style(match self.display {
            DisplayStyle::Bar => ascii_bar_style(),
            DisplayStyle::Labeled => labeled_style(),
        });
    }

    pub fn update(&mut self, current: u64) {
        self.current = current;
        self.bar.set_position(current);

        if self.display == DisplayStyle::Bar
            && let Some(percentage) = percent(current, self.total)
        {
            self.bar.set_message(format!("{percentage:3.2}%"));
        }
    }

    pub fn complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.bar.finish();

        info!(
            "{}: Complete - {} in {:.1}s",
            self.name,
            HumanBytes(self.current),
            self.start_time.elapsed().as_secs_f64()
        );
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        // Interrupted transfers keep their last drawn state.
        if !self.completed {
            self.bar.abandon();
        }
    }
}

/// Share of `total` already downloaded, in percent. `None` when the size is unknown.
pub fn percent(downloaded: u64, total: u64) -> Option<f64> {
    (total > 0).then(|| downloaded as f64 * 100.0 / total as f64)
}

fn ascii_bar_style() -> ProgressStyle {
    ProgressStyle::with_template(&format!("[{{bar:{STATUS_WIDTH}}}] {{msg}}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

fn labeled_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix}: {percent:>3}%|{bar:40}| {bytes}/{total_bytes} [{elapsed_precise}<{eta_precise}, {bytes_per_sec}]",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("## ")
}

fn unknown_size_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix}: {spinner} {bytes} [{elapsed_precise}, {bytes_per_sec}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
