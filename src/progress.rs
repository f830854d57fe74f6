use indicatif::{ProgressBar, ProgressStyle};

/// Receives coarse status updates. Purely observational.
pub trait ProgressSink {
    /// Status text and completion percentage (0-100) of the current phase.
    fn report(&self, text: &str, percentage: u8);

    /// Additional instruction shown beneath the progress, e.g. the address to
    /// open in a browser.
    fn note(&self, _text: &str) {}
}

/// Renders progress as a terminal bar.
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::with_template("{bar:30.blue/white} {pos:>3}% {msg}") {
            bar.set_style(style.progress_chars("━━─"));
        }
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&self, text: &str, percentage: u8) {
        self.bar.set_position(u64::from(percentage.min(100)));
        self.bar.set_message(text.to_string());
    }

    fn note(&self, text: &str) {
        self.bar.println(text);
    }
}

/// Discards all progress.
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn report(&self, _text: &str, _percentage: u8) {}
}
