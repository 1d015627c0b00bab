use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Step-by-step progress on stderr; `Silent` swallows everything so
/// scripted runs produce no chrome.
pub enum Progress {
    Interactive(Spinner),
    Silent,
}

impl Progress {
    pub fn new(interactive: bool, total_steps: u8) -> Self {
        if interactive {
            Self::Interactive(Spinner::new(total_steps))
        } else {
            Self::Silent
        }
    }

    pub fn step(&mut self, description: &str) {
        if let Self::Interactive(s) = self {
            s.begin(description);
        }
    }

    pub fn complete_step(&mut self, description: &str, substeps: &[&str]) {
        if let Self::Interactive(s) = self {
            s.done(description, substeps);
        }
    }

    pub fn finish(self) {
        if let Self::Interactive(mut s) = self {
            s.clear();
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr);
            let _ = writeln!(
                stderr,
                "  \x1b[32m✓\x1b[0m Done in {:.2}s",
                s.started.elapsed().as_secs_f64()
            );
            let _ = writeln!(stderr);
        }
    }
}

pub struct Spinner {
    bar: Option<ProgressBar>,
    started: Instant,
    step_started: Instant,
    step: u8,
    total_steps: u8,
}

impl Spinner {
    fn new(total_steps: u8) -> Self {
        let now = Instant::now();
        Self {
            bar: None,
            started: now,
            step_started: now,
            step: 0,
            total_steps,
        }
    }

    fn begin(&mut self, description: &str) {
        self.clear();
        self.step += 1;
        self.step_started = Instant::now();

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.green} {msg}")
                .expect("invalid template"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(format!(
            "[{}/{}] {description}...",
            self.step, self.total_steps
        ));
        self.bar = Some(bar);
    }

    fn done(&mut self, description: &str, substeps: &[&str]) {
        self.clear();
        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {description} ({:.1}s)",
            self.step_started.elapsed().as_secs_f64()
        );
        for substep in substeps {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {substep}");
        }
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
