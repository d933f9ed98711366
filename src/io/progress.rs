//! Terminal progress display for long evolutions

use crate::board::Board;
use crate::engine::EvolutionObserver;
use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_MIN_GENERATIONS};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static GENERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar advanced once per applied generation
///
/// Short runs get a hidden bar so that quick commands stay silent.
pub struct GenerationProgress {
    bar: ProgressBar,
}

impl GenerationProgress {
    /// Create a bar for a run of at most `total` generations
    pub fn new(label: &str, total: usize) -> Self {
        let bar = if total >= PROGRESS_MIN_GENERATIONS {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(GENERATION_STYLE.clone());
        bar.set_prefix(label.to_string());
        Self { bar }
    }

    /// Create a bar that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Generations reported so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl EvolutionObserver for GenerationProgress {
    fn on_step(&mut self, board: &Board) {
        self.bar.inc(1);
        self.bar.set_message(format!("population {}", board.population()));
    }
}
