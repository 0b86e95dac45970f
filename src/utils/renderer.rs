use burn::train::renderer::{MetricState, MetricsRenderer, TrainingProgress};
use derive_new::new;

/// A renderer for TUI-disabled modes, which reports progress through the log
#[derive(new)]
pub struct Log {}

impl MetricsRenderer for Log {
    fn update_train(&mut self, state: MetricState) {
        log_state("train", state);
    }

    fn update_valid(&mut self, state: MetricState) {
        log_state("valid", state);
    }

    fn render_train(&mut self, item: TrainingProgress) {
        log_progress("train", &item);
    }

    fn render_valid(&mut self, item: TrainingProgress) {
        log_progress("valid", &item);
    }
}

fn log_state(split: &str, state: MetricState) {
    match state {
        MetricState::Generic(entry) => debug!("[{}] {}: {}", split, entry.name, entry.formatted),
        MetricState::Numeric(entry, value) => {
            debug!("[{}] {}: {} ({})", split, entry.name, entry.formatted, value)
        }
    }
}

fn log_progress(split: &str, item: &TrainingProgress) {
    info!(
        "[{}] epoch {}/{}, iteration {}, items {}/{}",
        split,
        item.epoch,
        item.epoch_total,
        item.iteration,
        item.progress.items_processed,
        item.progress.items_total
    );
}
