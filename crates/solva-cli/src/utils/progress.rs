use indicatif::{ProgressBar, ProgressStyle};
use solva::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 100;

/// Maps core progress events onto a single indicatif bar on stderr.
///
/// The workflow may report from worker threads, so the bar sits behind an
/// `Arc<Mutex<_>>` and the callback is `Send + Sync`.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0).with_style(Self::spinner_style());
        bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        bar.finish_and_clear();

        Self {
            bar: Arc::new(Mutex::new(bar)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();

        Box::new(move |progress: Progress| {
            let Ok(bar) = bar.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    bar.reset();
                    bar.set_length(0);
                    bar.set_style(Self::spinner_style());
                    bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    bar.set_message(name);
                }
                Progress::PhaseFinish => {
                    bar.disable_steady_tick();
                    bar.finish_with_message("✓ Done");
                }
                Progress::FramesStart { total_frames } => {
                    bar.disable_steady_tick();
                    bar.reset();
                    bar.set_length(total_frames);
                    bar.set_style(Self::bar_style());
                }
                Progress::FrameDone => {
                    bar.inc(1);
                }
                Progress::FramesFinish => {
                    let total = bar.length().unwrap_or(0);
                    if bar.position() < total {
                        bar.set_position(total);
                    }
                    bar.finish();
                }
                Progress::Message(msg) => {
                    if bar.is_finished() {
                        bar.set_message(msg);
                    } else {
                        bar.println(format!("  {}", msg));
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<16} [{bar:40.cyan/blue}] {pos}/{len} frames")
            .expect("Failed to create bar style template")
            .progress_chars("=>-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
