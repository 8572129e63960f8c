// ABOUTME: Terminal observer that draws a progress bar over file downloads
// ABOUTME: Delegates log output to the tracing observer without tearing the bar

use crate::observer::{ExportEvent, ExportObserver, TracingObserver};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Default)]
pub struct ProgressObserver {
    log: TracingObserver,
    bar: Option<ProgressBar>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_bar(&mut self, count: usize) {
        let pb = ProgressBar::new(count as u64);
        let style = ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        pb.set_style(style);
        self.bar = Some(pb);
    }
}

impl ExportObserver for ProgressObserver {
    fn on_event(&mut self, event: &ExportEvent<'_>) {
        match event {
            ExportEvent::FilesDiscovered { count } => {
                self.log.on_event(event);
                self.start_bar(*count);
            }
            ExportEvent::FileWritten { path } => {
                if let Some(pb) = &self.bar {
                    pb.set_message(path.to_string());
                    pb.inc(1);
                } else {
                    self.log.on_event(event);
                }
            }
            ExportEvent::FileSkipped { .. } => {
                let log = &mut self.log;
                match &self.bar {
                    Some(pb) => {
                        pb.suspend(|| log.on_event(event));
                        pb.inc(1);
                    }
                    None => log.on_event(event),
                }
            }
            ExportEvent::Finished { result, .. } => {
                if let Some(pb) = self.bar.take() {
                    pb.finish_with_message(format!(
                        "({} written, {} skipped)",
                        result.persisted,
                        result.skipped_count()
                    ));
                }
                self.log.on_event(event);
            }
            _ => self.log.on_event(event),
        }
    }
}
