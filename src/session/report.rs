use anyhow::Result;

use crate::session::result::SessionSummary;

/// Receives finalized summaries. Called once per completed session; a failure
/// here never undoes the finalize.
pub trait ProgressReporter {
    fn record(&mut self, list_id: &str, summary: &SessionSummary) -> Result<()>;
}

impl<P: ProgressReporter + ?Sized> ProgressReporter for Box<P> {
    fn record(&mut self, list_id: &str, summary: &SessionSummary) -> Result<()> {
        (**self).record(list_id, summary)
    }
}

impl<P: ProgressReporter + ?Sized> ProgressReporter for &mut P {
    fn record(&mut self, list_id: &str, summary: &SessionSummary) -> Result<()> {
        (**self).record(list_id, summary)
    }
}

/// Keeps every summary in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub records: Vec<(String, SessionSummary)>,
}

impl ProgressReporter for MemoryReporter {
    fn record(&mut self, list_id: &str, summary: &SessionSummary) -> Result<()> {
        self.records.push((list_id.to_string(), summary.clone()));
        Ok(())
    }
}
