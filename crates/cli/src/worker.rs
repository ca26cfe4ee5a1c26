//! Background footer job
//!
//! The job runs on its own thread and reports back over a channel: one
//! `Progress` per page, then exactly one `Finished`.

use anyhow::{anyhow, Result};
use crossbeam_channel::{unbounded, Receiver};
use footer::{FooterJob, JobSummary, WorkbookExporter};
use std::thread::{self, JoinHandle};
use tracing::info;

pub enum JobEvent {
    Progress { page: usize, total: usize },
    Finished(footer::Result<JobSummary>),
}

/// Start the job on a worker thread
pub fn spawn(
    job: FooterJob,
    exporter: Box<dyn WorkbookExporter>,
) -> Result<(Receiver<JobEvent>, JoinHandle<()>)> {
    let (event_tx, event_rx) = unbounded::<JobEvent>();

    let handle = thread::Builder::new()
        .name("footer-worker".to_string())
        .spawn(move || {
            let progress_tx = event_tx.clone();
            let result = job.run(exporter.as_ref(), |page, total| {
                let _ = progress_tx.send(JobEvent::Progress { page, total });
            });
            let _ = event_tx.send(JobEvent::Finished(result));
        })?;

    Ok((event_rx, handle))
}

/// Run the job in the background and wait for its result
pub fn run(job: FooterJob, exporter: Box<dyn WorkbookExporter>) -> Result<JobSummary> {
    let (events, handle) = spawn(job, exporter)?;

    let mut outcome = None;
    for event in events.iter() {
        match event {
            JobEvent::Progress { page, total } => info!("Page {page}/{total}"),
            JobEvent::Finished(result) => outcome = Some(result),
        }
    }

    handle
        .join()
        .map_err(|_| anyhow!("footer worker panicked"))?;

    let summary = outcome.ok_or_else(|| anyhow!("footer worker stopped without a result"))??;
    Ok(summary)
}
