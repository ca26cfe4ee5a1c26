//! pdf-footer - add a two-line, multi-column footer to every page of a PDF

mod args;
mod logging;
mod worker;

use anyhow::Result;
use args::Args;
use clap::Parser;
use footer::{default_exporter, Draft};
use tracing::{debug, warn};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let draft_path = args.draft_path();
    let mut draft = if args.no_draft {
        Draft::default()
    } else {
        Draft::load(&draft_path).unwrap_or_default()
    };

    if args.show_draft {
        println!("{}", serde_json::to_string_pretty(&draft)?);
        return Ok(());
    }

    args.apply_to(&mut draft);
    let job = args.job(&draft);
    debug!(?job, "starting");

    let summary = worker::run(job, default_exporter())?;
    println!(
        "Saved: {} ({} pages)",
        summary.output.display(),
        summary.pages
    );

    if !args.no_draft {
        if let Err(e) = draft.save(&draft_path) {
            warn!(path = %draft_path.display(), error = %e, "could not save draft");
        }
    }

    Ok(())
}
