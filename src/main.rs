mod address;
mod config;
mod merged_region;
mod resident;
mod sheet_catalog;
mod sink;
mod state;
mod workbook;

use std::{fs::File, io::BufWriter};

use miette::{Context, IntoDiagnostic};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use self::{
  config::Config,
  sink::{JsonLinesSink, RecordSink},
  state::{IngestState, SheetStatus, run_to_completion},
};

fn main() -> miette::Result<()> {
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env())
    .init();

  let config =
    Config::from_env().context("failed to gather config from env")?;
  info!(?config, "loaded config");

  let mut sink: Box<dyn RecordSink> = match &config.output_path {
    Some(path) => {
      let file = File::create(path)
        .into_diagnostic()
        .context(format!("failed to create output file {}", path.display()))?;
      Box::new(JsonLinesSink::new(BufWriter::new(file)))
    }
    None => Box::new(JsonLinesSink::new(std::io::stdout().lock())),
  };

  let report = run_to_completion(IngestState::Start, &config, sink.as_mut())
    .context(format!(
      "failed to import residents from {}",
      config.workbook_path.display()
    ))?;

  for outcome in &report.sheets {
    match &outcome.status {
      SheetStatus::Skipped => {}
      SheetStatus::Done { records } => {
        info!(sheet = outcome.sheet, records, "imported sheet");
      }
      SheetStatus::Failed { reason } => {
        error!(sheet = outcome.sheet, reason, "sheet was not imported");
      }
    }
  }
  let skipped = report
    .sheets
    .iter()
    .filter(|o| o.status == SheetStatus::Skipped)
    .count();
  if skipped > 0 {
    warn!(skipped, "some sheets were not on the allow-list");
  }
  info!(imported = report.imported, "import finished");

  Ok(())
}
