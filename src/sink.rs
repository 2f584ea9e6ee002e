use std::io::Write;

use miette::{Context, IntoDiagnostic};
use tracing::{debug, instrument};

use crate::resident::model::ResidentRecord;

/// Where imported residents end up.
pub trait RecordSink {
  fn insert_batch(&mut self, batch: &[ResidentRecord]) -> miette::Result<()>;
}

/// Writes one JSON object per line.
pub struct JsonLinesSink<W: Write> {
  writer: W,
}

impl<W: Write> JsonLinesSink<W> {
  pub fn new(writer: W) -> Self {
    Self { writer }
  }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
  #[instrument(skip_all, fields(batch_len = batch.len()))]
  fn insert_batch(&mut self, batch: &[ResidentRecord]) -> miette::Result<()> {
    for record in batch {
      serde_json::to_writer(&mut self.writer, record)
        .into_diagnostic()
        .context("failed to serialize resident record")?;
      self
        .writer
        .write_all(b"\n")
        .into_diagnostic()
        .context("failed to write resident record")?;
    }
    self
      .writer
      .flush()
      .into_diagnostic()
      .context("failed to flush resident records")?;
    debug!("wrote batch of resident records");
    Ok(())
  }
}
