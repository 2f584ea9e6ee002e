use std::collections::VecDeque;

use kinded::Kinded;
use miette::Context;
use tracing::{error, info, instrument};

use crate::{
  config::Config,
  resident::{SheetContext, read_residents_from_sheet},
  sheet_catalog::variant_for_sheet,
  sink::RecordSink,
  workbook::{Workbook, XlsxWorkbook},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SheetStatus {
  /// Not on the allow-list; never read.
  Skipped,
  Done { records: usize },
  /// The sheet's cells or merged regions could not be read.
  Failed { reason: String },
}

#[derive(Clone, Debug)]
pub struct SheetOutcome {
  pub sheet:  String,
  pub status: SheetStatus,
}

/// Per-sheet outcomes in workbook order, plus the total number of records
/// handed to the sink.
#[derive(Clone, Debug, Default)]
pub struct IngestReport {
  pub imported: usize,
  pub sheets:   Vec<SheetOutcome>,
}

#[derive(Kinded)]
#[kinded(kind = IngestStep)]
pub enum IngestState {
  Start,
  OpenedWorkbook {
    workbook:       Box<dyn Workbook>,
    pending_sheets: VecDeque<String>,
    report:         IngestReport,
  },
  AllSheetsDone {
    report: IngestReport,
  },
}

impl IngestState {
  pub fn from_workbook(workbook: Box<dyn Workbook>) -> Self {
    let pending_sheets = workbook.sheet_names().into();
    IngestState::OpenedWorkbook {
      workbook,
      pending_sheets,
      report: IngestReport::default(),
    }
  }

  pub fn step(
    self,
    config: &Config,
    sink: &mut dyn RecordSink,
  ) -> miette::Result<Self> {
    let old_state_step = self.kind();
    let new_state = match self {
      IngestState::Start => {
        let workbook = XlsxWorkbook::open(&config.workbook_path)
          .context("failed to open resident workbook")?;
        IngestState::from_workbook(Box::new(workbook))
      }
      IngestState::OpenedWorkbook {
        mut workbook,
        mut pending_sheets,
        mut report,
      } => match pending_sheets.pop_front() {
        Some(sheet) => {
          let status =
            ingest_sheet(workbook.as_mut(), &sheet, config.batch_size, sink)?;
          if let SheetStatus::Done { records } = status {
            report.imported += records;
          }
          report.sheets.push(SheetOutcome { sheet, status });
          IngestState::OpenedWorkbook {
            workbook,
            pending_sheets,
            report,
          }
        }
        // dropping the workbook here closes the file
        None => IngestState::AllSheetsDone { report },
      },
      IngestState::AllSheetsDone { .. } => {
        miette::bail!("cannot step an ingest that has already completed")
      }
    };

    info!(
      old_state = ?old_state_step,
      new_state = ?(new_state.kind()),
      "successfully transitioned state"
    );
    Ok(new_state)
  }
}

/// Drives `state` until every sheet has been handled.
///
/// Only a workbook that cannot be opened or a sink that rejects a batch fails
/// the run. Re-running over the same workbook imports every resident again.
pub fn run_to_completion(
  mut state: IngestState,
  config: &Config,
  sink: &mut dyn RecordSink,
) -> miette::Result<IngestReport> {
  loop {
    state = match state {
      IngestState::AllSheetsDone { report } => {
        info!(imported = report.imported, "ingest completed");
        return Ok(report);
      }
      s => s.step(config, sink).context("failed to step ingest state")?,
    };
  }
}

#[instrument(skip(workbook, sink))]
fn ingest_sheet(
  workbook: &mut dyn Workbook,
  sheet: &str,
  batch_size: usize,
  sink: &mut dyn RecordSink,
) -> miette::Result<SheetStatus> {
  let Some(variant) = variant_for_sheet(sheet) else {
    info!("sheet is not on the allow-list, skipping");
    return Ok(SheetStatus::Skipped);
  };
  info!(?variant, "processing sheet");

  let context = SheetContext {
    name: sheet,
    variant,
  };
  let residents = match read_residents_from_sheet(workbook, context) {
    Ok(residents) => residents,
    Err(e) => {
      let reason = e
        .chain()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ");
      error!(reason, "failed to read sheet, moving on");
      return Ok(SheetStatus::Failed { reason });
    }
  };

  for batch in residents.chunks(batch_size) {
    sink
      .insert_batch(batch)
      .context(format!("failed to persist residents from sheet \"{sheet}\""))?;
  }

  info!(records = residents.len(), "finished sheet");
  Ok(SheetStatus::Done {
    records: residents.len(),
  })
}
