use std::{fs::File, io::BufReader, path::Path};

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use chrono::{NaiveDate, NaiveTime};
use miette::{Context, IntoDiagnostic, miette};
use tracing::{debug, instrument};

use crate::merged_region::MergedRegion;

/// The text cells of one spreadsheet row. Trailing empty cells may be
/// missing, so reads past the end return an empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow(pub Vec<String>);

impl RawRow {
  pub fn cell(&self, column: usize) -> &str {
    self.0.get(column).map(String::as_str).unwrap_or_default()
  }
}

impl<S: Into<String>> FromIterator<S> for RawRow {
  fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
    RawRow(iter.into_iter().map(Into::into).collect())
  }
}

/// Everything the importer needs from one sheet. `rows[i]` is physical row
/// `i` (zero-based) of the sheet.
#[derive(Clone, Debug, Default)]
pub struct DecodedSheet {
  pub rows:           Vec<RawRow>,
  pub merged_regions: Vec<MergedRegion>,
}

pub trait Workbook {
  /// Sheet names in workbook order.
  fn sheet_names(&self) -> Vec<String>;

  fn decode_sheet(&mut self, name: &str) -> miette::Result<DecodedSheet>;
}

pub struct XlsxWorkbook {
  inner: Xlsx<BufReader<File>>,
}

impl XlsxWorkbook {
  #[instrument]
  pub fn open(path: &Path) -> miette::Result<Self> {
    let inner: Xlsx<_> = open_workbook(path)
      .into_diagnostic()
      .context(format!("failed to open workbook {}", path.display()))?;
    debug!("opened workbook");
    Ok(Self { inner })
  }
}

impl Workbook for XlsxWorkbook {
  fn sheet_names(&self) -> Vec<String> {
    self.inner.sheet_names()
  }

  fn decode_sheet(&mut self, name: &str) -> miette::Result<DecodedSheet> {
    let range = self
      .inner
      .worksheet_range(name)
      .into_diagnostic()
      .context(format!("failed to read cells of sheet \"{name}\""))?;

    let dimensions = self
      .inner
      .worksheet_merge_cells(name)
      .ok_or(miette!("failed to find merged cells of sheet \"{name}\""))?
      .into_diagnostic()
      .context(format!("failed to read merged cells of sheet \"{name}\""))?;

    let merged_regions = dimensions
      .into_iter()
      .map(|d| MergedRegion {
        start: d.start,
        end:   d.end,
        value: range.get_value(d.start).map(cell_text).unwrap_or_default(),
      })
      .collect::<Vec<_>>();
    let rows = absolute_rows(&range);
    debug!(
      sheet = name,
      rows = rows.len(),
      merged_regions = merged_regions.len(),
      "decoded sheet"
    );

    Ok(DecodedSheet {
      rows,
      merged_regions,
    })
  }
}

// calamine ranges start at the first used cell, but header offsets and merged
// regions are both counted from the top-left corner of the sheet
fn absolute_rows(range: &Range<Data>) -> Vec<RawRow> {
  let Some((last_row, last_column)) = range.end() else {
    return Vec::new();
  };

  (0..=last_row)
    .map(|row| {
      let mut cells = (0..=last_column)
        .map(|column| {
          range
            .get_value((row, column))
            .map(cell_text)
            .unwrap_or_default()
        })
        .collect::<Vec<_>>();
      while cells.last().is_some_and(String::is_empty) {
        cells.pop();
      }
      RawRow(cells)
    })
    .collect()
}

pub fn cell_text(data: &Data) -> String {
  match data {
    Data::Empty => String::new(),
    Data::String(s) => s.clone(),
    Data::Int(i) => i.to_string(),
    Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
      (*f as i64).to_string()
    }
    Data::DateTime(dt) => {
      let (y, m, d, h, min, s, _millis) = dt.to_ymd_hms_milli();
      let datetime = NaiveDate::from_ymd_opt(y as _, m as _, d as _)
        .and_then(|date| date.and_hms_opt(h as _, min as _, s as _));
      match datetime {
        Some(datetime) if datetime.time() == NaiveTime::MIN => {
          datetime.date().to_string()
        }
        Some(datetime) => datetime.to_string(),
        None => dt.to_string(),
      }
    }
    Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    d => d.to_string(),
  }
}
