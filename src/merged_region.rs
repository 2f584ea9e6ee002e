use std::collections::HashMap;

use tracing::{trace, warn};

/// Column B, which carries the building address in every resident sheet.
pub const BUILDING_COLUMN: u32 = 1;

/// A rectangular merged range with the value stored at its top-left cell.
///
/// Coordinates are absolute, zero-based `(row, column)` pairs, inclusive on
/// both ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedRegion {
  pub start: (u32, u32),
  pub end:   (u32, u32),
  pub value: String,
}

impl MergedRegion {
  fn is_inverted(&self) -> bool {
    self.start.0 > self.end.0 || self.start.1 > self.end.1
  }
}

/// Maps every row covered by a merged region confined to `column` onto that
/// region's anchor value.
///
/// Rows outside any such region are absent; callers fall back to the literal
/// cell. Regions touching other columns and inverted ranges are skipped.
pub fn resolve_merged_column(
  regions: &[MergedRegion],
  column: u32,
) -> HashMap<u32, String> {
  let mut by_row = HashMap::new();

  for region in regions {
    if region.is_inverted() {
      warn!(?region, "skipping merged region with inverted range");
      continue;
    }
    if region.start.1 != column || region.end.1 != column {
      continue;
    }

    trace!(
      start_row = region.start.0,
      end_row = region.end.0,
      value = region.value,
      "resolved merged region"
    );
    for row in region.start.0..=region.end.0 {
      by_row.insert(row, region.value.clone());
    }
  }

  by_row
}
