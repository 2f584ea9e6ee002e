use crate::address::SheetVariant;

/// Sheets that get imported, and how each one writes its addresses. Names
/// are matched exactly; anything not listed is skipped.
const PROCESSED_SHEETS: &[(&str, SheetVariant)] = &[
  ("101楼", SheetVariant::DashSeparatedPair),
  ("103楼", SheetVariant::DashSeparatedPair),
  ("104楼新版", SheetVariant::DashSeparatedPair),
  ("105楼副本", SheetVariant::DashSeparatedPair),
  ("106楼副本", SheetVariant::DashSeparatedPair),
  ("108楼副本", SheetVariant::NumericSuffixOnly),
  ("109楼-更新中", SheetVariant::DashSeparatedPair),
  ("110楼", SheetVariant::NumericSuffixOnly),
  ("111楼新", SheetVariant::NumericSuffixOnly),
  ("113楼", SheetVariant::NumericSuffixOnly),
  ("114楼更新", SheetVariant::DashSeparatedPair),
  ("117楼", SheetVariant::BuildingUnitRoomPattern),
  ("118楼新版", SheetVariant::DashSeparatedTriple),
  ("119楼", SheetVariant::DashSeparatedTriple),
  ("120楼新版", SheetVariant::DashSeparatedTriple),
  ("121楼新版", SheetVariant::DashSeparatedTriple),
  ("122楼新版", SheetVariant::DashSeparatedTriple),
];

pub fn variant_for_sheet(sheet_name: &str) -> Option<SheetVariant> {
  PROCESSED_SHEETS
    .iter()
    .find(|(name, _)| *name == sheet_name)
    .map(|(_, variant)| *variant)
}
