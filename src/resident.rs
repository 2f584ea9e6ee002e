pub mod columns;
pub mod model;

use miette::Context;
use tracing::{debug, instrument, trace, warn};

use self::{columns::RESIDENT_COLUMNS, model::ResidentRecord};
use crate::{
  address::{Address, SheetVariant, decompose_address},
  merged_region::{BUILDING_COLUMN, resolve_merged_column},
  workbook::{RawRow, Workbook},
};

/// Title, legend and column headings occupy the first eight rows.
pub const HEADER_ROWS: usize = 8;

#[derive(Clone, Copy, Debug)]
pub struct SheetContext<'a> {
  pub name:    &'a str,
  pub variant: SheetVariant,
}

/// Reads every data row of a sheet into a record, in sheet order.
#[instrument(skip(workbook, sheet), fields(sheet = sheet.name))]
pub fn read_residents_from_sheet(
  workbook: &mut dyn Workbook,
  sheet: SheetContext<'_>,
) -> miette::Result<Vec<ResidentRecord>> {
  let decoded = workbook
    .decode_sheet(sheet.name)
    .context(format!("failed to decode sheet \"{}\"", sheet.name))?;
  let merged_addresses =
    resolve_merged_column(&decoded.merged_regions, BUILDING_COLUMN);

  let residents = decoded
    .rows
    .iter()
    .enumerate()
    .skip(HEADER_ROWS)
    .map(|(row_index, row)| {
      let row_index = row_index as u32;
      normalize_resident_row(
        sheet,
        row_index,
        row,
        merged_addresses.get(&row_index).map(String::as_str),
      )
    })
    .collect::<Vec<_>>();

  Ok(residents)
}

/// Builds a record from one data row.
///
/// `merged_address` is the value of the merged block covering this row's
/// address cell, if there is one; otherwise the literal cell is used. Bad or
/// missing cells leave the corresponding field at its default.
#[instrument(skip(sheet, raw_row, merged_address), fields(sheet = sheet.name))]
pub fn normalize_resident_row(
  sheet: SheetContext<'_>,
  row_index: u32,
  raw_row: &RawRow,
  merged_address: Option<&str>,
) -> ResidentRecord {
  let address_text = merged_address
    .unwrap_or_else(|| raw_row.cell(BUILDING_COLUMN as usize))
    .trim();
  let address = if address_text.is_empty() {
    Address::default()
  } else {
    decompose_address(sheet.variant, sheet.name, address_text)
  };

  let mut record = ResidentRecord {
    sheet: sheet.name.to_owned(),
    row: row_index + 1,
    building_number: address.building,
    unit_number: address.unit,
    room_number: address.room,
    ..Default::default()
  };

  for binding in RESIDENT_COLUMNS {
    let value = raw_row.cell(binding.column).trim();
    (binding.apply)(&mut record, value);
    trace!(field = binding.field, value, "parsed column");
  }

  if record.building_number.is_empty() {
    warn!(
      row = record.row,
      address = address_text,
      name = record.name,
      "resident has no building number"
    );
  }
  debug!("parsed full resident: {record:#?}");

  record
}

#[cfg(test)]
mod tests {
  use super::{
    model::{Gender, TriState},
    *,
  };

  const DASH_PAIR_SHEET: SheetContext<'static> = SheetContext {
    name:    "101楼",
    variant: SheetVariant::DashSeparatedPair,
  };

  fn full_row() -> RawRow {
    let mut cells = vec![String::new(); 33];
    let mut set = |i: usize, v: &str| cells[i] = v.to_owned();
    set(0, "1");
    set(1, " 12-305 ");
    set(2, " 张三 ");
    set(3, "110101195001011234");
    set(4, "74");
    set(5, "男");
    set(6, "是");
    set(7, "自住");
    set(8, "商品房");
    set(9, "1");
    set(10, "北京市东城区");
    set(11, "13800000000");
    set(12, "李四");
    set(13, "子女");
    set(14, "13900000000");
    set(15, "轻度");
    set(16, "否");
    set(17, "否");
    set(18, "否");
    set(19, "是");
    set(20, "肢体三级");
    set(21, "是");
    set(22, "否");
    set(23, "");
    set(24, "行动不便");
    set(25, "是");
    set(26, "ignored");
    set(27, "ignored");
    set(28, "是");
    set(29, "否");
    set(30, "有");
    set(31, "2024-05-01");
    set(32, "备注");
    RawRow(cells)
  }

  #[test]
  fn full_row_fills_every_field() {
    let record = normalize_resident_row(DASH_PAIR_SHEET, 8, &full_row(), None);

    assert_eq!(record.sheet, "101楼");
    assert_eq!(record.row, 9);
    assert_eq!(record.building_number, "12");
    assert_eq!(record.unit_number, 1);
    assert_eq!(record.room_number, "305");
    assert_eq!(record.name, "张三");
    assert_eq!(record.id_card, "110101195001011234");
    assert_eq!(record.age, Some(74));
    assert_eq!(record.gender, Gender::Male);
    assert_eq!(record.is_permanent, TriState::Yes);
    assert_eq!(record.housing_situation, "自住");
    assert_eq!(record.property_nature, "商品房");
    assert_eq!(record.registered_residence_type, 1);
    assert_eq!(record.registered_residence, "北京市东城区");
    assert_eq!(record.telephone, "13800000000");
    assert_eq!(record.first_contact, "李四");
    assert_eq!(record.elder_relationship, "子女");
    assert_eq!(record.elder_contact_phone, "13900000000");
    assert_eq!(record.disability_level, "轻度");
    assert_eq!(record.is_low_income, TriState::No);
    assert_eq!(record.is_low_income2, TriState::No);
    assert_eq!(record.is_destitute, TriState::No);
    assert_eq!(record.is_family_planning_special, TriState::Yes);
    assert_eq!(record.disability_category, "肢体三级");
    assert_eq!(record.is_living_alone, TriState::Yes);
    assert_eq!(record.is_empty_nest, TriState::No);
    assert_eq!(record.is_orphaned, TriState::Unknown);
    assert_eq!(record.other_situation, "行动不便");
    assert_eq!(record.is_needs_focus, TriState::Yes);
    assert_eq!(record.is_in_group, TriState::Yes);
    assert_eq!(record.is_private_message, TriState::No);
    assert_eq!(record.has_pet, TriState::Unknown);
    assert_eq!(record.last_contact_time, "2024-05-01");
    assert_eq!(record.other_info, "备注");
  }

  #[test]
  fn short_row_leaves_trailing_fields_at_default() {
    let row = RawRow(full_row().0.into_iter().take(10).collect());
    let record = normalize_resident_row(DASH_PAIR_SHEET, 8, &row, None);

    let expected = ResidentRecord {
      sheet: "101楼".to_owned(),
      row: 9,
      building_number: "12".to_owned(),
      unit_number: 1,
      room_number: "305".to_owned(),
      name: "张三".to_owned(),
      id_card: "110101195001011234".to_owned(),
      age: Some(74),
      gender: Gender::Male,
      is_permanent: TriState::Yes,
      housing_situation: "自住".to_owned(),
      property_nature: "商品房".to_owned(),
      registered_residence_type: 1,
      ..Default::default()
    };
    assert_eq!(record, expected);
  }

  #[test]
  fn bad_numbers_fall_back_to_defaults() {
    let mut row = full_row();
    row.0[4] = "七十".to_owned();
    row.0[9] = "外地".to_owned();
    let record = normalize_resident_row(DASH_PAIR_SHEET, 8, &row, None);

    assert_eq!(record.age, None);
    assert_eq!(record.registered_residence_type, 0);
    assert_eq!(record.name, "张三");
  }

  #[test]
  fn merged_address_overrides_literal_cell() {
    let mut row = full_row();
    row.0[1] = String::new();
    let record =
      normalize_resident_row(DASH_PAIR_SHEET, 9, &row, Some("7-1102"));

    assert_eq!(record.building_number, "7");
    assert_eq!(record.room_number, "1102");
  }

  #[test]
  fn empty_address_skips_decomposition() {
    let sheet = SheetContext {
      name:    "108楼副本",
      variant: SheetVariant::NumericSuffixOnly,
    };
    let row = RawRow(vec!["1".to_owned(), "  ".to_owned(), "王五".to_owned()]);
    let record = normalize_resident_row(sheet, 8, &row, None);

    assert_eq!(record.building_number, "");
    assert_eq!(record.unit_number, 0);
    assert_eq!(record.room_number, "");
    assert_eq!(record.name, "王五");
  }

  #[test]
  fn room_only_address_is_trimmed() {
    let sheet = SheetContext {
      name:    "108楼副本",
      variant: SheetVariant::NumericSuffixOnly,
    };
    let row = RawRow(vec!["1".to_owned(), " 305 ".to_owned()]);
    let record = normalize_resident_row(sheet, 8, &row, None);
    assert_eq!(record.room_number, "305");

    let record =
      normalize_resident_row(sheet, 9, &RawRow::default(), Some(" 306\t"));
    assert_eq!(record.room_number, "306");
  }

  #[test]
  fn empty_row_normalizes() {
    let record =
      normalize_resident_row(DASH_PAIR_SHEET, 20, &RawRow::default(), None);
    assert_eq!(
      record,
      ResidentRecord {
        sheet: "101楼".to_owned(),
        row: 21,
        ..Default::default()
      }
    );
  }
}
