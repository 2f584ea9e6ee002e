use std::sync::LazyLock;

use regex::Regex;
use tracing::{trace, warn};

/// Room marker used when an address names a building but no room.
pub const UNKNOWN_ROOM: &str = "未知";

static DIGITS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\d+").expect("digits regex is valid"));

static BUILDING_UNIT_ROOM: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(\d+)楼(\d+)单元(\d+)")
    .expect("building-unit-room regex is valid")
});

// a bare number after the building is ambiguous between unit and room, so
// only digits behind an explicit unit marker are taken
static LOOSE_BUILDING_UNIT_ROOM: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(\d+)[楼幢]?(?:(\d+)单元(\d*))?")
    .expect("loose building-unit-room regex is valid")
});

/// Address-parsing strategy for a sheet, picked by the sheet's name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetVariant {
  /// Building comes from the sheet name, the cell holds only the room.
  NumericSuffixOnly,
  /// `117楼3单元502`, with a looser fallback.
  BuildingUnitRoomPattern,
  /// `118-2-301`.
  DashSeparatedTriple,
  /// `12-305`.
  DashSeparatedPair,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Address {
  pub building: String,
  pub unit:     u32,
  pub room:     String,
}

impl Address {
  fn new(building: &str, unit: u32, room: &str) -> Self {
    Self {
      building: building.to_owned(),
      unit,
      room: room.to_owned(),
    }
  }
}

/// Splits a raw address cell into building, unit and room.
///
/// Never fails: input that a strategy cannot make sense of yields a partially
/// or fully empty address.
pub fn decompose_address(
  variant: SheetVariant,
  sheet_name: &str,
  raw: &str,
) -> Address {
  let address = match variant {
    SheetVariant::NumericSuffixOnly => {
      Address::new(&building_from_sheet_name(sheet_name), 1, raw)
    }
    SheetVariant::BuildingUnitRoomPattern => decompose_building_unit_room(raw),
    SheetVariant::DashSeparatedTriple => decompose_dash_triple(raw),
    SheetVariant::DashSeparatedPair => decompose_dash_pair(raw),
  };
  trace!(?variant, raw, ?address, "decomposed address");
  address
}

/// First run of digits in the sheet name, e.g. `"108"` for `"108楼副本"`.
pub fn building_from_sheet_name(sheet_name: &str) -> String {
  DIGITS
    .find(sheet_name)
    .map(|m| m.as_str().to_owned())
    .unwrap_or_default()
}

fn decompose_building_unit_room(raw: &str) -> Address {
  if let Some(captures) = BUILDING_UNIT_ROOM.captures(raw) {
    return Address::new(
      &captures[1],
      parse_unit(&captures[2]),
      &captures[3],
    );
  }

  let Some(captures) = LOOSE_BUILDING_UNIT_ROOM.captures(raw) else {
    return Address::default();
  };
  let unit = captures
    .get(2)
    .map(|m| parse_unit(m.as_str()))
    .unwrap_or(1);
  let room = captures
    .get(3)
    .map(|m| m.as_str())
    .filter(|r| !r.is_empty())
    .unwrap_or(UNKNOWN_ROOM);

  Address::new(&captures[1], unit, room)
}

fn decompose_dash_triple(raw: &str) -> Address {
  let segments = raw.split('-').collect::<Vec<_>>();
  match segments.as_slice() {
    [building, unit, room, ..] => {
      Address::new(building, parse_unit(unit), room)
    }
    _ => {
      warn!(raw, "address has fewer than three dash-separated segments");
      Address::default()
    }
  }
}

fn decompose_dash_pair(raw: &str) -> Address {
  match raw.split_once('-') {
    Some((building, room)) => Address::new(building, 1, room),
    None => Address::default(),
  }
}

fn parse_unit(raw: &str) -> u32 {
  raw.trim().parse().unwrap_or_default()
}
