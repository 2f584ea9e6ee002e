use super::model::{Gender, ResidentRecord, TriState};

/// Binds one spreadsheet column to the record field it fills. `apply`
/// receives the trimmed cell text, which is empty when the row is too short.
pub struct ColumnBinding {
  pub column: usize,
  pub field:  &'static str,
  pub apply:  fn(&mut ResidentRecord, &str),
}

/// Column B (the address) is handled separately because merged cells and the
/// sheet's address variant both feed into it. Columns 26 and 27 are unused.
pub const RESIDENT_COLUMNS: &[ColumnBinding] = &[
  ColumnBinding {
    column: 2,
    field:  "name",
    apply:  |r, v| r.name = v.to_owned(),
  },
  ColumnBinding {
    column: 3,
    field:  "id_card",
    apply:  |r, v| r.id_card = v.to_owned(),
  },
  ColumnBinding {
    column: 4,
    field:  "age",
    apply:  |r, v| r.age = v.parse().ok(),
  },
  ColumnBinding {
    column: 5,
    field:  "gender",
    apply:  |r, v| r.gender = Gender::from_text(v),
  },
  ColumnBinding {
    column: 6,
    field:  "is_permanent",
    apply:  |r, v| r.is_permanent = TriState::from_text(v),
  },
  ColumnBinding {
    column: 7,
    field:  "housing_situation",
    apply:  |r, v| r.housing_situation = v.to_owned(),
  },
  ColumnBinding {
    column: 8,
    field:  "property_nature",
    apply:  |r, v| r.property_nature = v.to_owned(),
  },
  ColumnBinding {
    column: 9,
    field:  "registered_residence_type",
    apply:  |r, v| r.registered_residence_type = v.parse().unwrap_or_default(),
  },
  ColumnBinding {
    column: 10,
    field:  "registered_residence",
    apply:  |r, v| r.registered_residence = v.to_owned(),
  },
  ColumnBinding {
    column: 11,
    field:  "telephone",
    apply:  |r, v| r.telephone = v.to_owned(),
  },
  ColumnBinding {
    column: 12,
    field:  "first_contact",
    apply:  |r, v| r.first_contact = v.to_owned(),
  },
  ColumnBinding {
    column: 13,
    field:  "elder_relationship",
    apply:  |r, v| r.elder_relationship = v.to_owned(),
  },
  ColumnBinding {
    column: 14,
    field:  "elder_contact_phone",
    apply:  |r, v| r.elder_contact_phone = v.to_owned(),
  },
  ColumnBinding {
    column: 15,
    field:  "disability_level",
    apply:  |r, v| r.disability_level = v.to_owned(),
  },
  ColumnBinding {
    column: 16,
    field:  "is_low_income",
    apply:  |r, v| r.is_low_income = TriState::from_text(v),
  },
  ColumnBinding {
    column: 17,
    field:  "is_low_income2",
    apply:  |r, v| r.is_low_income2 = TriState::from_text(v),
  },
  ColumnBinding {
    column: 18,
    field:  "is_destitute",
    apply:  |r, v| r.is_destitute = TriState::from_text(v),
  },
  ColumnBinding {
    column: 19,
    field:  "is_family_planning_special",
    apply:  |r, v| r.is_family_planning_special = TriState::from_text(v),
  },
  ColumnBinding {
    column: 20,
    field:  "disability_category",
    apply:  |r, v| r.disability_category = v.to_owned(),
  },
  ColumnBinding {
    column: 21,
    field:  "is_living_alone",
    apply:  |r, v| r.is_living_alone = TriState::from_text(v),
  },
  ColumnBinding {
    column: 22,
    field:  "is_empty_nest",
    apply:  |r, v| r.is_empty_nest = TriState::from_text(v),
  },
  ColumnBinding {
    column: 23,
    field:  "is_orphaned",
    apply:  |r, v| r.is_orphaned = TriState::from_text(v),
  },
  ColumnBinding {
    column: 24,
    field:  "other_situation",
    apply:  |r, v| r.other_situation = v.to_owned(),
  },
  ColumnBinding {
    column: 25,
    field:  "is_needs_focus",
    apply:  |r, v| r.is_needs_focus = TriState::from_text(v),
  },
  ColumnBinding {
    column: 28,
    field:  "is_in_group",
    apply:  |r, v| r.is_in_group = TriState::from_text(v),
  },
  ColumnBinding {
    column: 29,
    field:  "is_private_message",
    apply:  |r, v| r.is_private_message = TriState::from_text(v),
  },
  ColumnBinding {
    column: 30,
    field:  "has_pet",
    apply:  |r, v| r.has_pet = TriState::from_text(v),
  },
  ColumnBinding {
    column: 31,
    field:  "last_contact_time",
    apply:  |r, v| r.last_contact_time = v.to_owned(),
  },
  ColumnBinding {
    column: 32,
    field:  "other_info",
    apply:  |r, v| r.other_info = v.to_owned(),
  },
];

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn each_column_is_bound_once() {
    let columns = RESIDENT_COLUMNS
      .iter()
      .map(|b| b.column)
      .collect::<HashSet<_>>();
    assert_eq!(columns.len(), RESIDENT_COLUMNS.len());
  }

  #[test]
  fn address_and_gap_columns_are_unbound() {
    for unbound in [0, 1, 26, 27] {
      assert!(
        RESIDENT_COLUMNS.iter().all(|b| b.column != unbound),
        "column {unbound} should not be bound"
      );
    }
  }

  #[test]
  fn yes_no_columns_share_one_rule() {
    let mut record = ResidentRecord::default();
    for binding in RESIDENT_COLUMNS {
      (binding.apply)(&mut record, "是");
    }
    let json = serde_json::to_value(&record).unwrap();
    let yes_fields = json
      .as_object()
      .unwrap()
      .iter()
      .filter(|(k, _)| k.starts_with("is_") || k.starts_with("has_"))
      .collect::<Vec<_>>();

    assert_eq!(yes_fields.len(), 12);
    assert!(yes_fields.iter().all(|(_, v)| **v == 1));
  }
}
