use serde::Serialize;

/// Yes/no answer that may be missing. Serialized as `0`, `1` or `2`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum TriState {
  #[default]
  Unknown,
  Yes,
  No,
}

impl TriState {
  /// `"是"` is yes, `"否"` is no, anything else is unknown.
  pub fn from_text(text: &str) -> Self {
    match text.trim() {
      "是" => TriState::Yes,
      "否" => TriState::No,
      _ => TriState::Unknown,
    }
  }

  pub fn code(self) -> u8 {
    match self {
      TriState::Unknown => 0,
      TriState::Yes => 1,
      TriState::No => 2,
    }
  }
}

impl From<TriState> for u8 {
  fn from(value: TriState) -> Self {
    value.code()
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum Gender {
  #[default]
  Unknown,
  Male,
  Female,
}

impl Gender {
  pub fn from_text(text: &str) -> Self {
    match text.trim() {
      "男" => Gender::Male,
      "女" => Gender::Female,
      _ => Gender::Unknown,
    }
  }

  pub fn code(self) -> u8 {
    match self {
      Gender::Unknown => 0,
      Gender::Male => 1,
      Gender::Female => 2,
    }
  }
}

impl From<Gender> for u8 {
  fn from(value: Gender) -> Self {
    value.code()
  }
}

/// One resident, as read from one spreadsheet row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResidentRecord {
  pub sheet: String,
  /// 1-based spreadsheet row number.
  pub row:   u32,

  pub building_number: String,
  pub unit_number:     u32,
  pub room_number:     String,
  pub name:            String,
  pub id_card:         String,
  pub age:             Option<u32>,
  pub gender:          Gender,
  pub is_permanent:    TriState,

  pub housing_situation:         String,
  pub property_nature:           String,
  /// 0 unknown, 1 local, 2 elsewhere in the city, 3 out of town.
  pub registered_residence_type: u8,
  pub registered_residence:      String,
  pub telephone:                 String,
  pub first_contact:             String,
  pub elder_relationship:        String,
  pub elder_contact_phone:       String,
  pub disability_level:          String,

  pub is_low_income:              TriState,
  pub is_low_income2:             TriState,
  pub is_destitute:               TriState,
  pub is_family_planning_special: TriState,
  pub disability_category:        String,
  pub is_living_alone:            TriState,
  pub is_empty_nest:              TriState,
  pub is_orphaned:                TriState,
  pub other_situation:            String,
  pub is_needs_focus:             TriState,
  pub is_in_group:                TriState,
  pub is_private_message:         TriState,
  pub has_pet:                    TriState,

  pub last_contact_time: String,
  pub other_info:        String,
}
