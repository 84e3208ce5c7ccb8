//! Client-side gate applied to a [`GameDraft`] before anything reaches the network.
//!
//! Each field carries a fixed rule list. When a field breaks several rules at once
//! the reported message follows the priority required > max-length > min > max.

use std::collections::BTreeMap;

use crate::draft::GameDraft;

pub const TITLE_MAX_LENGTH: usize = 200;
pub const PUBLISHER_MAX_LENGTH: usize = 100;
pub const DEVELOPER_MAX_LENGTH: usize = 100;
pub const DESCRIPTION_MAX_LENGTH: usize = 2000;
pub const COVER_IMAGE_URL_MAX_LENGTH: usize = 500;
pub const PRICE_MIN: f64 = 0.0;
pub const PRICE_MAX: f64 = 999.99;
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Publisher,
    Developer,
    ReleaseDate,
    Genre,
    Price,
    Description,
    Rating,
    CoverImageUrl,
    IsActive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    MaxLength(usize),
    Min(f64),
    Max(f64),
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Title,
        Field::Publisher,
        Field::Developer,
        Field::ReleaseDate,
        Field::Genre,
        Field::Price,
        Field::Description,
        Field::Rating,
        Field::CoverImageUrl,
        Field::IsActive,
    ];

    /// Wire/form name, also used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Publisher => "publisher",
            Field::Developer => "developer",
            Field::ReleaseDate => "releaseDate",
            Field::Genre => "genre",
            Field::Price => "price",
            Field::Description => "description",
            Field::Rating => "rating",
            Field::CoverImageUrl => "coverImageUrl",
            Field::IsActive => "isActive",
        }
    }

    pub fn rules(self) -> &'static [Rule] {
        match self {
            Field::Title => &[Rule::Required, Rule::MaxLength(TITLE_MAX_LENGTH)],
            Field::Publisher => &[Rule::Required, Rule::MaxLength(PUBLISHER_MAX_LENGTH)],
            Field::Developer => &[Rule::Required, Rule::MaxLength(DEVELOPER_MAX_LENGTH)],
            Field::ReleaseDate | Field::Genre => &[Rule::Required],
            Field::Price => &[Rule::Required, Rule::Min(PRICE_MIN), Rule::Max(PRICE_MAX)],
            Field::Description => &[Rule::MaxLength(DESCRIPTION_MAX_LENGTH)],
            Field::Rating => &[Rule::Required, Rule::Min(RATING_MIN), Rule::Max(RATING_MAX)],
            Field::CoverImageUrl => &[Rule::MaxLength(COVER_IMAGE_URL_MAX_LENGTH)],
            Field::IsActive => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Violation {
    Required,
    MaxLength { max: usize, actual: usize },
    Min { min: f64, actual: f64 },
    Max { max: f64, actual: f64 },
    /// Calendar triple that names no real day.
    InvalidDate,
}

impl Violation {
    fn priority(&self) -> u8 {
        match self {
            Violation::Required => 0,
            Violation::MaxLength { .. } => 1,
            Violation::Min { .. } => 2,
            Violation::Max { .. } => 3,
            Violation::InvalidDate => 4,
        }
    }

    pub fn message(&self, field: Field) -> String {
        let name = field.name();
        match self {
            Violation::Required => format!("{name} is required"),
            Violation::MaxLength { .. } => format!("{name} is too long"),
            Violation::Min { min, .. } => format!("{name} must be at least {min}"),
            Violation::Max { max, .. } => format!("{name} must be at most {max}"),
            Violation::InvalidDate => "Invalid value".to_string(),
        }
    }
}

enum FieldValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
    Date(Option<crate::draft::DatePickerValue>),
    Choice(bool),
    Flag,
}

fn field_value(draft: &GameDraft, field: Field) -> FieldValue<'_> {
    match field {
        Field::Title => FieldValue::Text(&draft.title),
        Field::Publisher => FieldValue::Text(&draft.publisher),
        Field::Developer => FieldValue::Text(&draft.developer),
        Field::ReleaseDate => FieldValue::Date(draft.release_date),
        Field::Genre => FieldValue::Choice(draft.genre.is_some()),
        Field::Price => FieldValue::Number(draft.price),
        Field::Description => FieldValue::Text(&draft.description),
        Field::Rating => FieldValue::Number(draft.rating.map(|r| r as f64)),
        Field::CoverImageUrl => FieldValue::Text(&draft.cover_image_url),
        Field::IsActive => FieldValue::Flag,
    }
}

fn is_missing(value: &FieldValue<'_>) -> bool {
    match value {
        FieldValue::Text(text) => text.is_empty(),
        FieldValue::Number(number) => number.map_or(true, f64::is_nan),
        FieldValue::Date(date) => date.is_none(),
        FieldValue::Choice(present) => !present,
        FieldValue::Flag => false,
    }
}

/// Every rule the field currently breaks, in rule order.
pub fn validate_field(draft: &GameDraft, field: Field) -> Vec<Violation> {
    let value = field_value(draft, field);
    let mut violations = Vec::new();
    for rule in field.rules() {
        match (*rule, &value) {
            (Rule::Required, value) if is_missing(value) => violations.push(Violation::Required),
            (Rule::MaxLength(max), FieldValue::Text(text)) => {
                let actual = text.chars().count();
                if actual > max {
                    violations.push(Violation::MaxLength { max, actual });
                }
            }
            (Rule::Min(min), FieldValue::Number(Some(actual))) if *actual < min => {
                violations.push(Violation::Min {
                    min,
                    actual: *actual,
                });
            }
            (Rule::Max(max), FieldValue::Number(Some(actual))) if *actual > max => {
                violations.push(Violation::Max {
                    max,
                    actual: *actual,
                });
            }
            _ => {}
        }
    }
    if let FieldValue::Date(Some(date)) = value {
        if date.to_date().is_none() {
            violations.push(Violation::InvalidDate);
        }
    }
    violations
}

/// Message for the highest-priority violation, if any.
pub fn field_error(field: Field, violations: &[Violation]) -> Option<String> {
    violations
        .iter()
        .min_by_key(|v| v.priority())
        .map(|v| v.message(field))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    violations: BTreeMap<Field, Vec<Violation>>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self, field: Field) -> &[Violation] {
        self.violations.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.violations.keys().copied()
    }

    pub fn error_message(&self, field: Field) -> Option<String> {
        field_error(field, self.violations(field))
    }

    /// `(field, message)` for every invalid field, in form order.
    pub fn messages(&self) -> Vec<(Field, String)> {
        self.invalid_fields()
            .filter_map(|field| self.error_message(field).map(|msg| (field, msg)))
            .collect()
    }
}

pub fn validate(draft: &GameDraft) -> ValidationReport {
    let violations = Field::ALL
        .iter()
        .filter_map(|field| {
            let found = validate_field(draft, *field);
            (!found.is_empty()).then_some((*field, found))
        })
        .collect();
    ValidationReport { violations }
}
