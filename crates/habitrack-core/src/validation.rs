//! Input validation that runs before anything reaches the store.
//!
//! The store assumes well-formed calendar dates and positive ids; these
//! helpers turn raw CLI/API strings into those types and normalize habit
//! input (trimmed names, blank descriptions dropped). With a strict palette
//! the normalized icon and color must also be palette tokens.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::habit::{HabitPatch, NewHabit};
use crate::palette;

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate {
        value: value.to_string(),
    };
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

/// Parse a `YYYY-MM` month into `(year, month)`.
pub fn parse_month(value: &str) -> Result<(i32, u32), ValidationError> {
    let invalid = || ValidationError::InvalidValue {
        field: "month".into(),
        message: format!("'{value}' is not a YYYY-MM month"),
    };
    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month.len() != 2 {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Parse a positive integer habit id.
pub fn parse_habit_id(value: &str) -> Result<i64, ValidationError> {
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidId {
            value: value.to_string(),
        }),
    }
}

fn normalize_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

fn require_token(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: "must not be empty".into(),
        });
    }
    Ok(trimmed.to_string())
}

impl NewHabit {
    /// Check and normalize create input.
    pub fn validate(self) -> Result<NewHabit, ValidationError> {
        self.validate_with(false)
    }

    /// [`validate`](Self::validate), additionally requiring palette tokens
    /// when `strict_palette` is set.
    pub fn validate_with(self, strict_palette: bool) -> Result<NewHabit, ValidationError> {
        let habit = NewHabit {
            name: normalize_name(&self.name)?,
            description: normalize_description(self.description),
            icon: self.icon.map(|i| require_token("icon", i)).transpose()?,
            color: self.color.map(|c| require_token("color", c)).transpose()?,
        };
        if strict_palette {
            palette::check(habit.icon.as_deref(), habit.color.as_deref())?;
        }
        Ok(habit)
    }
}

impl HabitPatch {
    /// Check and normalize update input. An empty patch is valid.
    pub fn validate(self) -> Result<HabitPatch, ValidationError> {
        self.validate_with(false)
    }

    pub fn validate_with(self, strict_palette: bool) -> Result<HabitPatch, ValidationError> {
        let patch = HabitPatch {
            name: self.name.as_deref().map(normalize_name).transpose()?,
            description: self.description.map(normalize_description),
            icon: self.icon.map(|i| require_token("icon", i)).transpose()?,
            color: self.color.map(|c| require_token("color", c)).transpose()?,
        };
        if strict_palette {
            palette::check(patch.icon.as_deref(), patch.color.as_deref())?;
        }
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn parse_date_rejects_malformed_input() {
        for bad in [
            "2024-2-29",
            "2023-02-29",
            "20240229",
            "yesterday",
            "",
            "2024-02-29T00:00",
        ] {
            assert!(parse_date(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn parse_habit_id_requires_positive_integer() {
        assert_eq!(parse_habit_id("12").unwrap(), 12);
        assert!(parse_habit_id("0").is_err());
        assert!(parse_habit_id("-3").is_err());
        assert!(parse_habit_id("abc").is_err());
    }

    #[test]
    fn parse_month_bounds() {
        assert_eq!(parse_month("2024-07").unwrap(), (2024, 7));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024-7").is_err());
        assert!(parse_month("July").is_err());
    }

    #[test]
    fn new_habit_name_is_trimmed() {
        let habit = NewHabit::new("  Drink water ").validate().unwrap();
        assert_eq!(habit.name, "Drink water");
    }

    #[test]
    fn new_habit_rejects_blank_name() {
        assert_eq!(
            NewHabit::new("   ").validate().unwrap_err(),
            ValidationError::EmptyName
        );
    }

    #[test]
    fn blank_description_is_dropped() {
        let habit = NewHabit::new("Read")
            .with_description("  ")
            .validate()
            .unwrap();
        assert!(habit.description.is_none());
    }

    #[test]
    fn empty_icon_is_rejected() {
        assert!(NewHabit::new("Read").with_icon("").validate().is_err());
    }

    #[test]
    fn patch_with_blank_name_is_rejected() {
        let patch = HabitPatch {
            name: Some(" ".into()),
            ..HabitPatch::default()
        };
        assert_eq!(patch.validate().unwrap_err(), ValidationError::EmptyName);
    }

    #[test]
    fn strict_palette_checks_trimmed_tokens() {
        let habit = NewHabit::new("Read")
            .with_icon(" fas fa-book ")
            .with_color("green")
            .validate_with(true)
            .unwrap();
        assert_eq!(habit.icon.as_deref(), Some("fas fa-book"));

        let err = NewHabit::new("Read")
            .with_color("chartreuse")
            .validate_with(true)
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "color"));

        assert!(NewHabit::new("Read")
            .with_color("chartreuse")
            .validate()
            .is_ok());
    }

    #[test]
    fn strict_palette_applies_to_patches() {
        let patch = HabitPatch {
            icon: Some("fas fa-rocket".into()),
            ..HabitPatch::default()
        };
        assert!(patch.clone().validate_with(true).is_err());
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn empty_patch_is_valid() {
        assert!(HabitPatch::default().validate().unwrap().is_empty());
    }
}
