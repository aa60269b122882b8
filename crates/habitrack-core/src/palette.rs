//! Icon and color tokens offered by the habit picker.
//!
//! The store treats icons and colors as opaque strings. The palette only
//! matters when `palette.strict` is enabled in the config.

use serde::Serialize;

use crate::error::ValidationError;
use crate::habit::{DEFAULT_COLOR, DEFAULT_ICON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub icon: &'static str,
    pub color: &'static str,
    pub label: &'static str,
}

pub const DEFAULT_PALETTE: &[PaletteEntry] = &[
    PaletteEntry {
        icon: "fas fa-tint",
        color: "blue",
        label: "Water",
    },
    PaletteEntry {
        icon: "fas fa-book",
        color: "green",
        label: "Reading",
    },
    PaletteEntry {
        icon: "fas fa-dumbbell",
        color: "orange",
        label: "Exercise",
    },
    PaletteEntry {
        icon: "fas fa-moon",
        color: "purple",
        label: "Sleep",
    },
    PaletteEntry {
        icon: "fas fa-heart",
        color: "red",
        label: "Health",
    },
    PaletteEntry {
        icon: "fas fa-sun",
        color: "yellow",
        label: "Morning",
    },
    PaletteEntry {
        icon: "fas fa-coffee",
        color: "amber",
        label: "Coffee",
    },
    PaletteEntry {
        icon: "fas fa-music",
        color: "pink",
        label: "Music",
    },
    PaletteEntry {
        icon: "fas fa-camera",
        color: "indigo",
        label: "Photo",
    },
    PaletteEntry {
        icon: "fas fa-utensils",
        color: "emerald",
        label: "Food",
    },
];

pub fn is_known_icon(icon: &str) -> bool {
    icon == DEFAULT_ICON || DEFAULT_PALETTE.iter().any(|e| e.icon == icon)
}

pub fn is_known_color(color: &str) -> bool {
    color == DEFAULT_COLOR || DEFAULT_PALETTE.iter().any(|e| e.color == color)
}

/// Reject icon/color tokens outside the palette.
pub fn check(icon: Option<&str>, color: Option<&str>) -> Result<(), ValidationError> {
    if let Some(icon) = icon.filter(|i| !is_known_icon(i)) {
        return Err(ValidationError::InvalidValue {
            field: "icon".into(),
            message: format!("'{icon}' is not in the palette"),
        });
    }
    if let Some(color) = color.filter(|c| !is_known_color(c)) {
        return Err(ValidationError::InvalidValue {
            field: "color".into(),
            message: format!("'{color}' is not in the palette"),
        });
    }
    Ok(())
}
