//! Shared color constants for the UI.

use egui::Color32;
use safari_business::data_table::Tone;

/// Forest green color for active/confirmed/success status.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red color for error/cancelled/failed status.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber color for pending status.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

pub const COLOR_BLUE: Color32 = Color32::from_rgb(13, 110, 253);

pub fn tone_color(tone: Tone) -> Color32 {
    match tone {
        Tone::Success => COLOR_GREEN,
        Tone::Danger => COLOR_RED,
        Tone::Warning => COLOR_AMBER,
        Tone::Info => COLOR_BLUE,
        Tone::Neutral => Color32::GRAY,
    }
}
