//! Deterministic artifact naming.
//!
//! The stem is `{kind}_{cols}x{rows}_{medium}_{width}_{height}` where width
//! and height are the medium's physical dimensions: millimeters for print
//! sheets, pixels for screens. The same request always produces the same
//! file name.

use calib_patterns_core::{Medium, PatternSpec};

/// File stem identifying a pattern/medium combination.
pub fn artifact_stem(pattern: &PatternSpec, medium: &Medium) -> String {
    let (width, height) = match medium {
        Medium::Print {
            sheet_width_mm,
            sheet_height_mm,
            ..
        } => (format!("{sheet_width_mm}"), format!("{sheet_height_mm}")),
        Medium::Screen {
            width_px,
            height_px,
            ..
        } => (width_px.to_string(), height_px.to_string()),
    };

    format!(
        "{}_{}x{}_{}_{}_{}",
        pattern.kind.as_token(),
        pattern.cols,
        pattern.rows,
        medium.as_token(),
        width,
        height
    )
}

/// Artifact stem with the `.png` extension appended.
///
/// The stem may contain dots (fractional sheet sizes), so the extension is
/// appended rather than set through `Path::with_extension`.
pub fn artifact_file_name(pattern: &PatternSpec, medium: &Medium) -> String {
    format!("{}.png", artifact_stem(pattern, medium))
}
