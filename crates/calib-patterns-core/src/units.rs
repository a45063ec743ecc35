//! Physical-unit conversion for pattern sizing.
//!
//! Print and screen media both reduce to the same [`RasterParams`] triple:
//! canvas size in pixels plus a pixel density. The rasterizer consumes that
//! triple without knowing which medium produced it.

use serde::{Deserialize, Serialize};

/// Millimeters per inch, the bridge between metric sizes and DPI/PPI.
pub const MM_PER_INCH: f64 = 25.4;

/// Default print density in dots per inch.
pub const DEFAULT_PRINT_DPI: f64 = 300.0;

/// Unit-conversion validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("{quantity} must be positive and finite, got {value}")]
    InvalidDimension { quantity: &'static str, value: f64 },
}

/// Pixel-space sizing derived from a [`Medium`].
///
/// `density` is DPI for print media and PPI for screen media; downstream
/// code never needs to distinguish the two.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterParams {
    pub width_px: u32,
    pub height_px: u32,
    pub density: f64,
}

/// Target medium for a generated pattern.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "medium", rename_all = "lowercase")]
pub enum Medium {
    /// Physical sheet sized in millimeters, rasterized at `dpi`.
    Print {
        sheet_width_mm: f64,
        sheet_height_mm: f64,
        #[serde(default = "default_print_dpi")]
        dpi: f64,
    },
    /// Screen with a native resolution and a diagonal size in inches.
    Screen {
        width_px: u32,
        height_px: u32,
        diagonal_in: f64,
    },
}

fn default_print_dpi() -> f64 {
    DEFAULT_PRINT_DPI
}

impl Medium {
    /// Convert this medium into pixel-space raster parameters.
    pub fn raster_params(&self) -> Result<RasterParams, ConvertError> {
        match *self {
            Medium::Print {
                sheet_width_mm,
                sheet_height_mm,
                dpi,
            } => convert_for_print_at(sheet_width_mm, sheet_height_mm, dpi),
            Medium::Screen {
                width_px,
                height_px,
                diagonal_in,
            } => convert_for_screen(width_px, height_px, diagonal_in),
        }
    }

    /// Token used in artifact file names.
    #[inline]
    pub fn as_token(&self) -> &'static str {
        match self {
            Medium::Print { .. } => "print",
            Medium::Screen { .. } => "screen",
        }
    }
}

fn ensure_positive(quantity: &'static str, value: f64) -> Result<(), ConvertError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConvertError::InvalidDimension { quantity, value });
    }
    Ok(())
}

/// Raster parameters for a physical sheet at the default print density.
///
/// Pixel dimensions follow `round(mm / 25.4 * dpi)`.
pub fn convert_for_print(
    sheet_width_mm: f64,
    sheet_height_mm: f64,
) -> Result<RasterParams, ConvertError> {
    convert_for_print_at(sheet_width_mm, sheet_height_mm, DEFAULT_PRINT_DPI)
}

/// Raster parameters for a physical sheet at a caller-chosen print density.
pub fn convert_for_print_at(
    sheet_width_mm: f64,
    sheet_height_mm: f64,
    dpi: f64,
) -> Result<RasterParams, ConvertError> {
    ensure_positive("sheet width", sheet_width_mm)?;
    ensure_positive("sheet height", sheet_height_mm)?;
    ensure_positive("dpi", dpi)?;

    Ok(RasterParams {
        width_px: (sheet_width_mm / MM_PER_INCH * dpi).round() as u32,
        height_px: (sheet_height_mm / MM_PER_INCH * dpi).round() as u32,
        density: dpi,
    })
}

/// Raster parameters for a screen with a known resolution and diagonal.
///
/// The canvas keeps the native resolution; the density is the diagonal pixel
/// count divided by the diagonal length in inches.
pub fn convert_for_screen(
    width_px: u32,
    height_px: u32,
    diagonal_in: f64,
) -> Result<RasterParams, ConvertError> {
    ensure_positive("screen width", f64::from(width_px))?;
    ensure_positive("screen height", f64::from(height_px))?;
    ensure_positive("screen diagonal", diagonal_in)?;

    let ppi = f64::from(width_px).hypot(f64::from(height_px)) / diagonal_in;
    Ok(RasterParams {
        width_px,
        height_px,
        density: ppi,
    })
}
