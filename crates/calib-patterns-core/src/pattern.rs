//! Pattern specification and rasterization.
//!
//! A validated [`PatternSpec`] plus the pixel-space [`RasterParams`] turn
//! into a grayscale canvas with the pattern centered on it. Rendering is
//! total: degenerate grids yield a blank canvas and oversized patterns clip
//! at the canvas borders instead of failing.

use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::canvas::GrayCanvas;
use crate::units::{RasterParams, MM_PER_INCH};

/// Supported calibration-pattern families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Alternating filled squares. `cols`/`rows` are **inner corner counts**
    /// (not square counts), so the rendered cell grid is
    /// `(cols + 1) x (rows + 1)`.
    Chessboard,
    /// Symmetric grid of filled circles, one per grid point.
    CircleGrid,
    /// Circle grid with odd columns shifted down by one grid step; rows are
    /// spaced two steps apart, doubling the vertical extent.
    AsymCircleGrid,
}

impl PatternKind {
    /// Token used in CLI arguments and artifact file names.
    #[inline]
    pub fn as_token(&self) -> &'static str {
        match self {
            PatternKind::Chessboard => "chessboard",
            PatternKind::CircleGrid => "circlegrid",
            PatternKind::AsymCircleGrid => "asymcirclegrid",
        }
    }
}

/// Unrecognized pattern-type token.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown pattern type {token:?}, expected chessboard, circlegrid or asymcirclegrid")]
pub struct UnknownPatternKind {
    pub token: String,
}

impl FromStr for PatternKind {
    type Err = UnknownPatternKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chessboard" => Ok(PatternKind::Chessboard),
            "circlegrid" => Ok(PatternKind::CircleGrid),
            "asymcirclegrid" => Ok(PatternKind::AsymCircleGrid),
            _ => Err(UnknownPatternKind {
                token: s.to_string(),
            }),
        }
    }
}

/// Static pattern specification in physical units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub kind: PatternKind,
    pub cols: u32,
    pub rows: u32,
    /// Distance between adjacent grid features in millimeters.
    pub grid_size_mm: f64,
    /// Square side or circle diameter in millimeters.
    pub shape_size_mm: f64,
}

/// Pattern specification validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    #[error("{quantity} must be positive and finite, got {value}")]
    InvalidDimension { quantity: &'static str, value: f64 },
}

impl PatternSpec {
    /// Check the pattern invariants: at least one column and row, positive
    /// and finite physical sizes.
    pub fn validate(&self) -> Result<(), PatternError> {
        if self.cols < 1 {
            return Err(PatternError::InvalidDimension {
                quantity: "pattern columns",
                value: f64::from(self.cols),
            });
        }
        if self.rows < 1 {
            return Err(PatternError::InvalidDimension {
                quantity: "pattern rows",
                value: f64::from(self.rows),
            });
        }
        if !self.grid_size_mm.is_finite() || self.grid_size_mm <= 0.0 {
            return Err(PatternError::InvalidDimension {
                quantity: "grid size",
                value: self.grid_size_mm,
            });
        }
        if !self.shape_size_mm.is_finite() || self.shape_size_mm <= 0.0 {
            return Err(PatternError::InvalidDimension {
                quantity: "shape size",
                value: self.shape_size_mm,
            });
        }
        Ok(())
    }
}

/// Rendering switches that do not affect the grid geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Stroke a 1-px outline around the pattern extent as a cutting aid.
    pub frame: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { frame: true }
    }
}

/// Pixel-space grid layout derived from a spec and raster parameters.
#[derive(Clone, Copy, Debug)]
struct GridGeometry {
    /// Grid step in pixels.
    step: i64,
    /// Circle radius in pixels, unused by chessboards.
    radius: i64,
    /// Feature loop bounds; chessboards iterate one extra cell per axis.
    loop_cols: i64,
    loop_rows: i64,
    /// Pattern extent in pixels.
    extent_w: i64,
    extent_h: i64,
    /// Centering offsets, negative when the pattern exceeds the canvas.
    ox: i64,
    oy: i64,
}

impl GridGeometry {
    fn derive(spec: &PatternSpec, raster: &RasterParams) -> Self {
        let px_per_mm = raster.density / MM_PER_INCH;
        let step = (px_per_mm * spec.grid_size_mm).round() as i64;
        let radius = (px_per_mm * spec.shape_size_mm * 0.5).round() as i64;

        let (loop_cols, loop_rows) = match spec.kind {
            PatternKind::Chessboard => (i64::from(spec.cols) + 1, i64::from(spec.rows) + 1),
            PatternKind::CircleGrid | PatternKind::AsymCircleGrid => {
                (i64::from(spec.cols), i64::from(spec.rows))
            }
        };

        let extent_w = step.saturating_mul(loop_cols);
        let mut extent_h = step.saturating_mul(loop_rows);
        if spec.kind == PatternKind::AsymCircleGrid {
            extent_h = extent_h.saturating_mul(2);
        }

        let ox = ((f64::from(raster.width_px) - extent_w as f64) / 2.0).round() as i64;
        let oy = ((f64::from(raster.height_px) - extent_h as f64) / 2.0).round() as i64;

        Self {
            step,
            radius,
            loop_cols,
            loop_rows,
            extent_w,
            extent_h,
            ox,
            oy,
        }
    }

    // Feature coordinates saturate; anything past the i64 range is far
    // off-canvas and the primitives clip it.
    fn feature_x(&self, i: i64) -> i64 {
        self.ox.saturating_add(i.saturating_mul(self.step))
    }

    fn feature_y(&self, row: i64) -> i64 {
        self.oy.saturating_add(row.saturating_mul(self.step))
    }

    fn center_x(&self, i: i64) -> i64 {
        self.feature_x(i).saturating_add(self.radius)
    }

    fn center_y(&self, row: i64) -> i64 {
        self.feature_y(row).saturating_add(self.radius)
    }
}

/// Render a pattern with default options.
pub fn render(spec: &PatternSpec, raster: &RasterParams) -> GrayCanvas {
    render_with(spec, raster, &RenderOptions::default())
}

/// Render a pattern onto a fresh white canvas.
///
/// The pattern is centered on the canvas; any part that does not fit is
/// clipped. A grid with zero columns or rows renders as plain white.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
pub fn render_with(
    spec: &PatternSpec,
    raster: &RasterParams,
    options: &RenderOptions,
) -> GrayCanvas {
    let mut canvas = GrayCanvas::white(raster.width_px as usize, raster.height_px as usize);
    if spec.cols == 0 || spec.rows == 0 {
        return canvas;
    }

    let geom = GridGeometry::derive(spec, raster);
    debug!(
        "pattern {} {}x{}: step {}px radius {}px extent {}x{}px offset ({}, {})",
        spec.kind.as_token(),
        spec.cols,
        spec.rows,
        geom.step,
        geom.radius,
        geom.extent_w,
        geom.extent_h,
        geom.ox,
        geom.oy
    );

    if options.frame {
        canvas.stroke_rect(
            geom.ox,
            geom.oy,
            geom.ox.saturating_add(geom.extent_w),
            geom.oy.saturating_add(geom.extent_h),
            0,
        );
    }

    // Chessboard parity uses the *requested* column count, matching the
    // convention that a cols x rows board is identified by its inner corners.
    // Wrapping arithmetic preserves the parity for any grid size.
    let parity_stride = i64::from(spec.cols);

    for i in 0..geom.loop_cols {
        for j in 0..geom.loop_rows {
            match spec.kind {
                PatternKind::Chessboard => {
                    if i.wrapping_mul(parity_stride).wrapping_add(j) % 2 == 0 {
                        canvas.fill_rect(
                            geom.feature_x(i),
                            geom.feature_y(j),
                            geom.step,
                            geom.step,
                            0,
                        );
                    }
                }
                PatternKind::CircleGrid => {
                    canvas.fill_disc(geom.center_x(i), geom.center_y(j), geom.radius, 0);
                }
                PatternKind::AsymCircleGrid => {
                    canvas.fill_disc(geom.center_x(i), geom.center_y(2 * j + i % 2), geom.radius, 0);
                }
            }
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_count(canvas: &GrayCanvas) -> usize {
        canvas.data.iter().filter(|&&v| v == 0).count()
    }

    // density 50.8 ppi makes 1 mm exactly 2 px, so 5 mm features are 10 px.
    fn raster(width_px: u32, height_px: u32) -> RasterParams {
        RasterParams {
            width_px,
            height_px,
            density: 50.8,
        }
    }

    fn spec(kind: PatternKind, cols: u32, rows: u32) -> PatternSpec {
        PatternSpec {
            kind,
            cols,
            rows,
            grid_size_mm: 5.0,
            shape_size_mm: 5.0,
        }
    }

    fn no_frame() -> RenderOptions {
        RenderOptions { frame: false }
    }

    #[test]
    fn chessboard_parity_follows_the_requested_column_count() {
        // 2x2 inner corners -> 3x3 cells; stride 2 keeps only even rows.
        let canvas = render_with(
            &spec(PatternKind::Chessboard, 2, 2),
            &raster(200, 200),
            &no_frame(),
        );
        assert_eq!(black_count(&canvas), 6 * 10 * 10);

        let (ox, oy) = (85, 85);
        assert_eq!(canvas.pixel(ox + 5, oy + 5), Some(0));
        assert_eq!(canvas.pixel(ox + 15, oy + 5), Some(0));
        assert_eq!(canvas.pixel(ox + 5, oy + 15), Some(255));
        assert_eq!(canvas.pixel(ox + 15, oy + 15), Some(255));
        assert_eq!(canvas.pixel(ox + 5, oy + 25), Some(0));
    }

    #[test]
    fn chessboard_9x6_alternates_like_a_checkerboard() {
        // Odd stride -> true alternation over the 10x7 cell grid.
        let canvas = render_with(
            &spec(PatternKind::Chessboard, 9, 6),
            &raster(200, 200),
            &no_frame(),
        );
        assert_eq!(black_count(&canvas), 35 * 10 * 10);

        let (ox, oy) = (50, 65);
        assert_eq!(canvas.pixel(ox + 5, oy + 5), Some(0));
        assert_eq!(canvas.pixel(ox + 15, oy + 5), Some(255));
        assert_eq!(canvas.pixel(ox + 5, oy + 15), Some(255));
        assert_eq!(canvas.pixel(ox + 15, oy + 15), Some(0));
    }

    #[test]
    fn chessboard_extent_covers_one_extra_cell_per_axis() {
        // 9x6 inner corners at 10 px per cell span 100x70 px; the frame
        // outline lands on that extent.
        let canvas = render(&spec(PatternKind::Chessboard, 9, 6), &raster(200, 200));
        assert_eq!(canvas.pixel(50, 65), Some(0));
        assert_eq!(canvas.pixel(150, 135), Some(0));
        assert_eq!(canvas.pixel(49, 65), Some(255));
        assert_eq!(canvas.pixel(151, 136), Some(255));
    }

    #[test]
    fn symmetric_circle_grid_fills_every_grid_point() {
        let mut pattern = spec(PatternKind::CircleGrid, 3, 2);
        pattern.grid_size_mm = 10.0; // 20 px step, 5 px radius
        let canvas = render_with(&pattern, &raster(200, 200), &no_frame());

        // 81 px per radius-5 disc.
        assert_eq!(black_count(&canvas), 6 * 81);
        let (ox, oy) = (70, 80);
        for i in 0..3i64 {
            for j in 0..2i64 {
                assert_eq!(canvas.pixel(ox + 5 + 20 * i, oy + 5 + 20 * j), Some(0));
            }
        }
        assert_eq!(canvas.pixel(ox + 15, oy + 5), Some(255));
    }

    #[test]
    fn asym_circle_grid_staggers_odd_columns_and_doubles_the_height() {
        let canvas = render(&spec(PatternKind::AsymCircleGrid, 3, 2), &raster(100, 100));

        // Extent 30x40 px on a 100x100 canvas -> offsets (35, 30).
        let (ox, oy) = (35, 30);
        for (i, j) in [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)] {
            let cx = ox + 5 + 10 * i;
            let cy = oy + 5 + (2 * j + i % 2) * 10;
            assert_eq!(canvas.pixel(cx, cy), Some(0), "center ({i}, {j})");
        }
        // Midway between two circles of an even column stays white.
        assert_eq!(canvas.pixel(ox + 5, oy + 15), Some(255));
    }

    #[test]
    fn frame_outlines_the_pattern_extent() {
        let pattern = spec(PatternKind::CircleGrid, 2, 2);
        let raster = raster(100, 100);

        let framed = render(&pattern, &raster);
        assert_eq!(framed.pixel(40, 40), Some(0));
        assert_eq!(framed.pixel(60, 60), Some(0));

        let bare = render_with(&pattern, &raster, &no_frame());
        assert_eq!(bare.pixel(40, 40), Some(255));
        assert_eq!(bare.pixel(60, 60), Some(255));
    }

    #[test]
    fn degenerate_grid_renders_blank() {
        let mut pattern = spec(PatternKind::Chessboard, 0, 6);
        let canvas = render(&pattern, &raster(64, 48));
        assert_eq!(black_count(&canvas), 0);

        pattern = spec(PatternKind::AsymCircleGrid, 4, 0);
        let canvas = render(&pattern, &raster(64, 48));
        assert_eq!(black_count(&canvas), 0);
    }

    #[test]
    fn oversized_pattern_clips_at_the_canvas_borders() {
        let canvas = render_with(
            &spec(PatternKind::Chessboard, 9, 6),
            &raster(50, 50),
            &no_frame(),
        );
        let black = black_count(&canvas);
        assert!(black > 0);
        assert!(black < 50 * 50);
    }

    #[test]
    fn extreme_physical_sizes_stay_clipped() {
        // Center sits about one radius past both axes, so the disc misses
        // the canvas entirely.
        let mut pattern = spec(PatternKind::CircleGrid, 1, 1);
        pattern.shape_size_mm = 1e10;
        let canvas = render_with(&pattern, &raster(100, 100), &no_frame());
        assert_eq!(black_count(&canvas), 0);

        // A grid step so large the extent saturates: the canvas lands inside
        // a single black cell of the centered grid.
        let mut pattern = spec(PatternKind::Chessboard, 9, 6);
        pattern.grid_size_mm = 1e18;
        let canvas = render_with(&pattern, &raster(100, 100), &no_frame());
        assert_eq!(black_count(&canvas), 100 * 100);
    }

    #[test]
    fn rendering_is_pure_and_repeatable() {
        let pattern = spec(PatternKind::AsymCircleGrid, 4, 11);
        let raster = raster(640, 480);
        assert_eq!(render(&pattern, &raster), render(&pattern, &raster));
    }

    #[test]
    fn spec_validation_rejects_bad_dimensions() {
        assert!(spec(PatternKind::Chessboard, 9, 6).validate().is_ok());

        let err = spec(PatternKind::Chessboard, 0, 6).validate().unwrap_err();
        assert_eq!(
            err,
            PatternError::InvalidDimension {
                quantity: "pattern columns",
                value: 0.0
            }
        );
        assert!(spec(PatternKind::CircleGrid, 9, 0).validate().is_err());

        let mut bad = spec(PatternKind::CircleGrid, 9, 6);
        bad.grid_size_mm = 0.0;
        assert!(bad.validate().is_err());

        bad = spec(PatternKind::CircleGrid, 9, 6);
        bad.shape_size_mm = f64::NAN;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn pattern_kind_tokens_round_trip() {
        for kind in [
            PatternKind::Chessboard,
            PatternKind::CircleGrid,
            PatternKind::AsymCircleGrid,
        ] {
            assert_eq!(kind.as_token().parse::<PatternKind>(), Ok(kind));
            let json = serde_json::to_string(&kind).expect("serialize");
            assert_eq!(json, format!("{:?}", kind.as_token()));
            assert_eq!(
                serde_json::from_str::<PatternKind>(&json).expect("parse"),
                kind
            );
        }

        let err = "hexgrid".parse::<PatternKind>().unwrap_err();
        assert_eq!(err.token, "hexgrid");
    }
}
