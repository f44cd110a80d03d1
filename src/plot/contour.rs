use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::prelude::*;

use super::{CONTOUR_DIR, resolve_output_dir, sanitize_file_name};
use crate::color;
use crate::data::loader::load_line_table;
use crate::data::model::{Field, GridSpec, LINESLIST_COLUMN, LevelSpec};
use crate::data::transform::{coerce_numeric, fold_onto_grid, log_equivalent_width};
use crate::error::PlotError;

/// 8 x 6 in at 300 dpi.
const PLOT_SIZE: (u32, u32) = (2400, 1800);

/// Minimum squared point distance for two segment endpoints to be considered
/// the same vertex when chaining segments into polylines.
const JOIN_EPS_SQ: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Stage entry point
// ---------------------------------------------------------------------------

/// Everything the EW contour stage needs.
#[derive(Debug, Clone)]
pub struct ContourConfig {
    pub file_path: PathBuf,
    pub grid: GridSpec,
    pub ref_col: String,
    pub levels: LevelSpec,
}

/// Render one EW contour map per emission-line column.
///
/// Validation failures (grid shape, missing reference column) abort the
/// whole call before any plot is produced. Returns the written paths.
pub fn plot_ew_contours(config: &ContourConfig) -> Result<Vec<PathBuf>> {
    let out_dir = resolve_output_dir(CONTOUR_DIR)?;

    let table = load_line_table(&config.file_path)?;
    config.grid.validate_rows(table.row_count())?;

    let ref_cells = table
        .column(&config.ref_col)
        .ok_or_else(|| PlotError::MissingReference(config.ref_col.clone()))?;
    let reference = coerce_numeric(ref_cells);

    let mut written = Vec::new();

    for (idx, name) in table.headers.iter().enumerate() {
        if name == &config.ref_col || name == LINESLIST_COLUMN {
            continue;
        }

        let flux = coerce_numeric(&table.columns[idx]);
        let log_ew = log_equivalent_width(&flux, &reference);
        let field = fold_onto_grid(log_ew, config.grid.nx, config.grid.ny);

        let out_path = out_dir.join(format!("{}.png", sanitize_file_name(name)));
        render_contour_map(&field, &config.grid, &config.levels, name, &out_path)
            .with_context(|| format!("rendering contour map for '{name}'"))?;
        log::info!("wrote {}", out_path.display());
        written.push(out_path);
    }

    Ok(written)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw one contour map into its own drawing area and write it out.
/// Nothing is shared across calls, so iterating many columns stays flat
/// in memory.
fn render_contour_map(
    field: &Field,
    grid: &GridSpec,
    levels: &LevelSpec,
    title: &str,
    out_path: &Path,
) -> Result<()> {
    let root = BitMapBackend::new(out_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 56))
        .margin(30)
        .x_label_area_size(110)
        .y_label_area_size(140)
        .build_cartesian_2d(grid.x_min..grid.x_max, grid.y_min..grid.y_max)?;

    chart
        .configure_mesh()
        .x_desc("log n_H")
        .y_desc("log Φ_H")
        .label_style(("sans-serif", 36))
        .axis_desc_style(("sans-serif", 44))
        .light_line_style(&BLACK.mix(0.1))
        .draw()?;

    let level_values = levels.levels();
    let colors = color::level_colors(level_values.len());

    for (&level, line_color) in level_values.iter().zip(colors) {
        for poly in contour_polylines(field, level) {
            let pts: Vec<(f64, f64)> = poly
                .points
                .iter()
                .map(|p| to_data_coords(*p, grid))
                .collect();

            chart.draw_series(LineSeries::new(
                pts.clone(),
                line_color.stroke_width(3),
            ))?;

            // Inline level label at the polyline midpoint.
            let mid = pts[pts.len() / 2];
            chart.draw_series(std::iter::once(Text::new(
                format!("{level:.2}"),
                mid,
                ("sans-serif", 30).into_font().color(&line_color),
            )))?;
        }
    }

    root.present()
        .with_context(|| format!("writing {}", out_path.display()))?;
    Ok(())
}

/// Map fractional grid indices onto data coordinates of the evenly spaced
/// axes.
fn to_data_coords(p: GridPoint, grid: &GridSpec) -> (f64, f64) {
    let x = if grid.nx > 1 {
        grid.x_min + p.fx * (grid.x_max - grid.x_min) / (grid.nx - 1) as f64
    } else {
        grid.x_min
    };
    let y = if grid.ny > 1 {
        grid.y_min + p.fy * (grid.y_max - grid.y_min) / (grid.ny - 1) as f64
    } else {
        grid.y_min
    };
    (x, y)
}

// ---------------------------------------------------------------------------
// Marching squares
// ---------------------------------------------------------------------------

/// A vertex in fractional grid-index space: `fx` in `[0, nx-1]`,
/// `fy` in `[0, ny-1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GridPoint {
    fx: f64,
    fy: f64,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    start: GridPoint,
    end: GridPoint,
}

/// A chained iso-line at one contour level.
#[derive(Debug, Clone)]
struct Polyline {
    points: Vec<GridPoint>,
}

/// Extract iso-line segments for `level` with marching squares over the
/// grid cells. Returns nothing for degenerate (sub-2x2) grids.
fn march_squares(field: &Field, level: f64) -> Vec<Segment> {
    if field.nx < 2 || field.ny < 2 {
        return Vec::new();
    }

    let mut segments = Vec::new();

    for ix in 0..field.nx - 1 {
        for iy in 0..field.ny - 1 {
            // Cell corners, named by which index is incremented.
            let v00 = field.value(ix, iy);
            let v10 = field.value(ix + 1, iy);
            let v01 = field.value(ix, iy + 1);
            let v11 = field.value(ix + 1, iy + 1);

            if !(v00.is_finite() && v10.is_finite() && v01.is_finite() && v11.is_finite()) {
                continue;
            }

            let mut case = 0u8;
            if v00 >= level {
                case |= 1;
            }
            if v10 >= level {
                case |= 2;
            }
            if v11 >= level {
                case |= 4;
            }
            if v01 >= level {
                case |= 8;
            }

            let fx = ix as f64;
            let fy = iy as f64;

            // Crossing points on the four cell edges.
            let e_x0 = cross(fx, fy, fx + 1.0, fy, v00, v10, level);
            let e_x1 = cross(fx, fy + 1.0, fx + 1.0, fy + 1.0, v01, v11, level);
            let e_y0 = cross(fx, fy, fx, fy + 1.0, v00, v01, level);
            let e_y1 = cross(fx + 1.0, fy, fx + 1.0, fy + 1.0, v10, v11, level);

            let mut push = |a: GridPoint, b: GridPoint| {
                segments.push(Segment { start: a, end: b });
            };

            match case {
                0 | 15 => {}
                1 | 14 => push(e_y0, e_x0),
                2 | 13 => push(e_x0, e_y1),
                3 | 12 => push(e_y0, e_y1),
                4 | 11 => push(e_y1, e_x1),
                6 | 9 => push(e_x0, e_x1),
                7 | 8 => push(e_y0, e_x1),
                // Saddle cells: two independent crossings.
                5 => {
                    push(e_y0, e_x0);
                    push(e_y1, e_x1);
                }
                10 => {
                    push(e_x0, e_y1);
                    push(e_y0, e_x1);
                }
                _ => unreachable!(),
            }
        }
    }

    segments
}

/// Find where the level crosses the edge between two corner values.
fn cross(x1: f64, y1: f64, x2: f64, y2: f64, v1: f64, v2: f64, level: f64) -> GridPoint {
    if (v2 - v1).abs() < 1e-12 {
        return GridPoint {
            fx: (x1 + x2) / 2.0,
            fy: (y1 + y2) / 2.0,
        };
    }
    let t = ((level - v1) / (v2 - v1)).clamp(0.0, 1.0);
    GridPoint {
        fx: x1 + t * (x2 - x1),
        fy: y1 + t * (y2 - y1),
    }
}

/// Chain unordered segments into continuous polylines so each iso-line can
/// be drawn as one series and labeled once.
fn contour_polylines(field: &Field, level: f64) -> Vec<Polyline> {
    let segments = march_squares(field, level);
    let mut polylines = Vec::new();
    let mut used = vec![false; segments.len()];

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let mut points = vec![segments[start].start, segments[start].end];

        let mut extended = true;
        while extended {
            extended = false;
            let tail = *points.last().unwrap();
            for (i, seg) in segments.iter().enumerate() {
                if used[i] {
                    continue;
                }
                if dist_sq(seg.start, tail) < JOIN_EPS_SQ {
                    points.push(seg.end);
                    used[i] = true;
                    extended = true;
                    break;
                }
                if dist_sq(seg.end, tail) < JOIN_EPS_SQ {
                    points.push(seg.start);
                    used[i] = true;
                    extended = true;
                    break;
                }
            }

            if extended {
                continue;
            }

            // The seed segment may sit mid-curve; grow from the head too so
            // an open iso-line stays one polyline (and gets one label).
            let head = points[0];
            for (i, seg) in segments.iter().enumerate() {
                if used[i] {
                    continue;
                }
                if dist_sq(seg.start, head) < JOIN_EPS_SQ {
                    points.insert(0, seg.end);
                    used[i] = true;
                    extended = true;
                    break;
                }
                if dist_sq(seg.end, head) < JOIN_EPS_SQ {
                    points.insert(0, seg.start);
                    used[i] = true;
                    extended = true;
                    break;
                }
            }
        }

        polylines.push(Polyline { points });
    }

    polylines
}

fn dist_sq(a: GridPoint, b: GridPoint) -> f64 {
    (a.fx - b.fx).powi(2) + (a.fy - b.fy).powi(2)
}
