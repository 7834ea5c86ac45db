use std::collections::HashMap;
use std::f64::consts::PI;

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::shot::{NormalizedShot, RINK_HALF_LENGTH, RINK_HALF_WIDTH};

// Share of the canvas the rink occupies on each axis.
const RINK_WIDTH_SHARE: f64 = 0.9;
const RINK_HEIGHT_SHARE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, v: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return (self.range.0 + self.range.1) / 2.0;
        }
        let t = (v - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RinkBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
}

/// Maps rink feet onto a drawing canvas. Screen y grows downward, so the
/// positive-y boards end up at the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RinkProjector {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub rink: RinkBounds,
    pub x: LinearScale,
    pub y: LinearScale,
}

impl RinkProjector {
    pub fn for_canvas(canvas_width: f64, canvas_height: f64) -> Self {
        let width = canvas_width * RINK_WIDTH_SHARE;
        let height = canvas_height * RINK_HEIGHT_SHARE;
        let center_x = canvas_width / 2.0;
        let center_y = canvas_height / 2.0;
        let rink = RinkBounds {
            left: center_x - width / 2.0,
            top: center_y - height / 2.0,
            width,
            height,
            center_x,
            center_y,
        };
        Self {
            canvas_width,
            canvas_height,
            rink,
            x: LinearScale::new(
                (-RINK_HALF_LENGTH, RINK_HALF_LENGTH),
                (center_x - width / 2.0, center_x + width / 2.0),
            ),
            y: LinearScale::new(
                (-RINK_HALF_WIDTH, RINK_HALF_WIDTH),
                (center_y + height / 2.0, center_y - height / 2.0),
            ),
        }
    }

    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        (self.x.scale(x), self.y.scale(y))
    }

    pub fn project_shot(&self, shot: &NormalizedShot) -> (f64, f64) {
        self.project(shot.x, shot.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HexCell {
    pub col: i64,
    pub row: i64,
}

/// Pointy-top hexagonal tiling anchored at the canvas origin. Odd rows are
/// shifted right by half a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGrid {
    radius: f64,
    dx: f64,
    dy: f64,
}

impl HexGrid {
    pub fn new(radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(anyhow!("hexagon radius must be positive, got {radius}"));
        }
        Ok(Self {
            radius,
            dx: radius * 2.0 * (PI / 3.0).sin(),
            dy: radius * 1.5,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn cell_of(&self, px: f64, py: f64) -> HexCell {
        let py_rows = py / self.dy;
        let mut row = js_round(py_rows);
        let px_cols = px / self.dx - odd(row) / 2.0;
        let mut col = js_round(px_cols);
        let py_frac = py_rows - row;

        // Near a row boundary the closest center may sit in the adjacent row.
        // Distances are compared in pixels; column and row units differ.
        if py_frac.abs() * 3.0 > 1.0 {
            let px_frac = px_cols - col;
            let col_step = if px_cols < col { -0.5 } else { 0.5 };
            let row_step = if py_rows < row { -1.0 } else { 1.0 };
            let col2 = col + col_step;
            let row2 = row + row_step;
            let px2 = px_cols - col2;
            let py2 = py_rows - row2;
            let d1 = (px_frac * self.dx).powi(2) + (py_frac * self.dy).powi(2);
            let d2 = (px2 * self.dx).powi(2) + (py2 * self.dy).powi(2);
            if d1 > d2 {
                col = col2 + if odd(row) == 1.0 { 0.5 } else { -0.5 };
                row = row2;
            }
        }

        HexCell {
            col: col as i64,
            row: row as i64,
        }
    }

    pub fn center(&self, cell: HexCell) -> (f64, f64) {
        let row = cell.row as f64;
        (
            (cell.col as f64 + odd(row) / 2.0) * self.dx,
            row * self.dy,
        )
    }

    pub fn corners(&self) -> [(f64, f64); 6] {
        hexagon_corners(self.radius)
    }

    pub fn contains(&self, cell: HexCell, px: f64, py: f64) -> bool {
        self.cell_of(px, py) == cell
    }
}

pub fn hexagon_corners(radius: f64) -> [(f64, f64); 6] {
    let mut out = [(0.0, 0.0); 6];
    for (i, corner) in out.iter_mut().enumerate() {
        let angle = i as f64 * PI / 3.0;
        *corner = (angle.sin() * radius, -angle.cos() * radius);
    }
    out
}

// Half-up rounding, so that ties land on the same cell as the drawing layer.
fn js_round(v: f64) -> f64 {
    (v + 0.5).floor()
}

fn odd(row: f64) -> f64 {
    if (row as i64) & 1 == 1 { 1.0 } else { 0.0 }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HexBin {
    pub x: f64,
    pub y: f64,
    pub cell: HexCell,
    pub shots: Vec<NormalizedShot>,
}

impl HexBin {
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }
}

/// Bins come back in the order their first member was seen. Shots whose
/// projection is not finite are left out.
pub fn bin<P>(shots: &[NormalizedShot], radius: f64, projector: P) -> Result<Vec<HexBin>>
where
    P: Fn(&NormalizedShot) -> (f64, f64),
{
    let grid = HexGrid::new(radius)?;
    let mut index: HashMap<HexCell, usize> = HashMap::new();
    let mut bins: Vec<HexBin> = Vec::new();

    for shot in shots {
        let (px, py) = projector(shot);
        if !px.is_finite() || !py.is_finite() {
            continue;
        }
        let cell = grid.cell_of(px, py);
        let slot = *index.entry(cell).or_insert_with(|| {
            let (x, y) = grid.center(cell);
            bins.push(HexBin {
                x,
                y,
                cell,
                shots: Vec::new(),
            });
            bins.len() - 1
        });
        bins[slot].shots.push(shot.clone());
    }

    Ok(bins)
}

pub fn bin_on_rink(
    shots: &[NormalizedShot],
    radius: f64,
    projector: &RinkProjector,
) -> Result<Vec<HexBin>> {
    bin(shots, radius, |s| projector.project_shot(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_maps_domain_ends_to_range_ends() {
        let s = LinearScale::new((-100.0, 100.0), (40.0, 760.0));
        assert_eq!(s.scale(-100.0), 40.0);
        assert_eq!(s.scale(100.0), 760.0);
        assert_eq!(s.scale(0.0), 400.0);
    }

    #[test]
    fn centers_map_back_to_their_cell() {
        let grid = HexGrid::new(15.0).expect("radius");
        for row in -3..4 {
            for col in -3..4 {
                let cell = HexCell { col, row };
                let (cx, cy) = grid.center(cell);
                assert_eq!(grid.cell_of(cx, cy), cell);
            }
        }
    }

    #[test]
    fn assigned_center_is_nearest() {
        let grid = HexGrid::new(10.0).expect("radius");
        let mut px = 0.3;
        while px < 120.0 {
            let mut py = 0.7;
            while py < 90.0 {
                let cell = grid.cell_of(px, py);
                let (cx, cy) = grid.center(cell);
                let d = (px - cx).hypot(py - cy);
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        let other = HexCell {
                            col: cell.col + dc,
                            row: cell.row + dr,
                        };
                        let (ox, oy) = grid.center(other);
                        assert!(d <= (px - ox).hypot(py - oy) + 1e-9);
                    }
                }
                py += 3.1;
            }
            px += 2.9;
        }
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(HexGrid::new(0.0).is_err());
        assert!(HexGrid::new(f64::NAN).is_err());
    }

    #[test]
    fn projector_keeps_rink_inside_canvas() {
        let p = RinkProjector::for_canvas(800.0, 400.0);
        assert_eq!(p.project(-100.0, 42.5), (40.0, 40.0));
        assert_eq!(p.project(100.0, -42.5), (760.0, 360.0));
        assert_eq!(p.project(0.0, 0.0), (400.0, 200.0));
    }
}
