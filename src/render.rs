use std::fmt::Write as _;

use serde::Serialize;

use crate::filter::FilterState;
use crate::heatmap::HeatMapView;
use crate::hexbin::{RinkBounds, RinkProjector, hexagon_corners};
use crate::tooltip::ElementId;

const GOAL_LINE_SHARE: f64 = 0.15;
const FACEOFF_RADIUS: f64 = 15.0;
const GOAL_WIDTH: f64 = 6.0;
const GOAL_DEPTH: f64 = 4.0;
const HEXAGON_OPACITY: f64 = 0.7;
const MARKER_OPACITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

const OR_RD: &[Rgb] = &[
    Rgb(0xff, 0xf7, 0xec),
    Rgb(0xfe, 0xe8, 0xc8),
    Rgb(0xfd, 0xd4, 0x9e),
    Rgb(0xfd, 0xbb, 0x84),
    Rgb(0xfc, 0x8d, 0x59),
    Rgb(0xef, 0x65, 0x48),
    Rgb(0xd7, 0x30, 0x1f),
    Rgb(0xb3, 0x00, 0x00),
    Rgb(0x7f, 0x00, 0x00),
];

const VIRIDIS: &[Rgb] = &[
    Rgb(0x44, 0x01, 0x54),
    Rgb(0x48, 0x28, 0x78),
    Rgb(0x3e, 0x49, 0x89),
    Rgb(0x31, 0x68, 0x8e),
    Rgb(0x26, 0x82, 0x8e),
    Rgb(0x1f, 0x9e, 0x89),
    Rgb(0x35, 0xb7, 0x79),
    Rgb(0x6e, 0xce, 0x58),
    Rgb(0xb5, 0xde, 0x2b),
    Rgb(0xfd, 0xe7, 0x25),
];

/// Sequential color scale: clamps into the domain and interpolates between
/// evenly spaced color stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialScale {
    pub domain: (f64, f64),
    stops: &'static [Rgb],
}

impl SequentialScale {
    pub fn density(max_count: usize) -> Self {
        Self {
            domain: (0.0, max_count.max(1) as f64),
            stops: OR_RD,
        }
    }

    pub fn expected_goals() -> Self {
        Self {
            domain: (0.0, 1.0),
            stops: VIRIDIS,
        }
    }

    pub fn color(&self, v: f64) -> Rgb {
        let span = self.domain.1 - self.domain.0;
        let t = if span > 0.0 && v.is_finite() {
            ((v - self.domain.0) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let last = self.stops.len() - 1;
        let pos = t * last as f64;
        let i = (pos.floor() as usize).min(last);
        if i == last {
            return self.stops[last];
        }
        self.stops[i].lerp(self.stops[i + 1], pos - i as f64)
    }
}

pub fn marker_radius(xg: f64) -> f64 {
    (2.0 + xg * 4.0).max(3.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RinkLayout {
    pub outline: RinkBounds,
    pub center_line_x: f64,
    pub goal_lines_x: [f64; 2],
    pub faceoff_circles: Vec<(f64, f64)>,
    pub faceoff_radius: f64,
    // (x, y, width, height) of each goal mouth.
    pub goals: [(f64, f64, f64, f64); 2],
}

impl RinkLayout {
    pub fn new(projector: &RinkProjector) -> Self {
        let r = projector.rink;
        let goal_offset = r.width * GOAL_LINE_SHARE;
        let cx = r.center_x;
        let cy = r.center_y;
        let faceoff_dx = goal_offset * 0.7;
        let faceoff_dy = r.height * 0.25;
        Self {
            outline: r,
            center_line_x: cx,
            goal_lines_x: [cx - goal_offset, cx + goal_offset],
            faceoff_circles: vec![
                (cx, cy),
                (cx - faceoff_dx, cy - faceoff_dy),
                (cx - faceoff_dx, cy + faceoff_dy),
                (cx + faceoff_dx, cy - faceoff_dy),
                (cx + faceoff_dx, cy + faceoff_dy),
            ],
            faceoff_radius: FACEOFF_RADIUS,
            goals: [
                (
                    cx - goal_offset - GOAL_DEPTH / 2.0,
                    cy - GOAL_WIDTH / 2.0,
                    GOAL_DEPTH,
                    GOAL_WIDTH,
                ),
                (
                    cx + goal_offset - GOAL_DEPTH / 2.0,
                    cy - GOAL_WIDTH / 2.0,
                    GOAL_DEPTH,
                    GOAL_WIDTH,
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HexagonMark {
    pub element_id: String,
    pub bin_index: usize,
    pub center: (f64, f64),
    pub corners: [(f64, f64); 6],
    pub count: usize,
    pub fill: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotMarker {
    pub element_id: String,
    pub shot_index: usize,
    pub center: (f64, f64),
    pub radius: f64,
    pub xg: f64,
    pub fill: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub rink: RinkLayout,
    pub hexagons: Vec<HexagonMark>,
    pub markers: Vec<ShotMarker>,
}

impl Scene {
    pub fn build(
        view: &HeatMapView,
        filter: &FilterState,
        projector: &RinkProjector,
        high_value_xg: f64,
    ) -> Self {
        let density = SequentialScale::density(view.max_count());
        let xg_scale = SequentialScale::expected_goals();
        let corners = hexagon_corners(filter.hex_radius);

        let hexagons = if filter.show_hexagons {
            view.bins
                .iter()
                .enumerate()
                .map(|(i, bin)| HexagonMark {
                    element_id: ElementId::Hexagon(i).label(),
                    bin_index: i,
                    center: (bin.x, bin.y),
                    corners,
                    count: bin.len(),
                    fill: density.color(bin.len() as f64),
                })
                .collect()
        } else {
            Vec::new()
        };

        let markers = if filter.show_individual_shots {
            view.high_value_shots(high_value_xg)
                .into_iter()
                .map(|(i, shot)| ShotMarker {
                    element_id: ElementId::Shot(i).label(),
                    shot_index: i,
                    center: projector.project_shot(shot),
                    radius: marker_radius(shot.xg()),
                    xg: shot.xg(),
                    fill: xg_scale.color(shot.xg()),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            width: projector.canvas_width,
            height: projector.canvas_height,
            rink: RinkLayout::new(projector),
            hexagons,
            markers,
        }
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height)
        );
        self.write_rink(&mut out);
        for hex in &self.hexagons {
            let path = hexagon_path(&hex.corners);
            let _ = writeln!(
                out,
                r##"  <path class="hexagon" data-element-id="{id}" d="{path}" transform="translate({x},{y})" fill="{fill}" stroke="#fff" stroke-width="0.5" opacity="{op}"><title>{count} shots</title></path>"##,
                id = hex.element_id,
                x = fmt_num(hex.center.0),
                y = fmt_num(hex.center.1),
                fill = hex.fill.hex(),
                op = HEXAGON_OPACITY,
                count = hex.count,
            );
        }
        for marker in &self.markers {
            let _ = writeln!(
                out,
                r##"  <circle class="shot-dot" data-element-id="{id}" cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="#333" stroke-width="0.5" opacity="{op}"><title>xG {xg:.3}</title></circle>"##,
                id = marker.element_id,
                cx = fmt_num(marker.center.0),
                cy = fmt_num(marker.center.1),
                r = fmt_num(marker.radius),
                fill = marker.fill.hex(),
                op = MARKER_OPACITY,
                xg = marker.xg,
            );
        }
        out.push_str("</svg>\n");
        out
    }

    fn write_rink(&self, out: &mut String) {
        let r = &self.rink;
        let o = r.outline;
        let top = fmt_num(o.top);
        let bottom = fmt_num(o.top + o.height);
        let _ = writeln!(out, r#"  <g class="rink">"#);
        let _ = writeln!(
            out,
            r##"    <rect x="{}" y="{}" width="{}" height="{}" rx="20" fill="#f8fafc" stroke="#e2e8f0" stroke-width="2"/>"##,
            fmt_num(o.left),
            top,
            fmt_num(o.width),
            fmt_num(o.height)
        );
        let _ = writeln!(
            out,
            r##"    <line x1="{x}" y1="{top}" x2="{x}" y2="{bottom}" stroke="#3b82f6" stroke-width="2" stroke-dasharray="5,5"/>"##,
            x = fmt_num(r.center_line_x),
        );
        for gx in r.goal_lines_x {
            let _ = writeln!(
                out,
                r##"    <line x1="{x}" y1="{top}" x2="{x}" y2="{bottom}" stroke="#dc2626" stroke-width="2"/>"##,
                x = fmt_num(gx),
            );
        }
        for (cx, cy) in &r.faceoff_circles {
            let _ = writeln!(
                out,
                r##"    <circle cx="{}" cy="{}" r="{}" fill="none" stroke="#6b7280" stroke-width="1"/>"##,
                fmt_num(*cx),
                fmt_num(*cy),
                fmt_num(r.faceoff_radius)
            );
        }
        for (x, y, w, h) in r.goals {
            let _ = writeln!(
                out,
                r##"    <rect x="{}" y="{}" width="{}" height="{}" fill="#dbeafe" stroke="#3b82f6" stroke-width="2"/>"##,
                fmt_num(x),
                fmt_num(y),
                fmt_num(w),
                fmt_num(h)
            );
        }
        let _ = writeln!(out, "  </g>");
    }
}

fn hexagon_path(corners: &[(f64, f64); 6]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in corners.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{},{}", fmt_num(*x), fmt_num(*y));
    }
    d.push('Z');
    d
}

fn fmt_num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
