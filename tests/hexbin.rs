use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rink_heatmap::bin_stats::summarize;
use rink_heatmap::filter::GoalRule;
use rink_heatmap::hexbin::{HexCell, HexGrid, RinkProjector, bin, bin_on_rink, hexagon_corners};
use rink_heatmap::normalize::normalize_all;
use rink_heatmap::shot::{NormalizedShot, ShotEvent};

fn random_shots(seed: u64, n: usize) -> Vec<NormalizedShot> {
    let mut rng = StdRng::seed_from_u64(seed);
    let raw: Vec<ShotEvent> = (0..n)
        .map(|i| ShotEvent {
            xg: rng.gen_range(0.0..0.5),
            ..ShotEvent::at(
                format!("s{i}"),
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-42.5..42.5),
            )
        })
        .collect();
    normalize_all(&raw).0
}

#[test]
fn binning_is_deterministic() {
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let shots = random_shots(7, 500);
    let a = bin_on_rink(&shots, 15.0, &projector).expect("bins");
    let b = bin_on_rink(&shots, 15.0, &projector).expect("bins");
    assert_eq!(a, b);
}

#[test]
fn every_shot_lands_in_exactly_one_bin() {
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let shots = random_shots(11, 800);
    let bins = bin_on_rink(&shots, 12.0, &projector).expect("bins");

    let total: usize = bins.iter().map(|b| b.len()).sum();
    assert_eq!(total, shots.len());

    let mut seen = HashSet::new();
    for b in &bins {
        assert!(!b.is_empty());
        for s in &b.shots {
            assert!(seen.insert(s.shot.id.clone()), "{} binned twice", s.shot.id);
        }
    }

    let cells: HashSet<HexCell> = bins.iter().map(|b| b.cell).collect();
    assert_eq!(cells.len(), bins.len());
}

#[test]
fn bin_centers_sit_on_the_grid() {
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let shots = random_shots(3, 300);
    let grid = HexGrid::new(15.0).expect("radius");
    for b in bin_on_rink(&shots, 15.0, &projector).expect("bins") {
        assert_eq!(grid.center(b.cell), (b.x, b.y));
        for s in &b.shots {
            let (px, py) = projector.project_shot(s);
            assert!(grid.contains(b.cell, px, py));
        }
    }
}

#[test]
fn equal_xg_in_one_cell_averages_to_that_xg() {
    let grid = HexGrid::new(15.0).expect("radius");
    let (cx, cy) = grid.center(HexCell { col: 5, row: 4 });
    let raw: Vec<ShotEvent> = (0..12)
        .map(|i| ShotEvent {
            xg: 0.05,
            ..ShotEvent::at(format!("{i}"), i as f64, 0.0)
        })
        .collect();
    let shots = normalize_all(&raw).0;
    // Spread the twelve shots a few pixels around one center.
    let bins = bin(&shots, 15.0, |s| {
        let k = s.x;
        (cx + (k - 5.5) * 0.5, cy + (k % 3.0 - 1.0))
    })
    .expect("bins");

    assert_eq!(bins.len(), 1);
    let stats = summarize(&bins[0], GoalRule::default());
    assert_eq!(stats.count, 12);
    assert!((stats.avg_xg - 0.05).abs() < 1e-12);
}

#[test]
fn empty_input_gives_no_bins() {
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    assert!(bin_on_rink(&[], 15.0, &projector).expect("bins").is_empty());
}

#[test]
fn non_positive_radius_is_rejected() {
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let shots = random_shots(1, 5);
    assert!(bin_on_rink(&shots, 0.0, &projector).is_err());
    assert!(bin_on_rink(&shots, -3.0, &projector).is_err());
    assert!(bin_on_rink(&shots, f64::NAN, &projector).is_err());
}

#[test]
fn non_finite_projections_are_skipped() {
    let shots = random_shots(5, 4);
    let bins = bin(&shots, 10.0, |s| {
        if s.shot.id == "s0" {
            (f64::INFINITY, 0.0)
        } else {
            (s.x, s.y)
        }
    })
    .expect("bins");
    let total: usize = bins.iter().map(|b| b.len()).sum();
    assert_eq!(total, 3);
}

#[test]
fn corners_are_radius_away_from_center() {
    let corners = hexagon_corners(10.0);
    assert!((corners[0].0).abs() < 1e-9);
    assert!((corners[0].1 + 10.0).abs() < 1e-9);
    for (x, y) in corners {
        assert!((x.hypot(y) - 10.0).abs() < 1e-9);
    }
}
