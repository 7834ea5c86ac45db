use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt::Write as _;
use std::hint::black_box;

use rink_heatmap::filter::FilterState;
use rink_heatmap::heatmap;
use rink_heatmap::hexbin::{HexGrid, RinkProjector};
use rink_heatmap::render::Scene;
use rink_heatmap::sample_data::sample_shots;
use rink_heatmap::shot::ShotEvent;
use rink_heatmap::shots_csv::parse_shots_csv;

fn dataset(n: usize) -> Vec<ShotEvent> {
    let mut rng = StdRng::seed_from_u64(17);
    sample_shots(&mut rng, n)
}

fn csv_text(shots: &[ShotEvent]) -> String {
    let mut out = String::from(
        "shotID,teamCode,period,shooterName,shotType,xCordAdjusted,yCordAdjusted,xGoal,goal,shotWasOnGoal,homeSkatersOnIce,awaySkatersOnIce\n",
    );
    for s in shots {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            s.id,
            s.team,
            s.period,
            s.shooter,
            s.shot_type,
            s.x.unwrap_or_default(),
            s.y.unwrap_or_default(),
            s.xg,
            u8::from(s.goal.unwrap_or(false)),
            u8::from(s.on_goal),
            s.home_skaters,
            s.away_skaters
        );
    }
    out
}

fn bench_compute_view(c: &mut Criterion) {
    let shots = dataset(5_000);
    let filter = FilterState::default();
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    c.bench_function("compute_view_5k", |b| {
        b.iter(|| {
            let view = heatmap::compute(black_box(&shots), &filter, &projector).expect("view");
            black_box(view.bins.len());
        })
    });
}

fn bench_filtered_view(c: &mut Criterion) {
    let shots = dataset(5_000);
    let mut filter = FilterState::default();
    filter.toggle_team("DAL");
    filter.toggle_period(2);
    filter.set_xg_range(0.05, 0.3);
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    c.bench_function("compute_filtered_view_5k", |b| {
        b.iter(|| {
            let view = heatmap::compute(black_box(&shots), &filter, &projector).expect("view");
            black_box(view.summary.total_shots);
        })
    });
}

fn bench_cell_lookup(c: &mut Criterion) {
    let grid = HexGrid::new(15.0).expect("radius");
    c.bench_function("hex_cell_lookup_10k", |b| {
        b.iter(|| {
            let mut acc = 0i64;
            for i in 0..10_000 {
                let px = (i % 800) as f64 + 0.37;
                let py = (i / 25) as f64 + 0.11;
                let cell = grid.cell_of(black_box(px), black_box(py));
                acc += cell.col + cell.row;
            }
            black_box(acc);
        })
    });
}

fn bench_svg_scene(c: &mut Criterion) {
    let shots = dataset(5_000);
    let filter = FilterState::default();
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let view = heatmap::compute(&shots, &filter, &projector).expect("view");
    c.bench_function("svg_scene_5k", |b| {
        b.iter(|| {
            let scene = Scene::build(black_box(&view), &filter, &projector, 0.15);
            black_box(scene.to_svg().len());
        })
    });
}

fn bench_csv_parse(c: &mut Criterion) {
    let raw = csv_text(&dataset(5_000));
    c.bench_function("csv_parse_5k", |b| {
        b.iter(|| {
            let (shots, _) = parse_shots_csv(black_box(&raw)).expect("csv");
            black_box(shots.len());
        })
    });
}

criterion_group!(
    benches,
    bench_compute_view,
    bench_filtered_view,
    bench_cell_lookup,
    bench_svg_scene,
    bench_csv_parse
);
criterion_main!(benches);
