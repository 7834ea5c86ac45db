use rink_heatmap::filter::FilterState;
use rink_heatmap::heatmap::{DEFAULT_HIGH_VALUE_XG, compute};
use rink_heatmap::hexbin::RinkProjector;
use rink_heatmap::shot::ShotEvent;

fn shots() -> Vec<ShotEvent> {
    vec![
        ShotEvent {
            team: "DAL".to_string(),
            xg: 0.4,
            ..ShotEvent::at("1", -70.0, 10.0)
        },
        ShotEvent {
            team: "DAL".to_string(),
            xg: 0.1,
            ..ShotEvent::at("2", 50.0, -5.0)
        },
        ShotEvent {
            team: "MIN".to_string(),
            xg: 0.2,
            ..ShotEvent::at("3", 0.0, 0.0)
        },
        ShotEvent {
            team: "DAL".to_string(),
            x: None,
            ..ShotEvent::at("4", 0.0, 0.0)
        },
    ]
}

#[test]
fn pipeline_counts_filtered_and_skipped_shots() {
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let filter = FilterState {
        teams: vec!["DAL".to_string()],
        ..FilterState::default()
    };
    let view = compute(&shots(), &filter, &projector).expect("view");
    assert_eq!(view.filtered_out, 1);
    assert_eq!(view.skipped_geometry, 1);
    assert_eq!(view.summary.total_shots, 2);
    assert!((view.summary.total_xg - 0.5).abs() < 1e-12);
    assert!((view.summary.avg_xg - 0.25).abs() < 1e-12);
    assert_eq!(view.shots[0].x, 70.0);
    assert_eq!(view.shots[0].y, -10.0);
    let binned: usize = view.bins.iter().map(|b| b.len()).sum();
    assert_eq!(binned, 2);
    assert_eq!(view.stats.len(), view.bins.len());
}

#[test]
fn same_inputs_give_the_same_view() {
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let filter = FilterState::default();
    let a = compute(&shots(), &filter, &projector).expect("view");
    let b = compute(&shots(), &filter, &projector).expect("view");
    assert_eq!(a.bins, b.bins);
    assert_eq!(a.stats, b.stats);
    assert_eq!(a.summary, b.summary);
}

#[test]
fn bins_can_be_found_by_screen_point() {
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let filter = FilterState::default();
    let view = compute(&shots(), &filter, &projector).expect("view");
    for (i, bin) in view.bins.iter().enumerate() {
        assert_eq!(view.bin_at(filter.hex_radius, bin.x, bin.y), Some(i));
    }
    assert_eq!(view.bin_at(filter.hex_radius, 0.0, 0.0), None);
}

#[test]
fn high_value_shots_are_strictly_above_threshold() {
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let view = compute(&shots(), &FilterState::default(), &projector).expect("view");
    let high = view.high_value_shots(DEFAULT_HIGH_VALUE_XG);
    let ids: Vec<&str> = high.iter().map(|(_, s)| s.shot.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(high[1].0, 1);
}

#[test]
fn zero_radius_is_reported() {
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let filter = FilterState {
        hex_radius: 0.0,
        ..FilterState::default()
    };
    assert!(compute(&shots(), &filter, &projector).is_err());
}
