use rink_heatmap::filter::FilterState;
use rink_heatmap::heatmap::{self, DEFAULT_HIGH_VALUE_XG, HeatMapView};
use rink_heatmap::hexbin::RinkProjector;
use rink_heatmap::render::{Scene, SequentialScale, marker_radius};
use rink_heatmap::shot::ShotEvent;

fn shots() -> Vec<ShotEvent> {
    vec![
        ShotEvent {
            xg: 0.25,
            ..ShotEvent::at("1", 70.0, 0.0)
        },
        ShotEvent {
            xg: 0.08,
            ..ShotEvent::at("2", 60.0, 10.0)
        },
        ShotEvent {
            xg: 0.15,
            ..ShotEvent::at("3", 75.0, -5.0)
        },
        ShotEvent {
            xg: 0.6,
            ..ShotEvent::at("4", -85.0, 2.0)
        },
    ]
}

fn view(filter: &FilterState) -> (HeatMapView, RinkProjector) {
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let view = heatmap::compute(&shots(), filter, &projector).expect("view");
    (view, projector)
}

#[test]
fn scene_has_a_hexagon_per_bin_and_markers_above_threshold() {
    let filter = FilterState::default();
    let (view, projector) = view(&filter);
    let scene = Scene::build(&view, &filter, &projector, DEFAULT_HIGH_VALUE_XG);

    assert_eq!(scene.hexagons.len(), view.bins.len());
    // 0.15 itself is not above the threshold.
    assert_eq!(scene.markers.len(), 2);
    let xgs: Vec<f64> = scene.markers.iter().map(|m| m.xg).collect();
    assert_eq!(xgs, vec![0.25, 0.6]);
    assert_eq!(scene.markers[1].radius, marker_radius(0.6));
    assert_eq!(scene.markers[0].element_id, "shot-0");
    assert_eq!(scene.hexagons[0].element_id, "hexagon-0");

    let density = SequentialScale::density(view.max_count());
    for hex in &scene.hexagons {
        assert_eq!(hex.fill, density.color(hex.count as f64));
    }
}

#[test]
fn toggles_hide_layers_but_keep_the_rink() {
    let filter = FilterState {
        show_hexagons: false,
        show_individual_shots: false,
        ..FilterState::default()
    };
    let (view, projector) = view(&filter);
    let scene = Scene::build(&view, &filter, &projector, DEFAULT_HIGH_VALUE_XG);
    assert!(scene.hexagons.is_empty());
    assert!(scene.markers.is_empty());
    assert_eq!(scene.rink.faceoff_circles.len(), 5);
    assert!(!view.bins.is_empty());
}

#[test]
fn rink_lines_follow_the_projection() {
    let (view, projector) = view(&FilterState::default());
    let scene = Scene::build(&view, &FilterState::default(), &projector, DEFAULT_HIGH_VALUE_XG);
    let rink = &scene.rink;
    assert_eq!(rink.outline.left, 40.0);
    assert_eq!(rink.outline.width, 720.0);
    assert_eq!(rink.center_line_x, 400.0);
    assert!((rink.goal_lines_x[0] - 292.0).abs() < 1e-9);
    assert!((rink.goal_lines_x[1] - 508.0).abs() < 1e-9);
}

#[test]
fn svg_document_contains_every_mark() {
    let filter = FilterState::default();
    let (view, projector) = view(&filter);
    let scene = Scene::build(&view, &filter, &projector, DEFAULT_HIGH_VALUE_XG);
    let svg = scene.to_svg();

    assert!(svg.starts_with("<svg "));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r#"viewBox="0 0 800 400""#));
    assert_eq!(svg.matches(r#"class="hexagon""#).count(), scene.hexagons.len());
    assert_eq!(svg.matches(r#"class="shot-dot""#).count(), 2);
    assert!(svg.contains(r#"data-element-id="hexagon-0""#));
    assert!(svg.contains(r#"data-element-id="shot-1""#));
}

#[test]
fn empty_view_still_draws_rink() {
    let filter = FilterState::default();
    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let view = heatmap::compute(&[], &filter, &projector).expect("view");
    let scene = Scene::build(&view, &filter, &projector, DEFAULT_HIGH_VALUE_XG);
    assert!(scene.hexagons.is_empty());
    assert!(scene.markers.is_empty());
    assert!(scene.to_svg().contains(r#"class="rink""#));
}
