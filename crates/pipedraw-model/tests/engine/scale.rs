use pipedraw_model::{
    BendPipeModel, BendSpec, CasingKind, PipeComponent, StraightPipeModel, StraightSpec,
};
use pipedraw_render::RecordingSurface;

fn bend_spec() -> BendSpec {
    BendSpec {
        nominal_radius: 500.0,
        casing_od: 220.0,
        casing_id: 200.0,
        lining_od: 180.0,
        lining_id: 160.0,
        bend_angle: 90.0,
        segment_angle: 22.5,
        casing: CasingKind::Segmented,
        show_segment_dims_on_drawing: false,
        show_segment_dims_box: false,
        flange: "200PN16".to_string(),
    }
}

fn straight_spec() -> StraightSpec {
    StraightSpec {
        length: 3000.0,
        casing_od: 220.0,
        casing_id: 200.0,
        lining_od: 180.0,
        lining_id: 160.0,
        flange: "200PN16".to_string(),
    }
}

fn solve_bend(page_w: f64, page_h: f64) -> f64 {
    let model = BendPipeModel::new(&bend_spec()).unwrap();
    let mut canvas = RecordingSurface::new();
    model.draw(&mut canvas, page_w, page_h).unwrap()
}

fn solve_straight(page_w: f64, page_h: f64) -> f64 {
    let model = StraightPipeModel::new(&straight_spec()).unwrap();
    let mut canvas = RecordingSurface::new();
    model.draw(&mut canvas, page_w, page_h).unwrap()
}

#[test]
fn test_bend_scale_is_positive_and_flange_bound() {
    let scale = solve_bend(500.0, 700.0);
    assert!(scale.is_finite() && scale > 0.0);

    // The flange bounding circle must fit: one width candidate is
    // page_w over the outer flange-bound radius (500 + 340/2), and the
    // solved scale can never exceed any candidate.
    let flange_bound = 500.0 + 170.0;
    assert!(scale <= 500.0 / flange_bound + 1e-12);
}

#[test]
fn test_straight_scale_respects_both_axis_bounds() {
    let scale = solve_straight(500.0, 700.0);
    assert!(scale.is_finite() && scale > 0.0);

    // Height: pipe length plus flange radius. Width: flange diameter.
    assert!(scale <= 700.0 / (3000.0 + 170.0) + 1e-12);
    assert!(scale <= 500.0 / 340.0 + 1e-12);
}

#[test]
fn test_bend_scale_is_monotonic_in_page_size() {
    let base = solve_bend(500.0, 700.0);
    assert!(solve_bend(600.0, 700.0) >= base - 1e-12);
    assert!(solve_bend(500.0, 800.0) >= base - 1e-12);
    assert!(solve_bend(900.0, 1200.0) >= base - 1e-12);
}

#[test]
fn test_straight_scale_is_monotonic_in_page_size() {
    let base = solve_straight(500.0, 700.0);
    assert!(solve_straight(650.0, 700.0) >= base - 1e-12);
    assert!(solve_straight(500.0, 900.0) >= base - 1e-12);
}

#[test]
fn test_larger_component_gets_smaller_scale() {
    let small = solve_straight(500.0, 700.0);
    let mut spec = straight_spec();
    spec.length = 6000.0;
    let model = StraightPipeModel::new(&spec).unwrap();
    let mut canvas = RecordingSurface::new();
    let large = model.draw(&mut canvas, 500.0, 700.0).unwrap();
    assert!(large < small);
}
