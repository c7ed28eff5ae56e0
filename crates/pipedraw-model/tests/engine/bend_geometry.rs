use pipedraw_model::{BendPipeModel, BendSpec, CasingKind, Layer, Point};

fn base_spec() -> BendSpec {
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

#[test]
fn test_point_counts_match_segment_count() {
    for (bend, seg, expected_segments) in [
        (90.0, 22.5, 4),
        (90.0, 15.0, 6),
        (45.0, 22.5, 2),
        (67.5, 22.5, 3),
        (90.0, 90.0, 1),
    ] {
        let mut spec = base_spec();
        spec.bend_angle = bend;
        spec.segment_angle = seg;
        let model = BendPipeModel::new(&spec).unwrap();
        assert_eq!(model.segments(), expected_segments);
        for layer in Layer::ALL {
            let pts = model.body().points.layer(layer);
            assert_eq!(pts.outer.len() as u32, expected_segments + 2);
            assert_eq!(pts.inner.len() as u32, expected_segments + 2);
        }
        assert_eq!(model.body().points.center.len() as u32, expected_segments + 2);
    }
}

#[test]
fn test_endpoints_lie_on_true_radius() {
    let model = BendPipeModel::new(&base_spec()).unwrap();
    for layer in Layer::ALL {
        let r = 500.0 + model.body().layers.radius(layer);
        let pts = &model.body().points.layer(layer).outer;
        let first = pts[0];
        let last = pts[pts.len() - 1];
        assert!((first.distance_to(&Point::ORIGIN) - r).abs() < 1e-9);
        assert!((last.distance_to(&Point::ORIGIN) - r).abs() < 1e-9);
        // The bend ends sit exactly at angle 0 and the bend angle.
        assert!((first.x - r).abs() < 1e-9 && first.y.abs() < 1e-9);
        assert!(first.y.abs() < 1e-9);
    }
}

#[test]
fn test_internal_vertices_lie_on_corrected_radius() {
    let model = BendPipeModel::new(&base_spec()).unwrap();
    let half_seg = 22.5_f64.to_radians() / 2.0;
    for layer in Layer::ALL {
        for (run, r) in [
            (
                &model.body().points.layer(layer).outer,
                500.0 + model.body().layers.radius(layer),
            ),
            (
                &model.body().points.layer(layer).inner,
                500.0 - model.body().layers.radius(layer),
            ),
        ] {
            let erad = r / half_seg.cos();
            for p in &run[1..run.len() - 1] {
                assert!((p.distance_to(&Point::ORIGIN) - erad).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_midpoint_vertex_lies_on_bisector() {
    // With an odd segment count the bend has a mitre joint exactly at
    // the middle of the arc; its vertex must sit on the angular
    // bisector.
    let mut spec = base_spec();
    spec.bend_angle = 67.5;
    spec.segment_angle = 22.5;
    let model = BendPipeModel::new(&spec).unwrap();

    let bisector = 67.5_f64.to_radians() / 2.0;
    let center = &model.body().points.center;
    let mid = center[center.len() / 2];
    let angle = (-mid.y).atan2(mid.x);
    assert!((angle - bisector).abs() < 1e-9);
}

#[test]
fn test_inner_runs_are_reversed() {
    let model = BendPipeModel::new(&base_spec()).unwrap();
    let pts = model.body().points.layer(Layer::CasingOuter);
    // The first inner point pairs with the last outer point at the far
    // end of the bend, so the concatenated ring closes without crossing.
    let b_arc = 90.0_f64.to_radians();
    let far_inner = pts.inner[0];
    let angle = (-far_inner.y).atan2(far_inner.x);
    assert!((angle - b_arc).abs() < 1e-9);
}

#[test]
fn test_one_piece_casing_keeps_segmented_lining() {
    let mut spec = base_spec();
    spec.casing = CasingKind::OnePiece;
    let model = BendPipeModel::new(&spec).unwrap();
    // Vertex geometry is computed for every layer regardless of casing
    // kind; the curved casing is purely a rendering path.
    for layer in Layer::ALL {
        assert_eq!(model.body().points.layer(layer).outer.len(), 6);
    }
}
