use proptest::prelude::*;

use pipedraw_model::{
    polar_to_cartesian, BendPipeModel, BendSpec, CasingKind, PipeComponent, Point,
    StraightPipeModel, StraightSpec,
};
use pipedraw_render::RecordingSurface;

proptest! {
    #[test]
    fn polar_round_trip(theta in 0.0..std::f64::consts::TAU, r in 0.1..1.0e6_f64) {
        let p = polar_to_cartesian(theta, r, Point::ORIGIN);

        let r_back = p.x.hypot(p.y);
        let mut theta_back = (-p.y).atan2(p.x);
        if theta_back < 0.0 {
            theta_back += std::f64::consts::TAU;
        }

        prop_assert!((r_back - r).abs() <= r * 1e-12);
        let mut diff = (theta_back - theta).abs();
        if diff > std::f64::consts::PI {
            diff = std::f64::consts::TAU - diff;
        }
        prop_assert!(diff < 1e-9);
    }

    #[test]
    fn straight_scale_never_shrinks_with_page(
        w in 300.0..800.0_f64,
        h in 300.0..900.0_f64,
        dw in 0.0..400.0_f64,
        dh in 0.0..400.0_f64,
    ) {
        let spec = StraightSpec {
            length: 3000.0,
            casing_od: 220.0,
            casing_id: 200.0,
            lining_od: 180.0,
            lining_id: 160.0,
            flange: "200PN16".to_string(),
        };
        let model = StraightPipeModel::new(&spec).unwrap();

        let mut canvas = RecordingSurface::new();
        let base = model.draw(&mut canvas, w, h).unwrap();
        let mut canvas = RecordingSurface::new();
        let grown = model.draw(&mut canvas, w + dw, h + dh).unwrap();

        prop_assert!(grown >= base - 1e-12);
    }

    #[test]
    fn bend_scale_never_shrinks_with_page(
        w in 300.0..800.0_f64,
        h in 300.0..900.0_f64,
        dw in 0.0..400.0_f64,
        dh in 0.0..400.0_f64,
        segments in prop::sample::select(vec![1u32, 2, 3, 4, 5, 6, 8]),
    ) {
        let spec = BendSpec {
            nominal_radius: 500.0,
            casing_od: 220.0,
            casing_id: 200.0,
            lining_od: 180.0,
            lining_id: 160.0,
            bend_angle: 90.0,
            segment_angle: 90.0 / segments as f64,
            casing: CasingKind::Segmented,
            show_segment_dims_on_drawing: false,
            show_segment_dims_box: false,
            flange: "200PN16".to_string(),
        };
        let model = BendPipeModel::new(&spec).unwrap();

        let mut canvas = RecordingSurface::new();
        let base = model.draw(&mut canvas, w, h).unwrap();
        let mut canvas = RecordingSurface::new();
        let grown = model.draw(&mut canvas, w + dw, h + dh).unwrap();

        prop_assert!(grown >= base - 1e-12);
    }

    #[test]
    fn bend_vertices_always_count_segments_plus_two(
        segments in prop::sample::select(vec![1u32, 2, 3, 4, 5, 6, 8, 9, 10, 12, 15, 18, 20, 24]),
    ) {
        let spec = BendSpec {
            nominal_radius: 500.0,
            casing_od: 220.0,
            casing_id: 200.0,
            lining_od: 180.0,
            lining_id: 160.0,
            bend_angle: 90.0,
            segment_angle: 90.0 / segments as f64,
            casing: CasingKind::Segmented,
            show_segment_dims_on_drawing: false,
            show_segment_dims_box: false,
            flange: "200PN16".to_string(),
        };
        let model = BendPipeModel::new(&spec).unwrap();
        prop_assert_eq!(model.body().points.center.len() as u32, model.segments() + 2);
    }
}
