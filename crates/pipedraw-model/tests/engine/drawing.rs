use pipedraw_model::{
    BendPipeModel, BendSpec, CasingKind, ModelError, PipeComponent, PipeKind, StraightPipeModel,
    StraightSpec,
};
use pipedraw_render::{CanvasOp, RecordingSurface, Rgb};

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
        show_segment_dims_on_drawing: true,
        show_segment_dims_box: true,
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

#[test]
fn test_kind_tags() {
    assert_eq!(
        StraightPipeModel::new(&straight_spec()).unwrap().kind(),
        PipeKind::Straight
    );
    assert_eq!(
        BendPipeModel::new(&bend_spec()).unwrap().kind(),
        PipeKind::Bend
    );
}

#[test]
fn test_unknown_flange_fails_without_drawing() {
    let mut spec = bend_spec();
    spec.flange = "999PN16".to_string();
    let err = BendPipeModel::new(&spec).unwrap_err();
    assert_eq!(
        err,
        ModelError::UnknownFlangeKind {
            designation: "999PN16".to_string()
        }
    );
}

#[test]
fn test_straight_draw_emits_labels_and_transform() {
    let model = StraightPipeModel::new(&straight_spec()).unwrap();
    let mut canvas = RecordingSurface::new();
    let scale = model.draw(&mut canvas, 500.0, 700.0).unwrap();

    let has_scale_op = canvas
        .ops()
        .iter()
        .any(|op| matches!(op, CanvasOp::Scale(s) if (*s - scale).abs() < 1e-12));
    assert!(has_scale_op);

    let texts = canvas.texts();
    for label in ["220", "200", "180", "160", "3000"] {
        assert!(texts.contains(&label), "missing label {label}");
    }
}

#[test]
fn test_layers_fill_before_outline_stroke() {
    let model = StraightPipeModel::new(&straight_spec()).unwrap();
    let mut canvas = RecordingSurface::new();
    model.draw(&mut canvas, 500.0, 700.0).unwrap();

    // The casing silhouette fills first (0.8 gray) and its bore next
    // (0.9 gray); the silhouette outline is stroked only after every
    // layer has been filled.
    let ops = canvas.ops();
    let first_casing_fill = ops
        .iter()
        .position(|op| matches!(op, CanvasOp::SetColor(c) if *c == Rgb::gray(0.8)))
        .expect("casing fill color never set");
    let first_bore_fill = ops
        .iter()
        .position(|op| matches!(op, CanvasOp::SetColor(c) if *c == Rgb::gray(0.9)))
        .expect("casing bore fill color never set");
    assert!(first_casing_fill < first_bore_fill);

    let first_fill = ops
        .iter()
        .position(|op| matches!(op, CanvasOp::Fill | CanvasOp::FillPreserve))
        .unwrap();
    let first_stroke = ops
        .iter()
        .position(|op| matches!(op, CanvasOp::Stroke))
        .unwrap();
    assert!(first_fill < first_stroke);
}

#[test]
fn test_bend_draw_emits_angle_and_radius_labels() {
    let model = BendPipeModel::new(&bend_spec()).unwrap();
    let mut canvas = RecordingSurface::new();
    model.draw(&mut canvas, 500.0, 700.0).unwrap();

    let texts = canvas.texts();
    assert!(texts.contains(&"90"));
    assert!(texts.contains(&"o"), "degree glyph missing");
    assert!(texts.contains(&"R500"));
}

#[test]
fn test_segment_dims_box_rows_follow_casing_kind() {
    let mut canvas = RecordingSurface::new();
    let model = BendPipeModel::new(&bend_spec()).unwrap();
    model.draw(&mut canvas, 500.0, 700.0).unwrap();
    let segmented_rows = canvas
        .texts()
        .iter()
        .filter(|t| t.contains("seg."))
        .count();
    assert_eq!(segmented_rows, 5);

    let mut canvas = RecordingSurface::new();
    let mut spec = bend_spec();
    spec.casing = CasingKind::OnePiece;
    let model = BendPipeModel::new(&spec).unwrap();
    model.draw(&mut canvas, 500.0, 700.0).unwrap();
    let one_piece_rows = canvas
        .texts()
        .iter()
        .filter(|t| t.contains("seg."))
        .count();
    assert_eq!(one_piece_rows, 3);
}

#[test]
fn test_one_piece_casing_draws_arcs_for_casing_layers() {
    let mut spec = bend_spec();
    spec.casing = CasingKind::OnePiece;
    let model = BendPipeModel::new(&spec).unwrap();
    let mut canvas = RecordingSurface::new();
    model.draw(&mut canvas, 500.0, 700.0).unwrap();

    // Curved casing layers render as annulus sectors, so arc commands
    // at the casing arc radii must appear (560 and 610 outer radii).
    let has_casing_arc = canvas.ops().iter().any(|op| {
        matches!(op, CanvasOp::ArcNegative { radius, .. } if (*radius - 610.0).abs() < 1e-9)
    });
    assert!(has_casing_arc);
}
