use pipedraw_render::{Canvas, PixmapSurface, RecordingSurface, Rgb, SvgSurface};

fn draw_sample(canvas: &mut dyn Canvas) {
    canvas.set_color(Rgb::gray(0.8));
    canvas.move_to(10.0, 10.0);
    canvas.line_to(90.0, 10.0);
    canvas.line_to(90.0, 90.0);
    canvas.close_path();
    canvas.fill_preserve();
    canvas.set_color(Rgb::BLACK);
    canvas.stroke();

    canvas.save();
    canvas.translate(50.0, 50.0);
    canvas.rotate(std::f64::consts::FRAC_PI_4);
    canvas.set_dash(&[4.0, 2.0]);
    canvas.arc(0.0, 0.0, 20.0, 0.0, std::f64::consts::PI);
    canvas.stroke();
    canvas.restore();

    canvas.select_font("Arial", false);
    canvas.set_font_size(8.0);
    canvas.move_to(20.0, 95.0);
    canvas.show_text("220");
}

#[test]
fn test_svg_document_structure() {
    let mut svg = SvgSurface::new(100.0, 100.0);
    draw_sample(&mut svg);
    let out = svg.finish();

    assert!(out.starts_with("<?xml"));
    assert!(out.contains("viewBox=\"0 0 100 100\""));
    assert!(out.contains("fill=\"rgb(204,204,204)\""));
    assert!(out.contains("stroke-dasharray=\"4,2\""));
    assert!(out.contains(">220</text>"));
    assert!(out.trim_end().ends_with("</svg>"));
}

#[test]
fn test_svg_writes_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.svg");
    let mut svg = SvgSurface::new(50.0, 50.0);
    svg.move_to(0.0, 0.0);
    svg.line_to(50.0, 50.0);
    svg.stroke();
    svg.write_to(&path).unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().contains("<path"));
}

#[test]
fn test_pixmap_encodes_png() {
    let mut surface = PixmapSurface::new(100, 100).unwrap();
    draw_sample(&mut surface);
    let bytes = surface.encode_png().unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_pixmap_fill_is_visible() {
    let mut surface = PixmapSurface::new(100, 100).unwrap();
    draw_sample(&mut surface);
    // Interior of the filled triangle.
    let bytes = surface.encode_png().unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn test_text_metrics_agree_between_surfaces_without_fonts() {
    // The recording surface always uses the deterministic fallback; the
    // real surfaces fall back to the same metrics when the host has no
    // usable font, so extents are always positive either way.
    let mut rec = RecordingSurface::new();
    rec.set_font_size(8.0);
    let e = rec.text_extents("3000");
    assert!(e.width > 0.0 && e.height > 0.0);

    let mut svg = SvgSurface::new(10.0, 10.0);
    svg.select_font("Arial", false);
    svg.set_font_size(8.0);
    let e2 = svg.text_extents("3000");
    assert!(e2.width > 0.0 && e2.height > 0.0);
}

#[test]
fn test_save_restore_isolates_transforms() {
    let mut svg = SvgSurface::new(100.0, 100.0);
    svg.save();
    svg.translate(50.0, 0.0);
    svg.restore();
    svg.move_to(0.0, 0.0);
    svg.line_to(10.0, 0.0);
    svg.stroke();
    assert!(svg.finish().contains("M 0 0 L 10 0"));
}
