use pipedraw::{render_job, JobComponent, JobFile, OutputFormat, PageSize};

fn straight_job(format: OutputFormat, file: &str) -> JobFile {
    let json = format!(
        r#"{{
            "output": {{ "format": "{}", "size": "Letter", "file": "{}" }},
            "info": {{ "title": "3000mm straight", "customer": "Acme Process" }},
            "component": {{
                "kind": "straight",
                "length": 3000.0,
                "casing_od": 220.0,
                "casing_id": 200.0,
                "lining_od": 180.0,
                "lining_id": 160.0,
                "flange": "200PN16"
            }}
        }}"#,
        match format {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        },
        file
    );
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_renders_svg_job_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("straight.svg");

    let job = straight_job(OutputFormat::Svg, "straight.svg");
    job.validate().unwrap();
    let scale = render_job(&job, &out).unwrap();

    assert!(scale > 0.0);
    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("<svg"));
    assert!(content.contains("3000mm straight"));
}

#[test]
fn test_renders_png_job_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("straight.png");

    let job = straight_job(OutputFormat::Png, "straight.png");
    job.validate().unwrap();
    render_job(&job, &out).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_job_defaults() {
    let json = r#"{
        "component": {
            "kind": "straight",
            "length": 1000.0,
            "casing_od": 220.0,
            "casing_id": 200.0,
            "lining_od": 180.0,
            "lining_id": 160.0,
            "flange": "100PN16"
        }
    }"#;
    let job: JobFile = serde_json::from_str(json).unwrap();
    assert_eq!(job.output.format, OutputFormat::Svg);
    assert_eq!(job.output.size, PageSize::Letter);
    assert!(matches!(job.component, JobComponent::Straight(_)));
}
