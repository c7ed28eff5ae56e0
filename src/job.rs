//! JSON job files: parsing, validation and rendering.
//!
//! The drawing engine assumes fully validated input, so every business
//! rule — positive dimensions, strict layer nesting, the bend angle
//! range, segment-angle divisibility and the flange designation — is
//! enforced here at the boundary before a model is constructed.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use pipedraw_model::{
    BendPipeModel, BendSpec, FlangeSpec, PipeComponent, StraightPipeModel, StraightSpec,
};
use pipedraw_page::{DrawingPage, PageInfo, PageSize};
use pipedraw_render::{PixmapSurface, SvgSurface};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

/// Output selection of a job file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSpec {
    pub format: OutputFormat,
    pub size: PageSize,
    pub file: String,
}

impl Default for OutputSpec {
    fn default() -> Self {
        OutputSpec {
            format: OutputFormat::Svg,
            size: PageSize::Letter,
            file: "drawing.svg".to_string(),
        }
    }
}

/// The component described by a job file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobComponent {
    Straight(StraightSpec),
    Bend(BendSpec),
}

/// A complete drawing job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFile {
    #[serde(default)]
    pub output: OutputSpec,
    #[serde(default)]
    pub info: PageInfo,
    pub component: JobComponent,
}

impl JobFile {
    /// Loads and parses a job file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read job file {}", path.display()))?;
        let job: JobFile = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse job file {}", path.display()))?;
        Ok(job)
    }

    /// Checks every business rule the drawing engine assumes.
    pub fn validate(&self) -> Result<()> {
        match &self.component {
            JobComponent::Straight(s) => {
                if s.length <= 0.0 {
                    bail!("length must be positive, got {}", s.length);
                }
                validate_layers(s.casing_od, s.casing_id, s.lining_od, s.lining_id)?;
                validate_flange(&s.flange)?;
            }
            JobComponent::Bend(b) => {
                if b.nominal_radius <= 0.0 {
                    bail!("nominal radius must be positive, got {}", b.nominal_radius);
                }
                if !(b.bend_angle > 0.0 && b.bend_angle <= 90.0) {
                    bail!(
                        "bend angle must be within (0, 90] degrees, got {}",
                        b.bend_angle
                    );
                }
                if b.segment_angle <= 0.0 {
                    bail!("segment angle must be positive, got {}", b.segment_angle);
                }
                let bend_c = (b.bend_angle * 100.0).round() as i64;
                let seg_c = (b.segment_angle * 100.0).round() as i64;
                if seg_c == 0 || bend_c % seg_c != 0 {
                    bail!(
                        "segment angle {} does not evenly divide bend angle {}",
                        b.segment_angle,
                        b.bend_angle
                    );
                }
                validate_layers(b.casing_od, b.casing_id, b.lining_od, b.lining_id)?;
                validate_flange(&b.flange)?;
            }
        }
        Ok(())
    }
}

fn validate_layers(casing_od: f64, casing_id: f64, lining_od: f64, lining_id: f64) -> Result<()> {
    if !(casing_od > casing_id && casing_id > lining_od && lining_od > lining_id) {
        bail!(
            "layers must nest strictly: casing {casing_od}/{casing_id} over \
             lining {lining_od}/{lining_id}"
        );
    }
    if lining_id <= 0.0 {
        bail!("lining inside diameter must be positive, got {lining_id}");
    }
    Ok(())
}

fn validate_flange(designation: &str) -> Result<()> {
    if FlangeSpec::lookup(designation).is_err() {
        let known: Vec<&str> = FlangeSpec::designations().collect();
        bail!(
            "unknown flange designation {designation}; expected one of {}",
            known.join(", ")
        );
    }
    Ok(())
}

/// Renders a validated job to its output file.
///
/// Returns the solved drawing scale factor.
pub fn render_job(job: &JobFile, out_path: impl AsRef<Path>) -> Result<f64> {
    let out_path = out_path.as_ref();
    let page = DrawingPage::new(job.output.size, job.info.clone());

    let component: Box<dyn PipeComponent> = match &job.component {
        JobComponent::Straight(spec) => Box::new(StraightPipeModel::new(spec)?),
        JobComponent::Bend(spec) => Box::new(BendPipeModel::new(spec)?),
    };

    let scale = match job.output.format {
        OutputFormat::Svg => {
            let mut canvas = SvgSurface::new(page.width(), page.height());
            let scale = page.render(component.as_ref(), &mut canvas)?;
            canvas.write_to(out_path)?;
            scale
        }
        OutputFormat::Png => {
            let mut canvas =
                PixmapSurface::new(page.width() as u32, page.height() as u32)?;
            let scale = page.render(component.as_ref(), &mut canvas)?;
            canvas.write_png(out_path)?;
            scale
        }
    };

    info!(path = %out_path.display(), scale, "wrote drawing");
    Ok(scale)
}
