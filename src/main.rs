use anyhow::{Context, Result};

use pipedraw::{init_logging, render_job, JobFile};

fn main() -> Result<()> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let job_path = args
        .next()
        .context("usage: pipedraw <job.json> [output-file]")?;
    let out_override = args.next();

    let job = JobFile::load(&job_path)?;
    job.validate()
        .with_context(|| format!("invalid job file {job_path}"))?;

    let out_path = out_override.unwrap_or_else(|| job.output.file.clone());
    render_job(&job, &out_path)?;

    Ok(())
}
