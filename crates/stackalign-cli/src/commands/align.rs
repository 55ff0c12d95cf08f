use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::Style;
use stackalign_core::io::table_io::{load_table, save_shifts, save_table};
use stackalign_core::pipeline::config::AlignConfig;
use stackalign_core::pipeline::StackAligner;
use tracing::debug;

use crate::progress::BarReporter;
use crate::summary::{print_align_summary, print_shift_curves};

#[derive(Args)]
pub struct AlignArgs {
    /// Input table (JSON)
    pub file: PathBuf,

    /// Tracking table (JSON) with the same frames, used to estimate shifts
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Estimate shifts on the tracking table instead of the input
    #[arg(long)]
    pub use_reference: bool,

    /// Alignment config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Variable used as the x axis
    #[arg(long)]
    pub x_axis: Option<String>,

    /// Variable used as the y axis
    #[arg(long)]
    pub y_axis: Option<String>,

    /// Correlate Sobel edge images instead of raw frames
    #[arg(long)]
    pub sobel: bool,

    /// Upsample factor for sub-pixel precision (1 = whole pixels)
    #[arg(long)]
    pub upsample: Option<usize>,

    /// Reference frame number, starting at 1
    #[arg(long)]
    pub reference_frame: Option<usize>,

    /// Save the shift curves (JSON)
    #[arg(long)]
    pub shifts: Option<PathBuf>,

    /// Output table path
    #[arg(short, long, default_value = "aligned.json")]
    pub output: PathBuf,
}

pub fn run(args: &AlignArgs) -> Result<()> {
    let config = build_config(args)?;
    debug!(?config, "Alignment config");

    let data = load_table(&args.file)
        .with_context(|| format!("Failed to read table {}", args.file.display()))?;
    let tracking = args
        .reference
        .as_ref()
        .map(|path| {
            load_table(path)
                .with_context(|| format!("Failed to read tracking table {}", path.display()))
        })
        .transpose()?;

    let mut aligner = StackAligner::new(config);
    aligner.set_data(Some(data));
    aligner.set_reference(tracking);

    let warn_style = Style::new().yellow();
    for warning in aligner.warnings() {
        eprintln!("{}", warn_style.apply_to(warning));
    }

    let Some(params) = aligner.params() else {
        bail!("Nothing to align: the input table has no variables to use as axes");
    };
    let tracking_path = aligner
        .active_tracking()
        .and(args.reference.as_deref());
    print_align_summary(&params, &args.file, tracking_path, &args.output);

    let reporter = BarReporter::new()?;
    let output = aligner
        .commit(&reporter)
        .context("Alignment failed")?;
    reporter.finish();

    let Some(output) = output else {
        bail!("Nothing to align: the input table has no frames");
    };

    println!();
    print_shift_curves(&output.shifts, params.reference_frame, &output.crop);

    save_table(&output.table, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved aligned stack to {}", args.output.display());

    if let Some(ref path) = args.shifts {
        save_shifts(&output.shifts, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved shift curves to {}", path.display());
    }

    Ok(())
}

/// Config file (or defaults) with command-line overrides applied.
fn build_config(args: &AlignArgs) -> Result<AlignConfig> {
    let mut config = match args.config {
        Some(ref path) => AlignConfig::load(path)
            .with_context(|| format!("Invalid alignment config {}", path.display()))?,
        None => AlignConfig::default(),
    };

    if args.x_axis.is_some() {
        config.x_axis = args.x_axis.clone();
    }
    if args.y_axis.is_some() {
        config.y_axis = args.y_axis.clone();
    }
    if args.use_reference {
        config.use_reference = true;
    }
    if args.sobel {
        config.sobel_filter = true;
    }
    if let Some(upsample) = args.upsample {
        config.upsample_factor = upsample;
    }
    if let Some(frame) = args.reference_frame {
        config.reference_frame = frame.max(1) - 1;
    }

    config.validate()?;
    Ok(config)
}
