use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use stackalign_core::hypercube::get_hypercube;
use stackalign_core::io::table_io::load_table;
use stackalign_core::pipeline::StackAligner;

#[derive(Args)]
pub struct InfoArgs {
    /// Input table (JSON)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let table = load_table(&args.file)
        .with_context(|| format!("Failed to read table {}", args.file.display()))?;

    println!("File:        {}", args.file.display());
    println!("Rows:        {}", table.row_count());
    println!("Frames:      {}", table.frame_count());
    if let (Some(first), Some(last)) = (table.frame_axis.first(), table.frame_axis.last()) {
        println!("Frame axis:  {} .. {}", first, last);
    }

    for meta in &table.metas {
        let (min, max) = meta
            .values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        println!("Variable:    {} [{} .. {}]", meta.name, min, max);
    }

    let mut aligner = StackAligner::default();
    aligner.set_data(Some(table));
    let (Some((x, y)), Some(table)) = (aligner.resolve_axes(), aligner.data()) else {
        return Ok(());
    };

    match get_hypercube(table, &x, &y) {
        Ok(cube) => {
            println!(
                "Image grid:  {}x{} ({} = x, {} = y)",
                cube.width(),
                cube.height(),
                x,
                y
            );
            let nans = cube.nan_count();
            if nans > 0 {
                println!("Unknowns:    {}", nans);
            }
        }
        Err(e) => println!("Image grid:  unavailable ({e})"),
    }

    Ok(())
}
