use std::path::Path;

use console::Style;
use stackalign_core::crop::CropWindow;
use stackalign_core::frame::Shift;
use stackalign_core::pipeline::config::StackParams;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    marker: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            marker: Style::new().yellow().bold(),
        }
    }
}

pub fn print_align_summary(
    params: &StackParams,
    input: &Path,
    tracking: Option<&Path>,
    output: &Path,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Stack Alignment"));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat("Stack Alignment".len()))
    );
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    match tracking {
        Some(path) => println!(
            "  {:<14}{}",
            s.label.apply_to("Tracking"),
            s.path.apply_to(path.display())
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Tracking"),
            s.disabled.apply_to("data only")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Axes"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("x"),
        s.value.apply_to(&params.x_axis)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("y"),
        s.value.apply_to(&params.y_axis)
    );
    println!();

    println!("  {}", s.header.apply_to("Parameters"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Filter"),
        s.method.apply_to(params.filter)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Upsample"),
        s.value.apply_to(format!(
            "{}x (1/{} px)",
            params.upsample_factor, params.upsample_factor
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Reference"),
        s.value.apply_to(format!("frame {}", params.reference_frame + 1))
    );
    println!();
}

/// Print the per-frame shift curves, frames numbered from 1.
pub fn print_shift_curves(shifts: &[Shift], reference_frame: usize, crop: &CropWindow) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Shift curves"));
    println!(
        "    {:>6}  {:>10}  {:>10}",
        s.label.apply_to("Frame"),
        s.label.apply_to("dy / px"),
        s.label.apply_to("dx / px")
    );
    for (i, shift) in shifts.iter().enumerate() {
        let marker = if i == reference_frame { "ref" } else { "" };
        println!(
            "    {:>6}  {:>10.3}  {:>10.3}  {}",
            i + 1,
            shift.dy,
            shift.dx,
            s.marker.apply_to(marker)
        );
    }
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Cropped to"),
        s.value.apply_to(crop_extent(crop))
    );
    if crop.is_empty() {
        println!(
            "  {:<14}{}",
            s.label.apply_to(""),
            s.disabled.apply_to("no region is valid in every frame")
        );
    }
    println!();
}

/// Crop bounds with the size of each axis next to its range.
fn crop_extent(crop: &CropWindow) -> String {
    format!(
        "rows {}..{} ({}), cols {}..{} ({})",
        crop.row_start,
        crop.row_end,
        crop.height(),
        crop.col_start,
        crop.col_end,
        crop.width()
    )
}
