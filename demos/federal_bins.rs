use riding_binplot::prelude::*;
use std::path::Path;

/// Every federal riding, coloured by a made up turnout figure, drawn four
/// ways: square and hex tiles, canonical and arranged.
fn main() -> anyhow::Result<()> {
    let federal = ReferenceLayout::federal()?;

    // A stand-in for real election results: turnout between 50% and 80%.
    let mut table = RidingTable::new(&["riding_code", "turnout"]);
    for riding in federal.ridings() {
        let turnout = 0.5 + f64::from((riding.code * 7919) % 300) / 1000.0;
        table.push_row(vec![riding.code.into(), turnout.into()])?;
    }
    // One riding that doesn't exist, to show the mismatch report.
    table.push_row(vec![99001u32.into(), 0.5.into()])?;

    let config = RenderConfig::default();
    let fname = Path::new(file!()).file_stem().unwrap().to_str().unwrap();
    std::fs::create_dir_all("images")?;

    for (arrange, shape) in [
        (false, CellShape::Square),
        (false, CellShape::Hexagon),
        (true, CellShape::Square),
        (true, CellShape::Hexagon),
    ] {
        let layout = BinPlot::new("turnout", "riding_code")
            .continuous(true)
            .arrange(arrange)
            .shape(shape)
            .layout(&table)?;
        println!(
            "{:?} arrange={}: {} tiles, {} rows dropped",
            shape,
            arrange,
            layout.len(),
            layout.report.mismatched
        );
        let out = format!(
            "images/{}_{}_{}.svg",
            fname,
            if arrange { "arranged" } else { "canonical" },
            if shape == CellShape::Hexagon { "hex" } else { "square" }
        );
        save_svg(&layout, &config, Path::new(&out))?;
    }
    Ok(())
}
