use riding_binplot::prelude::*;
use std::path::Path;

/// Quebec provincial ridings as hexagons, packed by administrative region
/// and coloured by region. Also shows what happens when a province without
/// a provincial layout is requested.
fn main() -> anyhow::Result<()> {
    let quebec = ReferenceLayout::quebec()?;

    let mut table = RidingTable::new(&["code", "region"]);
    for riding in quebec.ridings() {
        table.push_row(vec![riding.code.into(), riding.region.as_str().into()])?;
    }

    let plot = BinPlot::new("region", "code")
        .provincial(true)
        .region(Some("Québec"))
        .arrange(true)
        .shape(CellShape::Hexagon);
    let layout = plot.layout(&table)?;
    if let FillScale::Discrete { categories } = &layout.scale {
        println!("{} ridings in {} regions", layout.len(), categories.len());
    }
    for record in layout.records().iter().take(5) {
        println!("{:?}", record);
    }

    let config = RenderConfig::from_ron_str(
        r#"(width: 200.0, height: 200.0, stroke: "black", stroke_width: 0.2)"#,
    )?;
    std::fs::create_dir_all("images")?;
    let fname = Path::new(file!()).file_stem().unwrap().to_str().unwrap();
    save_svg(&layout, &config, Path::new(&format!("images/{}.svg", fname)))?;

    match plot.region(Some("Ontario")).layout(&table) {
        Err(err) => println!("Ontario: {}", err),
        Ok(_) => println!("Ontario unexpectedly has a provincial layout"),
    }
    Ok(())
}
