//! Inspect command - show how a map would be split.

use std::path::Path;

use ninefold::map::{level_extent, JsonMapStore, MapDocument, MapError, MapStore, MAX_LEVEL};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the inspect command.
pub fn run(map: &Path) -> Result<(), CliError> {
    let runner = CliRunner::without_config()?;
    runner.log_startup("inspect");

    let document = JsonMapStore.load(map)?;

    println!("Map: {}", map.display());
    println!(
        "  Orientation: {}, {}x{} tiles of {}x{} px",
        document.orientation,
        document.width,
        document.height,
        document.tile_width,
        document.tile_height
    );

    match document.validate() {
        Ok(()) => println!("  Valid: yes"),
        Err(e) => {
            println!("  Valid: no ({})", e);
            return Ok(());
        }
    }

    let extent = document.extent()?;
    println!("  Extent: {}", extent);
    println!();

    for line in survey_table(&document, extent)? {
        println!("{}", line);
    }
    Ok(())
}

/// One line per survey level until the first unsized one.
fn survey_table(document: &MapDocument, extent: f64) -> Result<Vec<String>, MapError> {
    let mut lines = vec![format!(
        "  {:<6} {:<10} {:>8} {:>12}",
        "Survey", "Size", "Pixels", "Extent"
    )];

    let root = document.with_size_and_extent()?;
    for survey in 0..=MAX_LEVEL {
        let Some(size) = root.level_size(survey)? else {
            lines.push(format!("  {:<6} (not configured, pyramid ends)", survey));
            break;
        };
        lines.push(format!(
            "  {:<6} {:<10} {:>8} {:>12}",
            survey,
            size.to_string(),
            size.pixel_size(),
            level_extent(extent, survey)
        ));
    }
    Ok(lines)
}
