//! Address command - resolve a direction path to its area.

use ninefold::coord::{Direction, DirectionAddress, CAPACITY};

use crate::error::CliError;

/// Run the address command.
///
/// Directions are listed front to back; the front one selects the
/// coarsest ninth.
pub fn run(directions: &[Direction], side: Option<u32>) -> Result<(), CliError> {
    for line in describe(directions, side)? {
        println!("{}", line);
    }
    Ok(())
}

fn describe(directions: &[Direction], side: Option<u32>) -> Result<Vec<String>, CliError> {
    let address = DirectionAddress::from_slice(directions).ok_or_else(|| {
        CliError::Config(format!(
            "an address holds at most {} directions, got {}",
            CAPACITY,
            directions.len()
        ))
    })?;
    let area = address.area();

    let mut lines = vec![
        format!("Address: {}", address),
        format!("Path id: {}", address.path_id()),
        format!("Survey:  {}", address.survey()),
        format!(
            "Area:    center ({:.6}, {:.6}), size {:.6}",
            area.center.x, area.center.y, area.size
        ),
    ];

    if let Some(side) = side {
        let line = match area.pixel_rect(side) {
            Ok(rect) => format!("Pixels:  {} in a {}px raster", rect, side),
            Err(e) => format!("Pixels:  {}", e),
        };
        lines.push(line);
    }
    Ok(lines)
}
