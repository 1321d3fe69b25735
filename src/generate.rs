//! Writes the full fixture set into an output directory

use crate::config::FixtureConfig;
use crate::emitter::{Emission, EmissionRequest, ImageEmitter};
use crate::error::Result;
use crate::fixtures::{FIXTURES, Fixture};
use crate::qr::Palette;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Generate every fixture using the loaded configuration.
pub fn generate(config: &FixtureConfig) -> Result<Vec<Emission>> {
    let emitter =
        ImageEmitter::new(config.render.render_config()?)?.with_verification(config.output.verify);
    generate_into(
        &config.output.directory,
        &FIXTURES,
        &emitter,
        config.render.palette(),
    )
}

/// Write `fixtures` into `directory` in order, stopping at the first failure.
///
/// The directory is created if it does not exist. Existing files with the
/// same names are overwritten.
pub fn generate_into(
    directory: &Path,
    fixtures: &[Fixture],
    emitter: &ImageEmitter,
    palette: Palette,
) -> Result<Vec<Emission>> {
    fs::create_dir_all(directory)?;

    let mut emissions = Vec::with_capacity(fixtures.len());
    for fixture in fixtures {
        debug!(category = %fixture.category, "{}", fixture.category.description());
        let destination = directory.join(fixture.file_name);
        let request = EmissionRequest::new(fixture.payload, &destination).with_palette(palette);
        emissions.push(emitter.emit(request)?);
    }

    info!(
        count = emissions.len(),
        "Mock QR codes generated in the '{}' directory",
        directory.display()
    );
    Ok(emissions)
}
