//! Convert command.

use std::io::Write;
use std::path::Path;

use crate::cli::output;
use crate::core::convert::{self, Format};
use crate::error::Result;

/// Convert a JSON records file, writing to `output` or stdout.
pub fn execute(input: &Path, format: &str, output_path: Option<&Path>) -> Result<()> {
    // reject the tag before reading anything
    let format: Format = format.parse()?;
    let records = convert::read_records(input)?;
    let payload = convert::convert_to(format, &records)?;

    match output_path {
        Some(path) => {
            std::fs::write(path, payload.data())?;
            output::success(&format!(
                "wrote {} records to {}",
                records.len(),
                output::name(&path.display().to_string())
            ));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(payload.data())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
