use crate::TapfareError;
use kdam::tqdm;
use std::path::Path;
use tapfare_core::model::Tap;

/// reads every row of a taps CSV file. fields are trimmed, so headers and
/// values written as `ID, DateTimeUTC, ...` are accepted.
pub fn read_taps(path: &Path) -> Result<Vec<Tap>, TapfareError> {
    let filepath = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| TapfareError::ReadError {
        filepath: filepath.clone(),
        error: e.to_string(),
    })?;
    read_taps_from(file, &filepath)
}

/// reads taps from any CSV source. `source_name` labels progress and errors.
pub fn read_taps_from<R: std::io::Read>(
    source: R,
    source_name: &str,
) -> Result<Vec<Tap>, TapfareError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    let row_iter = tqdm!(
        reader.into_deserialize::<Tap>(),
        desc = format!("reading {source_name}")
    );
    let taps = row_iter
        .enumerate()
        .map(|(row_idx, row)| {
            row.map_err(|e| TapfareError::ReadError {
                filepath: source_name.to_string(),
                error: format!("row {row_idx}: {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("read {} taps from {source_name}", taps.len());
    Ok(taps)
}
