use crate::TapfareError;
use std::path::Path;
use tapfare_core::model::Trip;

/// writes trips to a CSV file. an existing file is only replaced when
/// `overwrite` is set. rows are encoded in memory first so a failed encode
/// leaves no partial file behind.
pub fn write_trips(trips: &[Trip], path: &Path, overwrite: bool) -> Result<(), TapfareError> {
    let filepath = path.display().to_string();
    if path.exists() && !overwrite {
        return Err(TapfareError::OutputExistsError(filepath));
    }
    let mut buffer: Vec<u8> = Vec::new();
    write_trips_to(trips, &mut buffer, &filepath)?;
    std::fs::write(path, buffer).map_err(|e| TapfareError::WriteError {
        filepath: filepath.clone(),
        error: e.to_string(),
    })?;
    log::info!("wrote {} trips to {filepath}", trips.len());
    Ok(())
}

/// writes trips to any CSV sink. the header is always written, even when
/// there are no trips.
pub fn write_trips_to<W: std::io::Write>(
    trips: &[Trip],
    sink: W,
    sink_name: &str,
) -> Result<(), TapfareError> {
    let write_error = |e: csv::Error| TapfareError::WriteError {
        filepath: sink_name.to_string(),
        error: e.to_string(),
    };
    let mut writer = csv::Writer::from_writer(sink);
    if trips.is_empty() {
        writer.write_record(Trip::CSV_HEADER).map_err(write_error)?;
    }
    for trip in trips.iter() {
        writer.serialize(trip).map_err(write_error)?;
    }
    writer.flush().map_err(|e| TapfareError::WriteError {
        filepath: sink_name.to_string(),
        error: e.to_string(),
    })
}
