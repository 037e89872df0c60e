use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::{ListingRecord, RECORD_HEADERS};

/// Write records as UTF-8 CSV with a `Brand,Price,Address,Image link` header.
///
/// The header is written even when there are no records.
pub fn write_csv<W: Write>(writer: W, records: &[ListingRecord]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(RECORD_HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn save_csv<P: AsRef<Path>>(path: P, records: &[ListingRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_csv(file, records)
}

pub fn to_csv_string(records: &[ListingRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Read records back from CSV written by [`write_csv`].
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ListingRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize() {
        records.push(row?);
    }

    Ok(records)
}

/// Save records as a pretty-printed JSON array
pub fn save_json<P: AsRef<Path>>(path: P, records: &[ListingRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
