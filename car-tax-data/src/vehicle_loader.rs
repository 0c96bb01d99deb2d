use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use car_tax_core::{LoadError, Vehicle, VehicleLoader};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::decimal::parse_decimal;
use crate::read_error;

/// Fields every vehicle record must carry, in order.
const FIELD_COUNT: usize = 5;

const MAKE: usize = 0;
const LINE: usize = 1;
const YEAR: usize = 2;
const PRICE: usize = 3;
const IMAGE_REF: usize = 4;

/// Loader for the vehicle catalog text file.
///
/// The first line holds the number of records `N`. It is followed by `N`
/// comma-delimited lines:
///
/// ```text
/// 3
/// Mazda,Allegro,2008,28000000,allegro.jpg
/// Toyota,Corolla,2015,45000000,corolla.jpg
/// Renault,Logan,2012,30000000,logan.jpg
/// ```
///
/// Fields are trimmed, extra fields are ignored, and anything after the
/// `N`-th record is never read.
#[derive(Debug, Clone)]
pub struct VehicleFileLoader {
    path: PathBuf,
}

impl VehicleFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse vehicles from any reader, such as a file or a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Vehicle>, LoadError> {
        let mut reader = BufReader::new(reader);

        let mut header = String::new();
        reader
            .read_line(&mut header)
            .map_err(|e| LoadError::Io(e.to_string()))?;
        let header = header.trim();
        let expected: usize = header
            .parse()
            .map_err(|_| LoadError::InvalidCount(header.to_string()))?;

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(reader);

        // The count comes from the file, so it is never used to pre-allocate.
        let mut vehicles = Vec::new();
        for (index, result) in csv_reader.records().take(expected).enumerate() {
            let number = index + 1;
            let record = result.map_err(|e| malformed(number, e.to_string()))?;
            vehicles.push(parse_record(&record, number)?);
        }

        if vehicles.len() < expected {
            return Err(LoadError::MissingRecords {
                expected,
                found: vehicles.len(),
            });
        }

        debug!(count = vehicles.len(), "parsed vehicle records");
        Ok(vehicles)
    }
}

impl VehicleLoader for VehicleFileLoader {
    fn load_vehicles(&self) -> Result<Vec<Vehicle>, LoadError> {
        let file = File::open(&self.path).map_err(|e| read_error(&self.path, &e))?;
        let vehicles = Self::parse(file)?;

        info!(
            path = %self.path.display(),
            count = vehicles.len(),
            "loaded vehicle catalog"
        );
        Ok(vehicles)
    }
}

fn parse_record(
    record: &StringRecord,
    number: usize,
) -> Result<Vehicle, LoadError> {
    if record.len() < FIELD_COUNT {
        return Err(malformed(
            number,
            format!("expected {FIELD_COUNT} fields, found {}", record.len()),
        ));
    }

    let price = parse_decimal(&record[PRICE]).map_err(|reason| malformed(number, reason))?;

    Vehicle::new(
        &record[MAKE],
        &record[LINE],
        &record[YEAR],
        price,
        &record[IMAGE_REF],
    )
    .map_err(|e| malformed(number, e.to_string()))
}

fn malformed(
    record: usize,
    reason: String,
) -> LoadError {
    LoadError::MalformedRecord { record, reason }
}
