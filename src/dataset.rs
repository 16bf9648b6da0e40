//! Mileage and price samples read from a CSV file.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};

const MILEAGE_COLUMN: &str = "km";
const PRICE_COLUMN: &str = "price";

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read the CSV")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("invalid data format at row {row}: `{value}` is not a finite number in column `{column}`")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("invalid {column} value {value} at row {row}: must be within [0, {max}]")]
    OutOfRange {
        row: usize,
        column: &'static str,
        value: f64,
        max: f64,
    },

    #[error("the dataset is empty or contains no valid data")]
    Empty,
}

/// Accepted value bounds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Limits {
    pub max_mileage: f64,
    pub max_price: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_mileage: 1e10,
            max_price: 1e15,
        }
    }
}

/// Index-aligned mileages and prices.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub mileages: Vec<f64>,
    pub prices: Vec<f64>,
}

impl Dataset {
    #[tracing::instrument(level = "debug", skip(limits))]
    pub fn read(path: &Path, limits: Limits) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(csv::Error::from)?;
        Self::from_reader(file, limits)
    }

    pub fn from_reader<R: Read>(reader: R, limits: Limits) -> Result<Self, DatasetError> {
        Self::parse(ReaderBuilder::new().trim(Trim::All).from_reader(reader), limits)
    }

    fn parse<R: Read>(mut reader: csv::Reader<R>, limits: Limits) -> Result<Self, DatasetError> {
        let headers = reader.headers()?;
        let mileage_index = column_index(headers, MILEAGE_COLUMN)?;
        let price_index = column_index(headers, PRICE_COLUMN)?;

        let mut dataset = Self {
            mileages: Vec::new(),
            prices: Vec::new(),
        };
        let mut record = StringRecord::new();
        let mut row = 0;
        while reader.read_record(&mut record)? {
            let mileage = parse_field(&record, row, mileage_index, MILEAGE_COLUMN)?;
            check_range(mileage, row, MILEAGE_COLUMN, limits.max_mileage)?;
            let price = parse_field(&record, row, price_index, PRICE_COLUMN)?;
            check_range(price, row, PRICE_COLUMN, limits.max_price)?;

            dataset.mileages.push(mileage);
            dataset.prices.push(price);
            row += 1;
        }

        if dataset.is_empty() {
            return Err(DatasetError::Empty);
        }
        tracing::debug!(n_samples = dataset.len(), "loaded");
        Ok(dataset)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mileages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mileages.is_empty()
    }
}

fn column_index(headers: &StringRecord, column: &'static str) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or(DatasetError::MissingColumn(column))
}

fn parse_field(
    record: &StringRecord,
    row: usize,
    index: usize,
    column: &'static str,
) -> Result<f64, DatasetError> {
    let value = record.get(index).unwrap_or_default();
    match f64::from_str(value) {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(DatasetError::InvalidNumber {
            row,
            column,
            value: value.to_string(),
        }),
    }
}

fn check_range(value: f64, row: usize, column: &'static str, max: f64) -> Result<(), DatasetError> {
    if (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(DatasetError::OutOfRange {
            row,
            column,
            value,
            max,
        })
    }
}
