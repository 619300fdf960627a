// src/data/record.rs

use chrono::{Datelike, NaiveDate};

/// One row of the published price table.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub municipality: String,
    pub department: String,
    pub date: NaiveDate,
    pub price: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PriceRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Both coordinates, when the row has them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Every numeric column of the CSV, in file order, plus the derived
/// year and month. Cells that were empty are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericTable {
    pub names: Vec<String>,
    pub columns: Vec<Vec<Option<f64>>>,
}

impl NumericTable {
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        self.names.push(name.into());
        self.columns.push(values);
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    pub fn width(&self) -> usize {
        self.names.len()
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<PriceRecord>,
    pub numeric: NumericTable,
}

impl Dataset {
    pub fn new(records: Vec<PriceRecord>, numeric: NumericTable) -> Self {
        Self { records, numeric }
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).min()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }

    pub fn rows_on(&self, date: NaiveDate) -> impl Iterator<Item = &PriceRecord> {
        self.records.iter().filter(move |r| r.date == date)
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.price)
    }
}
