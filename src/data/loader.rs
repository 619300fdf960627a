// src/data/loader.rs

use super::error::LoadError;
use super::record::{Dataset, NumericTable, PriceRecord};
use super::{
    DATE_COL, DEPARTMENT_COL, LATITUDE_COL, LONGITUDE_COL, MONTH_COL, MUNICIPALITY_COL,
    PRICE_COL, YEAR_COL,
};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use std::fs;
use std::path::Path;

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Reads the file as latin-1 (a UTF-8 BOM switches to UTF-8) and parses it.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let (text, encoding, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
    if had_errors {
        debug!("{} decoded with replacement characters", encoding.name());
    }

    let dataset = parse_dataset(&text)?;
    info!(
        "Loaded {} price rows and {} numeric columns from {}",
        dataset.records.len(),
        dataset.numeric.width(),
        path.display()
    );
    Ok(dataset)
}

/// Month-first when slashed, matching what the price portal exports.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

/// Tracks whether a column stays numeric across every row.
struct ColumnProbe {
    index: usize,
    name: String,
    values: Vec<Option<f64>>,
    numeric: bool,
}

impl ColumnProbe {
    fn observe(&mut self, cell: &str) {
        if !self.numeric {
            return;
        }
        let cell = cell.trim();
        if cell.is_empty() {
            self.values.push(None);
            return;
        }
        match cell.parse::<f64>() {
            // NaN and infinities count as missing.
            Ok(v) => self.values.push(Some(v).filter(|v| v.is_finite())),
            Err(_) => {
                self.numeric = false;
                self.values = Vec::new();
            }
        }
    }

    fn is_numeric_column(&self) -> bool {
        self.numeric && self.values.iter().any(Option::is_some)
    }
}

fn parse_coord(cell: Option<&str>) -> Option<f64> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub fn parse_dataset(text: &str) -> Result<Dataset, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = rdr.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| position(name).ok_or_else(|| LoadError::MissingColumn(name.into()));

    let date_idx = require(DATE_COL)?;
    let price_idx = require(PRICE_COL)?;
    let dept_idx = require(DEPARTMENT_COL)?;
    let muni_idx = require(MUNICIPALITY_COL)?;
    let lat_idx = position(LATITUDE_COL);
    let lon_idx = position(LONGITUDE_COL);

    let mut probes: Vec<ColumnProbe> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_idx && *i != dept_idx && *i != muni_idx)
        .map(|(index, name)| ColumnProbe {
            index,
            name: name.to_string(),
            values: Vec::new(),
            numeric: true,
        })
        .collect();

    let mut records = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        // Header is line 1.
        let line = row + 2;
        let record = result?;
        let cell = |i: usize| record.get(i).unwrap_or("");

        let date = parse_date(cell(date_idx)).ok_or_else(|| LoadError::InvalidDate {
            line,
            value: cell(date_idx).to_string(),
        })?;

        let price = cell(price_idx)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| LoadError::InvalidPrice {
                line,
                value: cell(price_idx).to_string(),
            })?;

        let latitude = parse_coord(lat_idx.map(cell));
        let longitude = parse_coord(lon_idx.map(cell));
        if lat_idx.is_some() && latitude.is_none() {
            debug!("Line {line}: no usable latitude");
        }

        for probe in probes.iter_mut() {
            probe.observe(cell(probe.index));
        }

        records.push(PriceRecord {
            municipality: cell(muni_idx).trim().to_string(),
            department: cell(dept_idx).trim().to_string(),
            date,
            price,
            latitude,
            longitude,
        });
    }

    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut numeric = NumericTable::default();
    for probe in probes.into_iter().filter(ColumnProbe::is_numeric_column) {
        numeric.push_column(probe.name, probe.values);
    }
    numeric.push_column(
        YEAR_COL,
        records.iter().map(|r| Some(r.year() as f64)).collect(),
    );
    numeric.push_column(
        MONTH_COL,
        records.iter().map(|r| Some(r.month() as f64)).collect(),
    );

    Ok(Dataset::new(records, numeric))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "CODIGO_MUNICIPIO,DEPARTAMENTO_EDS,MUNICIPIO_EDS,FECHA_PRECIO,PRECIO_PROMEDIO_PUBLICADO,LATITUD_MUNICIPIO,LONGITUD_MUNICIPIO,TIPO";

    #[test]
    fn parses_rows_and_discovers_numeric_columns() {
        let csv = format!(
            "{HEADER}\n\
             5001,ANTIOQUIA,MEDELLIN,2024-01-01,2900,6.25,-75.56,EDS\n\
             11001,BOGOTA D.C.,BOGOTA,01/02/2024 12:00:00 AM,3100,4.6,-74.08,EDS\n\
             76001,VALLE,CALI,2024-02-01T00:00:00.000,3000,,,EDS\n"
        );

        let ds = parse_dataset(&csv).unwrap();

        assert_eq!(ds.records.len(), 3);
        assert_eq!(ds.records[1].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(ds.records[2].coordinates(), None);
        assert_eq!(ds.records[0].coordinates(), Some((6.25, -75.56)));

        // TIPO is text and is left out; year and month are appended.
        assert_eq!(
            ds.numeric.names,
            vec![
                "CODIGO_MUNICIPIO",
                "PRECIO_PROMEDIO_PUBLICADO",
                "LATITUD_MUNICIPIO",
                "LONGITUD_MUNICIPIO",
                "ANIO",
                "MES"
            ]
        );
        assert_eq!(
            ds.numeric.column("LATITUD_MUNICIPIO").unwrap()[2],
            None
        );
        assert_eq!(ds.numeric.column("MES").unwrap()[2], Some(2.0));
    }

    #[test]
    fn non_finite_cells_are_missing_values() {
        let csv = "DEPARTAMENTO_EDS,MUNICIPIO_EDS,FECHA_PRECIO,PRECIO_PROMEDIO_PUBLICADO,VOLUMEN\n\
                   META,VILLAVICENCIO,2024-01-01,2400,NaN\n\
                   META,VILLAVICENCIO,2024-02-01,2500,inf\n\
                   META,VILLAVICENCIO,2024-03-01,2600,-infinity\n\
                   META,VILLAVICENCIO,2024-04-01,2700,12.5\n";

        let ds = parse_dataset(csv).unwrap();

        assert_eq!(
            ds.numeric.column("VOLUMEN").unwrap(),
            &[None, None, None, Some(12.5)][..]
        );
    }

    #[test]
    fn times_on_the_same_day_share_a_period() {
        let csv = "DEPARTAMENTO_EDS,MUNICIPIO_EDS,FECHA_PRECIO,PRECIO_PROMEDIO_PUBLICADO\n\
                   META,VILLAVICENCIO,2024-03-01 08:00:00,2400\n\
                   META,VILLAVICENCIO,03/01/2024 05:30:00 PM,2600\n";

        let ds = parse_dataset(csv).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        assert_eq!(ds.first_date(), Some(day));
        assert_eq!(ds.last_date(), Some(day));
        assert_eq!(ds.rows_on(day).count(), 2);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let err = parse_dataset("DEPARTAMENTO_EDS,MUNICIPIO_EDS,FECHA_PRECIO\nA,B,2024-01-01\n")
            .unwrap_err();
        assert_eq!(err, LoadError::MissingColumn(PRICE_COL.to_string()));
    }

    #[test]
    fn bad_date_and_bad_price_carry_line_numbers() {
        let bad_date = format!("{HEADER}\n1,A,B,not a date,100,1,1,X\n");
        assert_eq!(
            parse_dataset(&bad_date).unwrap_err(),
            LoadError::InvalidDate {
                line: 2,
                value: "not a date".into()
            }
        );

        let bad_price = format!(
            "{HEADER}\n1,A,B,2024-01-01,100,1,1,X\n1,A,B,2024-01-01,caro,1,1,X\n"
        );
        assert_eq!(
            parse_dataset(&bad_price).unwrap_err(),
            LoadError::InvalidPrice {
                line: 3,
                value: "caro".into()
            }
        );
    }

    #[test]
    fn header_only_file_is_empty() {
        assert_eq!(
            parse_dataset(&format!("{HEADER}\n")).unwrap_err(),
            LoadError::Empty
        );
    }

    #[test]
    fn load_decodes_latin1_bytes() {
        let mut bytes = b"DEPARTAMENTO_EDS,MUNICIPIO_EDS,FECHA_PRECIO,PRECIO_PROMEDIO_PUBLICADO\n".to_vec();
        // "BOYAC\xc1" is BOYACÁ in latin-1.
        bytes.extend_from_slice(b"BOYAC\xc1,TUNJA,2024-03-01,2800\n");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("precios.csv");
        std::fs::write(&path, &bytes).unwrap();

        let ds = load_dataset(&path).unwrap();

        assert_eq!(ds.records[0].department, "BOYACÁ");
        assert_eq!(ds.records[0].price, 2800.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_dataset(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn parse_date_accepts_portal_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        for raw in [
            "2025-03-01",
            "2025-03-01 00:00:00",
            "2025-03-01T00:00:00.000",
            "03/01/2025",
            "03/01/2025 12:00:00 AM",
        ] {
            assert_eq!(parse_date(raw), Some(expected), "format {raw}");
        }
        assert_eq!(parse_date("2025-13-01"), None);
        assert_eq!(parse_date(""), None);
    }
}
