use crate::config::DashboardConfig;
use astra::{Body, Request, Response};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Closed clockwise square with its lower-left corner at (x, y).
pub fn square(x: f64, y: f64, size: f64) -> Vec<(f64, f64)> {
    vec![
        (x, y),
        (x, y + size),
        (x + size, y + size),
        (x + size, y),
        (x, y),
    ]
}

const NAME_LEN: usize = 50;

/// Writes `<stem>.shp` + `<stem>.dbf` (+ `<stem>.prj`) with one
/// single-ring polygon and one `DPTO_CNMBR` value per feature.
pub fn write_boundaries(
    dir: &Path,
    stem: &str,
    features: &[(&str, Vec<(f64, f64)>)],
    prj: Option<&str>,
) -> PathBuf {
    let mut records = Vec::new();
    for (i, (_, ring)) in features.iter().enumerate() {
        let mut content = Vec::new();
        content.extend_from_slice(&5i32.to_le_bytes());
        content.extend_from_slice(&[0u8; 32]);
        content.extend_from_slice(&1i32.to_le_bytes());
        content.extend_from_slice(&(ring.len() as i32).to_le_bytes());
        content.extend_from_slice(&0i32.to_le_bytes());
        for (x, y) in ring {
            content.extend_from_slice(&x.to_le_bytes());
            content.extend_from_slice(&y.to_le_bytes());
        }

        records.extend_from_slice(&(i as i32 + 1).to_be_bytes());
        records.extend_from_slice(&((content.len() / 2) as i32).to_be_bytes());
        records.extend_from_slice(&content);
    }

    let mut shp = vec![0u8; 100];
    shp[0..4].copy_from_slice(&9994i32.to_be_bytes());
    shp[24..28].copy_from_slice(&(((100 + records.len()) / 2) as i32).to_be_bytes());
    shp[28..32].copy_from_slice(&1000i32.to_le_bytes());
    shp[32..36].copy_from_slice(&5i32.to_le_bytes());
    shp.extend_from_slice(&records);

    let header_len: u16 = 32 + 32 + 1;
    let record_len: u16 = 1 + NAME_LEN as u16;
    let mut dbf = vec![0u8; 32];
    dbf[0] = 0x03;
    dbf[4..8].copy_from_slice(&(features.len() as u32).to_le_bytes());
    dbf[8..10].copy_from_slice(&header_len.to_le_bytes());
    dbf[10..12].copy_from_slice(&record_len.to_le_bytes());

    let mut field = [0u8; 32];
    field[..10].copy_from_slice(b"DPTO_CNMBR");
    field[11] = b'C';
    field[16] = NAME_LEN as u8;
    dbf.extend_from_slice(&field);
    dbf.push(0x0D);

    for (name, _) in features {
        let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(name);
        let mut cell = vec![b' '; NAME_LEN];
        cell[..encoded.len()].copy_from_slice(&encoded);
        dbf.push(b' ');
        dbf.extend_from_slice(&cell);
    }
    dbf.push(0x1A);

    let shp_path = dir.join(format!("{stem}.shp"));
    std::fs::write(&shp_path, shp).expect("write shp");
    std::fs::write(dir.join(format!("{stem}.dbf")), dbf).expect("write dbf");
    if let Some(wkt) = prj {
        std::fs::write(dir.join(format!("{stem}.prj")), wkt).expect("write prj");
    }
    shp_path
}

pub const PRICES_CSV: &str = "\
DEPARTAMENTO_EDS,MUNICIPIO_EDS,FECHA_PRECIO,PRECIO_PROMEDIO_PUBLICADO,LATITUD_MUNICIPIO,LONGITUD_MUNICIPIO
Caldas,MANIZALES,2024-01-01,3000,5.07,-75.52
Caldas,MANIZALES,2024-02-01,3300,5.07,-75.52
Meta,VILLAVICENCIO,2024-01-01,2400,4.14,-73.63
Meta,VILLAVICENCIO,2024-02-01,2400,,
Boyacá,TUNJA,2024-02-01,2800,5.53,-73.36
";

/// A config pointing at files written into `dir`. `with_map` adds a
/// boundary layer for CALDAS, META and BOYACÁ.
pub fn fixture_config(dir: &Path, csv: &str, with_map: bool) -> DashboardConfig {
    let csv_path = dir.join("precios.csv");
    let (latin1, _, _) = encoding_rs::WINDOWS_1252.encode(csv);
    std::fs::write(&csv_path, latin1).expect("write csv");

    let shapefile_override = if with_map {
        Some(write_boundaries(
            dir,
            "COLOMBIA",
            &[
                ("CALDAS", square(-75.9, 5.0, 0.8)),
                ("META", square(-74.0, 2.0, 3.0)),
                ("BOYAC\u{c1}", square(-74.0, 5.0, 1.5)),
            ],
            Some("GEOGCS[\"GCS_MAGNA\",DATUM[\"D_MAGNA\",SPHEROID[\"GRS_1980\",6378137.0,298.257222101]]]"),
        ))
    } else {
        Some(dir.join("missing").join("COLOMBIA.shp"))
    };

    DashboardConfig {
        csv_path,
        shapefile_override,
        ..DashboardConfig::default()
    }
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::from(String::new()))
        .unwrap()
}

pub fn read_body(mut resp: Response) -> String {
    let mut body_bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut body_bytes)
        .unwrap();
    String::from_utf8(body_bytes).unwrap()
}
