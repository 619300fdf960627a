// src/geo/shapefile.rs
//
// Reader for the subset of the ESRI shapefile format used by boundary
// layers: polygon shapes from `.shp`, character attributes from `.dbf`,
// and the projection text from `.prj`.

use geo::{Area, Coord, LineString, MultiPolygon, Polygon};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const FILE_CODE: i32 = 9994;
const SHP_HEADER_LEN: usize = 100;

const SHAPE_NULL: i32 = 0;
const SHAPE_POLYGON: i32 = 5;
const SHAPE_POLYGON_Z: i32 = 15;
const SHAPE_POLYGON_M: i32 = 25;

#[derive(Debug)]
pub enum ShapefileError {
    Io { path: String, message: String },
    BadHeader(String),
    UnsupportedShape(i32),
    Truncated(String),
    RecordMismatch { shapes: usize, records: usize },
}

impl fmt::Display for ShapefileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapefileError::Io { path, message } => write!(f, "Cannot read {path}: {message}"),
            ShapefileError::BadHeader(msg) => write!(f, "Bad header: {msg}"),
            ShapefileError::UnsupportedShape(t) => write!(f, "Unsupported shape type {t}"),
            ShapefileError::Truncated(what) => write!(f, "Truncated {what}"),
            ShapefileError::RecordMismatch { shapes, records } => write!(
                f,
                "{shapes} shapes but {records} attribute records"
            ),
        }
    }
}

impl Error for ShapefileError {}

/// One shape with its attribute row.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    pub geometry: Option<MultiPolygon<f64>>,
    pub attributes: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct BoundaryLayer {
    pub features: Vec<BoundaryFeature>,
    /// Contents of the sibling `.prj`, if any.
    pub projection_wkt: Option<String>,
    pub field_names: Vec<String>,
}

fn read_file(path: &Path) -> Result<Vec<u8>, ShapefileError> {
    fs::read(path).map_err(|e| ShapefileError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Sibling file with the same stem, trying the extension in both cases.
fn sibling(path: &Path, ext: &str) -> Option<PathBuf> {
    [ext.to_lowercase(), ext.to_uppercase()]
        .into_iter()
        .map(|e| path.with_extension(e))
        .find(|p| p.is_file())
}

pub fn read_boundaries(shp_path: &Path) -> Result<BoundaryLayer, ShapefileError> {
    let shp = read_file(shp_path)?;
    let dbf_path = sibling(shp_path, "dbf").ok_or_else(|| ShapefileError::Io {
        path: shp_path.with_extension("dbf").display().to_string(),
        message: "attribute table not found".to_string(),
    })?;
    let dbf = read_file(&dbf_path)?;

    let projection_wkt = match sibling(shp_path, "prj") {
        Some(p) => {
            let bytes = read_file(&p)?;
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Some(text.trim().to_string())
        }
        None => None,
    };

    let shapes = parse_shp(&shp)?;
    let table = parse_dbf(&dbf)?;

    if shapes.len() != table.rows.len() {
        return Err(ShapefileError::RecordMismatch {
            shapes: shapes.len(),
            records: table.rows.len(),
        });
    }

    let features = shapes
        .into_iter()
        .zip(table.rows)
        .map(|(geometry, attributes)| BoundaryFeature {
            geometry,
            attributes,
        })
        .collect();

    Ok(BoundaryLayer {
        features,
        projection_wkt,
        field_names: table.field_names,
    })
}

fn be_i32(buf: &[u8], at: usize) -> Option<i32> {
    buf.get(at..at + 4)
        .map(|b| i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn le_i32(buf: &[u8], at: usize) -> Option<i32> {
    buf.get(at..at + 4)
        .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn le_f64(buf: &[u8], at: usize) -> Option<f64> {
    buf.get(at..at + 8).map(|b| {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(b);
        f64::from_le_bytes(raw)
    })
}

fn le_u16(buf: &[u8], at: usize) -> Option<u16> {
    buf.get(at..at + 2).map(|b| u16::from_le_bytes([b[0], b[1]]))
}

fn le_u32(buf: &[u8], at: usize) -> Option<u32> {
    buf.get(at..at + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

pub fn parse_shp(buf: &[u8]) -> Result<Vec<Option<MultiPolygon<f64>>>, ShapefileError> {
    if buf.len() < SHP_HEADER_LEN {
        return Err(ShapefileError::Truncated("shp header".into()));
    }
    if be_i32(buf, 0) != Some(FILE_CODE) {
        return Err(ShapefileError::BadHeader("not a shapefile".into()));
    }

    let declared = be_i32(buf, 24).unwrap_or(0).max(0) as usize * 2;
    let end = declared.clamp(SHP_HEADER_LEN, buf.len());

    let mut shapes = Vec::new();
    let mut pos = SHP_HEADER_LEN;

    while pos + 8 <= end {
        let content_len = be_i32(buf, pos + 4)
            .ok_or_else(|| ShapefileError::Truncated("record header".into()))?
            .max(0) as usize
            * 2;
        let start = pos + 8;
        let content = buf
            .get(start..start + content_len)
            .ok_or_else(|| ShapefileError::Truncated(format!("record at byte {pos}")))?;

        shapes.push(parse_shape(content)?);
        pos = start + content_len;
    }

    Ok(shapes)
}

fn parse_shape(content: &[u8]) -> Result<Option<MultiPolygon<f64>>, ShapefileError> {
    let shape_type =
        le_i32(content, 0).ok_or_else(|| ShapefileError::Truncated("shape type".into()))?;

    match shape_type {
        SHAPE_NULL => Ok(None),
        SHAPE_POLYGON | SHAPE_POLYGON_Z | SHAPE_POLYGON_M => parse_polygon(content).map(Some),
        other => Err(ShapefileError::UnsupportedShape(other)),
    }
}

fn parse_polygon(content: &[u8]) -> Result<MultiPolygon<f64>, ShapefileError> {
    let truncated = || ShapefileError::Truncated("polygon".into());

    // type (4) + bbox (32)
    let num_parts = le_i32(content, 36).ok_or_else(truncated)?.max(0) as usize;
    let num_points = le_i32(content, 40).ok_or_else(truncated)?.max(0) as usize;
    let parts_at = 44;

    // Counts come from the file; check them against the record before allocating.
    let needed = num_parts
        .checked_mul(4)
        .and_then(|p| num_points.checked_mul(16).and_then(|q| p.checked_add(q)))
        .and_then(|n| n.checked_add(parts_at));
    if needed.map_or(true, |n| n > content.len()) {
        return Err(ShapefileError::Truncated(format!(
            "polygon with {num_parts} parts and {num_points} points"
        )));
    }
    let points_at = parts_at + 4 * num_parts;

    let mut starts = Vec::with_capacity(num_parts);
    for i in 0..num_parts {
        let s = le_i32(content, parts_at + 4 * i).ok_or_else(truncated)?.max(0) as usize;
        starts.push(s.min(num_points));
    }

    let mut rings = Vec::with_capacity(num_parts);
    for (i, &s) in starts.iter().enumerate() {
        let e = starts.get(i + 1).copied().unwrap_or(num_points).max(s);
        let mut coords = Vec::with_capacity(e - s);
        for p in s..e {
            let at = points_at + 16 * p;
            let x = le_f64(content, at).ok_or_else(truncated)?;
            let y = le_f64(content, at + 8).ok_or_else(truncated)?;
            coords.push(Coord { x, y });
        }
        if coords.len() >= 3 {
            rings.push(LineString::from(coords));
        }
    }

    Ok(assemble_rings(rings))
}

/// Clockwise rings are exteriors; counter-clockwise rings are holes of the
/// exterior before them.
pub fn assemble_rings(rings: Vec<LineString<f64>>) -> MultiPolygon<f64> {
    let mut polygons: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();

    for ring in rings {
        let signed = Polygon::new(ring.clone(), vec![]).signed_area();
        let is_hole = signed > 0.0;
        match polygons.last_mut() {
            Some((_, holes)) if is_hole => holes.push(ring),
            _ => polygons.push((ring, Vec::new())),
        }
    }

    MultiPolygon::new(
        polygons
            .into_iter()
            .map(|(exterior, holes)| Polygon::new(exterior, holes))
            .collect(),
    )
}

struct DbfTable {
    field_names: Vec<String>,
    rows: Vec<HashMap<String, String>>,
}

struct DbfField {
    name: String,
    length: usize,
}

fn parse_dbf(buf: &[u8]) -> Result<DbfTable, ShapefileError> {
    let truncated = || ShapefileError::Truncated("dbf header".into());

    let num_records = le_u32(buf, 4).ok_or_else(truncated)? as usize;
    let header_len = le_u16(buf, 8).ok_or_else(truncated)? as usize;
    let record_len = le_u16(buf, 10).ok_or_else(truncated)? as usize;

    let mut fields = Vec::new();
    let mut at = 32;
    while at + 32 <= header_len && buf.get(at).copied() != Some(0x0D) {
        let desc = buf.get(at..at + 32).ok_or_else(truncated)?;
        let name_end = desc[..11].iter().position(|&b| b == 0).unwrap_or(11);
        let name = String::from_utf8_lossy(&desc[..name_end]).trim().to_string();
        fields.push(DbfField {
            name,
            length: desc[16] as usize,
        });
        at += 32;
    }

    let available = buf.len().saturating_sub(header_len) / record_len.max(1);
    if num_records > available {
        return Err(ShapefileError::Truncated(format!(
            "dbf declares {num_records} records, holds {available}"
        )));
    }

    let mut rows = Vec::with_capacity(num_records);
    for i in 0..num_records {
        let start = header_len + i * record_len;
        let record = buf
            .get(start..start + record_len)
            .ok_or_else(|| ShapefileError::Truncated(format!("dbf record {i}")))?;

        // Deleted rows still pair with a shape record.
        let mut row = HashMap::with_capacity(fields.len());
        let mut offset = 1;
        for field in &fields {
            let raw = record
                .get(offset..offset + field.length)
                .ok_or_else(|| ShapefileError::Truncated(format!("dbf field {}", field.name)))?;
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(raw);
            row.insert(field.name.clone(), text.trim_matches(|c: char| c == ' ' || c == '\0').to_string());
            offset += field.length;
        }
        rows.push(row);
    }

    Ok(DbfTable {
        field_names: fields.into_iter().map(|f| f.name).collect(),
        rows,
    })
}
