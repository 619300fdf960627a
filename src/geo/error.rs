use super::shapefile::ShapefileError;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum GeoError {
    DatasetUnavailable(String),
    NotFound { probed: Vec<String> },
    Shapefile(ShapefileError),
    MissingAttribute(String),
    Projection(String),
    NoData(String),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::DatasetUnavailable(msg) => write!(f, "Price dataset unavailable: {msg}"),
            GeoError::NotFound { probed } => {
                write!(f, "Boundary shapefile not found (tried {})", probed.join(", "))
            }
            GeoError::Shapefile(e) => write!(f, "Shapefile error: {e}"),
            GeoError::MissingAttribute(name) => write!(f, "Boundary file has no {name} attribute"),
            GeoError::Projection(msg) => write!(f, "Projection error: {msg}"),
            GeoError::NoData(msg) => write!(f, "Nothing to map: {msg}"),
        }
    }
}

impl Error for GeoError {}

impl From<ShapefileError> for GeoError {
    fn from(e: ShapefileError) -> Self {
        GeoError::Shapefile(e)
    }
}
