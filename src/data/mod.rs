mod error;
mod loader;
mod record;

pub use error::LoadError;
pub use loader::{load_dataset, parse_dataset};
pub use record::{Dataset, NumericTable, PriceRecord};

pub const DATE_COL: &str = "FECHA_PRECIO";
pub const PRICE_COL: &str = "PRECIO_PROMEDIO_PUBLICADO";
pub const DEPARTMENT_COL: &str = "DEPARTAMENTO_EDS";
pub const MUNICIPALITY_COL: &str = "MUNICIPIO_EDS";
pub const LATITUDE_COL: &str = "LATITUD_MUNICIPIO";
pub const LONGITUDE_COL: &str = "LONGITUD_MUNICIPIO";
pub const YEAR_COL: &str = "ANIO";
pub const MONTH_COL: &str = "MES";
