// src/geo/projection.rs

use super::GeoError;
use geo::{Coord, MapCoords, MultiPolygon};

/// GRS 1980, the ellipsoid behind MAGNA-SIRGAS.
const GRS80_A: f64 = 6_378_137.0;
const GRS80_INV_F: f64 = 298.257_222_101;

#[derive(Debug, Clone, PartialEq)]
pub struct TransverseMercator {
    pub semi_major: f64,
    pub inverse_flattening: f64,
    pub latitude_of_origin: f64,
    pub central_meridian: f64,
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    /// Metres per projected unit.
    pub unit: f64,
}

/// Source coordinate system of a boundary layer. Everything is brought to
/// longitude/latitude degrees (EPSG:4326).
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Geographic,
    TransverseMercator(TransverseMercator),
}

impl Projection {
    /// A layer without a `.prj` is taken as geographic.
    pub fn from_wkt(wkt: Option<&str>) -> Result<Self, GeoError> {
        let wkt = match wkt.map(str::trim).filter(|s| !s.is_empty()) {
            Some(w) => w,
            None => return Ok(Projection::Geographic),
        };
        let lower = wkt.to_ascii_lowercase();

        if lower.starts_with("geogcs") || lower.starts_with("geogcrs") {
            return Ok(Projection::Geographic);
        }
        if !lower.starts_with("projcs") {
            return Err(GeoError::Projection(format!(
                "unrecognised coordinate system {}",
                wkt.chars().take(40).collect::<String>()
            )));
        }

        let method = quoted_after(&lower, "projection[").unwrap_or_default();
        if !matches!(
            method.as_str(),
            "transverse_mercator" | "gauss_kruger" | "transverse mercator"
        ) {
            return Err(GeoError::Projection(format!(
                "projection method {method:?} is not supported"
            )));
        }

        let (semi_major, inverse_flattening) =
            spheroid(&lower).unwrap_or((GRS80_A, GRS80_INV_F));
        let param = |name: &str, default: f64| parameter(&lower, name).unwrap_or(default);

        Ok(Projection::TransverseMercator(TransverseMercator {
            semi_major,
            inverse_flattening,
            latitude_of_origin: param("latitude_of_origin", 0.0),
            central_meridian: param("central_meridian", 0.0),
            scale_factor: param("scale_factor", 1.0),
            false_easting: param("false_easting", 0.0),
            false_northing: param("false_northing", 0.0),
            unit: last_unit(&lower).unwrap_or(1.0),
        }))
    }

    pub fn to_wgs84(&self, c: Coord<f64>) -> Coord<f64> {
        match self {
            Projection::Geographic => c,
            Projection::TransverseMercator(tm) => tm.inverse(c),
        }
    }

    pub fn reproject(&self, geom: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        geom.map_coords(|c| self.to_wgs84(c))
    }
}

impl TransverseMercator {
    fn eccentricity_sq(&self) -> f64 {
        let f = 1.0 / self.inverse_flattening;
        f * (2.0 - f)
    }

    /// Meridian arc length from the equator to `phi` (radians).
    fn meridian_arc(&self, phi: f64) -> f64 {
        let e2 = self.eccentricity_sq();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        self.semi_major
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }

    /// Projected easting/northing to longitude/latitude degrees.
    pub fn inverse(&self, c: Coord<f64>) -> Coord<f64> {
        let a = self.semi_major;
        let k0 = self.scale_factor;
        let e2 = self.eccentricity_sq();
        let ep2 = e2 / (1.0 - e2);

        let x = c.x * self.unit - self.false_easting * self.unit;
        let y = c.y * self.unit - self.false_northing * self.unit;

        let m = self.meridian_arc(self.latitude_of_origin.to_radians()) + y / k0;
        let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2.powi(3) / 256.0));

        let sq = (1.0 - e2).sqrt();
        let e1 = (1.0 - sq) / (1.0 + sq);
        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let (sin1, cos1) = phi1.sin_cos();
        let tan1 = sin1 / cos1;
        let c1 = ep2 * cos1 * cos1;
        let t1 = tan1 * tan1;
        let w = 1.0 - e2 * sin1 * sin1;
        let n1 = a / w.sqrt();
        let r1 = a * (1.0 - e2) / w.powf(1.5);
        let d = x / (n1 * k0);

        let lat = phi1
            - (n1 * tan1 / r1)
                * (d * d / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                        * d.powi(6)
                        / 720.0);
        let lon = self.central_meridian.to_radians()
            + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                    * d.powi(5)
                    / 120.0)
                / cos1;

        Coord {
            x: lon.to_degrees(),
            y: lat.to_degrees(),
        }
    }
}

/// Text of the first quoted string after `key`.
fn quoted_after(wkt: &str, key: &str) -> Option<String> {
    let rest = &wkt[wkt.find(key)? + key.len()..];
    let open = rest.find('"')?;
    let close = rest[open + 1..].find('"')?;
    Some(rest[open + 1..open + 1 + close].to_string())
}

/// Comma-separated numbers after the quoted name of a `key[...]` node.
fn numbers_after(wkt: &str, key: &str) -> Option<Vec<f64>> {
    let start = wkt.find(key)? + key.len();
    numbers_in_node(&wkt[start..])
}

fn numbers_in_node(node: &str) -> Option<Vec<f64>> {
    let end = node.find(']')?;
    let body = &node[..end];
    let after_name = match body.rfind('"') {
        Some(q) => &body[q + 1..],
        None => body,
    };
    let nums: Vec<f64> = after_name
        .split(',')
        .filter_map(|s| s.trim().parse::<f64>().ok())
        .collect();
    if nums.is_empty() {
        None
    } else {
        Some(nums)
    }
}

fn spheroid(wkt: &str) -> Option<(f64, f64)> {
    let nums = numbers_after(wkt, "spheroid[").or_else(|| numbers_after(wkt, "ellipsoid["))?;
    match nums.as_slice() {
        [a, inv_f, ..] => Some((*a, *inv_f)),
        _ => None,
    }
}

fn parameter(wkt: &str, name: &str) -> Option<f64> {
    let key = format!("parameter[\"{name}\"");
    numbers_after(wkt, &key).and_then(|n| n.first().copied())
}

/// The projected unit is the last UNIT node of a PROJCS.
fn last_unit(wkt: &str) -> Option<f64> {
    let at = wkt.rfind("unit[")?;
    numbers_in_node(&wkt[at + "unit[".len()..]).and_then(|n| n.first().copied())
}
