mod error;
mod join;
mod locator;
mod normalize;
mod projection;
mod shapefile;

pub use error::GeoError;
pub use join::{join_regions, MapViews, MunicipalityPoint, RegionGeometry, VariationRecord};
pub use locator::locate_shapefile;
pub use normalize::normalize_name;
pub use projection::Projection;
pub use shapefile::{read_boundaries, BoundaryLayer};

use crate::data::Dataset;
use log::{debug, info};
use std::path::PathBuf;

/// Department name attribute of the boundary layer.
pub const DEPARTMENT_ATTR: &str = "DPTO_CNMBR";

/// Locate, read, reproject and join the department boundaries.
pub fn build_map_views(dataset: &Dataset, candidates: &[PathBuf]) -> Result<MapViews, GeoError> {
    let path = locate_shapefile(candidates)?;
    info!("Using boundary file {}", path.display());

    let layer = read_boundaries(&path)?;
    let regions = region_geometries(layer)?;

    let first = dataset
        .first_date()
        .ok_or_else(|| GeoError::NoData("dataset has no dates".into()))?;
    let last = dataset
        .last_date()
        .ok_or_else(|| GeoError::NoData("dataset has no dates".into()))?;

    let views = join_regions(regions, dataset, first, last);
    let matched = views.latest_prices.iter().filter(|p| p.is_some()).count();
    info!(
        "Joined {matched} of {} regions, {} municipal points, periods {first} .. {last}",
        views.regions.len(),
        views.points.len()
    );
    Ok(views)
}

/// Normalized name plus WGS84 boundary for every feature with a geometry.
pub fn region_geometries(layer: BoundaryLayer) -> Result<Vec<RegionGeometry>, GeoError> {
    if !layer.field_names.iter().any(|f| f == DEPARTMENT_ATTR) {
        return Err(GeoError::MissingAttribute(DEPARTMENT_ATTR.to_string()));
    }

    let projection = Projection::from_wkt(layer.projection_wkt.as_deref())?;
    debug!("Boundary projection: {projection:?}");

    let regions: Vec<RegionGeometry> = layer
        .features
        .into_iter()
        .filter_map(|feature| {
            let geometry = feature.geometry?;
            let name = feature
                .attributes
                .get(DEPARTMENT_ATTR)
                .map(|n| normalize_name(n))
                .unwrap_or_default();
            Some(RegionGeometry {
                name,
                boundary: projection.reproject(&geometry),
            })
        })
        .collect();

    if regions.is_empty() {
        return Err(GeoError::NoData("boundary file has no polygons".into()));
    }
    Ok(regions)
}
