// src/geo/locator.rs

use super::GeoError;
use std::path::{Path, PathBuf};

/// First candidate accepted by `exists`, in list order.
pub fn first_existing<F>(candidates: &[PathBuf], exists: F) -> Option<&Path>
where
    F: Fn(&Path) -> bool,
{
    candidates
        .iter()
        .map(PathBuf::as_path)
        .find(|p| exists(p))
}

pub fn locate_shapefile(candidates: &[PathBuf]) -> Result<PathBuf, GeoError> {
    first_existing(candidates, Path::is_file)
        .map(Path::to_path_buf)
        .ok_or_else(|| GeoError::NotFound {
            probed: candidates.iter().map(|p| p.display().to_string()).collect(),
        })
}
