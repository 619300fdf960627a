// src/config.rs

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

pub const DEFAULT_CSV_PATH: &str =
    "Consulta_Precios_Promedio_de_Gas_Natural_Comprimido_Vehicular__AUTOMATIZADO__20250314.csv";

/// Case variants of the boundary file, tried relative to the working
/// directory and then relative to the executable.
const SHAPEFILE_RELATIVE: [&str; 4] = [
    "COLOMBIA/COLOMBIA.shp",
    "COLOMBIA/colombia.shp",
    "colombia/COLOMBIA.shp",
    "colombia/colombia.shp",
];

const SHAPEFILE_DEPLOYED: [&str; 2] = [
    "/opt/render/project/src/COLOMBIA/COLOMBIA.shp",
    "/app/COLOMBIA/COLOMBIA.shp",
];

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Latin-1 CSV with the published prices.
    pub csv_path: PathBuf,
    /// Explicit boundary file. Probed before the built-in candidates.
    pub shapefile_override: Option<PathBuf>,
    pub bind_ip: IpAddr,
    pub port: u16,
    pub max_workers: usize,
    pub histogram_bins: usize,
    pub top_municipalities: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            shapefile_override: None,
            bind_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8051,
            max_workers: 8,
            histogram_bins: 30,
            top_municipalities: 10,
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by any `GNCV_*` variable that is set and parses.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(path) = lookup("GNCV_CSV_PATH").filter(|s| !s.trim().is_empty()) {
            cfg.csv_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("GNCV_SHAPEFILE_PATH").filter(|s| !s.trim().is_empty()) {
            cfg.shapefile_override = Some(PathBuf::from(path));
        }
        if let Some(ip) = lookup("GNCV_BIND_ADDR").and_then(|s| s.trim().parse().ok()) {
            cfg.bind_ip = ip;
        }
        if let Some(port) = lookup("GNCV_PORT").and_then(|s| s.trim().parse().ok()) {
            cfg.port = port;
        }
        if let Some(n) = lookup("GNCV_MAX_WORKERS")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
        {
            cfg.max_workers = n;
        }

        cfg
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Ordered probe list for the boundary file.
    pub fn shapefile_candidates(&self) -> Vec<PathBuf> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf));
        shapefile_candidates(self.shapefile_override.as_deref(), exe_dir.as_deref())
    }
}

pub fn shapefile_candidates(override_path: Option<&Path>, exe_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut out = Vec::new();

    if let Some(p) = override_path {
        out.push(p.to_path_buf());
    }

    out.extend(SHAPEFILE_RELATIVE.iter().map(PathBuf::from));

    if let Some(dir) = exe_dir {
        out.extend(SHAPEFILE_RELATIVE.iter().map(|rel| dir.join(rel)));
    }

    out.extend(SHAPEFILE_DEPLOYED.iter().map(PathBuf::from));
    out
}
