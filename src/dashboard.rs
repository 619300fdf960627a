// src/dashboard.rs

use crate::charts::{self, Figure, PointMap};
use crate::config::DashboardConfig;
use crate::data::{self, LoadError};
use crate::geo::{self, GeoError, MapViews};
use crate::stats::{self, StatisticsView, StatsOptions};
use log::{error, info};

pub const TITLE: &str = "📈 Análisis de Precios de GNCV en Colombia";

#[derive(Debug, Clone)]
pub enum TabContent {
    Chart(Figure),
    PointMap(PointMap),
}

#[derive(Debug, Clone)]
pub struct Tab {
    pub slug: &'static str,
    pub label: &'static str,
    pub content: TabContent,
    /// Shown under the chart.
    pub notes: Vec<String>,
}

impl Tab {
    fn chart(slug: &'static str, label: &'static str, figure: Figure) -> Self {
        Self {
            slug,
            label,
            content: TabContent::Chart(figure),
            notes: Vec::new(),
        }
    }
}

/// Whether one input made it through its stage, and why not if it didn't.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactStatus {
    pub artifact: &'static str,
    pub outcome: Result<String, String>,
}

impl ArtifactStatus {
    pub fn loaded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// The assembled, read-only dashboard served to every request.
#[derive(Debug, Clone)]
pub struct Dashboard {
    tabs: Vec<Tab>,
    artifacts: Vec<ArtifactStatus>,
}

pub const CSV_ARTIFACT: &str = "Datos de precios (CSV)";
pub const SHAPEFILE_ARTIFACT: &str = "Mapa de departamentos (shapefile)";

impl Dashboard {
    /// Runs every startup stage. Never fails: a broken stage only removes
    /// its tabs.
    pub fn build(cfg: &DashboardConfig) -> Self {
        let opts = StatsOptions {
            histogram_bins: cfg.histogram_bins,
            top_municipalities: cfg.top_municipalities,
        };

        let dataset = data::load_dataset(&cfg.csv_path);
        let statistics = dataset
            .as_ref()
            .map(|ds| stats::build_statistics(ds, &opts))
            .map_err(Clone::clone);
        let maps = match &dataset {
            Ok(ds) => geo::build_map_views(ds, &cfg.shapefile_candidates()),
            Err(e) => Err(GeoError::DatasetUnavailable(e.to_string())),
        };

        Self::assemble(statistics, maps)
    }

    /// Map tabs first, then statistics tabs.
    pub fn assemble(
        statistics: Result<StatisticsView, LoadError>,
        maps: Result<MapViews, GeoError>,
    ) -> Self {
        let mut tabs = Vec::new();
        let mut artifacts = Vec::new();

        match maps {
            Ok(views) => {
                artifacts.push(ArtifactStatus {
                    artifact: SHAPEFILE_ARTIFACT,
                    outcome: Ok(format!("{} regiones", views.regions.len())),
                });
                tabs.extend(map_tabs(&views));
            }
            Err(e) => {
                error!("Error al crear mapas: {e}");
                artifacts.push(ArtifactStatus {
                    artifact: SHAPEFILE_ARTIFACT,
                    outcome: Err(e.to_string()),
                });
            }
        }

        match statistics {
            Ok(view) => {
                artifacts.insert(
                    0,
                    ArtifactStatus {
                        artifact: CSV_ARTIFACT,
                        outcome: Ok(format!("{} departamentos", view.departments.len())),
                    },
                );
                tabs.extend(
                    charts::statistics_figures(&view)
                        .into_iter()
                        .map(|(slug, label, fig)| Tab::chart(slug, label, fig)),
                );
            }
            Err(e) => {
                error!("Error al cargar datos o crear gráficos: {e}");
                artifacts.insert(
                    0,
                    ArtifactStatus {
                        artifact: CSV_ARTIFACT,
                        outcome: Err(e.to_string()),
                    },
                );
            }
        }

        let loaded = artifacts.iter().filter(|a| a.loaded()).count();
        info!(
            "Dashboard assembled with {} tabs, {loaded} of {} inputs loaded",
            tabs.len(),
            artifacts.len()
        );
        Self { tabs, artifacts }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, slug: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.slug == slug)
    }

    /// CSV first, then shapefile.
    pub fn artifacts(&self) -> &[ArtifactStatus] {
        &self.artifacts
    }

    pub fn has_tabs(&self) -> bool {
        !self.tabs.is_empty()
    }
}

fn map_tabs(views: &MapViews) -> Vec<Tab> {
    let mut variation = Tab::chart(
        "variacion",
        "📊 Variación de Precios",
        charts::variation_choropleth(views),
    );
    if !views.flagged.is_empty() {
        variation.notes.push(format!(
            "Variación indefinida (precio inicial igual a cero): {}",
            views.flagged.join(", ")
        ));
    }

    vec![
        Tab::chart(
            "mapa-departamentos",
            "📍 Mapa por Departamento",
            charts::price_choropleth(views),
        ),
        Tab {
            slug: "mapa-municipios",
            label: "📌 Mapa por Municipio (Puntos)",
            content: TabContent::PointMap(charts::municipality_point_map(views)),
            notes: Vec::new(),
        },
        variation,
    ]
}
