// src/geo/join.rs

use super::normalize::normalize_name;
use crate::data::{Dataset, PriceRecord};
use crate::stats::mean_by;
use chrono::NaiveDate;
use geo::MultiPolygon;
use log::warn;
use std::collections::BTreeMap;

/// A department boundary keyed by its normalized name.
#[derive(Debug, Clone)]
pub struct RegionGeometry {
    pub name: String,
    pub boundary: MultiPolygon<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariationRecord {
    pub department: String,
    pub first_mean: f64,
    pub last_mean: f64,
    /// `None` when the first-period mean is zero.
    pub percent: Option<f64>,
}

impl VariationRecord {
    pub fn new(department: String, first_mean: f64, last_mean: f64) -> Self {
        let percent = if first_mean == 0.0 {
            None
        } else {
            Some((last_mean - first_mean) / first_mean * 100.0)
        };
        Self {
            department,
            first_mean,
            last_mean,
            percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MunicipalityPoint {
    pub municipality: String,
    pub department: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Everything the map tabs draw. `latest_prices` and `variations` are
/// aligned with `regions` (left join: one slot per geometry).
#[derive(Debug, Clone)]
pub struct MapViews {
    pub regions: Vec<RegionGeometry>,
    pub first_period: NaiveDate,
    pub last_period: NaiveDate,
    pub latest_prices: Vec<Option<f64>>,
    pub points: Vec<MunicipalityPoint>,
    pub variations: Vec<Option<VariationRecord>>,
    /// Largest |variation| among joined departments.
    pub variation_bound: Option<f64>,
    /// Departments whose variation is undefined.
    pub flagged: Vec<String>,
}

impl MapViews {
    pub fn color_range(&self) -> Option<(f64, f64)> {
        self.variation_bound.map(|v| (-v, v))
    }
}

fn means_on(dataset: &Dataset, date: NaiveDate) -> BTreeMap<String, f64> {
    mean_by(dataset.rows_on(date), |r: &PriceRecord| {
        normalize_name(&r.department)
    })
}

pub fn variation_records(
    first: &BTreeMap<String, f64>,
    last: &BTreeMap<String, f64>,
) -> BTreeMap<String, VariationRecord> {
    first
        .iter()
        .filter_map(|(dept, &f)| {
            last.get(dept)
                .map(|&l| (dept.clone(), VariationRecord::new(dept.clone(), f, l)))
        })
        .collect()
}

pub fn join_regions(
    regions: Vec<RegionGeometry>,
    dataset: &Dataset,
    first_period: NaiveDate,
    last_period: NaiveDate,
) -> MapViews {
    let latest = means_on(dataset, last_period);
    let earliest = means_on(dataset, first_period);
    let by_dept = variation_records(&earliest, &latest);

    let latest_prices: Vec<Option<f64>> = regions
        .iter()
        .map(|r| latest.get(&r.name).copied())
        .collect();
    let variations: Vec<Option<VariationRecord>> = regions
        .iter()
        .map(|r| by_dept.get(&r.name).cloned())
        .collect();

    let variation_bound = variations
        .iter()
        .flatten()
        .filter_map(|v| v.percent)
        .map(f64::abs)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));

    let flagged: Vec<String> = by_dept
        .values()
        .filter(|v| v.percent.is_none())
        .map(|v| v.department.clone())
        .collect();
    for dept in &flagged {
        warn!("{dept}: first-period mean is zero, variation left undefined");
    }

    let points = dataset
        .rows_on(last_period)
        .filter_map(|r| {
            r.coordinates().map(|(latitude, longitude)| MunicipalityPoint {
                municipality: r.municipality.clone(),
                department: normalize_name(&r.department),
                price: r.price,
                latitude,
                longitude,
            })
        })
        .collect();

    MapViews {
        regions,
        first_period,
        last_period,
        latest_prices,
        points,
        variations,
        variation_bound,
        flagged,
    }
}
