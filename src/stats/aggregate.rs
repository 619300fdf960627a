// src/stats/aggregate.rs

use crate::data::PriceRecord;
use chrono::NaiveDate;
use std::borrow::Borrow;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default)]
struct MeanAcc {
    sum: f64,
    count: usize,
}

impl MeanAcc {
    fn push(&mut self, v: f64) {
        self.sum += v;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Arithmetic mean per key, keys in ascending order.
pub fn mean_by<K, I, F>(records: I, key: F) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator,
    I::Item: Borrow<PriceRecord>,
    F: Fn(&PriceRecord) -> K,
{
    let mut groups: BTreeMap<K, MeanAcc> = BTreeMap::new();
    for rec in records {
        let rec: &PriceRecord = rec.borrow();
        groups.entry(key(rec)).or_default().push(rec.price);
    }
    groups.into_iter().map(|(k, acc)| (k, acc.mean())).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width bins over [min, max]; the last bin is closed on the right.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let (min, max) = match min_max(values) {
        Some(mm) => mm,
        None => return Vec::new(),
    };

    if max == min {
        return vec![HistogramBin {
            start: min - 0.5,
            end: max + 0.5,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentDistribution {
    pub department: String,
    pub prices: Vec<f64>,
}

pub fn department_distributions(records: &[PriceRecord]) -> Vec<DepartmentDistribution> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for rec in records {
        groups.entry(rec.department.as_str()).or_default().push(rec.price);
    }
    groups
        .into_iter()
        .map(|(department, prices)| DepartmentDistribution {
            department: department.to_string(),
            prices,
        })
        .collect()
}

/// A named time series, dates ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedSeries {
    pub name: String,
    pub points: Vec<(NaiveDate, f64)>,
}

pub fn evolution_by_department(records: &[PriceRecord]) -> Vec<DatedSeries> {
    let means = mean_by(records, |r| (r.department.clone(), r.date));

    let mut series: Vec<DatedSeries> = Vec::new();
    for ((department, date), mean) in means {
        match series.last_mut() {
            Some(s) if s.name == department => s.points.push((date, mean)),
            _ => series.push(DatedSeries {
                name: department,
                points: vec![(date, mean)],
            }),
        }
    }
    series
}

pub fn global_trend(records: &[PriceRecord]) -> DatedSeries {
    DatedSeries {
        name: "Promedio nacional".to_string(),
        points: mean_by(records, |r| r.date).into_iter().collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    pub year: i32,
    pub points: Vec<(u32, f64)>,
}

pub fn year_month_trend(records: &[PriceRecord]) -> Vec<MonthlySeries> {
    let means = mean_by(records, |r| (r.year(), r.month()));

    let mut series: Vec<MonthlySeries> = Vec::new();
    for ((year, month), mean) in means {
        match series.last_mut() {
            Some(s) if s.year == year => s.points.push((month, mean)),
            _ => series.push(MonthlySeries {
                year,
                points: vec![(month, mean)],
            }),
        }
    }
    series
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedMean {
    pub label: String,
    pub mean: f64,
}

/// Mean per department, cheapest first.
pub fn department_ranking(records: &[PriceRecord]) -> Vec<RankedMean> {
    let mut ranked: Vec<RankedMean> = mean_by(records, |r| r.department.clone())
        .into_iter()
        .map(|(label, mean)| RankedMean { label, mean })
        .collect();
    ranked.sort_by(|a, b| a.mean.total_cmp(&b.mean));
    ranked
}

/// The `n` most expensive municipalities, most expensive first. Ties keep
/// name order.
pub fn top_municipalities(records: &[PriceRecord], n: usize) -> Vec<RankedMean> {
    let mut ranked: Vec<RankedMean> = mean_by(records, |r| r.municipality.clone())
        .into_iter()
        .map(|(label, mean)| RankedMean { label, mean })
        .collect();
    ranked.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    ranked.truncate(n);
    ranked
}
