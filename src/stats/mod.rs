mod aggregate;
mod correlation;

pub use aggregate::{
    department_distributions, department_ranking, evolution_by_department, global_trend,
    histogram, mean_by, top_municipalities, year_month_trend, DatedSeries,
    DepartmentDistribution, HistogramBin, MonthlySeries, RankedMean,
};
pub use correlation::{correlation_matrix, CorrelationMatrix};

use crate::data::Dataset;
use log::info;

#[derive(Debug, Clone, Copy)]
pub struct StatsOptions {
    pub histogram_bins: usize,
    pub top_municipalities: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            histogram_bins: 30,
            top_municipalities: 10,
        }
    }
}

/// Every aggregate behind the statistics tabs.
#[derive(Debug, Clone)]
pub struct StatisticsView {
    pub histogram: Vec<HistogramBin>,
    pub distributions: Vec<DepartmentDistribution>,
    pub evolution: Vec<DatedSeries>,
    pub trend: DatedSeries,
    pub year_month: Vec<MonthlySeries>,
    pub departments: Vec<RankedMean>,
    pub top_municipalities: Vec<RankedMean>,
    pub correlation: CorrelationMatrix,
}

pub fn build_statistics(dataset: &Dataset, opts: &StatsOptions) -> StatisticsView {
    let records = &dataset.records;
    let prices: Vec<f64> = dataset.prices().collect();

    let view = StatisticsView {
        histogram: histogram(&prices, opts.histogram_bins),
        distributions: department_distributions(records),
        evolution: evolution_by_department(records),
        trend: global_trend(records),
        year_month: year_month_trend(records),
        departments: department_ranking(records),
        top_municipalities: top_municipalities(records, opts.top_municipalities),
        correlation: correlation_matrix(&dataset.numeric),
    };

    info!(
        "Statistics ready: {} departments, {} dates, {}x{} correlation",
        view.departments.len(),
        view.trend.points.len(),
        view.correlation.size(),
        view.correlation.size()
    );
    view
}
