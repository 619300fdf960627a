// src/charts/statistics.rs

use super::figure::Figure;
use super::{colorscale, RD_BU_R};
use crate::stats::{
    CorrelationMatrix, DatedSeries, DepartmentDistribution, HistogramBin, MonthlySeries,
    RankedMean, StatisticsView,
};
use serde_json::{json, Value};

const PRICE_LABEL: &str = "Precio promedio publicado (COP)";

pub fn histogram_figure(bins: &[HistogramBin]) -> Figure {
    let centers: Vec<f64> = bins.iter().map(HistogramBin::center).collect();
    let widths: Vec<f64> = bins.iter().map(HistogramBin::width).collect();
    let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
    let ranges: Vec<String> = bins
        .iter()
        .map(|b| format!("{:.0} - {:.0}", b.start, b.end))
        .collect();

    Figure::new("Distribución de Precios Promedio")
        .trace(json!({
            "type": "bar",
            "x": centers,
            "y": counts,
            "width": widths,
            "customdata": ranges,
            "hovertemplate": "%{customdata}<br>Registros: %{y}<extra></extra>",
        }))
        .layout("bargap", json!(0))
        .layout("xaxis", json!({ "title": { "text": PRICE_LABEL } }))
        .layout("yaxis", json!({ "title": { "text": "Registros" } }))
}

pub fn box_figure(distributions: &[DepartmentDistribution]) -> Figure {
    Figure::new("Boxplot por Departamento")
        .traces(distributions.iter().map(|d| {
            json!({
                "type": "box",
                "name": d.department,
                "y": d.prices,
                "boxpoints": "outliers",
            })
        }))
        .layout("showlegend", json!(false))
        .layout("yaxis", json!({ "title": { "text": PRICE_LABEL } }))
}

fn dated_trace(series: &DatedSeries) -> Value {
    let dates: Vec<String> = series
        .points
        .iter()
        .map(|(d, _)| d.format("%Y-%m-%d").to_string())
        .collect();
    let values: Vec<f64> = series.points.iter().map(|(_, v)| *v).collect();
    json!({
        "type": "scatter",
        "mode": "lines",
        "name": series.name,
        "x": dates,
        "y": values,
    })
}

pub fn evolution_figure(series: &[DatedSeries]) -> Figure {
    Figure::new("Evolución por Departamento")
        .traces(series.iter().map(dated_trace))
        .layout("xaxis", json!({ "title": { "text": "Fecha" } }))
        .layout("yaxis", json!({ "title": { "text": PRICE_LABEL } }))
}

pub fn trend_figure(series: &DatedSeries) -> Figure {
    Figure::new("Tendencia Global de Precios")
        .trace(dated_trace(series))
        .layout("xaxis", json!({ "title": { "text": "Fecha" } }))
        .layout("yaxis", json!({ "title": { "text": PRICE_LABEL } }))
}

pub fn year_month_figure(series: &[MonthlySeries]) -> Figure {
    Figure::new("Tendencia por Año y Mes")
        .traces(series.iter().map(|s| {
            let months: Vec<u32> = s.points.iter().map(|(m, _)| *m).collect();
            let values: Vec<f64> = s.points.iter().map(|(_, v)| *v).collect();
            json!({
                "type": "scatter",
                "mode": "lines+markers",
                "name": s.year.to_string(),
                "x": months,
                "y": values,
            })
        }))
        .layout(
            "xaxis",
            json!({ "title": { "text": "Mes" }, "dtick": 1, "range": [0.5, 12.5] }),
        )
        .layout("yaxis", json!({ "title": { "text": PRICE_LABEL } }))
        .layout("legend", json!({ "title": { "text": "Año" } }))
}

fn ranked_bar(title: &str, ranked: &[RankedMean]) -> Figure {
    let labels: Vec<&str> = ranked.iter().map(|r| r.label.as_str()).collect();
    let means: Vec<f64> = ranked.iter().map(|r| r.mean).collect();

    Figure::new(title)
        .trace(json!({
            "type": "bar",
            "orientation": "h",
            "x": means,
            "y": labels,
            "hovertemplate": "%{y}: %{x:,.0f}<extra></extra>",
        }))
        .layout("xaxis", json!({ "title": { "text": PRICE_LABEL } }))
        .layout("margin", json!({ "t": 60, "r": 20, "b": 60, "l": 180 }))
}

/// Cheapest department at the bottom, as the ranking is ascending.
pub fn department_bar_figure(ranked: &[RankedMean]) -> Figure {
    ranked_bar("Precio Promedio por Departamento", ranked)
}

pub fn top_municipalities_figure(ranked: &[RankedMean]) -> Figure {
    ranked_bar("Top 10 Municipios con Precios Más Altos", ranked)
}

pub fn correlation_figure(matrix: &CorrelationMatrix) -> Figure {
    let n = matrix.size();
    let text: Vec<Vec<String>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| matrix.get(i, j).map(|r| format!("{r:.2}")).unwrap_or_default())
                .collect()
        })
        .collect();

    Figure::new("Matriz de Correlación")
        .trace(json!({
            "type": "heatmap",
            "x": matrix.names,
            "y": matrix.names,
            "z": matrix.values,
            "text": text,
            "texttemplate": "%{text}",
            "colorscale": colorscale(&RD_BU_R),
            "zmin": -1,
            "zmax": 1,
        }))
        .layout("yaxis", json!({ "autorange": "reversed" }))
        .layout("margin", json!({ "t": 60, "r": 20, "b": 140, "l": 200 }))
}

/// Figures in tab order.
pub fn statistics_figures(view: &StatisticsView) -> Vec<(&'static str, &'static str, Figure)> {
    vec![
        ("histograma", "Histograma", histogram_figure(&view.histogram)),
        (
            "boxplot",
            "Boxplot por Departamento",
            box_figure(&view.distributions),
        ),
        (
            "evolucion",
            "Evolución por Departamento",
            evolution_figure(&view.evolution),
        ),
        ("tendencia", "Tendencia Global", trend_figure(&view.trend)),
        (
            "anio-mes",
            "Tendencia Año/Mes",
            year_month_figure(&view.year_month),
        ),
        (
            "barras-departamento",
            "Barras por Departamento",
            department_bar_figure(&view.departments),
        ),
        (
            "top-municipios",
            "Top 10 Municipios",
            top_municipalities_figure(&view.top_municipalities),
        ),
        (
            "correlacion",
            "Matriz de Correlación",
            correlation_figure(&view.correlation),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_cells_are_labelled_with_two_decimals() {
        let matrix = CorrelationMatrix {
            names: vec!["PRECIO".into(), "MES".into()],
            values: vec![vec![Some(1.0), None], vec![None, Some(-0.5)]],
        };

        let fig = correlation_figure(&matrix);

        assert_eq!(fig.title(), "Matriz de Correlación");
        assert_eq!(fig.data[0]["text"], json!([["1.00", ""], ["", "-0.50"]]));
        assert_eq!(fig.data[0]["z"], json!([[1.0, null], [null, -0.5]]));
    }
}
