// src/stats/correlation.rs

use crate::data::NumericTable;

/// Pairwise Pearson coefficients, rounded to two decimals. `None` where a
/// pair has fewer than two complete observations or no variance.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied().flatten()
    }
}

pub fn correlation_matrix(table: &NumericTable) -> CorrelationMatrix {
    let n = table.width();
    let mut values = vec![vec![None; n]; n];

    for i in 0..n {
        for j in i..n {
            let r = pearson(&table.columns[i], &table.columns[j]).map(round2);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        names: table.names.clone(),
        values,
    }
}

/// Pearson over rows where both sides are present.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }

    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
