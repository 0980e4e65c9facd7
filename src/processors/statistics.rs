use crate::models::{CorrelationMatrix, Measure, Observation};
use std::collections::BTreeMap;

/// Streaming arithmetic mean that skips missing values
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    pub fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    /// Number of values that contributed
    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` when no value was observed
    pub fn value(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Row count and per-measure means for one group
#[derive(Debug, Clone, Copy)]
pub struct GroupStats<const N: usize> {
    pub rows: usize,
    pub means: [Mean; N],
}

impl<const N: usize> Default for GroupStats<N> {
    fn default() -> Self {
        Self {
            rows: 0,
            means: [Mean::default(); N],
        }
    }
}

/// Group rows by key and average the given measures within each group
///
/// Rows for which `key` returns `None` are skipped. Groups come back in
/// ascending key order.
pub fn group_means<K, F, const N: usize>(
    rows: &[Observation],
    key: F,
    measures: [Measure; N],
) -> BTreeMap<K, GroupStats<N>>
where
    K: Ord,
    F: Fn(&Observation) -> Option<K>,
{
    let mut groups: BTreeMap<K, GroupStats<N>> = BTreeMap::new();

    for row in rows {
        let Some(k) = key(row) else {
            continue;
        };
        let stats = groups.entry(k).or_default();
        stats.rows += 1;
        for (mean, measure) in stats.means.iter_mut().zip(measures.iter()) {
            mean.push(row.value(*measure));
        }
    }

    groups
}

/// Pearson correlation over the pairs where both values are present
///
/// Returns `None` for fewer than two pairs, when either side is constant, or
/// when the sums overflow to a non-finite coefficient.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    if !r.is_finite() {
        return None;
    }

    Some(r.clamp(-1.0, 1.0))
}

fn paired_values(rows: &[Observation], a: Measure, b: Measure) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|r| Some((r.value(a)?, r.value(b)?)))
        .collect()
}

/// Full pairwise correlation matrix over `measures`
///
/// Symmetric by construction; the diagonal is exactly 1.0 for every
/// non-constant column with at least two values.
pub fn correlation_matrix(rows: &[Observation], measures: &[Measure]) -> CorrelationMatrix {
    let n = measures.len();
    let mut values = vec![vec![None; n]; n];

    for i in 0..n {
        for j in i..n {
            let coefficient = pearson(&paired_values(rows, measures[i], measures[j]));
            let coefficient = if i == j { coefficient.map(|_| 1.0) } else { coefficient };
            values[i][j] = coefficient;
            values[j][i] = coefficient;
        }
    }

    CorrelationMatrix {
        variables: measures.to_vec(),
        values,
    }
}
