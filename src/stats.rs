use crate::models::{Record, Statistic};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics for one country over the rows it appears in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub country: String,
    pub statistic: Statistic,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute per-country statistics of `stat` across all years present in
/// `points`. Countries whose every observation is missing still appear, with
/// `count == 0` and all aggregates `None`.
pub fn grouped_summary(points: &[Record], stat: Statistic) -> Vec<Summary> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut missing: BTreeMap<&str, usize> = BTreeMap::new();
    for p in points {
        match stat.value(p) {
            Some(v) => groups.entry(p.country.as_str()).or_default().push(v),
            None => {
                *missing.entry(p.country.as_str()).or_default() += 1;
                groups.entry(p.country.as_str()).or_default();
            }
        }
    }

    let mut out = Vec::new();
    for (country, mut vals) in groups {
        vals.sort_by(|a, b| a.total_cmp(b));
        let count = vals.len();
        let min = vals.first().copied();
        let max = vals.last().copied();
        let mean = if count > 0 {
            Some(vals.iter().copied().sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        let miss = missing.get(country).copied().unwrap_or(0);
        out.push(Summary {
            country: country.to_string(),
            statistic: stat,
            count,
            missing: miss,
            min,
            max,
            mean,
            median,
        });
    }
    out
}
