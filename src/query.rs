//! The filter-and-rank query engine.
//!
//! Every function here is a pure read over an immutable slice of rows and
//! returns a fresh subset in original row order. Empty inputs and empty
//! results are valid values at every stage, never errors, so the presentation
//! layer can render "no data" without special cases.

use crate::models::{Direction, FilterSelection, RankRequest, Record};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Narrow `points` to the rows matching every non-null field of `sel`.
///
/// A selection with no constraints returns the whole input. A value that
/// never occurs in the data simply yields an empty subset.
pub fn filter(points: &[Record], sel: &FilterSelection) -> Vec<Record> {
    points.iter().filter(|r| sel.matches(r)).cloned().collect()
}

/// Keep the rows of the `count` extremal countries by `req.statistic` in
/// `req.reference_year`.
///
/// Membership is decided solely in the reference year: countries with no
/// observation that year are never selected, whatever their other years look
/// like. If fewer than `count` countries qualify, all of them are returned.
/// The result keeps every year present in `points` for the selected
/// countries; callers wanting a single-year slice apply
/// [`restrict_year_range`] afterwards.
///
/// Ties are broken alphabetically by country name so the selection does not
/// depend on input order.
pub fn top_or_bottom(points: &[Record], req: &RankRequest) -> Vec<Record> {
    let mut ranked: Vec<(&str, f64)> = points
        .iter()
        .filter(|r| r.year == req.reference_year)
        .filter_map(|r| req.statistic.value(r).map(|v| (r.country.as_str(), v)))
        .collect();

    ranked.sort_by(|a, b| {
        let by_value = match req.direction {
            Direction::Top => b.1.total_cmp(&a.1),
            Direction::Bottom => a.1.total_cmp(&b.1),
        };
        by_value.then_with(|| a.0.cmp(b.0))
    });

    let chosen: HashSet<&str> = ranked
        .iter()
        .take(req.count)
        .map(|&(country, _)| country)
        .collect();
    log::debug!(
        "{} {} by {} in {}: selected {} of {} ranked countries",
        req.direction,
        req.count,
        req.statistic,
        req.reference_year,
        chosen.len(),
        ranked.len()
    );

    points
        .iter()
        .filter(|r| chosen.contains(r.country.as_str()))
        .cloned()
        .collect()
}

/// Inclusive year-range restriction. An inverted range (`start > end`) is an
/// empty subset, not an error.
pub fn restrict_year_range(points: &[Record], start: i32, end: i32) -> Vec<Record> {
    points
        .iter()
        .filter(|r| r.year >= start && r.year <= end)
        .cloned()
        .collect()
}

/// Distinct region values in first-seen order, for populating the region
/// choice control.
pub fn regions(points: &[Record]) -> Vec<String> {
    distinct_first_seen(points, |r| &r.region, None)
}

/// Valid sub-region choices for a region selection.
///
/// With `region = None` this is every sub-region in the dataset, so the
/// dependent control is fully populated before a parent choice is made.
/// Order is first-seen in the dataset scan, which is deterministic for a
/// given dataset.
pub fn sub_regions_for(points: &[Record], region: Option<&str>) -> Vec<String> {
    distinct_first_seen(points, |r| &r.sub_region, region)
}

fn distinct_first_seen<'a>(
    points: &'a [Record],
    field: impl Fn(&'a Record) -> &'a String,
    region: Option<&str>,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for r in points {
        if region.is_some_and(|want| r.region != want) {
            continue;
        }
        let value = field(r);
        if seen.insert(value.as_str()) {
            out.push(value.clone());
        }
    }
    out
}

/// Rows feeding the choropleth map: the categorical filters plus a single
/// display year. Rows without a `country_id` are kept; the renderer's lookup
/// join skips them.
pub fn map_view(points: &[Record], sel: &FilterSelection, year: i32) -> Vec<Record> {
    let narrowed = filter(points, sel);
    restrict_year_range(&narrowed, year, year)
}

/// Rows feeding the ranked bar chart: filter, rank, then slice down to the
/// reference year.
pub fn bar_view(points: &[Record], sel: &FilterSelection, req: &RankRequest) -> Vec<Record> {
    let narrowed = filter(points, sel);
    let ranked = top_or_bottom(&narrowed, req);
    restrict_year_range(&ranked, req.reference_year, req.reference_year)
}

/// Rows feeding the trend line chart: filter, rank by the reference year,
/// then keep the inclusive `start..=end` span of the selected countries.
pub fn trend_view(
    points: &[Record],
    sel: &FilterSelection,
    req: &RankRequest,
    start: i32,
    end: i32,
) -> Vec<Record> {
    let narrowed = filter(points, sel);
    let ranked = top_or_bottom(&narrowed, req);
    restrict_year_range(&ranked, start, end)
}

/// Stable ordering for presenting ranked rows: by statistic value in the
/// requested direction, ties alphabetical. Used by the CLI table output.
pub fn rank_display_order(rows: &mut [Record], req: &RankRequest) {
    rows.sort_by(|a, b| {
        let va = req.statistic.value(a);
        let vb = req.statistic.value(b);
        let by_value = match (va, vb) {
            (Some(x), Some(y)) => match req.direction {
                Direction::Top => y.total_cmp(&x),
                Direction::Bottom => x.total_cmp(&y),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_value.then_with(|| a.country.cmp(&b.country))
    });
}
