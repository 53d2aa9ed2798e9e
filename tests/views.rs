use gapex::models::{Direction, FilterSelection, RankRequest, Record, Statistic};
use gapex::query::{bar_view, map_view, trend_view};
use std::collections::BTreeSet;

fn obs(country: &str, region: &str, year: i32, edu: Option<f64>) -> Record {
    Record {
        country: country.into(),
        country_id: Some(1),
        region: region.into(),
        sub_region: format!("Inner {region}"),
        income_group: "Lower middle".into(),
        population: 3_000_000,
        year,
        life_expectancy: Some(65.0),
        education_ratio: edu,
        pop_density: None,
        child_mortality: None,
        children_per_woman: None,
    }
}

/// Three Asian countries observed 2000-2015 (education ratio rises with the
/// country index), one European country to be filtered away.
fn dataset() -> Vec<Record> {
    let mut rows = Vec::new();
    for (i, name) in ["Laos", "Nepal", "Oman"].iter().enumerate() {
        for year in 2000..=2015 {
            rows.push(obs(name, "Asia", year, Some(1.0 + i as f64 / 10.0)));
        }
    }
    for year in 2000..=2015 {
        rows.push(obs("Poland", "Europe", year, Some(0.9)));
    }
    rows
}

fn asia() -> FilterSelection {
    FilterSelection {
        region: Some("Asia".into()),
        ..Default::default()
    }
}

#[test]
fn map_view_is_one_year_of_the_filtered_subset() {
    let data = dataset();
    let rows = map_view(&data, &asia(), 2010);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.year == 2010 && r.region == "Asia"));
}

#[test]
fn bar_view_returns_reference_year_rows_of_ranked_countries() {
    let data = dataset();
    let req = RankRequest::new(Statistic::EducationRatio, Direction::Top, 2015).with_count(2);
    let rows = bar_view(&data, &asia(), &req);
    let got: BTreeSet<&str> = rows.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(got, BTreeSet::from(["Nepal", "Oman"]));
    assert!(rows.iter().all(|r| r.year == 2015));
}

#[test]
fn trend_view_spans_the_range_with_membership_from_the_reference_year() {
    let data = dataset();
    let req = RankRequest::new(Statistic::EducationRatio, Direction::Bottom, 2015).with_count(1);
    let rows = trend_view(&data, &asia(), &req, 2005, 2015);
    assert!(rows.iter().all(|r| r.country == "Laos"));
    let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    assert_eq!(years, (2005..=2015).collect::<Vec<_>>());
}

#[test]
fn views_propagate_empty_subsets() {
    let data = dataset();
    let nowhere = FilterSelection {
        region: Some("Atlantis".into()),
        ..Default::default()
    };
    let req = RankRequest::new(Statistic::EducationRatio, Direction::Top, 2015);
    assert!(map_view(&data, &nowhere, 2015).is_empty());
    assert!(bar_view(&data, &nowhere, &req).is_empty());
    assert!(trend_view(&data, &nowhere, &req, 2000, 2015).is_empty());
}

#[test]
fn trend_view_with_inverted_range_is_empty() {
    let data = dataset();
    let req = RankRequest::new(Statistic::EducationRatio, Direction::Top, 2015);
    assert!(trend_view(&data, &asia(), &req, 2015, 2000).is_empty());
}
