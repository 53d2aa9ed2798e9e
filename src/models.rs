use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default number of countries selected by top/bottom ranking.
pub const DEFAULT_RANK_COUNT: usize = 5;

/// Errors raised at the query boundary.
///
/// Data conditions (unknown filter values, missing observations, empty
/// subsets) are never errors; only caller/config bugs surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown statistic: {0}")]
    UnknownStatistic(String),
    #[error("unknown direction: {0} (expected 'top' or 'bottom')")]
    UnknownDirection(String),
}

/// Tidy structure used by this crate (one row = one country-year observation).
///
/// Columns map by name onto the processed Gapminder CSV; extra upstream
/// columns are ignored on load. `country_id` comes from a left join against a
/// reference table and may be absent; such rows cannot be placed on a map
/// but stay valid for ranking and trends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub country: String,
    #[serde(rename = "id")]
    pub country_id: Option<u32>,
    pub region: String,
    pub sub_region: String,
    pub income_group: String,
    pub population: u64,
    pub year: i32,
    pub life_expectancy: Option<f64>,
    pub education_ratio: Option<f64>,
    pub pop_density: Option<f64>,
    pub child_mortality: Option<f64>,
    pub children_per_woman: Option<f64>,
}

/// The statistic columns a query can rank or summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    LifeExpectancy,
    EducationRatio,
    PopDensity,
    ChildMortality,
    ChildrenPerWoman,
}

impl Statistic {
    pub const ALL: [Statistic; 5] = [
        Statistic::LifeExpectancy,
        Statistic::EducationRatio,
        Statistic::PopDensity,
        Statistic::ChildMortality,
        Statistic::ChildrenPerWoman,
    ];

    /// Column accessor. `None` means the observation is missing for this
    /// (country, year) pair.
    pub fn value(&self, r: &Record) -> Option<f64> {
        match self {
            Statistic::LifeExpectancy => r.life_expectancy,
            Statistic::EducationRatio => r.education_ratio,
            Statistic::PopDensity => r.pop_density,
            Statistic::ChildMortality => r.child_mortality,
            Statistic::ChildrenPerWoman => r.children_per_woman,
        }
    }

    /// Column name as it appears in the dataset header.
    pub fn column(&self) -> &'static str {
        match self {
            Statistic::LifeExpectancy => "life_expectancy",
            Statistic::EducationRatio => "education_ratio",
            Statistic::PopDensity => "pop_density",
            Statistic::ChildMortality => "child_mortality",
            Statistic::ChildrenPerWoman => "children_per_woman",
        }
    }

    /// Human-readable label for chart titles and tables.
    pub fn label(&self) -> &'static str {
        match self {
            Statistic::LifeExpectancy => "Life Expectancy",
            Statistic::EducationRatio => "Education Ratio",
            Statistic::PopDensity => "Population Density",
            Statistic::ChildMortality => "Child Mortality",
            Statistic::ChildrenPerWoman => "Children per Woman",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Statistic {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Statistic::ALL
            .iter()
            .copied()
            .find(|stat| stat.column() == s)
            .ok_or_else(|| QueryError::UnknownStatistic(s.to_string()))
    }
}

/// Which end of the ranking to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Top,
    Bottom,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Top => f.write_str("Top"),
            Direction::Bottom => f.write_str("Bottom"),
        }
    }
}

impl FromStr for Direction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Direction::Top),
            "bottom" => Ok(Direction::Bottom),
            other => Err(QueryError::UnknownDirection(other.to_string())),
        }
    }
}

/// Categorical filter state. Each field is independently optional; `None`
/// imposes no constraint on that column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub region: Option<String>,
    pub sub_region: Option<String>,
    pub income_group: Option<String>,
}

impl FilterSelection {
    /// True when every non-null field equals the row's column.
    ///
    /// One conjunction over whichever constraints are set, so adding a
    /// filterable column means adding one pair here rather than doubling a
    /// branch table.
    pub fn matches(&self, r: &Record) -> bool {
        let constraints = [
            (self.region.as_deref(), r.region.as_str()),
            (self.sub_region.as_deref(), r.sub_region.as_str()),
            (self.income_group.as_deref(), r.income_group.as_str()),
        ];
        constraints
            .iter()
            .all(|(want, have)| want.is_none_or(|w| w == *have))
    }

}

/// Parameters for a top/bottom-N selection.
///
/// `reference_year` decides membership even when the resulting subset later
/// spans a range of years for trend display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankRequest {
    pub statistic: Statistic,
    pub direction: Direction,
    pub reference_year: i32,
    pub count: usize,
}

impl RankRequest {
    pub fn new(statistic: Statistic, direction: Direction, reference_year: i32) -> Self {
        Self {
            statistic,
            direction,
            reference_year,
            count: DEFAULT_RANK_COUNT,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}
