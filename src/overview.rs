//! Overview KPI report
//!
//! Builds the dashboard's headline numbers and daily click/install series for
//! a 7- or 30-day window. The demo dataset has no real event log, so the
//! series is generated deterministically from the day index: a base level
//! per range, a sine wave and a small modular noise term. Totals and the
//! blended CTR/CPI figures are derived from that same series, so the KPIs
//! always agree with the chart.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

/// Reporting window for the overview endpoint
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewRange {
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[serde(rename = "last_30_days")]
    Last30Days,
}

impl OverviewRange {
    /// Number of days covered by the window
    pub fn days(self) -> i64 {
        match self {
            OverviewRange::Last7Days => 7,
            OverviewRange::Last30Days => 30,
        }
    }

    /// Maps the `range` query parameter; anything but "7d" is the default
    /// 30-day window
    pub fn from_param(param: Option<&str>) -> OverviewRange {
        if param == Some("7d") {
            OverviewRange::Last7Days
        } else {
            OverviewRange::Last30Days
        }
    }
}

/// One day of the overview series
#[derive(Serialize, Debug, Clone)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub clicks: u64,
    pub installs: u64,
}

/// Headline numbers for the selected window
#[derive(Serialize, Debug, Clone)]
pub struct Kpis {
    pub clicks: u64,
    pub installs: u64,

    /// Blended install-per-click rate, capped at 1.0; 0 when no clicks
    pub ctr: f64,

    /// Blended cost per install in dollars; 0 when no installs
    pub cpi: f64,
}

/// Full overview payload
#[derive(Serialize, Debug, Clone)]
pub struct OverviewResponse {
    pub range: OverviewRange,
    pub kpis: Kpis,
    pub series: Vec<SeriesPoint>,
    pub generated_at: DateTime<Utc>,
}

/// Builds the overview report ending at `today`
///
/// Deterministic for a given (range, today) pair, so repeated requests within
/// a day return identical data.
pub fn build_overview(
    range: OverviewRange,
    today: NaiveDate,
    generated_at: DateTime<Utc>,
) -> OverviewResponse {
    let days = range.days();
    let base: f64 = match range {
        OverviewRange::Last7Days => 900.0,
        OverviewRange::Last30Days => 650.0,
    };

    let mut series = Vec::with_capacity(days as usize);
    let mut total_clicks: u64 = 0;
    let mut total_installs: u64 = 0;

    // oldest day first: i counts down from days-1 to 0 days ago
    for i in (0..days).rev() {
        let date = today - Duration::days(i);

        let wave = (i as f64 / days as f64 * std::f64::consts::TAU).sin() * 120.0;
        let noise = (i * 37 % 90) as f64;

        let clicks = ((base + wave + noise).floor() as i64).max(120) as u64;
        let installs = ((clicks as f64 * 0.09).floor() as i64 - i % 7).max(15) as u64;

        total_clicks += clicks;
        total_installs += installs;

        series.push(SeriesPoint {
            date,
            clicks,
            installs,
        });
    }

    let ctr = if total_clicks == 0 {
        0.0
    } else {
        (total_installs as f64 / total_clicks as f64).min(1.0)
    };
    let cpi = if total_installs == 0 {
        0.0
    } else {
        match range {
            OverviewRange::Last7Days => 3.15,
            OverviewRange::Last30Days => 2.75,
        }
    };

    OverviewResponse {
        range,
        kpis: Kpis {
            clicks: total_clicks,
            installs: total_installs,
            ctr,
            cpi,
        },
        series,
        generated_at,
    }
}
