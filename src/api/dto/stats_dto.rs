//! Query parameters for the stats endpoints.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query for `GET /stats`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// How many recent settled results to include. Defaults to the
    /// configured limit.
    #[serde(default)]
    pub recent: Option<usize>,
}

/// Query for `GET /stats/weekly`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeeklyQuery {
    /// Any day inside the wanted week (`YYYY-MM-DD`). Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}
