//! DTOs for the statistics and bulk-delete endpoints

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ldesim_domain::controller::{DeleteAllSummary, ResponseStatistics, Statistics};
use serde::Serialize;
use utoipa::ToSchema;

/// Known aliases, stored fragments and request counts per id
#[derive(Debug, Serialize, ToSchema)]
pub struct StatisticsResponse {
    #[schema(example = json!(["/fragment?id=1"]))]
    pub aliases: Vec<String>,
    #[schema(example = json!(["/id/fragment/1"]))]
    pub fragments: Vec<String>,
    /// Direct requests per id, redirects excluded
    pub responses: BTreeMap<String, ResponseCountResponse>,
}

/// How often an id was requested, and when
#[derive(Debug, Serialize, ToSchema)]
pub struct ResponseCountResponse {
    pub count: usize,
    pub at: Vec<DateTime<Utc>>,
}

impl From<ResponseStatistics> for ResponseCountResponse {
    fn from(statistics: ResponseStatistics) -> Self {
        Self {
            count: statistics.count,
            at: statistics.at,
        }
    }
}

impl From<Statistics> for StatisticsResponse {
    fn from(statistics: Statistics) -> Self {
        Self {
            aliases: statistics.aliases.into_iter().map(String::from).collect(),
            fragments: statistics.fragments.into_iter().map(String::from).collect(),
            responses: statistics
                .responses
                .into_iter()
                .map(|(id, responses)| (id, responses.into()))
                .collect(),
        }
    }
}

/// What a bulk delete removed
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllResponse {
    pub alias_count: usize,
    pub fragment_count: usize,
}

impl From<DeleteAllSummary> for DeleteAllResponse {
    fn from(summary: DeleteAllSummary) -> Self {
        Self {
            alias_count: summary.alias_count,
            fragment_count: summary.fragment_count,
        }
    }
}
