//! DTOs for fragment endpoints

use std::collections::BTreeMap;

use ldesim_domain::fragment::{CreateFragmentOptions, FragmentInfo};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for creating a fragment
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateFragmentParams {
    /// Seconds the fragment may be cached; omitted, unparsable or not
    /// positive means immutable
    #[serde(rename = "max-age")]
    #[param(value_type = Option<f64>, example = 5)]
    pub max_age: Option<String>,
}

impl From<CreateFragmentParams> for CreateFragmentOptions {
    fn from(params: CreateFragmentParams) -> Self {
        let max_age = params
            .max_age
            .as_deref()
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds > 0.0);

        CreateFragmentOptions { max_age }
    }
}

/// Response body for a stored fragment: its local id next to the headers it
/// will be served with, e.g. `{"id": "/id/fragment/1", "cache-control": "..."}`
#[derive(Debug, Serialize, ToSchema)]
pub struct FragmentCreatedResponse(BTreeMap<String, String>);

impl From<FragmentInfo> for FragmentCreatedResponse {
    fn from(info: FragmentInfo) -> Self {
        let mut body = info.headers;
        body.insert("id".to_string(), info.id);
        Self(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldesim_domain::fragment::{Headers, LocalPath};

    fn options(max_age: &str) -> CreateFragmentOptions {
        CreateFragmentParams {
            max_age: Some(max_age.to_string()),
        }
        .into()
    }

    #[test]
    fn test_max_age_is_parsed_leniently() {
        assert_eq!(options("5").max_age, Some(5.0));
        assert_eq!(options("1.5").max_age, Some(1.5));
        assert_eq!(options("-5").max_age, None);
        assert_eq!(options("0").max_age, None);
        assert_eq!(options("soon").max_age, None);
        assert_eq!(options("").max_age, None);
        assert_eq!(CreateFragmentOptions::from(CreateFragmentParams::default()).max_age, None);
    }

    #[test]
    fn test_created_response_flattens_headers() {
        let headers = Headers::from([("cache-control".to_string(), "public, max-age=5".to_string())]);
        let info = FragmentInfo::stored(&LocalPath::from("/id/1"), headers);

        let body = serde_json::to_value(FragmentCreatedResponse::from(info)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({ "id": "/id/1", "cache-control": "public, max-age=5" })
        );
    }
}
