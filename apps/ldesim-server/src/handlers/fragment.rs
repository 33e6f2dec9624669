//! Fragment handlers

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use ldesim_codec::MediaType;
use ldesim_domain::controller::FragmentLookup;
use ldesim_domain::fragment::{Fragment, Headers, CONTENT_TYPE};
use tracing::{debug, error, info, warn};
use url::Url;

use super::error_response;
use crate::{
    dto::{
        fragment::{CreateFragmentParams, FragmentCreatedResponse},
        ErrorResponse,
    },
    negotiation::negotiate,
    AppState,
};

/// Store a fragment
///
/// The body is parsed according to its `Content-Type`.
#[utoipa::path(
    post,
    path = "/ldes",
    params(CreateFragmentParams),
    request_body(
        content = String,
        description = "Fragment in Turtle, N-Triples, N-Quads or JSON-LD",
        content_type = "text/turtle"
    ),
    responses(
        (status = 201, description = "Fragment stored", body = FragmentCreatedResponse),
        (status = 400, description = "Unparsable body or no fragment identifier", body = ErrorResponse),
        (status = 413, description = "Payload too large"),
        (status = 415, description = "Unsupported content type", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "fragment"
)]
pub async fn create_fragment_handler(
    State(state): State<AppState>,
    Query(params): Query<CreateFragmentParams>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    info!(content_type = %content_type, size = body.len(), "Received fragment");

    let Some(media_type) = MediaType::from_content_type(content_type) else {
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Json(ErrorResponse::new(format!(
                "Unsupported media type: {}",
                content_type
            ))),
        )
            .into_response();
    };

    let document = match state.codec.parse_as(&body, media_type) {
        Ok(document) => document,
        Err(err) => {
            warn!(error = %err, "Rejected unparsable fragment");
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string())))
                .into_response();
        }
    };

    let fragment_headers = Headers::from([(CONTENT_TYPE.to_string(), media_type.to_string())]);
    match state
        .controller
        .post_fragment(document, &params.into(), fragment_headers)
        .await
    {
        Ok(info) if info.is_stored() => (
            StatusCode::CREATED,
            Json(FragmentCreatedResponse::from(info)),
        )
            .into_response(),
        Ok(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Fragment has no tree node or view identifier",
            )),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// Read a fragment by its local path and query
///
/// Aliases answer with a redirect to the fragment they resolve to.
#[utoipa::path(
    get,
    path = "/{path}",
    params(
        ("path" = String, Path, description = "Local path of the fragment, query string included")
    ),
    responses(
        (status = 200, description = "Fragment in the negotiated format", body = String),
        (status = 302, description = "Alias; follow the Location header"),
        (status = 404, description = "Nothing stored at this path"),
        (status = 406, description = "No acceptable representation", body = ErrorResponse)
    ),
    tag = "fragment"
)]
pub async fn get_fragment_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let id = uri
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str())
        .unwrap_or_else(|| uri.path());
    let base_url = request_base_url(&headers).unwrap_or_else(|| state.base_url().clone());

    match state.controller.get_fragment(id, &base_url).await {
        Ok(FragmentLookup::Found(fragment)) => {
            let accept = headers.get(header::ACCEPT).and_then(|value| value.to_str().ok());
            represent(&state, fragment, accept)
        }
        Ok(FragmentLookup::Redirect(location)) => {
            (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
        }
        Ok(FragmentLookup::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => error_response(err),
    }
}

/// The origin the client addressed, taken from its `Host` header
fn request_base_url(headers: &HeaderMap) -> Option<Url> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    Url::parse(&format!("http://{}", host)).ok()
}

fn represent(state: &AppState, fragment: Fragment, accept: Option<&str>) -> Response {
    let offered = state.codec.output_media_types(&fragment.content);
    let Some(media_type) = negotiate(accept, &offered) else {
        debug!(id = %fragment.id, accept = ?accept, "No acceptable representation");
        let offered: Vec<_> = offered.iter().map(|media_type| media_type.as_str()).collect();
        return (
            StatusCode::NOT_ACCEPTABLE,
            Json(ErrorResponse::new(format!(
                "Available representations: {}",
                offered.join(", ")
            ))),
        )
            .into_response();
    };

    let body = match state.codec.serialize(&fragment.content, media_type) {
        Ok(body) => body,
        Err(err) => {
            error!(id = %fragment.id, error = %err, "Failed to serialize fragment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(err.to_string())),
            )
                .into_response();
        }
    };

    let mut response_headers = HeaderMap::new();
    for (name, value) in &fragment.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                response_headers.insert(name, value);
            }
            _ => warn!(id = %fragment.id, header = %name, "Skipping invalid stored header"),
        }
    }
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(media_type.as_str()),
    );

    (StatusCode::OK, response_headers, body).into_response()
}
