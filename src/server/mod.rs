//! HTTP service surface
//!
//! Exposes the engine over a single GET endpoint:
//!
//! ```text
//! GET /wikisteps?start=<url>&target=<url>&steps=<n>
//! ```
//!
//! responding `{start, target, steps, validPaths}` as JSON. Missing or
//! invalid inputs map to 400, engine failures to 500. A timed-out search
//! still responds 200 with the partial path list.

use crate::engine::{PathSearch, Termination};
use crate::{WikiStepsError, Config};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
struct AppState {
    search: Arc<PathSearch>,
}

/// Query parameters of the /wikisteps endpoint
///
/// Everything arrives as an optional string so the handler can answer
/// missing and malformed values with its own 400 body.
#[derive(Debug, Deserialize)]
pub struct StepsQuery {
    start: Option<String>,
    target: Option<String>,
    steps: Option<String>,
}

/// JSON body of a successful /wikisteps response
#[derive(Debug, Serialize)]
pub struct StepsResponse {
    pub start: String,
    pub target: String,
    pub steps: i64,
    #[serde(rename = "validPaths")]
    pub valid_paths: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

/// Builds the service router around a search engine
pub fn router(search: Arc<PathSearch>) -> Router {
    Router::new()
        .route("/wikisteps", get(find_steps))
        .route("/healthz", get(healthz))
        .with_state(AppState { search })
}

/// Runs the HTTP service until the process is stopped
pub async fn serve(config: &Config) -> crate::Result<()> {
    let search = Arc::new(PathSearch::new(config)?);
    let app = router(search);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .map_err(|_| WikiStepsError::InvalidBindAddr(config.server.bind.clone()))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("wikisteps listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn find_steps(
    State(state): State<AppState>,
    Query(params): Query<StepsQuery>,
) -> Result<Json<StepsResponse>, (StatusCode, Json<ErrorBody>)> {
    let (Some(start), Some(target), Some(steps)) = (params.start, params.target, params.steps)
    else {
        return Err(bad_request("missing one or more required query parameters"));
    };

    let steps: i64 = steps
        .parse()
        .map_err(|_| bad_request("steps must be an integer"))?;

    let outcome = state
        .search
        .find_paths(&start, &target, steps)
        .await
        .map_err(|err| match err {
            WikiStepsError::InvalidUrl(_) | WikiStepsError::InvalidSteps { .. } => {
                bad_request(&err.to_string())
            }
            other => internal_error(&other.to_string()),
        })?;

    if let Termination::Failed(err) = &outcome.termination {
        return Err(internal_error(&err.to_string()));
    }

    Ok(Json(StepsResponse {
        start,
        target,
        steps,
        valid_paths: outcome.paths,
    }))
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
}

fn internal_error(message: &str) -> (StatusCode, Json<ErrorBody>) {
    tracing::error!("request failed: {}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
}
