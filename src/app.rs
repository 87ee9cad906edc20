//! Application state and HTTP router construction.
//!
//! The GraphQL endpoint lives at /graphql (GraphiQL on browser GETs),
//! subscriptions at /graphql/ws. Authentication context is resolved here,
//! once per request, before the schema executes anything: anonymous
//! requests pass through, a presented token that fails verification is
//! rejected at the transport with 401 and never reaches a resolver.

use std::sync::Arc;

use async_graphql::ErrorExtensions;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLProtocol, GraphQLRequest, GraphQLResponse, GraphQLWebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::http::header::{ACCEPT, AUTHORIZATION};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::Config;
use crate::error::CatalogError;
use crate::graphql::CatalogSchema;
use crate::graphql::auth::{CurrentUser, resolve_current_user, resolve_token_user};
use crate::services::TokenService;
use crate::store::CatalogStore;

/// Shared state for HTTP handlers (GraphQL, health probes).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: CatalogStore,
    pub schema: CatalogSchema,
    pub tokens: TokenService,
}

/// Build the full Axum router: /graphql, /graphql/ws, health endpoints,
/// CORS and request tracing. Returns Router<()> for use with axum::serve.
pub fn build_app(state: AppState) -> Router<()> {
    Router::new()
        // Health endpoints (no auth required)
        .merge(api::health::router())
        // GraphQL endpoint (handles all queries and mutations)
        .route("/graphql", get(graphiql).post(graphql_handler))
        // GraphQL WebSocket endpoint for subscriptions
        .route("/graphql/ws", get(graphql_ws_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok())
}

fn unauthorized(err: &CatalogError) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
        .into_response()
}

/// GraphQL query/mutation handler with auth context
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> Response {
    let mut request = req.into_inner();

    match resolve_current_user(authorization_header(&headers), &state.tokens, &state.store).await {
        Ok(Some(user)) => request = request.data(CurrentUser(user)),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "rejecting request carrying an invalid token");
            return unauthorized(&err);
        }
    }

    GraphQLResponse::from(state.schema.execute(request).await).into_response()
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: HeaderMap) -> impl IntoResponse {
    let accepts_html = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        Html(
            GraphiQLSource::build()
                .endpoint("/graphql")
                .subscription_endpoint("/graphql/ws")
                .finish(),
        )
        .into_response()
    } else {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(serde_json::json!({
                "error": "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json"
            })),
        )
            .into_response()
    }
}

/// GraphQL WebSocket handler for subscriptions with auth
///
/// Tokens can arrive in the upgrade request's Authorization header or in
/// the connection_init payload. Either way an invalid token closes the
/// door: the upgrade gets a 401, the init handshake gets an error frame.
async fn graphql_ws_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    protocol: GraphQLProtocol,
    ws: WebSocketUpgrade,
) -> Response {
    let header_user =
        match resolve_current_user(authorization_header(&headers), &state.tokens, &state.store)
            .await
        {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "rejecting websocket upgrade carrying an invalid token");
                return unauthorized(&err);
            }
        };

    ws.protocols(["graphql-transport-ws", "graphql-ws"])
        .on_upgrade(move |socket| {
            let mut ws = GraphQLWebSocket::new(socket, state.schema.clone(), protocol);

            if let Some(user) = header_user {
                let mut data = async_graphql::Data::default();
                data.insert(CurrentUser(user));
                ws = ws.with_data(data);
            }

            let tokens = state.tokens.clone();
            let store = state.store.clone();
            ws.on_connection_init(move |params| async move {
                let mut data = async_graphql::Data::default();
                if let Some(token) = params
                    .get("Authorization")
                    .or_else(|| params.get("authorization"))
                    .and_then(|v| v.as_str())
                {
                    let token = token.strip_prefix("Bearer ").unwrap_or(token);
                    let user = resolve_token_user(token, &tokens, &store)
                        .await
                        .map_err(|err| {
                            tracing::warn!(error = %err, "closing websocket carrying an invalid token");
                            err.extend()
                        })?;
                    if let Some(user) = user {
                        data.insert(CurrentUser(user));
                    }
                }
                Ok(data)
            })
            .serve()
        })
        .into_response()
}
