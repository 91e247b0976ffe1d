//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use game_metadata_proxy::config::ProxyConfig;
use game_metadata_proxy::http::HttpServer;
use game_metadata_proxy::lifecycle::Shutdown;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// One request received by the stub upstream, with its JSON parameters decoded.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub operation_name: String,
    pub variables: Value,
    pub extensions: Value,
    pub headers: HashMap<String, String>,
}

type Responder = dyn Fn(&RecordedCall) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct StubState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    respond: Arc<Responder>,
}

/// A programmable GraphQL upstream listening on an ephemeral port.
pub struct StubUpstream {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubUpstream {
    pub fn endpoint(&self) -> String {
        format!("http://{}/graphql", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// Start a stub upstream whose JSON answers come from `respond`.
pub async fn start_stub_upstream<F>(respond: F) -> StubUpstream
where
    F: Fn(&RecordedCall) -> (u16, Value) + Send + Sync + 'static,
{
    start_raw_upstream(move |call| {
        let (status, body) = respond(call);
        (status, body.to_string())
    })
    .await
}

/// Start a stub upstream that answers with raw body text.
pub async fn start_raw_upstream<F>(respond: F) -> StubUpstream
where
    F: Fn(&RecordedCall) -> (u16, String) + Send + Sync + 'static,
{
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        calls: calls.clone(),
        respond: Arc::new(respond),
    };

    let app = Router::new().route("/graphql", get(graphql)).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubUpstream { addr, calls }
}

async fn graphql(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let parse = |key: &str| {
        params
            .get(key)
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or(Value::Null)
    };

    let call = RecordedCall {
        operation_name: params.get("operationName").cloned().unwrap_or_default(),
        variables: parse("variables"),
        extensions: parse("extensions"),
        headers: headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect(),
    };
    state.calls.lock().unwrap().push(call.clone());

    let (status, body) = (state.respond)(&call);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
    (status, [("content-type", "application/json")], body).into_response()
}

/// Proxy configuration pointed at a stub upstream.
pub fn proxy_config(upstream_endpoint: &str) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.endpoint = upstream_endpoint.to_string();
    config.timeouts.upstream_connect_secs = 2;
    config.timeouts.upstream_secs = 5;
    config
}

/// Start the proxy on an ephemeral port.
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// A well-formed upstream game record.
pub fn game_json(slug: &str, with_image: bool) -> Value {
    let mut game = json!({
        "slug": slug,
        "metadata": {
            "names": {"name": format!("Game {slug}")},
            "descriptions": {
                "short": "Fire &amp; Ice",
                "long": "A &quot;long&quot; story &lt;3"
            }
        },
        "genres": [{"name": "Action"}],
        "producers": [{"name": "Studio"}],
        "publishers": [{"name": "Publisher"}],
        "objectRegions": [{"releases": [{"date": "2020-01-01"}]}]
    });
    if with_image {
        game["primaryImage"] = json!({"url": format!("https://img.example/{slug}.jpg")});
    }
    game
}

pub fn search_response(objects: Vec<Value>) -> Value {
    json!({"data": {"searchObjectsByName": {"objects": objects}}})
}

pub fn detail_response(object: Value) -> Value {
    json!({"data": {"objectSelectByTypeAndSlug": object}})
}
