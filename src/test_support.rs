//! In-process stand-in for the portfolio REST API and the media host
//!
//! Serves the same envelope format on a random local port and records
//! the last request so tests can assert on what was sent.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use crate::api::{parse_query, ApiClient};
use crate::config::ApiConfig;

pub const MOCK_EMAIL: &str = "ada@example.com";
pub const MOCK_PASSWORD: &str = "analytical-engine";
pub const MOCK_USERNAME: &str = "ada";
const MOCK_PROFILE_ID: &str = "p1";

/// A request as the mock received it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    /// Query pairs in arrival order, repeats kept
    pub query_pairs: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    tokens: Mutex<HashSet<String>>,
    last_request: Mutex<Option<RecordedRequest>>,
    fail_next: Mutex<Option<String>>,
}

/// Running mock server
pub struct MockApi {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let router = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        Self { addr, state }
    }

    /// Client pointed at the mock, without a session
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: format!("http://{}", self.addr),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Replace the records of a collection
    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        self.state
            .collections
            .lock()
            .unwrap()
            .insert(collection.to_string(), records);
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.last_request.lock().unwrap().clone()
    }

    /// Answer the next request with a 500 carrying `message`
    pub fn fail_next(&self, message: &str) {
        *self.state.fail_next.lock().unwrap() = Some(message.to_string());
    }
}

fn success(status: StatusCode, data: Value, message: &str) -> Response {
    (
        status,
        Json(json!({"status": "success", "data": data, "message": message})),
    )
        .into_response()
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"status": "error", "message": message}))).into_response()
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let query_pairs = parse_query(uri.query().unwrap_or_default());
    let query: HashMap<String, String> = query_pairs.iter().cloned().collect();
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    *state.last_request.lock().unwrap() = Some(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        query_pairs,
        authorization: authorization.clone(),
        body: serde_json::from_slice(&body).ok(),
    });

    if let Some(message) = state.fail_next.lock().unwrap().take() {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, &message);
    }

    let json_body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let token = authorization
        .as_deref()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(String::from);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["health"]) => success(StatusCode::OK, json!({"status": "UP"}), "OK"),
        ("POST", ["auth", action]) => auth(&state, action, &json_body, token),
        ("GET", ["auth", "me"]) => match token {
            Some(token) if state.tokens.lock().unwrap().contains(&token) => {
                success(StatusCode::OK, mock_user(), "OK")
            }
            _ => failure(StatusCode::UNAUTHORIZED, "Unauthorized"),
        },
        ("GET", ["public", "portfolio", username]) if *username == MOCK_USERNAME => {
            success(StatusCode::OK, mock_portfolio(), "OK")
        }
        ("GET", ["public", "portfolio", _]) => {
            failure(StatusCode::NOT_FOUND, "Portfolio not found")
        }
        ("POST", ["media", "upload"]) => upload(&body),
        (method, [collection, rest @ ..]) => {
            records(&state, method, collection, rest, &query, json_body)
        }
        _ => failure(StatusCode::NOT_FOUND, "Not found"),
    }
}

fn mock_user() -> Value {
    json!({
        "id": "u1",
        "name": "Ada Lovelace",
        "email": MOCK_EMAIL,
        "profileId": MOCK_PROFILE_ID,
        "role": "USER",
    })
}

fn mock_portfolio() -> Value {
    json!({
        "profile": {"id": MOCK_PROFILE_ID, "username": MOCK_USERNAME, "fullName": "Ada Lovelace"},
        "skills": [
            {"id": "s1", "name": "Mathematics", "status": "ACTIVE", "orderIndex": 0, "proficiency": 95},
        ],
        "experiences": [],
    })
}

fn auth(state: &MockState, action: &str, body: &Value, token: Option<String>) -> Response {
    match action {
        "login" => {
            if body["email"] == MOCK_EMAIL && body["password"] == MOCK_PASSWORD {
                let token = format!("mock-{}", uuid::Uuid::new_v4());
                state.tokens.lock().unwrap().insert(token.clone());
                success(
                    StatusCode::OK,
                    json!({"token": token, "user": mock_user()}),
                    "Login successful",
                )
            } else {
                failure(StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
        }
        "register" => success(
            StatusCode::CREATED,
            json!({
                "id": uuid::Uuid::new_v4().to_string(),
                "name": body["name"],
                "email": body["email"],
                "profileId": uuid::Uuid::new_v4().to_string(),
            }),
            "Registration successful",
        ),
        "forgot-password" => success(
            StatusCode::OK,
            Value::Null,
            "Password reset link sent to your email",
        ),
        "reset-password" => success(StatusCode::OK, Value::Null, "Password reset successful"),
        "logout" => {
            if let Some(token) = token {
                state.tokens.lock().unwrap().remove(&token);
            }
            success(StatusCode::OK, Value::Null, "Logged out")
        }
        _ => failure(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// Value of a multipart text field in a raw body
fn multipart_field(raw: &str, name: &str) -> Option<String> {
    let start = raw.find(&format!("name=\"{}\"", name))?;
    let rest = &raw[start..];
    let value_start = rest.find("\r\n\r\n")? + 4;
    let value = &rest[value_start..];
    let end = value.find("\r\n").unwrap_or(value.len());
    Some(value[..end].to_string())
}

fn multipart_file_name(raw: &str) -> Option<String> {
    let start = raw.find("filename=\"")? + "filename=\"".len();
    let rest = &raw[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

fn upload(body: &Bytes) -> Response {
    let raw = String::from_utf8_lossy(body);
    match multipart_field(&raw, "upload_preset").as_deref() {
        Some("folio") => {
            let file_name = multipart_file_name(&raw).unwrap_or_else(|| "upload".to_string());
            let public_id = format!("folio/{}", uuid::Uuid::new_v4());
            (
                StatusCode::OK,
                Json(json!({
                    "secure_url": format!("https://media.example.com/{}/{}", public_id, file_name),
                    "public_id": public_id,
                    "resource_type": "image",
                })),
            )
                .into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"message": "Upload preset not found"}})),
        )
            .into_response(),
    }
}

fn field_text(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn compare(a: &Value, b: &Value, key: &str) -> Ordering {
    match (a.get(key), b.get(key)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(_), Some(_)) => field_text(a, key)
            .unwrap_or_default()
            .cmp(&field_text(b, key).unwrap_or_default()),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn matches(record: &Value, query: &HashMap<String, String>) -> bool {
    query.iter().all(|(key, wanted)| match key.as_str() {
        "page" | "size" | "sortBy" | "sortDir" => true,
        "search" => {
            let needle = wanted.to_lowercase();
            record
                .as_object()
                .map(|fields| {
                    fields.values().any(|v| {
                        v.as_str()
                            .map(|s| s.to_lowercase().contains(&needle))
                            .unwrap_or(false)
                    })
                })
                .unwrap_or(false)
        }
        "status" => field_text(record, "status")
            .unwrap_or_else(|| "ACTIVE".to_string())
            .eq_ignore_ascii_case(wanted),
        _ => field_text(record, key)
            .map(|v| v.eq_ignore_ascii_case(wanted))
            .unwrap_or(false),
    })
}

fn list(records: &[Value], query: &HashMap<String, String>) -> Response {
    let mut selected: Vec<Value> = records.iter().filter(|r| matches(r, query)).cloned().collect();

    if let Some(sort_by) = query.get("sortBy") {
        selected.sort_by(|a, b| compare(a, b, sort_by));
        if query.get("sortDir").map(String::as_str) == Some("desc") {
            selected.reverse();
        }
    }

    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = query
        .get("size")
        .and_then(|s| s.parse().ok())
        .filter(|s| *s > 0)
        .unwrap_or(10);
    let total = selected.len();
    let content: Vec<Value> = selected.into_iter().skip(page * size).take(size).collect();

    success(
        StatusCode::OK,
        json!({
            "content": content,
            "totalElements": total,
            "totalPages": total.div_ceil(size),
        }),
        "OK",
    )
}

fn position(records: &[Value], id: &str) -> Option<usize> {
    records.iter().position(|r| r["id"] == id)
}

fn records(
    state: &MockState,
    method: &str,
    collection: &str,
    rest: &[&str],
    query: &HashMap<String, String>,
    body: Value,
) -> Response {
    let mut collections = state.collections.lock().unwrap();
    let records = collections.entry(collection.to_string()).or_default();

    match (method, rest) {
        ("GET", []) => list(records, query),
        ("POST", []) => {
            let mut record = match body {
                Value::Object(fields) => fields,
                _ => Map::new(),
            };
            record.insert("id".to_string(), json!(uuid::Uuid::new_v4().to_string()));
            record
                .entry("status".to_string())
                .or_insert_with(|| json!("ACTIVE"));
            record.insert("createdAt".to_string(), json!(chrono::Utc::now().to_rfc3339()));
            let record = Value::Object(record);
            records.push(record.clone());
            success(StatusCode::CREATED, record, "Created")
        }
        ("GET", [id]) => match position(records, id) {
            Some(i) => success(StatusCode::OK, records[i].clone(), "OK"),
            None => failure(StatusCode::NOT_FOUND, "Record not found"),
        },
        ("PUT", [id]) => match position(records, id) {
            Some(i) => {
                if let (Some(target), Value::Object(changes)) = (records[i].as_object_mut(), body) {
                    for (key, value) in changes {
                        if key != "id" {
                            target.insert(key, value);
                        }
                    }
                }
                success(StatusCode::OK, records[i].clone(), "Updated")
            }
            None => failure(StatusCode::NOT_FOUND, "Record not found"),
        },
        ("PUT", [id, "status"]) => match position(records, id) {
            Some(i) => {
                records[i]["status"] = body["status"].clone();
                success(StatusCode::OK, records[i].clone(), "Status updated")
            }
            None => failure(StatusCode::NOT_FOUND, "Record not found"),
        },
        ("DELETE", [id]) => match position(records, id) {
            Some(i) => {
                records.remove(i);
                success(StatusCode::OK, Value::Null, "Deleted")
            }
            None => failure(StatusCode::NOT_FOUND, "Record not found"),
        },
        _ => failure(StatusCode::NOT_FOUND, "Not found"),
    }
}
