// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the incident platform API.
//!
//! Serves the REST surface the client consumes on `127.0.0.1:0`, keeps its
//! data in memory, records every request and can be told to fail specific
//! endpoints.

#![allow(dead_code)]

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post, MethodRouter},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use incident_admin::config::{Config, DescriptionEncoding};
use incident_admin::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const ADMIN_EMAIL: &str = "admin@municipio.gob";
pub const CITIZEN_EMAIL: &str = "vecino@example.org";
pub const PASSWORD: &str = "secreto123";
const SESSION_COOKIE: &str = "session";

pub struct MockUser {
    pub email: String,
    pub password: String,
    pub profile: Value,
}

/// Backend data and request log.
#[derive(Default)]
pub struct Db {
    pub users: Vec<MockUser>,
    pub collections: HashMap<&'static str, Vec<Value>>,
    /// `"METHOD /path"` -> status to answer with instead of the handler
    pub failures: HashMap<String, u16>,
    /// `"METHOD /path"` for every request received
    pub requests: Vec<String>,
    next_id: u64,
}

type Shared = Arc<Mutex<Db>>;

pub struct MockBackend {
    pub db: Shared,
    pub base_url: String,
}

impl MockBackend {
    /// Make `"METHOD /path"` answer with `status`.
    pub fn fail(&self, endpoint: &str, status: u16) {
        self.db
            .lock()
            .unwrap()
            .failures
            .insert(endpoint.to_string(), status);
    }

    pub fn clear_failures(&self) {
        self.db.lock().unwrap().failures.clear();
    }

    pub fn requests(&self) -> Vec<String> {
        self.db.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.db.lock().unwrap().requests.clear();
    }

    pub fn collection(&self, name: &str) -> Vec<Value> {
        self.db
            .lock()
            .unwrap()
            .collections
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Client state wired against this backend.
    pub fn app(&self) -> AppState {
        AppState::new(Config::with_api_url(&self.base_url)).expect("client should build")
    }

    pub fn app_with_encoding(&self, encoding: DescriptionEncoding) -> AppState {
        let config = Config {
            description_encoding: encoding,
            ..Config::with_api_url(&self.base_url)
        };
        AppState::new(config).expect("client should build")
    }
}

fn id_field(collection: &str) -> &'static str {
    match collection {
        "categories" => "category_id",
        "cities" => "city_id",
        "statuses" => "status_id",
        _ => "incident_id",
    }
}

/// Seed data: two users, three catalogs, three incidents in two cities.
pub fn seeded_db() -> Db {
    let mut db = Db {
        next_id: 100,
        ..Default::default()
    };

    db.users.push(MockUser {
        email: ADMIN_EMAIL.to_string(),
        password: PASSWORD.to_string(),
        profile: json!({
            "user_id": 1,
            "username": "admin",
            "email": ADMIN_EMAIL,
            "role": "ADMIN",
            "is_verified": true,
            "created_at": "2025-01-02T10:00:00.000Z"
        }),
    });
    db.users.push(MockUser {
        email: CITIZEN_EMAIL.to_string(),
        password: PASSWORD.to_string(),
        profile: json!({
            "user_id": 2,
            "username": "vecino",
            "email": CITIZEN_EMAIL,
            "profile_pic_url": "https://cdn.example.org/p/2.png",
            "role": "CITIZEN",
            "is_verified": false,
            "created_at": "2025-02-03T11:00:00.000Z"
        }),
    });

    db.collections.insert(
        "categories",
        vec![
            json!({ "category_id": 1, "name": "Vías y calzadas", "description": "Baches" }),
            json!({ "category_id": 2, "name": "Semáforos", "description": "Señales" }),
            json!({ "category_id": 3, "name": "Alumbrado Público", "description": "Luminarias" }),
        ],
    );
    db.collections.insert(
        "cities",
        vec![
            json!({ "city_id": 1, "name": "Quito", "code": "UIO" }),
            json!({ "city_id": 2, "name": "Guayaquil", "code": "GYE" }),
        ],
    );
    db.collections.insert(
        "statuses",
        vec![
            json!({ "status_id": 1, "name": "Pendiente", "description": "Sin atender" }),
            json!({ "status_id": 2, "name": "En proceso", "description": "Asignado" }),
            json!({ "status_id": 3, "name": "Resuelto", "description": "Cerrado" }),
        ],
    );
    db.collections.insert(
        "incidents",
        vec![
            incident(10, 1, 1, 1, "Bache profundo en la avenida"),
            incident(11, 3, 1, 1, "Poste sin luz desde el lunes"),
            incident(12, 3, 2, 2, "Luminaria parpadeando"),
        ],
    );

    db
}

/// Incident row with a base64-encoded description.
pub fn incident(id: u64, category_id: u64, status_id: u64, city_id: u64, text: &str) -> Value {
    json!({
        "incident_id": id,
        "category_id": category_id,
        "status_id": status_id,
        "city_id": city_id,
        "latitude": -0.18,
        "longitude": -78.46,
        "description": BASE64.encode(text),
        "created_at": "2025-05-10T08:30:00.000Z",
        "user": { "username": "vecino" }
    })
}

/// Start the mock API and return its handle.
pub async fn spawn_backend(db: Db) -> MockBackend {
    let shared: Shared = Arc::new(Mutex::new(db));

    let app = Router::new()
        .route("/auth/signin", post(signin))
        .route("/users/me", get(me))
        .route("/incidents/city-stats/{city_id}", get(city_stats))
        .route("/incidents/{id}/status", patch(update_incident_status))
        .merge(collection_routes("categories"))
        .merge(collection_routes("cities"))
        .merge(collection_routes("statuses"))
        .merge(incident_routes())
        .layer(middleware::from_fn_with_state(shared.clone(), record))
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });

    MockBackend {
        db: shared,
        base_url: format!("http://{}", addr),
    }
}

/// Start the mock API with the standard seed data.
pub async fn seeded_backend() -> MockBackend {
    spawn_backend(seeded_db()).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "message": message, "statusCode": status.as_u16() })),
    )
        .into_response()
}

async fn record(State(db): State<Shared>, request: Request, next: Next) -> Response {
    let endpoint = format!("{} {}", request.method(), request.uri().path());
    let failure = {
        let mut db = db.lock().unwrap();
        db.requests.push(endpoint.clone());
        db.failures.get(&endpoint).copied()
    };

    match failure {
        Some(status) => error(
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            "Injected failure",
        ),
        None => next.run(request).await,
    }
}

fn session_user(db: &Db, jar: &CookieJar) -> Option<Value> {
    let user_id: u64 = jar.get(SESSION_COOKIE)?.value().parse().ok()?;
    db.users
        .iter()
        .find(|u| u.profile["user_id"] == user_id)
        .map(|u| u.profile.clone())
}

fn require_session(db: &Db, jar: &CookieJar) -> Result<(), Response> {
    session_user(db, jar)
        .map(|_| ())
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Unauthorized"))
}

async fn signin(State(db): State<Shared>, jar: CookieJar, Json(body): Json<Value>) -> Response {
    let db = db.lock().unwrap();
    let user = db.users.iter().find(|u| {
        body["email"].as_str() == Some(u.email.as_str())
            && body["password"].as_str() == Some(u.password.as_str())
    });

    match user {
        Some(user) => {
            let cookie = Cookie::build((SESSION_COOKIE, user.profile["user_id"].to_string()))
                .path("/")
                .http_only(true);
            (jar.add(cookie), Json(json!({ "access_token": "opaque" }))).into_response()
        }
        None => error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

async fn me(State(db): State<Shared>, jar: CookieJar) -> Response {
    let db = db.lock().unwrap();
    match session_user(&db, &jar) {
        Some(profile) => Json(profile).into_response(),
        None => error(StatusCode::UNAUTHORIZED, "Unauthorized"),
    }
}

fn collection_routes(name: &'static str) -> Router<Shared> {
    let (list, item) = collection_handlers(name);
    Router::new()
        .route(&format!("/{}", name), list)
        .route(&format!("/{}/{{id}}", name), item)
}

fn incident_routes() -> Router<Shared> {
    let (list, item) = collection_handlers("incidents");
    Router::new()
        .route("/incidents", list)
        .route("/incidents/{id}", item.get(incident_detail))
}

/// `GET|POST /<name>` and `PATCH|DELETE /<name>/:id` over one collection.
fn collection_handlers(name: &'static str) -> (MethodRouter<Shared>, MethodRouter<Shared>) {
    let list = move |State(db): State<Shared>, jar: CookieJar| async move {
        let db = db.lock().unwrap();
        if let Err(resp) = require_session(&db, &jar) {
            return resp;
        }
        let items: Vec<Value> = db
            .collections
            .get(name)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|item| with_count(&db, name, item))
            .collect();
        Json(items).into_response()
    };

    let create = move |State(db): State<Shared>, jar: CookieJar, Json(body): Json<Value>| async move {
        let mut db = db.lock().unwrap();
        if let Err(resp) = require_session(&db, &jar) {
            return resp;
        }
        if body["name"].as_str().map_or(true, str::is_empty) {
            return error(StatusCode::BAD_REQUEST, "name should not be empty");
        }
        db.next_id += 1;
        let mut item = body;
        item[id_field(name)] = json!(db.next_id);
        db.collections.entry(name).or_default().push(item.clone());
        (StatusCode::CREATED, Json(item)).into_response()
    };

    let update = move |State(db): State<Shared>,
                       jar: CookieJar,
                       Path(id): Path<u64>,
                       Json(body): Json<Value>| async move {
        let mut db = db.lock().unwrap();
        if let Err(resp) = require_session(&db, &jar) {
            return resp;
        }
        let items = db.collections.entry(name).or_default();
        let Some(item) = items.iter_mut().find(|i| i[id_field(name)] == id) else {
            return error(StatusCode::NOT_FOUND, "Not found");
        };
        if let (Some(target), Some(patch)) = (item.as_object_mut(), body.as_object()) {
            for (key, value) in patch {
                target.insert(key.clone(), value.clone());
            }
        }
        Json(item.clone()).into_response()
    };

    let remove = move |State(db): State<Shared>, jar: CookieJar, Path(id): Path<u64>| async move {
        let mut db = db.lock().unwrap();
        if let Err(resp) = require_session(&db, &jar) {
            return resp;
        }
        let items = db.collections.entry(name).or_default();
        let before = items.len();
        items.retain(|i| i[id_field(name)] != id);
        if items.len() == before {
            return error(StatusCode::NOT_FOUND, "Not found");
        }
        StatusCode::NO_CONTENT.into_response()
    };

    (get(list).post(create), patch(update).delete(remove))
}

/// Catalog rows carry a server-computed incident count.
fn with_count(db: &Db, collection: &str, mut item: Value) -> Value {
    if collection == "incidents" {
        return item;
    }
    let field = id_field(collection);
    let count = db
        .collections
        .get("incidents")
        .map(|incidents| incidents.iter().filter(|i| i[field] == item[field]).count())
        .unwrap_or(0);
    item["_count"] = json!({ "incidents": count });
    item
}

fn find_by_id(db: &Db, collection: &str, id: &Value) -> Option<Value> {
    db.collections
        .get(collection)?
        .iter()
        .find(|i| &i[id_field(collection)] == id)
        .cloned()
}

async fn incident_detail(
    State(db): State<Shared>,
    jar: CookieJar,
    Path(id): Path<u64>,
) -> Response {
    let db = db.lock().unwrap();
    if let Err(resp) = require_session(&db, &jar) {
        return resp;
    }
    let Some(mut incident) = find_by_id(&db, "incidents", &json!(id)) else {
        return error(StatusCode::NOT_FOUND, "Incident not found");
    };
    incident["category"] = find_by_id(&db, "categories", &incident["category_id"]).into();
    incident["status"] = find_by_id(&db, "statuses", &incident["status_id"]).into();
    incident["city"] = find_by_id(&db, "cities", &incident["city_id"]).into();
    Json(incident).into_response()
}

async fn update_incident_status(
    State(db): State<Shared>,
    jar: CookieJar,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(resp) = require_session(&db, &jar) {
        return resp;
    }
    let incidents = db.collections.entry("incidents").or_default();
    match incidents.iter_mut().find(|i| i["incident_id"] == id) {
        Some(incident) => {
            incident["status_id"] = body["status_id"].clone();
            Json(incident.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Incident not found"),
    }
}

async fn city_stats(
    State(db): State<Shared>,
    jar: CookieJar,
    Path(city_id): Path<u64>,
) -> Response {
    let db = db.lock().unwrap();
    if let Err(resp) = require_session(&db, &jar) {
        return resp;
    }
    let incidents = db.collections.get("incidents").cloned().unwrap_or_default();
    let rows: Vec<Value> = db
        .collections
        .get("categories")
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|category| {
            let count = incidents
                .iter()
                .filter(|i| i["city_id"] == city_id && i["category_id"] == category["category_id"])
                .count();
            json!({
                "category_id": category["category_id"],
                "name": category["name"],
                "description": category["description"],
                "_count": { "incidents": count }
            })
        })
        .collect();
    Json(rows).into_response()
}

/// Log in as the seeded admin.
pub async fn login_admin(app: &AppState) {
    app.auth
        .login(&incident_admin::models::LoginDto::new(ADMIN_EMAIL, PASSWORD))
        .await
        .expect("admin login should succeed");
}
