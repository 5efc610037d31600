use super::*;
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::{EmployeeField, EmployeeId, EmployeeRecord};
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct MockServerState {
    employees: Arc<Mutex<BTreeMap<i64, EmployeeRecord>>>,
    next_id: Arc<Mutex<i64>>,
    fail: Arc<Mutex<bool>>,
    requests: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl MockServerState {
    fn seeded(records: Vec<EmployeeRecord>, next_id: i64) -> Self {
        let employees = records
            .into_iter()
            .filter_map(|record| record.id.map(|id| (id.0, record)))
            .collect();
        Self {
            employees: Arc::new(Mutex::new(employees)),
            next_id: Arc::new(Mutex::new(next_id)),
            fail: Arc::new(Mutex::new(false)),
            requests: Arc::new(Mutex::new(Vec::new())),
            bodies: Arc::new(Mutex::new(Vec::new())),
        }
    }

    async fn record(&self, line: String) -> Result<(), StatusCode> {
        self.requests.lock().await.push(line);
        if *self.fail.lock().await {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(())
    }
}

async fn list_employees(State(state): State<MockServerState>) -> Result<Json<Value>, StatusCode> {
    state.record("GET /api/employees".to_string()).await?;
    let employees = state.employees.lock().await;
    // Salaries come back as numbers, the way a server with a numeric column would send them.
    let body = employees
        .values()
        .map(|record| {
            json!({
                "id": record.id,
                "name": record.name,
                "position": record.position,
                "salary": serde_json::from_str::<Value>(&record.salary).ok(),
            })
        })
        .collect::<Vec<_>>();
    Ok(Json(Value::Array(body)))
}

async fn create_employees(
    State(state): State<MockServerState>,
    Json(body): Json<Value>,
) -> Result<Json<Vec<EmployeeRecord>>, StatusCode> {
    state.bodies.lock().await.push(body.clone());
    state
        .record("POST /api/employees/create".to_string())
        .await?;
    let fields: Vec<shared::protocol::EmployeeFields> =
        serde_json::from_value(body).map_err(|_| StatusCode::BAD_REQUEST)?;

    let mut employees = state.employees.lock().await;
    let mut next_id = state.next_id.lock().await;
    let mut created = Vec::new();
    for field in fields {
        let record = EmployeeRecord {
            id: Some(EmployeeId(*next_id)),
            name: field.name,
            position: field.position,
            salary: field.salary,
        };
        employees.insert(*next_id, record.clone());
        created.push(record);
        *next_id += 1;
    }
    Ok(Json(created))
}

async fn update_employees(
    State(state): State<MockServerState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.bodies.lock().await.push(body.clone());
    state
        .record("PUT /api/employees/update".to_string())
        .await?;
    let updates: HashMap<String, shared::protocol::EmployeeFields> =
        serde_json::from_value(body).map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut employees = state.employees.lock().await;
    for (id, fields) in updates {
        let id: i64 = id.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
        if let Some(record) = employees.get_mut(&id) {
            record.name = fields.name;
            record.position = fields.position;
            record.salary = fields.salary;
        }
    }
    Ok(Json(json!({"updated": employees.len()})))
}

async fn delete_one(
    State(state): State<MockServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    state
        .record(format!("DELETE /api/employees/delete/{id}"))
        .await?;
    state.employees.lock().await.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_many(
    State(state): State<MockServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<StatusCode, StatusCode> {
    let ids = params.get("ids").cloned().unwrap_or_default();
    state
        .record(format!("DELETE /api/employees/delete?ids={ids}"))
        .await?;
    let mut employees = state.employees.lock().await;
    for id in ids.split(',') {
        let id: i64 = id.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
        employees.remove(&id);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn spawn_employee_server(state: MockServerState) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/employees", get(list_employees))
        .route("/api/employees/create", post(create_employees))
        .route("/api/employees/update", put(update_employees))
        .route("/api/employees/delete/:id", delete(delete_one))
        .route("/api/employees/delete", delete(delete_many))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn employee(id: i64, name: &str, position: &str, salary: &str) -> EmployeeRecord {
    EmployeeRecord {
        id: Some(EmployeeId(id)),
        name: name.to_string(),
        position: position.to_string(),
        salary: salary.to_string(),
    }
}

async fn loaded_grid(client: &HttpEmployeeClient) -> GridController {
    let mut grid = GridController::new();
    let request = grid.load().expect("load request");
    let outcome = execute(client, request).await;
    assert_eq!(grid.apply(outcome), None);
    grid
}

#[test]
fn normalizes_base_url() {
    assert_eq!(
        normalize_base_url(" http://localhost:8080/ ").expect("valid"),
        "http://localhost:8080"
    );
    assert_eq!(
        HttpEmployeeClient::new("http://localhost:8080/api/")
            .expect("client")
            .base_url(),
        "http://localhost:8080/api"
    );
    assert!(matches!(
        normalize_base_url("localhost:8080"),
        Err(ClientError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        normalize_base_url("ftp://example.com"),
        Err(ClientError::InvalidBaseUrl { .. })
    ));
}

#[tokio::test]
async fn list_accepts_numeric_salaries() {
    let state = MockServerState::seeded(vec![employee(1, "Alice", "Eng", "100.5")], 2);
    let server_url = spawn_employee_server(state).await.expect("spawn server");
    let client = HttpEmployeeClient::new(&server_url).expect("client");

    let employees = client.list_employees().await.expect("list");
    assert_eq!(employees, vec![employee(1, "Alice", "Eng", "100.5")]);
}

#[tokio::test]
async fn non_success_status_is_a_network_failure() {
    let state = MockServerState::seeded(Vec::new(), 1);
    *state.fail.lock().await = true;
    let server_url = spawn_employee_server(state).await.expect("spawn server");
    let client = HttpEmployeeClient::new(&server_url).expect("client");

    let err = client.list_employees().await.expect_err("should fail");
    assert!(matches!(
        err,
        ClientError::Network {
            operation: "list employees",
            ..
        }
    ));
}

#[tokio::test]
async fn failed_initial_load_raises_fetch_error() {
    let state = MockServerState::seeded(vec![employee(1, "Alice", "Eng", "100")], 2);
    *state.fail.lock().await = true;
    let server_url = spawn_employee_server(state).await.expect("spawn server");
    let client = HttpEmployeeClient::new(&server_url).expect("client");

    let mut grid = GridController::new();
    let outcome = execute(&client, grid.load().expect("load")).await;
    let notification = grid.apply(outcome).expect("notification");
    assert_eq!(notification, Notification::error(messages::LOAD_FAILED));
    assert!(grid.is_empty());
}

#[tokio::test]
async fn save_creates_new_rows_and_adopts_server_ids() {
    let state = MockServerState::seeded(Vec::new(), 7);
    let server_url = spawn_employee_server(state.clone())
        .await
        .expect("spawn server");
    let client = HttpEmployeeClient::new(&server_url).expect("client");

    let mut grid = loaded_grid(&client).await;
    grid.add_row();
    grid.edit_field(0, EmployeeField::Name, "Alice").expect("edit");
    grid.edit_field(0, EmployeeField::Position, "Eng").expect("edit");
    grid.edit_field(0, EmployeeField::Salary, "100").expect("edit");

    let requests = grid.save().expect("save");
    let mut notifications = Vec::new();
    for outcome in execute_all(&client, requests).await {
        notifications.extend(grid.apply(outcome));
    }

    assert_eq!(
        state.bodies.lock().await.clone(),
        vec![json!([{"name": "Alice", "position": "Eng", "salary": "100"}])]
    );
    assert_eq!(
        grid.records().cloned().collect::<Vec<_>>(),
        vec![employee(7, "Alice", "Eng", "100")]
    );
    assert_eq!(
        notifications,
        vec![Notification::success("New employees added successfully!")]
    );
}

#[tokio::test]
async fn save_sends_updates_keyed_by_id() {
    let state = MockServerState::seeded(
        vec![employee(3, "Cara", "Eng", "80"), employee(4, "Dan", "Ops", "70")],
        5,
    );
    let server_url = spawn_employee_server(state.clone())
        .await
        .expect("spawn server");
    let client = HttpEmployeeClient::new(&server_url).expect("client");

    let mut grid = loaded_grid(&client).await;
    grid.edit_field(1, EmployeeField::Position, "Lead").expect("edit");
    let requests = grid.save().expect("save");
    let outcomes = execute_all(&client, requests).await;
    let notifications: Vec<_> = outcomes
        .into_iter()
        .filter_map(|outcome| grid.apply(outcome))
        .collect();

    assert_eq!(
        notifications,
        vec![Notification::success(messages::UPDATE_SUCCEEDED)]
    );
    let body = state.bodies.lock().await.pop().expect("update body");
    assert_eq!(body["4"]["position"], "Lead");
    assert_eq!(body["3"]["name"], "Cara");
    assert_eq!(
        state.employees.lock().await.get(&4).map(|r| r.position.clone()),
        Some("Lead".to_string())
    );
}

#[tokio::test]
async fn single_delete_targets_the_id_path() {
    let state = MockServerState::seeded(
        vec![employee(3, "Cara", "Eng", "80"), employee(4, "Dan", "Ops", "70")],
        5,
    );
    let server_url = spawn_employee_server(state.clone())
        .await
        .expect("spawn server");
    let client = HttpEmployeeClient::new(&server_url).expect("client");

    let mut grid = loaded_grid(&client).await;
    grid.toggle_selection(EmployeeId(3));
    let request = grid
        .delete_with(&mut |_: &str| true)
        .expect("delete")
        .expect("request");
    let notification = grid.apply(execute(&client, request).await);

    assert_eq!(
        notification,
        Some(Notification::success(messages::DELETE_ONE_SUCCEEDED))
    );
    assert!(state
        .requests
        .lock()
        .await
        .contains(&"DELETE /api/employees/delete/3".to_string()));
    assert!(grid.records().all(|record| record.id != Some(EmployeeId(3))));
    assert!(grid.selection().is_empty());
}

#[tokio::test]
async fn bulk_delete_joins_ids_and_keeps_state_on_failure() {
    let state = MockServerState::seeded(
        vec![employee(3, "Cara", "Eng", "80"), employee(4, "Dan", "Ops", "70")],
        5,
    );
    let server_url = spawn_employee_server(state.clone())
        .await
        .expect("spawn server");
    let client = HttpEmployeeClient::new(&server_url).expect("client");

    let mut grid = loaded_grid(&client).await;
    grid.toggle_selection(EmployeeId(3));
    grid.toggle_selection(EmployeeId(4));
    *state.fail.lock().await = true;

    let request = grid
        .delete_with(&mut |_: &str| true)
        .expect("delete")
        .expect("request");
    let notification = grid
        .apply(execute(&client, request).await)
        .expect("notification");

    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(
        state.requests.lock().await.last().cloned(),
        Some("DELETE /api/employees/delete?ids=3,4".to_string())
    );
    assert_eq!(grid.len(), 2);
    assert_eq!(grid.selection().len(), 2);

    *state.fail.lock().await = false;
    let request = grid
        .delete_with(&mut |_: &str| true)
        .expect("retry delete")
        .expect("request");
    let notification = grid.apply(execute(&client, request).await);
    assert_eq!(
        notification,
        Some(Notification::success(messages::DELETE_MANY_SUCCEEDED))
    );
    assert!(grid.is_empty());
    assert!(state.employees.lock().await.is_empty());
}
