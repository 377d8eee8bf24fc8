use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct DayResponse {
    date: String,
    logged: bool,
    easy: u64,
    medium: u64,
    hard: u64,
    total: u64,
}

#[derive(Debug, Deserialize)]
struct StatusCard {
    date: String,
    status: String,
    percentage: f64,
}

#[derive(Debug, Deserialize)]
struct DashboardResponse {
    date: String,
    goal: u64,
    days: u32,
    solved_today: u64,
    current_streak: u32,
    total_all_time: u64,
    window: Vec<serde_json::Value>,
    status_cards: Vec<StatusCard>,
    list_url: String,
    warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ReminderStatus {
    elapsed_secs: i64,
    due: bool,
    fire: bool,
}

#[derive(Debug, Deserialize)]
struct ListUrlPayload {
    url: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    spawn_server_with(None).await
}

async fn spawn_server_with(seed: Option<&str>) -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    if let Some(contents) = seed {
        std::fs::write(&data_path, contents).expect("seed data file");
    }
    let child = Command::new(env!("CARGO_BIN_EXE_daily_goal_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("DAILY_GOAL", "25")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    #[cfg(unix)]
    cleanup::register(server.child.id());
    *guard = Some(Arc::clone(&server));
    server
}

fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

#[tokio::test]
async fn http_log_day_updates_dashboard() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/day", server.base_url))
        .json(&serde_json::json!({ "easy": 10, "medium": 10, "hard": 6 }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let logged: DayResponse = response.json().await.unwrap();
    assert_eq!(logged.date, today());
    assert!(logged.logged);
    assert_eq!((logged.easy, logged.medium, logged.hard), (10, 10, 6));
    assert_eq!(logged.total, 26);

    let dashboard: DashboardResponse = client
        .get(format!("{}/api/dashboard?days=5", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(dashboard.date, today());
    assert_eq!(dashboard.goal, 25);
    assert_eq!(dashboard.days, 5);
    assert_eq!(dashboard.solved_today, 26);
    assert_eq!(dashboard.current_streak, 1);
    assert_eq!(dashboard.total_all_time, 26);
    assert_eq!(dashboard.window.len(), 5);
    assert_eq!(dashboard.status_cards.len(), 5);
    assert_eq!(dashboard.status_cards[0].date, today());
    assert_eq!(dashboard.status_cards[0].status, "goal_met");
    assert_eq!(dashboard.status_cards[0].percentage, 100.0);
    assert!(dashboard.status_cards[1..]
        .iter()
        .all(|card| card.status == "upcoming" && card.percentage == 0.0));
}

#[tokio::test]
async fn http_rejects_future_dates_and_bad_windows() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let tomorrow = (chrono::Local::now().date_naive() + chrono::Duration::days(1)).to_string();
    let response = client
        .post(format!("{}/api/day", server.base_url))
        .json(&serde_json::json!({ "date": tomorrow, "easy": 1, "medium": 0, "hard": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    for days in ["0", "366"] {
        let response = client
            .get(format!("{}/api/dashboard?days={days}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    let response = client
        .get(format!("{}/api/day/yesterday", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_unlogged_day_reads_as_zero() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let day: DayResponse = client
        .get(format!("{}/api/day/2001-02-03", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(day.date, "2001-02-03");
    assert!(!day.logged);
    assert_eq!(day.total, 0);
}

#[tokio::test]
async fn http_list_url_updates() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .put(format!("{}/api/list-url", server.base_url))
        .json(&serde_json::json!({ "url": "  https://leetcode.com/problem-list/test/  " }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let current: ListUrlPayload = client
        .get(format!("{}/api/list-url", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current.url, "https://leetcode.com/problem-list/test/");

    let dashboard: DashboardResponse = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(dashboard.list_url, current.url);
    assert_eq!(dashboard.days, 7);

    let response = client
        .put(format!("{}/api/list-url", server.base_url))
        .json(&serde_json::json!({ "url": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_reminder_reset_restarts_clock() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let status: ReminderStatus = client
        .post(format!("{}/api/reminder/reset", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(status.elapsed_secs, 0);
    assert!(!status.due);
    assert!(!status.fire);
}

#[tokio::test]
async fn http_skipped_entries_reported_until_saved() {
    let server = spawn_server_with(Some(
        r#"{"2001-01-01": "ten", "2001-01-02": 12, "leetcode_list_url": "https://example.com/l"}"#,
    ))
    .await;
    let client = Client::new();

    let dashboard: DashboardResponse = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(dashboard.warnings.len(), 1);
    assert!(dashboard.warnings[0].contains("2001-01-01"));
    assert_eq!(dashboard.total_all_time, 12);
    assert_eq!(dashboard.list_url, "https://example.com/l");

    let response = client
        .post(format!("{}/api/day", server.base_url))
        .json(&serde_json::json!({ "date": "2001-01-03", "easy": 1, "medium": 1, "hard": 1 }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let dashboard: DashboardResponse = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(dashboard.warnings.is_empty());
    assert_eq!(dashboard.total_all_time, 15);
}
