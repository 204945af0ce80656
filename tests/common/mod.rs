use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    #[allow(dead_code)]
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests.
        // Inherits the environment so the server sees DATABASE_URL from .env.
        let mut cmd = Command::new("target/debug/huddle-api");
        cmd.env("HUDDLE_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Unique-enough name for test entities; user and workspace names are
/// globally unique so collisions across runs would fail setup.
pub fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// Unique-enough positive id for conversation lines.
#[allow(dead_code)]
pub fn unique_id() -> i64 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    (nanos % (i64::MAX as u128)) as i64
}

pub struct TestUser {
    pub id: i64,
    #[allow(dead_code)]
    pub name: String,
    pub token: String,
}

/// Sign up a fresh user and log in, returning id, name and bearer token.
pub async fn sign_up_and_login(base_url: &str, prefix: &str) -> Result<TestUser> {
    let client = reqwest::Client::new();
    let name = unique_name(prefix);
    let password = "hunter2-hunter2";

    let res = client
        .post(format!("{}/api/user/sign_up", base_url))
        .json(&json!({ "name": name, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "sign up failed: {}", res.status());

    let res = client
        .post(format!("{}/api/user/login", base_url))
        .json(&json!({ "name": name, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body: Value = res.json().await?;
    let token = body["token"].as_str().context("missing token")?.to_string();
    let id = body["user"]["id"].as_i64().context("missing user id")?;

    Ok(TestUser { id, name, token })
}

/// Create a workspace as the given user and return its id.
#[allow(dead_code)]
pub async fn create_workspace(base_url: &str, token: &str, prefix: &str) -> Result<i64> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/workspace/create", base_url))
        .bearer_auth(token)
        .json(&json!({ "name": unique_name(prefix) }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "workspace create failed: {}",
        res.status()
    );

    let body: Value = res.json().await?;
    body["id"].as_i64().context("missing workspace id")
}

/// Add a user to a workspace with the given role id.
#[allow(dead_code)]
pub async fn add_workspace_member(
    base_url: &str,
    token: &str,
    workspace_id: i64,
    user_id: i64,
    role_id: i32,
) -> Result<StatusCode> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/workspace/add_user", base_url))
        .bearer_auth(token)
        .json(&json!({
            "workspace_id": workspace_id,
            "user_id": user_id,
            "role_id": role_id
        }))
        .send()
        .await?;
    Ok(res.status())
}

/// Create a channel in a workspace and return its id.
#[allow(dead_code)]
pub async fn create_channel(
    base_url: &str,
    token: &str,
    workspace_id: i64,
    name: &str,
    is_private: bool,
) -> Result<i64> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/channel/create", base_url))
        .bearer_auth(token)
        .json(&json!({
            "name": name,
            "description": "",
            "is_private": is_private,
            "workspace_id": workspace_id
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "channel create failed: {}",
        res.status()
    );

    let body: Value = res.json().await?;
    body["id"].as_i64().context("missing channel id")
}
