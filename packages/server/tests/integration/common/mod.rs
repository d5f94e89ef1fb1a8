use std::net::SocketAddr;

use chrono::{DateTime, Duration, Utc};
use podium_common::{ApprovalStatus, Category, Gender};
use reqwest::Client;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde_json::Value;
use tempfile::TempDir;
use uuid::Uuid;

use podium_server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig, SessionConfig,
};
use podium_server::entity::{approval, branch, contest, institute, user, vote};
use podium_server::state::AppState;
use podium_server::utils::jwt;

const JWT_SECRET: &str = "test-secret-for-integration-tests";

pub mod routes {
    pub const ME: &str = "/api/v1/me";
    pub const CONTESTS: &str = "/api/v1/contests";
    pub const JOINABLE: &str = "/api/v1/contests/joinable";
    pub const SELECTION: &str = "/api/v1/session/selection";
    pub const SELECTION_BACK: &str = "/api/v1/session/selection/back";
    pub const VIEW: &str = "/api/v1/session/view";

    pub fn contest(id: i32) -> String {
        format!("/api/v1/contests/{id}")
    }

    pub fn leaderboard(id: i32) -> String {
        format!("/api/v1/contests/{id}/leaderboard")
    }

    pub fn winners(id: i32) -> String {
        format!("/api/v1/contests/{id}/winners")
    }

    pub fn participation(id: i32) -> String {
        format!("/api/v1/contests/{id}/participation")
    }

    pub fn approvals(id: i32) -> String {
        format!("/api/v1/contests/{id}/approvals")
    }

    pub fn approval(id: i32, user_id: i32) -> String {
        format!("/api/v1/contests/{id}/approvals/{user_id}")
    }

    pub fn votes(id: i32) -> String {
        format!("/api/v1/contests/{id}/votes")
    }

    pub fn my_vote(id: i32) -> String {
        format!("/api/v1/contests/{id}/votes/me")
    }
}

/// A running test server backed by a throwaway SQLite file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());

        let mut database = DatabaseConfig::with_url(db_url);
        database.max_connections = 5;

        let db = podium_server::database::init_db(&database)
            .await
            .expect("Failed to initialize test database");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig::default(),
            },
            database,
            auth: AuthConfig {
                jwt_secret: JWT_SECRET.to_string(),
            },
            session: SessionConfig::default(),
        };

        let app = podium_server::build_router(AppState::new(db.clone(), app_config));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn patch_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");

        TestResponse::from_response(res).await
    }

    /// Mint a token for a user with a fresh session id.
    pub fn token_for(&self, user_id: i32, permissions: &[&str]) -> String {
        self.token_with_session(user_id, Uuid::new_v4(), permissions)
    }

    pub fn token_with_session(&self, user_id: i32, session_id: Uuid, permissions: &[&str]) -> String {
        jwt::sign(
            user_id,
            &format!("user-{user_id}"),
            session_id,
            permissions.iter().map(|p| p.to_string()).collect(),
            Duration::hours(1),
            JWT_SECRET,
        )
        .expect("Failed to sign token")
    }

    pub async fn create_institute(&self, name: &str) -> i32 {
        institute::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert institute")
        .id
    }

    pub async fn create_branch(&self, institute_id: i32, name: &str) -> i32 {
        branch::ActiveModel {
            name: Set(name.to_string()),
            institute_id: Set(institute_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert branch")
        .id
    }

    pub async fn create_user(
        &self,
        name: &str,
        gender: Gender,
        institute_id: Option<i32>,
        image: Option<&str>,
    ) -> i32 {
        user::ActiveModel {
            name: Set(name.to_string()),
            image: Set(image.map(str::to_string)),
            gender: Set(gender),
            institute_id: Set(institute_id),
            branch_id: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert user")
        .id
    }

    /// A user with a profile image, ready to request participation.
    pub async fn create_contestant(&self, name: &str, gender: Gender, institute_id: i32) -> i32 {
        self.create_user(
            name,
            gender,
            Some(institute_id),
            Some("https://cdn.example/avatar.png"),
        )
        .await
    }

    /// Users without a profile image, enough to cast votes.
    pub async fn create_voters(&self, institute_id: i32, n: usize) -> Vec<i32> {
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            ids.push(
                self.create_user(&format!("voter-{i}"), Gender::Other, Some(institute_id), None)
                    .await,
            );
        }
        ids
    }

    pub async fn assign_branch(&self, user_id: i32, branch_id: i32) {
        let usr = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .expect("Failed to load user")
            .expect("user should exist");
        let mut active: user::ActiveModel = usr.into();
        active.branch_id = Set(Some(branch_id));
        active
            .update(&self.db)
            .await
            .expect("Failed to assign branch");
    }

    pub async fn create_contest(
        &self,
        name: &str,
        category: Category,
        institute_id: i32,
        end_date: DateTime<Utc>,
    ) -> i32 {
        contest::ActiveModel {
            name: Set(name.to_string()),
            category: Set(category),
            end_date: Set(end_date),
            institute_id: Set(institute_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert contest")
        .id
    }

    /// Record an already approved participant. `order` sets the request
    /// time relative to other fixtures, lowest first.
    pub async fn approve_participant(&self, contest_id: i32, user_id: i32, order: i64) {
        self.record_approval(contest_id, user_id, ApprovalStatus::Approved, order)
            .await;
    }

    pub async fn record_approval(
        &self,
        contest_id: i32,
        user_id: i32,
        status: ApprovalStatus,
        order: i64,
    ) {
        let requested_at = Utc::now() - Duration::days(30) + Duration::seconds(order);
        let reviewed_at = status.is_decision().then_some(requested_at);
        approval::ActiveModel {
            contest_id: Set(contest_id),
            user_id: Set(user_id),
            status: Set(status),
            requested_at: Set(requested_at),
            reviewed_at: Set(reviewed_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert approval");
    }

    /// Record a vote directly, bypassing the end-date check.
    pub async fn insert_vote(&self, contest_id: i32, voter_id: i32, participant_id: i32) {
        vote::ActiveModel {
            contest_id: Set(contest_id),
            voter_id: Set(voter_id),
            participant_id: Set(participant_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert vote");
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    /// Values of `field` across a JSON array body.
    pub fn pluck_i64(&self, field: &str) -> Vec<i64> {
        self.body
            .as_array()
            .expect("response body should be an array")
            .iter()
            .map(|item| item[field].as_i64().expect("field should be an integer"))
            .collect()
    }
}

pub fn in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}
