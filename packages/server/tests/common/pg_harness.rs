//! Test harness with testcontainers for the Postgres-backed stores.
//!
//! One Postgres container is started and migrated on first use and shared by
//! every test. Tests never truncate; seed helpers create authors with unique
//! names so tests stay independent on the shared database.

use anyhow::{Context, Result};
use axum::http::Method;
use axum::Router;
use news_core::common::{AuthorId, Role};
use news_core::domains::auth::{hash_password, JwtService};
use news_core::domains::authors::Author;
use news_core::domains::comments::Comment;
use news_core::domains::news::News;
use news_core::kernel::ServerDeps;
use news_core::server::build_app;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use super::{send_request, TestResponse};

pub const SEED_PASSWORD: &str = "password123";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Full router over `ServerDeps::postgres`
///
/// ```ignore
/// #[test_context(PgHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &PgHarness) {
///     let alice = ctx.author("alice", &[Role::User]).await;
///     // ...
/// }
/// ```
pub struct PgHarness {
    pub app: Router,
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
}

impl AsyncTestContext for PgHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl PgHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        // Create a fresh pool for this test
        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let jwt_service = Arc::new(JwtService::new("test_secret", "test_issuer".to_string()));
        let deps = ServerDeps::postgres(db_pool.clone(), jwt_service.clone());

        Ok(Self {
            app: build_app(deps, &[]),
            db_pool,
            jwt_service,
        })
    }

    /// Insert an author whose name starts with `prefix`; logs in with
    /// `SEED_PASSWORD`
    pub async fn author(&self, prefix: &str, roles: &[Role]) -> Author {
        let name = format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8]);
        Author::create(&name, &hash_password(SEED_PASSWORD), roles, &self.db_pool)
            .await
            .expect("Failed to seed author")
    }

    pub async fn news(&self, author: &Author, title: &str) -> News {
        News::create(author.id, title, "Seeded text", &self.db_pool)
            .await
            .expect("Failed to seed news")
    }

    pub async fn comment(&self, news: &News, author: &Author, text: &str) -> Comment {
        Comment::create(news.id, author.id, text, &self.db_pool)
            .await
            .expect("Failed to seed comment")
    }

    /// Token carrying the author's roles at seed time
    pub fn token(&self, author: &Author) -> String {
        self.token_with_roles(author.id, &author.name, &author.role_set())
    }

    pub fn token_with_roles(&self, id: AuthorId, name: &str, roles: &[Role]) -> String {
        self.jwt_service
            .create_token(id, name, roles)
            .expect("Failed to create test token")
    }

    pub async fn send_as(
        &self,
        author: &Author,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> TestResponse {
        let token = self.token(author);
        send_request(&self.app, method, uri, Some(&token), body).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        send_request(&self.app, method, uri, token, body).await
    }
}
