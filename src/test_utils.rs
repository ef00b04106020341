#[cfg(test)]
pub mod test_utils {
    use crate::auth::{create_token, hash_password};
    use crate::config::{build_app_state, Settings};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use axum_test::TestServer;
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use model::entities::user::{self, AccountStatus, Role};
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Password of every seeded account.
    pub const TEST_PASSWORD: &str = "password123";
    pub const TEST_HALL: &str = "Shah Paran Hall";

    /// Seeded accounts, one per role plus a pending registration.
    pub struct TestUsers {
        pub admin: user::Model,
        pub staff: user::Model,
        pub teacher: user::Model,
        pub student: user::Model,
        pub other_student: user::Model,
        pub canteen: user::Model,
        pub pending: user::Model,
    }

    /// Settings for tests: cheap bcrypt, fixed secret.
    pub fn test_settings() -> Settings {
        Settings {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            bcrypt_cost: 4,
            ..Settings::default()
        }
    }

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    async fn insert_user(
        db: &DatabaseConnection,
        name: &str,
        email: &str,
        role: Role,
        status: AccountStatus,
        hall_name: Option<&str>,
    ) -> user::Model {
        user::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(hash_password(TEST_PASSWORD, 4).expect("Failed to hash password")),
            role: Set(role),
            hall_name: Set(hall_name.map(str::to_string)),
            account_status: Set(status),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create test user")
    }

    pub async fn seed_users(db: &DatabaseConnection) -> TestUsers {
        use AccountStatus::{Approved, Pending};

        TestUsers {
            admin: insert_user(db, "Admin", "admin@sust.edu", Role::Admin, Approved, None).await,
            staff: insert_user(db, "Staff", "staff@sust.edu", Role::Staff, Approved, Some(TEST_HALL)).await,
            teacher: insert_user(db, "Teacher", "teacher@sust.edu", Role::Teacher, Approved, Some(TEST_HALL))
                .await,
            student: insert_user(db, "Rahim", "rahim@sust.edu", Role::Student, Approved, Some(TEST_HALL))
                .await,
            other_student: insert_user(db, "Karim", "karim@sust.edu", Role::Student, Approved, Some(TEST_HALL))
                .await,
            canteen: insert_user(
                db,
                "Canteen",
                "canteen@sust.edu",
                Role::CanteenManager,
                Approved,
                Some(TEST_HALL),
            )
            .await,
            pending: insert_user(db, "Newcomer", "new@sust.edu", Role::Student, Pending, Some(TEST_HALL))
                .await,
        }
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> (AppState, TestUsers) {
        let db = setup_test_db().await;
        let users = seed_users(&db).await;
        (build_app_state(db, test_settings()), users)
    }

    /// Bearer token for a seeded user.
    pub fn token_for(user: &user::Model) -> String {
        create_token(user, &test_settings()).expect("Failed to create token")
    }

    /// Value for the Authorization header.
    pub fn bearer(user: &user::Model) -> String {
        format!("Bearer {}", token_for(user))
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> (Router, TestUsers) {
        let _ = init_test_tracing();

        let (state, users) = setup_test_app_state().await;
        (create_router(state), users)
    }

    /// Test server plus the seeded accounts.
    pub async fn setup_test_server() -> (TestServer, TestUsers) {
        let (app, users) = setup_test_app().await;
        (TestServer::new(app).unwrap(), users)
    }
}
