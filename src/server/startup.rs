use axum::Router;
use sea_orm::DatabaseConnection;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};

use crate::server::{
    config::{Config, SecurityProfile},
    error::Error,
    model::{
        app::AppState,
        session::store::{spawn_deletion_task, SessionMemoryStore},
    },
    router, security,
};

/// Session lifetime measured from the last request
pub const SESSION_IDLE_HOURS: i64 = 1;

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Configure cookie based sessions backed by `store`
pub fn session_layer(
    store: SessionMemoryStore,
    profile: &SecurityProfile,
) -> SessionManagerLayer<SessionMemoryStore> {
    use time::Duration;

    SessionManagerLayer::new(store)
        .with_secure(profile.secure_cookies)
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::hours(SESSION_IDLE_HOURS)))
}

/// Assembles routes, state, sessions and security layers into the served application.
///
/// Spawns the expired session sweep, so this must be called from within a Tokio runtime.
pub fn build_app(db: DatabaseConnection, profile: SecurityProfile) -> Router {
    let store = SessionMemoryStore::default();
    spawn_deletion_task(store.clone());

    let app = router::routes()
        .with_state(AppState::from(db))
        .layer(session_layer(store, &profile));

    security::apply(app, profile)
}
