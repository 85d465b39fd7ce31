//! Libris command line: serve the site, manage the database and check a running server.

use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use entity::sea_orm_active_enums::Permission;
use sea_orm::{ActiveEnum, Iterable};
use tracing_subscriber::{filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use libris::{
    client::smoke,
    server::{
        config::Config,
        form::{user::UserCreationForm, FormErrors},
        model::user::NewUser,
        service::{
            catalog::{CatalogService, LibrarianLookup, SAMPLE_AUTHOR, SAMPLE_LIBRARY},
            group::GroupService,
            user::UserService,
        },
        startup,
    },
};

#[derive(Parser)]
#[command(name = "libris", about = "Library catalog with role based access and a book API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations and serve the site.
    Serve {
        /// Address to bind, overrides BIND_ADDRESS.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Apply pending database migrations.
    Migrate,

    /// Create a staff superuser with an Admin profile.
    CreateSuperuser {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, env = "LIBRIS_SUPERUSER_PASSWORD")]
        password: String,

        /// Accept a password the validators reject.
        #[arg(long)]
        skip_password_validation: bool,
    },

    /// Create the Viewers, Editors and Admins groups with their permissions.
    SetupGroups,

    /// Grant a permission codename to a user, or add the user to a group.
    Grant {
        username: String,

        /// Codename such as bookshelf.book.can_delete.
        #[arg(long, required_unless_present = "group", conflicts_with = "group")]
        permission: Option<String>,

        #[arg(long)]
        group: Option<String>,
    },

    /// Seed the sample catalog if needed and run the sample queries.
    QuerySamples,

    /// Exercise the book API of a running server.
    SmokeTest {
        #[arg(long, env = "LIBRIS_URL", default_value = "http://127.0.0.1:8000")]
        url: String,

        #[arg(long, default_value = smoke::DEFAULT_USERNAME)]
        username: String,

        #[arg(long, default_value = smoke::DEFAULT_PASSWORD)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let security_log = std::env::var_os("SECURITY_LOG")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    init_tracing(security_log.as_deref())?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => serve(bind).await?,
        Commands::Migrate => {
            let config = Config::from_env()?;
            startup::connect_to_database(&config).await?;
            tracing::info!("migrations applied");
        }
        Commands::CreateSuperuser {
            username,
            email,
            password,
            skip_password_validation,
        } => {
            create_superuser(&username, email, &password, skip_password_validation).await?;
        }
        Commands::SetupGroups => setup_groups().await?,
        Commands::Grant {
            username,
            permission,
            group,
        } => grant(&username, permission.as_deref(), group.as_deref()).await?,
        Commands::QuerySamples => query_samples().await?,
        Commands::SmokeTest {
            url,
            username,
            password,
        } => {
            let report = smoke::run(&url, &username, &password).await?;

            println!("Unauthenticated request denied");
            println!("Books via /api/books/:     {}", report.listed);
            println!("Books via /api/books_all/: {}", report.listed_all);
            if let Some(book) = &report.created {
                println!("Created, retrieved and deleted book {}", book.id);
            }
            println!("All API checks passed");
        }
    }

    Ok(())
}

/// Console logging filtered by `RUST_LOG`, plus an optional file for `security` warnings
fn init_tracing(security_log: Option<&Path>) -> Result<()> {
    let security_layer = match security_log {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open security log {}", path.display()))?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(Targets::new().with_target("security", tracing::Level::WARN)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "libris=info,security=warn,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(security_layer)
        .init();

    Ok(())
}

async fn serve(bind: Option<String>) -> Result<()> {
    let config = Config::from_env()?;
    let bind = bind.unwrap_or_else(|| config.bind_address.clone());

    let db = startup::connect_to_database(&config).await?;
    let app = startup::build_app(db, config.security());

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;

    tracing::info!(bind = %bind, debug = config.debug, "Libris listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}

fn describe(errors: FormErrors) -> String {
    errors
        .into_inner()
        .into_iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn create_superuser(
    username: &str,
    email: Option<String>,
    password: &str,
    skip_password_validation: bool,
) -> Result<()> {
    let form = UserCreationForm {
        username: username.to_string(),
        email: email.unwrap_or_default(),
        password1: password.to_string(),
        password2: password.to_string(),
        ..Default::default()
    };

    let new_user = match form.validate() {
        Ok(new_user) => new_user,
        Err(errors) => {
            let only_password = errors.clone().into_inner().keys().all(|k| k == "password2");
            if !(skip_password_validation && only_password) {
                bail!("invalid superuser:\n{}", describe(errors));
            }

            tracing::warn!("bypassing password validation");

            let mut without_password = form.clone();
            without_password.password1 = "unused-valid-passphrase".to_string();
            without_password.password2 = without_password.password1.clone();

            NewUser {
                password: password.to_string(),
                ..without_password.validate().map_err(|e| anyhow::anyhow!(describe(e)))?
            }
        }
    };

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    let user = UserService::new(&db).create_superuser(&new_user).await?;
    println!("Superuser {} created", user.username);

    Ok(())
}

async fn setup_groups() -> Result<()> {
    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    for (name, created) in GroupService::new(&db).setup_default_groups().await? {
        if created {
            println!("Created group {}", name);
        } else {
            println!("Group {} already exists, permissions refreshed", name);
        }
    }

    Ok(())
}

fn parse_permission(codename: &str) -> Result<Permission> {
    Permission::iter()
        .find(|permission| permission.to_value() == codename)
        .with_context(|| {
            let known: Vec<_> = Permission::iter().map(|p| p.to_value()).collect();
            format!("unknown permission {}, expected one of: {}", codename, known.join(", "))
        })
}

async fn grant(username: &str, permission: Option<&str>, group: Option<&str>) -> Result<()> {
    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;
    let group_service = GroupService::new(&db);

    match (permission, group) {
        (Some(codename), _) => {
            let permission = parse_permission(codename)?;
            if group_service.grant(username, permission).await? {
                println!("Granted {} to {}", codename, username);
            } else {
                println!("{} already holds {}", username, codename);
            }
        }
        (None, Some(group)) => {
            group_service.add_user_to_group(username, group).await?;
            println!("Added {} to group {}", username, group);
        }
        (None, None) => bail!("either --permission or --group is required"),
    }

    Ok(())
}

async fn query_samples() -> Result<()> {
    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;
    let catalog = CatalogService::new(&db);

    catalog.seed_samples().await?;

    println!("Books by {}:", SAMPLE_AUTHOR);
    match catalog.books_by_author(SAMPLE_AUTHOR).await? {
        Some(books) => books.iter().for_each(|book| println!("  - {}", book.title)),
        None => println!("  author not found"),
    }

    println!("Books in {}:", SAMPLE_LIBRARY);
    match catalog.books_in_library(SAMPLE_LIBRARY).await? {
        Some(books) => books.iter().for_each(|(book, _)| println!("  - {}", book.title)),
        None => println!("  library not found"),
    }

    match catalog.librarian_for_library(SAMPLE_LIBRARY).await? {
        LibrarianLookup::Found(librarian) => {
            println!("Librarian for {}: {}", SAMPLE_LIBRARY, librarian.name)
        }
        LibrarianLookup::NoLibrarian(library) => {
            println!("No librarian assigned to {}", library.name)
        }
        LibrarianLookup::LibraryNotFound => println!("Library {} not found", SAMPLE_LIBRARY),
    }

    Ok(())
}
