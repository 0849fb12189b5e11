use backend::config::db::{ConnectionSettings, DbKind};
use backend::config::profile::Profile;
use backend::infra::db::{connect_db, ensure_database_exists};
use clap::Parser;
use migration::MigrationCommand;

#[derive(Parser)]
#[command(name = "migration")]
#[command(about = "Todos database migration tool")]
struct Args {
    /// up | down | fresh | reset | refresh | status
    command: MigrationCommand,

    /// Profile in config/database.toml; defaults to APP_ENV, then development
    #[arg(short, long)]
    profile: Option<Profile>,

    /// Connection URL, overriding the profile and DATABASE_URL
    #[arg(long)]
    url: Option<String>,
}

async fn run(args: Args) -> Result<(), String> {
    let profile = match args.profile {
        Some(profile) => profile,
        None => Profile::from_env().map_err(|e| e.to_string())?,
    };
    let settings = match args.url {
        Some(url) => ConnectionSettings::from_url(profile, url),
        None => ConnectionSettings::from_env(profile),
    }
    .map_err(|e| e.to_string())?;

    if settings.kind == DbKind::SqliteMemory {
        return Err(
            "in-memory SQLite is not supported here: the database disappears when the command exits"
                .to_string(),
        );
    }

    ensure_database_exists(&settings)
        .await
        .map_err(|e| e.to_string())?;
    let db = connect_db(&settings).await.map_err(|e| e.to_string())?;

    let result = migration::migrate(&db, args.command)
        .await
        .map_err(|e| format!("Migration failed: {e}"));
    let _ = db.close().await;
    result
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
