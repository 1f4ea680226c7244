use clap::{Parser, ValueEnum};
use tracing::{error, info};

use booking_infrastructure::{create_pool, PgConnectionProvider, PgSchemaInspector};
use booking_schema::schema::render;
use booking_schema::{catalog, verify_schema, SchemaInitializer};
use booking_shared::config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "schema-init",
    version,
    about = "Create or converge the booking/payments database schema"
)]
struct Args {
    /// Print the schema plan and exit without touching the database
    #[arg(long)]
    plan: bool,

    /// Output format for --plan
    #[arg(long, value_enum, default_value_t = PlanFormat::Sql)]
    format: PlanFormat,

    /// Skip the catalog check after a successful run
    #[arg(long)]
    skip_verify: bool,

    /// Override database.url from configuration
    #[arg(long)]
    database_url: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlanFormat {
    Sql,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize telemetry
    booking_shared::telemetry::init_telemetry();

    let initializer = SchemaInitializer::booking();

    if args.plan {
        let output = match args.format {
            PlanFormat::Sql => render::postgres_script(initializer.plan().statements()),
            PlanFormat::Json => serde_json::to_string_pretty(initializer.plan())?,
        };
        println!("{}", output);
        return Ok(());
    }

    // Load configuration
    let overrides: Vec<(&str, &str)> = args
        .database_url
        .as_deref()
        .map(|url| vec![("database.url", url)])
        .unwrap_or_default();
    let config = match AppConfig::load_with(&overrides) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("{} starting ({})", config.app.name, config.app.env);

    // Connect to Database
    info!("Connecting to database at {}...", config.database.redacted_url());
    let pool = create_pool(&config.database).await?;
    info!("Database connection established.");

    let provider = PgConnectionProvider::new(pool.clone());
    let initializer = initializer.with_lock_key(config.schema.lock_key);

    if let Err(e) = initializer.initialize(&provider).await {
        pool.close().await;
        return Err(e.into());
    }

    if !args.skip_verify {
        let missing = verify_schema(&PgSchemaInspector::new(pool.clone()), initializer.plan()).await?;
        if !missing.is_empty() {
            pool.close().await;
            anyhow::bail!(
                "{} schema objects missing after initialization (first: {})",
                missing.len(),
                missing[0]
            );
        }
    }

    pool.close().await;
    info!("Schema ready: {} tables", catalog::TABLES.len());

    Ok(())
}
