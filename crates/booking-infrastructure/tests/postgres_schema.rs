// ============================================================================
// Booking Infrastructure - PostgreSQL integration tests
// File: crates/booking-infrastructure/tests/postgres_schema.rs
// Description: Runs the schema initializer against a real database.
//              Needs DATABASE_URL pointing at a disposable database:
//              DATABASE_URL=postgres://... cargo test -p booking-infrastructure -- --ignored
// ============================================================================

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use uuid::Uuid;

use booking_infrastructure::{PgConnectionProvider, PgSchemaInspector};
use booking_schema::ports::{ConnectionProvider, SchemaInspector};
use booking_schema::schema::{catalog, ColumnDef, ObjectKind, SchemaPlan, SchemaStatement, TableDef};
use booking_schema::{verify_schema, SchemaError, SchemaInitializer};

/// Pool whose connections all work inside a fresh schema of their own.
async fn isolated_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    let schema = format!("booking_test_{}", Uuid::new_v4().simple());

    let admin = PgPoolOptions::new().max_connections(1).connect(&url).await.unwrap();
    // The extension is database-wide; install it once into public under a lock.
    let mut tx = admin.begin().await.unwrap();
    tx.execute("SELECT pg_advisory_xact_lock(7355608)").await.unwrap();
    tx.execute(r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp" SCHEMA public"#).await.unwrap();
    tx.execute(format!("CREATE SCHEMA {}", schema).as_str()).await.unwrap();
    tx.commit().await.unwrap();
    admin.close().await;

    let search_path = format!("SET search_path TO {}, public", schema);
    PgPoolOptions::new()
        .max_connections(4)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                conn.execute(search_path.as_str()).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .unwrap()
}

async fn initialized_pool() -> PgPool {
    let pool = isolated_pool().await;
    SchemaInitializer::booking()
        .initialize(&PgConnectionProvider::new(pool.clone()))
        .await
        .unwrap();
    pool
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error().and_then(|db| db.code()).map(|c| c.into_owned())
}

async fn insert_company(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO companies (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn insert_user(pool: &PgPool, company_id: Uuid, email: &str) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO users (company_id, name, email, password_hash) VALUES ($1, 'Test User', $2, 'hash') RETURNING id",
    )
    .bind(company_id)
    .bind(email)
    .fetch_one(pool)
    .await
}

async fn insert_booking(pool: &PgPool, company_id: Uuid, user_id: Uuid, hours: i32) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO bookings (company_id, created_by, customer_name, service_name, start_time, end_time, total_price)
        VALUES ($1, $2, 'Customer', 'Haircut', NOW(), NOW() + make_interval(hours => $3), 25.00)
        RETURNING id
        "#,
    )
    .bind(company_id)
    .bind(user_id)
    .bind(hours)
    .fetch_one(pool)
    .await
}

async fn insert_invoice(pool: &PgPool, company_id: Uuid, booking_id: Uuid, number: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO invoices (company_id, booking_id, invoice_number, total_amount) VALUES ($1, $2, $3, 25.00)")
        .bind(company_id)
        .bind(booking_id)
        .bind(number)
        .execute(pool)
        .await
        .map(|_| ())
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn fresh_store_gets_full_catalog() {
    let pool = isolated_pool().await;
    let report = SchemaInitializer::booking()
        .initialize(&PgConnectionProvider::new(pool.clone()))
        .await
        .unwrap();
    assert_eq!(report.total(), catalog::booking_schema().len());

    let snapshot = PgSchemaInspector::new(pool.clone()).inspect().await.unwrap();
    assert_eq!(snapshot.tables.len(), 6);
    for table in catalog::TABLES {
        assert!(snapshot.tables.contains(*table), "missing table {}", table);
    }
    assert_eq!(snapshot.enum_types.len(), 6);
    for index in catalog::INDEXES {
        assert!(snapshot.indexes.contains(*index), "missing index {}", index);
    }

    let missing = verify_schema(&PgSchemaInspector::new(pool), &catalog::booking_schema())
        .await
        .unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn enum_shadowed_further_down_search_path_is_still_created() {
    let pool = isolated_pool().await;
    let mut tx = pool.begin().await.unwrap();
    tx.execute("SELECT pg_advisory_xact_lock(7355608)").await.unwrap();
    tx.execute(
        r#"
        DO $$
        BEGIN
            IF to_regtype('public.company_status') IS NULL THEN
                CREATE TYPE public.company_status AS ENUM ('X');
            END IF;
        END
        $$;
        "#,
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    let report = SchemaInitializer::booking()
        .initialize(&PgConnectionProvider::new(pool.clone()))
        .await
        .unwrap();
    assert_eq!(report.already_present, 0);

    let inspector = PgSchemaInspector::new(pool.clone());
    assert!(inspector.inspect().await.unwrap().enum_types.contains("company_status"));
    let missing = verify_schema(&inspector, &catalog::booking_schema()).await.unwrap();
    assert!(missing.is_empty());

    // Defaults resolve against the schema's own type, not public.company_status.
    insert_company(&pool, "Acme").await;
    let status: String = sqlx::query_scalar("SELECT status::text FROM companies")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status, "ACTIVE");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn second_run_is_a_no_op() {
    let pool = initialized_pool().await;
    let inspector = PgSchemaInspector::new(pool.clone());
    let before = inspector.inspect().await.unwrap();

    let company_id = insert_company(&pool, "Acme").await;

    SchemaInitializer::booking()
        .initialize(&PgConnectionProvider::new(pool.clone()))
        .await
        .unwrap();

    assert_eq!(inspector.inspect().await.unwrap(), before);
    let still_there: Option<Uuid> = sqlx::query_scalar("SELECT id FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(&pool)
        .await
        .unwrap();
    assert_eq!(still_there, Some(company_id));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn concurrent_initializers_both_succeed() {
    let pool = isolated_pool().await;
    let first = PgConnectionProvider::new(pool.clone());
    let second = PgConnectionProvider::new(pool.clone());

    let locked = SchemaInitializer::booking();
    let (a, b) = tokio::join!(locked.initialize(&first), locked.initialize(&second));
    a.unwrap();
    b.unwrap();

    let missing = verify_schema(&PgSchemaInspector::new(pool), &catalog::booking_schema())
        .await
        .unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn concurrent_initializers_without_lock_swallow_races() {
    let pool = isolated_pool().await;
    let provider = PgConnectionProvider::new(pool.clone());
    let unlocked = SchemaInitializer::booking().without_lock();

    let runs = futures::future::join_all((0..3).map(|_| unlocked.initialize(&provider))).await;
    for run in runs {
        run.unwrap();
    }

    let missing = verify_schema(&PgSchemaInspector::new(pool), &catalog::booking_schema())
        .await
        .unwrap();
    assert!(missing.is_empty());
}

fn plan_failing_at_the_end() -> SchemaPlan {
    catalog::booking_schema().push(SchemaStatement::table(
        "broken",
        TableDef::default().column(ColumnDef::new("id", "definitely_not_a_type")),
    ))
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn failed_run_leaves_nothing_behind() {
    let pool = isolated_pool().await;
    let err = SchemaInitializer::new(plan_failing_at_the_end())
        .initialize(&PgConnectionProvider::new(pool.clone()))
        .await
        .unwrap_err();

    match err {
        SchemaError::Statement { name, source, .. } => {
            assert_eq!(name, "broken");
            assert_eq!(source.code.as_deref(), Some("42704"));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let snapshot = PgSchemaInspector::new(pool).inspect().await.unwrap();
    assert!(snapshot.tables.is_empty());
    assert!(snapshot.enum_types.is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn failed_run_keeps_existing_schema() {
    let pool = initialized_pool().await;
    insert_company(&pool, "Acme").await;

    SchemaInitializer::new(plan_failing_at_the_end())
        .initialize(&PgConnectionProvider::new(pool.clone()))
        .await
        .unwrap_err();

    let missing = verify_schema(&PgSchemaInspector::new(pool.clone()), &catalog::booking_schema())
        .await
        .unwrap();
    assert!(missing.is_empty());
    assert_eq!(count(&pool, "companies").await, 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn forward_reference_fails_in_the_database() {
    let pool = isolated_pool().await;
    let plan = catalog::booking_schema();
    let bookings = plan.statements().iter().find(|s| s.name == "bookings").unwrap();

    let provider = PgConnectionProvider::new(pool);
    let mut session = provider.acquire().await.unwrap();
    session.begin().await.unwrap();
    let prerequisites = plan
        .statements()
        .iter()
        .filter(|s| matches!(s.kind, ObjectKind::Extension | ObjectKind::EnumType));
    for stmt in prerequisites {
        session.execute(stmt).await.unwrap();
    }

    let failure = session.execute(bookings).await.unwrap_err();
    assert_eq!(failure.code.as_deref(), Some("42P01"));

    session.rollback().await.unwrap();
    session.release().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn booking_window_must_be_positive() {
    let pool = initialized_pool().await;
    let company_id = insert_company(&pool, "Acme").await;
    let user_id = insert_user(&pool, company_id, "staff@acme.test").await.unwrap();

    insert_booking(&pool, company_id, user_id, 1).await.unwrap();

    let err = insert_booking(&pool, company_id, user_id, 0).await.unwrap_err();
    assert_eq!(sqlstate(&err).as_deref(), Some("23514"));

    let err = insert_booking(&pool, company_id, user_id, -2).await.unwrap_err();
    assert_eq!(sqlstate(&err).as_deref(), Some("23514"));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn email_is_unique_across_tenants() {
    let pool = initialized_pool().await;
    let acme = insert_company(&pool, "Acme").await;
    let globex = insert_company(&pool, "Globex").await;

    insert_user(&pool, acme, "same@example.test").await.unwrap();
    let err = insert_user(&pool, globex, "same@example.test").await.unwrap_err();
    assert_eq!(sqlstate(&err).as_deref(), Some("23505"));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn one_invoice_per_booking() {
    let pool = initialized_pool().await;
    let company_id = insert_company(&pool, "Acme").await;
    let user_id = insert_user(&pool, company_id, "owner@acme.test").await.unwrap();
    let booking_id = insert_booking(&pool, company_id, user_id, 2).await.unwrap();

    insert_invoice(&pool, company_id, booking_id, "INV-0001").await.unwrap();
    let err = insert_invoice(&pool, company_id, booking_id, "INV-0002").await.unwrap_err();
    assert_eq!(sqlstate(&err).as_deref(), Some("23505"));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn deleting_company_cascades() {
    let pool = initialized_pool().await;
    let company_id = insert_company(&pool, "Acme").await;
    let other_id = insert_company(&pool, "Globex").await;
    let user_id = insert_user(&pool, company_id, "owner@acme.test").await.unwrap();
    insert_user(&pool, other_id, "owner@globex.test").await.unwrap();
    let booking_id = insert_booking(&pool, company_id, user_id, 1).await.unwrap();

    sqlx::query("INSERT INTO payments (company_id, booking_id, amount, payment_method) VALUES ($1, $2, 25.00, 'CARD')")
        .bind(company_id)
        .bind(booking_id)
        .execute(&pool)
        .await
        .unwrap();
    insert_invoice(&pool, company_id, booking_id, "INV-0001").await.unwrap();
    sqlx::query("INSERT INTO audit_logs (company_id, user_id, action, entity, entity_id, new_value) VALUES ($1, $2, 'CREATE', 'booking', $3, $4)")
        .bind(company_id)
        .bind(user_id)
        .bind(booking_id)
        .bind(serde_json::json!({ "status": "PENDING" }))
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("DELETE FROM companies WHERE id = $1")
        .bind(company_id)
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(count(&pool, "companies").await, 1);
    assert_eq!(count(&pool, "users").await, 1);
    for table in ["bookings", "payments", "invoices", "audit_logs"] {
        assert_eq!(count(&pool, table).await, 0, "{} should be empty", table);
    }
}
