//! Database module: connection init and idempotent table creation.
//!
//! Table and column names are a fixed contract shared with the managed
//! Postgres instance. In production the schema already exists and every
//! statement below is a no-op; for local SQLite development and tests
//! this creates the full schema from scratch.

pub mod entities;

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

/// Initialize database connection and create tables.
pub async fn init_database(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    tracing::info!("Connecting to database");

    let db = Database::connect(db_url).await?;

    create_tables(&db).await?;

    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        sql.to_string(),
    ))
    .await?;
    Ok(())
}

/// Create all tables if they don't exist.
async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Farmers table. Email gets a plain index, not a unique constraint:
    // duplicate detection is a lookup in the registration path.
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS farmers (
            farmer_id TEXT PRIMARY KEY,
            full_name TEXT NOT NULL,
            sex TEXT,
            age INTEGER,
            contact_number TEXT,
            address TEXT,
            barangay TEXT,
            municipality TEXT,
            association_name TEXT,
            farm_location TEXT,
            farm_coordinates TEXT,
            farm_area_hectares REAL,
            years_in_farming INTEGER,
            type_of_abaca_planted TEXT,
            average_harvest_volume_kg REAL,
            harvest_frequency_weeks INTEGER,
            selling_price_range_min REAL,
            selling_price_range_max REAL,
            regular_buyer TEXT,
            income_per_cycle REAL,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            profile_photo TEXT,
            valid_id_photo TEXT,
            remarks TEXT,
            verification_status TEXT NOT NULL DEFAULT 'pending',
            verified_by TEXT,
            verified_at TEXT,
            rejection_reason TEXT,
            is_active BOOLEAN NOT NULL DEFAULT 1,
            is_verified BOOLEAN NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login TEXT
        )
        "#,
    )
    .await?;
    execute(
        db,
        r#"CREATE INDEX IF NOT EXISTS idx_farmers_email ON farmers(email)"#,
    )
    .await?;

    // Buyers table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS buyers (
            buyer_id TEXT PRIMARY KEY,
            business_name TEXT NOT NULL,
            owner_name TEXT NOT NULL,
            business_address TEXT,
            contact_number TEXT,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            license_or_accreditation TEXT,
            buying_schedule TEXT,
            buying_location TEXT,
            warehouse_address TEXT,
            accepted_quality_grades TEXT,
            price_range_min REAL,
            price_range_max REAL,
            payment_terms TEXT,
            partnered_associations TEXT,
            profile_photo TEXT,
            valid_id_photo TEXT,
            business_permit_photo TEXT,
            remarks TEXT,
            verification_status TEXT NOT NULL DEFAULT 'pending',
            verified_by TEXT,
            verified_at TEXT,
            rejection_reason TEXT,
            is_active BOOLEAN NOT NULL DEFAULT 1,
            is_verified BOOLEAN NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login TEXT
        )
        "#,
    )
    .await?;
    execute(
        db,
        r#"CREATE INDEX IF NOT EXISTS idx_buyers_email ON buyers(email)"#,
    )
    .await?;

    // Association officers table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS association_officers (
            officer_id TEXT PRIMARY KEY,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            position TEXT,
            association_name TEXT,
            contact_number TEXT,
            address TEXT,
            term_start_date TEXT,
            term_end_date TEXT,
            term_duration TEXT,
            farmers_under_supervision INTEGER,
            profile_picture TEXT,
            valid_id_photo TEXT,
            remarks TEXT,
            is_super_admin BOOLEAN NOT NULL DEFAULT 0,
            profile_completed BOOLEAN NOT NULL DEFAULT 0,
            verification_status TEXT NOT NULL DEFAULT 'pending',
            verified_by TEXT,
            verified_at TEXT,
            rejection_reason TEXT,
            is_active BOOLEAN NOT NULL DEFAULT 1,
            is_verified BOOLEAN NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login TEXT
        )
        "#,
    )
    .await?;
    execute(
        db,
        r#"CREATE INDEX IF NOT EXISTS idx_officers_email ON association_officers(email)"#,
    )
    .await?;

    // Refresh tokens table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS refresh_tokens (
            token_id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            user_type TEXT NOT NULL,
            token_hash TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            revoked BOOLEAN NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .await?;
    execute(
        db,
        r#"CREATE INDEX IF NOT EXISTS idx_refresh_tokens_user ON refresh_tokens(user_id, user_type)"#,
    )
    .await?;

    // Auth audit log (append-only)
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS auth_audit_log (
            log_id TEXT PRIMARY KEY,
            user_id TEXT,
            user_type TEXT,
            action TEXT NOT NULL,
            success BOOLEAN NOT NULL,
            ip_address TEXT,
            user_agent TEXT,
            error_message TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Harvests table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS harvests (
            harvest_id TEXT PRIMARY KEY,
            farmer_id TEXT NOT NULL,
            harvest_date TEXT NOT NULL,
            volume_kg REAL NOT NULL,
            quality_grade TEXT,
            notes TEXT,
            status TEXT NOT NULL DEFAULT 'Pending Verification',
            verified_by TEXT,
            verified_at TEXT,
            rejection_reason TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;
    execute(
        db,
        r#"CREATE INDEX IF NOT EXISTS idx_harvests_farmer ON harvests(farmer_id)"#,
    )
    .await?;

    // Inventory items table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS inventory_items (
            item_id TEXT PRIMARY KEY,
            harvest_id TEXT,
            quality_grade TEXT,
            volume_kg REAL NOT NULL,
            storage_location TEXT,
            status TEXT NOT NULL DEFAULT 'Stocked',
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Seedling distributions table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS seedling_distributions (
            distribution_id TEXT PRIMARY KEY,
            farmer_id TEXT NOT NULL,
            variety TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            distributed_by TEXT,
            distribution_date TEXT,
            status TEXT NOT NULL DEFAULT 'Requested',
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;
    execute(
        db,
        r#"CREATE INDEX IF NOT EXISTS idx_seedlings_farmer ON seedling_distributions(farmer_id)"#,
    )
    .await?;

    // Sales reports table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS sales_reports (
            report_id TEXT PRIMARY KEY,
            buyer_id TEXT,
            farmer_id TEXT,
            sale_date TEXT NOT NULL,
            volume_kg REAL NOT NULL,
            price_per_kg REAL NOT NULL,
            total_amount REAL NOT NULL,
            payment_terms TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;
    execute(
        db,
        r#"CREATE INDEX IF NOT EXISTS idx_sales_buyer ON sales_reports(buyer_id)"#,
    )
    .await?;

    // Articles table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            article_id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            cover_photo TEXT,
            author_id TEXT NOT NULL,
            published BOOLEAN NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Team members table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS team_members (
            member_id TEXT PRIMARY KEY,
            full_name TEXT NOT NULL,
            role TEXT NOT NULL,
            photo TEXT,
            display_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // System settings (maintenance flag)
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS system_settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    tracing::info!("Database tables initialized");
    Ok(())
}
