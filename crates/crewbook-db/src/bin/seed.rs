//! # Seed Data Generator
//!
//! Populates a database with demo workers and two weeks of attendance, or
//! only brings its schema up to date.
//!
//! ## Usage
//! ```bash
//! # 12 workers (default) into ./crewbook_dev.db
//! cargo run -p crewbook-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p crewbook-db --bin seed -- --workers 30 --db ./data/crewbook.db
//!
//! # Apply pending migrations to an existing database and exit
//! cargo run -p crewbook-db --bin seed -- --migrate-only --db ./data/crewbook.db
//! ```

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use crewbook_core::{AttendanceRecord, AttendanceStatus, Worker};
use crewbook_db::migrations::migration_status;
use crewbook_db::{Database, DbConfig, NewAdmin};
use std::env;
use uuid::Uuid;

const FIRST_NAMES: &[&str] = &[
    "Youssef", "Karim", "Hassan", "Omar", "Rachid", "Said", "Mustapha", "Hamid", "Adil",
    "Bilal", "Nabil", "Khalid",
];

const LAST_NAMES: &[&str] = &[
    "El Amrani", "Benali", "Ouazzani", "Tazi", "Berrada", "Alaoui", "Fassi", "Idrissi",
];

/// (role, daily rate in cents)
const ROLES: &[(&str, i64)] = &[
    ("Mason", 25000),
    ("Electrician", 30000),
    ("Plumber", 28000),
    ("Painter", 22000),
    ("Labourer", 15000),
    ("Carpenter", 27000),
];

/// Weekdays of attendance generated per worker.
const ATTENDANCE_DAYS: i64 = 14;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 12;
    let mut db_path = String::from("./crewbook_dev.db");
    let mut migrate_only = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--workers" | "-w" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(12);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--migrate-only" | "-m" => migrate_only = true,
            "--help" | "-h" => {
                println!("Crewbook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -w, --workers <N>   Number of workers to generate (default: 12)");
                println!("  -d, --db <PATH>     Database file path (default: ./crewbook_dev.db)");
                println!("  -m, --migrate-only  Apply pending migrations and exit");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Crewbook Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let (total, applied) = migration_status(db.pool()).await?;
    println!("✓ Migrations applied ({applied}/{total})");

    if migrate_only {
        return Ok(());
    }

    let existing = db.workers().count_active().await?;
    if existing > 0 {
        println!("⚠ Database already has {} workers", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    if db.admins().count().await? == 0 {
        db.admins()
            .create(&NewAdmin {
                username: "admin",
                display_name: "Demo Admin",
                password: "changeme123",
                language: "en",
            })
            .await?;
        println!("✓ Created admin 'admin' (password: changeme123)");
    }

    let today = Utc::now().date_naive();
    let days = working_days_before(today, ATTENDANCE_DAYS);

    let mut marks = 0;
    for seed in 0..count {
        let worker = generate_worker(seed);
        db.workers().insert(&worker).await?;

        for (day_idx, day) in days.iter().enumerate() {
            let record = AttendanceRecord {
                id: Uuid::new_v4().to_string(),
                worker_id: worker.id.clone(),
                work_date: *day,
                status: status_for(seed, day_idx),
                recorded_by: None,
                note: None,
                created_at: Utc::now(),
            };
            db.attendance().record(&record).await?;
            marks += 1;
        }
    }

    println!("✓ Generated {} workers and {} attendance marks", count, marks);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn generate_worker(seed: usize) -> Worker {
    let now = Utc::now();
    let (role, rate) = ROLES[seed % ROLES.len()];

    Worker {
        id: Uuid::new_v4().to_string(),
        full_name: format!(
            "{} {}",
            FIRST_NAMES[seed % FIRST_NAMES.len()],
            LAST_NAMES[(seed * 7) % LAST_NAMES.len()]
        ),
        phone: Some(format!("+212 6{:02} {:06}", seed % 100, seed * 7919 % 1_000_000)),
        role: Some(role.to_string()),
        daily_rate_cents: rate,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Mostly present, with a deterministic sprinkle of half days and absences.
fn status_for(seed: usize, day_idx: usize) -> AttendanceStatus {
    match (seed * 31 + day_idx * 17) % 10 {
        0 => AttendanceStatus::Absent,
        1 | 2 => AttendanceStatus::HalfDay,
        _ => AttendanceStatus::Present,
    }
}

/// The `n` most recent Monday to Saturday dates before `today`.
fn working_days_before(today: NaiveDate, n: i64) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = today;
    while (days.len() as i64) < n {
        day -= Duration::days(1);
        if day.weekday() != Weekday::Sun {
            days.push(day);
        }
    }
    days.reverse();
    days
}
