use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use ledgerbook::initialize_db;

/// A utility for creating a test database for the REST API server of ledgerbook.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const CUSTOMERS: [(&str, &str, &str, Option<&str>); 4] = [
    ("Acme General Store", "Market Road", "9876543210", Some("29ABCDE1234F1Z5")),
    ("Bharat Traders", "Station Road", "9123456780", None),
    ("City Mart", "MG Road", "9988776655", Some("27FGHIJ5678K1Z2")),
    ("Anand Stores", "Temple Street", "9012345678", None),
];

const SUPPLIERS: [(&str, &str, &str, Option<&str>); 2] = [
    ("Wholesale Co", "Industrial Area", "8012345678", Some("33KLMNO9012P1Z8")),
    ("Sunrise Distributors", "Ring Road", "8098765432", None),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let now = OffsetDateTime::now_utc();

    println!("Creating customers and suppliers...");
    for (table, parties) in [("customer", &CUSTOMERS[..]), ("supplier", &SUPPLIERS[..])] {
        for (shop_name, area, contact_number, gst_number) in parties {
            conn.execute(
                &format!(
                    "INSERT INTO {table} (shop_name, area, contact_number, gst_number, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)"
                ),
                (shop_name, area, contact_number, gst_number, now),
            )?;
        }
    }

    println!("Creating bills and purchases...");
    let today = now.date();
    // Spread entries over the last six months so every dashboard chart has data.
    for days_ago in (0..180).step_by(9) {
        let date = today - Duration::days(days_ago);
        let created_at = now - Duration::days(days_ago);
        let customer_id = days_ago % CUSTOMERS.len() as i64 + 1;
        let amount = 500.0 + (days_ago * 37 % 1000) as f64;

        conn.execute(
            "INSERT INTO bill (customer_id, amount_purchased, amount_given, date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)",
            (customer_id, amount, (amount * 0.6).round(), date, created_at),
        )?;

        if days_ago % 2 == 0 {
            let supplier_id = days_ago % SUPPLIERS.len() as i64 + 1;

            conn.execute(
                "INSERT INTO purchase (supplier_id, amount_purchased, amount_paid, date, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)",
                (supplier_id, amount * 2.0, amount, date, created_at),
            )?;
        }
    }

    println!("Success!");

    Ok(())
}
