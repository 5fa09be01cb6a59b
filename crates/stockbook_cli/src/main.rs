//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `stockbook_core` wiring.
//! - Exercise one full open/create/read cycle against an in-memory state.

use stockbook_core::{App, ArticleForm};

fn main() {
    let log_dir = std::env::temp_dir().join("stockbook-logs");
    if let Some(dir) = log_dir.to_str() {
        // A broken log setup must not take the smoke probe down with it.
        if let Err(err) = stockbook_core::init_logging(stockbook_core::default_log_level(), dir) {
            eprintln!("stockbook logging disabled: {err}");
        }
    }

    println!("stockbook_core version={}", stockbook_core::core_version());

    let mut app = match App::open_in_memory() {
        Ok(app) => app,
        Err(err) => {
            eprintln!("failed to open in-memory state: {err}");
            std::process::exit(1);
        }
    };

    let form = ArticleForm {
        name: "Demo bolt".to_string(),
        quantity: Some(3),
        min_quantity: Some(3),
        ..ArticleForm::default()
    };
    if let Err(err) = app.create_article(&form) {
        eprintln!("demo article rejected: {err}");
        std::process::exit(1);
    }

    let summary = app.dashboard();
    println!(
        "inventory={} articles={} units={} low_stock={}",
        summary.inventory_name, summary.article_count, summary.total_units, summary.low_stock_count
    );
}
