use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::info;

use log_anonymizer::anonymizer::{Anonymizer, HostnamePolicy};
use log_anonymizer::cli::Cli;
use log_anonymizer::utils::logger::init_logger;
use log_anonymizer::walker;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger()?;

    let config = cli.into_config();
    info!(
        "Run started at {} over {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        config.root.display()
    );

    let mut engine = Anonymizer::new(&config);
    let summary = walker::run(&mut engine, &config.root, &config.extensions)?;

    println!("\nProcessing complete!");
    println!("Files processed successfully: {}", summary.processed);
    println!("Files failed: {}", summary.failed);

    let store = engine.store();
    println!("Unique IPs anonymized: {}", store.distinct_ips());
    println!("Total IP replacements: {}", engine.ip_occurrences());
    println!("Unique hostnames anonymized: {}", store.distinct_hostnames());
    println!("Total hostname replacements: {}", engine.hostname_occurrences());

    if let HostnamePolicy::DomainScoped { .. } = config.policy {
        println!("Unique labels randomized: {}", store.distinct_labels());
        for (original, substitute) in store.sample_hostname_pairs(5) {
            println!("  {} -> {}", original, substitute);
        }
    }

    Ok(())
}
