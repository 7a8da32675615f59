//! pubprofiler - analyze a campus' publishing output by publisher.
//!
//! Reads `WoS_2020_tabdelimited_full_record_1000records.txt` and
//! `Publisher_list_converter.csv` from the working directory, writes
//! `PU_cleaned_windowin.csv`, and prints the count tables.
//!
//! ```bash
//! RUST_LOG=debug pubprofiler
//! ```

use anyhow::{Context, Result};
use pubprofiler::aggregate::Report;
use pubprofiler::{CaFilter, Profiler, ProfilerConfig};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let config = ProfilerConfig::default();
    let input = config.input_path.clone();
    let run = Profiler::new(config)
        .run()
        .with_context(|| format!("failed to profile {}", input.display()))?;

    println!("Raw data loaded, Web of Science {} records", run.loaded);
    println!(
        "Removed editorials, corrections, book reviews etc: {} records ({} book reviews, {} repeated titles)",
        run.loaded - run.kept().len(),
        run.book_reviews,
        run.duplicate_count()
    );
    println!("Kept article and review types: {} records", run.kept().len());
    println!(
        "{} rows out of {} have a local corresponding author",
        run.corresponding_count(),
        run.kept().len()
    );
    if !run.unmapped_codes().is_empty() {
        println!(
            "{} publishers have no entry in the lookup table",
            run.unmapped_codes().len()
        );
    }

    print_report("Corresponding authors only", &run.report(CaFilter::CorrespondingOnly));
    print_report("All records", &run.report(CaFilter::All));
    Ok(())
}

fn print_report(heading: &str, report: &Report) {
    println!();
    println!("== {heading} ({} records) ==", report.records);

    println!("Article count by publisher:");
    for row in &report.publishers.rows {
        println!("  {:>6}  {}", row.count, row.publisher);
    }
    if report.publishers.unlabeled > 0 {
        println!("  {:>6}  (no canonical publisher)", report.publishers.unlabeled);
    }

    println!("Top publishers:");
    for row in &report.top_publishers {
        println!("  {:>6}  {}", row.count, row.publisher);
    }

    println!("Article count by publisher and document type:");
    for row in &report.publisher_document_types {
        println!("  {:>6}  {} / {}", row.count, row.publisher, row.document_type);
    }
}
