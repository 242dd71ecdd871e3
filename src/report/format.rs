//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the table/driver code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::batch::BatchOutput;
use crate::data::EulerPoleTable;
use crate::domain::BatchOptions;

/// Format the full run summary (table stats + record outcomes).
pub fn format_run_summary(
    table: &EulerPoleTable,
    output: &BatchOutput,
    options: &BatchOptions,
) -> String {
    let mut out = String::new();

    out.push_str("=== paleolat - batch paleolatitude reconstruction ===\n");
    match table.stats() {
        Some(stats) => out.push_str(&format!(
            "Table: {} entries | {} plates | age=[{}, {}] Myr\n",
            stats.n_entries, stats.n_plates, stats.age_min, stats.age_max
        )),
        None => out.push_str("Table: empty\n"),
    }
    out.push_str(&format!(
        "Mode: {}\n",
        if options.parallel { "parallel" } else { "sequential" }
    ));
    out.push_str(&format!(
        "Records: {} ok | {} failed\n",
        output.n_ok(),
        output.n_failed()
    ));

    if !output.record_errors.is_empty() {
        out.push_str("\nFailed records (sentinel rows in the output):\n");
        for error in &output.record_errors {
            out.push_str(&format!(
                "  row {:>4} {:<16} {}\n",
                error.index + 1,
                error.sample_id,
                error.message
            ));
        }
    }

    out
}

/// Format a relevant-age query result.
pub fn format_relevant_ages(plate_id: u32, min_age: u32, max_age: u32, ages: &[u32]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Relevant ages for plate {plate_id}, window [{min_age}, {max_age}] Myr:\n"
    ));
    if ages.is_empty() {
        out.push_str("  (none - no entries for this plate)\n");
        return out;
    }

    let rendered: Vec<String> = ages.iter().map(u32::to_string).collect();
    out.push_str(&format!("  {}\n", rendered.join(", ")));

    if let Some(first) = ages.first() {
        if *first < min_age {
            out.push_str(&format!("  left bracket : {first}\n"));
        }
    }
    if let Some(last) = ages.last() {
        if *last > max_age {
            out.push_str(&format!("  right bracket: {last}\n"));
        }
    }

    out
}

/// Format the plate listing (one line per plate with its entry count).
pub fn format_plate_listing(table: &EulerPoleTable) -> String {
    let mut out = String::new();

    let plate_ids = table.plate_ids();
    out.push_str(&format!("{} plates:\n", plate_ids.len()));
    for plate_id in plate_ids {
        let n = table.entries_for_plate(plate_id).len();
        out.push_str(&format!("  {plate_id:>6}  {n:>4} entries\n"));
    }

    out
}
