//! Vertical card display for a classified listing, and table printing.
//!
//! The card renders a single-row listing RecordBatch grouped into sections,
//! using Arrow's display formatting for every column type.

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use arrow::util::pretty::pretty_format_batches;
use pricewatch_rules::RuleTrace;

// ── Card section groupings ──

const DEVICE: &[&str] = &["model", "processor", "screen_size"];
const CONFIGURATION: &[&str] = &["storage", "ram", "warranty"];
const PRICE: &[&str] = &["price_text", "price"];
const SOURCE: &[&str] = &["link", "link_key", "capture_date"];

// ── Public API ──

/// Print one listing as a vertical card followed by the rules that fired.
pub fn print_listing_card(batch: &RecordBatch, trace: &RuleTrace) -> anyhow::Result<()> {
    let title = value_at(batch, "title")?.unwrap_or_default();
    println!("=== {title} ===");
    println!();

    print_section(batch, "Device", DEVICE)?;
    print_section(batch, "Configuration", CONFIGURATION)?;
    print_section(batch, "Price", PRICE)?;
    print_section(batch, "Source", SOURCE)?;

    println!("Rules");
    print_rule("family", Some(trace.family));
    print_rule("line", trace.line);
    print_rule("storage", trace.storage);
    print_rule("ram", trace.ram);
    print_rule("warranty", trace.warranty);
    println!();
    Ok(())
}

/// Print a heading and the batches as an ASCII table.
pub fn print_table(heading: &str, batches: &[RecordBatch]) -> anyhow::Result<()> {
    println!("{heading}");
    println!("{}", pretty_format_batches(batches)?);
    println!();
    Ok(())
}

// ── Section rendering ──

fn print_section(batch: &RecordBatch, header: &str, cols: &[&str]) -> anyhow::Result<()> {
    let mut rows = Vec::with_capacity(cols.len());
    for &col_name in cols {
        if let Some(value) = value_at(batch, col_name)? {
            rows.push((col_name, value));
        }
    }
    // Accessories have no device attributes; skip empty sections.
    if rows.is_empty() {
        return Ok(());
    }

    println!("{header}");
    for (col_name, value) in rows {
        println!("  {col_name:<14} {value}");
    }
    println!();
    Ok(())
}

fn print_rule(chain: &str, rule: Option<&str>) {
    println!("  {:<14} {}", chain, rule.unwrap_or("-"));
}

// ── Helpers ──

/// Formatted value of the first row of `col_name`, or `None` when absent or null.
fn value_at(batch: &RecordBatch, col_name: &str) -> anyhow::Result<Option<String>> {
    let Some(col) = batch.column_by_name(col_name) else {
        return Ok(None);
    };
    if batch.num_rows() == 0 || col.is_null(0) {
        return Ok(None);
    }
    let formatter = ArrayFormatter::try_new(col.as_ref(), &FormatOptions::default())?;
    Ok(Some(formatter.value(0).to_string()))
}
