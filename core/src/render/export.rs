use crate::error::ExportError;
use crate::task::TaskItem;

pub const CSV_HEADER: [&str; 4] = ["Original Task", "Summary", "Tags", "Priority"];
pub const CSV_FILENAME: &str = "processed_tasks.csv";

/// Writes the items as CSV: a header row, then one CRLF-terminated row per
/// item with tags joined by `", "`. An empty set is refused.
pub fn render_csv(items: &[TaskItem]) -> Result<String, ExportError> {
    if items.is_empty() {
        return Err(ExportError::NoTasks);
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for item in items {
        let priority = item.priority_label();
        let tags = item.joined_tags();
        writer.write_record([
            item.original_task(),
            item.summary(),
            tags.as_str(),
            priority.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
