/// Splits a free-text block into trimmed, non-empty task lines.
///
/// Order is preserved and duplicates are kept. `\n`, `\r\n` and lone `\r`
/// all count as line breaks.
pub fn normalize_tasks(raw: &str) -> Vec<String> {
    raw.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
