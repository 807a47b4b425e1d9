use minijinja::{
    context, escape_formatter, AutoEscape, Environment, Error, Output, State, Value,
};
use serde::Serialize;

use crate::error::RenderError;
use crate::task::TaskItem;

const RESULTS_TEMPLATE: &str = include_str!("templates/results.html");
const MISSING_KEY_TEMPLATE: &str = include_str!("templates/missing_key.html");

pub const DEFAULT_PRIORITY_CLASS: &str = "bg-gray-500";

/// Badge class for a priority score. Anything outside 1..=5 gets the default.
pub fn priority_class(priority: i64) -> &'static str {
    match priority {
        5 => "priority-5",
        4 => "priority-4",
        3 => "priority-3",
        2 => "priority-2",
        1 => "priority-1",
        _ => DEFAULT_PRIORITY_CLASS,
    }
}

#[derive(Debug, Serialize)]
struct TaskCard<'a> {
    original_task: &'a str,
    summary: &'a str,
    tags: &'a [String],
    priority: String,
    priority_class: &'static str,
}

impl<'a> From<&'a TaskItem> for TaskCard<'a> {
    fn from(item: &'a TaskItem) -> Self {
        Self {
            original_task: item.original_task(),
            summary: item.summary(),
            tags: item.tags(),
            priority: item.priority_label(),
            priority_class: item
                .priority_score()
                .map_or(DEFAULT_PRIORITY_CLASS, priority_class),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// HTML auto-escape without touching `/`, so "CI/CD" and "N/A" reach the page as typed.
fn html_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), Error> {
    match (state.auto_escape(), value.as_str()) {
        (AutoEscape::Html, Some(text)) if !value.is_safe() => {
            out.write_str(&escape_html(text)).map_err(Error::from)
        }
        _ => escape_formatter(out, state, value),
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_formatter(html_formatter);
    env
}

/// Renders result fragments and fills the base page's results slot.
///
/// The fragment templates are compiled once; the base page is re-read by the
/// caller on every request, so it is compiled per call.
pub struct HtmlRenderer {
    env: Environment<'static>,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = environment();
        env.add_template("results.html", RESULTS_TEMPLATE)?;
        env.add_template("missing_key.html", MISSING_KEY_TEMPLATE)?;
        Ok(Self { env })
    }

    /// One card per item under a "Processed Tasks" heading, or a placeholder
    /// paragraph when there is nothing to show.
    pub fn render_results(&self, items: &[TaskItem]) -> Result<String, RenderError> {
        let tasks: Vec<TaskCard<'_>> = items.iter().map(TaskCard::from).collect();
        let tmpl = self.env.get_template("results.html")?;
        Ok(tmpl.render(context! { tasks => tasks })?)
    }

    /// Inline error shown when no API credential is configured.
    pub fn render_missing_key(&self, env_name: &str) -> Result<String, RenderError> {
        let tmpl = self.env.get_template("missing_key.html")?;
        Ok(tmpl.render(context! { env_name => env_name })?)
    }

    /// Substitutes an already-rendered fragment into the page's results slot.
    pub fn render_page(&self, page_source: &str, fragment: &str) -> Result<String, RenderError> {
        render_page(page_source, fragment)
    }
}

/// The page is compiled as a template, so any other `{{` or `{%` in it
/// (inline scripts included) must be valid template syntax.
pub fn render_page(page_source: &str, fragment: &str) -> Result<String, RenderError> {
    let mut env = environment();
    env.add_template("index.html", page_source)?;
    let tmpl = env.get_template("index.html")?;
    let slot = Value::from_safe_string(fragment.to_string());
    Ok(tmpl.render(context! { results => slot })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use pretty_assertions::assert_eq;

    const PAGE: &str =
        "<html><body><div id=\"processed-results\">{{ results }}</div></body></html>";

    fn item(task: &str, summary: &str, tags: &[&str], priority: i64) -> TaskItem {
        TaskItem {
            original_task: Some(task.to_string()),
            summary: Some(summary.to_string()),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            priority: Some(Priority::Score(priority)),
        }
    }

    #[test]
    fn test_priority_class_table() {
        assert_eq!(priority_class(1), "priority-1");
        assert_eq!(priority_class(3), "priority-3");
        assert_eq!(priority_class(5), "priority-5");
        assert_eq!(priority_class(0), DEFAULT_PRIORITY_CLASS);
        assert_eq!(priority_class(6), DEFAULT_PRIORITY_CLASS);
        assert_eq!(priority_class(-3), DEFAULT_PRIORITY_CLASS);
    }

    #[test]
    fn test_render_cards() {
        let renderer = HtmlRenderer::new().unwrap();
        let html = renderer
            .render_results(&[
                item("fix login asap", "Fix login bug", &["#bug", "#urgent"], 5),
                item("q3 report", "Write Q3 report", &["#documentation"], 3),
            ])
            .unwrap();

        assert!(html.contains("<h2>Processed Tasks</h2>"));
        assert_eq!(html.matches("class=\"task-card\"").count(), 2);
        assert_eq!(html.matches("class=\"tag\"").count(), 3);
        assert!(html.contains("Original: fix login asap"));
        assert!(html.contains("Summary: Write Q3 report"));
        assert!(html.contains("priority-badge priority-5\">5/5"));
        assert!(html.contains("priority-badge priority-3\">3/5"));
    }

    #[test]
    fn test_out_of_range_priority_uses_default_class() {
        let renderer = HtmlRenderer::new().unwrap();
        let html = renderer
            .render_results(&[item("x", "X", &["#qa"], 9)])
            .unwrap();
        assert!(html.contains("priority-badge bg-gray-500\">9/5"));
    }

    #[test]
    fn test_missing_fields_render_defaults_without_chips() {
        let renderer = HtmlRenderer::new().unwrap();
        let html = renderer.render_results(&[TaskItem::default()]).unwrap();
        assert!(html.contains("<p>Original: N/A</p>"));
        assert!(html.contains("<h3>Summary: N/A</h3>"));
        assert_eq!(html.matches("class=\"tag\"").count(), 0);
        assert!(html.contains("priority-badge bg-gray-500\">0/5"));
    }

    #[test]
    fn test_raw_priority_is_shown_with_default_class() {
        let renderer = HtmlRenderer::new().unwrap();
        let mut quoted = item("x", "X", &[], 0);
        quoted.priority = Some(Priority::Raw("5".to_string()));
        let mut worded = item("y", "Y", &[], 0);
        worded.priority = Some(Priority::Raw("high".to_string()));

        let html = renderer.render_results(&[quoted, worded]).unwrap();
        assert!(html.contains("priority-badge bg-gray-500\">5/5"));
        assert!(html.contains("priority-badge bg-gray-500\">high/5"));
        assert!(!html.contains("priority-5"));
    }

    #[test]
    fn test_slashes_are_not_escaped() {
        let renderer = HtmlRenderer::new().unwrap();
        let html = renderer
            .render_results(&[item("set up CI/CD", "Deploy CI/CD pipeline", &["#devops"], 4)])
            .unwrap();
        assert!(html.contains("<p>Original: set up CI/CD</p>"));
        assert!(html.contains("<h3>Summary: Deploy CI/CD pipeline</h3>"));
        assert!(!html.contains("&#x2f;"));
    }

    #[test]
    fn test_quotes_and_ampersands_are_escaped() {
        let renderer = HtmlRenderer::new().unwrap();
        let html = renderer
            .render_results(&[item("R&D \"spike\" isn't done", "S", &["<b>"], 2)])
            .unwrap();
        assert!(html.contains("Original: R&amp;D &quot;spike&quot; isn&#x27;t done"));
        assert!(html.contains("<span class=\"tag\">&lt;b&gt;</span>"));
    }

    #[test]
    fn test_empty_renders_placeholder() {
        let renderer = HtmlRenderer::new().unwrap();
        let html = renderer.render_results(&[]).unwrap();
        assert!(html.contains("No tasks processed or an error occurred"));
        assert!(!html.contains("Processed Tasks"));
        assert!(!html.contains("task-card"));
    }

    #[test]
    fn test_task_text_is_escaped() {
        let renderer = HtmlRenderer::new().unwrap();
        let html = renderer
            .render_results(&[item("<script>alert(1)<script>", "S", &[], 2)])
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_missing_key_fragment() {
        let renderer = HtmlRenderer::new().unwrap();
        let html = renderer.render_missing_key("GROQ_API_KEY").unwrap();
        assert!(html.contains("color: red"));
        assert!(html.contains("ERROR: GROQ_API_KEY environment variable not set."));
    }

    #[test]
    fn test_render_page_fills_slot_unescaped() {
        let page = render_page(PAGE, "<p>done</p>").unwrap();
        assert_eq!(
            page,
            "<html><body><div id=\"processed-results\"><p>done</p></div></body></html>"
        );
    }

    #[test]
    fn test_render_page_empty_slot() {
        let page = render_page(PAGE, "").unwrap();
        assert!(page.contains("<div id=\"processed-results\"></div>"));
    }

    #[test]
    fn test_render_page_rejects_broken_template() {
        assert!(render_page("{% if %}", "").is_err());
    }
}
