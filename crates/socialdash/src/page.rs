//! The dashboard page: a tab bar over twelve sections, one chart each.

use chrono::{DateTime, Utc};
use socialdash_common::{escape_html, format_timestamp};
use socialdash_data::IntegratedDataset;
use socialdash_graphs::RenderedPanel;
use socialdash_i18n::{FluentValue, Messages};
use std::fmt::Write;

/// File name of the written page.
pub const INDEX_FILE: &str = "index.html";

/// Everything shown on the page.
#[derive(Debug)]
pub struct PageContent<'a> {
    /// Localized text.
    pub messages: Messages,
    /// Rendered panels in page order.
    pub panels: &'a [RenderedPanel],
    /// Number of users, posts and reactions in the integrated data.
    pub totals: (usize, usize, usize),
    /// When the page was generated.
    pub generated_at: DateTime<Utc>,
}

impl<'a> PageContent<'a> {
    /// Page content for the given dataset and panels.
    pub fn new(
        messages: Messages,
        dataset: &IntegratedDataset,
        panels: &'a [RenderedPanel],
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            messages,
            panels,
            totals: (
                dataset.user_count(),
                dataset.posts.len(),
                dataset.reactions.len(),
            ),
            generated_at,
        }
    }
}

/// Renders the complete HTML document.
pub fn render_page(content: &PageContent<'_>) -> String {
    let messages = &content.messages;
    let (users, posts, reactions) = content.totals;
    let generated = messages.get_with_args(
        "page-generated",
        &[
            ("timestamp", FluentValue::from(format_timestamp(content.generated_at))),
            ("users", FluentValue::from(users)),
            ("posts", FluentValue::from(posts)),
            ("reactions", FluentValue::from(reactions)),
        ],
    );

    PAGE_TEMPLATE
        .replace("__LANG__", messages.locale().code())
        .replace("__TITLE__", &escape_html(&messages.get("page-title")))
        .replace("__DESCRIPTION__", &inline_markup(&messages.get("page-description")))
        .replace("__GENERATED__", &escape_html(&generated))
        .replace("__TABS__", &tab_bar(content))
        .replace("__SECTIONS__", &sections(content))
}

fn section_id(panel: &RenderedPanel) -> String {
    format!("panel-{:02}", panel.id.number())
}

fn tab_bar(content: &PageContent<'_>) -> String {
    let mut html = String::new();
    for (index, panel) in content.panels.iter().enumerate() {
        let label = content
            .messages
            .get_with_args("page-tab", &[("number", FluentValue::from(panel.id.number()))]);
        let _ = writeln!(
            html,
            r#"      <button class="tab{}" data-target="{}">{}</button>"#,
            if index == 0 { " active" } else { "" },
            section_id(panel),
            escape_html(&label),
        );
    }
    html
}

fn sections(content: &PageContent<'_>) -> String {
    let mut html = String::new();
    for (index, panel) in content.panels.iter().enumerate() {
        let _ = writeln!(
            html,
            r#"    <section id="{}" class="panel"{}>
      <h2>{}</h2>
      <div class="chart">{}</div>
    </section>"#,
            section_id(panel),
            if index == 0 { "" } else { " hidden" },
            escape_html(&panel.title),
            panel.svg,
        );
    }
    html
}

/// Escapes `text` and turns `**bold**` spans into `<strong>`.
fn inline_markup(text: &str) -> String {
    let parts: Vec<&str> = text.split("**").collect();
    let mut html = String::new();
    for (index, part) in parts.iter().enumerate() {
        let escaped = escape_html(part);
        let opened = index % 2 == 1;
        if opened && index + 1 < parts.len() {
            let _ = write!(html, "<strong>{escaped}</strong>");
        } else if opened {
            // Unbalanced marker, keep it literally.
            let _ = write!(html, "**{escaped}");
        } else {
            html.push_str(&escaped);
        }
    }
    html
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="__LANG__">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>__TITLE__</title>
  <style>
    body { margin: 0; font-family: sans-serif; background: #fafafa; color: #222; }
    header { padding: 1.5rem 2rem 0.5rem; }
    header h1 { margin: 0 0 0.5rem; font-size: 1.8rem; }
    header p { margin: 0.25rem 0; }
    header .generated { color: #777; font-size: 0.85rem; }
    nav { display: flex; flex-wrap: wrap; gap: 0.25rem; padding: 0.5rem 2rem; border-bottom: 1px solid #ddd; }
    nav .tab { border: 1px solid #ccc; background: #fff; padding: 0.4rem 0.8rem; cursor: pointer; border-radius: 4px 4px 0 0; }
    nav .tab.active { background: #636efa; border-color: #636efa; color: #fff; }
    main { padding: 1rem 2rem 2rem; }
    .panel h2 { font-size: 1.2rem; }
    .chart svg { max-width: 100%; height: auto; }
  </style>
</head>
<body>
  <header>
    <h1>__TITLE__</h1>
    <p>__DESCRIPTION__</p>
    <p class="generated">__GENERATED__</p>
  </header>
  <nav>
__TABS__  </nav>
  <main>
__SECTIONS__  </main>
  <script>
    document.querySelectorAll("nav .tab").forEach(function (tab) {
      tab.addEventListener("click", function () {
        document.querySelectorAll("nav .tab").forEach(function (t) { t.classList.remove("active"); });
        document.querySelectorAll("main .panel").forEach(function (p) { p.hidden = p.id !== tab.dataset.target; });
        tab.classList.add("active");
      });
    });
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use socialdash_graphs::PanelId;
    use socialdash_i18n::Locale;

    fn panel(id: PanelId) -> RenderedPanel {
        RenderedPanel {
            id,
            title: format!("Heading <{}>", id.slug()),
            svg: format!(r#"<svg id="{}"></svg>"#, id.slug()),
            png_path: None,
        }
    }

    fn content(panels: &[RenderedPanel], locale: Locale) -> PageContent<'_> {
        PageContent {
            messages: Messages::new(locale),
            panels,
            totals: (5, 4, 5),
            generated_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            inline_markup("Charts for **Questions 1 - 12** of <data>"),
            "Charts for <strong>Questions 1 - 12</strong> of &lt;data&gt;"
        );
        assert_eq!(inline_markup("a ** b"), "a ** b");
        assert_eq!(inline_markup("plain"), "plain");
    }

    #[test]
    fn test_page_has_tab_and_section_per_panel() {
        let panels: Vec<RenderedPanel> = PanelId::ALL.into_iter().map(panel).collect();
        let html = render_page(&content(&panels, Locale::EnUs));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en-US">"#));
        assert_eq!(html.matches(r#"<button class="tab"#).count(), 12);
        assert_eq!(html.matches("<section ").count(), 12);
        assert_eq!(html.matches(" hidden>").count(), 11);
        assert!(html.contains(r#"<section id="panel-01" class="panel">"#));
        assert!(html.contains(r#"data-target="panel-12">Question 12</button>"#));
        assert!(html.contains(r#"<svg id="activity-heatmap"></svg>"#));
        assert!(html.contains("Heading &lt;correlation&gt;"));
        assert!(html.contains("<strong>Questions 1 - 12</strong>"));
        assert!(html.contains("2024-03-01 12:00:00 UTC"));
        assert!(!html.contains("__"));
    }

    #[test]
    fn test_page_is_localized() {
        let panels = vec![panel(PanelId::AgeGroups)];
        let html = render_page(&content(&panels, Locale::IdId));

        assert!(html.contains(r#"<html lang="id-ID">"#));
        assert!(html.contains(">Pertanyaan 1</button>"));
    }
}
