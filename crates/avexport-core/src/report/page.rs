// File: crates/avexport-core/src/report/page.rs
// Summary: HTML page template; section bodies are pre-rendered DOM fragments.

use minijinja::{context, Environment};
use serde::Serialize;

use super::{ReportCategory, ReportDocument};
use crate::error::ExportResult;
use crate::format::NumberLocale;

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<style>
body { font-family: "Segoe UI", Arial, Helvetica, sans-serif; margin: 2em auto; max-width: 1280px; color: #222; }
h2 { border-bottom: 2px solid #4477aa; padding-bottom: .2em; }
article { margin-bottom: 1.5em; }
.entry { display: flex; gap: 1em; padding: .15em 0; }
.key { min-width: 16em; font-weight: 600; }
.stat { color: #777; }
table { border-collapse: collapse; }
td, th { border: 1px solid #ccc; padding: .2em .6em; text-align: left; }
figure { margin: 1em 0; }
img { max-width: 100%; height: auto; }
.note { color: #777; font-style: italic; }
</style>
</head>
<body>
<h1>{{ title }}</h1>
{% for category in categories %}
<section id="{{ category.id }}">
<h2>{{ category.title }}</h2>
{% for section in category.sections %}
<article>
<h3>{{ section.title }}</h3>
{{ section.body|safe }}
</article>
{% endfor %}
</section>
{% endfor %}
</body>
</html>
"#;

#[derive(Serialize)]
struct SectionView {
    title: String,
    body: String,
}

#[derive(Serialize)]
struct CategoryView {
    id: &'static str,
    title: &'static str,
    sections: Vec<SectionView>,
}

fn category_id(category: ReportCategory) -> &'static str {
    match category {
        ReportCategory::Summary => "summary",
        ReportCategory::Audio => "audio",
        ReportCategory::Video => "video",
        ReportCategory::Container => "container",
        ReportCategory::About => "about",
    }
}

pub fn render_html(doc: &ReportDocument, locale: NumberLocale) -> ExportResult<String> {
    let sections = doc.sections();
    let categories: Vec<CategoryView> = ReportCategory::ALL
        .into_iter()
        .map(|category| CategoryView {
            id: category_id(category),
            title: category.title(),
            sections: sections
                .iter()
                .filter(|s| s.category == category)
                .map(|s| SectionView { title: s.title.clone(), body: s.to_dom().to_html() })
                .collect(),
        })
        .filter(|c| !c.sections.is_empty())
        .collect();

    let lang = match locale {
        NumberLocale::English => "en",
        NumberLocale::French => "fr",
    };
    let mut env = Environment::new();
    env.add_template("report.html", PAGE)?;
    let page = env.get_template("report.html")?.render(context! {
        lang => lang,
        title => doc.title.clone(),
        categories => categories,
    })?;
    Ok(page)
}
