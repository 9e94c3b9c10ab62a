//! Self-contained HTML export.
//!
//! One file, no external assets: styles and a few lines of script inline,
//! the portrait embedded as a data URI. Section bodies are rendered from
//! markdown; raw HTML in the AI text is escaped, not passed through.

use std::collections::HashSet;

use pulldown_cmark::{html, Event, Options, Parser};

use crate::core::character_gen::StatBlock;
use crate::core::forge::{ForgeOutcome, PortraitState};
use crate::core::profile::{ParsedProfile, ProfileParse};

const STYLE: &str = r#"
body { font-family: Georgia, 'Times New Roman', serif; background: #1b1a1f; color: #e8e2d4; margin: 0; }
main { max-width: 960px; margin: 0 auto; padding: 2rem; }
header { display: flex; gap: 2rem; align-items: flex-start; }
.portrait { width: 256px; height: 256px; object-fit: cover; border-radius: 8px; border: 2px solid #8b6f3e; }
.portrait.placeholder { display: flex; align-items: center; justify-content: center; background: #2a2830; color: #8a8496; font-style: italic; }
h1 { margin: 0 0 .25rem 0; color: #d4a849; }
.meta { color: #b7b0a0; }
.dna { font-family: monospace; font-size: .8rem; color: #8a8496; word-break: break-all; }
table.summary td { padding: .15rem .75rem .15rem 0; }
nav.tabs { display: flex; flex-wrap: wrap; gap: .25rem; margin-top: 2rem; border-bottom: 1px solid #8b6f3e; }
nav.tabs button { background: #2a2830; color: #e8e2d4; border: none; padding: .5rem 1rem; cursor: pointer; font: inherit; }
nav.tabs button.active { background: #8b6f3e; color: #1b1a1f; }
section.tab { display: none; padding: 1rem 0; line-height: 1.5; }
section.tab.active { display: block; }
pre.statblock { background: #2a2830; padding: 1rem; white-space: pre-wrap; }
pre.raw { background: #3a1f1f; border-left: 4px solid #c0392b; padding: 1rem; white-space: pre-wrap; }
.warning { color: #e67e22; }
"#;

const SCRIPT: &str = r#"
document.querySelectorAll('nav.tabs button').forEach(function (btn) {
  btn.addEventListener('click', function () {
    document.querySelectorAll('nav.tabs button').forEach(function (b) { b.classList.remove('active'); });
    document.querySelectorAll('section.tab').forEach(function (s) { s.classList.remove('active'); });
    btn.classList.add('active');
    document.getElementById(btn.dataset.tab).classList.add('active');
  });
});
"#;

/// Escape text for element bodies and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String never fails.
    let _ = pulldown_cmark_escape::escape_html(&mut out, text);
    out
}

/// Markdown to HTML with embedded HTML demoted to text.
pub fn markdown_to_html(md: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(md, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

struct Tab {
    id: String,
    title: String,
    body: String,
}

fn portrait_html(state: &PortraitState, name: &str) -> String {
    match state {
        PortraitState::Ready(p) => format!(
            r#"<img class="portrait" src="{}" alt="Portrait of {}">"#,
            p.data_uri(),
            escape_html(name)
        ),
        PortraitState::Failed { reason } => format!(
            r#"<div class="portrait placeholder" title="{}">Portrait unavailable</div>"#,
            escape_html(reason)
        ),
        PortraitState::Skipped => {
            r#"<div class="portrait placeholder">No portrait</div>"#.to_string()
        }
    }
}

fn stat_block_html(block: &StatBlock) -> String {
    format!(
        "<h3>Stat Block</h3>\n<pre class=\"statblock\">{}</pre>\n",
        escape_html(&block.to_string())
    )
}

fn overview_tab(outcome: &ForgeOutcome) -> Tab {
    let c = &outcome.character;
    let mut body = String::new();
    body.push_str(&format!("<p>{}</p>\n", escape_html(&c.description)));
    body.push_str("<h3>Personality</h3>\n<ul>\n");
    for pair in outcome.decoded.dominant_traits(5) {
        body.push_str(&format!(
            "<li><strong>{}</strong> over {} (score {}, intensity {}/5)</li>\n",
            pair.name, pair.opposite, pair.score, pair.intensity
        ));
    }
    body.push_str("</ul>\n<h3>Virtues</h3>\n<ul>\n");
    for virtue in outcome.decoded.virtues.iter().filter(|v| v.score >= 7) {
        body.push_str(&format!(
            "<li>{}: {}</li>\n",
            virtue.name, virtue.strength
        ));
    }
    body.push_str("</ul>\n");
    body.push_str(&stat_block_html(&outcome.stat_block));
    Tab {
        id: "tab-overview".to_string(),
        title: "Overview".to_string(),
        body,
    }
}

/// Element id for a section tab. Section ids live under `sec-` so they never
/// meet the fixed `tab-` ids; keys that slug to the same stem get a suffix.
fn section_id(key: &str, taken: &mut HashSet<String>) -> String {
    let base = format!("sec-{}", super::file_stem(key));
    let mut id = base.clone();
    let mut n = 2;
    while !taken.insert(id.clone()) {
        id = format!("{base}-{n}");
        n += 1;
    }
    id
}

fn section_tabs(profile: &ParsedProfile, outcome: &ForgeOutcome) -> Vec<Tab> {
    let mut taken = HashSet::new();
    let tabs: Vec<Tab> = profile
        .filled_sections()
        .map(|(key, body)| Tab {
            id: section_id(key, &mut taken),
            title: profile.title(key).to_string(),
            body: markdown_to_html(body),
        })
        .collect();
    if !tabs.is_empty() {
        return tabs;
    }
    // Nothing recognised: show the whole text rendered as one tab.
    vec![Tab {
        id: "tab-profile".to_string(),
        title: "Profile".to_string(),
        body: markdown_to_html(&outcome.profile_text),
    }]
}

fn header_html(outcome: &ForgeOutcome) -> String {
    let c = &outcome.character;
    let name = outcome.display_name();
    let parsed = outcome.profile.parsed();

    let role = parsed
        .and_then(|p| p.role.clone())
        .unwrap_or_else(|| c.profession.clone());
    let alignment = parsed
        .and_then(|p| p.alignment.clone())
        .unwrap_or_else(|| outcome.decoded.alignment.to_string());

    let mut out = String::new();
    out.push_str("<header>\n");
    out.push_str(&portrait_html(&outcome.portrait, name));
    out.push_str("\n<div>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(name)));
    out.push_str(&format!(
        "<p class=\"meta\">{} {} · {} · {}</p>\n",
        escape_html(&c.gender.to_string()),
        escape_html(&c.race),
        escape_html(&role),
        escape_html(&alignment)
    ));
    if let Some(p) = parsed.filter(|p| !p.summary.is_empty()) {
        out.push_str("<table class=\"summary\">\n");
        for row in &p.summary {
            out.push_str(&format!(
                "<tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
                escape_html(&row.label),
                escape_html(&row.value)
            ));
        }
        out.push_str("</table>\n");
    }
    out.push_str(&format!(
        "<p class=\"dna\">DNA {}</p>\n",
        escape_html(&outcome.dna.to_string())
    ));
    if parsed.is_some_and(|p| p.degraded) {
        out.push_str("<p class=\"warning\">The profile text was only partly recognised.</p>\n");
    }
    out.push_str("</div>\n</header>\n");
    out
}

/// Render a complete standalone document.
pub fn render_html(outcome: &ForgeOutcome) -> String {
    let mut tabs = vec![overview_tab(outcome)];
    match &outcome.profile {
        ProfileParse::Parsed(profile) => tabs.extend(section_tabs(profile, outcome)),
        ProfileParse::Raw { text, reason } => tabs.push(Tab {
            id: "tab-raw".to_string(),
            title: "Profile (raw)".to_string(),
            body: format!(
                "<p class=\"warning\">Could not split the profile into sections: {}</p>\n<pre class=\"raw\">{}</pre>\n",
                escape_html(reason),
                escape_html(text)
            ),
        }),
    }

    let mut doc = String::new();
    doc.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    doc.push_str(&format!(
        "<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<main>\n",
        escape_html(outcome.display_name()),
        STYLE
    ));
    doc.push_str(&header_html(outcome));

    doc.push_str("<nav class=\"tabs\">\n");
    for (i, tab) in tabs.iter().enumerate() {
        doc.push_str(&format!(
            "<button data-tab=\"{}\"{}>{}</button>\n",
            tab.id,
            if i == 0 { " class=\"active\"" } else { "" },
            escape_html(&tab.title)
        ));
    }
    doc.push_str("</nav>\n");

    for (i, tab) in tabs.iter().enumerate() {
        doc.push_str(&format!(
            "<section class=\"tab{}\" id=\"{}\">\n{}</section>\n",
            if i == 0 { " active" } else { "" },
            tab.id,
            tab.body
        ));
    }

    doc.push_str(&format!("</main>\n<script>{}</script>\n</body>\n</html>\n", SCRIPT));
    doc
}
