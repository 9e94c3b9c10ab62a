//! Profile section bodies as styled terminal lines.
//!
//! Section bodies are short markdown fragments: paragraphs with bold labels,
//! bullet or numbered lists, quoted lines, now and then a two-column table.
//! Headings inside a body are shown as bold accent lines, tables are
//! flattened to `cell │ cell` rows, and raw HTML is kept as plain text.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::tui::theme;

const QUOTE_BAR: &str = "│ ";
const CELL_SEPARATOR: &str = " │ ";

/// Render a section body to owned lines for a `Paragraph`.
pub fn markdown_to_lines(md: &str) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut builder = LineBuilder::default();
    for event in Parser::new_ext(md, options) {
        builder.push(event);
    }
    builder.finish()
}

/// One open list; `next` is the number of the next ordered item.
struct ListState {
    next: Option<u64>,
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    modifiers: Vec<Style>,
    lists: Vec<ListState>,
    quote_depth: usize,
    cells_in_row: usize,
    in_code: bool,
}

impl LineBuilder {
    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(text) if self.in_code => {
                for line in text.lines() {
                    let style = Style::default().fg(theme::TEXT_MUTED).bg(theme::BG_CODE);
                    self.spans.push(Span::styled(line.to_string(), style));
                    self.break_line();
                }
            }
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                let style = self.style();
                self.spans.push(Span::styled(text.into_string(), style));
            }
            Event::Code(code) => {
                let style = self.style().bg(theme::BG_SURFACE);
                self.spans.push(Span::styled(code.into_string(), style));
            }
            Event::SoftBreak => self.spans.push(Span::raw(" ")),
            Event::HardBreak => self.break_line(),
            Event::Rule => {
                self.break_line();
                self.lines.push(Line::styled("─".repeat(32), Style::default().fg(theme::TEXT_DIM)));
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.break_line();
                let color = match level {
                    HeadingLevel::H1 | HeadingLevel::H2 => theme::ACCENT,
                    _ => theme::PRIMARY_LIGHT,
                };
                self.modifiers.push(Style::default().fg(color).add_modifier(Modifier::BOLD));
            }
            Tag::Strong => self.emphasize(Modifier::BOLD),
            Tag::Emphasis => self.emphasize(Modifier::ITALIC),
            Tag::Strikethrough => self.emphasize(Modifier::CROSSED_OUT),
            Tag::Link { .. } => {
                let style = self.style().fg(theme::INFO).add_modifier(Modifier::UNDERLINED);
                self.modifiers.push(style);
            }
            Tag::BlockQuote => {
                self.break_line();
                self.quote_depth += 1;
            }
            Tag::List(first) => {
                self.break_line();
                self.lists.push(ListState { next: first });
            }
            Tag::Item => {
                self.break_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut().and_then(|l| l.next.as_mut()) {
                    Some(n) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    None => format!("{indent}• "),
                };
                self.spans.push(Span::styled(marker, Style::default().fg(theme::PRIMARY_LIGHT)));
            }
            Tag::TableHead => {
                self.cells_in_row = 0;
                self.emphasize(Modifier::BOLD);
            }
            Tag::TableRow => self.cells_in_row = 0,
            Tag::TableCell => {
                if self.cells_in_row > 0 {
                    self.spans.push(Span::styled(CELL_SEPARATOR, Style::default().fg(theme::TEXT_DIM)));
                }
                self.cells_in_row += 1;
            }
            Tag::CodeBlock(_) => {
                self.break_line();
                self.in_code = true;
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) | TagEnd::TableHead => {
                self.modifiers.pop();
                self.break_line();
            }
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough | TagEnd::Link => {
                self.modifiers.pop();
            }
            TagEnd::Paragraph => {
                self.break_line();
                if self.lists.is_empty() {
                    self.gap();
                }
            }
            TagEnd::BlockQuote => {
                self.break_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.gap();
            }
            TagEnd::List(_) => {
                self.break_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.gap();
                }
            }
            TagEnd::Item | TagEnd::TableRow => self.break_line(),
            TagEnd::Table => self.gap(),
            TagEnd::CodeBlock => {
                self.in_code = false;
                self.gap();
            }
            _ => {}
        }
    }

    fn style(&self) -> Style {
        self.modifiers.last().copied().unwrap_or_default()
    }

    fn emphasize(&mut self, modifier: Modifier) {
        let style = self.style().add_modifier(modifier);
        self.modifiers.push(style);
    }

    /// End the current line, prefixing quote bars when inside a quote.
    fn break_line(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.spans.len() + 1);
        if self.quote_depth > 0 {
            spans.push(Span::styled(
                QUOTE_BAR.repeat(self.quote_depth),
                Style::default().fg(theme::TEXT_DIM),
            ));
            for span in self.spans.drain(..) {
                let style = span.style.add_modifier(Modifier::ITALIC);
                spans.push(Span::styled(span.content, style));
            }
        } else {
            spans.append(&mut self.spans);
        }
        self.lines.push(Line::from(spans));
    }

    /// A single blank separator line; never doubled, never leading.
    fn gap(&mut self) {
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.break_line();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}
