use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Notification, NotificationLevel, Tab};
use super::services::Services;
use super::theme;
use super::widgets::markdown::markdown_to_lines;
use crate::core::dna::{LawAxis, Strength};
use crate::core::export::export_to_dir;
use crate::core::forge::{ForgeOutcome, PortraitState};
use crate::core::profile::ProfileParse;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Background work in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Busy {
    Forging,
    Portrait,
}

impl Busy {
    fn label(self) -> &'static str {
        match self {
            Busy::Forging => "forging character",
            Busy::Portrait => "painting portrait",
        }
    }
}

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// The last successful generation, if any.
    pub outcome: Option<ForgeOutcome>,
    /// Tabs derived from `outcome`.
    pub tabs: Vec<Tab>,
    pub selected_tab: usize,
    pub scroll: u16,
    pub busy: Option<Busy>,
    /// Consolidated message of the last failed generation.
    pub last_error: Option<String>,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    tick_count: u64,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender handed to spawned tasks.
    event_tx: mpsc::UnboundedSender<AppEvent>,
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        services: Services,
    ) -> Self {
        Self {
            running: true,
            outcome: None,
            tabs: vec![Tab::Overview],
            selected_tab: 0,
            scroll: 0,
            busy: None,
            last_error: None,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            tick_count: 0,
            event_rx,
            event_tx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        if let Err(reason) = &self.services.forge {
            let reason = reason.clone();
            self.push_notification(reason, NotificationLevel::Warning);
        }

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                if self.show_help {
                    if let Some(action) = map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }
                if let Some(action) = map_input_to_action(&crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Tick => self.on_tick(),
            AppEvent::Forged(result) => self.on_forged(*result),
            AppEvent::PortraitReady {
                character_id,
                state,
            } => self.on_portrait(character_id, state),
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => self.running = false,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::TabNext => {
                self.selected_tab = (self.selected_tab + 1) % self.tabs.len();
                self.scroll = 0;
            }
            Action::TabPrev => {
                self.selected_tab = (self.selected_tab + self.tabs.len() - 1) % self.tabs.len();
                self.scroll = 0;
            }
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollTop => self.scroll = 0,
            Action::Generate => self.start_generation(),
            Action::RegeneratePortrait => self.start_portrait(),
            Action::Export => self.export(),
        }
    }

    fn start_generation(&mut self) {
        if self.busy.is_some() {
            self.push_notification("Already working…".to_string(), NotificationLevel::Info);
            return;
        }
        let forge = match &self.services.forge {
            Ok(forge) => Arc::clone(forge),
            Err(reason) => {
                let reason = reason.clone();
                self.push_notification(reason, NotificationLevel::Error);
                return;
            }
        };

        // Roll before spawning; the RNG stays on this task.
        let seed = forge.roll(&self.services.generator, &mut self.services.rng);
        log::info!("Rolled {} ({})", seed.character.name, seed.dna);

        self.busy = Some(Busy::Forging);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = forge.generate(seed).await;
            let _ = tx.send(AppEvent::Forged(Box::new(result)));
        });
    }

    fn start_portrait(&mut self) {
        if self.busy.is_some() {
            return;
        }
        let Some(character) = self.outcome.as_ref().map(|o| o.character.clone()) else {
            self.push_notification(
                "Generate a character first (g)".to_string(),
                NotificationLevel::Info,
            );
            return;
        };
        let forge = match &self.services.forge {
            Ok(forge) => Arc::clone(forge),
            Err(reason) => {
                let reason = reason.clone();
                self.push_notification(reason, NotificationLevel::Error);
                return;
            }
        };

        self.busy = Some(Busy::Portrait);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let state = forge.regenerate_portrait(&character).await;
            let _ = tx.send(AppEvent::PortraitReady {
                character_id: character.id,
                state,
            });
        });
    }

    fn on_forged(&mut self, result: Result<ForgeOutcome, crate::core::forge::ForgeError>) {
        self.busy = None;
        match result {
            Ok(outcome) => {
                let name = outcome.display_name().to_string();
                if let PortraitState::Failed { reason } = &outcome.portrait {
                    self.push_notification(
                        format!("Portrait unavailable: {reason} (p to retry)"),
                        NotificationLevel::Warning,
                    );
                }
                if outcome.profile.is_raw() {
                    self.push_notification(
                        "Profile could not be split into sections".to_string(),
                        NotificationLevel::Warning,
                    );
                }
                self.set_outcome(outcome);
                self.last_error = None;
                self.push_notification(format!("Forged {name}"), NotificationLevel::Success);
            }
            Err(e) => {
                log::warn!("Generation failed: {e}");
                // A failed profile invalidates everything shown for the old character.
                self.outcome = None;
                self.tabs = vec![Tab::Overview];
                self.selected_tab = 0;
                self.scroll = 0;
                let message = e.user_message();
                self.last_error = Some(message.clone());
                self.push_notification(message, NotificationLevel::Error);
            }
        }
    }

    fn on_portrait(&mut self, character_id: String, state: PortraitState) {
        self.busy = None;
        let Some(outcome) = self.outcome.as_mut() else {
            return;
        };
        if outcome.character.id != character_id {
            log::debug!("Discarding portrait for a replaced character");
            return;
        }
        let (message, level) = match &state {
            PortraitState::Ready(_) => ("Portrait updated".to_string(), NotificationLevel::Success),
            PortraitState::Failed { reason } => {
                (format!("Portrait unavailable: {reason}"), NotificationLevel::Warning)
            }
            PortraitState::Skipped => ("Portraits are disabled".to_string(), NotificationLevel::Info),
        };
        outcome.portrait = state;
        self.push_notification(message, level);
    }

    fn export(&mut self) {
        let Some(outcome) = &self.outcome else {
            self.push_notification("Nothing to export yet".to_string(), NotificationLevel::Info);
            return;
        };
        match export_to_dir(outcome, &self.services.export_dir, self.services.export_json) {
            Ok(files) => {
                self.push_notification(
                    format!("Exported {}", files.html.display()),
                    NotificationLevel::Success,
                );
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.push_notification(format!("Export failed: {e}"), NotificationLevel::Error);
            }
        }
    }

    /// Replace the shown character and rebuild its tabs.
    pub fn set_outcome(&mut self, outcome: ForgeOutcome) {
        self.tabs = tabs_for(&outcome);
        self.selected_tab = 0;
        self.scroll = 0;
        self.outcome = Some(outcome);
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 100,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: advance the spinner, decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [tabs_area, main, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_tabs(frame, tabs_area);
        self.render_content(frame, main);
        self.render_status_bar(frame, status);

        self.render_notifications(frame, area);
        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = self
            .tabs
            .iter()
            .map(|t| {
                let title = self.tab_title(t);
                if *t == Tab::Raw {
                    Line::from(Span::styled(title, Style::default().fg(theme::ERROR)))
                } else {
                    Line::from(title)
                }
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.selected_tab)
            .style(theme::muted())
            .highlight_style(theme::highlight())
            .block(theme::block_focused("charforge"));
        frame.render_widget(tabs, area);
    }

    pub fn tab_title(&self, tab: &Tab) -> String {
        match tab {
            Tab::Overview => "Overview".to_string(),
            Tab::Personality => "Personality".to_string(),
            Tab::StatBlock => "Stat Block".to_string(),
            Tab::Raw => "Profile (raw)".to_string(),
            Tab::Section(key) => self
                .outcome
                .as_ref()
                .and_then(|o| o.profile.parsed())
                .map(|p| p.title(key).to_string())
                .unwrap_or_else(|| key.clone()),
        }
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let Some(outcome) = &self.outcome else {
            self.render_welcome(frame, area);
            return;
        };

        let tab = self.tabs.get(self.selected_tab).unwrap_or(&Tab::Overview);
        let (lines, block) = match tab {
            Tab::Overview => (overview_lines(outcome), theme::block_focused("Overview")),
            Tab::Personality => (personality_lines(outcome), theme::block_focused("Personality")),
            Tab::StatBlock => (stat_block_lines(outcome), theme::block_focused("Stat Block")),
            Tab::Section(key) => {
                let body = outcome
                    .profile
                    .parsed()
                    .and_then(|p| p.section(key))
                    .unwrap_or_default();
                (markdown_to_lines(body), theme::block_focused(""))
            }
            Tab::Raw => (raw_lines(outcome), theme::block_error("Raw profile")),
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_welcome(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled("  Welcome to charforge", theme::title())),
            Line::raw(""),
            Line::raw("  Roll a random character, give it a personality DNA,"),
            Line::raw("  and let the AI write its profile and paint its portrait."),
            Line::raw(""),
            Line::from(vec![
                Span::raw("  Press "),
                Span::styled("g", Style::default().fg(theme::PRIMARY_LIGHT).bold()),
                Span::raw(" to generate, "),
                Span::styled("?", Style::default().fg(theme::PRIMARY_LIGHT).bold()),
                Span::raw(" for help."),
            ]),
        ];
        if let Some(error) = &self.last_error {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme::ERROR),
            )));
        }
        frame.render_widget(
            Paragraph::new(lines).block(theme::block_focused("Forge")),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let activity = match self.busy {
            Some(busy) => Span::styled(
                format!(
                    " {} {} ",
                    SPINNER[(self.tick_count as usize / 3) % SPINNER.len()],
                    busy.label()
                ),
                theme::busy_badge(),
            ),
            None => Span::styled("ready", Style::default().fg(theme::TEXT_MUTED)),
        };

        let status = Line::from(vec![
            Span::styled(" CHARFORGE ", theme::brand_badge()),
            Span::raw(" "),
            activity,
            Span::raw(" │ "),
            Span::styled("g", theme::key_hint()),
            Span::raw(":generate "),
            Span::styled("p", theme::key_hint()),
            Span::raw(":portrait "),
            Span::styled("e", theme::key_hint()),
            Span::raw(":export "),
            Span::styled("←/→", theme::key_hint()),
            Span::raw(":tabs "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 60.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).bold()),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(50, 60, area);

        let keybindings = [
            ("g / Enter", "Generate a new character"),
            ("p", "Retry the portrait only"),
            ("e", "Export HTML (and JSON)"),
            ("Tab / → / l", "Next tab"),
            ("Shift+Tab / ← / h", "Previous tab"),
            ("j/k ↓/↑", "Scroll"),
            ("Home", "Scroll to top"),
            ("?", "Toggle this help"),
            ("q / Ctrl+C", "Quit"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("{:<20}", key),
                    Style::default().fg(theme::PRIMARY_LIGHT).bold(),
                ),
                Span::raw(*desc),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", Style::default().fg(theme::PRIMARY_LIGHT).bold()),
            Span::raw(" or "),
            Span::styled("Esc", Style::default().fg(theme::PRIMARY_LIGHT).bold()),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

// ── Input mapping ───────────────────────────────────────────────────────

fn map_help_input(event: &Event) -> Option<Action> {
    match event {
        Event::Key(KeyEvent {
            code: KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q'),
            kind: KeyEventKind::Press,
            ..
        }) => Some(Action::CloseHelp),
        _ => None,
    }
}

fn map_input_to_action(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    match (code, *modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
        (KeyCode::Char('q'), _) => Some(Action::Quit),
        (KeyCode::Char('?'), _) => Some(Action::ShowHelp),
        (KeyCode::Char('g') | KeyCode::Enter, _) => Some(Action::Generate),
        (KeyCode::Char('p'), _) => Some(Action::RegeneratePortrait),
        (KeyCode::Char('e'), _) => Some(Action::Export),
        (KeyCode::Tab | KeyCode::Right | KeyCode::Char('l'), _) => Some(Action::TabNext),
        (KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h'), _) => Some(Action::TabPrev),
        (KeyCode::Down | KeyCode::Char('j'), _) => Some(Action::ScrollDown),
        (KeyCode::Up | KeyCode::Char('k'), _) => Some(Action::ScrollUp),
        (KeyCode::Home, _) => Some(Action::ScrollTop),
        _ => None,
    }
}

// ── Tab content ─────────────────────────────────────────────────────────

/// Overview, Personality, Stat Block, then one tab per filled section,
/// or a single raw tab when the profile could not be parsed.
pub fn tabs_for(outcome: &ForgeOutcome) -> Vec<Tab> {
    let mut tabs = vec![Tab::Overview, Tab::Personality, Tab::StatBlock];
    match &outcome.profile {
        ProfileParse::Parsed(profile) => {
            let before = tabs.len();
            tabs.extend(
                profile
                    .filled_sections()
                    .map(|(key, _)| Tab::Section(key.to_string())),
            );
            if tabs.len() == before {
                tabs.push(Tab::Raw);
            }
        }
        ProfileParse::Raw { .. } => tabs.push(Tab::Raw),
    }
    tabs
}

fn label_value(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), theme::muted()),
        Span::styled(value.into(), Style::default().fg(theme::TEXT)),
    ])
}

fn overview_lines(outcome: &ForgeOutcome) -> Vec<Line<'static>> {
    let c = &outcome.character;
    let parsed = outcome.profile.parsed();
    let mut lines = vec![
        Line::from(Span::styled(outcome.display_name().to_string(), theme::title())),
        Line::raw(""),
        label_value("Race", c.race.clone()),
        label_value("Gender", c.gender.to_string()),
        label_value(
            "Role",
            parsed
                .and_then(|p| p.role.clone())
                .unwrap_or_else(|| c.profession.clone()),
        ),
        label_value(
            "Alignment",
            parsed
                .and_then(|p| p.alignment.clone())
                .unwrap_or_else(|| outcome.decoded.alignment.to_string()),
        ),
        label_value("Purse", c.currency.to_string()),
        label_value("Portrait", outcome.portrait.status_label()),
        Line::raw(""),
    ];

    if let Some(p) = parsed {
        for row in &p.summary {
            lines.push(label_value(&row.label, row.value.clone()));
        }
        if !p.summary.is_empty() {
            lines.push(Line::raw(""));
        }
        if p.degraded {
            lines.push(Line::from(Span::styled(
                "The profile text was only partly recognised.",
                Style::default().fg(theme::WARNING),
            )));
            lines.push(Line::raw(""));
        }
    }

    lines.push(Line::from(Span::styled("Description", theme::heading())));
    lines.push(Line::raw(c.description.clone()));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Carried", theme::heading())));
    for item in &c.items {
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(theme::PRIMARY_LIGHT)),
            Span::raw(item.clone()),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("DNA ", theme::muted()),
        Span::styled(outcome.dna.to_string(), Style::default().fg(theme::TEXT_DIM)),
    ]));
    lines
}

fn personality_lines(outcome: &ForgeOutcome) -> Vec<Line<'static>> {
    let d = &outcome.decoded;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Alignment ", theme::muted()),
            Span::styled(d.alignment.to_string(), theme::title()),
            Span::styled(
                format!("  (order {}/9, morality {}/9)", d.paired_average, d.unpaired_average),
                theme::muted(),
            ),
        ]),
        Line::raw(""),
        Line::from(Span::styled("Traits", theme::heading())),
    ];

    for pair in &d.pairs {
        let color = match pair.law {
            LawAxis::Lawful => theme::LAWFUL,
            LawAxis::Neutral => theme::TEXT,
            LawAxis::Chaotic => theme::CHAOTIC,
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", pair.name), Style::default().fg(color).bold()),
            Span::styled(format!("over {:<14}", pair.opposite), theme::muted()),
            Span::raw(format!(
                "{}{}",
                "█".repeat(pair.score as usize),
                "·".repeat(9 - pair.score.min(9) as usize)
            )),
            Span::styled(format!("  ×{}", pair.intensity), theme::muted()),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Virtues", theme::heading())));
    for virtue in &d.virtues {
        let color = match virtue.strength {
            Strength::Strong => theme::SUCCESS,
            Strength::Moderate => theme::TEXT,
            Strength::Weak => theme::TEXT_DIM,
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", virtue.name), Style::default().fg(color)),
            Span::styled(format!("{} ({})", virtue.strength, virtue.score), theme::muted()),
        ]));
    }
    lines
}

/// The unsplit profile text under a one-line explanation.
fn raw_lines(outcome: &ForgeOutcome) -> Vec<Line<'static>> {
    let (text, headline) = match &outcome.profile {
        ProfileParse::Raw { text, reason } => (
            text.as_str(),
            format!("Could not split the profile into sections: {reason}"),
        ),
        ProfileParse::Parsed(_) => (
            outcome.profile_text.as_str(),
            "No recognised sections in the profile; showing it as written".to_string(),
        ),
    };
    let mut lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(theme::ERROR).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    lines.extend(
        text.lines()
            .map(|l| Line::styled(l.to_string(), theme::raw_fallback())),
    );
    lines
}

fn stat_block_lines(outcome: &ForgeOutcome) -> Vec<Line<'static>> {
    let block = &outcome.stat_block;
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", block.race, block.profession),
            theme::title(),
        )),
        Line::from(Span::styled(
            format!("{} template, challenge {}", block.template, block.challenge_rating),
            theme::muted(),
        )),
        Line::raw(""),
        label_value("Armor Class", format!("{} ({})", block.armor_class, block.armor)),
        label_value("Hit Points", format!("{} ({})", block.hit_points, block.hit_dice)),
        label_value("Speed", format!("{} ft.", block.speed)),
        Line::raw(""),
    ];

    lines.push(Line::from(
        block
            .ability_line()
            .into_iter()
            .flat_map(|(abbr, value)| {
                [
                    Span::styled(format!("{abbr} "), theme::heading()),
                    Span::raw(format!("{value}   ")),
                ]
            })
            .collect::<Vec<_>>(),
    ));
    lines.push(Line::raw(""));
    if !block.skills.is_empty() {
        lines.push(label_value("Skills", block.skills.clone()));
    }
    lines.push(label_value(
        "Senses",
        format!("passive Perception {}", block.passive_perception),
    ));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Actions", theme::heading())));
    for attack in &block.attacks {
        lines.push(Line::raw(attack.clone()));
    }
    lines
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
