use crate::core::forge::{ForgeError, ForgeOutcome, PortraitState};

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs and the busy spinner.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// A generation cycle finished.
    Forged(Box<Result<ForgeOutcome, ForgeError>>),
    /// A portrait-only retry finished for the character with this id.
    PortraitReady {
        character_id: String,
        state: PortraitState,
    },
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Generate,
    RegeneratePortrait,
    Export,
    TabNext,
    TabPrev,
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ShowHelp,
    CloseHelp,
    Quit,
}

/// One tab of the character view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Personality,
    StatBlock,
    /// A profile section, by catalog key.
    Section(String),
    /// Unsplit profile text shown when parsing failed.
    Raw,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
