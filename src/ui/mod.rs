//! Terminal output for the CLI

pub mod output;
pub mod table;

use owo_colors::Style;
use std::sync::OnceLock;

use crate::domain::VoteValue;

pub use output::{error, field, header, outcome, section, success, tally, warn};
pub use table::{decisions_table, officials_table, table_counts, votes_table};

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for headings and for each way a ballot can go
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub label: Style,
    pub muted: Style,
    pub passed: Style,
    pub rejected: Style,
    pub in_favor: Style,
    pub against: Style,
    pub abstention: Style,
    pub absent: Style,
}

impl Theme {
    /// Colored on a terminal, plain when piped
    pub fn detect() -> Self {
        if console::Term::stdout().is_term() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().white().dimmed(),
            muted: Style::new().dimmed(),
            passed: Style::new().green().bold(),
            rejected: Style::new().red().bold(),
            in_favor: Style::new().green(),
            against: Style::new().red(),
            abstention: Style::new().yellow(),
            absent: Style::new().bright_black(),
        }
    }

    pub fn plain() -> Self {
        Self {
            title: Style::new(),
            label: Style::new(),
            muted: Style::new(),
            passed: Style::new(),
            rejected: Style::new(),
            in_favor: Style::new(),
            against: Style::new(),
            abstention: Style::new(),
            absent: Style::new(),
        }
    }

    pub fn vote(&self, vote: VoteValue) -> Style {
        match vote {
            VoteValue::InFavor => self.in_favor.clone(),
            VoteValue::Against => self.against.clone(),
            VoteValue::Abstention => self.abstention.clone(),
            VoteValue::Absent => self.absent.clone(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

/// How a vote reads in listings
pub fn vote_label(vote: VoteValue) -> &'static str {
    match vote {
        VoteValue::InFavor => "In favor",
        VoteValue::Against => "Against",
        VoteValue::Abstention => "Abstention",
        VoteValue::Absent => "Absent",
    }
}
