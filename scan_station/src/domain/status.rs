// Status display model: what a rendered outcome looks like.

use crate::domain::verification::{Token, VerificationOutcome};
use std::collections::BTreeSet;
use std::fmt;

/// Styling category of a rendered outcome. Exactly one is applied per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusClass {
    Success,
    Warning,
    Danger,
}

impl StatusClass {
    pub const ALL: [StatusClass; 3] = [
        StatusClass::Success,
        StatusClass::Warning,
        StatusClass::Danger,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusClass::Success => "success",
            StatusClass::Warning => "warning",
            StatusClass::Danger => "danger",
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Styling plus text for one outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub class: StatusClass,
    pub message: String,
}

impl StatusView {
    pub fn for_outcome(token: &Token, outcome: &VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Invalid => Self {
                class: StatusClass::Danger,
                message: "Invalid token".to_string(),
            },
            VerificationOutcome::ValidAlreadyRedeemed { user } => Self {
                class: StatusClass::Warning,
                message: format!("Token already redeemed for {user}"),
            },
            VerificationOutcome::ValidUnredeemed { user, redeemed_now } => {
                let status = if *redeemed_now { "Redeemed" } else { "Active" };
                Self {
                    class: StatusClass::Success,
                    message: format!("Valid token for {user}\nToken ID: {token}\nStatus: {status}"),
                }
            }
            VerificationOutcome::TransportError => Self {
                class: StatusClass::Danger,
                message: "Error verifying token".to_string(),
            },
        }
    }
}

/// State of the on-screen status element.
///
/// Starts hidden with no styling. Every [`StatusPanel::apply`] replaces the
/// previous styling, so classes never accumulate across scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPanel {
    hidden: bool,
    classes: BTreeSet<StatusClass>,
    message: String,
}

impl Default for StatusPanel {
    fn default() -> Self {
        Self {
            hidden: true,
            classes: BTreeSet::new(),
            message: String::new(),
        }
    }
}

impl StatusPanel {
    pub fn apply(&mut self, view: &StatusView) {
        self.hidden = false;
        for class in StatusClass::ALL {
            self.classes.remove(&class);
        }
        self.classes.insert(view.class);
        self.message.clone_from(&view.message);
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn classes(&self) -> impl Iterator<Item = StatusClass> + '_ {
        self.classes.iter().copied()
    }

    /// The applied class, if the panel has been rendered at least once.
    pub fn class(&self) -> Option<StatusClass> {
        self.classes.iter().next().copied()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
