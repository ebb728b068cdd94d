use serde::{Deserialize, Serialize};

/// Where one user is in the search → select flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConversationState {
    Idle,
    /// A results menu is on screen; holds the ids it offered.
    AwaitingSelection { offered: Vec<String> },
}

impl Default for ConversationState {
    fn default() -> Self {
        ConversationState::Idle
    }
}

impl ConversationState {
    pub fn show_menu(&mut self, offered: Vec<String>) {
        *self = ConversationState::AwaitingSelection { offered };
    }

    pub fn reset(&mut self) {
        *self = ConversationState::Idle;
    }

    pub fn offers(&self, external_id: &str) -> bool {
        match self {
            ConversationState::Idle => false,
            ConversationState::AwaitingSelection { offered } => {
                offered.iter().any(|id| id == external_id)
            }
        }
    }
}

/// How selections from menus other than the latest one are treated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SelectionPolicy {
    /// Any `movie_<id>` button works, however old the menu.
    Permissive,
    /// Only ids from the user's latest menu are accepted.
    Strict,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::Permissive
    }
}

impl SelectionPolicy {
    pub fn accepts(&self, state: &ConversationState, external_id: &str) -> bool {
        match self {
            SelectionPolicy::Permissive => true,
            SelectionPolicy::Strict => state.offers(external_id),
        }
    }
}
