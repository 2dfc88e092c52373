use serde::{Deserialize, Serialize};

use crate::core::system_monitor::Stat;

/// Per-button settings, persisted and round-tripped by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<String>,
}

/// What a button should display, derived from its settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Unset,
    Stat(Stat),
    /// A key this version does not know (settings written by a newer build)
    Unknown(String),
}

impl WidgetSettings {
    pub fn with_stat(stat: Stat) -> Self {
        Self {
            stat: Some(stat.key().to_string()),
        }
    }

    pub fn selection(&self) -> Selection {
        match self.stat.as_deref() {
            None | Some("") => Selection::Unset,
            Some(key) => key
                .parse::<Stat>()
                .map(Selection::Stat)
                .unwrap_or_else(|_| Selection::Unknown(key.to_string())),
        }
    }
}
