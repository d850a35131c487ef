/// Badge state derived from discussion counts
use crate::config::BadgeConfig;
use crate::tab_data::DiscussionCounts;

/// What the toolbar icon of one tab shows
///
/// Always recomputed from the latest counts; colors are `None` when the
/// badge is cleared so the browser defaults apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeState {
    pub text: String,
    pub title: String,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

impl BadgeState {
    pub fn cleared(config: &BadgeConfig) -> Self {
        BadgeState {
            text: String::new(),
            title: config.default_title.clone(),
            background_color: None,
            text_color: None,
        }
    }

    /// Map a counts response to a badge. `None` is an empty response body.
    pub fn from_counts(counts: Option<&DiscussionCounts>, config: &BadgeConfig) -> Self {
        let counts = match counts {
            Some(counts) if !counts.is_empty() => counts,
            _ => return BadgeState::cleared(config),
        };

        let count = counts.activity().min(config.max_count);

        BadgeState {
            text: count.to_string(),
            title: format!("{} Discussions", counts.total_discussions),
            background_color: Some(config.background_color.clone()),
            text_color: Some(config.text_color.clone()),
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.text.is_empty()
    }
}
