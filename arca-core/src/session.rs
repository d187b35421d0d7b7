//! App session: which screen is showing and the player's profile.
//!
//! All mutation goes through the methods here; the shell passes the
//! session around by reference instead of keeping ambient global state.

use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::types::{AppView, UserProfile};

/// Holds view selection and the in-memory profile.
#[derive(Debug, Clone)]
pub struct AppSession {
    view: AppView,
    profile: UserProfile,
    points_per_level: u32,
}

impl Default for AppSession {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl AppSession {
    /// A fresh session on the home screen.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            view: AppView::Home,
            profile: UserProfile {
                name: config.default_name.clone(),
                avatar: config.default_avatar.clone(),
                points: 0,
                level: 1,
                badges: Vec::new(),
                completed_stories: 0,
            },
            points_per_level: config.points_per_level.max(1),
        }
    }

    /// Screen currently showing.
    #[must_use]
    pub fn current_view(&self) -> AppView {
        self.view
    }

    /// Switch screens. Returns the screen that was showing.
    pub fn set_view(&mut self, view: AppView) -> AppView {
        let previous = std::mem::replace(&mut self.view, view);
        if previous != view {
            debug!(from = %previous, to = %view, "View changed");
        }
        previous
    }

    /// Credit points and recompute the level.
    ///
    /// Returns the new level if the player climbed one.
    pub fn add_points(&mut self, points: u32) -> Option<u32> {
        let before = self.profile.level;
        self.profile.points = self.profile.points.saturating_add(points);
        self.profile.level = 1 + self.profile.points / self.points_per_level;

        if self.profile.level > before {
            info!(level = self.profile.level, points = self.profile.points, "Level up");
            Some(self.profile.level)
        } else {
            None
        }
    }

    /// Note that a story was read to the end.
    pub fn record_story_read(&mut self) {
        self.profile.completed_stories += 1;
    }

    /// Give the player a badge. Returns false if they already had it.
    pub fn award_badge(&mut self, badge: impl Into<String>) -> bool {
        let badge = badge.into();
        if self.profile.badges.contains(&badge) {
            return false;
        }
        info!(%badge, "Badge awarded");
        self.profile.badges.push(badge);
        true
    }

    /// Change display name and avatar.
    pub fn rename(&mut self, name: impl Into<String>, avatar: impl Into<String>) {
        self.profile.name = name.into();
        self.profile.avatar = avatar.into();
    }

    /// The player's profile.
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
}
