//! Profile hooks run when an engine reports an outcome.
//!
//! The engines never touch the profile themselves; the shell calls these
//! when a game is won or a story arrives.

use tracing::info;

use arca_core::memory_game::Victory;
use arca_core::session::AppSession;

use crate::events::ShellEvent;

/// Credit a memory-game win: the final score as points, plus one badge per
/// newly unlocked achievement.
pub fn on_memory_game_won(session: &mut AppSession, victory: &Victory) -> Vec<ShellEvent> {
    let mut events = Vec::new();

    let level_up = session.add_points(victory.final_score);
    events.push(ShellEvent::PointsAwarded {
        points: victory.final_score,
        total: session.profile().points,
    });
    if let Some(level) = level_up {
        events.push(ShellEvent::LevelUp { level });
    }

    for achievement in &victory.unlocked {
        let title = achievement.title();
        if session.award_badge(title) {
            events.push(ShellEvent::BadgeAwarded(title.to_string()));
        }
    }

    info!(
        points = victory.final_score,
        badges = session.profile().badges.len(),
        "Memory game credited"
    );
    events
}

/// Count a delivered story as read.
pub fn on_story_delivered(session: &mut AppSession) {
    session.record_story_read();
}
