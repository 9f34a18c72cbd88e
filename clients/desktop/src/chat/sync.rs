//! Scroll reconciliation for the conversation view.
//!
//! The message history is replaced wholesale on every poll, so the question
//! is never how to merge it but whether the replacement may move the reader's
//! scroll position. The rules: a no-op poll never scrolls, a local send
//! always scrolls, and new messages scroll only a reader who was already
//! following the bottom and is not mid-drag.

use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Distance from the pane's end, in pixels, within which the reader still
/// counts as following the bottom.
pub const NEAR_BOTTOM_THRESHOLD: f32 = 150.0;

/// How long after a scroll event automatic scrolling stays suppressed.
pub const MANUAL_SCROLL_COOLDOWN: Duration = Duration::from_millis(100);

/// What the view should do with the message pane after a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    None,
    SnapToBottom,
}

/// Geometry of the message pane as reported by a scroll event.
#[derive(Debug, Clone, Copy)]
pub struct PaneMetrics {
    pub content_height: f32,
    pub viewport_height: f32,
    pub offset_y: f32,
}

impl PaneMetrics {
    pub fn distance_from_bottom(&self) -> f32 {
        (self.content_height - self.viewport_height - self.offset_y).max(0.0)
    }

    pub fn near_bottom(&self) -> bool {
        self.distance_from_bottom() < NEAR_BOTTOM_THRESHOLD
    }
}

/// Per-conversation scroll policy. Owns the remembered id set used to tell
/// genuinely new messages from a refetch of the same history.
#[derive(Debug)]
pub struct ConversationSync {
    seen_ids: HashSet<String>,
    force_scroll: bool,
    near_bottom: bool,
    manual_scroll_until: Option<Instant>,
}

impl ConversationSync {
    pub fn new() -> Self {
        Self {
            seen_ids: HashSet::new(),
            force_scroll: false,
            // A fresh conversation starts glued to the bottom.
            near_bottom: true,
            manual_scroll_until: None,
        }
    }

    /// Forget everything about the previous conversation: the remembered id
    /// set, any pending forced scroll, and any in-flight scroll suppression.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record a scroll event on the message pane. Suppresses automatic
    /// scrolling for a short cooldown and re-evaluates whether the reader is
    /// near the bottom.
    pub fn note_scroll(&mut self, metrics: PaneMetrics, now: Instant) {
        self.manual_scroll_until = Some(now + MANUAL_SCROLL_COOLDOWN);
        self.near_bottom = metrics.near_bottom();
    }

    /// Guarantee that the next reconciliation snaps to the bottom, wherever
    /// the reader is. Set when the user sends a message themselves.
    pub fn force_next_scroll(&mut self) {
        self.force_scroll = true;
    }

    pub fn is_user_scrolling(&self, now: Instant) -> bool {
        self.manual_scroll_until.map_or(false, |until| now < until)
    }

    /// Apply a freshly fetched history (as its ordered id list) and decide
    /// the scroll action. Always replaces the remembered id set and consumes
    /// any pending forced scroll.
    pub fn reconcile<'a, I>(&mut self, ids: I, now: Instant) -> ScrollAction
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ids: Vec<&str> = ids.into_iter().collect();
        let has_new = ids.iter().any(|id| !self.seen_ids.contains(*id));

        let action = if self.force_scroll
            || (has_new && !self.is_user_scrolling(now) && self.near_bottom)
        {
            ScrollAction::SnapToBottom
        } else {
            ScrollAction::None
        };

        self.force_scroll = false;
        self.seen_ids = ids.into_iter().map(str::to_owned).collect();
        action
    }
}

impl Default for ConversationSync {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Instant {
        Instant::now()
    }

    fn away_from_bottom() -> PaneMetrics {
        PaneMetrics {
            content_height: 2000.0,
            viewport_height: 400.0,
            offset_y: 800.0,
        }
    }

    fn close_to_bottom() -> PaneMetrics {
        PaneMetrics {
            content_height: 2000.0,
            viewport_height: 400.0,
            offset_y: 1550.0,
        }
    }

    #[test]
    fn pane_metrics_distance() {
        assert_eq!(away_from_bottom().distance_from_bottom(), 800.0);
        assert!(!away_from_bottom().near_bottom());
        assert_eq!(close_to_bottom().distance_from_bottom(), 50.0);
        assert!(close_to_bottom().near_bottom());
    }

    #[test]
    fn first_fetch_scrolls_to_bottom() {
        let mut sync = ConversationSync::new();
        let action = sync.reconcile(["m1", "m2", "m3"], now());
        assert_eq!(action, ScrollAction::SnapToBottom);
    }

    #[test]
    fn noop_poll_does_not_scroll() {
        let mut sync = ConversationSync::new();
        sync.reconcile(["m1", "m2", "m3"], now());
        let action = sync.reconcile(["m1", "m2", "m3"], now());
        assert_eq!(action, ScrollAction::None);
    }

    #[test]
    fn forced_scroll_wins_regardless_of_position() {
        let mut sync = ConversationSync::new();
        sync.reconcile(["m1"], now());
        sync.note_scroll(away_from_bottom(), now());
        sync.force_next_scroll();
        // Same ids, reader far from the bottom: only the force flag applies.
        let action = sync.reconcile(["m1"], now() + MANUAL_SCROLL_COOLDOWN * 2);
        assert_eq!(action, ScrollAction::SnapToBottom);
    }

    #[test]
    fn force_flag_is_consumed() {
        let mut sync = ConversationSync::new();
        sync.reconcile(["m1"], now());
        sync.force_next_scroll();
        assert_eq!(sync.reconcile(["m1"], now()), ScrollAction::SnapToBottom);
        assert_eq!(sync.reconcile(["m1"], now()), ScrollAction::None);
    }

    #[test]
    fn new_message_does_not_scroll_reader_away_from_bottom() {
        let mut sync = ConversationSync::new();
        sync.reconcile(["m1", "m2"], now());
        let scrolled_at = now();
        sync.note_scroll(away_from_bottom(), scrolled_at);
        // Cooldown has passed, but the reader is still far from the bottom.
        let later = scrolled_at + MANUAL_SCROLL_COOLDOWN * 10;
        let action = sync.reconcile(["m1", "m2", "m3"], later);
        assert_eq!(action, ScrollAction::None);
    }

    #[test]
    fn new_message_scrolls_reader_near_bottom() {
        let mut sync = ConversationSync::new();
        sync.reconcile(["m1", "m2"], now());
        let scrolled_at = now();
        sync.note_scroll(close_to_bottom(), scrolled_at);
        let later = scrolled_at + MANUAL_SCROLL_COOLDOWN * 10;
        let action = sync.reconcile(["m1", "m2", "m3"], later);
        assert_eq!(action, ScrollAction::SnapToBottom);
    }

    #[test]
    fn mid_drag_suppresses_even_near_bottom() {
        let mut sync = ConversationSync::new();
        sync.reconcile(["m1"], now());
        let scrolled_at = now();
        sync.note_scroll(close_to_bottom(), scrolled_at);
        // Still inside the cooldown window.
        let during = scrolled_at + MANUAL_SCROLL_COOLDOWN / 2;
        let action = sync.reconcile(["m1", "m2"], during);
        assert_eq!(action, ScrollAction::None);
    }

    #[test]
    fn reset_clears_remembered_ids_and_suppression() {
        let mut sync = ConversationSync::new();
        sync.reconcile(["a1", "a2"], now());
        sync.note_scroll(away_from_bottom(), now());
        sync.reset();
        // The next conversation's first fetch must count as new messages.
        let action = sync.reconcile(["b1"], now());
        assert_eq!(action, ScrollAction::SnapToBottom);
    }

    #[test]
    fn remembered_set_follows_the_latest_fetch() {
        let mut sync = ConversationSync::new();
        sync.reconcile(["m1", "m2"], now());
        // History shrank (e.g. server-side cleanup), then m2 comes back.
        sync.reconcile(["m1"], now());
        let action = sync.reconcile(["m1", "m2"], now());
        assert_eq!(action, ScrollAction::SnapToBottom);
    }
}
