//! Capturing highlighted passages as context for the next question.
//!
//! A [`Page`] stands in for the rendered document: it owns the reader's live
//! selection and sends a [`PointerRelease`] to every mounted tracker whenever the pointer is
//! released anywhere on it. A [`SelectionTracker`] subscribes for as long as
//! it is mounted and turns eligible selections into the session's pending
//! selection.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::session::Session;

/// Container markers that identify the document's content region.
pub const CONTENT_MARKERS: &[&str] = &[".markdown", "article", ".theme-doc-markdown"];

/// Selections must be strictly longer than this many characters once trimmed.
///
/// Characters are Unicode scalar values, so text outside the Basic
/// Multilingual Plane counts one per code point rather than two.
pub const MIN_SELECTION_CHARS: usize = 10;

/// Selections must be strictly shorter than this many characters once trimmed.
pub const MAX_SELECTION_CHARS: usize = 2000;

/// Ancestor chain of a selection's anchor node, innermost first.
///
/// Each entry is a container marker: a tag name such as `article` or a class
/// selector such as `.markdown`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    ancestors: Vec<String>,
}

impl Anchor {
    pub fn new<I, S>(ancestors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ancestors: ancestors.into_iter().map(Into::into).collect(),
        }
    }

    /// An anchor inside the rendered body of a documentation page.
    pub fn doc_content() -> Self {
        Self::new(["p", ".markdown", "article", "main"])
    }

    /// Whether any ancestor marks a document content region.
    pub fn in_content_region(&self) -> bool {
        self.ancestors
            .iter()
            .any(|a| CONTENT_MARKERS.contains(&a.as_str()))
    }
}

/// The reader's current text selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveSelection {
    pub text: String,
    pub anchor: Anchor,
}

impl LiveSelection {
    pub fn new(text: impl Into<String>, anchor: Anchor) -> Self {
        Self {
            text: text.into(),
            anchor,
        }
    }
}

/// A pointer-release event, carrying the selection live at that moment.
#[derive(Debug, Clone)]
pub struct PointerRelease {
    pub selection: Option<LiveSelection>,
}

/// Decides whether a selection may become the pending selection.
///
/// Returns the trimmed text when it is eligible.
pub fn eligible_text(selection: &LiveSelection) -> Option<&str> {
    let text = selection.text.trim();
    let len = text.chars().count();
    if len <= MIN_SELECTION_CHARS || len >= MAX_SELECTION_CHARS {
        return None;
    }
    if !selection.anchor.in_content_region() {
        return None;
    }
    Some(text)
}

type Listeners = Vec<mpsc::UnboundedSender<PointerRelease>>;

/// The rendered document a selection tracker listens to.
///
/// Every mounted tracker gets its own unbounded queue, so no release is lost
/// however long a tracker goes between polls.
#[derive(Default)]
pub struct Page {
    live: Option<LiveSelection>,
    listeners: Mutex<Listeners>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlights `text` at `anchor`, replacing any live selection.
    pub fn select(&mut self, text: impl Into<String>, anchor: Anchor) {
        self.live = Some(LiveSelection::new(text, anchor));
    }

    pub const fn live_selection(&self) -> Option<&LiveSelection> {
        self.live.as_ref()
    }

    /// Deselects everything on the page.
    pub fn remove_all_ranges(&mut self) {
        self.live = None;
    }

    /// Notifies every mounted listener that the pointer was released.
    pub fn release_pointer(&self) {
        let event = PointerRelease {
            selection: self.live.clone(),
        };
        // Unmounted trackers have dropped their receiver
        self.lock_listeners()
            .retain(|listener| listener.send(event.clone()).is_ok());
    }

    /// Number of mounted listeners.
    pub fn listener_count(&self) -> usize {
        self.lock_listeners()
            .iter()
            .filter(|listener| !listener.is_closed())
            .count()
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<PointerRelease> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut listeners = self.lock_listeners();
        listeners.retain(|listener| !listener.is_closed());
        listeners.push(sender);
        receiver
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Page-wide listener that captures eligible selections into a session.
///
/// Mounting acquires a subscription on the page; dropping the tracker
/// releases it.
pub struct SelectionTracker {
    releases: mpsc::UnboundedReceiver<PointerRelease>,
}

impl SelectionTracker {
    pub fn mount(page: &Page) -> Self {
        tracing::debug!("selection tracker mounted");
        Self {
            releases: page.subscribe(),
        }
    }

    /// Applies every pointer release received since the last poll, in order.
    ///
    /// Returns `true` if any release replaced the pending selection.
    pub fn poll(&mut self, session: &mut Session) -> bool {
        let mut captured = false;
        loop {
            match self.releases.try_recv() {
                Ok(event) => captured |= Self::on_release(session, &event),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        captured
    }

    /// Empties the pending selection and deselects the page.
    pub fn clear(session: &mut Session, page: &mut Page) {
        session.clear_selection();
        page.remove_all_ranges();
    }

    fn on_release(session: &mut Session, event: &PointerRelease) -> bool {
        let Some(text) = event.selection.as_ref().and_then(eligible_text) else {
            return false;
        };
        session.capture_selection(text.to_string());
        true
    }
}

impl Drop for SelectionTracker {
    fn drop(&mut self) {
        tracing::debug!("selection tracker unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(text: &str) -> Option<String> {
        let mut page = Page::new();
        let mut session = Session::new();
        let mut tracker = SelectionTracker::mount(&page);
        page.select(text, Anchor::doc_content());
        page.release_pointer();
        tracker.poll(&mut session);
        session.pending_selection().map(str::to_string)
    }

    #[test]
    fn test_length_boundaries() {
        assert_eq!(capture(&"x".repeat(10)), None);
        assert_eq!(capture(&"x".repeat(11)), Some("x".repeat(11)));
        assert_eq!(capture(&"x".repeat(1999)), Some("x".repeat(1999)));
        assert_eq!(capture(&"x".repeat(2000)), None);
        assert_eq!(capture(&"x".repeat(2001)), None);
    }

    #[test]
    fn test_length_measured_after_trim() {
        let padded = format!("   {}   \n", "y".repeat(10));
        assert_eq!(capture(&padded), None);

        let padded = format!("  {}  ", "y".repeat(11));
        assert_eq!(capture(&padded), Some("y".repeat(11)));
    }

    #[test]
    fn test_length_counts_characters() {
        // 11 characters, 20 bytes
        let text = "ربات ربات ر";
        assert_eq!(text.chars().count(), 11);
        assert_eq!(capture(text), Some(text.to_string()));
    }

    #[test]
    fn test_astral_characters_count_once() {
        // 11 code points, 22 UTF-16 units
        let robots = "🤖".repeat(11);
        assert_eq!(capture(&robots), Some(robots.clone()));
        assert_eq!(capture(&"🤖".repeat(10)), None);
        assert_eq!(capture(&"🤖".repeat(1999)), Some("🤖".repeat(1999)));
    }

    #[test]
    fn test_anchor_outside_content_rejected() {
        let selection = LiveSelection::new(
            "Navigation sidebar entry text",
            Anchor::new(["a", ".menu__link", "nav"]),
        );
        assert!(eligible_text(&selection).is_none());
    }

    #[test]
    fn test_each_content_marker_accepted() {
        for marker in CONTENT_MARKERS {
            let selection =
                LiveSelection::new("Kinematics describes motion.", Anchor::new(["span", *marker]));
            assert!(eligible_text(&selection).is_some(), "marker {marker}");
        }
    }

    #[test]
    fn test_short_selection_leaves_pending_unchanged() {
        let mut page = Page::new();
        let mut session = Session::new();
        let mut tracker = SelectionTracker::mount(&page);

        page.select("short", Anchor::doc_content());
        page.release_pointer();
        assert!(!tracker.poll(&mut session));
        assert!(session.pending_selection().is_none());

        page.select("A longer passage about servo motors.", Anchor::doc_content());
        page.release_pointer();
        page.select("tiny", Anchor::doc_content());
        page.release_pointer();
        assert!(tracker.poll(&mut session));
        assert_eq!(
            session.pending_selection(),
            Some("A longer passage about servo motors.")
        );
    }

    #[test]
    fn test_eligible_selection_replaces_previous() {
        let mut page = Page::new();
        let mut session = Session::new();
        let mut tracker = SelectionTracker::mount(&page);

        page.select("The first highlighted passage.", Anchor::doc_content());
        page.release_pointer();
        page.select("The second highlighted passage.", Anchor::doc_content());
        page.release_pointer();
        tracker.poll(&mut session);

        assert_eq!(
            session.pending_selection(),
            Some("The second highlighted passage.")
        );
    }

    #[test]
    fn test_release_without_selection_ignored() {
        let page = Page::new();
        let mut session = Session::new();
        let mut tracker = SelectionTracker::mount(&page);

        page.release_pointer();
        assert!(!tracker.poll(&mut session));
        assert!(session.pending_selection().is_none());
    }

    #[test]
    fn test_clear_empties_pending_and_deselects_page() {
        let mut page = Page::new();
        let mut session = Session::new();
        let mut tracker = SelectionTracker::mount(&page);

        page.select("Reinforcement learning rewards behaviour.", Anchor::doc_content());
        page.release_pointer();
        tracker.poll(&mut session);
        assert!(session.pending_selection().is_some());

        SelectionTracker::clear(&mut session, &mut page);
        assert!(session.pending_selection().is_none());
        assert!(page.live_selection().is_none());
    }

    #[test]
    fn test_subscription_released_on_unmount() {
        let page = Page::new();
        assert_eq!(page.listener_count(), 0);

        for _ in 0..3 {
            let tracker = SelectionTracker::mount(&page);
            assert_eq!(page.listener_count(), 1);
            drop(tracker);
            assert_eq!(page.listener_count(), 0);
        }
    }

    #[test]
    fn test_eligible_release_survives_long_backlog() {
        let mut page = Page::new();
        let mut session = Session::new();
        let mut tracker = SelectionTracker::mount(&page);

        page.select("An eligible passage about servo motors.", Anchor::doc_content());
        page.release_pointer();
        for _ in 0..200 {
            page.select("tiny", Anchor::doc_content());
            page.release_pointer();
        }

        assert!(tracker.poll(&mut session));
        assert_eq!(
            session.pending_selection(),
            Some("An eligible passage about servo motors.")
        );
    }

    #[test]
    fn test_each_tracker_receives_every_release() {
        let mut page = Page::new();
        let mut first = SelectionTracker::mount(&page);
        let mut second = SelectionTracker::mount(&page);
        assert_eq!(page.listener_count(), 2);

        page.select("Shared passage about lidar scans.", Anchor::doc_content());
        page.release_pointer();

        let mut session_a = Session::new();
        let mut session_b = Session::new();
        assert!(first.poll(&mut session_a));
        assert!(second.poll(&mut session_b));
        assert_eq!(session_a.pending_selection(), session_b.pending_selection());
    }

    #[test]
    fn test_events_before_mount_not_delivered() {
        let mut page = Page::new();
        page.select("Released before the overlay mounted.", Anchor::doc_content());
        page.release_pointer();

        let mut session = Session::new();
        let mut tracker = SelectionTracker::mount(&page);
        assert!(!tracker.poll(&mut session));
        assert!(session.pending_selection().is_none());
    }
}
