use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extensions::EntryModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerVisibility {
    #[default]
    Hidden,
    Visible,
}

/// Marker transition emitted by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerEvent {
    Shown,
    Moved,
    Hidden,
}

/// Observer notified of marker transitions.
pub trait MarkerVisibilityChangeListener {
    fn on_marker_shown(&mut self, entries: &[EntryModel]);

    fn on_marker_moved(&mut self, _entries: &[EntryModel]) {}

    fn on_marker_hidden(&mut self);
}

/// Marker state carried from one frame to the next.
#[derive(Debug, Clone, Default)]
pub struct MarkerTracker {
    visibility: MarkerVisibility,
    last_entries: Vec<EntryModel>,
}

impl MarkerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visibility(&self) -> MarkerVisibility {
        self.visibility
    }

    #[must_use]
    pub fn entries(&self) -> &[EntryModel] {
        &self.last_entries
    }

    /// Advances the state machine with this frame's marked entries.
    ///
    /// `None` (or an empty list) means nothing is marked. At most one event is
    /// emitted, and `listener` hears about exactly that event.
    pub fn update(
        &mut self,
        entries: Option<Vec<EntryModel>>,
        listener: Option<&mut dyn MarkerVisibilityChangeListener>,
    ) -> Option<MarkerEvent> {
        let entries = entries.filter(|entries| !entries.is_empty());
        let event = match (self.visibility, entries) {
            (MarkerVisibility::Hidden, Some(entries)) => {
                self.visibility = MarkerVisibility::Visible;
                self.last_entries = entries;
                Some(MarkerEvent::Shown)
            }
            (MarkerVisibility::Visible, Some(entries)) => {
                let moved = match (self.last_entries.first(), entries.first()) {
                    (Some(previous), Some(current)) => previous.entry.x != current.entry.x,
                    _ => false,
                };
                self.last_entries = entries;
                moved.then_some(MarkerEvent::Moved)
            }
            (MarkerVisibility::Visible, None) => {
                self.visibility = MarkerVisibility::Hidden;
                self.last_entries.clear();
                Some(MarkerEvent::Hidden)
            }
            (MarkerVisibility::Hidden, None) => None,
        };

        if let Some(event) = event {
            debug!(?event, entries = self.last_entries.len(), "marker transition");
            if let Some(listener) = listener {
                match event {
                    MarkerEvent::Shown => listener.on_marker_shown(&self.last_entries),
                    MarkerEvent::Moved => listener.on_marker_moved(&self.last_entries),
                    MarkerEvent::Hidden => listener.on_marker_hidden(),
                }
            }
        }
        event
    }
}
