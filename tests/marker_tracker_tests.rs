use cartesian_rs::core::{ChartEntry, Point};
use cartesian_rs::extensions::{EntryLocationMap, EntryModel};
use cartesian_rs::interaction::{
    MarkerEvent, MarkerTracker, MarkerVisibility, MarkerVisibilityChangeListener,
};
use cartesian_rs::render::Color;

#[derive(Debug, Default)]
struct RecordingListener {
    calls: Vec<String>,
}

impl MarkerVisibilityChangeListener for RecordingListener {
    fn on_marker_shown(&mut self, entries: &[EntryModel]) {
        self.calls.push(format!("shown:{}", entries.len()));
    }

    fn on_marker_moved(&mut self, entries: &[EntryModel]) {
        self.calls.push(format!("moved:{}", entries[0].entry.x));
    }

    fn on_marker_hidden(&mut self) {
        self.calls.push("hidden".to_owned());
    }
}

fn marked(x: f64) -> Option<Vec<EntryModel>> {
    Some(vec![EntryModel {
        layer_index: 0,
        entry: ChartEntry::new(x, 3.0),
        location: Point::new(10.0 * x, 20.0),
        color: Color::BLACK,
    }])
}

#[test]
fn listener_hears_each_transition_once() {
    let mut tracker = MarkerTracker::new();
    let mut listener = RecordingListener::default();
    let events = [marked(1.0), marked(1.0), None, None]
        .into_iter()
        .map(|entries| tracker.update(entries, Some(&mut listener)))
        .collect::<Vec<_>>();
    assert_eq!(
        events,
        vec![Some(MarkerEvent::Shown), None, Some(MarkerEvent::Hidden), None]
    );
    assert_eq!(listener.calls, vec!["shown:1", "hidden"]);
    assert_eq!(tracker.visibility(), MarkerVisibility::Hidden);
}

#[test]
fn moving_to_another_x_notifies_the_listener() {
    let mut tracker = MarkerTracker::new();
    let mut listener = RecordingListener::default();
    tracker.update(marked(1.0), Some(&mut listener));
    assert_eq!(
        tracker.update(marked(4.0), Some(&mut listener)),
        Some(MarkerEvent::Moved)
    );
    assert_eq!(listener.calls, vec!["shown:1", "moved:4"]);
    assert_eq!(tracker.entries()[0].entry.x, 4.0);
}

#[test]
fn events_are_reported_without_a_listener() {
    let mut tracker = MarkerTracker::new();
    assert_eq!(tracker.update(marked(2.0), None), Some(MarkerEvent::Shown));
    assert_eq!(tracker.update(None, None), Some(MarkerEvent::Hidden));
}

#[test]
fn closest_entries_pick_one_entry_per_layer() {
    let mut map = EntryLocationMap::new();
    for x in [0.0, 1.0, 2.0] {
        map.insert(0, ChartEntry::new(x, 1.0), Point::new(10.0 + 20.0 * x, 50.0), Color::BLACK);
        map.insert(2, ChartEntry::new(x, 2.0), Point::new(10.0 + 20.0 * x, 30.0), Color::BLACK);
    }
    let closest = map.closest_entries(Point::new(33.0, 0.0)).expect("entries");
    assert_eq!(closest.len(), 2);
    assert_eq!(
        closest.iter().map(|model| model.layer_index).collect::<Vec<_>>(),
        vec![0, 2]
    );
    assert!(closest.iter().all(|model| model.entry.x == 1.0));
    assert!(map.layer_entries(1).is_empty());
}

#[test]
fn equidistant_entries_resolve_to_the_first_recorded() {
    let mut map = EntryLocationMap::new();
    map.insert(0, ChartEntry::new(0.0, 1.0), Point::new(10.0, 0.0), Color::BLACK);
    map.insert(0, ChartEntry::new(1.0, 1.0), Point::new(30.0, 0.0), Color::BLACK);
    let closest = map.closest_entries(Point::new(20.0, 0.0)).expect("entries");
    assert_eq!(closest[0].entry.x, 0.0);
}

#[test]
fn empty_map_marks_nothing() {
    assert!(EntryLocationMap::new().closest_entries(Point::new(1.0, 1.0)).is_none());
}
