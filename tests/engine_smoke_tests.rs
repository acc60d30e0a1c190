use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use cartesian_rs::api::{AxesConfig, ColumnLayer, LineLayer};
use cartesian_rs::core::{
    Bounds, CartesianChartModel, CartesianLayerModel, HorizontalLayout, LayoutDirection, Point,
    Scroll,
};
use cartesian_rs::extensions::{EntryModel, HorizontalLine};
use cartesian_rs::interaction::{InitialScroll, MarkerEvent, MarkerVisibilityChangeListener};
use cartesian_rs::render::{Color, NullRenderer};
use cartesian_rs::{ChartEngine, ChartEngineConfig, ChartError};

#[derive(Debug, Clone, Default)]
struct SharedLog(Rc<RefCell<Vec<MarkerEvent>>>);

impl MarkerVisibilityChangeListener for SharedLog {
    fn on_marker_shown(&mut self, _entries: &[EntryModel]) {
        self.0.borrow_mut().push(MarkerEvent::Shown);
    }

    fn on_marker_moved(&mut self, _entries: &[EntryModel]) {
        self.0.borrow_mut().push(MarkerEvent::Moved);
    }

    fn on_marker_hidden(&mut self) {
        self.0.borrow_mut().push(MarkerEvent::Hidden);
    }
}

fn model(count: usize) -> CartesianChartModel {
    let ys = (0..count).map(|i| i as f64).collect::<Vec<_>>();
    CartesianChartModel::new(vec![CartesianLayerModel::from_y_values(&ys).expect("layer")])
}

fn bare_config() -> ChartEngineConfig {
    ChartEngineConfig::new(Bounds::from_size(200.0, 100.0))
        .with_axes(AxesConfig::none())
        .with_horizontal_layout(HorizontalLayout::segmented(20.0))
}

fn engine(config: ChartEngineConfig) -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine");
    engine.set_model(model(20));
    engine.add_layer(LineLayer::default());
    engine
}

#[test]
fn touch_shows_and_release_hides_the_marker() {
    let mut engine = engine(bare_config());
    let log = SharedLog::default();
    engine.set_marker_listener(Some(Box::new(log.clone())));

    let shown = engine.draw(Some(Point::new(71.0, 50.0))).expect("draw");
    assert_eq!(shown, Some(MarkerEvent::Shown));
    assert_eq!(engine.marker_tracker().entries()[0].entry.x, 3.0);

    let repeated = engine.draw(Some(Point::new(69.0, 10.0))).expect("draw");
    assert_eq!(repeated, None);

    let hidden = engine.draw(None).expect("draw");
    assert_eq!(hidden, Some(MarkerEvent::Hidden));
    assert_eq!(*log.0.borrow(), vec![MarkerEvent::Shown, MarkerEvent::Hidden]);
    assert_eq!(engine.renderer().frames_rendered, 3);
}

#[test]
fn layers_draw_inside_a_clip_and_the_marker_above_them() {
    let mut engine = engine(bare_config());
    let frame = engine.build_render_frame(Some(Point::new(10.0, 50.0)));
    frame.validate().expect("valid frame");
    assert_eq!(frame.paths().count(), 2);
    assert_eq!(frame.lines().count(), 1);
    assert_eq!(frame.texts().next().map(|text| text.text.as_str()), Some("0"));
}

#[test]
fn scroll_and_zoom_stay_inside_the_content() {
    let mut engine = engine(bare_config());
    assert_relative_eq!(engine.max_scroll_value(), 200.0);
    assert_relative_eq!(engine.scroll(Scroll::END), 200.0);
    assert_relative_eq!(engine.scroll(Scroll::END), 0.0);

    engine.zoom_by(2.0, 0.0);
    assert_relative_eq!(engine.zoom_value(), 2.0);
    assert_relative_eq!(engine.max_scroll_value(), 600.0);
    assert_relative_eq!(engine.scroll_value(), 400.0);

    engine.zoom_by(0.25, 0.0);
    assert_relative_eq!(engine.zoom_value(), 0.5);
    assert_relative_eq!(engine.max_scroll_value(), 0.0);
    assert_relative_eq!(engine.scroll_value(), 0.0);
}

#[test]
fn zoom_keeps_the_focal_entry_in_place_past_fixed_padding() {
    let layout = HorizontalLayout::Segmented {
        segment_width: 20.0,
        start_padding: 20.0,
        end_padding: 0.0,
    };
    let mut engine = engine(bare_config().with_horizontal_layout(layout));
    assert_relative_eq!(engine.max_scroll_value(), 220.0);

    // Entry 0 sits at 20px of padding plus half a segment.
    engine.zoom_by(2.0, 30.0);
    assert_relative_eq!(engine.scroll_value(), 10.0);

    engine.draw(Some(Point::new(30.0, 50.0))).expect("draw");
    let marked = &engine.marker_tracker().entries()[0];
    assert_eq!(marked.entry.x, 0.0);
    assert_relative_eq!(marked.location.x, 30.0);
}

#[test]
fn initial_end_scroll_waits_for_data() {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        bare_config().with_initial_scroll(InitialScroll::End),
    )
    .expect("engine");
    assert_relative_eq!(engine.scroll_value(), 0.0);
    engine.set_model(model(20));
    assert_relative_eq!(engine.scroll_value(), 200.0);
}

#[test]
fn right_to_left_scroll_values_are_negative() {
    let mut engine = engine(bare_config().with_layout_direction(LayoutDirection::RightToLeft));
    assert_relative_eq!(engine.max_scroll_value(), -200.0);
    assert_relative_eq!(engine.scroll(Scroll::END), -200.0);
    assert_relative_eq!(engine.scroll(Scroll::by_pixels(50.0)), 50.0);
}

#[test]
fn default_axes_reserve_space_and_draw_labels() {
    let config = ChartEngineConfig::new(Bounds::from_size(400.0, 300.0))
        .with_horizontal_layout(HorizontalLayout::segmented(20.0));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine");
    engine.set_model(model(20));
    engine.add_layer(ColumnLayer::default());
    engine.add_decoration(HorizontalLine::new(10.0, 1.0, Color::rgb(1.0, 0.0, 0.0)));

    let chart = engine.chart_bounds().expect("layout");
    assert!(chart.left > 0.0);
    assert!(chart.bottom < 300.0);
    assert!(chart.right <= 400.0);

    engine.draw(None).expect("draw");
    let renderer = engine.renderer();
    assert!(renderer.last_text_count > 0);
    let frame = renderer.last_frame.as_ref().expect("frame");
    assert!(frame.rects().count() > 0);
    assert!(frame.texts().any(|text| text.text == "10"));
}

#[test]
fn degenerate_bounds_record_nothing() {
    let mut engine = engine(bare_config());
    engine.measure(Bounds::from_size(0.0, 0.0));
    assert!(engine.chart_bounds().is_none());
    assert!(engine.build_render_frame(None).is_empty());
    assert_eq!(engine.draw(Some(Point::new(1.0, 1.0))).expect("draw"), None);
    assert_relative_eq!(engine.scroll(Scroll::END), 0.0);
    assert_eq!(engine.renderer().frames_rendered, 0);

    engine.measure(Bounds::from_size(200.0, 100.0));
    assert!(engine.chart_bounds().is_some());
}

#[test]
fn marker_hides_when_the_layout_goes_away() {
    let mut engine = engine(bare_config());
    let log = SharedLog::default();
    engine.set_marker_listener(Some(Box::new(log.clone())));

    let shown = engine.draw(Some(Point::new(30.0, 50.0))).expect("draw");
    assert_eq!(shown, Some(MarkerEvent::Shown));

    engine.measure(Bounds::from_size(0.0, 0.0));
    assert_eq!(engine.draw(None).expect("draw"), Some(MarkerEvent::Hidden));
    assert!(engine.marker_tracker().entries().is_empty());
    assert_eq!(*log.0.borrow(), vec![MarkerEvent::Shown, MarkerEvent::Hidden]);
}

#[test]
fn edge_touch_on_a_scrolled_chart_marks_an_entry_on_the_chart() {
    let mut engine = engine(bare_config());
    assert_relative_eq!(engine.scroll(Scroll::by_pixels(15.0)), 15.0);

    let event = engine.draw(Some(Point::new(2.0, 50.0))).expect("draw");
    assert_eq!(event, Some(MarkerEvent::Shown));

    let chart = engine.chart_bounds().expect("chart bounds");
    let marked = &engine.marker_tracker().entries()[0];
    assert_eq!(marked.entry.x, 1.0);
    assert!(marked.location.x >= chart.left);
    assert_relative_eq!(marked.location.x, 15.0);
}

#[test]
fn invalid_initial_bounds_are_rejected() {
    let result = ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Bounds::from_size(0.0, 100.0)),
    );
    assert!(matches!(result, Err(ChartError::InvalidViewport { .. })));
}
