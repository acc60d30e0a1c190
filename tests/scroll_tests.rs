use cartesian_rs::core::{
    Bounds, CartesianChartModel, CartesianLayerModel, ChartValues, HorizontalLayout,
    LayoutDirection, MeasureContext, Scroll,
};
use cartesian_rs::interaction::{AutoScrollCondition, InitialScroll, ScrollState};

fn context(count: usize, layout: HorizontalLayout, direction: LayoutDirection) -> MeasureContext {
    let ys: Vec<f64> = (0..count).map(|i| i as f64).collect();
    let layer = CartesianLayerModel::from_y_values(&ys).expect("layer");
    let values = ChartValues::from_model(&CartesianChartModel::new(vec![layer]));
    MeasureContext::new(Bounds::from_size(100.0, 100.0), values, layout)
        .with_layout_direction(direction)
}

fn state_for(context: &MeasureContext, bounds: Bounds) -> ScrollState {
    let dims = context
        .horizontal_layout()
        .dimensions(context.chart_values(), bounds.width());
    let mut state = ScrollState::new(InitialScroll::Start, AutoScrollCondition::Never);
    state.update_max_value(context.max_scroll_distance(bounds.width(), dims));
    state
}

#[test]
fn scrolling_to_end_twice_is_idempotent() {
    let context = context(20, HorizontalLayout::segmented(20.0), LayoutDirection::LeftToRight);
    let bounds = Bounds::from_size(100.0, 100.0);
    let dims = context
        .horizontal_layout()
        .dimensions(context.chart_values(), 100.0);
    let mut state = state_for(&context, bounds);

    let first = state.scroll(Scroll::END, &context, dims, bounds);
    let second = state.scroll(Scroll::END, &context, dims, bounds);
    assert_eq!(state.value(), state.max_value());
    assert_eq!(state.max_value(), 300.0);
    assert_eq!(first, 300.0);
    assert_eq!(second, 0.0);
}

#[test]
fn short_segmented_content_cannot_scroll() {
    let context = context(4, HorizontalLayout::segmented(20.0), LayoutDirection::LeftToRight);
    let bounds = Bounds::from_size(100.0, 100.0);
    let dims = context
        .horizontal_layout()
        .dimensions(context.chart_values(), 100.0);
    assert_eq!(context.max_scroll_distance(100.0, dims), 0.0);

    let mut state = state_for(&context, bounds);
    assert_eq!(state.scroll(Scroll::by_pixels(50.0), &context, dims, bounds), 0.0);
    assert_eq!(state.value(), 0.0);
}

#[test]
fn right_to_left_scroll_values_are_negative() {
    let context = context(20, HorizontalLayout::segmented(20.0), LayoutDirection::RightToLeft);
    let bounds = Bounds::from_size(100.0, 100.0);
    let dims = context
        .horizontal_layout()
        .dimensions(context.chart_values(), 100.0);
    let mut state = state_for(&context, bounds);
    assert_eq!(state.max_value(), -300.0);

    state.scroll(Scroll::END, &context, dims, bounds);
    assert_eq!(state.value(), -300.0);
    // Positive pixel deltas move back towards the start.
    state.scroll(Scroll::by_pixels(500.0), &context, dims, bounds);
    assert_eq!(state.value(), 0.0);
}

#[test]
fn relative_scroll_is_clamped_and_reports_consumed_delta() {
    let context = context(20, HorizontalLayout::segmented(20.0), LayoutDirection::LeftToRight);
    let bounds = Bounds::from_size(100.0, 100.0);
    let dims = context
        .horizontal_layout()
        .dimensions(context.chart_values(), 100.0);
    let mut state = state_for(&context, bounds);

    assert_eq!(state.scroll(Scroll::by_x(3.0), &context, dims, bounds), 60.0);
    assert_eq!(state.scroll(Scroll::by_pixels(1_000.0), &context, dims, bounds), 240.0);
    assert_eq!(state.scroll(Scroll::to_pixels(-5.0), &context, dims, bounds), -300.0);
}

#[test]
fn scroll_requests_round_trip_through_json() {
    let scroll = Scroll::to_x(4.0, 0.5);
    let json = serde_json::to_string(&scroll).expect("json");
    let back: Scroll = serde_json::from_str(&json).expect("scroll");
    assert_eq!(back, scroll);
}
