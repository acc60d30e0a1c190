use cartesian_rs::core::{
    Bounds, CartesianChartModel, CartesianLayerModel, ChartValues,
    DefaultHorizontalAxisItemPlacer, HorizontalAxisItemPlacer, HorizontalLayout, MeasureContext,
};

fn context(count: usize, layout: HorizontalLayout) -> MeasureContext {
    let ys: Vec<f64> = (0..count).map(|i| i as f64).collect();
    let layer = CartesianLayerModel::from_y_values(&ys).expect("layer");
    let values = ChartValues::from_model(&CartesianChartModel::new(vec![layer]));
    MeasureContext::new(Bounds::from_size(300.0, 200.0), values, layout)
}

#[test]
fn labels_cover_visible_range_plus_one_value_each_side() {
    let context = context(4, HorizontalLayout::full_width());
    let placer = DefaultHorizontalAxisItemPlacer::default();
    let labels = placer.label_values(&context, &(0.0..=2.0), &(0.0..=3.0), 10.0);
    assert_eq!(labels, vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn labels_never_leave_the_full_range() {
    let context = context(20, HorizontalLayout::full_width());
    let placer = DefaultHorizontalAxisItemPlacer::default();
    let labels = placer.label_values(&context, &(5.0..=8.0), &(0.0..=19.0), 10.0);
    assert_eq!(labels, vec![4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
}

#[test]
fn no_label_space_means_no_labels() {
    let context = context(4, HorizontalLayout::full_width());
    let placer = DefaultHorizontalAxisItemPlacer::default();
    assert!(placer.label_values(&context, &(0.0..=3.0), &(0.0..=3.0), 0.0).is_empty());
}

#[test]
fn segmented_lines_keep_every_value_even_when_labels_are_thinned() {
    let context = context(6, HorizontalLayout::segmented(10.0));
    let placer = DefaultHorizontalAxisItemPlacer::new(2, 0, true, false).expect("placer");
    let labels = placer.label_values(&context, &(0.0..=5.0), &(0.0..=5.0), 10.0);
    let lines = placer
        .line_values(&context, &(0.0..=5.0), &(0.0..=5.0), 10.0)
        .expect("segmented lines");
    assert_eq!(labels, vec![0.0, 2.0, 4.0]);
    assert_eq!(lines, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn full_width_lines_default_to_the_labels() {
    let context = context(6, HorizontalLayout::full_width());
    let placer = DefaultHorizontalAxisItemPlacer::default();
    assert!(placer
        .line_values(&context, &(0.0..=5.0), &(0.0..=5.0), 10.0)
        .is_none());
}

#[test]
fn segmented_insets_leave_room_for_shifted_ticks() {
    let context = context(4, HorizontalLayout::segmented(10.0));
    let dims = context
        .horizontal_layout()
        .dimensions(context.chart_values(), 300.0);
    let shifted = DefaultHorizontalAxisItemPlacer::default();
    let centred = DefaultHorizontalAxisItemPlacer::new(1, 0, false, false).expect("placer");
    assert_eq!(shifted.start_axis_inset(&context, dims, 2.0, 10.0), 2.0);
    assert_eq!(centred.end_axis_inset(&context, dims, 2.0, 10.0), 1.0);
}

#[test]
fn extreme_labels_come_from_the_ends_of_long_series() {
    let context = context(10_000, HorizontalLayout::full_width());
    let placer = DefaultHorizontalAxisItemPlacer::new(1, 0, true, true).expect("placer");
    let dims = context
        .horizontal_layout()
        .dimensions(context.chart_values(), 300.0);

    assert_eq!(placer.first_label_value(&context, 10.0), Some(0.0));
    assert_eq!(placer.last_label_value(&context, 10.0), Some(9_999.0));
    assert_eq!(
        placer.width_measurement_label_values(&context, dims, &(0.0..=9_999.0)),
        vec![0.0, 5_000.0, 9_999.0]
    );
}

#[test]
fn labels_of_long_series_span_the_whole_window() {
    let context = context(10_000, HorizontalLayout::full_width());
    let placer = DefaultHorizontalAxisItemPlacer::default();
    let labels = placer.label_values(&context, &(0.0..=9_999.0), &(0.0..=9_999.0), 10.0);

    assert!(labels.len() <= 4_096);
    assert_eq!(labels.first().copied(), Some(0.0));
    assert_eq!(labels.last().copied(), Some(9_999.0));
}
