use cartesian_rs::core::{
    Bounds, CartesianChartModel, CartesianLayerModel, ChartValues, DefaultVerticalAxisItemPlacer,
    HorizontalLayout, MeasureContext, VerticalAxisItemPlacer, VerticalAxisPosition,
    VerticalLabelPosition, VerticalPlacerConfig,
};
use cartesian_rs::error::ChartError;

const START: VerticalAxisPosition = VerticalAxisPosition::Start;

fn context(min_y: f64, max_y: f64) -> MeasureContext {
    let layer = CartesianLayerModel::from_y_values(&[min_y, max_y]).expect("layer");
    let values = ChartValues::from_model(&CartesianChartModel::new(vec![layer]));
    MeasureContext::new(Bounds::from_size(300.0, 200.0), values, HorizontalLayout::default())
}

#[test]
fn count_placer_never_exceeds_what_fits() {
    let context = context(0.0, 90.0);
    let placer = DefaultVerticalAxisItemPlacer::count(Some(10), true);
    // 100px with 30px labels: floor(100 / 30) + 1 = 4 labels.
    let labels = placer.label_values(&context, 100.0, 30.0, START);
    assert_eq!(labels.len(), 4);
    assert_eq!(labels.first(), Some(&0.0));
    assert_eq!(labels.last(), Some(&90.0));
}

#[test]
fn count_placer_without_count_uses_every_slot() {
    let context = context(0.0, 10.0);
    let placer = DefaultVerticalAxisItemPlacer::count(None, true);
    assert_eq!(placer.label_values(&context, 40.0, 10.0, START).len(), 5);
}

#[test]
fn step_placer_picks_a_round_step() {
    let context = context(0.0, 100.0);
    let placer = DefaultVerticalAxisItemPlacer::step(None, true).expect("placer");
    let labels = placer.label_values(&context, 200.0, 20.0, START);
    // Ten labels fit, 100 / 10 = 10 is already round.
    assert_eq!(labels, (0..=10).map(|i| f64::from(i) * 10.0).collect::<Vec<_>>());
}

#[test]
fn step_placer_rejects_non_positive_steps() {
    assert!(DefaultVerticalAxisItemPlacer::step(Some(0.0), true).is_err());
}

#[test]
fn flat_range_yields_a_single_label() {
    let context = context(5.0, 5.0);
    let placer = DefaultVerticalAxisItemPlacer::count(Some(5), true);
    assert_eq!(placer.label_values(&context, 100.0, 10.0, START), vec![5.0]);
}

#[test]
fn degenerate_heights_give_no_labels() {
    let context = context(0.0, 10.0);
    let placer = DefaultVerticalAxisItemPlacer::default();
    assert!(placer.label_values(&context, 0.0, 10.0, START).is_empty());
    assert!(placer.label_values(&context, 100.0, -1.0, START).is_empty());
}

#[test]
fn insets_follow_label_position() {
    let context = context(0.0, 10.0);
    let placer = DefaultVerticalAxisItemPlacer::count(Some(3), false);
    let top = |position| placer.top_axis_inset(&context, position, 12.0, 2.0);
    let bottom = |position| placer.bottom_axis_inset(&context, position, 12.0, 2.0);
    assert_eq!(top(VerticalLabelPosition::Top), 13.0);
    assert_eq!(bottom(VerticalLabelPosition::Top), 1.0);
    assert_eq!(top(VerticalLabelPosition::Center), 6.0);
    assert_eq!(bottom(VerticalLabelPosition::Bottom), 13.0);
}

#[test]
fn top_line_shift_adds_half_a_line_to_the_top_inset() {
    let context = context(0.0, 10.0);
    let shifted = DefaultVerticalAxisItemPlacer::count(Some(3), true);
    let inset = shifted.top_axis_inset(&context, VerticalLabelPosition::Bottom, 12.0, 2.0);
    assert_eq!(inset, 2.0);
}

#[test]
fn removed_default_mode_is_a_configuration_error() {
    let err = VerticalPlacerConfig::from_json(r#"{"mode":"default","shift_top_lines":true}"#)
        .expect_err("removed mode");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}
