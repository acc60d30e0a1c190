use cartesian_rs::core::{CartesianChartModel, CartesianLayerModel, ChartEntry, ChartValues};
use proptest::collection::vec;
use proptest::prelude::*;

fn entries() -> impl Strategy<Value = Vec<ChartEntry>> {
    vec((-500i32..500, -1e6f64..1e6), 1..40).prop_map(|samples| {
        samples
            .into_iter()
            .map(|(x, y)| ChartEntry::new(f64::from(x), y))
            .collect()
    })
}

proptest! {
    #[test]
    fn values_bound_every_entry(series in vec(entries(), 1..4)) {
        let layer = CartesianLayerModel::new(series).expect("finite samples");
        let model = CartesianChartModel::new(vec![layer]);
        let values = ChartValues::from_model(&model);
        let range = values.y_range(None);

        prop_assert!(values.x_step() > 0.0 && values.x_step().is_finite());
        prop_assert!(values.min_x() <= values.max_x());
        prop_assert!(range.min_y <= range.max_y);
        for entry in model.layers()[0].entries() {
            prop_assert!(entry.x >= values.min_x() && entry.x <= values.max_x());
            prop_assert!(range.contains(entry.y));
        }
    }

    #[test]
    fn x_step_never_exceeds_the_gap_between_neighbours(series in vec(entries(), 1..4)) {
        let layer = CartesianLayerModel::new(series).expect("finite samples");
        let model = CartesianChartModel::new(vec![layer]);
        let values = ChartValues::from_model(&model);

        for series in model.layers()[0].series() {
            prop_assert!(series.windows(2).all(|pair| pair[0].x < pair[1].x));
            for pair in series.windows(2) {
                prop_assert!(values.x_step() <= pair[1].x - pair[0].x);
            }
        }
    }
}
