use std::ops::RangeInclusive;

use crate::core::{
    Bounds, ChartValues, HorizontalDimensions, MeasureContext, Point, VerticalAxisPosition,
};
use crate::render::DrawingSurface;

/// Smallest zoom a draw pass accepts.
pub const MIN_ZOOM: f64 = 0.01;

/// Everything a rendering call needs for one frame.
///
/// Built fresh by the draw pass and dropped at its end. Components borrow it
/// rather than receiving the surface, bounds, dimensions, scroll and zoom as
/// separate arguments.
pub struct ChartDrawContext<'a> {
    surface: &'a mut dyn DrawingSurface,
    measure: &'a MeasureContext,
    chart_bounds: Bounds,
    base_dimensions: HorizontalDimensions,
    marker_touch_point: Option<Point>,
    horizontal_scroll: f64,
    zoom: f64,
}

impl<'a> ChartDrawContext<'a> {
    /// `dimensions` are unzoomed; the context scales them by its zoom.
    pub fn new(
        surface: &'a mut dyn DrawingSurface,
        measure: &'a MeasureContext,
        chart_bounds: Bounds,
        dimensions: HorizontalDimensions,
    ) -> Self {
        Self {
            surface,
            measure,
            chart_bounds,
            base_dimensions: dimensions,
            marker_touch_point: None,
            horizontal_scroll: 0.0,
            zoom: 1.0,
        }
    }

    #[must_use]
    pub fn with_scroll(mut self, horizontal_scroll: f64) -> Self {
        self.horizontal_scroll = if horizontal_scroll.is_finite() {
            horizontal_scroll
        } else {
            0.0
        };
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = if zoom.is_finite() {
            zoom.max(MIN_ZOOM)
        } else {
            1.0
        };
        self
    }

    #[must_use]
    pub fn with_marker_touch_point(mut self, point: Option<Point>) -> Self {
        self.marker_touch_point = point;
        self
    }

    pub fn surface(&mut self) -> &mut (dyn DrawingSurface + 'a) {
        &mut *self.surface
    }

    #[must_use]
    pub fn measure(&self) -> &'a MeasureContext {
        self.measure
    }

    #[must_use]
    pub fn chart_values(&self) -> &'a ChartValues {
        self.measure.chart_values()
    }

    #[must_use]
    pub fn chart_bounds(&self) -> Bounds {
        self.chart_bounds
    }

    /// Dimensions with the current zoom applied.
    #[must_use]
    pub fn horizontal_dimensions(&self) -> HorizontalDimensions {
        self.base_dimensions.scaled(self.zoom)
    }

    #[must_use]
    pub fn marker_touch_point(&self) -> Option<Point> {
        self.marker_touch_point
    }

    #[must_use]
    pub fn horizontal_scroll(&self) -> f64 {
        self.horizontal_scroll
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn max_scroll_distance(&self) -> f64 {
        self.measure
            .max_scroll_distance(self.chart_bounds.width(), self.horizontal_dimensions())
    }

    /// X range covered by the whole content, paddings included.
    #[must_use]
    pub fn full_x_range(&self) -> RangeInclusive<f64> {
        self.horizontal_dimensions().full_x_range(self.chart_values())
    }

    /// X range currently inside the chart bounds.
    #[must_use]
    pub fn visible_x_range(&self) -> RangeInclusive<f64> {
        let full = self.full_x_range();
        let values = self.chart_values();
        let dimensions = self.horizontal_dimensions();
        if dimensions.x_spacing <= 0.0 {
            return full;
        }
        let per_pixel = values.x_step() / dimensions.x_spacing;
        let start = full.start()
            + self.measure.layout_direction_multiplier() * self.horizontal_scroll * per_pixel;
        start..=(start + self.chart_bounds.width() * per_pixel)
    }

    /// Distance of `x` from the content's start edge, scroll applied.
    fn content_offset(&self, x: f64) -> f64 {
        let values = self.chart_values();
        let dimensions = self.horizontal_dimensions();
        dimensions.start_padding() + (x - values.min_x()) / values.x_step() * dimensions.x_spacing
            - self.measure.layout_direction_multiplier() * self.horizontal_scroll
    }

    #[must_use]
    pub fn x_to_pixel(&self, x: f64) -> f64 {
        let offset = self.content_offset(x);
        if self.measure.is_ltr() {
            self.chart_bounds.left + offset
        } else {
            self.chart_bounds.right - offset
        }
    }

    #[must_use]
    pub fn pixel_to_x(&self, pixel: f64) -> f64 {
        let values = self.chart_values();
        let dimensions = self.horizontal_dimensions();
        if dimensions.x_spacing <= 0.0 {
            return values.min_x();
        }
        let offset = if self.measure.is_ltr() {
            pixel - self.chart_bounds.left
        } else {
            self.chart_bounds.right - pixel
        };
        let unscrolled =
            offset + self.measure.layout_direction_multiplier() * self.horizontal_scroll;
        values.min_x()
            + (unscrolled - dimensions.start_padding()) / dimensions.x_spacing * values.x_step()
    }

    /// Pixel position where the content (start padding included) begins.
    #[must_use]
    pub fn content_start_pixel(&self) -> f64 {
        let padding = self.horizontal_dimensions().start_padding();
        self.x_to_pixel(self.chart_values().min_x()) - self.direction_offset(padding)
    }

    /// Pixel position where the content (end padding included) ends.
    #[must_use]
    pub fn content_end_pixel(&self) -> f64 {
        let padding = self.horizontal_dimensions().end_padding();
        self.x_to_pixel(self.chart_values().max_x()) + self.direction_offset(padding)
    }

    fn direction_offset(&self, distance: f64) -> f64 {
        self.measure.layout_direction_multiplier() * distance
    }

    /// Maps `y` into the chart bounds using the range of `position`'s group.
    ///
    /// A flat range maps every value to the vertical centre.
    #[must_use]
    pub fn y_to_pixel(&self, y: f64, position: Option<VerticalAxisPosition>) -> f64 {
        let range = self.chart_values().y_range(position);
        let bounds = self.chart_bounds;
        if range.length() <= 0.0 {
            return bounds.top + 0.5 * bounds.height();
        }
        bounds.bottom - (y - range.min_y) / range.length() * bounds.height()
    }

    /// Runs `block` with drawing redirected to `surface`.
    ///
    /// The context handed to `block` shares every measurement of this one; this
    /// context's own surface is never touched, so nothing needs restoring when
    /// `block` returns or unwinds.
    pub fn with_other_surface<'b, R>(
        &'b self,
        surface: &'b mut dyn DrawingSurface,
        block: impl FnOnce(&mut ChartDrawContext<'b>) -> R,
    ) -> R {
        let mut redirected = ChartDrawContext {
            surface,
            measure: self.measure,
            chart_bounds: self.chart_bounds,
            base_dimensions: self.base_dimensions,
            marker_touch_point: self.marker_touch_point,
            horizontal_scroll: self.horizontal_scroll,
            zoom: self.zoom,
        };
        block(&mut redirected)
    }
}

#[cfg(test)]
mod tests {
    use super::ChartDrawContext;
    use crate::core::{
        Bounds, CartesianChartModel, CartesianLayerModel, ChartValues, HorizontalLayout,
        LayoutDirection, MeasureContext,
    };
    use crate::render::{Color, DrawingSurface, LinePrimitive, RenderFrame};

    fn measure(direction: LayoutDirection) -> MeasureContext {
        let layer = CartesianLayerModel::from_y_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).expect("layer");
        let values = ChartValues::from_model(&CartesianChartModel::new(vec![layer]));
        MeasureContext::new(
            Bounds::from_size(100.0, 100.0),
            values,
            HorizontalLayout::segmented(20.0),
        )
        .with_layout_direction(direction)
    }

    #[test]
    fn pixel_mapping_round_trips_in_both_directions() {
        for direction in [LayoutDirection::LeftToRight, LayoutDirection::RightToLeft] {
            let measure = measure(direction);
            let dims = measure
                .horizontal_layout()
                .dimensions(measure.chart_values(), 100.0);
            let mut frame = RenderFrame::new(Bounds::from_size(100.0, 100.0));
            let scroll = 15.0 * direction.multiplier();
            let bounds = Bounds::from_size(100.0, 100.0);
            let context = ChartDrawContext::new(&mut frame, &measure, bounds, dims)
                .with_scroll(scroll)
                .with_zoom(1.5);
            let px = context.x_to_pixel(3.0);
            assert!((context.pixel_to_x(px) - 3.0).abs() <= 1e-9);
        }
    }

    #[test]
    fn redirected_drawing_leaves_original_surface_untouched() {
        let measure = measure(LayoutDirection::LeftToRight);
        let dims = measure
            .horizontal_layout()
            .dimensions(measure.chart_values(), 100.0);
        let bounds = Bounds::from_size(100.0, 100.0);
        let mut frame = RenderFrame::new(bounds);
        let mut layer = RenderFrame::new(bounds);
        {
            let mut context = ChartDrawContext::new(&mut frame, &measure, bounds, dims);
            context.with_other_surface(&mut layer, |redirected| {
                redirected
                    .surface()
                    .draw_line(LinePrimitive::horizontal(5.0, 0.0, 10.0, 1.0, Color::BLACK));
            });
            context
                .surface()
                .draw_line(LinePrimitive::horizontal(9.0, 0.0, 10.0, 1.0, Color::BLACK));
        }
        assert_eq!(layer.lines().count(), 1);
        assert_eq!(frame.lines().map(|line| line.y1).collect::<Vec<_>>(), vec![9.0]);
    }
}
