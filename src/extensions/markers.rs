use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{ChartEntry, Point, ValueFormatter};
use crate::render::{
    ChartDrawContext, Color, LinePrimitive, PathPrimitive, RectPrimitive, TextHAlign,
    TextPrimitive, TextVAlign,
};

/// One marked entry: the entry of a layer nearest to the touch point.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryModel {
    pub layer_index: usize,
    pub entry: ChartEntry,
    /// Pixel location the entry was drawn at.
    pub location: Point,
    pub color: Color,
}

/// Pixel locations of every entry drawn in a frame, per layer.
#[derive(Debug, Clone, Default)]
pub struct EntryLocationMap {
    layers: Vec<Vec<EntryModel>>,
}

impl EntryLocationMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }

    pub fn insert(&mut self, layer_index: usize, entry: ChartEntry, location: Point, color: Color) {
        if self.layers.len() <= layer_index {
            self.layers.resize_with(layer_index + 1, Vec::new);
        }
        self.layers[layer_index].push(EntryModel {
            layer_index,
            entry,
            location,
            color,
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Vec::is_empty)
    }

    #[must_use]
    pub fn layer_entries(&self, layer_index: usize) -> &[EntryModel] {
        self.layers.get(layer_index).map_or(&[], Vec::as_slice)
    }

    /// Per layer, the entry horizontally closest to `touch`, in layer order.
    ///
    /// Ties go to the entry recorded first. Returns `None` when no layer
    /// recorded anything.
    #[must_use]
    pub fn closest_entries(&self, touch: Point) -> Option<Vec<EntryModel>> {
        let closest: Vec<EntryModel> = self
            .layers
            .iter()
            .filter_map(|entries| {
                entries
                    .iter()
                    .min_by_key(|model| OrderedFloat((model.location.x - touch.x).abs()))
                    .cloned()
            })
            .collect();
        (!closest.is_empty()).then_some(closest)
    }
}

/// Draws the highlight for marked entries.
pub trait Marker: fmt::Debug {
    fn draw(&self, context: &mut ChartDrawContext<'_>, entries: &[EntryModel]);
}

/// Vertical guideline at the marked x, a dot per entry and a value label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultMarker {
    pub guideline_color: Color,
    pub guideline_thickness: f64,
    pub indicator_size: f64,
    pub label_font_size_px: f64,
    pub label_color: Color,
    pub label_background: Color,
    pub label_padding: f64,
    pub formatter: ValueFormatter,
}

impl Default for DefaultMarker {
    fn default() -> Self {
        Self {
            guideline_color: Color::rgba(0.0, 0.0, 0.0, 0.4),
            guideline_thickness: 1.0,
            indicator_size: 8.0,
            label_font_size_px: 12.0,
            label_color: Color::rgb(1.0, 1.0, 1.0),
            label_background: Color::rgba(0.1, 0.1, 0.1, 0.85),
            label_padding: 4.0,
            formatter: ValueFormatter::default(),
        }
    }
}

impl DefaultMarker {
    fn label_text(&self, entries: &[EntryModel]) -> String {
        entries
            .iter()
            .map(|model| self.formatter.format(model.entry.y))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Marker for DefaultMarker {
    fn draw(&self, context: &mut ChartDrawContext<'_>, entries: &[EntryModel]) {
        let Some(first) = entries.first() else {
            return;
        };
        let bounds = context.chart_bounds();
        let x = first.location.x;

        if self.guideline_thickness > 0.0 {
            context.surface().draw_line(LinePrimitive::vertical(
                x,
                bounds.top,
                bounds.bottom,
                self.guideline_thickness,
                self.guideline_color,
            ));
        }

        let half = 0.5 * self.indicator_size;
        if half > 0.0 {
            for model in entries {
                let Point { x, y } = model.location;
                context.surface().draw_path(PathPrimitive::filled(
                    [
                        Point::new(x - half, y),
                        Point::new(x, y - half),
                        Point::new(x + half, y),
                        Point::new(x, y + half),
                    ],
                    model.color,
                ));
            }
        }

        let text = self.label_text(entries);
        if text.is_empty() || self.label_font_size_px <= 0.0 {
            return;
        }
        let size = context.measure().measure_text(&text, self.label_font_size_px);
        let width = size.width + 2.0 * self.label_padding;
        let height = size.height + 2.0 * self.label_padding;
        let left = (x - 0.5 * width)
            .min(bounds.right - width)
            .max(bounds.left);
        let top = bounds.top - height;
        context.surface().draw_rect(
            RectPrimitive::new(left, top, width, height, self.label_background)
                .with_corner_radius(self.label_padding),
        );
        context.surface().draw_text(
            TextPrimitive::new(
                text,
                left + 0.5 * width,
                top + 0.5 * height,
                self.label_font_size_px,
                self.label_color,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Center),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::EntryLocationMap;
    use crate::core::{ChartEntry, Point};
    use crate::render::Color;

    #[test]
    fn closest_entry_is_picked_per_layer_in_layer_order() {
        let mut map = EntryLocationMap::new();
        for (i, x) in [10.0, 20.0, 30.0].into_iter().enumerate() {
            map.insert(1, ChartEntry::new(i as f64, 1.0), Point::new(x, 5.0), Color::BLACK);
        }
        map.insert(0, ChartEntry::new(0.0, 2.0), Point::new(12.0, 5.0), Color::BLACK);

        let closest = map.closest_entries(Point::new(24.0, 0.0)).expect("entries");
        assert_eq!(closest.len(), 2);
        assert_eq!(closest[0].layer_index, 0);
        assert_eq!(closest[1].entry.x, 1.0);
    }

    #[test]
    fn ties_keep_the_first_recorded_entry() {
        let mut map = EntryLocationMap::new();
        map.insert(0, ChartEntry::new(0.0, 0.0), Point::new(10.0, 0.0), Color::BLACK);
        map.insert(0, ChartEntry::new(1.0, 0.0), Point::new(20.0, 0.0), Color::BLACK);
        let closest = map.closest_entries(Point::new(15.0, 0.0)).expect("entries");
        assert_eq!(closest[0].entry.x, 0.0);
    }

    #[test]
    fn empty_map_resolves_to_nothing() {
        assert!(EntryLocationMap::new().closest_entries(Point::new(0.0, 0.0)).is_none());
    }
}
