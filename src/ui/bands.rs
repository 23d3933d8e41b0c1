//! Painting pause bands, with a per-column memo keyed on [`BandLayer`].

use chrono::NaiveDate;
use egui::{Context, Id, Painter, Pos2, Rect, Rounding};

use crate::layout::{BandLayer, BandStyle};

/// Fill each column-local rect, translated so the column's top-left is `origin`.
pub fn paint_bands(painter: &Painter, origin: Pos2, rects: &[Rect], style: &BandStyle) {
    let rounding = Rounding::same(style.rounding);
    for rect in rects {
        painter.rect_filled(rect.translate(origin.to_vec2()), rounding, style.fill);
    }
}

/// Rects for `layer`, reusing the last projection for this column when its
/// inputs are structurally unchanged.
pub fn cached_rects(ctx: &Context, column: NaiveDate, layer: BandLayer) -> Vec<Rect> {
    let id = Id::new(("pause-bands", column));
    let cached = ctx.data(|data| data.get_temp::<(BandLayer, Vec<Rect>)>(id));
    if let Some((previous, rects)) = cached {
        if !layer.needs_repaint(&previous) {
            return rects;
        }
    }
    let rects = layer.rects();
    ctx.data_mut(|data| data.insert_temp(id, (layer, rects.clone())));
    rects
}
