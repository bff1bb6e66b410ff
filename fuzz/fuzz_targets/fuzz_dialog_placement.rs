#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;
use spotlight_core::geometry::{Rect, Size};
use spotlight_overlay::renderer::compose;
use spotlight_overlay::{Alignment, HighlightShape, OverlayStyle, Position};

/// Bounded, finite coordinate from two bytes.
fn coord(u: &mut Unstructured<'_>, max: f32) -> f32 {
    let raw = u.arbitrary::<u16>().unwrap_or(0);
    f32::from(raw) / f32::from(u16::MAX) * max
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let viewport = Rect::from_size(coord(&mut u, 2000.0) + 1.0, coord(&mut u, 2000.0) + 1.0);
    let anchor = Rect::new(
        coord(&mut u, 2400.0) - 200.0,
        coord(&mut u, 2400.0) - 200.0,
        coord(&mut u, 800.0),
        coord(&mut u, 800.0),
    );
    let dialog = Size::new(coord(&mut u, 3000.0) + 1.0, coord(&mut u, 3000.0) + 1.0);

    let shape = if u.arbitrary::<bool>().unwrap_or(false) {
        HighlightShape::circular(coord(&mut u, 64.0))
    } else {
        HighlightShape::rectangular_padded(coord(&mut u, 64.0), coord(&mut u, 32.0))
    };
    let alignment = match u.int_in_range(0..=2u8).unwrap_or(1) {
        0 => Alignment::Start,
        1 => Alignment::CenterHorizontal,
        _ => Alignment::End,
    };
    let position = match u.int_in_range(0..=2u8).unwrap_or(0) {
        0 => Position::Auto,
        1 => Position::Top,
        _ => Position::Bottom,
    };
    let style = OverlayStyle::default()
        .shape(shape)
        .alignment(alignment)
        .position(position)
        .dialog_margin(coord(&mut u, 64.0));

    let (hole, placement) = compose(anchor, &style, dialog, viewport);

    // Post-conditions that must always hold:
    let rect = placement.rect;
    assert!(rect.is_well_formed(), "dialog rect not finite: {rect:?}");
    assert!(rect.x >= viewport.x - 1e-3, "dialog left of viewport");
    assert!(rect.y >= viewport.y - 1e-3, "dialog above viewport");
    assert!(rect.right() <= viewport.right() + 1e-2, "dialog right of viewport");
    assert!(rect.bottom() <= viewport.bottom() + 1e-2, "dialog below viewport");
    assert!(rect.width <= dialog.width && rect.height <= dialog.height, "dialog grew");
    assert!(hole.bounds().is_well_formed(), "hole not finite");
    if let HighlightShape::Rectangular { .. } = shape {
        assert!(hole.bounds().contains_rect(&anchor), "hole misses anchor");
    }
});
