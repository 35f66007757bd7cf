//! Recursive binary splitting of the grid into panels.

use rand_chacha::rand_core::Rng;

use crate::config::DungeonConfig;

use super::layout::Rect;
use super::random::random_inclusive;

/// Splits the full grid until no panel is longer than twice the minimum size,
/// or until `capacity` panels exist.
pub(super) fn partition_panels<R: Rng>(
    config: &DungeonConfig,
    capacity: usize,
    rng: &mut R,
) -> Vec<Rect> {
    let mut panels = vec![Rect { x: 0, y: 0, width: config.width, height: config.height }];

    while let Some(index) = find_largest_panel(&panels, config.panel_size_min) {
        if panels.len() >= capacity {
            log::debug!("panel pool full at {capacity} panels; splitting stops");
            break;
        }
        let far_side =
            split_panel(&mut panels[index], config.panel_size_min, config.corridor_margin, rng);
        panels.push(far_side);
    }

    panels
}

/// Index of the panel with the single largest extent among those still longer
/// than twice the minimum size. Ties keep the lowest index.
fn find_largest_panel(panels: &[Rect], panel_size_min: usize) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (index, panel) in panels.iter().enumerate() {
        let extent = panel.longest_extent();
        if extent <= 2 * panel_size_min {
            continue;
        }
        if best.is_none_or(|(best_extent, _)| extent > best_extent) {
            best = Some((extent, index));
        }
    }
    best.map(|(_, index)| index)
}

/// Shrinks `panel` to the near side of a split along its longer axis and
/// returns the far side. The cut lies `panel_size_min + k * corridor_margin`
/// cells from the panel origin, so both halves keep at least `panel_size_min`.
fn split_panel<R: Rng>(
    panel: &mut Rect,
    panel_size_min: usize,
    corridor_margin: usize,
    rng: &mut R,
) -> Rect {
    let axis = panel.longer_axis();
    let extent = panel.extent(axis);
    let steps = (extent - 2 * panel_size_min) / corridor_margin;
    let near = panel_size_min + random_inclusive(rng, 0, steps) * corridor_margin;

    let mut far_side = *panel;
    far_side.set_span(axis, panel.origin(axis) + near, extent - near);
    panel.set_span(axis, panel.origin(axis), near);
    far_side
}
