//! Breadth-first growth of seed regions through unknown territory.
//!
//! Every region cell is a source of one shared FIFO queue. Sources are enqueued in
//! row-major order and each dequeued cell inspects its four axis-aligned neighbours in
//! the fixed order right, down, left, up, so the outcome is fully reproducible:
//!
//! - an [`UNKNOWN`] neighbour that was never visited adopts the current cell's label
//!   and joins the queue;
//! - a neighbour that already carries a *different* region id is a collision, and the
//!   current cell (never the neighbour) becomes [`BOUNDARY`];
//! - background and boundary neighbours are left alone.
//!
//! Ties between fronts are resolved by queue order, which approximates but does not
//! equal an equidistant partition.

use std::collections::VecDeque;

use log::debug;

use crate::labels::{BOUNDARY, LabelBuffer, UNKNOWN, is_region};
use crate::markers::Segmentation;

/// Neighbour offsets in visiting order: right, down, left, up.
const NEIGHBOURS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Expands every region of `labels` into the [`UNKNOWN`] cells reachable from it.
///
/// Background cells are never entered or overwritten. Unknown pockets that no region
/// can reach keep the [`UNKNOWN`] label. A buffer without unknown cells passes through
/// unchanged, as does a second run over this function's own output.
///
/// The returned count is the number of distinct region ids still present; a region
/// whose cells all turned into boundary no longer counts.
pub fn grow_regions(mut labels: LabelBuffer) -> Segmentation {
    let (width, height) = labels.dimensions();
    let (w, h) = (i64::from(width), i64::from(height));
    let mut visited = vec![false; width as usize * height as usize];
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();

    for (x, y, label) in labels.iter() {
        if is_region(label) {
            visited[cell_index(x, y, width)] = true;
            queue.push_back((x, y));
        }
    }
    let seeds = queue.len();

    let mut grown = 0usize;
    let mut collisions = 0usize;
    while let Some((x, y)) = queue.pop_front() {
        let label = labels.get(x, y);
        for (dx, dy) in NEIGHBOURS {
            let (nx, ny) = (i64::from(x) + dx, i64::from(y) + dy);
            if nx < 0 || nx >= w || ny < 0 || ny >= h {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            let slot = cell_index(nx, ny, width);
            let neighbour = labels.get(nx, ny);

            if neighbour == UNKNOWN && !visited[slot] {
                labels.set(nx, ny, label);
                visited[slot] = true;
                queue.push_back((nx, ny));
                grown += 1;
            } else if is_region(neighbour)
                && neighbour != label
                && labels.get(x, y) != BOUNDARY
            {
                labels.set(x, y, BOUNDARY);
                collisions += 1;
            }
        }
    }

    let region_count = labels.region_count();
    debug!(
        "grow: {} seed cells, {} cells absorbed, {} boundary cells, {} unreached, {} regions",
        seeds,
        grown,
        collisions,
        labels.count(UNKNOWN),
        region_count
    );

    Segmentation {
        labels,
        region_count,
    }
}

/// Row-major offset of `(x, y)`, computed in `usize` so large buffers do not wrap.
fn cell_index(x: u32, y: u32, width: u32) -> usize {
    y as usize * width as usize + x as usize
}
