//! Multi-box algorithms: overlap tests, alignment, distribution,
//! duplication, overlap grouping, merging and grid snapping.
//!
//! Functions that operate on a selection take the full box slice plus the
//! selected indices. Indices outside the slice are ignored.

use serde::{Deserialize, Serialize};

use crate::model::{BoundingBox, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
    CenterHorizontal,
    CenterVertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributeAxis {
    Horizontal,
    Vertical,
}

/// True when the rectangles share positive area. Touching edges do not count.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

fn valid_indices(len: usize, selected: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(selected.len());
    for &i in selected {
        if i < len && !out.contains(&i) {
            out.push(i);
        }
    }
    out
}

/// Aligns the selected boxes to a common edge or center.
///
/// The target is the minimum left/top edge, the maximum right/bottom edge,
/// or the mean of the centers. A single box is left where it is.
pub fn align_boxes(boxes: &mut [BoundingBox], selected: &[usize], alignment: Alignment) {
    let indices = valid_indices(boxes.len(), selected);
    if indices.is_empty() {
        return;
    }

    let values = indices.iter().map(|&i| {
        let b = &boxes[i];
        match alignment {
            Alignment::Left => b.x,
            Alignment::Top => b.y,
            Alignment::Right => b.x + b.width,
            Alignment::Bottom => b.y + b.height,
            Alignment::CenterHorizontal => b.x + b.width / 2.0,
            Alignment::CenterVertical => b.y + b.height / 2.0,
        }
    });

    let target = match alignment {
        Alignment::Left | Alignment::Top => values.fold(f64::INFINITY, f64::min),
        Alignment::Right | Alignment::Bottom => values.fold(f64::NEG_INFINITY, f64::max),
        Alignment::CenterHorizontal | Alignment::CenterVertical => {
            values.sum::<f64>() / indices.len() as f64
        }
    };

    for &i in &indices {
        let b = &mut boxes[i];
        match alignment {
            Alignment::Left => b.x = target,
            Alignment::Top => b.y = target,
            Alignment::Right => b.x = target - b.width,
            Alignment::Bottom => b.y = target - b.height,
            Alignment::CenterHorizontal => b.x = target - b.width / 2.0,
            Alignment::CenterVertical => b.y = target - b.height / 2.0,
        }
    }
}

/// Spaces leading edges evenly between the first and last box along `axis`.
///
/// Needs at least three selected boxes; otherwise nothing changes. The
/// outermost boxes keep their positions.
pub fn distribute_boxes(boxes: &mut [BoundingBox], selected: &[usize], axis: DistributeAxis) {
    let mut indices = valid_indices(boxes.len(), selected);
    if indices.len() < 3 {
        return;
    }

    let leading = |b: &BoundingBox| match axis {
        DistributeAxis::Horizontal => b.x,
        DistributeAxis::Vertical => b.y,
    };

    indices.sort_by(|&a, &b| leading(&boxes[a]).total_cmp(&leading(&boxes[b])));

    let n = indices.len();
    let first = leading(&boxes[indices[0]]);
    let last = leading(&boxes[indices[n - 1]]);
    let spacing = (last - first) / (n - 1) as f64;

    for (step, &i) in indices.iter().enumerate().take(n - 1).skip(1) {
        let pos = first + spacing * step as f64;
        match axis {
            DistributeAxis::Horizontal => boxes[i].x = pos,
            DistributeAxis::Vertical => boxes[i].y = pos,
        }
    }
}

/// Copies of the selected boxes shifted by `(dx, dy)`, in selection order.
pub fn duplicate_boxes(
    boxes: &[BoundingBox],
    selected: &[usize],
    dx: f64,
    dy: f64,
) -> Vec<BoundingBox> {
    valid_indices(boxes.len(), selected)
        .into_iter()
        .map(|i| {
            let mut copy = boxes[i].clone();
            copy.x += dx;
            copy.y += dy;
            copy
        })
        .collect()
}

/// Partitions `rects` into connected components of the overlap relation.
///
/// Each group grows until no remaining rectangle overlaps any member, so
/// chains `a-b-c` end up together even when `a` and `c` are disjoint.
/// Groups are listed in order of their lowest index; members are sorted.
pub fn group_overlapping(rects: &[Rect]) -> Vec<Vec<usize>> {
    let n = rects.len();
    let mut assigned = vec![false; n];
    let mut groups = Vec::new();

    for seed in 0..n {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut group = vec![seed];

        loop {
            let mut grew = false;
            for candidate in 0..n {
                if assigned[candidate] {
                    continue;
                }
                if group
                    .iter()
                    .any(|&member| rects_overlap(&rects[member], &rects[candidate]))
                {
                    assigned[candidate] = true;
                    group.push(candidate);
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }

        group.sort_unstable();
        groups.push(group);
    }

    groups
}

/// Smallest rectangle enclosing every input, or `None` for no input.
pub fn merge_rects<'a, I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Rect>,
{
    let mut iter = rects.into_iter();
    let first = iter.next()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) =
        (first.x, first.y, first.right(), first.bottom());
    for r in iter {
        min_x = min_x.min(r.x);
        min_y = min_y.min(r.y);
        max_x = max_x.max(r.right());
        max_y = max_y.max(r.bottom());
    }
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Rounds `value` to the nearest multiple of `grid_size`. A non-positive
/// grid leaves the value unchanged.
pub fn snap(value: f64, grid_size: f64) -> f64 {
    if !(grid_size > 0.0) || !grid_size.is_finite() {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Snaps position and size independently.
pub fn snap_rect(rect: &Rect, grid_size: f64) -> Rect {
    Rect::new(
        snap(rect.x, grid_size),
        snap(rect.y, grid_size),
        snap(rect.width, grid_size),
        snap(rect.height, grid_size),
    )
}
