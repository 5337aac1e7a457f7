//! Path Sequencer
//!
//! Orders strokes with a greedy nearest-next heuristic to cut pen-up travel.
//!
//! The seed is the last stroke of the input. That choice is arbitrary and
//! the resulting first stroke should not be relied upon. Each following
//! stroke is the remaining one whose first point is nearest to the last
//! point of the stroke appended before it; equal distances go to the
//! stroke that came first in the input. Points inside a stroke are never
//! reordered.

use tracing::{debug, info};
use wallplotter_core::{PlanarPoint, PlotPack};

/// Reorder the strokes of `pack`. The output is a permutation of the input.
pub fn sequence<P: PlanarPoint>(pack: PlotPack<P>) -> PlotPack<P> {
    let before = travel_distance(&pack);
    let mut remaining = pack.into_paths();
    let Some(seed) = remaining.pop() else {
        return PlotPack::default();
    };

    info!(paths = remaining.len() + 1, "Sequencing paths");
    let mut ordered = Vec::with_capacity(remaining.len() + 1);
    ordered.push(seed);

    while !remaining.is_empty() {
        let tail = ordered[ordered.len() - 1].last();
        let (index, _) = remaining.iter().enumerate().fold(
            (0, f64::INFINITY),
            |(best, best_distance), (i, path)| {
                let d = tail.distance_to(&path.first());
                if d < best_distance {
                    (i, d)
                } else {
                    (best, best_distance)
                }
            },
        );
        ordered.push(remaining.remove(index));
        debug!(left = remaining.len(), "Sequencing paths");
    }

    let sequenced = PlotPack::new(ordered);
    info!(
        travel_before = before,
        travel_after = travel_distance(&sequenced),
        "Sequencing paths - done"
    );
    sequenced
}

/// Sum of pen-up distances between consecutive strokes.
pub fn travel_distance<P: PlanarPoint>(pack: &PlotPack<P>) -> f64 {
    pack.paths()
        .windows(2)
        .map(|w| w[0].last().distance_to(&w[1].first()))
        .sum()
}

/// Position of every stroke of `sequenced` in `original`, matched by content.
///
/// Returns `None` when `sequenced` is not a permutation of `original`.
pub fn permutation_of<P>(original: &PlotPack<P>, sequenced: &PlotPack<P>) -> Option<Vec<usize>>
where
    P: PlanarPoint + PartialEq,
{
    if original.len() != sequenced.len() {
        return None;
    }
    let mut used = vec![false; original.len()];
    let mut order = Vec::with_capacity(sequenced.len());
    for path in sequenced.iter() {
        let index = original
            .iter()
            .enumerate()
            .position(|(i, candidate)| !used[i] && candidate == path)?;
        used[index] = true;
        order.push(index);
    }
    Some(order)
}
