//! Candidate pair search.

use rstar::{AABB, RTree, RTreeObject};

use crate::OrientedBox;

/// How candidate pairs are found before the exact test.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BroadPhase {
    /// Every pair.  O(n²) but allocation-free; best below a few dozen agents.
    #[default]
    BruteForce,
    /// Bulk-loaded R-tree over axis-aligned bounds, rebuilt each tick.
    RTree,
}

/// R-tree entry: the AABB of box `index`.
struct BoundsEntry {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for BoundsEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl BroadPhase {
    /// Index pairs `(i, j)` with `i < j`, sorted ascending.
    pub fn candidate_pairs(self, boxes: &[OrientedBox]) -> Vec<(usize, usize)> {
        match self {
            BroadPhase::BruteForce => {
                let n = boxes.len();
                let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
                for i in 0..n {
                    for j in (i + 1)..n {
                        pairs.push((i, j));
                    }
                }
                pairs
            }
            BroadPhase::RTree => {
                let entries: Vec<BoundsEntry> = boxes
                    .iter()
                    .enumerate()
                    .map(|(index, b)| {
                        let (min, max) = b.aabb();
                        BoundsEntry { index, envelope: AABB::from_corners(min, max) }
                    })
                    .collect();
                let tree = RTree::bulk_load(entries);

                let mut pairs = Vec::new();
                for (i, b) in boxes.iter().enumerate() {
                    let (min, max) = b.aabb();
                    let query = AABB::from_corners(min, max);
                    pairs.extend(
                        tree.locate_in_envelope_intersecting(&query)
                            .map(|e| e.index)
                            .filter(|&j| j > i)
                            .map(|j| (i, j)),
                    );
                }
                pairs.sort_unstable();
                pairs
            }
        }
    }
}
