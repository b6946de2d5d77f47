//! The A* loop driving both solvers. Unlike a plain A*, successors are generated from
//! the node *and* its parent, which is what lets JPS prune by direction of travel.
//! Nodes live in an append-only arena and refer to their parent by index.
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::trace;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::Add;

use crate::solver::{FrontierOrdering, SearchStats};

struct SearchNode<N, C> {
    position: N,
    parent: Option<usize>,
    g: C,
}

struct SmallestKeyHolder<C> {
    key: C,
    sequence: usize,
    index: usize,
}

impl<C: PartialEq> Eq for SmallestKeyHolder<C> {}

impl<C: PartialEq> PartialEq for SmallestKeyHolder<C> {
    fn eq(&self, other: &Self) -> bool {
        self.key.eq(&other.key) && self.sequence == other.sequence
    }
}

impl<C: PartialOrd> PartialOrd for SmallestKeyHolder<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: PartialOrd> Ord for SmallestKeyHolder<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest key first; equal keys pop in insertion order
        match other.key.partial_cmp(&self.key).unwrap_or(Ordering::Equal) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Collects positions from the node at `terminal` back to the root, root excluded, in
/// root-to-terminal order.
fn reverse_path<N: Copy, C>(arena: &[SearchNode<N, C>], terminal: usize) -> Vec<N> {
    let mut path: Vec<N> = std::iter::successors(Some(terminal), |&i| arena[i].parent)
        .take_while(|&i| arena[i].parent.is_some())
        .map(|i| arena[i].position)
        .collect();
    path.reverse();
    path
}

/// Searches from `start` to `target`. Returns the path (start excluded, target
/// included) if the target was reached, together with the search counters.
///
/// A candidate reaching a closed position more cheaply reopens it; a candidate that is
/// not cheaper than the known open or closed node is dropped. Replaced open entries
/// stay in the heap and are skipped when popped.
pub(crate) fn astar_jps<N, C, FN, IN, FD, FH>(
    start: N,
    target: N,
    ordering: FrontierOrdering,
    mut successors: FN,
    mut distance: FD,
    mut heuristic: FH,
) -> (Option<Vec<N>>, SearchStats)
where
    N: Eq + Hash + Copy,
    C: Zero + PartialOrd + Copy + Add<Output = C>,
    FN: FnMut(Option<N>, &N) -> IN,
    IN: IntoIterator<Item = N>,
    FD: FnMut(&N, &N) -> C,
    FH: FnMut(&N) -> C,
{
    let mut stats = SearchStats::default();
    let mut arena: Vec<SearchNode<N, C>> = Vec::new();
    let mut to_see = BinaryHeap::new();
    let mut open: FxIndexMap<N, usize> = FxIndexMap::default();
    let mut closed: FxIndexMap<N, usize> = FxIndexMap::default();
    let mut sequence = 0;

    let root_key = match ordering {
        FrontierOrdering::Mixed => C::zero(),
        FrontierOrdering::StrictF => heuristic(&start),
    };
    arena.push(SearchNode {
        position: start,
        parent: None,
        g: C::zero(),
    });
    stats.generated += 1;
    open.insert(start, 0);
    to_see.push(SmallestKeyHolder {
        key: root_key,
        sequence,
        index: 0,
    });

    while let Some(SmallestKeyHolder { index, .. }) = to_see.pop() {
        let (position, g) = (arena[index].position, arena[index].g);
        // Entries replaced by a cheaper node for the same position are stale
        if open.get(&position) != Some(&index) {
            continue;
        }
        open.swap_remove(&position);
        if position == target {
            return (Some(reverse_path(&arena, index)), stats);
        }
        closed.insert(position, index);
        stats.expanded += 1;

        let parent = arena[index].parent.map(|p| arena[p].position);
        for successor in successors(parent, &position) {
            let new_g = g + distance(&position, &successor);
            if let Some(&c) = closed.get(&successor) {
                if arena[c].g <= new_g {
                    continue;
                }
                closed.swap_remove(&successor);
                stats.reopened += 1;
                trace!("Reopening closed node {}", c);
            }
            if let Some(&o) = open.get(&successor) {
                if arena[o].g <= new_g {
                    continue;
                }
                open.swap_remove(&successor);
            }
            let n = arena.len();
            let key = new_g + heuristic(&successor);
            arena.push(SearchNode {
                position: successor,
                parent: Some(index),
                g: new_g,
            });
            stats.generated += 1;
            open.insert(successor, n);
            sequence += 1;
            to_see.push(SmallestKeyHolder {
                key,
                sequence,
                index: n,
            });
        }
    }
    (None, stats)
}
