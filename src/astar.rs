//! The A* search loop. The open set is a [BinaryHeap] of frontier entries that
//! point into an insertion-ordered arena of [SearchNode]s keyed by node, which doubles as
//! the "best known cost" lookup. Predecessors are arena indices, so reconstructing the
//! path never chases shared pointers.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, trace};
use num_traits::Zero;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Marks the start node, which has no predecessor.
const NO_PARENT: usize = usize::MAX;

/// Per-node search state. The node itself is the arena key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode<C> {
    /// Arena index of the predecessor, [usize::MAX] for the start node.
    pub parent: usize,
    pub g: C,
    pub h: C,
}

impl<C: Zero + Copy> SearchNode<C> {
    pub fn f(&self) -> C {
        self.g + self.h
    }
    pub fn parent(&self) -> Option<usize> {
        (self.parent != NO_PARENT).then_some(self.parent)
    }
}

/// Open set entry. Several entries may refer to the same arena slot; the ones carrying a
/// cost above the slot's best cost are stale and get discarded on extraction.
struct FrontierEntry<N, C> {
    estimated_cost: C,
    cost: C,
    node: N,
    index: usize,
}

impl<N: Ord, C: Ord> Eq for FrontierEntry<N, C> {}

impl<N: Ord, C: Ord> PartialEq for FrontierEntry<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: Ord, C: Ord> PartialOrd for FrontierEntry<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Ord, C: Ord> Ord for FrontierEntry<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest element: smallest estimate first, then the largest
        // cost so far (smallest remaining estimate), then the smallest node.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Terminal state of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome<N, C> {
    /// The goal was extracted from the open set; path runs start to goal inclusive.
    Found { path: Vec<N>, cost: C },
    /// The open set ran dry without reaching the goal.
    Exhausted,
    /// The expansion limit was hit before either of the other outcomes.
    Aborted { expansions: usize },
}

impl<N, C> SearchOutcome<N, C> {
    pub fn into_path(self) -> Option<Vec<N>> {
        match self {
            SearchOutcome::Found { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Open set, closed set and node arena of a single search call.
pub struct SearchContext<N, C> {
    to_see: BinaryHeap<FrontierEntry<N, C>>,
    parents: FxIndexMap<N, SearchNode<C>>,
    visited: FxHashSet<usize>,
    expansions: usize,
}

impl<N, C> Default for SearchContext<N, C>
where
    N: Eq + Hash + Ord + Clone,
    C: Zero + Ord + Copy,
{
    fn default() -> Self {
        SearchContext::new()
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Ord + Clone,
    C: Zero + Ord + Copy,
{
    pub fn new() -> Self {
        SearchContext {
            to_see: BinaryHeap::new(),
            parents: FxIndexMap::default(),
            visited: FxHashSet::default(),
            expansions: 0,
        }
    }

    /// Seeds the search with the start node at cost zero.
    pub fn push_start(&mut self, start: N, h: C) {
        let (index, _) = self.parents.insert_full(
            start.clone(),
            SearchNode {
                parent: NO_PARENT,
                g: Zero::zero(),
                h,
            },
        );
        self.to_see.push(FrontierEntry {
            estimated_cost: h,
            cost: Zero::zero(),
            node: start,
            index,
        });
    }

    /// Pops the best open entry that is still authoritative, marking it visited. Entries
    /// for already visited nodes and entries whose cost was since improved are dropped.
    pub fn pop(&mut self) -> Option<(usize, C)> {
        while let Some(FrontierEntry { cost, index, .. }) = self.to_see.pop() {
            if self.visited.contains(&index) {
                continue;
            }
            match self.parents.get_index(index) {
                Some((_, node)) if cost > node.g => continue,
                Some(_) => {
                    self.visited.insert(index);
                    return Some((index, cost));
                }
                None => continue,
            }
        }
        None
    }

    /// Offers `successor` at cost `g` via the node at `parent`. Returns true if this is a
    /// strict improvement, in which case it was recorded and pushed on the open set.
    pub fn relax<FH>(&mut self, successor: N, parent: usize, g: C, heuristic: &mut FH) -> bool
    where
        FH: FnMut(&N) -> C,
    {
        let (index, h, node) = match self.parents.entry(successor) {
            Vacant(e) => {
                let node = e.key().clone();
                let h = heuristic(&node);
                let index = e.index();
                e.insert(SearchNode { parent, g, h });
                (index, h, node)
            }
            Occupied(mut e) => {
                if self.visited.contains(&e.index()) || e.get().g <= g {
                    return false;
                }
                let h = e.get().h;
                let node = e.key().clone();
                let index = e.index();
                e.insert(SearchNode { parent, g, h });
                (index, h, node)
            }
        };
        self.to_see.push(FrontierEntry {
            estimated_cost: g + h,
            cost: g,
            node,
            index,
        });
        true
    }

    /// Best known cost for `node`, whether it is still open or already visited.
    pub fn best_cost(&self, node: &N) -> Option<C> {
        self.parents.get(node).map(|n| n.g)
    }

    pub fn is_visited(&self, node: &N) -> bool {
        self.parents
            .get_index_of(node)
            .is_some_and(|ix| self.visited.contains(&ix))
    }

    pub fn node(&self, index: usize) -> Option<(&N, &SearchNode<C>)> {
        self.parents.get_index(index)
    }

    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Number of distinct nodes that were ever discovered.
    pub fn discovered(&self) -> usize {
        self.parents.len()
    }

    /// Walks predecessor links from `index` back to the start and returns the nodes in
    /// start-to-`index` order.
    pub fn reverse_path(&self, index: usize) -> Vec<N> {
        let mut path: Vec<N> = std::iter::successors(Some(index), |&i| {
            self.parents.get_index(i).and_then(|(_, n)| n.parent())
        })
        .filter_map(|i| self.parents.get_index(i).map(|(node, _)| node.clone()))
        .collect();
        path.reverse();
        path
    }
}

/// Runs A* from `start` until a node satisfying `success` is extracted. `successors` yields
/// the reachable neighbours of a node with their move costs and `heuristic` must never
/// overestimate the remaining cost for the returned path to be optimal.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    max_expansions: Option<usize>,
) -> SearchOutcome<N, C>
where
    N: Eq + Hash + Ord + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut ct = SearchContext::new();
    let h = heuristic(start);
    ct.push_start(start.clone(), h);
    while let Some((index, cost)) = ct.pop() {
        let current = match ct.node(index) {
            Some((node, _)) => node.clone(),
            None => continue,
        };
        if success(&current) {
            let path = ct.reverse_path(index);
            debug!(
                "Goal reached after {} expansions, {} nodes discovered",
                ct.expansions(),
                ct.discovered()
            );
            return SearchOutcome::Found { path, cost };
        }
        if max_expansions.is_some_and(|limit| ct.expansions >= limit) {
            debug!("Expansion limit of {} reached", ct.expansions);
            return SearchOutcome::Aborted {
                expansions: ct.expansions,
            };
        }
        ct.expansions += 1;
        for (successor, move_cost) in successors(&current) {
            if ct.relax(successor, index, cost + move_cost, &mut heuristic) {
                trace!("Relaxed successor of node {}", index);
            }
        }
    }
    debug!(
        "Open set exhausted after {} expansions, {} nodes discovered",
        ct.expansions(),
        ct.discovered()
    );
    SearchOutcome::Exhausted
}
