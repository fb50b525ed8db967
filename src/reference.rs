use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::vertex::{VertexId, Weight};

#[derive(Copy, Clone, PartialEq, Eq)]
struct State {
    cost: Weight,
    node_id: VertexId,
}

// Min-heap by cost
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse ordering for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node_id.cmp(&self.node_id))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plain heap Dijkstra from `start` to all nodes, distance only. `None` when
/// unreachable. Used to cross-check the labeling engine.
pub fn dijkstra_all(adj: &[Vec<(VertexId, Weight)>], start: VertexId) -> Vec<Option<Weight>> {
    let n = adj.len();
    let mut dist: Vec<Option<Weight>> = vec![None; n];
    if start >= n {
        return dist;
    }
    let mut heap = BinaryHeap::new();

    dist[start] = Some(0);
    heap.push(State { cost: 0, node_id: start });

    while let Some(State { cost, node_id }) = heap.pop() {
        if dist[node_id].is_some_and(|best| cost > best) {
            continue;
        }
        for &(next, w) in &adj[node_id] {
            let next_cost = cost.saturating_add(w);
            if dist[next].map_or(true, |best| next_cost < best) {
                dist[next] = Some(next_cost);
                heap.push(State { cost: next_cost, node_id: next });
            }
        }
    }
    dist
}
