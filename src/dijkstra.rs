use orx_priority_queue::*;
use tracing::{debug, instrument, trace};

use crate::error::GraphError;
use crate::graph::{Graph, RunState};
use crate::vertex::{VertexId, Weight};

/// How the next vertex to settle is picked. Both choose the minimum distance
/// among labeled, unsettled vertices and break ties towards the lowest index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Selector {
    /// Scan every vertex, first to last.
    #[default]
    LinearScan,
    /// Keep labeled vertices in a decrease-key heap keyed by (distance, index).
    Heap,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// `None` when the graph was empty.
    pub source: Option<VertexId>,
    /// Vertices in the order they were settled, source first.
    pub settled: Vec<VertexId>,
    pub relaxations: usize,
}

enum Frontier {
    Linear,
    Heap(BinaryHeapWithMap<VertexId, (Weight, VertexId)>),
}

impl Frontier {
    fn new(selector: Selector) -> Self {
        match selector {
            Selector::LinearScan => Frontier::Linear,
            Selector::Heap => Frontier::Heap(BinaryHeapWithMap::new()),
        }
    }
}

/// One shortest-path computation in progress. Every `step` labels the
/// neighbours of the last settled vertex and settles the next one.
///
/// The run holds the graph mutably, so no other run can start until it is
/// finished or dropped.
pub struct ShortestPathRun<'g> {
    graph: &'g mut Graph,
    current: Option<VertexId>,
    frontier: Frontier,
    summary: RunSummary,
}

impl<'g> ShortestPathRun<'g> {
    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    pub fn state(&self) -> RunState {
        self.graph.run_state
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Labels from the current vertex and settles the next one. Returns the
    /// newly settled vertex, or `None` once nothing is left to settle.
    pub fn step(&mut self) -> Option<VertexId> {
        let current = self.current?;
        self.label(current);

        match self.select() {
            Some(next) => {
                self.settle(next);
                self.current = Some(next);
                Some(next)
            }
            None => {
                self.current = None;
                self.graph.run_state = RunState::Done;
                let unreached = self
                    .graph
                    .vertices
                    .iter()
                    .filter(|vertex| !vertex.label.finalized)
                    .count();
                debug!(
                    settled = self.summary.settled.len(),
                    unreached,
                    relaxations = self.summary.relaxations,
                    "shortest-path run done"
                );
                None
            }
        }
    }

    pub fn finish(mut self) -> RunSummary {
        while self.step().is_some() {}
        self.summary
    }

    fn label(&mut self, current: VertexId) {
        let base = self.graph.vertices[current].label.distance;
        for v in 0..self.graph.vertices.len() {
            let Some(weight) = self.graph.edges.weight(current, v) else {
                continue;
            };
            let candidate = base.saturating_add(weight);
            let label = &mut self.graph.vertices[v].label;
            if label.finalized {
                continue;
            }
            // Strict improvement only: on a tie the first predecessor stays.
            if !label.labeled || candidate < label.distance {
                trace!(from = current, to = v, old = label.distance, new = candidate, "relax");
                label.distance = candidate;
                label.predecessor = Some(current);
                label.labeled = true;
                self.summary.relaxations += 1;
                if let Frontier::Heap(heap) = &mut self.frontier {
                    heap.decrease_key_or_push(&v, (candidate, v));
                }
            }
        }
    }

    fn select(&mut self) -> Option<VertexId> {
        match &mut self.frontier {
            Frontier::Linear => {
                let mut best: Option<(Weight, VertexId)> = None;
                for vertex in &self.graph.vertices {
                    let label = &vertex.label;
                    if !label.labeled || label.finalized {
                        continue;
                    }
                    if best.map_or(true, |(distance, _)| label.distance < distance) {
                        best = Some((label.distance, vertex.id()));
                    }
                }
                best.map(|(_, id)| id)
            }
            Frontier::Heap(heap) => heap.pop().map(|(id, _)| id),
        }
    }

    fn settle(&mut self, id: VertexId) {
        let label = &mut self.graph.vertices[id].label;
        label.finalized = true;
        let distance = label.distance;
        if let Some(predecessor) = label.predecessor {
            self.graph.edges.highlight(predecessor, id);
        }
        debug!(vertex = id, distance, "settled");
        self.summary.settled.push(id);
    }
}

impl Iterator for ShortestPathRun<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

impl Graph {
    /// Resets every label and highlight, seeds `source` and returns the run
    /// positioned right after seeding. On an empty graph the run is already
    /// done and `source` is not checked.
    pub fn begin_run(&mut self, source: VertexId) -> Result<ShortestPathRun<'_>, GraphError> {
        let frontier = Frontier::new(self.config().selector);
        if self.is_empty() {
            self.run_state = RunState::Done;
            return Ok(ShortestPathRun {
                graph: self,
                current: None,
                frontier,
                summary: RunSummary::default(),
            });
        }
        self.check_vertex(source)?;

        for vertex in self.vertices.iter_mut() {
            vertex.label.reset();
        }
        self.edges.clear_highlights();
        self.run_state = RunState::Initialized;

        let label = &mut self.vertices[source].label;
        label.distance = 0;
        label.finalized = true;
        label.labeled = true;
        self.run_state = RunState::Labeling;

        Ok(ShortestPathRun {
            graph: self,
            current: Some(source),
            frontier,
            summary: RunSummary {
                source: Some(source),
                settled: vec![source],
                relaxations: 0,
            },
        })
    }

    /// Labels every vertex reachable from `source` with its shortest distance
    /// and highlights the shortest-path tree. Vertices that cannot be reached
    /// stay unlabeled and unsettled.
    #[instrument(level = "debug", skip(self))]
    pub fn compute_shortest_paths(&mut self, source: VertexId) -> Result<RunSummary, GraphError> {
        Ok(self.begin_run(source)?.finish())
    }

    pub fn compute_shortest_paths_from(&mut self, name: &str) -> Result<RunSummary, GraphError> {
        let source = self.lookup(name)?;
        self.compute_shortest_paths(source)
    }

    /// Walks the predecessors of a settled vertex back to the source of the
    /// last run. Returns `None` for vertices the run did not settle.
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        let vertex = self.vertex(target)?;
        if !vertex.label.finalized {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some(predecessor) = self.vertices[current].label.predecessor {
            if path.len() > self.len() {
                return None;
            }
            path.push(predecessor);
            current = predecessor;
        }
        path.reverse();
        Some(path)
    }
}
