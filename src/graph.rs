use fnv::FnvHashMap;
use tracing::debug;

use crate::dijkstra::Selector;
use crate::error::GraphError;
use crate::vertex::{Position, Size, Vertex, VertexId, Weight, MAX_WEIGHT};

pub const DEFAULT_MAX_VERTICES: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GraphConfig {
    pub max_vertices: usize,
    pub selector: Selector,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_vertices: DEFAULT_MAX_VERTICES,
            selector: Selector::default(),
        }
    }
}

/// What the renderer needs to know about a single directed edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EdgeState {
    pub weight: Weight,
    pub highlighted: bool,
}

/// Where the graph is in its current shortest-path computation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    Initialized,
    Labeling,
    Done,
}

// Sparse directed edge table keyed by (from, to). Absence means no edge, so
// a zero weight is a real edge.
#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeMatrix {
    cells: FnvHashMap<(VertexId, VertexId), EdgeState>,
}

impl EdgeMatrix {
    pub(crate) fn weight(&self, from: VertexId, to: VertexId) -> Option<Weight> {
        self.cells.get(&(from, to)).map(|state| state.weight)
    }

    fn get(&self, from: VertexId, to: VertexId) -> Option<EdgeState> {
        self.cells.get(&(from, to)).copied()
    }

    fn set_weight(&mut self, from: VertexId, to: VertexId, weight: Weight) {
        self.cells.insert(
            (from, to),
            EdgeState {
                weight,
                highlighted: false,
            },
        );
    }

    pub(crate) fn highlight(&mut self, from: VertexId, to: VertexId) {
        if let Some(state) = self.cells.get_mut(&(from, to)) {
            state.highlighted = true;
        }
    }

    pub(crate) fn clear_highlights(&mut self) {
        for state in self.cells.values_mut() {
            state.highlighted = false;
        }
    }

    fn sorted(&self) -> Vec<(VertexId, VertexId, EdgeState)> {
        let mut edges: Vec<_> = self
            .cells
            .iter()
            .map(|(&(from, to), &state)| (from, to, state))
            .collect();
        edges.sort_unstable_by_key(|&(from, to, _)| (from, to));
        edges
    }
}

// Keeps every simple-path distance below `INFINITY` for any graph that fits
// in memory.
fn check_weight(weight: Weight) -> Result<(), GraphError> {
    if weight > MAX_WEIGHT {
        return Err(GraphError::WeightOutOfRange {
            weight,
            max: MAX_WEIGHT,
        });
    }
    Ok(())
}

/// A small weighted graph with a vertex limit, plus the per-run
/// bookkeeping of the shortest-path engine (see `dijkstra.rs`).
#[derive(Clone, Debug)]
pub struct Graph {
    config: GraphConfig,
    pub(crate) vertices: Vec<Vertex>,
    name_to_index: FnvHashMap<String, VertexId>,
    pub(crate) edges: EdgeMatrix,
    pub(crate) run_state: RunState,
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new(GraphConfig::default())
    }
}

impl Graph {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            vertices: Vec::new(),
            name_to_index: FnvHashMap::default(),
            edges: EdgeMatrix::default(),
            run_state: RunState::Idle,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.max_vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Appends a vertex and returns its index. A full graph or a taken name
    /// leaves the graph untouched.
    pub fn add_vertex(
        &mut self,
        name: impl Into<String>,
        position: Position,
    ) -> Result<VertexId, GraphError> {
        let name = name.into();
        if self.vertices.len() >= self.config.max_vertices {
            return Err(GraphError::VertexCapacityExceeded {
                max: self.config.max_vertices,
            });
        }
        if self.name_to_index.contains_key(&name) {
            return Err(GraphError::DuplicateVertexName(name));
        }

        let id = self.vertices.len();
        debug!(id, name = %name, "adding vertex");
        self.name_to_index.insert(name.clone(), id);
        self.vertices.push(Vertex::new(id, name, position));
        Ok(id)
    }

    /// Sets the weight of `from -> to`, overwriting any previous weight, and
    /// resets that edge to unhighlighted. Weights above `MAX_WEIGHT` are
    /// rejected.
    pub fn add_directed_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: Weight,
    ) -> Result<(), GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        check_weight(weight)?;
        self.edges.set_weight(from, to, weight);
        Ok(())
    }

    pub fn add_directed_edge_by_name(
        &mut self,
        from: &str,
        to: &str,
        weight: Weight,
    ) -> Result<(), GraphError> {
        let from = self.lookup(from)?;
        let to = self.lookup(to)?;
        self.add_directed_edge(from, to, weight)
    }

    /// Adds `a -> b` and `b -> a` with the same weight. Last write wins.
    pub fn add_undirected_edge(
        &mut self,
        a: VertexId,
        b: VertexId,
        weight: Weight,
    ) -> Result<(), GraphError> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        check_weight(weight)?;
        self.edges.set_weight(a, b, weight);
        self.edges.set_weight(b, a, weight);
        Ok(())
    }

    pub fn add_undirected_edge_by_name(
        &mut self,
        a: &str,
        b: &str,
        weight: Weight,
    ) -> Result<(), GraphError> {
        let a = self.lookup(a)?;
        let b = self.lookup(b)?;
        self.add_undirected_edge(a, b, weight)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn index_of(&self, name: &str) -> Option<VertexId> {
        self.name_to_index.get(name).copied()
    }

    pub fn vertex_by_name(&self, name: &str) -> Option<&Vertex> {
        self.index_of(name).map(|id| &self.vertices[id])
    }

    /// First vertex, in insertion order, whose marker contains `point`.
    pub fn vertex_at(&self, point: Position, marker: Size) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|vertex| vertex.contains(point, marker))
            .map(Vertex::id)
    }

    pub fn edge_state(&self, from: VertexId, to: VertexId) -> Option<EdgeState> {
        if from >= self.len() || to >= self.len() {
            return None;
        }
        self.edges.get(from, to)
    }

    /// All present edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, EdgeState)> + '_ {
        self.edges.sorted().into_iter()
    }

    /// Edges of the shortest-path tree found by the last run, as
    /// `(predecessor, vertex)` pairs.
    pub fn tree_edges(&self) -> Vec<(VertexId, VertexId)> {
        self.edges()
            .filter(|(_, _, state)| state.highlighted)
            .map(|(from, to, _)| (from, to))
            .collect()
    }

    /// Outgoing edges per vertex, for algorithms that want an adjacency list.
    pub fn adjacency_list(&self) -> Vec<Vec<(VertexId, Weight)>> {
        let mut adj = vec![Vec::new(); self.len()];
        for (from, to, state) in self.edges() {
            adj[from].push((to, state.weight));
        }
        adj
    }

    /// Drops every highlight and every settled/labeled flag so another source
    /// can be selected. Distances are kept until the next run resets them.
    pub fn clear_highlighting(&mut self) {
        self.edges.clear_highlights();
        for vertex in self.vertices.iter_mut() {
            vertex.label.finalized = false;
            vertex.label.labeled = false;
        }
        self.run_state = RunState::Idle;
    }

    pub(crate) fn check_vertex(&self, id: VertexId) -> Result<(), GraphError> {
        if id < self.vertices.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(id))
        }
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<VertexId, GraphError> {
        self.index_of(name)
            .ok_or_else(|| GraphError::UnknownVertexName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut graph = Graph::default();
        graph.add_vertex("a", Position::new(0.0, 0.0)).unwrap();
        graph.add_vertex("b", Position::new(100.0, 0.0)).unwrap();
        graph.add_vertex("c", Position::new(50.0, 80.0)).unwrap();
        graph
    }

    #[test]
    fn vertices_get_insertion_indices() {
        let graph = triangle();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.index_of("a"), Some(0));
        assert_eq!(graph.index_of("c"), Some(2));
        assert_eq!(graph.vertex_by_name("b").map(Vertex::id), Some(1));
        assert_eq!(graph.index_of("d"), None);
    }

    #[test]
    fn capacity_exceeded_leaves_graph_unchanged() {
        let mut graph = Graph::new(GraphConfig {
            max_vertices: 2,
            ..GraphConfig::default()
        });
        graph.add_vertex("a", Position::default()).unwrap();
        graph.add_vertex("b", Position::default()).unwrap();

        let result = graph.add_vertex("c", Position::default());
        assert_eq!(result, Err(GraphError::VertexCapacityExceeded { max: 2 }));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.index_of("c"), None);
    }

    #[test]
    fn huge_vertex_limit_allocates_lazily() {
        let mut graph = Graph::new(GraphConfig {
            max_vertices: usize::MAX,
            ..GraphConfig::default()
        });
        assert_eq!(graph.capacity(), usize::MAX);
        let a = graph.add_vertex("a", Position::default()).unwrap();
        let b = graph.add_vertex("b", Position::default()).unwrap();
        graph.add_undirected_edge(a, b, 7).unwrap();
        assert_eq!(graph.edges().count(), 2);

        graph.compute_shortest_paths(a).unwrap();
        assert_eq!(graph.vertex(b).unwrap().distance(), 7);
    }

    #[test]
    fn weight_above_limit_is_rejected() {
        let mut graph = triangle();
        assert_eq!(
            graph.add_directed_edge(0, 1, Weight::MAX),
            Err(GraphError::WeightOutOfRange {
                weight: Weight::MAX,
                max: MAX_WEIGHT
            })
        );
        assert_eq!(
            graph.add_undirected_edge(0, 1, MAX_WEIGHT + 1),
            Err(GraphError::WeightOutOfRange {
                weight: MAX_WEIGHT + 1,
                max: MAX_WEIGHT
            })
        );
        assert_eq!(graph.edges().count(), 0);

        graph.add_directed_edge(0, 1, MAX_WEIGHT).unwrap();
        graph.add_directed_edge(1, 2, MAX_WEIGHT).unwrap();
        graph.compute_shortest_paths(0).unwrap();
        let c = graph.vertex(2).unwrap();
        assert!(c.is_finalized());
        assert_eq!(c.distance(), 2 * MAX_WEIGHT);
        assert!(c.distance() < crate::vertex::INFINITY);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut graph = triangle();
        let result = graph.add_vertex("b", Position::default());
        assert_eq!(result, Err(GraphError::DuplicateVertexName(String::from("b"))));
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.index_of("b"), Some(1));
    }

    #[test]
    fn edges_by_unknown_name_or_index_fail() {
        let mut graph = triangle();
        assert_eq!(
            graph.add_directed_edge_by_name("a", "z", 3),
            Err(GraphError::UnknownVertexName(String::from("z")))
        );
        assert_eq!(
            graph.add_undirected_edge_by_name("y", "a", 3),
            Err(GraphError::UnknownVertexName(String::from("y")))
        );
        assert_eq!(graph.add_directed_edge(0, 7, 3), Err(GraphError::UnknownVertex(7)));
        assert_eq!(graph.add_undirected_edge(9, 0, 3), Err(GraphError::UnknownVertex(9)));
        assert_eq!(graph.edges().count(), 0);
    }

    #[test]
    fn undirected_edge_sets_both_directions_last_write_wins() {
        let mut graph = triangle();
        graph.add_undirected_edge_by_name("a", "b", 4).unwrap();
        graph.add_directed_edge(1, 0, 9).unwrap();

        assert_eq!(graph.edge_state(0, 1).map(|e| e.weight), Some(4));
        assert_eq!(graph.edge_state(1, 0).map(|e| e.weight), Some(9));
        assert_eq!(graph.edge_state(0, 2), None);

        graph.add_undirected_edge(0, 1, 6).unwrap();
        assert_eq!(graph.edge_state(0, 1).map(|e| e.weight), Some(6));
        assert_eq!(graph.edge_state(1, 0).map(|e| e.weight), Some(6));
    }

    #[test]
    fn zero_weight_edge_is_present() {
        let mut graph = triangle();
        graph.add_directed_edge(0, 2, 0).unwrap();
        assert_eq!(
            graph.edge_state(0, 2),
            Some(EdgeState {
                weight: 0,
                highlighted: false
            })
        );
        assert_eq!(graph.adjacency_list()[0], vec![(2, 0)]);
    }

    #[test]
    fn edge_state_outside_inserted_vertices_is_none() {
        let graph = triangle();
        assert_eq!(graph.edge_state(3, 0), None);
        assert_eq!(graph.edge_state(0, 42), None);
    }

    #[test]
    fn re_adding_an_edge_clears_its_highlight() {
        let mut graph = triangle();
        graph.add_directed_edge(0, 1, 2).unwrap();
        graph.edges.highlight(0, 1);
        assert_eq!(graph.tree_edges(), vec![(0, 1)]);

        graph.add_directed_edge(0, 1, 5).unwrap();
        assert!(graph.tree_edges().is_empty());
    }

    #[test]
    fn vertex_at_picks_first_match() {
        let mut graph = triangle();
        graph.add_vertex("a2", Position::new(5.0, 5.0)).unwrap();
        let marker = Size::new(20.0, 20.0);

        assert_eq!(graph.vertex_at(Position::new(4.0, 4.0), marker), Some(0));
        assert_eq!(graph.vertex_at(Position::new(14.0, 14.0), marker), Some(3));
        assert_eq!(graph.vertex_at(Position::new(55.0, 85.0), marker), Some(2));
        assert_eq!(graph.vertex_at(Position::new(300.0, 300.0), marker), None);
    }

    #[test]
    fn clear_highlighting_keeps_distances() {
        let mut graph = triangle();
        graph.add_directed_edge(0, 1, 2).unwrap();
        graph.vertices[1].label.distance = 2;
        graph.vertices[1].label.finalized = true;
        graph.vertices[1].label.labeled = true;
        graph.edges.highlight(0, 1);
        graph.run_state = RunState::Done;

        graph.clear_highlighting();
        assert_eq!(graph.vertices[1].distance(), 2);
        assert!(!graph.vertices[1].is_finalized());
        assert!(!graph.vertices[1].is_labeled());
        assert!(graph.tree_edges().is_empty());
        assert_eq!(graph.run_state(), RunState::Idle);
    }
}
