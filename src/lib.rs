//! Single-source shortest-path trees on a small weighted graph.
//!
//! A [`Graph`] holds up to a fixed number of vertices and a weight matrix.
//! [`Graph::compute_shortest_paths`] labels every vertex with its distance
//! from a source and highlights the edges of the shortest-path tree, so a
//! renderer can read them back through [`Graph::edges`] and
//! [`Graph::vertices`].

pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod reference;
pub mod scenario;
pub mod vertex;

pub use dijkstra::{RunSummary, Selector, ShortestPathRun};
pub use error::GraphError;
pub use graph::{EdgeState, Graph, GraphConfig, RunState, DEFAULT_MAX_VERTICES};
pub use vertex::{Label, Position, Size, Vertex, VertexId, Weight, INFINITY, MAX_WEIGHT};
