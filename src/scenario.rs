use crate::error::GraphError;
use crate::graph::{Graph, GraphConfig};
use crate::vertex::{Position, Size, Weight};

/// Marker size of a tower on screen.
pub const TOWER_MARKER: Size = Size {
    width: 32.0,
    height: 32.0,
};

const TOWERS: [(f32, f32); 9] = [
    (50.0, 50.0),
    (300.0, 200.0),
    (400.0, 400.0),
    (600.0, 350.0),
    (500.0, 110.0),
    (100.0, 410.0),
    (700.0, 250.0),
    (250.0, 405.0),
    (700.0, 50.0),
];

const ROADS: [(usize, usize, Weight); 11] = [
    (1, 2, 13),
    (2, 3, 10),
    (6, 3, 15),
    (0, 5, 73),
    (2, 4, 54),
    (0, 6, 2),
    (1, 5, 12),
    (7, 2, 3),
    (7, 5, 5),
    (8, 4, 20),
    (8, 6, 19),
];

/// The nine towers ("Tower 0" .. "Tower 8") joined by two-way roads.
pub fn towers(config: GraphConfig) -> Result<Graph, GraphError> {
    let mut graph = Graph::new(config);
    for (i, &(x, y)) in TOWERS.iter().enumerate() {
        graph.add_vertex(format!("Tower {i}"), Position::new(x, y))?;
    }
    for &(a, b, weight) in ROADS.iter() {
        graph.add_undirected_edge(a, b, weight)?;
    }
    Ok(graph)
}
