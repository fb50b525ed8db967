use std::fmt;

pub type VertexId = usize;
pub type Weight = u64;

/// Distance of a vertex that has not been reached in the current run.
pub const INFINITY: Weight = Weight::MAX;

/// Largest accepted edge weight. A simple path over fewer than 2^32 vertices
/// cannot add up to `INFINITY`.
pub const MAX_WEIGHT: Weight = u32::MAX as Weight;

/// Screen coordinate of a vertex. The shortest-path engine never reads it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of the on-screen marker drawn for a vertex, centered on its position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Per-run algorithm state of a vertex. Everything in here is thrown away at
/// the start of every computation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub(crate) distance: Weight,
    pub(crate) finalized: bool,
    pub(crate) labeled: bool,
    pub(crate) predecessor: Option<VertexId>,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            distance: INFINITY,
            finalized: false,
            labeled: false,
            predecessor: None,
        }
    }
}

impl Label {
    pub(crate) fn reset(&mut self) {
        *self = Label::default();
    }

    pub fn distance(&self) -> Weight {
        self.distance
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn is_labeled(&self) -> bool {
        self.labeled
    }

    pub fn predecessor(&self) -> Option<VertexId> {
        self.predecessor
    }
}

#[derive(Clone, Debug)]
pub struct Vertex {
    id: VertexId,
    name: String,
    position: Position,
    pub(crate) label: Label,
}

impl Vertex {
    pub(crate) fn new(id: VertexId, name: String, position: Position) -> Self {
        Self {
            id,
            name,
            position,
            label: Label::default(),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn distance(&self) -> Weight {
        self.label.distance
    }

    pub fn is_finalized(&self) -> bool {
        self.label.finalized
    }

    pub fn is_labeled(&self) -> bool {
        self.label.labeled
    }

    pub fn predecessor(&self) -> Option<VertexId> {
        self.label.predecessor
    }

    /// A vertex is reachable once the last run settled it.
    pub fn is_reachable(&self) -> bool {
        self.label.finalized
    }

    /// Inclusive hit test against the marker rectangle centered on the vertex.
    pub fn contains(&self, point: Position, marker: Size) -> bool {
        let left = self.position.x - marker.width / 2.0;
        let top = self.position.y - marker.height / 2.0;
        point.x >= left
            && point.x <= left + marker.width
            && point.y >= top
            && point.y <= top + marker.height
    }
}

// Vertices are compared by identity, never by their labels.
impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vertex {}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vertex_is_unreached() {
        let vertex = Vertex::new(3, String::from("Tower 3"), Position::new(600.0, 350.0));
        assert_eq!(vertex.id(), 3);
        assert_eq!(vertex.distance(), INFINITY);
        assert!(!vertex.is_finalized());
        assert!(!vertex.is_labeled());
        assert_eq!(vertex.predecessor(), None);
        assert_eq!(vertex.to_string(), "Tower 3");
    }

    #[test]
    fn equality_is_by_id() {
        let mut a = Vertex::new(1, String::from("a"), Position::new(0.0, 0.0));
        let b = Vertex::new(1, String::from("b"), Position::new(5.0, 5.0));
        a.label.distance = 7;
        assert_eq!(a, b);
        assert_ne!(a, Vertex::new(2, String::from("a"), Position::new(0.0, 0.0)));
    }

    #[test]
    fn label_reset_clears_everything() {
        let mut label = Label {
            distance: 4,
            finalized: true,
            labeled: true,
            predecessor: Some(0),
        };
        label.reset();
        assert_eq!(label, Label::default());
    }

    #[test]
    fn hit_test_is_inclusive() {
        let vertex = Vertex::new(0, String::from("a"), Position::new(50.0, 50.0));
        let marker = Size::new(20.0, 10.0);
        assert!(vertex.contains(Position::new(50.0, 50.0), marker));
        assert!(vertex.contains(Position::new(40.0, 45.0), marker));
        assert!(vertex.contains(Position::new(60.0, 55.0), marker));
        assert!(!vertex.contains(Position::new(60.5, 50.0), marker));
        assert!(!vertex.contains(Position::new(50.0, 44.0), marker));
    }
}
