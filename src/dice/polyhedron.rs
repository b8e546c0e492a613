use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{Result, TopologyError};
use crate::math::Point3;

/// The polyhedra a die can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polyhedron {
    /// Regular icosahedron, twenty triangular faces (D20).
    Icosahedron,
    /// Cube, six square faces (D6).
    Cube,
}

impl Polyhedron {
    /// Number of numbered faces.
    #[must_use]
    pub fn face_count(self) -> u32 {
        match self {
            Self::Icosahedron => 20,
            Self::Cube => 6,
        }
    }

    /// Sum of the numbers on any two opposite faces.
    #[must_use]
    pub fn opposite_sum(self) -> u32 {
        self.face_count() + 1
    }

    /// Canonical vertices at nominal scale (edge length 2).
    #[must_use]
    pub fn vertices(self) -> Vec<Point3> {
        match self {
            Self::Icosahedron => icosahedron_vertices(),
            Self::Cube => cube_vertices(),
        }
    }

    /// The face table for this polyhedron.
    #[must_use]
    pub fn table(self) -> TopologyTable {
        match self {
            Self::Icosahedron => TopologyTable::icosahedron(),
            Self::Cube => TopologyTable::cube(),
        }
    }

    /// Circumradius of the nominal vertex set.
    #[must_use]
    pub fn nominal_radius(self) -> f64 {
        match self {
            Self::Icosahedron => 0.5 * (10.0 + 2.0 * 5.0_f64.sqrt()).sqrt(),
            Self::Cube => 3.0_f64.sqrt(),
        }
    }
}

/// The twelve icosahedron vertices `(0, ±1, ±φ)`, `(±1, ±φ, 0)`, `(±φ, 0, ±1)`.
///
/// Families come in that order; within a family the first sign varies
/// slowest. Index `i` and index `i ^ 3` are antipodal.
#[must_use]
pub fn icosahedron_vertices() -> Vec<Point3> {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let signs = [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)];

    let mut vertices = Vec::with_capacity(12);
    vertices.extend(signs.iter().map(|&(i, j)| Point3::new(0.0, i, j * phi)));
    vertices.extend(signs.iter().map(|&(i, j)| Point3::new(i, j * phi, 0.0)));
    vertices.extend(signs.iter().map(|&(i, j)| Point3::new(i * phi, 0.0, j)));
    vertices
}

/// The eight cube corners at `±1`: the `z = -1` ring counter-clockwise
/// about `+z` from `(-1, -1)`, then the `z = +1` ring in the same order.
#[must_use]
pub fn cube_vertices() -> Vec<Point3> {
    let ring = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    [-1.0, 1.0]
        .iter()
        .flat_map(|&z| ring.iter().map(move |&(x, y)| Point3::new(x, y, z)))
        .collect()
}

/// Face `n` is entry `n - 1`, counter-clockwise seen from outside.
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 8, 2],
    [1, 3, 9],
    [0, 10, 6],
    [3, 7, 5],
    [5, 8, 9],
    [10, 7, 11],
    [0, 4, 8],
    [6, 11, 1],
    [10, 2, 7],
    [4, 6, 1],
    [5, 7, 2],
    [4, 1, 9],
    [5, 2, 8],
    [11, 7, 3],
    [4, 9, 8],
    [6, 10, 11],
    [0, 6, 4],
    [3, 5, 9],
    [0, 2, 10],
    [11, 3, 1],
];

/// Face `n` is entry `n - 1`: `+z`, `-y`, `+x`, `-x`, `+y`, `-z`.
const CUBE_FACES: [[usize; 4]; 6] = [
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [0, 4, 7, 3],
    [3, 7, 6, 2],
    [0, 3, 2, 1],
];

/// Maps each numbered face to the vertex indices bounding it.
///
/// Entry `n - 1` is face number `n`. Faces `n` and `opposite_sum - n` must
/// be opposite each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyTable {
    faces: Vec<Vec<usize>>,
    opposite_sum: u32,
}

impl TopologyTable {
    /// Creates a table from explicit face entries.
    ///
    /// Nothing is checked until [`TopologyTable::validate`].
    #[must_use]
    pub fn new(faces: Vec<Vec<usize>>, opposite_sum: u32) -> Self {
        Self {
            faces,
            opposite_sum,
        }
    }

    /// The D20 table.
    #[must_use]
    pub fn icosahedron() -> Self {
        Self::new(
            ICOSAHEDRON_FACES.iter().map(|f| f.to_vec()).collect(),
            Polyhedron::Icosahedron.opposite_sum(),
        )
    }

    /// The D6 table.
    #[must_use]
    pub fn cube() -> Self {
        Self::new(
            CUBE_FACES.iter().map(|f| f.to_vec()).collect(),
            Polyhedron::Cube.opposite_sum(),
        )
    }

    /// Face entries in face-number order.
    #[must_use]
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Vertex indices of face `face_number` (1-based).
    #[must_use]
    pub fn face(&self, face_number: u32) -> Option<&[usize]> {
        let index = usize::try_from(face_number).ok()?.checked_sub(1)?;
        self.faces.get(index).map(Vec::as_slice)
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Sum of opposite face numbers.
    #[must_use]
    pub fn opposite_sum(&self) -> u32 {
        self.opposite_sum
    }

    /// The face combinatorially opposite `face_number`: the unique face
    /// farthest from it in the face adjacency graph.
    ///
    /// Returns `None` for an unknown face, a disconnected table, or a tie.
    #[must_use]
    pub fn opposite_face(&self, face_number: u32) -> Option<u32> {
        let start = usize::try_from(face_number).ok()?.checked_sub(1)?;
        if start >= self.faces.len() {
            return None;
        }

        let adjacency = self.face_adjacency();
        let mut distance = vec![usize::MAX; self.faces.len()];
        distance[start] = 0;
        let mut queue = VecDeque::from([start]);
        while let Some(face) = queue.pop_front() {
            for &next in &adjacency[face] {
                if distance[next] == usize::MAX {
                    distance[next] = distance[face] + 1;
                    queue.push_back(next);
                }
            }
        }

        if distance.contains(&usize::MAX) {
            return None;
        }
        let farthest = distance.iter().copied().max()?;
        let mut candidates = distance.iter().enumerate().filter(|&(_, &d)| d == farthest);
        let (index, _) = candidates.next()?;
        if candidates.next().is_some() {
            return None;
        }
        u32::try_from(index + 1).ok()
    }

    /// Faces sharing an edge with each face, by index.
    fn face_adjacency(&self) -> Vec<Vec<usize>> {
        let mut by_edge: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        for (index, face) in self.faces.iter().enumerate() {
            for (a, b) in directed_edges(face) {
                by_edge.entry((a.min(b), a.max(b))).or_default().push(index);
            }
        }

        let mut adjacency = vec![Vec::new(); self.faces.len()];
        for owners in by_edge.values() {
            for &f in owners {
                for &g in owners {
                    if f != g && !adjacency[f].contains(&g) {
                        adjacency[f].push(g);
                    }
                }
            }
        }
        adjacency
    }

    /// Checks the table against a vertex count.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidTopology`] for an entry with fewer than
    /// three vertices, a repeated or out-of-range index, or a numbering where
    /// faces `n` and `opposite_sum - n` are not opposite or share a vertex;
    /// and [`TopologyError::NonManifold`] if some directed edge is not used
    /// exactly once with its reverse used exactly once.
    pub fn validate(&self, vertex_count: usize) -> Result<()> {
        for (number, face) in (1..).zip(&self.faces) {
            if face.len() < 3 {
                return Err(TopologyError::InvalidTopology(format!(
                    "face {number} has {} vertices",
                    face.len()
                ))
                .into());
            }
            if let Some(&index) = face.iter().find(|&&i| i >= vertex_count) {
                return Err(TopologyError::InvalidTopology(format!(
                    "face {number} references vertex {index} of {vertex_count}"
                ))
                .into());
            }
            let distinct: HashSet<_> = face.iter().collect();
            if distinct.len() != face.len() {
                return Err(TopologyError::InvalidTopology(format!(
                    "face {number} repeats a vertex"
                ))
                .into());
            }
        }

        let mut directed: HashMap<(usize, usize), u32> = HashMap::new();
        for face in &self.faces {
            for edge in directed_edges(face) {
                *directed.entry(edge).or_default() += 1;
            }
        }
        for (&(a, b), &count) in &directed {
            let reverse = directed.get(&(b, a)).copied().unwrap_or(0);
            if count != 1 || reverse != 1 {
                return Err(TopologyError::NonManifold(format!(
                    "edge {a}->{b} used {count} times, reverse {reverse} times"
                ))
                .into());
            }
        }

        self.validate_numbering()
    }

    fn validate_numbering(&self) -> Result<()> {
        let count = u32::try_from(self.faces.len())
            .map_err(|_| TopologyError::InvalidTopology("too many faces".into()))?;
        for number in 1..=count {
            let expected = self.opposite_sum.checked_sub(number).filter(|n| (1..=count).contains(n));
            let (Some(expected), Some(opposite)) = (expected, self.opposite_face(number)) else {
                return Err(TopologyError::InvalidTopology(format!(
                    "face {number} has no opposite under sum {}",
                    self.opposite_sum
                ))
                .into());
            };
            if opposite != expected {
                return Err(TopologyError::InvalidTopology(format!(
                    "face {number} is opposite face {opposite}, expected {expected}"
                ))
                .into());
            }

            let (Some(face), Some(other)) = (self.face(number), self.face(opposite)) else {
                continue;
            };
            if face.iter().any(|v| other.contains(v)) {
                return Err(TopologyError::InvalidTopology(format!(
                    "opposite faces {number} and {opposite} share a vertex"
                ))
                .into());
            }
        }
        Ok(())
    }
}

fn directed_edges(face: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..face.len()).map(move |i| (face[i], face[(i + 1) % face.len()]))
}
