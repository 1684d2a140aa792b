//! Directional compatibility between overlapping patterns

use crate::spatial::tiles::Pattern;

/// Cardinal neighbour directions in image coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Offset (-1, 0)
    West,
    /// Offset (0, -1)
    North,
    /// Offset (1, 0)
    East,
    /// Offset (0, 1)
    South,
}

impl Direction {
    /// All directions in index order
    pub const ALL: [Self; 4] = [Self::West, Self::North, Self::East, Self::South];

    /// Dense index used for per-direction storage
    pub const fn index(self) -> usize {
        match self {
            Self::West => 0,
            Self::North => 1,
            Self::East => 2,
            Self::South => 3,
        }
    }

    /// Cell offset `(dx, dy)` of the neighbour in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::West => (-1, 0),
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
        }
    }

    /// The direction pointing back
    pub const fn opposite(self) -> Self {
        match self {
            Self::West => Self::East,
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
        }
    }
}

/// Per direction and pattern, the patterns allowed in the neighbouring cell
///
/// `compatible(d, p)` lists, in ascending ID order, every `q` that agrees with
/// `p` on their overlap when placed one cell away in direction `d`. Built once
/// per vocabulary, read-only afterwards. Size is O(T²) in the worst case.
#[derive(Debug, Clone)]
pub struct AdjacencyTable {
    compatible: [Vec<Vec<usize>>; 4],
}

impl AdjacencyTable {
    /// Compare every ordered pattern pair in every direction
    pub fn build(patterns: &[Pattern]) -> Self {
        let compatible: [Vec<Vec<usize>>; 4] = Direction::ALL.map(|direction| {
            let (dx, dy) = direction.offset();
            patterns
                .iter()
                .map(|pattern| {
                    patterns
                        .iter()
                        .enumerate()
                        .filter(|(_, candidate)| pattern.agrees(candidate, dx, dy))
                        .map(|(id, _)| id)
                        .collect()
                })
                .collect()
        });

        Self { compatible }
    }

    /// Number of patterns covered by the table
    pub fn pattern_count(&self) -> usize {
        self.compatible.first().map_or(0, Vec::len)
    }

    /// Patterns allowed next to `pattern` in `direction`
    pub fn compatible(&self, direction: Direction, pattern: usize) -> &[usize] {
        self.compatible
            .get(direction.index())
            .and_then(|lists| lists.get(pattern))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `candidate` may sit next to `pattern` in `direction`
    pub fn is_compatible(&self, direction: Direction, pattern: usize, candidate: usize) -> bool {
        self.compatible(direction, pattern)
            .binary_search(&candidate)
            .is_ok()
    }
}
