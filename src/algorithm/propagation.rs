use crate::algorithm::wave::WaveState;
use crate::spatial::adjacency::{AdjacencyTable, Direction};
use crate::spatial::grid::OutputGrid;

/// Drain the wave's ban stack until every reachable cell is arc consistent
///
/// For each popped `(cell, pattern)` ban, every pattern that was compatible
/// with it in some direction loses one support in the neighbouring cell;
/// patterns left without support are banned in turn, which pushes more work.
/// Iterative, so cascade depth never touches the call stack. Cost is bounded
/// by total bans × average adjacency fan-out.
pub fn propagate(wave: &mut WaveState, adjacency: &AdjacencyTable, grid: &OutputGrid) {
    while let Some((cell, pattern)) = wave.pop_pending() {
        for direction in Direction::ALL {
            let Some(neighbor) = grid.neighbor(cell, direction) else {
                continue;
            };

            for &candidate in adjacency.compatible(direction, pattern) {
                if wave.weaken_support(neighbor, candidate, direction) {
                    wave.ban(neighbor, candidate);
                }
            }
        }
    }
}

/// A live pattern with no compatible live pattern next to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedPattern {
    /// Cell holding the pattern
    pub cell: usize,
    /// The unsupported pattern
    pub pattern: usize,
    /// Direction of the neighbour that offers no support
    pub direction: Direction,
}

/// Find the first violation of arc consistency, if any
///
/// Checks every live pattern of every observable cell against each
/// neighbour that propagation can reach. Returns `None` after every
/// [`propagate`] on a wave whose initially unsupported patterns were banned
/// with [`WaveState::ban_unsupported`].
pub fn find_unsupported(
    wave: &WaveState,
    adjacency: &AdjacencyTable,
    grid: &OutputGrid,
) -> Option<UnsupportedPattern> {
    for cell in 0..wave.cell_count() {
        if grid.is_boundary_cell(cell) {
            continue;
        }
        let Some(bits) = wave.possibilities(cell) else {
            continue;
        };

        for pattern in bits.iter() {
            for direction in Direction::ALL {
                let Some(neighbor) = grid.neighbor(cell, direction) else {
                    continue;
                };

                let supported = adjacency
                    .compatible(direction, pattern)
                    .iter()
                    .any(|&candidate| wave.is_possible(neighbor, candidate));

                if !supported {
                    return Some(UnsupportedPattern {
                        cell,
                        pattern,
                        direction,
                    });
                }
            }
        }
    }

    None
}
