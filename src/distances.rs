use super::board::Cell;

/// Shortest step counts between every pair of mutually reachable floor cells.
///
/// Rows and columns are cell indices in row-major order. Wall cells own an
/// empty row and are never recorded as a target, so a missing entry always
/// means "no path".
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    rows: Vec<Vec<Option<u32>>>,
}

impl DistanceTable {
    pub fn compute(cells: &[Cell]) -> Self {
        let rows = cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                if cell.is_floor() {
                    single_source(cells, index)
                } else {
                    Vec::new()
                }
            })
            .collect();

        DistanceTable { rows }
    }

    pub fn get(&self, from: usize, to: usize) -> Option<u32> {
        self.rows.get(from)?.get(to).copied().flatten()
    }

    pub fn reachable_from(&self, from: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.rows
            .get(from)
            .into_iter()
            .flat_map(|row| row.iter().enumerate())
            .filter_map(|(to, distance)| distance.map(|d| (to, d)))
    }
}

// Frontier-by-frontier BFS: the first round that reaches a cell records its
// shortest distance, later rounds skip it.
fn single_source(cells: &[Cell], source: usize) -> Vec<Option<u32>> {
    let mut row = vec![None; cells.len()];
    let mut frontier = vec![source];
    let mut distance = 0;

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for index in frontier {
            if row[index].is_none() {
                row[index] = Some(distance);
                next.extend(cells[index].neighbors().iter());
            }
        }
        frontier = next;
        distance += 1;
    }

    row
}
