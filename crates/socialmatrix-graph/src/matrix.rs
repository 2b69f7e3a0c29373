use ndarray::Array2;
use serde::{Serialize, Serializer};
use std::fmt;

/// Dense square matrix over a [`VertexIndex`](crate::VertexIndex).
///
/// Projections hold 0/1 entries; [`square`](crate::algebra::square) produces
/// common-neighbour counts. Algebra functions never mutate their inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    cells: Array2<u32>,
}

impl AdjacencyMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            cells: Array2::zeros((n, n)),
        }
    }

    /// Builds from row vectors; `None` unless every row has `rows.len()` entries.
    pub fn from_rows(rows: &[Vec<u32>]) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|r| r.len() != n) {
            return None;
        }
        let flat: Vec<u32> = rows.iter().flatten().copied().collect();
        Array2::from_shape_vec((n, n), flat)
            .ok()
            .map(|cells| Self { cells })
    }

    /// Caller guarantees `cells` is square (products and element-wise maps of
    /// square operands).
    pub(crate) fn from_square(cells: Array2<u32>) -> Self {
        debug_assert_eq!(cells.nrows(), cells.ncols());
        Self { cells }
    }

    pub fn dimension(&self) -> usize {
        self.cells.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[[i, j]]
    }

    pub(crate) fn link(&mut self, i: usize, j: usize) {
        self.cells[[i, j]] = 1;
        self.cells[[j, i]] = 1;
    }

    pub fn as_array(&self) -> &Array2<u32> {
        &self.cells
    }

    pub fn row_sum(&self, i: usize) -> u32 {
        self.cells.row(i).sum()
    }

    pub fn is_symmetric(&self) -> bool {
        self.cells == self.cells.t()
    }

    /// Number of nonzero entries strictly above the diagonal.
    pub fn upper_nonzero_count(&self) -> usize {
        let n = self.dimension();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.cells[[i, j]] != 0)
            .count()
    }

    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells.rows().into_iter().map(|r| r.to_vec()).collect()
    }
}

impl Serialize for AdjacencyMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
