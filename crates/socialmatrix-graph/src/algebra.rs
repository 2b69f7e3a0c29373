//! Pure operations over equally sized adjacency matrices.
//!
//! Every function allocates its output and leaves the inputs untouched.
//! Binary operations fail with [`SocialMatrixError::DimensionMismatch`] when
//! the operands were not projected onto the same vertex index.

use crate::AdjacencyMatrix;
use ndarray::Zip;
use socialmatrix_core::{Result, SocialMatrixError};

fn ensure_same_dimension(a: &AdjacencyMatrix, b: &AdjacencyMatrix) -> Result<()> {
    if a.dimension() != b.dimension() {
        return Err(SocialMatrixError::DimensionMismatch {
            left: a.dimension(),
            right: b.dimension(),
        });
    }
    Ok(())
}

/// `1` where either operand has an edge.
pub fn union(a: &AdjacencyMatrix, b: &AdjacencyMatrix) -> Result<AdjacencyMatrix> {
    ensure_same_dimension(a, b)?;
    let cells = Zip::from(a.as_array())
        .and(b.as_array())
        .map_collect(|&x, &y| u32::from(x == 1 || y == 1));
    Ok(AdjacencyMatrix::from_square(cells))
}

/// `1` where `a` has an edge and `b` does not.
pub fn difference(a: &AdjacencyMatrix, b: &AdjacencyMatrix) -> Result<AdjacencyMatrix> {
    ensure_same_dimension(a, b)?;
    let cells = Zip::from(a.as_array())
        .and(b.as_array())
        .map_collect(|&x, &y| u32::from(x == 1 && y == 0));
    Ok(AdjacencyMatrix::from_square(cells))
}

/// Matrix product thresholded to 0/1: `[i][j]` is `1` iff some `k` has
/// `a[i][k]` and `b[k][j]`, i.e. a step in `a` followed by a step in `b`.
pub fn boolean_product(a: &AdjacencyMatrix, b: &AdjacencyMatrix) -> Result<AdjacencyMatrix> {
    ensure_same_dimension(a, b)?;
    let cells = a.as_array().dot(b.as_array()).mapv_into(|sum| u32::from(sum > 0));
    Ok(AdjacencyMatrix::from_square(cells))
}

/// `a · a` without thresholding. For a 0/1 symmetric matrix, `[i][j]` counts
/// the common neighbours of `i` and `j`.
pub fn square(a: &AdjacencyMatrix) -> AdjacencyMatrix {
    AdjacencyMatrix::from_square(a.as_array().dot(a.as_array()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[u32]]) -> AdjacencyMatrix {
        let rows: Vec<Vec<u32>> = rows.iter().map(|r| r.to_vec()).collect();
        AdjacencyMatrix::from_rows(&rows).unwrap()
    }

    fn path() -> AdjacencyMatrix {
        // 0 - 1 - 2
        m(&[&[0, 1, 0], &[1, 0, 1], &[0, 1, 0]])
    }

    fn edge_01() -> AdjacencyMatrix {
        m(&[&[0, 1, 0], &[1, 0, 0], &[0, 0, 0]])
    }

    #[test]
    fn union_and_difference() {
        let u = union(&edge_01(), &path()).unwrap();
        assert_eq!(u, path());
        assert_eq!(union(&path(), &path()).unwrap(), path());

        let d = difference(&path(), &edge_01()).unwrap();
        assert_eq!(d, m(&[&[0, 0, 0], &[0, 0, 1], &[0, 1, 0]]));
        assert_eq!(difference(&edge_01(), &path()).unwrap(), AdjacencyMatrix::zeros(3));
        assert_eq!(difference(&path(), &path()).unwrap(), AdjacencyMatrix::zeros(3));
    }

    #[test]
    fn boolean_product_thresholds() {
        let p = boolean_product(&path(), &path()).unwrap();
        // Middle vertex reaches itself via two neighbours; still 1, not 2.
        assert_eq!(p, m(&[&[1, 0, 1], &[0, 1, 0], &[1, 0, 1]]));
    }

    #[test]
    fn square_counts_common_neighbours() {
        let s = square(&path());
        assert_eq!(s.get(1, 1), 2);
        assert_eq!(s.get(0, 2), 1);
        assert_eq!(s.get(0, 1), 0);
    }

    #[test]
    fn boolean_product_is_not_square() {
        let p = boolean_product(&path(), &path()).unwrap();
        let s = square(&path());
        assert_ne!(p, s);
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let small = AdjacencyMatrix::zeros(2);
        let err = union(&small, &path()).unwrap_err();
        assert!(matches!(
            err,
            SocialMatrixError::DimensionMismatch { left: 2, right: 3 }
        ));
        assert!(difference(&path(), &small).is_err());
        assert!(boolean_product(&small, &path()).is_err());
    }

    #[test]
    fn inputs_are_untouched() {
        let a = path();
        let b = edge_01();
        let _ = union(&a, &b).unwrap();
        let _ = difference(&a, &b).unwrap();
        let _ = boolean_product(&a, &b).unwrap();
        let _ = square(&a);
        assert_eq!(a, path());
        assert_eq!(b, edge_01());
    }

    #[test]
    fn zero_dimension_operands() {
        let z = AdjacencyMatrix::zeros(0);
        assert_eq!(union(&z, &z).unwrap().dimension(), 0);
        assert_eq!(boolean_product(&z, &z).unwrap().dimension(), 0);
        assert_eq!(square(&z).dimension(), 0);
    }
}
