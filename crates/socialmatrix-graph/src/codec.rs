use crate::{adjacency::project, AdjacencyMatrix, VertexIndex};
use socialmatrix_core::{Friendship, Result, SocialGraph, SocialMatrixError};

/// Index and projection of a single graph.
pub fn encode(graph: &SocialGraph) -> (VertexIndex, AdjacencyMatrix) {
    let index = VertexIndex::build(&[graph]);
    let matrix = project(graph, &index);
    (index, matrix)
}

/// Turns a matrix back into a graph labelled `label`.
///
/// Emits every index entry as a person and one friendship per `i < j` with
/// `matrix[i][j] == 1`, ordered by `i` then `j`. Only the upper triangle is
/// read, so asymmetric product matrices never yield mirrored edges.
pub fn decode(matrix: &AdjacencyMatrix, index: &VertexIndex, label: &str) -> Result<SocialGraph> {
    if matrix.dimension() != index.len() {
        return Err(SocialMatrixError::DimensionMismatch {
            left: matrix.dimension(),
            right: index.len(),
        });
    }

    let n = index.len();
    let mut friendships = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if matrix.get(i, j) == 1 {
                friendships.push(Friendship::new(index.name(i), index.name(j)));
            }
        }
    }

    Ok(SocialGraph::from_parts(
        label,
        index.people().to_vec(),
        friendships,
    ))
}
