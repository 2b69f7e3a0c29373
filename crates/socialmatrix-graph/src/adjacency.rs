use crate::{AdjacencyMatrix, VertexIndex};
use socialmatrix_core::SocialGraph;
use tracing::debug;

/// Projects `graph`'s friendships onto `index`.
///
/// Endpoints are resolved through the index, so an edge naming someone who
/// only appears in another graph of the same index is still projected. Edges
/// with an endpoint missing from the index are skipped, as are self-loops, so
/// the diagonal is always zero. The result has dimension `index.len()`
/// whatever the graph's own size.
pub fn project(graph: &SocialGraph, index: &VertexIndex) -> AdjacencyMatrix {
    let mut matrix = AdjacencyMatrix::zeros(index.len());
    let mut skipped = 0usize;

    for friendship in graph.friendships() {
        if friendship.is_self_loop() {
            skipped += 1;
            continue;
        }
        match (
            index.position(&friendship.source),
            index.position(&friendship.target),
        ) {
            (Some(i), Some(j)) => matrix.link(i, j),
            _ => {
                skipped += 1;
                debug!(
                    network = graph.label(),
                    "edge {} - {} is outside the vertex index",
                    friendship.source,
                    friendship.target
                );
            }
        }
    }

    if skipped > 0 {
        debug!(
            network = graph.label(),
            skipped, "projection dropped dangling edges and self-loops"
        );
    }
    matrix
}
