use crate::{algebra::square, codec::encode, AdjacencyMatrix, VertexIndex};
use serde::Serialize;
use socialmatrix_core::{AnalyticsConfig, SocialGraph};
use tracing::debug;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeEntry {
    pub name: String,
    pub count: u32,
}

/// Two people who are not friends yet but share `mutual_count` friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub a: String,
    pub b: String,
    pub mutual_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphAnalytics {
    pub degrees: Vec<DegreeEntry>,
    pub suggestions: Vec<Suggestion>,
}

/// Degree table and friend-of-friend suggestions for one graph.
///
/// Every call re-derives the results from the graph; nothing is cached.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    suggestion_limit: usize,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl AnalyticsEngine {
    pub fn new(suggestion_limit: usize) -> Self {
        Self { suggestion_limit }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(config.suggestion_limit)
    }

    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }

    pub fn analyze(&self, graph: &SocialGraph) -> GraphAnalytics {
        let (index, adjacency) = encode(graph);
        let degrees = degree_table(graph, &index, &adjacency);
        let suggestions = self.suggest(&index, &adjacency);
        debug!(
            network = graph.label(),
            people = index.len(),
            suggestions = suggestions.len(),
            "analytics recomputed"
        );
        GraphAnalytics {
            degrees,
            suggestions,
        }
    }

    fn suggest(&self, index: &VertexIndex, adjacency: &AdjacencyMatrix) -> Vec<Suggestion> {
        let mutual = square(adjacency);
        let n = index.len();

        let mut suggestions = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let count = mutual.get(i, j);
                if adjacency.get(i, j) == 0 && count > 0 {
                    suggestions.push(Suggestion {
                        a: index.name(i).to_string(),
                        b: index.name(j).to_string(),
                        mutual_count: count,
                    });
                }
            }
        }

        suggestions.sort_by(|x, y| y.mutual_count.cmp(&x.mutual_count));
        suggestions.truncate(self.suggestion_limit);
        suggestions
    }
}

/// Row sums of the adjacency matrix in the graph's own person order, then
/// stable-sorted by descending count.
fn degree_table(
    graph: &SocialGraph,
    index: &VertexIndex,
    adjacency: &AdjacencyMatrix,
) -> Vec<DegreeEntry> {
    let mut degrees: Vec<DegreeEntry> = graph
        .people()
        .iter()
        .map(|p| DegreeEntry {
            name: p.name.clone(),
            count: index
                .position(&p.name)
                .map(|i| adjacency.row_sum(i))
                .unwrap_or(0),
        })
        .collect();
    degrees.sort_by(|x, y| y.count.cmp(&x.count));
    degrees
}
