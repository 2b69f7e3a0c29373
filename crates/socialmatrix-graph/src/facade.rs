use crate::{adjacency::project, algebra, codec::decode, AdjacencyMatrix, VertexIndex};
use serde::{Deserialize, Serialize};
use socialmatrix_core::{Result, SocialGraph, RESULT_LABEL};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Matrix operation applied when combining two networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixOperation {
    /// A + B: edges present in either network.
    Union,
    /// A - B: edges present in A but not in B.
    Difference,
    /// A x B: an edge wherever a step in A followed by a step in B connects two people.
    Product,
}

impl fmt::Display for MatrixOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatrixOperation::Union => "union",
            MatrixOperation::Difference => "difference",
            MatrixOperation::Product => "product",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MatrixOperation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "union" | "add" | "+" => Ok(MatrixOperation::Union),
            "difference" | "subtract" | "-" => Ok(MatrixOperation::Difference),
            "product" | "multiply" | "x" => Ok(MatrixOperation::Product),
            other => Err(format!("unknown matrix operation: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineStage {
    Idle,
    ComputingIndex,
    ComputingMatrices,
    ComputingOp,
    Decoding,
    Done,
}

/// Drives the combine pipeline: index, project both graphs, apply the
/// operation, decode into a result graph labelled [`RESULT_LABEL`].
///
/// Each call runs to completion before returning. On failure the stage goes
/// back to `Idle` and the previous result is kept.
#[derive(Debug, Clone)]
pub struct GraphAlgebra {
    stage: PipelineStage,
    result: SocialGraph,
}

impl Default for GraphAlgebra {
    fn default() -> Self {
        Self {
            stage: PipelineStage::Idle,
            result: SocialGraph::new(RESULT_LABEL),
        }
    }
}

impl GraphAlgebra {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Most recent result graph (empty until the first combine).
    pub fn result(&self) -> &SocialGraph {
        &self.result
    }

    pub fn combine_union(&mut self, a: &SocialGraph, b: &SocialGraph) -> Result<SocialGraph> {
        self.combine(MatrixOperation::Union, a, b)
    }

    pub fn combine_difference(&mut self, a: &SocialGraph, b: &SocialGraph) -> Result<SocialGraph> {
        self.combine(MatrixOperation::Difference, a, b)
    }

    pub fn combine_product(&mut self, a: &SocialGraph, b: &SocialGraph) -> Result<SocialGraph> {
        self.combine(MatrixOperation::Product, a, b)
    }

    pub fn combine(
        &mut self,
        operation: MatrixOperation,
        a: &SocialGraph,
        b: &SocialGraph,
    ) -> Result<SocialGraph> {
        match self.run(operation, a, b) {
            Ok(result) => {
                info!(
                    %operation,
                    people = result.person_count(),
                    friendships = result.friendship_count(),
                    "combined {} and {}",
                    a.label(),
                    b.label()
                );
                self.result = result.clone();
                Ok(result)
            }
            Err(e) => {
                self.stage = PipelineStage::Idle;
                Err(e)
            }
        }
    }

    /// Resets to an empty result graph without computing anything.
    pub fn clear(&mut self) -> SocialGraph {
        self.stage = PipelineStage::Idle;
        self.result = SocialGraph::new(RESULT_LABEL);
        self.result.clone()
    }

    fn run(
        &mut self,
        operation: MatrixOperation,
        a: &SocialGraph,
        b: &SocialGraph,
    ) -> Result<SocialGraph> {
        self.enter(PipelineStage::ComputingIndex);
        let index = VertexIndex::build(&[a, b]);

        self.enter(PipelineStage::ComputingMatrices);
        let adj_a = project(a, &index);
        let adj_b = project(b, &index);

        self.enter(PipelineStage::ComputingOp);
        let combined = apply(operation, &adj_a, &adj_b)?;

        self.enter(PipelineStage::Decoding);
        let result = decode(&combined, &index, RESULT_LABEL)?;

        self.enter(PipelineStage::Done);
        Ok(result)
    }

    fn enter(&mut self, stage: PipelineStage) {
        debug!(from = ?self.stage, to = ?stage, "pipeline stage");
        self.stage = stage;
    }
}

pub fn apply(
    operation: MatrixOperation,
    a: &AdjacencyMatrix,
    b: &AdjacencyMatrix,
) -> Result<AdjacencyMatrix> {
    match operation {
        MatrixOperation::Union => algebra::union(a, b),
        MatrixOperation::Difference => algebra::difference(a, b),
        MatrixOperation::Product => algebra::boolean_product(a, b),
    }
}
