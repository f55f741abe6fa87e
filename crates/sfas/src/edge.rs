use crate::error::{Endpoint, InvalidInput};
use serde::{Deserialize, Serialize};

/// A weighted directed edge `source -> target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<N, W> {
    pub source: N,
    pub target: N,
    pub weight: W,
}

impl<N, W> Edge<N, W> {
    pub fn new(source: N, target: N, weight: W) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

impl<N, W> From<(N, N, W)> for Edge<N, W> {
    fn from((source, target, weight): (N, N, W)) -> Self {
        Self::new(source, target, weight)
    }
}

/// An edge record as it comes out of a loosely typed table, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEdge<N, W> {
    #[serde(default)]
    pub source: Option<N>,
    #[serde(default)]
    pub target: Option<N>,
    #[serde(default)]
    pub weight: Option<W>,
}

impl<N, W> RawEdge<N, W> {
    /// Validates the record at position `index` of its input sequence.
    pub fn into_edge(self, index: usize) -> Result<Edge<N, W>, InvalidInput> {
        let source = self.source.ok_or(InvalidInput::MissingEndpoint {
            index,
            endpoint: Endpoint::Source,
        })?;
        let target = self.target.ok_or(InvalidInput::MissingEndpoint {
            index,
            endpoint: Endpoint::Target,
        })?;
        let weight = self.weight.ok_or(InvalidInput::MissingWeight { index })?;
        Ok(Edge::new(source, target, weight))
    }
}

impl<N, W> From<Edge<N, W>> for RawEdge<N, W> {
    fn from(e: Edge<N, W>) -> Self {
        Self {
            source: Some(e.source),
            target: Some(e.target),
            weight: Some(e.weight),
        }
    }
}
