use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::NodeId;

/// Weight applied to a link whose record carries no usable weight.
pub const DEFAULT_LINK_WEIGHT: f64 = 1.0;

/// One endpoint of an edge record, in whatever shape the caller sent it.
/// Resolution to a canonical string happens once, at graph-build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    Id(String),
    Record(serde_json::Map<String, Value>),
    Other(Value),
}

impl NodeRef {
    /// Canonical node identity. Structured records answer with their `id`
    /// field when present and non-empty, then `name`, then a JSON rendering
    /// of the whole record. Non-string scalars are stringified.
    pub fn resolve(&self) -> NodeId {
        match self {
            NodeRef::Id(id) => id.clone(),
            NodeRef::Record(fields) => fields
                .get("id")
                .and_then(field_identity)
                .or_else(|| fields.get("name").and_then(field_identity))
                .unwrap_or_else(|| Value::Object(fields.clone()).to_string()),
            NodeRef::Other(value) => render_value(value),
        }
    }
}

/// Textual identity of an `id`/`name` field. Null and the empty string count
/// as absent so resolution falls through to the next candidate.
fn field_identity(value: &Value) -> Option<NodeId> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn render_value(value: &Value) -> NodeId {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One undirected link as submitted by the caller. `source`/`src` and
/// `target`/`dst` are accepted as synonyms, with the longer name winning
/// when both appear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<NodeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<NodeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst: Option<NodeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: Option<f64>) -> Self {
        Self {
            source: Some(NodeRef::Id(source.into())),
            target: Some(NodeRef::Id(target.into())),
            weight,
            ..Self::default()
        }
    }

    pub fn source_ref(&self) -> Option<&NodeRef> {
        self.source.as_ref().or(self.src.as_ref())
    }

    pub fn target_ref(&self) -> Option<&NodeRef> {
        self.target.as_ref().or(self.dst.as_ref())
    }

    /// Resolved source identity; a record with no source endpoint at all
    /// resolves to the rendering of JSON null.
    pub fn resolved_source(&self) -> NodeId {
        match self.source_ref() {
            Some(node) => node.resolve(),
            None => Value::Null.to_string(),
        }
    }

    pub fn resolved_target(&self) -> NodeId {
        match self.target_ref() {
            Some(node) => node.resolve(),
            None => Value::Null.to_string(),
        }
    }

    pub fn weight_or_default(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_LINK_WEIGHT)
    }
}

/// A complete compute request. Stateless: the topology lives and dies with
/// the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// Named metric weights. Accepted and logged; composite weighting is not
    /// applied to path selection.
    #[serde(default)]
    pub metric: HashMap<String, f64>,
    pub topo: Vec<EdgeRecord>,
    pub algo: String,
}

/// One entry in a result slot: either a node sequence or an inline error
/// marker for that pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathResult {
    Path(Vec<NodeId>),
    Error { error: String },
}

/// Result slots keyed `<src>_<dst>`. Ordered map so serialization is stable
/// across identical requests.
pub type ResultMap = BTreeMap<String, Vec<PathResult>>;

/// Top-level wire response: a result map on success, a single error object
/// when the whole request is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComputeResponse {
    Failure { error: String },
    Results(ResultMap),
}
