//! Translation of an OpenDaylight `network-topology` document into the edge
//! records the engine consumes.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::EdgeRecord;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyDocument {
    #[serde(rename = "network-topology", default)]
    pub network_topology: NetworkTopology,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkTopology {
    #[serde(default)]
    pub topology: Vec<TopologyEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyEntry {
    #[serde(rename = "topology-id", default)]
    pub topology_id: Option<String>,
    #[serde(default)]
    pub link: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "link-id", default)]
    pub link_id: Option<String>,
    #[serde(default)]
    pub source: Option<LinkSource>,
    #[serde(default)]
    pub destination: Option<LinkDestination>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkSource {
    #[serde(rename = "source-node", default)]
    pub source_node: Option<String>,
    #[serde(rename = "source-tp", default)]
    pub source_tp: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkDestination {
    #[serde(rename = "dest-node", default)]
    pub dest_node: Option<String>,
    #[serde(rename = "dest-tp", default)]
    pub dest_tp: Option<String>,
}

impl TopologyDocument {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Flattens every topology entry into edge records with unit cost. Links
/// whose endpoint node is missing or empty are skipped.
pub fn extract_links(document: &TopologyDocument) -> Vec<EdgeRecord> {
    let mut records = Vec::new();
    for entry in &document.network_topology.topology {
        for link in &entry.link {
            let source = link
                .source
                .as_ref()
                .and_then(|s| s.source_node.as_deref())
                .filter(|node| !node.is_empty());
            let destination = link
                .destination
                .as_ref()
                .and_then(|d| d.dest_node.as_deref())
                .filter(|node| !node.is_empty());
            match (source, destination) {
                (Some(source), Some(destination)) => {
                    records.push(EdgeRecord::new(source, destination, Some(1.0)));
                }
                _ => {
                    debug!("skipping half-specified link {:?}", link.link_id);
                }
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_links_from_document() {
        let raw = json!({
            "network-topology": {
                "topology": [{
                    "topology-id": "flow:1",
                    "link": [
                        {
                            "link-id": "openflow:1:2",
                            "source": {"source-node": "openflow:1", "source-tp": "openflow:1:2"},
                            "destination": {"dest-node": "openflow:2", "dest-tp": "openflow:2:1"},
                        },
                        {
                            "link-id": "host:a/openflow:1",
                            "source": {"source-node": "host:a"},
                            "destination": {"dest-node": "openflow:1"},
                        },
                    ],
                }],
            },
        })
        .to_string();

        let document = TopologyDocument::from_json(&raw).unwrap();
        let records = extract_links(&document);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].resolved_source(), "openflow:1");
        assert_eq!(records[0].resolved_target(), "openflow:2");
        assert_eq!(records[0].weight_or_default(), 1.0);
        assert_eq!(records[1].resolved_source(), "host:a");
    }

    #[test]
    fn test_half_specified_links_skipped() {
        let raw = json!({
            "network-topology": {
                "topology": [{
                    "link": [
                        {"link-id": "broken", "source": {"source-node": "openflow:1"}},
                        {"link-id": "empty"},
                        {
                            "link-id": "blank-source",
                            "source": {"source-node": ""},
                            "destination": {"dest-node": "openflow:2"},
                        },
                        {
                            "link-id": "blank-destination",
                            "source": {"source-node": "openflow:1"},
                            "destination": {"dest-node": ""},
                        },
                    ],
                }],
            },
        })
        .to_string();

        let document = TopologyDocument::from_json(&raw).unwrap();
        assert!(extract_links(&document).is_empty());
    }

    #[test]
    fn test_empty_document() {
        let document = TopologyDocument::from_json("{}").unwrap();
        assert!(extract_links(&document).is_empty());
    }

    #[test]
    fn test_multiple_topology_entries_flattened() {
        let raw = json!({
            "network-topology": {
                "topology": [
                    {
                        "topology-id": "flow:1",
                        "link": [{
                            "source": {"source-node": "openflow:1"},
                            "destination": {"dest-node": "openflow:2"},
                        }],
                    },
                    {
                        "topology-id": "flow:2",
                        "link": [{
                            "source": {"source-node": "openflow:3"},
                            "destination": {"dest-node": "openflow:4"},
                        }],
                    },
                ],
            },
        })
        .to_string();

        let document = TopologyDocument::from_json(&raw).unwrap();
        let records = extract_links(&document);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].resolved_source(), "openflow:3");
    }
}
