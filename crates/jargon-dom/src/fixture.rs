use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{DomTree, ElementData, NodeId, NodeType};

/// One node of a serialized tree description.
///
/// Elements are objects, text nodes are bare strings:
///
/// ```json
/// [{"tag": "div", "attrs": {"id": "root"}, "children": ["hello"]}]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FixtureNode {
    /// A text node.
    Text(String),
    /// An element with its attributes and children.
    Element {
        /// Local name.
        tag: String,
        /// Attribute list, empty when omitted.
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        /// Child nodes in order, empty when omitted.
        #[serde(default)]
        children: Vec<FixtureNode>,
    },
}

impl DomTree {
    /// Build a tree whose Document has `nodes` as children.
    #[must_use]
    pub fn from_fixture(nodes: &[FixtureNode]) -> Self {
        let mut tree = Self::new();
        let root = tree.root();
        for node in nodes {
            let _ = tree.append_fixture(root, node);
        }
        tree
    }

    /// Append `node` and its whole subtree under `parent`, returning the id
    /// of the appended node.
    pub fn append_fixture(&mut self, parent: NodeId, node: &FixtureNode) -> NodeId {
        match node {
            FixtureNode::Text(text) => self.append_text(parent, text),
            FixtureNode::Element {
                tag,
                attrs,
                children,
            } => {
                let id = self.alloc(NodeType::Element(ElementData::new(
                    tag,
                    attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
                )));
                self.append_child(parent, id);
                for child in children {
                    let _ = self.append_fixture(id, child);
                }
                id
            }
        }
    }
}
