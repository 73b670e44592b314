//! Syntax tree data model.
//!
//! A [`Node`] is a `{type, body}` pair. The body is either the literal text of
//! a scanner token or an ordered list of [`Slot`]s whose arity depends on the
//! node kind. Trees are built once by the caller (normally deserialized from
//! JSON) and only ever read afterwards.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::kind::NodeKind;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub body: Body,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    Literal(String),
    Slots(Vec<Slot>),
}

/// One position of a composite body.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Slot {
    /// An optional child that is not present.
    #[default]
    Empty,
    /// A raw token such as an operator or a call connector.
    Token(String),
    Node(Box<Node>),
    List(Vec<Slot>),
}

impl Node {
    pub fn new(kind: impl Into<NodeKind>, slots: Vec<Slot>) -> Self {
        Self {
            kind: kind.into(),
            body: Body::Slots(slots),
        }
    }
    pub fn leaf(kind: impl Into<NodeKind>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            body: Body::Literal(text.into()),
        }
    }
    pub fn literal(&self) -> Option<&str> {
        match &self.body {
            Body::Literal(text) => Some(text),
            Body::Slots(_) => None,
        }
    }
    pub fn slots(&self) -> &[Slot] {
        match &self.body {
            Body::Literal(_) => &[],
            Body::Slots(slots) => slots,
        }
    }
    /// Serialized form used when the node has to be shown to a user.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("<unserializable node: {e}>"))
    }
}

impl Slot {
    pub fn token(text: impl Into<String>) -> Self {
        Slot::Token(text.into())
    }
    pub fn list(items: impl IntoIterator<Item = Slot>) -> Self {
        Slot::List(items.into_iter().collect())
    }
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Slot::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl From<Node> for Slot {
    fn from(node: Node) -> Self {
        Slot::Node(Box::new(node))
    }
}

impl From<Option<Node>> for Slot {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Slot::Empty, Slot::from)
    }
}

impl From<Vec<Node>> for Slot {
    fn from(nodes: Vec<Node>) -> Self {
        Slot::list(nodes.into_iter().map(Slot::from))
    }
}

/// Everything that may appear inside a body array on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSlot {
    Null,
    Flag(bool),
    Token(String),
    Node(Node),
    List(Vec<RawSlot>),
}

impl From<RawSlot> for Slot {
    fn from(raw: RawSlot) -> Self {
        match raw {
            // Ripper writes `false` for an absent block argument.
            RawSlot::Null | RawSlot::Flag(false) => Slot::Empty,
            RawSlot::Flag(true) => Slot::Token("true".to_string()),
            RawSlot::Token(text) => Slot::Token(text),
            RawSlot::Node(node) => Slot::from(node),
            RawSlot::List(items) => Slot::list(items.into_iter().map(Slot::from)),
        }
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawSlot::deserialize(deserializer).map(Slot::from)
    }
}

impl Serialize for Slot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Slot::Empty => serializer.serialize_none(),
            Slot::Token(text) => serializer.serialize_str(text),
            Slot::Node(node) => node.serialize(serializer),
            Slot::List(items) => items.serialize(serializer),
        }
    }
}
