use serde::Serialize;

use super::tags::Tags;

pub type NodeId = u64;
pub type WayId = u64;

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Location { lat, lon }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Attribute access shared by every map element.
pub trait Tagged {
    fn tags(&self) -> &Tags;

    fn attribute_count(&self) -> usize {
        self.tags().len()
    }

    fn attribute_key(&self, i: usize) -> Option<&str> {
        self.tags().key_at(i)
    }

    fn has_attribute(&self, key: &str) -> bool {
        self.tags().contains_key(key)
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.tags().get(key)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    location: Location,
    tags: Tags,
}

impl Node {
    pub(crate) fn new(id: NodeId, location: Location, tags: Tags) -> Self {
        Node { id, location, tags }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

impl Tagged for Node {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// An ordered run of node references. Referenced nodes need not be present in the map.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Way {
    id: WayId,
    nodes: Vec<NodeId>,
    tags: Tags,
}

impl Way {
    pub(crate) fn new(id: WayId, nodes: Vec<NodeId>, tags: Tags) -> Self {
        Way { id, nodes, tags }
    }

    pub fn id(&self) -> WayId {
        self.id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_id(&self, i: usize) -> Option<NodeId> {
        self.nodes.get(i).copied()
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.nodes
    }
}

impl Tagged for Way {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// Names an element by kind and identifier; node and way ids live in separate spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Node(NodeId),
    Way(WayId),
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element<'a> {
    Node(&'a Node),
    Way(&'a Way),
}

impl Element<'_> {
    pub fn id(&self) -> u64 {
        match self {
            Element::Node(node) => node.id(),
            Element::Way(way) => way.id(),
        }
    }
}

impl Tagged for Element<'_> {
    fn tags(&self) -> &Tags {
        match self {
            Element::Node(node) => node.tags(),
            Element::Way(way) => way.tags(),
        }
    }
}
