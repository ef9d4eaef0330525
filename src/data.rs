use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{info, warn};
use xz::bufread::XzDecoder;

use self::osm::{Element, ElementRef, Node, NodeId, Way, WayId};
use crate::errors::Result;
use crate::events::EventSource;
use crate::parse_osm::OsmParser;
use crate::xml_source::XmlEventSource;

pub mod osm;
pub mod tags;

/// Something that can be looked up by its OSM identifier.
pub trait Identified {
    fn osm_id(&self) -> u64;
}

impl Identified for Node {
    fn osm_id(&self) -> u64 {
        self.id()
    }
}

impl Identified for Way {
    fn osm_id(&self) -> u64 {
        self.id()
    }
}

/// Elements of one kind, in the order they were committed, with an index by identifier.
#[derive(Debug, Clone)]
pub struct Repository<T> {
    items: Vec<T>,
    by_id: HashMap<u64, usize>,
}

impl<T> Default for Repository<T> {
    fn default() -> Self {
        Repository {
            items: Vec::new(),
            by_id: HashMap::new(),
        }
    }
}

impl<T: Identified> Repository<T> {
    /// Appends `item` and points its identifier at it. A repeated identifier
    /// moves the index to the newest item; the older one stays reachable by index.
    pub(crate) fn commit(&mut self, item: T) {
        let id = item.osm_id();
        let position = self.items.len();
        self.items.push(item);
        if let Some(previous) = self.by_id.insert(id, position) {
            warn!(id = id, previous_index = previous, index = position; "Duplicate identifier, newest element wins");
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn by_index(&self, i: usize) -> Option<&T> {
        self.items.get(i)
    }

    pub fn by_id(&self, id: u64) -> Option<&T> {
        self.by_id.get(&id).map(|&position| &self.items[position])
    }
}

/// Map data as read from an .osm extract. Built once, read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct StreetMap {
    nodes: Repository<Node>,
    ways: Repository<Way>,
}

impl StreetMap {
    pub(crate) fn from_parts(nodes: Repository<Node>, ways: Repository<Way>) -> Self {
        StreetMap { nodes, ways }
    }

    /// Consumes `source` to the end. Fails as a whole on the first fatal error.
    pub fn from_source<S: EventSource>(source: &mut S) -> Result<StreetMap> {
        OsmParser::new().parse(source)
    }

    pub fn from_xml<R: BufRead>(reader: R) -> Result<StreetMap> {
        Self::from_source(&mut XmlEventSource::from_reader(reader))
    }

    pub fn from_xml_str(xml: &str) -> Result<StreetMap> {
        Self::from_xml(xml.as_bytes())
    }

    /// Reads an .osm file, decompressing it first when the name ends in `.xz`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<StreetMap> {
        let path = path.as_ref();
        let file_reader = BufReader::new(File::open(path)?);
        let compressed = path.extension().is_some_and(|ext| ext == "xz");
        let display_path = path.display().to_string();
        info!(path = display_path.as_str(), compressed = compressed; "Opening OSM extract");

        if compressed {
            let xz_reader = XzDecoder::new(file_reader);
            Self::from_xml(BufReader::new(xz_reader))
        } else {
            Self::from_xml(file_reader)
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    pub fn node_by_index(&self, i: usize) -> Option<&Node> {
        self.nodes.by_index(i)
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.nodes.by_id(id)
    }

    pub fn way_by_index(&self, i: usize) -> Option<&Way> {
        self.ways.by_index(i)
    }

    pub fn way_by_id(&self, id: WayId) -> Option<&Way> {
        self.ways.by_id(id)
    }

    pub fn element(&self, element: ElementRef) -> Option<Element<'_>> {
        match element {
            ElementRef::Node(id) => self.node_by_id(id).map(Element::Node),
            ElementRef::Way(id) => self.way_by_id(id).map(Element::Way),
        }
    }
}
