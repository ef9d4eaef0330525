use std::str::FromStr;

use log::{debug, info};

use crate::data::osm::{Location, Node, NodeId, Way, WayId};
use crate::data::tags::Tags;
use crate::data::{Repository, StreetMap};
use crate::errors::{Error, Result};
use crate::events::{EventSource, MarkupEvent};

struct NodeDraft {
    id: Option<NodeId>,
    location: Location,
    tags: Tags,
}

struct WayDraft {
    id: Option<WayId>,
    nodes: Vec<NodeId>,
    tags: Tags,
}

enum ParserState {
    Top,
    Node(NodeDraft),
    Way(WayDraft),
}

impl ParserState {
    fn name(&self) -> &'static str {
        match self {
            ParserState::Top => "top",
            ParserState::Node(_) => "node",
            ParserState::Way(_) => "way",
        }
    }
}

/// Single-pass interpreter of the OSM element grammar.
pub struct OsmParser {
    state: ParserState,
    nodes: Repository<Node>,
    ways: Repository<Way>,
}

fn parse_number<T: FromStr>(element: &str, attribute: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| Error::MalformedNumber {
        element: element.to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

impl OsmParser {
    pub fn new() -> Self {
        OsmParser {
            state: ParserState::Top,
            nodes: Repository::default(),
            ways: Repository::default(),
        }
    }

    pub fn parse<S: EventSource>(mut self, source: &mut S) -> Result<StreetMap> {
        info!(phase = "parse_osm"; "Starting parse");
        while let Some(event) = source.next_event()? {
            self.handle(event)?;
        }

        if !matches!(self.state, ParserState::Top) {
            debug!(open = self.state.name(); "Input ended inside an element, discarding it");
        }
        info!(phase = "parse_osm", nodes = self.nodes.len(), ways = self.ways.len(); "Parse finished");
        Ok(StreetMap::from_parts(self.nodes, self.ways))
    }

    fn handle(&mut self, event: MarkupEvent) -> Result<()> {
        match event {
            MarkupEvent::Start { name, attributes } => match name.as_str() {
                "node" => self.open(ParserState::Node(Self::parse_node(attributes)?)),
                "way" => self.open(ParserState::Way(Self::parse_way(attributes)?)),
                "nd" => self.add_node_ref(&attributes)?,
                "tag" => self.add_tag(attributes),
                _ => (),
            },
            MarkupEvent::End { name } => self.close(&name),
            MarkupEvent::Other => (),
        }
        Ok(())
    }

    fn open(&mut self, state: ParserState) {
        let previous = std::mem::replace(&mut self.state, state);
        if !matches!(previous, ParserState::Top) {
            debug!(open = previous.name(); "Element reopened before closing, discarding it");
        }
    }

    fn parse_node(attributes: Vec<(String, String)>) -> Result<NodeDraft> {
        let mut draft = NodeDraft {
            id: None,
            location: Location::default(),
            tags: Tags::new(),
        };

        for (key, value) in attributes {
            match key.as_str() {
                "id" => draft.id = Some(parse_number("node", &key, &value)?),
                "lat" => draft.location.lat = parse_number("node", &key, &value)?,
                "lon" => draft.location.lon = parse_number("node", &key, &value)?,
                _ => draft.tags.insert(key, value),
            }
        }
        Ok(draft)
    }

    fn parse_way(attributes: Vec<(String, String)>) -> Result<WayDraft> {
        let mut draft = WayDraft {
            id: None,
            nodes: Vec::new(),
            tags: Tags::new(),
        };

        for (key, value) in attributes {
            match key.as_str() {
                "id" => draft.id = Some(parse_number("way", &key, &value)?),
                _ => draft.tags.insert(key, value),
            }
        }
        Ok(draft)
    }

    fn add_node_ref(&mut self, attributes: &[(String, String)]) -> Result<()> {
        let way = match &mut self.state {
            ParserState::Way(way) => way,
            other => {
                debug!(state = other.name(); "Ignoring nd outside of a way");
                return Ok(());
            }
        };

        for (key, value) in attributes {
            if key == "ref" {
                way.nodes.push(parse_number("nd", key, value)?);
            }
        }
        Ok(())
    }

    fn add_tag(&mut self, attributes: Vec<(String, String)>) {
        let mut k = String::new();
        let mut v = String::new();
        for (key, value) in attributes {
            match key.as_str() {
                "k" => k = value,
                "v" => v = value,
                _ => (),
            }
        }
        if k.is_empty() {
            return;
        }

        match &mut self.state {
            ParserState::Node(node) => node.tags.insert(k, v),
            ParserState::Way(way) => way.tags.insert(k, v),
            ParserState::Top => debug!(key = k.as_str(); "Ignoring tag outside of a node or way"),
        }
    }

    fn close(&mut self, name: &str) {
        let matches_open = matches!(
            (name, &self.state),
            ("node", ParserState::Node(_)) | ("way", ParserState::Way(_))
        );
        if !matches_open {
            return;
        }

        match std::mem::replace(&mut self.state, ParserState::Top) {
            ParserState::Node(draft) => {
                let id = Self::id_or_zero(name, draft.id);
                self.nodes.commit(Node::new(id, draft.location, draft.tags));
            }
            ParserState::Way(draft) => {
                let id = Self::id_or_zero(name, draft.id);
                self.ways.commit(Way::new(id, draft.nodes, draft.tags));
            }
            ParserState::Top => (),
        }
    }

    fn id_or_zero(element: &str, id: Option<u64>) -> u64 {
        id.unwrap_or_else(|| {
            debug!(element = element; "Element has no id, committing it as 0");
            0
        })
    }
}

impl Default for OsmParser {
    fn default() -> Self {
        Self::new()
    }
}
