//! In-memory store of the nodes and ways in an OpenStreetMap XML extract.
//!
//! The map is built in one pass over a stream of markup events and is read-only
//! afterwards:
//!
//! ```
//! use street_map::{StreetMap, Tagged};
//!
//! let map = StreetMap::from_xml_str(
//!     r#"<osm><node id="1" lat="47.1" lon="-122.3"><tag k="name" v="Park"/></node></osm>"#,
//! ).unwrap();
//! let node = map.node_by_id(1).unwrap();
//! assert_eq!(node.attribute("name"), Some("Park"));
//! ```

pub mod config;
pub mod data;
pub mod errors;
pub mod events;
pub mod parse_osm;
pub mod xml_source;

pub use data::osm::{Element, ElementRef, Location, Node, NodeId, Tagged, Way, WayId};
pub use data::tags::Tags;
pub use data::{Repository, StreetMap};
pub use errors::{Error, Result};
pub use events::{EventQueue, EventSource, MarkupEvent};
pub use xml_source::XmlEventSource;
