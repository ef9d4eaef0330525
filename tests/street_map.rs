use std::io::Write;

use proptest::prelude::*;
use street_map::{Error, EventQueue, EventSource, Location, MarkupEvent, StreetMap, Tagged};

const EXTRACT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="test">
  <bounds minlat="47.0" minlon="-123.0" maxlat="48.0" maxlon="-122.0"/>
  <node id="1" lat="47.1" lon="-122.3" version="2">
    <tag k="name" v="Park"/>
    <tag k="leisure" v="park"/>
  </node>
  <node id="2" lat="47.2" lon="-122.4"/>
  <way id="10">
    <nd ref="1"/>
    <nd ref="2"/>
    <nd ref="99"/>
    <tag k="highway" v="residential"/>
  </way>
  <relation id="100">
    <member type="way" ref="10" role="outer"/>
    <tag k="type" v="multipolygon"/>
  </relation>
</osm>
"#;

#[test]
fn reads_nodes_and_ways_from_xml() {
    let map = StreetMap::from_xml_str(EXTRACT).unwrap();
    assert_eq!(map.node_count(), 2);
    assert_eq!(map.way_count(), 1);

    let park = map.node_by_id(1).unwrap();
    assert_eq!(park.location(), Location::new(47.1, -122.3));
    assert_eq!(park.attribute_key(0), Some("version"));
    assert_eq!(park.attribute_key(1), Some("name"));
    assert_eq!(park.attribute_key(2), Some("leisure"));
    assert_eq!(park.attribute_key(3), None);
    assert_eq!(park.attribute("name"), Some("Park"));

    let bare = map.node_by_index(1).unwrap();
    assert_eq!(bare.id(), 2);
    assert_eq!(bare.attribute_count(), 0);

    let way = map.way_by_id(10).unwrap();
    assert_eq!(way.node_ids(), &[1, 2, 99]);
    assert!(map.node_by_id(99).is_none());
    assert_eq!(way.attribute("highway"), Some("residential"));
    assert_eq!(way.attribute("type"), None);
}

#[test]
fn index_and_id_lookups_agree() {
    let map = StreetMap::from_xml_str(EXTRACT).unwrap();
    for i in 0..map.node_count() {
        let node = map.node_by_index(i).unwrap();
        assert_eq!(map.node_by_id(node.id()), Some(node));
    }
    assert_eq!(map.way_by_index(0), map.way_by_id(10));
    assert!(map.node_by_index(map.node_count()).is_none());
    assert!(map.way_by_index(1).is_none());
    assert!(map.way_by_id(1).is_none());
}

#[test]
fn non_numeric_id_fails_the_whole_parse() {
    let xml = r#"<osm><node id="1" lat="0" lon="0"/><node id="abc" lat="0" lon="0"/></osm>"#;
    let err = StreetMap::from_xml_str(xml).unwrap_err();
    assert!(matches!(err, Error::MalformedNumber { ref attribute, .. } if attribute == "id"));
}

#[test]
fn element_without_id_does_not_discard_the_map() {
    let xml = r#"<osm><node lat="1" lon="2"><tag k="a" v="b"/></node><node id="5" lat="0" lon="0"/></osm>"#;
    let map = StreetMap::from_xml_str(xml).unwrap();
    assert_eq!(map.node_count(), 2);
    assert_eq!(map.node_by_id(0).unwrap().attribute("a"), Some("b"));
    assert_eq!(map.node_by_id(5).unwrap().location(), Location::new(0.0, 0.0));
}

#[test]
fn nd_without_way_is_ignored() {
    let map = StreetMap::from_xml_str(r#"<osm><nd ref="1"/></osm>"#).unwrap();
    assert_eq!(map.node_count(), 0);
    assert_eq!(map.way_count(), 0);
}

#[test]
fn empty_input_gives_empty_map() {
    let map = StreetMap::from_xml_str("").unwrap();
    assert_eq!(map.node_count(), 0);
    assert_eq!(map.way_count(), 0);
}

#[test]
fn duplicate_ids_resolve_to_latest() {
    let xml = r#"<osm>
        <node id="7" lat="1" lon="1"/>
        <node id="7" lat="2" lon="2"/>
    </osm>"#;
    let map = StreetMap::from_xml_str(xml).unwrap();
    assert_eq!(map.node_count(), 2);
    assert_eq!(map.node_by_id(7).unwrap().location(), Location::new(2.0, 2.0));
    assert_eq!(map.node_by_index(0).unwrap().location(), Location::new(1.0, 1.0));
}

#[test]
fn broken_markup_is_fatal() {
    assert!(matches!(
        StreetMap::from_xml_str(r#"<osm><node id="1"></way></osm>"#),
        Err(Error::Xml(_))
    ));
}

struct FailingSource {
    events: EventQueue,
}

impl EventSource for FailingSource {
    fn next_event(&mut self) -> street_map::Result<Option<MarkupEvent>> {
        match self.events.next_event()? {
            Some(event) => Ok(Some(event)),
            None => Err("connection reset".into()),
        }
    }
}

#[test]
fn reader_failure_is_propagated() {
    let mut source = FailingSource {
        events: vec![
            MarkupEvent::start("node", &[("id", "1")]),
            MarkupEvent::end("node"),
        ]
        .into_iter()
        .collect(),
    };
    let err = StreetMap::from_source(&mut source).unwrap_err();
    assert_eq!(err.to_string(), "connection reset");
}

#[test]
fn opens_plain_and_xz_files() {
    let dir = std::env::temp_dir().join(format!("street-map-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let plain = dir.join("extract.osm");
    std::fs::write(&plain, EXTRACT).unwrap();
    assert_eq!(StreetMap::open(&plain).unwrap().way_count(), 1);

    let compressed = dir.join("extract.osm.xz");
    let mut encoder = xz::write::XzEncoder::new(std::fs::File::create(&compressed).unwrap(), 6);
    encoder.write_all(EXTRACT.as_bytes()).unwrap();
    encoder.finish().unwrap();
    assert_eq!(StreetMap::open(&compressed).unwrap().node_count(), 2);

    assert!(matches!(StreetMap::open(dir.join("missing.osm")), Err(Error::Io(_))));
    std::fs::remove_dir_all(&dir).unwrap();
}

fn tag_key() -> impl Strategy<Value = String> {
    "[a-z:_]{1,8}"
}

proptest! {
    #[test]
    fn way_refs_keep_event_order(refs in proptest::collection::vec(any::<u64>(), 0..50)) {
        let mut events = vec![MarkupEvent::start("way", &[("id", "1")])];
        for r in &refs {
            let r = r.to_string();
            events.push(MarkupEvent::start("nd", &[("ref", r.as_str())]));
            events.push(MarkupEvent::end("nd"));
        }
        events.push(MarkupEvent::end("way"));

        let mut queue: EventQueue = events.into_iter().collect();
        let map = StreetMap::from_source(&mut queue).unwrap();
        let way = map.way_by_id(1).unwrap();
        prop_assert_eq!(way.node_count(), refs.len());
        prop_assert_eq!(way.node_ids(), refs.as_slice());
    }

    #[test]
    fn tag_keys_keep_first_seen_order(keys in proptest::collection::vec(tag_key(), 0..20)) {
        let mut events = vec![MarkupEvent::start("node", &[("id", "1"), ("lat", "0"), ("lon", "0")])];
        for (i, k) in keys.iter().enumerate() {
            let v = i.to_string();
            events.push(MarkupEvent::start("tag", &[("k", k.as_str()), ("v", v.as_str())]));
            events.push(MarkupEvent::end("tag"));
        }
        events.push(MarkupEvent::end("node"));

        let mut queue: EventQueue = events.into_iter().collect();
        let map = StreetMap::from_source(&mut queue).unwrap();
        let node = map.node_by_id(1).unwrap();

        let mut expected: Vec<&str> = Vec::new();
        for k in &keys {
            if !expected.contains(&k.as_str()) {
                expected.push(k);
            }
        }
        prop_assert_eq!(node.attribute_count(), expected.len());
        for (i, k) in expected.iter().enumerate() {
            prop_assert_eq!(node.attribute_key(i), Some(*k));
            let last = keys.iter().rposition(|key| key == *k).unwrap().to_string();
            prop_assert_eq!(node.attribute(k), Some(last.as_str()));
        }
        prop_assert_eq!(node.attribute_key(expected.len()), None);
    }
}
