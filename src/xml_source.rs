use std::io::BufRead;
use std::str;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::errors::Result;
use crate::events::{EventSource, MarkupEvent};

/// Feeds a quick-xml reader into the parser. Self-closing elements come out as
/// a start event followed by a matching end event.
pub struct XmlEventSource<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    pending_end: Option<String>,
}

impl<R: BufRead> XmlEventSource<R> {
    pub fn from_reader(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.trim_text(true);

        XmlEventSource {
            reader,
            buf: Vec::new(),
            pending_end: None,
        }
    }

    fn element_name(el: &BytesStart) -> Result<String> {
        Ok(str::from_utf8(el.name().as_ref())?.to_string())
    }

    fn start_event(el: &BytesStart) -> Result<MarkupEvent> {
        let mut attributes = Vec::new();
        for attribute_res in el.attributes() {
            let attribute = attribute_res?;
            let key = str::from_utf8(attribute.key.as_ref())?.to_string();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(MarkupEvent::Start {
            name: Self::element_name(el)?,
            attributes,
        })
    }
}

impl<R: BufRead> EventSource for XmlEventSource<R> {
    fn next_event(&mut self) -> Result<Option<MarkupEvent>> {
        if let Some(name) = self.pending_end.take() {
            return Ok(Some(MarkupEvent::End { name }));
        }

        // if we don't keep a borrow elsewhere, we can clear the buffer to keep memory usage low
        self.buf.clear();
        let event = match self.reader.read_event_into(&mut self.buf)? {
            Event::Eof => return Ok(None),
            Event::Start(e) => Self::start_event(&e)?,
            Event::Empty(e) => {
                self.pending_end = Some(Self::element_name(&e)?);
                Self::start_event(&e)?
            }
            Event::End(e) => MarkupEvent::End {
                name: str::from_utf8(e.name().as_ref())?.to_string(),
            },
            _ => MarkupEvent::Other,
        };
        Ok(Some(event))
    }
}
