//! XML rendering of the record graph per the PREMIS element grammar
//!
//! The writer emits objects then events in insertion order; the reader
//! reconstructs a [`Record`] from that output and exists to prove
//! round-trip fidelity.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event as XmlEvent};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};
use crate::premis::nodes::{Event, EventIdentifier, Fixity, Format, Object, ObjectIdentifier, Record};

/// Default namespace stamped on the root element
pub const PREMIS_XMLNS: &str = "info:lc/xmlns/premis-v2";

/// Serializes a complete record to a UTF-8 XML document
pub fn to_xml(record: &Record) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(XmlEvent::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(Error::serialization)?;

    let mut root = BytesStart::new("premis");
    root.push_attribute(("xmlns", PREMIS_XMLNS));
    root.push_attribute(("version", "2.0"));
    writer
        .write_event(XmlEvent::Start(root))
        .map_err(Error::serialization)?;

    for object in record.objects() {
        write_object(&mut writer, object)?;
    }
    for event in record.events() {
        write_event_node(&mut writer, event)?;
    }

    writer
        .write_event(XmlEvent::End(BytesEnd::new("premis")))
        .map_err(Error::serialization)?;

    Ok(writer.into_inner())
}

fn write_object<W: Write>(writer: &mut Writer<W>, object: &Object) -> Result<()> {
    start(writer, "object")?;

    start(writer, "objectIdentifier")?;
    text_element(writer, "objectIdentifierType", &object.identifier.identifier_type)?;
    text_element(writer, "objectIdentifierValue", &object.identifier.value)?;
    end(writer, "objectIdentifier")?;

    text_element(writer, "objectCategory", &object.category)?;

    start(writer, "objectCharacteristics")?;
    for fixity in &object.characteristics.fixities {
        start(writer, "fixity")?;
        text_element(writer, "messageDigestAlgorithm", &fixity.algorithm)?;
        text_element(writer, "messageDigest", &fixity.digest)?;
        text_element(writer, "messageDigestOriginator", &fixity.originator)?;
        end(writer, "fixity")?;
    }
    text_element(writer, "size", &object.characteristics.size)?;
    for format in &object.characteristics.formats {
        start(writer, "format")?;
        start(writer, "formatDesignation")?;
        text_element(writer, "formatName", &format.designation)?;
        end(writer, "formatDesignation")?;
        text_element(writer, "formatNote", &format.note)?;
        end(writer, "format")?;
    }
    end(writer, "objectCharacteristics")?;

    if let Some(name) = &object.original_name {
        text_element(writer, "originalName", name)?;
    }

    for link in object.linking_event_identifiers() {
        start(writer, "linkingEventIdentifier")?;
        text_element(writer, "linkingEventIdentifierType", &link.identifier_type)?;
        text_element(writer, "linkingEventIdentifierValue", &link.value)?;
        end(writer, "linkingEventIdentifier")?;
    }

    end(writer, "object")
}

fn write_event_node<W: Write>(writer: &mut Writer<W>, event: &Event) -> Result<()> {
    start(writer, "event")?;

    start(writer, "eventIdentifier")?;
    text_element(writer, "eventIdentifierType", &event.identifier.identifier_type)?;
    text_element(writer, "eventIdentifierValue", &event.identifier.value)?;
    end(writer, "eventIdentifier")?;

    text_element(writer, "eventType", &event.event_type)?;
    text_element(writer, "eventDateTime", &event.date_time)?;

    start(writer, "eventOutcomeInformation")?;
    text_element(writer, "eventOutcome", &event.outcome)?;
    end(writer, "eventOutcomeInformation")?;

    start(writer, "eventDetailInformation")?;
    text_element(writer, "eventDetail", &event.detail)?;
    end(writer, "eventDetailInformation")?;

    for link in event.linking_object_identifiers() {
        start(writer, "linkingObjectIdentifier")?;
        text_element(writer, "linkingObjectIdentifierType", &link.identifier_type)?;
        text_element(writer, "linkingObjectIdentifierValue", &link.value)?;
        end(writer, "linkingObjectIdentifier")?;
    }

    end(writer, "event")
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer
        .write_event(XmlEvent::Start(BytesStart::new(name)))
        .map_err(Error::serialization)
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer
        .write_event(XmlEvent::End(BytesEnd::new(name)))
        .map_err(Error::serialization)
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    start(writer, name)?;
    writer
        .write_event(XmlEvent::Text(BytesText::new(value)))
        .map_err(Error::serialization)?;
    end(writer, name)
}

/// Rebuilds a [`Record`] from a document produced by [`to_xml`]
pub fn from_xml(bytes: &[u8]) -> Result<Record> {
    let text = std::str::from_utf8(bytes).map_err(Error::serialization)?;
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut record = Record::new();
    let mut object: Option<Object> = None;
    let mut event: Option<Event> = None;
    let mut fixity: Option<Fixity> = None;
    let mut format: Option<Format> = None;
    let mut link_type = String::new();
    let mut link_value = String::new();
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event().map_err(Error::serialization)? {
            XmlEvent::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match name.as_str() {
                    "object" => object = Some(Object::empty()),
                    "event" => event = Some(Event::empty()),
                    "fixity" => {
                        fixity = Some(Fixity {
                            algorithm: String::new(),
                            digest: String::new(),
                            originator: String::new(),
                        })
                    }
                    "format" => {
                        format = Some(Format {
                            designation: String::new(),
                            note: String::new(),
                        })
                    }
                    "linkingEventIdentifier" | "linkingObjectIdentifier" => {
                        link_type.clear();
                        link_value.clear();
                    }
                    _ => {}
                }
                path.push(name);
            }
            XmlEvent::Text(t) => {
                let value = t.unescape().map_err(Error::serialization)?.into_owned();
                let leaf = path.last().map(String::as_str).unwrap_or("");
                match leaf {
                    "objectIdentifierType" => {
                        if let Some(o) = object.as_mut() {
                            o.identifier.identifier_type = value;
                        }
                    }
                    "objectIdentifierValue" => {
                        if let Some(o) = object.as_mut() {
                            o.identifier.value = value;
                        }
                    }
                    "objectCategory" => {
                        if let Some(o) = object.as_mut() {
                            o.category = value;
                        }
                    }
                    "messageDigestAlgorithm" => {
                        if let Some(f) = fixity.as_mut() {
                            f.algorithm = value;
                        }
                    }
                    "messageDigest" => {
                        if let Some(f) = fixity.as_mut() {
                            f.digest = value;
                        }
                    }
                    "messageDigestOriginator" => {
                        if let Some(f) = fixity.as_mut() {
                            f.originator = value;
                        }
                    }
                    "size" => {
                        if let Some(o) = object.as_mut() {
                            o.characteristics.size = value;
                        }
                    }
                    "formatName" => {
                        if let Some(f) = format.as_mut() {
                            f.designation = value;
                        }
                    }
                    "formatNote" => {
                        if let Some(f) = format.as_mut() {
                            f.note = value;
                        }
                    }
                    "originalName" => {
                        if let Some(o) = object.as_mut() {
                            o.original_name = Some(value);
                        }
                    }
                    "linkingEventIdentifierType" | "linkingObjectIdentifierType" => {
                        link_type = value;
                    }
                    "linkingEventIdentifierValue" | "linkingObjectIdentifierValue" => {
                        link_value = value;
                    }
                    "eventIdentifierType" => {
                        if let Some(ev) = event.as_mut() {
                            ev.identifier.identifier_type = value;
                        }
                    }
                    "eventIdentifierValue" => {
                        if let Some(ev) = event.as_mut() {
                            ev.identifier.value = value;
                        }
                    }
                    "eventType" => {
                        if let Some(ev) = event.as_mut() {
                            ev.event_type = value;
                        }
                    }
                    "eventDateTime" => {
                        if let Some(ev) = event.as_mut() {
                            ev.date_time = value;
                        }
                    }
                    "eventOutcome" => {
                        if let Some(ev) = event.as_mut() {
                            ev.outcome = value;
                        }
                    }
                    "eventDetail" => {
                        if let Some(ev) = event.as_mut() {
                            ev.detail = value;
                        }
                    }
                    _ => {}
                }
            }
            XmlEvent::End(_) => {
                let name = path.pop().unwrap_or_default();
                match name.as_str() {
                    "fixity" => {
                        if let (Some(o), Some(f)) = (object.as_mut(), fixity.take()) {
                            o.characteristics.fixities.push(f);
                        }
                    }
                    "format" => {
                        if let (Some(o), Some(f)) = (object.as_mut(), format.take()) {
                            o.characteristics.formats.push(f);
                        }
                    }
                    "linkingEventIdentifier" => {
                        if let Some(o) = object.as_mut() {
                            o.linking_event_identifiers.push(EventIdentifier {
                                identifier_type: link_type.clone(),
                                value: link_value.clone(),
                            });
                        }
                    }
                    "linkingObjectIdentifier" => {
                        if let Some(ev) = event.as_mut() {
                            ev.linking_object_identifiers.push(ObjectIdentifier {
                                identifier_type: link_type.clone(),
                                value: link_value.clone(),
                            });
                        }
                    }
                    "object" => {
                        if let Some(o) = object.take() {
                            record.add_object(o);
                        }
                    }
                    "event" => {
                        if let Some(ev) = event.take() {
                            record.add_event(ev);
                        }
                    }
                    _ => {}
                }
            }
            XmlEvent::Eof => break,
            _ => {}
        }
    }

    Ok(record)
}
