//! Node types for the PREMIS object/event graph
//!
//! Records own their objects and events as flat sequences; cross-links
//! are identifier references resolved by lookup, never embedded
//! ownership. The only way to connect an object and an event is
//! [`Record::link`], which always writes both directions.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Identifier type reported for every minted identifier
pub const IDENTIFIER_TYPE: &str = "uuid4";

/// Object category for uploaded content
pub const OBJECT_CATEGORY_FILE: &str = "file";

/// Identifier of an object node. Minted once per object; globally
/// unique by construction (random 128-bit value rendered as 32 hex
/// digits).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectIdentifier {
    pub identifier_type: String,
    pub value: String,
}

impl ObjectIdentifier {
    pub fn mint() -> Self {
        Self {
            identifier_type: IDENTIFIER_TYPE.to_string(),
            value: Uuid::new_v4().simple().to_string(),
        }
    }
}

/// Identifier of an event node; uniqueness only needs to hold within
/// one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventIdentifier {
    pub identifier_type: String,
    pub value: String,
}

impl EventIdentifier {
    pub fn mint() -> Self {
        Self {
            identifier_type: IDENTIFIER_TYPE.to_string(),
            value: Uuid::new_v4().simple().to_string(),
        }
    }
}

/// One computed digest over the object's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixity {
    /// Algorithm name, e.g. `md5`
    pub algorithm: String,
    /// Hex-encoded digest value
    pub digest: String,
    /// Free-text note naming the implementation that computed it
    pub originator: String,
}

/// One format identification result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    /// MIME-type-like designation, or `undetected`
    pub designation: String,
    /// Free-text provenance of the detection method
    pub note: String,
}

/// Container for an object's formats, fixities and byte size.
/// An object always carries at least one format entry; the detector
/// guarantees this via its `undetected` fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCharacteristics {
    pub fixities: Vec<Fixity>,
    /// Byte count as a decimal string
    pub size: String,
    pub formats: Vec<Format>,
}

/// The subject of a record: one uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub identifier: ObjectIdentifier,
    pub category: String,
    pub characteristics: ObjectCharacteristics,
    /// Client-claimed original filename, stored verbatim
    pub original_name: Option<String>,
    pub(crate) linking_event_identifiers: Vec<EventIdentifier>,
}

impl Object {
    pub fn new(
        identifier: ObjectIdentifier,
        characteristics: ObjectCharacteristics,
        original_name: Option<String>,
    ) -> Self {
        Self {
            identifier,
            category: OBJECT_CATEGORY_FILE.to_string(),
            characteristics,
            original_name,
            linking_event_identifiers: Vec::new(),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            identifier: ObjectIdentifier {
                identifier_type: String::new(),
                value: String::new(),
            },
            category: String::new(),
            characteristics: ObjectCharacteristics {
                fixities: Vec::new(),
                size: String::new(),
                formats: Vec::new(),
            },
            original_name: None,
            linking_event_identifiers: Vec::new(),
        }
    }

    /// Events this object links back to. Populated only through
    /// [`Record::link`].
    pub fn linking_event_identifiers(&self) -> &[EventIdentifier] {
        &self.linking_event_identifiers
    }

    /// The fixity entry for `algorithm`, if one was computed
    pub fn fixity(&self, algorithm: &str) -> Option<&Fixity> {
        self.characteristics
            .fixities
            .iter()
            .find(|f| f.algorithm == algorithm)
    }
}

/// Something that happened to an object, e.g. its description or a
/// fixity check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub identifier: EventIdentifier,
    pub event_type: String,
    /// ISO-8601 timestamp of event creation
    pub date_time: String,
    pub outcome: String,
    pub detail: String,
    pub(crate) linking_object_identifiers: Vec<ObjectIdentifier>,
}

impl Event {
    /// Mints a new event stamped with the current time
    pub fn new(event_type: &str, outcome: &str, detail: &str) -> Self {
        Self {
            identifier: EventIdentifier::mint(),
            event_type: event_type.to_string(),
            date_time: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            outcome: outcome.to_string(),
            detail: detail.to_string(),
            linking_object_identifiers: Vec::new(),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            identifier: EventIdentifier {
                identifier_type: String::new(),
                value: String::new(),
            },
            event_type: String::new(),
            date_time: String::new(),
            outcome: String::new(),
            detail: String::new(),
            linking_object_identifiers: Vec::new(),
        }
    }

    /// Objects this event links to. Populated only through
    /// [`Record::link`].
    pub fn linking_object_identifiers(&self) -> &[ObjectIdentifier] {
        &self.linking_object_identifiers
    }
}

/// A complete record: ordered objects followed by ordered events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    objects: Vec<Object>,
    events: Vec<Event>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Cross-links an object and an event, by identifier value, in
    /// both directions at once. There is no one-sided variant.
    ///
    /// Fails only when either identifier is absent from the record,
    /// which indicates a malformed graph.
    pub fn link(&mut self, object_id: &str, event_id: &str) -> Result<()> {
        let object = self
            .objects
            .iter_mut()
            .find(|o| o.identifier.value == object_id)
            .ok_or_else(|| {
                Error::Serialization(format!("no object with identifier {object_id}"))
            })?;
        let event = self
            .events
            .iter_mut()
            .find(|e| e.identifier.value == event_id)
            .ok_or_else(|| Error::Serialization(format!("no event with identifier {event_id}")))?;

        object
            .linking_event_identifiers
            .push(event.identifier.clone());
        event
            .linking_object_identifiers
            .push(object.identifier.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_object() -> Object {
        Object::new(
            ObjectIdentifier::mint(),
            ObjectCharacteristics {
                fixities: Vec::new(),
                size: "0".to_string(),
                formats: vec![Format {
                    designation: "undetected".to_string(),
                    note: "test".to_string(),
                }],
            },
            None,
        )
    }

    #[test]
    fn minted_identifiers_are_32_hex_digits() {
        let id = ObjectIdentifier::mint();
        assert_eq!(id.identifier_type, "uuid4");
        assert_eq!(id.value.len(), 32);
        assert!(id.value.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn link_writes_both_directions() {
        let mut record = Record::new();
        let object = minimal_object();
        let event = Event::new("description", "success", "test");
        let object_id = object.identifier.value.clone();
        let event_id = event.identifier.value.clone();
        record.add_object(object);
        record.add_event(event);

        record.link(&object_id, &event_id).unwrap();

        assert_eq!(
            record.objects()[0].linking_event_identifiers()[0].value,
            event_id
        );
        assert_eq!(
            record.events()[0].linking_object_identifiers()[0].value,
            object_id
        );
    }

    #[test]
    fn link_rejects_unknown_identifiers() {
        let mut record = Record::new();
        record.add_object(minimal_object());
        record.add_event(Event::new("description", "success", "test"));

        assert!(record.link("missing", "also-missing").is_err());
    }

    #[test]
    fn event_timestamp_is_iso_8601() {
        let event = Event::new("description", "success", "test");
        assert!(chrono::DateTime::parse_from_rfc3339(&event.date_time).is_ok());
    }
}
