//! Assembles the base object/event graph for one upload

use tracing::{debug, instrument};

use crate::digest::ContentDigests;
use crate::error::Result;
use crate::premis::{Event, Format, Object, ObjectCharacteristics, ObjectIdentifier, Record};

/// Detail text carried by every generation event
pub const GENERATION_EVENT_DETAIL: &str = "Described via a PREMIS metadata record";

/// Builds the one-object, one-event base record
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder;

impl RecordBuilder {
    /// Constructs the object from the digest pass and detection
    /// results, mints the generation event, and links the two. The
    /// original name is stored verbatim; safe encoding is the
    /// caller's responsibility.
    #[instrument(skip(digests, formats))]
    pub fn build(
        digests: &ContentDigests,
        formats: Vec<Format>,
        original_name: Option<&str>,
    ) -> Result<Record> {
        let object = Object::new(
            ObjectIdentifier::mint(),
            ObjectCharacteristics {
                fixities: digests.fixities(),
                size: digests.size.to_string(),
                formats,
            },
            original_name.map(str::to_owned),
        );
        let event = Event::new("description", "success", GENERATION_EVENT_DETAIL);

        let object_id = object.identifier.value.clone();
        let event_id = event.identifier.value.clone();
        debug!(%object_id, %event_id, "base record assembled");

        let mut record = Record::new();
        record.add_object(object);
        record.add_event(event);
        record.link(&object_id, &event_id)?;
        Ok(record)
    }
}
