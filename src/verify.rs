//! Optional verification of a client-asserted MD5
//!
//! Only invoked when the client supplied a digest at all; absence of
//! one skips this step entirely and is not an error.

use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::premis::{Event, Record};

/// Detail text carried by the fixity-confirmation event
pub const FIXITY_EVENT_DETAIL: &str =
    "remote PREMIS generator confirmed md5 checksum matched the checksum provided by the client";

#[derive(Debug, Clone, Default)]
pub struct FixityVerifier;

impl FixityVerifier {
    /// Compares the client digest against the record's computed MD5.
    ///
    /// Both sides are ASCII case-folded before comparison, so a
    /// client sending uppercase hex is not rejected. On match the
    /// record gains a linked `fixity check` event; on mismatch the
    /// record must not be serialized.
    #[instrument(skip(record))]
    pub fn verify_md5(record: &mut Record, client_md5: &str) -> Result<()> {
        let object = record
            .objects()
            .first()
            .ok_or_else(|| Error::Serialization("record has no object".to_string()))?;
        let computed = object
            .fixity("md5")
            .map(|f| f.digest.clone())
            .ok_or_else(|| Error::Serialization("object has no md5 fixity".to_string()))?;

        let client = client_md5.trim();
        if !computed.eq_ignore_ascii_case(client) {
            return Err(Error::FixityMismatch {
                client: client.to_string(),
                computed,
            });
        }

        let event = Event::new("fixity check", "success", FIXITY_EVENT_DETAIL);
        let object_id = object.identifier.value.clone();
        let event_id = event.identifier.value.clone();
        record.add_event(event);
        record.link(&object_id, &event_id)?;

        info!(%object_id, "client md5 confirmed");
        Ok(())
    }
}
