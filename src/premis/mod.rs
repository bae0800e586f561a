//! In-memory PREMIS record graph and its XML rendering

pub mod nodes;
pub mod xml;

pub use nodes::{
    Event, EventIdentifier, Fixity, Format, Object, ObjectCharacteristics, ObjectIdentifier,
    Record,
};
