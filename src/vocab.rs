//! vocab.rs
//!
//! Real vocabulary URIs used in the final, emitted query tree. The parser
//! treats these as opaque strings; it never resolves or validates them
//! against an actual ontology (that is the downstream engine's job, per the
//! scope laid out in `lib.rs`).
//!
//! The `internal://dateperiod/...` scheme used between the date-period
//! passes and [`crate::datefolder`] is built with [`dateperiod_property`]
//! rather than listed here, since it is parameterized by [`crate::term::Period`].

pub const FILE_SIZE: &str = "nie:filesize";
pub const FILE_NAME: &str = "nfo:fileName";
pub const MESSAGE_FROM: &str = "nmo:from";
pub const MESSAGE_TO: &str = "nmo:to";
pub const MESSAGE_SUBJECT: &str = "nmo:messageSubject";
pub const SENT_DATE: &str = "nmo:sentDate";
pub const RECEIVED_DATE: &str = "nmo:receivedDate";
pub const CREATED_DATE: &str = "nie:contentCreated";
pub const MODIFIED_DATE: &str = "nie:contentLastModified";
pub const HAS_TAG: &str = "nao:hasTag";
pub const RELATED_TO: &str = "nie:relatedTo";

pub const TYPE_FILE: &str = "nfo:FileDataObject";
pub const TYPE_IMAGE: &str = "nfo:Image";
pub const TYPE_VIDEO: &str = "nfo:Video";
pub const TYPE_AUDIO: &str = "nfo:Audio";
pub const TYPE_DOCUMENT: &str = "nfo:Document";
pub const TYPE_EMAIL: &str = "nmo:Email";

/// Scheme prefix used by synthetic date-period comparisons. Never appears
/// in a term handed back to the caller of [`crate::Parser::parse`].
pub const INTERNAL_DATEPERIOD_SCHEME: &str = "internal://dateperiod/";

/// Builds a synthetic `internal://dateperiod/<period>?offset|value` URI for
/// [`crate::passes::dateperiods`]. Decoded back by
/// [`crate::datefolder::decode_synthetic`].
pub fn dateperiod_property(period: crate::term::Period, offset: bool) -> String {
    format!(
        "{}{}?{}",
        INTERNAL_DATEPERIOD_SCHEME,
        period,
        if offset { "offset" } else { "value" }
    )
}
