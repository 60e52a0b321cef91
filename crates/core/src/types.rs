/// Form ids are opaque strings: server-assigned UUIDs or client-generated
/// draft ids (`draft-{epochMillis}-{suffix}`), accepted interchangeably.
pub type FormId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Owner id recorded on documents saved without an authenticated user.
pub const ANON_USER_ID: &str = "anon";
