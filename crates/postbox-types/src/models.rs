/// A validated, normalized contact message ready to be stored.
///
/// `name` and `message` are trimmed and HTML-escaped, `email` is canonical.
/// The row id is assigned by the store and never read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}
