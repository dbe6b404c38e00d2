use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored enum column holds a value the application does not know about
    ///
    /// Indicates the database was written by a newer or modified version of the
    /// application. Results in a 500 Internal Server Error.
    #[error("Unknown {kind} value stored in database: '{value}'")]
    UnknownStoredValue {
        /// The kind of value, e.g. "receipt status"
        kind: &'static str,
        /// The unrecognised stored value
        value: String,
    },

    /// A JSON column could not be decoded
    #[error("Failed to decode stored JSON column '{column}': {source}")]
    StoredJson {
        /// Name of the column holding the JSON text
        column: &'static str,
        /// The underlying decoding error
        #[source]
        source: serde_json::Error,
    },
}
