use thiserror::Error;

/// Construction-time failures.
///
/// Everything here is fatal to the call that produced it: a filter either
/// comes out fully bound or not at all. Validation failures are not errors -
/// they flow back through [`crate::filter::FilterCore::validate`] as a bool
/// plus a stored message.
#[derive(Debug, Error)]
pub enum Error {
    /// Specification string did not match the grammar (bad fragment, empty
    /// type id, repeated key).
    #[error("malformed filter spec: {0}")]
    MalformedSpec(String),

    /// No implementation registered under the canonical type key.
    #[error("unknown filter type \"{0}\"")]
    UnknownFilterType(String),

    /// A declared construction parameter had neither a supplied value nor a
    /// default.
    #[error("argument \"{param}\" for filter \"{filter_type}\" is required")]
    MissingRequiredArgument {
        param: String,
        filter_type: &'static str,
    },

    /// Bound value cannot be coerced under the configured cast policy.
    #[error("cannot cast \"{value}\" to {target}")]
    Cast {
        value: String,
        target: &'static str,
    },

    /// Bound value of a date filter does not parse with its format.
    #[error("invalid date \"{value}\" for format \"{format}\"")]
    Date { value: String, format: String },
}
