/// Errors surfaced at the crate's string and collaborator boundaries.
///
/// Interaction handlers never fail; missing state is a no-op there.
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    /// Host configuration JSON could not be parsed.
    #[error("invalid annotate config: {0}")]
    Config(#[from] serde_json::Error),
    /// A shape kind name did not match any known kind.
    #[error("unknown shape kind: {0}")]
    UnknownShapeKind(String),
    /// A numeric style attribute was non-finite or not positive.
    #[error("invalid {field}: {value}")]
    InvalidStyle { field: &'static str, value: f64 },
    /// The export collaborator failed to produce an image.
    #[error("rasterize failed: {0}")]
    Rasterize(String),
}
