//! Transform error types.

use std::path::PathBuf;

/// Error that aborts a transform pass.
///
/// Authoring mistakes (unclosed or empty radio lists) are not errors; they
/// are reported through [`TransformOutput::warnings`](crate::TransformOutput).
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// A radio option has no source line mapping.
    ///
    /// The tokenizer maps every list item, so this is an internal
    /// consistency failure rather than bad input.
    #[error("failed to parse line mapping for radio option {name:?}")]
    MissingLineMapping {
        /// Raw name of the option.
        name: String,
    },
    /// A runtime asset to bundle does not exist in the asset directory.
    #[error("runtime asset not found: {}", .0.display())]
    MissingAsset(PathBuf),
    /// Copying a runtime asset failed.
    #[error("failed to bundle {}: {source}", path.display())]
    Bundle {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
