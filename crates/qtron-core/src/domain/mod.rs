//! Domain model (documents, config, ids, errors, tool outcomes).

pub mod config;
pub mod document;
pub mod errors;
pub mod ids;
pub mod outcome;

pub use config::{
    AcquisitionConfig, InvocationTimeouts, Settings, ToolLayout, DEFAULT_TOOL_PATH,
    OVERALL_TIMEOUT, PROCESS_TIMEOUT, STALE_RESULTS_DIR_NAME,
};
pub use document::{Document, DocumentOrigin};
pub use errors::{AcquireError, InvocationError, SimplifyError};
pub use ids::{ArtifactId, Id, IdMarker};
pub use outcome::{ToolInvocation, ToolOutput};
