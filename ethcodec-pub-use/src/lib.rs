//! Re-exports of the third-party crates shared across the workspace, so that
//! downstream users name one version of each.

pub use base64;
pub use hex;
pub use serde;
pub use serde_json;
pub use thiserror;
pub use tracing;
