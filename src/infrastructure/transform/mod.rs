//! Transform Implementations

mod command;
mod copy;

use std::sync::Arc;

use crate::config::TransformConfig;
use crate::domain::ports::Transform;

pub use command::CommandTransform;
pub use copy::CopyTransform;

/// The configured transform: the external command if one is set, otherwise
/// a plain copy.
pub fn from_config(config: &TransformConfig) -> Arc<dyn Transform> {
    match CommandTransform::new(&config.command) {
        Some(command) => Arc::new(command),
        None => Arc::new(CopyTransform::new()),
    }
}
