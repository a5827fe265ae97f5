use std::path::PathBuf;

use thiserror::Error;

use crate::gfx::scene::loader::LoadError;
use crate::gfx::scene::SceneError;

/// Errors reported to callers of the engine
///
/// None of these are raised from inside the frame loop; a frame never fails.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("immersive VR is not supported on this device")]
    XrUnsupported,
    #[error("an immersive session is already active")]
    SessionActive,
    #[error("no immersive session is active")]
    NoSession,
    #[error("failed to load model {path:?}: {source}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: LoadError,
    },
    #[error(transparent)]
    Scene(#[from] SceneError),
}
