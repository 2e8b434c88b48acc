use pathviz_mazegen::MazeGenError;
use pathviz_paths::SearchError;
use thiserror::Error;

use crate::state::RunState;

/// Errors returned by the playback controllers.
///
/// Every error is terminal to the one command that raised it; controller
/// state is left as it was, except for [`InvalidSpeed`](Self::InvalidSpeed)
/// which still pins the speed to the configured minimum.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The command is not valid in the current run state.
    #[error("invalid state: cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: RunState,
    },

    /// Speed factors must be positive and finite.
    #[error("invalid speed factor {0}: must be positive and finite")]
    InvalidSpeed(f64),

    #[error("invalid playback config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    MazeGen(#[from] MazeGenError),
}
