use pathviz_paths::Algorithm;
use serde::{Deserialize, Serialize};

/// Control commands sent by a UI to a controller or comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Start,
    PauseToggle,
    /// First press halts and freezes the view, second press clears it.
    Stop,
    NewMaze,
    SetSpeedFactor(f64),
    SelectAlgorithm(Algorithm),
    /// Tear down the run and hand control back to algorithm selection.
    Back,
    /// Double the speed factor.
    SpeedUp,
    /// Halve the speed factor.
    SlowDown,
    ResetSpeed,
}

/// What the caller should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// Leave the playback screen.
    Back,
}
