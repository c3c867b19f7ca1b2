use gridfall_core::ExecuteError;

/// Errors surfaced by the session input surface.
///
/// These are rejections of player-facing requests; the turn loop itself
/// never propagates them as panics.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("the session is over")]
    SessionOver,

    #[error("an action is still resolving")]
    ActionInFlight,

    #[error("a presentation motion is still in flight")]
    MotionInFlight,

    #[error(transparent)]
    Execute(#[from] ExecuteError),
}
