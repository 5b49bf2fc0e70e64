/// The three mutually exclusive views of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Connect prompt.
    Disconnected,
    /// Connected, diary not initialized in this session yet.
    AwaitingInit,
    /// Entry form and entry list.
    Ready,
}

impl Screen {
    pub fn select(connected: bool, initialized: bool) -> Self {
        match (connected, initialized) {
            (false, _) => Self::Disconnected,
            (true, false) => Self::AwaitingInit,
            (true, true) => Self::Ready,
        }
    }
}
