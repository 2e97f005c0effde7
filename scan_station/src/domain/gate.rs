// Debounce gate state shared by the scan flow.

/// Whether the gate accepts a new token.
///
/// `Closed` covers both the in-flight request and the cooldown after its
/// outcome was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Open,
    Closed,
}

impl GateState {
    pub fn is_open(self) -> bool {
        matches!(self, GateState::Open)
    }
}
