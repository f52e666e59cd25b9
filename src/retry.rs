/// Re-authentication budget of a single call chain.
///
/// A call starts in `Initial`; the only transition is `Initial -> Retried`,
/// so a call refreshes the session at most once.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum RetryState {
    #[default]
    Initial,
    Retried,
}

impl RetryState {
    /// Consumes the budget if a refresh is allowed. Returns `true` when the
    /// caller should refresh the session and re-send the request.
    pub(crate) fn try_consume(&mut self, reauthenticate: bool) -> bool {
        if !reauthenticate {
            return false;
        }
        match self {
            Self::Initial => {
                *self = Self::Retried;
                true
            }
            Self::Retried => false,
        }
    }
}
