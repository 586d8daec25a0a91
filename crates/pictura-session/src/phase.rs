use serde::Serialize;

/// Lifecycle phase of the current generation attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is outstanding
    InFlight,
    /// The last attempt produced an image
    Succeeded,
    /// The last attempt failed
    Failed,
}

/// The single panel the page renders for a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Form only
    Empty,
    /// Loading spinner
    Spinner,
    /// Error panel
    Error,
    /// Image panel with download action
    Image,
}

impl Phase {
    /// Panel to render for this phase
    pub const fn view(self) -> View {
        match self {
            Self::Idle => View::Empty,
            Self::InFlight => View::Spinner,
            Self::Succeeded => View::Image,
            Self::Failed => View::Error,
        }
    }

    /// Whether the submit action must be disabled
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::InFlight)
    }
}
