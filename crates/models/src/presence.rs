use serde::Serialize;

/// Whether a (user, course) follow or (user, review) like row exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Absent,
    Present,
}

/// What a relation toggle asks of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Follow,
    Unfollow,
    Toggle,
}

/// Store work needed to carry out a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Insert,
    Delete,
    Nothing,
}

impl Effect {
    /// Change to apply to a denormalized counter of present rows
    pub fn counter_delta(self) -> i32 {
        match self {
            Self::Insert => 1,
            Self::Delete => -1,
            Self::Nothing => 0,
        }
    }
}

impl Presence {
    pub fn from_exists(exists: bool) -> Self {
        if exists { Self::Present } else { Self::Absent }
    }

    pub fn is_present(self) -> bool {
        self == Self::Present
    }

    /// Transition table:
    ///
    /// | state   | follow             | unfollow          | toggle             |
    /// |---------|--------------------|-------------------|--------------------|
    /// | Absent  | Present (insert)   | Absent (nothing)  | Present (insert)   |
    /// | Present | Present (nothing)  | Absent (delete)   | Absent (delete)    |
    pub fn transition(self, action: Action) -> (Presence, Effect) {
        match (self, action) {
            (Self::Absent, Action::Follow) => (Self::Present, Effect::Insert),
            (Self::Absent, Action::Unfollow) => (Self::Absent, Effect::Nothing),
            (Self::Absent, Action::Toggle) => (Self::Present, Effect::Insert),
            (Self::Present, Action::Follow) => (Self::Present, Effect::Nothing),
            (Self::Present, Action::Unfollow) => (Self::Absent, Effect::Delete),
            (Self::Present, Action::Toggle) => (Self::Absent, Effect::Delete),
        }
    }
}
