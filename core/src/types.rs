/// Level number, starting at 1.
pub type Level = u32;

/// Count type used for attempt limits and attempts taken.
pub type Attempts = u32;

/// Score awarded for solved rounds and accumulated by a session.
pub type Points = u32;
