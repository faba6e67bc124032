use std::fmt::{self, Display, Formatter};

/// Status updates emitted while a stitch runs, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StitchEvent {
    Loading { total: usize },
    FileRead { name: String, rows: usize },
    FileSkipped { name: String, reason: String },
    Combining { tables: usize },
    DuplicatesRemoved { removed: usize },
    Finished { rows: usize },
}

impl StitchEvent {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::FileSkipped { .. })
    }
}

impl Display for StitchEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading { .. } => f.write_str("Loading spreadsheets ..."),
            Self::FileRead { name, .. } => write!(f, " * {name}"),
            Self::FileSkipped { name, reason } => write!(f, " * SKIPPED: {name} ({reason})"),
            Self::Combining { .. } => f.write_str("Combining spreadsheets..."),
            Self::DuplicatesRemoved { removed } => {
                write!(f, "Removed {removed} duplicate entries")
            }
            Self::Finished { .. } => f.write_str("Spreadsheets stitched!"),
        }
    }
}

/// Receives status updates; any `FnMut(&StitchEvent)` closure works.
pub trait Progress {
    fn report(&mut self, event: &StitchEvent);
}

impl<F> Progress for F
where
    F: FnMut(&StitchEvent),
{
    fn report(&mut self, event: &StitchEvent) {
        self(event);
    }
}

#[cfg(test)]
mod tests {
    use super::StitchEvent;

    #[test]
    fn renders_status_lines() {
        let skipped = StitchEvent::FileSkipped {
            name: "c.txt".to_string(),
            reason: "bad".to_string(),
        };
        assert_eq!(skipped.to_string(), " * SKIPPED: c.txt (bad)");
        assert!(skipped.is_error());

        let removed = StitchEvent::DuplicatesRemoved { removed: 3 };
        assert_eq!(removed.to_string(), "Removed 3 duplicate entries");
        assert!(!removed.is_error());
    }
}
