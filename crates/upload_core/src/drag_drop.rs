//! Drop-zone state machine. Every drag event on the zone or the page body is
//! swallowed so a missed drop never makes the host open the file itself.

use shared::domain::SelectedFile;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragEventKind {
    Enter,
    Over,
    Leave,
    Drop,
}

impl DragEventKind {
    pub const ALL: [DragEventKind; 4] = [Self::Enter, Self::Over, Self::Leave, Self::Drop];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop { files: Vec<SelectedFile> },
}

impl DragEvent {
    pub fn kind(&self) -> DragEventKind {
        match self {
            Self::Enter => DragEventKind::Enter,
            Self::Over => DragEventKind::Over,
            Self::Leave => DragEventKind::Leave,
            Self::Drop { .. } => DragEventKind::Drop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragTarget {
    DropZone,
    Body,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropZoneState {
    #[default]
    Idle,
    Hover,
}

/// What the host must do with the native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragDisposition {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl DragDisposition {
    pub const SWALLOW: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOutcome {
    pub disposition: DragDisposition,
    pub state: DropZoneState,
    /// Files dropped on the zone; never empty when present.
    pub dropped: Option<Vec<SelectedFile>>,
}

#[derive(Debug, Default)]
pub struct DropZone {
    state: DropZoneState,
}

impl DropZone {
    pub fn state(&self) -> DropZoneState {
        self.state
    }

    pub fn handle(&mut self, target: DragTarget, event: DragEvent) -> DragOutcome {
        if target == DragTarget::Body {
            trace!(kind = ?event.kind(), "swallowed body drag event");
            return DragOutcome {
                disposition: DragDisposition::SWALLOW,
                state: self.state,
                dropped: None,
            };
        }

        let next = match event.kind() {
            DragEventKind::Enter | DragEventKind::Over => DropZoneState::Hover,
            DragEventKind::Leave | DragEventKind::Drop => DropZoneState::Idle,
        };
        if next != self.state {
            debug!(from = ?self.state, to = ?next, "drop zone transition");
            self.state = next;
        }

        let dropped = match event {
            DragEvent::Drop { files } if !files.is_empty() => Some(files),
            _ => None,
        };

        DragOutcome {
            disposition: DragDisposition::SWALLOW,
            state: self.state,
            dropped,
        }
    }
}
