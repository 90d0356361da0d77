//! Per-element recognizer state and the gesture input vocabulary.

use crate::foundation::core::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizerKind {
    Tap,
    Rotation,
    Pinch,
    Pan,
}

impl RecognizerKind {
    pub fn is_continuous(self) -> bool {
        !matches!(self, Self::Tap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecognizerState {
    #[default]
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl RecognizerState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }

    pub fn is_inactive(self) -> bool {
        !self.is_active()
    }
}

/// Phase reported by a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GesturePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }

    pub(crate) fn to_state(self) -> RecognizerState {
        match self {
            Self::Began => RecognizerState::Began,
            Self::Changed => RecognizerState::Changed,
            Self::Ended => RecognizerState::Ended,
            Self::Cancelled => RecognizerState::Cancelled,
            Self::Failed => RecognizerState::Failed,
        }
    }
}

/// One recognizer transition delivered to the canvas.
///
/// Values are cumulative since the gesture began: `rotation` in radians, `scale` as a factor and
/// `translation` in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Tap,
    Rotation { phase: GesturePhase, rotation: f64 },
    Pinch { phase: GesturePhase, scale: f64 },
    Pan { phase: GesturePhase, translation: Vec2 },
}

impl GestureEvent {
    pub fn kind(&self) -> RecognizerKind {
        match self {
            Self::Tap => RecognizerKind::Tap,
            Self::Rotation { .. } => RecognizerKind::Rotation,
            Self::Pinch { .. } => RecognizerKind::Pinch,
            Self::Pan { .. } => RecognizerKind::Pan,
        }
    }

    pub fn phase(&self) -> Option<GesturePhase> {
        match *self {
            Self::Tap => None,
            Self::Rotation { phase, .. } | Self::Pinch { phase, .. } | Self::Pan { phase, .. } => {
                Some(phase)
            }
        }
    }
}

/// Two recognizers on the same element may run together unless one of them is a tap.
pub fn should_recognize_simultaneously(a: RecognizerKind, b: RecognizerKind) -> bool {
    a != RecognizerKind::Tap && b != RecognizerKind::Tap
}

/// The four recognizers attached to every element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Recognizers {
    tap: RecognizerState,
    rotation: RecognizerState,
    pinch: RecognizerState,
    pan: RecognizerState,
}

impl Recognizers {
    pub fn state(&self, kind: RecognizerKind) -> RecognizerState {
        match kind {
            RecognizerKind::Tap => self.tap,
            RecognizerKind::Rotation => self.rotation,
            RecognizerKind::Pinch => self.pinch,
            RecognizerKind::Pan => self.pan,
        }
    }

    pub(crate) fn set(&mut self, kind: RecognizerKind, state: RecognizerState) {
        let slot = match kind {
            RecognizerKind::Tap => &mut self.tap,
            RecognizerKind::Rotation => &mut self.rotation,
            RecognizerKind::Pinch => &mut self.pinch,
            RecognizerKind::Pan => &mut self.pan,
        };
        *slot = state;
    }

    pub fn all_inactive(&self) -> bool {
        self.iter().all(|(_, s)| s.is_inactive())
    }

    /// Active recognizers that `kind` could not run alongside.
    pub fn blocks(&self, kind: RecognizerKind) -> bool {
        self.iter()
            .any(|(k, s)| k != kind && s.is_active() && !should_recognize_simultaneously(k, kind))
    }

    fn iter(&self) -> impl Iterator<Item = (RecognizerKind, RecognizerState)> {
        [
            (RecognizerKind::Tap, self.tap),
            (RecognizerKind::Rotation, self.rotation),
            (RecognizerKind::Pinch, self.pinch),
            (RecognizerKind::Pan, self.pan),
        ]
        .into_iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/gesture.rs"]
mod tests;
