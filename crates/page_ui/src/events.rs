//! Events the host page feeds into [`crate::PageApp`].

use crate::document::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Scroll { y: f64 },
    Click { target: NodeId },
    KeyDown { key: String },
    /// Typing into a field. The value is written to the element first.
    Input { target: NodeId, value: String },
    /// Committed change of a field. The value is written to the element first.
    Change { target: NodeId, value: String },
    Submit { form: NodeId },
    Reset { form: NodeId },
    /// The element scrolled into the viewport.
    BecameVisible { target: NodeId },
    /// Browser back/forward.
    PopState,
}

impl PageEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::Scroll { .. } => "scroll",
            PageEvent::Click { .. } => "click",
            PageEvent::KeyDown { .. } => "keydown",
            PageEvent::Input { .. } => "input",
            PageEvent::Change { .. } => "change",
            PageEvent::Submit { .. } => "submit",
            PageEvent::Reset { .. } => "reset",
            PageEvent::BecameVisible { .. } => "visible",
            PageEvent::PopState => "popstate",
        }
    }

    pub fn is_escape(&self) -> bool {
        matches!(self, PageEvent::KeyDown { key } if key == "Escape")
    }
}

/// Whether the browser's default action for an event should still run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Continue,
    PreventDefault,
}

impl Flow {
    pub fn merge(self, other: Flow) -> Flow {
        if self == Flow::PreventDefault || other == Flow::PreventDefault {
            Flow::PreventDefault
        } else {
            Flow::Continue
        }
    }

    pub fn is_prevented(self) -> bool {
        self == Flow::PreventDefault
    }
}
