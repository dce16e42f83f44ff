//! Editor window visibility, tracked apart from the windowing backend.
//!
//! eframe shows the root viewport after its first frame whatever the
//! builder asked for, so a window meant to start hidden has to be hidden
//! again on that frame.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Let the close through and exit.
    Exit,
    /// Cancel the close and hide the window instead.
    Hide,
}

#[derive(Debug)]
pub struct WindowVisibility {
    visible: bool,
    first_frame: bool,
}

impl WindowVisibility {
    pub fn new(show_on_start: bool) -> Self {
        Self {
            visible: show_on_start,
            first_frame: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Visibility to force on the first frame. `None` on later frames, or
    /// when the window was asked for at startup.
    pub fn first_frame(&mut self) -> Option<bool> {
        if !std::mem::take(&mut self.first_frame) {
            return None;
        }
        (!self.visible).then_some(false)
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Decides what a close request does; hides unless quitting.
    pub fn close_requested(&mut self, quitting: bool) -> CloseAction {
        if quitting {
            return CloseAction::Exit;
        }
        self.visible = false;
        CloseAction::Hide
    }
}
