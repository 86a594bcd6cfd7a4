use super::post::{PendingOp, PostUnit};

/// Maximum post length accepted by the server.
pub const MAX_CONTENT_CHARS: usize = 280;

/// Edit-in-place state of one post unit.
///
/// `Display -> Editing -> Saving -> Display` on a confirmed save,
/// `Saving -> Editing` when the server refuses or the request fails, and
/// `Editing -> Display` on cancel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Display,
    Editing,
    Saving { draft: String },
}

impl EditorState {
    /// True while the editable field replaces the content.
    pub fn is_open(&self) -> bool {
        !matches!(self, EditorState::Display)
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, EditorState::Saving { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditRefusal {
    #[error("post is not yours to edit")]
    NotPoster,
    #[error("post is busy")]
    Busy,
    #[error("post is not being edited")]
    NotEditing,
    #[error("post cannot be empty")]
    Empty,
    #[error("post is longer than {MAX_CONTENT_CHARS} characters")]
    TooLong,
}

/// Checks a draft against the server's content rules.
pub fn validate_content(text: &str) -> Result<(), EditRefusal> {
    if text.trim().is_empty() {
        return Err(EditRefusal::Empty);
    }
    if text.chars().count() > MAX_CONTENT_CHARS {
        return Err(EditRefusal::TooLong);
    }
    Ok(())
}

impl PostUnit {
    /// Enters edit mode and returns the text to prefill the field with.
    pub fn open_editor(&mut self) -> Result<String, EditRefusal> {
        if !self.record.viewer_is_poster {
            return Err(EditRefusal::NotPoster);
        }
        if self.is_busy() || self.editor.is_open() {
            return Err(EditRefusal::Busy);
        }
        self.editor = EditorState::Editing;
        Ok(self.record.content.clone())
    }

    /// Leaves edit mode without a request. Displayed content is untouched.
    pub fn cancel_editor(&mut self) {
        if self.editor == EditorState::Editing {
            self.editor = EditorState::Display;
        }
    }

    /// Moves to `Saving` with `draft`; the caller sends the request.
    pub fn submit_edit(&mut self, draft: String) -> Result<(), EditRefusal> {
        match self.editor {
            EditorState::Editing => {}
            EditorState::Saving { .. } => return Err(EditRefusal::Busy),
            EditorState::Display => return Err(EditRefusal::NotEditing),
        }
        validate_content(&draft)?;
        self.pending = Some(PendingOp::Edit);
        self.editor = EditorState::Saving { draft };
        Ok(())
    }

    /// Server accepted the edit: display the new content.
    pub fn confirm_edit(&mut self) {
        if let EditorState::Saving { draft } = std::mem::take(&mut self.editor) {
            self.record.content = draft;
        }
        self.pending = None;
    }

    /// Server refused or the request failed: back to `Editing`, returning the
    /// draft so the field can be refilled.
    pub fn reject_edit(&mut self) -> Option<String> {
        match std::mem::take(&mut self.editor) {
            EditorState::Saving { draft } => {
                self.editor = EditorState::Editing;
                self.pending = None;
                Some(draft)
            }
            other => {
                self.editor = other;
                None
            }
        }
    }
}
