//! User-invocable preview commands.

use crate::uri::DocumentUri;
use std::path::PathBuf;
use std::str::FromStr;

/// Position of a view, at most three views are shown side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewColumn {
    One,
    Two,
    Three,
}

impl ViewColumn {
    /// The column right of this one, saturating at [`ViewColumn::Three`].
    pub fn beside(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two | Self::Three => Self::Three,
        }
    }

    /// 1-based index of the column.
    pub fn index(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// The editor the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEditor {
    pub path: PathBuf,
    pub column: ViewColumn,
}

/// Request to the host to show a preview in a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowPreview {
    pub uri: DocumentUri,
    pub column: ViewColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewCommand {
    /// Preview the current document in its own view.
    Preview,
    /// Preview the current document in the view next to it.
    PreviewToSide,
}

impl PreviewCommand {
    pub const ALL: &'static [PreviewCommand] = &[Self::Preview, Self::PreviewToSide];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Preview => "markdown.preview",
            Self::PreviewToSide => "markdown.previewToSide",
        }
    }

    /// Works out where the preview of the active editor goes.
    ///
    /// Returns `None` when there is no active editor.
    ///
    /// ```
    /// use mdpreview_core::{ActiveEditor, PreviewCommand, ViewColumn};
    ///
    /// let editor = ActiveEditor { path: "/a.md".into(), column: ViewColumn::One };
    /// let show = PreviewCommand::PreviewToSide.resolve(Some(&editor)).unwrap();
    /// assert_eq!(show.column, ViewColumn::Two);
    /// ```
    pub fn resolve(&self, active_editor: Option<&ActiveEditor>) -> Option<ShowPreview> {
        let editor = active_editor?;
        let column = match self {
            Self::Preview => editor.column,
            Self::PreviewToSide => editor.column.beside(),
        };
        Some(ShowPreview {
            uri: DocumentUri::preview_of(&editor.path),
            column,
        })
    }
}

impl FromStr for PreviewCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|command| command.id() == s)
            .copied()
            .ok_or_else(|| format!("unknown preview command: {s}"))
    }
}
