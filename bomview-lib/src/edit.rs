//! Cell editors
//!
//! Editable columns name one of a fixed set of editor kinds. Every editor
//! accepts the same [`EditInput`] and produces an [`EditCommit`], so the model
//! can open and commit edits without knowing which kind it is dealing with.

use serde::Deserialize;
use serde::Serialize;

/// Editors a column can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorKind {
    /// Any number of catalog entries, one per line in the cell.
    MultiSelectChecklist,
    /// Exactly one catalog entry.
    SingleSelect,
    /// Free text.
    PlainText,
}

impl EditorKind {
    /// Opens an editor on the current cell text and the available options.
    pub fn begin(self, current: &str, catalog: &[String]) -> EditSession {
        match self {
            EditorKind::MultiSelectChecklist => EditSession::Checklist(ChecklistEditor::new(current, catalog)),
            EditorKind::SingleSelect => EditSession::Choice(ChoiceEditor::new(current, catalog)),
            EditorKind::PlainText => EditSession::Text(TextEditor::new(current)),
        }
    }
}

/// A user action applied to an open editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditInput {
    /// Flip one checklist entry.
    Toggle(String),
    /// Pick one entry.
    Select(String),
    /// Replace the text.
    Text(String),
}

/// The outcome of an edit, handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommit {
    pub kind: EditorKind,
    /// Selected entries, or the single text for plain text edits.
    pub values: Vec<String>,
}

impl EditCommit {
    /// Returns the cell text: one value per line.
    pub fn display(&self) -> String {
        self.values.join("\n")
    }

    /// Returns the first value, if any.
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// Shared interface of all editors.
pub trait CellEditor {
    fn kind(&self) -> EditorKind;

    /// Applies one input. Returns `false` if the input does not apply.
    fn apply(&mut self, input: EditInput) -> bool;

    fn commit(&self) -> EditCommit;
}

/// One entry of a checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistEntry {
    pub label: String,
    pub checked: bool,
}

/// Multi-select editor; current entries are listed first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistEditor {
    entries: Vec<ChecklistEntry>,
}

impl ChecklistEditor {
    fn new(current: &str, catalog: &[String]) -> Self {
        let mut selected: Vec<&str> = current.split('\n').filter(|s| !s.is_empty()).collect();
        selected.sort_unstable();
        selected.dedup();

        let mut rest: Vec<&str> = catalog
            .iter()
            .map(String::as_str)
            .filter(|item| !selected.contains(item))
            .collect();
        rest.sort_unstable();
        rest.dedup();

        let entries = selected
            .iter()
            .map(|label| ChecklistEntry {
                label: label.to_string(),
                checked: true,
            })
            .chain(rest.iter().map(|label| ChecklistEntry {
                label: label.to_string(),
                checked: false,
            }))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ChecklistEntry] {
        &self.entries
    }
}

impl CellEditor for ChecklistEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::MultiSelectChecklist
    }

    fn apply(&mut self, input: EditInput) -> bool {
        let EditInput::Toggle(label) = input else {
            return false;
        };
        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => {
                entry.checked = !entry.checked;
                true
            }
            None => false,
        }
    }

    fn commit(&self) -> EditCommit {
        EditCommit {
            kind: self.kind(),
            values: self
                .entries
                .iter()
                .filter(|e| e.checked)
                .map(|e| e.label.clone())
                .collect(),
        }
    }
}

/// Single-select editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceEditor {
    options: Vec<String>,
    selected: Option<String>,
}

impl ChoiceEditor {
    fn new(current: &str, catalog: &[String]) -> Self {
        let selected = catalog.iter().find(|o| *o == current).cloned();
        Self {
            options: catalog.to_vec(),
            selected,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

impl CellEditor for ChoiceEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::SingleSelect
    }

    fn apply(&mut self, input: EditInput) -> bool {
        let EditInput::Select(option) = input else {
            return false;
        };
        if self.options.contains(&option) {
            self.selected = Some(option);
            true
        } else {
            false
        }
    }

    fn commit(&self) -> EditCommit {
        EditCommit {
            kind: self.kind(),
            values: self.selected.iter().cloned().collect(),
        }
    }
}

/// Plain text editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditor {
    text: String,
}

impl TextEditor {
    fn new(current: &str) -> Self {
        Self {
            text: current.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl CellEditor for TextEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::PlainText
    }

    fn apply(&mut self, input: EditInput) -> bool {
        match input {
            EditInput::Text(text) => {
                self.text = text;
                true
            }
            _ => false,
        }
    }

    fn commit(&self) -> EditCommit {
        EditCommit {
            kind: self.kind(),
            values: vec![self.text.clone()],
        }
    }
}

/// An open editor of one of the supported kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSession {
    Checklist(ChecklistEditor),
    Choice(ChoiceEditor),
    Text(TextEditor),
}

impl EditSession {
    fn editor(&self) -> &dyn CellEditor {
        match self {
            EditSession::Checklist(e) => e,
            EditSession::Choice(e) => e,
            EditSession::Text(e) => e,
        }
    }

    fn editor_mut(&mut self) -> &mut dyn CellEditor {
        match self {
            EditSession::Checklist(e) => e,
            EditSession::Choice(e) => e,
            EditSession::Text(e) => e,
        }
    }

    pub fn toggle(&mut self, label: impl Into<String>) -> bool {
        self.apply(EditInput::Toggle(label.into()))
    }

    pub fn select(&mut self, option: impl Into<String>) -> bool {
        self.apply(EditInput::Select(option.into()))
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        self.apply(EditInput::Text(text.into()))
    }
}

impl CellEditor for EditSession {
    fn kind(&self) -> EditorKind {
        self.editor().kind()
    }

    fn apply(&mut self, input: EditInput) -> bool {
        self.editor_mut().apply(input)
    }

    fn commit(&self) -> EditCommit {
        self.editor().commit()
    }
}
