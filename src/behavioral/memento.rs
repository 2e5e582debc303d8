// Memento
//
// Intent: save and restore an object's previous state without revealing the
// details of its implementation.
//
// Memento fields are private to this module: the caretaker can store and hand
// back mementos, only the originator can look inside.

use chrono::{Local, NaiveDateTime};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Originator {
    state: String,
}

impl Originator {
    pub fn new(state: impl Into<String>) -> Self {
        let state = state.into();
        Self { state }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn do_something(&mut self) -> Vec<String> {
        self.state = generate_random_string(30);
        vec![
            "Originator: I'm doing something important.".to_string(),
            format!("Originator: and my state has changed to: {}", self.state),
        ]
    }

    pub fn save(&self) -> ConcreteMemento {
        ConcreteMemento::new(self.state.clone())
    }

    pub fn restore(&mut self, memento: &ConcreteMemento) -> String {
        self.state = memento.state.clone();
        format!("Originator: My state has changed to: {}", self.state)
    }
}

fn generate_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .map(char::from)
        .filter(char::is_ascii_alphabetic)
        .take(length)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteMemento {
    state: String,
    date: NaiveDateTime,
}

impl ConcreteMemento {
    fn new(state: String) -> Self {
        Self {
            state,
            date: Local::now().naive_local(),
        }
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Metadata for display: date plus the first few characters of the state.
    pub fn name(&self) -> String {
        let preview: String = self.state.chars().take(9).collect();
        format!("{} / ({})...", self.date.format("%Y-%m-%d %H:%M:%S"), preview)
    }
}

#[derive(Debug, Default)]
pub struct Caretaker {
    mementos: Vec<ConcreteMemento>,
}

impl Caretaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backup(&mut self, originator: &Originator) -> String {
        self.mementos.push(originator.save());
        "Caretaker: Saving Originator's state...".to_string()
    }

    /// Restores the latest memento. With no mementos left, nothing happens.
    pub fn undo(&mut self, originator: &mut Originator) -> Vec<String> {
        match self.mementos.pop() {
            Some(memento) => vec![
                format!("Caretaker: Restoring state to: {}", memento.name()),
                originator.restore(&memento),
            ],
            None => Vec::new(),
        }
    }

    pub fn show_history(&self) -> Vec<String> {
        let mut lines = vec!["Caretaker: Here's the list of mementos:".to_string()];
        lines.extend(self.mementos.iter().map(ConcreteMemento::name));
        lines
    }

    pub fn len(&self) -> usize {
        self.mementos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mementos.is_empty()
    }
}

pub fn conceptual_demo() -> Transcript {
    let mut originator = Originator::new("Super-duper-super-puper-super.");
    let mut caretaker = Caretaker::new();
    let mut out = Transcript::new();

    for _ in 0..3 {
        out.line(caretaker.backup(&originator));
        out.lines(originator.do_something());
    }

    out.blank();
    out.lines(caretaker.show_history());

    out.section("Client: Now, let's rollback!");
    out.lines(caretaker.undo(&mut originator));

    out.section("Client: Once more!");
    out.lines(caretaker.undo(&mut originator));
    out
}

// ============================================================================
// Real-world example: editor snapshots
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    text: String,
    cursor: (i32, i32),
    selection_width: u32,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    pub fn set_selection_width(&mut self, width: u32) {
        self.selection_width = width;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    pub fn selection_width(&self) -> u32 {
        self.selection_width
    }

    pub fn create_snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text.clone(),
            cursor: self.cursor,
            selection_width: self.selection_width,
        }
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.text = snapshot.text.clone();
        self.cursor = snapshot.cursor;
        self.selection_width = snapshot.selection_width;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    text: String,
    cursor: (i32, i32),
    selection_width: u32,
}

/// The caretaker: holds one backup and can roll the editor back to it.
#[derive(Debug, Default)]
pub struct EditorCommand {
    backup: Option<Snapshot>,
}

impl EditorCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_backup(&mut self, editor: &Editor) {
        self.backup = Some(editor.create_snapshot());
    }

    /// Returns false when there is no backup to restore.
    pub fn undo(&mut self, editor: &mut Editor) -> bool {
        match &self.backup {
            Some(snapshot) => {
                editor.restore(snapshot);
                true
            }
            None => false,
        }
    }
}

pub fn real_world_demo() -> Transcript {
    let mut editor = Editor::new();
    let mut command = EditorCommand::new();
    let mut out = Transcript::new();

    editor.set_text("First version of text");
    editor.set_cursor(3, 1);
    command.make_backup(&editor);
    out.line(format!("Editor text: {}", editor.text()));

    editor.set_text("Second version of text");
    editor.set_cursor(10, 2);
    editor.set_selection_width(6);
    out.line(format!("Editor text after edit: {}", editor.text()));

    command.undo(&mut editor);
    out.line(format!(
        "Editor text after undo: {} (cursor {:?}, selection {})",
        editor.text(),
        editor.cursor(),
        editor.selection_width()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_do_something_generates_30_letters() {
        let mut originator = Originator::new("start");
        let lines = originator.do_something();

        assert_eq!(originator.state().len(), 30);
        assert!(originator.state().chars().all(|c| c.is_ascii_alphabetic()));
        assert!(lines[1].ends_with(originator.state()));
    }

    #[test]
    fn test_undo_walks_back_through_history() {
        let mut originator = Originator::new("zero");
        let mut caretaker = Caretaker::new();

        caretaker.backup(&originator);
        originator.do_something();
        let first = originator.state().to_string();
        caretaker.backup(&originator);
        originator.do_something();

        caretaker.undo(&mut originator);
        assert_eq!(originator.state(), first);
        caretaker.undo(&mut originator);
        assert_eq!(originator.state(), "zero");

        assert!(caretaker.undo(&mut originator).is_empty());
        assert_eq!(originator.state(), "zero");
    }

    #[test]
    fn test_memento_name_previews_state() {
        let memento = Originator::new("Super-duper-super").save();
        assert!(memento.name().ends_with(" / (Super-dup)..."));
        assert_eq!(Caretaker::new().show_history().len(), 1);
    }

    #[test]
    fn test_editor_snapshot_restores_everything() {
        let mut editor = Editor::new();
        editor.set_text("one");
        editor.set_cursor(1, 2);
        editor.set_selection_width(3);
        let mut command = EditorCommand::new();
        command.make_backup(&editor);

        editor.set_text("two");
        editor.set_cursor(9, 9);
        editor.set_selection_width(0);
        assert!(command.undo(&mut editor));

        assert_eq!(editor.text(), "one");
        assert_eq!(editor.cursor(), (1, 2));
        assert_eq!(editor.selection_width(), 3);
    }

    #[test]
    fn test_undo_without_backup_is_noop() {
        let mut editor = Editor::new();
        editor.set_text("keep");
        assert!(!EditorCommand::new().undo(&mut editor));
        assert_eq!(editor.text(), "keep");
    }
}
