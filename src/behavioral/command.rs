// Command
//
// Intent: turn a request into a stand-alone object. Requests can then be
// passed around, queued, logged and undone.

use std::rc::Rc;

use tracing::debug;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

pub trait Command {
    fn execute(&self) -> Vec<String>;
}

pub struct SimpleCommand {
    payload: String,
}

impl SimpleCommand {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl Command for SimpleCommand {
    fn execute(&self) -> Vec<String> {
        vec![format!(
            "SimpleCommand: See, I can do simple things like printing ({})",
            self.payload
        )]
    }
}

/// Knows how to do the real work.
#[derive(Debug, Default)]
pub struct Receiver;

impl Receiver {
    pub fn do_something(&self, a: &str) -> String {
        format!("Receiver: Working on ({}.)", a)
    }

    pub fn do_something_else(&self, b: &str) -> String {
        format!("Receiver: Also working on ({}.)", b)
    }
}

pub struct ComplexCommand {
    receiver: Rc<Receiver>,
    a: String,
    b: String,
}

impl ComplexCommand {
    pub fn new(receiver: Rc<Receiver>, a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            receiver,
            a: a.into(),
            b: b.into(),
        }
    }
}

impl Command for ComplexCommand {
    fn execute(&self) -> Vec<String> {
        vec![
            "ComplexCommand: Complex stuff should be done by a receiver object.".to_string(),
            self.receiver.do_something(&self.a),
            self.receiver.do_something_else(&self.b),
        ]
    }
}

#[derive(Default)]
pub struct Invoker {
    on_start: Option<Box<dyn Command>>,
    on_finish: Option<Box<dyn Command>>,
}

impl Invoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_on_start(&mut self, command: Box<dyn Command>) {
        self.on_start = Some(command);
    }

    pub fn set_on_finish(&mut self, command: Box<dyn Command>) {
        self.on_finish = Some(command);
    }

    pub fn do_something_important(&self) -> Vec<String> {
        let mut lines = vec!["Invoker: Does anybody want something done before I begin?".to_string()];
        if let Some(command) = &self.on_start {
            lines.extend(command.execute());
        }
        lines.push("Invoker: ...doing something really important...".to_string());
        lines.push("Invoker: Does anybody want something done after I finish?".to_string());
        if let Some(command) = &self.on_finish {
            lines.extend(command.execute());
        }
        lines
    }
}

pub fn conceptual_demo() -> Transcript {
    let receiver = Rc::new(Receiver);
    let mut invoker = Invoker::new();
    invoker.set_on_start(Box::new(SimpleCommand::new("Say Hi!")));
    invoker.set_on_finish(Box::new(ComplexCommand::new(
        receiver,
        "Send email",
        "Save report",
    )));

    let mut out = Transcript::new();
    out.lines(invoker.do_something_important());
    out
}

// ============================================================================
// Real-world example: text editor with undo
// ============================================================================

/// The selection is always the whole text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    pub text: String,
}

impl Editor {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn selection(&self) -> &str {
        &self.text
    }

    pub fn delete_selection(&mut self) {
        self.text.clear();
    }

    pub fn replace_selection(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

pub trait EditorCommand {
    fn name(&self) -> &'static str;

    /// Returns true when the command changed state and belongs in the history.
    fn execute(&mut self, app: &mut Application) -> bool;

    fn undo(&mut self, app: &mut Application);
}

/// Remembers which editor a command ran against and its text before.
#[derive(Debug, Default)]
struct Backup {
    editor: Option<usize>,
    text: String,
}

impl Backup {
    fn save(&mut self, app: &Application) {
        self.editor = Some(app.active_index());
        self.text = app.active_editor().map(|e| e.text.clone()).unwrap_or_default();
    }

    fn restore(&self, app: &mut Application) {
        if let Some(editor) = self.editor.and_then(|i| app.editor_mut(i)) {
            editor.text = self.text.clone();
        }
    }
}

#[derive(Debug, Default)]
pub struct CopyCommand;

impl EditorCommand for CopyCommand {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn execute(&mut self, app: &mut Application) -> bool {
        if let Some(selection) = app.active_editor().map(|e| e.selection().to_string()) {
            app.clipboard = selection;
        }
        false
    }

    fn undo(&mut self, _app: &mut Application) {}
}

#[derive(Debug, Default)]
pub struct CutCommand {
    backup: Backup,
}

impl CutCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EditorCommand for CutCommand {
    fn name(&self) -> &'static str {
        "cut"
    }

    fn execute(&mut self, app: &mut Application) -> bool {
        self.backup.save(app);
        let index = app.active_index();
        let Some(editor) = app.editor_mut(index) else {
            return false;
        };
        let selection = editor.selection().to_string();
        editor.delete_selection();
        app.clipboard = selection;
        true
    }

    fn undo(&mut self, app: &mut Application) {
        self.backup.restore(app);
    }
}

#[derive(Debug, Default)]
pub struct PasteCommand {
    backup: Backup,
}

impl PasteCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EditorCommand for PasteCommand {
    fn name(&self) -> &'static str {
        "paste"
    }

    fn execute(&mut self, app: &mut Application) -> bool {
        self.backup.save(app);
        let clipboard = app.clipboard.clone();
        let index = app.active_index();
        match app.editor_mut(index) {
            Some(editor) => {
                editor.replace_selection(&clipboard);
                true
            }
            None => false,
        }
    }

    fn undo(&mut self, app: &mut Application) {
        self.backup.restore(app);
    }
}

#[derive(Debug, Default)]
pub struct UndoCommand;

impl EditorCommand for UndoCommand {
    fn name(&self) -> &'static str {
        "undo"
    }

    fn execute(&mut self, app: &mut Application) -> bool {
        app.undo();
        false
    }

    fn undo(&mut self, _app: &mut Application) {}
}

#[derive(Default)]
pub struct CommandHistory {
    stack: Vec<Box<dyn EditorCommand>>,
}

impl CommandHistory {
    pub fn push(&mut self, command: Box<dyn EditorCommand>) {
        self.stack.push(command);
    }

    pub fn pop(&mut self) -> Option<Box<dyn EditorCommand>> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[derive(Default)]
pub struct Application {
    pub clipboard: String,
    editors: Vec<Editor>,
    active: usize,
    history: CommandHistory,
}

impl Application {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an editor and makes it the active one.
    pub fn open_editor(&mut self, text: &str) -> usize {
        self.editors.push(Editor::new(text));
        self.active = self.editors.len() - 1;
        self.active
    }

    pub fn set_active(&mut self, index: usize) -> bool {
        if index < self.editors.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_editor(&self) -> Option<&Editor> {
        self.editors.get(self.active)
    }

    pub fn editor(&self, index: usize) -> Option<&Editor> {
        self.editors.get(index)
    }

    pub fn editor_mut(&mut self, index: usize) -> Option<&mut Editor> {
        self.editors.get_mut(index)
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn execute_command(&mut self, mut command: Box<dyn EditorCommand>) -> bool {
        let changed = command.execute(self);
        debug!(command = command.name(), changed, "executed command");
        if changed {
            self.history.push(command);
        }
        changed
    }

    /// Reverts the most recent recorded command. No-op on an empty history.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(mut command) => {
                debug!(command = command.name(), "undoing command");
                command.undo(self);
                true
            }
            None => false,
        }
    }
}

pub fn real_world_demo() -> Transcript {
    let mut app = Application::new();
    let editor = app.open_editor("Hello, World!");
    let text = |app: &Application| app.editor(editor).map(|e| e.text.clone()).unwrap_or_default();

    let mut out = Transcript::new();
    out.line(format!("Editor text: {}", text(&app)));

    app.execute_command(Box::new(CopyCommand));
    out.line(format!("Clipboard after copy: {}", app.clipboard));

    app.execute_command(Box::new(CutCommand::new()));
    out.line(format!("Editor text after cut: {}", text(&app)));
    out.line(format!("Clipboard after cut: {}", app.clipboard));

    app.execute_command(Box::new(PasteCommand::new()));
    out.line(format!("Editor text after paste: {}", text(&app)));

    app.execute_command(Box::new(UndoCommand));
    out.line(format!("Editor text after undo: {}", text(&app)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoker_runs_hooks_around_work() {
        let mut invoker = Invoker::new();
        invoker.set_on_start(Box::new(SimpleCommand::new("Say Hi!")));
        invoker.set_on_finish(Box::new(ComplexCommand::new(
            Rc::new(Receiver),
            "Send email",
            "Save report",
        )));
        let lines = invoker.do_something_important();

        assert_eq!(
            lines[1],
            "SimpleCommand: See, I can do simple things like printing (Say Hi!)"
        );
        assert_eq!(lines[5], "Receiver: Working on (Send email.)");
        assert_eq!(lines[6], "Receiver: Also working on (Save report.)");
    }

    #[test]
    fn test_invoker_without_commands() {
        assert_eq!(Invoker::new().do_something_important().len(), 3);
    }

    #[test]
    fn test_copy_is_not_recorded() {
        let mut app = Application::new();
        app.open_editor("abc");
        assert!(!app.execute_command(Box::new(CopyCommand)));
        assert_eq!(app.clipboard, "abc");
        assert!(app.history().is_empty());
    }

    #[test]
    fn test_cut_paste_undo() {
        let mut app = Application::new();
        app.open_editor("Hello");

        assert!(app.execute_command(Box::new(CutCommand::new())));
        assert_eq!(app.active_editor().unwrap().text, "");
        assert_eq!(app.clipboard, "Hello");

        assert!(app.execute_command(Box::new(PasteCommand::new())));
        assert_eq!(app.active_editor().unwrap().text, "Hello");
        assert_eq!(app.history().len(), 2);

        assert!(app.undo());
        assert_eq!(app.active_editor().unwrap().text, "");
        assert!(app.undo());
        assert_eq!(app.active_editor().unwrap().text, "Hello");
        assert!(!app.undo());
    }

    #[test]
    fn test_undo_restores_the_editor_it_ran_against() {
        let mut app = Application::new();
        let first = app.open_editor("first");
        let second = app.open_editor("second");

        app.set_active(first);
        app.execute_command(Box::new(CutCommand::new()));
        app.set_active(second);
        app.undo();

        assert_eq!(app.editor(first).unwrap().text, "first");
        assert_eq!(app.editor(second).unwrap().text, "second");
    }

    #[test]
    fn test_commands_without_editor_do_nothing() {
        let mut app = Application::new();
        assert!(!app.execute_command(Box::new(CutCommand::new())));
        assert!(!app.execute_command(Box::new(PasteCommand::new())));
        assert!(!app.set_active(3));
    }

    #[test]
    fn test_real_world_demo_sequence() {
        let out = real_world_demo();
        assert!(out.contains("Editor text after cut: "));
        assert!(out.contains("Editor text after paste: Hello, World!"));
        assert!(out.contains("Editor text after undo: "));
    }
}
