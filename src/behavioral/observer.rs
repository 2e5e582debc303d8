// Observer
//
// Intent: a subscription mechanism that notifies several objects about
// events happening to the object they observe.

use std::collections::HashMap;
use std::rc::Rc;

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

pub trait Observer {
    /// Returns a line when the observer reacted to the new state.
    fn update(&self, subject: &Subject) -> Option<String>;
}

#[derive(Default)]
pub struct Subject {
    state: u32,
    observers: Vec<Rc<dyn Observer>>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn attach(&mut self, observer: Rc<dyn Observer>) -> String {
        self.observers.push(observer);
        "Subject: Attached an observer.".to_string()
    }

    /// Detaches by identity, not by value.
    pub fn detach(&mut self, observer: &Rc<dyn Observer>) -> String {
        self.observers.retain(|o| !Rc::ptr_eq(o, observer));
        "Subject: Detached an observer.".to_string()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn notify(&self) -> Vec<String> {
        let mut lines = vec!["Subject: Notifying observers...".to_string()];
        lines.extend(self.observers.iter().filter_map(|o| o.update(self)));
        lines
    }

    pub fn set_state(&mut self, state: u32) -> Vec<String> {
        self.state = state;
        let mut lines = vec![format!("Subject: My state has just changed to: {}", state)];
        lines.extend(self.notify());
        lines
    }

    pub fn some_business_logic(&mut self) -> Vec<String> {
        let state = rand::thread_rng().gen_range(0..=10);
        let mut lines = vec!["Subject: I'm doing something important.".to_string()];
        lines.extend(self.set_state(state));
        lines
    }
}

pub struct ConcreteObserverA;

impl Observer for ConcreteObserverA {
    fn update(&self, subject: &Subject) -> Option<String> {
        (subject.state() < 3).then(|| "ConcreteObserverA: Reacted to the event.".to_string())
    }
}

pub struct ConcreteObserverB;

impl Observer for ConcreteObserverB {
    fn update(&self, subject: &Subject) -> Option<String> {
        (subject.state() == 0 || subject.state() >= 2)
            .then(|| "ConcreteObserverB: Reacted to the event.".to_string())
    }
}

pub fn conceptual_demo() -> Transcript {
    let mut subject = Subject::new();
    let observer_a: Rc<dyn Observer> = Rc::new(ConcreteObserverA);
    let observer_b: Rc<dyn Observer> = Rc::new(ConcreteObserverB);

    let mut out = Transcript::new();
    out.line(subject.attach(observer_a));
    out.line(subject.attach(Rc::clone(&observer_b)));

    out.lines(subject.some_business_logic());
    out.lines(subject.some_business_logic());

    out.line(subject.detach(&observer_b));
    out.lines(subject.some_business_logic());
    out
}

// ============================================================================
// Real-world example: editor events
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("no file is open")]
    NoFileOpen,
}

pub trait EventListener {
    fn update(&self, filename: &str) -> String;
}

#[derive(Default)]
pub struct EventManager {
    listeners: HashMap<String, Vec<Rc<dyn EventListener>>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, event_type: &str, listener: Rc<dyn EventListener>) {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(listener);
    }

    pub fn unsubscribe(&mut self, event_type: &str, listener: &Rc<dyn EventListener>) {
        if let Some(list) = self.listeners.get_mut(event_type) {
            list.retain(|l| !Rc::ptr_eq(l, listener));
        }
    }

    pub fn notify(&self, event_type: &str, data: &str) -> Vec<String> {
        debug!(event_type, data, "notifying listeners");
        self.listeners
            .get(event_type)
            .map(|list| list.iter().map(|l| l.update(data)).collect())
            .unwrap_or_default()
    }
}

#[derive(Default)]
pub struct ObservedEditor {
    pub events: EventManager,
    file: Option<String>,
}

impl ObservedEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_file(&mut self, path: &str) -> Vec<String> {
        self.file = Some(path.to_string());
        self.events.notify("open", path)
    }

    pub fn save_file(&self) -> Result<Vec<String>, EditorError> {
        let file = self.file.as_deref().ok_or(EditorError::NoFileOpen)?;
        Ok(self.events.notify("save", file))
    }
}

pub struct LoggingListener {
    log_filename: String,
    message: String,
}

impl LoggingListener {
    pub fn new(log_filename: &str, message: &str) -> Self {
        Self {
            log_filename: log_filename.to_string(),
            message: message.to_string(),
        }
    }
}

impl EventListener for LoggingListener {
    fn update(&self, filename: &str) -> String {
        format!(
            "Log to {}: {}",
            self.log_filename,
            self.message.replace("%s", filename)
        )
    }
}

pub struct EmailAlertsListener {
    email: String,
    message: String,
}

impl EmailAlertsListener {
    pub fn new(email: &str, message: &str) -> Self {
        Self {
            email: email.to_string(),
            message: message.to_string(),
        }
    }
}

impl EventListener for EmailAlertsListener {
    fn update(&self, filename: &str) -> String {
        format!("Email to {}: {}", self.email, self.message.replace("%s", filename))
    }
}

pub fn real_world_demo() -> Result<Transcript, EditorError> {
    let mut editor = ObservedEditor::new();
    editor.events.subscribe(
        "open",
        Rc::new(LoggingListener::new("log.txt", "Someone has opened the file: %s")),
    );
    editor.events.subscribe(
        "save",
        Rc::new(EmailAlertsListener::new(
            "admin@example.com",
            "File %s has been modified.",
        )),
    );

    let mut out = Transcript::new();
    out.lines(editor.open_file("test.txt"));
    out.lines(editor.save_file()?);
    Ok(out)
}
