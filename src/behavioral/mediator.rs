// Mediator
//
// Intent: reduce chaotic dependencies between objects. Components stop
// talking to each other directly and report to a mediator instead.
//
// The mediator owns its components. Components return the event they raised
// and the mediator decides what happens next, so no component holds a
// reference back to the mediator.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    A,
    B,
    C,
    D,
}

#[derive(Debug, Default)]
pub struct Component1;

impl Component1 {
    pub fn do_a(&self) -> (String, Event) {
        ("Component 1 does A.".to_string(), Event::A)
    }

    pub fn do_b(&self) -> (String, Event) {
        ("Component 1 does B.".to_string(), Event::B)
    }
}

#[derive(Debug, Default)]
pub struct Component2;

impl Component2 {
    pub fn do_c(&self) -> (String, Event) {
        ("Component 2 does C.".to_string(), Event::C)
    }

    pub fn do_d(&self) -> (String, Event) {
        ("Component 2 does D.".to_string(), Event::D)
    }
}

pub trait Mediator {
    fn notify(&self, event: Event) -> Vec<String>;
}

#[derive(Debug, Default)]
pub struct ConcreteMediator {
    component1: Component1,
    component2: Component2,
}

impl ConcreteMediator {
    pub fn new(component1: Component1, component2: Component2) -> Self {
        Self {
            component1,
            component2,
        }
    }

    fn raise(&self, (line, event): (String, Event)) -> Vec<String> {
        let mut lines = vec![line];
        lines.extend(self.notify(event));
        lines
    }

    pub fn do_a(&self) -> Vec<String> {
        self.raise(self.component1.do_a())
    }

    pub fn do_b(&self) -> Vec<String> {
        self.raise(self.component1.do_b())
    }

    pub fn do_c(&self) -> Vec<String> {
        self.raise(self.component2.do_c())
    }

    pub fn do_d(&self) -> Vec<String> {
        self.raise(self.component2.do_d())
    }
}

impl Mediator for ConcreteMediator {
    fn notify(&self, event: Event) -> Vec<String> {
        debug!(?event, "mediator notified");
        match event {
            Event::A => vec![
                "Mediator reacts on A and triggers following operations:".to_string(),
                self.component2.do_c().0,
            ],
            Event::D => vec![
                "Mediator reacts on D and triggers following operations:".to_string(),
                self.component1.do_b().0,
                self.component2.do_c().0,
            ],
            Event::B | Event::C => Vec::new(),
        }
    }
}

pub fn conceptual_demo() -> Transcript {
    let mediator = ConcreteMediator::new(Component1, Component2);
    let mut out = Transcript::new();

    out.line("Client triggers operation A.");
    out.lines(mediator.do_a());
    out.blank();
    out.line("Client triggers operation D.");
    out.lines(mediator.do_d());
    out
}

// ============================================================================
// Real-world example: authentication dialog
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{form} fields cannot be empty")]
    EmptyFields { form: &'static str },

    #[error("{0} does not accept text")]
    NotEditable(WidgetId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetId {
    LoginOrRegister,
    LoginUsername,
    LoginPassword,
    RegistrationUsername,
    RegistrationPassword,
    RegistrationEmail,
    Ok,
    Cancel,
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WidgetId::LoginOrRegister => "loginOrRegisterChkBx",
            WidgetId::LoginUsername => "loginUsername",
            WidgetId::LoginPassword => "loginPassword",
            WidgetId::RegistrationUsername => "registrationUsername",
            WidgetId::RegistrationPassword => "registrationPassword",
            WidgetId::RegistrationEmail => "registrationEmail",
            WidgetId::Ok => "okBtn",
            WidgetId::Cancel => "cancelBtn",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    Click,
    Keypress,
    Check,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Textbox {
    pub text: String,
    pub visible: bool,
}

impl Textbox {
    fn type_text(&mut self, text: &str) -> WidgetEvent {
        self.text = text.to_string();
        WidgetEvent::Keypress
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkbox {
    pub checked: bool,
}

impl Checkbox {
    fn toggle(&mut self) -> WidgetEvent {
        self.checked = !self.checked;
        WidgetEvent::Check
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthenticationDialog {
    title: String,
    login_or_register: Checkbox,
    login_username: Textbox,
    login_password: Textbox,
    registration_username: Textbox,
    registration_password: Textbox,
    registration_email: Textbox,
}

impl AuthenticationDialog {
    /// Starts in registration mode: the checkbox means "I already have an
    /// account".
    pub fn new() -> Self {
        let mut dialog = Self::default();
        dialog.toggle_login_register(false);
        dialog
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_login(&self) -> bool {
        self.login_or_register.checked
    }

    pub fn textbox(&self, id: WidgetId) -> Option<&Textbox> {
        match id {
            WidgetId::LoginUsername => Some(&self.login_username),
            WidgetId::LoginPassword => Some(&self.login_password),
            WidgetId::RegistrationUsername => Some(&self.registration_username),
            WidgetId::RegistrationPassword => Some(&self.registration_password),
            WidgetId::RegistrationEmail => Some(&self.registration_email),
            _ => None,
        }
    }

    fn textbox_mut(&mut self, id: WidgetId) -> Option<&mut Textbox> {
        match id {
            WidgetId::LoginUsername => Some(&mut self.login_username),
            WidgetId::LoginPassword => Some(&mut self.login_password),
            WidgetId::RegistrationUsername => Some(&mut self.registration_username),
            WidgetId::RegistrationPassword => Some(&mut self.registration_password),
            WidgetId::RegistrationEmail => Some(&mut self.registration_email),
            _ => None,
        }
    }

    /// Clicking the checkbox toggles it; clicking a textbox does nothing.
    pub fn click(&mut self, id: WidgetId) -> Result<Vec<String>, AuthError> {
        match id {
            WidgetId::LoginOrRegister => self.check(),
            WidgetId::Ok | WidgetId::Cancel => {
                let mut lines = vec![format!("{} button clicked.", id)];
                lines.extend(self.notify(id, WidgetEvent::Click)?);
                Ok(lines)
            }
            _ => Ok(Vec::new()),
        }
    }

    pub fn type_text(&mut self, id: WidgetId, text: &str) -> Result<Vec<String>, AuthError> {
        let event = self
            .textbox_mut(id)
            .ok_or(AuthError::NotEditable(id))?
            .type_text(text);
        let mut lines = vec![format!("{} textbox keypress.", id)];
        lines.extend(self.notify(id, event)?);
        Ok(lines)
    }

    pub fn check(&mut self) -> Result<Vec<String>, AuthError> {
        let event = self.login_or_register.toggle();
        let state = if self.login_or_register.checked {
            "checked"
        } else {
            "unchecked"
        };
        let mut lines = vec![format!("{} checkbox is {}", WidgetId::LoginOrRegister, state)];
        lines.extend(self.notify(WidgetId::LoginOrRegister, event)?);
        Ok(lines)
    }

    pub fn notify(&mut self, sender: WidgetId, event: WidgetEvent) -> Result<Vec<String>, AuthError> {
        debug!(%sender, ?event, "dialog notified");
        match (sender, event) {
            (WidgetId::LoginOrRegister, WidgetEvent::Check) => {
                let is_login = self.login_or_register.checked;
                self.toggle_login_register(is_login);
                Ok(vec![format!("Dialog title: {}", self.title)])
            }
            (WidgetId::Ok, WidgetEvent::Click) => {
                let line = if self.is_login() {
                    self.process_login()?
                } else {
                    self.process_registration()?
                };
                Ok(vec![line])
            }
            (WidgetId::Cancel, WidgetEvent::Click) => {
                for id in [
                    WidgetId::LoginUsername,
                    WidgetId::LoginPassword,
                    WidgetId::RegistrationUsername,
                    WidgetId::RegistrationPassword,
                    WidgetId::RegistrationEmail,
                ] {
                    if let Some(textbox) = self.textbox_mut(id) {
                        textbox.text.clear();
                    }
                }
                Ok(vec!["All fields cleared.".to_string()])
            }
            _ => Ok(Vec::new()),
        }
    }

    fn toggle_login_register(&mut self, is_login: bool) {
        self.title = if is_login { "Log in" } else { "Register" }.to_string();
        self.login_username.visible = is_login;
        self.login_password.visible = is_login;
        self.registration_username.visible = !is_login;
        self.registration_password.visible = !is_login;
        self.registration_email.visible = !is_login;
    }

    fn process_login(&self) -> Result<String, AuthError> {
        if self.login_username.text.is_empty() || self.login_password.text.is_empty() {
            return Err(AuthError::EmptyFields { form: "Login" });
        }
        Ok(format!("Processing login for {}", self.login_username.text))
    }

    fn process_registration(&self) -> Result<String, AuthError> {
        if self.registration_username.text.is_empty()
            || self.registration_password.text.is_empty()
            || self.registration_email.text.is_empty()
        {
            return Err(AuthError::EmptyFields {
                form: "Registration",
            });
        }
        Ok(format!(
            "Processing registration for {}",
            self.registration_username.text
        ))
    }
}

pub fn real_world_demo() -> Result<Transcript, AuthError> {
    let mut dialog = AuthenticationDialog::new();
    let mut out = Transcript::new();

    out.lines(dialog.check()?);
    out.lines(dialog.type_text(WidgetId::LoginUsername, "user")?);
    out.lines(dialog.type_text(WidgetId::LoginPassword, "password")?);
    out.lines(dialog.click(WidgetId::Ok)?);

    out.blank();
    out.lines(dialog.click(WidgetId::LoginOrRegister)?);
    match dialog.click(WidgetId::Ok) {
        Ok(lines) => out.lines(lines),
        Err(err) => out.line(format!("Rejected: {}", err)),
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_triggers_c() {
        let lines = ConcreteMediator::default().do_a();
        assert_eq!(
            lines,
            vec![
                "Component 1 does A.",
                "Mediator reacts on A and triggers following operations:",
                "Component 2 does C.",
            ]
        );
    }

    #[test]
    fn test_d_triggers_b_and_c() {
        let lines = ConcreteMediator::default().do_d();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "Component 1 does B.");
        assert_eq!(lines[3], "Component 2 does C.");
    }

    #[test]
    fn test_b_and_c_trigger_nothing() {
        let mediator = ConcreteMediator::default();
        assert_eq!(mediator.do_b().len(), 1);
        assert_eq!(mediator.do_c().len(), 1);
    }

    #[test]
    fn test_checkbox_toggles_fields_and_title() {
        let mut dialog = AuthenticationDialog::new();
        assert_eq!(dialog.title(), "Register");
        assert!(!dialog.textbox(WidgetId::LoginUsername).unwrap().visible);

        dialog.check().unwrap();
        assert_eq!(dialog.title(), "Log in");
        assert!(dialog.textbox(WidgetId::LoginUsername).unwrap().visible);
        assert!(!dialog.textbox(WidgetId::RegistrationEmail).unwrap().visible);
    }

    #[test]
    fn test_login_flow() {
        let mut dialog = AuthenticationDialog::new();
        dialog.click(WidgetId::LoginOrRegister).unwrap();
        dialog.type_text(WidgetId::LoginUsername, "user").unwrap();
        dialog.type_text(WidgetId::LoginPassword, "pw").unwrap();

        let lines = dialog.click(WidgetId::Ok).unwrap();
        assert_eq!(lines, vec!["okBtn button clicked.", "Processing login for user"]);
    }

    #[test]
    fn test_empty_registration_is_rejected() {
        let mut dialog = AuthenticationDialog::new();
        dialog.type_text(WidgetId::RegistrationUsername, "new").unwrap();
        assert_eq!(
            dialog.click(WidgetId::Ok).unwrap_err(),
            AuthError::EmptyFields {
                form: "Registration"
            }
        );
    }

    #[test]
    fn test_cancel_clears_and_buttons_reject_text() {
        let mut dialog = AuthenticationDialog::new();
        dialog.type_text(WidgetId::RegistrationEmail, "a@b.c").unwrap();
        dialog.click(WidgetId::Cancel).unwrap();
        assert_eq!(dialog.textbox(WidgetId::RegistrationEmail).unwrap().text, "");

        assert_eq!(
            dialog.type_text(WidgetId::Ok, "x").unwrap_err(),
            AuthError::NotEditable(WidgetId::Ok)
        );
    }
}
