// Abstract Factory
//
// Intent: produce families of related objects without naming their concrete
// types. The client only ever sees the factory and product traits.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

pub trait AbstractProductA {
    fn useful_function_a(&self) -> String;
}

pub trait AbstractProductB {
    fn useful_function_b(&self) -> String;

    /// Product B can collaborate with product A of the same family. The
    /// factory guarantees the pair matches.
    fn another_useful_function_b(&self, collaborator: &dyn AbstractProductA) -> String;
}

pub trait AbstractFactory {
    fn create_product_a(&self) -> Box<dyn AbstractProductA>;
    fn create_product_b(&self) -> Box<dyn AbstractProductB>;
}

pub struct ConcreteProductA1;
pub struct ConcreteProductA2;
pub struct ConcreteProductB1;
pub struct ConcreteProductB2;

impl AbstractProductA for ConcreteProductA1 {
    fn useful_function_a(&self) -> String {
        "The result of the product A1.".to_string()
    }
}

impl AbstractProductA for ConcreteProductA2 {
    fn useful_function_a(&self) -> String {
        "The result of the product A2.".to_string()
    }
}

impl AbstractProductB for ConcreteProductB1 {
    fn useful_function_b(&self) -> String {
        "The result of the product B1.".to_string()
    }

    fn another_useful_function_b(&self, collaborator: &dyn AbstractProductA) -> String {
        format!(
            "The result of the B1 collaborating with the ({})",
            collaborator.useful_function_a()
        )
    }
}

impl AbstractProductB for ConcreteProductB2 {
    fn useful_function_b(&self) -> String {
        "The result of the product B2.".to_string()
    }

    fn another_useful_function_b(&self, collaborator: &dyn AbstractProductA) -> String {
        format!(
            "The result of the B2 collaborating with the ({})",
            collaborator.useful_function_a()
        )
    }
}

pub struct ConcreteFactory1;
pub struct ConcreteFactory2;

impl AbstractFactory for ConcreteFactory1 {
    fn create_product_a(&self) -> Box<dyn AbstractProductA> {
        Box::new(ConcreteProductA1)
    }

    fn create_product_b(&self) -> Box<dyn AbstractProductB> {
        Box::new(ConcreteProductB1)
    }
}

impl AbstractFactory for ConcreteFactory2 {
    fn create_product_a(&self) -> Box<dyn AbstractProductA> {
        Box::new(ConcreteProductA2)
    }

    fn create_product_b(&self) -> Box<dyn AbstractProductB> {
        Box::new(ConcreteProductB2)
    }
}

pub fn client_code(factory: &dyn AbstractFactory) -> Vec<String> {
    let product_a = factory.create_product_a();
    let product_b = factory.create_product_b();

    vec![
        product_b.useful_function_b(),
        product_b.another_useful_function_b(product_a.as_ref()),
    ]
}

pub fn conceptual_demo() -> Transcript {
    let mut out = Transcript::new();
    out.line("Client: Testing client code with the first factory type...");
    out.lines(client_code(&ConcreteFactory1));
    out.blank();
    out.line("Client: Testing the same client code with the second factory type...");
    out.lines(client_code(&ConcreteFactory2));
    out
}

// ============================================================================
// Real-world example: GUI widgets per operating system
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuiError {
    #[error("unknown operating system '{0}': expected Windows or Mac")]
    UnknownOs(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    Mac,
}

impl FromStr for Os {
    type Err = GuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(Os::Windows),
            "mac" | "macos" => Ok(Os::Mac),
            _ => Err(GuiError::UnknownOs(s.to_string())),
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Windows => write!(f, "Windows"),
            Os::Mac => write!(f, "Mac"),
        }
    }
}

pub trait Button {
    fn paint(&self) -> String;
}

pub trait CheckBox {
    fn paint(&self) -> String;
}

struct WinButton;
struct WinCheckBox;
struct MacButton;
struct MacCheckBox;

impl Button for WinButton {
    fn paint(&self) -> String {
        "This is a Windows Button".to_string()
    }
}

impl CheckBox for WinCheckBox {
    fn paint(&self) -> String {
        "This is a Windows CheckBox".to_string()
    }
}

impl Button for MacButton {
    fn paint(&self) -> String {
        "This is a Mac Button".to_string()
    }
}

impl CheckBox for MacCheckBox {
    fn paint(&self) -> String {
        "This is a Mac CheckBox".to_string()
    }
}

pub trait GuiFactory {
    fn create_button(&self) -> Box<dyn Button>;
    fn create_checkbox(&self) -> Box<dyn CheckBox>;
}

pub struct WinFactory;
pub struct MacFactory;

impl GuiFactory for WinFactory {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(WinButton)
    }

    fn create_checkbox(&self) -> Box<dyn CheckBox> {
        Box::new(WinCheckBox)
    }
}

impl GuiFactory for MacFactory {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(MacButton)
    }

    fn create_checkbox(&self) -> Box<dyn CheckBox> {
        Box::new(MacCheckBox)
    }
}

pub fn factory_for(os: Os) -> Box<dyn GuiFactory> {
    match os {
        Os::Windows => Box::new(WinFactory),
        Os::Mac => Box::new(MacFactory),
    }
}

/// A higher layer that only sees the factory and widget traits. The concrete
/// widget types stay private to this module.
pub struct SomeService {
    os: Os,
    factory: Box<dyn GuiFactory>,
    button: Box<dyn Button>,
    checkbox: Box<dyn CheckBox>,
}

impl SomeService {
    pub fn new(os: Os) -> Self {
        let factory = factory_for(os);
        let button = factory.create_button();
        let checkbox = factory.create_checkbox();
        Self {
            os,
            factory,
            button,
            checkbox,
        }
    }

    /// Builds the service from a configured OS name, falling back to Windows
    /// when the name is not recognised.
    pub fn from_config(os_name: &str) -> Self {
        let os = os_name.parse().unwrap_or_else(|err: GuiError| {
            warn!(%err, "falling back to Windows widgets");
            Os::Windows
        });
        Self::new(os)
    }

    pub fn os(&self) -> Os {
        self.os
    }

    pub fn factory(&self) -> &dyn GuiFactory {
        self.factory.as_ref()
    }

    pub fn paint_all_elements(&self) -> Vec<String> {
        vec![self.button.paint(), self.checkbox.paint()]
    }
}

pub fn real_world_demo(os_name: &str) -> Transcript {
    let service = SomeService::from_config(os_name);
    let mut out = Transcript::new();

    out.line(format!(
        "Rendering GUI elements for {} through the encapsulated service:",
        service.os()
    ));
    out.lines(service.paint_all_elements());

    out.line("Accessing GUI elements through the factory abstraction:");
    let factory = service.factory();
    out.line(factory.create_button().paint());
    out.line(factory.create_checkbox().paint());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories_produce_matching_families() {
        let lines = client_code(&ConcreteFactory1);
        assert_eq!(lines[0], "The result of the product B1.");
        assert_eq!(
            lines[1],
            "The result of the B1 collaborating with the (The result of the product A1.)"
        );

        let lines = client_code(&ConcreteFactory2);
        assert!(lines[1].contains("B2") && lines[1].contains("A2"));
    }

    #[test]
    fn test_os_parsing() {
        assert_eq!("Windows".parse::<Os>().unwrap(), Os::Windows);
        assert_eq!(" mac ".parse::<Os>().unwrap(), Os::Mac);
        assert_eq!(
            "BeOS".parse::<Os>().unwrap_err(),
            GuiError::UnknownOs("BeOS".to_string())
        );
    }

    #[test]
    fn test_service_paints_one_family() {
        let service = SomeService::new(Os::Mac);
        let painted = service.paint_all_elements();
        assert!(painted.iter().all(|p| p.contains("Mac")));

        let factory = service.factory();
        assert_eq!(factory.create_button().paint(), "This is a Mac Button");
    }

    #[test]
    fn test_unknown_config_falls_back_to_windows() {
        let service = SomeService::from_config("Plan9");
        assert_eq!(service.os(), Os::Windows);
        assert!(service
            .paint_all_elements()
            .iter()
            .all(|p| p.contains("Windows")));
    }

    #[test]
    fn test_real_world_demo_lists_both_access_paths() {
        let out = real_world_demo("Windows");
        assert_eq!(
            out.as_slice()
                .iter()
                .filter(|l| l.as_str() == "This is a Windows Button")
                .count(),
            2
        );
    }
}
