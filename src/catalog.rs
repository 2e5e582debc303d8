//! The pattern catalogue: what exists, how it is named, and how to run it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::behavioral::{
    chain_of_responsibility, command, iterator, mediator, memento, observer, state, strategy,
    template_method, visitor,
};
use crate::config::CatalogConfig;
use crate::creational::{abstract_factory, builder, prototype, singleton};
use crate::error::{PatternError, Result};
use crate::structural::{adapter, bridge, composite, decorator, facade, flyweight, proxy};
use crate::transcript::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Creational,
    Structural,
    Behavioral,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Creational => write!(f, "creational"),
            Category::Structural => write!(f, "structural"),
            Category::Behavioral => write!(f, "behavioral"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    AbstractFactory,
    Builder,
    Prototype,
    Singleton,
    Adapter,
    Bridge,
    Composite,
    Decorator,
    Facade,
    Flyweight,
    Proxy,
    ChainOfResponsibility,
    Command,
    Iterator,
    Mediator,
    Memento,
    Observer,
    State,
    Strategy,
    TemplateMethod,
    Visitor,
}

impl Pattern {
    pub const ALL: [Pattern; 21] = [
        Pattern::AbstractFactory,
        Pattern::Builder,
        Pattern::Prototype,
        Pattern::Singleton,
        Pattern::Adapter,
        Pattern::Bridge,
        Pattern::Composite,
        Pattern::Decorator,
        Pattern::Facade,
        Pattern::Flyweight,
        Pattern::Proxy,
        Pattern::ChainOfResponsibility,
        Pattern::Command,
        Pattern::Iterator,
        Pattern::Mediator,
        Pattern::Memento,
        Pattern::Observer,
        Pattern::State,
        Pattern::Strategy,
        Pattern::TemplateMethod,
        Pattern::Visitor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::AbstractFactory => "Abstract Factory",
            Pattern::Builder => "Builder",
            Pattern::Prototype => "Prototype",
            Pattern::Singleton => "Singleton",
            Pattern::Adapter => "Adapter",
            Pattern::Bridge => "Bridge",
            Pattern::Composite => "Composite",
            Pattern::Decorator => "Decorator",
            Pattern::Facade => "Facade",
            Pattern::Flyweight => "Flyweight",
            Pattern::Proxy => "Proxy",
            Pattern::ChainOfResponsibility => "Chain of Responsibility",
            Pattern::Command => "Command",
            Pattern::Iterator => "Iterator",
            Pattern::Mediator => "Mediator",
            Pattern::Memento => "Memento",
            Pattern::Observer => "Observer",
            Pattern::State => "State",
            Pattern::Strategy => "Strategy",
            Pattern::TemplateMethod => "Template Method",
            Pattern::Visitor => "Visitor",
        }
    }

    /// Kebab-case name used on the command line.
    pub fn slug(self) -> String {
        self.name().to_ascii_lowercase().replace(' ', "-")
    }

    pub fn category(self) -> Category {
        match self {
            Pattern::AbstractFactory | Pattern::Builder | Pattern::Prototype | Pattern::Singleton => {
                Category::Creational
            }
            Pattern::Adapter
            | Pattern::Bridge
            | Pattern::Composite
            | Pattern::Decorator
            | Pattern::Facade
            | Pattern::Flyweight
            | Pattern::Proxy => Category::Structural,
            _ => Category::Behavioral,
        }
    }

    pub fn intent(self) -> &'static str {
        match self {
            Pattern::AbstractFactory => {
                "Produce families of related objects without naming their concrete types."
            }
            Pattern::Builder => "Construct complex objects step by step.",
            Pattern::Prototype => "Copy existing objects without depending on their types.",
            Pattern::Singleton => "Ensure a type has only one instance with a global access point.",
            Pattern::Adapter => "Let objects with incompatible interfaces collaborate.",
            Pattern::Bridge => "Split an abstraction from its implementation so both can vary.",
            Pattern::Composite => "Compose objects into trees and treat them like single objects.",
            Pattern::Decorator => "Attach new behaviour to objects by wrapping them.",
            Pattern::Facade => "Give a simple interface to a complex subsystem.",
            Pattern::Flyweight => "Share common state between many objects to save memory.",
            Pattern::Proxy => "Provide a substitute that controls access to another object.",
            Pattern::ChainOfResponsibility => "Pass a request along a chain of handlers.",
            Pattern::Command => "Turn a request into a standalone object.",
            Pattern::Iterator => "Traverse a collection without exposing its representation.",
            Pattern::Mediator => "Route communication between objects through one mediator.",
            Pattern::Memento => "Save and restore state without exposing internals.",
            Pattern::Observer => "Notify subscribers about events on the object they watch.",
            Pattern::State => "Change behaviour when the internal state changes.",
            Pattern::Strategy => "Make a family of algorithms interchangeable at runtime.",
            Pattern::TemplateMethod => "Fix an algorithm's skeleton and let implementors fill in steps.",
            Pattern::Visitor => "Separate algorithms from the objects they operate on.",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Pattern::ALL
            .into_iter()
            .find(|p| normalize(p.name()) == wanted)
            .ok_or_else(|| PatternError::UnknownPattern(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Example {
    Conceptual,
    RealWorld,
    #[default]
    Both,
}

impl FromStr for Example {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "conceptual" => Ok(Example::Conceptual),
            "realworld" | "real" => Ok(Example::RealWorld),
            "both" | "all" => Ok(Example::Both),
            _ => Err(PatternError::UnknownExample(s.to_string())),
        }
    }
}

fn conceptual(pattern: Pattern) -> Transcript {
    match pattern {
        Pattern::AbstractFactory => abstract_factory::conceptual_demo(),
        Pattern::Builder => builder::conceptual_demo(),
        Pattern::Prototype => prototype::conceptual_demo(),
        Pattern::Singleton => singleton::conceptual_demo(),
        Pattern::Adapter => adapter::conceptual_demo(),
        Pattern::Bridge => bridge::conceptual_demo(),
        Pattern::Composite => composite::conceptual_demo(),
        Pattern::Decorator => decorator::conceptual_demo(),
        Pattern::Facade => facade::conceptual_demo(),
        Pattern::Flyweight => flyweight::conceptual_demo(),
        Pattern::Proxy => proxy::conceptual_demo(),
        Pattern::ChainOfResponsibility => chain_of_responsibility::conceptual_demo(),
        Pattern::Command => command::conceptual_demo(),
        Pattern::Iterator => iterator::conceptual_demo(),
        Pattern::Mediator => mediator::conceptual_demo(),
        Pattern::Memento => memento::conceptual_demo(),
        Pattern::Observer => observer::conceptual_demo(),
        Pattern::State => state::conceptual_demo(),
        Pattern::Strategy => strategy::conceptual_demo(),
        Pattern::TemplateMethod => template_method::conceptual_demo(),
        Pattern::Visitor => visitor::conceptual_demo(),
    }
}

fn real_world(pattern: Pattern, config: &CatalogConfig) -> Result<Transcript> {
    let transcript = match pattern {
        Pattern::AbstractFactory => abstract_factory::real_world_demo(&config.abstract_factory.os),
        Pattern::Builder => builder::real_world_demo(),
        Pattern::Prototype => prototype::real_world_demo(),
        Pattern::Singleton => singleton::real_world_demo(&config.singleton.values),
        Pattern::Adapter => adapter::real_world_demo()?,
        Pattern::Bridge => bridge::real_world_demo(),
        Pattern::Composite => composite::real_world_demo(),
        Pattern::Decorator => decorator::real_world_demo(&config.decorator)?,
        Pattern::Facade => facade::real_world_demo()?,
        Pattern::Flyweight => flyweight::real_world_demo(),
        Pattern::Proxy => proxy::real_world_demo(&config.proxy)?,
        Pattern::ChainOfResponsibility => chain_of_responsibility::real_world_demo(),
        Pattern::Command => command::real_world_demo(),
        Pattern::Iterator => iterator::real_world_demo(&config.iterator),
        Pattern::Mediator => mediator::real_world_demo()?,
        Pattern::Memento => memento::real_world_demo(),
        Pattern::Observer => observer::real_world_demo()?,
        Pattern::State => state::real_world_demo(),
        Pattern::Strategy => strategy::real_world_demo(&config.strategy)?,
        Pattern::TemplateMethod => template_method::real_world_demo(),
        Pattern::Visitor => visitor::real_world_demo(),
    };
    Ok(transcript)
}

/// Runs one pattern's demos. With [`Example::Both`] the real-world scenario
/// comes first, then the conceptual example.
pub fn run(pattern: Pattern, example: Example, config: &CatalogConfig) -> Result<Transcript> {
    info!(pattern = %pattern, ?example, "running demo");
    match example {
        Example::Conceptual => Ok(conceptual(pattern)),
        Example::RealWorld => real_world(pattern, config),
        Example::Both => {
            let mut out = real_world(pattern, config)?;
            out.section("Conceptual example:");
            out.append(conceptual(pattern));
            Ok(out)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternInfo {
    pub name: &'static str,
    pub slug: String,
    pub category: Category,
    pub intent: &'static str,
}

impl From<Pattern> for PatternInfo {
    fn from(pattern: Pattern) -> Self {
        Self {
            name: pattern.name(),
            slug: pattern.slug(),
            category: pattern.category(),
            intent: pattern.intent(),
        }
    }
}

/// Catalogue entries, optionally limited to one category.
pub fn entries(category: Option<Category>) -> Vec<PatternInfo> {
    Pattern::ALL
        .into_iter()
        .filter(|p| category.map_or(true, |c| p.category() == c))
        .map(PatternInfo::from)
        .collect()
}
