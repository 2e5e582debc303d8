// Prototype
//
// Intent: copy existing objects without making the code depend on their
// concrete types. In Rust the copy itself is `Clone`; the pattern part is
// cloning through a trait object.

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example: shallow vs deep copy
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct IdInfo {
    pub id_number: u32,
}

/// `Clone` is the shallow copy: `id_info` stays shared between copies.
#[derive(Debug, Clone)]
pub struct Person {
    pub age: u32,
    pub birth_date: NaiveDate,
    pub name: String,
    pub id_info: Rc<RefCell<IdInfo>>,
}

impl Person {
    pub fn shallow_copy(&self) -> Person {
        self.clone()
    }

    pub fn deep_copy(&self) -> Person {
        Person {
            id_info: Rc::new(RefCell::new(self.id_info.borrow().clone())),
            ..self.clone()
        }
    }

    pub fn id_number(&self) -> u32 {
        self.id_info.borrow().id_number
    }

    pub fn describe(&self) -> String {
        format!(
            "Name: {}, Age: {}, BirthDate: {}, ID#: {}",
            self.name,
            self.age,
            self.birth_date.format("%m/%d/%y"),
            self.id_number()
        )
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn conceptual_demo() -> Transcript {
    let mut p1 = Person {
        age: 42,
        birth_date: date(1977, 1, 1),
        name: "Jack Daniels".to_string(),
        id_info: Rc::new(RefCell::new(IdInfo { id_number: 666 })),
    };

    let p2 = p1.shallow_copy();
    let p3 = p1.deep_copy();

    let mut out = Transcript::new();
    out.line("Original values of p1, p2, p3:");
    out.line(format!("   p1 instance values: {}", p1.describe()));
    out.line(format!("   p2 instance values: {}", p2.describe()));
    out.line(format!("   p3 instance values: {}", p3.describe()));

    p1.age = 32;
    p1.birth_date = date(1900, 1, 1);
    p1.name = "Frank".to_string();
    p1.id_info.borrow_mut().id_number = 7878;

    out.line("Values of p1, p2 and p3 after changes to p1:");
    out.line(format!("   p1 instance values: {}", p1.describe()));
    out.line(format!(
        "   p2 instance values (reference values have changed): {}",
        p2.describe()
    ));
    out.line(format!(
        "   p3 instance values (everything was kept the same): {}",
        p3.describe()
    ));
    out
}

// ============================================================================
// Real-world example: cloning shapes through a trait object
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeBase {
    pub x: i32,
    pub y: i32,
    pub color: String,
}

pub trait Shape {
    fn base(&self) -> &ShapeBase;
    fn base_mut(&mut self) -> &mut ShapeBase;
    fn clone_box(&self) -> Box<dyn Shape>;
    fn area(&self) -> f64;
    fn describe(&self) -> String;
}

impl Clone for Box<dyn Shape> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub base: ShapeBase,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub base: ShapeBase,
    pub radius: u32,
}

impl Shape for Rectangle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }

    fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }

    fn describe(&self) -> String {
        format!(
            "{} rectangle {}x{} at ({}, {})",
            self.base.color, self.width, self.height, self.base.x, self.base.y
        )
    }
}

impl Shape for Circle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn clone_box(&self) -> Box<dyn Shape> {
        Box::new(self.clone())
    }

    fn area(&self) -> f64 {
        PI * f64::from(self.radius).powi(2)
    }

    fn describe(&self) -> String {
        format!(
            "{} circle r={} at ({}, {})",
            self.base.color, self.radius, self.base.x, self.base.y
        )
    }
}

/// Named, pre-configured prototypes. `get` always hands out a fresh copy.
#[derive(Default)]
pub struct ShapeRegistry {
    prototypes: HashMap<String, Box<dyn Shape>>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, prototype: Box<dyn Shape>) {
        self.prototypes.insert(name.into(), prototype);
    }

    pub fn get(&self, name: &str) -> Option<Box<dyn Shape>> {
        self.prototypes.get(name).map(|p| p.clone_box())
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

pub fn real_world_demo() -> Transcript {
    let shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(Circle {
            base: ShapeBase {
                x: 10,
                y: 10,
                color: "red".to_string(),
            },
            radius: 20,
        }),
        Box::new(Rectangle {
            base: ShapeBase {
                x: 0,
                y: 0,
                color: "blue".to_string(),
            },
            width: 10,
            height: 20,
        }),
    ];

    // The copy loop never names a concrete shape type.
    let copies: Vec<Box<dyn Shape>> = shapes.iter().map(|s| s.clone_box()).collect();

    let mut out = Transcript::new();
    for (original, copy) in shapes.iter().zip(&copies) {
        out.line(format!(
            "{} -> copy: {} (same data: {})",
            original.describe(),
            copy.describe(),
            original.describe() == copy.describe()
        ));
    }

    let mut registry = ShapeRegistry::new();
    registry.register(
        "big green circle",
        Box::new(Circle {
            base: ShapeBase {
                x: 5,
                y: 0,
                color: "green".to_string(),
            },
            radius: 45,
        }),
    );

    if let Some(mut shape) = registry.get("big green circle") {
        shape.base_mut().y = 100;
        out.line(format!("From registry: {}", shape.describe()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> Person {
        Person {
            age: 42,
            birth_date: date(1977, 1, 1),
            name: "Jack Daniels".to_string(),
            id_info: Rc::new(RefCell::new(IdInfo { id_number: 666 })),
        }
    }

    #[test]
    fn test_shallow_copy_shares_id_info() {
        let p1 = person();
        let p2 = p1.shallow_copy();
        p1.id_info.borrow_mut().id_number = 7878;

        assert_eq!(p2.id_number(), 7878);
        assert!(Rc::ptr_eq(&p1.id_info, &p2.id_info));
    }

    #[test]
    fn test_deep_copy_owns_id_info() {
        let mut p1 = person();
        let p3 = p1.deep_copy();
        p1.id_info.borrow_mut().id_number = 7878;
        p1.name = "Frank".to_string();

        assert_eq!(p3.id_number(), 666);
        assert_eq!(p3.name, "Jack Daniels");
    }

    #[test]
    fn test_clone_box_copies_subtype_fields() {
        let original: Box<dyn Shape> = Box::new(Rectangle {
            base: ShapeBase {
                x: 1,
                y: 2,
                color: "blue".to_string(),
            },
            width: 3,
            height: 4,
        });
        let mut copy = original.clone();
        assert_eq!(copy.describe(), original.describe());
        assert_eq!(copy.area(), 12.0);

        copy.base_mut().color = "red".to_string();
        assert_eq!(original.base().color, "blue");
    }

    #[test]
    fn test_registry_hands_out_independent_copies() {
        let mut registry = ShapeRegistry::new();
        registry.register(
            "dot",
            Box::new(Circle {
                base: ShapeBase {
                    x: 0,
                    y: 0,
                    color: "black".to_string(),
                },
                radius: 1,
            }),
        );

        let mut a = registry.get("dot").unwrap();
        a.base_mut().x = 50;
        let b = registry.get("dot").unwrap();

        assert_eq!(b.base().x, 0);
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_conceptual_demo_shows_shared_reference() {
        let out = conceptual_demo();
        assert!(out.contains("(reference values have changed): Name: Jack Daniels, Age: 42"));
        assert!(out.contains("ID#: 7878"));
    }
}
