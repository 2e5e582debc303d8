// Flyweight
//
// Intent: fit more objects into memory by sharing the state they have in
// common instead of storing it in every object.

use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example: police car database
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub company: String,
    pub model: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Car {
    pub fn new(company: &str, model: &str, color: &str) -> Self {
        Self {
            company: company.to_string(),
            model: model.to_string(),
            color: color.to_string(),
            number: None,
            owner: None,
        }
    }

    pub fn registered(mut self, number: &str, owner: &str) -> Self {
        self.number = Some(number.to_string());
        self.owner = Some(owner.to_string());
        self
    }

    /// Just the shared part: company, model, colour.
    pub fn shared_state(&self) -> Car {
        Car::new(&self.company, &self.model, &self.color)
    }
}

/// Holds the shared (intrinsic) state. The unique state is passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flyweight {
    shared: Car,
}

impl Flyweight {
    pub fn new(shared: Car) -> Self {
        Self { shared }
    }

    pub fn operation(&self, unique: &Car) -> String {
        let shared = serde_json::to_string(&self.shared).unwrap_or_default();
        let unique = serde_json::to_string(unique).unwrap_or_default();
        format!(
            "Flyweight: Displaying shared ({}) and unique ({}) state.",
            shared, unique
        )
    }
}

#[derive(Debug, Default)]
pub struct FlyweightFactory {
    flyweights: Vec<(String, Flyweight)>,
}

impl FlyweightFactory {
    pub fn new(cars: impl IntoIterator<Item = Car>) -> Self {
        let mut factory = Self::default();
        for car in cars {
            let key = Self::key(&car);
            factory.flyweights.push((key, Flyweight::new(car)));
        }
        factory
    }

    /// Sorted attribute values joined with `_`, so attribute order never
    /// changes the key.
    pub fn key(car: &Car) -> String {
        let mut parts: Vec<&str> = vec![&car.company, &car.model, &car.color];
        parts.extend(car.number.as_deref());
        parts.extend(car.owner.as_deref());
        parts.sort_unstable();
        parts.join("_")
    }

    pub fn get_flyweight(&mut self, shared: &Car) -> &Flyweight {
        let key = Self::key(shared);
        let index = match self.flyweights.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                debug!(%key, "reusing existing flyweight");
                index
            }
            None => {
                debug!(%key, "can't find a flyweight, creating new one");
                self.flyweights.push((key, Flyweight::new(shared.clone())));
                self.flyweights.len() - 1
            }
        };
        &self.flyweights[index].1
    }

    pub fn list_flyweights(&self) -> Vec<String> {
        self.flyweights.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.flyweights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flyweights.is_empty()
    }
}

pub fn add_car_to_police_database(factory: &mut FlyweightFactory, car: &Car) -> String {
    let flyweight = factory.get_flyweight(&car.shared_state());
    flyweight.operation(car)
}

fn list_lines(factory: &FlyweightFactory) -> Vec<String> {
    let keys = factory.list_flyweights();
    let mut lines = vec![format!("FlyweightFactory: I have {} flyweights:", keys.len())];
    lines.extend(keys);
    lines
}

pub fn conceptual_demo() -> Transcript {
    let mut factory = FlyweightFactory::new([
        Car::new("Chevrolet", "Camaro2018", "pink"),
        Car::new("Mercedes Benz", "C300", "black"),
        Car::new("Mercedes Benz", "C500", "red"),
        Car::new("BMW", "M5", "red"),
        Car::new("BMW", "X6", "white"),
    ]);

    let mut out = Transcript::new();
    out.lines(list_lines(&factory));

    for car in [
        Car::new("BMW", "M5", "red").registered("CL234IR", "James Doe"),
        Car::new("BMW", "X1", "red").registered("CL234IR", "James Doe"),
    ] {
        out.blank();
        out.line("Client: Adding a car to database.");
        out.line(add_car_to_police_database(&mut factory, &car));
    }

    out.blank();
    out.lines(list_lines(&factory));
    out
}

// ============================================================================
// Real-world example: forest rendering
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
pub struct TreeType {
    pub name: String,
    pub color: String,
    pub texture: String,
}

impl TreeType {
    pub fn draw(&self, x: i32, y: i32) -> String {
        format!(
            "Drawing tree type: {}, Color: {}, Texture: {} at ({}, {})",
            self.name, self.color, self.texture, x, y
        )
    }
}

/// Owned cache of tree types.
#[derive(Debug, Default)]
pub struct TreeFactory {
    types: HashMap<(String, String, String), Rc<TreeType>>,
}

impl TreeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree_type(&mut self, name: &str, color: &str, texture: &str) -> Rc<TreeType> {
        let key = (name.to_string(), color.to_string(), texture.to_string());
        self.types
            .entry(key)
            .or_insert_with(|| {
                debug!(name, color, texture, "new tree type");
                Rc::new(TreeType {
                    name: name.to_string(),
                    color: color.to_string(),
                    texture: texture.to_string(),
                })
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    pub x: i32,
    pub y: i32,
    pub kind: Rc<TreeType>,
}

impl Tree {
    pub fn draw(&self) -> String {
        self.kind.draw(self.x, self.y)
    }
}

#[derive(Debug, Default)]
pub struct Forest {
    trees: Vec<Tree>,
    factory: TreeFactory,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plant_tree(&mut self, x: i32, y: i32, name: &str, color: &str, texture: &str) {
        let kind = self.factory.tree_type(name, color, texture);
        self.trees.push(Tree { x, y, kind });
    }

    pub fn draw(&self) -> Vec<String> {
        self.trees.iter().map(Tree::draw).collect()
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn tree_type_count(&self) -> usize {
        self.factory.len()
    }
}

pub fn real_world_demo() -> Transcript {
    let mut forest = Forest::new();
    forest.plant_tree(1, 2, "Pine", "Green", "Needle");
    forest.plant_tree(5, 3, "Oak", "Brown", "Leaf");
    forest.plant_tree(8, 9, "Pine", "Green", "Needle");

    let mut out = Transcript::new();
    out.lines(forest.draw());
    out.line(format!(
        "{} trees share {} tree types",
        forest.trees().len(),
        forest.tree_type_count()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_is_sorted_and_order_independent() {
        let car = Car::new("BMW", "M5", "red");
        assert_eq!(FlyweightFactory::key(&car), "BMW_M5_red");

        let registered = car.registered("CL234IR", "James Doe");
        assert_eq!(
            FlyweightFactory::key(&registered),
            "BMW_CL234IR_James Doe_M5_red"
        );
    }

    #[test]
    fn test_factory_reuses_and_creates() {
        let mut factory = FlyweightFactory::new([Car::new("BMW", "M5", "red")]);
        add_car_to_police_database(
            &mut factory,
            &Car::new("BMW", "M5", "red").registered("CL234IR", "James Doe"),
        );
        assert_eq!(factory.len(), 1);

        add_car_to_police_database(&mut factory, &Car::new("BMW", "X1", "red"));
        assert_eq!(factory.list_flyweights(), vec!["BMW_M5_red", "BMW_X1_red"]);
    }

    #[test]
    fn test_operation_renders_json() {
        let flyweight = Flyweight::new(Car::new("BMW", "M5", "red"));
        let line = flyweight.operation(&Car::new("BMW", "M5", "red").registered("X", "Y"));
        assert!(line.contains(r#"{"company":"BMW","model":"M5","color":"red"}"#));
        assert!(line.contains(r#""number":"X","owner":"Y""#));
    }

    #[test]
    fn test_forest_shares_tree_types() {
        let mut forest = Forest::new();
        forest.plant_tree(1, 2, "Pine", "Green", "Needle");
        forest.plant_tree(3, 4, "Pine", "Green", "Needle");
        forest.plant_tree(5, 6, "Oak", "Brown", "Leaf");

        assert_eq!(forest.tree_type_count(), 2);
        let trees = forest.trees();
        assert!(Rc::ptr_eq(&trees[0].kind, &trees[1].kind));
        assert!(!Rc::ptr_eq(&trees[0].kind, &trees[2].kind));
        assert_eq!(
            forest.draw()[2],
            "Drawing tree type: Oak, Color: Brown, Texture: Leaf at (5, 6)"
        );
    }

    proptest! {
        #[test]
        fn prop_one_flyweight_per_distinct_car(
            picks in prop::collection::vec((0usize..3, 0usize..3, 0usize..3), 0..40)
        ) {
            let companies = ["BMW", "Audi", "Kia"];
            let models = ["A", "B", "C"];
            let colors = ["red", "blue", "black"];

            let mut factory = FlyweightFactory::default();
            let mut distinct = std::collections::HashSet::new();
            for (c, m, k) in picks {
                let car = Car::new(companies[c], models[m], colors[k]);
                distinct.insert(FlyweightFactory::key(&car));
                factory.get_flyweight(&car);
            }
            prop_assert_eq!(factory.len(), distinct.len());
        }

        #[test]
        fn prop_equal_triples_share_allocation(
            name in "[a-c]", color in "[a-c]", texture in "[a-c]"
        ) {
            let mut factory = TreeFactory::new();
            let first = factory.tree_type(&name, &color, &texture);
            let second = factory.tree_type(&name, &color, &texture);
            prop_assert!(Rc::ptr_eq(&first, &second));
            prop_assert_eq!(factory.len(), 1);
        }
    }
}
