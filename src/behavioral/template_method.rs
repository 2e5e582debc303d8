// Template Method
//
// Intent: define the skeleton of an algorithm in a base and let
// implementors override specific steps without changing its structure.
// In Rust the skeleton is a provided trait method.

use std::fmt;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

pub trait AbstractClass {
    fn template_method(&self) -> Vec<String> {
        let mut lines = vec![self.base_operation1(), self.required_operations1()];
        lines.push(self.base_operation2());
        lines.extend(self.hook1());
        lines.push(self.required_operations2());
        lines.push(self.base_operation3());
        lines.extend(self.hook2());
        lines
    }

    fn base_operation1(&self) -> String {
        "AbstractClass says: I am doing the bulk of the work".to_string()
    }

    fn base_operation2(&self) -> String {
        "AbstractClass says: But I let subclasses override some operations".to_string()
    }

    fn base_operation3(&self) -> String {
        "AbstractClass says: But I am doing the bulk of the work anyway".to_string()
    }

    fn required_operations1(&self) -> String;
    fn required_operations2(&self) -> String;

    fn hook1(&self) -> Option<String> {
        None
    }

    fn hook2(&self) -> Option<String> {
        None
    }
}

pub struct ConcreteClass1;

impl AbstractClass for ConcreteClass1 {
    fn required_operations1(&self) -> String {
        "ConcreteClass1 says: Implemented Operation1".to_string()
    }

    fn required_operations2(&self) -> String {
        "ConcreteClass1 says: Implemented Operation2".to_string()
    }
}

pub struct ConcreteClass2;

impl AbstractClass for ConcreteClass2 {
    fn required_operations1(&self) -> String {
        "ConcreteClass2 says: Implemented Operation1".to_string()
    }

    fn required_operations2(&self) -> String {
        "ConcreteClass2 says: Implemented Operation2".to_string()
    }

    fn hook1(&self) -> Option<String> {
        Some("ConcreteClass2 says: Overridden Hook1".to_string())
    }
}

pub fn client_code(class: &dyn AbstractClass) -> Vec<String> {
    class.template_method()
}

pub fn conceptual_demo() -> Transcript {
    let mut out = Transcript::new();
    out.line("Same client code can work with different subclasses:");
    out.lines(client_code(&ConcreteClass1));
    out.blank();
    out.line("Same client code can work with different subclasses:");
    out.lines(client_code(&ConcreteClass2));
    out
}

// ============================================================================
// Real-world example: strategy game AI
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State every AI keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base {
    pub resources: u32,
    pub structures: Vec<String>,
    pub scouts: u32,
    pub warriors: u32,
    pub closest_enemy: Option<Position>,
    pub map_center: Position,
}

impl Base {
    pub fn new(map_center: Position) -> Self {
        Self {
            resources: 0,
            structures: Vec::new(),
            scouts: 0,
            warriors: 0,
            closest_enemy: None,
            map_center,
        }
    }
}

const RESOURCES_PER_STRUCTURE: u32 = 60;

pub trait GameAi {
    fn name(&self) -> &'static str;
    fn base(&self) -> &Base;
    fn base_mut(&mut self) -> &mut Base;

    /// One turn: gather, build, train, attack. Always in that order.
    fn turn(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.extend(self.collect_resources());
        lines.extend(self.build_structures());
        lines.extend(self.build_units());
        lines.push(self.attack());
        lines
    }

    fn collect_resources(&mut self) -> Option<String> {
        let base = self.base_mut();
        let gained = RESOURCES_PER_STRUCTURE * base.structures.len() as u32;
        base.resources += gained;
        Some(format!(
            "{} collect {} resources from {} structures",
            self.name(),
            gained,
            self.base().structures.len()
        ))
    }

    fn build_structures(&mut self) -> Option<String>;
    fn build_units(&mut self) -> Option<String>;

    fn attack(&mut self) -> String {
        match self.closest_enemy() {
            Some(enemy) => self.send_warriors(enemy),
            None => {
                let center = self.base().map_center;
                self.send_scouts(center)
            }
        }
    }

    fn closest_enemy(&self) -> Option<Position> {
        self.base().closest_enemy
    }

    fn send_scouts(&mut self, position: Position) -> String;
    fn send_warriors(&mut self, position: Position) -> String;
}

const STRUCTURE_COST: u32 = 100;
const UNIT_COST: u32 = 30;

#[derive(Debug, Clone)]
pub struct OrcsAi {
    base: Base,
}

impl OrcsAi {
    pub fn new() -> Self {
        let mut base = Base::new(Position { x: 50, y: 50 });
        base.structures.push("Great Hall".to_string());
        Self { base }
    }

    pub fn discover_enemy(&mut self, position: Position) {
        self.base.closest_enemy = Some(position);
    }
}

impl Default for OrcsAi {
    fn default() -> Self {
        Self::new()
    }
}

impl GameAi for OrcsAi {
    fn name(&self) -> &'static str {
        "Orcs"
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn build_structures(&mut self) -> Option<String> {
        if self.base.resources < STRUCTURE_COST {
            return None;
        }
        self.base.resources -= STRUCTURE_COST;
        self.base.structures.push("Barracks".to_string());
        Some(format!(
            "Orcs build Barracks (resources left: {})",
            self.base.resources
        ))
    }

    fn build_units(&mut self) -> Option<String> {
        if self.base.resources < UNIT_COST {
            return None;
        }
        self.base.resources -= UNIT_COST;
        if self.base.scouts == 0 {
            self.base.scouts += 1;
            Some("Orcs train a scout".to_string())
        } else {
            self.base.warriors += 1;
            Some(format!("Orcs train a warrior ({} total)", self.base.warriors))
        }
    }

    fn send_scouts(&mut self, position: Position) -> String {
        if self.base.scouts > 0 {
            format!("Orcs send {} scout(s) to {}", self.base.scouts, position)
        } else {
            "Orcs have no scouts to send".to_string()
        }
    }

    fn send_warriors(&mut self, position: Position) -> String {
        if self.base.warriors > 5 {
            format!("Orcs send {} warriors to {}", self.base.warriors, position)
        } else {
            format!(
                "Orcs hold back: only {} warriors, enemy at {}",
                self.base.warriors, position
            )
        }
    }
}

/// Monsters never gather or build.
#[derive(Debug, Clone)]
pub struct MonstersAi {
    base: Base,
}

impl MonstersAi {
    pub fn new() -> Self {
        let mut base = Base::new(Position { x: 50, y: 50 });
        base.warriors = 12;
        base.closest_enemy = Some(Position { x: 10, y: 20 });
        Self { base }
    }
}

impl Default for MonstersAi {
    fn default() -> Self {
        Self::new()
    }
}

impl GameAi for MonstersAi {
    fn name(&self) -> &'static str {
        "Monsters"
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn collect_resources(&mut self) -> Option<String> {
        None
    }

    fn build_structures(&mut self) -> Option<String> {
        None
    }

    fn build_units(&mut self) -> Option<String> {
        None
    }

    fn send_scouts(&mut self, position: Position) -> String {
        format!("Monsters wander towards {}", position)
    }

    fn send_warriors(&mut self, position: Position) -> String {
        format!("Monsters swarm the enemy at {}", position)
    }
}

pub fn real_world_demo() -> Transcript {
    let mut out = Transcript::new();
    out.line("Starting the game simulation...");

    let mut players: Vec<Box<dyn GameAi>> = vec![Box::new(OrcsAi::new()), Box::new(MonstersAi::new())];
    for player in players.iter_mut() {
        out.section(format!("{}' turn:", player.name()));
        out.lines(player.turn());
    }

    out.section("Game simulation completed.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_order() {
        let lines = client_code(&ConcreteClass1);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "ConcreteClass1 says: Implemented Operation1");
        assert_eq!(lines[3], "ConcreteClass1 says: Implemented Operation2");
    }

    #[test]
    fn test_hook_override() {
        let lines = client_code(&ConcreteClass2);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3], "ConcreteClass2 says: Overridden Hook1");
        assert!(lines[5].contains("bulk of the work anyway"));
    }

    #[test]
    fn test_orcs_bookkeeping_over_turns() {
        let mut orcs = OrcsAi::new();

        let first = orcs.turn();
        assert_eq!(first[0], "Orcs collect 60 resources from 1 structures");
        assert_eq!(first[1], "Orcs train a scout");
        assert_eq!(first[2], "Orcs send 1 scout(s) to (50, 50)");
        assert_eq!(orcs.base().resources, 30);

        orcs.turn();
        assert_eq!(orcs.base().warriors, 1);
        assert_eq!(orcs.base().resources, 60);

        let third = orcs.turn();
        assert!(third.contains(&"Orcs build Barracks (resources left: 20)".to_string()));
        assert_eq!(orcs.base().structures.len(), 2);
    }

    #[test]
    fn test_orcs_need_more_than_five_warriors() {
        let mut orcs = OrcsAi::new();
        orcs.discover_enemy(Position { x: 1, y: 1 });
        orcs.base_mut().warriors = 5;
        assert!(orcs.attack().starts_with("Orcs hold back"));
        orcs.base_mut().warriors = 6;
        assert_eq!(orcs.attack(), "Orcs send 6 warriors to (1, 1)");
    }

    #[test]
    fn test_monsters_skip_economy() {
        let mut monsters = MonstersAi::new();
        assert_eq!(monsters.turn(), vec!["Monsters swarm the enemy at (10, 20)"]);
        assert_eq!(monsters.base().resources, 0);
    }
}
