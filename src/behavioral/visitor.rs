// Visitor
//
// Intent: separate algorithms from the objects they operate on. The element
// picks the visitor method (double dispatch) through `accept`.

use tracing::debug;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

pub trait Component {
    fn accept(&self, visitor: &dyn Visitor) -> String;
}

pub struct ConcreteComponentA;

impl ConcreteComponentA {
    pub fn exclusive_method_of_concrete_component_a(&self) -> &'static str {
        "A"
    }
}

impl Component for ConcreteComponentA {
    fn accept(&self, visitor: &dyn Visitor) -> String {
        visitor.visit_concrete_component_a(self)
    }
}

pub struct ConcreteComponentB;

impl ConcreteComponentB {
    pub fn special_method_of_concrete_component_b(&self) -> &'static str {
        "B"
    }
}

impl Component for ConcreteComponentB {
    fn accept(&self, visitor: &dyn Visitor) -> String {
        visitor.visit_concrete_component_b(self)
    }
}

pub trait Visitor {
    fn visit_concrete_component_a(&self, element: &ConcreteComponentA) -> String;
    fn visit_concrete_component_b(&self, element: &ConcreteComponentB) -> String;
}

pub struct ConcreteVisitor1;

impl Visitor for ConcreteVisitor1 {
    fn visit_concrete_component_a(&self, element: &ConcreteComponentA) -> String {
        format!("{} + ConcreteVisitor1", element.exclusive_method_of_concrete_component_a())
    }

    fn visit_concrete_component_b(&self, element: &ConcreteComponentB) -> String {
        format!("{} + ConcreteVisitor1", element.special_method_of_concrete_component_b())
    }
}

pub struct ConcreteVisitor2;

impl Visitor for ConcreteVisitor2 {
    fn visit_concrete_component_a(&self, element: &ConcreteComponentA) -> String {
        format!("{} + ConcreteVisitor2", element.exclusive_method_of_concrete_component_a())
    }

    fn visit_concrete_component_b(&self, element: &ConcreteComponentB) -> String {
        format!("{} + ConcreteVisitor2", element.special_method_of_concrete_component_b())
    }
}

pub fn client_code(components: &[Box<dyn Component>], visitor: &dyn Visitor) -> Vec<String> {
    components.iter().map(|c| c.accept(visitor)).collect()
}

pub fn conceptual_demo() -> Transcript {
    let components: Vec<Box<dyn Component>> =
        vec![Box::new(ConcreteComponentA), Box::new(ConcreteComponentB)];

    let mut out = Transcript::new();
    out.line("The client code works with all visitors via the base Visitor interface:");
    out.lines(client_code(&components, &ConcreteVisitor1));
    out.blank();
    out.line("It allows the same client code to work with different types of visitors:");
    out.lines(client_code(&components, &ConcreteVisitor2));
    out
}

// ============================================================================
// Real-world example: exporting shapes
// ============================================================================

pub trait VisitableShape {
    fn move_to(&mut self, x: i32, y: i32) -> Vec<String>;
    fn draw(&self) -> Vec<String>;
    fn accept(&self, visitor: &mut dyn ShapeVisitor);
}

pub trait ShapeVisitor {
    fn visit_dot(&mut self, dot: &VDot);
    fn visit_circle(&mut self, circle: &VCircle);
    fn visit_rectangle(&mut self, rectangle: &VRectangle);
    fn visit_compound(&mut self, compound: &CompoundShape);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VDot {
    pub x: i32,
    pub y: i32,
}

impl VisitableShape for VDot {
    fn move_to(&mut self, x: i32, y: i32) -> Vec<String> {
        self.x = x;
        self.y = y;
        vec![format!("Dot moved to ({}, {}).", x, y)]
    }

    fn draw(&self) -> Vec<String> {
        vec![format!("Drawing a dot at position ({}, {}).", self.x, self.y)]
    }

    fn accept(&self, visitor: &mut dyn ShapeVisitor) {
        visitor.visit_dot(self);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VCircle {
    pub x: i32,
    pub y: i32,
    pub radius: u32,
}

impl Default for VCircle {
    fn default() -> Self {
        Self { x: 0, y: 0, radius: 5 }
    }
}

impl VisitableShape for VCircle {
    fn move_to(&mut self, x: i32, y: i32) -> Vec<String> {
        self.x = x;
        self.y = y;
        vec![format!("Circle moved to ({}, {}) with radius {}.", x, y, self.radius)]
    }

    fn draw(&self) -> Vec<String> {
        vec![format!(
            "Drawing a circle at ({}, {}) with radius {}.",
            self.x, self.y, self.radius
        )]
    }

    fn accept(&self, visitor: &mut dyn ShapeVisitor) {
        visitor.visit_circle(self);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VRectangle {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for VRectangle {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 10,
            height: 5,
        }
    }
}

impl VisitableShape for VRectangle {
    fn move_to(&mut self, x: i32, y: i32) -> Vec<String> {
        self.x = x;
        self.y = y;
        vec![format!(
            "Rectangle moved to ({}, {}) with width {} and height {}.",
            x, y, self.width, self.height
        )]
    }

    fn draw(&self) -> Vec<String> {
        vec![format!(
            "Drawing a rectangle at ({}, {}) with width {} and height {}.",
            self.x, self.y, self.width, self.height
        )]
    }

    fn accept(&self, visitor: &mut dyn ShapeVisitor) {
        visitor.visit_rectangle(self);
    }
}

#[derive(Default)]
pub struct CompoundShape {
    children: Vec<Box<dyn VisitableShape>>,
}

impl CompoundShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: Box<dyn VisitableShape>) {
        self.children.push(shape);
    }

    pub fn remove(&mut self, index: usize) -> Option<Box<dyn VisitableShape>> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl VisitableShape for CompoundShape {
    fn move_to(&mut self, x: i32, y: i32) -> Vec<String> {
        self.children
            .iter_mut()
            .flat_map(|child| child.move_to(x, y))
            .collect()
    }

    fn draw(&self) -> Vec<String> {
        self.children.iter().flat_map(|child| child.draw()).collect()
    }

    /// Children first, then the compound itself.
    fn accept(&self, visitor: &mut dyn ShapeVisitor) {
        for child in &self.children {
            child.accept(visitor);
        }
        visitor.visit_compound(self);
    }
}

/// Builds an XML document. Every visit leaves exactly one finished element
/// on the stack, so a compound pops as many elements as it has children.
#[derive(Debug, Default)]
pub struct XmlExportVisitor {
    stack: Vec<String>,
    log: Vec<String>,
}

impl XmlExportVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Top-level elements exported so far, one per line.
    pub fn xml(&self) -> String {
        self.stack.join("\n")
    }
}

impl ShapeVisitor for XmlExportVisitor {
    fn visit_dot(&mut self, dot: &VDot) {
        self.log.push("Exporting Dot to XML.".to_string());
        self.stack
            .push(format!("<dot x=\"{}\" y=\"{}\"/>", dot.x, dot.y));
    }

    fn visit_circle(&mut self, circle: &VCircle) {
        self.log.push("Exporting Circle to XML.".to_string());
        self.stack.push(format!(
            "<circle x=\"{}\" y=\"{}\" radius=\"{}\"/>",
            circle.x, circle.y, circle.radius
        ));
    }

    fn visit_rectangle(&mut self, rectangle: &VRectangle) {
        self.log.push("Exporting Rectangle to XML.".to_string());
        self.stack.push(format!(
            "<rectangle x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>",
            rectangle.x, rectangle.y, rectangle.width, rectangle.height
        ));
    }

    fn visit_compound(&mut self, compound: &CompoundShape) {
        self.log.push("Exporting Compound Shape to XML.".to_string());
        let start = self.stack.len().saturating_sub(compound.len());
        let children: String = self.stack.drain(start..).collect();
        debug!(children = compound.len(), "folded compound into xml");
        self.stack.push(format!("<compound>{}</compound>", children));
    }
}

#[derive(Debug, Default)]
pub struct ConsoleDisplayVisitor {
    lines: Vec<String>,
}

impl ConsoleDisplayVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl ShapeVisitor for ConsoleDisplayVisitor {
    fn visit_dot(&mut self, dot: &VDot) {
        self.lines.push("Displaying Dot in console.".to_string());
        self.lines.extend(dot.draw());
    }

    fn visit_circle(&mut self, circle: &VCircle) {
        self.lines.push("Displaying Circle in console.".to_string());
        self.lines.extend(circle.draw());
    }

    fn visit_rectangle(&mut self, rectangle: &VRectangle) {
        self.lines.push("Displaying Rectangle in console.".to_string());
        self.lines.extend(rectangle.draw());
    }

    fn visit_compound(&mut self, compound: &CompoundShape) {
        self.lines.push("Displaying Compound Shape in console.".to_string());
        self.lines.extend(compound.draw());
    }
}

fn sample_scene() -> CompoundShape {
    let mut inner = CompoundShape::new();
    inner.add(Box::new(VDot::default()));
    inner.add(Box::new(VCircle::default()));

    let mut outer = CompoundShape::new();
    outer.add(Box::new(VRectangle::default()));
    outer.add(Box::new(inner));
    outer
}

pub fn real_world_demo() -> Transcript {
    let scene = sample_scene();
    let mut out = Transcript::new();

    let mut exporter = XmlExportVisitor::new();
    scene.accept(&mut exporter);
    out.line("Exporting shapes to XML:");
    out.lines(exporter.log().iter().cloned());
    out.line(exporter.xml());

    let mut display = ConsoleDisplayVisitor::new();
    scene.accept(&mut display);
    out.section("Displaying shapes in console:");
    out.lines(display.into_lines());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_dispatch() {
        let components: Vec<Box<dyn Component>> =
            vec![Box::new(ConcreteComponentA), Box::new(ConcreteComponentB)];
        assert_eq!(
            client_code(&components, &ConcreteVisitor1),
            vec!["A + ConcreteVisitor1", "B + ConcreteVisitor1"]
        );
        assert_eq!(
            client_code(&components, &ConcreteVisitor2)[1],
            "B + ConcreteVisitor2"
        );
    }

    #[test]
    fn test_children_are_visited_before_compound() {
        let mut exporter = XmlExportVisitor::new();
        sample_scene().accept(&mut exporter);
        assert_eq!(
            exporter.log(),
            [
                "Exporting Rectangle to XML.",
                "Exporting Dot to XML.",
                "Exporting Circle to XML.",
                "Exporting Compound Shape to XML.",
                "Exporting Compound Shape to XML.",
            ]
        );
    }

    #[test]
    fn test_xml_nests_compounds() {
        let mut exporter = XmlExportVisitor::new();
        sample_scene().accept(&mut exporter);
        assert_eq!(
            exporter.xml(),
            "<compound><rectangle x=\"0\" y=\"0\" width=\"10\" height=\"5\"/>\
             <compound><dot x=\"0\" y=\"0\"/><circle x=\"0\" y=\"0\" radius=\"5\"/></compound>\
             </compound>"
        );
    }

    #[test]
    fn test_empty_compound_exports_empty_element() {
        let mut exporter = XmlExportVisitor::new();
        CompoundShape::new().accept(&mut exporter);
        assert_eq!(exporter.xml(), "<compound></compound>");
    }

    #[test]
    fn test_move_propagates_to_children() {
        let mut scene = sample_scene();
        let moved = scene.move_to(3, 4);
        assert_eq!(moved.len(), 3);
        assert!(scene.draw().iter().all(|l| l.contains("(3, 4)")));
    }

    #[test]
    fn test_console_display_draws_compound_children() {
        let mut display = ConsoleDisplayVisitor::new();
        sample_scene().accept(&mut display);
        let lines = display.into_lines();
        assert_eq!(lines[0], "Displaying Rectangle in console.");
        assert_eq!(lines.last().map(String::as_str), Some("Drawing a circle at (0, 0) with radius 5."));
    }
}
