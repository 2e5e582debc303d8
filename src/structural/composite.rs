// Composite
//
// Intent: compose objects into tree structures and let clients treat single
// objects and compositions the same way.

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

pub trait Component {
    fn operation(&self) -> String;

    fn is_composite(&self) -> bool {
        false
    }

    /// Returns the child back when this component cannot hold children.
    fn add(&mut self, child: Box<dyn Component>) -> Result<(), Box<dyn Component>> {
        Err(child)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Leaf;

impl Component for Leaf {
    fn operation(&self) -> String {
        "Leaf".to_string()
    }
}

#[derive(Default)]
pub struct Composite {
    children: Vec<Box<dyn Component>>,
}

impl Composite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, child: impl Component + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Component>> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Component for Composite {
    fn operation(&self) -> String {
        let parts: Vec<String> = self.children.iter().map(|c| c.operation()).collect();
        format!("Branch({})", parts.join("+"))
    }

    fn is_composite(&self) -> bool {
        true
    }

    fn add(&mut self, child: Box<dyn Component>) -> Result<(), Box<dyn Component>> {
        self.children.push(child);
        Ok(())
    }
}

pub fn client_code(leaf: &dyn Component) -> String {
    format!("RESULT: {}", leaf.operation())
}

/// Works with any component, without checking concrete types.
pub fn client_code2(component1: &mut dyn Component, component2: Box<dyn Component>) -> String {
    if component1.is_composite() {
        // Only fails for leaves, which `is_composite` already ruled out.
        let _ = component1.add(component2);
    }
    format!("RESULT: {}", component1.operation())
}

pub fn conceptual_demo() -> Transcript {
    let mut out = Transcript::new();

    out.line("Client: I get a simple component:");
    out.line(client_code(&Leaf));

    let mut tree = Composite::new()
        .with(Composite::new().with(Leaf).with(Leaf))
        .with(Composite::new().with(Leaf));
    out.line("Client: Now I've got a composite tree:");
    out.line(client_code(&tree));

    out.line("Client: I don't need to check the components classes even when managing the tree:");
    out.line(client_code2(&mut tree, Box::new(Leaf)));
    out
}

// ============================================================================
// Real-world example: graphics editor
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

pub trait Graphic {
    fn move_by(&mut self, dx: i32, dy: i32);
    fn draw(&self) -> Vec<String>;
    /// `None` for a graphic with nothing to enclose.
    fn bounds(&self) -> Option<Bounds>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dot {
    pub x: i32,
    pub y: i32,
}

impl Dot {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Graphic for Dot {
    fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    fn draw(&self) -> Vec<String> {
        vec![format!("Drawing a dot at ({}, {})", self.x, self.y)]
    }

    fn bounds(&self) -> Option<Bounds> {
        Some(Bounds {
            min_x: self.x,
            min_y: self.y,
            max_x: self.x,
            max_y: self.y,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicCircle {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
}

impl GraphicCircle {
    pub fn new(x: i32, y: i32, radius: i32) -> Self {
        Self { x, y, radius }
    }
}

impl Graphic for GraphicCircle {
    fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    fn draw(&self) -> Vec<String> {
        vec![format!(
            "Drawing a circle at ({}, {}) with radius {}",
            self.x, self.y, self.radius
        )]
    }

    fn bounds(&self) -> Option<Bounds> {
        Some(Bounds {
            min_x: self.x - self.radius,
            min_y: self.y - self.radius,
            max_x: self.x + self.radius,
            max_y: self.y + self.radius,
        })
    }
}

#[derive(Default)]
pub struct CompoundGraphic {
    children: Vec<Box<dyn Graphic>>,
}

impl CompoundGraphic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, child: Box<dyn Graphic>) {
        self.children.push(child);
    }

    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Graphic>> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Graphic for CompoundGraphic {
    fn move_by(&mut self, dx: i32, dy: i32) {
        for child in &mut self.children {
            child.move_by(dx, dy);
        }
    }

    fn draw(&self) -> Vec<String> {
        let mut lines = vec!["Drawing a compound graphic:".to_string()];
        for child in &self.children {
            lines.extend(child.draw().into_iter().map(|l| format!("  {}", l)));
        }
        if let Some(b) = self.bounds() {
            lines.push(format!(
                "Drawing a dashed rectangle from ({}, {}) to ({}, {})",
                b.min_x, b.min_y, b.max_x, b.max_y
            ));
        }
        lines
    }

    /// Union of the children's bounds. Empty children are skipped.
    fn bounds(&self) -> Option<Bounds> {
        self.children
            .iter()
            .filter_map(|c| c.bounds())
            .reduce(Bounds::union)
    }
}

#[derive(Default)]
pub struct ImageEditor {
    all: CompoundGraphic,
}

impl ImageEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self) {
        self.all.add(Box::new(Dot::new(1, 2)));
        self.all.add(Box::new(GraphicCircle::new(5, 3, 10)));
    }

    pub fn root(&self) -> &CompoundGraphic {
        &self.all
    }

    /// Moves the children at `indices` into a new group appended to the
    /// root, then returns the redrawn picture.
    pub fn group_selected(&mut self, indices: &[usize]) -> Vec<String> {
        let mut group = CompoundGraphic::new();
        let mut kept = Vec::new();
        for (i, child) in std::mem::take(&mut self.all.children).into_iter().enumerate() {
            if indices.contains(&i) {
                group.add(child);
            } else {
                kept.push(child);
            }
        }
        self.all.children = kept;
        if !group.is_empty() {
            self.all.add(Box::new(group));
        }
        self.all.draw()
    }
}

pub fn real_world_demo() -> Transcript {
    let mut editor = ImageEditor::new();
    editor.load();
    editor.all.add(Box::new(Dot::new(3, 4)));
    editor.all.add(Box::new(Dot::new(6, 7)));

    let mut out = Transcript::new();
    out.line("Grouping the two new dots:");
    out.lines(editor.group_selected(&[2, 3]));
    out
}
