// Builder
//
// Intent: construct complex objects step by step, so the same construction
// code can produce different representations.

use std::collections::HashMap;
use std::fmt;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Product {
    parts: Vec<String>,
}

impl Product {
    pub fn add(&mut self, part: impl Into<String>) {
        self.parts.push(part.into());
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn list_parts(&self) -> String {
        format!("Product parts: {}", self.parts.join(", "))
    }
}

pub trait Builder {
    fn reset(&mut self);
    fn produce_part_a(&mut self);
    fn produce_part_b(&mut self);
    fn produce_part_c(&mut self);
}

#[derive(Default)]
pub struct ConcreteBuilder {
    product: Product,
}

impl ConcreteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands over the finished product and leaves the builder ready for the
    /// next one.
    pub fn product(&mut self) -> Product {
        std::mem::take(&mut self.product)
    }
}

impl Builder for ConcreteBuilder {
    fn reset(&mut self) {
        self.product = Product::default();
    }

    fn produce_part_a(&mut self) {
        self.product.add("PartA1");
    }

    fn produce_part_b(&mut self) {
        self.product.add("PartB1");
    }

    fn produce_part_c(&mut self) {
        self.product.add("PartC1");
    }
}

/// Knows the order of steps for popular configurations. Optional: clients
/// can drive a builder directly.
pub struct Director;

impl Director {
    pub fn build_minimal_viable_product(&self, builder: &mut dyn Builder) {
        builder.produce_part_a();
    }

    pub fn build_full_featured_product(&self, builder: &mut dyn Builder) {
        builder.produce_part_a();
        builder.produce_part_b();
        builder.produce_part_c();
    }
}

pub fn conceptual_demo() -> Transcript {
    let director = Director;
    let mut builder = ConcreteBuilder::new();
    let mut out = Transcript::new();

    out.line("Standard basic product:");
    director.build_minimal_viable_product(&mut builder);
    out.line(builder.product().list_parts());

    out.line("Standard full featured product:");
    director.build_full_featured_product(&mut builder);
    out.line(builder.product().list_parts());

    out.line("Custom product:");
    builder.produce_part_a();
    builder.produce_part_c();
    out.line(builder.product().list_parts());
    out
}

// ============================================================================
// Real-world example: vehicle shop
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    kind: String,
    parts: HashMap<String, String>,
}

impl Vehicle {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parts: HashMap::new(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn part(&self, key: &str) -> Option<&str> {
        self.parts.get(key).map(String::as_str)
    }

    pub fn set_part(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parts.insert(key.into(), value.into());
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |key: &str| self.part(key).unwrap_or("-");
        writeln!(f, "--------------------------")?;
        writeln!(f, "Vehicle Type: {}", self.kind)?;
        writeln!(f, "Frame: {}", part("frame"))?;
        writeln!(f, "Engine: {}", part("engine"))?;
        writeln!(f, "#Wheels: {}", part("wheels"))?;
        write!(f, "#Doors: {}", part("doors"))
    }
}

pub trait VehicleBuilder {
    fn kind(&self) -> &'static str;
    fn vehicle_mut(&mut self) -> &mut Vehicle;

    fn build_frame(&mut self);
    fn build_engine(&mut self);
    fn build_wheels(&mut self);
    fn build_doors(&mut self);

    fn reset(&mut self) {
        let fresh = Vehicle::new(self.kind());
        *self.vehicle_mut() = fresh;
    }

    /// Returns the vehicle built so far and resets the builder.
    fn vehicle(&mut self) -> Vehicle {
        let fresh = Vehicle::new(self.kind());
        std::mem::replace(self.vehicle_mut(), fresh)
    }
}

macro_rules! vehicle_builder {
    ($name:ident, $kind:literal, frame: $frame:literal, engine: $engine:literal, wheels: $wheels:literal, doors: $doors:literal) => {
        pub struct $name {
            vehicle: Vehicle,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    vehicle: Vehicle::new($kind),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl VehicleBuilder for $name {
            fn kind(&self) -> &'static str {
                $kind
            }

            fn vehicle_mut(&mut self) -> &mut Vehicle {
                &mut self.vehicle
            }

            fn build_frame(&mut self) {
                self.vehicle.set_part("frame", $frame);
            }

            fn build_engine(&mut self) {
                self.vehicle.set_part("engine", $engine);
            }

            fn build_wheels(&mut self) {
                self.vehicle.set_part("wheels", $wheels);
            }

            fn build_doors(&mut self) {
                self.vehicle.set_part("doors", $doors);
            }
        }
    };
}

vehicle_builder!(CarBuilder, "Car", frame: "Car Frame", engine: "2500 cc", wheels: "4", doors: "4");
vehicle_builder!(MotorCycleBuilder, "MotorCycle", frame: "MotorCycle Frame", engine: "500 cc", wheels: "2", doors: "0");
vehicle_builder!(ScooterBuilder, "Scooter", frame: "Scooter Frame", engine: "50 cc", wheels: "2", doors: "0");

/// The director: runs the full assembly sequence on any builder.
pub struct Shop;

impl Shop {
    pub fn construct(&self, builder: &mut dyn VehicleBuilder) {
        builder.reset();
        builder.build_frame();
        builder.build_engine();
        builder.build_wheels();
        builder.build_doors();
    }
}

pub fn real_world_demo() -> Transcript {
    let shop = Shop;
    let mut builders: Vec<Box<dyn VehicleBuilder>> = vec![
        Box::new(ScooterBuilder::new()),
        Box::new(CarBuilder::new()),
        Box::new(MotorCycleBuilder::new()),
    ];

    let mut out = Transcript::new();
    for builder in builders.iter_mut() {
        shop.construct(builder.as_mut());
        let vehicle = builder.vehicle();
        out.lines(vehicle.to_string().lines().map(str::to_string));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_director_recipes() {
        let director = Director;
        let mut builder = ConcreteBuilder::new();

        director.build_minimal_viable_product(&mut builder);
        assert_eq!(builder.product().list_parts(), "Product parts: PartA1");

        director.build_full_featured_product(&mut builder);
        assert_eq!(
            builder.product().list_parts(),
            "Product parts: PartA1, PartB1, PartC1"
        );
    }

    #[test]
    fn test_product_resets_builder() {
        let mut builder = ConcreteBuilder::new();
        builder.produce_part_b();
        let first = builder.product();
        let second = builder.product();

        assert_eq!(first.parts(), &["PartB1"]);
        assert!(second.parts().is_empty());
    }

    #[test]
    fn test_shop_builds_car() {
        let mut builder = CarBuilder::new();
        Shop.construct(&mut builder);
        let car = builder.vehicle();

        assert_eq!(car.kind(), "Car");
        assert_eq!(car.part("engine"), Some("2500 cc"));
        assert_eq!(car.part("doors"), Some("4"));
    }

    #[test]
    fn test_vehicle_resets_after_take() {
        let mut builder = ScooterBuilder::new();
        Shop.construct(&mut builder);
        let _scooter = builder.vehicle();
        let empty = builder.vehicle();

        assert_eq!(empty.kind(), "Scooter");
        assert_eq!(empty.part("frame"), None);
    }

    #[test]
    fn test_missing_part_is_none_and_displays_dash() {
        let mut builder = MotorCycleBuilder::new();
        builder.build_frame();
        let bike = builder.vehicle();

        assert_eq!(bike.part("engine"), None);
        let card = bike.to_string();
        assert!(card.contains("Frame: MotorCycle Frame"));
        assert!(card.contains("Engine: -"));
    }

    #[test]
    fn test_real_world_demo_builds_three_vehicles() {
        let out = real_world_demo();
        assert!(out.contains("Vehicle Type: Scooter"));
        assert!(out.contains("Vehicle Type: Car"));
        assert!(out.contains("Vehicle Type: MotorCycle"));
    }
}
