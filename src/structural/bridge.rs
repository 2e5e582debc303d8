// Bridge
//
// Intent: split a type into two independent hierarchies, abstraction and
// implementation, joined by composition instead of inheritance.
//
//               A
//            /     \                        A         N
//          Aa      Ab        ===>        /     \     / \
//         / \     /  \                 Aa(N) Ab(N)  1   2
//       Aa1 Aa2  Ab1 Ab2

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

pub trait Implementation {
    fn operation_implementation(&self) -> String;
}

pub struct ConcreteImplementationA;
pub struct ConcreteImplementationB;

impl Implementation for ConcreteImplementationA {
    fn operation_implementation(&self) -> String {
        "ConcreteImplementationA: The result in platform A.".to_string()
    }
}

impl Implementation for ConcreteImplementationB {
    fn operation_implementation(&self) -> String {
        "ConcreteImplementationB: The result in platform B.".to_string()
    }
}

/// What the client sees. Both abstractions delegate the real work.
pub trait Operation {
    fn operation(&self) -> String;
}

pub struct Abstraction {
    implementation: Box<dyn Implementation>,
}

impl Abstraction {
    pub fn new(implementation: Box<dyn Implementation>) -> Self {
        Self { implementation }
    }
}

impl Operation for Abstraction {
    fn operation(&self) -> String {
        format!(
            "Abstraction: Base operation with:\n{}",
            self.implementation.operation_implementation()
        )
    }
}

pub struct ExtendedAbstraction {
    implementation: Box<dyn Implementation>,
}

impl ExtendedAbstraction {
    pub fn new(implementation: Box<dyn Implementation>) -> Self {
        Self { implementation }
    }
}

impl Operation for ExtendedAbstraction {
    fn operation(&self) -> String {
        format!(
            "ExtendedAbstraction: Extended operation with:\n{}",
            self.implementation.operation_implementation()
        )
    }
}

pub fn client_code(abstraction: &dyn Operation) -> String {
    abstraction.operation()
}

pub fn conceptual_demo() -> Transcript {
    let mut out = Transcript::new();
    let basic = Abstraction::new(Box::new(ConcreteImplementationA));
    out.lines(client_code(&basic).lines().map(str::to_string));
    out.blank();
    let extended = ExtendedAbstraction::new(Box::new(ConcreteImplementationB));
    out.lines(client_code(&extended).lines().map(str::to_string));
    out
}

// ============================================================================
// Real-world example: remotes and devices
// ============================================================================

pub trait Device {
    fn name(&self) -> &'static str;
    fn is_enabled(&self) -> bool;
    fn enable(&mut self);
    fn disable(&mut self);
    fn volume(&self) -> u8;
    /// Clamped to 0..=100.
    fn set_volume(&mut self, percent: i32);
    fn channel(&self) -> u32;
    /// Channels start at 1.
    fn set_channel(&mut self, channel: u32);

    fn status(&self) -> String {
        format!(
            "{}: {}, volume {}%, channel {}",
            self.name(),
            if self.is_enabled() { "on" } else { "off" },
            self.volume(),
            self.channel()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DeviceState {
    on: bool,
    volume: u8,
    channel: u32,
}

impl DeviceState {
    fn new() -> Self {
        Self {
            on: false,
            volume: 30,
            channel: 1,
        }
    }

    fn set_volume(&mut self, percent: i32) {
        self.volume = percent.clamp(0, 100) as u8;
    }

    fn set_channel(&mut self, channel: u32) {
        self.channel = channel.max(1);
    }
}

macro_rules! device {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            state: DeviceState,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    state: DeviceState::new(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Device for $name {
            fn name(&self) -> &'static str {
                $label
            }

            fn is_enabled(&self) -> bool {
                self.state.on
            }

            fn enable(&mut self) {
                self.state.on = true;
            }

            fn disable(&mut self) {
                self.state.on = false;
            }

            fn volume(&self) -> u8 {
                self.state.volume
            }

            fn set_volume(&mut self, percent: i32) {
                self.state.set_volume(percent);
            }

            fn channel(&self) -> u32 {
                self.state.channel
            }

            fn set_channel(&mut self, channel: u32) {
                self.state.set_channel(channel);
            }
        }
    };
}

device!(Tv, "TV");
device!(Radio, "Radio");

/// The abstraction side. Every control is written once against `Device`.
pub trait Remote {
    fn device(&self) -> &dyn Device;
    fn device_mut(&mut self) -> &mut dyn Device;

    fn toggle_power(&mut self) {
        let device = self.device_mut();
        if device.is_enabled() {
            device.disable();
        } else {
            device.enable();
        }
    }

    fn volume_down(&mut self) {
        let device = self.device_mut();
        let volume = i32::from(device.volume());
        device.set_volume(volume - 10);
    }

    fn volume_up(&mut self) {
        let device = self.device_mut();
        let volume = i32::from(device.volume());
        device.set_volume(volume + 10);
    }

    fn channel_down(&mut self) {
        let device = self.device_mut();
        let channel = device.channel().saturating_sub(1);
        device.set_channel(channel);
    }

    fn channel_up(&mut self) {
        let device = self.device_mut();
        let channel = device.channel().saturating_add(1);
        device.set_channel(channel);
    }
}

pub struct BasicRemote {
    device: Box<dyn Device>,
}

impl BasicRemote {
    pub fn new(device: Box<dyn Device>) -> Self {
        Self { device }
    }
}

impl Remote for BasicRemote {
    fn device(&self) -> &dyn Device {
        self.device.as_ref()
    }

    fn device_mut(&mut self) -> &mut dyn Device {
        self.device.as_mut()
    }
}

pub struct AdvancedRemote {
    device: Box<dyn Device>,
}

impl AdvancedRemote {
    pub fn new(device: Box<dyn Device>) -> Self {
        Self { device }
    }

    pub fn mute(&mut self) {
        self.device.set_volume(0);
    }
}

impl Remote for AdvancedRemote {
    fn device(&self) -> &dyn Device {
        self.device.as_ref()
    }

    fn device_mut(&mut self) -> &mut dyn Device {
        self.device.as_mut()
    }
}

// ============================================================================
// Real-world example: shapes, colours and rendering platforms
// ============================================================================

pub trait Color {
    fn fill(&self) -> &'static str;
}

pub struct Red;
pub struct Blue;

impl Color for Red {
    fn fill(&self) -> &'static str {
        "Red"
    }
}

impl Color for Blue {
    fn fill(&self) -> &'static str {
        "Blue"
    }
}

pub trait BridgeShape {
    fn draw(&self) -> String;
}

pub struct BridgeCircle {
    color: Box<dyn Color>,
}

impl BridgeCircle {
    pub fn new(color: Box<dyn Color>) -> Self {
        Self { color }
    }
}

impl BridgeShape for BridgeCircle {
    fn draw(&self) -> String {
        format!("Drawing Circle in {} color.", self.color.fill())
    }
}

pub struct BridgeSquare {
    color: Box<dyn Color>,
}

impl BridgeSquare {
    pub fn new(color: Box<dyn Color>) -> Self {
        Self { color }
    }
}

impl BridgeShape for BridgeSquare {
    fn draw(&self) -> String {
        format!("Drawing Square in {} color.", self.color.fill())
    }
}

pub trait RenderingPlatform {
    fn render_shape(&self, shape: &dyn BridgeShape) -> String;
}

pub struct OpenGl;
pub struct DirectX;

impl RenderingPlatform for OpenGl {
    fn render_shape(&self, shape: &dyn BridgeShape) -> String {
        format!("Rendering using OpenGL: {}", shape.draw())
    }
}

impl RenderingPlatform for DirectX {
    fn render_shape(&self, shape: &dyn BridgeShape) -> String {
        format!("Rendering using DirectX: {}", shape.draw())
    }
}

pub fn real_world_demo() -> Transcript {
    let mut out = Transcript::new();

    out.line("Remote controls:");
    let mut remote = BasicRemote::new(Box::new(Tv::new()));
    remote.toggle_power();
    remote.volume_up();
    remote.channel_up();
    out.line(remote.device().status());

    let mut advanced = AdvancedRemote::new(Box::new(Radio::new()));
    advanced.toggle_power();
    advanced.volume_up();
    advanced.mute();
    out.line(advanced.device().status());

    out.section("Shapes on rendering platforms:");
    let circle = BridgeCircle::new(Box::new(Red));
    out.line(OpenGl.render_shape(&circle));
    let square = BridgeSquare::new(Box::new(Blue));
    out.line(DirectX.render_shape(&square));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abstractions_delegate_to_implementation() {
        let basic = Abstraction::new(Box::new(ConcreteImplementationA));
        assert_eq!(
            client_code(&basic),
            "Abstraction: Base operation with:\nConcreteImplementationA: The result in platform A."
        );

        let extended = ExtendedAbstraction::new(Box::new(ConcreteImplementationA));
        assert!(client_code(&extended).starts_with("ExtendedAbstraction"));
        assert!(client_code(&extended).ends_with("platform A."));
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut remote = BasicRemote::new(Box::new(Tv::new()));
        for _ in 0..20 {
            remote.volume_up();
        }
        assert_eq!(remote.device().volume(), 100);

        for _ in 0..20 {
            remote.volume_down();
        }
        assert_eq!(remote.device().volume(), 0);
    }

    #[test]
    fn test_channel_never_drops_below_one() {
        let mut remote = BasicRemote::new(Box::new(Radio::new()));
        remote.channel_down();
        assert_eq!(remote.device().channel(), 1);

        remote.channel_up();
        remote.channel_up();
        assert_eq!(remote.device().channel(), 3);
    }

    #[test]
    fn test_toggle_power_and_mute() {
        let mut remote = AdvancedRemote::new(Box::new(Radio::new()));
        assert!(!remote.device().is_enabled());
        remote.toggle_power();
        assert!(remote.device().is_enabled());

        remote.mute();
        assert_eq!(remote.device().volume(), 0);

        remote.toggle_power();
        assert!(!remote.device().is_enabled());
    }

    #[test]
    fn test_platform_and_color_vary_independently() {
        let circle = BridgeCircle::new(Box::new(Blue));
        assert_eq!(
            DirectX.render_shape(&circle),
            "Rendering using DirectX: Drawing Circle in Blue color."
        );
        assert_eq!(
            OpenGl.render_shape(&circle),
            "Rendering using OpenGL: Drawing Circle in Blue color."
        );
    }
}
