// Strategy
//
// Intent: define a family of algorithms, put each in its own type and make
// them interchangeable at runtime.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::config::StrategyConfig;
use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

pub trait Strategy {
    fn do_algorithm(&self, data: &[&str]) -> Vec<String>;
}

pub struct ConcreteStrategyA;

impl Strategy for ConcreteStrategyA {
    fn do_algorithm(&self, data: &[&str]) -> Vec<String> {
        let mut sorted: Vec<String> = data.iter().map(|s| s.to_string()).collect();
        sorted.sort();
        sorted
    }
}

pub struct ConcreteStrategyB;

impl Strategy for ConcreteStrategyB {
    fn do_algorithm(&self, data: &[&str]) -> Vec<String> {
        let mut sorted: Vec<String> = data.iter().map(|s| s.to_string()).collect();
        sorted.sort_by(|a, b| b.cmp(a));
        sorted
    }
}

pub struct Context {
    strategy: Box<dyn Strategy>,
}

impl Context {
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Self { strategy }
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn Strategy>) {
        self.strategy = strategy;
    }

    pub fn do_some_business_logic(&self) -> Vec<String> {
        let result = self.strategy.do_algorithm(&["a", "b", "c", "d", "e"]);
        vec![
            "Context: Sorting data using the strategy (not sure how it'll do it)".to_string(),
            result.join(","),
        ]
    }
}

pub fn conceptual_demo() -> Transcript {
    let mut context = Context::new(Box::new(ConcreteStrategyA));
    let mut out = Transcript::new();

    out.line("Client: Strategy is set to normal sorting.");
    out.lines(context.do_some_business_logic());
    out.blank();

    out.line("Client: Strategy is set to reverse sorting.");
    context.set_strategy(Box::new(ConcreteStrategyB));
    out.lines(context.do_some_business_logic());
    out
}

// ============================================================================
// Real-world example: calculator
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("no strategy set")]
    NoStrategy,

    #[error("{op} of {a} and {b} overflows")]
    Overflow { op: &'static str, a: i64, b: i64 },

    #[error("unknown action '{0}': expected addition, subtraction or multiplication")]
    UnknownAction(String),
}

pub trait CalcStrategy {
    fn execute(&self, a: i64, b: i64) -> Result<i64, CalculatorError>;
}

/// Any closure with the right shape is a strategy.
impl<F> CalcStrategy for F
where
    F: Fn(i64, i64) -> Result<i64, CalculatorError>,
{
    fn execute(&self, a: i64, b: i64) -> Result<i64, CalculatorError> {
        self(a, b)
    }
}

pub struct Add;
pub struct Subtract;
pub struct Multiply;

impl CalcStrategy for Add {
    fn execute(&self, a: i64, b: i64) -> Result<i64, CalculatorError> {
        a.checked_add(b)
            .ok_or(CalculatorError::Overflow { op: "addition", a, b })
    }
}

impl CalcStrategy for Subtract {
    fn execute(&self, a: i64, b: i64) -> Result<i64, CalculatorError> {
        a.checked_sub(b)
            .ok_or(CalculatorError::Overflow { op: "subtraction", a, b })
    }
}

impl CalcStrategy for Multiply {
    fn execute(&self, a: i64, b: i64) -> Result<i64, CalculatorError> {
        a.checked_mul(b)
            .ok_or(CalculatorError::Overflow { op: "multiplication", a, b })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Addition,
    Subtraction,
    Multiplication,
}

impl Action {
    pub fn strategy(self) -> Box<dyn CalcStrategy> {
        match self {
            Action::Addition => Box::new(Add),
            Action::Subtraction => Box::new(Subtract),
            Action::Multiplication => Box::new(Multiply),
        }
    }
}

impl FromStr for Action {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "addition" => Ok(Action::Addition),
            "subtraction" => Ok(Action::Subtraction),
            "multiplication" => Ok(Action::Multiplication),
            _ => Err(CalculatorError::UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Addition => write!(f, "addition"),
            Action::Subtraction => write!(f, "subtraction"),
            Action::Multiplication => write!(f, "multiplication"),
        }
    }
}

#[derive(Default)]
pub struct Calculator {
    strategy: Option<Box<dyn CalcStrategy>>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn CalcStrategy>) {
        self.strategy = Some(strategy);
    }

    pub fn execute(&self, a: i64, b: i64) -> Result<i64, CalculatorError> {
        let strategy = self.strategy.as_ref().ok_or(CalculatorError::NoStrategy)?;
        strategy.execute(a, b)
    }
}

/// Picks the strategy named by `action` and runs it.
pub fn calculate(a: i64, b: i64, action: &str) -> Result<i64, CalculatorError> {
    let action: Action = action.parse()?;
    debug!(a, b, %action, "calculating");
    let mut calculator = Calculator::new();
    calculator.set_strategy(action.strategy());
    calculator.execute(a, b)
}

pub fn real_world_demo(config: &StrategyConfig) -> Result<Transcript, CalculatorError> {
    let mut out = Transcript::new();
    out.line(format!(
        "First number: {}, second number: {}, action: {}",
        config.a, config.b, config.action
    ));
    out.line(format!(
        "Result: {}",
        calculate(config.a, config.b, &config.action)?
    ));

    let mut calculator = Calculator::new();
    calculator.set_strategy(Box::new(|a: i64, b: i64| {
        a.checked_rem(b).ok_or(CalculatorError::Overflow {
            op: "remainder",
            a,
            b,
        })
    }));
    out.line(format!(
        "Closure strategy (remainder): {}",
        calculator.execute(config.a, config.b.max(1))?
    ));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sorting_strategies() {
        let mut context = Context::new(Box::new(ConcreteStrategyA));
        assert_eq!(context.do_some_business_logic()[1], "a,b,c,d,e");
        context.set_strategy(Box::new(ConcreteStrategyB));
        assert_eq!(context.do_some_business_logic()[1], "e,d,c,b,a");
    }

    #[test]
    fn test_actions_parse() {
        assert_eq!("addition".parse::<Action>().unwrap(), Action::Addition);
        assert_eq!(" Multiplication ".parse::<Action>().unwrap(), Action::Multiplication);
        assert_eq!(
            "division".parse::<Action>().unwrap_err(),
            CalculatorError::UnknownAction("division".to_string())
        );
    }

    #[test]
    fn test_calculate() {
        assert_eq!(calculate(6, 7, "multiplication").unwrap(), 42);
        assert_eq!(calculate(6, 7, "subtraction").unwrap(), -1);
        assert_eq!(calculate(6, 7, "addition").unwrap(), 13);
    }

    #[test]
    fn test_no_strategy() {
        assert_eq!(Calculator::new().execute(1, 2), Err(CalculatorError::NoStrategy));
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(matches!(
            calculate(i64::MAX, 2, "multiplication"),
            Err(CalculatorError::Overflow { op: "multiplication", .. })
        ));
    }

    #[test]
    fn test_closure_strategy() {
        let mut calculator = Calculator::new();
        calculator.set_strategy(Box::new(|a: i64, b: i64| -> Result<i64, CalculatorError> {
            Ok(a.max(b))
        }));
        assert_eq!(calculator.execute(3, 9).unwrap(), 9);
    }

    proptest! {
        #[test]
        fn prop_strategies_match_checked_arithmetic(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(Add.execute(a, b).ok(), a.checked_add(b));
            prop_assert_eq!(Subtract.execute(a, b).ok(), a.checked_sub(b));
            prop_assert_eq!(Multiply.execute(a, b).ok(), a.checked_mul(b));
        }

        #[test]
        fn prop_addition_commutes(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
            prop_assert_eq!(calculate(a, b, "addition")?, calculate(b, a, "addition")?);
        }
    }
}
