//! Crate-wide error type.
//!
//! Each pattern keeps its own error enum next to the code that raises it;
//! `PatternError` folds them together for the catalogue and the CLI.

use thiserror::Error;

use crate::behavioral::chain_of_responsibility::MiddlewareError;
use crate::behavioral::mediator::AuthError;
use crate::behavioral::observer::EditorError;
use crate::behavioral::strategy::CalculatorError;
use crate::config::ConfigError;
use crate::creational::abstract_factory::GuiError;
use crate::structural::adapter::AdapterError;
use crate::structural::decorator::DataSourceError;
use crate::structural::facade::ConvertError;
use crate::structural::proxy::VideoError;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("unknown pattern '{0}' (try `patterns list`)")]
    UnknownPattern(String),

    #[error("unknown example kind '{0}': expected conceptual, real-world or both")]
    UnknownExample(String),

    #[error(transparent)]
    Gui(#[from] GuiError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Video(#[from] VideoError),

    #[error(transparent)]
    Middleware(#[from] MiddlewareError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Calculator(#[from] CalculatorError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PatternError>;
