// Decorator
//
// Intent: attach new behaviour to an object by placing it inside a wrapper
// that implements the same interface.

use thiserror::Error;
use tracing::debug;

use crate::config::DecoratorConfig;
use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

pub trait Component {
    fn operation(&self) -> String;
}

pub struct ConcreteComponent;

impl Component for ConcreteComponent {
    fn operation(&self) -> String {
        "ConcreteComponent".to_string()
    }
}

pub struct ConcreteDecoratorA {
    wrapped: Box<dyn Component>,
}

impl ConcreteDecoratorA {
    pub fn new(wrapped: Box<dyn Component>) -> Self {
        Self { wrapped }
    }
}

impl Component for ConcreteDecoratorA {
    fn operation(&self) -> String {
        format!("ConcreteDecoratorA({})", self.wrapped.operation())
    }
}

pub struct ConcreteDecoratorB {
    wrapped: Box<dyn Component>,
}

impl ConcreteDecoratorB {
    pub fn new(wrapped: Box<dyn Component>) -> Self {
        Self { wrapped }
    }
}

impl Component for ConcreteDecoratorB {
    fn operation(&self) -> String {
        format!("ConcreteDecoratorB({})", self.wrapped.operation())
    }
}

pub fn client_code(component: &dyn Component) -> String {
    format!("RESULT: {}", component.operation())
}

pub fn conceptual_demo() -> Transcript {
    let mut out = Transcript::new();
    out.line("Client: I get a simple component:");
    out.line(client_code(&ConcreteComponent));
    out.blank();

    let decorated = ConcreteDecoratorB::new(Box::new(ConcreteDecoratorA::new(Box::new(
        ConcreteComponent,
    ))));
    out.line("Client: Now I've got a decorated component:");
    out.line(client_code(&decorated));
    out
}

// ============================================================================
// Real-world example: encrypted, compressed data sources
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    #[error("nothing has been written to {0}")]
    Empty(String),

    #[error("data is not {expected}: {data}")]
    Corrupted { expected: &'static str, data: String },
}

pub trait DataSource {
    fn write_data(&mut self, data: &str);
    fn read_data(&self) -> Result<String, DataSourceError>;

    /// The bytes as they sit in the underlying file, after every encoding.
    fn stored_data(&self) -> Option<&str>;

    fn describe(&self) -> String;
}

/// Keeps the "file" contents in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDataSource {
    filename: String,
    content: Option<String>,
}

impl FileDataSource {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: None,
        }
    }
}

impl DataSource for FileDataSource {
    fn write_data(&mut self, data: &str) {
        debug!(file = %self.filename, data, "writing data");
        self.content = Some(data.to_string());
    }

    fn read_data(&self) -> Result<String, DataSourceError> {
        debug!(file = %self.filename, "reading data");
        self.content
            .clone()
            .ok_or_else(|| DataSourceError::Empty(self.filename.clone()))
    }

    fn stored_data(&self) -> Option<&str> {
        self.content.as_deref()
    }

    fn describe(&self) -> String {
        format!("File({})", self.filename)
    }
}

fn wrap(tag: &str, data: &str) -> String {
    format!("{}({})", tag, data)
}

/// Strips exactly one `tag(...)` layer.
fn unwrap_layer(tag: &'static str, data: &str) -> Result<String, DataSourceError> {
    data.strip_prefix(tag)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .map(str::to_string)
        .ok_or_else(|| DataSourceError::Corrupted {
            expected: tag,
            data: data.to_string(),
        })
}

pub struct EncryptionDecorator {
    wrappee: Box<dyn DataSource>,
}

impl EncryptionDecorator {
    pub fn new(wrappee: Box<dyn DataSource>) -> Self {
        Self { wrappee }
    }
}

impl DataSource for EncryptionDecorator {
    fn write_data(&mut self, data: &str) {
        debug!("encrypting data");
        self.wrappee.write_data(&wrap("Encrypted", data));
    }

    fn read_data(&self) -> Result<String, DataSourceError> {
        let data = self.wrappee.read_data()?;
        debug!("decrypting data");
        unwrap_layer("Encrypted", &data)
    }

    fn stored_data(&self) -> Option<&str> {
        self.wrappee.stored_data()
    }

    fn describe(&self) -> String {
        format!("Encryption({})", self.wrappee.describe())
    }
}

pub struct CompressionDecorator {
    wrappee: Box<dyn DataSource>,
}

impl CompressionDecorator {
    pub fn new(wrappee: Box<dyn DataSource>) -> Self {
        Self { wrappee }
    }
}

impl DataSource for CompressionDecorator {
    fn write_data(&mut self, data: &str) {
        debug!("compressing data");
        self.wrappee.write_data(&wrap("Compressed", data));
    }

    fn read_data(&self) -> Result<String, DataSourceError> {
        let data = self.wrappee.read_data()?;
        debug!("decompressing data");
        unwrap_layer("Compressed", &data)
    }

    fn stored_data(&self) -> Option<&str> {
        self.wrappee.stored_data()
    }

    fn describe(&self) -> String {
        format!("Compression({})", self.wrappee.describe())
    }
}

pub struct SalaryManager {
    source: Box<dyn DataSource>,
}

impl SalaryManager {
    pub fn new(source: Box<dyn DataSource>) -> Self {
        Self { source }
    }

    pub fn load(&self) -> Result<String, DataSourceError> {
        self.source.read_data()
    }

    pub fn save(&mut self, salary_records: &str) {
        self.source.write_data(salary_records);
    }

    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }
}

pub struct ApplicationConfigurator;

impl ApplicationConfigurator {
    /// Encryption wraps the file first, compression goes on the outside.
    pub fn configure(config: &DecoratorConfig) -> Box<dyn DataSource> {
        let mut source: Box<dyn DataSource> = Box::new(FileDataSource::new(config.file.as_str()));
        if config.encryption {
            source = Box::new(EncryptionDecorator::new(source));
        }
        if config.compression {
            source = Box::new(CompressionDecorator::new(source));
        }
        source
    }
}

pub fn real_world_demo(config: &DecoratorConfig) -> Result<Transcript, DataSourceError> {
    let mut out = Transcript::new();

    out.line("Stacking decorators one by one:");
    let mut source: Box<dyn DataSource> = Box::new(FileDataSource::new("somefile.dat"));
    source.write_data("Salary records");
    out.line(format!("{} stores: {}", source.describe(), source.stored_data().unwrap_or("")));
    source = Box::new(CompressionDecorator::new(source));
    source.write_data("Salary records");
    out.line(format!("{} stores: {}", source.describe(), source.stored_data().unwrap_or("")));
    source = Box::new(EncryptionDecorator::new(source));
    source.write_data("Salary records");
    out.line(format!("{} stores: {}", source.describe(), source.stored_data().unwrap_or("")));

    out.section("Configured data source:");
    let mut manager = SalaryManager::new(ApplicationConfigurator::configure(config));
    manager.save("Salary records");
    out.line(format!(
        "{} stores: {}",
        manager.source().describe(),
        manager.source().stored_data().unwrap_or("")
    ));
    out.line(format!("Loaded salary data: {}", manager.load()?));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(encryption: bool, compression: bool) -> DecoratorConfig {
        DecoratorConfig {
            file: "salary.dat".to_string(),
            encryption,
            compression,
        }
    }

    #[test]
    fn test_conceptual_nesting() {
        let decorated = ConcreteDecoratorB::new(Box::new(ConcreteDecoratorA::new(Box::new(
            ConcreteComponent,
        ))));
        assert_eq!(
            client_code(&decorated),
            "RESULT: ConcreteDecoratorB(ConcreteDecoratorA(ConcreteComponent))"
        );
    }

    #[test]
    fn test_every_stack_reads_back_what_it_wrote() {
        for (encryption, compression) in [(false, false), (true, false), (false, true), (true, true)] {
            let mut manager = SalaryManager::new(ApplicationConfigurator::configure(&config(
                encryption,
                compression,
            )));
            // Parentheses in the payload must survive the wrappers.
            manager.save("Salary (gross) records");
            assert_eq!(manager.load().unwrap(), "Salary (gross) records");
        }
    }

    #[test]
    fn test_stored_form_matches_stack_order() {
        let mut source = ApplicationConfigurator::configure(&config(true, true));
        source.write_data("x");
        assert_eq!(source.stored_data(), Some("Encrypted(Compressed(x))"));
        assert_eq!(source.describe(), "Compression(Encryption(File(salary.dat)))");
    }

    #[test]
    fn test_missing_wrapper_is_corrupted() {
        let mut raw = FileDataSource::new("plain.dat");
        raw.write_data("not encrypted");
        let source = EncryptionDecorator::new(Box::new(raw));

        assert_eq!(
            source.read_data().unwrap_err(),
            DataSourceError::Corrupted {
                expected: "Encrypted",
                data: "not encrypted".to_string()
            }
        );
    }

    #[test]
    fn test_reading_unwritten_file_fails() {
        let source = CompressionDecorator::new(Box::new(FileDataSource::new("new.dat")));
        assert_eq!(
            source.read_data().unwrap_err(),
            DataSourceError::Empty("new.dat".to_string())
        );
    }

    #[test]
    fn test_real_world_demo_loads_salary() {
        let out = real_world_demo(&DecoratorConfig::default()).unwrap();
        assert!(out.contains("Loaded salary data: Salary records"));
    }
}
