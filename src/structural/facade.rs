// Facade
//
// Intent: a simple interface in front of a complex subsystem.

use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

#[derive(Debug, Default)]
pub struct Subsystem1;

impl Subsystem1 {
    pub fn operation1(&self) -> String {
        "Subsystem1: Ready!".to_string()
    }

    pub fn operation_n(&self) -> String {
        "Subsystem1: Go!".to_string()
    }
}

#[derive(Debug, Default)]
pub struct Subsystem2;

impl Subsystem2 {
    pub fn operation1(&self) -> String {
        "Subsystem2: Get ready!".to_string()
    }

    pub fn operation_z(&self) -> String {
        "Subsystem2: Fire!".to_string()
    }
}

#[derive(Debug, Default)]
pub struct Facade {
    subsystem1: Subsystem1,
    subsystem2: Subsystem2,
}

impl Facade {
    pub fn new(subsystem1: Subsystem1, subsystem2: Subsystem2) -> Self {
        Self {
            subsystem1,
            subsystem2,
        }
    }

    pub fn operation(&self) -> Vec<String> {
        vec![
            "Facade initializes subsystems:".to_string(),
            self.subsystem1.operation1(),
            self.subsystem2.operation1(),
            "Facade orders subsystems to perform the action:".to_string(),
            self.subsystem1.operation_n(),
            self.subsystem2.operation_z(),
        ]
    }
}

pub fn conceptual_demo() -> Transcript {
    let facade = Facade::new(Subsystem1, Subsystem2);
    let mut out = Transcript::new();
    out.lines(facade.operation());
    out
}

// ============================================================================
// Real-world example: video conversion
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("unsupported target format '{0}': expected mp4 or ogg")]
    UnsupportedFormat(String),

    #[error("cannot tell the codec of '{0}' from its extension")]
    UnknownCodec(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl VideoFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
        }
    }

    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.name).extension().and_then(|e| e.to_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Ogg,
    Mpeg4,
}

impl Codec {
    pub fn from_extension(ext: &str) -> Option<Codec> {
        match ext.to_ascii_lowercase().as_str() {
            "ogg" => Some(Codec::Ogg),
            "mp4" => Some(Codec::Mpeg4),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Codec::Ogg => "ogg",
            Codec::Mpeg4 => "mp4",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Ogg => write!(f, "OggCompressionCodec"),
            Codec::Mpeg4 => write!(f, "MPEG4CompressionCodec"),
        }
    }
}

pub struct CodecFactory;

impl CodecFactory {
    pub fn extract(file: &VideoFile) -> Result<Codec, ConvertError> {
        file.extension()
            .and_then(Codec::from_extension)
            .ok_or_else(|| ConvertError::UnknownCodec(file.name.clone()))
    }
}

pub struct BitrateReader;

impl BitrateReader {
    /// Simulated decode: the stream is tagged with the codec it came from.
    pub fn read(filename: &str, source: Codec) -> Vec<u8> {
        debug!(filename, %source, "reading file");
        format!("{}|{}", source.extension(), filename).into_bytes()
    }

    pub fn convert(buffer: &[u8], destination: Codec) -> Vec<u8> {
        debug!(%destination, "converting buffer");
        let mut out = format!("{}<", destination.extension()).into_bytes();
        out.extend_from_slice(buffer);
        out
    }
}

pub struct AudioMixer;

impl AudioMixer {
    pub fn fix(result: Vec<u8>) -> Vec<u8> {
        debug!("fixing audio");
        let mut fixed = result;
        fixed.extend_from_slice(b"|audio-fixed");
        fixed
    }
}

/// The facade. Callers never touch codecs, readers or mixers.
pub struct VideoConverter;

impl VideoConverter {
    pub fn convert(&self, filename: &str, format: &str) -> Result<VideoFile, ConvertError> {
        let destination = Codec::from_extension(format)
            .ok_or_else(|| ConvertError::UnsupportedFormat(format.to_string()))?;

        let file = VideoFile::new(filename);
        let source = CodecFactory::extract(&file)?;

        let buffer = BitrateReader::read(filename, source);
        let converted = BitrateReader::convert(&buffer, destination);
        let data = AudioMixer::fix(converted);

        let name = Path::new(filename)
            .with_extension(destination.extension())
            .to_string_lossy()
            .into_owned();
        Ok(VideoFile { name, data })
    }
}

pub fn real_world_demo() -> Result<Transcript, ConvertError> {
    let converter = VideoConverter;
    let mp4 = converter.convert("funny-cats-video.ogg", "mp4")?;

    let mut out = Transcript::new();
    out.line("Converting funny-cats-video.ogg to mp4");
    out.line(format!("Saved {} ({} bytes)", mp4.name, mp4.data.len()));
    out.line(format!("Stream: {}", String::from_utf8_lossy(&mp4.data)));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_orders_subsystems() {
        let lines = Facade::default().operation();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "Subsystem1: Ready!");
        assert_eq!(lines[5], "Subsystem2: Fire!");
    }

    #[test]
    fn test_convert_ogg_to_mp4() {
        let file = VideoConverter.convert("funny-cats-video.ogg", "mp4").unwrap();
        assert_eq!(file.name, "funny-cats-video.mp4");
        assert_eq!(
            file.data,
            b"mp4<ogg|funny-cats-video.ogg|audio-fixed".to_vec()
        );
    }

    #[test]
    fn test_convert_mp4_to_ogg() {
        let file = VideoConverter.convert("clips/dog.mp4", "ogg").unwrap();
        assert_eq!(file.name, "clips/dog.ogg");
        assert!(file.data.starts_with(b"ogg<mp4|"));
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        assert_eq!(
            VideoConverter.convert("a.ogg", "avi").unwrap_err(),
            ConvertError::UnsupportedFormat("avi".to_string())
        );
    }

    #[test]
    fn test_unknown_source_codec() {
        assert_eq!(
            VideoConverter.convert("notes.txt", "mp4").unwrap_err(),
            ConvertError::UnknownCodec("notes.txt".to_string())
        );
        assert!(VideoConverter.convert("no-extension", "mp4").is_err());
    }
}
