use anyhow::Result;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::io::Write;

use crate::FetchError;

pub mod formatter;

pub use formatter::WireFormatter;

/// The single JSON object reported per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultEnvelope {
    Success { transcript: String },
    Failure { error: String },
}

impl ResultEnvelope {
    pub fn success(transcript: impl Into<String>) -> Self {
        ResultEnvelope::Success {
            transcript: transcript.into(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ResultEnvelope::Failure { error: error.into() }
    }

    /// Render as a single line of JSON, without the trailing newline
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, WireFormatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }
}

impl From<FetchError> for ResultEnvelope {
    fn from(err: FetchError) -> Self {
        ResultEnvelope::failure(err.to_string())
    }
}

impl Serialize for ResultEnvelope {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ResultEnvelope", 2)?;
        match self {
            ResultEnvelope::Success { transcript } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("transcript", transcript)?;
            }
            ResultEnvelope::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

/// Write the envelope and a newline to `writer`
pub fn write_envelope<W: Write>(writer: &mut W, envelope: &ResultEnvelope) -> Result<()> {
    let line = envelope.render()?;
    writeln!(writer, "{}", line)?;
    writer.flush()?;
    Ok(())
}

/// Print the envelope to stdout
pub fn print_envelope(envelope: &ResultEnvelope) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_envelope(&mut handle, envelope)
}
