//! Registry of in-process handlers keyed by format pair.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::fs;

use super::traits::Handler;
use crate::converter::{ConversionJob, ConvertError, IoOp};
use crate::format::Format;

/// Rewrites one byte into another throughout a file.
///
/// Backs the TXT/CSV pairs. Quoting and escaping are deliberately not
/// understood: every space becomes a comma or the other way round. Line
/// endings pass through untouched, and so does any non-ASCII text.
#[derive(Debug, Clone)]
pub struct ByteSubstitution {
    name: &'static str,
    from: u8,
    to: u8,
}

impl ByteSubstitution {
    /// Spaces to commas.
    pub fn txt_to_csv() -> Self {
        Self {
            name: "txt-to-csv",
            from: b' ',
            to: b',',
        }
    }

    /// Commas to spaces.
    pub fn csv_to_txt() -> Self {
        Self {
            name: "csv-to-txt",
            from: b',',
            to: b' ',
        }
    }

    /// Applies the substitution to a buffer.
    pub fn apply(&self, bytes: &[u8]) -> Vec<u8> {
        bytes
            .iter()
            .map(|&b| if b == self.from { self.to } else { b })
            .collect()
    }
}

#[async_trait]
impl Handler for ByteSubstitution {
    fn name(&self) -> &str {
        self.name
    }

    async fn run(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        let input = fs::read(&job.input_path)
            .await
            .map_err(|e| ConvertError::io(IoOp::Read, &job.input_path, e))?;
        fs::write(&job.output_path, self.apply(&input))
            .await
            .map_err(|e| ConvertError::io(IoOp::Write, &job.output_path, e))
    }
}

/// Immutable-after-construction table of in-process handlers.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<(Format, Format), Arc<dyn Handler>>,
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self
            .handlers
            .iter()
            .map(|((i, o), h)| format!("{i}->{o}:{}", h.name()))
            .collect();
        pairs.sort();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &pairs)
            .finish()
    }
}

impl HandlerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the TXT/CSV rewrites.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Format::Txt, Format::Csv, Arc::new(ByteSubstitution::txt_to_csv()));
        registry.register(Format::Csv, Format::Txt, Arc::new(ByteSubstitution::csv_to_txt()));
        registry
    }

    /// Registers a handler, replacing any previous one for the pair.
    pub fn register(&mut self, input: Format, output: Format, handler: Arc<dyn Handler>) {
        self.handlers.insert((input, output), handler);
    }

    pub fn get(&self, input: Format, output: Format) -> Option<Arc<dyn Handler>> {
        self.handlers.get(&(input, output)).cloned()
    }

    pub fn contains(&self, input: Format, output: Format) -> bool {
        self.handlers.contains_key(&(input, output))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
