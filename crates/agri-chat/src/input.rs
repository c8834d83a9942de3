use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

/// Reads prompt lines from one buffered source for the whole session.
///
/// The buffer outlives each read, so lines that arrive together (piped
/// input) are all delivered.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    line: String,
}

impl LineReader<BufReader<Stdin>> {
    /// Creates a reader over standard input.
    #[inline]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    /// Creates a reader over a buffered source.
    #[inline]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    /// Reads the next line. Returns `None` at the end of input or when
    /// reading fails.
    pub async fn next_line(&mut self) -> Option<String> {
        self.line.clear();
        match self.reader.read_line(&mut self.line).await {
            Ok(0) => None,
            Ok(_) => Some(self.line.clone()),
            Err(err) => {
                error!("error reading input: {}", err);
                None
            }
        }
    }
}
