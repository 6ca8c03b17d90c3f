use http::StatusCode;
use std::{fmt, io};

/// The outgoing response of the request an error occurred in.
pub trait Response {
    /// Whether the status line has already been sent. The status can't change anymore then.
    fn has_started(&self) -> bool;

    /// Set the response status.
    fn set_status(&mut self, status: StatusCode);

    /// Append `body` to the response body.
    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;
}

/// Response that streams straight into a writer, e.g. stderr of a command line program.
///
/// There is no status line, so it counts as started from the beginning.
pub struct StreamResponse<W> {
    writer: W,
}

impl<W: io::Write> StreamResponse<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl StreamResponse<io::Stderr> {
    /// Response writing to stderr.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W> fmt::Debug for StreamResponse<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamResponse").finish_non_exhaustive()
    }
}

impl<W: io::Write> Response for StreamResponse<W> {
    fn has_started(&self) -> bool {
        true
    }

    fn set_status(&mut self, _status: StatusCode) {}

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.writer.write_all(body)?;
        self.writer.flush()
    }
}

/// Response held in memory until the server sends it.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    inner: http::Response<Vec<u8>>,
    committed: bool,
}

impl BufferedResponse {
    /// Create an empty `200 OK` response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the status line and headers as sent.
    pub fn commit(&mut self) {
        self.committed = true;
    }

    /// Current status.
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Body written so far.
    pub fn body(&self) -> &[u8] {
        self.inner.body()
    }

    /// Unwrap the response.
    pub fn into_inner(self) -> http::Response<Vec<u8>> {
        self.inner
    }
}

impl From<http::Response<Vec<u8>>> for BufferedResponse {
    fn from(inner: http::Response<Vec<u8>>) -> Self {
        Self {
            inner,
            committed: false,
        }
    }
}

impl Response for BufferedResponse {
    fn has_started(&self) -> bool {
        self.committed
    }

    fn set_status(&mut self, status: StatusCode) {
        if !self.committed {
            *self.inner.status_mut() = status;
        }
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.inner.body_mut().extend_from_slice(body);
        Ok(())
    }
}
