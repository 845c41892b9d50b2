//! Browser surface capability used to drive the implicit-grant login.
//!
//! Any embedded web view or headless automation layer can take part in the
//! flow by implementing [`NavigableSurface`]. [`ConsoleSurface`] is the
//! terminal fallback: the user opens the URL in their own browser and pastes
//! back the address it ends up on.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use url::Url;

use super::error::AuthError;

/// Event reported by a browser surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A navigation was committed to this URL.
    Navigated(String),
    /// The user closed the surface.
    Closed,
}

/// A browser view that can load a URL and report where it navigates.
#[async_trait]
pub trait NavigableSurface: Send {
    async fn load(&mut self, url: &Url) -> Result<(), AuthError>;

    /// Make the surface visible so the user can log in or grant consent.
    async fn show(&mut self) -> Result<(), AuthError>;

    /// Next navigation or close. `None` means the surface is gone and is
    /// handled like a close.
    async fn next_event(&mut self) -> Option<SurfaceEvent>;

    async fn destroy(&mut self);
}

/// Opens a fresh surface for every authorization attempt.
#[async_trait]
pub trait SurfaceProvider: Send + Sync {
    async fn open(&self) -> Result<Box<dyn NavigableSurface>, AuthError>;
}

/// Terminal-driven surface.
///
/// Each pasted line is treated as a navigation; an empty line or end of
/// input closes the surface.
pub struct ConsoleSurface<R, W> {
    reader: R,
    writer: W,
    destroyed: bool,
}

impl<R, W> ConsoleSurface<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            destroyed: false,
        }
    }

    async fn write(&mut self, text: &str) -> Result<(), AuthError> {
        self.writer
            .write_all(text.as_bytes())
            .await
            .map_err(|e| AuthError::Surface(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| AuthError::Surface(e.to_string()))
    }
}

#[async_trait]
impl<R, W> NavigableSurface for ConsoleSurface<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn load(&mut self, url: &Url) -> Result<(), AuthError> {
        self.write(&format!(
            "Open this address in your browser and log in:\n  {url}\n\
             Then paste the address the browser ends up on (empty line cancels):\n> "
        ))
        .await
    }

    async fn show(&mut self) -> Result<(), AuthError> {
        self.write("That is not the login redirect yet. Paste the final address (empty line cancels):\n> ")
            .await
    }

    async fn next_event(&mut self) -> Option<SurfaceEvent> {
        if self.destroyed {
            return None;
        }
        let mut line = String::new();
        match self.reader.read_line(&mut line).await {
            Ok(0) => Some(SurfaceEvent::Closed),
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    Some(SurfaceEvent::Closed)
                } else {
                    Some(SurfaceEvent::Navigated(line.to_string()))
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Console read failed");
                None
            }
        }
    }

    async fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// Opens a [`ConsoleSurface`] on stdin/stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSurfaceProvider;

#[async_trait]
impl SurfaceProvider for ConsoleSurfaceProvider {
    async fn open(&self) -> Result<Box<dyn NavigableSurface>, AuthError> {
        Ok(Box::new(ConsoleSurface::new(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stderr(),
        )))
    }
}
