//! Calendar card rendering
//!
//! Draws a month grid for the broadcast date as a PNG and stages it in a
//! temporary file until it has been uploaded.

pub mod calendar;
pub mod font;
pub mod mock;

pub use calendar::CalendarRenderer;
pub use mock::MockCardRenderer;

use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A rendered card on disk. The file is removed when this is dropped.
pub struct StagedCard {
    file: NamedTempFile,
}

impl StagedCard {
    pub fn new(file: NamedTempFile) -> Self {
        Self { file }
    }

    /// Stage raw PNG bytes in a fresh temporary file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("calendar-")
            .suffix(".png")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn file_name(&self) -> String {
        self.path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "calendar.png".to_string())
    }

    pub async fn read(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(self.path()).await?)
    }
}

#[async_trait]
pub trait CardRenderer: Send + Sync {
    async fn render(&self, date: NaiveDate) -> Result<StagedCard>;
}
