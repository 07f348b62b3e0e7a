use super::{CardRenderer, StagedCard};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockCardRenderer {
    fail: bool,
    dates: Arc<Mutex<Vec<NaiveDate>>>,
}

impl MockCardRenderer {
    pub fn new() -> Self {
        Self {
            fail: false,
            dates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.dates.lock().unwrap().len()
    }

    pub fn get_dates(&self) -> Vec<NaiveDate> {
        self.dates.lock().unwrap().clone()
    }
}

impl Default for MockCardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CardRenderer for MockCardRenderer {
    async fn render(&self, date: NaiveDate) -> Result<StagedCard> {
        self.dates.lock().unwrap().push(date);

        if self.fail {
            return Err(Error::Invariant("mock render failure".to_string()));
        }

        StagedCard::from_bytes(b"\x89PNG\r\n\x1a\nmock")
    }
}
