use crate::domain::order::CustomerOrder;
use crate::domain::store::Store;
use crate::infrastructure::in_memory::{InMemoryOrderStore, InMemoryStoreService};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores and orders standing in for the host platform's data.
///
/// The CLI seeds the in-memory stores from this document and writes the
/// orders back after each command, so a checkout can be started in one run
/// and confirmed in the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub stores: Vec<Store>,
    #[serde(default)]
    pub orders: Vec<CustomerOrder>,
}

impl Fixtures {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FixtureError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), FixtureError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FixtureError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Copies stores and orders into the given in-memory stores.
    pub async fn seed(&self, orders: &InMemoryOrderStore, stores: &InMemoryStoreService) {
        for store in &self.stores {
            stores.insert(store.clone()).await;
        }
        for order in &self.orders {
            orders.insert(order.clone()).await;
        }
    }
}
