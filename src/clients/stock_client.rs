//! # StockClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default read, delete, and
//! stock operations built on top of a generic `ResourceClient`.

use async_trait::async_trait;

use crate::framework::{InMemoryStore, LedgerEntity, LedgerError, ResourceClient, ResourceRecord, ResourceStore};

/// Trait for resource-specific clients to inherit standard ledger operations.
///
/// Implementors only supply [`inner`](Self::inner) and an error type that can be built
/// from a [`LedgerError`]. Everything else is provided.
///
/// # Example
///
/// ```rust
/// use stock_ledger::clients::StockClient;
/// use stock_ledger::equipment;
/// use stock_ledger::model::EquipmentCreate;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = equipment::new(3);
/// let id = client
///     .create_equipment(EquipmentCreate {
///         name: "Wheelchair".into(),
///         location: "Ward B".into(),
///         units: 4,
///     })
///     .await?;
///
/// // adjust_stock() and stock_level() are provided automatically
/// client.adjust_stock(id, -1).await?;
/// assert_eq!(client.stock_level(id).await?, 3);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait StockClient<T: LedgerEntity>: Send + Sync {
    /// Storage backend of the wrapped client.
    type Store: ResourceStore<T>;

    /// The resource-specific error type.
    type Error: From<LedgerError> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T, Self::Store>;

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<ResourceRecord<T>>, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().get(id).await?)
    }

    /// Fetch a record by ID, failing if it does not exist.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<ResourceRecord<T>, Self::Error> {
        Ok(self.inner().fetch(id).await?)
    }

    async fn list(&self) -> Result<Vec<ResourceRecord<T>>, Self::Error> {
        Ok(self.inner().list().await?)
    }

    /// Delete a record by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().delete(id).await?)
    }

    /// Apply a signed delta to the stock.
    #[tracing::instrument(skip(self))]
    async fn adjust_stock(&self, id: T::Id, delta: i64) -> Result<ResourceRecord<T>, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().adjust(id, delta).await?)
    }

    /// Overwrite the stock with an absolute value.
    #[tracing::instrument(skip(self))]
    async fn set_stock(&self, id: T::Id, target: i64) -> Result<ResourceRecord<T>, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().set_quantity(id, target).await?)
    }

    /// Current stock of a record.
    async fn stock_level(&self, id: T::Id) -> Result<u64, Self::Error> {
        Ok(self.inner().fetch(id).await?.quantity)
    }
}

/// Converts a unit count into a negative delta.
pub(crate) fn units_to_delta(units: u64) -> Option<i64> {
    i64::try_from(units).ok().map(|u| -u)
}

/// Default store for domain clients built by the factory functions.
pub type DefaultStore<T> = InMemoryStore<T>;
