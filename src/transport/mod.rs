//! Boundary between the list controllers and the remote API.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::notice::{NewNotice, Notice};
use crate::domain::types::{DocumentId, NoticeId, PatientId};
use crate::pagination::Page;
use crate::query::QueryState;
use crate::transport::errors::TransportResult;

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod rest;

pub use rest::RestTransport;

/// Fetches one page of a collection for a query.
///
/// Implementations fail with a [`errors::TransportError`] rather than
/// returning a partial page.
#[async_trait]
pub trait Transport<T>: Send + Sync {
    async fn fetch_page(&self, query: &QueryState) -> TransportResult<Page<T>>;
}

#[async_trait]
impl<T, R> Transport<T> for Arc<R>
where
    T: Send + 'static,
    R: Transport<T> + ?Sized,
{
    async fn fetch_page(&self, query: &QueryState) -> TransportResult<Page<T>> {
        (**self).fetch_page(query).await
    }
}

#[async_trait]
pub trait NoticeWriter: Send + Sync {
    async fn delete_notice(&self, id: NoticeId) -> TransportResult<()>;
    async fn set_notice_read(&self, id: NoticeId, is_read: bool) -> TransportResult<()>;
    async fn create_notice(&self, notice: &NewNotice) -> TransportResult<Notice>;
}

#[async_trait]
pub trait PatientWriter: Send + Sync {
    async fn delete_patient(&self, id: PatientId) -> TransportResult<()>;
}

#[async_trait]
pub trait DocumentWriter: Send + Sync {
    async fn delete_document(&self, id: DocumentId) -> TransportResult<()>;
}
