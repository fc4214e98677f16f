//! Mock transports for isolating controllers and services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::document::Document;
use crate::domain::notice::{NewNotice, Notice};
use crate::domain::patient::Patient;
use crate::domain::types::{DocumentId, NoticeId, PatientId};
use crate::pagination::Page;
use crate::query::QueryState;
use crate::transport::errors::TransportResult;
use crate::transport::{DocumentWriter, NoticeWriter, PatientWriter, Transport};

mock! {
    pub NoticeApi {}

    #[async_trait]
    impl Transport<Notice> for NoticeApi {
        async fn fetch_page(&self, query: &QueryState) -> TransportResult<Page<Notice>>;
    }

    #[async_trait]
    impl NoticeWriter for NoticeApi {
        async fn delete_notice(&self, id: NoticeId) -> TransportResult<()>;
        async fn set_notice_read(&self, id: NoticeId, is_read: bool) -> TransportResult<()>;
        async fn create_notice(&self, notice: &NewNotice) -> TransportResult<Notice>;
    }
}

mock! {
    pub PatientApi {}

    #[async_trait]
    impl Transport<Patient> for PatientApi {
        async fn fetch_page(&self, query: &QueryState) -> TransportResult<Page<Patient>>;
    }

    #[async_trait]
    impl PatientWriter for PatientApi {
        async fn delete_patient(&self, id: PatientId) -> TransportResult<()>;
    }
}

mock! {
    pub DocumentApi {}

    #[async_trait]
    impl Transport<Document> for DocumentApi {
        async fn fetch_page(&self, query: &QueryState) -> TransportResult<Page<Document>>;
    }

    #[async_trait]
    impl DocumentWriter for DocumentApi {
        async fn delete_document(&self, id: DocumentId) -> TransportResult<()>;
    }
}
