use crate::controller::{FetchHandle, ResourceController};
use crate::domain::document::{Document, DocumentKind};
use crate::domain::remove_by_id;
use crate::domain::types::DocumentId;
use crate::query::ALL_CATEGORIES;
use crate::services::{ServiceError, ServiceResult};
use crate::transport::{DocumentWriter, Transport};

/// Restricts the document list to one kind, or shows all documents.
pub fn show_kind<R>(controller: &ResourceController<Document, R>, kind: Option<DocumentKind>) -> FetchHandle
where
    R: Transport<Document> + 'static,
{
    controller.set_filter(kind.map_or(ALL_CATEGORIES, DocumentKind::as_str))
}

/// Removes the document from the list right away and deletes it remotely.
pub async fn delete_document<R, W>(
    controller: &ResourceController<Document, R>,
    writer: &W,
    id: DocumentId,
) -> ServiceResult<()>
where
    R: Transport<Document> + 'static,
    W: DocumentWriter + ?Sized,
{
    controller
        .mutate_optimistic(
            move |items: &mut Vec<Document>| {
                remove_by_id(items, id);
            },
            writer.delete_document(id),
        )
        .await
        .map_err(|err| {
            log::error!("Failed to delete document {id}: {err}");
            ServiceError::from(err)
        })
}
