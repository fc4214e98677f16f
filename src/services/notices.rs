use crate::controller::{FetchHandle, ResourceController};
use crate::domain::notice::{NewNotice, Notice, NoticePriority};
use crate::domain::types::NoticeId;
use crate::domain::{remove_by_id, update_by_id};
use crate::forms::notices::AddNoticeForm;
use crate::query::ALL_CATEGORIES;
use crate::services::{ServiceError, ServiceResult};
use crate::transport::{NoticeWriter, Transport};

/// Restricts the notice board to one priority, or shows all of them.
pub fn show_priority<R>(
    controller: &ResourceController<Notice, R>,
    priority: Option<NoticePriority>,
) -> FetchHandle
where
    R: Transport<Notice> + 'static,
{
    controller.set_filter(priority.map_or(ALL_CATEGORIES, NoticePriority::as_str))
}

/// Removes the notice from the board right away and deletes it remotely.
pub async fn delete_notice<R, W>(
    controller: &ResourceController<Notice, R>,
    writer: &W,
    id: NoticeId,
) -> ServiceResult<()>
where
    R: Transport<Notice> + 'static,
    W: NoticeWriter + ?Sized,
{
    controller
        .mutate_optimistic(
            move |items: &mut Vec<Notice>| {
                remove_by_id(items, id);
            },
            writer.delete_notice(id),
        )
        .await
        .map_err(|err| {
            log::error!("Failed to delete notice {id}: {err}");
            ServiceError::from(err)
        })
}

/// Flips the read flag of a visible notice, returning the new value.
pub async fn toggle_read<R, W>(
    controller: &ResourceController<Notice, R>,
    writer: &W,
    id: NoticeId,
) -> ServiceResult<bool>
where
    R: Transport<Notice> + 'static,
    W: NoticeWriter + ?Sized,
{
    let is_read = controller
        .items()
        .iter()
        .find(|notice| notice.id == id)
        .map(|notice| !notice.is_read)
        .ok_or(ServiceError::NotFound)?;

    controller
        .mutate_optimistic(
            move |items: &mut Vec<Notice>| {
                update_by_id(items, id, |notice| notice.is_read = is_read);
            },
            writer.set_notice_read(id, is_read),
        )
        .await
        .map_err(|err| {
            log::error!("Failed to mark notice {id} as read={is_read}: {err}");
            ServiceError::from(err)
        })?;

    Ok(is_read)
}

/// Validates and publishes a notice, then refreshes the board.
///
/// The new row gets its id and position from the server, so it is not
/// inserted optimistically; the returned handle settles once the refreshed
/// page is in.
pub async fn create_notice<R, W>(
    controller: &ResourceController<Notice, R>,
    writer: &W,
    form: AddNoticeForm,
) -> ServiceResult<(Notice, FetchHandle)>
where
    R: Transport<Notice> + 'static,
    W: NoticeWriter + ?Sized,
{
    let new_notice = NewNotice::try_from(form).map_err(|err| {
        log::error!("Failed to validate notice form: {err}");
        ServiceError::from(err)
    })?;

    let created = writer.create_notice(&new_notice).await.map_err(|err| {
        log::error!("Failed to publish notice: {err}");
        ServiceError::from(err)
    })?;

    Ok((created, controller.refresh()))
}
