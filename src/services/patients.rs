use crate::controller::{FetchHandle, ResourceController};
use crate::domain::patient::{Patient, PatientStatus};
use crate::domain::remove_by_id;
use crate::domain::types::PatientId;
use crate::query::ALL_CATEGORIES;
use crate::services::{ServiceError, ServiceResult};
use crate::transport::{PatientWriter, Transport};

/// Restricts the patient list to one admission status, or shows everyone.
pub fn show_status<R>(
    controller: &ResourceController<Patient, R>,
    status: Option<PatientStatus>,
) -> FetchHandle
where
    R: Transport<Patient> + 'static,
{
    controller.set_filter(status.map_or(ALL_CATEGORIES, PatientStatus::as_str))
}

/// Removes the patient from the list right away and deletes the record remotely.
pub async fn delete_patient<R, W>(
    controller: &ResourceController<Patient, R>,
    writer: &W,
    id: PatientId,
) -> ServiceResult<()>
where
    R: Transport<Patient> + 'static,
    W: PatientWriter + ?Sized,
{
    controller
        .mutate_optimistic(
            move |items: &mut Vec<Patient>| {
                remove_by_id(items, id);
            },
            writer.delete_patient(id),
        )
        .await
        .map_err(|err| {
            log::error!("Failed to delete patient {id}: {err}");
            ServiceError::from(err)
        })
}
