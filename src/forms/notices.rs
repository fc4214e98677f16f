//! Forms for publishing notices.

use serde::Deserialize;
use validator::Validate;

use crate::domain::notice::{NewNotice, NoticePriority};
use crate::domain::types::{NoticeBody, NoticeTitle};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for publishing a notice on the board.
pub struct AddNoticeForm {
    /// Headline shown in the notice list.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Free-form notice text; HTML is sanitized.
    #[validate(length(min = 1))]
    pub body: String,
    /// One of `low`, `normal`, `high-priority`; defaults to `normal`.
    #[serde(default)]
    pub priority: Option<String>,
}

impl TryFrom<AddNoticeForm> for NewNotice {
    type Error = FormError;

    fn try_from(form: AddNoticeForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let title = NoticeTitle::new(form.title).map_err(|_| FormError::InvalidTitle)?;
        let body = NoticeBody::new(form.body).map_err(|_| FormError::InvalidBody)?;
        let priority = match form.priority.as_deref().map(str::trim) {
            None | Some("") => NoticePriority::default(),
            Some(value) => value
                .parse::<NoticePriority>()
                .map_err(|_| FormError::InvalidPriority)?,
        };

        Ok(NewNotice::new(title, body, priority))
    }
}
