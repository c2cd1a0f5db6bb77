use autofiller_core_types::AutofillError;
use page_dom::DomError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FillError {
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error("{widget} filler cannot use a {found} value")]
    ValueShape {
        widget: &'static str,
        found: &'static str,
    },
}

impl From<FillError> for AutofillError {
    fn from(err: FillError) -> Self {
        match err {
            FillError::Dom(dom) => dom.into(),
            other => AutofillError::new(other.to_string()),
        }
    }
}
