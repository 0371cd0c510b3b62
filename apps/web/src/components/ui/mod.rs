mod alert;
mod button;
mod spinner;
mod toast;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::{Button, ButtonVariant};
pub(crate) use spinner::Spinner;
pub(crate) use toast::{ToastProvider, use_toasts};
