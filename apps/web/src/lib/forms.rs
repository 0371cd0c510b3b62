//! Small helpers for the multipart upload forms.

use identity::validate::ACCEPTED_IMAGE_TYPES;
use leptos::ev::Event;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

/// Pull the first selected file out of a file input's change event.
pub(crate) fn selected_file(event: &Event) -> Option<web_sys::File> {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

/// `accept` attribute value matching the upload rules.
pub(crate) fn accepted_image_types() -> String {
    ACCEPTED_IMAGE_TYPES.join(",")
}
