use crate::models::AlbumFields;
use dioxus::prelude::*;

/// Create/edit album modal. Submit stays disabled while the name is blank or
/// a submission is in flight.
#[component]
pub fn AlbumForm(
    title: String,
    initial: AlbumFields,
    is_edit: bool,
    submitting: bool,
    error: Option<String>,
    on_submit: EventHandler<AlbumFields>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut name = use_signal(|| initial.name.clone());
    let mut description = use_signal(|| initial.description.clone());

    let can_submit = !submitting && !name().trim().is_empty();
    let submit_label = match (submitting, is_edit) {
        (true, true) => "Updating...",
        (true, false) => "Creating...",
        (false, true) => "Update Album",
        (false, false) => "Create Album",
    };

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| {
                if !submitting {
                    on_cancel.call(());
                }
            },
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h2 { class: "modal-title", "{title}" }
                if let Some(error) = error {
                    div { class: "banner banner-error", "{error}" }
                }
                div { class: "form-group",
                    label { class: "form-label", r#for: "name", "Album Name *" }
                    input {
                        id: "name",
                        class: "form-input",
                        placeholder: "Enter album name",
                        disabled: submitting,
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { class: "form-label", r#for: "description", "Description" }
                    textarea {
                        id: "description",
                        class: "form-input form-textarea",
                        placeholder: "Enter album description (optional)",
                        disabled: submitting,
                        value: "{description}",
                        oninput: move |evt| description.set(evt.value()),
                    }
                }
                div { class: "modal-footer",
                    button {
                        class: "btn btn-secondary",
                        disabled: submitting,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: !can_submit,
                        onclick: move |_| {
                            if can_submit {
                                on_submit.call(AlbumFields::new(name(), description()));
                            }
                        },
                        "{submit_label}"
                    }
                }
            }
        }
    }
}
