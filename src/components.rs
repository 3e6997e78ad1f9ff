use crate::models::{RationaleChoice, RationaleText};
use dioxus::prelude::*;

/// Props for the PermissionRationaleDialog
#[derive(Props, Clone, PartialEq)]
pub struct PermissionRationaleProps {
    /// Request code handed to `ActivityHost::show_permission_rationale`
    pub request_code: i32,
    /// Called once with the request code and the pressed button
    pub on_choice: EventHandler<(i32, RationaleChoice)>,
    /// Custom labels for the dialog (optional)
    #[props(default)]
    pub labels: Option<RationaleLabels>,
}

/// Custom labels for the rationale dialog
#[derive(Clone, PartialEq, Default)]
pub struct RationaleLabels {
    pub title: String,
    pub message: String,
    pub continue_button: String,
    pub try_again_button: String,
}

impl From<&RationaleText> for RationaleLabels {
    fn from(text: &RationaleText) -> Self {
        Self {
            title: text.title.clone(),
            message: text.message.clone(),
            continue_button: text.continue_label.clone(),
            try_again_button: text.try_again_label.clone(),
        }
    }
}

/// Modal dialog shown after the camera permissions were denied.
///
/// For hosts that render the rationale themselves instead of using a native
/// alert dialog. The host passes the choice on to
/// `ImagePickerHelper::on_rationale_choice`.
///
/// # Example
/// ```rust,ignore
/// PermissionRationaleDialog {
///     request_code: code,
///     on_choice: move |(code, choice)| {
///         picker.write().on_rationale_choice(code, choice);
///     },
/// }
/// ```
#[component]
pub fn PermissionRationaleDialog(props: PermissionRationaleProps) -> Element {
    let labels = props
        .labels
        .clone()
        .unwrap_or_else(|| RationaleLabels::from(&RationaleText::default()));
    let mut answered = use_signal(|| false);

    let request_code = props.request_code;
    let mut choose = move |choice: RationaleChoice| {
        if answered() {
            return;
        }
        answered.set(true);
        log::debug!("Rationale dialog {} closed with {:?}", request_code, choice);
        props.on_choice.call((request_code, choice));
    };

    if answered() {
        return rsx! {};
    }

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex; align-items: center; justify-content: center; z-index: 1000;",
            onclick: move |_| choose(RationaleChoice::Dismissed),
            div {
                style: "background: white; border-radius: 8px; padding: 20px; max-width: 320px;",
                onclick: move |evt| evt.stop_propagation(),
                h3 { style: "margin: 0 0 12px 0;", "{labels.title}" }
                p { style: "margin: 0 0 16px 0; color: #444;", "{labels.message}" }
                div { style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button {
                        class: "btn-secondary",
                        onclick: move |_| choose(RationaleChoice::TryAgain),
                        "{labels.try_again_button}"
                    }
                    button {
                        class: "btn-primary",
                        onclick: move |_| choose(RationaleChoice::Continue),
                        "{labels.continue_button}"
                    }
                }
            }
        }
    }
}
