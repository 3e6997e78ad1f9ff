// Pick flow: permission gate, OS chooser, and routing of the asynchronous
// results back to the caller.
//
// The host activity owns one `ImagePickerHelper` and forwards its activity
// results, permission results and rationale dialog choices to it.

use crate::completion::Completion;
use crate::config::PickerConfig;
use crate::host::ActivityHost;
use crate::models::{
    CaptureIntent, ImageLocation, Permission, PickIntent, PickOutcome, RationaleChoice,
    ResultData, IMAGE_MIME_TYPE, RESULT_OK,
};
use crate::permissions::{all_granted, permissions_to_request};
use crate::registry::RequestRegistry;
use tokio::sync::oneshot;

/// A launched chooser waiting for its activity result
#[derive(Debug)]
struct PendingPick {
    completion: Completion,
    capture: Option<ImageLocation>,
}

/// Lets the user pick an image from the gallery or take a new photo.
///
/// Each request resolves exactly once to [`PickOutcome::Selected`] or
/// [`PickOutcome::Cancelled`], unless the OS never answers.
///
/// # Example
/// ```rust,ignore
/// let mut picker = ImagePickerHelper::new(host);
/// picker.pick_image_with(|outcome| match outcome {
///     PickOutcome::Selected(location) => log::info!("Picked {}", location),
///     PickOutcome::Cancelled => log::info!("Nothing picked"),
/// });
///
/// // in the activity callbacks
/// picker.on_activity_result(request_code, result_code, data.as_ref());
/// picker.on_request_permissions_result(request_code, &permissions, &grant_results);
/// ```
#[derive(Debug)]
pub struct ImagePickerHelper<H: ActivityHost> {
    host: H,
    config: PickerConfig,
    pick_requests: RequestRegistry<PendingPick>,
    permission_requests: RequestRegistry<Completion>,
    rationale_requests: RequestRegistry<Completion>,
}

impl<H: ActivityHost> ImagePickerHelper<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, PickerConfig::default())
    }

    /// Invalid config values are replaced by their defaults, see
    /// [`PickerConfig::sanitized`]
    pub fn with_config(host: H, config: PickerConfig) -> Self {
        let config = config.sanitized();
        let base = config.request_code_base;
        Self {
            host,
            config,
            pick_requests: RequestRegistry::new(base),
            permission_requests: RequestRegistry::new(base),
            rationale_requests: RequestRegistry::new(base),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// True when every permission needed for a camera capture is granted
    pub fn has_photo_permissions(&self) -> bool {
        all_granted(&self.host, &self.config.capture_permissions)
    }

    /// Number of requests still waiting for the OS or the user
    pub fn pending_count(&self) -> usize {
        self.pick_requests.len() + self.permission_requests.len() + self.rationale_requests.len()
    }

    /// Starts the pick flow; `completion` receives the outcome
    pub fn pick_image(&mut self, completion: Completion) {
        self.begin_flow(false, completion);
    }

    /// Starts the pick flow with a closure as completion
    pub fn pick_image_with<F>(&mut self, f: F)
    where
        F: FnOnce(PickOutcome) + 'static,
    {
        self.pick_image(Completion::new(f));
    }

    /// Starts the pick flow; the outcome arrives on the returned receiver
    pub fn pick_image_channel(&mut self) -> oneshot::Receiver<PickOutcome> {
        let (completion, rx) = Completion::channel();
        self.pick_image(completion);
        rx
    }

    /// Forwarded from the activity's `onActivityResult`.
    ///
    /// Returns `false` if `request_code` does not belong to a pending pick,
    /// in which case nothing happens.
    pub fn on_activity_result(
        &mut self,
        request_code: i32,
        result_code: i32,
        data: Option<&ResultData>,
    ) -> bool {
        let Some(pending) = self.pick_requests.take(request_code) else {
            return false;
        };

        let outcome = resolve_pick(result_code, data, pending.capture);
        log::debug!(
            "Pick request {} finished with result {}: {:?}",
            request_code,
            result_code,
            outcome
        );
        pending.completion.complete(outcome);
        true
    }

    /// Forwarded from the activity's `onRequestPermissionsResult`.
    ///
    /// Returns `false` if `request_code` does not belong to a pending
    /// permission request.
    pub fn on_request_permissions_result(
        &mut self,
        request_code: i32,
        permissions: &[String],
        grant_results: &[i32],
    ) -> bool {
        let Some(completion) = self.permission_requests.take(request_code) else {
            return false;
        };

        for (name, grant) in permissions.iter().zip(grant_results) {
            log::debug!("Permission {} -> {}", name, grant);
        }

        let concerns_capture = permissions.iter().any(|name| {
            self.config
                .capture_permissions
                .iter()
                .any(|p| p.name() == name.as_str())
        });
        if !concerns_capture || grant_results.is_empty() {
            // Empty results mean the prompt was interrupted
            log::info!("Permission request {} was interrupted", request_code);
            completion.complete(PickOutcome::Cancelled);
            return true;
        }

        if self.has_photo_permissions() {
            self.begin_flow(false, completion);
        } else {
            self.show_rationale(completion);
        }
        true
    }

    /// Forwarded from the rationale dialog's buttons.
    ///
    /// Returns `false` if `request_code` does not belong to a shown dialog.
    pub fn on_rationale_choice(&mut self, request_code: i32, choice: RationaleChoice) -> bool {
        let Some(completion) = self.rationale_requests.take(request_code) else {
            return false;
        };

        log::debug!("Rationale {} answered with {:?}", request_code, choice);
        match choice {
            RationaleChoice::Continue => self.begin_flow(true, completion),
            RationaleChoice::TryAgain => self.begin_flow(false, completion),
            RationaleChoice::Dismissed => completion.complete(PickOutcome::Cancelled),
        }
        true
    }

    fn begin_flow(&mut self, ignore_capture_permissions: bool, completion: Completion) {
        let runtime_permissions = self.host.sdk_version() >= self.config.runtime_permissions_sdk;
        if !runtime_permissions || ignore_capture_permissions {
            self.start_pick(completion);
            return;
        }

        let missing = permissions_to_request(&self.host, &self.config.capture_permissions);
        if missing.is_empty() {
            self.start_pick(completion);
        } else {
            self.request_permissions(missing, completion);
        }
    }

    fn request_permissions(&mut self, missing: Vec<Permission>, completion: Completion) {
        let code = match self.permission_requests.reserve() {
            Ok(code) => code,
            Err(e) => {
                log::error!("Cannot request permissions: {}", e);
                completion.complete(PickOutcome::Cancelled);
                return;
            }
        };

        log::info!(
            "Requesting permissions {:?} with request code {}",
            missing,
            code
        );
        match self.host.request_permissions(&missing, code) {
            Ok(()) => self.permission_requests.insert(code, completion),
            Err(e) => {
                log::error!("Failed to request permissions: {}", e);
                completion.complete(PickOutcome::Cancelled);
            }
        }
    }

    fn show_rationale(&mut self, completion: Completion) {
        let code = match self.rationale_requests.reserve() {
            Ok(code) => code,
            Err(e) => {
                log::error!("Cannot show permission rationale: {}", e);
                completion.complete(PickOutcome::Cancelled);
                return;
            }
        };

        match self
            .host
            .show_permission_rationale(&self.config.rationale, code)
        {
            Ok(()) => self.rationale_requests.insert(code, completion),
            Err(e) => {
                log::error!("Failed to show permission rationale: {}", e);
                completion.complete(PickOutcome::Cancelled);
            }
        }
    }

    fn start_pick(&mut self, completion: Completion) {
        let code = match self.pick_requests.reserve() {
            Ok(code) => code,
            Err(e) => {
                log::error!("Cannot start image picker: {}", e);
                completion.complete(PickOutcome::Cancelled);
                return;
            }
        };

        let capture = if self.has_photo_permissions() {
            let file_name = self.config.capture_file_name();
            match self
                .host
                .allocate_capture_location(self.config.capture_directory.as_deref(), &file_name)
            {
                Ok(location) => Some(location),
                Err(e) => {
                    log::warn!("No capture location, offering gallery only: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let intent = match &capture {
            Some(output) => PickIntent::Chooser {
                title: self.config.chooser_title.clone(),
                mime_type: IMAGE_MIME_TYPE.to_string(),
                capture: CaptureIntent {
                    output: output.clone(),
                },
            },
            None => PickIntent::Gallery {
                mime_type: IMAGE_MIME_TYPE.to_string(),
            },
        };

        log::info!("Launching image picker with request code {}", code);
        match self.host.launch(&intent, code) {
            Ok(()) => self
                .pick_requests
                .insert(code, PendingPick { completion, capture }),
            Err(e) => {
                log::error!("Failed to launch image picker: {}", e);
                completion.complete(PickOutcome::Cancelled);
            }
        }
    }
}

fn resolve_pick(
    result_code: i32,
    data: Option<&ResultData>,
    capture: Option<ImageLocation>,
) -> PickOutcome {
    if result_code != RESULT_OK {
        return PickOutcome::Cancelled;
    }

    match data.and_then(|d| d.data.clone()).or(capture) {
        Some(location) => PickOutcome::Selected(location),
        None => {
            log::warn!("Picker reported success without an image location");
            PickOutcome::Cancelled
        }
    }
}
