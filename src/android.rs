// Android implementation of `ActivityHost`.
//
// All calls go through JNI to the running activity. The activity still has to
// forward `onActivityResult`, `onRequestPermissionsResult` and the rationale
// dialog buttons to the `ImagePickerHelper`; `result_data_from_intent` turns
// the result intent into a `ResultData`.

use crate::config::RUNTIME_PERMISSIONS_SDK;
use crate::error::PickerError;
use crate::host::{prepare_capture_file, ActivityHost};
use crate::models::{
    ImageLocation, Permission, PickIntent, RationaleText, ResultData, PERMISSION_GRANTED,
};
use crate::permissions::PermissionChecker;
use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};
use ndk_context::android_context;
use std::path::{Path, PathBuf};

const ACTION_PICK: &str = "android.intent.action.PICK";
const ACTION_IMAGE_CAPTURE: &str = "android.media.action.IMAGE_CAPTURE";
const EXTRA_OUTPUT: &str = "output";
const EXTRA_INITIAL_INTENTS: &str = "android.intent.extra.INITIAL_INTENTS";

/// `ActivityHost` backed by a live Android activity
pub struct AndroidHost {
    vm: JavaVM,
    activity: GlobalRef,
    sdk_version: u32,
}

impl AndroidHost {
    /// Uses the activity from the NDK context
    pub fn from_context() -> Result<Self, PickerError> {
        let ctx = android_context();
        let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }?;
        let (activity, sdk_version) = {
            let mut env = vm.attach_current_thread()?;
            let activity = unsafe { JObject::from_raw(ctx.context().cast()) };
            let global = env.new_global_ref(&activity)?;
            (global, read_sdk_version(&mut env)?)
        };
        Ok(Self {
            vm,
            activity,
            sdk_version,
        })
    }

    /// Looks the activity up through its static `getInstance()` accessor.
    ///
    /// `main_activity_class` is the class name in slash format, e.g.
    /// `dev/dioxus/main/MainActivity`.
    pub fn from_activity_class(main_activity_class: &str) -> Result<Self, PickerError> {
        let ctx = android_context();
        let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }?;
        let (activity, sdk_version) = {
            let mut env = vm.attach_current_thread()?;
            let instance = get_activity_instance(&mut env, main_activity_class)?;
            let global = env.new_global_ref(&instance)?;
            (global, read_sdk_version(&mut env)?)
        };
        Ok(Self {
            vm,
            activity,
            sdk_version,
        })
    }

    fn check_self_permission(&self, permission: &Permission) -> Result<bool, PickerError> {
        let mut env = self.vm.attach_current_thread()?;
        let name = env.new_string(permission.name())?;
        let result = env
            .call_method(
                self.activity.as_obj(),
                "checkSelfPermission",
                "(Ljava/lang/String;)I",
                &[JValue::Object(&name)],
            )
            .map_err(|e| java_error(&mut env, "checkSelfPermission", e))?
            .i()?;
        Ok(result == PERMISSION_GRANTED)
    }

    fn public_dcim_directory(&self) -> Result<PathBuf, PickerError> {
        let mut env = self.vm.attach_current_thread()?;
        let env_cls = env.find_class("android/os/Environment")?;
        let dcim = env
            .get_static_field(&env_cls, "DIRECTORY_DCIM", "Ljava/lang/String;")?
            .l()?;
        let dir = env
            .call_static_method(
                &env_cls,
                "getExternalStoragePublicDirectory",
                "(Ljava/lang/String;)Ljava/io/File;",
                &[JValue::Object(&dcim)],
            )
            .map_err(|e| java_error(&mut env, "getExternalStoragePublicDirectory", e))?
            .l()?;
        if dir.is_null() {
            return Err(PickerError::Platform(
                "external storage directory unavailable".to_string(),
            ));
        }
        let path = env
            .call_method(&dir, "getAbsolutePath", "()Ljava/lang/String;", &[])?
            .l()?;
        let path: String = env.get_string(&JString::from(path))?.into();
        Ok(PathBuf::from(path))
    }
}

impl PermissionChecker for AndroidHost {
    fn is_granted(&self, permission: &Permission) -> bool {
        // Before runtime permissions everything in the manifest is granted
        if self.sdk_version < RUNTIME_PERMISSIONS_SDK {
            return true;
        }
        match self.check_self_permission(permission) {
            Ok(granted) => granted,
            Err(e) => {
                log::warn!("Permission check for {} failed: {}", permission, e);
                false
            }
        }
    }
}

impl ActivityHost for AndroidHost {
    fn sdk_version(&self) -> u32 {
        self.sdk_version
    }

    fn request_permissions(
        &mut self,
        permissions: &[Permission],
        request_code: i32,
    ) -> Result<(), PickerError> {
        let mut env = self.vm.attach_current_thread()?;
        let array = env.new_object_array(
            permissions.len() as i32,
            "java/lang/String",
            JObject::null(),
        )?;
        for (i, permission) in permissions.iter().enumerate() {
            let name = env.new_string(permission.name())?;
            env.set_object_array_element(&array, i as i32, &name)?;
        }
        env.call_method(
            self.activity.as_obj(),
            "requestPermissions",
            "([Ljava/lang/String;I)V",
            &[JValue::Object(&array), JValue::Int(request_code)],
        )
        .map_err(|e| java_error(&mut env, "requestPermissions", e))?;
        Ok(())
    }

    fn launch(&mut self, intent: &PickIntent, request_code: i32) -> Result<(), PickerError> {
        let mut env = self.vm.attach_current_thread()?;
        let to_start = build_intent(&mut env, intent)?;
        env.call_method(
            self.activity.as_obj(),
            "startActivityForResult",
            "(Landroid/content/Intent;I)V",
            &[JValue::Object(&to_start), JValue::Int(request_code)],
        )
        .map_err(|e| java_error(&mut env, "startActivityForResult", e))?;
        Ok(())
    }

    fn allocate_capture_location(
        &mut self,
        directory: Option<&Path>,
        file_name: &str,
    ) -> Result<ImageLocation, PickerError> {
        let directory = match directory {
            Some(dir) => dir.to_path_buf(),
            None => self.public_dcim_directory()?,
        };
        prepare_capture_file(&directory, file_name)
    }

    fn show_permission_rationale(
        &mut self,
        text: &RationaleText,
        request_code: i32,
    ) -> Result<(), PickerError> {
        let mut env = self.vm.attach_current_thread()?;
        let title = env.new_string(&text.title)?;
        let message = env.new_string(&text.message)?;
        let continue_label = env.new_string(&text.continue_label)?;
        let try_again_label = env.new_string(&text.try_again_label)?;
        env.call_method(
            self.activity.as_obj(),
            "showPermissionRationale",
            "(ILjava/lang/String;Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)V",
            &[
                JValue::Int(request_code),
                JValue::Object(&title),
                JValue::Object(&message),
                JValue::Object(&continue_label),
                JValue::Object(&try_again_label),
            ],
        )
        .map_err(|e| java_error(&mut env, "showPermissionRationale", e))?;
        Ok(())
    }
}

/// Reads the payload of an intent delivered to `onActivityResult`.
/// A null intent (typical for camera captures) gives an empty payload.
pub fn result_data_from_intent(
    env: &mut JNIEnv,
    intent: &JObject,
) -> Result<ResultData, PickerError> {
    if intent.is_null() {
        return Ok(ResultData::default());
    }
    let uri = env
        .call_method(intent, "getData", "()Landroid/net/Uri;", &[])
        .map_err(|e| java_error(env, "getData", e))?
        .l()?;
    if uri.is_null() {
        return Ok(ResultData::default());
    }
    let text = env
        .call_method(&uri, "toString", "()Ljava/lang/String;", &[])?
        .l()?;
    let text: String = env.get_string(&JString::from(text))?.into();
    Ok(ResultData::with_data(ImageLocation::new(text)))
}

fn build_intent<'a>(env: &mut JNIEnv<'a>, intent: &PickIntent) -> Result<JObject<'a>, PickerError> {
    match intent {
        PickIntent::Gallery { mime_type } => new_pick_intent(env, mime_type),
        PickIntent::Chooser {
            title,
            mime_type,
            capture,
        } => {
            let pick = new_pick_intent(env, mime_type)?;

            let uri_cls = env.find_class("android/net/Uri")?;
            let uri_text = env.new_string(capture.output.as_str())?;
            let uri = env
                .call_static_method(
                    &uri_cls,
                    "parse",
                    "(Ljava/lang/String;)Landroid/net/Uri;",
                    &[JValue::Object(&uri_text)],
                )?
                .l()?;

            let take = new_intent(env, ACTION_IMAGE_CAPTURE)?;
            let extra = env.new_string(EXTRA_OUTPUT)?;
            env.call_method(
                &take,
                "putExtra",
                "(Ljava/lang/String;Landroid/os/Parcelable;)Landroid/content/Intent;",
                &[JValue::Object(&extra), JValue::Object(&uri)],
            )?;

            let intent_cls = env.find_class("android/content/Intent")?;
            let title = env.new_string(title)?;
            let chooser = env
                .call_static_method(
                    &intent_cls,
                    "createChooser",
                    "(Landroid/content/Intent;Ljava/lang/CharSequence;)Landroid/content/Intent;",
                    &[JValue::Object(&pick), JValue::Object(&title)],
                )
                .map_err(|e| java_error(env, "createChooser", e))?
                .l()?;

            let initial = env.new_object_array(1, &intent_cls, &take)?;
            let extra = env.new_string(EXTRA_INITIAL_INTENTS)?;
            env.call_method(
                &chooser,
                "putExtra",
                "(Ljava/lang/String;[Landroid/os/Parcelable;)Landroid/content/Intent;",
                &[JValue::Object(&extra), JValue::Object(&initial)],
            )?;
            Ok(chooser)
        }
    }
}

fn new_intent<'a>(env: &mut JNIEnv<'a>, action: &str) -> Result<JObject<'a>, PickerError> {
    let action = env.new_string(action)?;
    Ok(env.new_object(
        "android/content/Intent",
        "(Ljava/lang/String;)V",
        &[JValue::Object(&action)],
    )?)
}

fn new_pick_intent<'a>(env: &mut JNIEnv<'a>, mime_type: &str) -> Result<JObject<'a>, PickerError> {
    let pick = new_intent(env, ACTION_PICK)?;
    let mime = env.new_string(mime_type)?;
    env.call_method(
        &pick,
        "setType",
        "(Ljava/lang/String;)Landroid/content/Intent;",
        &[JValue::Object(&mime)],
    )?;
    Ok(pick)
}

fn read_sdk_version(env: &mut JNIEnv) -> Result<u32, PickerError> {
    let sdk = env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
        .i()?;
    Ok(sdk.max(0) as u32)
}

/// Clears a pending Java exception so later JNI calls keep working
fn java_error(env: &mut JNIEnv, call: &str, e: jni::errors::Error) -> PickerError {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    PickerError::Platform(format!("{} failed: {}", call, e))
}

fn get_app_class_loader<'a>(env: &mut JNIEnv<'a>) -> Result<JObject<'a>, PickerError> {
    let at_cls = env.find_class("android/app/ActivityThread")?;
    let at = env
        .call_static_method(
            &at_cls,
            "currentActivityThread",
            "()Landroid/app/ActivityThread;",
            &[],
        )
        .map_err(|e| java_error(env, "currentActivityThread", e))?
        .l()?;

    let app = env
        .call_method(&at, "getApplication", "()Landroid/app/Application;", &[])
        .map_err(|e| java_error(env, "getApplication", e))?
        .l()?;
    if app.is_null() {
        return Err(PickerError::Platform(
            "no application yet, activity not initialized?".to_string(),
        ));
    }

    Ok(env
        .call_method(&app, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .map_err(|e| java_error(env, "getClassLoader", e))?
        .l()?)
}

fn get_activity_instance<'a>(
    env: &mut JNIEnv<'a>,
    main_activity_class: &str,
) -> Result<JObject<'a>, PickerError> {
    // Application classes are only visible through the app class loader
    let loader = get_app_class_loader(env)?;
    let name = env.new_string(main_activity_class.replace('/', "."))?;
    let cls = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&name)],
        )
        .map_err(|e| java_error(env, "loadClass", e))?
        .l()?;
    let cls = JClass::from(cls);

    let signature = format!("()L{};", main_activity_class);
    let instance = match env.call_static_method(&cls, "getInstance", &signature, &[]) {
        Ok(value) => value.l()?,
        Err(e) => {
            let _ = java_error(env, "getInstance", e);
            env.get_static_field(&cls, "instance", format!("L{};", main_activity_class))
                .map_err(|e| java_error(env, "instance field", e))?
                .l()?
        }
    };

    if instance.is_null() {
        return Err(PickerError::Platform(format!(
            "{} instance is null, activity not initialized?",
            main_activity_class
        )));
    }
    Ok(instance)
}
