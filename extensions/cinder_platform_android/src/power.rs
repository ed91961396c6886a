//! JNI-backed power manager
//!
//! Looks up `android.os.PowerManager` through the activity's
//! `getSystemService` and drives `PowerManager.WakeLock` objects.

use std::sync::Arc;

use android_activity::AndroidApp;
use jni::objects::{GlobalRef, JObject, JValue};
use jni::{JNIEnv, JavaVM};

use cinder_platform::{
    PlatformError, PowerService, Result, WakeLock, WakeLockRequest, POWER_SERVICE,
};

fn ffi_error(e: jni::errors::Error) -> PlatformError {
    PlatformError::Ffi(e.to_string())
}

/// Clear a pending Java exception so the next JNI call is legal
fn clear_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}

fn checked<T>(env: &mut JNIEnv, result: jni::errors::Result<T>) -> Result<T> {
    result.map_err(|e| {
        clear_exception(env);
        ffi_error(e)
    })
}

/// Power service bound to the hosting activity
pub struct JniPowerService {
    vm: Arc<JavaVM>,
    activity: GlobalRef,
}

impl JniPowerService {
    pub fn from_app(app: &AndroidApp) -> Result<Self> {
        // SAFETY: android-activity hands out the process JavaVM pointer
        let vm = unsafe { JavaVM::from_raw(app.vm_as_ptr() as *mut jni::sys::JavaVM) }
            .map_err(|e| PlatformError::InitFailed(format!("Invalid JavaVM: {}", e)))?;

        let activity = {
            let mut env = vm.attach_current_thread_permanently().map_err(ffi_error)?;
            // SAFETY: the activity object outlives the AndroidApp; we promote
            // it to a global reference before using it further
            let activity = unsafe { JObject::from_raw(app.activity_as_ptr() as jni::sys::jobject) };
            env.new_global_ref(&activity).map_err(ffi_error)?
        };

        Ok(Self {
            vm: Arc::new(vm),
            activity,
        })
    }

    fn env(&self) -> Result<JNIEnv<'_>> {
        self.vm
            .attach_current_thread_permanently()
            .map_err(ffi_error)
    }

    /// `Context.getSystemService(POWER_SERVICE)`
    fn power_manager<'local>(&self, env: &mut JNIEnv<'local>) -> Result<JObject<'local>> {
        let service_name = env.new_string(POWER_SERVICE).map_err(ffi_error)?;
        let manager = env
            .call_method(
                &self.activity,
                "getSystemService",
                "(Ljava/lang/String;)Ljava/lang/Object;",
                &[JValue::Object(&service_name)],
            )
            .and_then(|value| value.l());

        match manager {
            Ok(manager) if !manager.is_null() => Ok(manager),
            Ok(_) => Err(PlatformError::ResourceUnavailable(format!(
                "getSystemService(\"{}\") returned null",
                POWER_SERVICE
            ))),
            Err(e) => {
                clear_exception(env);
                Err(PlatformError::ResourceUnavailable(e.to_string()))
            }
        }
    }
}

impl PowerService for JniPowerService {
    type Lock = JniWakeLock;

    fn new_wake_lock(&self, request: &WakeLockRequest) -> Result<JniWakeLock> {
        let mut env = self.env()?;
        let manager = self.power_manager(&mut env)?;

        let tag = env.new_string(&request.tag).map_err(ffi_error)?;
        let lock = env
            .call_method(
                &manager,
                "newWakeLock",
                "(ILjava/lang/String;)Landroid/os/PowerManager$WakeLock;",
                &[JValue::Int(request.flags.bits()), JValue::Object(&tag)],
            )
            .and_then(|value| value.l());
        let lock = checked(&mut env, lock)?;
        if lock.is_null() {
            return Err(PlatformError::ResourceUnavailable(
                "PowerManager.newWakeLock returned null".to_string(),
            ));
        }

        let lock = env.new_global_ref(&lock).map_err(ffi_error)?;
        tracing::debug!(
            "Created wake-lock '{}' with flags {:#x}",
            request.tag,
            request.flags.bits()
        );

        Ok(JniWakeLock {
            vm: Arc::clone(&self.vm),
            lock,
            tag: request.tag.clone(),
            held: false,
        })
    }
}

/// `PowerManager.WakeLock` held through a global reference
pub struct JniWakeLock {
    vm: Arc<JavaVM>,
    lock: GlobalRef,
    tag: String,
    held: bool,
}

impl JniWakeLock {
    fn call_void(&self, method: &str) -> Result<()> {
        let mut env = self
            .vm
            .attach_current_thread_permanently()
            .map_err(ffi_error)?;
        let result = env.call_method(&self.lock, method, "()V", &[]).map(|_| ());
        checked(&mut env, result)
    }
}

impl WakeLock for JniWakeLock {
    fn acquire(&mut self) -> Result<()> {
        self.call_void("acquire")?;
        self.held = true;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        if !self.held {
            return Err(PlatformError::WakeLockNotHeld(self.tag.clone()));
        }
        // Held flag clears even if Java throws: the lock is unusable either way
        self.held = false;
        self.call_void("release")
    }

    fn is_held(&self) -> bool {
        self.held
    }

    fn tag(&self) -> &str {
        &self.tag
    }
}
