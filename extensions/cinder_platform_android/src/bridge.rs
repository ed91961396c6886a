//! Native-callable hooks
//!
//! The engine reaches the shim through a plain C symbol, and Java code can
//! declare `native void helloCinder()` on `AndroidCinderActivity`; both end
//! up in [`cinder_platform::hello_cinder`].

/// C ABI entry point exported as `helloCinder`
#[export_name = "helloCinder"]
pub extern "C" fn hello_cinder_native() {
    cinder_platform::hello_cinder();
}

/// JNI export for `org.libcinder.android.AndroidCinderActivity.helloCinder()`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_org_libcinder_android_AndroidCinderActivity_helloCinder(
    _env: jni::JNIEnv,
    _this: jni::objects::JObject,
) {
    cinder_platform::hello_cinder();
}
