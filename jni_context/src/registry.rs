use std::ffi::c_void;

use jni::{
    signature::TypeSignature,
    sys::{jint, JNI_ERR, JNI_VERSION_1_6},
    JNIEnv, JavaVM,
};
use log::{debug, error};

use crate::{Error, JniContext, Result};

/// Single entry of a `RegisterNatives` table.
#[derive(Clone, Copy, Debug)]
pub struct NativeMethod {
    name: &'static str,
    signature: &'static str,
    fn_ptr: *mut c_void,
}

impl NativeMethod {
    pub fn new(name: &'static str, signature: &'static str, fn_ptr: *mut c_void) -> Self {
        Self {
            name,
            signature,
            fn_ptr,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn signature(&self) -> &'static str {
        self.signature
    }

    /// Checks the entry before it reaches the VM. `RegisterNatives` would
    /// otherwise fail with `NoSuchMethodError` and no hint which entry broke.
    pub fn validate(&self) -> Result<()> {
        let invalid = || Error::InvalidMethod {
            name: self.name.into(),
            signature: self.signature.into(),
        };
        if !is_java_identifier(self.name) || self.fn_ptr.is_null() {
            return Err(invalid());
        }
        TypeSignature::from_str(self.signature).map_err(|_| invalid())?;
        Ok(())
    }

    fn to_jni(self) -> jni::NativeMethod {
        jni::NativeMethod {
            name: self.name.into(),
            sig: self.signature.into(),
            fn_ptr: self.fn_ptr,
        }
    }
}

fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Builds a [`NativeMethod`] from a method name, JNI signature and
/// `extern "system"` function.
///
/// ```ignore
/// let methods = [native_method!("add", "(II)I", add)];
/// ```
#[macro_export]
macro_rules! native_method {
    ($name:expr, $signature:expr, $func:path) => {
        $crate::NativeMethod::new($name, $signature, $func as *mut ::std::ffi::c_void)
    };
}

/// Something native methods can be registered with. Implemented for
/// [`JNIEnv`]; tests provide their own.
pub trait NativeRegistry {
    fn register_natives(&mut self, class: &str, methods: &[NativeMethod]) -> Result<()>;
}

impl<'local> NativeRegistry for JNIEnv<'local> {
    fn register_natives(&mut self, class: &str, methods: &[NativeMethod]) -> Result<()> {
        // The pending NoClassDefFoundError is left for System.loadLibrary to
        // report.
        let jclass = self
            .find_class(class)
            .map_err(|_| Error::ClassNotFound(class.into()))?;
        let methods: Vec<jni::NativeMethod> =
            methods.iter().copied().map(NativeMethod::to_jni).collect();
        self.register_native_methods(&jclass, &methods)
            .map_err(|source| Error::Registration {
                class: class.into(),
                source,
            })
    }
}

/// Validates `methods` and registers them on `class`.
pub fn register_natives<R>(registry: &mut R, class: &str, methods: &[NativeMethod]) -> Result<()>
where
    R: NativeRegistry + ?Sized,
{
    for method in methods {
        method.validate()?;
    }
    registry.register_natives(class, methods)?;
    debug!("Registered {} native method(s) on {}", methods.len(), class);
    Ok(())
}

/// Registers `methods` and translates the outcome into the value expected
/// from `JNI_OnLoad`.
pub fn load<R>(registry: &mut R, class: &str, methods: &[NativeMethod]) -> jint
where
    R: NativeRegistry + ?Sized,
{
    match register_natives(registry, class, methods) {
        Ok(()) => JNI_VERSION_1_6,
        Err(err) => {
            error!("Unable to load natives for {}: {}", class, err);
            err.load_status()
        }
    }
}

/// Body of a sample's `JNI_OnLoad`: captures the VM into [`JniContext`] and
/// registers `methods` on `class`.
///
/// # Safety
///
/// `vm` must be the pointer the VM passed to `JNI_OnLoad`.
pub unsafe fn on_load(vm: *mut jni::sys::JavaVM, class: &str, methods: &[NativeMethod]) -> jint {
    let vm = match unsafe { JavaVM::from_raw(vm) } {
        Ok(vm) => vm,
        Err(err) => {
            error!("Invalid JavaVM: {}", err);
            return JNI_ERR;
        }
    };
    let context = JniContext::init(vm);
    let mut env = match context.java_vm().get_env() {
        Ok(env) => env,
        Err(err) => {
            error!("{}", Error::Env(err));
            return JNI_ERR;
        }
    };
    load(&mut env, class, methods)
}
