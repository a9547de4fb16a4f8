use jni::{
    errors::JniError,
    sys::{jint, JNI_ERR},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// `JNI_OnLoad` has not run for this library yet.
    #[error("JNI_OnLoad was not called. Make sure to load the library using 'System.loadLibrary'.")]
    NotInitialized,
    #[error("unable to obtain JNIEnv: {0}")]
    Env(#[source] jni::errors::Error),
    #[error("class {0} not found")]
    ClassNotFound(String),
    #[error("invalid native method {name}{signature}")]
    InvalidMethod { name: String, signature: String },
    #[error("RegisterNatives failed for {class}: {source}")]
    Registration {
        class: String,
        #[source]
        source: jni::errors::Error,
    },
    #[error(transparent)]
    Jni(#[from] jni::errors::Error),
}

impl Error {
    /// Value `JNI_OnLoad` should return when loading failed with this error.
    ///
    /// Registration failures keep the code reported by `RegisterNatives`,
    /// everything else is `JNI_ERR`.
    pub fn load_status(&self) -> jint {
        match self {
            Error::Registration {
                source: jni::errors::Error::JniCall(err),
                ..
            } => jni_error_code(err),
            _ => JNI_ERR,
        }
    }
}

fn jni_error_code(err: &JniError) -> jint {
    use jni::sys::{JNI_EDETACHED, JNI_EEXIST, JNI_EINVAL, JNI_ENOMEM, JNI_EVERSION};
    match err {
        JniError::Unknown => JNI_ERR,
        JniError::ThreadDetached => JNI_EDETACHED,
        JniError::WrongVersion => JNI_EVERSION,
        JniError::NoMemory => JNI_ENOMEM,
        JniError::AlreadyCreated => JNI_EEXIST,
        JniError::InvalidArguments => JNI_EINVAL,
        JniError::Other(code) => *code,
        #[allow(unreachable_patterns)]
        _ => JNI_ERR,
    }
}
