use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{operation} failed (media status {status})")]
    AMidi {
        operation: &'static str,
        status: i32,
    },
    #[error("native MIDI is not available on this platform")]
    Unsupported,
    #[error("unable to spawn MIDI reader: {0}")]
    Spawn(#[from] std::io::Error),
    #[error(transparent)]
    Context(#[from] ndk_samples_jni_context::Error),
    #[error(transparent)]
    Jni(#[from] jni::errors::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
