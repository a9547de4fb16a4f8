use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("AndroidBitmap_getInfo failed ({0})")]
    BitmapInfo(i32),
    #[error("bitmap format is not RGB_565 (format {0})")]
    UnsupportedFormat(i32),
    #[error("AndroidBitmap_lockPixels failed ({0})")]
    LockPixels(i32),
    #[error("bitmaps are not available on this platform")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, Error>;
