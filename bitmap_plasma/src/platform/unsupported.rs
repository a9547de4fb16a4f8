use jni::{objects::JObject, JNIEnv};

use crate::{BitmapInfo, Error, Result};

pub(crate) fn with_rgb565_pixels<F>(_env: &mut JNIEnv, _bitmap: &JObject, _f: F) -> Result<()>
where
    F: FnOnce(&mut [u8], &BitmapInfo),
{
    Err(Error::Unsupported)
}
