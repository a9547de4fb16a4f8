use std::ffi::CString;

/// Formats a message, records it as the process abort message, logs it and
/// aborts. Reserved for contract violations that leave no sane way forward.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        $crate::abort_with_message(&::std::format!($($arg)*))
    };
}

pub fn abort_with_message(message: &str) -> ! {
    match CString::new(message) {
        Ok(message) => platform::set_abort_message(&message),
        Err(_) => platform::set_abort_message(c"failed to format error message"),
    }
    // The default logcat filter hides the backtrace that would otherwise show
    // the abort message.
    log::error!("{}", message);
    std::process::abort()
}

#[cfg(target_os = "android")]
mod platform {
    use std::ffi::{c_char, CStr};

    // bionic libc
    extern "C" {
        fn android_set_abort_message(msg: *const c_char);
    }

    pub fn set_abort_message(message: &CStr) {
        unsafe { android_set_abort_message(message.as_ptr()) }
    }
}

#[cfg(not(target_os = "android"))]
mod platform {
    use std::ffi::CStr;

    pub fn set_abort_message(message: &CStr) {
        eprintln!("{}", message.to_string_lossy());
    }
}
