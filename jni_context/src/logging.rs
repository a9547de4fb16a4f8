use std::{fmt::Display, panic::Location};

/// Routes the `log` facade to logcat under `tag`. Safe to call repeatedly;
/// only the first call has effect.
#[cfg(target_os = "android")]
pub fn init_logging(tag: &str) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_min_level(log::Level::Debug)
            .with_tag(tag),
    );
}

#[cfg(not(target_os = "android"))]
pub fn init_logging(_tag: &str) {
    // Fails when a logger is already installed, which is fine.
    simple_logger::init_with_level(log::Level::Debug).ok();
}

/// Log-and-continue for results whose failure only affects the current
/// operation (a skipped frame, a stream that fails to stop).
pub trait OkLog<T> {
    fn ok_log(self) -> Option<T>;
}

impl<T, E> OkLog<T> for std::result::Result<T, E>
where
    E: Display,
{
    #[track_caller]
    fn ok_log(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                let location = Location::caller();
                log::error!(
                    "Unexpected error {} at {}:{}",
                    err,
                    location.file(),
                    location.line()
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OkLog;

    #[test]
    fn test_ok_log() {
        assert_eq!(Ok::<_, String>(3).ok_log(), Some(3));
        assert_eq!(Err::<i32, _>("broken").ok_log(), None);
    }
}
