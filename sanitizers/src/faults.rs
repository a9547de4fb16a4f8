//! Code that is wrong on purpose, for demonstrating sanitizers.

#[cfg(feature = "fault-injection")]
pub(crate) fn trigger() {
    use std::hint::black_box;

    // Use-after-free, caught by ASan and HWASan.
    let foo = Box::into_raw(Box::new(3i32));
    unsafe {
        drop(Box::from_raw(foo));
        black_box(foo).write(4);
    }

    // Signed overflow. Panics when overflow checks are on, wraps otherwise.
    let k = black_box(i32::MAX);
    black_box(k + 1);
}

#[cfg(not(feature = "fault-injection"))]
pub(crate) fn trigger() {}
