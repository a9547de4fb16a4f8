/// Adds two integers with two's-complement wrapping on overflow, matching
/// the `int` arithmetic of the Java caller.
pub fn add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}
