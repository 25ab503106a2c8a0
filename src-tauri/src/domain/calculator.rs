//! Integer arithmetic exposed to the front-end for command round-trip timing.
//!
//! All operations are on `i32`. Overflow and division by zero are errors
//! rather than panics or silent wraparound.

use crate::domain::DomainError;

fn overflow(op: &str, a: i32, b: i32) -> DomainError {
    DomainError::Arithmetic(format!("{} of {} and {} overflows i32", op, a, b))
}

pub fn sum(a: i32, b: i32) -> Result<i32, DomainError> {
    a.checked_add(b).ok_or_else(|| overflow("sum", a, b))
}

pub fn subtract(a: i32, b: i32) -> Result<i32, DomainError> {
    a.checked_sub(b).ok_or_else(|| overflow("difference", a, b))
}

pub fn multiply(a: i32, b: i32) -> Result<i32, DomainError> {
    a.checked_mul(b).ok_or_else(|| overflow("product", a, b))
}

/// Integer division truncating toward zero.
pub fn divide(a: i32, b: i32) -> Result<i32, DomainError> {
    if b == 0 {
        return Err(DomainError::Arithmetic(format!("division of {} by zero", a)));
    }
    a.checked_div(b).ok_or_else(|| overflow("quotient", a, b))
}

/// Sum of `0..iterations`, accumulated one step at a time so the call does
/// measurable work. Wraps on overflow; non-positive counts yield 0.
pub fn stress_test(iterations: i32) -> i32 {
    (0..iterations.max(0)).fold(0i32, |acc, i| acc.wrapping_add(i))
}
