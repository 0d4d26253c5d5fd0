use funty::Integral;

pub fn div_ceil<T: Integral>(lhs: T, rhs: T) -> T {
    let d = lhs / rhs;
    let r = lhs % rhs;
    if (r > T::ZERO && rhs > T::ZERO) || (r < T::ZERO && rhs < T::ZERO) {
        d + T::ONE
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::div_ceil;

    #[test]
    fn rounds_up() {
        assert_eq!(div_ceil(0usize, 4), 0);
        assert_eq!(div_ceil(1usize, 4), 1);
        assert_eq!(div_ceil(4usize, 4), 1);
        assert_eq!(div_ceil(5u32, 4), 2);
        assert_eq!(div_ceil(-5i32, 4), -1);
    }
}
