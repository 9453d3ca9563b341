/// Cell counts printed with `'` between groups of three digits, e.g. `1'048'576`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NiceInt(usize);

impl NiceInt {
    pub fn from_usize(value: usize) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for NiceInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.to_string();
        let lead = match digits.len() % 3 {
            0 => 3,
            r => r,
        };
        f.write_str(&digits[..lead])?;
        for group in digits.as_bytes()[lead..].chunks(3) {
            f.write_str("'")?;
            // digits are ASCII
            f.write_str(std::str::from_utf8(group).map_err(|_| std::fmt::Error)?)?;
        }
        Ok(())
    }
}
