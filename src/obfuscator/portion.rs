//! Portion obfuscation: keep a prefix and/or suffix, mask the rest

use super::{repeat, Obfuscator};
use crate::domain::{FactoryError, Result};

/// Obfuscator that keeps parts of the text at the start and end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortionObfuscator {
    keep_at_start: usize,
    keep_at_end: usize,
    at_least_from_start: usize,
    at_least_from_end: usize,
    fixed_total_length: Option<usize>,
    fixed_length: Option<usize>,
    mask_char: char,
}

impl PortionObfuscator {
    pub(crate) fn obfuscate_text(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let length = chars.len();

        // at_least_from_end limits what the prefix may keep, at_least_from_start the suffix
        let from_start = self
            .keep_at_start
            .min(length.saturating_sub(self.at_least_from_end));
        let from_end = self
            .keep_at_end
            .min(length.saturating_sub(self.at_least_from_start));

        let (from_end, mask_count) = match self.fixed_total_length {
            // keeps may overlap when the text is shorter than both together
            Some(total) => (from_end, total - from_start - from_end),
            None => {
                let from_end = from_end.min(length - from_start);
                let masked = length - from_start - from_end;
                (from_end, self.fixed_length.unwrap_or(masked))
            }
        };

        let mut result = String::with_capacity(from_start + mask_count + from_end);
        result.extend(&chars[..from_start]);
        result.push_str(&repeat(self.mask_char, mask_count));
        result.extend(&chars[length - from_end..]);
        result
    }
}

/// Builder for portion obfuscators
///
/// # Examples
///
/// ```
/// use obfuscation_markers::obfuscator::Obfuscator;
///
/// let obfuscator = Obfuscator::portion()
///     .keep_at_end(4)
///     .with_mask_char('x')
///     .build()
///     .unwrap();
/// assert_eq!(obfuscator.obfuscate_text("1234567890"), "xxxxxx7890");
/// ```
#[derive(Debug, Clone)]
pub struct PortionBuilder {
    keep_at_start: usize,
    keep_at_end: usize,
    at_least_from_start: usize,
    at_least_from_end: usize,
    fixed_total_length: Option<usize>,
    fixed_length: Option<usize>,
    mask_char: char,
}

impl PortionBuilder {
    pub(crate) fn new() -> Self {
        Self {
            keep_at_start: 0,
            keep_at_end: 0,
            at_least_from_start: 0,
            at_least_from_end: 0,
            fixed_total_length: None,
            fixed_length: None,
            mask_char: '*',
        }
    }

    /// Number of characters to keep at the start
    pub fn keep_at_start(mut self, count: usize) -> Self {
        self.keep_at_start = count;
        self
    }

    /// Number of characters to keep at the end
    pub fn keep_at_end(mut self, count: usize) -> Self {
        self.keep_at_end = count;
        self
    }

    /// Minimum number of characters from the start that are always masked
    pub fn at_least_from_start(mut self, count: usize) -> Self {
        self.at_least_from_start = count;
        self
    }

    /// Minimum number of characters from the end that are always masked
    pub fn at_least_from_end(mut self, count: usize) -> Self {
        self.at_least_from_end = count;
        self
    }

    /// Fixed total length of the obfuscated text, `None` to follow the input length
    pub fn with_fixed_total_length(mut self, length: Option<usize>) -> Self {
        self.fixed_total_length = length;
        self
    }

    /// Fixed number of mask characters, `None` to follow the input length
    ///
    /// Ignored when a fixed total length is set.
    #[deprecated(note = "the output length still leaks the input length; use with_fixed_total_length")]
    pub fn with_fixed_length(mut self, length: Option<usize>) -> Self {
        self.fixed_length = length;
        self
    }

    /// Character used for masking
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Builds the obfuscator
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::InvalidMarker`] if a fixed total length is smaller
    /// than the number of characters kept at the start and end combined.
    pub fn build(self) -> Result<Obfuscator> {
        if let Some(total) = self.fixed_total_length {
            let kept = self.keep_at_start + self.keep_at_end;
            if total < kept {
                return Err(FactoryError::InvalidMarker(format!(
                    "fixed total length {total} is smaller than keep_at_start + keep_at_end ({kept})"
                )));
            }
        }

        Ok(Obfuscator::from_portion(PortionObfuscator {
            keep_at_start: self.keep_at_start,
            keep_at_end: self.keep_at_end,
            at_least_from_start: self.at_least_from_start,
            at_least_from_end: self.at_least_from_end,
            // the total length supersedes the mask count
            fixed_length: self.fixed_total_length.map_or(self.fixed_length, |_| None),
            fixed_total_length: self.fixed_total_length,
            mask_char: self.mask_char,
        }))
    }
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_at_start_and_end() {
        let obfuscator = Obfuscator::portion()
            .keep_at_start(2)
            .keep_at_end(2)
            .build()
            .unwrap();
        assert_eq!(obfuscator.obfuscate_text("abcdefgh"), "ab****gh");
        assert_eq!(obfuscator.obfuscate_text("abc"), "abc");
        assert_eq!(obfuscator.obfuscate_text(""), "");
    }

    #[test]
    fn test_at_least_from_end_limits_prefix() {
        let obfuscator = Obfuscator::portion()
            .keep_at_start(4)
            .at_least_from_end(4)
            .build()
            .unwrap();
        assert_eq!(obfuscator.obfuscate_text("1234567890"), "1234******");
        assert_eq!(obfuscator.obfuscate_text("123456"), "12****");
    }

    #[test]
    fn test_at_least_from_start_limits_suffix() {
        let obfuscator = Obfuscator::portion()
            .keep_at_end(4)
            .at_least_from_start(3)
            .build()
            .unwrap();
        assert_eq!(obfuscator.obfuscate_text("12345"), "***45");
    }

    #[test]
    fn test_fixed_total_length() {
        let obfuscator = Obfuscator::portion()
            .keep_at_start(2)
            .keep_at_end(2)
            .with_fixed_total_length(Some(8))
            .with_mask_char('x')
            .build()
            .unwrap();
        assert_eq!(obfuscator.obfuscate_text("abcdefghijkl"), "abxxxxkl");
        assert_eq!(obfuscator.obfuscate_text("abc"), "abxxxxbc");
    }

    #[test]
    fn test_fixed_total_length_too_small() {
        let result = Obfuscator::portion()
            .keep_at_start(4)
            .keep_at_end(4)
            .with_fixed_total_length(Some(7))
            .build();
        assert!(matches!(result, Err(FactoryError::InvalidMarker(_))));
    }

    #[test]
    fn test_deprecated_fixed_length() {
        let obfuscator = Obfuscator::portion()
            .keep_at_start(1)
            .with_fixed_length(Some(3))
            .build()
            .unwrap();
        assert_eq!(obfuscator.obfuscate_text("abcdefgh"), "a***");
    }

    #[test]
    fn test_fixed_total_length_supersedes_fixed_length() {
        let both = Obfuscator::portion()
            .with_fixed_length(Some(3))
            .with_fixed_total_length(Some(5))
            .build()
            .unwrap();
        let total_only = Obfuscator::portion()
            .with_fixed_total_length(Some(5))
            .build()
            .unwrap();
        assert_eq!(both, total_only);
        assert_eq!(both.obfuscate_text("ab"), "*****");
    }
}
