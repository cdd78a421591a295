//! Fixed-heuristic token estimator.

/// Estimate the LLM token count of `text`: character count divided by four,
/// rounded up. Not a real tokenizer; deterministic and monotonic in text
/// length, and callers must treat it as an approximation only.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarters_rounded_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // four multibyte characters are still one token
        assert_eq!(estimate_tokens("日本語字"), 1);
    }

    #[test]
    fn monotonic_in_length() {
        let mut text = String::new();
        let mut last = 0;
        for _ in 0..64 {
            text.push('x');
            let estimate = estimate_tokens(&text);
            assert!(estimate >= last);
            last = estimate;
        }
    }
}
