/// Estimates the token count of `text` without a vendor tokenizer.
///
/// Takes the larger of two rules of thumb for BPE tokenizers on English
/// prose: ~4 characters per token and ~0.75 words per token.
pub fn estimate_tokens(text: &str) -> usize {
    let by_chars = text.chars().count().div_ceil(4);
    let by_words = (text.split_whitespace().count() * 4).div_ceil(3);
    by_chars.max(by_words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_zero_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("   "), 1);
    }

    #[test]
    fn test_long_words_count_by_characters() {
        // 40 chars, 1 word
        assert_eq!(estimate_tokens(&"a".repeat(40)), 10);
    }

    #[test]
    fn test_short_words_count_by_words() {
        // "a b c d e f" = 11 chars (3 tokens) but 6 words (8 tokens)
        assert_eq!(estimate_tokens("a b c d e f"), 8);
    }

    #[test]
    fn test_multibyte_characters_counted_once() {
        assert_eq!(estimate_tokens("résumé"), 2);
    }
}
