use regex::{NoExpand, RegexBuilder};

/// Replace the first whole-word, case-insensitive occurrence of `headword`
/// in `context` with `placeholder`.
///
/// Returns `None` when there is no context or the headword does not occur in
/// it as a whole word; callers fall back to asking the bare headword.
pub fn blank_out(context: Option<&str>, headword: &str, placeholder: &str) -> Option<String> {
    let context = context?;
    let headword = headword.trim();
    if headword.is_empty() {
        return None;
    }

    let pattern = format!(r"\b{}\b", regex::escape(headword));
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()?;

    if !re.is_match(context) {
        return None;
    }
    Some(re.replacen(context, 1, NoExpand(placeholder)).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blanks_whole_word() {
        let out = blank_out(Some("I eat an apple every day."), "apple", "_____");
        assert_eq!(out.as_deref(), Some("I eat an _____ every day."));
    }

    #[test]
    fn match_is_case_insensitive() {
        let out = blank_out(Some("Time flies when you are having fun."), "time", "_____");
        assert_eq!(out.as_deref(), Some("_____ flies when you are having fun."));
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let out = blank_out(Some("a car is a car"), "car", "__");
        assert_eq!(out.as_deref(), Some("a __ is a car"));
    }

    #[test]
    fn partial_word_does_not_match() {
        assert_eq!(blank_out(Some("Pineapple juice"), "apple", "_____"), None);
    }

    #[test]
    fn missing_context_falls_through() {
        assert_eq!(blank_out(None, "computer", "_____"), None);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let out = blank_out(Some("what is a.b here"), "a.b", "_");
        assert_eq!(out.as_deref(), Some("what is _ here"));
        assert_eq!(blank_out(Some("what is axb here"), "a.b", "_"), None);
    }

    #[test]
    fn placeholder_dollar_signs_are_not_expanded() {
        let out = blank_out(Some("buy a book"), "book", "$1");
        assert_eq!(out.as_deref(), Some("buy a $1"));
    }
}
