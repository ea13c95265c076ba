//! Small text helpers shared by the segmenter and the renderers.

/// Number of spaces a tab expands to in code listings.
pub const TAB_WIDTH: usize = 3;

/// Collapses every whitespace run to a single space and trims both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replaces each tab with [`TAB_WIDTH`] spaces.
pub fn expand_tabs(s: &str) -> String {
    s.replace('\t', &" ".repeat(TAB_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Title", "Title")]
    #[case("  spaced   out\ttitle  ", "spaced out title")]
    #[case("", "")]
    #[case(" \t ", "")]
    fn test_collapses_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(collapse_whitespace(input), expected);
    }

    #[test]
    fn test_expands_tabs_to_three_spaces() {
        assert_eq!(expand_tabs("\tif x {\n\t\ty();"), "   if x {\n      y();");
    }
}
