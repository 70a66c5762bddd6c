//! Curated transaction id list.

use indexmap::IndexSet;

/// Parse a newline-delimited id list.
///
/// Blank lines and lines starting with `#` are ignored. Surrounding
/// whitespace is trimmed and repeated ids are kept once, in first-seen order.
#[must_use]
pub fn parse_identifiers(content: &str) -> IndexSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        let ids = parse_identifiers("# purchases\nabc\n\n  def  \n#old\nabc\r\n");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["abc", "def"]);
    }

    #[test]
    fn empty_list_has_no_ids() {
        assert!(parse_identifiers("\n# nothing yet\n").is_empty());
    }
}
