/// Trims a raw field and keeps it only if something is left. The readers use
/// this so that whitespace-only cells count as missing.
pub fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::non_empty;

    #[test]
    fn whitespace_only_counts_as_missing() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty(" Anna "), Some("Anna".to_string()));
    }
}
