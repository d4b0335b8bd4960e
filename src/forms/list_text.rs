//! Mapping between list fields and the comma-separated text used to edit them.

pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        assert_eq!(split_list("go, concurrency"), vec!["go", "concurrency"]);
        assert_eq!(split_list(" docs ,book,, "), vec!["docs", "book"]);
        assert!(split_list("  ").is_empty());
    }

    #[test]
    fn join_then_split_is_identity() {
        let topics = vec!["HTML".to_string(), "CSS".to_string(), "Web APIs".to_string()];
        assert_eq!(join_list(&topics), "HTML, CSS, Web APIs");
        assert_eq!(split_list(&join_list(&topics)), topics);
    }
}
