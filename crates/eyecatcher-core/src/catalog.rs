// Topic catalog parsing
//
// The catalog is a flat two-column CSV (topic name, image URL) with a header
// row, read-only at runtime. Rows group into topics preserving
// first-appearance order; image order within a topic is file order.

use eyecatcher_contracts::Topic;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog line {line}: expected two comma-separated columns")]
    MalformedLine { line: usize },
}

/// Parse catalog file contents into ordered topics.
///
/// The URL column is everything after the first comma, so image URLs may
/// themselves contain commas. Blank lines are skipped.
pub fn parse_catalog(contents: &str) -> Result<Vec<Topic>, CatalogError> {
    let mut topics: Vec<Topic> = Vec::new();

    // Skip the header row
    for (line_no, line) in contents.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let (name, url) = line
            .split_once(',')
            .ok_or(CatalogError::MalformedLine { line: line_no + 1 })?;
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() {
            return Err(CatalogError::MalformedLine { line: line_no + 1 });
        }

        match topics.iter_mut().find(|t| t.name == name) {
            Some(topic) => topic.images.push(url.to_string()),
            None => topics.push(Topic {
                name: name.to_string(),
                images: vec![url.to_string()],
            }),
        }
    }

    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_rows_by_topic_in_first_appearance_order() {
        let contents = "\
topicName,imageUrl
Shoes,https://cdn.example/shoes/1.jpg
Bags,https://cdn.example/bags/1.jpg
Shoes,https://cdn.example/shoes/2.jpg
";
        let topics = parse_catalog(contents).unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].name, "Shoes");
        assert_eq!(
            topics[0].images,
            vec![
                "https://cdn.example/shoes/1.jpg",
                "https://cdn.example/shoes/2.jpg"
            ]
        );
        assert_eq!(topics[1].name, "Bags");
    }

    #[test]
    fn header_only_file_yields_no_topics() {
        assert!(parse_catalog("topicName,imageUrl\n").unwrap().is_empty());
    }

    #[test]
    fn urls_keep_embedded_commas() {
        let contents = "topicName,imageUrl\nShoes,https://cdn.example/a,b.jpg\n";
        let topics = parse_catalog(contents).unwrap();
        assert_eq!(topics[0].images, vec!["https://cdn.example/a,b.jpg"]);
    }

    #[test]
    fn skips_blank_lines() {
        let contents = "topicName,imageUrl\n\nShoes,u1\n\n";
        let topics = parse_catalog(contents).unwrap();
        assert_eq!(topics.len(), 1);
    }

    #[test]
    fn rejects_single_column_rows() {
        let err = parse_catalog("topicName,imageUrl\njust-a-topic\n").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedLine { line: 2 }));
    }
}
