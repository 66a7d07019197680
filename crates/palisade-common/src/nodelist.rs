//! Node-list file parsing
//!
//! The node list is a plain text file, one managed node per line: the BMC
//! address first, then the cluster node name, whitespace separated. Blank
//! lines and lines whose first non-blank character is `#` are skipped.
//! Anything after the second field on a line is ignored.

use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::models::{NodeEntry, NodeTable};

/// Read and parse a node-list file
pub fn load(path: impl AsRef<Path>) -> Result<NodeTable, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::NodeListIo {
        path: path.display().to_string(),
        source,
    })?;
    parse(&text)
}

/// Parse node-list text into a table, rejecting malformed lines and
/// duplicate node names with the offending line number.
pub fn parse(text: &str) -> Result<NodeTable, Error> {
    let mut entries: Vec<NodeEntry> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (Some(ip), Some(name)) = (fields.next(), fields.next()) else {
            return Err(Error::MalformedLine { line: line_no });
        };

        if entries.iter().any(|entry| entry.name == name) {
            return Err(Error::DuplicateNode {
                name: name.to_string(),
                line: line_no,
            });
        }

        entries.push(NodeEntry::new(name, ip));
    }

    Ok(NodeTable::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_basic() {
        let table = parse("10.0.0.1 nodeA\n10.0.0.2 nodeB\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("nodeA").unwrap().ip, "10.0.0.1");
        assert_eq!(table.lookup("nodeB").unwrap().ip, "10.0.0.2");
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let text = "# BMC inventory\n\n   \t\n  # indented comment\n10.0.0.1\tnodeA\n";
        let table = parse(text).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("nodeA").unwrap().ip, "10.0.0.1");
    }

    #[test]
    fn test_parse_ignores_trailing_fields() {
        let table = parse("10.0.0.1 nodeA rack-3 spare\n").unwrap();
        assert_eq!(table.lookup("nodeA").unwrap().ip, "10.0.0.1");
    }

    #[test]
    fn test_parse_preserves_file_order() {
        let table = parse("10.0.0.3 c\n10.0.0.1 a\n10.0.0.2 b\n").unwrap();
        let names: Vec<&str> = table.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_parse_malformed_line() {
        let err = parse("10.0.0.1 nodeA\n10.0.0.2\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 2 }));
    }

    #[test]
    fn test_parse_duplicate_name() {
        let err = parse("10.0.0.1 nodeA\n10.0.0.2 nodeA\n").unwrap_err();
        match err {
            Error::DuplicateNode { name, line } => {
                assert_eq!(name, "nodeA");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# test inventory").unwrap();
        writeln!(file, "192.168.20.11 db-01").unwrap();
        writeln!(file, "192.168.20.12 db-02").unwrap();

        let table = load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("db-01").unwrap().ip, "192.168.20.11");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/bmclist.conf").unwrap_err();
        assert!(matches!(err, Error::NodeListIo { .. }));
        assert!(err.to_string().contains("/nonexistent/bmclist.conf"));
    }
}
