use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read node list {path}: {source}")]
    NodeListIo {
        path: String,
        source: std::io::Error,
    },

    #[error("node list line {line}: expected '<ip> <node name>'")]
    MalformedLine { line: usize },

    #[error("node list line {line}: duplicate node name {name}")]
    DuplicateNode { name: String, line: usize },
}
