use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a valid EPUB archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("missing container.xml (META-INF/container.xml not found)")]
    MissingContainer,
    #[error("cannot find rootfile in container.xml")]
    MissingRootfile,
    #[error("cannot read OPF at {0}")]
    UnreadableOpf(String),
}
