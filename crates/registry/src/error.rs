use core::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// A live record is already stored under this poll ID.
    DuplicateKey,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DuplicateKey => "A review is already tracked for this poll.",
        })
    }
}

pub type Result<T> = core::result::Result<T, Error>;
