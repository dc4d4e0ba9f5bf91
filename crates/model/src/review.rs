use crate::ChatId;
use alloc::string::String;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Document,
    Photo,
    Video,
    Audio,
    VoiceNote,
    Unknown,
}

impl ArtifactKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Photo => "Photo",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::VoiceNote => "Voice Note",
            Self::Unknown => "Unknown Type",
        }
    }
}

/// One uploaded piece of content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    /// Platform handle for re-fetching the content. Empty for [`ArtifactKind::Unknown`].
    pub file_id: String,
    pub name: String,
}

impl Artifact {
    pub const fn is_known(&self) -> bool {
        !matches!(self.kind, ArtifactKind::Unknown)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uploader {
    pub id: u64,
    pub name: String,
}

/// Pending review attached to one open poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRecord {
    pub artifact: Artifact,
    pub uploader: Uploader,
    /// Chat in which the poll lives.
    pub chat: ChatId,
}
