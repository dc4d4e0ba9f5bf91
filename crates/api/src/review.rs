use core::fmt::{self, Display};
use model::{telegram::User, ArtifactKind, ReviewRecord};

pub const QUESTION: &str = "What do you want to do with this file?";
pub const OPTIONS: [&str; 3] = ["Review", "Approve", "Reject"];
pub const RETRACTED: &str = "Retracted Vote";

/// Outcome of one vote on a tracked review poll.
#[derive(Debug, PartialEq, Eq)]
pub struct ActionSummary {
    pub file_name: String,
    pub file_kind: ArtifactKind,
    pub voter_id: u64,
    pub voter_name: String,
    pub action: String,
}

impl ActionSummary {
    pub fn new(record: &ReviewRecord, voter: &User, selected: &[usize]) -> Self {
        Self {
            file_name: record.artifact.name.clone(),
            file_kind: record.artifact.kind,
            voter_id: voter.id,
            voter_name: voter.display_name().into(),
            action: action(selected),
        }
    }
}

impl Display for ActionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { file_name, file_kind, voter_id, voter_name, action } = self;
        write!(f, "{voter_name} (ID: {voter_id}) chose [{action}] for {file_name} ({})", file_kind.as_str())
    }
}

/// Joins the labels of the selected options. Indices outside the review vocabulary are ignored.
pub fn action(selected: &[usize]) -> String {
    let labels: Vec<_> = selected.iter().filter_map(|&index| OPTIONS.get(index).copied()).collect();
    if labels.is_empty() {
        String::from(RETRACTED)
    } else {
        labels.join(", ")
    }
}
