use std::fmt;

/// Label applied from a git-flow style branch prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchLabel {
    Feature,
    Bugfix,
    Release,
    Hotfix,
    Support,
}

impl BranchLabel {
    /// Vocabulary in match order.
    pub const ALL: [BranchLabel; 5] = [
        BranchLabel::Feature,
        BranchLabel::Bugfix,
        BranchLabel::Release,
        BranchLabel::Hotfix,
        BranchLabel::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BranchLabel::Feature => "feature",
            BranchLabel::Bugfix => "bugfix",
            BranchLabel::Release => "release",
            BranchLabel::Hotfix => "hotfix",
            BranchLabel::Support => "support",
        }
    }

    /// First label whose `<prefix>/` starts `branch`.
    pub fn classify(branch: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| {
            branch
                .strip_prefix(label.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

impl fmt::Display for BranchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
