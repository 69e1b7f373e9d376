/// Id fragment marking a branch-pill placeholder in documents that predate the explicit flag.
pub const BRANCH_PILL_MARKER: &str = "-branch-pill-";

/// Id prefix of branch nodes created by the editor.
pub const BRANCH_ID_PREFIX: &str = "branch";

/// Label of newly inserted branch nodes.
pub const BRANCH_LABEL: &str = "Branch";

/// Length of generated id suffixes.
pub const ID_SUFFIX_LEN: usize = 8;

/// Arm labels of newly inserted branch nodes.
pub const DEFAULT_ARM_LABELS: [&str; 2] = ["Branch 1", "Branch 2"];
