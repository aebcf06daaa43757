//! Template archive URL construction

/// Placeholder replaced by the template identifier (`owner/repo`)
pub const TEMPLATE_PLACEHOLDER: &str = "{template}";

/// Placeholder replaced by the branch name
pub const BRANCH_PLACEHOLDER: &str = "{branch}";

/// Build the archive URL for a template and branch
///
/// Substitutes the first `{template}` and then the first `{branch}` in
/// `pattern`. The identifier is not validated; an unreachable or malformed
/// template surfaces later as a download error.
pub fn build_archive_url(pattern: &str, template: &str, branch: &str) -> String {
    pattern
        .replacen(TEMPLATE_PLACEHOLDER, template, 1)
        .replacen(BRANCH_PLACEHOLDER, branch, 1)
}
