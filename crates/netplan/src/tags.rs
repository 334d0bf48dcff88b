/// Tag every provisioned instance carries, ahead of any user tags.
pub const BASELINE_TAG: &str = "docker-machine";

/// Prepend the baseline tag to the comma-separated user tags.
///
/// Elements are neither trimmed nor filtered: `"a,,b"` yields an empty tag,
/// and a user tag equal to the baseline is kept after the leading one.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    let mut tags = vec![BASELINE_TAG.to_string()];
    if !raw.is_empty() {
        tags.extend(raw.split(',').map(str::to_string));
    }
    tags
}
