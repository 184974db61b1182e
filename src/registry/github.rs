use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Release {
    name: Option<String>,
    tag_name: Option<String>,
}

/// Releases listing endpoint of the GitHub REST API.
pub fn releases_url(api_root: &str, owner: &str, repo: &str) -> String {
    format!("{}/repos/{}/{}/releases", api_root, owner, repo)
}

/// Name of the newest release in a releases listing body.
///
/// GitHub lists releases newest first. The release name is used, falling back to the
/// tag when the release was published without a name.
pub fn latest_release_name(body: &str) -> Option<String> {
    let releases: Vec<Release> = serde_json::from_str(body).ok()?;
    let latest = releases.into_iter().next()?;
    latest
        .name
        .filter(|n| !n.trim().is_empty())
        .or(latest.tag_name)
        .map(|n| n.trim().to_string())
}

/// Split an `owner/repo` name. Surrounding slashes are ignored.
pub fn split_spec(spec: &str) -> Option<(&str, &str)> {
    let (owner, repo) = spec.trim_matches('/').split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_release_name() {
        let body = r#"[
            {"name": "v0.19.1", "tag_name": "v0.19.1"},
            {"name": "v0.19.0", "tag_name": "v0.19.0"}
        ]"#;
        assert_eq!(latest_release_name(body), Some("v0.19.1".to_string()));
    }

    #[test]
    fn test_unnamed_release_falls_back_to_tag() {
        let body = r#"[{"name": "", "tag_name": "1.2.0"}]"#;
        assert_eq!(latest_release_name(body), Some("1.2.0".to_string()));

        let body = r#"[{"name": null, "tag_name": "1.3.0"}]"#;
        assert_eq!(latest_release_name(body), Some("1.3.0".to_string()));
    }

    #[test]
    fn test_no_releases() {
        assert_eq!(latest_release_name("[]"), None);
        assert_eq!(latest_release_name("not json"), None);
    }

    #[test]
    fn test_split_spec() {
        assert_eq!(
            split_spec("ManuelHentschel/vscDebugger/"),
            Some(("ManuelHentschel", "vscDebugger"))
        );
        assert_eq!(split_spec("vscDebugger"), None);
        assert_eq!(split_spec("a/b/c"), None);
        assert_eq!(split_spec("/repo"), None);
    }

    #[test]
    fn test_releases_url() {
        assert_eq!(
            releases_url("https://api.github.com", "o", "r"),
            "https://api.github.com/repos/o/r/releases"
        );
    }
}
