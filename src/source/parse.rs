//! Remote source descriptor parsing
//!
//! Maps GitHub shorthands and Git URLs (HTTPS, SSH, `git://`, `file://`)
//! to a normalized host/org/repo triple plus a clone URL. Descriptors that
//! cannot produce an org/repo pair are hard failures, never fallbacks.

use regex::Regex;
use url::Url;

use crate::config::types::{GitSpec, GithubSpec};
use crate::error::{Error, Result};

/// Which cache namespace a remote belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Github,
    Git,
}

/// A fully parsed remote repository descriptor.
#[derive(Debug, Clone)]
pub struct RemoteRepo {
    pub provider: Provider,
    pub host: String,
    pub org: String,
    pub repo: String,
    /// URL handed to the clone machinery.
    pub url: String,
    /// Pinned revision, if any.
    pub reference: Option<String>,
    /// Subdirectory within the checkout, if any.
    pub directory: Option<String>,
    /// Staleness threshold override, in seconds.
    pub update_threshold: Option<u64>,
}

fn parse_error(source: &str, message: impl Into<String>) -> Error {
    Error::SourceResolveError { source_name: source.to_string(), message: message.into() }
}

/// Determines if a string represents a git repository URL.
///
/// Supports:
/// - HTTPS URLs: https://github.com/user/repo
/// - Git URLs: git://github.com/user/repo
/// - SSH URLs: git@github.com:user/repo
/// - SSH URLs with explicit protocol: ssh://git@github.com/user/repo
/// - Local file URLs: file:///path/to/repo
pub fn is_git_url(s: &str) -> bool {
    if let Ok(url) = Url::parse(s) {
        return matches!(url.scheme(), "http" | "https" | "git" | "ssh" | "file");
    }
    is_scp_like(s)
}

/// Check for SSH scp-style format: git@host:org/repo
fn is_scp_like(s: &str) -> bool {
    if !s.contains('@') || !s.contains(':') || s.contains("://") {
        return false;
    }
    let Some(at_pos) = s.find('@') else { return false };
    let Some(colon_pos) = s.rfind(':') else { return false };
    if colon_pos <= at_pos {
        return false;
    }
    let user_part = &s[..at_pos];
    let host_part = &s[at_pos + 1..colon_pos];
    let path_part = &s[colon_pos + 1..];
    !user_part.is_empty()
        && !host_part.is_empty()
        && !path_part.is_empty()
        && host_part.contains('.')
        && path_part.contains('/')
}

/// Extracts `(host, org, repo)` from a git URL in any supported form.
pub fn split_git_url(url_str: &str) -> Result<(String, String, String)> {
    // scp-style SSH has no scheme and must be split manually
    if is_scp_like(url_str) {
        let at_pos = url_str.find('@').unwrap_or(0);
        let colon_pos = url_str.rfind(':').unwrap_or(0);
        let host = url_str[at_pos + 1..colon_pos].to_string();
        let path = &url_str[colon_pos + 1..];
        let (org, repo) = split_org_repo(url_str, path)?;
        return Ok((host, org, repo));
    }

    let url = Url::parse(url_str)
        .map_err(|e| parse_error(url_str, format!("not a valid URL: {e}")))?;
    let host = url.host_str().unwrap_or("local").to_string();
    let (org, repo) = split_org_repo(url_str, url.path())?;
    Ok((host, org, repo))
}

/// Takes the final two path segments as org and repo.
fn split_org_repo(source: &str, path: &str) -> Result<(String, String)> {
    let segments: Vec<&str> =
        path.split('/').filter(|segment| !segment.is_empty()).collect();
    if segments.len() < 2 {
        return Err(parse_error(source, "cannot determine org and repo from URL path"));
    }
    let repo = segments[segments.len() - 1].trim_end_matches(".git");
    let org = segments[segments.len() - 2];
    if repo.is_empty() || org.is_empty() {
        return Err(parse_error(source, "cannot determine org and repo from URL path"));
    }
    Ok((org.to_string(), repo.to_string()))
}

/// Parses the `org/repo[#ref]` GitHub shorthand.
fn parse_github_shorthand(shorthand: &str) -> Result<(String, String, Option<String>)> {
    let re = Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)(?:#(.+))?$")
        .map_err(|e| Error::Other(anyhow::anyhow!("invalid shorthand pattern: {e}")))?;
    let captures = re
        .captures(shorthand)
        .ok_or_else(|| parse_error(shorthand, "expected 'org/repo' or 'org/repo#ref'"))?;
    let org = captures[1].to_string();
    let repo = captures[2].trim_end_matches(".git").to_string();
    let reference = captures.get(3).map(|m| m.as_str().to_string());
    Ok((org, repo, reference))
}

/// Parses a GitHub source spec into a remote descriptor.
pub fn parse_github(spec: &GithubSpec) -> Result<RemoteRepo> {
    match spec {
        GithubSpec::Shorthand(shorthand) => {
            let (org, repo, reference) = parse_github_shorthand(shorthand)?;
            Ok(RemoteRepo {
                provider: Provider::Github,
                host: "github.com".to_string(),
                url: format!("https://github.com/{org}/{repo}.git"),
                org,
                repo,
                reference,
                directory: None,
                update_threshold: None,
            })
        }
        GithubSpec::Detailed(details) => {
            let (org, repo, url, mut reference) = match (&details.name, &details.url) {
                (Some(name), None) => {
                    let (org, repo, reference) = parse_github_shorthand(name)?;
                    let url = format!("https://github.com/{org}/{repo}.git");
                    (org, repo, url, reference)
                }
                (None, Some(url)) => {
                    let (_, org, repo) = split_git_url(url)?;
                    (org, repo, url.clone(), None)
                }
                _ => {
                    return Err(parse_error(
                        "github",
                        "a github source requires exactly one of 'name' or 'url'",
                    ))
                }
            };
            if details.reference.is_some() {
                reference = details.reference.clone();
            }
            Ok(RemoteRepo {
                provider: Provider::Github,
                host: "github.com".to_string(),
                org,
                repo,
                url,
                reference,
                directory: details.directory.clone(),
                update_threshold: None,
            })
        }
    }
}

/// Parses a generic Git source spec into a remote descriptor.
pub fn parse_git(spec: &GitSpec) -> Result<RemoteRepo> {
    let (url, reference, directory, update_threshold) = match spec {
        GitSpec::Url(url) => (url.clone(), None, None, None),
        GitSpec::Detailed(details) => (
            details.url.clone(),
            details.reference.clone(),
            details.directory.clone(),
            details.update_threshold,
        ),
    };
    let (host, org, repo) = split_git_url(&url)?;
    Ok(RemoteRepo {
        provider: Provider::Git,
        host,
        org,
        repo,
        url,
        reference,
        directory,
        update_threshold,
    })
}

/// Parses a bare string source already classified as remote by [`is_git_url`].
pub fn parse_plain_remote(url: &str) -> Result<RemoteRepo> {
    parse_git(&GitSpec::Url(url.to_string()))
}

/// Expands a repository reference as accepted by repository features:
/// `org/repo[#ref]` shorthand, HTTPS, SSH, or `file://` URL.
///
/// # Returns
/// * `(clone_url, reference)` - the reference comes from the `#ref` suffix
///   when the shorthand form is used
pub fn expand_repository_url(input: &str) -> Result<(String, Option<String>)> {
    if is_git_url(input) {
        return Ok((input.to_string(), None));
    }
    let (org, repo, reference) = parse_github_shorthand(input)?;
    Ok((format!("https://github.com/{org}/{repo}.git"), reference))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_git_url_https() {
        assert!(is_git_url("https://github.com/user/repo"));
        assert!(is_git_url("https://github.com/user/repo.git"));
        assert!(is_git_url("http://gitea.local/user/repo.git"));
    }

    #[test]
    fn test_is_git_url_ssh() {
        assert!(is_git_url("git@github.com:user/repo"));
        assert!(is_git_url("git@github.com:user/repo.git"));
        assert!(is_git_url("ssh://git@github.com/user/repo"));
    }

    #[test]
    fn test_is_git_url_file() {
        assert!(is_git_url("file:///tmp/fixtures/origin"));
    }

    #[test]
    fn test_is_git_url_local_paths() {
        assert!(!is_git_url("/path/to/local/features"));
        assert!(!is_git_url("./relative/path"));
        assert!(!is_git_url("org/repo"));
    }

    #[test]
    fn splits_https_url() {
        let (host, org, repo) =
            split_git_url("https://gitlab.example.com/group/repo.git").unwrap();
        assert_eq!(host, "gitlab.example.com");
        assert_eq!(org, "group");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn splits_scp_style_url() {
        let (host, org, repo) = split_git_url("git@github.com:user/repo.git").unwrap();
        assert_eq!(host, "github.com");
        assert_eq!(org, "user");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn splits_file_url_with_local_host() {
        let (host, org, repo) = split_git_url("file:///srv/mirrors/acme/widgets").unwrap();
        assert_eq!(host, "local");
        assert_eq!(org, "acme");
        assert_eq!(repo, "widgets");
    }

    #[test]
    fn split_rejects_urls_without_org() {
        assert!(split_git_url("https://example.com/repo").is_err());
    }

    #[test]
    fn parses_github_shorthand_with_ref() {
        let repo = parse_github(&GithubSpec::Shorthand("acme/widgets#v2".into())).unwrap();
        assert_eq!(repo.org, "acme");
        assert_eq!(repo.repo, "widgets");
        assert_eq!(repo.reference.as_deref(), Some("v2"));
        assert_eq!(repo.url, "https://github.com/acme/widgets.git");
    }

    #[test]
    fn rejects_malformed_shorthand() {
        assert!(parse_github(&GithubSpec::Shorthand("just-a-name".into())).is_err());
    }

    #[test]
    fn detailed_github_requires_name_or_url() {
        let details: crate::config::GithubDetails =
            serde_yaml::from_str("{ref: main}").unwrap();
        assert!(parse_github(&GithubSpec::Detailed(details)).is_err());
    }

    #[test]
    fn detailed_github_ref_overrides_shorthand_ref() {
        let details: crate::config::GithubDetails =
            serde_yaml::from_str("{name: 'acme/widgets#old', ref: new}").unwrap();
        let repo = parse_github(&GithubSpec::Detailed(details)).unwrap();
        assert_eq!(repo.reference.as_deref(), Some("new"));
    }

    #[test]
    fn expands_repository_shorthand() {
        let (url, reference) = expand_repository_url("acme/widgets#main").unwrap();
        assert_eq!(url, "https://github.com/acme/widgets.git");
        assert_eq!(reference.as_deref(), Some("main"));
    }

    #[test]
    fn expands_repository_full_url_unchanged() {
        let (url, reference) =
            expand_repository_url("git@github.com:acme/widgets.git").unwrap();
        assert_eq!(url, "git@github.com:acme/widgets.git");
        assert_eq!(reference, None);
    }
}
