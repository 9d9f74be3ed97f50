//! URL helper functions

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::SiteConfig;

lazy_static! {
    static ref REPEATED_SLASHES: Regex = Regex::new(r"/{2,}").unwrap();
}

/// Collapse every run of `/` into a single separator
///
/// # Examples
/// ```ignore
/// replace_slashes("//blog///hello") // -> "/blog/hello"
/// ```
pub fn replace_slashes(path: &str) -> String {
    REPEATED_SLASHES.replace_all(path, "/").into_owned()
}

/// Join path segments into an absolute path with exactly one separator
/// between segments and no trailing separator (the root stays `/`)
///
/// # Examples
/// ```ignore
/// join_path(&["blog", "/hello"]) // -> "/blog/hello"
/// join_path(&["/", "/"])         // -> "/"
/// ```
pub fn join_path(segments: &[&str]) -> String {
    let joined = replace_slashes(&format!("/{}", segments.join("/")));
    if joined.len() > 1 {
        joined.trim_end_matches('/').to_string()
    } else {
        joined
    }
}

/// Canonical path of a post: `/{posts_prefix}/{slug}`
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    join_path(&[config.posts_prefix.as_str(), slug])
}

/// Path of the full blog listing: `/{base_path}/{blog_path}`
pub fn blog_path(config: &SiteConfig) -> String {
    join_path(&[config.base_path.as_str(), config.blog_path.as_str()])
}

/// Path of the tags overview: `/{base_path}/{tags_path}`
pub fn tags_path(config: &SiteConfig) -> String {
    join_path(&[config.base_path.as_str(), config.tags_path.as_str()])
}

/// Path of a single tag page: `/{base_path}/{tags_path}/{slug}`
pub fn tag_path(config: &SiteConfig, tag_slug: &str) -> String {
    join_path(&[
        config.base_path.as_str(),
        config.tags_path.as_str(),
        tag_slug,
    ])
}

/// Generate a URL under the configured base path
///
/// # Examples
/// ```ignore
/// url_for(&config, "about") // -> "/about"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    join_path(&[config.base_path.as_str(), path])
}

/// Prefix an already resolved site path with the site URL
///
/// # Examples
/// ```ignore
/// absolute_url(&config, &url_for(&config, "/about")) // -> "https://example.com/about"
/// ```
pub fn absolute_url(config: &SiteConfig, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}{}", config.url.trim_end_matches('/'), join_path(&[path]))
}
