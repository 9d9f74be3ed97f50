//! Utterances comment widget mount
//!
//! The widget is a remote script that replaces itself with an iframe once it
//! loads in the browser. Mounting means appending that script to the
//! comments region, once per mount.

use crate::config::CommentsConfig;
use crate::dom::Element;

/// Fixed attributes of the injected widget script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub src: String,
    pub repo: String,
    pub issue_term: String,
    pub label: String,
    pub theme: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::from(&CommentsConfig::default())
    }
}

impl From<&CommentsConfig> for WidgetConfig {
    fn from(config: &CommentsConfig) -> Self {
        Self {
            src: config.src.clone(),
            repo: config.repo.clone(),
            issue_term: config.issue_term.clone(),
            label: config.label.clone(),
            theme: config.theme.clone(),
        }
    }
}

/// Lifecycle state of a mount; the only transition is `Unmounted -> Mounted`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    Unmounted,
    Mounted,
}

/// Attaches the widget script to a display region exactly once
#[derive(Debug, Clone)]
pub struct CommentsMount {
    config: WidgetConfig,
    attached: bool,
}

impl CommentsMount {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            attached: false,
        }
    }

    pub fn state(&self) -> MountState {
        if self.attached {
            MountState::Mounted
        } else {
            MountState::Unmounted
        }
    }

    /// Lifecycle callback for the comments region
    ///
    /// `None` means the region is not attached yet and nothing happens. The
    /// first available region receives the script; later calls, including
    /// re-renders of the same region, leave it untouched.
    pub fn on_region(&mut self, region: Option<&mut Element>) {
        let Some(region) = region else {
            return;
        };
        if self.state() == MountState::Mounted {
            tracing::trace!("Comments widget already attached, ignoring re-render");
            return;
        }
        region.append_child(self.script());
        self.attached = true;
    }

    /// The remote script element carrying the widget configuration
    fn script(&self) -> Element {
        Element::new("script")
            .attr("src", &self.config.src)
            .flag("async")
            .attr("crossorigin", "anonymous")
            .attr("repo", &self.config.repo)
            .attr("issue-term", &self.config.issue_term)
            .attr("label", &self.config.label)
            .attr("theme", &self.config.theme)
    }

    /// Build the comments region and mount the widget into it
    pub fn section(config: WidgetConfig) -> Element {
        let mut region = Element::new("section").attr("class", "comments");
        let mut mount = CommentsMount::new(config);
        mount.on_region(Some(&mut region));
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripts(region: &Element) -> Vec<&Element> {
        region.children_by_tag("script").collect()
    }

    #[test]
    fn test_mount_injects_one_configured_script() {
        let mut region = Element::new("section");
        let mut mount = CommentsMount::new(WidgetConfig::default());
        assert_eq!(mount.state(), MountState::Unmounted);

        mount.on_region(Some(&mut region));
        assert_eq!(mount.state(), MountState::Mounted);

        let scripts = scripts(&region);
        assert_eq!(scripts.len(), 1);
        let script = scripts[0];
        assert_eq!(script.get_attr("src"), Some("https://utteranc.es/client.js"));
        assert!(script.has_attr("async"));
        assert_eq!(script.get_attr("crossorigin"), Some("anonymous"));
        assert_eq!(script.get_attr("repo"), Some("junbread/blog"));
        assert_eq!(script.get_attr("issue-term"), Some("pathname"));
        assert_eq!(script.get_attr("label"), Some("blog-comment"));
        assert_eq!(script.get_attr("theme"), Some("github-light"));
    }

    #[test]
    fn test_rerender_does_not_inject_again() {
        let mut region = Element::new("section");
        let mut mount = CommentsMount::new(WidgetConfig::default());

        mount.on_region(Some(&mut region));
        mount.on_region(Some(&mut region));
        mount.on_region(Some(&mut region));

        assert_eq!(scripts(&region).len(), 1);
    }

    #[test]
    fn test_unattached_region_does_nothing() {
        let mut mount = CommentsMount::new(WidgetConfig::default());
        mount.on_region(None);
        assert_eq!(mount.state(), MountState::Unmounted);

        let mut region = Element::new("section");
        mount.on_region(Some(&mut region));
        assert_eq!(scripts(&region).len(), 1);
    }

    #[test]
    fn test_section_html() {
        let html = CommentsMount::section(WidgetConfig::default()).to_html();
        assert_eq!(html.matches("<script").count(), 1);
        assert!(html.starts_with("<section class=\"comments\"><script src=\"https://utteranc.es/client.js\" async crossorigin=\"anonymous\""));
        assert!(html.contains("repo=\"junbread/blog\""));
    }
}
