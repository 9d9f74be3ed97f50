//! Configuration module

mod site;

pub use site::CommentsConfig;
pub use site::ExternalLink;
pub use site::HighlightConfig;
pub use site::NavLink;
pub use site::SiteConfig;
