//! Composition components
//!
//! Each component turns borrowed documents plus the site configuration into
//! a finished HTML page through the embedded templates.

pub mod comments;
pub mod layout;
pub mod listing;
pub mod listing_item;
pub mod page;
pub mod seo;

pub use comments::{CommentsMount, MountState, WidgetConfig};
pub use layout::LayoutView;
pub use listing::{group_by_tag, BlogPage, Homepage, ListingView, TagPage, TagSummary, TagsPage};
pub use listing_item::{ListingItemView, TagLink};
pub use page::{page_path, NotionPageComposition, PageComposition, PostComposition};
pub use seo::SeoView;
