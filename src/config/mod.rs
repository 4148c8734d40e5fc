//! Configuration module

mod site;

pub use site::FeedUrls;
pub use site::NavLink;
pub use site::NavPage;
pub use site::SiteConfig;
pub use site::UrlPatterns;
