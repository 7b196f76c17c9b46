use chrono::{DateTime, Utc};

pub trait Asset: Clone {
    fn name(&self) -> &str;
    fn size(&self) -> u64;
    fn url(&self) -> &str;
    fn label(&self) -> Option<&str>;
}

pub trait Release {
    type Asset: Asset;

    fn tag(&self) -> &str;
    fn is_draft(&self) -> bool;
    fn is_prerelease(&self) -> bool;
    /// Publication time, `None` while the release is unpublished.
    fn published_at(&self) -> Option<DateTime<Utc>>;
    fn assets(&self) -> &[Self::Asset];
}
