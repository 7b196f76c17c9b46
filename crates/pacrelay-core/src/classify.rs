//! Release asset classification.
//!
//! Each configured [`PackageRule`] expands into one pattern per variant
//! followed by a pattern for the plain name. Patterns are tried in that order
//! and the first one that matches an asset name decides how the name is
//! split. The version shape is part of every pattern, so a name only matches
//! a pattern under which it also carries a valid version.

use pacrelay_config::{config::Config, package::PackageRule};
use pacrelay_dl::traits::{Asset, Release};
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    package::{PackageRecord, Variant},
    RepoResult,
};

/// `N.N.N` in ASCII digits followed by an optional suffix such as
/// `_liquid-2`.
const VERSION: &str = r"[0-9]+\.[0-9]+\.[0-9]+[A-Za-z0-9._+~-]*";

#[derive(Debug)]
struct Pattern {
    name: String,
    variant: Variant,
    regex: Regex,
}

impl Pattern {
    fn new(rule: &PackageRule, variant: Variant) -> RepoResult<Self> {
        let prefix = match &variant {
            Variant::Default => regex::escape(&rule.name),
            Variant::Named(v) => format!("{}-{}", regex::escape(&rule.name), regex::escape(v)),
        };
        let regex = Regex::new(&format!(
            r"^{prefix}-(?P<version>{VERSION})-(?P<arch>[^-]+){}$",
            regex::escape(rule.extension())
        ))?;

        Ok(Self {
            name: rule.name.clone(),
            variant,
            regex,
        })
    }

    fn base_name(&self) -> String {
        match &self.variant {
            Variant::Default => self.name.clone(),
            Variant::Named(v) => format!("{}-{}", self.name, v),
        }
    }
}

/// Splits asset names into package records according to the configured rules.
#[derive(Debug)]
pub struct Classifier {
    patterns: Vec<Pattern>,
    architectures: Vec<String>,
}

impl Classifier {
    pub fn new(config: &Config) -> RepoResult<Self> {
        let mut patterns = Vec::new();
        for rule in &config.packages {
            for variant in &rule.variants {
                patterns.push(Pattern::new(rule, Variant::Named(variant.clone()))?);
            }
            patterns.push(Pattern::new(rule, Variant::Default)?);
        }

        Ok(Self {
            patterns,
            architectures: config.architectures.clone(),
        })
    }

    /// Classifies the assets of one release, in asset order.
    ///
    /// Drafts and releases without a publication time yield nothing.
    pub fn classify<R: Release>(&self, release: &R) -> Vec<PackageRecord> {
        if release.is_draft() {
            trace!("Skipping draft release {}", release.tag());
            return Vec::new();
        }
        let Some(published_at) = release.published_at() else {
            trace!("Skipping unpublished release {}", release.tag());
            return Vec::new();
        };
        if release.is_prerelease() {
            trace!("Including prerelease {}", release.tag());
        }

        release
            .assets()
            .iter()
            .filter_map(|asset| self.classify_asset(asset, release.tag(), published_at))
            .collect()
    }

    /// Classifies every release and orders the result newest first.
    ///
    /// The sort is stable, so records published at the same instant keep
    /// their release and asset order.
    pub fn classify_all<R: Release>(&self, releases: &[R]) -> Vec<PackageRecord> {
        let mut records: Vec<_> = releases.iter().flat_map(|r| self.classify(r)).collect();
        records.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        records
    }

    fn classify_asset<A: Asset>(
        &self,
        asset: &A,
        tag: &str,
        published_at: chrono::DateTime<chrono::Utc>,
    ) -> Option<PackageRecord> {
        let name = asset.name();

        let Some((pattern, caps)) = self
            .patterns
            .iter()
            .find_map(|p| p.regex.captures(name).map(|caps| (p, caps)))
        else {
            trace!("Asset {} matches no package pattern", name);
            return None;
        };

        let version = &caps["version"];
        let arch = &caps["arch"];

        if !self.architectures.iter().any(|a| a == arch) {
            debug!("Skipping {}: architecture {} is not allowed", name, arch);
            return None;
        }

        Some(PackageRecord {
            name: pattern.name.clone(),
            base_name: pattern.base_name(),
            variant: pattern.variant.clone(),
            version: version.to_string(),
            architecture: arch.to_string(),
            filename: name.to_string(),
            size: asset.size(),
            download_url: asset.url().to_string(),
            published_at,
            release_tag: tag.to_string(),
        })
    }
}

/// Keeps the first `max` records of a newest-first list.
pub fn select(mut records: Vec<PackageRecord>, max: usize) -> Vec<PackageRecord> {
    records.truncate(max);
    records
}
