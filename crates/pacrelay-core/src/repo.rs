use std::time::{SystemTime, UNIX_EPOCH};

use pacrelay_config::config::Config;
use pacrelay_dl::traits::Release;
use tracing::debug;

use crate::{
    archive::{self, ArchiveEntry},
    classify::{self, Classifier},
    compress::compress,
    metadata::{Formatter, DEPENDS, DESC, FILES},
    package::PackageRecord,
    RepoResult,
};

/// Classified view of one release listing.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Every valid package, newest first.
    pub all: Vec<PackageRecord>,
    /// The newest `max_packages` of `all`; these make up the databases.
    pub retained: Vec<PackageRecord>,
}

impl Snapshot {
    /// Looks up a valid package by asset filename.
    pub fn find(&self, filename: &str) -> Option<&PackageRecord> {
        self.all.iter().find(|p| p.filename == filename)
    }
}

/// Builds repository artifacts from release listings.
///
/// Holds no state besides its configuration; every call rebuilds its output
/// from the records it is given.
#[derive(Debug)]
pub struct RepoGenerator {
    config: Config,
    classifier: Classifier,
}

impl RepoGenerator {
    pub fn new(config: Config) -> RepoResult<Self> {
        let classifier = Classifier::new(&config)?;
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snapshot<R: Release>(&self, releases: &[R]) -> Snapshot {
        let all = self.classifier.classify_all(releases);
        let retained = classify::select(all.clone(), self.config.max_packages());

        debug!(
            "Classified {} packages from {} releases, retaining {}",
            all.len(),
            releases.len(),
            retained.len()
        );

        Snapshot { all, retained }
    }

    /// `desc` and, when dependencies are configured, `depends` for each record.
    pub fn database_entries(&self, records: &[PackageRecord]) -> Vec<ArchiveEntry> {
        let formatter = Formatter::new(&self.config.metadata);
        let mut entries = Vec::with_capacity(records.len() * 2);

        for pkg in records {
            entries.push(self.entry(pkg, DESC, formatter.format_description(pkg)));
            if formatter.has_depends() {
                entries.push(self.entry(pkg, DEPENDS, formatter.format_depends(pkg)));
            }
        }
        entries
    }

    /// One `files` entry per record.
    pub fn files_entries(&self, records: &[PackageRecord]) -> Vec<ArchiveEntry> {
        let formatter = Formatter::new(&self.config.metadata);
        records
            .iter()
            .map(|pkg| self.entry(pkg, FILES, formatter.format_file_list(pkg)))
            .collect()
    }

    /// Gzipped `<repo>.db` container.
    pub fn database(&self, records: &[PackageRecord]) -> RepoResult<Vec<u8>> {
        let out = self.pack(&self.database_entries(records))?;
        debug!(
            "Built {}.db with {} packages ({} bytes)",
            self.config.repository,
            records.len(),
            out.len()
        );
        Ok(out)
    }

    /// Gzipped `<repo>.files` container.
    pub fn files_database(&self, records: &[PackageRecord]) -> RepoResult<Vec<u8>> {
        let out = self.pack(&self.files_entries(records))?;
        debug!(
            "Built {}.files with {} packages ({} bytes)",
            self.config.repository,
            records.len(),
            out.len()
        );
        Ok(out)
    }

    fn entry(&self, pkg: &PackageRecord, member: &str, content: Vec<u8>) -> ArchiveEntry {
        let entry = ArchiveEntry::new(pkg.entry_path(member), content);
        if self.config.reproducible() {
            entry.with_mtime(pkg.build_date())
        } else {
            entry
        }
    }

    fn pack(&self, entries: &[ArchiveEntry]) -> RepoResult<Vec<u8>> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let tar = archive::build(entries, now)?;
        compress(&tar)
    }
}

/// Newline-terminated list of package filenames.
pub fn listing(records: &[PackageRecord]) -> String {
    records.iter().fold(String::new(), |mut out, pkg| {
        out.push_str(&pkg.filename);
        out.push('\n');
        out
    })
}
