use std::{
    fs,
    path::{Path, PathBuf},
};

use pacrelay_core::{
    error::ErrorContext,
    response::{assemble, Resource},
    service::RepoService,
    RepoResult,
};
use tracing::info;

use crate::utils::format_bytes;

const RESOURCES: [Resource; 5] = [
    Resource::Database,
    Resource::Files,
    Resource::DatabaseSignature,
    Resource::FilesSignature,
    Resource::Listing,
];

/// Writes every repository resource into `dir` from a single fetch.
pub fn mirror_repository(service: &RepoService, dir: &Path) -> RepoResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))?;

    let snapshot = service.snapshot()?;
    let repo = &service.config().repository;

    let mut written = Vec::with_capacity(RESOURCES.len());
    for resource in &RESOURCES {
        let response = assemble(service.generator(), resource, &snapshot)?;
        let path = dir.join(resource.file_name(repo));
        fs::write(&path, response.body())
            .with_context(|| format!("writing {}", path.display()))?;

        info!(
            "Wrote {} ({})",
            path.display(),
            format_bytes(response.body().len() as u64)
        );
        written.push(path);
    }

    info!(
        "Mirrored {} packages into {}",
        snapshot.retained.len(),
        dir.display()
    );
    Ok(written)
}
