use nu_ansi_term::Color::{Blue, Cyan, Green, Magenta};
use pacrelay_core::{service::RepoService, RepoResult};
use tracing::info;

use crate::utils::{format_bytes, Colored};

pub fn list_packages(service: &RepoService, all: bool) -> RepoResult<()> {
    let snapshot = service.snapshot()?;
    let packages = if all {
        &snapshot.all
    } else {
        &snapshot.retained
    };

    for pkg in packages {
        info!(
            filename = pkg.filename,
            name = pkg.base_name,
            variant = %pkg.variant,
            version = pkg.version,
            architecture = pkg.architecture,
            size = pkg.size,
            release = pkg.release_tag,
            published_at = %pkg.published_at,
            "{} {} {} ({}) [{}]",
            Colored(Blue, &pkg.base_name),
            Colored(Green, &pkg.version),
            pkg.architecture,
            Colored(Magenta, format_bytes(pkg.size)),
            Colored(Cyan, &pkg.release_tag),
        );
    }

    info!(
        "{} of {} packages{}",
        Colored(Green, packages.len()),
        Colored(Cyan, snapshot.all.len()),
        if all { "" } else { " retained" }
    );

    Ok(())
}
