use std::path::Path;

use pacrelay_core::{error::RepoError, response::Payload, service::RepoService, RepoResult};
use tracing::{debug, info};

use crate::utils::{format_bytes, write_output};

/// Renders the resource called `name` to `output`, or stdout.
///
/// A package redirect writes the download URL instead of a body.
pub fn render_resource(service: &RepoService, name: &str, output: Option<&Path>) -> RepoResult<()> {
    let response = service.respond(name)?;
    if !response.is_success() && response.location().is_none() {
        return Err(RepoError::Custom(format!("resource not found: {name}")));
    }

    debug!(
        status = response.status,
        content_type = response.content_type,
        encoding = response.content_encoding,
        "rendered {}",
        name
    );

    match &response.payload {
        Payload::Redirect(url) => write_output(output, format!("{url}\n").as_bytes())?,
        _ => write_output(output, response.body())?,
    }

    if let Some(path) = output {
        info!(
            "Wrote {} ({}) to {}",
            name,
            format_bytes(response.body().len() as u64),
            path.display()
        );
    }
    Ok(())
}
