use clap::Parser;
use cli::{Args, Commands};
use list::list_packages;
use logging::setup_logging;
use mirror::mirror_repository;
use pacrelay_config::config::Config;
use pacrelay_core::{
    error::RepoError,
    service::{ReleaseSource, RepoService},
    RepoResult,
};
use pacrelay_dl::http_client::ClientConfig;
use render::render_resource;
use tracing::debug;
use ureq::Proxy;
use utils::set_color;

mod cli;
mod list;
mod logging;
mod mirror;
mod render;
mod utils;

#[cfg(test)]
mod test_fixtures;

fn create_service(args: &Args) -> RepoResult<RepoService> {
    let path = Config::path(args.config.as_deref());
    let config = Config::load(&path)?;
    debug!("Using repository {} from {}", config.repository, config.project);

    if let Some(releases) = &args.releases_file {
        return RepoService::new(config, ReleaseSource::File(releases.clone()));
    }

    let mut client_config = ClientConfig::default();
    if let Some(proxy) = args.proxy.as_deref() {
        let proxy = Proxy::new(proxy)
            .map_err(|err| RepoError::Custom(format!("Invalid proxy {proxy}: {err}")))?;
        client_config.proxy = Some(proxy);
    }
    if let Some(user_agent) = &args.user_agent {
        client_config.user_agent = Some(user_agent.clone());
    }

    RepoService::github(config, client_config)
}

fn handle_cli() -> RepoResult<()> {
    let args = Args::parse();

    let stdout_info = !matches!(args.command, Commands::Render { output: None, .. });
    setup_logging(&args, stdout_info)?;

    if args.no_color {
        set_color(false);
    }

    match &args.command {
        Commands::DefConfig => {
            print!("{}", Config::default_config().to_toml()?);
        }
        Commands::Render {
            resource,
            output,
        } => {
            let service = create_service(&args)?;
            render_resource(&service, resource, output.as_deref())?;
        }
        Commands::List {
            all,
        } => {
            let service = create_service(&args)?;
            list_packages(&service, *all)?;
        }
        Commands::Mirror {
            dir,
        } => {
            let service = create_service(&args)?;
            mirror_repository(&service, dir)?;
        }
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
