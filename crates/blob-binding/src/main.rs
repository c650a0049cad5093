//! `blob-index`: resolve the blob bindings of a function manifest

use anyhow::Context;
use blob_binding::{IndexManifest, ResolverConfig};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Command::new("blob-index")
        .version(blob_binding::VERSION)
        .about("Resolve blob parameter bindings for indexed functions")
        .subcommand_required(true)
        .subcommand(
            Command::new("resolve")
                .about("Resolve every parameter in a manifest")
                .arg(
                    Arg::new("manifest")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("TOML manifest listing functions and parameters"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Resolver configuration overriding the manifest's [resolver] table"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("resolve", args)) => {
            let Some(manifest_path) = args.get_one::<PathBuf>("manifest") else {
                anyhow::bail!("missing manifest path");
            };
            let manifest = IndexManifest::load(manifest_path)
                .with_context(|| format!("loading manifest {}", manifest_path.display()))?;

            let config = match args.get_one::<PathBuf>("config") {
                Some(path) => ResolverConfig::load(path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => manifest.resolver.clone(),
            };
            let resolver = config.build_resolver();

            let cancel = CancellationToken::new();
            let ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    ctrl_c.cancel();
                }
            });

            let report = manifest.index(&resolver, &cancel).await;

            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.generate_text());
            }

            std::process::exit(if report.passed() { 0 } else { 1 });
        }
        _ => Ok(()),
    }
}
