use anyhow::Result;
use clap::Parser;

use release_bump::config::{self, Inputs};
use release_bump::git_ops::GitRepo;
use release_bump::github::client::{DEFAULT_API_BASE, DEFAULT_UPLOAD_BASE};
use release_bump::github::GitHubClient;
use release_bump::publish::{self, PublishAction};
use release_bump::resolver;
use release_bump::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-bump",
    about = "Create or update a GitHub release with a bumped semantic version"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short = 't',
        long,
        help = "Version component to bump: major, minor or patch"
    )]
    version_type: Option<String>,

    #[arg(short, long, help = "Artifact to attach when a new release is created")]
    upload_file: Option<String>,

    #[arg(short, long, help = "Fallback version when no usable release exists")]
    base_version: Option<String>,

    #[arg(
        short,
        long,
        env = "GITHUB_REPOSITORY",
        help = "Repository in owner/name form"
    )]
    repo: Option<String>,

    #[arg(
        long,
        env = "GITHUB_SHA",
        help = "Commit the release targets; defaults to local HEAD"
    )]
    commit: Option<String>,

    #[arg(long, help = "Preview what would happen without touching the remote")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("release-bump {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    // The credential is read from the environment exactly once, here, and
    // passed down as a plain value.
    let inputs = match Inputs::resolve(
        args.version_type.as_deref().unwrap_or(""),
        args.upload_file.as_deref().unwrap_or(""),
        args.base_version.as_deref(),
        args.repo.as_deref(),
        config::token_from_env(),
        &file_config,
    ) {
        Ok(inputs) => inputs,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Commit the release targets: CI-provided, or local HEAD as a fallback
    let commit_sha = match args.commit {
        Some(sha) => sha,
        None => {
            let repo = match GitRepo::new() {
                Ok(repo) => repo,
                Err(e) => {
                    ui::display_error(&format!("Git repository error: {}", e));
                    std::process::exit(1);
                }
            };
            repo.head_commit_sha()?
        }
    };

    let api_base = file_config
        .api_url
        .as_deref()
        .unwrap_or(DEFAULT_API_BASE)
        .to_string();
    let upload_base = file_config
        .upload_url
        .as_deref()
        .unwrap_or(DEFAULT_UPLOAD_BASE)
        .to_string();
    let host = match GitHubClient::with_base_urls(
        &inputs.token,
        inputs.repo.clone(),
        &api_base,
        &upload_base,
    ) {
        Ok(host) => host,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if args.dry_run {
        let resolved = resolver::resolve_latest(&host, inputs.base_version).await?;
        let new_version = resolved.version.bump(inputs.bump);
        ui::display_version_change(resolved.version, new_version);

        ui::display_status("Dry run:");
        match resolved.release {
            Some(release) if release.target_commitish == commit_sha => {
                ui::display_success(&format!(
                    "  Would update release {} in place to {}",
                    release.id, new_version
                ));
            }
            _ => {
                ui::display_success(&format!(
                    "  Would create release {} targeting {}",
                    new_version, commit_sha
                ));
                ui::display_success(&format!(
                    "  Would upload \"{}\" to the new release",
                    inputs.upload_file.display()
                ));
            }
        }
        return Ok(());
    }

    match publish::run(&host, &inputs, &commit_sha).await {
        Ok(outcome) => {
            match &outcome.action {
                PublishAction::Updated { release_id } => {
                    ui::display_success(&format!(
                        "Updated release {} in place to {}",
                        release_id, outcome.version
                    ));
                }
                PublishAction::Created { release_id, asset } => {
                    ui::display_success(&format!(
                        "Created release {} ({})",
                        outcome.version, release_id
                    ));
                    ui::display_success(&format!("Uploaded asset: {}", asset));
                }
            }

            println!(
                "\n\x1b[32m✓\x1b[0m Published {} (previous version {})\n",
                outcome.version, outcome.previous
            );
        }
        Err(e) => {
            ui::display_error(&format!("Release failed: {}", e));
            std::process::exit(1);
        }
    }

    Ok(())
}
