//! atelier-migrate: moves the website's local media to the object store.
//!
//! Phases run in order: `upload`, then `rewrite`, then `cleanup`. They share
//! nothing but the asset map file written by `upload`.

use std::path::PathBuf;

use anyhow::Context;
use atelier_cli::{
    cleanup_summary, load_config, map_summary, print_json, rewrite_summary, upload_summary,
    Overrides,
};
use atelier_core::models::AssetKind;
use atelier_core::MigrationConfig;
use atelier_services::{AssetMapStore, Cleaner, Rewriter, UploadSource, Uploader};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "atelier-migrate", about = "Website asset migration")]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Location flags shared by every phase; each overrides its environment variable.
#[derive(Args)]
struct PathArgs {
    /// Root of the website source tree (MIGRATION_PROJECT_ROOT)
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,
    /// Asset map file (MIGRATION_ASSET_MAP_PATH)
    #[arg(long, global = true)]
    asset_map: Option<PathBuf>,
    /// Local images directory (MIGRATION_IMAGES_DIR)
    #[arg(long, global = true)]
    images_dir: Option<PathBuf>,
    /// Local videos directory (MIGRATION_VIDEOS_DIR)
    #[arg(long, global = true)]
    videos_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload local images and videos and write the asset map
    Upload {
        /// Remote folder for images (MIGRATION_IMAGES_FOLDER)
        #[arg(long)]
        images_folder: Option<String>,
        /// Remote folder for videos (MIGRATION_VIDEOS_FOLDER)
        #[arg(long)]
        videos_folder: Option<String>,
        /// Parallel uploads (MIGRATION_UPLOAD_CONCURRENCY)
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Replace quoted local asset paths in the source tree with remote URLs
    Rewrite,
    /// Delete local files that appear in the asset map
    Cleanup {
        /// List what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the current asset map
    ShowMap,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let mut overrides = Overrides::new();
        overrides
            .set_path("MIGRATION_PROJECT_ROOT", self.paths.project_root.as_deref())
            .set_path("MIGRATION_ASSET_MAP_PATH", self.paths.asset_map.as_deref())
            .set_path("MIGRATION_IMAGES_DIR", self.paths.images_dir.as_deref())
            .set_path("MIGRATION_VIDEOS_DIR", self.paths.videos_dir.as_deref());

        if let Commands::Upload {
            images_folder,
            videos_folder,
            concurrency,
        } = &self.command
        {
            overrides
                .set("MIGRATION_IMAGES_FOLDER", images_folder.as_ref())
                .set("MIGRATION_VIDEOS_FOLDER", videos_folder.as_ref())
                .set("MIGRATION_UPLOAD_CONCURRENCY", *concurrency);
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    atelier_infra::init_cli_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli.overrides())?;
    let map_store = AssetMapStore::new(&config.asset_map_path);

    match cli.command {
        Commands::Upload { .. } => upload(&config, &map_store).await?,
        Commands::Rewrite => {
            let map = map_store.load().context("Run `upload` first")?;
            let report = Rewriter::new(&config.project_root, &config.scripts_dir)
                .run(&map)
                .context("Rewrite failed")?;
            println!("{}", rewrite_summary(&report, &config.project_root));
        }
        Commands::Cleanup { dry_run } => {
            let map = map_store.load().context("Run `upload` first")?;
            let report = Cleaner::new(&config.images_dir, &config.videos_dir)
                .dry_run(dry_run)
                .run(&map)
                .context("Cleanup failed")?;
            println!("{}", cleanup_summary(&report));
        }
        Commands::ShowMap => {
            let map = map_store.load()?;
            print_json(&map)?;
            eprintln!("{}", map_summary(&map));
        }
    }

    Ok(())
}

async fn upload(config: &MigrationConfig, map_store: &AssetMapStore) -> anyhow::Result<()> {
    config.storage.validate()?;
    let storage = atelier_storage::create_storage(&config.storage)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(
        backend = %storage.backend_type(),
        concurrency = config.upload_concurrency,
        "Storage backend ready"
    );

    let sources = [
        UploadSource {
            kind: AssetKind::Image,
            root: config.images_dir.clone(),
            remote_folder: config.images_folder.clone(),
        },
        UploadSource {
            kind: AssetKind::Video,
            root: config.videos_dir.clone(),
            remote_folder: config.videos_folder.clone(),
        },
    ];

    let report = Uploader::new(storage, config.upload_concurrency)
        .upload_all(&sources)
        .await
        .context("Upload failed")?;

    map_store
        .save(&report.map)
        .context("Failed to write asset map")?;
    println!("{}", upload_summary(&report, map_store.path()));

    Ok(())
}
