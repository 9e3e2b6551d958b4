use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{ObjectStorageOverrides, load_object_storage_config};
use crate::storage::utils::OutputFormat;
use crate::storage::utils::path::basename;
use crate::storage::{BackendConfig, FileSyncConfig, Outcome, StorageAdapter, StorageEntry};

#[derive(Parser, Debug)]
#[command(
    name = "ctmu",
    version,
    about = "Swiss Army knife CLI: uniform file storage over S3 and Nextcloud"
)]
pub struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// S3 object storage
    S3 {
        #[command(subcommand)]
        command: S3Command,
    },
    /// Nextcloud / WebDAV file storage
    Nextcloud {
        #[command(subcommand)]
        command: NextcloudCommand,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct S3Options {
    /// Bucket region (falls back to STORAGE_REGION, AWS_REGION, AWS_DEFAULT_REGION)
    #[arg(long)]
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores (falls back to STORAGE_ENDPOINT, AWS_ENDPOINT_URL)
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum S3Command {
    /// Upload a local file
    Upload {
        file: PathBuf,
        bucket: String,
        /// Object key (defaults to the file name)
        #[arg(long)]
        key: Option<String>,
        #[command(flatten)]
        options: S3Options,
    },
    /// Download an object
    Download {
        bucket: String,
        key: String,
        /// Local destination (defaults to the key's base name)
        local: Option<PathBuf>,
        #[command(flatten)]
        options: S3Options,
    },
    /// List objects under a prefix
    #[command(alias = "ls")]
    List {
        bucket: String,
        #[arg(long, default_value = "")]
        prefix: String,
        #[command(flatten)]
        options: S3Options,
    },
    /// Delete an object
    #[command(alias = "rm")]
    Delete {
        bucket: String,
        key: String,
        #[command(flatten)]
        options: S3Options,
    },
}

#[derive(clap::Args, Clone)]
pub struct DavOptions {
    /// WebDAV base URL, e.g. https://cloud.example.com/remote.php/dav/files/<user>/
    #[arg(short = 'u', long, env = "NEXTCLOUD_URL")]
    pub url: String,
    #[arg(long, env = "NEXTCLOUD_USERNAME")]
    pub username: String,
    #[arg(long, env = "NEXTCLOUD_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl std::fmt::Debug for DavOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DavOptions")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl From<DavOptions> for FileSyncConfig {
    fn from(options: DavOptions) -> Self {
        Self {
            url: options.url,
            username: options.username,
            password: options.password,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum NextcloudCommand {
    /// Upload a local file
    Upload {
        file: PathBuf,
        remote: String,
        #[command(flatten)]
        options: DavOptions,
    },
    /// Download a remote file
    Download {
        remote: String,
        /// Local destination (defaults to the remote base name)
        local: Option<PathBuf>,
        #[command(flatten)]
        options: DavOptions,
    },
    /// List a remote directory
    #[command(alias = "ls")]
    List {
        #[arg(default_value = "/")]
        path: String,
        #[command(flatten)]
        options: DavOptions,
    },
    /// Delete a remote file or directory
    #[command(alias = "rm")]
    Delete {
        remote: String,
        #[command(flatten)]
        options: DavOptions,
    },
    /// Create a remote directory
    Mkdir {
        remote: String,
        /// Create parent directories as needed
        #[arg(short = 'p', long)]
        parents: bool,
        #[command(flatten)]
        options: DavOptions,
    },
}

fn s3_adapter(bucket: &str, options: S3Options) -> StorageAdapter {
    let overrides = ObjectStorageOverrides {
        region: options.region,
        endpoint: options.endpoint,
    };
    StorageAdapter::new(BackendConfig::ObjectStorage(load_object_storage_config(
        bucket, overrides,
    )))
}

fn dav_adapter(options: DavOptions) -> StorageAdapter {
    StorageAdapter::new(BackendConfig::FileSync(options.into()))
}

fn default_local_path(remote: &str) -> PathBuf {
    PathBuf::from(basename(remote))
}

fn file_name_key(file: &Path) -> String {
    file.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Render an outcome and report whether it succeeded.
fn report<T, F>(outcome: &Outcome<T>, format: OutputFormat, render: F) -> bool
where
    T: Serialize,
    F: Fn(&T),
{
    match format {
        OutputFormat::Json => match serde_json::to_string(outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: failed to serialize result: {e}"),
        },
        OutputFormat::Human => match outcome {
            Outcome::Success(data) => render(data),
            Outcome::Failure(failure) => println!("❌ {failure}"),
        },
    }
    outcome.is_ok()
}

fn report_status(outcome: &Outcome<String>, format: OutputFormat) -> bool {
    report(outcome, format, |message| println!("✅ {message}"))
}

fn report_entries(outcome: &Outcome<Vec<StorageEntry>>, format: OutputFormat) -> bool {
    report(outcome, format, |entries| {
        for entry in entries {
            println!("{entry}");
        }
    })
}

/// Execute a parsed command. Returns whether the operation succeeded.
pub async fn run(args: Args) -> bool {
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    log::debug!("run command={:?} format={:?}", args.command, format);

    match args.command {
        Command::S3 { command } => match command {
            S3Command::Upload {
                file,
                bucket,
                key,
                options,
            } => {
                let key = key.unwrap_or_else(|| file_name_key(&file));
                let outcome = s3_adapter(&bucket, options).upload(&file, &key).await;
                report_status(&outcome, format)
            }
            S3Command::Download {
                bucket,
                key,
                local,
                options,
            } => {
                let local = local.unwrap_or_else(|| default_local_path(&key));
                let outcome = s3_adapter(&bucket, options).download(&key, &local).await;
                report_status(&outcome, format)
            }
            S3Command::List {
                bucket,
                prefix,
                options,
            } => {
                let outcome = s3_adapter(&bucket, options).list(&prefix).await;
                report_entries(&outcome, format)
            }
            S3Command::Delete {
                bucket,
                key,
                options,
            } => {
                let outcome = s3_adapter(&bucket, options).delete(&key).await;
                report_status(&outcome, format)
            }
        },
        Command::Nextcloud { command } => match command {
            NextcloudCommand::Upload {
                file,
                remote,
                options,
            } => {
                let outcome = dav_adapter(options).upload(&file, &remote).await;
                report_status(&outcome, format)
            }
            NextcloudCommand::Download {
                remote,
                local,
                options,
            } => {
                let local = local.unwrap_or_else(|| default_local_path(&remote));
                let outcome = dav_adapter(options).download(&remote, &local).await;
                report_status(&outcome, format)
            }
            NextcloudCommand::List { path, options } => {
                let outcome = dav_adapter(options).list(&path).await;
                report_entries(&outcome, format)
            }
            NextcloudCommand::Delete { remote, options } => {
                let outcome = dav_adapter(options).delete(&remote).await;
                report_status(&outcome, format)
            }
            NextcloudCommand::Mkdir {
                remote,
                parents,
                options,
            } => {
                let outcome = dav_adapter(options).mkdir(&remote, parents).await;
                report_status(&outcome, format)
            }
        },
    }
}
