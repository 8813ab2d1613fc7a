use crate::config::{Environment, ShareConfig};
use crate::error::{HELP_TEXT, ShareError};
use crate::infrastructure::storage::StorageConnector;
use crate::models::{UploadOutcome, UploadRequest};
use crate::services::file_system::FileSystem;
use crate::services::upload_service::UploadService;
use clap::{ArgAction, Parser};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Instrument;

#[derive(Parser, Debug)]
#[command(
    name = "s3share",
    version,
    about = "Uploads files to an S3 bucket specified in the environment variable S3SHARE_BUCKET.",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Files to upload. Names starting with `-` are file names too.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Print version
    #[arg(long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

/// Process driver: validates the invocation, connects once, then shares each
/// file in argument order and stops at the first failure.
pub struct ShareService {
    env: Arc<dyn Environment>,
    connector: Arc<dyn StorageConnector>,
    file_system: Arc<dyn FileSystem>,
}

impl ShareService {
    pub fn new(
        env: Arc<dyn Environment>,
        connector: Arc<dyn StorageConnector>,
        file_system: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            env,
            connector,
            file_system,
        }
    }

    /// Writes one URL line to `out` per completed file and returns the
    /// outcomes in the same order.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<Vec<UploadOutcome>, ShareError> {
        let args = self.env.args();
        if args.len() < 2 {
            return Err(ShareError::Usage(HELP_TEXT.to_string()));
        }
        let cli = Cli::try_parse_from(&args)?;
        if cli.files.is_empty() {
            return Err(ShareError::Usage(HELP_TEXT.to_string()));
        }

        let config = ShareConfig::from_env(self.env.as_ref())?;
        let storage = self.connector.connect(&config).await?;
        let uploader = UploadService::with_storage(self.file_system.clone(), storage);

        let mut outcomes = Vec::with_capacity(cli.files.len());
        for path in cli.files {
            let span = tracing::info_span!("share", path = %path.display());
            let request = UploadRequest::new(path, config.bucket.clone());
            let outcome = uploader.upload(&request).instrument(span).await?;
            writeln!(out, "{}", outcome.url).map_err(ShareError::Output)?;
            outcomes.push(outcome);
        }

        tracing::debug!("shared {} file(s)", outcomes.len());
        Ok(outcomes)
    }
}
