use anticheat_editor::{
    api::ReviewApi, documents::seed, editor::EditorSession, submission::SubmissionState, Status,
    Tracing,
};
use clap::Parser;
use std::{env, path::PathBuf, process::ExitCode, sync::Arc, time::Duration};
use tracing::{error, info, info_span, Instrument};

/// Submits an edited games collection for review.
#[derive(Parser)]
struct Opts {
    /// Path to the edited games.json collection.
    #[clap(long, default_value = "games.json")]
    games: PathBuf,

    /// Review endpoint receiving the collection.
    #[clap(long, default_value = ReviewApi::default_endpoint())]
    endpoint: String,

    /// Request timeout in seconds.
    #[clap(long, default_value = "30")]
    timeout_secs: u64,

    /// Print the payload instead of submitting it.
    #[clap(long)]
    dry_run: bool,

    #[clap(long)]
    prod_tracing: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Status> {
    let opts: Opts = Opts::parse();

    match opts.prod_tracing {
        false => Tracing::setup("submit-changes")?,
        true => Tracing::setup_prod("submit-changes", "submit_logs")?,
    }

    // Let ENV VAR override flag.
    let endpoint = match env::var("SUBMIT_ENDPOINT") {
        Ok(endpoint) if !endpoint.is_empty() => endpoint,
        _ => opts.endpoint,
    };

    let records = seed::load(&opts.games)?;
    let transport = ReviewApi::new(endpoint, Duration::from_secs(opts.timeout_secs))?;
    let session = EditorSession::new(records, Arc::new(transport));
    info!(
        "loaded {} games using {} anti-cheats",
        session.records().len(),
        session.vocabulary().len()
    );

    if opts.dry_run {
        let issues = session.validate();
        for issue in &issues {
            error!("{issue}");
        }
        println!("{}", session.snapshot().to_json()?);
        return Ok(exit_code(issues.is_empty()));
    }

    let result = session
        .submit_validated()
        .instrument(info_span!("submit_changes"))
        .await;

    match result {
        Ok(Some(state)) => {
            if let Some(notice) = state.notice() {
                println!("{}\n{}", notice.title, notice.message);
            }
            Ok(exit_code(!matches!(state, SubmissionState::Failure(..))))
        }
        Ok(None) => Ok(exit_code(false)),
        Err(issues) => {
            for issue in &issues {
                error!("{issue}");
            }
            Ok(exit_code(false))
        }
    }
}

fn exit_code(ok: bool) -> ExitCode {
    match ok {
        true => ExitCode::SUCCESS,
        false => ExitCode::FAILURE,
    }
}
