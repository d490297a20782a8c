use crate::args::{self, Invocation, UsageError};
use crate::cfg::Config;
use crate::report;
use roomjwt::{Clock, IssueError, SecretProvider, TokenIssuer};
use std::io::{self, Write};
use tracing::info;

//--------------------------------------------------------------------------------------------------
// Errors that end the run
//--------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Issue(#[from] IssueError),

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

//--------------------------------------------------------------------------------------------------
// One run of the tool
//--------------------------------------------------------------------------------------------------

pub fn execute<I, S, P, C, W>(
    args: I,
    cfg: &Config,
    provider: P,
    clock: C,
    out: &mut W,
) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: SecretProvider,
    C: Clock,
    W: Write,
{
    let invocation = args::parse(args)?;
    let issuer = TokenIssuer::new(provider, clock, cfg.profile.clone(), cfg.secret.clone());

    match invocation {
        Invocation::Help => report::write_usage(out)?,
        Invocation::Single(request) => {
            let issued = issuer.issue(request.clone())?;
            info!("Issued token for room {}", request.room());
            report::write_single(out, &request, &issued)?;
        }
        Invocation::Batch(request) => {
            let participants = issuer.issue_batch(&request)?;
            report::write_batch(out, &request.room, &participants)?;
        }
    }

    Ok(())
}

/// Process status for a finished run: 0 on success, 1 for every fatal condition.
pub fn exit_status(result: &Result<(), AppError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

//--------------------------------------------------------------------------------------------------
