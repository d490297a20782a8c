use roomjwt::{
    BatchRequest, DisplayName, EmptyRoomId, InvalidParticipantCount, IssueRequest,
    ParticipantCount, RoomId, UserId,
};

//--------------------------------------------------------------------------------------------------
// Usage
//--------------------------------------------------------------------------------------------------

pub const USAGE: &str = "\
Generate a test JWT token for conferencing authentication in staging

Usage:
    generate-test-jwt <room-id> [user-id] [display-name] [--moderator|-m]
    generate-test-jwt <room-id> --multi-user|-mu [--count N] [--moderator-first|--mf]

--count (1 to 100) and --moderator-first need --multi-user, and --moderator cannot be combined
with it; either mismatch exits with status 1. Arguments after -- are never read as options.

Examples:
    generate-test-jwt SolarRealmsPushToo
    generate-test-jwt SolarRealmsPushToo user123 \"John Doe\" --moderator
    generate-test-jwt SolarRealmsPushToo --multi-user --count 5 --moderator-first
";

//--------------------------------------------------------------------------------------------------
// Parsed command line
//--------------------------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Single(IssueRequest),
    Batch(BatchRequest),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("missing room id")]
    MissingRoom,

    #[error(transparent)]
    EmptyRoom(#[from] EmptyRoomId),

    #[error("--count requires a value")]
    MissingCount,

    #[error(transparent)]
    InvalidCount(#[from] InvalidParticipantCount),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("{0} is only valid with --multi-user")]
    BatchOnly(String),

    #[error("{0} cannot be combined with --multi-user, use --moderator-first")]
    SingleOnly(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

#[derive(Default)]
struct Flags {
    moderator: Option<String>,
    multi_user: bool,
    moderator_first: Option<String>,
    count: Option<(String, ParticipantCount)>,
}

/// Parse everything after the program name. Nothing here touches the secret store, so a bad
/// command line always fails before any lookup.
pub fn parse<I, S>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut flags = Flags::default();
    let mut positionals: Vec<String> = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        match arg {
            "--" => {
                positionals.extend(args.by_ref().map(|rest| rest.as_ref().to_string()));
                break;
            }
            "-h" | "--help" => return Ok(Invocation::Help),
            "-m" | "--moderator" => flags.moderator = Some(arg.to_string()),
            "-mu" | "--multi-user" => flags.multi_user = true,
            "--mf" | "--moderator-first" => flags.moderator_first = Some(arg.to_string()),
            "--count" => {
                let value = args.next().ok_or(UsageError::MissingCount)?;
                let count = value.as_ref().parse::<ParticipantCount>()?;
                flags.count = Some((arg.to_string(), count));
            }
            _ => {
                if let Some(value) = arg.strip_prefix("--count=") {
                    flags.count = Some(("--count".to_string(), value.parse()?));
                } else if arg.starts_with('-') && arg.len() > 1 {
                    return Err(UsageError::UnknownOption(arg.to_string()));
                } else {
                    positionals.push(arg.to_string());
                }
            }
        }
    }

    let mut positionals = positionals.into_iter();
    let room = RoomId::new(positionals.next().ok_or(UsageError::MissingRoom)?)?;

    if flags.multi_user {
        if let Some(flag) = flags.moderator {
            return Err(UsageError::SingleOnly(flag));
        }
        if let Some(extra) = positionals.next() {
            return Err(UsageError::UnexpectedArgument(extra));
        }

        let mut request = BatchRequest::new(room);
        if let Some((_, count)) = flags.count {
            request.count = count;
        }
        request.moderator_first = flags.moderator_first.is_some();
        return Ok(Invocation::Batch(request));
    }

    if let Some(flag) = flags.moderator_first {
        return Err(UsageError::BatchOnly(flag));
    }
    if let Some((flag, _)) = flags.count {
        return Err(UsageError::BatchOnly(flag));
    }

    let mut request = IssueRequest::new(room).moderator(flags.moderator.is_some());
    if let Some(user_id) = positionals.next() {
        request = request.user_id(UserId::new(user_id));
    }
    if let Some(display_name) = positionals.next() {
        request = request.display_name(DisplayName::new(display_name));
    }
    if let Some(extra) = positionals.next() {
        return Err(UsageError::UnexpectedArgument(extra));
    }

    Ok(Invocation::Single(request))
}

//--------------------------------------------------------------------------------------------------
