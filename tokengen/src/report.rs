use crate::app::AppError;
use crate::args::{UsageError, USAGE};
use roomjwt::{IssueError, IssueRequest, IssuedToken, Participant, RoomId, SecretError};
use std::io::{self, Write};

//--------------------------------------------------------------------------------------------------
// Human readable output
//--------------------------------------------------------------------------------------------------

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

pub fn write_single<W: Write>(
    out: &mut W,
    request: &IssueRequest,
    issued: &IssuedToken,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "✅ JWT Token Generated Successfully!")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Room ID: {}", request.room())?;
    writeln!(out, "User ID: {}", request.effective_user_id())?;
    writeln!(out, "Display Name: {}", request.effective_display_name())?;
    writeln!(out, "Moderator: {}", request.is_moderator())?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out, "🔗 Full URL with JWT token:")?;
    writeln!(out, "{}", issued.join_url())?;
    writeln!(out)?;
    writeln!(out, "📋 JWT Token (for manual use):")?;
    writeln!(out, "{}", issued.token())?;
    writeln!(out)?;
    writeln!(out, "💡 Tip: Copy the full URL above and paste it into your browser")?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

pub fn write_batch<W: Write>(
    out: &mut W,
    room: &RoomId,
    participants: &[Participant],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "✅ Generated {} JWT tokens for room {}",
        participants.len(),
        room
    )?;
    writeln!(out, "{RULE}")?;
    for participant in participants {
        writeln!(
            out,
            "👤 Participant {}: {}",
            participant.index, participant.display_name
        )?;
        writeln!(out, "   User ID: {}", participant.user_id)?;
        writeln!(out, "   Moderator: {}", participant.moderator)?;
        writeln!(out, "   🔗 URL: {}", participant.join_url)?;
        writeln!(out, "   📋 Token: {}", participant.token)?;
        writeln!(out, "{THIN_RULE}")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "💡 Tip: Open each URL in a separate browser profile to simulate the session"
    )?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "{USAGE}")
}

//--------------------------------------------------------------------------------------------------
// Diagnostics
//--------------------------------------------------------------------------------------------------

pub fn write_failure<W: Write>(out: &mut W, err: &AppError) -> io::Result<()> {
    match err {
        AppError::Usage(UsageError::MissingRoom) => write_usage(out),
        AppError::Usage(usage) => {
            writeln!(out, "❌ Error: {usage}")?;
            writeln!(out)?;
            write_usage(out)
        }
        AppError::Issue(IssueError::Secret(SecretError::Access { secret, reason })) => {
            writeln!(out, "❌ Error: Could not retrieve JWT secret from Kubernetes")?;
            writeln!(
                out,
                "   Make sure kubectl is configured and you have access to the {} namespace",
                secret.namespace
            )?;
            writeln!(out, "   ({reason})")
        }
        AppError::Issue(IssueError::Secret(SecretError::Empty { secret })) => {
            writeln!(
                out,
                "❌ Error: JWT secret {} not found or empty",
                secret
            )
        }
        AppError::Issue(IssueError::Secret(SecretError::Decode { reason, .. })) => {
            writeln!(out, "❌ Error decoding secret: {reason}")
        }
        AppError::Issue(IssueError::Signing(e)) => {
            writeln!(out, "❌ Error generating token: {e}")
        }
        AppError::Output(e) => writeln!(out, "❌ Error writing report: {e}"),
    }
}

//--------------------------------------------------------------------------------------------------
