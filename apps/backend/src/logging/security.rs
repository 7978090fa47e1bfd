use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a player attempting a host-only action.
pub fn host_action_denied(action: &str, session_id: &str, player_id: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_HOST_ACTION_DENIED",
        %trace_id,
        action,
        session_id,
        player_id = %Redacted(player_id),
        "Non-host attempted a host-only action"
    );
}
