use backend::services::NewSession;
use backend::{AppError, ErrorCode, GameConfig};
use time::Duration;

use crate::support::test_state::test_state_builder;

fn config_with_ttl(seconds: i64) -> GameConfig {
    GameConfig {
        game_ttl_seconds: seconds,
        ..GameConfig::default()
    }
}

#[test]
fn idle_session_is_gone_after_ttl() -> Result<(), AppError> {
    let (builder, clock) = test_state_builder(config_with_ttl(60));
    let state = builder.build()?;
    let sessions = state.sessions();

    let created = sessions.create_session(NewSession::default())?;
    clock.advance(Duration::seconds(61));

    assert_eq!(sessions.evict_expired(), 1);
    let err = sessions.get_state(&created.session_id).unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
    Ok(())
}

/// Polling the state refreshes `updatedAt`, so a watched session survives.
#[test]
fn polling_keeps_a_session_alive() -> Result<(), AppError> {
    let (builder, clock) = test_state_builder(config_with_ttl(60));
    let state = builder.build()?;
    let sessions = state.sessions();

    let created = sessions.create_session(NewSession::default())?;
    for _ in 0..5 {
        clock.advance(Duration::seconds(45));
        sessions.get_state(&created.session_id)?;
        assert_eq!(sessions.evict_expired(), 0);
    }
    Ok(())
}

/// Create and join sweep stale sessions before doing their own work.
#[test]
fn create_sweeps_stale_sessions() -> Result<(), AppError> {
    let (builder, clock) = test_state_builder(config_with_ttl(60));
    let state = builder.build()?;
    let sessions = state.sessions();

    let stale = sessions.create_session(NewSession::default())?;
    clock.advance(Duration::minutes(5));
    let fresh = sessions.create_session(NewSession::default())?;

    assert!(!sessions.store().contains(&stale.session_id));
    assert!(sessions.store().contains(&fresh.session_id));

    let err = sessions
        .join_session(&stale.session_id, None, None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
    Ok(())
}
