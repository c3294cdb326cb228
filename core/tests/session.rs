//! Simulator session tests: the caller-held current outcome.

use queue_core::{
    advisory::Advisory,
    params::SimulationParameters,
    session::{SessionOutcome, SimulatorSession},
    SimError,
};

#[test]
fn new_session_has_defaults_and_no_outcome() {
    let session = SimulatorSession::default();
    assert_eq!(*session.parameters(), SimulationParameters::default());
    assert!(session.last_outcome().is_none());
}

#[test]
fn run_keeps_result_and_advisories() {
    let mut session = SimulatorSession::default();
    session.run().unwrap();

    match session.last_outcome() {
        Some(SessionOutcome::Completed { result, advisories }) => {
            assert_eq!(result.average_wait_minutes, 4);
            assert_eq!(advisories, &vec![Advisory::AcceptablePerformance]);
        }
        other => panic!("Expected a completed outcome, got {other:?}"),
    }
}

#[test]
fn changing_parameters_discards_previous_outcome() {
    let mut session = SimulatorSession::default();
    session.run().unwrap();
    session.set_parameters(SimulationParameters {
        server_count: 3,
        arrival_rate: 20.0,
        mean_service_time_minutes: 6.0,
    });
    assert!(session.last_outcome().is_none(), "stale outcome survived a parameter change");
}

#[test]
fn overload_is_kept_as_an_outcome() {
    let mut session = SimulatorSession::default();
    session.set_parameters(SimulationParameters {
        server_count: 1,
        arrival_rate: 20.0,
        mean_service_time_minutes: 5.0,
    });
    let outcome = session.run().unwrap();
    assert!(matches!(outcome, SessionOutcome::Overloaded { .. }));
}

#[test]
fn invalid_parameters_leave_no_outcome() {
    let mut session = SimulatorSession::default();
    session.run().unwrap();
    session.set_parameters(SimulationParameters {
        server_count: 0,
        arrival_rate: 10.0,
        mean_service_time_minutes: 5.0,
    });
    assert!(matches!(session.run(), Err(SimError::InvalidParameter { .. })));
    assert!(session.last_outcome().is_none());
}

#[test]
fn reset_restores_defaults_and_clears_outcome() {
    let mut session = SimulatorSession::default();
    session.set_parameters(SimulationParameters {
        server_count: 5,
        arrival_rate: 30.0,
        mean_service_time_minutes: 15.0,
    });
    session.run().unwrap();
    session.reset();

    assert_eq!(*session.parameters(), SimulationParameters::default());
    assert!(session.last_outcome().is_none());
}
