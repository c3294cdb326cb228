//! Ticket issuance tests.

use queue_core::{
    config::ModelConfig,
    rng::RngBank,
    ticket::{ServiceType, TicketIssuer, TicketNumber, TicketRequest},
    SimError,
};

fn request(name: &str) -> TicketRequest {
    TicketRequest::new(name, ServiceType::TuitionPayment)
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn issued_ticket_fields_are_consistent() {
    init_logging();
    let mut issuer = TicketIssuer::with_seed(42);

    for _ in 0..100 {
        let ticket = issuer.issue(request("Chidi Okafor")).unwrap();
        let position = ticket.position.get();

        assert!((1..=5).contains(&position), "position {position} outside [1, 5]");
        assert_eq!(ticket.base_wait.minutes(), position * 8);
        let wait = ticket.estimated_wait.minutes();
        assert!(wait >= ticket.base_wait.minutes() && wait <= ticket.base_wait.minutes() + 9,
            "estimated wait {wait} not within jitter of base {}", ticket.base_wait);
        assert!((TicketNumber::MIN..=TicketNumber::MAX).contains(&ticket.number.value()));
        assert!(ticket.number.to_string().starts_with('A'));
        assert_eq!(ticket.number.to_string().len(), 4);
    }
}

#[test]
fn blank_name_rejected() {
    let mut issuer = TicketIssuer::with_seed(1);
    for name in ["", "   "] {
        match issuer.issue(request(name)) {
            Err(SimError::InvalidTicketRequest { reason }) => {
                assert_eq!(reason, "Please fill in all fields");
            }
            other => panic!("Expected rejection for {name:?}, got {other:?}"),
        }
    }
}

#[test]
fn name_is_trimmed() {
    let mut issuer = TicketIssuer::with_seed(1);
    let ticket = issuer.issue(request("  Ngozi Eze ")).unwrap();
    assert_eq!(ticket.student_name, "Ngozi Eze");
}

#[test]
fn explicit_position_is_used() {
    let mut issuer = TicketIssuer::with_seed(3);
    let ticket = issuer.issue_at(request("Tunde Bello"), 12).unwrap();
    assert_eq!(ticket.position.get(), 12);
    assert_eq!(ticket.base_wait.minutes(), 96);
}

#[test]
fn explicit_position_zero_rejected() {
    let mut issuer = TicketIssuer::with_seed(3);
    assert!(matches!(
        issuer.issue_at(request("Tunde Bello"), 0),
        Err(SimError::InvalidParameter { .. })
    ));
}

#[test]
fn max_issued_position_limits_draws() {
    let mut issuer = TicketIssuer::new(&RngBank::new(9), &ModelConfig::default(), 2).unwrap();
    for _ in 0..100 {
        let position = issuer.issue(request("Amaka Nwosu")).unwrap().position.get();
        assert!(position <= 2, "position {position} above configured maximum");
    }
}

#[test]
fn zero_max_issued_position_rejected() {
    let result = TicketIssuer::new(&RngBank::new(9), &ModelConfig::default(), 0);
    assert!(matches!(result, Err(SimError::InvalidConfig { .. })));
}

#[test]
fn ticket_serializes_with_display_number() {
    let mut issuer = TicketIssuer::with_seed(5);
    let ticket = issuer.issue(TicketRequest::new("Ife Ade", ServiceType::ExamClearance)).unwrap();
    let json = serde_json::to_value(&ticket).unwrap();

    assert_eq!(json["number"], ticket.number.to_string());
    assert_eq!(json["service"], "exam_clearance");
    assert_eq!(json["position"], ticket.position.get());
}
