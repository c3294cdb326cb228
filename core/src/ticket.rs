//! Ticket issuance at the accounts-office desk.
//!
//! The issuer draws the illustrative queue position, the display jitter
//! and the ticket number from separate seeded streams, then asks the
//! position-based predictor for the wait. It keeps no queue state.

use crate::{
    config::ModelConfig,
    error::{SimError, SimResult},
    predictor::WaitPredictor,
    rng::{RandomSource, RngBank, SeededRng, StreamSlot},
    types::{QueuePosition, TicketWaitEstimate},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    TuitionPayment,
    ReceiptCollection,
    FeeInquiry,
    ExamClearance,
    PaymentVerification,
    RefundRequest,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        Self::TuitionPayment,
        Self::ReceiptCollection,
        Self::FeeInquiry,
        Self::ExamClearance,
        Self::PaymentVerification,
        Self::RefundRequest,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::TuitionPayment      => "tuition_payment",
            Self::ReceiptCollection   => "receipt_collection",
            Self::FeeInquiry          => "fee_inquiry",
            Self::ExamClearance       => "exam_clearance",
            Self::PaymentVerification => "payment_verification",
            Self::RefundRequest       => "refund_request",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TuitionPayment      => "Tuition Payment",
            Self::ReceiptCollection   => "Receipt Collection",
            Self::FeeInquiry          => "Fee Inquiry",
            Self::ExamClearance       => "Exam Clearance",
            Self::PaymentVerification => "Payment Verification",
            Self::RefundRequest       => "Refund Request",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ServiceType {
    type Err = SimError;

    /// Accepts either the snake_case id or the display label.
    fn from_str(s: &str) -> SimResult<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|service| service.id() == s || service.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| SimError::InvalidTicketRequest {
                reason: format!("Unknown service type: {s}"),
            })
    }
}

/// Display number printed on the ticket, e.g. "A417".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TicketNumber(u16);

impl TicketNumber {
    pub const PREFIX: char = 'A';
    pub const MIN: u16 = 100;
    pub const MAX: u16 = 999;

    pub fn draw(rng: &mut impl RandomSource) -> Self {
        Self(rng.next_in_range(Self::MIN as u64, Self::MAX as u64) as u16)
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", Self::PREFIX, self.0)
    }
}

impl From<TicketNumber> for String {
    fn from(number: TicketNumber) -> String {
        number.to_string()
    }
}

impl TryFrom<String> for TicketNumber {
    type Error = SimError;

    fn try_from(s: String) -> SimResult<Self> {
        s.strip_prefix(Self::PREFIX)
            .and_then(|digits| digits.parse::<u16>().ok())
            .filter(|n| (Self::MIN..=Self::MAX).contains(n))
            .map(Self)
            .ok_or_else(|| SimError::InvalidTicketRequest {
                reason: format!("Malformed ticket number: {s}"),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRequest {
    pub student_name: String,
    pub service:      ServiceType,
}

impl TicketRequest {
    pub fn new(student_name: impl Into<String>, service: ServiceType) -> Self {
        Self { student_name: student_name.into(), service }
    }

    fn validate(&self) -> SimResult<()> {
        if self.student_name.trim().is_empty() {
            return Err(SimError::InvalidTicketRequest {
                reason: "Please fill in all fields".into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedTicket {
    pub id:             Uuid,
    pub number:         TicketNumber,
    pub student_name:   String,
    pub service:        ServiceType,
    pub position:       QueuePosition,
    /// Deterministic part of the wait.
    pub base_wait:      TicketWaitEstimate,
    /// What the student is shown: base wait plus display jitter.
    pub estimated_wait: TicketWaitEstimate,
    pub issued_at:      DateTime<Utc>,
}

pub struct TicketIssuer {
    predictor:           WaitPredictor,
    max_issued_position: u32,
    number_rng:          SeededRng,
    position_rng:        SeededRng,
    jitter_rng:          SeededRng,
}

impl TicketIssuer {
    pub fn new(bank: &RngBank, config: &ModelConfig, max_issued_position: u32) -> SimResult<Self> {
        if max_issued_position == 0 {
            return Err(SimError::InvalidConfig {
                reason: "max_issued_position must be at least 1".into(),
            });
        }
        Ok(Self::from_parts(bank, WaitPredictor::from_config(config), max_issued_position))
    }

    /// Issuer with default model constants and positions drawn from [1, 5].
    pub fn with_seed(seed: u64) -> Self {
        Self::from_parts(&RngBank::new(seed), WaitPredictor::default(), 5)
    }

    fn from_parts(bank: &RngBank, predictor: WaitPredictor, max_issued_position: u32) -> Self {
        let issuer = Self {
            predictor,
            max_issued_position,
            number_rng:   bank.for_stream(StreamSlot::TicketNumber),
            position_rng: bank.for_stream(StreamSlot::QueuePosition),
            jitter_rng:   bank.for_stream(StreamSlot::WaitJitter),
        };
        log::debug!(
            "ticket: issuer seeded from {} streams=[{}, {}, {}] max_position={max_issued_position}",
            bank.master_seed(),
            issuer.number_rng.name,
            issuer.position_rng.name,
            issuer.jitter_rng.name,
        );
        issuer
    }

    /// Issue a ticket at a randomly drawn illustrative position.
    pub fn issue(&mut self, request: TicketRequest) -> SimResult<IssuedTicket> {
        request.validate()?;
        let position = self
            .position_rng
            .next_in_range(1, self.max_issued_position as u64) as u32;
        self.issue_at(request, position)
    }

    /// Issue a ticket at a known queue rank.
    pub fn issue_at(&mut self, request: TicketRequest, position: u32) -> SimResult<IssuedTicket> {
        request.validate()?;
        let position = QueuePosition::new(position)?;
        let base_wait = self.predictor.predict_at(position);
        let estimated_wait = self
            .predictor
            .predict_with_jitter(position.get(), &mut self.jitter_rng)?;
        let number = TicketNumber::draw(&mut self.number_rng);

        log::info!(
            "ticket: issued {number} service={} position={position} wait={}",
            request.service.id(),
            estimated_wait.minutes()
        );

        Ok(IssuedTicket {
            id: Uuid::new_v4(),
            number,
            student_name: request.student_name.trim().to_string(),
            service: request.service,
            position,
            base_wait,
            estimated_wait,
            issued_at: Utc::now(),
        })
    }
}
