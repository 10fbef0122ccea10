//! Work order lifecycle
//!
//! A work order is drafted, sent for review, then approved or rejected by
//! an admin. Rejected orders can be corrected and sent again. Approved and
//! rejected orders are finally closed by an admin, recording how the order
//! was paid.
//!
//! | From        | Action  | To          |
//! |-------------|---------|-------------|
//! | Borrador    | submit  | En revisión |
//! | Rechazada   | submit  | En revisión |
//! | En revisión | approve | Aprobada    |
//! | En revisión | reject  | Rechazada   |
//! | Aprobada    | close   | Cerrada     |
//! | Rechazada   | close   | Cerrada     |

use crate::core::error::WorkflowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a work order, serialized with the backend's labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    #[serde(rename = "Borrador")]
    Draft,
    #[serde(rename = "En revisión")]
    InReview,
    #[serde(rename = "Aprobada")]
    Approved,
    #[serde(rename = "Rechazada")]
    Rejected,
    #[serde(rename = "Cerrada")]
    Closed,
}

impl WorkOrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WorkOrderStatus::Draft => "Borrador",
            WorkOrderStatus::InReview => "En revisión",
            WorkOrderStatus::Approved => "Aprobada",
            WorkOrderStatus::Rejected => "Rechazada",
            WorkOrderStatus::Closed => "Cerrada",
        }
    }

    /// Whether the order's lines can still be changed
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            WorkOrderStatus::Draft | WorkOrderStatus::Rejected | WorkOrderStatus::InReview
        )
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WorkOrderStatus {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Borrador" => Ok(WorkOrderStatus::Draft),
            "En revisión" => Ok(WorkOrderStatus::InReview),
            "Aprobada" => Ok(WorkOrderStatus::Approved),
            "Rechazada" => Ok(WorkOrderStatus::Rejected),
            "Cerrada" => Ok(WorkOrderStatus::Closed),
            other => Err(WorkflowError::UnknownStatus {
                label: other.to_string(),
            }),
        }
    }
}

/// Something a user can do to a work order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderAction {
    View,
    Edit,
    Submit,
    Approve,
    Reject,
    Close,
}

impl fmt::Display for WorkOrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkOrderAction::View => "view",
            WorkOrderAction::Edit => "edit",
            WorkOrderAction::Submit => "submit",
            WorkOrderAction::Approve => "approve",
            WorkOrderAction::Reject => "reject",
            WorkOrderAction::Close => "close",
        };
        f.write_str(name)
    }
}

/// Actions offered for an order, in display order
pub fn available_actions(status: WorkOrderStatus, is_admin: bool) -> Vec<WorkOrderAction> {
    use WorkOrderAction::*;
    use WorkOrderStatus::*;

    let mut actions = vec![View];
    if status.is_editable() {
        actions.push(Edit);
    }
    if matches!(status, Draft | Rejected) {
        actions.push(Submit);
    }
    if is_admin {
        match status {
            InReview => actions.extend([Approve, Reject]),
            Approved | Rejected => actions.push(Close),
            Draft | Closed => {}
        }
    }
    actions
}

/// Status after applying `action`
///
/// `View` and `Edit` keep the status (edits are only allowed while the
/// order is editable).
pub fn transition(
    status: WorkOrderStatus,
    action: WorkOrderAction,
) -> Result<WorkOrderStatus, WorkflowError> {
    use WorkOrderAction::*;
    use WorkOrderStatus::*;

    let next = match (status, action) {
        (_, View) => Some(status),
        (s, Edit) if s.is_editable() => Some(status),
        (Draft | Rejected, Submit) => Some(InReview),
        (InReview, Approve) => Some(Approved),
        (InReview, Reject) => Some(Rejected),
        (Approved | Rejected, Close) => Some(Closed),
        _ => None,
    };

    next.ok_or_else(|| WorkflowError::InvalidTransition {
        status: status.label().to_string(),
        action: action.to_string(),
    })
}

/// How a closed order was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Full,
    Partial,
}

/// Payment information recorded when closing an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseOrderPayment {
    pub was_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
}

impl CloseOrderPayment {
    pub fn unpaid() -> Self {
        Self {
            was_paid: false,
            payment_type: None,
            paid_amount: None,
        }
    }

    pub fn full() -> Self {
        Self {
            was_paid: true,
            payment_type: Some(PaymentType::Full),
            paid_amount: None,
        }
    }

    pub fn partial(amount: f64) -> Self {
        Self {
            was_paid: true,
            payment_type: Some(PaymentType::Partial),
            paid_amount: Some(amount),
        }
    }

    /// A partial payment needs a positive, finite amount no larger than the total
    pub fn validate(&self, order_total: f64) -> Result<(), WorkflowError> {
        if !self.was_paid || self.payment_type != Some(PaymentType::Partial) {
            return Ok(());
        }

        let amount = self.paid_amount.ok_or(WorkflowError::MissingPaymentAmount)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(WorkflowError::NonPositivePayment { amount });
        }
        if amount > order_total {
            return Err(WorkflowError::PaymentExceedsTotal {
                amount,
                total: order_total,
            });
        }
        Ok(())
    }
}

/// Close an order, checking both the status and the payment
pub fn close_order(
    status: WorkOrderStatus,
    order_total: f64,
    payment: &CloseOrderPayment,
) -> Result<WorkOrderStatus, WorkflowError> {
    let next = transition(status, WorkOrderAction::Close)?;
    payment.validate(order_total)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use WorkOrderAction::*;
    use WorkOrderStatus::*;

    #[test]
    fn test_status_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&InReview).unwrap();
        assert_eq!(json, "\"En revisión\"");
        let status: WorkOrderStatus = serde_json::from_str("\"Rechazada\"").unwrap();
        assert_eq!(status, Rejected);
    }

    #[test]
    fn test_unknown_status_label() {
        assert!(matches!(
            "Pendiente".parse::<WorkOrderStatus>(),
            Err(WorkflowError::UnknownStatus { .. })
        ));
        assert_eq!("Cerrada".parse::<WorkOrderStatus>().unwrap(), Closed);
    }

    #[test]
    fn test_actions_for_operator() {
        assert_eq!(available_actions(Draft, false), vec![View, Edit, Submit]);
        assert_eq!(available_actions(InReview, false), vec![View, Edit]);
        assert_eq!(available_actions(Rejected, false), vec![View, Edit, Submit]);
        assert_eq!(available_actions(Approved, false), vec![View]);
        assert_eq!(available_actions(Closed, false), vec![View]);
    }

    #[test]
    fn test_actions_for_admin() {
        assert_eq!(
            available_actions(InReview, true),
            vec![View, Edit, Approve, Reject]
        );
        assert_eq!(available_actions(Approved, true), vec![View, Close]);
        assert_eq!(
            available_actions(Rejected, true),
            vec![View, Edit, Submit, Close]
        );
    }

    #[test]
    fn test_happy_path() {
        let status = transition(Draft, Submit).unwrap();
        let status = transition(status, Approve).unwrap();
        let status = transition(status, Close).unwrap();
        assert_eq!(status, Closed);
    }

    #[test]
    fn test_rejected_can_be_resubmitted() {
        let status = transition(InReview, Reject).unwrap();
        assert_eq!(transition(status, Submit).unwrap(), InReview);
    }

    #[test]
    fn test_invalid_transitions() {
        let err = transition(Draft, Approve).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::InvalidTransition {
                status: "Borrador".to_string(),
                action: "approve".to_string()
            }
        );
        assert!(transition(Closed, Edit).is_err());
        assert!(transition(InReview, Submit).is_err());
        assert!(transition(Draft, Close).is_err());
        assert_eq!(transition(Closed, View).unwrap(), Closed);
    }

    #[test]
    fn test_available_actions_agree_with_transition() {
        for status in [Draft, InReview, Approved, Rejected, Closed] {
            for action in available_actions(status, true) {
                assert!(
                    transition(status, action).is_ok(),
                    "{action} offered for {status} but not allowed"
                );
            }
        }
    }

    #[test]
    fn test_partial_payment_validation() {
        assert!(CloseOrderPayment::unpaid().validate(100.0).is_ok());
        assert!(CloseOrderPayment::full().validate(100.0).is_ok());
        assert!(CloseOrderPayment::partial(40.0).validate(100.0).is_ok());
        assert!(CloseOrderPayment::partial(100.0).validate(100.0).is_ok());

        assert_eq!(
            CloseOrderPayment::partial(0.0).validate(100.0),
            Err(WorkflowError::NonPositivePayment { amount: 0.0 })
        );
        assert!(matches!(
            CloseOrderPayment::partial(150.0).validate(100.0),
            Err(WorkflowError::PaymentExceedsTotal { .. })
        ));

        assert!(matches!(
            CloseOrderPayment::partial(f64::NAN).validate(100.0),
            Err(WorkflowError::NonPositivePayment { .. })
        ));
        assert!(matches!(
            CloseOrderPayment::partial(f64::INFINITY).validate(100.0),
            Err(WorkflowError::NonPositivePayment { .. })
        ));

        let missing = CloseOrderPayment {
            was_paid: true,
            payment_type: Some(PaymentType::Partial),
            paid_amount: None,
        };
        assert_eq!(
            missing.validate(100.0),
            Err(WorkflowError::MissingPaymentAmount)
        );
    }

    #[test]
    fn test_close_order_checks_status_first() {
        let bad_payment = CloseOrderPayment::partial(-1.0);
        assert!(matches!(
            close_order(Draft, 100.0, &bad_payment),
            Err(WorkflowError::InvalidTransition { .. })
        ));
        assert!(matches!(
            close_order(Approved, 100.0, &bad_payment),
            Err(WorkflowError::NonPositivePayment { .. })
        ));
        assert_eq!(
            close_order(Rejected, 100.0, &CloseOrderPayment::full()).unwrap(),
            Closed
        );
    }
}
