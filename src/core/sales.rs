//! Sales rules shared by the sale form and the sales tables
//!
//! A sale is a client plus one or more lines (product, quantity, unit
//! price). Payments are recorded against a sale over time; the backend
//! keeps `monto_pagado` and derives the payment status from it.

use crate::core::error::SalesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of a sale being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producto_id: Option<i64>,
    pub cantidad: f64,
    pub precio_unitario: f64,
}

impl SaleLine {
    pub fn new(producto_id: i64, cantidad: f64, precio_unitario: f64) -> Self {
        Self {
            producto_id: Some(producto_id),
            cantidad,
            precio_unitario,
        }
    }

    pub fn amount(&self) -> f64 {
        self.cantidad * self.precio_unitario
    }
}

/// Sum of `cantidad * precio_unitario` over the lines
pub fn sale_subtotal(lines: &[SaleLine]) -> f64 {
    lines.iter().map(SaleLine::amount).sum()
}

/// Check a sale before it is sent
///
/// A client must be selected and every line needs a product and a
/// positive quantity. Lines are numbered from 1 in errors.
pub fn validate_sale(cliente_id: Option<i64>, lines: &[SaleLine]) -> Result<(), SalesError> {
    if cliente_id.is_none() {
        return Err(SalesError::MissingClient);
    }
    if lines.is_empty() {
        return Err(SalesError::NoLines);
    }

    for (i, line) in lines.iter().enumerate() {
        if line.producto_id.is_none() {
            return Err(SalesError::MissingProduct { line: i + 1 });
        }
        if !line.cantidad.is_finite() || line.cantidad <= 0.0 {
            return Err(SalesError::InvalidQuantity {
                line: i + 1,
                cantidad: line.cantidad,
            });
        }
    }
    Ok(())
}

/// What is still owed on a sale
pub fn outstanding_balance(total: f64, monto_pagado: f64) -> f64 {
    total - monto_pagado
}

/// Payment status of a sale, serialized with the backend's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pagado,
    Parcial,
    Pendiente,
}

impl PaymentStatus {
    /// Status the backend assigns after recording payments
    pub fn from_amounts(total: f64, monto_pagado: f64) -> Self {
        if monto_pagado >= total {
            PaymentStatus::Pagado
        } else if monto_pagado > 0.0 {
            PaymentStatus::Parcial
        } else {
            PaymentStatus::Pendiente
        }
    }

    /// Chip label shown in the sales table
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pagado => "Pagada",
            PaymentStatus::Parcial => "Parcial",
            PaymentStatus::Pendiente => "Pendiente",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Check a client payment amount
///
/// The amount must be a positive number.
pub fn validate_payment_amount(monto: f64) -> Result<(), SalesError> {
    if !monto.is_finite() || monto <= 0.0 {
        return Err(SalesError::InvalidPaymentAmount { monto });
    }
    Ok(())
}

/// Check a client payment amount as typed in the payment form
pub fn parse_payment_amount(raw: &str) -> Result<f64, SalesError> {
    let monto = raw.trim().parse::<f64>().unwrap_or(f64::NAN);
    validate_payment_amount(monto)?;
    Ok(monto)
}
