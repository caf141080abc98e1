use fdesk_derive::api_model;
use fdesk_domain::{Contract, Payment, PaymentKind, metrics};

/// Money collected on one contract.
#[api_model]
pub struct FinancialSummary {
    pub contract: Contract,
    pub payments: Vec<Payment>,
    /// Regular payments minus refunds.
    pub total_paid: f64,
    pub deposits: f64,
    pub collection_rate: f64,
    pub outstanding_balance: f64,
}

impl FinancialSummary {
    /// Derives the figures from the payment records.
    ///
    /// A contract without payment records falls back to the totals the backend
    /// aggregated on the contract itself.
    #[must_use]
    pub fn new(contract: Contract, payments: Vec<Payment>) -> Self {
        let (total_paid, deposits) = if payments.is_empty() {
            (contract.total_paid, contract.deposit_amount)
        } else {
            payments.iter().fold((0.0, 0.0), |(paid, deposits), p| match p.kind {
                PaymentKind::Payment => (paid + p.amount, deposits),
                PaymentKind::Refund => (paid - p.amount, deposits),
                PaymentKind::Deposit => (paid, deposits + p.amount),
                PaymentKind::Unknown => (paid, deposits),
            })
        };

        let value = contract.total_amount;
        Self {
            collection_rate: metrics::collection_rate(value, total_paid, deposits),
            outstanding_balance: metrics::outstanding_balance(value, total_paid, deposits),
            contract,
            payments,
            total_paid,
            deposits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(kind: PaymentKind, amount: f64) -> Payment {
        Payment { amount, kind, ..Payment::default() }
    }

    #[test]
    fn test_summary_from_payment_records() {
        let contract = Contract { total_amount: 1000.0, ..Contract::default() };
        let summary = FinancialSummary::new(
            contract,
            vec![
                payment(PaymentKind::Payment, 250.0),
                payment(PaymentKind::Refund, 50.0),
                payment(PaymentKind::Deposit, 100.0),
                payment(PaymentKind::Unknown, 999.0),
            ],
        );

        assert!((summary.total_paid - 200.0).abs() < f64::EPSILON);
        assert!((summary.deposits - 100.0).abs() < f64::EPSILON);
        assert!((summary.collection_rate - 30.0).abs() < 1e-9);
        assert!((summary.outstanding_balance - 700.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_falls_back_to_contract_totals() {
        let contract = Contract {
            total_amount: 500.0,
            total_paid: 400.0,
            deposit_amount: 200.0,
            ..Contract::default()
        };
        let summary = FinancialSummary::new(contract, Vec::new());

        assert!((summary.collection_rate - 120.0).abs() < 1e-9);
        assert!(summary.outstanding_balance.abs() < f64::EPSILON);
    }
}
