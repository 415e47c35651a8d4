//! Flow and fee aggregation
//!
//! The vault never logs its fee. It is recovered per withdrawal as
//! `shares - usdcAmount`, since shares are redeemed 1:1 for the gross amount.

use serde::Serialize;
use types::numeric::{self, Amount, USDC_DECIMALS};
use vault_contracts::events::VaultEvent;

/// Totals over a set of vault events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSummary {
    pub deposits: u64,
    pub withdrawals: u64,
    #[serde(with = "numeric::serde_amount")]
    pub total_deposited: Amount,
    /// Shares burned, i.e. gross withdrawn value.
    #[serde(with = "numeric::serde_amount")]
    pub total_withdrawn_gross: Amount,
    /// Net stablecoin paid out to users.
    #[serde(with = "numeric::serde_amount")]
    pub total_paid_out: Amount,
    #[serde(with = "numeric::serde_amount")]
    pub estimated_fees: Amount,
}

impl ImpactSummary {
    /// Aggregate over any events; non-flow events are ignored.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a VaultEvent>) -> Self {
        events.into_iter().fold(Self::default(), |mut acc, event| {
            acc.add(event);
            acc
        })
    }

    pub fn add(&mut self, event: &VaultEvent) {
        match event {
            VaultEvent::Deposited(e) => {
                self.deposits += 1;
                self.total_deposited = self.total_deposited.saturating_add(e.usdc_amount);
            }
            VaultEvent::Withdrawn(e) => {
                self.withdrawals += 1;
                self.total_withdrawn_gross = self.total_withdrawn_gross.saturating_add(e.shares);
                self.total_paid_out = self.total_paid_out.saturating_add(e.usdc_amount);
                self.estimated_fees = self.estimated_fees.saturating_add(e.fee());
            }
            _ => {}
        }
    }

    /// Net value still held by the vault from these flows.
    pub fn net_flow(&self) -> Amount {
        self.total_deposited.saturating_sub(self.total_withdrawn_gross)
    }

    /// Fees in whole USDC, four decimal places.
    pub fn fees_display(&self) -> String {
        numeric::format_fixed(self.estimated_fees, USDC_DECIMALS, 4)
            .unwrap_or_else(|| self.estimated_fees.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::Address;
    use vault_contracts::events::{Deposited, Paused, Withdrawn};

    fn user() -> Address {
        Address::from_seed("user")
    }

    fn deposited(amount: Amount) -> VaultEvent {
        VaultEvent::Deposited(Deposited {
            user: user(),
            usdc_amount: amount,
            shares: amount,
        })
    }

    fn withdrawn(shares: Amount, net: Amount) -> VaultEvent {
        VaultEvent::Withdrawn(Withdrawn {
            user: user(),
            shares,
            usdc_amount: net,
        })
    }

    #[test]
    fn test_empty_summary() {
        let summary = ImpactSummary::from_events(std::iter::empty());
        assert_eq!(summary, ImpactSummary::default());
        assert_eq!(summary.fees_display(), "0.0000");
    }

    #[test]
    fn test_fee_reconstruction() {
        let events = vec![
            deposited(10_000_000),
            withdrawn(10_000_000, 9_950_000),
            deposited(2_000_000),
            withdrawn(150, 150),
        ];
        let summary = ImpactSummary::from_events(&events);

        assert_eq!(summary.deposits, 2);
        assert_eq!(summary.withdrawals, 2);
        assert_eq!(summary.total_deposited, 12_000_000);
        assert_eq!(summary.total_withdrawn_gross, 10_000_150);
        assert_eq!(summary.total_paid_out, 10_000_000 - 50_000 + 150);
        assert_eq!(summary.estimated_fees, 50_000);
        assert_eq!(summary.net_flow(), 1_999_850);
        assert_eq!(summary.fees_display(), "0.0500");
    }

    #[test]
    fn test_non_flow_events_ignored() {
        let events = vec![
            VaultEvent::Paused(Paused { account: user() }),
            deposited(5),
        ];
        let summary = ImpactSummary::from_events(&events);
        assert_eq!(summary.deposits, 1);
        assert_eq!(summary.withdrawals, 0);
    }

    #[test]
    fn test_summary_json() {
        let summary = ImpactSummary::from_events(&[withdrawn(1_000_000, 995_000)]);
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["estimatedFees"], "5000");
        assert_eq!(json["totalPaidOut"], "995000");
        assert_eq!(json["withdrawals"], 1);
    }
}
