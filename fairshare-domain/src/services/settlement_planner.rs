use crate::model::{Balance, Money, PersonId, SettlementResult, Transfer};
use indexmap::IndexMap;

/// Mutable per-person state owned by a single planner run.
#[derive(Debug)]
struct WorkingEntry {
    balance: Money,
    incoming: Vec<Transfer>,
    outgoing: Vec<Transfer>,
}

/// Settlement planning service
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Plan transfers that bring every balance to zero.
    ///
    /// Single forward pass in input order: each person still holding a
    /// positive balance collects from debtors, first fit, in input order,
    /// taking the smaller of the two remaining magnitudes per transfer.
    /// Updates to a debtor are visible to every later creditor in the pass.
    /// The result is deterministic but not the minimum number of transfers.
    ///
    /// The caller's balances are never touched. A creditor left with a
    /// positive remainder after all debtors are exhausted keeps it as its
    /// final balance; that remainder is rounding drift, not an error.
    ///
    /// # Arguments
    /// * `balances` - Balances as produced by the aggregator, ids unique
    ///
    /// # Returns
    /// One result per input balance, same order, with final balances
    pub fn compute_settlement(&self, balances: &[Balance]) -> Vec<SettlementResult> {
        let mut working: IndexMap<PersonId, WorkingEntry> = balances
            .iter()
            .map(|balance| {
                (
                    balance.id,
                    WorkingEntry {
                        balance: balance.balance,
                        incoming: Vec::new(),
                        outgoing: Vec::new(),
                    },
                )
            })
            .collect();
        debug_assert_eq!(working.len(), balances.len(), "person ids must be unique");

        let mut transfer_count = 0usize;
        for creditor_idx in 0..working.len() {
            let (&creditor, entry) = match working.get_index(creditor_idx) {
                Some(found) => found,
                None => continue,
            };
            let mut remaining = entry.balance;
            if !remaining.is_positive() {
                continue;
            }

            let mut incoming = Vec::new();
            for debtor_idx in 0..working.len() {
                if !remaining.is_positive() {
                    break;
                }
                if debtor_idx == creditor_idx {
                    continue;
                }
                let Some((&debtor, debtor_entry)) = working.get_index_mut(debtor_idx) else {
                    continue;
                };
                if !debtor_entry.balance.is_negative() {
                    continue;
                }

                let amount = debtor_entry.balance.abs().min(remaining);
                debtor_entry.balance += amount;
                debtor_entry.outgoing.push(Transfer {
                    id: creditor,
                    amount,
                });
                incoming.push(Transfer { id: debtor, amount });
                remaining -= amount;
                transfer_count += 1;

                tracing::trace!(
                    from = %debtor,
                    to = %creditor,
                    amount = %amount,
                    remaining = %remaining,
                    "Transfer planned"
                );
            }

            if let Some(entry) = working.get_index_mut(creditor_idx).map(|(_, entry)| entry) {
                entry.balance = remaining.round2();
                entry.incoming = incoming;
                if !entry.balance.is_zero() {
                    tracing::debug!(
                        person = %creditor,
                        residual = %entry.balance,
                        "Creditor keeps a residual balance after all debtors were settled"
                    );
                }
            }
        }

        tracing::debug!(
            person_count = balances.len(),
            transfer_count,
            "Settlement planned"
        );

        balances
            .iter()
            .map(|balance| {
                let (final_balance, incoming, outgoing) = match working.get_mut(&balance.id) {
                    Some(entry) => (
                        entry.balance.round2(),
                        std::mem::take(&mut entry.incoming),
                        std::mem::take(&mut entry.outgoing),
                    ),
                    None => (balance.balance, Vec::new(), Vec::new()),
                };
                SettlementResult {
                    id: balance.id,
                    name: balance.name.clone(),
                    balance: final_balance,
                    incoming,
                    outgoing,
                }
            })
            .collect()
    }
}
