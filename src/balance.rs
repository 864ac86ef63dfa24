use std::collections::HashMap;

use crate::schemas::{Group, MemberId};

pub type Balances = HashMap<MemberId, i64>;

/// Net position of every member in cents. Positive means the member is owed
/// money, negative means the member owes money; the values always sum to
/// zero.
///
/// Each expense credits its payer with the full amount and splits the cost
/// over the participant list: every occurrence is debited the Euclidean
/// quotient, and the leftover cents land on the first participants in list
/// order, one cent each. Euclidean division keeps the remainder in `0..len`
/// even for negative amounts, so refunds conserve too. A participant listed
/// twice is charged twice.
pub fn compute_balances(group: &Group) -> Balances {
    let mut balances = Balances::new();
    for member in group.members() {
        balances.insert(member.id.clone(), 0);
    }
    for expense in group.expenses() {
        let amount = expense.amount_in_cents;
        if let Some(payer) = balances.get_mut(&expense.payer_id) {
            *payer += amount;
        }
        let count = expense.participants.len() as i64;
        let base = amount.div_euclid(count);
        let remainder = amount.rem_euclid(count);
        for (position, participant) in expense.participants.iter().enumerate() {
            let extra_cent = if (position as i64) < remainder { 1 } else { 0 };
            if let Some(balance) = balances.get_mut(participant) {
                *balance -= base + extra_cent;
            }
        }
    }
    balances
}
