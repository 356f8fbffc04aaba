use super::{FareCalculator, FareError, FareRule};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// a [`FareCalculator`] backed by a fixed list of symmetric stop-to-stop fares.
#[derive(Clone, Debug, Default)]
pub struct FareTable {
    fares: HashMap<(String, String), Decimal>,
    max_fares: HashMap<String, Decimal>,
}

impl FareTable {
    /// builds the lookup tables, rejecting rules that could not price a
    /// real journey: self loops, negative amounts, and the same stop pair
    /// listed twice with different amounts.
    pub fn new(rules: &[FareRule]) -> Result<FareTable, FareError> {
        let mut fares: HashMap<(String, String), Decimal> = HashMap::new();
        let mut max_fares: HashMap<String, Decimal> = HashMap::new();
        for rule in rules.iter() {
            if rule.from == rule.to {
                return Err(FareError::SelfLoopRuleError(rule.from.clone()));
            }
            if rule.amount < Decimal::ZERO {
                return Err(FareError::NegativeFareError {
                    from: rule.from.clone(),
                    to: rule.to.clone(),
                    amount: rule.amount,
                });
            }
            let key = pair_key(&rule.from, &rule.to);
            match fares.get(&key) {
                Some(existing) if *existing != rule.amount => {
                    return Err(FareError::ConflictingRuleError {
                        from: rule.from.clone(),
                        to: rule.to.clone(),
                        existing: *existing,
                        conflict: rule.amount,
                    });
                }
                _ => {
                    fares.insert(key, rule.amount);
                }
            }
            for stop in [&rule.from, &rule.to] {
                let max_fare = max_fares.entry(stop.clone()).or_insert(rule.amount);
                if rule.amount > *max_fare {
                    *max_fare = rule.amount;
                }
            }
        }
        log::debug!(
            "built fare table with {} stop pairs across {} stops",
            fares.len(),
            max_fares.len()
        );
        Ok(FareTable { fares, max_fares })
    }

    /// number of distinct stop pairs with a fare.
    pub fn len(&self) -> usize {
        self.fares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fares.is_empty()
    }
}

impl FareCalculator for FareTable {
    fn calculate_fare(&self, origin: &str, destination: &str) -> Result<Decimal, FareError> {
        self.fares
            .get(&pair_key(origin, destination))
            .copied()
            .ok_or_else(|| {
                FareError::UnknownStopPairError(origin.to_string(), destination.to_string())
            })
    }

    fn calculate_max_fare(&self, stop_id: &str) -> Result<Decimal, FareError> {
        self.max_fares
            .get(stop_id)
            .copied()
            .ok_or_else(|| FareError::UnknownStopError(stop_id.to_string()))
    }
}

/// fares are symmetric, so pairs are stored in lexicographic order.
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
