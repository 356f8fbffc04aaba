use crate::model::Tap;
use std::collections::BTreeMap;

type Pool<'a> = BTreeMap<&'a str, Vec<&'a Tap>>;

/// taps still waiting for their opposite-kind counterpart, keyed by card id.
///
/// a pool lives for a single matching run. within a card, taps keep their
/// arrival order; across cards, the [`BTreeMap`] keeps card ids sorted so
/// draining the pools is deterministic.
#[derive(Default)]
pub struct TapPools<'a> {
    pending_on: Pool<'a>,
    pending_off: Pool<'a>,
}

impl<'a> TapPools<'a> {
    /// removes and returns the first pending tap-off on this card made later
    /// on the same day as the tap-on.
    pub fn take_tap_off_after(&mut self, tap_on: &Tap) -> Option<&'a Tap> {
        take_first(&mut self.pending_off, &tap_on.card_id, |tap_off| {
            tap_off.timestamp > tap_on.timestamp && tap_off.is_same_day(tap_on)
        })
    }

    /// removes and returns the first pending tap-on on this card made earlier
    /// on the same day as the tap-off.
    pub fn take_tap_on_before(&mut self, tap_off: &Tap) -> Option<&'a Tap> {
        take_first(&mut self.pending_on, &tap_off.card_id, |tap_on| {
            tap_on.timestamp < tap_off.timestamp && tap_on.is_same_day(tap_off)
        })
    }

    pub fn hold_tap_on(&mut self, tap_on: &'a Tap) {
        hold(&mut self.pending_on, tap_on);
    }

    pub fn hold_tap_off(&mut self, tap_off: &'a Tap) {
        hold(&mut self.pending_off, tap_off);
    }

    /// consumes the pools, returning the unmatched tap-ons and tap-offs,
    /// each ordered by card id then arrival.
    pub fn into_orphans(self) -> (Vec<&'a Tap>, Vec<&'a Tap>) {
        let orphan_ons = self.pending_on.into_values().flatten().collect();
        let orphan_offs = self.pending_off.into_values().flatten().collect();
        (orphan_ons, orphan_offs)
    }
}

fn hold<'a>(pool: &mut Pool<'a>, tap: &'a Tap) {
    pool.entry(tap.card_id.as_str()).or_default().push(tap);
}

fn take_first<'a, P>(pool: &mut Pool<'a>, card_id: &str, predicate: P) -> Option<&'a Tap>
where
    P: Fn(&Tap) -> bool,
{
    let candidates = pool.get_mut(card_id)?;
    let position = candidates.iter().position(|tap| predicate(tap))?;
    let tap = candidates.remove(position);
    if candidates.is_empty() {
        pool.remove(card_id);
    }
    Some(tap)
}
