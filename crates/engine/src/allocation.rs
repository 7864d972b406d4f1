//! Greedy surplus allocation for compliance pools.
//!
//! Given the Compliance Balance each member brings into the pool, deficits
//! are covered by surpluses: the worst-off deficit draws first, and the
//! largest surplus is drained first. The sweep only moves balance between
//! members, it never creates or destroys it.
//!
//! The sort comparators are part of the contract: they decide per-ship
//! outcomes, not just aggregate totals. Ties keep input order (stable sort).

/// A pool member as submitted by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolMemberInput {
    pub ship_id: String,
    pub cb_before: f64,
}

/// A pool member after the allocation sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct AllocatedMember {
    pub ship_id: String,
    pub cb_before: f64,
    pub cb_after: f64,
}

impl AllocatedMember {
    fn from_input(member: &PoolMemberInput) -> Self {
        Self {
            ship_id: member.ship_id.clone(),
            cb_before: member.cb_before,
            cb_after: member.cb_before,
        }
    }
}

/// Redistributes surplus CB over deficit members.
///
/// Returns every member with its resulting `cb_after`, deficits first (in
/// service order), then surpluses (in drain order). Works on mutable copies;
/// the input is never modified.
pub fn allocate_surplus(members: &[PoolMemberInput]) -> Vec<AllocatedMember> {
    let mut deficits: Vec<AllocatedMember> = members
        .iter()
        .filter(|m| m.cb_before < 0.0)
        .map(AllocatedMember::from_input)
        .collect();
    // Most negative first: the worst-off ship is served first.
    deficits.sort_by(|a, b| a.cb_before.total_cmp(&b.cb_before));

    let mut surpluses: Vec<AllocatedMember> = members
        .iter()
        .filter(|m| m.cb_before >= 0.0)
        .map(AllocatedMember::from_input)
        .collect();
    // Largest surplus first: the biggest donor is drained first.
    surpluses.sort_by(|a, b| b.cb_before.total_cmp(&a.cb_before));

    let mut surplus_index = 0;

    for deficit in deficits.iter_mut() {
        let mut needed = -deficit.cb_after;

        while needed > 0.0 && surplus_index < surpluses.len() {
            let donor = &mut surpluses[surplus_index];
            let available = donor.cb_after;

            if available <= 0.0 {
                surplus_index += 1;
                continue;
            }

            let transfer = needed.min(available);
            deficit.cb_after += transfer;
            donor.cb_after -= transfer;
            needed -= transfer;
        }
    }

    deficits.append(&mut surpluses);
    deficits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(ship_id: &str, cb_before: f64) -> PoolMemberInput {
        PoolMemberInput {
            ship_id: ship_id.to_string(),
            cb_before,
        }
    }

    fn find<'a>(allocated: &'a [AllocatedMember], ship_id: &str) -> &'a AllocatedMember {
        allocated
            .iter()
            .find(|m| m.ship_id == ship_id)
            .unwrap_or_else(|| panic!("missing member {ship_id}"))
    }

    #[test]
    fn single_surplus_covers_single_deficit() {
        let allocated = allocate_surplus(&[member("Surplus", 100.0), member("Deficit", -50.0)]);

        assert_eq!(find(&allocated, "Deficit").cb_after, 0.0);
        assert_eq!(find(&allocated, "Surplus").cb_after, 50.0);
    }

    #[test]
    fn worst_deficit_drains_largest_surplus_first() {
        let allocated = allocate_surplus(&[
            member("S1", 100.0),
            member("D1", -50.0),
            member("S2", 20.0),
            member("D2", -80.0),
        ]);

        // D2 is most negative and takes all of S1's 100; D1 then takes S2's 20.
        assert_eq!(find(&allocated, "D2").cb_after, 20.0);
        assert_eq!(find(&allocated, "D1").cb_after, -30.0);
        assert_eq!(find(&allocated, "S1").cb_after, 0.0);
        assert_eq!(find(&allocated, "S2").cb_after, 0.0);
    }

    #[test]
    fn totals_are_conserved() {
        let members = [
            member("A", 312.5),
            member("B", -41.25),
            member("C", 0.0),
            member("D", -250.0),
            member("E", 17.75),
        ];
        let allocated = allocate_surplus(&members);

        let before: f64 = members.iter().map(|m| m.cb_before).sum();
        let after: f64 = allocated.iter().map(|m| m.cb_after).sum();
        assert_eq!(before, after);
    }

    #[test]
    fn no_deficit_exits_worse_and_no_donor_goes_negative() {
        let allocated = allocate_surplus(&[
            member("D1", -300.0),
            member("S1", 120.0),
            member("D2", -10.0),
            member("S2", 90.0),
        ]);

        for m in &allocated {
            if m.cb_before < 0.0 {
                assert!(m.cb_after >= m.cb_before, "{} exited worse off", m.ship_id);
            } else {
                assert!(m.cb_after >= 0.0, "{} driven into deficit", m.ship_id);
            }
        }
    }

    #[test]
    fn all_surplus_pool_is_untouched() {
        let allocated = allocate_surplus(&[member("A", 10.0), member("B", 0.0)]);

        assert_eq!(find(&allocated, "A").cb_after, 10.0);
        assert_eq!(find(&allocated, "B").cb_after, 0.0);
    }

    #[test]
    fn terminates_when_surplus_runs_out() {
        // Negative total is rejected upstream; the sweep itself must still
        // stop at cursor exhaustion and leave the residual deficit in place.
        let allocated = allocate_surplus(&[member("D", -100.0), member("S", 30.0)]);

        assert_eq!(find(&allocated, "D").cb_after, -70.0);
        assert_eq!(find(&allocated, "S").cb_after, 0.0);
    }

    #[test]
    fn equal_values_keep_input_order() {
        let allocated = allocate_surplus(&[
            member("S1", 40.0),
            member("S2", 40.0),
            member("D1", -40.0),
        ]);

        // S1 and S2 tie; the stable sort keeps S1 first, so only S1 is drained.
        assert_eq!(find(&allocated, "S1").cb_after, 0.0);
        assert_eq!(find(&allocated, "S2").cb_after, 40.0);
    }

    #[test]
    fn deficits_precede_surpluses_in_output() {
        let allocated = allocate_surplus(&[
            member("S1", 50.0),
            member("D1", -20.0),
            member("D2", -10.0),
        ]);

        assert_eq!(allocated[0].ship_id, "D1");
        assert_eq!(allocated[1].ship_id, "D2");
        assert_eq!(allocated[2].ship_id, "S1");
    }
}
