use chrono::{DateTime, Utc};
use crate::domain::models::booking::Booking;
use crate::error::AppError;

pub const CONFLICT_MESSAGE: &str = "This resource is already booked during the requested time. \
    Please choose another slot or resource, or adjust your times.";

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)` share at least one instant.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// First existing booking on the candidate's resource whose interval overlaps the candidate.
/// The candidate itself (same id) is never reported, so edits can keep their own slot.
pub fn find_conflict<'a>(candidate: &Booking, existing: &'a [Booking]) -> Option<&'a Booking> {
    existing.iter().find(|b| {
        b.id != candidate.id
            && b.resource_id == candidate.resource_id
            && overlaps(candidate.start_time, candidate.end_time, b.start_time, b.end_time)
    })
}

pub fn check_conflict(candidate: &Booking, existing: &[Booking]) -> Result<(), AppError> {
    match find_conflict(candidate, existing) {
        Some(_) => Err(AppError::Conflict(CONFLICT_MESSAGE.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::NewBookingParams;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 3, 4, hour, minute, 0).unwrap()
    }

    fn booking(resource_id: &str, start: DateTime<Utc>, end: DateTime<Utc>, who: &str) -> Booking {
        Booking::new(NewBookingParams {
            resource_id: resource_id.to_string(),
            start,
            end,
            booked_by: who.to_string(),
            purpose: "Meeting".to_string(),
        })
    }

    #[test]
    fn test_touching_intervals_do_not_conflict() {
        let existing = vec![booking("room", at(9, 0), at(10, 0), "Alice")];

        let after = booking("room", at(10, 0), at(11, 0), "Bob");
        assert!(check_conflict(&after, &existing).is_ok());

        let before = booking("room", at(8, 0), at(9, 0), "Carol");
        assert!(check_conflict(&before, &existing).is_ok());
    }

    #[test]
    fn test_contained_and_identical_intervals_conflict() {
        let existing = vec![booking("room", at(9, 0), at(10, 0), "Alice")];

        let inside = booking("room", at(9, 30), at(9, 45), "Bob");
        assert!(matches!(check_conflict(&inside, &existing), Err(AppError::Conflict(_))));

        let same = booking("room", at(9, 0), at(10, 0), "Bob");
        assert!(find_conflict(&same, &existing).is_some());

        let covering = booking("room", at(8, 0), at(12, 0), "Bob");
        assert!(find_conflict(&covering, &existing).is_some());

        let partial = booking("room", at(9, 59), at(10, 30), "Bob");
        assert!(find_conflict(&partial, &existing).is_some());
    }

    #[test]
    fn test_other_resources_are_ignored() {
        let existing = vec![booking("projector", at(9, 0), at(10, 0), "Alice")];
        let candidate = booking("room", at(9, 0), at(10, 0), "Bob");
        assert!(find_conflict(&candidate, &existing).is_none());
    }

    #[test]
    fn test_booking_does_not_conflict_with_itself() {
        let original = booking("room", at(9, 0), at(10, 0), "Alice");
        let mut moved = original.clone();
        moved.start_time = at(9, 30);
        moved.end_time = at(10, 30);

        assert!(find_conflict(&moved, std::slice::from_ref(&original)).is_none());
    }

    #[test]
    fn test_overlap_matches_half_open_definition() {
        let slots: Vec<(u32, u32)> = vec![(8, 9), (8, 10), (9, 10), (9, 11), (10, 11), (11, 12)];
        for &(a_s, a_e) in &slots {
            for &(b_s, b_e) in &slots {
                let expected = a_s < b_e && a_e > b_s;
                assert_eq!(
                    overlaps(at(a_s, 0), at(a_e, 0), at(b_s, 0), at(b_e, 0)),
                    expected,
                    "[{a_s},{a_e}) vs [{b_s},{b_e})"
                );
            }
        }
    }
}
