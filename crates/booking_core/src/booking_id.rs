use uuid::Uuid;

pub const DEFAULT_BOOKING_ID_PREFIX: &str = "FH-2025-";

const SUFFIX_MIN: u32 = 100_000;
const SUFFIX_SPAN: u32 = 900_000;

/// Source of the numeric part of a booking reference.
pub trait BookingIdSource: Send {
    /// Returns a value in `100000..=999999`.
    fn next_suffix(&mut self) -> u32;
}

/// Draws suffixes from random v4 UUIDs. References are cosmetic and may
/// collide.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomBookingIds;

impl BookingIdSource for RandomBookingIds {
    fn next_suffix(&mut self) -> u32 {
        let entropy = Uuid::new_v4().as_u128();
        SUFFIX_MIN + (entropy % u128::from(SUFFIX_SPAN)) as u32
    }
}

/// Hands out the given suffixes in order, repeating the last one.
#[derive(Debug, Clone)]
pub struct FixedBookingIds {
    suffixes: Vec<u32>,
    next: usize,
}

impl FixedBookingIds {
    pub fn new(suffixes: Vec<u32>) -> Self {
        Self {
            suffixes,
            next: 0,
        }
    }
}

impl BookingIdSource for FixedBookingIds {
    fn next_suffix(&mut self) -> u32 {
        let Some(last) = self.suffixes.len().checked_sub(1) else {
            return SUFFIX_MIN;
        };
        let value = self.suffixes[self.next.min(last)];
        self.next += 1;
        value.clamp(SUFFIX_MIN, SUFFIX_MIN + SUFFIX_SPAN - 1)
    }
}

pub fn generate_booking_id(prefix: &str, source: &mut dyn BookingIdSource) -> String {
    format!("{prefix}{}", source.next_suffix())
}
