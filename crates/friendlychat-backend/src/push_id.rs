//! Time-ordered child keys.
//!
//! A push id is 20 characters: 8 encode the millisecond timestamp, 12 are
//! random. The alphabet is in ASCII order, so ids sort lexicographically in
//! creation order. Ids generated within the same millisecond (or after the
//! clock stepped backwards) increment the random part of the previous id
//! instead of drawing fresh entropy.

use rand::Rng;

const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";
const TIME_LEN: usize = 8;
const RANDOM_LEN: usize = 12;

/// Length of every generated id.
pub const PUSH_ID_LEN: usize = TIME_LEN + RANDOM_LEN;

/// Generator of strictly increasing push ids.
#[derive(Debug, Default)]
pub struct PushIdGenerator {
    /// Timestamp and random digits of the last id. `None` before the first.
    last: Option<(u64, [u8; RANDOM_LEN])>,
}

impl PushIdGenerator {
    /// Create a generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next id for the given wall-clock time.
    pub fn next_id(&mut self, now_millis: u64) -> String {
        let (millis, random) = match self.last {
            Some((last_millis, mut random)) if now_millis <= last_millis => {
                if increment(&mut random) {
                    (last_millis, random)
                } else {
                    (last_millis + 1, fresh_random())
                }
            },
            _ => (now_millis, fresh_random()),
        };
        self.last = Some((millis, random));

        let mut id = [0u8; PUSH_ID_LEN];
        let mut remaining = millis;
        for slot in id[..TIME_LEN].iter_mut().rev() {
            *slot = PUSH_CHARS[(remaining % 64) as usize];
            remaining /= 64;
        }
        for (slot, digit) in id[TIME_LEN..].iter_mut().zip(random) {
            *slot = PUSH_CHARS[usize::from(digit)];
        }

        id.iter().map(|&b| char::from(b)).collect()
    }
}

fn fresh_random() -> [u8; RANDOM_LEN] {
    let mut rng = rand::rng();
    std::array::from_fn(|_| rng.random_range(0..64))
}

/// Add one to a base-64 digit string. Returns `false` on overflow.
fn increment(digits: &mut [u8; RANDOM_LEN]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit < 63 {
            *digit += 1;
            return true;
        }
        *digit = 0;
    }
    false
}
