//! Push ids: 20-character keys that sort by creation time.
//!
//! 8 characters encode the millisecond timestamp, 12 are random. Two ids
//! minted in the same millisecond reuse the previous random part incremented
//! by one, so ids from one generator are strictly increasing.

use std::sync::Mutex;
use rand::Rng;

const ALPHABET: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Default)]
pub struct PushIdGenerator {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    last_millis: i64,
    last_random: [u8; 12],
}

impl PushIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        self.next_id_at(chrono::Utc::now().timestamp_millis())
    }

    fn next_id_at(&self, now: i64) -> String {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if now == state.last_millis {
            for digit in state.last_random.iter_mut().rev() {
                if *digit == 63 {
                    *digit = 0;
                } else {
                    *digit += 1;
                    break;
                }
            }
        } else {
            let mut rng = rand::rng();
            for digit in state.last_random.iter_mut() {
                *digit = rng.random_range(0..64);
            }
            state.last_millis = now;
        }

        let mut id = String::with_capacity(20);
        let mut millis = now;
        let mut time_chars = [0u8; 8];
        for slot in time_chars.iter_mut().rev() {
            *slot = ALPHABET[(millis % 64) as usize];
            millis /= 64;
        }
        id.extend(time_chars.iter().map(|b| *b as char));
        id.extend(state.last_random.iter().map(|d| ALPHABET[*d as usize] as char));
        id
    }
}
