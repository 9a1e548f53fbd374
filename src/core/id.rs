//! Player identifier generation

use chrono::Utc;
use rand::Rng;

use crate::constants::{PLAYER_ID_PREFIX, PLAYER_ID_SUFFIX_LEN};

/// Generate an opaque player id of the form `player_<unix-millis>_<base36>`.
///
/// The millisecond timestamp keeps ids roughly ordered by join time and the
/// random base36 suffix separates players joining within the same millisecond.
pub fn generate_player_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..PLAYER_ID_SUFFIX_LEN)
        .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
        .collect();

    format!(
        "{}_{}_{}",
        PLAYER_ID_PREFIX,
        Utc::now().timestamp_millis(),
        suffix
    )
}
