use chrono::Utc;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Short workout identifier: base-36 wall-clock millis, `-`, base-36 of 64 random bits.
///
/// Unique in practice within a session; not meant to be unguessable.
pub fn generate_id() -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let suffix: u64 = rand::random();
    format!("{}-{}", to_base36(millis), to_base36(suffix))
}

pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(13);
    while n > 0 {
        let d = usize::try_from(n % 36).unwrap_or(0);
        digits.push(BASE36[d]);
        n /= 36;
    }
    digits.reverse();

    String::from_utf8(digits).unwrap_or_default()
}
