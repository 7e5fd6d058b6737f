//! Image id synthesis.
//!
//! Ids have the shape `<prefix>_<epoch millis>_<suffix>` where the suffix is
//! [`ID_SUFFIX_LEN`] random lowercase base36 characters. Two ids minted in the
//! same millisecond differ only by the suffix, so uniqueness is probabilistic.

use chrono::Utc;
use rand::Rng;

use crate::constants::ID_SUFFIX_LEN;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `<prefix>_<millis>_<random>`
pub fn generate_id(prefix: &str) -> String {
    format!(
        "{prefix}_{}_{}",
        Utc::now().timestamp_millis(),
        random_suffix(ID_SUFFIX_LEN)
    )
}

/// `<prefix>_<millis>`, used for uploads.
pub fn timestamped_id(prefix: &str) -> String {
    format!("{prefix}_{}", Utc::now().timestamp_millis())
}

fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("generated");
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "generated");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), ID_SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_id_distinct() {
        let a = generate_id("gallery");
        let b = generate_id("gallery");
        assert_ne!(a, b);
    }

    #[test]
    fn test_timestamped_id() {
        let id = timestamped_id("uploaded");
        let millis = id.strip_prefix("uploaded_").unwrap();
        assert!(millis.parse::<i64>().is_ok());
    }
}
