pub const MEMBER_PREFIX: &str = "m";
pub const MATCH_PREFIX: &str = "g";

/// Short random identifier such as `m_1a2b3c4d`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{:08x}", prefix, rand::random::<u32>())
}
