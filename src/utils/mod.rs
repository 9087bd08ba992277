pub mod ip;

use uuid::Uuid;

/// 短链接 id 长度
pub const LINK_ID_LENGTH: usize = 8;

/// 生成短链接 id：随机 UUID v4 的前 8 个十六进制字符
pub fn generate_link_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(LINK_ID_LENGTH);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_link_id_shape() {
        let id = generate_link_id();
        assert_eq!(id.len(), LINK_ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_link_id_varies() {
        let ids: std::collections::HashSet<String> = (0..100).map(|_| generate_link_id()).collect();
        assert!(ids.len() > 95);
    }
}
