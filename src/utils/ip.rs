//! 客户端 IP 提取
//!
//! 默认使用 TCP 连接地址；只有当连接来自 `server.trusted_proxies`
//! 中的地址（单 IP 或 CIDR）时才读取 X-Forwarded-For / X-Real-IP。

use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;
use tracing::debug;

/// 检查 IP 是否在可信代理列表中
pub fn is_trusted_proxy(ip: &str, trusted_proxies: &[String]) -> bool {
    // 先尝试解析为 SocketAddr（支持 ip:port），如果失败再尝试纯 IpAddr
    let ip_addr = if let Ok(socket_addr) = ip.parse::<SocketAddr>() {
        socket_addr.ip()
    } else if let Ok(ip_addr) = ip.parse::<IpAddr>() {
        ip_addr
    } else {
        return false;
    };

    trusted_proxies.iter().any(|proxy| {
        if proxy.contains('/') {
            ip_in_cidr(&ip_addr, proxy)
        } else {
            proxy.parse::<IpAddr>().is_ok_and(|p| p == ip_addr)
        }
    })
}

/// CIDR 检查
pub fn ip_in_cidr(ip: &IpAddr, cidr: &str) -> bool {
    let Some((network, prefix_len)) = cidr.split_once('/') else {
        return false;
    };

    let Ok(prefix_len): Result<u8, _> = prefix_len.parse() else {
        return false;
    };

    let Ok(network_addr) = network.parse::<IpAddr>() else {
        return false;
    };

    match (ip, network_addr) {
        (IpAddr::V4(ip), IpAddr::V4(net)) => {
            if prefix_len > 32 {
                return false;
            }
            let mask = u32::MAX.checked_shl(32 - prefix_len as u32).unwrap_or(0);
            (u32::from_be_bytes(ip.octets()) & mask) == (u32::from_be_bytes(net.octets()) & mask)
        }
        (IpAddr::V6(ip), IpAddr::V6(net)) => {
            if prefix_len > 128 {
                return false;
            }
            let mask = u128::MAX.checked_shl(128 - prefix_len as u32).unwrap_or(0);
            (u128::from_be_bytes(ip.octets()) & mask) == (u128::from_be_bytes(net.octets()) & mask)
        }
        _ => false, // IPv4 vs IPv6 不匹配
    }
}

/// 从 HeaderMap 提取转发的 IP（X-Forwarded-For 第一个，其次 X-Real-IP）
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

/// 根据连接地址与可信代理列表决定客户端 IP
pub fn resolve_client_ip(
    peer_ip: Option<IpAddr>,
    headers: &HeaderMap,
    trusted_proxies: &[String],
) -> Option<String> {
    let Some(peer_ip) = peer_ip else {
        return extract_forwarded_ip_from_headers(headers)
            .filter(|_| !trusted_proxies.is_empty());
    };

    let peer = peer_ip.to_string();
    if !trusted_proxies.is_empty() && is_trusted_proxy(&peer, trusted_proxies) {
        let real_ip = extract_forwarded_ip_from_headers(headers).unwrap_or_else(|| peer.clone());
        debug!("Trusted proxy: {} -> {}", peer, real_ip);
        return Some(real_ip);
    }

    Some(peer)
}

/// 从 HttpRequest 提取真实客户端 IP
pub fn extract_client_ip(req: &HttpRequest, trusted_proxies: &[String]) -> Option<String> {
    resolve_client_ip(
        req.peer_addr().map(|addr| addr.ip()),
        req.headers(),
        trusted_proxies,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers_with(name: &'static str, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
        headers
    }

    #[test]
    fn test_ip_in_cidr_ipv4() {
        let ip: IpAddr = "192.168.1.100".parse().unwrap();
        assert!(ip_in_cidr(&ip, "192.168.1.0/24"));
        assert!(ip_in_cidr(&ip, "192.168.0.0/16"));
        assert!(!ip_in_cidr(&ip, "192.168.2.0/24"));
        assert!(!ip_in_cidr(&ip, "10.0.0.0/8"));
        assert!(!ip_in_cidr(&ip, "10.0.0.0/40"));
    }

    #[test]
    fn test_ip_in_cidr_ipv6() {
        let ip: IpAddr = "2001:db8::1".parse().unwrap();
        assert!(ip_in_cidr(&ip, "2001:db8::/32"));
        assert!(!ip_in_cidr(&ip, "2001:db9::/32"));
        assert!(!ip_in_cidr(&ip, "10.0.0.0/8"));
    }

    #[test]
    fn test_is_trusted_proxy() {
        let proxies = vec!["127.0.0.1".to_string(), "192.168.1.0/24".to_string()];

        assert!(is_trusted_proxy("127.0.0.1", &proxies));
        assert!(is_trusted_proxy("127.0.0.1:8080", &proxies));
        assert!(is_trusted_proxy("192.168.1.50", &proxies));
        assert!(!is_trusted_proxy("8.8.8.8", &proxies));
        assert!(!is_trusted_proxy("not-an-ip", &proxies));
    }

    #[test]
    fn test_forwarded_header_ignored_without_trusted_proxy() {
        let headers = headers_with("x-forwarded-for", "203.0.113.9");
        let ip = resolve_client_ip(Some("10.1.2.3".parse().unwrap()), &headers, &[]);
        assert_eq!(ip.as_deref(), Some("10.1.2.3"));
    }

    #[test]
    fn test_forwarded_header_used_for_trusted_proxy() {
        let headers = headers_with("x-forwarded-for", "203.0.113.9, 10.0.0.2");
        let proxies = vec!["10.0.0.0/8".to_string()];
        let ip = resolve_client_ip(Some("10.1.2.3".parse().unwrap()), &headers, &proxies);
        assert_eq!(ip.as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn test_real_ip_fallback() {
        let headers = headers_with("x-real-ip", "198.51.100.4");
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers).as_deref(),
            Some("198.51.100.4")
        );
    }

    #[test]
    fn test_no_peer_no_proxy() {
        let headers = headers_with("x-forwarded-for", "203.0.113.9");
        assert!(resolve_client_ip(None, &headers, &[]).is_none());
    }
}
