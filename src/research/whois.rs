//! Domain registration lookup over the WHOIS protocol (RFC 3912)
//!
//! The root server (normally IANA) is asked first; if it names a more
//! specific registry server with a `refer:` line, that server is asked too
//! and its answer is appended.

use std::net::IpAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

const WHOIS_PORT: u16 = 43;

/// Registrable domain for a host: its last two labels
///
/// Multi-label public suffixes (`co.uk`) are not handled. IP addresses have
/// no registrable domain.
pub fn registrable_domain(host: &str) -> Option<String> {
    let host = host.trim_end_matches('.');
    if host.parse::<IpAddr>().is_ok() {
        return None;
    }

    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() < 2 {
        return None;
    }
    Some(labels[labels.len() - 2..].join(".").to_ascii_lowercase())
}

/// Server named by a `refer:` (IANA) or `whois:` line, if any
pub fn referral(response: &str) -> Option<String> {
    response.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        ((key == "refer" || key == "whois") && !value.is_empty()).then(|| value.to_string())
    })
}

/// Sends one query and reads the whole answer
pub async fn query(server: &str, domain: &str, limit: Duration) -> std::io::Result<String> {
    let mut stream = timeout(limit, TcpStream::connect(server)).await??;
    stream.write_all(format!("{}\r\n", domain).as_bytes()).await?;

    let mut buf = Vec::new();
    timeout(limit, stream.read_to_end(&mut buf)).await??;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Full lookup starting at `root_server` (`host:port`)
///
/// Returns `None` if the root query fails. A failing referral query keeps
/// the root answer.
pub async fn lookup(root_server: &str, domain: &str, limit: Duration) -> Option<String> {
    let root_answer = match query(root_server, domain, limit).await {
        Ok(answer) => answer,
        Err(e) => {
            tracing::warn!("WHOIS query to {} failed: {}", root_server, e);
            return None;
        }
    };

    let Some(refer) = referral(&root_answer) else {
        return Some(root_answer);
    };
    let referred = format!("{}:{}", refer, WHOIS_PORT);
    if referred == root_server {
        return Some(root_answer);
    }

    tracing::debug!("WHOIS referral for {} to {}", domain, referred);
    match query(&referred, domain, limit).await {
        Ok(answer) => Some(format!("{}\n{}", root_answer.trim_end(), answer)),
        Err(e) => {
            tracing::warn!("WHOIS query to {} failed: {}", referred, e);
            Some(root_answer)
        }
    }
}
