use crate::config::WidgetConfig;
use crate::error::{ChatError, ChatResult};
use rand::Rng;
use std::fmt;
use time::OffsetDateTime;
use url::Url;

const SESSION_PREFIX: &str = "sunny_";
const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Client-side session identifier. Opaque to the backend; only used as a
/// path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// `sunny_<9 base36 chars>_<unix millis>`
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        Self(format!("{SESSION_PREFIX}{suffix}_{millis}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved endpoints for one session.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoints {
    pub socket: Url,
    pub upload: Url,
    api_base: Url,
}

impl Endpoints {
    pub fn resolve(config: &WidgetConfig, session: &SessionId) -> ChatResult<Self> {
        let api_base = Url::parse(&config.api_url)?;
        let ws_base = match &config.ws_url {
            Some(explicit) => Url::parse(explicit)?,
            None => websocket_base(&api_base)?,
        };
        Ok(Self {
            socket: join_segments(&ws_base, &["ws", session.as_str()])?,
            upload: join_segments(&api_base, &["upload-salary-slip", session.as_str()])?,
            api_base,
        })
    }

    /// Absolute link for a `download_url`. Relative paths are appended to the
    /// API base behind one `/`, absolute URLs pass through.
    pub fn download(&self, download_url: &str) -> ChatResult<Url> {
        if let Ok(absolute) = Url::parse(download_url) {
            return Ok(absolute);
        }
        let base = self.api_base.as_str().trim_end_matches('/');
        let path = download_url.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

fn websocket_base(api_base: &Url) -> ChatResult<Url> {
    let scheme = match api_base.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(ChatError::UnsupportedScheme(other.to_string())),
    };
    let mut ws = api_base.clone();
    ws.set_scheme(scheme)
        .map_err(|_| ChatError::UnsupportedScheme(scheme.to_string()))?;
    Ok(ws)
}

fn join_segments(base: &Url, segments: &[&str]) -> ChatResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ChatError::UnsupportedScheme(base.scheme().to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_expected_shape() {
        let id = SessionId::generate();
        let rest = id.as_str().strip_prefix(SESSION_PREFIX).unwrap();
        let (suffix, millis) = rest.split_once('_').unwrap();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
        assert!(millis.parse::<u128>().is_ok());
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn endpoints_follow_api_scheme() {
        let session = SessionId::from("abc123");
        let config = WidgetConfig::default();
        let endpoints = Endpoints::resolve(&config, &session).unwrap();
        assert_eq!(endpoints.socket.as_str(), "ws://localhost:8000/ws/abc123");
        assert_eq!(
            endpoints.upload.as_str(),
            "http://localhost:8000/upload-salary-slip/abc123"
        );

        let secure = WidgetConfig {
            api_url: "https://loans.example.com/api".into(),
            ..WidgetConfig::default()
        };
        let endpoints = Endpoints::resolve(&secure, &session).unwrap();
        assert_eq!(
            endpoints.socket.as_str(),
            "wss://loans.example.com/api/ws/abc123"
        );
    }

    #[test]
    fn explicit_socket_base_wins() {
        let config = WidgetConfig {
            ws_url: Some("ws://chat.internal:9000".into()),
            ..WidgetConfig::default()
        };
        let endpoints = Endpoints::resolve(&config, &SessionId::from("s1")).unwrap();
        assert_eq!(endpoints.socket.as_str(), "ws://chat.internal:9000/ws/s1");
    }

    #[test]
    fn download_links_are_rooted_at_api() {
        let endpoints =
            Endpoints::resolve(&WidgetConfig::default(), &SessionId::from("s1")).unwrap();
        let link = endpoints.download("/download/sanction_letter.pdf").unwrap();
        assert_eq!(
            link.as_str(),
            "http://localhost:8000/download/sanction_letter.pdf"
        );

        let prefixed = WidgetConfig {
            api_url: "https://loans.example.com/api".into(),
            ..WidgetConfig::default()
        };
        let endpoints = Endpoints::resolve(&prefixed, &SessionId::from("s1")).unwrap();
        assert_eq!(
            endpoints.download("/download/a.pdf").unwrap().as_str(),
            "https://loans.example.com/api/download/a.pdf"
        );
    }

    #[test]
    fn download_paths_without_leading_slash_are_joined() {
        let endpoints =
            Endpoints::resolve(&WidgetConfig::default(), &SessionId::from("s1")).unwrap();
        assert_eq!(
            endpoints.download("download/a.pdf").unwrap().as_str(),
            "http://localhost:8000/download/a.pdf"
        );
    }

    #[test]
    fn rejects_unknown_schemes() {
        let config = WidgetConfig {
            api_url: "ftp://files.example.com".into(),
            ..WidgetConfig::default()
        };
        assert!(matches!(
            Endpoints::resolve(&config, &SessionId::from("s1")),
            Err(ChatError::UnsupportedScheme(_))
        ));
    }
}
