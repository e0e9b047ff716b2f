use prism_config::UpstreamConfig;
use url::Url;

/// Which upstream API surface a request path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// Vendor-specific paths such as `/v1beta/models/...`
    Native,
    /// OpenAI-style paths under the compatible prefix
    Compatible,
}

/// How the dispatcher handles a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchTarget {
    /// Relay to the native upstream
    Native,
    /// Relay to the compatible upstream
    Compatible,
    /// Answer locally through the transcription adapter
    Transcription,
}

/// Outcome of routing a single request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    pub target: UpstreamKind,
    pub rewritten_path: String,
}

/// Classifies request paths and rewrites them for the chosen upstream
#[derive(Debug, Clone)]
pub struct PathRouter {
    native_url: Url,
    compatible_url: Url,
    compatible_prefix: String,
    transcription_marker: String,
}

impl PathRouter {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            native_url: config.native_url.clone(),
            compatible_url: config.compatible_url.clone(),
            compatible_prefix: config.compatible_prefix.clone(),
            transcription_marker: config.transcription_marker.clone(),
        }
    }

    /// Classify a path by a plain prefix test
    ///
    /// `/v1beta/...` stays native even though it starts with `/v1`.
    pub fn classify(&self, path: &str) -> UpstreamKind {
        if path.starts_with(&self.compatible_prefix) {
            UpstreamKind::Compatible
        } else {
            UpstreamKind::Native
        }
    }

    /// Decide between forwarding and local transcription handling
    pub fn dispatch_target(&self, path: &str) -> DispatchTarget {
        match self.classify(path) {
            UpstreamKind::Native => DispatchTarget::Native,
            UpstreamKind::Compatible if path.contains(&self.transcription_marker) => DispatchTarget::Transcription,
            UpstreamKind::Compatible => DispatchTarget::Compatible,
        }
    }

    /// Compute the outbound path for a forwarded request
    pub fn route(&self, path: &str) -> RouteDecision {
        let target = self.classify(path);
        let strip = match target {
            UpstreamKind::Native => None,
            UpstreamKind::Compatible => Some(self.compatible_prefix.as_str()),
        };

        RouteDecision {
            target,
            rewritten_path: rewrite(self.upstream_url(target).path(), path, strip),
        }
    }

    /// Base URL of an upstream
    pub const fn upstream_url(&self, kind: UpstreamKind) -> &Url {
        match kind {
            UpstreamKind::Native => &self.native_url,
            UpstreamKind::Compatible => &self.compatible_url,
        }
    }
}

/// Join an upstream base path and a request path, optionally stripping a
/// prefix from the request path first
pub fn rewrite(base_path: &str, request_path: &str, strip_prefix: Option<&str>) -> String {
    let path = strip_prefix
        .filter(|prefix| !prefix.is_empty())
        .and_then(|prefix| request_path.strip_prefix(prefix))
        .unwrap_or(request_path);

    single_joining_slash(base_path, path)
}

/// Concatenate two path pieces with exactly one `/` between them
pub fn single_joining_slash(a: &str, b: &str) -> String {
    match (a.ends_with('/'), b.starts_with('/')) {
        (true, true) => format!("{a}{}", &b[1..]),
        (false, false) => format!("{a}/{b}"),
        _ => format!("{a}{b}"),
    }
}
